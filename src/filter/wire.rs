//! Wire form of filters.
//!
//! A filter is a sequence whose first element is the operator tag, followed
//! by its operands: strings for leaves, nested sequences for combinators.
//! Decoding goes through [`build`], so arity and operand rules apply to
//! everything read off the wire.

use super::builder::{Operand, build};
use super::{Filter, Operator};
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

impl Serialize for Filter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let values: Vec<&str> = [self.first(), self.second()].into_iter().flatten().collect();
        let terms = self.terms();

        let mut seq = serializer.serialize_seq(Some(1 + values.len() + terms.len()))?;
        seq.serialize_element(self.operator().as_str())?;

        for value in values {
            seq.serialize_element(value)?;
        }
        for term in terms {
            seq.serialize_element(term)?;
        }

        seq.end()
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(FilterVisitor)
    }
}

struct FilterVisitor;

impl<'de> Visitor<'de> for FilterVisitor {
    type Value = Filter;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a filter sequence such as [\"=\", \"host\", \"web01\"]")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Filter, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let tag: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let operator: Operator = tag.parse().map_err(de::Error::custom)?;

        let mut operands = Vec::new();
        while let Some(operand) = seq.next_element::<Operand>()? {
            operands.push(operand);
        }

        build(operator, operands).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Operand {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(OperandVisitor)
    }
}

struct OperandVisitor;

impl<'de> Visitor<'de> for OperandVisitor {
    type Value = Operand;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or a nested filter")
    }

    fn visit_str<E>(self, value: &str) -> Result<Operand, E>
    where
        E: de::Error,
    {
        Ok(Operand::Value(value.to_string()))
    }

    fn visit_string<E>(self, value: String) -> Result<Operand, E>
    where
        E: de::Error,
    {
        Ok(Operand::Value(value))
    }

    fn visit_seq<A>(self, seq: A) -> Result<Operand, A::Error>
    where
        A: SeqAccess<'de>,
    {
        FilterVisitor.visit_seq(seq).map(Operand::Filter)
    }
}

/// Decode a filter from its JSON wire form
pub fn from_json(input: &str) -> Result<Filter, serde_json::Error> {
    serde_json::from_str(input)
}

/// Encode a filter into its compact JSON wire form
pub fn to_json(filter: &Filter) -> Result<String, serde_json::Error> {
    serde_json::to_string(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_nested() {
        let filter = Filter::and(vec![
            Filter::match_tag("host", "a"),
            Filter::not(Filter::has_tag("role")),
            Filter::True,
        ])
        .unwrap();

        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!(["and", ["=", "host", "a"], ["not", ["+", "role"]], ["true"]])
        );
    }

    #[test]
    fn test_decode_matches_builders() {
        let filter = from_json(r#"["or", ["^", "host", "web"], ["~", "dc", "eu-.*"], ["key", "cpu"]]"#)
            .unwrap();

        let expected = Filter::or(vec![
            Filter::starts_with("host", "web"),
            Filter::regex("dc", "eu-.*").unwrap(),
            Filter::match_key("cpu"),
        ])
        .unwrap();

        assert_eq!(filter, expected);
        assert_eq!(from_json(&to_json(&filter).unwrap()).unwrap(), filter);
    }

    #[test]
    fn test_decode_rejects_bad_arity() {
        let err = from_json(r#"["not"]"#).unwrap_err();
        assert!(err.to_string().contains("takes exactly one operand, got 0"), "{err}");

        let err = from_json(r#"["=", "host"]"#).unwrap_err();
        assert!(err.to_string().contains("exactly two operands"), "{err}");

        let err = from_json(r#"["and"]"#).unwrap_err();
        assert!(err.to_string().contains("at least one operand"), "{err}");
    }

    #[test]
    fn test_decode_rejects_unknown_operator() {
        let err = from_json(r#"["xor", ["true"]]"#).unwrap_err();
        assert!(err.to_string().contains("Unknown filter operator: 'xor'"), "{err}");
    }

    #[test]
    fn test_decode_rejects_wrong_operand_kind() {
        let err = from_json(r#"["and", "host"]"#).unwrap_err();
        assert!(err.to_string().contains("expects filter operands"), "{err}");

        let err = from_json(r#"["+", ["true"]]"#).unwrap_err();
        assert!(err.to_string().contains("expects string operands"), "{err}");
    }

    #[test]
    fn test_decode_rejects_non_sequence() {
        assert!(from_json(r#"{"and": []}"#).is_err());
        assert!(from_json("[]").is_err());
    }
}
