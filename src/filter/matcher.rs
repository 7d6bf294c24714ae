use super::Filter;
use crate::series::Series;

impl Filter {
    /// Evaluate the filter against a series.
    ///
    /// Regex leaves match the whole tag value.
    pub fn matches(&self, series: &Series) -> bool {
        match self {
            Filter::True => true,
            Filter::False => false,
            Filter::MatchKey(value) => series.key == *value,
            Filter::HasTag(key) => series.tags.contains_key(key),
            Filter::MatchTag { key, value } => series.tag(key) == Some(value.as_str()),
            Filter::StartsWith { key, prefix } => series
                .tag(key)
                .is_some_and(|v| v.starts_with(prefix.as_str())),
            Filter::Regex { key, pattern } => series
                .tag(key)
                .is_some_and(|v| pattern.is_match(v)),
            Filter::And(terms) => terms.iter().all(|term| term.matches(series)),
            Filter::Or(terms) => terms.iter().any(|term| term.matches(series)),
            Filter::Not(inner) => !inner.matches(series),
        }
    }
}

/// Series matching the filter, in input order
pub fn filter_series<'a>(filter: &Filter, series: &'a [Series]) -> Vec<&'a Series> {
    series.iter().filter(|s| filter.matches(s)).collect()
}
