//! Canonicalization of filter trees.
//!
//! The tree is walked bottom-up with an explicit work stack, so optimizing a
//! deeply nested filter does not grow the call stack. Every combinator is
//! rebuilt from its already optimized children:
//!
//! - `and`/`or` collect their terms into an ordered set, dropping the identity
//!   sentinel, short-circuiting on the absorbing one, splicing nested terms of
//!   the same operator and expanding negated duals by De Morgan's law;
//! - the collected set is then checked for contradictions and subsumed terms;
//! - `not` folds the sentinels and removes double negation.

use super::Filter;
use std::collections::BTreeSet;

impl Filter {
    /// Canonical form of this filter.
    ///
    /// Never fails. Contradictions canonicalize to [`Filter::False`].
    pub fn optimize(&self) -> Filter {
        optimize(self)
    }
}

enum Step<'a> {
    Visit(&'a Filter),
    Combine(&'a Filter),
}

pub fn optimize(root: &Filter) -> Filter {
    let mut pending = vec![Step::Visit(root)];
    let mut done: Vec<Filter> = Vec::new();

    while let Some(step) = pending.pop() {
        match step {
            Step::Visit(filter) if filter.is_leaf() => done.push(optimize_leaf(filter)),
            Step::Visit(filter) => {
                pending.push(Step::Combine(filter));
                pending.extend(filter.terms().iter().map(Step::Visit));
            }
            Step::Combine(filter) => {
                let children = done.split_off(done.len() - filter.terms().len());

                let optimized = match filter {
                    Filter::And(_) => combine(Junction::And, children),
                    Filter::Or(_) => combine(Junction::Or, children),
                    _ => children
                        .into_iter()
                        .map(negate)
                        .next()
                        .expect("negation has exactly one optimized operand"),
                };

                done.push(optimized);
            }
        }
    }

    done.pop().expect("optimizer leaves exactly one result")
}

fn optimize_leaf(filter: &Filter) -> Filter {
    match filter {
        Filter::StartsWith { key, prefix } if prefix.is_empty() => Filter::HasTag(key.clone()),
        leaf => leaf.clone(),
    }
}

/// Negation of an already optimized filter
fn negate(filter: Filter) -> Filter {
    match filter {
        Filter::True => Filter::False,
        Filter::False => Filter::True,
        Filter::Not(inner) => *inner,
        other => Filter::not(other),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Junction {
    And,
    Or,
}

impl Junction {
    fn absorbing(self) -> Filter {
        match self {
            Junction::And => Filter::False,
            Junction::Or => Filter::True,
        }
    }

    fn build(self, terms: Vec<Filter>) -> Filter {
        match self {
            Junction::And => Filter::And(terms),
            Junction::Or => Filter::Or(terms),
        }
    }
}

fn combine(junction: Junction, children: Vec<Filter>) -> Filter {
    let mut terms = BTreeSet::new();

    if !absorb_all(junction, children, &mut terms) {
        return junction.absorbing();
    }

    simplify(junction, terms)
}

fn absorb_all(
    junction: Junction,
    children: impl IntoIterator<Item = Filter>,
    terms: &mut BTreeSet<Filter>,
) -> bool {
    children
        .into_iter()
        .all(|child| absorb(junction, child, terms))
}

/// Adds an optimized child to the term set.
///
/// Returns `false` when the child absorbs the whole junction.
fn absorb(junction: Junction, child: Filter, terms: &mut BTreeSet<Filter>) -> bool {
    match child {
        Filter::True | Filter::False => child != junction.absorbing(),
        Filter::And(nested) if junction == Junction::And => absorb_all(junction, nested, terms),
        Filter::Or(nested) if junction == Junction::Or => absorb_all(junction, nested, terms),
        Filter::Not(inner) => match *inner {
            Filter::Or(nested) if junction == Junction::And => {
                absorb_all(junction, nested.into_iter().map(negate), terms)
            }
            Filter::And(nested) if junction == Junction::Or => {
                absorb_all(junction, nested.into_iter().map(negate), terms)
            }
            inner => {
                terms.insert(Filter::not(inner));
                true
            }
        },
        child => {
            terms.insert(child);
            true
        }
    }
}

fn simplify(junction: Junction, terms: BTreeSet<Filter>) -> Filter {
    let mut kept = Vec::with_capacity(terms.len());

    for term in &terms {
        if let Filter::Not(inner) = term
            && terms.contains(&**inner)
        {
            return junction.absorbing();
        }

        if junction == Junction::And && conflicting_value(term, &terms) {
            return Filter::False;
        }

        if prefix_subsumed(junction, term, &terms) || presence_subsumed(junction, term, &terms) {
            continue;
        }

        kept.push(term.clone());
    }

    if kept.len() > 1 {
        return junction.build(kept);
    }

    // An empty junction is `false` for both operators.
    kept.pop().unwrap_or(Filter::False)
}

/// Another equality on the same tag requires a different value
fn conflicting_value(term: &Filter, terms: &BTreeSet<Filter>) -> bool {
    let Filter::MatchTag { key, value } = term else {
        return false;
    };

    terms.iter().any(|other| {
        matches!(other, Filter::MatchTag { key: k, value: v } if k == key && v != value)
    })
}

/// A conjunction keeps the longest prefix per tag, a disjunction the shortest
fn prefix_subsumed(junction: Junction, term: &Filter, terms: &BTreeSet<Filter>) -> bool {
    let Filter::StartsWith { key, prefix } = term else {
        return false;
    };

    terms.iter().any(|other| match other {
        Filter::StartsWith { key: k, prefix: p } if k == key && p != prefix => match junction {
            Junction::And => p.starts_with(prefix.as_str()),
            Junction::Or => prefix.starts_with(p.as_str()),
        },
        _ => false,
    })
}

/// Any test on a tag value implies the tag is present
fn presence_subsumed(junction: Junction, term: &Filter, terms: &BTreeSet<Filter>) -> bool {
    match (junction, term) {
        (Junction::And, Filter::HasTag(key)) => terms
            .iter()
            .any(|other| value_test_key(other) == Some(key.as_str())),
        (Junction::Or, _) => match value_test_key(term) {
            Some(key) => terms.contains(&Filter::HasTag(key.to_string())),
            None => false,
        },
        _ => false,
    }
}

fn value_test_key(filter: &Filter) -> Option<&str> {
    match filter {
        Filter::MatchTag { key, .. } | Filter::StartsWith { key, .. } | Filter::Regex { key, .. } => {
            Some(key.as_str())
        }
        _ => None,
    }
}
