//! Total order over filters.
//!
//! Filters of different operators order by operator rank. Combinators of the
//! same operator compare their terms lexicographically (a shorter prefix sorts
//! first), leaves of the same operator compare `first()` then `second()` with
//! an absent operand sorting before a present one.
//!
//! The order only depends on the structure of the filters, so it agrees with
//! `Eq` and is stable across processes.

use super::Filter;
use std::cmp::Ordering;

impl Ord for Filter {
    fn cmp(&self, other: &Self) -> Ordering {
        let (left, right) = (self.operator(), other.operator());

        if left != right {
            return left.rank().cmp(&right.rank());
        }

        if self.is_leaf() {
            return self
                .first()
                .cmp(&other.first())
                .then_with(|| self.second().cmp(&other.second()));
        }

        self.terms().cmp(other.terms())
    }
}

impl PartialOrd for Filter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
