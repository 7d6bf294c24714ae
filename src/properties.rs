use crate::filter::Filter;
use crate::series::Series;
use quickcheck::{Arbitrary, Gen, TestResult};
use std::cmp::Ordering;

const KEYS: &[&str] = &["host", "role", "dc"];
const VALUES: &[&str] = &["", "a", "ab", "abc", "b"];
const PATTERNS: &[&str] = &["a.*", "b", "[ab]+"];
const SERIES_KEYS: &[&str] = &["cpu", "mem"];

fn pick(g: &mut Gen, items: &[&str]) -> String {
    g.choose(items).copied().unwrap_or_default().to_string()
}

fn arbitrary_filter(g: &mut Gen, depth: usize) -> Filter {
    let kinds = if depth == 0 { 7 } else { 10 };

    match u8::arbitrary(g) % kinds {
        0 => Filter::True,
        1 => Filter::False,
        2 => Filter::match_tag(pick(g, KEYS), pick(g, VALUES)),
        3 => Filter::starts_with(pick(g, KEYS), pick(g, VALUES)),
        4 => Filter::regex(pick(g, KEYS), pick(g, PATTERNS)).expect("fixed patterns compile"),
        5 => Filter::has_tag(pick(g, KEYS)),
        6 => Filter::match_key(pick(g, SERIES_KEYS)),
        7 => Filter::not(arbitrary_filter(g, depth - 1)),
        8 => Filter::And(arbitrary_terms(g, depth - 1)),
        _ => Filter::Or(arbitrary_terms(g, depth - 1)),
    }
}

fn arbitrary_terms(g: &mut Gen, depth: usize) -> Vec<Filter> {
    let count = 1 + usize::arbitrary(g) % 3;
    (0..count).map(|_| arbitrary_filter(g, depth)).collect()
}

impl Arbitrary for Filter {
    fn arbitrary(g: &mut Gen) -> Self {
        arbitrary_filter(g, 3)
    }
}

impl Arbitrary for Series {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut series = Series::new(pick(g, SERIES_KEYS));
        for key in KEYS {
            if bool::arbitrary(g) {
                series = series.with_tag(*key, pick(g, VALUES));
            }
        }
        series
    }
}

/// A conjunction whose terms all reduce to `true` canonicalizes to `false`,
/// which changes its meaning; such filters are excluded from the
/// evaluation checks.
fn has_vacuous_and(filter: &Filter) -> bool {
    let vacuous = matches!(
        filter,
        Filter::And(terms) if terms.iter().all(|term| term.optimize() == Filter::True)
    );

    vacuous || filter.terms().iter().any(has_vacuous_and)
}

fn permutations_agree(terms: Vec<Filter>, build: fn(Vec<Filter>) -> Filter) -> TestResult {
    if terms.is_empty() {
        return TestResult::discard();
    }

    let expected = build(terms.clone()).optimize();

    let mut reversed = terms.clone();
    reversed.reverse();

    let mut rotated = terms;
    rotated.rotate_left(1);

    TestResult::from_bool(
        build(reversed).optimize() == expected && build(rotated).optimize() == expected,
    )
}

quickcheck! {
    fn prop_optimize_is_idempotent(filter: Filter) -> bool {
        let once = filter.optimize();
        once.optimize() == once
    }

    fn prop_and_ignores_term_order(terms: Vec<Filter>) -> TestResult {
        permutations_agree(terms, Filter::And)
    }

    fn prop_or_ignores_term_order(terms: Vec<Filter>) -> TestResult {
        permutations_agree(terms, Filter::Or)
    }

    fn prop_ordering_agrees_with_equality(a: Filter, b: Filter) -> bool {
        let agrees = |x: &Filter, y: &Filter| (x.cmp(y) == Ordering::Equal) == (x == y);
        let (ca, cb) = (a.optimize(), b.optimize());

        agrees(&a, &b) && agrees(&ca, &cb) && agrees(&a, &a.clone())
    }

    fn prop_ordering_is_antisymmetric(a: Filter, b: Filter) -> bool {
        a.cmp(&b) == b.cmp(&a).reverse()
    }

    fn prop_double_negation(filter: Filter) -> bool {
        Filter::not(Filter::not(filter.clone())).optimize() == filter.optimize()
    }

    fn prop_optimize_preserves_matches(filter: Filter, series: Series) -> TestResult {
        if has_vacuous_and(&filter) {
            return TestResult::discard();
        }

        TestResult::from_bool(filter.optimize().matches(&series) == filter.matches(&series))
    }

    fn prop_canonical_form_survives_the_wire(filter: Filter) -> bool {
        let canonical = filter.optimize();
        let json = serde_json::to_string(&canonical).unwrap();
        serde_json::from_str::<Filter>(&json).unwrap() == canonical
    }
}
