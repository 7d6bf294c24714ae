use crate::filter::Filter;
use crate::filter::matcher::filter_series;
use crate::series::Series;
use serde_json::json;
use std::fmt::Write;
use std::path::Path;

/// Outcome of running a filter over a set of series
#[derive(Debug, Clone)]
pub struct FoundSeries<'a> {
    /// Canonical form of the filter that was run
    pub filter: Filter,
    /// Matching series, truncated to the limit
    pub series: Vec<&'a Series>,
    /// Number of matching series before truncation
    pub total: usize,
}

impl FoundSeries<'_> {
    pub fn truncated(&self) -> bool {
        self.series.len() < self.total
    }
}

/// Optimizes `filter` once and collects the series it matches.
///
/// A canonical `false` short-circuits without scanning.
pub fn find_series<'a>(series: &'a [Series], filter: &Filter, limit: Option<usize>) -> FoundSeries<'a> {
    let filter = filter.optimize();

    if filter == Filter::False {
        log::debug!("filter can never match, skipping {} series", series.len());
        return FoundSeries {
            filter,
            series: Vec::new(),
            total: 0,
        };
    }

    let mut found = filter_series(&filter, series);
    let total = found.len();
    if let Some(limit) = limit {
        found.truncate(limit);
    }

    log::debug!("filter {} matched {total} of {} series", filter, series.len());

    FoundSeries {
        filter,
        series: found,
        total,
    }
}

pub fn format_found_text(found: &FoundSeries) -> serde_json::Result<String> {
    let mut out = String::new();

    for series in &found.series {
        let _ = writeln!(out, "{}", serde_json::to_string(series)?);
    }

    if found.truncated() {
        let _ = writeln!(
            out,
            "found {} series (showing {})",
            found.total,
            found.series.len()
        );
    } else {
        let _ = writeln!(out, "found {} series", found.total);
    }

    Ok(out)
}

pub fn format_found_json(file: &Path, found: &FoundSeries) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&json!({
        "find_series": {
            "file": file.display().to_string(),
            "filter": found.filter,
            "total": found.total,
            "truncated": found.truncated(),
            "series": found.series,
        }
    }))
}
