//! Live query filtering.
//!
//! Matching is an ASCII case-insensitive substring test against the full
//! display line, so a query can hit the pid, the owner, or the label.

use crate::collect::ProcessRecord;

/// Whether `line` contains `query`, ignoring ASCII case.
pub fn contains_ignore_case(line: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.as_bytes();
    if needle.len() > line.len() {
        return false;
    }
    line.as_bytes()
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}

/// Whether a single record matches `query`.
pub fn matches(record: &ProcessRecord, query: &str) -> bool {
    query.is_empty() || contains_ignore_case(&record.display_line(), query)
}

/// Order-preserving subsequence of `records` matching `query`.
pub fn filter<'a, I>(records: I, query: &str) -> Vec<&'a ProcessRecord>
where
    I: IntoIterator<Item = &'a ProcessRecord>,
{
    records.into_iter().filter(|r| matches(r, query)).collect()
}

/// Indices into `records` of the entries matching `query`, ascending.
pub fn filter_indices(records: &[ProcessRecord], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..records.len()).collect();
    }
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(r, query))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ProcessRecord> {
        vec![
            ProcessRecord::new(1u32, "a", "x"),
            ProcessRecord::new(2u32, "b", "y"),
            ProcessRecord::new(3u32, "c", "zzy"),
        ]
    }

    #[test]
    fn query_selects_matching_labels_in_order() {
        let records = sample();
        let hits = filter(&records, "y");
        let pids: Vec<u32> = hits.iter().map(|r| r.pid.0).collect();
        assert_eq!(pids, vec![2, 3]);
    }

    #[test]
    fn empty_query_keeps_everything() {
        let records = sample();
        assert_eq!(filter(&records, "").len(), 3);
        assert_eq!(filter_indices(&records, ""), vec![0, 1, 2]);
    }

    #[test]
    fn matching_ignores_ascii_case() {
        let records = vec![ProcessRecord::new(10u32, "root", "/usr/bin/Firefox")];
        assert_eq!(filter(&records, "FIREFOX").len(), 1);
        assert_eq!(filter(&records, "ROOT").len(), 1);
    }

    #[test]
    fn pid_column_is_searchable() {
        let records = sample();
        assert_eq!(filter_indices(&records, "3 "), vec![2]);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        assert!(filter(&sample(), "nothing-here").is_empty());
        assert!(filter(&Vec::<ProcessRecord>::new(), "x").is_empty());
    }

    #[test]
    fn non_ascii_matches_exactly() {
        assert!(contains_ignore_case("Grüße", "üß"));
        assert!(!contains_ignore_case("Grüße", "ÜSS"));
    }

    #[test]
    fn needle_longer_than_line() {
        assert!(!contains_ignore_case("ab", "abc"));
    }
}
