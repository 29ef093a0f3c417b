use std::ops::Bound;

use super::condition::Condition;
use super::loader::LoadResult;
use super::model::{CellValue, DateRange, Table};

// ---------------------------------------------------------------------------
// Filter outcome
// ---------------------------------------------------------------------------

/// Result of restricting a load to a date range.
///
/// `NoneInRange` (loaded, window excludes everything) and `Empty` (never
/// loaded) are deliberately separate so callers can word them differently.
#[derive(Debug, Clone, PartialEq)]
pub enum Filtered {
    /// At least one row matched.
    Rows(Table),
    NoneInRange { resource: String, range: DateRange },
    /// The load itself failed; the condition is passed through.
    Empty(Condition),
}

impl Filtered {
    pub fn table(&self) -> Option<&Table> {
        match self {
            Filtered::Rows(t) => Some(t),
            _ => None,
        }
    }

    /// The user-facing condition, if there is nothing to draw.
    pub fn condition(&self) -> Option<Condition> {
        match self {
            Filtered::Rows(_) => None,
            Filtered::NoneInRange { resource, range } => Some(Condition::EmptyAfterFilter {
                resource: resource.clone(),
                start: range.start(),
                end: range.end(),
            }),
            Filtered::Empty(c) => Some(c.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Range filter
// ---------------------------------------------------------------------------

/// Keep rows keyed within `range`, including the whole end day.
///
/// A row passes when `start 00:00 <= key < (end + 1 day) 00:00`. The input
/// is untouched; matching rows are copied in file order.
pub fn filter_by_range(loaded: &LoadResult, range: &DateRange) -> Filtered {
    let table = match loaded {
        LoadResult::Loaded(t) => t,
        LoadResult::Empty(c) => return Filtered::Empty(c.clone()),
    };

    if !table.is_time_keyed() {
        return Filtered::Empty(Condition::ResourceMalformed {
            resource: table.name.clone(),
            reason: "resource is not keyed by a date column".to_string(),
        });
    }

    let lower = Bound::Included(CellValue::Timestamp(range.lower_bound()));
    let upper = match range.upper_bound_exclusive() {
        Some(t) => Bound::Excluded(CellValue::Timestamp(t)),
        None => Bound::Unbounded,
    };

    let mut positions = table.key_range(lower, upper);
    if positions.is_empty() {
        log::debug!("'{}' has no rows in {range}", table.name);
        return Filtered::NoneInRange {
            resource: table.name.clone(),
            range: *range,
        };
    }
    positions.sort_unstable();
    Filtered::Rows(table.select(&positions))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::data::model::Row;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(day(start), day(end)).unwrap()
    }

    fn loaded(stamps: &[&str]) -> LoadResult {
        let rows = stamps
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let key = CellValue::Timestamp(at(s));
                Row {
                    key: Some(key.clone()),
                    values: vec![key, CellValue::Integer(i as i64)],
                }
            })
            .collect();
        let table = Table::new(
            "cash_on_hand_trend",
            vec!["Date".into(), "Cash_on_Hand_USD".into()],
            Some("Date".into()),
            rows,
        )
        .unwrap();
        LoadResult::Loaded(table)
    }

    fn stamps(filtered: &Filtered) -> Vec<NaiveDateTime> {
        filtered
            .table()
            .expect("rows")
            .rows
            .iter()
            .filter_map(|r| r.key.as_ref().and_then(CellValue::as_timestamp))
            .collect()
    }

    #[test]
    fn end_date_is_inclusive_through_end_of_day() {
        let input = loaded(&["2024-05-21T00:00", "2024-05-21T23:59", "2024-05-21T17:00"]);
        let out = filter_by_range(&input, &range("2024-05-21", "2024-05-21"));
        assert_eq!(
            stamps(&out),
            vec![at("2024-05-21T00:00"), at("2024-05-21T23:59"), at("2024-05-21T17:00")]
        );
    }

    #[test]
    fn next_day_is_excluded() {
        let input = loaded(&["2024-05-19T23:59", "2024-05-20T00:00", "2024-05-22T00:01"]);
        let out = filter_by_range(&input, &range("2024-05-20", "2024-05-21"));
        assert_eq!(stamps(&out), vec![at("2024-05-20T00:00")]);
    }

    #[test]
    fn keeps_file_order_and_leaves_input_alone() {
        let input = loaded(&["2024-05-03T00:00", "2024-05-01T00:00", "2024-05-02T00:00"]);
        let before = input.clone();
        let out = filter_by_range(&input, &range("2024-05-01", "2024-05-02"));
        assert_eq!(stamps(&out), vec![at("2024-05-01T00:00"), at("2024-05-02T00:00")]);
        assert_eq!(input, before);
        assert_eq!(out.table().unwrap().columns, before.table().unwrap().columns);
    }

    #[test]
    fn empty_load_stays_empty() {
        let absent = Condition::ResourceAbsent {
            resource: "cash_on_hand_trend".into(),
            path: "cash_on_hand_trend.csv".into(),
        };
        let out = filter_by_range(&LoadResult::Empty(absent.clone()), &range("2024-05-01", "2024-05-02"));
        assert_eq!(out, Filtered::Empty(absent.clone()));
        assert_eq!(out.condition(), Some(absent));
    }

    #[test]
    fn empty_window_is_distinct_from_empty_load() {
        let window = range("2023-01-01", "2023-01-31");
        let none = filter_by_range(&loaded(&["2024-05-21T12:00"]), &window);
        assert_eq!(
            none,
            Filtered::NoneInRange {
                resource: "cash_on_hand_trend".into(),
                range: window,
            }
        );
        assert!(matches!(none.condition(), Some(Condition::EmptyAfterFilter { .. })));

        let absent = LoadResult::Empty(Condition::ResourceAbsent {
            resource: "cash_on_hand_trend".into(),
            path: "cash_on_hand_trend.csv".into(),
        });
        assert_ne!(none, filter_by_range(&absent, &window));
    }

    #[test]
    fn reversed_range_never_reaches_the_filter() {
        let err = DateRange::new(day("2024-06-01"), day("2024-05-01")).unwrap_err();
        assert!(matches!(err, Condition::InvalidRange { .. }));
    }

    #[test]
    fn unkeyed_table_is_reported() {
        let table = Table::new(
            "expenditure_breakdown",
            vec!["Category".into()],
            None,
            vec![Row { key: None, values: vec![CellValue::Text("Salaries".into())] }],
        )
        .unwrap();
        let out = filter_by_range(&LoadResult::Loaded(table), &range("2024-01-01", "2024-12-31"));
        assert!(matches!(out, Filtered::Empty(Condition::ResourceMalformed { .. })));
    }
}
