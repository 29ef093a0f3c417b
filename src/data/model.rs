use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::condition::Condition;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a tabular resource
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
/// Keys live in a `BTreeMap`, so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Parsed from a date column.
    Timestamp(NaiveDateTime),
    Null,
}

// -- Manual Eq/Ord so we can key a BTreeMap by CellValue --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
                Timestamp(_) => 5,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (Timestamp(a), Timestamp(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.2}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Timestamp(t) if t.time() == NaiveTime::MIN => {
                write!(f, "{}", t.date())
            }
            CellValue::Timestamp(t) => write!(f, "{t}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Infer a cell type from raw text: empty → Null, then integer, float,
    /// bool, and finally text.
    pub fn from_text(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::Text(s.to_string())
    }

    /// Try to interpret the value as an `f64` for charting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Row / Table – a loaded tabular resource
// ---------------------------------------------------------------------------

/// One record. `values` is aligned with [`Table::columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Value of the key column, when the table has one.
    pub key: Option<CellValue>,
    pub values: Vec<CellValue>,
}

/// A loaded tabular resource with an optional ordered key index.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Resource name, e.g. `cash_on_hand_trend`.
    pub name: String,
    /// Column names exactly as they appear in the source header.
    pub columns: Vec<String>,
    /// Column promoted to the unique row identifier.
    pub key_column: Option<String>,
    pub rows: Vec<Row>,
    /// key → position in `rows`.
    index: BTreeMap<CellValue, usize>,
}

impl Table {
    /// Build a table, indexing rows by their key.
    ///
    /// Fails when a key is null or occurs twice.
    pub fn new(
        name: impl Into<String>,
        columns: Vec<String>,
        key_column: Option<String>,
        rows: Vec<Row>,
    ) -> Result<Self, String> {
        let mut index = BTreeMap::new();
        if let Some(key_col) = &key_column {
            for (pos, row) in rows.iter().enumerate() {
                let key = match &row.key {
                    Some(k) if !k.is_null() => k,
                    _ => return Err(format!("row {pos}: empty value in key column '{key_col}'")),
                };
                if index.insert(key.clone(), pos).is_some() {
                    return Err(format!("row {pos}: duplicate key {key} in column '{key_col}'"));
                }
            }
        }
        Ok(Table {
            name: name.into(),
            columns,
            key_column,
            rows,
            index,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// All values of one column, in row order.
    pub fn column(&self, column: &str) -> Option<Vec<&CellValue>> {
        let idx = self.column_index(column)?;
        Some(self.rows.iter().map(|r| &r.values[idx]).collect())
    }

    /// Whether every key is a timestamp, i.e. the table supports date ranges.
    pub fn is_time_keyed(&self) -> bool {
        self.key_column.is_some()
            && self
                .rows
                .iter()
                .all(|r| matches!(r.key, Some(CellValue::Timestamp(_))))
    }

    /// Earliest and latest timestamp key.
    pub fn key_extent(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.index.keys().next()?.as_timestamp()?;
        let last = self.index.keys().next_back()?.as_timestamp()?;
        Some((first, last))
    }

    /// Positions of rows whose key lies within the bounds, in key order.
    pub fn key_range(&self, lower: Bound<CellValue>, upper: Bound<CellValue>) -> Vec<usize> {
        self.index.range((lower, upper)).map(|(_, &pos)| pos).collect()
    }

    /// Copy the rows at `positions` into a new table with the same schema.
    pub fn select(&self, positions: &[usize]) -> Table {
        let rows: Vec<Row> = positions.iter().map(|&p| self.rows[p].clone()).collect();
        let index = rows
            .iter()
            .enumerate()
            .filter_map(|(pos, r)| r.key.clone().map(|k| (k, pos)))
            .collect();
        Table {
            name: self.name.clone(),
            columns: self.columns.clone(),
            key_column: self.key_column.clone(),
            rows,
            index,
        }
    }
}

// ---------------------------------------------------------------------------
// DateRange – validated inclusive calendar range
// ---------------------------------------------------------------------------

/// An inclusive `(start, end)` pair of calendar dates with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Validate a range. `start > end` yields [`Condition::InvalidRange`].
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, Condition> {
        if start > end {
            return Err(Condition::InvalidRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Midnight at the beginning of `start`.
    pub fn lower_bound(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Exclusive upper bound: midnight after `end`. `None` for the last
    /// representable date, meaning unbounded.
    pub fn upper_bound_exclusive(&self) -> Option<NaiveDateTime> {
        self.end.succ_opt().map(|d| d.and_time(NaiveTime::MIN))
    }

    pub fn contains(&self, t: NaiveDateTime) -> bool {
        t >= self.lower_bound() && self.upper_bound_exclusive().map_or(true, |u| t < u)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
