use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use arrow::array::Array;
use arrow::util::display::array_value_to_string;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::condition::Condition;
use super::model::{CellValue, Row, Table};

// ---------------------------------------------------------------------------
// Request / result types
// ---------------------------------------------------------------------------

/// What to load and how to shape it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Resource name without extension, e.g. `cash_on_hand_trend`.
    pub name: String,
    /// Column whose values must all parse as timestamps.
    pub date_column: Option<String>,
    /// Column promoted to the unique row key.
    pub key_column: Option<String>,
    /// Columns the header must contain.
    pub required_columns: Vec<String>,
}

impl LoadRequest {
    pub fn new(name: impl Into<String>) -> Self {
        LoadRequest {
            name: name.into(),
            date_column: None,
            key_column: None,
            required_columns: Vec::new(),
        }
    }

    pub fn parse_dates(mut self, column: impl Into<String>) -> Self {
        self.date_column = Some(column.into());
        self
    }

    pub fn key(mut self, column: impl Into<String>) -> Self {
        self.key_column = Some(column.into());
        self
    }

    pub fn require(mut self, columns: &[&str]) -> Self {
        self.required_columns
            .extend(columns.iter().map(|c| c.to_string()));
        self
    }
}

/// Outcome of a load: a populated table or a classified empty marker.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadResult {
    Loaded(Table),
    /// Carries `ResourceAbsent` or `ResourceMalformed`.
    Empty(Condition),
}

impl LoadResult {
    pub fn table(&self) -> Option<&Table> {
        match self {
            LoadResult::Loaded(t) => Some(t),
            LoadResult::Empty(_) => None,
        }
    }

    pub fn condition(&self) -> Option<&Condition> {
        match self {
            LoadResult::Loaded(_) => None,
            LoadResult::Empty(c) => Some(c),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Extensions tried in order when resolving a resource name.
pub const EXTENSIONS: &[&str] = &["csv", "json", "parquet", "pq"];

/// Find the file backing `name` inside `dir`.
pub fn resolve(dir: &Path, name: &str) -> Option<PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{name}.{ext}")))
        .find(|p| p.is_file())
}

/// Load a named resource from `dir`. Never fails: problems come back as
/// [`LoadResult::Empty`] with a classified [`Condition`].
pub fn load(dir: &Path, request: &LoadRequest) -> LoadResult {
    let Some(path) = resolve(dir, &request.name) else {
        let expected = dir.join(format!("{}.csv", request.name));
        log::warn!("Resource '{}' not found in {}", request.name, dir.display());
        return LoadResult::Empty(absent(request, &expected));
    };

    match load_file(&path).and_then(|raw| assemble(raw, request)) {
        Ok(table) => {
            log::debug!(
                "Loaded '{}' from {}: {} rows, columns {:?}",
                table.name,
                path.display(),
                table.len(),
                table.columns
            );
            LoadResult::Loaded(table)
        }
        Err(e) if is_not_found(&e) => {
            log::warn!("Resource '{}' vanished while reading: {e:#}", request.name);
            LoadResult::Empty(absent(request, &path))
        }
        Err(e) => {
            log::warn!("Failed to load '{}' from {}: {e:#}", request.name, path.display());
            LoadResult::Empty(Condition::ResourceMalformed {
                resource: request.name.clone(),
                reason: format!("{e:#}"),
            })
        }
    }
}

fn absent(request: &LoadRequest, path: &Path) -> Condition {
    Condition::ResourceAbsent {
        resource: request.name.clone(),
        path: path.display().to_string(),
    }
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            return io.kind() == ErrorKind::NotFound;
        }
        if let Some(csv_err) = cause.downcast_ref::<csv::Error>() {
            return matches!(csv_err.kind(), csv::ErrorKind::Io(io) if io.kind() == ErrorKind::NotFound);
        }
        false
    })
}

// ---------------------------------------------------------------------------
// Format readers
// ---------------------------------------------------------------------------

/// Header plus untyped-by-schema rows, as read from any format.
#[derive(Debug)]
struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

/// Dispatch by extension.
fn load_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Comma-delimited, UTF-8, header row required. Ragged rows are errors.
fn load_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV header")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if columns.is_empty() || columns.iter().all(|c| c.is_empty()) {
        bail!("CSV has no header row");
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(CellValue::from_text).collect());
    }

    Ok(RawTable { columns, rows })
}

/// Records-oriented JSON, as written by `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "Date": "2024-05-21", "Cash_on_Hand_USD": 125000.0 },
///   ...
/// ]
/// ```
///
/// Columns appear in first-seen order; keys missing from a record are null.
fn load_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows = objects
        .iter()
        .map(|obj| {
            columns
                .iter()
                .map(|c| obj.get(c).map_or(CellValue::Null, json_to_cell))
                .collect()
        })
        .collect();

    Ok(RawTable { columns, rows })
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

/// Flat Parquet file; every column is read through Arrow's display
/// formatter and typed like CSV text. Works with files written by both
/// Pandas and Polars.
fn load_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let mut values = Vec::with_capacity(columns.len());
            for (col_idx, col) in batch.columns().iter().enumerate() {
                if col.is_null(row) {
                    values.push(CellValue::Null);
                    continue;
                }
                let text = array_value_to_string(col.as_ref(), row).with_context(|| {
                    format!("Row {row}: failed to read column '{}'", columns[col_idx])
                })?;
                values.push(CellValue::from_text(&text));
            }
            rows.push(values);
        }
    }

    Ok(RawTable { columns, rows })
}

// ---------------------------------------------------------------------------
// Schema checks, date parsing, key promotion
// ---------------------------------------------------------------------------

fn assemble(raw: RawTable, request: &LoadRequest) -> Result<Table> {
    let mut seen = BTreeMap::new();
    for (i, col) in raw.columns.iter().enumerate() {
        if let Some(first) = seen.insert(col.as_str(), i) {
            bail!("duplicate column '{col}' (positions {first} and {i})");
        }
    }

    let required = request
        .required_columns
        .iter()
        .chain(request.date_column.iter())
        .chain(request.key_column.iter());
    for col in required {
        if !seen.contains_key(col.as_str()) {
            bail!("missing required column '{col}'");
        }
    }

    let date_idx = request.date_column.as_ref().map(|c| seen[c.as_str()]);
    let key_idx = request.key_column.as_ref().map(|c| seen[c.as_str()]);

    let mut rows = Vec::with_capacity(raw.rows.len());
    for (row_no, mut values) in raw.rows.into_iter().enumerate() {
        if values.len() != raw.columns.len() {
            bail!(
                "row {row_no}: expected {} fields, found {}",
                raw.columns.len(),
                values.len()
            );
        }
        if let Some(idx) = date_idx {
            let parsed = cell_to_timestamp(&values[idx]).with_context(|| {
                format!(
                    "row {row_no}: '{}' in column '{}' is not a date",
                    values[idx],
                    raw.columns[idx]
                )
            })?;
            values[idx] = CellValue::Timestamp(parsed);
        }
        let key = key_idx.map(|idx| values[idx].clone());
        rows.push(Row { key, values });
    }

    Table::new(
        request.name.clone(),
        raw.columns,
        request.key_column.clone(),
        rows,
    )
    .map_err(anyhow::Error::msg)
}

fn cell_to_timestamp(cell: &CellValue) -> Option<NaiveDateTime> {
    match cell {
        CellValue::Timestamp(t) => Some(*t),
        CellValue::Text(s) => parse_timestamp(s),
        CellValue::Integer(i) => parse_timestamp(&i.to_string()),
        _ => None,
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Parse a calendar timestamp. Bare dates become midnight; RFC 3339 values
/// with an offset are normalised to UTC.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{Date32Array, Float64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    use super::*;

    fn write(dir: &TempDir, file: &str, contents: &str) {
        std::fs::write(dir.path().join(file), contents).unwrap();
    }

    fn cash_request() -> LoadRequest {
        LoadRequest::new("cash_on_hand_trend")
            .parse_dates("Date")
            .key("Date")
            .require(&["Date", "Cash_on_Hand_USD"])
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn loads_csv_with_exact_header() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "expenditure_breakdown.csv",
            "Category,Amount_USD\nSalaries,120000\nSupplies,8500.5\n",
        );

        let result = load(dir.path(), &LoadRequest::new("expenditure_breakdown"));
        let table = result.table().expect("loaded");
        assert_eq!(table.columns, vec!["Category", "Amount_USD"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].values[1], CellValue::Float(8500.5));
        assert_eq!(table.key_column, None);
    }

    #[test]
    fn missing_resource_is_absent() {
        let dir = TempDir::new().unwrap();
        let result = load(dir.path(), &cash_request());
        match result {
            LoadResult::Empty(Condition::ResourceAbsent { resource, path }) => {
                assert_eq!(resource, "cash_on_hand_trend");
                assert!(path.ends_with("cash_on_hand_trend.csv"), "{path}");
            }
            other => panic!("expected absent, got {other:?}"),
        }
    }

    #[test]
    fn missing_directory_is_absent() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("nope");
        assert!(matches!(
            load(&gone, &cash_request()),
            LoadResult::Empty(Condition::ResourceAbsent { .. })
        ));
    }

    #[test]
    fn missing_required_column_is_malformed() {
        let dir = TempDir::new().unwrap();
        write(&dir, "cash_on_hand_trend.csv", "Date,Balance\n2024-05-21,100\n");

        match load(dir.path(), &cash_request()) {
            LoadResult::Empty(Condition::ResourceMalformed { reason, .. }) => {
                assert!(reason.contains("Cash_on_Hand_USD"), "{reason}");
            }
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_date_is_malformed() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "cash_on_hand_trend.csv",
            "Date,Cash_on_Hand_USD\n2024-05-21,100\nyesterday,90\n",
        );
        match load(dir.path(), &cash_request()) {
            LoadResult::Empty(Condition::ResourceMalformed { reason, .. }) => {
                assert!(reason.contains("yesterday"), "{reason}");
            }
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn empty_date_is_malformed() {
        let dir = TempDir::new().unwrap();
        write(&dir, "cash_on_hand_trend.csv", "Date,Cash_on_Hand_USD\n,100\n");
        assert!(matches!(
            load(dir.path(), &cash_request()),
            LoadResult::Empty(Condition::ResourceMalformed { .. })
        ));
    }

    #[test]
    fn ragged_rows_are_malformed() {
        let dir = TempDir::new().unwrap();
        write(&dir, "outstanding_payments.csv", "Category,Amount_Outstanding_USD\nFees,10,extra\n");
        assert!(matches!(
            load(dir.path(), &LoadRequest::new("outstanding_payments")),
            LoadResult::Empty(Condition::ResourceMalformed { .. })
        ));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("academic_programs.csv"),
            b"Program_Name\n\xff\xfeArt\n",
        )
        .unwrap();
        assert!(matches!(
            load(dir.path(), &LoadRequest::new("academic_programs")),
            LoadResult::Empty(Condition::ResourceMalformed { .. })
        ));
    }

    #[test]
    fn empty_file_is_malformed() {
        let dir = TempDir::new().unwrap();
        write(&dir, "academic_programs.csv", "");
        assert!(matches!(
            load(dir.path(), &LoadRequest::new("academic_programs")),
            LoadResult::Empty(Condition::ResourceMalformed { .. })
        ));
    }

    #[test]
    fn duplicate_dates_are_malformed() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "cash_on_hand_trend.csv",
            "Date,Cash_on_Hand_USD\n2024-05-21,100\n2024-05-21,90\n",
        );
        match load(dir.path(), &cash_request()) {
            LoadResult::Empty(Condition::ResourceMalformed { reason, .. }) => {
                assert!(reason.contains("duplicate key"), "{reason}");
            }
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn date_key_supports_range_queries() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "cash_on_hand_trend.csv",
            "Date,Cash_on_Hand_USD\n2024-05-22 08:30,300\n2024-05-20,100\n2024-05-21T17:00:00,200\n",
        );
        let result = load(dir.path(), &cash_request());
        let table = result.table().expect("loaded");
        assert!(table.is_time_keyed());
        let (first, last) = table.key_extent().unwrap();
        assert_eq!(first.date(), date(2024, 5, 20));
        assert_eq!(last, date(2024, 5, 22).and_hms_opt(8, 30, 0).unwrap());
    }

    #[test]
    fn loading_twice_is_identical() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "fixed_deposits_trend.csv",
            "Date,Fixed_Deposit_Value_USD\n2024-01-31,500000\n2024-02-29,505000\n",
        );
        let request = LoadRequest::new("fixed_deposits_trend")
            .parse_dates("Date")
            .key("Date");
        assert_eq!(load(dir.path(), &request), load(dir.path(), &request));
    }

    #[test]
    fn json_records_load_like_csv() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "cash_on_hand_trend.json",
            r#"[{"Date": "2024-05-20", "Cash_on_Hand_USD": 100},
                {"Date": "2024-05-21", "Cash_on_Hand_USD": 200.5}]"#,
        );
        let result = load(dir.path(), &cash_request());
        let table = result.table().expect("loaded");

        assert_eq!(table.columns, vec!["Date", "Cash_on_Hand_USD"]);
        assert!(table.is_time_keyed());

        let amounts: Vec<_> = table.column("Cash_on_Hand_USD").unwrap().into_iter().cloned().collect();
        assert_eq!(amounts, vec![CellValue::Integer(100), CellValue::Float(200.5)]);
        assert_eq!(
            table.rows[1].key,
            Some(CellValue::Timestamp(date(2024, 5, 21).and_time(NaiveTime::MIN)))
        );
    }

    #[test]
    fn json_columns_keep_file_order() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "expenditure_breakdown.json",
            r#"[{"Category": "Salaries", "Amount_USD": 120000}]"#,
        );
        let result = load(dir.path(), &LoadRequest::new("expenditure_breakdown"));
        let table = result.table().expect("loaded");
        assert_eq!(table.columns, vec!["Category", "Amount_USD"]);
        assert_eq!(table.rows[0].values[0], CellValue::Text("Salaries".into()));
    }

    #[test]
    fn json_records_may_omit_keys() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "outstanding_payments.json",
            r#"[{"Category": "Fees", "Amount_Outstanding_USD": 10}, {"Category": "Rent"}]"#,
        );
        let result = load(dir.path(), &LoadRequest::new("outstanding_payments"));
        let table = result.table().expect("loaded");
        let amounts = table.column("Amount_Outstanding_USD").unwrap();
        assert_eq!(amounts[1], &CellValue::Null);
    }

    #[test]
    fn csv_wins_over_json() {
        let dir = TempDir::new().unwrap();
        write(&dir, "academic_programs.csv", "Program_Name\nScience\n");
        write(&dir, "academic_programs.json", "not json at all");
        let result = load(dir.path(), &LoadRequest::new("academic_programs"));
        assert_eq!(result.table().map(Table::len), Some(1));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let dir = TempDir::new().unwrap();
        write(&dir, "academic_programs.json", "{\"Program_Name\": ");
        assert!(matches!(
            load(dir.path(), &LoadRequest::new("academic_programs")),
            LoadResult::Empty(Condition::ResourceMalformed { .. })
        ));
    }

    #[test]
    fn parquet_resource_loads() {
        let dir = TempDir::new().unwrap();
        let epoch = date(1970, 1, 1);
        let days: Vec<i32> = [date(2024, 5, 20), date(2024, 5, 21)]
            .iter()
            .map(|d| (*d - epoch).num_days() as i32)
            .collect();

        let schema = Arc::new(Schema::new(vec![
            Field::new("Date", DataType::Date32, false),
            Field::new("Cash_on_Hand_USD", DataType::Float64, false),
            Field::new("Note", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Date32Array::from(days)),
                Arc::new(Float64Array::from(vec![100.5, 200.25])),
                Arc::new(StringArray::from(vec![Some("opening"), None])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(dir.path().join("cash_on_hand_trend.parquet")).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let result = load(dir.path(), &cash_request());
        let table = result.table().expect("loaded");
        assert_eq!(table.columns, vec!["Date", "Cash_on_Hand_USD", "Note"]);
        assert_eq!(
            table.rows[0].key,
            Some(CellValue::Timestamp(date(2024, 5, 20).and_time(NaiveTime::MIN)))
        );
        assert_eq!(table.rows[1].values[1], CellValue::Float(200.25));
        assert_eq!(table.rows[1].values[2], CellValue::Null);
    }

    #[test]
    fn every_format_loads_the_same_table() {
        let csv_dir = TempDir::new().unwrap();
        write(
            &csv_dir,
            "cash_on_hand_trend.csv",
            "Date,Cash_on_Hand_USD,Note\n2024-05-20,100.5,opening\n2024-05-21,200.25,\n",
        );

        let json_dir = TempDir::new().unwrap();
        write(
            &json_dir,
            "cash_on_hand_trend.json",
            r#"[{"Date": "2024-05-20", "Cash_on_Hand_USD": 100.5, "Note": "opening"},
                {"Date": "2024-05-21", "Cash_on_Hand_USD": 200.25, "Note": null}]"#,
        );

        let parquet_dir = TempDir::new().unwrap();
        let epoch = date(1970, 1, 1);
        let days: Vec<i32> = [date(2024, 5, 20), date(2024, 5, 21)]
            .iter()
            .map(|d| (*d - epoch).num_days() as i32)
            .collect();
        let schema = Arc::new(Schema::new(vec![
            Field::new("Date", DataType::Date32, false),
            Field::new("Cash_on_Hand_USD", DataType::Float64, false),
            Field::new("Note", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Date32Array::from(days)),
                Arc::new(Float64Array::from(vec![100.5, 200.25])),
                Arc::new(StringArray::from(vec![Some("opening"), None])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(parquet_dir.path().join("cash_on_hand_trend.parquet")).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let from_csv = load(csv_dir.path(), &cash_request());
        let from_json = load(json_dir.path(), &cash_request());
        let from_parquet = load(parquet_dir.path(), &cash_request());

        let table = from_csv.table().expect("loaded");
        assert_eq!(table.columns, vec!["Date", "Cash_on_Hand_USD", "Note"]);
        assert_eq!(from_json, from_csv);
        assert_eq!(from_parquet, from_csv);
    }

    #[test]
    fn missing_file_error_is_classified_as_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load_file(&dir.path().join("gone.csv")).unwrap_err();
        assert!(is_not_found(&err));
        let err = load_file(&dir.path().join("gone.json")).unwrap_err();
        assert!(is_not_found(&err));
    }

    #[test]
    fn parses_common_date_forms() {
        let midnight = date(2024, 5, 21).and_time(NaiveTime::MIN);
        for s in ["2024-05-21", "2024/05/21", "05/21/2024", "21.05.2024", " 2024-05-21 "] {
            assert_eq!(parse_timestamp(s), Some(midnight), "{s}");
        }
        assert_eq!(
            parse_timestamp("2024-05-21T17:00:00.250"),
            date(2024, 5, 21).and_hms_milli_opt(17, 0, 0, 250)
        );
        assert_eq!(
            parse_timestamp("2024-05-21 23:59"),
            date(2024, 5, 21).and_hms_opt(23, 59, 0)
        );
        assert_eq!(
            parse_timestamp("2024-05-21T10:00:00+02:00"),
            date(2024, 5, 21).and_hms_opt(8, 0, 0)
        );
        assert_eq!(parse_timestamp("May 21st"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
