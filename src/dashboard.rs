use std::path::Path;

use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::data::catalog::Resource;
use crate::data::condition::Condition;
use crate::data::filter::{Filtered, filter_by_range};
use crate::data::loader::{LoadResult, load};
use crate::data::model::{CellValue, DateRange, Table};

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    School,
    Teachers,
    Students,
    Others,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::School,
        Section::Teachers,
        Section::Students,
        Section::Others,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::School => "School",
            Section::Teachers => "Teachers",
            Section::Students => "Students",
            Section::Others => "Others",
        }
    }

    pub fn sub_sections(self) -> &'static [SubSection] {
        match self {
            Section::School => &[
                SubSection::Overview,
                SubSection::Financial,
                SubSection::Facilities,
                SubSection::AcademicPrograms,
            ],
            Section::Teachers => &[SubSection::Staffing, SubSection::Performance],
            Section::Students => &[SubSection::Enrollment, SubSection::Attendance],
            Section::Others => &[SubSection::Events, SubSection::Announcements],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubSection {
    Overview,
    Financial,
    Facilities,
    AcademicPrograms,
    Staffing,
    Performance,
    Enrollment,
    Attendance,
    Events,
    Announcements,
}

impl SubSection {
    pub fn label(self) -> &'static str {
        match self {
            SubSection::Overview => "Overview",
            SubSection::Financial => "Financial",
            SubSection::Facilities => "Facilities",
            SubSection::AcademicPrograms => "Academic Programs",
            SubSection::Staffing => "Staffing",
            SubSection::Performance => "Performance",
            SubSection::Enrollment => "Enrollment",
            SubSection::Attendance => "Attendance",
            SubSection::Events => "Events",
            SubSection::Announcements => "Announcements",
        }
    }

    /// Whether the date pickers affect this view.
    pub fn uses_date_range(self) -> bool {
        matches!(self, SubSection::Financial)
    }
}

/// Everything one render needs, passed explicitly each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest {
    pub section: Section,
    pub sub_section: SubSection,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub delta: Option<String>,
}

impl Metric {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Metric {
            label: label.to_string(),
            value: value.into(),
            delta: None,
        }
    }
}

/// One renderable element of a dashboard page.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Heading(String),
    Metrics(Vec<Metric>),
    TimeSeries {
        title: String,
        series: String,
        points: Vec<(NaiveDateTime, f64)>,
    },
    Bars {
        title: String,
        bars: Vec<(String, f64)>,
    },
    /// `[lon, lat]` pairs.
    Map {
        title: String,
        points: Vec<[f64; 2]>,
    },
    List {
        title: String,
        items: Vec<String>,
    },
    /// Mock form: input is never stored.
    Form {
        title: String,
        fields: Vec<String>,
    },
    Notice {
        title: String,
        condition: Condition,
    },
}

fn notice(title: &str, condition: Condition) -> Panel {
    Panel::Notice {
        title: title.to_string(),
        condition,
    }
}

fn form(title: &str, fields: &[&str]) -> Panel {
    Panel::Form {
        title: title.to_string(),
        fields: fields.iter().map(|f| f.to_string()).collect(),
    }
}

fn list(title: &str, items: &[&str]) -> Panel {
    Panel::List {
        title: title.to_string(),
        items: items.iter().map(|i| i.to_string()).collect(),
    }
}

fn title(resource: Resource) -> &'static str {
    match resource {
        Resource::CashOnHandTrend => "Cash on Hand",
        Resource::FixedDepositsTrend => "Fixed Deposits",
        Resource::ExpenditureBreakdown => "Expenditure Breakdown",
        Resource::OutstandingPayments => "Outstanding Payments",
        Resource::FacilitiesLocations => "Facility Locations",
        Resource::AcademicPrograms => "Academic Programs",
    }
}

// ---------------------------------------------------------------------------
// Page builders
// ---------------------------------------------------------------------------

/// Build the panels for one render. Reads every resource it needs afresh.
pub fn build_panels(data_dir: &Path, request: &RenderRequest) -> Vec<Panel> {
    let mut panels = vec![Panel::Heading(format!(
        "{} · {}",
        request.section.label(),
        request.sub_section.label()
    ))];

    match request.sub_section {
        SubSection::Overview => overview(data_dir, &mut panels),
        SubSection::Financial => financial(data_dir, request, &mut panels),
        SubSection::Facilities => facilities(data_dir, &mut panels),
        SubSection::AcademicPrograms => academic_programs(data_dir, &mut panels),
        SubSection::Staffing => {
            panels.push(Panel::Metrics(vec![
                Metric::new("Total Teachers", "48"),
                Metric::new("Student-Teacher Ratio", "14 : 1"),
                Metric::new("Open Positions", "3"),
            ]));
            panels.push(form("Add Teacher", &["Name", "Subject", "Email", "Start Date"]));
        }
        SubSection::Performance => {
            panels.push(Panel::Metrics(vec![
                Metric::new("Average Rating", "4.3 / 5"),
                Metric::new("Observations This Term", "62"),
            ]));
            panels.push(form("Log Observation", &["Teacher", "Observer", "Score", "Notes"]));
        }
        SubSection::Enrollment => {
            panels.push(Panel::Metrics(vec![
                Metric::new("Enrolled Students", "672"),
                Metric::new("New This Term", "41"),
                Metric::new("Withdrawals", "5"),
            ]));
            panels.push(form("Register Student", &["Name", "Grade", "Guardian", "Phone"]));
        }
        SubSection::Attendance => {
            panels.push(Panel::Metrics(vec![
                Metric::new("Average Attendance", "94.2%"),
                Metric::new("Chronic Absence", "6.1%"),
            ]));
            panels.push(form("Record Absence", &["Student", "Date", "Reason"]));
        }
        SubSection::Events => {
            panels.push(list(
                "Upcoming Events",
                &["Science Fair", "Parent-Teacher Conference", "Sports Day"],
            ));
            panels.push(form("Propose Event", &["Title", "Date", "Location"]));
        }
        SubSection::Announcements => {
            panels.push(list(
                "Announcements",
                &["Library hours extended during exams", "New cafeteria menu from next week"],
            ));
            panels.push(form("Post Announcement", &["Title", "Message"]));
        }
    }
    panels
}

fn overview(data_dir: &Path, panels: &mut Vec<Panel>) {
    let mut metrics = Vec::new();
    let mut notices = Vec::new();

    for resource in [Resource::CashOnHandTrend, Resource::FixedDepositsTrend] {
        let metric = match load(data_dir, &resource.request()) {
            LoadResult::Loaded(table) => match time_series(&table, resource.value_column()) {
                Ok(points) => latest_metric(title(resource), &points),
                Err(c) => {
                    notices.push(notice(title(resource), c));
                    Metric::new(title(resource), "n/a")
                }
            },
            LoadResult::Empty(c) => {
                notices.push(notice(title(resource), c));
                Metric::new(title(resource), "n/a")
            }
        };
        metrics.push(metric);
    }

    for resource in [Resource::ExpenditureBreakdown, Resource::OutstandingPayments] {
        let label = format!("Total {}", title(resource));
        let total = match load(data_dir, &resource.request()) {
            LoadResult::Loaded(table) => category_amounts(&table, resource)
                .map(|bars| bars.iter().map(|(_, v)| v).sum::<f64>()),
            LoadResult::Empty(c) => Err(c),
        };
        let value = match total {
            Ok(total) => format_usd(total),
            Err(c) => {
                notices.push(notice(title(resource), c));
                "n/a".to_string()
            }
        };
        metrics.push(Metric::new(&label, value));
    }

    for resource in [Resource::FacilitiesLocations, Resource::AcademicPrograms] {
        let count = match load(data_dir, &resource.request()) {
            LoadResult::Loaded(table) => table.len().to_string(),
            LoadResult::Empty(c) => {
                notices.push(notice(title(resource), c));
                "n/a".to_string()
            }
        };
        metrics.push(Metric::new(title(resource), count));
    }

    panels.push(Panel::Metrics(metrics));
    panels.extend(notices);
}

fn latest_metric(label: &str, points: &[(NaiveDateTime, f64)]) -> Metric {
    let mut sorted: Vec<_> = points.to_vec();
    sorted.sort_by_key(|(t, _)| *t);
    match sorted.as_slice() {
        [] => Metric::new(label, "n/a"),
        [only] => Metric::new(label, format_usd(only.1)),
        [.., prev, last] => Metric {
            delta: Some(format_delta(last.1 - prev.1)),
            ..Metric::new(label, format_usd(last.1))
        },
    }
}

fn financial(data_dir: &Path, request: &RenderRequest, panels: &mut Vec<Panel>) {
    let range = DateRange::new(request.start, request.end);

    for resource in [Resource::CashOnHandTrend, Resource::FixedDepositsTrend] {
        let loaded = load(data_dir, &resource.request());
        let window = match &range {
            Ok(r) => r,
            Err(c) => {
                panels.push(notice(title(resource), c.clone()));
                continue;
            }
        };
        let panel = match filter_by_range(&loaded, window) {
            Filtered::Rows(table) => match time_series(&table, resource.value_column()) {
                Ok(points) => Panel::TimeSeries {
                    title: format!("{} Trend", title(resource)),
                    series: resource.value_column().to_string(),
                    points,
                },
                Err(c) => notice(title(resource), c),
            },
            other => match other.condition() {
                Some(c) => notice(title(resource), c),
                None => continue,
            },
        };
        panels.push(panel);
    }

    for resource in [Resource::ExpenditureBreakdown, Resource::OutstandingPayments] {
        let panel = match load(data_dir, &resource.request()) {
            LoadResult::Loaded(table) => match category_amounts(&table, resource) {
                Ok(bars) => Panel::Bars {
                    title: title(resource).to_string(),
                    bars,
                },
                Err(c) => notice(title(resource), c),
            },
            LoadResult::Empty(c) => notice(title(resource), c),
        };
        panels.push(panel);
    }
}

fn facilities(data_dir: &Path, panels: &mut Vec<Panel>) {
    let resource = Resource::FacilitiesLocations;
    let panel = match load(data_dir, &resource.request()) {
        LoadResult::Loaded(table) => match coordinates(&table) {
            Ok(points) => Panel::Map {
                title: title(resource).to_string(),
                points,
            },
            Err(c) => notice(title(resource), c),
        },
        LoadResult::Empty(c) => notice(title(resource), c),
    };
    panels.push(panel);
    panels.push(form("Report Maintenance Issue", &["Building", "Room", "Description"]));
}

fn academic_programs(data_dir: &Path, panels: &mut Vec<Panel>) {
    let resource = Resource::AcademicPrograms;
    let panel = match load(data_dir, &resource.request()) {
        LoadResult::Loaded(table) => Panel::List {
            title: title(resource).to_string(),
            items: table
                .column(resource.value_column())
                .unwrap_or_default()
                .into_iter()
                .filter(|v| !v.is_null())
                .map(|v| v.to_string())
                .collect(),
        },
        LoadResult::Empty(c) => notice(title(resource), c),
    };
    panels.push(panel);
    panels.push(form("Add Program", &["Program Name", "Department", "Duration"]));
}

// ---------------------------------------------------------------------------
// Table → chart data
// ---------------------------------------------------------------------------

fn not_numeric(table: &Table, column: &str, value: &CellValue) -> Condition {
    Condition::ResourceMalformed {
        resource: table.name.clone(),
        reason: format!("'{value}' in column '{column}' is not a number"),
    }
}

fn numeric_column(table: &Table, column: &str) -> Result<Vec<Option<f64>>, Condition> {
    let values = table.column(column).ok_or_else(|| Condition::ResourceMalformed {
        resource: table.name.clone(),
        reason: format!("missing column '{column}'"),
    })?;
    values
        .into_iter()
        .map(|v| match v {
            CellValue::Null => Ok(None),
            v => v
                .as_f64()
                .filter(|f| f.is_finite())
                .map(Some)
                .ok_or_else(|| not_numeric(table, column, v)),
        })
        .collect()
}

/// `(timestamp, value)` pairs of a time-keyed table; null values are skipped.
fn time_series(table: &Table, column: &str) -> Result<Vec<(NaiveDateTime, f64)>, Condition> {
    let values = numeric_column(table, column)?;
    Ok(table
        .rows
        .iter()
        .zip(values)
        .filter_map(|(row, v)| {
            let t = row.key.as_ref()?.as_timestamp()?;
            Some((t, v?))
        })
        .collect())
}

/// `(label, amount)` pairs from a breakdown resource's label and value columns.
fn category_amounts(table: &Table, resource: Resource) -> Result<Vec<(String, f64)>, Condition> {
    let label_column = resource.label_column();
    let labels = table.column(label_column).ok_or_else(|| Condition::ResourceMalformed {
        resource: table.name.clone(),
        reason: format!("missing column '{label_column}'"),
    })?;
    let values = numeric_column(table, resource.value_column())?;
    Ok(labels
        .into_iter()
        .zip(values)
        .filter_map(|(label, v)| Some((label.to_string(), v?)))
        .collect())
}

fn coordinates(table: &Table) -> Result<Vec<[f64; 2]>, Condition> {
    let lat = numeric_column(table, "lat")?;
    let lon = numeric_column(table, "lon")?;
    Ok(lat
        .into_iter()
        .zip(lon)
        .filter_map(|(lat, lon)| Some([lon?, lat?]))
        .collect())
}

// ---------------------------------------------------------------------------
// Defaults and formatting
// ---------------------------------------------------------------------------

/// Initial date window: the extent of the cash trend, or the last
/// `fallback_days` up to `today` when it cannot be loaded.
pub fn default_range(data_dir: &Path, fallback_days: i64, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let loaded = load(data_dir, &Resource::CashOnHandTrend.request());
    match loaded.table().and_then(Table::key_extent) {
        Some((first, last)) => (first.date(), last.date()),
        None => {
            let days = Days::new(fallback_days.max(0).unsigned_abs());
            (today.checked_sub_days(days).unwrap_or(NaiveDate::MIN), today)
        }
    }
}

/// Whole dollars with thousands separators, e.g. `$1,234,567`.
pub fn format_usd(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn format_delta(delta: f64) -> String {
    if delta >= 0.0 {
        format!("+{}", format_usd(delta))
    } else {
        format_usd(delta)
    }
}
