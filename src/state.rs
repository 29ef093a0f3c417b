use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::dashboard::{RenderRequest, Section, SubSection, default_range};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The UI selections, independent of rendering. Loaded data is never kept
/// here; every frame builds its panels from a fresh [`RenderRequest`].
pub struct AppState {
    /// Directory the resources are read from.
    pub data_dir: PathBuf,

    pub section: Section,
    pub sub_section: SubSection,

    /// Date-range pickers. May be reversed; the dashboard reports that.
    pub start: NaiveDate,
    pub end: NaiveDate,

    /// Window length used when the cash trend cannot seed the pickers.
    pub fallback_days: i64,

    /// Mock form inputs: form title → field → text.
    pub forms: BTreeMap<String, BTreeMap<String, String>>,

    /// Status message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(data_dir: PathBuf, fallback_days: i64, today: NaiveDate) -> Self {
        let (start, end) = default_range(&data_dir, fallback_days, today);
        Self {
            data_dir,
            section: Section::School,
            sub_section: SubSection::Overview,
            start,
            end,
            fallback_days,
            forms: BTreeMap::new(),
            status_message: None,
        }
    }

    /// The explicit inputs for one render.
    pub fn request(&self) -> RenderRequest {
        RenderRequest {
            section: self.section,
            sub_section: self.sub_section,
            start: self.start,
            end: self.end,
        }
    }

    /// Switch section and land on its first sub-section.
    pub fn select_section(&mut self, section: Section) {
        if self.section == section {
            return;
        }
        self.section = section;
        self.sub_section = section.sub_sections()[0];
    }

    pub fn select_sub_section(&mut self, sub_section: SubSection) {
        if self.section.sub_sections().contains(&sub_section) {
            self.sub_section = sub_section;
        }
    }

    /// Point at a new data directory and re-seed the date range from it.
    pub fn set_data_dir(&mut self, dir: PathBuf, today: NaiveDate) {
        log::info!("Data directory set to {}", dir.display());
        self.data_dir = dir;
        self.reset_range(today);
        self.status_message = None;
    }

    pub fn reset_range(&mut self, today: NaiveDate) {
        let (start, end) = default_range(&self.data_dir, self.fallback_days, today);
        self.start = start;
        self.end = end;
    }

    /// Text buffer behind one mock form field.
    pub fn form_field(&mut self, form: &str, field: &str) -> &mut String {
        self.forms
            .entry(form.to_string())
            .or_default()
            .entry(field.to_string())
            .or_default()
    }

    /// Accept a mock form: nothing is stored, the inputs are cleared.
    pub fn submit_form(&mut self, form: &str) {
        let filled = self
            .forms
            .remove(form)
            .map_or(0, |fields| fields.values().filter(|v| !v.trim().is_empty()).count());
        log::info!("Mock form '{form}' submitted with {filled} filled field(s)");
        self.status_message = Some(format!("'{form}' submitted (demo only, nothing was saved)."));
    }
}
