use super::loader::LoadRequest;

/// The tabular resources the dashboard knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Resource {
    CashOnHandTrend,
    FixedDepositsTrend,
    ExpenditureBreakdown,
    OutstandingPayments,
    FacilitiesLocations,
    AcademicPrograms,
}

impl Resource {
    pub const ALL: [Resource; 6] = [
        Resource::CashOnHandTrend,
        Resource::FixedDepositsTrend,
        Resource::ExpenditureBreakdown,
        Resource::OutstandingPayments,
        Resource::FacilitiesLocations,
        Resource::AcademicPrograms,
    ];

    /// File stem inside the data directory.
    pub fn name(self) -> &'static str {
        match self {
            Resource::CashOnHandTrend => "cash_on_hand_trend",
            Resource::FixedDepositsTrend => "fixed_deposits_trend",
            Resource::ExpenditureBreakdown => "expenditure_breakdown",
            Resource::OutstandingPayments => "outstanding_payments",
            Resource::FacilitiesLocations => "facilities_locations",
            Resource::AcademicPrograms => "academic_programs",
        }
    }

    /// Header columns, in file order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Resource::CashOnHandTrend => &["Date", "Cash_on_Hand_USD"],
            Resource::FixedDepositsTrend => &["Date", "Fixed_Deposit_Value_USD"],
            Resource::ExpenditureBreakdown => &["Category", "Amount_USD"],
            Resource::OutstandingPayments => &["Category", "Amount_Outstanding_USD"],
            Resource::FacilitiesLocations => &["lat", "lon"],
            Resource::AcademicPrograms => &["Program_Name"],
        }
    }

    /// Date column that doubles as the row key, for trend resources.
    pub fn date_key(self) -> Option<&'static str> {
        match self {
            Resource::CashOnHandTrend | Resource::FixedDepositsTrend => Some("Date"),
            _ => None,
        }
    }

    /// The column naming each row, e.g. the bar label of a breakdown.
    pub fn label_column(self) -> &'static str {
        self.columns()[0]
    }

    /// The column holding the charted quantity.
    pub fn value_column(self) -> &'static str {
        let columns = self.columns();
        columns[columns.len() - 1]
    }

    pub fn request(self) -> LoadRequest {
        let request = LoadRequest::new(self.name()).require(self.columns());
        match self.date_key() {
            Some(col) => request.parse_dates(col).key(col),
            None => request,
        }
    }
}
