use serde::{Deserialize, Serialize};

/// The seven filterable lead columns
///
/// `as_str` values are the wire identifiers the server recognizes as query
/// parameter keys; `label` is the human heading used for table output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadColumn {
    LeadId,
    LeadName,
    ContactInformation,
    Source,
    InterestLevel,
    Status,
    Salesperson,
}

/// All columns in display order
pub const LEAD_COLUMNS: [LeadColumn; 7] = [
    LeadColumn::LeadId,
    LeadColumn::LeadName,
    LeadColumn::ContactInformation,
    LeadColumn::Source,
    LeadColumn::InterestLevel,
    LeadColumn::Status,
    LeadColumn::Salesperson,
];

impl LeadColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadColumn::LeadId => "lead_id",
            LeadColumn::LeadName => "lead_name",
            LeadColumn::ContactInformation => "contact_information",
            LeadColumn::Source => "source",
            LeadColumn::InterestLevel => "interest_level",
            LeadColumn::Status => "status",
            LeadColumn::Salesperson => "salesperson",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeadColumn::LeadId => "Lead ID",
            LeadColumn::LeadName => "Lead Name",
            LeadColumn::ContactInformation => "Contact Information",
            LeadColumn::Source => "Source",
            LeadColumn::InterestLevel => "Interest Level",
            LeadColumn::Status => "Status",
            LeadColumn::Salesperson => "Salesperson",
        }
    }

    /// Parse a wire identifier. Unknown names are not a column, not a default.
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "lead_id" => Some(LeadColumn::LeadId),
            "lead_name" => Some(LeadColumn::LeadName),
            "contact_information" => Some(LeadColumn::ContactInformation),
            "source" => Some(LeadColumn::Source),
            "interest_level" => Some(LeadColumn::InterestLevel),
            "status" => Some(LeadColumn::Status),
            "salesperson" => Some(LeadColumn::Salesperson),
            _ => None,
        }
    }
}

impl std::fmt::Display for LeadColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
