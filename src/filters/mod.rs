//! Per-column filter state for the lead list and its query encoding

mod store;
mod types;

pub use store::FilterStore;
pub use types::{LeadColumn, LEAD_COLUMNS};
