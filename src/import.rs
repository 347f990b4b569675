//! Local CSV import helpers
//!
//! The upload path performs exactly one local check: the file name must end
//! in `.csv`. Content validation belongs to the server, which maps rows by
//! the headers listed in [`EXPECTED_HEADERS`] and reports per-row outcomes.
//! The dry-run [`preview`] exists so a user can sanity-check a file without
//! touching the network; the upload never depends on it.

use crate::errors::{ImportError, LeadbookError};

/// Headers the server's row mapping expects, in file order
pub const EXPECTED_HEADERS: [&str; 7] = [
    "Lead ID",
    "Lead Name",
    "Contact Information",
    "Source",
    "Interest Level",
    "Status",
    "Assigned Salesperson",
];

/// The one local gate applied before an upload
pub fn is_csv_file_name(name: &str) -> bool {
    name.ends_with(".csv")
}

/// Offline summary of a CSV file about to be imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPreview {
    /// Data rows (header excluded)
    pub records: usize,
    /// Headers as found in the file
    pub headers: Vec<String>,
    /// Expected headers the file does not carry
    pub missing_headers: Vec<&'static str>,
}

impl ImportPreview {
    pub fn has_expected_headers(&self) -> bool {
        self.missing_headers.is_empty()
    }
}

/// Parse CSV bytes and report row count and header coverage
pub fn preview(bytes: &[u8]) -> Result<ImportPreview, LeadbookError> {
    let mut reader = csv::Reader::from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LeadbookError::Import(ImportError::InvalidCsv {
            error: e.to_string(),
        }))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = 0usize;
    for record in reader.records() {
        record.map_err(|e| {
            LeadbookError::Import(ImportError::InvalidCsv {
                error: e.to_string(),
            })
        })?;
        records += 1;
    }

    let missing_headers = EXPECTED_HEADERS
        .iter()
        .copied()
        .filter(|expected| !headers.iter().any(|h| h == expected))
        .collect();

    Ok(ImportPreview {
        records,
        headers,
        missing_headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Lead ID,Lead Name,Contact Information,Source,Interest Level,Status,Assigned Salesperson
L-1,Acme Corp,acme@example.com,Web,High,New,Dana
L-2,Globex,globex@example.com,Referral,Low,Contacted,Eli
";

    #[test]
    fn test_csv_file_name_gate() {
        assert!(is_csv_file_name("leads.csv"));
        assert!(!is_csv_file_name("notes.txt"));
        assert!(!is_csv_file_name("leads.csv.bak"));
        // The gate is an exact suffix match, as the server applies it
        assert!(!is_csv_file_name("LEADS.CSV"));
    }

    #[test]
    fn test_preview_counts_records_and_headers() {
        let preview = preview(SAMPLE.as_bytes()).expect("valid csv");
        assert_eq!(preview.records, 2);
        assert_eq!(preview.headers.len(), 7);
        assert!(preview.has_expected_headers());
    }

    #[test]
    fn test_preview_reports_missing_headers() {
        let csv = "Lead ID,Lead Name\nL-1,Acme\n";
        let preview = preview(csv.as_bytes()).expect("valid csv");
        assert_eq!(preview.records, 1);
        assert!(!preview.has_expected_headers());
        assert!(preview.missing_headers.contains(&"Status"));
        assert!(!preview.missing_headers.contains(&"Lead ID"));
    }

    #[test]
    fn test_preview_rejects_ragged_rows() {
        let csv = "Lead ID,Lead Name\nL-1,Acme,extra-field\n";
        assert!(preview(csv.as_bytes()).is_err());
    }
}
