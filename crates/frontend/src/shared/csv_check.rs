//! CSV checks run before an upload reaches the server.
//!
//! Only the header line and the first non-empty data row are inspected; the
//! server validates the rest and answers with per-row errors.

use thiserror::Error;

/// What an upload file must look like
#[derive(Debug, Clone, PartialEq)]
pub struct CsvSchema {
    pub required_headers: &'static [&'static str],
    /// Headers whose value may not be blank in the first data row
    pub required_fields: &'static [&'static str],
    /// (header, allowed codes)
    pub enum_fields: &'static [(&'static str, &'static [&'static str])],
    /// Headers that must hold a number greater than zero
    pub positive_fields: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CsvCheckError {
    #[error("The file is empty or missing data rows")]
    EmptyOrMissingRows,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingHeaders(Vec<String>),

    #[error("Row {row}: {field} is required")]
    MissingField { row: u64, field: String },

    #[error("Row {row}: {field} \"{value}\" is not one of {}", .allowed.join(", "))]
    NotAllowed {
        row: u64,
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("Row {row}: {field} must be a positive number, got \"{value}\"")]
    NotPositive {
        row: u64,
        field: String,
        value: String,
    },

    #[error("Could not read the file: {0}")]
    Malformed(String),
}

/// Result of a passed check, shown next to the upload button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvSummary {
    pub headers: Vec<String>,
    /// Non-empty lines after the header
    pub data_rows: usize,
}

fn is_positive(value: &str) -> bool {
    value
        .parse::<f64>()
        .map(|v| v.is_finite() && v > 0.0)
        .unwrap_or(false)
}

/// Validate `text` against `schema`. Every problem of the first data row is reported.
pub fn check_csv(text: &str, schema: &CsvSchema) -> Result<CsvSummary, Vec<CsvCheckError>> {
    // UTF-8 BOM written by Excel
    let text = text.trim_start_matches('\u{FEFF}');

    let non_empty_lines = text.lines().filter(|l| !l.trim().is_empty()).count();
    if non_empty_lines < 2 {
        return Err(vec![CsvCheckError::EmptyOrMissingRows]);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(h) => h.iter().map(String::from).collect(),
        Err(e) => return Err(vec![CsvCheckError::Malformed(e.to_string())]),
    };
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    let missing: Vec<String> = schema
        .required_headers
        .iter()
        .filter(|h| column(**h).is_none())
        .map(|h| h.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(vec![CsvCheckError::MissingHeaders(missing)]);
    }

    let mut first = None;
    for result in reader.records() {
        let record = result.map_err(|e| vec![CsvCheckError::Malformed(e.to_string())])?;
        if record.iter().any(|v| !v.is_empty()) {
            first = Some(record);
            break;
        }
    }
    let record = first.ok_or_else(|| vec![CsvCheckError::EmptyOrMissingRows])?;
    let row = record.position().map(|p| p.line()).unwrap_or(2);
    let value = |name: &str| {
        column(name)
            .and_then(|i| record.get(i))
            .unwrap_or("")
            .to_string()
    };

    let mut errors = Vec::new();
    for field in schema.required_fields {
        if value(*field).is_empty() {
            errors.push(CsvCheckError::MissingField {
                row,
                field: field.to_string(),
            });
        }
    }
    for (field, allowed) in schema.enum_fields {
        let v = value(*field);
        if !v.is_empty() && !allowed.iter().any(|a| a.eq_ignore_ascii_case(&v)) {
            errors.push(CsvCheckError::NotAllowed {
                row,
                field: field.to_string(),
                value: v,
                allowed: allowed.iter().map(|a| a.to_string()).collect(),
            });
        }
    }
    for field in schema.positive_fields {
        let v = value(*field);
        if !v.is_empty() && !is_positive(&v) {
            errors.push(CsvCheckError::NotPositive {
                row,
                field: field.to_string(),
                value: v,
            });
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(CsvSummary {
        headers,
        data_rows: non_empty_lines - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: CsvSchema = CsvSchema {
        required_headers: &["lot_no", "grade", "bags", "net_weight"],
        required_fields: &["lot_no", "grade"],
        enum_fields: &[("grade", &["BOP", "FBOP", "OP"])],
        positive_fields: &["bags", "net_weight"],
    };

    #[test]
    fn header_only_file_is_rejected() {
        let errors = check_csv("lot_no,grade,bags,net_weight\n\n   \n", &SCHEMA).unwrap_err();
        assert_eq!(errors, vec![CsvCheckError::EmptyOrMissingRows]);
        assert_eq!(errors[0].to_string(), "The file is empty or missing data rows");

        assert_eq!(check_csv("", &SCHEMA).unwrap_err(), vec![CsvCheckError::EmptyOrMissingRows]);
    }

    #[test]
    fn lists_exactly_the_missing_headers() {
        let errors = check_csv("grade,lot_no,extra\nBOP,L1,x\n", &SCHEMA).unwrap_err();
        assert_eq!(
            errors,
            vec![CsvCheckError::MissingHeaders(vec![
                "bags".to_string(),
                "net_weight".to_string()
            ])]
        );
        assert_eq!(errors[0].to_string(), "Missing required columns: bags, net_weight");
    }

    #[test]
    fn first_row_problems_reported_together() {
        let text = "lot_no,grade,bags,net_weight\n,XYZ,0,abc\nL2,BOP,1,1\n";
        let errors = check_csv(text, &SCHEMA).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors[0],
            CsvCheckError::MissingField {
                row: 2,
                field: "lot_no".into()
            }
        );
        assert!(matches!(&errors[1], CsvCheckError::NotAllowed { value, .. } if value == "XYZ"));
        assert!(matches!(&errors[2], CsvCheckError::NotPositive { field, .. } if field == "bags"));
    }

    #[test]
    fn only_first_data_row_is_checked() {
        let text = "\u{FEFF}Lot_No,GRADE,bags,net_weight\n\nL1, fbop ,10,55.5\nL2,???,-1,x\n";
        let summary = check_csv(text, &SCHEMA).unwrap();
        assert_eq!(summary.data_rows, 2);
        assert_eq!(summary.headers[0], "Lot_No");
    }
}
