use serde::{Deserialize, Serialize};

/// How a CSV upload treats duplicates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateAction {
    #[default]
    Skip,
    Replace,
}

impl DuplicateAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateAction::Skip => "skip",
            DuplicateAction::Replace => "replace",
        }
    }

    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("replace") {
            DuplicateAction::Replace
        } else {
            DuplicateAction::Skip
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadCounts {
    #[serde(default)]
    pub created: u32,
    #[serde(default)]
    pub skipped: u32,
    #[serde(default)]
    pub replaced: u32,
}

/// Row error reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub row: u32,
    pub message: String,
}

/// CSV upload response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvUploadResponse {
    pub success: UploadCounts,
    #[serde(default)]
    pub errors: Vec<RowError>,
}

impl CsvUploadResponse {
    pub fn summary(&self) -> String {
        format!(
            "Created {}, skipped {}, replaced {}",
            self.success.created, self.success.skipped, self.success.replaced
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_upload_result_with_row_errors() {
        let json = r#"{"success":{"created":3,"skipped":1,"replaced":0},
                       "errors":[{"row":4,"message":"Invalid grade"}]}"#;
        let resp: CsvUploadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.success.created, 3);
        assert_eq!(resp.errors[0].row, 4);
        assert_eq!(resp.summary(), "Created 3, skipped 1, replaced 0");
    }

    #[test]
    fn duplicate_action_defaults_to_skip() {
        assert_eq!(DuplicateAction::parse("REPLACE"), DuplicateAction::Replace);
        assert_eq!(DuplicateAction::parse("whatever"), DuplicateAction::Skip);
        assert_eq!(DuplicateAction::default().as_str(), "skip");
    }
}
