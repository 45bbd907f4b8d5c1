use super::filters::TeaFilters;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

/// Server export request: either an id list or a filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<TeaFilters>,
    pub format: ExportFormat,
}

impl ExportRequest {
    pub fn by_ids(ids: Vec<i64>, format: ExportFormat) -> Self {
        Self {
            ids: Some(ids),
            filters: None,
            format,
        }
    }

    pub fn by_filter(filters: TeaFilters, format: ExportFormat) -> Self {
        Self {
            ids: None,
            filters: Some(filters),
            format,
        }
    }
}

/// Export response; `url` is a presigned link to the file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResponse {
    #[serde(default)]
    pub url: Option<String>,
}
