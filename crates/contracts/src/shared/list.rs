use super::filters::TeaFilters;
use serde::{Deserialize, Serialize};

/// One list page: `{data, meta: {total, totalPages}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub meta: ListMeta,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    pub total: u64,
    pub total_pages: u32,
}

/// Delete by id list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteByIdsRequest {
    pub ids: Vec<i64>,
}

/// Delete every record matching the filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteByFilterRequest {
    #[serde(flatten)]
    pub filters: TeaFilters,
    pub confirm: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    #[serde(default)]
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Grade;

    #[test]
    fn parses_list_envelope() {
        let json = r#"{"data":[1,2,3],"meta":{"total":42,"totalPages":5}}"#;
        let resp: ListResponse<i64> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data, vec![1, 2, 3]);
        assert_eq!(resp.meta, ListMeta { total: 42, total_pages: 5 });
    }

    #[test]
    fn delete_by_filter_flattens_filters() {
        let req = DeleteByFilterRequest {
            filters: TeaFilters {
                grade: Some(Grade::Dust),
                ..Default::default()
            },
            confirm: true,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, serde_json::json!({"grade": "DUST", "confirm": true}));
    }

    #[test]
    fn delete_response_tolerates_missing_count() {
        let resp: DeleteResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.deleted_count, 0);
    }
}
