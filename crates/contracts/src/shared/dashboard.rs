use serde::{Deserialize, Serialize};

/// Dashboard summary. Regular users get zero record counts and only
/// `assigned_weight` filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default)]
    pub catalogs: u64,
    #[serde(default)]
    pub stock: u64,
    #[serde(default)]
    pub out_lots: u64,
    #[serde(default)]
    pub selling_prices: u64,
    #[serde(default)]
    pub shipments: u64,
    #[serde(default)]
    pub assigned_weight: f64,
}
