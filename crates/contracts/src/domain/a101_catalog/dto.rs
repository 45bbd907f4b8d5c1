use crate::enums::{Broker, Category, Grade};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Auction catalog lot (a101)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDto {
    pub id: i64,
    /// Lot number at the auction
    pub lot_no: String,
    /// Sale code, e.g. "2024/12"
    pub sale_code: String,
    pub broker: Broker,
    /// Mark (estate)
    pub mark: String,
    pub grade: Grade,
    pub invoice_no: String,
    #[serde(default)]
    pub category: Option<Category>,
    /// Number of packages (bags)
    pub bags: u32,
    /// Net weight of one package, kg
    pub net_weight: f64,
    /// Total weight, kg
    pub total_weight: f64,
    /// Broker valuation per kg
    #[serde(default)]
    pub valuation: Option<f64>,
    #[serde(default)]
    pub sale_date: Option<NaiveDate>,
    pub admin_id: i64,
    pub created_at: DateTime<Utc>,
}
