use crate::enums::{Broker, Grade};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lot put up for sale (a103)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutLotDto {
    pub id: i64,
    pub lot_no: String,
    pub sale_code: String,
    pub broker: Broker,
    pub mark: String,
    pub grade: Grade,
    pub invoice_no: String,
    pub bags: u32,
    pub net_weight: f64,
    /// Starting price per kg
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde(default)]
    pub lot_date: Option<NaiveDate>,
    pub admin_id: i64,
}
