use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl ShipmentStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "Pending",
            ShipmentStatus::Shipped => "Shipped",
            ShipmentStatus::Delivered => "Delivered",
            ShipmentStatus::Cancelled => "Cancelled",
        }
    }
}

/// Shipment (a105)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentDto {
    pub id: i64,
    /// Shipment number, the business key
    pub shipment_no: String,
    #[serde(default)]
    pub vessel: Option<String>,
    pub consignee: String,
    pub destination: String,
    #[serde(default)]
    pub shipment_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ShipmentStatus,
    pub total_weight: f64,
    pub admin_id: i64,
}
