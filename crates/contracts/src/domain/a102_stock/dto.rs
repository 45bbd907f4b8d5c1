use crate::enums::{Broker, Grade};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Share of a stock weight assigned to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAssignment {
    pub user_id: i64,
    pub weight: f64,
}

/// Warehouse stock (a102)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDto {
    pub id: i64,
    pub lot_no: String,
    pub mark: String,
    pub grade: Grade,
    pub broker: Broker,
    pub invoice_no: String,
    pub bags: u32,
    /// Weight, kg
    pub weight: f64,
    /// Purchase price per kg
    #[serde(default)]
    pub purchase_price: Option<f64>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub assignments: Vec<StockAssignment>,
    pub admin_id: i64,
}

impl StockDto {
    /// Weight already assigned to users
    pub fn assigned_weight(&self) -> f64 {
        self.assignments.iter().map(|a| a.weight).sum()
    }

    pub fn unassigned_weight(&self) -> f64 {
        (self.weight - self.assigned_weight()).max(0.0)
    }
}

/// Assign selected stock to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignStockRequest {
    pub stock_ids: Vec<i64>,
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignStockResponse {
    #[serde(default)]
    pub updated: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(weight: f64, assigned: &[f64]) -> StockDto {
        StockDto {
            id: 1,
            lot_no: "88".into(),
            mark: "Uva Highlands".into(),
            grade: Grade::Op,
            broker: Broker::Bartleet,
            invoice_no: "I-1".into(),
            bags: 10,
            weight,
            purchase_price: None,
            purchase_date: None,
            assignments: assigned
                .iter()
                .enumerate()
                .map(|(i, w)| StockAssignment {
                    user_id: i as i64 + 1,
                    weight: *w,
                })
                .collect(),
            admin_id: 1,
        }
    }

    #[test]
    fn unassigned_weight_never_negative() {
        assert_eq!(stock(500.0, &[100.0, 150.0]).unassigned_weight(), 250.0);
        assert_eq!(stock(100.0, &[80.0, 40.0]).unassigned_weight(), 0.0);
    }

    #[test]
    fn assign_request_omits_missing_weight() {
        let req = AssignStockRequest {
            stock_ids: vec![3, 4],
            user_id: 9,
            weight: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, serde_json::json!({"stockIds": [3, 4], "userId": 9}));
    }
}
