use crate::enums::{Broker, Grade};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Auction selling price of a lot (a104)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellingPriceDto {
    pub id: i64,
    pub lot_no: String,
    pub sale_code: String,
    pub broker: Broker,
    pub mark: String,
    pub grade: Grade,
    pub invoice_no: String,
    pub bags: u32,
    pub net_weight: f64,
    /// Price per kg
    pub price: f64,
    #[serde(default)]
    pub buyer: Option<String>,
    #[serde(default)]
    pub sale_date: Option<NaiveDate>,
    pub admin_id: i64,
}

impl SellingPriceDto {
    /// Net weight × packages × price
    pub fn proceeds(&self) -> f64 {
        self.net_weight * f64::from(self.bags) * self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proceeds_multiplies_weight_bags_and_price() {
        let dto = SellingPriceDto {
            id: 1,
            lot_no: "7".into(),
            sale_code: "2024/01".into(),
            broker: Broker::Mercantile,
            mark: "Kenilworth".into(),
            grade: Grade::Opa,
            invoice_no: "X".into(),
            bags: 4,
            net_weight: 25.0,
            price: 2.5,
            buyer: None,
            sale_date: None,
            admin_id: 1,
        };
        assert_eq!(dto.proceeds(), 250.0);
    }
}
