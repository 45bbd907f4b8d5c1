//! Typed filter record shared by every list screen.
//!
//! All list modules read the same record; each one declares the subset of
//! [`FilterField`]s it understands and drops the rest via [`TeaFilters::restrict`].

use crate::enums::{Broker, Category, Grade};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One filter dimension. The order of variants is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterField {
    LotNo,
    Broker,
    Grade,
    Category,
    Mark,
    SaleCode,
    MinWeight,
    MaxWeight,
    MinPrice,
    MaxPrice,
    DateFrom,
    DateTo,
    UserId,
}

impl FilterField {
    pub const ALL: &'static [FilterField] = &[
        FilterField::LotNo,
        FilterField::Broker,
        FilterField::Grade,
        FilterField::Category,
        FilterField::Mark,
        FilterField::SaleCode,
        FilterField::MinWeight,
        FilterField::MaxWeight,
        FilterField::MinPrice,
        FilterField::MaxPrice,
        FilterField::DateFrom,
        FilterField::DateTo,
        FilterField::UserId,
    ];

    /// Query-string / JSON key
    pub fn key(&self) -> &'static str {
        match self {
            FilterField::LotNo => "lotNo",
            FilterField::Broker => "broker",
            FilterField::Grade => "grade",
            FilterField::Category => "category",
            FilterField::Mark => "mark",
            FilterField::SaleCode => "saleCode",
            FilterField::MinWeight => "minWeight",
            FilterField::MaxWeight => "maxWeight",
            FilterField::MinPrice => "minPrice",
            FilterField::MaxPrice => "maxPrice",
            FilterField::DateFrom => "dateFrom",
            FilterField::DateTo => "dateTo",
            FilterField::UserId => "userId",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::LotNo => "Lot No",
            FilterField::Broker => "Broker",
            FilterField::Grade => "Grade",
            FilterField::Category => "Category",
            FilterField::Mark => "Mark",
            FilterField::SaleCode => "Sale code",
            FilterField::MinWeight => "Min weight (kg)",
            FilterField::MaxWeight => "Max weight (kg)",
            FilterField::MinPrice => "Min price",
            FilterField::MaxPrice => "Max price",
            FilterField::DateFrom => "Date from",
            FilterField::DateTo => "Date to",
            FilterField::UserId => "User",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeaFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broker: Option<Broker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

impl TeaFilters {
    pub fn is_empty(&self) -> bool {
        FilterField::ALL.iter().all(|f| self.value_of(*f).is_none())
    }

    /// Number of fields currently set (badge in the filter panel)
    pub fn active_count(&self) -> usize {
        FilterField::ALL
            .iter()
            .filter(|f| self.value_of(**f).is_some())
            .count()
    }

    /// String form of a field, `None` when the field is unset or blank.
    pub fn value_of(&self, field: FilterField) -> Option<String> {
        match field {
            FilterField::LotNo => non_blank(&self.lot_no),
            FilterField::Broker => self.broker.map(|b| b.code().to_string()),
            FilterField::Grade => self.grade.map(|g| g.code().to_string()),
            FilterField::Category => self.category.map(|c| c.code().to_string()),
            FilterField::Mark => non_blank(&self.mark),
            FilterField::SaleCode => non_blank(&self.sale_code),
            FilterField::MinWeight => self.min_weight.map(|v| v.to_string()),
            FilterField::MaxWeight => self.max_weight.map(|v| v.to_string()),
            FilterField::MinPrice => self.min_price.map(|v| v.to_string()),
            FilterField::MaxPrice => self.max_price.map(|v| v.to_string()),
            FilterField::DateFrom => self.date_from.map(|d| d.format("%Y-%m-%d").to_string()),
            FilterField::DateTo => self.date_to.map(|d| d.format("%Y-%m-%d").to_string()),
            FilterField::UserId => self.user_id.map(|v| v.to_string()),
        }
    }

    /// Copy of the record keeping only `fields`.
    pub fn restrict(&self, fields: &[FilterField]) -> Self {
        let mut out = TeaFilters::default();
        for field in fields {
            match field {
                FilterField::LotNo => out.lot_no = non_blank(&self.lot_no),
                FilterField::Broker => out.broker = self.broker,
                FilterField::Grade => out.grade = self.grade,
                FilterField::Category => out.category = self.category,
                FilterField::Mark => out.mark = non_blank(&self.mark),
                FilterField::SaleCode => out.sale_code = non_blank(&self.sale_code),
                FilterField::MinWeight => out.min_weight = self.min_weight,
                FilterField::MaxWeight => out.max_weight = self.max_weight,
                FilterField::MinPrice => out.min_price = self.min_price,
                FilterField::MaxPrice => out.max_price = self.max_price,
                FilterField::DateFrom => out.date_from = self.date_from,
                FilterField::DateTo => out.date_to = self.date_to,
                FilterField::UserId => out.user_id = self.user_id,
            }
        }
        out
    }

    /// `(key, value)` pairs of every set field, unset and blank ones omitted.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        FilterField::ALL
            .iter()
            .filter_map(|f| self.value_of(*f).map(|v| (f.key(), v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TeaFilters {
        TeaFilters {
            lot_no: Some("L-104".into()),
            broker: Some(Broker::JohnKeells),
            grade: Some(Grade::Bop),
            mark: Some("   ".into()),
            min_weight: Some(100.0),
            date_from: NaiveDate::from_ymd_opt(2024, 3, 1),
            ..Default::default()
        }
    }

    #[test]
    fn query_pairs_skip_unset_and_blank_fields() {
        let pairs = sample().to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("lotNo", "L-104".to_string()),
                ("broker", "JK".to_string()),
                ("grade", "BOP".to_string()),
                ("minWeight", "100".to_string()),
                ("dateFrom", "2024-03-01".to_string()),
            ]
        );
    }

    #[test]
    fn restrict_drops_unknown_fields() {
        let only = sample().restrict(&[FilterField::LotNo, FilterField::Mark]);
        assert_eq!(only.lot_no.as_deref(), Some("L-104"));
        assert_eq!(only.mark, None);
        assert_eq!(only.broker, None);
        assert_eq!(only.active_count(), 1);
    }

    #[test]
    fn empty_record_serializes_to_empty_object() {
        let json = serde_json::to_string(&TeaFilters::default()).unwrap();
        assert_eq!(json, "{}");
        assert!(TeaFilters::default().is_empty());
    }

    #[test]
    fn keys_round_trip() {
        for field in FilterField::ALL {
            assert_eq!(FilterField::from_key(field.key()), Some(*field));
        }
        assert_eq!(FilterField::from_key("page"), None);
    }
}
