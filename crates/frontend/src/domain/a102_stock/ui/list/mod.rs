mod assign;

use contracts::domain::a102_stock::dto::StockDto;
use contracts::enums::{Broker, Grade};
use contracts::shared::filters::FilterField;
use leptos::prelude::*;

use crate::shared::csv_check::CsvSchema;
use crate::shared::format::{format_date, format_optional, format_weight};
use crate::shared::list_controller::{BulkStrategy, ListEntity};
use crate::shared::list_page::entity_list_page;

const CSV_SCHEMA: CsvSchema = CsvSchema {
    required_headers: &["lot_no", "mark", "grade", "broker", "invoice_no", "bags", "weight"],
    required_fields: &["lot_no", "mark", "invoice_no"],
    enum_fields: &[("broker", Broker::CODES), ("grade", Grade::CODES)],
    positive_fields: &["bags", "weight", "purchase_price"],
};

impl ListEntity for StockDto {
    const API_PATH: &'static str = "/api/stock";
    const TITLE: &'static str = "Stock";
    const FILTER_FIELDS: &'static [FilterField] = &[
        FilterField::LotNo,
        FilterField::Broker,
        FilterField::Grade,
        FilterField::Mark,
        FilterField::MinWeight,
        FilterField::MaxWeight,
        FilterField::DateFrom,
        FilterField::DateTo,
        FilterField::UserId,
    ];
    const BULK_STRATEGY: BulkStrategy = BulkStrategy::MaterializeIds;

    fn id(&self) -> i64 {
        self.id
    }

    fn columns() -> &'static [&'static str] {
        &[
            "Lot No",
            "Mark",
            "Grade",
            "Broker",
            "Invoice",
            "Bags",
            "Weight",
            "Unassigned",
            "Purchase price",
            "Purchased",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.lot_no.clone(),
            self.mark.clone(),
            self.grade.code().to_string(),
            self.broker.code().to_string(),
            self.invoice_no.clone(),
            self.bags.to_string(),
            format_weight(self.weight),
            format_weight(self.unassigned_weight()),
            format_optional(self.purchase_price),
            format_date(self.purchase_date),
        ]
    }

    fn csv_schema() -> Option<&'static CsvSchema> {
        Some(&CSV_SCHEMA)
    }
}

#[component]
pub fn StockList() -> impl IntoView {
    entity_list_page::<StockDto>("a102_stock--list", Some(assign::assign_toolbar))
}
