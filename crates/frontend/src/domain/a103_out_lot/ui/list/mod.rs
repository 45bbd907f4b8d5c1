use contracts::domain::a103_out_lot::dto::OutLotDto;
use contracts::enums::{Broker, Grade};
use contracts::shared::filters::FilterField;
use leptos::prelude::*;

use crate::shared::csv_check::CsvSchema;
use crate::shared::format::{format_date, format_number, format_optional};
use crate::shared::list_controller::{BulkStrategy, ListEntity};
use crate::shared::list_page::entity_list_page;

const CSV_SCHEMA: CsvSchema = CsvSchema {
    required_headers: &[
        "lot_no",
        "sale_code",
        "broker",
        "mark",
        "grade",
        "invoice_no",
        "bags",
        "net_weight",
    ],
    required_fields: &["lot_no", "sale_code", "mark"],
    enum_fields: &[("broker", Broker::CODES), ("grade", Grade::CODES)],
    positive_fields: &["bags", "net_weight", "base_price"],
};

impl ListEntity for OutLotDto {
    const API_PATH: &'static str = "/api/out-lots";
    const TITLE: &'static str = "Out lots";
    const FILTER_FIELDS: &'static [FilterField] = &[
        FilterField::LotNo,
        FilterField::Broker,
        FilterField::Grade,
        FilterField::Mark,
        FilterField::SaleCode,
        FilterField::MinPrice,
        FilterField::MaxPrice,
        FilterField::DateFrom,
        FilterField::DateTo,
    ];
    const BULK_STRATEGY: BulkStrategy = BulkStrategy::ServerFilter;

    fn id(&self) -> i64 {
        self.id
    }

    fn columns() -> &'static [&'static str] {
        &[
            "Lot No",
            "Sale",
            "Broker",
            "Mark",
            "Grade",
            "Invoice",
            "Bags",
            "Net, kg",
            "Base price",
            "Lot date",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.lot_no.clone(),
            self.sale_code.clone(),
            self.broker.code().to_string(),
            self.mark.clone(),
            self.grade.code().to_string(),
            self.invoice_no.clone(),
            self.bags.to_string(),
            format_number(self.net_weight, 2),
            format_optional(self.base_price),
            format_date(self.lot_date),
        ]
    }

    fn csv_schema() -> Option<&'static CsvSchema> {
        Some(&CSV_SCHEMA)
    }
}

#[component]
pub fn OutLotList() -> impl IntoView {
    entity_list_page::<OutLotDto>("a103_out_lot--list", None)
}
