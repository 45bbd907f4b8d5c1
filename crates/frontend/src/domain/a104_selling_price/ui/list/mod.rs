use contracts::domain::a104_selling_price::dto::SellingPriceDto;
use contracts::enums::{Broker, Grade};
use contracts::shared::filters::FilterField;
use leptos::prelude::*;

use crate::shared::csv_check::CsvSchema;
use crate::shared::format::{format_date, format_number};
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
        "price",
    ],
    required_fields: &["lot_no", "sale_code", "price"],
    enum_fields: &[("broker", Broker::CODES), ("grade", Grade::CODES)],
    positive_fields: &["bags", "net_weight", "price"],
};

impl ListEntity for SellingPriceDto {
    const API_PATH: &'static str = "/api/selling-prices";
    const TITLE: &'static str = "Selling prices";
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
    const BULK_STRATEGY: BulkStrategy = BulkStrategy::MaterializeIds;

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
            "Bags",
            "Net, kg",
            "Price",
            "Proceeds",
            "Buyer",
            "Sale date",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.lot_no.clone(),
            self.sale_code.clone(),
            self.broker.code().to_string(),
            self.mark.clone(),
            self.grade.code().to_string(),
            self.bags.to_string(),
            format_number(self.net_weight, 2),
            format_number(self.price, 2),
            format_number(self.proceeds(), 2),
            self.buyer.clone().unwrap_or_default(),
            format_date(self.sale_date),
        ]
    }

    fn csv_schema() -> Option<&'static CsvSchema> {
        Some(&CSV_SCHEMA)
    }
}

#[component]
pub fn SellingPriceList() -> impl IntoView {
    entity_list_page::<SellingPriceDto>("a104_selling_price--list", None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::csv_check::{check_csv, CsvCheckError};

    #[test]
    fn price_must_be_positive_in_upload() {
        let text = "lot_no,sale_code,broker,mark,grade,invoice_no,bags,net_weight,price\n\
                    7,2024/01,MERC,Kenilworth,OPA,X,4,25,0\n";
        let errors = check_csv(text, &CSV_SCHEMA).unwrap_err();
        assert!(matches!(&errors[..], [CsvCheckError::NotPositive { field, .. }] if field == "price"));
    }
}
