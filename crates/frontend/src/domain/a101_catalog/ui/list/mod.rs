use contracts::domain::a101_catalog::dto::CatalogDto;
use contracts::enums::{Broker, Category, Grade};
use contracts::shared::filters::FilterField;
use leptos::prelude::*;

use crate::shared::csv_check::CsvSchema;
use crate::shared::format::{format_date, format_number, format_optional, format_weight};
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
    enum_fields: &[
        ("broker", Broker::CODES),
        ("grade", Grade::CODES),
        ("category", Category::CODES),
    ],
    positive_fields: &["bags", "net_weight"],
};

impl ListEntity for CatalogDto {
    const API_PATH: &'static str = "/api/catalog";
    const TITLE: &'static str = "Catalog";
    const FILTER_FIELDS: &'static [FilterField] = &[
        FilterField::LotNo,
        FilterField::Broker,
        FilterField::Grade,
        FilterField::Category,
        FilterField::Mark,
        FilterField::SaleCode,
        FilterField::MinWeight,
        FilterField::MaxWeight,
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
            "Category",
            "Invoice",
            "Bags",
            "Net, kg",
            "Total, kg",
            "Valuation",
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
            self.category
                .map(|c| c.display_name().to_string())
                .unwrap_or_default(),
            self.invoice_no.clone(),
            self.bags.to_string(),
            format_number(self.net_weight, 2),
            format_weight(self.total_weight),
            format_optional(self.valuation),
            format_date(self.sale_date),
        ]
    }

    fn csv_schema() -> Option<&'static CsvSchema> {
        Some(&CSV_SCHEMA)
    }
}

#[component]
pub fn CatalogList() -> impl IntoView {
    entity_list_page::<CatalogDto>("a101_catalog--list", None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::csv_check::check_csv;

    #[test]
    fn one_cell_per_column() {
        let json = r#"{"id":1,"lotNo":"1043","saleCode":"2024/12","broker":"FW","mark":"Dimbula",
            "grade":"BOPF","invoiceNo":"I-7","bags":20,"netWeight":50.0,"totalWeight":1000.0,
            "adminId":1,"createdAt":"2024-03-01T10:00:00Z"}"#;
        let dto: CatalogDto = serde_json::from_str(json).unwrap();
        let cells = dto.cells();
        assert_eq!(cells.len(), CatalogDto::columns().len());
        assert_eq!(cells[2], "FW");
        assert_eq!(cells[5], "");
        assert_eq!(cells[11], "");
    }

    #[test]
    fn upload_template_passes_pre_check() {
        let text = "lot_no,sale_code,broker,mark,grade,invoice_no,bags,net_weight,category\n\
                    1043,2024/12,fw,Dimbula,BOPF,I-7,20,50,HIGH_GROWN\n";
        assert!(check_csv(text, &CSV_SCHEMA).is_ok());
    }
}
