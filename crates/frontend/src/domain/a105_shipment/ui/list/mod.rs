use contracts::domain::a105_shipment::dto::ShipmentDto;
use contracts::shared::filters::FilterField;
use leptos::prelude::*;

use crate::shared::format::{format_date, format_weight};
use crate::shared::list_controller::{BulkStrategy, ListEntity};
use crate::shared::list_page::entity_list_page;

impl ListEntity for ShipmentDto {
    const API_PATH: &'static str = "/api/shipments";
    const TITLE: &'static str = "Shipments";
    const FILTER_FIELDS: &'static [FilterField] = &[
        FilterField::MinWeight,
        FilterField::MaxWeight,
        FilterField::DateFrom,
        FilterField::DateTo,
    ];
    // Shipments are deleted one page at a time
    const BULK_STRATEGY: BulkStrategy = BulkStrategy::PageOnly;

    fn id(&self) -> i64 {
        self.id
    }

    fn columns() -> &'static [&'static str] {
        &[
            "Shipment No",
            "Vessel",
            "Consignee",
            "Destination",
            "Date",
            "Status",
            "Weight",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.shipment_no.clone(),
            self.vessel.clone().unwrap_or_default(),
            self.consignee.clone(),
            self.destination.clone(),
            format_date(self.shipment_date),
            self.status.display_name().to_string(),
            format_weight(self.total_weight),
        ]
    }
}

#[component]
pub fn ShipmentList() -> impl IntoView {
    entity_list_page::<ShipmentDto>("a105_shipment--list", None)
}
