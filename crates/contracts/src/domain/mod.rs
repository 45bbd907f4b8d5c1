pub mod a101_catalog;
pub mod a102_stock;
pub mod a103_out_lot;
pub mod a104_selling_price;
pub mod a105_shipment;
