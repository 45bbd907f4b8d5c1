//! Client-side CSV of the visible page and download of server exports
use super::list_controller::ListEntity;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// `;`-separated CSV with a UTF-8 BOM, the format Excel opens directly
pub fn build_csv(headers: &[&str], rows: &[Vec<String>]) -> Result<String, String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());

    writer
        .write_record(headers)
        .map_err(|e| format!("Failed to write headers: {}", e))?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| format!("Failed to write row: {}", e))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| format!("Failed to flush CSV: {}", e))?;
    let body = String::from_utf8(bytes).map_err(|e| format!("Invalid UTF-8: {}", e))?;

    let mut content = String::with_capacity(body.len() + 3);
    content.push('\u{FEFF}');
    content.push_str(&body);
    Ok(content)
}

/// Write the visible rows to a CSV file and start the download
pub fn export_page<E: ListEntity>(items: &[E], filename: &str) -> Result<(), String> {
    if items.is_empty() {
        return Err("Nothing to export".to_string());
    }
    let rows: Vec<Vec<String>> = items.iter().map(|item| item.cells()).collect();
    let content = build_csv(E::columns(), &rows)?;
    let blob = create_csv_blob(&content)?;
    download_blob(&blob, filename)
}

/// File name like `catalog_20240301_101500.csv`
pub fn export_filename(stem: &str, extension: &str) -> String {
    format!(
        "{}_{}.{}",
        stem,
        chrono::Utc::now().format("%Y%m%d_%H%M%S"),
        extension
    )
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn click_anchor(href: &str, filename: Option<&str>) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(href);
    if let Some(name) = filename {
        anchor.set_download(name);
    }
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;
    Ok(())
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;
    let clicked = click_anchor(&url, Some(filename));
    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;
    clicked
}

/// Open the presigned link of a server export
pub fn open_download_url(url: &str) -> Result<(), String> {
    click_anchor(url, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_has_bom_and_semicolons() {
        let rows = vec![vec!["L-1".to_string(), "120.5".to_string()]];
        let csv = build_csv(&["Lot No", "Weight"], &rows).unwrap();
        assert_eq!(csv, "\u{FEFF}Lot No;Weight\nL-1;120.5\n");
    }

    #[test]
    fn cells_with_separators_are_quoted() {
        let rows = vec![vec!["Estate; \"North\"".to_string(), String::new()]];
        let csv = build_csv(&["Mark", "Buyer"], &rows).unwrap();
        assert_eq!(csv, "\u{FEFF}Mark;Buyer\n\"Estate; \"\"North\"\"\";\n");
    }

    #[test]
    fn filename_keeps_stem_and_extension() {
        let name = export_filename("stock", "csv");
        assert!(name.starts_with("stock_"));
        assert!(name.ends_with(".csv"));
    }
}
