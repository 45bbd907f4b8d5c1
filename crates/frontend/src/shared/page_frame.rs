//! PageFrame: root wrapper of every page.
//!
//! Sets `id` in the form `{entity}--{category}` (e.g. `"a101_catalog--list"`)
//! and `data-page-category`, so a page can be found from the DOM inspector.

use leptos::prelude::*;

/// List of records: table with filters and pagination
pub const PAGE_CAT_LIST: &str = "list";
/// Dashboard view
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}
