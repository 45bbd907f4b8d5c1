use leptos::prelude::*;
use web_sys::window;

/// Screen shown in the main area. The key lives in `location.hash`,
/// the query string belongs to the list filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Dashboard,
    Catalog,
    Stock,
    OutLots,
    SellingPrices,
    Shipments,
}

impl Section {
    pub const ALL: &'static [Section] = &[
        Section::Dashboard,
        Section::Catalog,
        Section::Stock,
        Section::OutLots,
        Section::SellingPrices,
        Section::Shipments,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Catalog => "catalog",
            Section::Stock => "stock",
            Section::OutLots => "out-lots",
            Section::SellingPrices => "selling-prices",
            Section::Shipments => "shipments",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Catalog => "Catalog",
            Section::Stock => "Stock",
            Section::OutLots => "Out lots",
            Section::SellingPrices => "Selling prices",
            Section::Shipments => "Shipments",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Catalog => "catalog",
            Section::Stock => "stock",
            Section::OutLots => "out-lots",
            Section::SellingPrices => "prices",
            Section::Shipments => "shipments",
        }
    }

    /// Regular users see the dashboard and the stock assigned to them
    pub fn admin_only(&self) -> bool {
        !matches!(self, Section::Dashboard | Section::Stock)
    }

    /// Parse `#stock` / `stock`; unknown keys give `None`
    pub fn from_hash(hash: &str) -> Option<Self> {
        let key = hash.trim_start_matches('#');
        Self::ALL.iter().copied().find(|s| s.key() == key)
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Section>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        let hash = window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default();
        Self {
            active: RwSignal::new(Section::from_hash(&hash).unwrap_or_default()),
            left_open: RwSignal::new(true),
        }
    }

    /// Switch the main area. Filters of the previous list are dropped from the URL.
    pub fn open(&self, section: Section) {
        if self.active.get_untracked() == section {
            return;
        }
        log::debug!("open section '{}'", section.key());
        if let Some(w) = window() {
            let path = w.location().pathname().unwrap_or_default();
            let url = format!("{}#{}", path, section.key());
            if let Ok(history) = w.history() {
                let _ = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url));
            }
        }
        self.active.set(section);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|open| *open = !*open);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
