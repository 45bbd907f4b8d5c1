//! List screen settings

/// Backend listens on this port next to the static front end
pub const BACKEND_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct ListConfig {
    /// Delay before committed filters are written to the URL
    pub debounce_ms: u32,
    /// Abort timeout for bulk delete calls
    pub bulk_timeout_ms: u32,
    /// `limit` of the second fetch that collects every matching id
    pub select_all_limit: u32,
    pub default_page_size: u32,
    pub page_size_options: &'static [u32],
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            bulk_timeout_ms: 10_000,
            select_all_limit: 10_000,
            default_page_size: 25,
            page_size_options: &[10, 25, 50, 100],
        }
    }
}

impl ListConfig {
    pub fn is_allowed_page_size(&self, size: u32) -> bool {
        self.page_size_options.contains(&size)
    }
}
