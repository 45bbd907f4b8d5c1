//! Filters <-> URL query string.

use contracts::shared::filters::TeaFilters;
use std::collections::{BTreeMap, HashMap};

pub const PAGE_KEY: &str = "page";
pub const LIMIT_KEY: &str = "limit";

/// Serialize filters plus paging. Unset fields never reach the URL.
pub fn to_query_string(filters: &TeaFilters, page: u32, limit: u32) -> String {
    let mut params: BTreeMap<&str, String> = filters.to_query_pairs().into_iter().collect();
    params.insert(PAGE_KEY, page.to_string());
    params.insert(LIMIT_KEY, limit.to_string());
    match serde_qs::to_string(&params) {
        Ok(query) => query,
        Err(e) => {
            log::warn!("Failed to serialize list query: {}", e);
            String::new()
        }
    }
}

/// Key/value pairs of `location.search` (leading `?` allowed).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedQuery {
    pub params: HashMap<String, String>,
    /// Raw keys of pairs that could not be decoded
    pub malformed: Vec<String>,
}

/// Pairs are decoded one at a time, so a single bad pair costs only itself.
pub fn parse_query(search: &str) -> ParsedQuery {
    let mut parsed = ParsedQuery::default();
    for pair in search.trim_start_matches('?').split('&') {
        if pair.is_empty() {
            continue;
        }
        match serde_qs::from_str::<HashMap<String, String>>(pair) {
            Ok(params) => parsed.params.extend(params),
            Err(e) => {
                let key = pair.split('=').next().unwrap_or(pair);
                log::warn!("Ignoring query parameter '{}': {}", key, e);
                parsed.malformed.push(key.to_string());
            }
        }
    }
    parsed
}

/// `location.search` value for a query string
pub fn search_for(query: &str) -> String {
    if query.is_empty() {
        String::new()
    } else {
        format!("?{}", query)
    }
}

/// Ticket of one scheduled URL update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Generation counter: only the newest ticket may fire.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    generation: u64,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersedes every ticket handed out before.
    pub fn schedule(&mut self) -> DebounceTicket {
        self.generation += 1;
        DebounceTicket(self.generation)
    }

    pub fn is_current(&self, ticket: DebounceTicket) -> bool {
        ticket.0 == self.generation
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::Grade;

    #[test]
    fn omits_unset_fields() {
        let filters = TeaFilters {
            grade: Some(Grade::Bop),
            mark: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(to_query_string(&filters, 2, 25), "grade=BOP&limit=25&page=2");
    }

    #[test]
    fn parses_back_what_it_wrote() {
        let filters = TeaFilters {
            lot_no: Some("1043".into()),
            min_price: Some(2.5),
            ..Default::default()
        };
        let params = parse_query(&format!("?{}", to_query_string(&filters, 1, 50))).params;
        assert_eq!(params.get("lotNo").map(String::as_str), Some("1043"));
        assert_eq!(params.get("minPrice").map(String::as_str), Some("2.5"));
        assert_eq!(params.get("limit").map(String::as_str), Some("50"));
    }

    #[test]
    fn empty_search_parses_to_nothing() {
        assert_eq!(parse_query(""), ParsedQuery::default());
        assert_eq!(parse_query("?"), ParsedQuery::default());
    }

    #[test]
    fn nested_key_does_not_drop_the_rest() {
        let parsed = parse_query("?grade=BOP&lotNo=9&x[a]=1");
        assert_eq!(parsed.params.get("grade").map(String::as_str), Some("BOP"));
        assert_eq!(parsed.params.get("lotNo").map(String::as_str), Some("9"));
        assert_eq!(parsed.params.len(), 2);
        assert_eq!(parsed.malformed, vec!["x[a]"]);
    }

    #[test]
    fn search_string_only_prefixed_when_needed() {
        assert_eq!(search_for(""), "");
        assert_eq!(search_for("page=1"), "?page=1");
    }

    #[test]
    fn newer_schedule_supersedes_pending_one() {
        let mut debouncer = Debouncer::new();
        let first = debouncer.schedule();
        let second = debouncer.schedule();
        assert!(!debouncer.is_current(first));
        assert!(debouncer.is_current(second));

        debouncer.cancel();
        assert!(!debouncer.is_current(second));
    }
}
