use serde::{Deserialize, Serialize};

/// Tea auction brokers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Broker {
    #[serde(rename = "CTB")]
    CeylonTeaBrokers,
    #[serde(rename = "FW")]
    ForbesWalker,
    #[serde(rename = "JK")]
    JohnKeells,
    #[serde(rename = "ASIA")]
    AsiaSiyaka,
    #[serde(rename = "BART")]
    Bartleet,
    #[serde(rename = "MERC")]
    Mercantile,
}

impl Broker {
    /// Broker code as used by the API and CSV files
    pub fn code(&self) -> &'static str {
        match self {
            Broker::CeylonTeaBrokers => "CTB",
            Broker::ForbesWalker => "FW",
            Broker::JohnKeells => "JK",
            Broker::AsiaSiyaka => "ASIA",
            Broker::Bartleet => "BART",
            Broker::Mercantile => "MERC",
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Broker::CeylonTeaBrokers => "Ceylon Tea Brokers",
            Broker::ForbesWalker => "Forbes & Walker",
            Broker::JohnKeells => "John Keells",
            Broker::AsiaSiyaka => "Asia Siyaka",
            Broker::Bartleet => "Bartleet Produce",
            Broker::Mercantile => "Mercantile Produce",
        }
    }

    pub fn all() -> Vec<Broker> {
        vec![
            Broker::CeylonTeaBrokers,
            Broker::ForbesWalker,
            Broker::JohnKeells,
            Broker::AsiaSiyaka,
            Broker::Bartleet,
            Broker::Mercantile,
        ]
    }

    /// Every broker code; the allow-list for filters and CSV
    pub const CODES: &'static [&'static str] = &["CTB", "FW", "JK", "ASIA", "BART", "MERC"];

    /// Case-insensitive parse from a code
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::all()
            .into_iter()
            .find(|b| b.code().eq_ignore_ascii_case(code))
    }
}

impl std::fmt::Display for Broker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_variants() {
        let codes: Vec<&str> = Broker::all().iter().map(|b| b.code()).collect();
        assert_eq!(codes, Broker::CODES);
    }

    #[test]
    fn from_code_ignores_case() {
        assert_eq!(Broker::from_code("jk"), Some(Broker::JohnKeells));
        assert_eq!(Broker::from_code(" Asia "), Some(Broker::AsiaSiyaka));
        assert_eq!(Broker::from_code("unknown"), None);
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&Broker::Bartleet).unwrap();
        assert_eq!(json, "\"BART\"");
    }
}
