use serde::{Deserialize, Serialize};

/// Elevation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    HighGrown,
    MidGrown,
    LowGrown,
    OffGrade,
    Dust,
}

impl Category {
    pub fn code(&self) -> &'static str {
        match self {
            Category::HighGrown => "HIGH_GROWN",
            Category::MidGrown => "MID_GROWN",
            Category::LowGrown => "LOW_GROWN",
            Category::OffGrade => "OFF_GRADE",
            Category::Dust => "DUST",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::HighGrown => "High grown",
            Category::MidGrown => "Mid grown",
            Category::LowGrown => "Low grown",
            Category::OffGrade => "Off grade",
            Category::Dust => "Dust",
        }
    }

    pub fn all() -> Vec<Category> {
        vec![
            Category::HighGrown,
            Category::MidGrown,
            Category::LowGrown,
            Category::OffGrade,
            Category::Dust,
        ]
    }

    pub const CODES: &'static [&'static str] =
        &["HIGH_GROWN", "MID_GROWN", "LOW_GROWN", "OFF_GRADE", "DUST"];

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::all()
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_screaming_snake_codes() {
        for category in Category::all() {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.code()));
        }
    }
}
