use serde::{Deserialize, Serialize};

/// Tea grades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "OP")]
    Op,
    #[serde(rename = "OP1")]
    Op1,
    #[serde(rename = "OPA")]
    Opa,
    #[serde(rename = "PEKOE")]
    Pekoe,
    #[serde(rename = "BOP")]
    Bop,
    #[serde(rename = "BOP1")]
    Bop1,
    #[serde(rename = "BOPF")]
    Bopf,
    #[serde(rename = "FBOP")]
    Fbop,
    #[serde(rename = "FF")]
    Ff,
    #[serde(rename = "DUST")]
    Dust,
}

impl Grade {
    pub fn code(&self) -> &'static str {
        match self {
            Grade::Op => "OP",
            Grade::Op1 => "OP1",
            Grade::Opa => "OPA",
            Grade::Pekoe => "PEKOE",
            Grade::Bop => "BOP",
            Grade::Bop1 => "BOP1",
            Grade::Bopf => "BOPF",
            Grade::Fbop => "FBOP",
            Grade::Ff => "FF",
            Grade::Dust => "DUST",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Grade::Op => "Orange Pekoe",
            Grade::Op1 => "Orange Pekoe 1",
            Grade::Opa => "Orange Pekoe A",
            Grade::Pekoe => "Pekoe",
            Grade::Bop => "Broken Orange Pekoe",
            Grade::Bop1 => "Broken Orange Pekoe 1",
            Grade::Bopf => "Broken Orange Pekoe Fannings",
            Grade::Fbop => "Flowery Broken Orange Pekoe",
            Grade::Ff => "Flowery Fannings",
            Grade::Dust => "Dust",
        }
    }

    pub fn all() -> Vec<Grade> {
        vec![
            Grade::Op,
            Grade::Op1,
            Grade::Opa,
            Grade::Pekoe,
            Grade::Bop,
            Grade::Bop1,
            Grade::Bopf,
            Grade::Fbop,
            Grade::Ff,
            Grade::Dust,
        ]
    }

    pub const CODES: &'static [&'static str] = &[
        "OP", "OP1", "OPA", "PEKOE", "BOP", "BOP1", "BOPF", "FBOP", "FF", "DUST",
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::all()
            .into_iter()
            .find(|g| g.code().eq_ignore_ascii_case(code))
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
