//! Normal-form identifiers and the normalization ladder

use serde::{Deserialize, Serialize};

/// Target normal form (1NF through 5NF)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NormalForm {
    First,
    Second,
    Third,
    BoyceCodd,
    Fourth,
    Fifth,
}

/// The full ladder, in application order
static LADDER: [NormalForm; 6] = [
    NormalForm::First,
    NormalForm::Second,
    NormalForm::Third,
    NormalForm::BoyceCodd,
    NormalForm::Fourth,
    NormalForm::Fifth,
];

impl NormalForm {
    /// Parse a 1-based form ordinal (1..=5); BCNF sits between 3 and 4 and
    /// is reachable by name only
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            1 => Some(Self::First),
            2 => Some(Self::Second),
            3 => Some(Self::Third),
            4 => Some(Self::Fourth),
            5 => Some(Self::Fifth),
            _ => None,
        }
    }

    /// Every form from 1NF up to and including `self`, in application order
    pub fn ladder_to(self) -> &'static [NormalForm] {
        let end = LADDER.iter().position(|form| *form == self).unwrap_or(0);
        &LADDER[..=end]
    }
}

impl std::fmt::Display for NormalForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::First => "1NF",
            Self::Second => "2NF",
            Self::Third => "3NF",
            Self::BoyceCodd => "BCNF",
            Self::Fourth => "4NF",
            Self::Fifth => "5NF",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for NormalForm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1" | "1NF" => Ok(Self::First),
            "2" | "2NF" => Ok(Self::Second),
            "3" | "3NF" => Ok(Self::Third),
            "BCNF" => Ok(Self::BoyceCodd),
            "4" | "4NF" => Ok(Self::Fourth),
            "5" | "5NF" => Ok(Self::Fifth),
            other => Err(format!("unknown normal form '{}'", other)),
        }
    }
}
