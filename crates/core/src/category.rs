use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of spend categories a catalog rule can assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Entertainment,
    #[serde(rename = "Food & Travel")]
    FoodAndTravel,
    Utilities,
    Finance,
    Software,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Entertainment,
        Category::FoodAndTravel,
        Category::Utilities,
        Category::Finance,
        Category::Software,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Entertainment => "Entertainment",
            Category::FoodAndTravel => "Food & Travel",
            Category::Utilities => "Utilities",
            Category::Finance => "Finance",
            Category::Software => "Software",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
