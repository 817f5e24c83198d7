use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use subaudit_core::{Category, UnknownCategory};
use thiserror::Error;

/// A known merchant: its display name, the lowercase substrings that identify
/// it in statement text, and the category it is reported under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionRule {
    pub name: String,
    pub patterns: Vec<String>,
    pub category: Category,
}

impl SubscriptionRule {
    pub fn new(name: &str, patterns: &[&str], category: Category) -> Self {
        SubscriptionRule {
            name: name.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            category,
        }
    }

    /// True when any pattern occurs in the (already normalized) description.
    pub fn matches(&self, description: &str) -> bool {
        self.patterns.iter().any(|p| description.contains(p.as_str()))
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Rule '{name}': {source}")]
    Category {
        name: String,
        #[source]
        source: UnknownCategory,
    },
    #[error("Rule '{0}' has no patterns")]
    NoPatterns(String),
    #[error("Rule '{0}' has an empty pattern")]
    EmptyPattern(String),
}

const BUILTIN_RULES: &[(&str, &[&str], Category)] = &[
    // Entertainment
    ("Netflix", &["netflix"], Category::Entertainment),
    ("Spotify", &["spotify"], Category::Entertainment),
    (
        "Amazon Prime",
        &["prime video", "amazon prime", "amzn digital", "amazon video"],
        Category::Entertainment,
    ),
    ("YouTube Premium", &["youtube", "google *youtube"], Category::Entertainment),
    ("Disney+ Hotstar", &["hotstar", "disney plus"], Category::Entertainment),
    ("SonyLIV", &["sonyliv"], Category::Entertainment),
    ("Apple Services", &["apple.com/bill", "itunes"], Category::Entertainment),
    // Food & Travel
    ("Zomato", &["zomato"], Category::FoodAndTravel),
    ("Swiggy", &["swiggy"], Category::FoodAndTravel),
    ("Uber", &["uber", "uber trip"], Category::FoodAndTravel),
    ("Ola", &["ola cabs", "olacabs"], Category::FoodAndTravel),
    ("Rapido", &["rapido"], Category::FoodAndTravel),
    // Utilities
    ("Jio", &["jio", "reliance jio"], Category::Utilities),
    ("Airtel", &["airtel"], Category::Utilities),
    ("Vi", &["vodafone", "vi prepaid", "vi postpaid"], Category::Utilities),
    ("Bescom", &["bescom"], Category::Utilities),
    ("Act Fibernet", &["act fibernet", "act broadband"], Category::Utilities),
    // Finance
    ("Cred", &["cred club", "cred."], Category::Finance),
    ("Zerodha", &["zerodha"], Category::Finance),
    ("Groww", &["groww"], Category::Finance),
    // Software
    ("Adobe", &["adobe"], Category::Software),
    ("Google One", &["google one", "google storage"], Category::Software),
    ("Microsoft 365", &["microsoft*365", "msft"], Category::Software),
];

/// An ordered list of rules. Declaration order is match precedence.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    rules: Vec<SubscriptionRule>,
}

/// On-disk shape of a catalog file: a sequence of `[[rule]]` tables.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    rule: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
struct RuleEntry {
    name: String,
    patterns: Vec<String>,
    category: String,
}

impl Catalog {
    pub fn new(rules: Vec<SubscriptionRule>) -> Self {
        Catalog { rules }
    }

    /// The built-in merchant list, initialised once per process.
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Catalog::new(
                BUILTIN_RULES
                    .iter()
                    .map(|(name, patterns, category)| SubscriptionRule::new(name, patterns, *category))
                    .collect(),
            )
        })
    }

    pub fn from_toml(toml_content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(toml_content)?;

        let rules = file
            .rule
            .into_iter()
            .map(|entry| {
                let category = entry.category.parse::<Category>().map_err(|source| {
                    CatalogError::Category {
                        name: entry.name.clone(),
                        source,
                    }
                })?;
                if entry.patterns.is_empty() {
                    return Err(CatalogError::NoPatterns(entry.name));
                }
                if entry.patterns.iter().any(|p| p.trim().is_empty()) {
                    return Err(CatalogError::EmptyPattern(entry.name));
                }
                Ok(SubscriptionRule {
                    name: entry.name,
                    patterns: entry.patterns.iter().map(|p| p.to_lowercase()).collect(),
                    category,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Catalog::new(rules))
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn rules(&self) -> &[SubscriptionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_every_rule_in_order() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 23);
        let names: Vec<&str> = catalog.rules().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names[0], "Netflix");
        assert_eq!(names[2], "Amazon Prime");
        assert_eq!(names[7], "Zomato");
        assert_eq!(names[12], "Jio");
        assert_eq!(names[17], "Cred");
        assert_eq!(names[22], "Microsoft 365");
    }

    #[test]
    fn builtin_patterns_are_lowercase() {
        for rule in Catalog::builtin().rules() {
            for pattern in &rule.patterns {
                assert_eq!(pattern, &pattern.to_lowercase(), "{}", rule.name);
            }
        }
    }

    #[test]
    fn builtin_categories() {
        let catalog = Catalog::builtin();
        let category_of = |name: &str| {
            catalog
                .rules()
                .iter()
                .find(|r| r.name == name)
                .map(|r| r.category)
                .unwrap()
        };
        assert_eq!(category_of("Uber"), Category::FoodAndTravel);
        assert_eq!(category_of("Act Fibernet"), Category::Utilities);
        assert_eq!(category_of("Groww"), Category::Finance);
        assert_eq!(category_of("Google One"), Category::Software);
    }

    #[test]
    fn rule_matches_any_pattern() {
        let rule = SubscriptionRule::new("Ola", &["ola cabs", "olacabs"], Category::FoodAndTravel);
        assert!(rule.matches("upi/olacabs/blr"));
        assert!(rule.matches("ola cabs ride"));
        assert!(!rule.matches("ola electric"));
    }

    #[test]
    fn from_toml_loads_rules_in_order() {
        let toml = r#"
            [[rule]]
            name = "Notion"
            patterns = ["NOTION.SO", "notion labs"]
            category = "software"

            [[rule]]
            name = "Cult.fit"
            patterns = ["cult.fit", "curefit"]
            category = "Food & Travel"
        "#;
        let catalog = Catalog::from_toml(toml).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.rules()[0].name, "Notion");
        assert_eq!(catalog.rules()[0].patterns[0], "notion.so");
        assert_eq!(catalog.rules()[0].category, Category::Software);
        assert_eq!(catalog.rules()[1].category, Category::FoodAndTravel);
    }

    #[test]
    fn from_toml_empty_document_is_empty_catalog() {
        assert!(Catalog::from_toml("").unwrap().is_empty());
    }

    #[test]
    fn from_toml_rejects_unknown_category() {
        let toml = r#"
            [[rule]]
            name = "Gym"
            patterns = ["gym"]
            category = "Health"
        "#;
        let err = Catalog::from_toml(toml).unwrap_err();
        assert!(matches!(err, CatalogError::Category { ref name, .. } if name == "Gym"));
    }

    #[test]
    fn from_toml_rejects_missing_or_blank_patterns() {
        let none = "[[rule]]\nname = \"A\"\npatterns = []\ncategory = \"Finance\"\n";
        assert!(matches!(Catalog::from_toml(none), Err(CatalogError::NoPatterns(_))));

        let blank = "[[rule]]\nname = \"B\"\npatterns = [\" \"]\ncategory = \"Finance\"\n";
        assert!(matches!(Catalog::from_toml(blank), Err(CatalogError::EmptyPattern(_))));
    }

    #[test]
    fn from_toml_malformed() {
        assert!(matches!(Catalog::from_toml("[[rule"), Err(CatalogError::Toml(_))));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, "[[rule]]\nname = \"Hulu\"\npatterns = [\"hulu\"]\ncategory = \"Entertainment\"\n")
            .unwrap();
        let catalog = Catalog::from_path(&path).unwrap();
        assert_eq!(catalog.rules()[0].name, "Hulu");
    }
}
