use crate::catalog::{Catalog, SubscriptionRule};

/// Classifies normalized description text against a catalog.
///
/// First match wins: rules are tried in declaration order, and a rule matches
/// when any of its patterns is a substring of the description. There is no
/// scoring, so an earlier rule always shadows a later one on overlap.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionMatcher {
    catalog: Catalog,
}

impl SubscriptionMatcher {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn classify(&self, description: &str) -> Option<&SubscriptionRule> {
        self.catalog.rules().iter().find(|rule| rule.matches(description))
    }
}
