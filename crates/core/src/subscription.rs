use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::money::Money;

/// Opaque identity token for one detected charge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(pub String);

impl SubscriptionId {
    pub fn new(id: impl Into<String>) -> Self {
        SubscriptionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One statement row that matched a catalog rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    /// "Jan 12, 2024", the raw cell text when unparseable, or "Unknown Date".
    pub date: String,
    /// Canonical merchant name from the matching rule.
    pub description: String,
    pub amount: Money,
    pub category: Category,
}

impl Subscription {
    /// Field-wise equality ignoring `id`.
    pub fn same_charge(&self, other: &Subscription) -> bool {
        self.date == other.date
            && self.description == other.description
            && self.amount == other.amount
            && self.category == other.category
    }
}

/// The outcome of one detection run over one statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub subscriptions: Vec<Subscription>,
    pub total_spend: Money,
    pub raw_count: usize,
}

impl ParseResult {
    pub fn from_subscriptions(subscriptions: Vec<Subscription>, raw_count: usize) -> Self {
        let total_spend = subscriptions.iter().map(|s| s.amount).sum();
        ParseResult {
            subscriptions,
            total_spend,
            raw_count,
        }
    }

    pub fn empty(raw_count: usize) -> Self {
        Self::from_subscriptions(Vec::new(), raw_count)
    }

    pub fn count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn annual_projection(&self) -> Money {
        self.total_spend.annualized()
    }

    /// Spend per category, in the order each category first appears.
    pub fn spend_by_category(&self) -> Vec<(Category, Money)> {
        let mut totals: Vec<(Category, Money)> = Vec::new();
        for sub in &self.subscriptions {
            match totals.iter_mut().find(|(c, _)| *c == sub.category) {
                Some((_, total)) => *total += sub.amount,
                None => totals.push((sub.category, sub.amount)),
            }
        }
        totals
    }

    /// True when both results hold the same charges in the same order and
    /// agree on totals, regardless of the ids handed out.
    pub fn same_detections(&self, other: &ParseResult) -> bool {
        self.raw_count == other.raw_count
            && self.total_spend == other.total_spend
            && self.subscriptions.len() == other.subscriptions.len()
            && self
                .subscriptions
                .iter()
                .zip(&other.subscriptions)
                .all(|(a, b)| a.same_charge(b))
    }
}
