use subaudit_core::{Category, Money, ParseResult, Subscription, SubscriptionId};

/// Row count reported by the demo, as if it came from a larger statement.
pub const DEMO_RAW_COUNT: usize = 25;

const DEMO_ENTRIES: [(&str, &str, &str, f64, Category); 6] = [
    ("1", "Jan 12, 2024", "Netflix Premium", 649.00, Category::Entertainment),
    ("2", "Jan 15, 2024", "Zomato Gold", 99.00, Category::FoodAndTravel),
    ("3", "Jan 18, 2024", "Jio Prepaid", 399.00, Category::Utilities),
    ("4", "Jan 20, 2024", "Spotify Duo", 149.00, Category::Entertainment),
    ("5", "Jan 25, 2024", "Uber Trip", 245.50, Category::FoodAndTravel),
    // A free membership line, kept so renderers see a zero amount.
    ("6", "Jan 28, 2024", "Cred Membership", 0.00, Category::Finance),
];

/// A fixed result for demos and UI testing. No file is read.
pub fn demo_result() -> ParseResult {
    let subscriptions = DEMO_ENTRIES
        .iter()
        .map(|(id, date, description, amount, category)| Subscription {
            id: SubscriptionId::new(*id),
            date: date.to_string(),
            description: description.to_string(),
            amount: Money::new(*amount),
            category: *category,
        })
        .collect();

    ParseResult::from_subscriptions(subscriptions, DEMO_RAW_COUNT)
}
