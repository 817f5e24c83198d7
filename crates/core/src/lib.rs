pub mod category;
pub mod money;
pub mod subscription;

pub use category::{Category, UnknownCategory};
pub use money::Money;
pub use subscription::{ParseResult, Subscription, SubscriptionId};
