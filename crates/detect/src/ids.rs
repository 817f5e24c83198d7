use std::sync::atomic::{AtomicU64, Ordering};

use subaudit_core::SubscriptionId;

/// Hands out identity tokens for detected subscriptions.
/// Implementations only have to guarantee uniqueness, not any format.
pub trait IdSource: Send + Sync {
    fn next_id(&self, row_index: usize) -> SubscriptionId;
}

/// Random v4 UUIDs; safe across concurrent runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&self, _row_index: usize) -> SubscriptionId {
        SubscriptionId::new(format!("sub-{}", uuid::Uuid::new_v4()))
    }
}

/// A monotonic counter, for reproducible ids in tests and fixtures.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self, _row_index: usize) -> SubscriptionId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        SubscriptionId::new(format!("sub-{n}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn random_ids_are_unique() {
        let ids: HashSet<_> = (0..100).map(|i| RandomIds.next_id(i)).collect();
        assert_eq!(ids.len(), 100);
        assert!(ids.iter().all(|id| id.as_str().starts_with("sub-")));
    }

    #[test]
    fn sequential_ids_count_up() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_id(7).as_str(), "sub-1");
        assert_eq!(ids.next_id(7).as_str(), "sub-2");
    }
}
