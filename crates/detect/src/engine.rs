use std::io::Read;
use std::path::PathBuf;

use subaudit_core::{Money, ParseResult, Subscription};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::ids::{IdSource, RandomIds};
use crate::matcher::SubscriptionMatcher;
use crate::row::RowParser;
use crate::table::{self, RawRow, TableError, TableOptions};

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("Failed to process CSV file: {0}")]
    Table(#[from] TableError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a CSV file: {}", .0.display())]
    NotCsv(PathBuf),
    #[error("Detection task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Runs row parsing and classification over a whole statement.
///
/// Row-level problems never fail a run: rows without a usable amount or
/// without a catalog match are skipped. Only a table that cannot be
/// tokenized at all produces an error.
pub struct DetectionEngine<I: IdSource = RandomIds> {
    matcher: SubscriptionMatcher,
    ids: I,
    table_options: TableOptions,
}

impl DetectionEngine<RandomIds> {
    pub fn new(matcher: SubscriptionMatcher) -> Self {
        Self::with_ids(matcher, RandomIds)
    }
}

impl Default for DetectionEngine<RandomIds> {
    fn default() -> Self {
        Self::new(SubscriptionMatcher::default())
    }
}

impl<I: IdSource> DetectionEngine<I> {
    pub fn with_ids(matcher: SubscriptionMatcher, ids: I) -> Self {
        Self {
            matcher,
            ids,
            table_options: TableOptions::default(),
        }
    }

    pub fn with_table_options(mut self, table_options: TableOptions) -> Self {
        self.table_options = table_options;
        self
    }

    pub fn detect_rows(&self, rows: &[RawRow]) -> ParseResult {
        let mut subscriptions = Vec::new();
        let mut total_spend = Money::zero();

        for (index, row) in rows.iter().enumerate() {
            let parsed = RowParser::parse(row);

            // Zero and unparseable amounts are indistinguishable here; both are dropped.
            if !parsed.is_chargeable() {
                trace!(row = index, "skipping row without a chargeable amount");
                continue;
            }

            let Some(rule) = self.matcher.classify(&parsed.description) else {
                trace!(row = index, "no catalog rule matched");
                continue;
            };

            debug!(row = index, service = %rule.name, amount = parsed.amount, "subscription detected");

            let amount = Money::new(parsed.amount);
            subscriptions.push(Subscription {
                id: self.ids.next_id(index),
                date: parsed.date,
                description: rule.name.clone(),
                amount,
                category: rule.category,
            });
            total_spend += amount;
        }

        info!(
            rows = rows.len(),
            matched = subscriptions.len(),
            total = total_spend.value(),
            "detection complete"
        );

        ParseResult {
            subscriptions,
            total_spend,
            raw_count: rows.len(),
        }
    }

    pub fn detect_reader<R: Read>(&self, data: R) -> Result<ParseResult, DetectError> {
        let rows = table::read_rows(data, &self.table_options)?;
        Ok(self.detect_rows(&rows))
    }

    pub fn detect_bytes(&self, data: &[u8]) -> Result<ParseResult, DetectError> {
        let rows = table::parse_rows(data, &self.table_options)?;
        Ok(self.detect_rows(&rows))
    }

    pub fn detect_str(&self, data: &str) -> Result<ParseResult, DetectError> {
        self.detect_bytes(data.as_bytes())
    }
}
