use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use subaudit_core::ParseResult;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::demo::demo_result;
use crate::engine::{DetectError, DetectionEngine};
use crate::ids::{IdSource, RandomIds};

/// Holds the result of the most recent upload.
///
/// Every scan, demo load or reset starts a new generation. A scan that
/// finishes after a newer generation began is discarded rather than stored,
/// so a slow earlier upload can never overwrite a later one.
pub struct AuditSession<I: IdSource + 'static = RandomIds> {
    engine: Arc<DetectionEngine<I>>,
    generation: AtomicU64,
    current: Mutex<Option<ParseResult>>,
}

impl Default for AuditSession<RandomIds> {
    fn default() -> Self {
        Self::new(DetectionEngine::default())
    }
}

impl<I: IdSource + 'static> AuditSession<I> {
    pub fn new(engine: DetectionEngine<I>) -> Self {
        Self {
            engine: Arc::new(engine),
            generation: AtomicU64::new(0),
            current: Mutex::new(None),
        }
    }

    /// Scan a statement on disk. Returns `Ok(None)` if a newer scan or a
    /// reset started before this one finished.
    pub async fn scan_path(&self, path: &Path) -> Result<Option<ParseResult>, DetectError> {
        ensure_csv(path)?;
        let ticket = self.begin();
        info!("Scanning statement: {}", path.display());
        let data = tokio::fs::read(path).await;
        match data {
            Ok(bytes) => self.finish(ticket, bytes).await,
            Err(e) if self.is_current(ticket) => Err(e.into()),
            Err(_) => Ok(None),
        }
    }

    /// Scan statement bytes that are already in memory.
    pub async fn scan_bytes(&self, data: Vec<u8>) -> Result<Option<ParseResult>, DetectError> {
        let ticket = self.begin();
        self.finish(ticket, data).await
    }

    pub async fn load_demo(&self) -> ParseResult {
        self.begin();
        let result = demo_result();
        *self.current.lock().await = Some(result.clone());
        result
    }

    pub async fn current(&self) -> Option<ParseResult> {
        self.current.lock().await.clone()
    }

    /// Forget the current result and abandon any scan still in flight.
    pub async fn reset(&self) {
        self.begin();
        *self.current.lock().await = None;
    }

    fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    async fn finish(&self, ticket: u64, data: Vec<u8>) -> Result<Option<ParseResult>, DetectError> {
        let engine = Arc::clone(&self.engine);
        let outcome = tokio::task::spawn_blocking(move || engine.detect_bytes(&data)).await?;

        let mut current = self.current.lock().await;
        if !self.is_current(ticket) {
            debug!(ticket, "discarding superseded scan");
            return Ok(None);
        }
        let result = outcome?;
        *current = Some(result.clone());
        Ok(Some(result))
    }
}

/// Only `.csv` files are accepted, case-insensitively.
pub fn ensure_csv(path: &Path) -> Result<(), DetectError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        Ok(())
    } else {
        Err(DetectError::NotCsv(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::matcher::SubscriptionMatcher;

    const STATEMENT: &str = "Date,Memo,Amount\n2024-01-12,netflix,649\n2024-01-13,groceries,1200\n";

    fn session() -> AuditSession<SequentialIds> {
        AuditSession::new(DetectionEngine::with_ids(
            SubscriptionMatcher::default(),
            SequentialIds::new(),
        ))
    }

    #[test]
    fn ensure_csv_checks_extension() {
        assert!(ensure_csv(Path::new("statement.csv")).is_ok());
        assert!(ensure_csv(Path::new("STATEMENT.CSV")).is_ok());
        assert!(matches!(ensure_csv(Path::new("statement.xlsx")), Err(DetectError::NotCsv(_))));
        assert!(matches!(ensure_csv(Path::new("statement")), Err(DetectError::NotCsv(_))));
    }

    #[tokio::test]
    async fn scan_path_stores_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jan.csv");
        std::fs::write(&path, STATEMENT).unwrap();

        let session = session();
        let result = session.scan_path(&path).await.unwrap().unwrap();
        assert_eq!(result.count(), 1);
        assert_eq!(result.raw_count, 2);
        assert_eq!(session.current().await, Some(result));
    }

    #[tokio::test]
    async fn scan_path_rejects_non_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jan.txt");
        std::fs::write(&path, STATEMENT).unwrap();

        let result = session().scan_path(&path).await;
        assert!(matches!(result, Err(DetectError::NotCsv(_))));
    }

    #[tokio::test]
    async fn scan_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = session().scan_path(&dir.path().join("missing.csv")).await;
        assert!(matches!(result, Err(DetectError::Io(_))));
    }

    #[tokio::test]
    async fn failed_scan_keeps_previous_result() {
        let session = session();
        session.scan_bytes(STATEMENT.as_bytes().to_vec()).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        assert!(matches!(session.scan_path(&missing).await, Err(DetectError::Io(_))));
        assert_eq!(session.current().await.unwrap().count(), 1);
    }

    #[tokio::test]
    async fn superseded_scan_is_discarded() {
        let session = session();
        let stale = session.begin();
        let fresh = session.begin();

        let late = session.finish(stale, STATEMENT.as_bytes().to_vec()).await.unwrap();
        assert!(late.is_none());
        assert!(session.current().await.is_none());

        let result = session.finish(fresh, STATEMENT.as_bytes().to_vec()).await.unwrap();
        assert!(result.is_some());
        assert!(session.current().await.is_some());
    }

    #[tokio::test]
    async fn superseded_scan_after_reset_is_dropped() {
        let session = session();
        let stale = session.begin();
        session.reset().await;

        let late = session.finish(stale, b"Date,Memo,Amount\n\xff,netflix,649\n".to_vec()).await.unwrap();
        assert!(late.is_none());
        assert!(session.current().await.is_none());
    }

    #[tokio::test]
    async fn scan_bytes_with_latin1_row_is_stored() {
        let session = session();
        let data = b"Date,Memo,Amount\n2024-01-12,CAF\xe9,50\n2024-01-13,netflix,649\n".to_vec();
        let result = session.scan_bytes(data).await.unwrap().unwrap();
        assert_eq!(result.count(), 1);
        assert_eq!(result.raw_count, 2);
    }

    #[tokio::test]
    async fn demo_and_reset() {
        let session = session();
        let demo = session.load_demo().await;
        assert_eq!(demo.count(), 6);
        assert_eq!(session.current().await, Some(demo));

        session.reset().await;
        assert!(session.current().await.is_none());
    }
}
