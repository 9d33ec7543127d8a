//! Document store plumbing: the shared repository error, the in-memory table
//! backing every repository, and the startup connection gate.

pub mod memory;

pub use memory::{MemoryTable, Record};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

/// Fixed delay between store connection attempts during startup.
pub const RECONNECT_INTERVAL: Duration = Duration::from_secs(10);

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists: {0}")]
    Conflict(String),
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("unsupported store scheme '{0}' (this build only ships the memory:// backend)")]
    UnsupportedScheme(String),
    #[error("malformed store uri")]
    MalformedUri,
}

/// Backend selected from `MONGODB_URI`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
}

impl StorageBackend {
    pub fn connect(uri: &str) -> Result<Self, StorageError> {
        let scheme = uri
            .split_once("://")
            .map(|(scheme, _)| scheme)
            .ok_or(StorageError::MalformedUri)?;

        match scheme.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            other => Err(StorageError::UnsupportedScheme(other.to_string())),
        }
    }
}

/// Shared flag flipped once the store is reachable; `/api` traffic is held
/// at 503 until then.
#[derive(Debug, Clone, Default)]
pub struct ConnectionGate {
    connected: Arc<AtomicBool>,
}

impl ConnectionGate {
    pub fn open() -> Self {
        let gate = Self::default();
        gate.mark_connected();
        gate
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub fn mark_connected(&self) {
        self.connected.store(true, Ordering::Release);
    }
}

/// Keeps trying to open the store every `interval` until it succeeds.
pub async fn connect_with_retry(
    uri: &str,
    gate: &ConnectionGate,
    interval: Duration,
) -> StorageBackend {
    let scheme = uri.split_once("://").map_or("<none>", |(scheme, _)| scheme);
    let mut attempt: u32 = 1;

    loop {
        match StorageBackend::connect(uri) {
            Ok(backend) => {
                gate.mark_connected();
                info!(attempt, scheme, ?backend, "document store connected");
                return backend;
            }
            Err(err) => {
                warn!(
                    attempt,
                    scheme,
                    error = %err,
                    retry_in_secs = interval.as_secs(),
                    "document store connection failed"
                );
                attempt = attempt.saturating_add(1);
                tokio::time::sleep(interval).await;
            }
        }
    }
}
