use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::fallback::fallback_tips;
use crate::llm::{AdapterError, TipSource};

pub const DEFAULT_REFRESH_THRESHOLD: usize = 5;
pub const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(30);

/// Signal consumed by the refresh worker; one queued signal is enough.
pub type RefreshReceiver = mpsc::Receiver<()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Stale,
    Fresh,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispensed {
    pub tip: String,
    pub position: usize,
    pub refresh_requested: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct CacheSnapshot {
    pub status: CacheStatus,
    pub count: usize,
    #[serde(skip)]
    pub cursor: usize,
    #[serde(skip)]
    pub dispensed: usize,
}

struct CacheState {
    tips: Arc<Vec<String>>,
    cursor: usize,
    dispensed: HashSet<usize>,
    status: CacheStatus,
    refresh_pending: bool,
}

/// Live tip list plus round-robin dispense bookkeeping.
///
/// All fields move together under one lock, so readers see either the old
/// list with its cursor or the replacement with a reset cursor. The source
/// is only called from `refresh`, outside the lock.
pub struct TipCache {
    source: Arc<dyn TipSource>,
    threshold: usize,
    timeout: Duration,
    state: Mutex<CacheState>,
    refresh_tx: mpsc::Sender<()>,
}

impl TipCache {
    pub fn new(
        source: Arc<dyn TipSource>,
        threshold: usize,
        timeout: Duration,
    ) -> (Arc<Self>, RefreshReceiver) {
        let (refresh_tx, refresh_rx) = mpsc::channel(1);
        let cache = Arc::new(Self {
            source,
            threshold: threshold.max(1),
            timeout,
            state: Mutex::new(CacheState {
                tips: Arc::new(Vec::new()),
                cursor: 0,
                dispensed: HashSet::new(),
                status: CacheStatus::Stale,
                refresh_pending: false,
            }),
            refresh_tx,
        });
        (cache, refresh_rx)
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // Critical sections never panic midway, so a poisoned guard is still consistent.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn dispense(&self) -> Dispensed {
        let mut state = self.lock();
        if state.tips.is_empty() {
            warn!("tip cache empty, serving fallback tips");
            state.tips = fallback_tips();
        }

        let len = state.tips.len();
        let position = state.cursor % len;
        let tip = state.tips[position].clone();
        state.dispensed.insert(position);
        state.cursor = state.cursor.wrapping_add(1);

        let reached = state.dispensed.len() >= self.threshold.min(len);
        let refresh_requested = reached && !state.refresh_pending;
        if refresh_requested {
            state.refresh_pending = true;
        }
        debug!(position, distinct = state.dispensed.len(), "dispensed tip");
        drop(state);

        if refresh_requested {
            self.signal_refresh();
        }
        Dispensed {
            tip,
            position,
            refresh_requested,
        }
    }

    /// Queues a background refresh unless one is already pending.
    pub fn request_refresh(&self) -> bool {
        {
            let mut state = self.lock();
            if state.refresh_pending {
                return false;
            }
            state.refresh_pending = true;
        }
        self.signal_refresh();
        true
    }

    fn signal_refresh(&self) {
        match self.refresh_tx.try_send(()) {
            Ok(()) | Err(mpsc::error::TrySendError::Full(())) => {}
            Err(mpsc::error::TrySendError::Closed(())) => {
                warn!("refresh worker gone, tip refresh skipped");
                self.lock().refresh_pending = false;
            }
        }
    }

    pub async fn refresh(&self) -> Result<usize, AdapterError> {
        let outcome = match tokio::time::timeout(self.timeout, self.source.refresh()).await {
            Ok(result) => result,
            Err(_) => Err(AdapterError::Timeout(self.timeout.as_secs())),
        };

        let mut state = self.lock();
        state.refresh_pending = false;
        match outcome {
            Ok(tips) if !tips.is_empty() => {
                let count = tips.len();
                state.tips = Arc::new(tips);
                state.dispensed.clear();
                state.cursor = 0;
                state.status = CacheStatus::Fresh;
                info!(count, "tips updated");
                Ok(count)
            }
            Ok(_) => {
                Self::keep_or_fallback(&mut state);
                warn!("tip source returned an empty list, keeping current tips");
                Err(AdapterError::NoTips)
            }
            Err(err) => {
                Self::keep_or_fallback(&mut state);
                warn!(error = %err, "tip refresh failed, falling back");
                Err(err)
            }
        }
    }

    fn keep_or_fallback(state: &mut CacheState) {
        state.status = CacheStatus::Stale;
        if state.tips.is_empty() {
            state.tips = fallback_tips();
        }
    }

    pub fn snapshot(&self) -> CacheSnapshot {
        let state = self.lock();
        CacheSnapshot {
            status: state.status,
            count: state.tips.len(),
            cursor: state.cursor,
            dispensed: state.dispensed.len(),
        }
    }
}

/// Runs `refresh` once per received signal until every sender is gone.
pub fn spawn_refresh_worker(cache: Arc<TipCache>, mut rx: RefreshReceiver) -> JoinHandle<()> {
    tokio::spawn(async move {
        while rx.recv().await.is_some() {
            let _ = cache.refresh().await;
        }
        debug!("refresh worker stopped");
    })
}
