//! Async driver for a tutorial session
//!
//! The controller owns the session behind a tokio mutex. Each navigation
//! that changes state schedules an insight fetch after a short delay. The
//! scheduled task skips the fetch entirely when the session has moved on
//! before the delay elapsed, and the session itself discards any response
//! whose generation is no longer current.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::insight_client::InsightSource;
use crate::session::{SessionView, TutorialSession};
use coach_common::events::EventBus;

/// Shared handle driving one [`TutorialSession`]
#[derive(Clone)]
pub struct TutorController {
    session: Arc<Mutex<TutorialSession>>,
    source: Option<Arc<dyn InsightSource>>,
    delay: Duration,
    pending: Arc<std::sync::Mutex<Vec<JoinHandle<bool>>>>,
}

impl TutorController {
    /// Create the session on the catalog's first tutorial and schedule the
    /// first insight fetch
    ///
    /// With no insight source, navigation works and no fetch is scheduled.
    pub fn initialize(
        catalog: Arc<Catalog>,
        events: EventBus,
        source: Option<Arc<dyn InsightSource>>,
        delay: Duration,
    ) -> Result<Self> {
        let session = TutorialSession::initialize(catalog, events)?;
        let generation = session.generation();

        let controller = Self {
            session: Arc::new(Mutex::new(session)),
            source,
            delay,
            pending: Arc::new(std::sync::Mutex::new(Vec::new())),
        };
        controller.schedule_insight(generation);
        Ok(controller)
    }

    pub async fn select_tutorial(&self, id: &str) -> bool {
        self.navigate(|s| s.select_tutorial(id)).await
    }

    pub async fn next_step(&self) -> bool {
        self.navigate(TutorialSession::next_step).await
    }

    pub async fn previous_step(&self) -> bool {
        self.navigate(TutorialSession::previous_step).await
    }

    pub async fn go_to_step(&self, index: usize) -> bool {
        self.navigate(|s| s.go_to_step(index)).await
    }

    pub async fn restart(&self) -> bool {
        self.navigate(TutorialSession::restart).await
    }

    /// Fetch an insight for the current state right now
    ///
    /// Returns whether the result was stored (false when no source is
    /// configured or the session moved on while the request was in flight).
    pub async fn fetch_insight(&self) -> bool {
        match &self.source {
            Some(source) => run_fetch(&self.session, source.as_ref()).await,
            None => false,
        }
    }

    pub async fn view(&self) -> SessionView {
        self.session.lock().await.view()
    }

    /// Run a read-only closure against the session
    pub async fn with_session<R>(&self, f: impl FnOnce(&TutorialSession) -> R) -> R {
        let session = self.session.lock().await;
        f(&*session)
    }

    pub fn insights_enabled(&self) -> bool {
        self.source.is_some()
    }

    /// Wait for every scheduled insight fetch to finish
    pub async fn settle(&self) {
        let handles: Vec<JoinHandle<bool>> = {
            let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            pending.drain(..).collect()
        };
        for handle in handles {
            if let Err(e) = handle.await {
                debug!("Insight task ended abnormally: {}", e);
            }
        }
    }

    async fn navigate(&self, op: impl FnOnce(&mut TutorialSession) -> bool) -> bool {
        let generation = {
            let mut session = self.session.lock().await;
            if !op(&mut *session) {
                return false;
            }
            session.generation()
        };
        self.schedule_insight(generation);
        true
    }

    fn schedule_insight(&self, generation: u64) {
        let Some(source) = self.source.clone() else {
            return;
        };
        let session = Arc::clone(&self.session);
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            if session.lock().await.generation() != generation {
                debug!(generation, "Skipping insight fetch for superseded step");
                return false;
            }
            run_fetch(&session, source.as_ref()).await
        });

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }
}

async fn run_fetch(session: &Mutex<TutorialSession>, source: &dyn InsightSource) -> bool {
    let ticket = session.lock().await.begin_insight_fetch();
    let insight = source.fetch(&ticket.request).await;
    session.lock().await.complete_insight_fetch(&ticket, insight)
}
