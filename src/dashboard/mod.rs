//! Dashboard state: the displayed lead list and its refresh coordination
//!
//! Mutating the filter state or completing an import does not fetch inline;
//! it emits a [`RefreshTrigger`] consumed by the single [`QueryCoordinator`],
//! which issues one fetch at a time and replaces the board with each applied
//! response. A failed fetch keeps the previous list and reports the error.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::RwLock;

use crate::api::{ImportSummary, Lead, LeadApiClient};
use crate::errors::LeadbookError;
use crate::filters::{FilterStore, LeadColumn};
use crate::logger::{self, LogTag};
use crate::session::Session;

/// Why a refresh is wanted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    FiltersChanged,
    ImportCompleted,
    Manual,
}

/// The currently displayed lead sequence
///
/// `apply` replaces the list unconditionally: whichever response is applied
/// last in program order wins, regardless of request order. Callers that need
/// request/response ordering must go through the coordinator, which never has
/// two fetches in flight.
pub struct LeadBoard {
    leads: RwLock<Vec<Lead>>,
    refreshed_at: RwLock<Option<DateTime<Utc>>>,
    applied: AtomicU64,
}

impl LeadBoard {
    fn new() -> Self {
        Self {
            leads: RwLock::new(Vec::new()),
            refreshed_at: RwLock::new(None),
            applied: AtomicU64::new(0),
        }
    }

    /// Replace the displayed list. Returns the apply counter after this
    /// replacement.
    pub async fn apply(&self, leads: Vec<Lead>) -> u64 {
        {
            let mut guard = self.leads.write().await;
            *guard = leads;
        }
        {
            let mut stamp = self.refreshed_at.write().await;
            *stamp = Some(Utc::now());
        }
        self.applied.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub async fn leads(&self) -> Vec<Lead> {
        self.leads.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.leads.read().await.len()
    }

    pub async fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        *self.refreshed_at.read().await
    }

    /// How many responses have been applied since startup
    pub fn applied_count(&self) -> u64 {
        self.applied.load(Ordering::SeqCst)
    }
}

/// Session-scoped dashboard: filter state, displayed list, trigger sender
pub struct DashboardState {
    api: LeadApiClient,
    session: Session,
    filters: RwLock<FilterStore>,
    pub board: LeadBoard,
    triggers: UnboundedSender<RefreshTrigger>,
}

impl DashboardState {
    /// Create the state together with its coordinator. The coordinator holds
    /// the only receiver; run it with [`QueryCoordinator::run`] or drop it to
    /// operate purely through [`DashboardState::refresh_now`].
    pub fn new(api: LeadApiClient, session: Session) -> (Arc<Self>, QueryCoordinator) {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = Arc::new(Self {
            api,
            session,
            filters: RwLock::new(FilterStore::new()),
            board: LeadBoard::new(),
            triggers: tx,
        });
        let coordinator = QueryCoordinator {
            triggers: rx,
            state: state.clone(),
        };
        (state, coordinator)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Apply a filter and request a refresh. An empty value clears the
    /// column, exactly as [`FilterStore::set`] does.
    pub async fn set_filter(&self, column: LeadColumn, value: impl Into<String>) {
        {
            let mut filters = self.filters.write().await;
            filters.set(column, value);
        }
        self.trigger(RefreshTrigger::FiltersChanged);
    }

    /// Drop every filter and request a refresh
    pub async fn clear_filters(&self) {
        {
            let mut filters = self.filters.write().await;
            filters.clear_all();
        }
        self.trigger(RefreshTrigger::FiltersChanged);
    }

    /// Snapshot of the current filter state
    pub async fn filters(&self) -> FilterStore {
        self.filters.read().await.clone()
    }

    /// Ask the coordinator for a refresh without changing any state
    pub fn request_refresh(&self) {
        self.trigger(RefreshTrigger::Manual);
    }

    /// Fetch with the current filters and apply the response to the board.
    /// Returns the number of leads applied. On failure the board keeps its
    /// previous content.
    pub async fn refresh_now(&self) -> Result<usize, LeadbookError> {
        let snapshot = self.filters.read().await.clone();
        let leads = self.api.fetch_leads(&self.session, &snapshot).await?;
        let count = leads.len();
        self.board.apply(leads).await;
        Ok(count)
    }

    /// Upload a CSV and request the follow-up refresh that makes the import
    /// visible. The server's per-row outcome is returned as-is.
    pub async fn import(&self, path: &std::path::Path) -> Result<ImportSummary, LeadbookError> {
        let summary = self.api.import_csv(&self.session, path).await?;
        self.trigger(RefreshTrigger::ImportCompleted);
        Ok(summary)
    }

    fn trigger(&self, trigger: RefreshTrigger) {
        if self.triggers.send(trigger).is_err() {
            logger::debug(
                LogTag::Dashboard,
                "no coordinator listening, refresh trigger dropped",
            );
        }
    }
}

/// Single consumer of refresh triggers
///
/// The loop awaits each fetch before taking the next trigger, so at most one
/// fetch is ever in flight through the coordinator and responses cannot be
/// applied out of request order. Triggers that queue up during a fetch are
/// coalesced into one follow-up refresh.
pub struct QueryCoordinator {
    triggers: UnboundedReceiver<RefreshTrigger>,
    state: Arc<DashboardState>,
}

impl QueryCoordinator {
    pub async fn run(mut self) {
        while let Some(trigger) = self.triggers.recv().await {
            let mut latest = trigger;
            let mut coalesced = 0usize;
            while let Ok(queued) = self.triggers.try_recv() {
                latest = queued;
                coalesced += 1;
            }
            if coalesced > 0 {
                logger::debug(
                    LogTag::Dashboard,
                    &format!("coalesced {} queued trigger(s)", coalesced),
                );
            }

            match self.state.refresh_now().await {
                Ok(count) => logger::debug(
                    LogTag::Dashboard,
                    &format!("refresh after {:?}: {} leads", latest, count),
                ),
                Err(err) => logger::warning(
                    LogTag::Dashboard,
                    &format!(
                        "refresh after {:?} failed, keeping previous list: {}",
                        latest, err
                    ),
                ),
            }
        }
    }
}
