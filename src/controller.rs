//! # Module: Fetch Controller
//!
//! ## Responsibility
//! Drive the search → loading → resolved/error cycle for one view and expose
//! the current [`LoadState`] to the renderer.
//!
//! ## States
//! - **Idle**: initial state, nothing requested yet
//! - **Loading**: a request is in flight
//! - **Resolved**: the latest request succeeded, payload held in full
//! - **Error**: the latest request failed, any previous payload is gone
//!
//! ## Guarantees
//! - Blank queries are rejected before any request is issued; state is untouched.
//! - Every issued request gets a monotonically increasing sequence number.
//!   A completion is applied only if its sequence number is still the latest,
//!   checked while holding the state channel's write lock. Stale completions
//!   change nothing and raise no notice.
//! - Each applied completion replaces the previous state wholesale.
//! - Every applied transition is published on the lifecycle event channel.
//!
//! ## NOT Responsible For
//! - Performing the request (see [`crate::source`])
//! - Retrying failures: every failure is terminal for its cycle

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::source::FetchSource;
use crate::{metrics, DashError};

/// Capacity of the lifecycle event channel. Slow subscribers observe `Lagged`.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Lifecycle state of one view.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// Nothing has been requested yet.
    Idle,
    /// Request `seq` for `query` is in flight.
    Loading {
        /// Sequence number of the in-flight request.
        seq: u64,
        /// The trimmed query that was submitted.
        query: String,
    },
    /// Request `seq` succeeded.
    Resolved {
        /// Sequence number of the request that produced `data`.
        seq: u64,
        /// The full payload.
        data: T,
    },
    /// Request `seq` failed.
    Error {
        /// Sequence number of the failed request.
        seq: u64,
        /// Human-readable failure description.
        message: String,
    },
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> LoadState<T> {
    /// True while a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// The resolved payload, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Resolved { data, .. } => Some(data),
            _ => None,
        }
    }

    /// The failure message, if the last cycle failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Sequence number of the request this state belongs to. `None` when idle.
    pub fn seq(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Loading { seq, .. } | Self::Resolved { seq, .. } | Self::Error { seq, .. } => {
                Some(*seq)
            }
        }
    }

    /// Phase of this state, for logging and events.
    pub fn phase(&self) -> Phase {
        match self {
            Self::Idle => Phase::Idle,
            Self::Loading { .. } => Phase::Loading,
            Self::Resolved { .. } => Phase::Resolved,
            Self::Error { .. } => Phase::Error,
        }
    }
}

/// Data-free view of a [`LoadState`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// See [`LoadState::Idle`].
    Idle,
    /// See [`LoadState::Loading`].
    Loading,
    /// See [`LoadState::Resolved`].
    Resolved,
    /// See [`LoadState::Error`].
    Error,
}

impl Phase {
    /// Lower-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Resolved => "resolved",
            Phase::Error => "error",
        }
    }
}

/// One applied state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    /// View label of the emitting controller.
    pub view: &'static str,
    /// Sequence number of the request.
    pub seq: u64,
    /// Phase entered.
    pub phase: Phase,
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    /// Positive confirmation.
    Success,
    /// Input problem, nothing was requested.
    Warning,
    /// A request failed.
    Error,
}

/// A transient user-visible notification (a toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Text shown to the user.
    pub message: String,
}

impl Notice {
    /// Success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Warning notice.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    /// Error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// How a single search call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The query was blank; nothing was requested.
    Rejected,
    /// Request `seq` succeeded and its payload is now the state.
    Resolved {
        /// Sequence number of the request.
        seq: u64,
    },
    /// Request `seq` failed and the state is now `Error`.
    Failed {
        /// Sequence number of the request.
        seq: u64,
    },
    /// Request `seq` completed after a newer one was issued; its result was dropped.
    Superseded {
        /// Sequence number of the request.
        seq: u64,
    },
}

impl SearchOutcome {
    fn label(&self) -> &'static str {
        match self {
            SearchOutcome::Rejected => "rejected",
            SearchOutcome::Resolved { .. } => "resolved",
            SearchOutcome::Failed { .. } => "failed",
            SearchOutcome::Superseded { .. } => "superseded",
        }
    }
}

/// An issued request that has not completed yet.
struct Ticket {
    seq: u64,
    query: String,
}

/// Lifecycle driver for one view, generic over its data source.
///
/// Wrap in an [`Arc`] to use [`FetchController::spawn_search`].
pub struct FetchController<S: FetchSource> {
    source: S,
    latest: AtomicU64,
    state_tx: watch::Sender<LoadState<S::Output>>,
    events_tx: broadcast::Sender<LifecycleEvent>,
    notices: Option<mpsc::UnboundedSender<Notice>>,
}

impl<S: FetchSource> FetchController<S> {
    /// Create an idle controller without a notice sink.
    pub fn new(source: S) -> Self {
        let (state_tx, _) = watch::channel(LoadState::Idle);
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            source,
            latest: AtomicU64::new(0),
            state_tx,
            events_tx,
            notices: None,
        }
    }

    /// Deliver notices to `sink`.
    pub fn with_notices(mut self, sink: mpsc::UnboundedSender<Notice>) -> Self {
        self.notices = Some(sink);
        self
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> LoadState<S::Output> {
        self.state_tx.borrow().clone()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<LoadState<S::Output>> {
        self.state_tx.subscribe()
    }

    /// Receiver for lifecycle events issued after this call.
    pub fn events(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.events_tx.subscribe()
    }

    /// Sequence number of the most recently issued request (0 if none).
    pub fn latest_seq(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Run one full cycle for `query` and wait for it to finish.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        match self.begin(query) {
            Ok(ticket) => self.finish(ticket).await,
            Err(_) => SearchOutcome::Rejected,
        }
    }

    /// Run one cycle for a source that takes no query.
    ///
    /// For sources that require a query this is rejected like a blank search.
    pub async fn load(&self) -> SearchOutcome {
        self.search("").await
    }

    /// Validate and issue the request now, complete it on a spawned task.
    ///
    /// The sequence number is assigned before this returns, so two calls
    /// made in order are ordered the same way regardless of scheduling.
    pub fn spawn_search(self: &Arc<Self>, query: &str) -> JoinHandle<SearchOutcome>
    where
        S: 'static,
    {
        let ticket = self.begin(query);
        let this = Arc::clone(self);
        tokio::spawn(async move {
            match ticket {
                Ok(ticket) => this.finish(ticket).await,
                Err(_) => SearchOutcome::Rejected,
            }
        })
    }

    /// Issue a request for `query`, or reject it with [`DashError::EmptyQuery`]
    /// when the source needs a query and `query` is blank.
    fn begin(&self, query: &str) -> Result<Ticket, DashError> {
        let view = self.source.view();
        let query = query.trim();

        if self.source.requires_query() && query.is_empty() {
            let err = DashError::EmptyQuery(self.source.empty_query_notice());
            debug!(view, error = %err, "blank query rejected");
            self.notify(Notice::warning(err.to_string()));
            metrics::inc_fetch_cycle(view, SearchOutcome::Rejected.label());
            return Err(err);
        }

        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let loading = LoadState::Loading {
            seq,
            query: query.to_string(),
        };
        if self.apply(seq, loading) {
            info!(view, seq, query = %query, "request issued");
        }

        Ok(Ticket {
            seq,
            query: query.to_string(),
        })
    }

    async fn finish(&self, ticket: Ticket) -> SearchOutcome {
        let view = self.source.view();
        let Ticket { seq, query } = ticket;

        let outcome = match self.source.fetch(&query).await {
            Ok(data) => {
                let notice = self.source.success_notice(&query, &data);
                if self.apply(seq, LoadState::Resolved { seq, data }) {
                    info!(view, seq, "request resolved");
                    if let Some(message) = notice {
                        self.notify(Notice::success(message));
                    }
                    SearchOutcome::Resolved { seq }
                } else {
                    SearchOutcome::Superseded { seq }
                }
            }
            Err(e) => {
                let message = e.to_string();
                if self.apply(seq, LoadState::Error { seq, message }) {
                    warn!(view, seq, error = %e, "request failed");
                    self.notify(Notice::error(self.source.failure_notice()));
                    SearchOutcome::Failed { seq }
                } else {
                    SearchOutcome::Superseded { seq }
                }
            }
        };

        if let SearchOutcome::Superseded { .. } = outcome {
            debug!(view, seq, latest = self.latest_seq(), "stale completion dropped");
        }
        metrics::inc_fetch_cycle(view, outcome.label());
        outcome
    }

    /// Replace the state with `next` if `seq` is still the latest request.
    fn apply(&self, seq: u64, next: LoadState<S::Output>) -> bool {
        let phase = next.phase();
        let mut next = Some(next);
        let applied = self.state_tx.send_if_modified(|state| {
            if self.latest.load(Ordering::SeqCst) != seq {
                return false;
            }
            match next.take() {
                Some(next) => {
                    *state = next;
                    true
                }
                None => false,
            }
        });

        if applied {
            // No subscribers is fine.
            let _ = self.events_tx.send(LifecycleEvent {
                view: self.source.view(),
                seq,
                phase,
            });
        }
        applied
    }

    fn notify(&self, notice: Notice) {
        if let Some(sink) = &self.notices {
            if sink.send(notice).is_err() {
                debug!(view = self.source.view(), "notice sink closed");
            }
        }
    }
}
