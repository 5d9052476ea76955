//! Request tracking for asynchronous actions.
//!
//! Every asynchronous action in the storefront goes through a [`Tracked`]
//! slot. The slot owns the last committed value, the [`RequestStatus`] of the
//! latest request, and a monotonically increasing sequence number. Each
//! request is identified by the [`RequestId`] returned from
//! [`Tracked::begin`]; a completion is committed only while its id is still
//! the latest one in flight. Anything else is stale and is dropped.
//!
//! ```
//! use petshop_core::request::{Commit, RequestStatus, Tracked};
//!
//! let mut brands: Tracked<Vec<&str>> = Tracked::default();
//!
//! let first = brands.begin();
//! let second = brands.begin();
//!
//! // The second request resolves first...
//! assert_eq!(brands.resolve(second, vec!["Acana"], None), Commit::Applied);
//! // ...and the late first response must not overwrite it.
//! assert_eq!(brands.resolve(first, vec!["Stale"], None), Commit::Stale);
//!
//! assert_eq!(brands.value(), &vec!["Acana"]);
//! assert_eq!(brands.status(), RequestStatus::Succeeded);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of the latest request issued through a [`Tracked`] slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Nothing requested yet, or the last request was cancelled
    #[default]
    Idle,
    /// A request is in flight
    Pending,
    /// The latest request completed and its result was committed
    Succeeded,
    /// The latest request failed
    Failed,
}

impl RequestStatus {
    /// `true` for [`RequestStatus::Succeeded`] and [`RequestStatus::Failed`]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Pending => write!(f, "pending"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Sequence number identifying one request issued through a [`Tracked`] slot.
///
/// Ids are unique per slot and strictly increasing in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    /// Raw sequence number
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of committing a completion into a [`Tracked`] slot.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// The completion belonged to the latest in-flight request and was applied
    Applied,
    /// A newer request was issued (or the slot was cancelled); nothing changed
    Stale,
}

impl Commit {
    /// `true` if the completion was discarded
    #[must_use]
    pub const fn is_stale(self) -> bool {
        matches!(self, Self::Stale)
    }
}

/// A value fetched from the API together with the status of its latest request.
///
/// The value is replaced wholesale on every applied [`Tracked::resolve`]; a
/// failure keeps the last committed value and records the error message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tracked<T> {
    value: T,
    status: RequestStatus,
    error: Option<String>,
    updated_at: Option<DateTime<Utc>>,
    issued: u64,
    in_flight: Option<RequestId>,
}

impl<T> Tracked<T> {
    /// Create an idle slot holding `value`
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            status: RequestStatus::Idle,
            error: None,
            updated_at: None,
            issued: 0,
            in_flight: None,
        }
    }

    /// Last committed value
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Status of the latest request
    #[must_use]
    pub const fn status(&self) -> RequestStatus {
        self.status
    }

    /// Error message of the latest failed request
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// When the value was last committed
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Id of the request currently in flight, if any
    #[must_use]
    pub const fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// `true` while a request is in flight
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, RequestStatus::Pending)
    }

    /// `true` if `request` is the latest request still in flight
    #[must_use]
    pub fn is_current(&self, request: RequestId) -> bool {
        self.in_flight == Some(request)
    }

    /// Start a new request, superseding any request still in flight
    ///
    /// Moves the slot to [`RequestStatus::Pending`] and clears the last error.
    pub fn begin(&mut self) -> RequestId {
        self.issued += 1;
        let request = RequestId(self.issued);
        self.in_flight = Some(request);
        self.status = RequestStatus::Pending;
        self.error = None;
        request
    }

    /// Commit a successful completion, replacing the value wholesale
    pub fn resolve(&mut self, request: RequestId, value: T, at: Option<DateTime<Utc>>) -> Commit {
        if !self.is_current(request) {
            return Commit::Stale;
        }
        self.value = value;
        self.status = RequestStatus::Succeeded;
        self.error = None;
        self.updated_at = at;
        self.in_flight = None;
        Commit::Applied
    }

    /// Commit a failed completion, keeping the last committed value
    pub fn reject(&mut self, request: RequestId, error: impl Into<String>) -> Commit {
        if !self.is_current(request) {
            return Commit::Stale;
        }
        self.status = RequestStatus::Failed;
        self.error = Some(error.into());
        self.in_flight = None;
        Commit::Applied
    }

    /// Drop interest in the request in flight
    ///
    /// A later completion of that request is stale. Returns the cancelled id.
    pub fn cancel(&mut self) -> Option<RequestId> {
        let cancelled = self.in_flight.take();
        if cancelled.is_some() {
            self.status = RequestStatus::Idle;
        }
        cancelled
    }

    /// Mutable access to the committed value for client-only edits
    ///
    /// Does not touch status or fencing.
    pub const fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: Default> Tracked<T> {
    /// Back to an idle, empty slot
    ///
    /// The sequence counter is kept so that completions of requests issued
    /// before the reset stay stale.
    pub fn reset(&mut self) {
        self.value = T::default();
        self.status = RequestStatus::Idle;
        self.error = None;
        self.updated_at = None;
        self.in_flight = None;
    }
}
