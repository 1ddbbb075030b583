//! Dashboard presentation state.
//!
//! All fields live in one [`DashboardState`] record that is swapped as a whole,
//! so readers never observe a report from one search next to an error or city
//! from another.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};
use tracing::{debug, warn};

use crate::{model::WeatherReport, view::View};

/// How to publish searches that settle out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StalePolicy {
    /// Whichever search settles last overwrites the state.
    #[default]
    LastResolved,
    /// A search is dropped if a newer one was issued after it.
    LatestIssued,
}

impl StalePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            StalePolicy::LastResolved => "last-resolved",
            StalePolicy::LatestIssued => "latest-issued",
        }
    }

    pub const fn all() -> &'static [StalePolicy] {
        &[StalePolicy::LastResolved, StalePolicy::LatestIssued]
    }
}

impl fmt::Display for StalePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    /// Last successfully fetched report; survives later failures.
    pub report: Option<Arc<WeatherReport>>,
    /// Name of the last resolved city, or the initial default.
    pub city: String,
    pub loading: bool,
    pub error: Option<String>,
    pub active_view: View,
}

/// Handed out by [`DashboardStore::begin_search`]; identifies one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

#[derive(Debug)]
struct Inner {
    state: DashboardState,
    issued: u64,
}

#[derive(Debug)]
pub struct DashboardStore {
    policy: StalePolicy,
    inner: Mutex<Inner>,
}

impl DashboardStore {
    pub fn new(city: impl Into<String>, view: View, policy: StalePolicy) -> Self {
        Self {
            policy,
            inner: Mutex::new(Inner {
                state: DashboardState {
                    report: None,
                    city: city.into(),
                    loading: false,
                    error: None,
                    active_view: view,
                },
                issued: 0,
            }),
        }
    }

    pub fn snapshot(&self) -> DashboardState {
        self.inner.lock().state.clone()
    }

    /// Mark a search as in flight: loading on, error cleared, data kept.
    pub fn begin_search(&self) -> SearchTicket {
        let mut inner = self.inner.lock();
        inner.issued += 1;
        let ticket = SearchTicket(inner.issued);

        inner.state = DashboardState {
            loading: true,
            error: None,
            ..inner.state.clone()
        };

        debug!(ticket = ticket.0, "search started");
        ticket
    }

    /// Publish a successful search. Returns `false` if the result was discarded.
    pub fn complete(&self, ticket: SearchTicket, report: Arc<WeatherReport>) -> bool {
        let mut inner = self.inner.lock();
        if self.is_stale(&inner, ticket) {
            return false;
        }

        inner.state = DashboardState {
            city: report.location.name.clone(),
            report: Some(report),
            loading: false,
            error: None,
            active_view: inner.state.active_view,
        };
        true
    }

    /// Publish a failed search; the previous report stays visible.
    pub fn fail(&self, ticket: SearchTicket, message: impl Into<String>) -> bool {
        let mut inner = self.inner.lock();
        if self.is_stale(&inner, ticket) {
            return false;
        }

        inner.state = DashboardState {
            loading: false,
            error: Some(message.into()),
            ..inner.state.clone()
        };
        true
    }

    pub fn select_view(&self, view: View) {
        let mut inner = self.inner.lock();
        inner.state = DashboardState {
            active_view: view,
            ..inner.state.clone()
        };
    }

    fn is_stale(&self, inner: &Inner, ticket: SearchTicket) -> bool {
        let stale = self.policy == StalePolicy::LatestIssued && ticket.0 < inner.issued;
        if stale {
            warn!(
                ticket = ticket.0,
                latest = inner.issued,
                "discarding result of superseded search"
            );
        }
        stale
    }
}
