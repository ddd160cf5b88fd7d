//! Per-page loading state.
//!
//! Every fetch a page issues is tagged with a [`RequestTicket`]. Starting a new
//! fetch (navigating to another user, or retrying) invalidates all earlier
//! tickets, so a slow response for a previous username can never overwrite
//! the state of the current one.

use std::fmt::Display;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    username: String,
}

impl RequestTicket {
    pub fn username(&self) -> &str {
        &self.username
    }
}

#[derive(Debug)]
pub struct PageState<T> {
    generation: u64,
    username: Option<String>,
    state: ViewState<T>,
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PageState<T> {
    pub fn new() -> Self {
        PageState {
            generation: 0,
            username: None,
            state: ViewState::Loading,
        }
    }

    /// Start loading data for `username`, superseding any request in flight.
    pub fn begin(&mut self, username: &str) -> RequestTicket {
        self.generation += 1;
        self.username = Some(username.to_string());
        self.state = ViewState::Loading;
        RequestTicket {
            generation: self.generation,
            username: username.to_string(),
        }
    }

    /// Re-issue the current request. `None` before anything was requested.
    pub fn retry(&mut self) -> Option<RequestTicket> {
        let username = self.username.clone()?;
        Some(self.begin(&username))
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.generation == self.generation
            && self.username.as_deref() == Some(ticket.username.as_str())
    }

    /// Apply a finished request. Returns `false`, leaving the state untouched,
    /// when the ticket has been superseded.
    pub fn settle<E: Display>(&mut self, ticket: &RequestTicket, result: Result<T, E>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                "Discarding stale response for {} (generation {}, current {})",
                ticket.username, ticket.generation, self.generation
            );
            return false;
        }

        self.state = match result {
            Ok(data) => ViewState::Loaded(data),
            Err(e) => ViewState::Failed(e.to_string()),
        };
        true
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn into_state(self) -> ViewState<T> {
        self.state
    }
}
