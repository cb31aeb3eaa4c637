//! Request tagging so a slow response can never overwrite a newer one.

use serde_json::Value;
use tracing::debug;

use crate::error::EngineError;
use crate::ir::Outcome;
use crate::runtime::normalize;
use crate::transport::QueryTransport;

/// Monotonically increasing tag attached to each issued query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a new query. Every earlier tag becomes stale.
    pub fn issue(&mut self) -> RequestId {
        self.latest += 1;
        RequestId(self.latest)
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        id.0 == self.latest
    }

    /// Pass `value` through only if it answers the latest query.
    pub fn accept<T>(&self, id: RequestId, value: T) -> Option<T> {
        if self.is_current(id) {
            Some(value)
        } else {
            debug!(request = id.0, latest = self.latest, "dropping stale response");
            None
        }
    }
}

/// A query that has been sent but not yet answered.
#[derive(Debug, Clone)]
pub struct PendingQuery {
    pub id: RequestId,
    pub question: String,
}

/// Result of completing a pending query.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Applied(Result<Outcome, EngineError>),
    Stale,
}

/// Holds the chart currently on screen and only replaces it with answers
/// to the most recent question.
pub struct QuerySession<T: QueryTransport> {
    transport: T,
    tracker: RequestTracker,
    current: Option<Outcome>,
}

impl<T: QueryTransport> QuerySession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            tracker: RequestTracker::new(),
            current: None,
        }
    }

    pub fn current(&self) -> Option<&Outcome> {
        self.current.as_ref()
    }

    /// Tag a question without sending it yet.
    pub fn begin(&mut self, question: &str) -> PendingQuery {
        PendingQuery {
            id: self.tracker.issue(),
            question: question.to_string(),
        }
    }

    /// Send a pending question through the transport.
    pub fn fetch(&self, pending: &PendingQuery) -> Result<Value, EngineError> {
        self.transport.post_question(&pending.question)
    }

    /// Apply a response. Stale responses, successful or not, are discarded.
    pub fn complete(
        &mut self,
        pending: &PendingQuery,
        response: Result<Value, EngineError>,
    ) -> Completion {
        let response = match self.tracker.accept(pending.id, response) {
            Some(response) => response,
            None => return Completion::Stale,
        };

        let outcome = response.and_then(|payload| normalize(&payload));
        match &outcome {
            Ok(o) => self.current = Some(o.clone()),
            Err(_) => self.current = None,
        }
        Completion::Applied(outcome)
    }

    /// Issue, fetch and apply in one step.
    pub fn ask(&mut self, question: &str) -> Result<Outcome, EngineError> {
        let pending = self.begin(question);
        let response = self.fetch(&pending);
        match self.complete(&pending, response) {
            Completion::Applied(outcome) => outcome,
            Completion::Stale => Err(EngineError::Network(
                "response superseded by a newer query".to_string(),
            )),
        }
    }
}
