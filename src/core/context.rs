//! Correlation and cancellation handle attached to entries
//!
//! A [`Context`] travels with an entry so hooks can correlate the record with
//! the request or task that produced it. It never aborts a write.

use super::fields::{FieldValue, Fields};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Cheap-to-clone request context
///
/// # Example
///
/// ```
/// use rust_log_wrapper::Context;
///
/// let ctx = Context::background().with_value("request_id", "abc-123");
/// let child = ctx.with_value("attempt", 2);
///
/// assert_eq!(child.value("request_id").map(|v| v.to_string()), Some("abc-123".into()));
///
/// ctx.cancel();
/// assert!(child.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: Arc<Fields>,
    token: CancellationToken,
    deadline: Option<DateTime<Utc>>,
}

impl Context {
    /// Empty context that is never cancelled
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a child carrying an extra value
    ///
    /// Cancelling the parent cancels the child, not the other way round.
    #[must_use]
    pub fn with_value<K, V>(&self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut values = (*self.values).clone();
        values.insert(key.into(), value.into());
        Self {
            values: Arc::new(values),
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Derive a child that expires at `deadline`
    #[must_use]
    pub fn with_deadline(&self, deadline: DateTime<Utc>) -> Self {
        let deadline = match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        };
        Self {
            values: Arc::clone(&self.values),
            token: self.token.child_token(),
            deadline: Some(deadline),
        }
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn values(&self) -> &Fields {
        &self.values
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Token for awaiting cancellation from async code
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }

    /// Cancel this context and every context derived from it
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// True once cancelled or past the deadline
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
            || self.deadline.is_some_and(|deadline| Utc::now() >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_background_is_empty() {
        let ctx = Context::background();
        assert!(ctx.values().is_empty());
        assert!(!ctx.is_cancelled());
        assert!(ctx.deadline().is_none());
    }

    #[test]
    fn test_child_values_do_not_leak_to_parent() {
        let parent = Context::background().with_value("tenant", "acme");
        let child = parent.with_value("user", 7);

        assert_eq!(child.values().len(), 2);
        assert_eq!(parent.values().len(), 1);
        assert!(parent.value("user").is_none());
    }

    #[test]
    fn test_cancellation_propagates_to_children() {
        let parent = Context::background();
        let child = parent.with_value("k", "v");
        parent.cancel();
        assert!(child.is_cancelled());
        assert!(child.cancellation_token().is_cancelled());
    }

    #[test]
    fn test_cancelling_child_leaves_parent_running() {
        let parent = Context::background().with_value("k", "v");
        let child = parent.with_deadline(Utc::now() + Duration::hours(1));
        let sibling = parent.with_value("other", 1);

        child.cancel();

        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());
        assert!(!sibling.is_cancelled());
    }

    #[test]
    fn test_deadline_keeps_earliest() {
        let soon = Utc::now() + Duration::hours(1);
        let later = soon + Duration::hours(1);
        let ctx = Context::background().with_deadline(soon).with_deadline(later);
        assert_eq!(ctx.deadline(), Some(soon));

        let expired = Context::background().with_deadline(Utc::now() - Duration::seconds(1));
        assert!(expired.is_cancelled());
    }
}
