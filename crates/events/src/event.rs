use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A domain-agnostic event.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **uniquely identified** (`event_id`)
/// - **timestamped** in UTC at the moment they were raised
pub trait Event: Clone + core::fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "catalog.product.renamed").
    fn event_type(&self) -> &'static str;

    fn event_id(&self) -> Uuid;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
