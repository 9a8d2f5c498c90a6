//! Output contract of the external snapshot collector.
//!
//! Collection — polling hub APIs, pagination, retry/backoff — lives
//! outside this crate. The core only fixes the shape of what a collector
//! hands over: one [`HubCapture`] per hub, with an explicit unreachable
//! marker when sampling fails. The trait is object-safe and `Send + Sync`
//! so callers can fan per-hub collection out over a bounded worker pool
//! and feed completed captures to the diff engine as they arrive.

use crate::errors::Result;
use crate::model::HubCapture;

/// A source of per-hub compliance captures.
pub trait SnapshotSource: Send + Sync {
    /// Produce the capture for one hub, restricted to the given
    /// namespaces (an empty slice means all namespaces in scope).
    ///
    /// An unreachable hub is a successful return of
    /// [`HubCapture::Unreachable`], not an `Err`: errors are reserved for
    /// failures of the source itself (e.g. an unreadable capture file).
    fn collect(&self, hub: &str, namespaces: &[String]) -> Result<HubCapture>;
}
