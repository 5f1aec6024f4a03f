//! Non-fatal feed diagnostics
//!
//! Rows the station parser skips and stations it overwrites are reported as
//! [`FeedEvent`]s to a [`FeedObserver`] instead of being written straight to
//! a log, so callers can count, collect or silence them.

use crate::app::models::{StationId, StationType};
use tracing::warn;

/// Something noteworthy that did not stop parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// A row with the wrong number of fields was skipped
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A station identifier appeared again; the later row replaced the earlier one
    DuplicateStation {
        id: StationId,
        line: u64,
        previous_type: StationType,
        replacement_type: StationType,
    },
}

/// Receiver of [`FeedEvent`]s
pub trait FeedObserver: Send + Sync {
    fn on_event(&self, event: &FeedEvent);
}

/// Observer that emits events as `tracing` warnings
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl FeedObserver for TracingObserver {
    fn on_event(&self, event: &FeedEvent) {
        match event {
            FeedEvent::MalformedRow {
                line,
                expected,
                found,
            } => {
                warn!(
                    line = *line,
                    expected = *expected,
                    found = *found,
                    "Skipping malformed record with wrong number of fields"
                );
            }
            FeedEvent::DuplicateStation {
                id,
                line,
                previous_type,
                replacement_type,
            } => {
                warn!(
                    station_id = id.value(),
                    line = *line,
                    previous_type = previous_type.as_str(),
                    replacement_type = replacement_type.as_str(),
                    "Found duplicate type '{}' for station ID {}",
                    replacement_type,
                    id
                );
            }
        }
    }
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl FeedObserver for NullObserver {
    fn on_event(&self, _event: &FeedEvent) {}
}
