//! Outcome reporting seams: user notification and telemetry.
//!
//! Both collaborators are optional and write-only from the session's point of
//! view. The [`Notifier`] hears every terminal outcome; the [`TelemetrySink`]
//! hears successful sends only, best-effort: a sink failure is logged and
//! never affects the send result.

use crate::error::TransmissionError;
use crate::types::Climb;

/// User-facing notification hook, invoked once per terminal send outcome.
///
/// Implementations typically surface a toast; [`TransmissionError::user_message`]
/// provides the display text for failures.
pub trait Notifier: Send + Sync {
    /// The climb was fully written to the board.
    fn send_succeeded(&self, climb: &Climb);

    /// The send failed; no partial delivery is ever reported as success.
    fn send_failed(&self, error: &TransmissionError);
}

/// Identifying metadata for a successful send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClimbSentEvent {
    /// Stable climb identifier.
    pub climb_uuid: String,

    /// Board layout name, empty when the board metadata omits it.
    pub board_layout: String,

    /// Number of chunks the packet was written as.
    pub chunk_count: usize,
}

/// Best-effort analytics hook for successful sends.
pub trait TelemetrySink: Send + Sync {
    /// Record that a climb reached the board. Errors are swallowed by the
    /// session and logged at `warn`; they must never block a send.
    fn climb_sent(&self, event: &ClimbSentEvent) -> anyhow::Result<()>;
}
