//! Error types for the climb transmission pipeline.
//!
//! All errors implement the `std::error::Error` trait and carry structured
//! context. The taxonomy is closed: each variant corresponds to one distinct
//! failure mode of a send, and each maps to one distinct user-visible message
//! via [`TransmissionError::user_message`].
//!
//! ## Error Categories
//!
//! - **Capability Errors**: the host has no usable wireless stack
//! - **Acquisition Errors**: device or characteristic discovery failed
//! - **Frame Errors**: the climb's hold encoding is invalid or unmirrorable
//! - **Configuration Errors**: bad board name or chunk size
//! - **Write Errors**: the link dropped mid-transmission
//!
//! ## Retry Semantics
//!
//! The pipeline never retries on its own. [`TransmissionError::is_user_retryable`]
//! tells callers which failures are worth re-invoking `send` for (the session
//! has already cleared its cached link state in those cases); the rest are
//! input or configuration defects that will fail identically on retry.

use thiserror::Error;

use crate::capability::LinkError;

/// Result type alias for transmission operations.
pub type Result<T, E = TransmissionError> = std::result::Result<T, E>;

/// Which discovery step an acquisition failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionStage {
    /// Device discovery via the host's name-filtered picker.
    Device,
    /// Characteristic discovery on an already-acquired device.
    Characteristic,
}

impl std::fmt::Display for AcquisitionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AcquisitionStage::Device => f.write_str("device discovery"),
            AcquisitionStage::Characteristic => f.write_str("characteristic discovery"),
        }
    }
}

/// Main error type for climb transmission.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransmissionError {
    /// The runtime environment exposes no wireless stack.
    #[error("host has no usable wireless stack")]
    CapabilityUnavailable,

    /// Device or characteristic discovery failed or was cancelled.
    #[error("acquisition failed during {stage}")]
    Acquisition {
        stage: AcquisitionStage,
        #[source]
        source: LinkError,
    },

    /// A token in the climb's hold encoding could not be parsed.
    #[error("malformed hold token '{token}': {details}")]
    MalformedFrame { token: String, details: String },

    /// A hold referenced by a mirrored climb has no mirror counterpart.
    #[error("no mirror counterpart for hold {hold_id}")]
    UnmappedMirrorHold { hold_id: u32 },

    /// The board-name string resolves to no known board family.
    #[error("unsupported board name '{name}'")]
    UnknownBoard { name: String },

    /// The configured maximum transfer unit cannot carry any bytes.
    #[error("invalid chunk size {given}; must be at least 1")]
    InvalidChunkSize { given: usize },

    /// A chunk write failed mid-transmission.
    #[error("write of chunk {index} of {count} failed")]
    Write {
        index: usize,
        count: usize,
        #[source]
        source: LinkError,
    },
}

impl TransmissionError {
    /// Returns whether re-invoking `send` is a sensible user action.
    ///
    /// Transient link failures are; input and configuration defects are not.
    pub fn is_user_retryable(&self) -> bool {
        match self {
            TransmissionError::Acquisition { .. } => true,
            TransmissionError::Write { .. } => true,
            TransmissionError::CapabilityUnavailable => false,
            TransmissionError::MalformedFrame { .. } => false,
            TransmissionError::UnmappedMirrorHold { .. } => false,
            TransmissionError::UnknownBoard { .. } => false,
            TransmissionError::InvalidChunkSize { .. } => false,
        }
    }

    /// One distinct user-facing message per taxonomy entry.
    ///
    /// Suitable for a toast or status line; the technical detail stays in the
    /// `Display` output and source chain.
    pub fn user_message(&self) -> &'static str {
        match self {
            TransmissionError::CapabilityUnavailable => {
                "This device does not support wireless board control."
            }
            TransmissionError::Acquisition { .. } => {
                "Could not connect to the board. Check that it is powered on and in range."
            }
            TransmissionError::MalformedFrame { .. } => {
                "This climb's hold data is corrupted and cannot be sent."
            }
            TransmissionError::UnmappedMirrorHold { .. } => {
                "This climb cannot be mirrored on this board layout."
            }
            TransmissionError::UnknownBoard { .. } => "This board model is not supported.",
            TransmissionError::InvalidChunkSize { .. } => {
                "Transfer size is misconfigured for this board."
            }
            TransmissionError::Write { .. } => {
                "The connection to the board was lost while sending."
            }
        }
    }

    /// Helper constructor for acquisition failures with stage context.
    pub fn acquisition(stage: AcquisitionStage, source: LinkError) -> Self {
        TransmissionError::Acquisition { stage, source }
    }

    /// Helper constructor for malformed frame tokens.
    pub fn malformed_frame(token: impl Into<String>, details: impl Into<String>) -> Self {
        TransmissionError::MalformedFrame { token: token.into(), details: details.into() }
    }

    /// Helper constructor for mid-transmission write failures.
    pub fn write_failed(index: usize, count: usize, source: LinkError) -> Self {
        TransmissionError::Write { index, count, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn error_messages_format_correctly_with_arbitrary_context(
                token in "[a-z0-9]{1,12}",
                details in ".*",
                hold_id in 0u32..100_000u32,
                name in "[a-zA-Z0-9]{1,16}",
                given in 0usize..4usize,
            ) {
                let frame_err = TransmissionError::malformed_frame(token.clone(), details.clone());
                prop_assert!(frame_err.to_string().contains(&token));

                let mirror_err = TransmissionError::UnmappedMirrorHold { hold_id };
                prop_assert!(mirror_err.to_string().contains(&hold_id.to_string()));

                let board_err = TransmissionError::UnknownBoard { name: name.clone() };
                prop_assert!(board_err.to_string().contains(&name));

                let chunk_err = TransmissionError::InvalidChunkSize { given };
                prop_assert!(chunk_err.to_string().contains(&given.to_string()));

                // No variant may render an empty message
                for err in [frame_err, mirror_err, board_err, chunk_err] {
                    prop_assert!(!err.to_string().is_empty());
                    prop_assert!(!err.user_message().is_empty());
                }
            }

            #[test]
            fn write_errors_preserve_source_through_the_chain(
                index in 0usize..64usize,
                count in 1usize..64usize,
                reason in "[ -~]{1,32}",
            ) {
                let source = LinkError::link(reason.clone());
                let err = TransmissionError::write_failed(index, count, source);

                prop_assert!(err.to_string().contains(&index.to_string()));

                let source = std::error::Error::source(&err);
                prop_assert!(source.is_some());
                prop_assert!(source.unwrap().to_string().contains(&reason));
            }
        }
    }

    #[test]
    fn error_traits_validation() {
        // Compile-time check: TransmissionError must be Send + Sync + 'static
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<TransmissionError>();

        let error = TransmissionError::CapabilityUnavailable;
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn retry_classification() {
        let acquisition =
            TransmissionError::acquisition(AcquisitionStage::Device, LinkError::Cancelled);
        let write = TransmissionError::write_failed(0, 3, LinkError::link("dropped"));
        assert!(acquisition.is_user_retryable());
        assert!(write.is_user_retryable());

        assert!(!TransmissionError::CapabilityUnavailable.is_user_retryable());
        assert!(!TransmissionError::UnmappedMirrorHold { hold_id: 99 }.is_user_retryable());
        assert!(!TransmissionError::malformed_frame("p5", "missing state").is_user_retryable());
        assert!(!TransmissionError::InvalidChunkSize { given: 0 }.is_user_retryable());
    }

    #[test]
    fn user_messages_are_distinct_per_variant() {
        let samples = [
            TransmissionError::CapabilityUnavailable,
            TransmissionError::acquisition(AcquisitionStage::Device, LinkError::Cancelled),
            TransmissionError::malformed_frame("p5", "missing state"),
            TransmissionError::UnmappedMirrorHold { hold_id: 99 },
            TransmissionError::UnknownBoard { name: "moon".to_string() },
            TransmissionError::InvalidChunkSize { given: 0 },
            TransmissionError::write_failed(1, 3, LinkError::link("dropped")),
        ];

        for (i, a) in samples.iter().enumerate() {
            for (j, b) in samples.iter().enumerate() {
                if i != j {
                    assert_ne!(a.user_message(), b.user_message());
                }
            }
        }
    }

    #[test]
    fn acquisition_stage_names_both_steps() {
        let device = TransmissionError::acquisition(AcquisitionStage::Device, LinkError::Cancelled);
        let characteristic = TransmissionError::acquisition(
            AcquisitionStage::Characteristic,
            LinkError::NoWritableCharacteristic,
        );
        assert!(device.to_string().contains("device discovery"));
        assert!(characteristic.to_string().contains("characteristic discovery"));
    }
}
