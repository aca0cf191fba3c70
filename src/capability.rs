//! Wireless capability seam between the transmission pipeline and the host.
//!
//! The library never talks to a radio directly. Hosts supply an implementation
//! of [`WirelessCapability`] wrapping whatever stack they have (Web Bluetooth,
//! BlueZ, CoreBluetooth, a test double), and the
//! [`TransmissionSession`](crate::session::TransmissionSession) drives it.
//!
//! The trait is deliberately small: three suspension points (device discovery,
//! characteristic discovery, one chunk write) plus a synchronous availability
//! probe. Handle types are associated types so implementations keep their own
//! platform objects without boxing.

use async_trait::async_trait;
use thiserror::Error;

/// Transport-level failure reported by a [`WirelessCapability`] implementation.
///
/// These are the raw outcomes of the host wireless stack. The session wraps
/// them into the crate's [`TransmissionError`](crate::TransmissionError)
/// taxonomy with stage context, preserving the source chain.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LinkError {
    /// The user dismissed the device picker or otherwise cancelled discovery.
    #[error("device selection was cancelled")]
    Cancelled,

    /// Discovery completed without a device matching the name filter.
    #[error("no device matched the name filter '{filter}'")]
    NoMatchingDevice { filter: String },

    /// The device was found but exposes no writable climb characteristic.
    #[error("device exposes no writable climb characteristic")]
    NoWritableCharacteristic,

    /// Any other link-layer failure (connection drop, rejected write, ...).
    #[error("link operation failed: {reason}")]
    Link {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl LinkError {
    /// Helper constructor for link failures without an underlying cause.
    pub fn link(reason: impl Into<String>) -> Self {
        LinkError::Link { reason: reason.into(), source: None }
    }

    /// Helper constructor for link failures with an underlying cause.
    pub fn link_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        LinkError::Link { reason: reason.into(), source: Some(source) }
    }
}

/// Host-provided wireless stack.
///
/// Every async method suspends the caller until the underlying operation
/// completes or fails; the session never runs two of them concurrently.
#[async_trait]
pub trait WirelessCapability: Send + Sync {
    /// Platform handle for a discovered device.
    type Device: Send + Sync;

    /// Platform handle for a writable characteristic on a device.
    type Characteristic: Send + Sync;

    /// Whether the host exposes a usable wireless stack at all.
    ///
    /// Checked once per send, before any discovery. Returning `false` maps to
    /// [`TransmissionError::CapabilityUnavailable`](crate::TransmissionError::CapabilityUnavailable).
    fn is_available(&self) -> bool;

    /// Discover a device whose advertised name matches `name_filter`.
    ///
    /// Implementations may pop an interactive picker; a user dismissal is
    /// reported as [`LinkError::Cancelled`].
    async fn request_device(&self, name_filter: &str) -> Result<Self::Device, LinkError>;

    /// Discover the writable climb characteristic on a device.
    async fn writable_characteristic(
        &self,
        device: &Self::Device,
    ) -> Result<Self::Characteristic, LinkError>;

    /// Write one link-safe chunk to a characteristic.
    ///
    /// The chunk is guaranteed to be at most the session's configured maximum
    /// transfer unit. Completion means the stack accepted the write; any
    /// failure aborts the whole send.
    async fn write_chunk(
        &self,
        characteristic: &Self::Characteristic,
        chunk: &[u8],
    ) -> Result<(), LinkError>;
}
