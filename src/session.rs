//! Stateful transmission session owning the cached link handles.
//!
//! A [`TransmissionSession`] wraps a host [`WirelessCapability`] and carries
//! at most one cached device handle and one cached writable characteristic
//! across sends, amortizing discovery cost. Each send walks the state machine
//!
//! ```text
//! Idle → Acquiring → Connected → Writing → (Complete | Failed)
//! ```
//!
//! publishing every transition on a `tokio::sync::watch` channel so a UI can
//! display progress and guard against overlapping sends.
//!
//! ## Failure handling
//!
//! - Acquisition and write failures clear the cached handles, forcing full
//!   rediscovery on the next send.
//! - Frame and configuration failures leave the cache intact; the link is
//!   fine, the input is not.
//! - No retries, no internal timeouts: a hang in the host stack is not
//!   bounded here, and every retry is a fresh user-initiated `send`.
//!
//! ## Re-entrancy
//!
//! `send` takes `&mut self`, so overlapping sends on one session cannot be
//! expressed in safe Rust. Callers that hand out the session through interior
//! mutability must still serialize sends themselves; [`is_sending`] and
//! [`phase_updates`] exist so a UI can implement that guard.
//!
//! [`is_sending`]: TransmissionSession::is_sending
//! [`phase_updates`]: TransmissionSession::phase_updates

use tokio::sync::watch;
use tracing::{debug, info, trace, warn};

use crate::capability::{LinkError, WirelessCapability};
use crate::error::{AcquisitionStage, Result, TransmissionError};
use crate::frame::{self, HoldRecord, MirrorMap};
use crate::packet;
use crate::report::{ClimbSentEvent, Notifier, TelemetrySink};
use crate::types::{BoardDetails, BoardFamily, Climb};

/// Default maximum transfer unit: the classic 20-byte BLE ATT payload.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 20;

/// Observable state of a session's current (or last) send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendPhase {
    /// No send has run yet.
    Idle,
    /// Discovering the device and its writable characteristic.
    Acquiring,
    /// Link handles acquired and cached.
    Connected,
    /// Writing chunks in sequence.
    Writing,
    /// Last send completed fully.
    Complete,
    /// Last send failed; see the returned error.
    Failed,
}

/// Summary of one fully completed send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendReceipt {
    /// Encoded packet size in bytes.
    pub packet_len: usize,

    /// Number of chunks written.
    pub chunk_count: usize,

    /// Whether the mirror transform ran.
    pub mirrored: bool,
}

/// Stateful owner of the cached device/characteristic pair.
///
/// One session per UI context; never shared across concurrent callers.
pub struct TransmissionSession<C: WirelessCapability> {
    capability: C,
    device: Option<C::Device>,
    characteristic: Option<C::Characteristic>,
    max_chunk_size: usize,
    phase_tx: watch::Sender<SendPhase>,
    notifier: Option<Box<dyn Notifier>>,
    telemetry: Option<Box<dyn TelemetrySink>>,
}

impl<C: WirelessCapability> TransmissionSession<C> {
    /// Create a session over a host wireless capability.
    pub fn new(capability: C) -> Self {
        let (phase_tx, _) = watch::channel(SendPhase::Idle);
        Self {
            capability,
            device: None,
            characteristic: None,
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            phase_tx,
            notifier: None,
            telemetry: None,
        }
    }

    /// Override the link's maximum transfer unit.
    ///
    /// Validated at segmentation time; a zero size fails the send with
    /// [`TransmissionError::InvalidChunkSize`].
    pub fn with_max_chunk_size(mut self, max_chunk_size: usize) -> Self {
        self.max_chunk_size = max_chunk_size;
        self
    }

    /// Attach a notification collaborator for terminal outcomes.
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Attach a best-effort telemetry collaborator for successful sends.
    pub fn with_telemetry(mut self, telemetry: Box<dyn TelemetrySink>) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Whether a send is currently in flight.
    ///
    /// The session itself is not reentrant; callers use this to guard.
    pub fn is_sending(&self) -> bool {
        matches!(
            *self.phase_tx.borrow(),
            SendPhase::Acquiring | SendPhase::Connected | SendPhase::Writing
        )
    }

    /// Subscribe to phase transitions of this session's sends.
    pub fn phase_updates(&self) -> watch::Receiver<SendPhase> {
        self.phase_tx.subscribe()
    }

    /// Drop the cached device and characteristic, forcing rediscovery on the
    /// next send. Useful when the caller switches boards.
    pub fn reset_link(&mut self) {
        if self.device.is_some() || self.characteristic.is_some() {
            debug!("dropping cached link handles");
        }
        self.device = None;
        self.characteristic = None;
    }

    /// Send a climb to a board.
    ///
    /// Acquires (or reuses) the link, builds the frame (mirrored when the
    /// climb is flagged and the board publishes geometry), encodes the board
    /// packet, and writes its chunks strictly in sequence. Either the whole
    /// packet is delivered and a [`SendReceipt`] returned, or the send failed
    /// and nothing about partial delivery is left ambiguous.
    pub async fn send(&mut self, climb: &Climb, board: &BoardDetails) -> Result<SendReceipt> {
        let result = self.run_send(climb, board).await;

        match &result {
            Ok(receipt) => {
                self.set_phase(SendPhase::Complete);
                info!(
                    climb = %climb.name,
                    chunks = receipt.chunk_count,
                    mirrored = receipt.mirrored,
                    "climb sent to board"
                );
                if let Some(notifier) = &self.notifier {
                    notifier.send_succeeded(climb);
                }
                if let Some(telemetry) = &self.telemetry {
                    let event = ClimbSentEvent {
                        climb_uuid: climb.uuid.clone(),
                        board_layout: board.layout_name.clone().unwrap_or_default(),
                        chunk_count: receipt.chunk_count,
                    };
                    if let Err(error) = telemetry.climb_sent(&event) {
                        warn!("telemetry sink rejected climb-sent event: {error:#}");
                    }
                }
            }
            Err(error) => {
                self.set_phase(SendPhase::Failed);
                warn!(climb = %climb.name, %error, "send failed");
                if let Some(notifier) = &self.notifier {
                    notifier.send_failed(error);
                }
            }
        }

        result
    }

    async fn run_send(&mut self, climb: &Climb, board: &BoardDetails) -> Result<SendReceipt> {
        // Resolve the board family before touching the radio: an unsupported
        // board must not pop a device picker.
        let family = BoardFamily::from_board_name(&board.board_name)?;

        if !self.capability.is_available() {
            return Err(TransmissionError::CapabilityUnavailable);
        }

        self.ensure_link(board).await?;
        self.set_phase(SendPhase::Writing);

        let (records, mirrored) = build_records(climb, board)?;
        let packet = packet::encode(&records, &board.led_placements, family);
        let chunks = packet::segment(&packet, self.max_chunk_size)?;
        debug!(
            packet_len = packet.len(),
            chunks = chunks.len(),
            mirrored,
            "packet encoded and segmented"
        );

        self.write_chunks(&chunks).await?;

        Ok(SendReceipt { packet_len: packet.len(), chunk_count: chunks.len(), mirrored })
    }

    /// Acquire and cache the device/characteristic pair if none is cached.
    async fn ensure_link(&mut self, board: &BoardDetails) -> Result<()> {
        if self.device.is_some() && self.characteristic.is_some() {
            debug!("reusing cached device and characteristic");
            return Ok(());
        }

        self.set_phase(SendPhase::Acquiring);
        let filter = board.device_name_filter();
        info!(filter = %filter, "acquiring board device");

        let device = self
            .capability
            .request_device(&filter)
            .await
            .map_err(|source| TransmissionError::acquisition(AcquisitionStage::Device, source))?;

        let characteristic =
            self.capability.writable_characteristic(&device).await.map_err(|source| {
                TransmissionError::acquisition(AcquisitionStage::Characteristic, source)
            })?;

        // Cache only the complete pair; a failure above leaves nothing behind
        self.device = Some(device);
        self.characteristic = Some(characteristic);
        self.set_phase(SendPhase::Connected);
        Ok(())
    }

    /// Write chunks strictly in sequence: chunk *n+1* starts only after chunk
    /// *n* completed. Firmware reassembles the packet from arrival order.
    async fn write_chunks(&mut self, chunks: &[Vec<u8>]) -> Result<()> {
        let count = chunks.len();
        let mut failed: Option<(usize, LinkError)> = None;

        if let Some(characteristic) = self.characteristic.as_ref() {
            for (index, chunk) in chunks.iter().enumerate() {
                trace!(index, count, len = chunk.len(), "writing chunk");
                if let Err(source) = self.capability.write_chunk(characteristic, chunk).await {
                    failed = Some((index, source));
                    break;
                }
            }
        } else {
            // ensure_link ran first; a missing handle here means the cache
            // was reset out from under an in-flight send
            failed = Some((0, LinkError::NoWritableCharacteristic));
        }

        if let Some((index, source)) = failed {
            self.reset_link();
            return Err(TransmissionError::write_failed(index, count, source));
        }
        Ok(())
    }

    fn set_phase(&self, phase: SendPhase) {
        // send_replace so transitions are published even with no subscribers
        self.phase_tx.send_replace(phase);
    }
}

/// Parse the climb's frame string and apply the mirror transform when it
/// applies.
///
/// Mirroring is skipped entirely, not treated as an error, when the climb is not
/// flagged as mirrored or the board supplies no hold geometry table; the
/// unmirrored frame proceeds in that case.
fn build_records(climb: &Climb, board: &BoardDetails) -> Result<(Vec<HoldRecord>, bool)> {
    let records = frame::parse(&climb.frames)?;

    if !climb.mirrored {
        return Ok((records, false));
    }
    let Some(holds) = board.holds.as_deref() else {
        debug!("climb is flagged mirrored but board has no geometry table; sending unmirrored");
        return Ok((records, false));
    };

    let map = MirrorMap::from_geometry(holds);
    let mirrored = frame::mirror(&records, &map)?;
    Ok((mirrored, true))
}
