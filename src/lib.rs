//! Type-safe Rust library for sending climbs to LED climbing boards.
//!
//! Boardlink encodes a climbing-wall "climb" (a set of lit holds and their
//! color/state codes) into a board's firmware packet format and transmits it
//! over a wireless characteristic-based link supplied by the host.
//!
//! # Features
//!
//! - **Full pipeline**: frame codec → mirror transform → packet encoder →
//!   segmenter → strictly ordered chunk writes
//! - **Host agnostic**: bring your own wireless stack by implementing
//!   [`WirelessCapability`]
//! - **Cached links**: device and characteristic handles are reused across
//!   sends and dropped on link failure
//! - **Closed error taxonomy**: one distinct user-facing message per failure
//!   mode, no silent partial delivery
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use boardlink::{BoardDetails, Climb, LedPlacements, TransmissionSession};
//! # use boardlink::{LinkError, WirelessCapability};
//! # use async_trait::async_trait;
//! # struct HostBluetooth;
//! # #[async_trait]
//! # impl WirelessCapability for HostBluetooth {
//! #     type Device = ();
//! #     type Characteristic = ();
//! #     fn is_available(&self) -> bool { true }
//! #     async fn request_device(&self, _: &str) -> Result<(), LinkError> { Ok(()) }
//! #     async fn writable_characteristic(&self, _: &()) -> Result<(), LinkError> { Ok(()) }
//! #     async fn write_chunk(&self, _: &(), _: &[u8]) -> Result<(), LinkError> { Ok(()) }
//! # }
//!
//! #[tokio::main]
//! async fn main() -> boardlink::Result<()> {
//!     let climb = Climb {
//!         uuid: "a1b2".to_string(),
//!         name: "Sloper Traverse".to_string(),
//!         angle: 40,
//!         frames: "p5r1p9r2".to_string(),
//!         mirrored: false,
//!     };
//!     let board = BoardDetails {
//!         board_name: "kilter".to_string(),
//!         layout_name: Some("Original".to_string()),
//!         led_placements: [(5u32, 11u16), (9, 23)].into_iter().collect::<LedPlacements>(),
//!         holds: None,
//!     };
//!
//!     let mut session = TransmissionSession::new(HostBluetooth);
//!     let receipt = session.send(&climb, &board).await?;
//!     println!("sent in {} chunks", receipt.chunk_count);
//!     Ok(())
//! }
//! ```

// Pipeline stages, leaves first
pub mod frame;
pub mod packet;

// Seams to the host and collaborators
pub mod capability;
pub mod report;

// Session state machine
pub mod session;

// Shared types and errors
mod error;
pub mod types;

// Core exports
pub use capability::{LinkError, WirelessCapability};
pub use error::{AcquisitionStage, Result, TransmissionError};
pub use frame::{HoldRecord, MirrorMap};
pub use report::{ClimbSentEvent, Notifier, TelemetrySink};
pub use session::{DEFAULT_MAX_CHUNK_SIZE, SendPhase, SendReceipt, TransmissionSession};
pub use types::{BoardDetails, BoardFamily, Climb, HoldGeometry, LedPlacements};
