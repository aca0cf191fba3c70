//! Splitting packets into link-safe chunks.

use crate::error::{Result, TransmissionError};

/// Split a packet into consecutive chunks of at most `max_chunk_size` bytes.
///
/// Byte order is preserved and chunks never overlap; only the final chunk may
/// be shorter. An empty packet yields an empty sequence. A zero chunk size is
/// a configuration defect and fails with
/// [`TransmissionError::InvalidChunkSize`].
pub fn segment(packet: &[u8], max_chunk_size: usize) -> Result<Vec<Vec<u8>>> {
    if max_chunk_size == 0 {
        return Err(TransmissionError::InvalidChunkSize { given: max_chunk_size });
    }
    Ok(packet.chunks(max_chunk_size).map(<[u8]>::to_vec).collect())
}
