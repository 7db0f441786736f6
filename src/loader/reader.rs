//! Adaptive draining of a byte source into one contiguous buffer.
//!
//! Two algorithms, selected by whether the source can report its size:
//!
//! - **Exact path** (regular files): one allocation of precisely the declared
//!   size, filled to the byte. End-of-data before the declared size means the
//!   file was truncated while we were reading it.
//! - **Growing path** (pipes, standard input, FIFOs): start at 512 KiB and
//!   grow geometrically (~1.5x per round, increment rounded down to a 16 KiB
//!   multiple), so the number of reallocations stays logarithmic in the final
//!   size. Capacity may overshoot; the returned buffer is truncated to the
//!   byte count actually read.

use crate::error::{Result, SlurpError};
use crate::loader::source::ByteSource;

/// Initial capacity for the growing path: 512 KiB.
pub const INITIAL_CAPACITY: usize = 0x80000;

/// Low bits masked off the growth increment, quantizing it to 16 KiB.
const GROWTH_MASK: usize = 0x3FFF;

/// Next capacity in the growth schedule: `cap + ((cap >> 1) & !0x3FFF)`.
///
/// The mask applies to the increment, not the result. This is the historical
/// formula, kept verbatim: for capacities below 32 KiB the masked increment is
/// zero, which never occurs here because [`INITIAL_CAPACITY`] is well above
/// that, but the schedule of capacities it produces is load-bearing for
/// reallocation-count expectations and must not be "improved".
pub fn next_capacity(capacity: usize) -> usize {
    capacity + ((capacity >> 1) & !GROWTH_MASK)
}

/// Drain a byte source to completion, picking the algorithm by source kind.
pub async fn read_to_end(source: &mut dyn ByteSource) -> Result<Vec<u8>> {
    match source.known_size() {
        Some(size) => read_exact_sized(source, size as usize).await,
        None => read_growing(source).await,
    }
}

/// Known-size path: exactly one allocation, sized precisely.
async fn read_exact_sized(source: &mut dyn ByteSource, size: usize) -> Result<Vec<u8>> {
    let mut data: Vec<u8> = Vec::new();
    data.try_reserve_exact(size)?;
    data.resize(size, 0);

    let mut filled = 0;
    while filled < size {
        let n = source.read(&mut data[filled..]).await?;
        if n == 0 {
            return Err(SlurpError::FileShrunk);
        }
        filled += n;
    }

    Ok(data)
}

/// Unknown-size path: fill the buffer's unused tail, grow when it runs out.
async fn read_growing(source: &mut dyn ByteSource) -> Result<Vec<u8>> {
    let mut data: Vec<u8> = Vec::new();
    let mut capacity = INITIAL_CAPACITY;
    let mut length = 0;

    loop {
        data.try_reserve(capacity - data.len())?;
        data.resize(capacity, 0);

        // The producer may hand us bytes in any chunking; keep reading until
        // the tail is full or the source reports end-of-data.
        while length < capacity {
            let n = source.read(&mut data[length..capacity]).await?;
            if n == 0 {
                data.truncate(length);
                return Ok(data);
            }
            length += n;
        }

        capacity = next_capacity(capacity);
    }
}
