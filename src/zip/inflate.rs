//! Raw DEFLATE decompression.
//!
//! ZIP entries with method 8 store a bare DEFLATE stream: no zlib header,
//! no adler32 trailer. The declared uncompressed size is only a hint, since
//! streaming writers may under-report it in the local header, so the output
//! buffer grows by doubling until the stream ends.

use flate2::{Decompress, FlushDecompress, Status};
use tracing::trace;

use crate::error::{ImportError, Result};

/// Smallest output buffer allocated for a decompression.
pub const MIN_INFLATE_CAPACITY: usize = 64 * 1024;

/// DEFLATE cannot expand a byte into more than about 1032 bytes; a larger
/// hint is a lie and is not allowed to drive the first allocation.
const MAX_DEFLATE_RATIO: usize = 1032;

/// Transient state of one decompression.
pub struct InflateSession<'a> {
    decompressor: Decompress,
    input: &'a [u8],
    output: Vec<u8>,
}

impl<'a> InflateSession<'a> {
    /// Prepare to inflate `input`, sizing the first buffer from the hint.
    pub fn new(input: &'a [u8], expected_size: usize, min_capacity: usize) -> Self {
        let expected_size = expected_size.min(input.len().saturating_mul(MAX_DEFLATE_RATIO));
        Self {
            // false: raw stream, no zlib framing
            decompressor: Decompress::new(false),
            input,
            output: vec![0u8; expected_size.max(min_capacity).max(1)],
        }
    }

    fn consumed(&self) -> usize {
        self.decompressor.total_in() as usize
    }

    fn produced(&self) -> usize {
        self.decompressor.total_out() as usize
    }

    /// Run the stream to its end and return exactly the bytes produced.
    pub fn run(mut self) -> Result<Vec<u8>> {
        loop {
            let in_pos = self.consumed();
            let out_pos = self.produced();

            let status = self
                .decompressor
                .decompress(
                    &self.input[in_pos..],
                    &mut self.output[out_pos..],
                    FlushDecompress::None,
                )
                .map_err(|e| ImportError::DecompressionFailed(e.to_string()))?;

            if status == Status::StreamEnd {
                break;
            }

            if self.produced() == self.output.len() {
                let capacity = self.output.len() * 2;
                trace!(capacity, "inflate output full, doubling");
                self.output.resize(capacity, 0);
                continue;
            }

            if self.consumed() == in_pos && self.produced() == out_pos {
                return Err(ImportError::DecompressionFailed(format!(
                    "stream ended without a final block after {} of {} input bytes",
                    in_pos,
                    self.input.len()
                )));
            }
        }

        let produced = self.produced();
        self.output.truncate(produced);
        Ok(self.output)
    }
}

/// Decompress a raw DEFLATE stream.
///
/// `expected_size` is advisory (0 if unknown); the result is never truncated
/// to it.
pub fn inflate_raw(input: &[u8], expected_size: usize) -> Result<Vec<u8>> {
    InflateSession::new(input, expected_size, MIN_INFLATE_CAPACITY).run()
}
