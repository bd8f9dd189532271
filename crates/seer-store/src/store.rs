// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use seer_core::SeerError;
use seer_stream::Stream;

/// Entity kind reported in store errors.
pub const STREAM_KIND: &str = "stream";

/// Keyed persistence of streams.
///
/// Implementations must be safe to share across threads; per-stream ordering of
/// read-modify-write cycles is the caller's responsibility.
pub trait StreamStore: Send + Sync {
    /// Fails with `AlreadyExists` if `name` is taken.
    fn create_stream(&self, name: &str, stream: &Stream) -> Result<(), SeerError>;

    /// Fails with `NotFound` if `name` is absent.
    fn get_stream(&self, name: &str) -> Result<Stream, SeerError>;

    /// Replaces an existing stream; fails with `NotFound` if `name` is absent.
    fn update_stream(&self, name: &str, stream: &Stream) -> Result<(), SeerError>;

    /// Fails with `NotFound` if `name` is absent.
    fn delete_stream(&self, name: &str) -> Result<(), SeerError>;

    /// One page of streams in name order; `page_number` starts at 1.
    ///
    /// An empty page is `NoneFound`.
    fn list_streams(&self, page_number: usize, page_size: usize) -> Result<Vec<Stream>, SeerError>;
}

/// Offset of the first entry on a 1-based page.
pub fn page_offset(page_number: usize, page_size: usize) -> Result<usize, SeerError> {
    if page_number == 0 || page_size == 0 {
        return Err(SeerError::invalid_parameter(format!(
            "page number and page size must both be >= 1; got page_number={page_number}, page_size={page_size}"
        )));
    }
    (page_number - 1).checked_mul(page_size).ok_or_else(|| {
        SeerError::invalid_parameter(format!(
            "page {page_number} of size {page_size} is out of range"
        ))
    })
}
