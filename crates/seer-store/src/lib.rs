// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod checkpoint;
pub mod config;
pub mod file;
pub mod memory;
pub mod store;

pub use checkpoint::{
    CURRENT_STATE_SCHEMA_VERSION, CheckpointEnvelope, MIN_SUPPORTED_STATE_SCHEMA_VERSION,
    PayloadCodec, decode_envelope, encode_envelope, write_file_atomic,
};
pub use config::{StoreBackend, StoreConfig, open_store};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::{STREAM_KIND, StreamStore, page_offset};

/// Stream persistence for seer.
pub fn crate_name() -> &'static str {
    let _ = seer_stream::crate_name();
    "seer-store"
}
