// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use seer_core::SeerError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

/// Current state schema version emitted by writers.
pub const CURRENT_STATE_SCHEMA_VERSION: u32 = 1;
/// Minimum state schema version accepted by readers.
pub const MIN_SUPPORTED_STATE_SCHEMA_VERSION: u32 = 1;

/// Encoding of the checkpoint payload bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadCodec {
    Json,
    #[default]
    Bincode,
}

impl PayloadCodec {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Bincode => "bincode",
        }
    }
}

/// Self-describing, checksummed wrapper around one persisted entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointEnvelope {
    pub entity_kind: String,
    pub state_schema_version: u32,
    pub engine_fingerprint: String,
    pub created_at_ns: i64,
    pub payload_crc32: u32,
    pub payload_codec: PayloadCodec,
    pub payload: Vec<u8>,
}

impl CheckpointEnvelope {
    /// Encodes `state` into a fresh envelope stamped with the current time.
    ///
    /// JSON has no encoding for NaN or infinities; a JSON payload that does not
    /// decode back into `State` is refused instead of being written.
    pub fn seal<State: Serialize + DeserializeOwned>(
        entity_kind: &str,
        state: &State,
        payload_codec: PayloadCodec,
    ) -> Result<Self, SeerError> {
        let payload = serialize_payload(entity_kind, state, payload_codec)?;
        if payload_codec == PayloadCodec::Json {
            serde_json::from_slice::<State>(&payload).map_err(|err| {
                SeerError::storage(format!(
                    "{entity_kind} state is not representable with codec=json (non-finite values are written as null): {err}"
                ))
            })?;
        }
        let envelope = Self {
            entity_kind: entity_kind.to_string(),
            state_schema_version: CURRENT_STATE_SCHEMA_VERSION,
            engine_fingerprint: engine_fingerprint(),
            created_at_ns: now_unix_ns()?,
            payload_crc32: crc32fast::hash(&payload),
            payload_codec,
            payload,
        };
        envelope.validate_metadata()?;
        Ok(envelope)
    }

    /// Verifies metadata and checksum, then decodes the payload.
    pub fn open<State: DeserializeOwned>(&self, expected_kind: &str) -> Result<State, SeerError> {
        self.validate_metadata()?;
        self.verify_payload_crc32()?;
        if self.entity_kind != expected_kind {
            return Err(SeerError::corrupt_data(
                expected_kind,
                format!("checkpoint holds entity kind '{}'", self.entity_kind),
            ));
        }
        deserialize_payload(expected_kind, &self.payload, self.payload_codec)
    }

    fn validate_metadata(&self) -> Result<(), SeerError> {
        let kind = self.entity_kind.as_str();
        if kind.trim().is_empty() {
            return Err(SeerError::corrupt_data(
                "checkpoint",
                "entity_kind must be non-empty",
            ));
        }
        if self.engine_fingerprint.trim().is_empty() {
            return Err(SeerError::corrupt_data(
                kind,
                "engine_fingerprint must be non-empty",
            ));
        }
        if self.created_at_ns < 0 {
            return Err(SeerError::corrupt_data(
                kind,
                format!("created_at_ns must be >= 0; got {}", self.created_at_ns),
            ));
        }
        validate_state_schema_version(kind, self.state_schema_version)
    }

    fn verify_payload_crc32(&self) -> Result<(), SeerError> {
        let observed = crc32fast::hash(&self.payload);
        if observed != self.payload_crc32 {
            return Err(SeerError::corrupt_data(
                &self.entity_kind,
                format!(
                    "payload crc32 mismatch: expected=0x{:08x}, observed=0x{:08x}",
                    self.payload_crc32, observed
                ),
            ));
        }
        Ok(())
    }
}

fn validate_state_schema_version(kind: &str, version: u32) -> Result<(), SeerError> {
    if (MIN_SUPPORTED_STATE_SCHEMA_VERSION..=CURRENT_STATE_SCHEMA_VERSION).contains(&version) {
        return Ok(());
    }
    Err(SeerError::corrupt_data(
        kind,
        format!(
            "state_schema_version={version} is unsupported; supported versions are {MIN_SUPPORTED_STATE_SCHEMA_VERSION}..={CURRENT_STATE_SCHEMA_VERSION}"
        ),
    ))
}

fn engine_fingerprint() -> String {
    format!(
        "seer-store/{}/{}-{}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

fn now_unix_ns() -> Result<i64, SeerError> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| {
            SeerError::storage(format!(
                "system clock before UNIX epoch; cannot timestamp checkpoint: {err}"
            ))
        })?;
    i64::try_from(elapsed.as_nanos())
        .map_err(|_| SeerError::storage("system timestamp overflow while sealing checkpoint"))
}

pub(crate) fn io_error(action: &str, path: &Path, err: std::io::Error) -> SeerError {
    SeerError::storage(format!("{action} '{}': {err}", path.display()))
}

fn serialize_payload<State: Serialize>(
    kind: &str,
    state: &State,
    codec: PayloadCodec,
) -> Result<Vec<u8>, SeerError> {
    let encoded = match codec {
        PayloadCodec::Json => serde_json::to_vec(state).map_err(|err| err.to_string()),
        PayloadCodec::Bincode => bincode::serialize(state).map_err(|err| err.to_string()),
    };
    encoded.map_err(|err| {
        SeerError::storage(format!(
            "{kind} payload serialization failed (codec={}): {err}",
            codec.as_str()
        ))
    })
}

fn deserialize_payload<State: DeserializeOwned>(
    kind: &str,
    payload: &[u8],
    codec: PayloadCodec,
) -> Result<State, SeerError> {
    let decoded = match codec {
        PayloadCodec::Json => serde_json::from_slice(payload).map_err(|err| err.to_string()),
        PayloadCodec::Bincode => bincode::deserialize(payload).map_err(|err| err.to_string()),
    };
    decoded.map_err(|err| {
        SeerError::corrupt_data(
            kind,
            format!("payload decode failed (codec={}): {err}", codec.as_str()),
        )
    })
}

/// Serializes an envelope to JSON bytes.
pub fn encode_envelope(envelope: &CheckpointEnvelope) -> Result<Vec<u8>, SeerError> {
    serde_json::to_vec(envelope)
        .map_err(|err| SeerError::storage(format!("checkpoint envelope encode failed: {err}")))
}

/// Parses envelope JSON bytes; metadata and checksum are checked by [`CheckpointEnvelope::open`].
pub fn decode_envelope(kind: &str, encoded: &[u8]) -> Result<CheckpointEnvelope, SeerError> {
    serde_json::from_slice(encoded).map_err(|err| {
        SeerError::corrupt_data(kind, format!("checkpoint envelope parse failed: {err}"))
    })
}

/// Writes `encoded` to `path` via temp file, fsync and rename.
pub fn write_file_atomic(path: &Path, encoded: &[u8]) -> Result<(), SeerError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            SeerError::storage(format!(
                "checkpoint path '{}' must include a file name",
                path.display()
            ))
        })?;

    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    let temp_path = parent.join(format!("{file_name}.tmp-{}-{suffix}", process::id()));

    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&temp_path)
        .map_err(|err| io_error("failed creating checkpoint temp file", &temp_path, err))?;

    let result = file
        .write_all(encoded)
        .map_err(|err| io_error("failed writing checkpoint temp file", &temp_path, err))
        .and_then(|()| {
            file.sync_all()
                .map_err(|err| io_error("failed fsync on checkpoint temp file", &temp_path, err))
        })
        .and_then(|()| {
            std::fs::rename(&temp_path, path)
                .map_err(|err| io_error("failed renaming checkpoint temp file", path, err))
        });

    if result.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    result
}
