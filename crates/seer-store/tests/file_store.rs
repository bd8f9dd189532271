// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use seer_core::ErrorKind;
use seer_store::{FileStore, MemoryStore, PayloadCodec, StreamStore};
use seer_stream::{DEFAULT_PROBABILITIES, Domain, MAX_NAME_BYTES, Stream, StreamConfig};
use std::path::Path;

const HOUR: f64 = 3_600.0;
const HOUR_NS: i64 = 3_600_000_000_000;

fn trained_stream(name: &str) -> Stream {
    let config = StreamConfig::new(name, HOUR, 0.0, 0.0, Domain::ContinuousRight)
        .expect("config should be valid");
    let mut stream = Stream::new(config).expect("stream should build");
    let values: Vec<f64> = (0..36).map(|i| 120.0 + ((i % 24) as f64).sin() * 8.0).collect();
    let times: Vec<i64> = (0..36).map(|i| i * HOUR_NS).collect();
    stream
        .update(&values, &times)
        .expect("contiguous update should succeed");
    stream
}

fn checkpoint_files(dir: &Path) -> Vec<std::path::PathBuf> {
    std::fs::read_dir(dir)
        .expect("store dir should be readable")
        .map(|entry| entry.expect("entry should be readable").path())
        .collect()
}

#[test]
fn reopened_store_restores_identical_streams_for_each_codec() {
    for codec in [PayloadCodec::Bincode, PayloadCodec::Json] {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let stream = trained_stream("web_visits");
        {
            let store = FileStore::open(dir.path(), codec).expect("store should open");
            store
                .create_stream("web_visits", &stream)
                .expect("create should succeed");
        }

        let store = FileStore::open(dir.path(), codec).expect("store should reopen");
        let restored = store.get_stream("web_visits").expect("get should succeed");
        assert_eq!(restored.summary(), stream.summary());

        let a = restored
            .forecast(5, &DEFAULT_PROBABILITIES)
            .expect("restored forecast should succeed");
        let b = stream
            .forecast(5, &DEFAULT_PROBABILITIES)
            .expect("original forecast should succeed");
        assert_eq!(restored, stream);
        assert_eq!(a, b);
    }
}

#[test]
fn diverged_stream_is_refused_by_json_store_and_kept_by_bincode_store() {
    let config = StreamConfig::new("diverged", HOUR, 0.0, 0.0, Domain::Continuous)
        .expect("config should be valid");
    let fresh = Stream::new(config).expect("stream should build");
    let mut diverged = fresh.clone();
    diverged
        .update(&[1e200, -1e200, 1e200], &[0, HOUR_NS, 2 * HOUR_NS])
        .expect("finite values should be absorbed");

    let dir = tempfile::tempdir().expect("temp dir should be created");
    let json = FileStore::open(dir.path().join("json"), PayloadCodec::Json)
        .expect("store should open");
    json.create_stream("diverged", &fresh)
        .expect("fresh stream should persist");
    let err = json
        .update_stream("diverged", &diverged)
        .expect_err("non-finite state must not be written as json");
    assert_eq!(err.kind(), ErrorKind::Storage);
    let kept = json
        .get_stream("diverged")
        .expect("previous state should stay readable");
    assert_eq!(kept, fresh);

    let bincode = FileStore::open(dir.path().join("bincode"), PayloadCodec::Bincode)
        .expect("store should open");
    bincode
        .create_stream("diverged", &diverged)
        .expect("bincode keeps non-finite values");
    let restored = bincode
        .get_stream("diverged")
        .expect("diverged stream should read back");
    assert_eq!(restored.last_event_ns(), diverged.last_event_ns());
}

#[test]
fn file_and_memory_stores_agree_on_error_semantics() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let file = FileStore::open(dir.path(), PayloadCodec::Bincode).expect("store should open");
    let memory = MemoryStore::new();
    let stores: [&dyn StreamStore; 2] = [&file, &memory];

    for store in stores {
        let stream = trained_stream("orders");
        assert_eq!(
            store.get_stream("orders").expect_err("missing").to_string(),
            "no stream with name orders was found in store"
        );
        store
            .create_stream("orders", &stream)
            .expect("create should succeed");
        assert_eq!(
            store
                .create_stream("orders", &stream)
                .expect_err("duplicate")
                .kind(),
            ErrorKind::AlreadyExists
        );
        assert_eq!(
            store
                .update_stream("refunds", &stream)
                .expect_err("missing update")
                .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            store.list_streams(2, 1).expect_err("second page is empty").kind(),
            ErrorKind::NoneFound
        );
        assert_eq!(
            store.list_streams(0, 1).expect_err("page 0 is invalid").kind(),
            ErrorKind::InvalidParameter
        );
        store.delete_stream("orders").expect("delete should succeed");
        assert_eq!(
            store.delete_stream("orders").expect_err("double delete").kind(),
            ErrorKind::NotFound
        );
    }
}

#[test]
fn file_and_memory_stores_agree_on_name_limits() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let file = FileStore::open(dir.path(), PayloadCodec::Json).expect("store should open");
    let memory = MemoryStore::new();
    let stores: [&dyn StreamStore; 2] = [&file, &memory];

    let longest = "s".repeat(MAX_NAME_BYTES);
    let too_long = "s".repeat(200);
    let err = StreamConfig::new(too_long.as_str(), HOUR, 0.0, 0.0, Domain::Continuous)
        .expect_err("oversized name must fail config validation");
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);

    for store in stores {
        let stream = trained_stream(&longest);
        store
            .create_stream(&longest, &stream)
            .expect("name at the limit should be stored");
        assert_eq!(
            store.get_stream(&longest).expect("get should succeed").name(),
            longest
        );

        let stand_in = trained_stream("orders");
        for result in [
            store.create_stream(&too_long, &stand_in),
            store.update_stream(&too_long, &stand_in),
            store.get_stream(&too_long).map(|_| ()),
            store.delete_stream(&too_long),
            store.get_stream("ab").map(|_| ()),
        ] {
            assert_eq!(
                result.expect_err("invalid name must fail").kind(),
                ErrorKind::InvalidParameter
            );
        }
    }
    assert_eq!(checkpoint_files(dir.path()).len(), 1);
}

#[test]
fn tampered_checkpoint_is_reported_as_corrupt() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let store = FileStore::open(dir.path(), PayloadCodec::Bincode).expect("store should open");
    store
        .create_stream("sensor", &trained_stream("sensor"))
        .expect("create should succeed");

    let files = checkpoint_files(dir.path());
    assert_eq!(files.len(), 1);
    let path = &files[0];

    let raw = std::fs::read(path).expect("checkpoint should be readable");
    let mut envelope: serde_json::Value =
        serde_json::from_slice(&raw).expect("envelope should be JSON");
    envelope["payload_crc32"] = serde_json::json!(0);
    std::fs::write(path, serde_json::to_vec(&envelope).expect("re-encode should succeed"))
        .expect("tampered write should succeed");

    let err = store.get_stream("sensor").expect_err("tampered file must fail");
    assert_eq!(err.kind(), ErrorKind::CorruptData);
    assert!(err.to_string().contains("unable to unmarshal entity of kind stream"));

    std::fs::write(path, b"\x00garbage").expect("garbage write should succeed");
    let err = store.get_stream("sensor").expect_err("garbage file must fail");
    assert_eq!(err.kind(), ErrorKind::CorruptData);
}

#[test]
fn updates_replace_persisted_state() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let store = FileStore::open(dir.path(), PayloadCodec::Bincode).expect("store should open");
    let mut stream = trained_stream("latency");
    store
        .create_stream("latency", &stream)
        .expect("create should succeed");

    stream
        .update(&[130.0], &[36 * HOUR_NS])
        .expect("continuation should succeed");
    store
        .update_stream("latency", &stream)
        .expect("update should succeed");

    let restored = store.get_stream("latency").expect("get should succeed");
    assert_eq!(restored.last_event_ns(), Some(36 * HOUR_NS));
    assert_eq!(checkpoint_files(dir.path()).len(), 1);
}
