// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::checkpoint::{
    CheckpointEnvelope, PayloadCodec, decode_envelope, encode_envelope, io_error,
    write_file_atomic,
};
use crate::store::{STREAM_KIND, StreamStore, page_offset};
use seer_core::SeerError;
use seer_stream::{Stream, validate_name};
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

const CHECKPOINT_EXTENSION: &str = ".ckpt";

/// Durable store keeping one checkpoint file per stream under `root`.
///
/// File names are the hex encoding of the stream name, so any valid name is
/// safe on disk and directory order matches name order.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    payload_codec: PayloadCodec,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>, payload_codec: PayloadCodec) -> Result<Self, SeerError> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .map_err(|err| io_error("failed creating store directory", &root, err))?;
        debug!(root = %root.display(), codec = payload_codec.as_str(), "opened file store");
        Ok(Self {
            root,
            payload_codec,
            write_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, SeerError> {
        validate_name(name)?;
        Ok(self
            .root
            .join(format!("{}{CHECKPOINT_EXTENSION}", hex::encode(name))))
    }

    fn exists(&self, path: &Path) -> Result<bool, SeerError> {
        path.try_exists()
            .map_err(|err| io_error("failed checking checkpoint file", path, err))
    }

    fn write(&self, path: &Path, stream: &Stream) -> Result<(), SeerError> {
        let envelope = CheckpointEnvelope::seal(STREAM_KIND, stream, self.payload_codec)?;
        write_file_atomic(path, &encode_envelope(&envelope)?)
    }

    fn read(&self, name: &str, path: &Path) -> Result<Stream, SeerError> {
        let encoded = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == IoErrorKind::NotFound => {
                return Err(SeerError::not_found(STREAM_KIND, name));
            }
            Err(err) => return Err(io_error("failed reading checkpoint file", path, err)),
        };
        let stream: Stream = decode_envelope(STREAM_KIND, &encoded)?.open(STREAM_KIND)?;
        stream
            .validate()
            .map_err(|err| SeerError::corrupt_data(STREAM_KIND, err.to_string()))?;
        Ok(stream)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, SeerError> {
        self.write_lock
            .lock()
            .map_err(|_| SeerError::storage("file store lock poisoned"))
    }

    /// Stream names on disk, sorted.
    fn names(&self) -> Result<Vec<String>, SeerError> {
        let entries = std::fs::read_dir(&self.root)
            .map_err(|err| io_error("failed listing store directory", &self.root, err))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|err| io_error("failed listing store directory", &self.root, err))?;
            let file_name = entry.file_name();
            let Some(stem) = file_name
                .to_str()
                .and_then(|f| f.strip_suffix(CHECKPOINT_EXTENSION))
            else {
                continue;
            };
            match hex::decode(stem).map(String::from_utf8) {
                Ok(Ok(name)) if validate_name(&name).is_ok() => names.push(name),
                _ => warn!(file = %entry.path().display(), "skipping foreign file in store directory"),
            }
        }
        names.sort();
        Ok(names)
    }
}

impl StreamStore for FileStore {
    fn create_stream(&self, name: &str, stream: &Stream) -> Result<(), SeerError> {
        let path = self.path_for(name)?;
        let _guard = self.lock()?;
        if self.exists(&path)? {
            return Err(SeerError::already_exists(STREAM_KIND, name));
        }
        self.write(&path, stream)
    }

    fn get_stream(&self, name: &str) -> Result<Stream, SeerError> {
        self.read(name, &self.path_for(name)?)
    }

    fn update_stream(&self, name: &str, stream: &Stream) -> Result<(), SeerError> {
        let path = self.path_for(name)?;
        let _guard = self.lock()?;
        if !self.exists(&path)? {
            return Err(SeerError::not_found(STREAM_KIND, name));
        }
        self.write(&path, stream)
    }

    fn delete_stream(&self, name: &str) -> Result<(), SeerError> {
        let path = self.path_for(name)?;
        let _guard = self.lock()?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == IoErrorKind::NotFound => {
                Err(SeerError::not_found(STREAM_KIND, name))
            }
            Err(err) => Err(io_error("failed removing checkpoint file", &path, err)),
        }
    }

    fn list_streams(&self, page_number: usize, page_size: usize) -> Result<Vec<Stream>, SeerError> {
        let offset = page_offset(page_number, page_size)?;
        let page = self
            .names()?
            .into_iter()
            .skip(offset)
            .take(page_size)
            .map(|name| {
                let path = self.path_for(&name)?;
                self.read(&name, &path)
            })
            .collect::<Result<Vec<_>, _>>()?;
        if page.is_empty() {
            return Err(SeerError::none_found(STREAM_KIND));
        }
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::FileStore;
    use crate::{PayloadCodec, StreamStore};
    use seer_core::ErrorKind;
    use seer_stream::{Domain, Stream, StreamConfig};

    fn stream(name: &str) -> Stream {
        let config = StreamConfig::new(name, 86_400.0, 0.0, 0.0, Domain::Continuous)
            .expect("config should be valid");
        Stream::new(config).expect("stream should build")
    }

    #[test]
    fn names_with_path_separators_are_stored_safely() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let store = FileStore::open(dir.path(), PayloadCodec::Bincode).expect("store should open");

        let name = "../etc/passwd";
        store
            .create_stream(name, &stream(name))
            .expect("create should succeed");
        assert_eq!(
            store.get_stream(name).expect("get should succeed").name(),
            name
        );
        assert!(dir.path().join(format!("{}.ckpt", hex::encode(name))).exists());
    }

    #[test]
    fn foreign_files_are_ignored_when_listing() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let store = FileStore::open(dir.path(), PayloadCodec::Json).expect("store should open");
        std::fs::write(dir.path().join("README"), b"not a stream").expect("write should succeed");
        std::fs::write(dir.path().join("zz.ckpt"), b"{}").expect("write should succeed");

        let err = store.list_streams(1, 10).expect_err("no streams yet");
        assert_eq!(err.kind(), ErrorKind::NoneFound);

        store
            .create_stream("alpha", &stream("alpha"))
            .expect("create should succeed");
        assert_eq!(store.list_streams(1, 10).expect("page should exist").len(), 1);
    }
}
