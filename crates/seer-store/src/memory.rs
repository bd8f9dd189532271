// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::store::{STREAM_KIND, StreamStore, page_offset};
use seer_core::SeerError;
use seer_stream::{Stream, validate_name};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Process-local store; contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    streams: RwLock<BTreeMap<String, Stream>>,
}

fn poisoned() -> SeerError {
    SeerError::storage("memory store lock poisoned")
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StreamStore for MemoryStore {
    fn create_stream(&self, name: &str, stream: &Stream) -> Result<(), SeerError> {
        validate_name(name)?;
        let mut streams = self.streams.write().map_err(|_| poisoned())?;
        if streams.contains_key(name) {
            return Err(SeerError::already_exists(STREAM_KIND, name));
        }
        streams.insert(name.to_string(), stream.clone());
        Ok(())
    }

    fn get_stream(&self, name: &str) -> Result<Stream, SeerError> {
        validate_name(name)?;
        let streams = self.streams.read().map_err(|_| poisoned())?;
        streams
            .get(name)
            .cloned()
            .ok_or_else(|| SeerError::not_found(STREAM_KIND, name))
    }

    fn update_stream(&self, name: &str, stream: &Stream) -> Result<(), SeerError> {
        validate_name(name)?;
        let mut streams = self.streams.write().map_err(|_| poisoned())?;
        let slot = streams
            .get_mut(name)
            .ok_or_else(|| SeerError::not_found(STREAM_KIND, name))?;
        *slot = stream.clone();
        Ok(())
    }

    fn delete_stream(&self, name: &str) -> Result<(), SeerError> {
        validate_name(name)?;
        let mut streams = self.streams.write().map_err(|_| poisoned())?;
        streams
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| SeerError::not_found(STREAM_KIND, name))
    }

    fn list_streams(&self, page_number: usize, page_size: usize) -> Result<Vec<Stream>, SeerError> {
        let offset = page_offset(page_number, page_size)?;
        let streams = self.streams.read().map_err(|_| poisoned())?;
        let page: Vec<Stream> = streams
            .values()
            .skip(offset)
            .take(page_size)
            .cloned()
            .collect();
        if page.is_empty() {
            return Err(SeerError::none_found(STREAM_KIND));
        }
        Ok(page)
    }
}
