// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use seer_core::SeerError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// One mutex per stream name, created on first use and dropped once the last
/// [`StreamLock`] for that name goes away.
#[derive(Debug, Default)]
pub(crate) struct StreamLocks {
    table: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

fn poisoned() -> SeerError {
    SeerError::storage("stream lock table poisoned")
}

impl StreamLocks {
    pub(crate) fn handle(&self, name: &str) -> Result<StreamLock<'_>, SeerError> {
        let mut table = self.table.lock().map_err(|_| poisoned())?;
        let handle = Arc::clone(table.entry(name.to_string()).or_default());
        Ok(StreamLock {
            locks: self,
            name: name.to_string(),
            handle: Some(handle),
        })
    }

    fn release(&self, name: &str) {
        // A poisoned table keeps the entry; the next handle() reports the poison.
        let Ok(mut table) = self.table.lock() else {
            return;
        };
        if table
            .get(name)
            .is_some_and(|handle| Arc::strong_count(handle) == 1)
        {
            table.remove(name);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.table.lock().map(|table| table.len()).unwrap_or_default()
    }
}

/// Shared handle on one stream's mutex. Dropping it releases the table entry
/// when no other caller holds one, whichever way the request ended.
///
/// Declare the guard after the handle so it drops first.
#[derive(Debug)]
pub(crate) struct StreamLock<'a> {
    locks: &'a StreamLocks,
    name: String,
    handle: Option<Arc<Mutex<()>>>,
}

impl StreamLock<'_> {
    pub(crate) fn acquire(&self) -> Result<MutexGuard<'_, ()>, SeerError> {
        match &self.handle {
            Some(handle) => handle.lock().map_err(|_| poisoned()),
            None => Err(poisoned()),
        }
    }
}

impl Drop for StreamLock<'_> {
    fn drop(&mut self) {
        drop(self.handle.take());
        self.locks.release(&self.name);
    }
}
