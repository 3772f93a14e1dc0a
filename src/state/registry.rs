//! The Registry - who is online, who is banned, who is muted.
//!
//! One exclusive lock guards the online map and both moderation sets
//! together, so no caller ever sees a name online with a stale ban flag.
//! The lock is never held across an `.await`.

use crate::metrics;
use crate::state::SessionHandle;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Why a name could not be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("name is already online")]
    AlreadyOnline,
    #[error("name is banned")]
    Banned,
}

#[derive(Debug, Default)]
struct Inner {
    online: HashMap<String, SessionHandle>,
    banned: HashSet<String>,
    muted: HashSet<String>,
}

/// Shared directory of online sessions plus ban/mute sets.
#[derive(Debug, Default)]
pub struct Registry {
    inner: Mutex<Inner>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a named session. First writer wins; banned names never enter.
    pub fn register(&self, handle: SessionHandle) -> Result<(), RegisterError> {
        let mut inner = self.inner.lock();
        if inner.banned.contains(handle.name()) {
            return Err(RegisterError::Banned);
        }
        if inner.online.contains_key(handle.name()) {
            return Err(RegisterError::AlreadyOnline);
        }
        inner.online.insert(handle.name().to_string(), handle);
        metrics::set_connected_users(inner.online.len());
        Ok(())
    }

    /// Remove `name` from the online map. No-op if absent.
    pub fn unregister(&self, name: &str) -> Option<SessionHandle> {
        let mut inner = self.inner.lock();
        let removed = inner.online.remove(name);
        metrics::set_connected_users(inner.online.len());
        removed
    }

    pub fn lookup(&self, name: &str) -> Option<SessionHandle> {
        self.inner.lock().online.get(name).cloned()
    }

    pub fn is_online(&self, name: &str) -> bool {
        self.inner.lock().online.contains_key(name)
    }

    /// Point-in-time list of online names, sorted.
    pub fn enumerate(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.lock().online.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Point-in-time copy of every online handle, for fan-out.
    pub fn snapshot(&self) -> Vec<SessionHandle> {
        self.inner.lock().online.values().cloned().collect()
    }

    pub fn online_count(&self) -> usize {
        self.inner.lock().online.len()
    }

    /// Returns `true` if the name was not already banned.
    pub fn ban(&self, name: &str) -> bool {
        self.inner.lock().banned.insert(name.to_string())
    }

    /// Returns `true` if the name was banned.
    pub fn unban(&self, name: &str) -> bool {
        self.inner.lock().banned.remove(name)
    }

    pub fn mute(&self, name: &str) -> bool {
        self.inner.lock().muted.insert(name.to_string())
    }

    pub fn unmute(&self, name: &str) -> bool {
        self.inner.lock().muted.remove(name)
    }

    pub fn is_banned(&self, name: &str) -> bool {
        self.inner.lock().banned.contains(name)
    }

    pub fn is_muted(&self, name: &str) -> bool {
        self.inner.lock().muted.contains(name)
    }

    /// Ban `name` only if it is online, returning its handle.
    ///
    /// The online check and the ban happen under one lock.
    pub fn ban_online(&self, name: &str) -> Option<SessionHandle> {
        let mut inner = self.inner.lock();
        let handle = inner.online.get(name).cloned()?;
        inner.banned.insert(name.to_string());
        Some(handle)
    }

    /// Mute `name` only if it is online.
    pub fn mute_online(&self, name: &str) -> bool {
        let mut inner = self.inner.lock();
        if !inner.online.contains_key(name) {
            return false;
        }
        inner.muted.insert(name.to_string());
        true
    }
}
