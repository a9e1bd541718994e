//! In-flight registry: at most one generation cycle per form instance.
//!
//! A form instance is the owner's "new interview" form or the edit form of one
//! interview. The key is held for the whole cycle and released on drop.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct InFlight {
    keys: Arc<Mutex<HashSet<String>>>,
}

/// Releases its key when dropped, whether the cycle succeeded or not.
#[derive(Debug)]
pub struct InFlightGuard {
    key: String,
    keys: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` if a cycle for the same form instance is already running.
    pub fn try_acquire(&self, user_id: &str, interview_id: Option<Uuid>) -> Option<InFlightGuard> {
        let key = form_key(user_id, interview_id);
        let mut keys = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        if !keys.insert(key.clone()) {
            return None;
        }
        Some(InFlightGuard {
            key,
            keys: Arc::clone(&self.keys),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut keys = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        keys.remove(&self.key);
    }
}

fn form_key(user_id: &str, interview_id: Option<Uuid>) -> String {
    match interview_id {
        Some(id) => format!("{user_id}/{id}"),
        None => format!("{user_id}/new"),
    }
}
