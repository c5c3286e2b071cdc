//! Platform-agnostic audio backend trait
//!
//! Abstracts the platform audio subsystem (native player on mobile, a
//! simulated player in the CLI, a recording mock in tests).

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Opaque handle to one prepared (or preparing) audio resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceHandle(u64);

impl ResourceHandle {
    /// Wrap a backend-specific identifier
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Backend-specific identifier
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Platform audio primitives
///
/// `prepare` only starts loading: readiness, completion and failures are
/// reported later through [`AudioEvent`]s that the host forwards to the
/// coordinator. A backend must tolerate `release` on a handle whose load is
/// still in flight; that is how pending loads are cancelled.
pub trait AudioBackend: Send {
    /// Begin preparing the clip at `url`
    ///
    /// # Errors
    /// Returns an error if the load cannot even be started (bad URL, no device)
    fn prepare(&mut self, url: &str) -> Result<ResourceHandle>;

    /// Start or resume playback of a prepared resource
    fn play(&mut self, handle: ResourceHandle) -> Result<()>;

    /// Pause playback
    fn pause(&mut self, handle: ResourceHandle) -> Result<()>;

    /// Free the resource (cancels a pending load)
    fn release(&mut self, handle: ResourceHandle);
}

/// Asynchronous notification from the audio backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AudioEvent {
    /// Resource finished loading
    Prepared {
        /// Resource
        handle: ResourceHandle,
    },

    /// Resource failed to load
    LoadFailed {
        /// Resource
        handle: ResourceHandle,
        /// Backend message
        reason: String,
    },

    /// Clip played to its natural end
    Finished {
        /// Resource
        handle: ResourceHandle,
    },

    /// Playback broke mid-clip
    PlaybackFailed {
        /// Resource
        handle: ResourceHandle,
        /// Backend message
        reason: String,
    },
}

impl AudioEvent {
    /// Resource the event refers to
    pub fn handle(&self) -> ResourceHandle {
        match self {
            AudioEvent::Prepared { handle }
            | AudioEvent::LoadFailed { handle, .. }
            | AudioEvent::Finished { handle }
            | AudioEvent::PlaybackFailed { handle, .. } => *handle,
        }
    }
}

/// Append the storage API key to an audio URL
///
/// Clips live in authenticated storage; the key travels as an `apikey`
/// query parameter.
pub fn authorize_url(url: &str, api_key: Option<&str>) -> String {
    match api_key.filter(|k| !k.is_empty()) {
        Some(key) => {
            let separator = if url.contains('?') { '&' } else { '?' };
            format!("{url}{separator}apikey={key}")
        }
        None => url.to_string(),
    }
}
