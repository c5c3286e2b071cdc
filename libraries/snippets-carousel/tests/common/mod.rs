//! Shared helpers for carousel integration tests

#![allow(dead_code)]

use snippets_carousel::{AudioBackend, AudioEvent, CarouselError, ResourceHandle, Result};
use snippets_core::Card;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

/// Backend call, as recorded by [`MockBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Prepare(String),
    Play(u64),
    Pause(u64),
    Release(u64),
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<Call>,
    live: BTreeSet<u64>,
    next: u64,
    failing_urls: Vec<String>,
}

/// Audio backend that records every call and tracks live handles
///
/// Loads never complete on their own; tests deliver [`AudioEvent`]s
/// explicitly, which makes late and out-of-order completions easy to stage.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    /// Backend plus a probe sharing its state
    pub fn new() -> (Self, Probe) {
        let backend = Self::default();
        let probe = Probe {
            state: Arc::clone(&backend.state),
        };
        (backend, probe)
    }

    /// Refuse to prepare URLs containing `fragment`
    pub fn fail_urls_containing(self, fragment: &str) -> Self {
        self.state.lock().unwrap().failing_urls.push(fragment.to_string());
        self
    }
}

impl AudioBackend for MockBackend {
    fn prepare(&mut self, url: &str) -> Result<ResourceHandle> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Prepare(url.to_string()));

        if state.failing_urls.iter().any(|f| url.contains(f.as_str())) {
            return Err(CarouselError::ResourceLoad(format!("cannot open {url}")));
        }

        state.next += 1;
        let raw = state.next;
        state.live.insert(raw);
        Ok(ResourceHandle::new(raw))
    }

    fn play(&mut self, handle: ResourceHandle) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Play(handle.raw()));
        if !state.live.contains(&handle.raw()) {
            return Err(CarouselError::Playback(format!("handle {} released", handle.raw())));
        }
        Ok(())
    }

    fn pause(&mut self, handle: ResourceHandle) -> Result<()> {
        self.state.lock().unwrap().calls.push(Call::Pause(handle.raw()));
        Ok(())
    }

    fn release(&mut self, handle: ResourceHandle) {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Release(handle.raw()));
        state.live.remove(&handle.raw());
    }
}

/// Read-only view of a [`MockBackend`]
#[derive(Debug, Clone)]
pub struct Probe {
    state: Arc<Mutex<MockState>>,
}

impl Probe {
    /// All calls so far
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Handles prepared and not yet released
    pub fn live_handles(&self) -> Vec<u64> {
        self.state.lock().unwrap().live.iter().copied().collect()
    }

    /// Most recently issued handle
    pub fn last_handle(&self) -> Option<ResourceHandle> {
        let state = self.state.lock().unwrap();
        (state.next > 0).then(|| ResourceHandle::new(state.next))
    }

    /// Number of `prepare` calls
    pub fn prepare_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Prepare(_)))
            .count()
    }
}

/// Readiness notification for the most recently issued handle
pub fn prepared(probe: &Probe) -> AudioEvent {
    AudioEvent::Prepared {
        handle: probe.last_handle().unwrap(),
    }
}

/// Newest-first cards with audio, one per id
pub fn deck(ids: &[&str]) -> Vec<Card> {
    ids.iter()
        .map(|id| {
            Card::new(*id, format!("Song {id}"), "Artist")
                .with_audio(format!("https://clips.example/{id}.mp3"))
                .with_lyrics([format!("first line of {id}")])
        })
        .collect()
}

/// `n` cards named `m0..m{n-1}`
pub fn numbered_deck(n: usize) -> Vec<Card> {
    let ids: Vec<String> = (0..n).map(|i| format!("m{i}")).collect();
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    deck(&refs)
}
