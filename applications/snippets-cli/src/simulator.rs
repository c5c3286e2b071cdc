/// Simulated asynchronous audio backend
///
/// Behaves like a platform player without producing sound: loads complete
/// after a configurable latency, clips finish after a configurable length,
/// and every completion is delivered as an `AudioEvent` on a channel the
/// host drains into the carousel. Released handles have their pending timers
/// aborted, though an event already queued can still arrive; the coordinator
/// discards it as stale.
use crate::config::SimulatorSettings;
use crate::error::{CliError, Result};
use snippets_carousel::{AudioBackend, AudioEvent, CarouselError, ResourceHandle};
use std::collections::HashMap;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// One prepared (or preparing) clip
#[derive(Debug)]
struct Clip {
    url: String,

    /// Pending load or end-of-clip timer
    timer: Option<JoinHandle<()>>,

    /// Playback time left
    remaining: Duration,

    /// When playback last (re)started; None while paused
    started: Option<Instant>,
}

impl Clip {
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

pub struct SimulatedBackend {
    settings: SimulatorSettings,
    runtime: Handle,
    events: mpsc::UnboundedSender<AudioEvent>,
    next_handle: u64,
    clips: HashMap<ResourceHandle, Clip>,
}

impl SimulatedBackend {
    /// Create a backend and the channel its notifications arrive on
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(settings: SimulatorSettings) -> Result<(Self, mpsc::UnboundedReceiver<AudioEvent>)> {
        let runtime = Handle::try_current().map_err(|e| CliError::Runtime(e.to_string()))?;
        let (events, receiver) = mpsc::unbounded_channel();

        Ok((
            Self {
                settings,
                runtime,
                events,
                next_handle: 0,
                clips: HashMap::new(),
            },
            receiver,
        ))
    }

    /// Number of clips currently held
    pub fn live_clips(&self) -> usize {
        self.clips.len()
    }

    fn schedule(&self, delay: Duration, event: AudioEvent) -> JoinHandle<()> {
        let events = self.events.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if events.send(event).is_err() {
                tracing::debug!("audio event receiver dropped");
            }
        })
    }

    fn clip_mut(&mut self, handle: ResourceHandle) -> snippets_carousel::Result<&mut Clip> {
        self.clips
            .get_mut(&handle)
            .ok_or_else(|| CarouselError::Playback(format!("unknown handle {}", handle.raw())))
    }
}

impl AudioBackend for SimulatedBackend {
    fn prepare(&mut self, url: &str) -> snippets_carousel::Result<ResourceHandle> {
        if url.trim().is_empty() {
            return Err(CarouselError::ResourceLoad("empty URL".to_string()));
        }

        self.next_handle += 1;
        let handle = ResourceHandle::new(self.next_handle);

        let fails = self
            .settings
            .failing_urls
            .iter()
            .any(|fragment| url.contains(fragment.as_str()));
        let event = if fails {
            AudioEvent::LoadFailed {
                handle,
                reason: format!("simulated failure for {url}"),
            }
        } else {
            AudioEvent::Prepared { handle }
        };

        let timer = self.schedule(Duration::from_millis(self.settings.load_latency_ms), event);
        tracing::debug!(handle = handle.raw(), url, "simulated load started");

        self.clips.insert(
            handle,
            Clip {
                url: url.to_string(),
                timer: Some(timer),
                remaining: Duration::from_millis(self.settings.clip_length_ms),
                started: None,
            },
        );

        Ok(handle)
    }

    fn play(&mut self, handle: ResourceHandle) -> snippets_carousel::Result<()> {
        let clip = self.clip_mut(handle)?;
        if clip.started.is_some() {
            return Ok(());
        }

        clip.cancel_timer();
        clip.started = Some(Instant::now());
        let remaining = clip.remaining;
        tracing::info!(handle = handle.raw(), url = %clip.url, ?remaining, "simulated playback");

        let timer = self.schedule(remaining, AudioEvent::Finished { handle });
        self.clip_mut(handle)?.timer = Some(timer);
        Ok(())
    }

    fn pause(&mut self, handle: ResourceHandle) -> snippets_carousel::Result<()> {
        let clip = self.clip_mut(handle)?;
        if let Some(started) = clip.started.take() {
            clip.remaining = clip.remaining.saturating_sub(started.elapsed());
            clip.cancel_timer();
        }
        Ok(())
    }

    fn release(&mut self, handle: ResourceHandle) {
        if let Some(mut clip) = self.clips.remove(&handle) {
            clip.cancel_timer();
            tracing::debug!(handle = handle.raw(), "simulated clip released");
        }
    }
}

impl Drop for SimulatedBackend {
    fn drop(&mut self) {
        for clip in self.clips.values_mut() {
            clip.cancel_timer();
        }
    }
}
