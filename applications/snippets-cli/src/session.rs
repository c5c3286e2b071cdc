/// Interactive carousel session
///
/// Owns the carousel, the feed it is refreshed from, and the receiving end
/// of the audio backend's notification channel. Everything runs on the
/// caller's task; audio events are forwarded only when the session is
/// pumped or waiting, which keeps carousel updates strictly sequential.
use crate::config::SnippetsConfig;
use crate::error::{CliError, Result};
use crate::feed::JsonFileFeed;
use crate::script::Step;
use crate::simulator::SimulatedBackend;
use snippets_carousel::{AudioEvent, Carousel, CarouselError, CarouselEvent, GestureEvent};
use snippets_core::deck::{cards_from_messages, DeckOptions};
use snippets_core::{CardId, ConversationId, MessageFeed, UserId};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub struct Session<F> {
    feed: F,
    conversation: ConversationId,
    current_user: Option<UserId>,
    deck: DeckOptions,
    carousel: Carousel,
    audio_events: mpsc::UnboundedReceiver<AudioEvent>,
}

impl Session<JsonFileFeed> {
    /// Open the configured feed file with a simulated audio backend
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn open(config: &SnippetsConfig) -> Result<Self> {
        let feed = JsonFileFeed::new(&config.feed.messages_path);
        let conversation = match &config.feed.conversation_id {
            Some(id) => ConversationId::new(id.as_str()),
            None => feed.default_conversation().await?,
        };

        Self::with_feed(config, feed, conversation)
    }
}

impl<F: MessageFeed> Session<F> {
    /// Session over any feed, with a simulated audio backend
    pub fn with_feed(config: &SnippetsConfig, feed: F, conversation: ConversationId) -> Result<Self> {
        let (backend, audio_events) = SimulatedBackend::new(config.simulator.clone())?;
        let carousel = Carousel::new(config.carousel.clone(), Box::new(backend));

        info!(conversation = %conversation, "session opened");

        Ok(Self {
            feed,
            conversation,
            current_user: config.feed.current_user.as_deref().map(UserId::new),
            deck: config.deck_options()?,
            carousel,
            audio_events,
        })
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    pub fn conversation(&self) -> &ConversationId {
        &self.conversation
    }

    /// Fetch the conversation and hand the newest cards to the carousel
    ///
    /// Returns whether the card list changed.
    pub async fn refresh(&mut self) -> Result<bool> {
        let messages = self.feed.conversation_messages(&self.conversation).await?;
        let users = self.feed.users().await?;

        let cards = cards_from_messages(&messages, &users, self.current_user.as_ref(), &self.deck);
        let changed = self.carousel.replace_cards(cards);
        debug!(messages = messages.len(), changed, "feed refreshed");

        Ok(changed)
    }

    /// Forward every audio event that has already arrived
    pub fn pump_audio(&mut self) -> usize {
        let mut forwarded = 0;
        while let Ok(event) = self.audio_events.try_recv() {
            self.carousel.handle_audio_event(event);
            forwarded += 1;
        }
        forwarded
    }

    /// Let `duration` pass, forwarding audio events as they arrive
    pub async fn wait(&mut self, duration: Duration) -> usize {
        let deadline = Instant::now() + duration;
        let mut forwarded = 0;

        loop {
            tokio::select! {
                () = tokio::time::sleep_until(deadline) => break,
                event = self.audio_events.recv() => match event {
                    Some(event) => {
                        self.carousel.handle_audio_event(event);
                        forwarded += 1;
                    }
                    None => {
                        tokio::time::sleep_until(deadline).await;
                        break;
                    }
                },
            }
        }

        forwarded
    }

    /// Apply one scripted input
    pub async fn run_step(&mut self, step: &Step) -> Result<()> {
        debug!(?step, "step");
        self.pump_audio();

        match step {
            Step::Refresh => {
                self.refresh().await?;
            }
            Step::Rotate { steps } => {
                self.carousel.rotate(*steps);
            }
            Step::Swipe {
                translation,
                velocity,
            } => {
                let Some(lane) = self.carousel.buffer().map(|b| b.focus_lane()) else {
                    warn!("swipe ignored: carousel hidden");
                    return Ok(());
                };
                if self
                    .carousel
                    .handle_gesture(lane, GestureEvent::end(*translation, *velocity))
                    .is_none()
                {
                    info!(translation, velocity, "swipe below threshold");
                }
            }
            Step::Tap { lane } => {
                self.carousel.tap(*lane);
            }
            Step::Play => self.control(Carousel::play),
            Step::Toggle => self.control(Carousel::toggle_playback),
            Step::Pause => self.carousel.pause(),
            Step::Like { card_id } => {
                let card_id = match card_id {
                    Some(id) => CardId::new(id.as_str()),
                    None => self
                        .carousel
                        .focused_card()
                        .map(|c| c.id.clone())
                        .ok_or(CliError::Carousel(CarouselError::NoFocusedCard))?,
                };
                self.carousel.toggle_like(&card_id)?;
            }
            Step::Wait { ms } => {
                self.wait(Duration::from_millis(*ms)).await;
            }
            Step::Show => {}
        }

        Ok(())
    }

    /// Queued carousel events
    pub fn drain_events(&mut self) -> Vec<CarouselEvent> {
        self.carousel.drain_events()
    }

    /// Play/pause failures are shown, not fatal
    fn control(&mut self, action: fn(&mut Carousel) -> snippets_carousel::Result<()>) {
        if let Err(e) = action(&mut self.carousel) {
            warn!(error = %e, "playback control rejected");
        }
    }
}
