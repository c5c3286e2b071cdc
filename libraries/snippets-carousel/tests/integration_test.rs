//! Integration tests for the carousel
//!
//! Drives the public `Carousel` API the way a host would: refreshes from the
//! feed, drags and taps, play/pause, and asynchronous backend notifications.

mod common;

use common::{deck, numbered_deck, prepared, Call, MockBackend, Probe};
use snippets_carousel::{
    AudioEvent, AudioEventOutcome, Carousel, CarouselConfig, CarouselError, CarouselEvent,
    GestureEvent, GesturePhase, PlaybackEvent, PlaybackSettings, PlaybackState, RotateCommand,
    VisualRole,
};
use snippets_core::{Card, CardId};

// ===== Helpers =====

fn carousel_with(config: CarouselConfig) -> (Carousel, Probe) {
    let (backend, probe) = MockBackend::new();
    (Carousel::new(config, Box::new(backend)), probe)
}

fn carousel() -> (Carousel, Probe) {
    carousel_with(CarouselConfig::default())
}

fn focused_id(carousel: &Carousel) -> String {
    carousel.focused_card().unwrap().id.as_str().to_string()
}

fn focus_lane(carousel: &Carousel) -> usize {
    carousel.buffer().unwrap().focus_lane()
}

fn swipe_left() -> GestureEvent {
    GestureEvent::end(-150.0, -900.0)
}

fn swipe_right() -> GestureEvent {
    GestureEvent::end(150.0, 900.0)
}

fn start_playing(carousel: &mut Carousel, probe: &Probe) {
    carousel.play().unwrap();
    carousel.handle_audio_event(prepared(probe));
    assert_eq!(carousel.playback_state(), &PlaybackState::Playing);
}

fn playback_states(events: &[CarouselEvent]) -> Vec<PlaybackState> {
    events
        .iter()
        .filter_map(|e| match e {
            CarouselEvent::Playback(PlaybackEvent::StateChanged { state, .. }) => Some(state.clone()),
            _ => None,
        })
        .collect()
}

// ===== Rotation =====

#[test]
fn five_cards_play_then_rotate_stops_without_autoplay() {
    let (mut carousel, probe) = carousel();
    carousel.replace_cards(numbered_deck(5));
    carousel.drain_events();

    carousel.play().unwrap();
    assert_eq!(carousel.playback_state(), &PlaybackState::Loading);
    carousel.handle_audio_event(prepared(&probe));
    assert_eq!(
        playback_states(&carousel.drain_events()),
        vec![PlaybackState::Loading, PlaybackState::Ready, PlaybackState::Playing]
    );

    assert!(carousel.rotate(1));

    // Paused, then released, in that order
    let calls = probe.calls();
    assert_eq!(&calls[calls.len() - 2..], &[Call::Pause(1), Call::Release(1)]);
    assert!(probe.live_handles().is_empty());

    assert_eq!(carousel.playback_state(), &PlaybackState::Idle);
    assert_eq!(focused_id(&carousel), "m1");
    assert_eq!(carousel.playback().bound_card(), Some(&CardId::new("m1")));

    // No auto-play on the new card
    assert_eq!(probe.prepare_count(), 1);

    carousel.play().unwrap();
    assert_eq!(probe.prepare_count(), 2);
    assert_eq!(
        probe.calls().last(),
        Some(&Call::Prepare("https://clips.example/m1.mp3".into()))
    );
}

#[test]
fn wraparound_in_both_directions() {
    let (mut carousel, _probe) = carousel();
    carousel.replace_cards(numbered_deck(4));

    carousel.apply(RotateCommand::Previous);
    assert_eq!(focused_id(&carousel), "m3");

    for _ in 0..5 {
        carousel.apply(RotateCommand::Next);
    }
    assert_eq!(focused_id(&carousel), "m0");
}

#[test]
fn swipes_on_focused_slot_rotate() {
    let (mut carousel, _probe) = carousel();
    carousel.replace_cards(numbered_deck(3));
    let lane = focus_lane(&carousel);

    assert_eq!(carousel.handle_gesture(lane, swipe_left()), Some(RotateCommand::Next));
    assert_eq!(focused_id(&carousel), "m1");

    assert_eq!(carousel.handle_gesture(lane, swipe_right()), Some(RotateCommand::Previous));
    assert_eq!(focused_id(&carousel), "m0");
}

#[test]
fn unfinished_drag_never_rotates() {
    let (mut carousel, _probe) = carousel();
    carousel.replace_cards(numbered_deck(3));
    let lane = focus_lane(&carousel);

    for phase in [GesturePhase::Begin, GesturePhase::Active] {
        let event = GestureEvent {
            translation: -200.0,
            velocity: -2000.0,
            phase,
        };
        assert_eq!(carousel.handle_gesture(lane, event), None);
    }
    assert_eq!(focused_id(&carousel), "m0");
}

#[test]
fn thresholds_come_from_config() {
    let mut config = CarouselConfig::default();
    config.gesture.min_velocity = 100.0;
    let (mut carousel, _probe) = carousel_with(config);
    carousel.replace_cards(numbered_deck(3));
    let lane = focus_lane(&carousel);

    // Too slow for the default policy, fast enough for this one
    assert_eq!(
        carousel.handle_gesture(lane, GestureEvent::end(-150.0, -200.0)),
        Some(RotateCommand::Next)
    );
}

#[test]
fn tap_on_receding_card_jumps_to_it() {
    let (mut carousel, _probe) = carousel();
    carousel.replace_cards(numbered_deck(5));
    let lane = focus_lane(&carousel);

    assert_eq!(carousel.tap(lane + 3), Some(RotateCommand::Jump(3)));
    assert_eq!(focused_id(&carousel), "m3");
}

#[test]
fn window_keeps_one_focused_slot_through_rotations() {
    let (mut carousel, _probe) = carousel();
    carousel.replace_cards(numbered_deck(4));

    for steps in [1, 1, -3, 7, -2] {
        carousel.rotate(steps);
        let window = carousel.window();
        assert_eq!(window.len(), 12);

        let focused: Vec<_> = window.iter().filter(|s| s.role.is_focused()).collect();
        assert_eq!(focused.len(), 1);
        assert_eq!(focused[0].card.id.as_str(), focused_id(&carousel));

        let receding = window
            .iter()
            .filter(|s| matches!(s.role, VisualRole::Receding(_)))
            .count();
        assert_eq!(receding, 3);
    }
}

#[test]
fn receding_transforms_shrink_with_depth() {
    let (mut carousel, _probe) = carousel();
    carousel.replace_cards(numbered_deck(4));

    let window = carousel.window();
    let lane = focus_lane(&carousel);
    let scales: Vec<f32> = (lane..lane + 4)
        .map(|i| carousel.transform(&window[i]).scale)
        .collect();

    assert!(scales.windows(2).all(|w| w[0] > w[1]));
    let z: Vec<i32> = (lane..lane + 4)
        .map(|i| carousel.transform(&window[i]).z_index)
        .collect();
    assert!(z.windows(2).all(|w| w[0] > w[1]));
}

// ===== Refresh =====

#[test]
fn refresh_keeps_focused_card_at_new_position() {
    let (mut carousel, probe) = carousel();
    carousel.replace_cards(deck(&["c", "b", "a"]));
    carousel.rotate(1);
    assert_eq!(focused_id(&carousel), "b");
    start_playing(&mut carousel, &probe);
    carousel.drain_events();

    // A new message lands at the front
    carousel.replace_cards(deck(&["d", "c", "b", "a"]));

    assert_eq!(focused_id(&carousel), "b");
    assert_eq!(carousel.playback_state(), &PlaybackState::Playing);
    assert_eq!(
        carousel.drain_events(),
        vec![CarouselEvent::CardsReplaced {
            count: 4,
            focus_preserved: true
        }]
    );
}

#[test]
fn refresh_without_focused_card_resets_to_first() {
    let (mut carousel, probe) = carousel();
    carousel.replace_cards(deck(&["c", "b", "a"]));
    carousel.rotate(2);
    start_playing(&mut carousel, &probe);
    carousel.drain_events();

    carousel.replace_cards(deck(&["z", "y"]));

    assert_eq!(focused_id(&carousel), "z");
    assert_eq!(carousel.buffer().unwrap().offset(), 0);
    assert_eq!(carousel.playback_state(), &PlaybackState::Idle);
    assert!(probe.live_handles().is_empty());

    let events = carousel.drain_events();
    assert!(events.contains(&CarouselEvent::FocusChanged {
        card_id: CardId::new("z"),
        previous: Some(CardId::new("a")),
    }));
}

#[test]
fn refresh_alone_never_moves_focus() {
    let (mut carousel, _probe) = carousel();
    carousel.replace_cards(deck(&["b", "a"]));
    carousel.rotate(1);
    carousel.drain_events();

    // Same cards, updated like counts
    let mut refreshed = deck(&["b", "a"]);
    refreshed[1].like_count = 3;
    carousel.replace_cards(refreshed);

    assert_eq!(focused_id(&carousel), "a");
    assert!(!carousel
        .drain_events()
        .iter()
        .any(|e| matches!(e, CarouselEvent::FocusChanged { .. })));
}

#[test]
fn emptied_feed_hides_and_releases() {
    let (mut carousel, probe) = carousel();
    carousel.replace_cards(numbered_deck(2));
    start_playing(&mut carousel, &probe);

    carousel.replace_cards(Vec::new());

    assert!(carousel.is_hidden());
    assert!(probe.live_handles().is_empty());
    assert!(matches!(carousel.play(), Err(CarouselError::NoFocusedCard)));

    // Coming back shows the newest card again
    carousel.replace_cards(numbered_deck(2));
    assert_eq!(focused_id(&carousel), "m0");
}

// ===== Single card =====

#[test]
fn single_card_is_always_focused_and_still_plays() {
    let (mut carousel, probe) = carousel();
    carousel.replace_cards(deck(&["solo"]));
    let lane = focus_lane(&carousel);

    assert_eq!(carousel.handle_gesture(lane, swipe_left()), None);
    assert_eq!(carousel.handle_gesture(lane, swipe_right()), None);
    assert!(!carousel.rotate(3));
    assert_eq!(focused_id(&carousel), "solo");

    let window = carousel.window();
    assert_eq!(window.len(), 3);
    assert_eq!(window[lane].role, VisualRole::Focused);

    start_playing(&mut carousel, &probe);
    carousel.toggle_playback().unwrap();
    assert_eq!(carousel.playback_state(), &PlaybackState::Paused);
}

// ===== Playback =====

#[test]
fn late_load_after_focus_moved_is_discarded() {
    let (mut carousel, probe) = carousel();
    carousel.replace_cards(numbered_deck(3));

    carousel.play().unwrap();
    let stale = probe.last_handle().unwrap();
    carousel.rotate(1);

    assert_eq!(
        carousel.handle_audio_event(AudioEvent::Prepared { handle: stale }),
        AudioEventOutcome::DiscardedStale
    );
    assert_eq!(
        carousel.handle_audio_event(AudioEvent::Finished { handle: stale }),
        AudioEventOutcome::DiscardedStale
    );
    assert_eq!(carousel.playback_state(), &PlaybackState::Idle);
    assert!(probe.live_handles().is_empty());
}

#[test]
fn failed_load_can_be_retried() {
    let (backend, probe) = MockBackend::new();
    let backend = backend.fail_urls_containing("broken");
    let mut carousel = Carousel::new(CarouselConfig::default(), Box::new(backend));
    carousel.replace_cards(vec![
        Card::new("broken", "Song", "Artist").with_audio("https://clips.example/broken.mp3")
    ]);

    carousel.play().unwrap();
    assert!(matches!(carousel.playback_state(), PlaybackState::Failed(_)));
    assert!(carousel
        .drain_events()
        .iter()
        .any(|e| matches!(e, CarouselEvent::Playback(PlaybackEvent::Failed { .. }))));

    carousel.play().unwrap();
    assert_eq!(probe.prepare_count(), 2);
}

#[test]
fn natural_finish_releases_and_allows_replay() {
    let (mut carousel, probe) = carousel();
    carousel.replace_cards(numbered_deck(2));
    start_playing(&mut carousel, &probe);
    carousel.drain_events();

    let handle = probe.last_handle().unwrap();
    carousel.handle_audio_event(AudioEvent::Finished { handle });

    assert_eq!(carousel.playback_state(), &PlaybackState::Idle);
    assert!(probe.live_handles().is_empty());
    assert_eq!(
        playback_states(&carousel.drain_events()),
        vec![PlaybackState::Finished, PlaybackState::Idle]
    );

    carousel.play().unwrap();
    assert_eq!(carousel.playback_state(), &PlaybackState::Loading);
}

#[test]
fn card_without_audio_cannot_play() {
    let (mut carousel, probe) = carousel();
    carousel.replace_cards(vec![Card::new("quiet", "Song", "Artist")]);

    assert!(matches!(carousel.play(), Err(CarouselError::NoAudio(_))));
    assert_eq!(probe.prepare_count(), 0);
    assert_eq!(carousel.playback_state(), &PlaybackState::Idle);
}

#[test]
fn preload_prepares_on_focus_but_waits_for_play() {
    let config = CarouselConfig {
        playback: PlaybackSettings {
            preload_on_focus: true,
            audio_api_key: Some("k".into()),
        },
        ..Default::default()
    };
    let (mut carousel, probe) = carousel_with(config);
    carousel.replace_cards(numbered_deck(3));

    assert_eq!(
        probe.calls(),
        vec![Call::Prepare("https://clips.example/m0.mp3?apikey=k".into())]
    );
    carousel.handle_audio_event(prepared(&probe));
    assert_eq!(carousel.playback_state(), &PlaybackState::Ready);

    // Moving on releases the preloaded clip and preloads the next one
    carousel.rotate(1);
    assert_eq!(probe.live_handles(), vec![2]);
    assert_eq!(carousel.playback_state(), &PlaybackState::Loading);
}

#[test]
fn like_requests_are_forwarded() {
    let (mut carousel, _probe) = carousel();
    carousel.replace_cards(numbered_deck(2));
    carousel.drain_events();

    carousel.toggle_like(&CardId::new("m1")).unwrap();
    assert_eq!(
        carousel.drain_events(),
        vec![CarouselEvent::LikeToggleRequested {
            card_id: CardId::new("m1"),
            currently_liked: false,
        }]
    );
}
