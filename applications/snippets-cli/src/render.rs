/// Terminal rendering of the carousel
use serde::Serialize;
use snippets_carousel::{Carousel, CarouselEvent, PlaybackState, SlotTransform, VisualRole};
use snippets_core::CardId;

/// Serializable snapshot of what the UI would draw
#[derive(Debug, Clone, Serialize)]
pub struct WindowView {
    pub offset: i64,
    /// Signed steps of the latest rotation; 0 after a refresh
    pub last_step: i64,
    pub focus_lane: usize,
    pub playback: PlaybackState,
    pub slots: Vec<SlotView>,
    pub lyrics: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotView {
    pub lane: usize,
    pub animation_key: usize,
    pub role: VisualRole,
    pub weight: f32,
    pub card_id: CardId,
    pub caption: String,
    pub liked: bool,
    pub like_count: u32,
    pub transform: SlotTransform,
}

/// Snapshot of the current window; None while the carousel is hidden
pub fn window_view(carousel: &Carousel) -> Option<WindowView> {
    let buffer = carousel.buffer()?;
    let focused = carousel.focused_card()?;

    let slots = carousel
        .window()
        .iter()
        .map(|slot| SlotView {
            lane: slot.linear_index,
            animation_key: slot.animation_key,
            role: slot.role,
            weight: slot.weight,
            card_id: slot.card.id.clone(),
            caption: slot.card.caption(),
            liked: slot.card.liked_by_current_user,
            like_count: slot.card.like_count,
            transform: carousel.transform(slot),
        })
        .collect();

    Some(WindowView {
        offset: buffer.offset(),
        last_step: buffer.last_step(),
        focus_lane: buffer.focus_lane(),
        playback: carousel.playback_state().clone(),
        slots,
        lyrics: focused
            .visible_lyrics()
            .iter()
            .map(|line| (*line).to_string())
            .collect(),
    })
}

/// Human-readable window, visible slots only
pub fn render_text(view: &WindowView) -> String {
    let mut lines = vec![format!(
        "offset {} ({:+})  playback {}",
        view.offset,
        view.last_step,
        playback_label(&view.playback)
    )];

    lines.extend(view.slots.iter().filter(|s| s.role.is_visible()).map(|slot| {
        let marker = if slot.role.is_focused() { '>' } else { ' ' };
        let heart = if slot.liked { "♥" } else { "♡" };
        format!(
            "{} lane {:>2}  key {:>2}  {:<12} {:.2}  {} {} {}",
            marker,
            slot.lane,
            slot.animation_key,
            role_label(slot.role),
            slot.weight,
            slot.caption,
            heart,
            slot.like_count
        )
    }));

    lines.extend(view.lyrics.iter().map(|line| format!("    | {line}")));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// One line per event
pub fn render_event(event: &CarouselEvent) -> String {
    match event {
        CarouselEvent::CardsReplaced {
            count,
            focus_preserved,
        } => format!("cards replaced: {count} (focus preserved: {focus_preserved})"),
        CarouselEvent::CarouselHidden => "carousel hidden".to_string(),
        CarouselEvent::Rotated { steps, offset } => format!("rotated {steps:+} -> offset {offset}"),
        CarouselEvent::FocusChanged { card_id, previous } => match previous {
            Some(previous) => format!("focus {previous} -> {card_id}"),
            None => format!("focus {card_id}"),
        },
        CarouselEvent::Playback(event) => format!("playback {event:?}"),
        CarouselEvent::LikeToggleRequested {
            card_id,
            currently_liked,
        } => format!(
            "{} requested for {card_id}",
            if *currently_liked { "unlike" } else { "like" }
        ),
    }
}

fn role_label(role: VisualRole) -> String {
    match role {
        VisualRole::OffLeft => "off-left".to_string(),
        VisualRole::Focused => "focused".to_string(),
        VisualRole::Receding(depth) => format!("receding({depth})"),
        VisualRole::OffRight => "off-right".to_string(),
    }
}

fn playback_label(state: &PlaybackState) -> String {
    match state {
        PlaybackState::Failed(reason) => format!("failed ({reason})"),
        other => format!("{other:?}").to_lowercase(),
    }
}
