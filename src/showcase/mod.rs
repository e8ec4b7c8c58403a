pub(crate) mod easing;
pub(crate) mod mapper;
pub(crate) mod scramble;
pub(crate) mod sequencer;

use crate::options::Options;
use crate::roster::Character;
use mapper::ScrollMapper;
use scramble::{scramble_string, ScrambleEffect, Ticker};
use sequencer::{TransitionSequencer, TransitionSpec};
use std::time::{Duration, Instant};

/// Result of polling a clock-driven animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PollState {
    /// State changed; a redraw is needed.
    Modified,
    /// Nothing changed.
    Unmodified,
    /// The animation finished on this poll. Reported once.
    Done,
}

/// Stacking order for portrait slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layer {
    Back,
    Front,
}

/// Animated visual state for one on-screen element. Translation is a percent
/// of the stage width; rise is in the same abstract units the transition
/// tweens use (the renderer quantizes both).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Element {
    pub opacity: f32,
    pub rise: f32,
    pub translate: f32,
    pub layer: Layer,
}

impl Element {
    pub(crate) fn text() -> Self {
        Self { opacity: 1.0, rise: 0.0, translate: 0.0, layer: Layer::Back }
    }

    pub(crate) fn container() -> Self {
        Self::text()
    }

    /// Portraits start at rest for the first slot and parked off-stage to the
    /// right for everyone else.
    pub(crate) fn portrait(front: bool) -> Self {
        Self {
            opacity: 1.0,
            rise: 0.0,
            translate: if front { 0.0 } else { 100.0 },
            layer: if front { Layer::Front } else { Layer::Back },
        }
    }
}

/// Handle into the element arena. Obtained once at construction; there is no
/// string-keyed lookup anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ElementId(usize);

#[derive(Debug, Default)]
pub(crate) struct ElementArena {
    elements: Vec<Element>,
}

impl ElementArena {
    pub(crate) fn insert(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub(crate) fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }
}

/// Per-character bundle of element handles, one slot per roster entry.
#[derive(Debug, Clone)]
pub(crate) struct Slot {
    pub portrait: ElementId,
    pub left_container: ElementId,
    pub right_container: ElementId,
    pub headline: ElementId,
    pub title: ElementId,
    pub next_widget: ElementId,
    pub description: ElementId,
    pub tactical: ElementId,
    pub passive: ElementId,
    pub ultimate: ElementId,
}

impl Slot {
    /// Text elements in stagger order: left panel first, then right.
    fn text_elements(&self) -> Vec<ElementId> {
        vec![
            self.headline,
            self.title,
            self.next_widget,
            self.description,
            self.tactical,
            self.passive,
            self.ultimate,
        ]
    }
}

struct ActiveTransition {
    sequencer: TransitionSequencer,
    from: usize,
}

struct ScrambleTask {
    slot: usize,
    effect: ScrambleEffect,
    ticker: Ticker,
}

/// Top-level state container for the showcase. Owns the current index, the
/// cursor position, the in-flight flag, the element arena, and every active
/// animation; the renderer only ever reads from it.
pub(crate) struct Showcase {
    roster: &'static [Character],
    arena: ElementArena,
    slots: Vec<Slot>,
    /// Per-slot headline text. Starts as a frozen random scramble of each
    /// name; rewritten only while that slot's reveal is running.
    headlines: Vec<String>,
    mapper: ScrollMapper,
    current: usize,
    in_flight: bool,
    active: Option<ActiveTransition>,
    scrambles: Vec<ScrambleTask>,
    pending_initial: Option<Instant>,
    cursor: Option<(u16, u16)>,
    time_scale: f32,
    scramble_tick: Duration,
}

impl Showcase {
    pub(crate) fn new(
        roster: &'static [Character],
        viewport_rows: u16,
        options: &Options,
        now: Instant,
    ) -> Self {
        let mut arena = ElementArena::default();
        let mut slots = Vec::with_capacity(roster.len());
        for index in 0..roster.len() {
            slots.push(Slot {
                portrait: arena.insert(Element::portrait(index == 0)),
                left_container: arena.insert(Element::container()),
                right_container: arena.insert(Element::container()),
                headline: arena.insert(Element::text()),
                title: arena.insert(Element::text()),
                next_widget: arena.insert(Element::text()),
                description: arena.insert(Element::text()),
                tactical: arena.insert(Element::text()),
                passive: arena.insert(Element::text()),
                ultimate: arena.insert(Element::text()),
            });
        }
        let headlines = roster.iter().map(|character| scramble_string(character.name)).collect();

        Self {
            roster,
            arena,
            slots,
            headlines,
            mapper: ScrollMapper::new(roster.len(), viewport_rows),
            current: 0,
            in_flight: false,
            active: None,
            scrambles: Vec::new(),
            pending_initial: Some(now + Duration::from_millis(options.initial_scramble_delay_ms)),
            cursor: None,
            time_scale: options.time_scale,
            scramble_tick: Duration::from_millis(options.scramble_tick_ms.max(1)),
        }
    }

    /// Single point of re-entry for scroll input. Accumulates the offset,
    /// then samples the in-flight flag: while a transition is animating,
    /// index changes are ignored outright (no queueing, no interruption).
    pub(crate) fn handle_scroll(&mut self, delta_rows: f32, now: Instant) {
        self.mapper.scroll_by(delta_rows);
        if self.in_flight {
            return;
        }
        let target = self.mapper.index();
        if target != self.current {
            let scrolling_down = target > self.current;
            self.begin_transition(target, scrolling_down, now);
        }
    }

    fn begin_transition(&mut self, to: usize, scrolling_down: bool, now: Instant) {
        let from = self.current;
        log::debug!("transition {from} -> {to} (down: {scrolling_down})");
        let spec = TransitionSpec {
            from_portrait: self.slots[from].portrait,
            to_portrait: self.slots[to].portrait,
            from_left: self.slots[from].left_container,
            to_left: self.slots[to].left_container,
            from_right: self.slots[from].right_container,
            to_right: self.slots[to].right_container,
            from_text: self.slots[from].text_elements(),
            to_text: self.slots[to].text_elements(),
            to_index: to,
            scrolling_down,
        };
        let sequencer = TransitionSequencer::new(spec, &self.arena, self.time_scale, now);
        self.active = Some(ActiveTransition { sequencer, from });
        self.in_flight = true;
        self.current = to;
    }

    /// Advance every active animation to `now`. Returns true when anything
    /// changed and a redraw is due.
    pub(crate) fn poll(&mut self, now: Instant) -> bool {
        let mut modified = false;

        if let Some(deadline) = self.pending_initial {
            if now >= deadline {
                self.pending_initial = None;
                self.trigger_scramble(0, now);
                modified = true;
            }
        }

        let mut finished = false;
        let mut scramble_slot = None;
        if let Some(active) = self.active.as_mut() {
            let result = active.sequencer.poll(&mut self.arena, now);
            scramble_slot = result.scramble;
            match result.state {
                PollState::Done => {
                    finished = true;
                    modified = true;
                }
                PollState::Modified => modified = true,
                PollState::Unmodified => {}
            }
        }
        if let Some(slot) = scramble_slot {
            self.trigger_scramble(slot, now);
            modified = true;
        }
        if finished {
            log::debug!("transition complete, unlocking");
            self.active = None;
            self.in_flight = false;
        }

        let mut any_done = false;
        for task in &mut self.scrambles {
            let ticks = task.ticker.due_ticks(now);
            if ticks == 0 {
                continue;
            }
            modified = true;
            for _ in 0..ticks {
                if task.effect.tick() {
                    task.ticker.cancel();
                    any_done = true;
                    break;
                }
            }
            self.headlines[task.slot] = task.effect.display().to_string();
        }
        if any_done {
            self.scrambles.retain(|task| !task.effect.is_done());
        }

        modified
    }

    /// Start (or restart) the reveal on a slot's headline. A re-trigger
    /// replaces and stops the previous ticker for that slot.
    fn trigger_scramble(&mut self, slot: usize, now: Instant) {
        if let Some(existing) = self.scrambles.iter_mut().find(|task| task.slot == slot) {
            existing.ticker.cancel();
        }
        self.scrambles.retain(|task| task.slot != slot);

        let effect = ScrambleEffect::new(self.roster[slot].name);
        self.headlines[slot] = effect.display().to_string();
        log::debug!("scramble started for slot {slot}");
        self.scrambles.push(ScrambleTask {
            slot,
            effect,
            ticker: Ticker::new(self.scramble_tick, now),
        });
    }

    /// Latest pointer position wins; positions are applied at most once per
    /// painted frame because the renderer samples this snapshot.
    pub(crate) fn pointer_moved(&mut self, column: u16, row: u16) {
        self.cursor = Some((column, row));
    }

    pub(crate) fn resize(&mut self, viewport_rows: u16) {
        self.mapper.resize(viewport_rows);
    }

    /// Stop every scheduled task. Called on teardown so no ticker outlives
    /// the view.
    pub(crate) fn shutdown(&mut self) {
        for task in &mut self.scrambles {
            task.ticker.cancel();
        }
        self.scrambles.clear();
    }

    pub(crate) fn roster(&self) -> &'static [Character] {
        self.roster
    }

    pub(crate) fn current(&self) -> usize {
        self.current
    }

    pub(crate) fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// The slot animating out, while a transition is in flight.
    pub(crate) fn transition_from(&self) -> Option<usize> {
        self.active.as_ref().map(|active| active.from)
    }

    pub(crate) fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    pub(crate) fn headline(&self, slot: usize) -> &str {
        &self.headlines[slot]
    }

    pub(crate) fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub(crate) fn element(&self, id: ElementId) -> Option<&Element> {
        self.arena.get(id)
    }

    #[cfg(test)]
    fn active_scramble_count(&self) -> usize {
        self.scrambles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::CHARACTERS;

    const ROWS: u16 = 40;

    fn options() -> Options {
        Options::default()
    }

    fn showcase(now: Instant) -> Showcase {
        Showcase::new(CHARACTERS, ROWS, &options(), now)
    }

    /// Virtual scroll rows needed to land inside slot `index`.
    fn rows_to_reach(index: usize) -> f32 {
        let span = ROWS as f32 * (CHARACTERS.len() - 1) as f32 * 2.0;
        span * (index as f32 + 0.5) / CHARACTERS.len() as f32
    }

    fn settle(showcase: &mut Showcase, t0: Instant) -> Instant {
        // Drive the clock well past any transition plus a full scramble.
        let mut now = t0;
        for _ in 0..1000 {
            now += Duration::from_millis(10);
            showcase.poll(now);
        }
        now
    }

    #[test]
    fn test_initial_slot_placement() {
        let t0 = Instant::now();
        let showcase = showcase(t0);
        let first = showcase.element(showcase.slots()[0].portrait).unwrap();
        assert_eq!(first.translate, 0.0);
        assert_eq!(first.layer, Layer::Front);
        for slot in &showcase.slots()[1..] {
            let parked = showcase.element(slot.portrait).unwrap();
            assert_eq!(parked.translate, 100.0);
            assert_eq!(parked.layer, Layer::Back);
        }
    }

    #[test]
    fn test_initial_headlines_are_scrambled_to_length() {
        let t0 = Instant::now();
        let showcase = showcase(t0);
        for (index, character) in CHARACTERS.iter().enumerate() {
            let headline = showcase.headline(index);
            assert_eq!(headline.chars().count(), character.name.chars().count());
            assert!(headline.chars().all(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_initial_scramble_runs_after_delay() {
        let t0 = Instant::now();
        let mut showcase = showcase(t0);
        showcase.poll(t0 + Duration::from_millis(50));
        assert_eq!(showcase.active_scramble_count(), 0);

        showcase.poll(t0 + Duration::from_millis(150));
        assert_eq!(showcase.active_scramble_count(), 1);

        settle(&mut showcase, t0);
        assert_eq!(showcase.headline(0), CHARACTERS[0].name);
        assert_eq!(showcase.active_scramble_count(), 0);
    }

    #[test]
    fn test_scroll_starts_transition_and_sets_in_flight() {
        let t0 = Instant::now();
        let mut showcase = showcase(t0);
        showcase.handle_scroll(rows_to_reach(1), t0);
        assert!(showcase.in_flight());
        assert_eq!(showcase.current(), 1);
        assert_eq!(showcase.transition_from(), Some(0));
    }

    #[test]
    fn test_in_flight_flag_gates_reentry() {
        let t0 = Instant::now();
        let mut showcase = showcase(t0);
        showcase.handle_scroll(rows_to_reach(1), t0);
        assert_eq!(showcase.current(), 1);

        // More scrolling while animating: offset accumulates, index frozen.
        showcase.handle_scroll(rows_to_reach(4) - rows_to_reach(1), t0);
        assert_eq!(showcase.current(), 1);
        assert_eq!(showcase.transition_from(), Some(0));

        // After completion the next scroll event picks up the real position,
        // skipping the intermediate characters in one transition.
        let settled = settle(&mut showcase, t0);
        assert!(!showcase.in_flight());
        showcase.handle_scroll(0.0, settled);
        assert_eq!(showcase.current(), 4);
        assert!(showcase.in_flight());
    }

    #[test]
    fn test_transition_completion_unlocks() {
        let t0 = Instant::now();
        let mut showcase = showcase(t0);
        showcase.handle_scroll(rows_to_reach(1), t0);
        settle(&mut showcase, t0);
        assert!(!showcase.in_flight());
        assert_eq!(showcase.transition_from(), None);
    }

    #[test]
    fn test_transition_triggers_scramble_on_target() {
        let t0 = Instant::now();
        let mut showcase = showcase(t0);
        showcase.handle_scroll(rows_to_reach(1), t0);
        settle(&mut showcase, t0);
        assert_eq!(showcase.headline(1), CHARACTERS[1].name);
    }

    #[test]
    fn test_scroll_without_index_change_does_nothing() {
        let t0 = Instant::now();
        let mut showcase = showcase(t0);
        showcase.handle_scroll(1.0, t0);
        assert!(!showcase.in_flight());
        assert_eq!(showcase.current(), 0);
    }

    #[test]
    fn test_pointer_coalescing_keeps_latest() {
        let t0 = Instant::now();
        let mut showcase = showcase(t0);
        showcase.pointer_moved(3, 4);
        showcase.pointer_moved(10, 12);
        assert_eq!(showcase.cursor(), Some((10, 12)));
    }

    #[test]
    fn test_shutdown_cancels_tickers() {
        let t0 = Instant::now();
        let mut showcase = showcase(t0);
        showcase.poll(t0 + Duration::from_millis(150));
        assert_eq!(showcase.active_scramble_count(), 1);
        showcase.shutdown();
        assert_eq!(showcase.active_scramble_count(), 0);
    }

    #[test]
    fn test_headline_frozen_after_reveal() {
        let t0 = Instant::now();
        let mut showcase = showcase(t0);
        showcase.poll(t0 + Duration::from_millis(150));
        settle(&mut showcase, t0);
        let frozen = showcase.headline(0).to_string();
        showcase.poll(t0 + Duration::from_secs(60));
        assert_eq!(showcase.headline(0), frozen);
    }
}
