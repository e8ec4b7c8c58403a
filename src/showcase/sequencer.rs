use super::easing::{lerp, Easing};
use super::{ElementArena, ElementId, Layer, PollState};
use std::time::Instant;

const TEXT_OUT_DURATION: f32 = 0.3;
const TEXT_OUT_STAGGER: f32 = 0.05;
const IMAGE_SLIDE_DURATION: f32 = 0.5;
const IMAGE_SLIDE_OVERLAP: f32 = 0.2;
const TEXT_IN_DURATION: f32 = 0.4;
const TEXT_IN_STAGGER: f32 = 0.08;
const TEXT_IN_OVERLAP: f32 = 0.2;
const SCRAMBLE_LEAD: f32 = 0.1;
const TEXT_RISE: f32 = 30.0;
const OFFSTAGE: f32 = 100.0;

/// Everything a transition needs, resolved to arena handles up front. No
/// string-keyed lookup happens after construction.
#[derive(Debug)]
pub(crate) struct TransitionSpec {
    pub from_portrait: ElementId,
    pub to_portrait: ElementId,
    pub from_left: ElementId,
    pub to_left: ElementId,
    pub from_right: ElementId,
    pub to_right: ElementId,
    /// Outgoing text elements, left panel first, in stagger order.
    pub from_text: Vec<ElementId>,
    /// Incoming text elements, left panel first, in stagger order.
    pub to_text: Vec<ElementId>,
    pub to_index: usize,
    pub scrolling_down: bool,
}

#[derive(Debug)]
enum StepOp {
    /// Tween opacity and vertical rise between the given endpoints.
    FadeRise { target: ElementId, opacity: (f32, f32), rise: (f32, f32) },
    /// Tween horizontal translation (percent of stage width).
    Slide { target: ElementId, from: f32, to: f32 },
    /// Instantly position the incoming portrait off-stage, fully visible,
    /// above the outgoing one.
    Place { target: ElementId, translate: f32 },
    /// Hand the incoming headline to the scramble effect.
    TriggerScramble { slot: usize },
    /// Park the outgoing portrait at its exit coordinate, hidden, below the
    /// active portrait.
    Reset { target: ElementId, translate: f32 },
}

#[derive(Debug)]
struct Step {
    start: f32,
    duration: f32,
    easing: Easing,
    fired: bool,
    op: StepOp,
}

impl Step {
    fn timed(start: f32, duration: f32, easing: Easing, op: StepOp) -> Self {
        Self { start, duration, easing, fired: false, op }
    }

    fn instant(start: f32, op: StepOp) -> Self {
        Self { start, duration: 0.0, easing: Easing::Linear, fired: false, op }
    }

    fn end(&self) -> f32 {
        self.start + self.duration
    }
}

/// Result of advancing the sequencer by one poll.
#[derive(Debug)]
pub(crate) struct SequencerPoll {
    pub state: PollState,
    /// Slot whose headline should start scrambling, if that step fired.
    pub scramble: Option<usize>,
}

/// Plays the fixed transition timeline against a monotonic clock.
///
/// The timeline is an explicit list of steps with `(start, duration, easing)`
/// offsets; relative ordering and overlaps are duration-based, never
/// frame-based. Completion is reported exactly once, including for the
/// missing-element no-op case.
#[derive(Debug)]
pub(crate) struct TransitionSequencer {
    steps: Vec<Step>,
    started: Instant,
    total: f32,
    time_scale: f32,
    completed: bool,
}

impl TransitionSequencer {
    pub(crate) fn new(
        spec: TransitionSpec,
        arena: &ElementArena,
        time_scale: f32,
        now: Instant,
    ) -> Self {
        let required = [
            spec.from_portrait,
            spec.to_portrait,
            spec.from_left,
            spec.to_left,
            spec.from_right,
            spec.to_right,
        ];
        if required.iter().any(|handle| arena.get(*handle).is_none()) {
            // A handle that doesn't resolve means a slot was never built;
            // resolve as a no-op rather than animating half a transition.
            log::debug!("transition to slot {} short-circuited: unresolved element", spec.to_index);
            return Self {
                steps: Vec::new(),
                started: now,
                total: 0.0,
                time_scale: time_scale.max(0.01),
                completed: false,
            };
        }

        let exit = if spec.scrolling_down { -OFFSTAGE } else { OFFSTAGE };
        let enter = -exit;
        let mut steps = Vec::new();

        for (position, target) in spec.from_text.iter().enumerate() {
            steps.push(Step::timed(
                position as f32 * TEXT_OUT_STAGGER,
                TEXT_OUT_DURATION,
                Easing::In,
                StepOp::FadeRise {
                    target: *target,
                    opacity: (1.0, 0.0),
                    rise: (0.0, -TEXT_RISE),
                },
            ));
        }

        steps.push(Step::timed(
            0.0,
            IMAGE_SLIDE_DURATION,
            Easing::InOut,
            StepOp::Slide { target: spec.from_portrait, from: 0.0, to: exit },
        ));

        let slide_in_start = IMAGE_SLIDE_DURATION - IMAGE_SLIDE_OVERLAP;
        steps.push(Step::instant(
            slide_in_start,
            StepOp::Place { target: spec.to_portrait, translate: enter },
        ));
        steps.push(Step::timed(
            slide_in_start,
            IMAGE_SLIDE_DURATION,
            Easing::InOut,
            StepOp::Slide { target: spec.to_portrait, from: enter, to: 0.0 },
        ));

        let text_in_start = slide_in_start + IMAGE_SLIDE_DURATION - TEXT_IN_OVERLAP;
        let mut text_in_end = text_in_start + TEXT_IN_DURATION;
        for (position, target) in spec.to_text.iter().enumerate() {
            let start = text_in_start + position as f32 * TEXT_IN_STAGGER;
            text_in_end = start + TEXT_IN_DURATION;
            steps.push(Step::timed(
                start,
                TEXT_IN_DURATION,
                Easing::Out,
                StepOp::FadeRise {
                    target: *target,
                    opacity: (0.0, 1.0),
                    rise: (TEXT_RISE, 0.0),
                },
            ));
        }

        steps.push(Step::instant(
            (text_in_end - SCRAMBLE_LEAD).max(0.0),
            StepOp::TriggerScramble { slot: spec.to_index },
        ));

        let total = steps.iter().map(Step::end).fold(0.0, f32::max);
        steps.push(Step::instant(total, StepOp::Reset { target: spec.from_portrait, translate: exit }));

        Self { steps, started: now, total, time_scale: time_scale.max(0.01), completed: false }
    }

    /// Total timeline length in time units (before time scaling).
    pub(crate) fn total_duration(&self) -> f32 {
        self.total
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.completed
    }

    /// Advance the timeline to `now`, writing element visuals into the arena.
    /// Returns `Done` exactly once, on the poll where the last step lands.
    pub(crate) fn poll(&mut self, arena: &mut ElementArena, now: Instant) -> SequencerPoll {
        if self.completed {
            return SequencerPoll { state: PollState::Unmodified, scramble: None };
        }

        let elapsed = now.saturating_duration_since(self.started).as_secs_f32() / self.time_scale;
        let mut modified = false;
        let mut scramble = None;

        for step in &mut self.steps {
            if step.fired || elapsed < step.start {
                continue;
            }
            if step.duration > 0.0 {
                let progress = ((elapsed - step.start) / step.duration).min(1.0);
                apply(&step.op, step.easing.apply(progress), arena);
                if progress >= 1.0 {
                    step.fired = true;
                }
            } else {
                if let StepOp::TriggerScramble { slot } = step.op {
                    scramble = Some(slot);
                } else {
                    apply(&step.op, 1.0, arena);
                }
                step.fired = true;
            }
            modified = true;
        }

        if elapsed >= self.total && self.steps.iter().all(|step| step.fired) {
            self.completed = true;
            return SequencerPoll { state: PollState::Done, scramble };
        }

        let state = if modified { PollState::Modified } else { PollState::Unmodified };
        SequencerPoll { state, scramble }
    }
}

fn apply(op: &StepOp, eased: f32, arena: &mut ElementArena) {
    match *op {
        StepOp::FadeRise { target, opacity, rise } => {
            if let Some(element) = arena.get_mut(target) {
                element.opacity = lerp(opacity.0, opacity.1, eased);
                element.rise = lerp(rise.0, rise.1, eased);
            }
        }
        StepOp::Slide { target, from, to } => {
            if let Some(element) = arena.get_mut(target) {
                element.translate = lerp(from, to, eased);
            }
        }
        StepOp::Place { target, translate } => {
            if let Some(element) = arena.get_mut(target) {
                element.translate = translate;
                element.opacity = 1.0;
                element.layer = Layer::Front;
            }
        }
        StepOp::Reset { target, translate } => {
            if let Some(element) = arena.get_mut(target) {
                element.translate = translate;
                element.opacity = 0.0;
                element.layer = Layer::Back;
            }
        }
        StepOp::TriggerScramble { .. } => {}
    }
}
