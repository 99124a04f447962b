// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choreography: sequences of fade, scale, and translate steps driven by frame time.
//!
//! ## Overview
//!
//! An [`Animation`] is a list of [`AnimationStep`]s played back to back, optionally after a
//! start delay and optionally looping. An [`AnimationRunner`] binds one to an
//! [`AnimationTarget`] and turns elapsed time into [`Transform`]s via [`AnimationRunner::tick`].
//!
//! Steps write only the transform channel they animate. A step that has not started yet
//! leaves the channel as the previous steps (or the initial transform) set it; a finished step
//! holds its end value.
//!
//! [`Technique`] names the canned pointer choreographies.
//!
//! ```
//! use core::time::Duration;
//! use understory_tour::animation::{Animation, AnimationRunner, AnimationStep};
//! use understory_tour::host::{AnimationTarget, LayerId};
//!
//! let fade = Animation::new().then(AnimationStep::fade(0.0, 1.0, Duration::from_millis(100)));
//! let mut runner = AnimationRunner::new(fade, AnimationTarget::Layer(LayerId(1)));
//! runner.start();
//! let frame = runner.tick(Duration::from_millis(50)).unwrap();
//! assert!((frame.transform.alpha - 0.5).abs() < 1e-9);
//! assert!(runner.tick(Duration::from_millis(50)).unwrap().finished);
//! ```

use core::time::Duration;

use kurbo::Vec2;

use crate::host::{AnimationTarget, ScreenMetrics, Transform};

/// One segment of a choreography.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationStep {
    /// Interpolate opacity.
    Fade {
        /// Start opacity.
        from: f64,
        /// End opacity.
        to: f64,
        /// Length of the step.
        duration: Duration,
    },
    /// Interpolate uniform scale.
    Scale {
        /// Start scale.
        from: f64,
        /// End scale.
        to: f64,
        /// Length of the step.
        duration: Duration,
    },
    /// Translate from the laid-out position by up to `by`.
    Translate {
        /// Final translation.
        by: Vec2,
        /// Length of the step.
        duration: Duration,
    },
    /// Hold the current transform.
    Delay(Duration),
    /// Play every child from the same start; lasts as long as the longest child.
    Together(Vec<AnimationStep>),
}

impl AnimationStep {
    /// A fade step.
    pub const fn fade(from: f64, to: f64, duration: Duration) -> Self {
        Self::Fade { from, to, duration }
    }

    /// A scale step.
    pub const fn scale(from: f64, to: f64, duration: Duration) -> Self {
        Self::Scale { from, to, duration }
    }

    /// A translate step.
    pub const fn translate(by: Vec2, duration: Duration) -> Self {
        Self::Translate { by, duration }
    }

    /// How long the step runs.
    pub fn duration(&self) -> Duration {
        match self {
            Self::Fade { duration, .. }
            | Self::Scale { duration, .. }
            | Self::Translate { duration, .. }
            | Self::Delay(duration) => *duration,
            Self::Together(steps) => steps
                .iter()
                .map(Self::duration)
                .max()
                .unwrap_or(Duration::ZERO),
        }
    }

    fn apply(&self, local: Duration, transform: &mut Transform) {
        match self {
            Self::Fade { from, to, duration } => {
                transform.alpha = lerp(*from, *to, progress(local, *duration));
            }
            Self::Scale { from, to, duration } => {
                transform.scale = lerp(*from, *to, progress(local, *duration));
            }
            Self::Translate { by, duration } => {
                transform.translation = *by * progress(local, *duration);
            }
            Self::Delay(_) => {}
            Self::Together(steps) => {
                for step in steps {
                    step.apply(local, transform);
                }
            }
        }
    }
}

fn progress(local: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (local.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// A sequence of steps with a start delay and an optional loop.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    steps: Vec<AnimationStep>,
    start_delay: Duration,
    looping: bool,
    initial: Transform,
}

impl Default for Animation {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation {
    /// An empty, non-looping animation starting from [`Transform::IDENTITY`].
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            start_delay: Duration::ZERO,
            looping: false,
            initial: Transform::IDENTITY,
        }
    }

    /// A single fade.
    pub fn fade(from: f64, to: f64, duration: Duration) -> Self {
        Self::new().then(AnimationStep::fade(from, to, duration))
    }

    /// Append a step.
    #[must_use]
    pub fn then(mut self, step: AnimationStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Wait before the first step; the initial transform holds meanwhile.
    #[must_use]
    pub fn start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    /// Restart the steps forever once they complete. The start delay is not repeated.
    #[must_use]
    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    /// Transform applied before the first step.
    #[must_use]
    pub fn starting_from(mut self, initial: Transform) -> Self {
        self.initial = initial;
        self
    }

    /// The steps.
    pub fn steps(&self) -> &[AnimationStep] {
        &self.steps
    }

    /// Whether the steps repeat.
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Length of one pass over the steps.
    pub fn cycle(&self) -> Duration {
        self.steps.iter().map(AnimationStep::duration).sum()
    }

    /// Start delay plus one pass over the steps.
    pub fn duration(&self) -> Duration {
        self.start_delay + self.cycle()
    }

    /// Transform at `elapsed` since start, and whether playback is over.
    pub fn sample(&self, elapsed: Duration) -> (Transform, bool) {
        let mut transform = self.initial;
        let Some(t) = elapsed.checked_sub(self.start_delay) else {
            return (transform, false);
        };
        let cycle = self.cycle();
        let (local, finished) = if self.looping && !cycle.is_zero() {
            let rem = t.as_nanos() % cycle.as_nanos();
            (Duration::from_nanos(u64::try_from(rem).unwrap_or(0)), false)
        } else {
            (t.min(cycle), t >= cycle)
        };
        let mut cursor = Duration::ZERO;
        for step in &self.steps {
            if local < cursor {
                break;
            }
            step.apply(local - cursor, &mut transform);
            cursor += step.duration();
        }
        (transform, finished)
    }
}

/// Playback state of a runner.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// Created, not started.
    Idle,
    /// Advancing on every tick.
    Playing,
    /// Reached the end; looping animations never get here.
    Finished,
}

/// One transform to apply.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    /// What to apply it to.
    pub target: AnimationTarget,
    /// The transform.
    pub transform: Transform,
    /// Whether this is the last frame.
    pub finished: bool,
}

/// Plays an [`Animation`] on a target.
#[derive(Clone, Debug)]
pub struct AnimationRunner {
    animation: Animation,
    target: AnimationTarget,
    elapsed: Duration,
    state: PlaybackState,
}

impl AnimationRunner {
    /// Bind `animation` to `target`, idle.
    pub fn new(animation: Animation, target: AnimationTarget) -> Self {
        Self {
            animation,
            target,
            elapsed: Duration::ZERO,
            state: PlaybackState::Idle,
        }
    }

    /// Start, or restart, from the beginning.
    pub fn start(&mut self) {
        self.elapsed = Duration::ZERO;
        self.state = PlaybackState::Playing;
    }

    /// Retarget; takes effect on the next tick.
    pub fn set_target(&mut self, target: AnimationTarget) {
        self.target = target;
    }

    /// The current target.
    pub fn target(&self) -> AnimationTarget {
        self.target
    }

    /// Length of one run, including the start delay.
    pub fn duration(&self) -> Duration {
        self.animation.duration()
    }

    /// Playback state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether playback ended.
    pub fn is_finished(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    /// The frame for the current position without advancing, if playing.
    pub fn current(&self) -> Option<Frame> {
        if self.state != PlaybackState::Playing {
            return None;
        }
        let (transform, finished) = self.animation.sample(self.elapsed);
        Some(Frame {
            target: self.target,
            transform,
            finished,
        })
    }

    /// Advance by `dt` and return the frame to apply. `None` unless playing.
    pub fn tick(&mut self, dt: Duration) -> Option<Frame> {
        if self.state != PlaybackState::Playing {
            return None;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        let frame = self.current()?;
        if frame.finished {
            self.state = PlaybackState::Finished;
        }
        Some(frame)
    }
}

/// Canned pointer choreographies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Technique {
    /// Pulse on the target as if tapping it.
    #[default]
    Click,
    /// Sweep toward the left edge.
    HorizontalLeft,
    /// Sweep toward the right edge.
    HorizontalRight,
    /// Sweep toward the top edge.
    VerticalUpward,
    /// Sweep toward the bottom edge.
    VerticalDownward,
}

const STEP: Duration = Duration::from_millis(800);
const CLICK_REST: Duration = Duration::from_millis(1000);
const SWEEP: Duration = Duration::from_millis(2000);
const PRESSED: f64 = 0.85;

impl Technique {
    /// The looping pointer animation for this technique.
    ///
    /// `tooltip_enter` is the tooltip's enter animation length; the click pulse waits for it so
    /// the pointer appears once the tooltip is in place.
    pub fn choreography(self, screen: &ScreenMetrics, tooltip_enter: Duration) -> Animation {
        let half_w = f64::from(screen.width) / 2.0;
        let half_h = f64::from(screen.height) / 2.0;
        let sweep = |by: Vec2| {
            Animation::new()
                .then(AnimationStep::fade(0.0, 1.0, STEP))
                .then(AnimationStep::scale(1.0, PRESSED, STEP))
                .then(AnimationStep::Together(vec![
                    AnimationStep::translate(by, SWEEP),
                    AnimationStep::fade(1.0, 0.0, SWEEP),
                ]))
                .looping()
        };
        match self {
            Self::Click => Animation::new()
                .starting_from(Transform {
                    alpha: 0.0,
                    ..Transform::IDENTITY
                })
                .start_delay(tooltip_enter)
                .then(AnimationStep::fade(0.0, 1.0, STEP))
                .then(AnimationStep::scale(1.0, PRESSED, STEP))
                .then(AnimationStep::Together(vec![
                    AnimationStep::scale(PRESSED, 1.0, STEP),
                    AnimationStep::fade(1.0, 0.0, STEP),
                ]))
                .then(AnimationStep::Delay(CLICK_REST))
                .looping(),
            Self::HorizontalLeft => sweep(Vec2::new(-half_w, 0.0)),
            Self::HorizontalRight => sweep(Vec2::new(half_w, 0.0)),
            Self::VerticalUpward => sweep(Vec2::new(0.0, -half_h)),
            Self::VerticalDownward => sweep(Vec2::new(0.0, half_h)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::LayerId;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    const SCREEN: ScreenMetrics = ScreenMetrics::new(1000, 2000, 1.0);

    #[test]
    fn together_lasts_as_long_as_its_longest_child() {
        let step = AnimationStep::Together(vec![
            AnimationStep::fade(0.0, 1.0, ms(300)),
            AnimationStep::Delay(ms(700)),
        ]);
        assert_eq!(step.duration(), ms(700));
        assert_eq!(AnimationStep::Together(vec![]).duration(), Duration::ZERO);
    }

    #[test]
    fn later_steps_hold_earlier_values() {
        let a = Animation::new()
            .then(AnimationStep::fade(0.0, 1.0, ms(100)))
            .then(AnimationStep::scale(1.0, 0.5, ms(100)));
        let (t, done) = a.sample(ms(150));
        assert!(close(t.alpha, 1.0), "fade holds its end value");
        assert!(close(t.scale, 0.75), "scale is halfway");
        assert!(!done, "one pass is 200ms");
        let (t, done) = a.sample(ms(500));
        assert!(close(t.scale, 0.5), "scale holds its end value");
        assert!(done, "past the end");
    }

    #[test]
    fn start_delay_holds_the_initial_transform() {
        let a = Technique::Click.choreography(&SCREEN, ms(1000));
        assert_eq!(a.duration(), ms(1000) + ms(3400));
        let (t, done) = a.sample(ms(500));
        assert!(close(t.alpha, 0.0), "pointer hidden while the tooltip enters");
        assert!(!done, "looping animations never finish");
        let (t, _) = a.sample(ms(1400));
        assert!(close(t.alpha, 0.5), "fading in");
    }

    #[test]
    fn click_pulse_loops() {
        let a = Technique::Click.choreography(&SCREEN, Duration::ZERO);
        assert!(a.is_looping());
        assert_eq!(a.cycle(), ms(3400));
        let (t, _) = a.sample(ms(1600));
        assert!(close(t.scale, PRESSED), "pressed after the scale step");
        let (t, _) = a.sample(ms(2400));
        assert!(close(t.scale, 1.0), "released");
        assert!(close(t.alpha, 0.0), "faded out");
        let (t, _) = a.sample(ms(3400 + 400));
        assert!(close(t.alpha, 0.5), "second pass fades in again");
    }

    #[test]
    fn sweeps_mirror_each_other() {
        let at_end = |tech: Technique| {
            tech.choreography(&SCREEN, Duration::ZERO)
                .sample(ms(3599))
                .0
        };
        let left = at_end(Technique::HorizontalLeft);
        let right = at_end(Technique::HorizontalRight);
        let up = at_end(Technique::VerticalUpward);
        let down = at_end(Technique::VerticalDownward);
        assert!(left.translation.x < -499.0, "{left:?}");
        assert!(close(left.translation.x, -right.translation.x), "horizontal mirror");
        assert!(up.translation.y < -999.0, "{up:?}");
        assert!(close(up.translation.y, -down.translation.y), "vertical mirror");
        assert!(close(up.translation.x, 0.0), "vertical sweeps stay in column");
    }

    #[test]
    fn runner_reports_the_last_frame_once() {
        let mut r = AnimationRunner::new(
            Animation::fade(1.0, 0.0, ms(100)),
            AnimationTarget::Layer(LayerId(3)),
        );
        assert_eq!(r.tick(ms(10)), None, "idle runners produce nothing");
        r.start();
        let f = r.tick(ms(40)).unwrap();
        assert!(close(f.transform.alpha, 0.6), "{f:?}");
        assert!(!f.finished, "still running");
        let f = r.tick(ms(200)).unwrap();
        assert!(f.finished, "ran past the end");
        assert!(close(f.transform.alpha, 0.0), "{f:?}");
        assert!(r.is_finished(), "state follows the last frame");
        assert_eq!(r.tick(ms(10)), None, "finished runners produce nothing");
    }

    #[test]
    fn retargeting_applies_to_the_next_frame() {
        let mut r = AnimationRunner::new(
            Animation::fade(0.0, 1.0, ms(100)),
            AnimationTarget::Layer(LayerId(1)),
        );
        r.start();
        r.set_target(AnimationTarget::Layer(LayerId(2)));
        assert_eq!(r.tick(ms(1)).unwrap().target, AnimationTarget::Layer(LayerId(2)));
    }

    #[test]
    fn empty_animation_finishes_immediately() {
        let mut r = AnimationRunner::new(Animation::new(), AnimationTarget::Layer(LayerId(1)));
        r.start();
        let f = r.tick(Duration::ZERO).unwrap();
        assert!(f.finished, "nothing to play");
        assert_eq!(f.transform, Transform::IDENTITY);
    }
}
