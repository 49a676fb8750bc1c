//! Light intensity animation.
//!
//! A two-state machine (idle or animating) that eases the intensity toward
//! a target. Time is passed in explicitly so the host decides how frames are
//! scheduled.

use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::color::LightColor;
use crate::math;

/// Options for [`IntensityAnimator::animate`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimateOptions {
    /// Wait for the running animation to finish instead of cutting it short.
    pub append: bool,
    /// Light color to switch to once this animation ends.
    pub end_color: Option<LightColor>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Animation {
    from: f64,
    to: f64,
    start: Instant,
    duration: Duration,
    end_color: Option<LightColor>,
}

impl Animation {
    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        math::clamp_unit(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    fn value_at(&self, now: Instant) -> f64 {
        let t = self.progress(now);
        if t >= 1.0 {
            self.to
        } else {
            math::lerp(self.from, self.to, math::decelerate(t))
        }
    }
}

/// Target waiting for the running animation to end. Fires at most once.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FollowUp {
    target: f64,
    end_color: Option<LightColor>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Animating(Animation),
}

/// What the host should apply after driving the animator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Frame {
    /// New intensity, if it changed.
    pub intensity: Option<f64>,
    /// Color carried by an animation that just ended.
    pub end_color: Option<LightColor>,
    /// Whether more frames are needed.
    pub animating: bool,
}

#[derive(Debug, Clone)]
pub struct IntensityAnimator {
    /// Duration of a full 0 → 1 sweep.
    base: Duration,
    phase: Phase,
    follow_up: Option<FollowUp>,
}

impl IntensityAnimator {
    pub fn new(base: Duration) -> Self {
        Self {
            base,
            phase: Phase::Idle,
            follow_up: None,
        }
    }

    pub fn base_duration(&self) -> Duration {
        self.base
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating(_))
    }

    /// Target of the running animation, if any.
    pub fn target(&self) -> Option<f64> {
        match self.phase {
            Phase::Animating(a) => Some(a.to),
            Phase::Idle => None,
        }
    }

    /// Whether a follow-up target is registered.
    pub fn has_follow_up(&self) -> bool {
        self.follow_up.is_some()
    }

    fn duration_for(&self, from: f64, to: f64) -> Duration {
        self.base.mul_f64((to - from).abs())
    }

    fn start(&mut self, from: f64, to: f64, end_color: Option<LightColor>, now: Instant) {
        let duration = self.duration_for(from, to);
        debug!("animating intensity {from:.3} -> {to:.3} over {duration:?}");
        self.phase = Phase::Animating(Animation {
            from,
            to,
            start: now,
            duration,
            end_color,
        });
    }

    /// Animate from `current` toward `target`.
    ///
    /// When idle, the animation starts right away. When already animating,
    /// the new target is registered as a single follow-up; unless
    /// `options.append` is set, the running animation is then cancelled, which
    /// fires the follow-up immediately from the intensity reached so far.
    pub fn animate(
        &mut self,
        current: f64,
        target: f64,
        options: AnimateOptions,
        now: Instant,
    ) -> Frame {
        let target = math::clamp_unit(target);
        let running = match self.phase {
            Phase::Idle => {
                self.start(math::clamp_unit(current), target, options.end_color, now);
                return Frame {
                    intensity: None,
                    end_color: None,
                    animating: true,
                };
            }
            Phase::Animating(a) => a,
        };

        if self.follow_up.is_some() {
            debug!("replacing queued intensity target with {target:.3}");
        }
        self.follow_up = Some(FollowUp {
            target,
            end_color: options.end_color,
        });
        if options.append {
            return Frame {
                intensity: None,
                end_color: None,
                animating: true,
            };
        }

        let reached = running.value_at(now);
        debug!("cancelled intensity animation at {reached:.3}");
        self.phase = Phase::Idle;
        self.fire_follow_up(reached, now);
        Frame {
            intensity: Some(reached),
            end_color: running.end_color,
            animating: self.is_animating(),
        }
    }

    fn fire_follow_up(&mut self, from: f64, now: Instant) {
        if let Some(next) = self.follow_up.take() {
            self.start(from, next.target, next.end_color, now);
        }
    }

    /// Advance to `now`.
    pub fn tick(&mut self, now: Instant) -> Frame {
        let Phase::Animating(anim) = self.phase else {
            return Frame::default();
        };

        let value = anim.value_at(now);
        trace!("intensity frame {value:.3}");
        if anim.progress(now) < 1.0 {
            return Frame {
                intensity: Some(value),
                end_color: None,
                animating: true,
            };
        }

        self.phase = Phase::Idle;
        self.fire_follow_up(anim.to, now);
        Frame {
            intensity: Some(anim.to),
            end_color: anim.end_color,
            animating: self.is_animating(),
        }
    }

    /// Stop without reaching the target and drop any follow-up.
    ///
    /// Returns the intensity reached, if an animation was running.
    pub fn cancel(&mut self, now: Instant) -> Option<f64> {
        self.follow_up = None;
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Animating(a) => {
                let reached = a.value_at(now);
                debug!("animation stopped at {reached:.3}");
                Some(reached)
            }
            Phase::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Duration = Duration::from_millis(200);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn full_sweep_takes_the_base_duration() {
        let t0 = Instant::now();
        let mut anim = IntensityAnimator::new(BASE);
        assert_eq!(anim.base_duration(), BASE);
        anim.animate(0.0, 1.0, AnimateOptions::default(), t0);
        assert!(anim.is_animating());

        let mid = anim.tick(t0 + ms(100));
        let v = mid.intensity.unwrap();
        assert!(v > 0.5 && v < 1.0, "decelerated midpoint {v}");
        assert!(mid.animating);

        let end = anim.tick(t0 + ms(200));
        assert_eq!(end.intensity, Some(1.0));
        assert!(!end.animating);
        assert!(!anim.is_animating());
    }

    #[test]
    fn partial_sweep_is_proportionally_shorter() {
        let t0 = Instant::now();
        let mut anim = IntensityAnimator::new(BASE);
        anim.animate(0.75, 1.0, AnimateOptions::default(), t0);
        let end = anim.tick(t0 + ms(50));
        assert_eq!(end.intensity, Some(1.0));
        assert!(!end.animating);
    }

    #[test]
    fn retarget_cancels_and_starts_from_reached_value() {
        let t0 = Instant::now();
        let mut anim = IntensityAnimator::new(BASE);
        anim.animate(0.0, 1.0, AnimateOptions::default(), t0);
        let frame = anim.animate(0.0, 0.0, AnimateOptions::default(), t0 + ms(100));
        let reached = frame.intensity.unwrap();
        assert!(reached > 0.5);
        assert_eq!(anim.target(), Some(0.0));
        assert!(!anim.has_follow_up());

        // Going back down covers `reached` of the range.
        let done_at = t0 + ms(100) + BASE.mul_f64(reached);
        assert_eq!(anim.tick(done_at).intensity, Some(0.0));
        assert!(!anim.is_animating());
    }

    #[test]
    fn appended_target_waits_for_natural_completion() {
        let t0 = Instant::now();
        let mut anim = IntensityAnimator::new(BASE);
        anim.animate(0.0, 1.0, AnimateOptions::default(), t0);
        let queued = AnimateOptions {
            append: true,
            ..Default::default()
        };
        anim.animate(0.0, 0.0, queued, t0 + ms(50));
        assert_eq!(anim.target(), Some(1.0));
        assert!(anim.has_follow_up());

        let frame = anim.tick(t0 + ms(200));
        assert_eq!(frame.intensity, Some(1.0));
        assert!(frame.animating);
        assert_eq!(anim.target(), Some(0.0));
        assert!(!anim.has_follow_up());

        assert_eq!(anim.tick(t0 + ms(400)).intensity, Some(0.0));
        assert!(!anim.is_animating());
    }

    #[test]
    fn follow_up_fires_only_once() {
        let t0 = Instant::now();
        let mut anim = IntensityAnimator::new(BASE);
        let queued = AnimateOptions {
            append: true,
            ..Default::default()
        };
        anim.animate(0.0, 1.0, AnimateOptions::default(), t0);
        anim.animate(0.0, 0.0, queued, t0);
        anim.tick(t0 + ms(200));
        anim.tick(t0 + ms(400));
        // Nothing left to restart the animation.
        assert_eq!(anim.tick(t0 + ms(600)), Frame::default());
    }

    #[test]
    fn end_color_is_reported_when_the_animation_ends() {
        let t0 = Instant::now();
        let mut anim = IntensityAnimator::new(BASE);
        let opts = AnimateOptions {
            append: false,
            end_color: Some(LightColor::RED),
        };
        anim.animate(1.0, 0.0, opts, t0);
        assert_eq!(anim.tick(t0 + ms(10)).end_color, None);
        assert_eq!(anim.tick(t0 + ms(200)).end_color, Some(LightColor::RED));
    }

    #[test]
    fn cancelled_animation_still_hands_over_its_end_color() {
        let t0 = Instant::now();
        let mut anim = IntensityAnimator::new(BASE);
        let opts = AnimateOptions {
            append: false,
            end_color: Some(LightColor::BLUE),
        };
        anim.animate(1.0, 0.0, opts, t0);
        let frame = anim.animate(1.0, 1.0, AnimateOptions::default(), t0 + ms(20));
        assert_eq!(frame.end_color, Some(LightColor::BLUE));
    }

    #[test]
    fn cancel_drops_follow_ups() {
        let t0 = Instant::now();
        let mut anim = IntensityAnimator::new(BASE);
        anim.animate(0.0, 1.0, AnimateOptions::default(), t0);
        anim.animate(
            0.0,
            0.0,
            AnimateOptions {
                append: true,
                ..Default::default()
            },
            t0,
        );
        assert!(anim.cancel(t0 + ms(50)).is_some());
        assert!(!anim.has_follow_up());
        assert!(!anim.is_animating());
        assert_eq!(anim.cancel(t0), None);
    }

    #[test]
    fn idle_tick_is_a_no_op() {
        let mut anim = IntensityAnimator::new(BASE);
        assert_eq!(anim.tick(Instant::now()), Frame::default());
    }
}
