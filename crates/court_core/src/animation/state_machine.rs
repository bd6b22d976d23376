//! Animation state machine
//!
//! Any state may be requested from any state. The machine only owns the
//! execution contract: clip time, the advisory cross-fade and the one pending
//! completion of a play-once clip.

use super::clip::{AnimationStateId, ClipTable};

/// Advisory cross-fade between the previous and the current clip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossFade {
    /// Clip being faded out
    pub from: AnimationStateId,
    /// Seconds since the fade began
    pub elapsed: f32,
    /// Total fade length
    pub duration: f32,
}

impl CrossFade {
    /// Weight of the incoming (current) clip in [0, 1]
    pub fn weight_in(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Weight of the outgoing clip in [0, 1]
    pub fn weight_out(&self) -> f32 {
        1.0 - self.weight_in()
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Plays one clip at a time and reports play-once completion
#[derive(Debug, Clone)]
pub struct AnimationStateMachine {
    clips: ClipTable,
    fade_duration: f32,
    current: AnimationStateId,
    time: f32,
    fade: Option<CrossFade>,
    pending_completion: Option<AnimationStateId>,
    trace: bool,
}

impl AnimationStateMachine {
    /// Create a machine playing `idle` from time zero
    pub fn new(clips: ClipTable, fade_duration: f32) -> Self {
        Self {
            clips,
            fade_duration: fade_duration.max(0.0),
            current: AnimationStateId::Idle,
            time: 0.0,
            fade: None,
            pending_completion: None,
            trace: false,
        }
    }

    /// Enable per-tick trace logging
    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    /// Switch to `state`, cross-fading from the current clip.
    ///
    /// Returns `false` without touching anything when `state` is already
    /// playing. Starting a play-once clip replaces any pending completion, so
    /// an earlier one-shot that never finished will not fire later. Starting a
    /// repeating clip drops the pending completion.
    pub fn play(&mut self, state: AnimationStateId) -> bool {
        if state == self.current {
            return false;
        }

        log::debug!("Animation {} -> {}", self.current, state);

        self.fade = Some(CrossFade {
            from: self.current,
            elapsed: 0.0,
            duration: self.fade_duration,
        });
        self.current = state;
        self.time = 0.0;
        self.pending_completion = self.clips.get(state).is_play_once().then_some(state);
        true
    }

    /// Advance clip time by `delta` seconds.
    ///
    /// Returns the state whose play-once clip completed during this call. The
    /// pending completion is taken in the same step, so it fires exactly once.
    pub fn advance(&mut self, delta: f32) -> Option<AnimationStateId> {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };

        if let Some(fade) = &mut self.fade {
            fade.elapsed += delta;
            if fade.is_finished() {
                self.fade = None;
            }
        }

        let clip = *self.clips.get(self.current);
        self.time += delta;

        let completed = if clip.is_play_once() {
            if self.time >= clip.duration {
                self.time = clip.duration;
                self.pending_completion.take().filter(|state| *state == self.current)
            } else {
                None
            }
        } else {
            if clip.duration > 0.0 {
                self.time = self.time.rem_euclid(clip.duration);
            }
            None
        };

        if self.trace {
            log::trace!(
                "Animation {} t={:.3} progress={:.3} fade={:?}",
                self.current,
                self.time,
                self.progress(),
                self.fade
            );
        }

        if let Some(state) = completed {
            log::debug!("Animation {state} completed");
        }
        completed
    }

    /// Normalized time of the current clip in [0, 1]
    pub fn progress(&self) -> f32 {
        let duration = self.clips.get(self.current).duration;
        if duration <= 0.0 {
            1.0
        } else {
            (self.time / duration).clamp(0.0, 1.0)
        }
    }

    /// Currently playing state
    pub fn current(&self) -> AnimationStateId {
        self.current
    }

    /// Seconds into the current clip
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Active cross-fade, if one is still running
    pub fn fade(&self) -> Option<&CrossFade> {
        self.fade.as_ref()
    }

    /// Whether a play-once clip is running and has not completed yet
    pub fn is_awaiting_completion(&self) -> bool {
        self.pending_completion.is_some()
    }

    /// Clip table the machine was built with
    pub fn clips(&self) -> &ClipTable {
        &self.clips
    }
}

impl Default for AnimationStateMachine {
    fn default() -> Self {
        Self::new(ClipTable::default(), 0.3)
    }
}
