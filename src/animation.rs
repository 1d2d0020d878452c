// =============================================================================
// ANIMATION.RS — Frame-timed sprite sequences
//
// An `Animation` cycles through opaque frame handles at a fixed per-frame
// duration. Handles are resolved to actual images by whatever renders the
// draw list; the simulation only ever sees `FrameId`s.
// =============================================================================

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Opaque handle to one already-loaded image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameId(pub u32);

impl FrameId {
    /// Placeholder handle used by fallback animations.
    pub const MISSING: FrameId = FrameId(u32::MAX);
}

// ── Definitions ─────────────────────────────────────────────────────────────

/// Immutable animation description as it appears in game data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationDef {
    pub frames: Vec<FrameId>,
    /// Seconds each frame stays on screen.
    pub frame_duration: f32,
    #[serde(default = "default_looping")]
    pub looping: bool,
}

fn default_looping() -> bool {
    true
}

impl AnimationDef {
    /// Returns an error if the definition could never play.
    pub fn validate(&self, key: &str) -> Result<()> {
        if self.frames.is_empty() || !(self.frame_duration > 0.0) {
            return Err(GameError::EmptyAnimation { key: key.to_string() });
        }
        Ok(())
    }
}

// ── Playback ────────────────────────────────────────────────────────────────

/// A playing instance of an animation.
///
/// Non-looping animations become `done` as soon as they arrive on their last
/// frame and stay there until `reset`.
#[derive(Clone, Debug)]
pub struct Animation {
    frames: Vec<FrameId>,
    frame_duration: f32,
    looping: bool,
    index: usize,
    elapsed: f32,
    done: bool,
}

impl Animation {
    /// Build an animation. Fails on an empty frame list or a non-positive
    /// frame duration, either of which would stall or spin playback.
    pub fn new(frames: Vec<FrameId>, frame_duration: f32, looping: bool) -> Result<Self> {
        let def = AnimationDef { frames, frame_duration, looping };
        Self::from_def("<inline>", &def)
    }

    pub fn from_def(key: &str, def: &AnimationDef) -> Result<Self> {
        def.validate(key)?;
        Ok(Self::unchecked(def.frames.clone(), def.frame_duration, def.looping))
    }

    /// Single-frame looping animation showing `frame`. Always valid.
    pub fn fallback(frame: FrameId) -> Self {
        Self::unchecked(vec![frame], 1.0, true)
    }

    /// `count` placeholder frames with the given timing. Used when an entity's
    /// animation is missing from game data but its timing still matters
    /// (attack swings end when their animation does).
    pub fn placeholder(count: usize, frame_duration: f32, looping: bool) -> Self {
        let duration = if frame_duration > 0.0 { frame_duration } else { 1.0 };
        Self::unchecked(vec![FrameId::MISSING; count.max(1)], duration, looping)
    }

    fn unchecked(frames: Vec<FrameId>, frame_duration: f32, looping: bool) -> Self {
        let done = !looping && frames.len() == 1;
        Self { frames, frame_duration, looping, index: 0, elapsed: 0.0, done }
    }

    /// Advance playback by `dt` seconds.
    ///
    /// Leftover time past a frame boundary carries into the next frame.
    pub fn update(&mut self, dt: f32) {
        if self.done {
            return;
        }
        self.elapsed += dt;
        while self.elapsed >= self.frame_duration {
            self.elapsed -= self.frame_duration;
            self.index += 1;
            if self.index >= self.frames.len() {
                if self.looping {
                    self.index = 0;
                } else {
                    self.index = self.frames.len() - 1;
                }
            }
            if !self.looping && self.index == self.frames.len() - 1 {
                self.done = true;
                self.elapsed = 0.0;
                return;
            }
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.elapsed = 0.0;
        self.done = !self.looping && self.frames.len() == 1;
    }

    pub fn current_frame(&self) -> FrameId {
        self.frames[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }
}

// ── Pose sets ───────────────────────────────────────────────────────────────

/// How a pose should play when its animation is missing from game data.
#[derive(Copy, Clone, Debug)]
pub struct PoseSpec<P> {
    pub pose: P,
    /// Suffix appended to the entity kind, e.g. `"attack"` → `"player.attack"`.
    pub name: &'static str,
    pub frames: usize,
    pub frame_duration: f32,
    pub looping: bool,
}

/// Per-entity collection of animations keyed by a pose enum.
///
/// Entities compute their pose once per frame and call [`AnimationSet::play`];
/// the set switches (and restarts) the animation only when the pose changes.
#[derive(Clone, Debug)]
pub struct AnimationSet<P: Copy + Eq + Hash> {
    anims: HashMap<P, Animation>,
    current: P,
}

impl<P: Copy + Eq + Hash> AnimationSet<P> {
    /// Look up `"<kind>.<name>"` in `defs` for every pose, substituting a
    /// placeholder with the pose's default timing when the key is missing.
    pub fn build(kind: &str, defs: &HashMap<String, AnimationDef>, specs: &[PoseSpec<P>], initial: P) -> Self {
        let mut anims = HashMap::new();
        for spec in specs {
            let key = format!("{kind}.{}", spec.name);
            let anim = match defs.get(&key).map(|d| Animation::from_def(&key, d)) {
                Some(Ok(a)) => a,
                Some(Err(e)) => {
                    log::warn!("animation '{key}' unusable ({e}); using placeholder");
                    Animation::placeholder(spec.frames, spec.frame_duration, spec.looping)
                }
                None => {
                    log::debug!("animation '{key}' not defined; using placeholder");
                    Animation::placeholder(spec.frames, spec.frame_duration, spec.looping)
                }
            };
            anims.insert(spec.pose, anim);
        }
        Self { anims, current: initial }
    }

    pub fn pose(&self) -> P {
        self.current
    }

    /// Switch to `pose`, restarting its animation if it was not already current.
    pub fn play(&mut self, pose: P) {
        if pose != self.current {
            self.current = pose;
            if let Some(a) = self.anims.get_mut(&pose) {
                a.reset();
            }
        }
    }

    /// Switch to `pose` and restart it even if it is already current.
    pub fn restart(&mut self, pose: P) {
        self.current = pose;
        if let Some(a) = self.anims.get_mut(&pose) {
            a.reset();
        }
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(a) = self.anims.get_mut(&self.current) {
            a.update(dt);
        }
    }

    /// Advance like [`update`](Self::update) and report whether the current
    /// animation sat on, or stepped over, frame `frame` during this call.
    /// Long frames that skip straight past `frame` still count.
    pub fn update_through(&mut self, dt: f32, frame: usize) -> bool {
        let before = self.index();
        self.update(dt);
        let after = self.index();
        before <= frame && frame <= after
    }

    pub fn current(&self) -> Option<&Animation> {
        self.anims.get(&self.current)
    }

    pub fn get(&self, pose: P) -> Option<&Animation> {
        self.anims.get(&pose)
    }

    /// Clamp `frame` to the last frame of `pose`'s animation.
    pub fn clamp_frame(&self, pose: P, frame: usize) -> usize {
        self.get(pose).map_or(frame, |a| frame.min(a.frame_count().saturating_sub(1)))
    }

    pub fn current_frame(&self) -> FrameId {
        self.current().map_or(FrameId::MISSING, Animation::current_frame)
    }

    /// Index of the current pose's frame.
    pub fn index(&self) -> usize {
        self.current().map_or(0, Animation::index)
    }

    pub fn is_done(&self) -> bool {
        self.current().is_some_and(Animation::is_done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    enum Pose {
        Idle,
        Swing,
    }

    const SPECS: [PoseSpec<Pose>; 2] = [
        PoseSpec { pose: Pose::Idle, name: "idle", frames: 1, frame_duration: 0.5, looping: true },
        PoseSpec { pose: Pose::Swing, name: "swing", frames: 3, frame_duration: 0.1, looping: false },
    ];

    #[test]
    fn missing_defs_use_placeholder_timing() {
        let set = AnimationSet::build("thing", &HashMap::new(), &SPECS, Pose::Idle);
        let swing = set.get(Pose::Swing).unwrap();
        assert_eq!(swing.frame_count(), 3);
        assert!(!swing.is_looping());
        assert_eq!(set.current_frame(), FrameId::MISSING);
    }

    #[test]
    fn play_only_restarts_on_change() {
        let mut set = AnimationSet::build("thing", &HashMap::new(), &SPECS, Pose::Idle);
        set.play(Pose::Swing);
        set.update(0.15);
        assert_eq!(set.index(), 1);
        set.play(Pose::Swing);
        assert_eq!(set.index(), 1);
        set.restart(Pose::Swing);
        assert_eq!(set.index(), 0);
    }

    #[test]
    fn clamp_frame_stays_inside_the_pose() {
        let set = AnimationSet::build("thing", &HashMap::new(), &SPECS, Pose::Idle);
        assert_eq!(set.clamp_frame(Pose::Swing, 1), 1);
        assert_eq!(set.clamp_frame(Pose::Swing, 7), 2);
        assert_eq!(set.clamp_frame(Pose::Idle, 1), 0);
    }
}
