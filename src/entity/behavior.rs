//! Autonomous NPC behaviour: hop in place at random intervals and shoot at
//! the player when in range.

use std::collections::HashMap;
use std::f32::consts::PI;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::{AnimationDef, AnimationSet, FrameId, PoseSpec};
use crate::config::MarksmanConfig;
use crate::geometry::Rect;

use super::{Projectile, ProjectileSink};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HopPose {
    Rest,
    Hop,
}

pub const HOP_POSES: [PoseSpec<HopPose>; 2] = [
    PoseSpec { pose: HopPose::Rest, name: "rest", frames: 1, frame_duration: 0.5, looping: true },
    PoseSpec { pose: HopPose::Hop, name: "hop", frames: 2, frame_duration: 0.15, looping: true },
];

pub struct HopShooter {
    cfg: MarksmanConfig,
    sink: Box<dyn ProjectileSink>,
    rng: StdRng,
    /// Resting y of the owner's rectangle.
    base_y: f32,
    /// Countdown to the next hop while resting.
    until_hop: f32,
    /// Time into the current hop, if hopping.
    hop_elapsed: Option<f32>,
    /// Remaining fire cooldown.
    reload: f32,
    projectile_frame: FrameId,
    anims: AnimationSet<HopPose>,
}

impl fmt::Debug for HopShooter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HopShooter")
            .field("base_y", &self.base_y)
            .field("until_hop", &self.until_hop)
            .field("hop_elapsed", &self.hop_elapsed)
            .field("reload", &self.reload)
            .finish_non_exhaustive()
    }
}

impl HopShooter {
    /// `sink` receives every projectile fired. `seed` drives hop timing.
    pub fn new(
        cfg: &MarksmanConfig,
        base_y: f32,
        sink: Box<dyn ProjectileSink>,
        seed: u64,
        anim_defs: &HashMap<String, AnimationDef>,
    ) -> Self {
        let projectile_frame = anim_defs
            .get("projectile.fly")
            .and_then(|d| d.frames.first().copied())
            .unwrap_or(FrameId::MISSING);
        let mut shooter = Self {
            cfg: cfg.clone(),
            sink,
            rng: StdRng::seed_from_u64(seed),
            base_y,
            until_hop: 0.0,
            hop_elapsed: None,
            reload: 0.0,
            projectile_frame,
            anims: AnimationSet::build("marksman", anim_defs, &HOP_POSES, HopPose::Rest),
        };
        shooter.until_hop = shooter.next_interval();
        shooter
    }

    fn next_interval(&mut self) -> f32 {
        let (lo, hi) = (self.cfg.hop_interval_min, self.cfg.hop_interval_max);
        if hi > lo { self.rng.gen_range(lo..=hi) } else { lo.max(0.0) }
    }

    pub fn is_hopping(&self) -> bool {
        self.hop_elapsed.is_some()
    }

    pub fn until_hop(&self) -> f32 {
        self.until_hop
    }

    pub fn current_frame(&self) -> Option<FrameId> {
        Some(self.anims.current_frame()).filter(|f| *f != FrameId::MISSING)
    }

    /// Advance hop and fire timers. Moves `owner` vertically along the hop arc.
    pub fn update(&mut self, owner: &mut Rect, player: &Rect, dt: f32) {
        match self.hop_elapsed {
            Some(t) => {
                let t = t + dt;
                if t >= self.cfg.hop_duration {
                    owner.y = self.base_y;
                    self.hop_elapsed = None;
                    self.until_hop = self.next_interval();
                } else {
                    let phase = (t / self.cfg.hop_duration).clamp(0.0, 1.0);
                    owner.y = self.base_y - self.cfg.hop_height * (phase * PI).sin();
                    self.hop_elapsed = Some(t);
                }
            }
            None => {
                self.until_hop -= dt;
                if self.until_hop <= 0.0 {
                    self.hop_elapsed = Some(0.0);
                }
            }
        }
        self.anims.play(if self.is_hopping() { HopPose::Hop } else { HopPose::Rest });
        self.anims.update(dt);

        self.reload = (self.reload - dt).max(0.0);
        let from = owner.center();
        let to = player.center();
        if self.reload <= 0.0 && from.distance(to) <= self.cfg.fire_range {
            let dir = (to - from).normalize_or_zero();
            if dir != glam::Vec2::ZERO {
                let size = self.cfg.projectile_size;
                let mut rect = Rect::new(0.0, 0.0, size, size);
                rect.set_center(from);
                self.sink.spawn(Projectile::new(
                    rect,
                    dir * self.cfg.projectile_speed,
                    self.cfg.projectile_damage,
                    self.cfg.projectile_lifetime,
                    self.projectile_frame,
                ));
                self.reload = self.cfg.fire_cooldown;
                log::debug!("projectile fired toward ({:.0}, {:.0})", to.x, to.y);
            }
        }
    }
}
