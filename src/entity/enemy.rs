//! Patrolling melee enemies.

use std::collections::HashMap;

use crate::animation::{AnimationDef, AnimationSet, FrameId, PoseSpec};
use crate::collision::{Terrain, resolve_horizontal};
use crate::config::{EnemyConfig, PhysicsConfig};
use crate::geometry::{Facing, Rect, facing_box};

use super::{Body, Health, Motion, fall};

/// Behaviour state. Aggro is evaluated each frame while patrolling rather
/// than held as a separate state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Patrol,
    Attacking,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EnemyPose {
    Idle,
    Walking,
    Attacking,
}

pub const ENEMY_POSES: [PoseSpec<EnemyPose>; 3] = [
    PoseSpec { pose: EnemyPose::Idle, name: "idle", frames: 1, frame_duration: 0.5, looping: true },
    PoseSpec { pose: EnemyPose::Walking, name: "walk", frames: 2, frame_duration: 0.2, looping: true },
    PoseSpec { pose: EnemyPose::Attacking, name: "attack", frames: 3, frame_duration: 0.1, looping: false },
];

/// Pose shown for a given state.
pub fn enemy_pose(state: EnemyState, walking: bool, grounded: bool) -> EnemyPose {
    match state {
        EnemyState::Attacking => EnemyPose::Attacking,
        EnemyState::Patrol if walking && grounded => EnemyPose::Walking,
        EnemyState::Patrol => EnemyPose::Idle,
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    /// Stable id recorded in the defeated set when this enemy dies.
    pub id: String,
    pub body: Body,
    pub motion: Motion,
    pub health: Health,
    pub facing: Facing,
    /// Patrol direction, `1.0` (right) or `-1.0` (left).
    pub direction: f32,
    pub state: EnemyState,
    spawn_x: f32,
    patrol_distance: f32,
    speed: f32,
    attack_range: f32,
    damage: u32,
    attack_cooldown: f32,
    hitbox_extra_width: f32,
    strike_frame: usize,
    last_attack_at: Option<f32>,
    struck: bool,
    anims: AnimationSet<EnemyPose>,
}

impl Enemy {
    pub fn new(id: impl Into<String>, rect: Rect, cfg: &EnemyConfig, anim_defs: &HashMap<String, AnimationDef>) -> Self {
        let id = id.into();
        let anims = AnimationSet::build("enemy", anim_defs, &ENEMY_POSES, EnemyPose::Idle);
        let strike_frame = anims.clamp_frame(EnemyPose::Attacking, cfg.strike_frame);
        if strike_frame != cfg.strike_frame {
            log::warn!("enemy '{id}' strike frame {} past the attack animation; using {strike_frame}", cfg.strike_frame);
        }
        Self {
            id,
            body: Body::new(rect),
            motion: Motion::default(),
            health: Health::new(cfg.max_health),
            facing: Facing::Right,
            direction: 1.0,
            state: EnemyState::Patrol,
            spawn_x: rect.x,
            patrol_distance: cfg.patrol_distance,
            speed: cfg.speed,
            attack_range: cfg.attack_range,
            damage: cfg.damage,
            attack_cooldown: cfg.attack_cooldown,
            hitbox_extra_width: cfg.hitbox_extra_width,
            strike_frame,
            last_attack_at: None,
            struck: false,
            anims,
        }
    }

    pub fn with_attack(mut self, range: f32, damage: u32) -> Self {
        self.attack_range = range;
        self.damage = damage;
        self
    }

    /// Left and right limits of the patrol, in terms of the enemy's x position.
    pub fn patrol_bounds(&self) -> (f32, f32) {
        (self.spawn_x - self.patrol_distance, self.spawn_x + self.patrol_distance)
    }

    pub fn can_attack(&self, now: f32) -> bool {
        self.last_attack_at.is_none_or(|t| now - t >= self.attack_cooldown)
    }

    /// Melee hitbox: own width plus the extra reach, from the centre toward
    /// the facing side.
    pub fn attack_hitbox(&self) -> Rect {
        facing_box(&self.body.rect, self.facing, self.body.rect.w + self.hitbox_extra_width)
    }

    pub fn pose(&self) -> EnemyPose {
        self.anims.pose()
    }

    pub fn current_frame(&self) -> FrameId {
        self.anims.current_frame()
    }

    pub fn take_damage(&mut self, amount: u32) {
        if !self.body.alive {
            return;
        }
        if self.health.damage(amount) {
            self.body.alive = false;
            log::debug!("enemy '{}' defeated", self.id);
        }
    }

    /// Run one frame of AI and physics. `now` is the session clock in seconds.
    ///
    /// Returns the damage dealt to the player this frame.
    pub fn update(&mut self, player: &Rect, terrain: &[Terrain], physics: &PhysicsConfig, now: f32, dt: f32) -> u32 {
        if !self.body.alive {
            return 0;
        }
        let prev_x = self.body.rect.x;
        let me = self.body.rect.center();
        let them = player.center();
        let dx = (me.x - them.x).abs();
        let dy = (me.y - them.y).abs();
        let mut walking = false;

        match self.state {
            EnemyState::Attacking => {
                if self.anims.is_done() {
                    self.state = EnemyState::Patrol;
                }
            }
            EnemyState::Patrol => {
                if dx < self.attack_range && dy < self.body.rect.h && self.can_attack(now) {
                    self.facing = Facing::toward(me.x, them.x);
                    self.start_attack(now);
                } else if dx < self.attack_range * 2.0 {
                    self.facing = Facing::toward(me.x, them.x);
                } else {
                    self.patrol(dt);
                    walking = true;
                }
            }
        }

        if let Some(side) = resolve_horizontal(&mut self.body.rect, prev_x, terrain) {
            if side.sign() == self.direction {
                self.turn_around();
            }
        }

        fall(&mut self.body, &mut self.motion, physics, terrain, dt);

        self.anims.play(enemy_pose(self.state, walking, self.motion.grounded));
        let on_strike = self.anims.update_through(dt, self.strike_frame);

        if self.state == EnemyState::Attacking && on_strike && !self.struck && self.attack_hitbox().intersects(player) {
            self.struck = true;
            return self.damage;
        }
        0
    }

    fn start_attack(&mut self, now: f32) {
        self.state = EnemyState::Attacking;
        self.last_attack_at = Some(now);
        self.struck = false;
        self.anims.restart(EnemyPose::Attacking);
    }

    fn patrol(&mut self, dt: f32) {
        self.body.rect.x += self.speed * self.direction * dt;
        self.motion.velocity.x = self.speed * self.direction;
        self.facing = Facing::Right.from_sign(self.direction);
        let (left, right) = self.patrol_bounds();
        if self.direction > 0.0 && self.body.rect.x >= right {
            self.turn_around();
        } else if self.direction < 0.0 && self.body.rect.x <= left {
            self.turn_around();
        }
    }

    fn turn_around(&mut self) {
        self.direction = -self.direction;
        self.facing = Facing::Right.from_sign(self.direction);
    }
}
