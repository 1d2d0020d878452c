//! The player character: movement, jumping, melee swings and regeneration.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use crate::animation::{AnimationDef, AnimationSet, FrameId, PoseSpec};
use crate::collision::{Terrain, resolve_horizontal};
use crate::config::{PhysicsConfig, PlayerConfig};
use crate::geometry::{Facing, Rect, facing_box};

use super::{Body, Enemy, Health, Motion, fall};

/// What the player wants to do this frame, already filtered by the director
/// (no movement while a dialogue is open, and so on).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PlayerIntent {
    /// Horizontal input; only the sign matters.
    pub move_x: f32,
    pub jump: bool,
    pub attack: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlayerPose {
    Idle,
    Walking,
    Airborne,
    Attacking,
}

pub const PLAYER_POSES: [PoseSpec<PlayerPose>; 4] = [
    PoseSpec { pose: PlayerPose::Idle, name: "idle", frames: 1, frame_duration: 0.5, looping: true },
    PoseSpec { pose: PlayerPose::Walking, name: "walk", frames: 2, frame_duration: 0.15, looping: true },
    PoseSpec { pose: PlayerPose::Airborne, name: "airborne", frames: 1, frame_duration: 0.5, looping: true },
    PoseSpec { pose: PlayerPose::Attacking, name: "attack", frames: 3, frame_duration: 0.1, looping: false },
];

/// Pose for the current frame. Attacking wins, then being airborne, then
/// walking on the ground.
pub fn player_pose(attacking: bool, grounded: bool, moving: bool) -> PlayerPose {
    if attacking {
        PlayerPose::Attacking
    } else if !grounded {
        PlayerPose::Airborne
    } else if moving {
        PlayerPose::Walking
    } else {
        PlayerPose::Idle
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Body,
    pub motion: Motion,
    pub health: Health,
    pub facing: Facing,
    speed: f32,
    base_jump_impulse: f32,
    jump_impulse: f32,

    attacking: bool,
    attack_cooldown: f32,
    attack_timer: f32,
    attack_reach: f32,
    attack_damage: u32,
    strike_frame: usize,
    strike_live: bool,
    /// Enemy ids already damaged by the current swing.
    struck: HashSet<String>,

    regen_delay: f32,
    regen_interval: f32,
    since_damage: f32,
    heal_tick: f32,

    anims: AnimationSet<PlayerPose>,
}

impl Player {
    pub fn new(cfg: &PlayerConfig, anim_defs: &HashMap<String, AnimationDef>) -> Self {
        let anims = AnimationSet::build("player", anim_defs, &PLAYER_POSES, PlayerPose::Idle);
        let strike_frame = anims.clamp_frame(PlayerPose::Attacking, cfg.strike_frame);
        if strike_frame != cfg.strike_frame {
            log::warn!("player strike frame {} past the attack animation; using {strike_frame}", cfg.strike_frame);
        }
        Self {
            body: Body::new(Rect::new(0.0, 0.0, cfg.size.x, cfg.size.y)),
            motion: Motion::default(),
            health: Health::new(cfg.max_health),
            facing: Facing::Right,
            speed: cfg.speed,
            base_jump_impulse: cfg.jump_impulse,
            jump_impulse: cfg.jump_impulse,
            attacking: false,
            attack_cooldown: cfg.attack_cooldown,
            attack_timer: 0.0,
            attack_reach: cfg.attack_reach,
            attack_damage: cfg.attack_damage,
            strike_frame,
            strike_live: false,
            struck: HashSet::new(),
            regen_delay: cfg.regen_delay,
            regen_interval: cfg.regen_interval,
            since_damage: 0.0,
            heal_tick: 0.0,
            anims,
        }
    }

    /// Full restart: health, liveness, timers and jump strength all return to
    /// their starting values.
    pub fn restart(&mut self) {
        self.body.alive = true;
        self.health.refill();
        self.motion.stop();
        self.facing = Facing::Right;
        self.jump_impulse = self.base_jump_impulse;
        self.attacking = false;
        self.attack_timer = 0.0;
        self.strike_live = false;
        self.struck.clear();
        self.since_damage = 0.0;
        self.heal_tick = 0.0;
        self.anims.restart(PlayerPose::Idle);
    }

    /// Move to a scene's spawn point. Health and inventory are untouched.
    pub fn place_at(&mut self, top_left: Vec2) {
        self.body.rect.x = top_left.x;
        self.body.rect.y = top_left.y;
        self.motion.stop();
    }

    pub fn is_alive(&self) -> bool {
        self.body.alive
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    pub fn pose(&self) -> PlayerPose {
        self.anims.pose()
    }

    pub fn current_frame(&self) -> FrameId {
        self.anims.current_frame()
    }

    pub fn jump_impulse(&self) -> f32 {
        self.jump_impulse
    }

    pub fn base_jump_impulse(&self) -> f32 {
        self.base_jump_impulse
    }

    pub fn scale_jump_impulse(&mut self, factor: f32) {
        self.jump_impulse = self.base_jump_impulse * factor;
    }

    pub fn restore_jump_impulse(&mut self) {
        self.jump_impulse = self.base_jump_impulse;
    }

    pub fn attack_hitbox(&self) -> Rect {
        facing_box(&self.body.rect, self.facing, self.attack_reach)
    }

    /// Apply damage. Returns true if any health was lost.
    ///
    /// Dead players ignore damage. Any hit restarts the regeneration delay.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if !self.body.alive {
            return false;
        }
        let before = self.health.current();
        self.since_damage = 0.0;
        self.heal_tick = 0.0;
        if self.health.damage(amount) {
            self.body.alive = false;
            self.attacking = false;
            self.strike_live = false;
            log::info!("player died");
        }
        self.health.current() < before
    }

    /// Run one frame of movement, combat state and regeneration.
    pub fn update(&mut self, intent: &PlayerIntent, physics: &PhysicsConfig, terrain: &[Terrain], dt: f32) {
        self.strike_live = false;
        if !self.body.alive {
            return;
        }
        self.attack_timer = (self.attack_timer - dt).max(0.0);
        if self.attacking && self.anims.is_done() {
            self.attacking = false;
        }

        let dir = if intent.move_x > 0.0 {
            1.0
        } else if intent.move_x < 0.0 {
            -1.0
        } else {
            0.0
        };
        let prev_x = self.body.rect.x;
        self.body.rect.x += dir * self.speed * dt;
        self.motion.velocity.x = dir * self.speed;
        self.facing = self.facing.from_sign(dir);
        resolve_horizontal(&mut self.body.rect, prev_x, terrain);

        if intent.jump && self.motion.grounded && !self.attacking {
            self.motion.velocity.y = -self.jump_impulse;
            self.motion.grounded = false;
        }
        if intent.attack && !self.attacking && self.attack_timer <= 0.0 {
            self.start_attack();
        }

        fall(&mut self.body, &mut self.motion, physics, terrain, dt);
        self.regenerate(dt);

        self.anims.play(player_pose(self.attacking, self.motion.grounded, dir != 0.0));
        let through = self.anims.update_through(dt, self.strike_frame);
        self.strike_live = self.attacking && through;
    }

    fn start_attack(&mut self) {
        self.attacking = true;
        self.attack_timer = self.attack_cooldown;
        self.struck.clear();
        self.anims.restart(PlayerPose::Attacking);
    }

    fn regenerate(&mut self, dt: f32) {
        if self.health.is_full() {
            self.heal_tick = 0.0;
            return;
        }
        let before = self.since_damage;
        self.since_damage += dt;
        if self.since_damage <= self.regen_delay {
            return;
        }
        self.heal_tick += self.since_damage - before.max(self.regen_delay);
        if self.regen_interval <= 0.0 {
            self.health.refill();
            self.heal_tick = 0.0;
            return;
        }
        while self.heal_tick >= self.regen_interval && !self.health.is_full() {
            self.health.heal(1);
            self.heal_tick -= self.regen_interval;
        }
    }

    /// Damage every live enemy inside the swing's hitbox, at most once per
    /// enemy per swing. Only does anything while the strike frame is showing.
    /// Returns the number of enemies hit.
    pub fn strike(&mut self, enemies: &mut [Enemy]) -> usize {
        if !self.strike_live || !self.body.alive {
            return 0;
        }
        let hitbox = self.attack_hitbox();
        let mut hits = 0;
        for enemy in enemies.iter_mut().filter(|e| e.body.alive) {
            if hitbox.intersects(&enemy.body.rect) && self.struck.insert(enemy.id.clone()) {
                enemy.take_damage(self.attack_damage);
                hits += 1;
            }
        }
        hits
    }
}
