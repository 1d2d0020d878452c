// =============================================================================
// DIRECTOR.RS — Session state and the per-frame update order
//
// The director owns everything that outlives a single scene (player, story
// flags, defeated enemies, projectiles) and rebuilds the scene on every load.
//
// Frame order while playing:
//   input → player → player strike → enemies → sweep dead → NPC behaviour
//   → projectiles → transitions → camera
// =============================================================================

use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::camera::Camera;
use crate::collision::Terrain;
use crate::config::GameConfig;
use crate::dialogue::{ChoiceModal, DialogueSession};
use crate::entity::{Effect, InteractionOutcome, Npc, Player, PlayerIntent, Projectile, ProjectileQueue};
use crate::error::{GameError, Result};
use crate::geometry::Facing;
use crate::input::FrameInput;
use crate::render::{ChoiceView, DialogueView, DrawList, Hud, Sprite, SpriteKind};
use crate::scene::{BuildContext, GameData, SceneInstance, SceneJump};
use crate::story::{DefeatedEnemies, PlayerData, StoryFlags};

/// Top-level session state. Only `Playing` advances the simulation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionMode {
    Menu,
    Playing,
    Paused,
}

#[derive(Debug)]
struct ActiveDialogue {
    /// Index of the speaking NPC in the scene's list.
    npc: usize,
    session: DialogueSession,
}

pub struct SceneDirector {
    data: GameData,
    config: GameConfig,
    mode: SessionMode,
    /// Seconds of play since the last new game.
    clock: f32,

    flags: StoryFlags,
    defeated: DefeatedEnemies,
    player_data: PlayerData,
    player: Player,

    scene: Option<SceneInstance>,
    projectiles: Vec<Projectile>,
    queue: ProjectileQueue,

    dialogue: Option<ActiveDialogue>,
    choice: Option<ChoiceModal>,
    /// Scene jump held back until the open choice is confirmed.
    deferred_jump: Option<SceneJump>,
    candidate: Option<usize>,

    camera: Camera,
    rng: StdRng,
}

impl SceneDirector {
    /// Create a director sitting in the menu. Fails if `data` has no scenes.
    pub fn new(data: GameData, config: GameConfig) -> Result<Self> {
        if data.scenes.is_empty() {
            return Err(GameError::NoScenes);
        }
        let player = Player::new(&config.player, &data.animations);
        let camera = Camera::new(config.camera.viewport, config.camera.zoom);
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self {
            flags: data.initial_flags.clone(),
            data,
            config,
            mode: SessionMode::Menu,
            clock: 0.0,
            defeated: DefeatedEnemies::default(),
            player_data: PlayerData::default(),
            player,
            scene: None,
            projectiles: Vec::new(),
            queue: ProjectileQueue::new(),
            dialogue: None,
            choice: None,
            deferred_jump: None,
            candidate: None,
            camera,
            rng,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn mode(&self) -> SessionMode { self.mode }
    pub fn clock(&self) -> f32 { self.clock }
    pub fn data(&self) -> &GameData { &self.data }
    pub fn config(&self) -> &GameConfig { &self.config }
    pub fn flags(&self) -> &StoryFlags { &self.flags }
    pub fn flags_mut(&mut self) -> &mut StoryFlags { &mut self.flags }
    pub fn defeated(&self) -> &DefeatedEnemies { &self.defeated }
    pub fn player(&self) -> &Player { &self.player }
    pub fn player_mut(&mut self) -> &mut Player { &mut self.player }
    pub fn player_data(&self) -> &PlayerData { &self.player_data }
    pub fn player_data_mut(&mut self) -> &mut PlayerData { &mut self.player_data }
    pub fn scene(&self) -> Option<&SceneInstance> { self.scene.as_ref() }
    pub fn scene_mut(&mut self) -> Option<&mut SceneInstance> { self.scene.as_mut() }
    pub fn projectiles(&self) -> &[Projectile] { &self.projectiles }
    pub fn camera(&self) -> &Camera { &self.camera }
    pub fn camera_mut(&mut self) -> &mut Camera { &mut self.camera }
    pub fn choice(&self) -> Option<&ChoiceModal> { self.choice.as_ref() }

    pub fn dialogue(&self) -> Option<&DialogueSession> {
        self.dialogue.as_ref().map(|d| &d.session)
    }

    /// NPC the player is close enough to talk to.
    pub fn interaction_candidate(&self) -> Option<&Npc> {
        let scene = self.scene.as_ref()?;
        self.candidate.and_then(|i| scene.npcs.get(i))
    }

    pub fn scene_id(&self) -> Option<&str> {
        self.scene.as_ref().map(|s| s.id.as_str())
    }

    // ── Session ──────────────────────────────────────────────────────────

    /// Full restart: flags, defeated enemies, player and belongings are reset
    /// and the start scene is loaded.
    pub fn new_game(&mut self) -> Result<()> {
        self.flags = self.data.initial_flags.clone();
        self.defeated.clear();
        self.player_data = PlayerData::default();
        self.player.restart();
        self.clock = 0.0;
        self.rng = StdRng::seed_from_u64(self.config.seed);
        self.mode = SessionMode::Playing;
        log::info!("new game");
        let start = self.data.start_scene.clone();
        self.load_scene(&start)
    }

    /// Load a scene by id, placing the player at its spawn point.
    pub fn load_scene(&mut self, id: &str) -> Result<()> {
        self.load_scene_at(id, None)
    }

    /// Load a scene by id with an optional spawn override.
    ///
    /// An unknown id falls back to rebuilding the current scene, or to the
    /// first scene in the catalog when nothing is loaded yet.
    pub fn load_scene_at(&mut self, id: &str, spawn: Option<Vec2>) -> Result<()> {
        match self.data.scene_index(id) {
            Some(index) => {
                self.rebuild(index, spawn);
                Ok(())
            }
            None => {
                log::error!("scene '{id}' not found");
                let fallback = match &self.scene {
                    Some(current) => Some(current.index),
                    None if !self.data.scenes.is_empty() => Some(0),
                    None => None,
                };
                let index = fallback.ok_or_else(|| GameError::SceneNotFound { requested: id.to_string() })?;
                log::warn!("falling back to scene '{}'", self.data.scenes[index].id);
                self.rebuild(index, None);
                Ok(())
            }
        }
    }

    /// Load the scene `delta` places away in catalog order, wrapping around.
    pub fn cycle_scene(&mut self, delta: i32) -> Result<()> {
        let count = self.data.scenes.len() as i64;
        if count == 0 {
            return Err(GameError::NoScenes);
        }
        let current = self.scene.as_ref().map_or(0, |s| s.index) as i64;
        let index = (current + delta as i64).rem_euclid(count) as usize;
        self.rebuild(index, None);
        Ok(())
    }

    fn rebuild(&mut self, index: usize, spawn: Option<Vec2>) {
        self.scene = None;
        self.projectiles.clear();
        self.queue.clear();
        self.dialogue = None;
        self.choice = None;
        self.deferred_jump = None;
        self.candidate = None;

        let def = &self.data.scenes[index];
        let ctx = BuildContext {
            data: &self.data,
            config: &self.config,
            flags: &self.flags,
            defeated: &self.defeated,
            projectiles: &self.queue,
        };
        let scene = SceneInstance::build(def, index, &ctx, &mut self.rng);
        self.player.place_at(spawn.unwrap_or(def.player_start));
        self.camera.follow(self.player.body.rect.center(), scene.world_size);
        log::info!(
            "loaded scene '{}' ({} terrain, {} npcs, {} enemies)",
            scene.id,
            scene.terrain.len(),
            scene.npcs.len(),
            scene.enemies.len()
        );
        self.scene = Some(scene);
        self.update_candidate();
    }

    // ── Frame ────────────────────────────────────────────────────────────

    /// Advance the session by one frame of `dt` seconds.
    pub fn step(&mut self, input: &FrameInput, dt: f32) -> Result<()> {
        match self.mode {
            SessionMode::Menu => {
                if input.confirm {
                    self.new_game()?;
                }
                return Ok(());
            }
            SessionMode::Paused => {
                if input.pause {
                    self.mode = SessionMode::Playing;
                }
                return Ok(());
            }
            SessionMode::Playing => {
                if input.pause {
                    self.mode = SessionMode::Paused;
                    return Ok(());
                }
            }
        }
        if input.cycle_scene != 0 {
            return self.cycle_scene(input.cycle_scene);
        }

        self.clock += dt;
        self.handle_conversation(input)?;

        let intent = if self.dialogue.is_some() || self.choice.is_some() {
            PlayerIntent::default()
        } else {
            PlayerIntent { move_x: input.move_x(), jump: input.jump, attack: input.attack }
        };

        let Some(scene) = self.scene.as_mut() else {
            return Ok(());
        };
        let SceneInstance { terrain, npcs, enemies, world_size, .. } = scene;
        let terrain: &[Terrain] = terrain;
        let physics = &self.config.physics;
        let hurt_shake = self.config.camera.hurt_shake;

        self.player.update(&intent, physics, terrain, dt);
        self.player.strike(enemies.as_mut_slice());

        for enemy in enemies.iter_mut() {
            let damage = enemy.update(&self.player.body.rect, terrain, physics, self.clock, dt);
            if damage > 0 && self.player.take_damage(damage) {
                self.camera.shake(hurt_shake);
            }
        }
        let defeated = &mut self.defeated;
        enemies.retain(|e| {
            if !e.body.alive {
                defeated.record(e.id.clone());
            }
            e.body.alive
        });

        for npc in npcs.iter_mut() {
            npc.update(&self.player.body.rect, dt);
        }

        let spawned = self.queue.drain();
        if !spawned.is_empty() {
            log::debug!("{} projectile(s) spawned", spawned.len());
        }
        self.projectiles.extend(spawned);
        for projectile in self.projectiles.iter_mut() {
            let damage = projectile.update(&self.player.body.rect, dt);
            if damage > 0 && self.player.take_damage(damage) {
                self.camera.shake(hurt_shake);
            }
        }
        self.projectiles.retain(|p| p.body.alive);

        let world = *world_size;
        if !self.player.is_alive() {
            log::info!("player defeated, returning to menu");
            self.mode = SessionMode::Menu;
            self.dialogue = None;
            self.choice = None;
            self.deferred_jump = None;
            return Ok(());
        }

        self.update_candidate();
        if !self.check_transitions()? {
            self.camera.follow(self.player.body.rect.center(), world);
        }
        self.camera.tick(dt);
        Ok(())
    }

    /// Route interact / navigation / confirm input to the choice modal, the
    /// open dialogue, or a new conversation, in that priority.
    fn handle_conversation(&mut self, input: &FrameInput) -> Result<()> {
        if let Some(choice) = self.choice.as_mut() {
            if input.menu_up {
                choice.select_previous();
            }
            if input.menu_down {
                choice.select_next();
            }
            if input.confirm {
                if let Some(choice) = self.choice.take() {
                    let (index, effects) = choice.confirm();
                    log::debug!("choice {index} confirmed");
                    self.apply_effects(&effects);
                    if let Some(jump) = self.deferred_jump.take() {
                        self.follow_jump(&jump)?;
                    }
                }
            }
            return Ok(());
        }
        if !input.interact {
            return Ok(());
        }
        if let Some(active) = self.dialogue.as_mut() {
            if active.session.advance() {
                if let Some(done) = self.dialogue.take() {
                    self.complete_dialogue(done)?;
                }
            }
            return Ok(());
        }
        if let Some(index) = self.candidate {
            self.start_dialogue(index);
        }
        Ok(())
    }

    fn start_dialogue(&mut self, index: usize) {
        let Some(npc) = self.scene.as_mut().and_then(|s| s.npcs.get_mut(index)) else {
            return;
        };
        let interaction = npc.interact(&self.player_data, &self.flags);
        npc.remember(&interaction.key);
        log::debug!("dialogue '{}' started with {}", interaction.key, npc.name);
        self.dialogue = Some(ActiveDialogue { npc: index, session: DialogueSession::new(npc.name.clone(), interaction) });
        self.candidate = None;
    }

    /// Apply the NPC's own outcome, then the scene's end-of-interaction rule.
    fn complete_dialogue(&mut self, done: ActiveDialogue) -> Result<()> {
        let speaker = done.session.speaker.clone();
        let key = done.session.key.clone();
        log::debug!("dialogue '{key}' with {speaker} (npc #{}) complete", done.npc);

        match done.session.into_outcome() {
            InteractionOutcome::Continue => {}
            InteractionOutcome::Apply(effects) => self.apply_effects(&effects),
            InteractionOutcome::OfferChoice { prompt, options } => {
                self.choice = Some(ChoiceModal::new(prompt, options));
            }
        }

        let rule = self
            .scene
            .as_ref()
            .and_then(|s| self.data.scenes.get(s.index))
            .and_then(|def| def.npc(&speaker))
            .and_then(|n| n.on_interaction_end.clone());
        let Some(rule) = rule.filter(|r| r.applies_to(&key)) else {
            return Ok(());
        };
        if let Some(flag) = &rule.set_story_flag {
            log::debug!("story flag '{flag}' set by {speaker}");
            self.flags.raise(flag.clone());
        }
        if let Some(jump) = rule.next_scene_if_flag_is_also_set {
            if self.choice.is_some() {
                self.deferred_jump = Some(jump);
            } else {
                self.follow_jump(&jump)?;
            }
        }
        Ok(())
    }

    fn follow_jump(&mut self, jump: &SceneJump) -> Result<()> {
        if jump.flag.as_deref().is_none_or(|f| self.flags.get(f)) {
            log::debug!("sending the player to '{}'", jump.scene_id);
            self.load_scene(&jump.scene_id)?;
        }
        Ok(())
    }

    fn apply_effects(&mut self, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::SetFlag(flag) => self.flags.raise(flag.clone()),
                Effect::GiveItem(item) => self.player_data.give_item(item.clone()),
                Effect::RemoveItem(item) => {
                    self.player_data.remove_item(item);
                }
                Effect::ScaleJumpImpulse(factor) => self.player.scale_jump_impulse(*factor),
                Effect::RestoreJumpImpulse => self.player.restore_jump_impulse(),
            }
        }
    }

    fn update_candidate(&mut self) {
        self.candidate = None;
        if self.dialogue.is_some() || !self.player.is_alive() {
            return;
        }
        let Some(scene) = self.scene.as_ref() else {
            return;
        };
        let radius = self.config.player.interaction_radius;
        let me = self.player.body.rect.center();
        self.candidate = scene.npcs.iter().position(|npc| {
            let c = npc.body.rect.center();
            npc.active && (me.x - c.x).abs() < radius && (me.y - c.y).abs() < npc.body.rect.h / 2.0 + radius / 2.0
        });
    }

    /// Fire the first matching transition rule, if any. Returns true if a
    /// scene was loaded.
    fn check_transitions(&mut self) -> Result<bool> {
        let Some(scene) = self.scene.as_ref() else {
            return Ok(false);
        };
        let enemies_alive = scene.enemies.iter().any(|e| e.body.alive);
        let player = self.player.body.rect;
        let fired = self.data.scenes[scene.index]
            .transitions
            .iter()
            .find(|rule| rule.fires(&player, &self.flags, enemies_alive))
            .map(|rule| (rule.target_scene_id.clone(), rule.target_player_pos));
        match fired {
            Some((target, spawn)) => {
                log::debug!("transition to '{target}'");
                self.load_scene_at(&target, spawn)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ── Rendering ────────────────────────────────────────────────────────

    /// Snapshot of everything visible this frame.
    pub fn draw_list(&self) -> DrawList {
        let mut list = DrawList::empty(self.mode, self.camera.view_rect(), self.camera.zoom);
        let Some(scene) = self.scene.as_ref().filter(|_| self.mode != SessionMode::Menu) else {
            return list;
        };
        list.background = scene.background;
        list.shake = self.camera.shake_offset();

        for t in &scene.terrain {
            list.sprites.push(Sprite { kind: SpriteKind::Terrain, rect: t.rect, facing: Facing::Right, frame: t.image });
        }
        for npc in scene.npcs.iter().filter(|n| n.active) {
            list.sprites.push(Sprite {
                kind: SpriteKind::Npc,
                rect: npc.body.rect,
                facing: Facing::toward(npc.body.rect.center().x, self.player.body.rect.center().x),
                frame: npc.current_frame(),
            });
        }
        for enemy in scene.enemies.iter().filter(|e| e.body.alive) {
            list.sprites.push(Sprite {
                kind: SpriteKind::Enemy,
                rect: enemy.body.rect,
                facing: enemy.facing,
                frame: enemy.current_frame(),
            });
        }
        for p in self.projectiles.iter().filter(|p| p.body.alive) {
            let facing = Facing::Right.from_sign(p.velocity.x);
            list.sprites.push(Sprite { kind: SpriteKind::Projectile, rect: p.body.rect, facing, frame: p.frame });
        }
        if self.player.is_alive() {
            list.sprites.push(Sprite {
                kind: SpriteKind::Player,
                rect: self.player.body.rect,
                facing: self.player.facing,
                frame: self.player.current_frame(),
            });
        }

        list.hud = Hud {
            health: self.player.health.current(),
            max_health: self.player.health.max(),
            currency: self.player_data.currency,
        };
        list.dialogue = self.dialogue.as_ref().map(|d| DialogueView {
            speaker: d.session.speaker.clone(),
            line: d.session.current_line().to_string(),
            line_index: d.session.line_index(),
            line_count: d.session.line_count(),
        });
        list.choice = self.choice.as_ref().map(|c| ChoiceView {
            prompt: c.prompt.clone(),
            options: c.labels().map(str::to_string).collect(),
            highlighted: c.highlighted(),
        });
        list.interact_prompt = self.interaction_candidate().map(|npc| Vec2::new(npc.body.rect.center().x, npc.body.rect.top()));
        list
    }
}
