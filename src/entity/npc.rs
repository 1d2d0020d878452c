//! Non-player characters and their dialogue selection.
//!
//! Choosing what an NPC says is a pure function of story flags and player
//! data. Anything that should happen once the player has read it is returned
//! as an [`InteractionOutcome`] for the director to apply.

use std::collections::HashMap;

use crate::animation::FrameId;
use crate::geometry::Rect;
use crate::story::{PlayerData, StoryFlags};

use super::{Body, HopShooter};

/// Dialogue key → ordered lines.
pub type DialogueScript = HashMap<String, Vec<String>>;

/// Shown when a script has no lines for the selected key.
pub const FALLBACK_LINE: &str = "...";

// ── Effects ──────────────────────────────────────────────────────────────────

/// A single change to playthrough state.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SetFlag(String),
    GiveItem(String),
    RemoveItem(String),
    /// Multiply the player's base jump impulse.
    ScaleJumpImpulse(f32),
    RestoreJumpImpulse,
}

/// What should happen when a dialogue sequence finishes.
#[derive(Clone, Debug, PartialEq)]
pub enum InteractionOutcome {
    Continue,
    Apply(Vec<Effect>),
    /// Open a modal choice; each option carries its own effects.
    OfferChoice { prompt: String, options: Vec<(String, Vec<Effect>)> },
}

/// One selected dialogue sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Interaction {
    pub key: String,
    pub lines: Vec<String>,
    pub outcome: InteractionOutcome,
}

// ── Personas ─────────────────────────────────────────────────────────────────

pub const NOZE_ACCEPTED: &str = "noze_item_accepted";
pub const NOZE_DECLINED: &str = "noze_item_declined";
pub const NOZE_GIFT: &str = "noze_gift";
pub const VOID_HEART: &str = "void_heart";
/// Jump multiplier while carrying Noze's gift.
pub const CURSED_JUMP_FACTOR: f32 = 0.6;

/// Dialogue branching rules, selected by NPC name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Persona {
    TruthSeeker,
    Steelsoul,
    Noze,
    LostKnight,
    Hornhead,
    Witcher,
    Other,
}

impl Persona {
    pub fn from_name(name: &str) -> Self {
        match name {
            "truth_seeker" => Persona::TruthSeeker,
            "steelsoul" => Persona::Steelsoul,
            "noze" => Persona::Noze,
            "lost_knight" => Persona::LostKnight,
            "hornhead" => Persona::Hornhead,
            "witcher" => Persona::Witcher,
            _ => Persona::Other,
        }
    }

    /// Pick the dialogue key and completion outcome for the current state.
    pub fn select(&self, flags: &StoryFlags, data: &PlayerData) -> (&'static str, InteractionOutcome) {
        use InteractionOutcome::{Apply, Continue, OfferChoice};
        match self {
            Persona::TruthSeeker => {
                let has_heart = flags.get("void_heart_obtained") || data.has_item(VOID_HEART);
                if !flags.get("truth_seeker_initial_talk_done") {
                    ("intro", Continue)
                } else if !flags.get("truth_seeker_quest_accepted") {
                    ("quest_offer", Apply(vec![Effect::SetFlag("truth_seeker_quest_accepted".into())]))
                } else if !has_heart {
                    ("waiting_for_heart", Continue)
                } else if !flags.get("truth_seeker_heart_delivered") {
                    (
                        "has_heart",
                        Apply(vec![
                            Effect::RemoveItem(VOID_HEART.into()),
                            Effect::SetFlag("truth_seeker_heart_delivered".into()),
                            Effect::RestoreJumpImpulse,
                        ]),
                    )
                } else {
                    ("outro", Continue)
                }
            }
            Persona::Steelsoul => {
                if flags.get("steelsoul_met_before") {
                    ("dialog2", Continue)
                } else {
                    ("default", Apply(vec![Effect::SetFlag("steelsoul_met_before".into())]))
                }
            }
            Persona::Noze => {
                if flags.get(NOZE_ACCEPTED) {
                    ("item_accepted_followup", Continue)
                } else if flags.get(NOZE_DECLINED) {
                    ("item_declined_followup", Continue)
                } else {
                    let accept = vec![
                        Effect::SetFlag(NOZE_ACCEPTED.into()),
                        Effect::GiveItem(NOZE_GIFT.into()),
                        Effect::ScaleJumpImpulse(CURSED_JUMP_FACTOR),
                    ];
                    let decline = vec![Effect::SetFlag(NOZE_DECLINED.into())];
                    (
                        "initial_offer",
                        OfferChoice {
                            prompt: "do you want to take the thing?".into(),
                            options: vec![("yes".into(), accept), ("no".into(), decline)],
                        },
                    )
                }
            }
            Persona::Hornhead => {
                if flags.get("hornhead_first_talk_done") {
                    ("subsequent_talk", Continue)
                } else {
                    ("first_encounter", Continue)
                }
            }
            Persona::Witcher => {
                if flags.get("witcher_quest_hint_received") {
                    ("warning", Continue)
                } else {
                    ("introduction", Continue)
                }
            }
            Persona::LostKnight | Persona::Other => ("default", Continue),
        }
    }
}

// ── Npc ──────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Npc {
    pub name: String,
    pub persona: Persona,
    pub body: Body,
    /// Inactive NPCs are neither drawn nor interactable.
    pub active: bool,
    pub image: FrameId,
    script: DialogueScript,
    last_key: Option<String>,
    behavior: Option<HopShooter>,
}

impl Npc {
    pub fn new(name: impl Into<String>, rect: Rect, script: DialogueScript, image: FrameId) -> Self {
        let name = name.into();
        Self {
            persona: Persona::from_name(&name),
            name,
            body: Body::new(rect),
            active: true,
            image,
            script,
            last_key: None,
            behavior: None,
        }
    }

    pub fn with_behavior(mut self, behavior: HopShooter) -> Self {
        self.behavior = Some(behavior);
        self
    }

    pub fn behavior(&self) -> Option<&HopShooter> {
        self.behavior.as_ref()
    }

    /// Select what to say. Calling this repeatedly with unchanged state gives
    /// the same answer.
    pub fn interact(&self, data: &PlayerData, flags: &StoryFlags) -> Interaction {
        let (key, outcome) = self.persona.select(flags, data);
        let lines = match self.script.get(key) {
            Some(lines) if !lines.is_empty() => lines.clone(),
            _ => vec![FALLBACK_LINE.to_string()],
        };
        Interaction { key: key.to_string(), lines, outcome }
    }

    /// Record which sequence was last shown.
    pub fn remember(&mut self, key: &str) {
        self.last_key = Some(key.to_string());
    }

    pub fn last_key(&self) -> Option<&str> {
        self.last_key.as_deref()
    }

    /// Frame to draw: the behaviour's animation if it has one.
    pub fn current_frame(&self) -> FrameId {
        match &self.behavior {
            Some(b) => b.current_frame().unwrap_or(self.image),
            None => self.image,
        }
    }

    /// Run autonomous behaviour, if any.
    pub fn update(&mut self, player: &Rect, dt: f32) {
        if !self.active {
            return;
        }
        if let Some(b) = self.behavior.as_mut() {
            b.update(&mut self.body.rect, player, dt);
        }
    }
}
