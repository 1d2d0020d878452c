//! Dialogue playback and the modal choice prompt.

use crate::entity::{Effect, Interaction, InteractionOutcome};

/// An open conversation with one NPC, shown a line at a time.
#[derive(Clone, Debug, PartialEq)]
pub struct DialogueSession {
    /// Name of the NPC speaking.
    pub speaker: String,
    /// Dialogue key of the sequence being shown.
    pub key: String,
    lines: Vec<String>,
    line: usize,
    outcome: InteractionOutcome,
}

impl DialogueSession {
    pub fn new(speaker: impl Into<String>, interaction: Interaction) -> Self {
        Self {
            speaker: speaker.into(),
            key: interaction.key,
            lines: interaction.lines,
            line: 0,
            outcome: interaction.outcome,
        }
    }

    pub fn current_line(&self) -> &str {
        self.lines.get(self.line).map_or("", String::as_str)
    }

    pub fn line_index(&self) -> usize {
        self.line
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Move to the next line. Returns true once every line has been shown.
    pub fn advance(&mut self) -> bool {
        self.line += 1;
        self.line >= self.lines.len()
    }

    pub fn into_outcome(self) -> InteractionOutcome {
        self.outcome
    }
}

/// Modal prompt with a highlighted option. While open it takes all
/// navigation and confirm input.
#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceModal {
    pub prompt: String,
    options: Vec<(String, Vec<Effect>)>,
    highlighted: usize,
}

impl ChoiceModal {
    pub fn new(prompt: impl Into<String>, options: Vec<(String, Vec<Effect>)>) -> Self {
        Self { prompt: prompt.into(), options, highlighted: 0 }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|(label, _)| label.as_str())
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn select_previous(&mut self) {
        if !self.options.is_empty() {
            self.highlighted = (self.highlighted + self.options.len() - 1) % self.options.len();
        }
    }

    pub fn select_next(&mut self) {
        if !self.options.is_empty() {
            self.highlighted = (self.highlighted + 1) % self.options.len();
        }
    }

    /// Close the modal, returning the chosen index and its effects.
    pub fn confirm(self) -> (usize, Vec<Effect>) {
        let index = self.highlighted;
        let effects = self.options.into_iter().nth(index).map(|(_, e)| e).unwrap_or_default();
        (index, effects)
    }
}
