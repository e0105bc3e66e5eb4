//! Participating agents and the fixed tournament roster
//!
//! Level 4 - Utilities and configuration

use std::path::Path;

use huecue_core::Color;
use serde::{Deserialize, Serialize};

/// A participant whose replies come from a text-generation model
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Opaque identifier, also used as the model name by the gateway
    pub id: String,
    /// Display name
    pub name: String,
    /// Display colour for guess markers
    pub color: Color,
}

impl Agent {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: Color) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
        }
    }
}

/// Errors building a roster
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("a tournament needs at least 2 agents, got {0}")]
    TooFewAgents(usize),

    #[error("duplicate agent id: {0}")]
    DuplicateId(String),

    #[error("failed to read roster file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse roster file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ordered, immutable list of at least two agents with unique ids
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    agents: Vec<Agent>,
}

impl Roster {
    /// Validate and build a roster
    pub fn new(agents: Vec<Agent>) -> Result<Self, RosterError> {
        if agents.len() < 2 {
            return Err(RosterError::TooFewAgents(agents.len()));
        }

        for (i, agent) in agents.iter().enumerate() {
            if agents[..i].iter().any(|other| other.id == agent.id) {
                return Err(RosterError::DuplicateId(agent.id.clone()));
            }
        }

        Ok(Self { agents })
    }

    /// Load a JSON array of agents (`[{"id", "name", "color"}]`)
    pub fn load(path: &Path) -> Result<Self, RosterError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a JSON array of agents
    pub fn from_json(content: &str) -> Result<Self, RosterError> {
        let agents: Vec<Agent> = serde_json::from_str(content)?;
        Self::new(agents)
    }

    /// Built-in four-model lineup
    pub fn default_roster() -> Self {
        Self {
            agents: vec![
                Agent::new("openai/gpt-4o", "GPT-4o", Color::new(0x10, 0xa3, 0x7f)),
                Agent::new(
                    "anthropic/claude-sonnet-4",
                    "Claude Sonnet 4",
                    Color::new(0xd9, 0x77, 0x06),
                ),
                Agent::new(
                    "google/gemini-2.0-flash",
                    "Gemini 2.0 Flash",
                    Color::new(0x42, 0x85, 0xf4),
                ),
                Agent::new("xai/grok-2", "Grok 2", Color::new(0x17, 0x17, 0x17)),
            ],
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Index of the clue-giver for a zero-based round
    pub fn clue_giver_index(&self, round: usize) -> usize {
        round % self.agents.len()
    }

    /// Clue-giver for a zero-based round: `agents[round mod N]`
    pub fn clue_giver(&self, round: usize) -> &Agent {
        &self.agents[self.clue_giver_index(round)]
    }

    /// Everyone except the round's clue-giver, in roster order
    pub fn guessers(&self, round: usize) -> Vec<&Agent> {
        let giver = self.clue_giver_index(round);
        self.agents
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != giver)
            .map(|(_, agent)| agent)
            .collect()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::default_roster()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(id: &str) -> Agent {
        Agent::new(id, id.to_uppercase(), Color::new(0, 0, 0))
    }

    #[test]
    fn test_roster_rejects_too_few() {
        assert!(matches!(Roster::new(vec![]), Err(RosterError::TooFewAgents(0))));
        assert!(matches!(
            Roster::new(vec![agent("a")]),
            Err(RosterError::TooFewAgents(1))
        ));
    }

    #[test]
    fn test_roster_rejects_duplicates() {
        let result = Roster::new(vec![agent("a"), agent("b"), agent("a")]);
        assert!(matches!(result, Err(RosterError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn test_rotation() {
        let roster = Roster::new(vec![agent("a"), agent("b"), agent("c")]).unwrap();
        let givers: Vec<_> = (0..7).map(|r| roster.clue_giver(r).id.as_str()).collect();
        assert_eq!(givers, ["a", "b", "c", "a", "b", "c", "a"]);

        let guessers: Vec<_> = roster.guessers(1).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(guessers, ["a", "c"]);
    }

    #[test]
    fn test_from_json() {
        let json = r##"[
            {"id": "m1", "name": "Model One", "color": "#10a37f"},
            {"id": "m2", "name": "Model Two", "color": "#4285F4"}
        ]"##;
        let roster = Roster::from_json(json).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.agents()[1].color, Color::new(0x42, 0x85, 0xf4));

        assert!(matches!(
            Roster::from_json(r#"[{"id": "m1", "name": "x", "color": "green"}]"#),
            Err(RosterError::Parse(_))
        ));
    }

    #[test]
    fn test_default_roster() {
        let roster = Roster::default();
        assert_eq!(roster.len(), 4);
        assert_eq!(roster.clue_giver(0).id, "openai/gpt-4o");
        assert_eq!(roster.guessers(0).len(), 3);
    }
}
