//! Cumulative tournament scores and final ranking

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::agents::{Agent, Roster};

/// Immutable copy of the score table, keyed by agent id
pub type ScoreSnapshot = BTreeMap<String, u32>;

/// One line of the final ranking
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    pub agent: Agent,
    pub score: u32,
}

/// Per-agent running totals, owned by a single tournament run
#[derive(Clone, Debug)]
pub struct Scoreboard {
    agents: Vec<Agent>,
    index: FxHashMap<String, usize>,
    totals: Vec<u32>,
}

impl Scoreboard {
    /// Zeroed table for every agent in the roster
    pub fn new(roster: &Roster) -> Self {
        let agents = roster.agents().to_vec();
        let index = agents
            .iter()
            .enumerate()
            .map(|(i, agent)| (agent.id.clone(), i))
            .collect();
        let totals = vec![0; agents.len()];

        Self {
            agents,
            index,
            totals,
        }
    }

    /// Add points to an agent; unknown ids are ignored and reported as `false`
    pub fn add(&mut self, agent_id: &str, delta: u32) -> bool {
        match self.index.get(agent_id) {
            Some(&i) => {
                self.totals[i] = self.totals[i].saturating_add(delta);
                true
            }
            None => {
                tracing::warn!(agent = agent_id, "score for unknown agent dropped");
                false
            }
        }
    }

    /// Current total for an agent
    pub fn get(&self, agent_id: &str) -> Option<u32> {
        self.index.get(agent_id).map(|&i| self.totals[i])
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        self.agents
            .iter()
            .zip(&self.totals)
            .map(|(agent, &total)| (agent.id.clone(), total))
            .collect()
    }

    /// Agents by descending score; ties keep roster order
    pub fn rank(&self) -> Vec<RankingEntry> {
        let mut ranking: Vec<RankingEntry> = self
            .agents
            .iter()
            .zip(&self.totals)
            .map(|(agent, &score)| RankingEntry {
                agent: agent.clone(),
                score,
            })
            .collect();

        // sort_by is stable
        ranking.sort_by(|a, b| b.score.cmp(&a.score));
        ranking
    }
}
