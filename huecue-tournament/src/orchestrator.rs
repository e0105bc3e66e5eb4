//! Round orchestration - rotates roles, drives completion calls, scores, and
//! emits the event feed
//!
//! Level 1 - Orchestration and Level 2 - Phases
//!
//! Every external call is awaited one at a time, so the event order is fully
//! determined by the roster and the replies. Each suspension point (a
//! completion call, a pacing delay, an event send) also watches the
//! cancellation token; a dropped event receiver cancels the run.

use std::time::{Duration, Instant};

use huecue_core::{
    parse_clue_response, parse_guess_response, random_coordinate_with, score_guess, Coordinate,
    ScoreResult,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::agents::{Agent, Roster};
use crate::completion::{CompletionError, CompletionProvider};
use crate::config::{PacingConfig, TargetPool, TournamentConfig, PLACEHOLDER_CLUE};
use crate::events::{PlacedGuess, ScoredGuess, TournamentEvent};
use crate::prompts::{clue_giver_prompt, guesser_prompt};
use crate::scoreboard::{RankingEntry, ScoreSnapshot, Scoreboard};

/// Error marker for a guess reply with no usable coordinate
pub const PARSE_FAILURE: &str = "Failed to parse";

/// Final standings of a finished tournament
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TournamentSummary {
    /// Rounds that reached scoring
    pub rounds_played: usize,
    /// Rounds skipped because the clue call failed
    pub rounds_skipped: usize,
    /// Agents by descending score, ties in roster order
    pub rankings: Vec<RankingEntry>,
    /// Final score table
    pub scores: ScoreSnapshot,
    /// Per-round outcomes in play order
    pub rounds: Vec<RoundOutcome>,
}

impl TournamentSummary {
    /// Top of the ranking
    pub fn winner(&self) -> Option<&RankingEntry> {
        self.rankings.first()
    }
}

/// How a run ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(TournamentSummary),
    /// Stopped early; `rounds_finished` counts played and skipped rounds
    Cancelled { rounds_finished: usize },
}

/// Result of one round
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Clue call failed; nobody scored
    Skipped { error: String },
    Scored(RoundResult),
}

/// Scores from a completed round
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundResult {
    pub clue_giver: String,
    pub clue: String,
    pub target: Coordinate,
    pub bonus: u32,
    pub guesses: Vec<ScoredGuess>,
}

/// The run was cancelled at a suspension point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cancelled;

/// Reply of one completion call with its latency
struct CallOutcome {
    reply: Result<String, CompletionError>,
    latency_ms: u64,
}

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Run a full tournament, streaming events into `events`
///
/// # Arguments
/// * `provider` - Text-generation backend for every agent
/// * `roster` - Ordered participants (clue-giver of round r is `agents[r mod N]`)
/// * `config` - Round count, pacing, and target selection
/// * `events` - Receiver side gets the ordered event feed
/// * `cancel` - Stops the run at the next suspension point
pub async fn run_tournament<P>(
    provider: &P,
    roster: &Roster,
    config: &TournamentConfig,
    events: mpsc::Sender<TournamentEvent>,
    cancel: CancellationToken,
) -> RunOutcome
where
    P: CompletionProvider + ?Sized,
{
    let mut orchestrator = Orchestrator::new(provider, roster, config, events, cancel);
    match orchestrator.run().await {
        Ok(summary) => RunOutcome::Completed(summary),
        Err(Cancelled) => {
            info!(
                rounds_finished = orchestrator.rounds_finished,
                "tournament cancelled"
            );
            RunOutcome::Cancelled {
                rounds_finished: orchestrator.rounds_finished,
            }
        }
    }
}

/// State of a single tournament run
struct Orchestrator<'a, P: ?Sized> {
    provider: &'a P,
    roster: &'a Roster,
    total_rounds: usize,
    pacing: PacingConfig,
    targets: TargetPicker,
    scoreboard: Scoreboard,
    events: mpsc::Sender<TournamentEvent>,
    cancel: CancellationToken,
    rounds_finished: usize,
}

impl<'a, P> Orchestrator<'a, P>
where
    P: CompletionProvider + ?Sized,
{
    fn new(
        provider: &'a P,
        roster: &'a Roster,
        config: &TournamentConfig,
        events: mpsc::Sender<TournamentEvent>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            provider,
            roster,
            total_rounds: config.total_rounds,
            pacing: config.pacing,
            targets: TargetPicker::new(&config.targets, config.seed),
            scoreboard: Scoreboard::new(roster),
            events,
            cancel,
            rounds_finished: 0,
        }
    }

    /// Init -> rounds -> TournamentComplete
    async fn run(&mut self) -> Result<TournamentSummary, Cancelled> {
        info!(
            rounds = self.total_rounds,
            agents = self.roster.len(),
            "tournament starting"
        );

        self.emit(TournamentEvent::TournamentInit {
            total_rounds: self.total_rounds,
            agents: self.roster.agents().to_vec(),
            scores: self.scoreboard.snapshot(),
        })
        .await?;

        let mut rounds = Vec::with_capacity(self.total_rounds);
        for round in 0..self.total_rounds {
            rounds.push(self.play_round(round).await?);
            self.rounds_finished += 1;
        }

        let rounds_skipped = rounds
            .iter()
            .filter(|r| matches!(r, RoundOutcome::Skipped { .. }))
            .count();
        let rounds_played = rounds.len() - rounds_skipped;

        let rankings = self.scoreboard.rank();
        let scores = self.scoreboard.snapshot();

        self.emit(TournamentEvent::TournamentComplete {
            rankings: rankings.clone(),
            scores: scores.clone(),
        })
        .await?;

        info!(rounds_played, rounds_skipped, "tournament complete");

        Ok(TournamentSummary {
            rounds_played,
            rounds_skipped,
            rankings,
            scores,
            rounds,
        })
    }

    // ========================================================================
    // Level 2 - Phases
    // ========================================================================

    /// RoundStart -> CluePending -> (ClueFailed | guesses -> RevealScoring -> RoundComplete)
    async fn play_round(&mut self, round: usize) -> Result<RoundOutcome, Cancelled> {
        let number = round + 1;
        let roster = self.roster;
        let clue_giver = roster.clue_giver(round);
        let guessers = roster.guessers(round);
        let target = self.targets.pick();
        let target_color = target.color();

        info!(round = number, clue_giver = %clue_giver.id, %target, "round starting");

        self.emit(TournamentEvent::RoundStart {
            round: number,
            clue_giver: clue_giver.clone(),
            guessers: guessers.iter().map(|&agent| agent.clone()).collect(),
            target,
            target_color,
        })
        .await?;

        let (clue, reasoning) = match self.request_clue(number, clue_giver, target).await? {
            Ok(clue) => clue,
            Err(error) => {
                warn!(round = number, clue_giver = %clue_giver.id, %error, "clue failed, skipping round");
                self.emit(TournamentEvent::ClueFailed {
                    round: number,
                    error: error.clone(),
                })
                .await?;
                self.pause(self.pacing.after_clue_failure).await?;
                return Ok(RoundOutcome::Skipped { error });
            }
        };

        self.emit(TournamentEvent::ClueReady {
            round: number,
            clue: clue.clone(),
            reasoning,
        })
        .await?;

        let prompt = guesser_prompt(&clue);
        let mut placed = Vec::with_capacity(guessers.len());
        for guesser in guessers {
            let guess = self.collect_guess(number, guesser, &prompt).await?;
            placed.push(guess);
        }

        self.emit(TournamentEvent::RevealScoring {
            round: number,
            target,
        })
        .await?;
        self.pause(self.pacing.after_reveal).await?;

        let result = self.score_round(clue_giver, clue, target, placed);

        self.emit(TournamentEvent::RoundComplete {
            round: number,
            clue_giver: clue_giver.clone(),
            bonus: result.bonus,
            guesses: result.guesses.clone(),
            scores: self.scoreboard.snapshot(),
        })
        .await?;
        self.pause(self.pacing.after_round).await?;

        Ok(RoundOutcome::Scored(result))
    }

    // ========================================================================
    // Level 3 - Steps
    // ========================================================================

    /// Ask the clue-giver for a clue
    ///
    /// The inner `Err` carries the failure detail when the call failed or
    /// returned nothing. A reply that parses to no word still succeeds, with
    /// the placeholder clue.
    async fn request_clue(
        &self,
        number: usize,
        clue_giver: &Agent,
        target: Coordinate,
    ) -> Result<Result<(String, Option<String>), String>, Cancelled> {
        self.emit(TournamentEvent::ClueThinking { round: number }).await?;

        let prompt = clue_giver_prompt(target, target.color());
        let outcome = self.call(clue_giver, &prompt).await?;

        let text = match outcome.reply {
            Ok(text) => text,
            Err(error) => return Ok(Err(error.to_string())),
        };

        let parsed = parse_clue_response(&text);
        let clue = parsed.clue.unwrap_or_else(|| {
            debug!(round = number, "unparsable clue, using placeholder");
            PLACEHOLDER_CLUE.to_string()
        });

        Ok(Ok((clue, parsed.reasoning)))
    }

    /// Ask one guesser and emit the placed guess
    async fn collect_guess(
        &self,
        number: usize,
        guesser: &Agent,
        prompt: &str,
    ) -> Result<PlacedGuess, Cancelled> {
        self.emit(TournamentEvent::GuessThinking {
            round: number,
            agent_id: guesser.id.clone(),
        })
        .await?;

        let outcome = self.call(guesser, prompt).await?;
        let guess = placed_guess(guesser, outcome);

        if let Some(error) = &guess.error {
            debug!(round = number, agent = %guesser.id, %error, "guess unusable");
        }

        self.emit(TournamentEvent::GuessPlaced {
            round: number,
            guess: guess.clone(),
        })
        .await?;

        Ok(guess)
    }

    /// Score every guess, award the clue-giver bonus, and update totals
    fn score_round(
        &mut self,
        clue_giver: &Agent,
        clue: String,
        target: Coordinate,
        placed: Vec<PlacedGuess>,
    ) -> RoundResult {
        let guesses: Vec<ScoredGuess> = placed
            .into_iter()
            .map(|guess| {
                let result = match guess.coordinate {
                    Some(coordinate) => score_guess(coordinate, target),
                    None => ScoreResult::MISS,
                };
                ScoredGuess::new(guess, result)
            })
            .collect();

        let bonus = clue_giver_bonus(&guesses);

        for guess in &guesses {
            self.scoreboard.add(&guess.guess.agent_id, guess.score);
        }
        self.scoreboard.add(&clue_giver.id, bonus);

        info!(
            clue_giver = %clue_giver.id,
            bonus,
            total = self.scoreboard.get(&clue_giver.id),
            "round scored"
        );

        RoundResult {
            clue_giver: clue_giver.id.clone(),
            clue,
            target,
            bonus,
            guesses,
        }
    }

    // ========================================================================
    // Level 4 - Suspension points
    // ========================================================================

    /// Send an event; a closed receiver cancels the run
    async fn emit(&self, event: TournamentEvent) -> Result<(), Cancelled> {
        if self.cancel.is_cancelled() {
            return Err(Cancelled);
        }

        tokio::select! {
            _ = self.cancel.cancelled() => Err(Cancelled),
            sent = self.events.send(event) => sent.map_err(|_| {
                debug!("event receiver dropped");
                self.cancel.cancel();
                Cancelled
            }),
        }
    }

    /// One completion attempt, timed; empty text counts as a failure
    async fn call(&self, agent: &Agent, prompt: &str) -> Result<CallOutcome, Cancelled> {
        let started = Instant::now();

        let reply = tokio::select! {
            _ = self.cancel.cancelled() => return Err(Cancelled),
            reply = self.provider.complete(agent, prompt) => reply,
        };

        let reply = match reply {
            Ok(text) if text.is_empty() => Err(CompletionError::Empty),
            other => other,
        };

        Ok(CallOutcome {
            reply,
            latency_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        })
    }

    /// Fixed pacing delay
    async fn pause(&self, delay: Duration) -> Result<(), Cancelled> {
        if delay.is_zero() {
            return if self.cancel.is_cancelled() {
                Err(Cancelled)
            } else {
                Ok(())
            };
        }

        tokio::select! {
            _ = self.cancel.cancelled() => Err(Cancelled),
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }
}

/// Build the placed guess from a guesser's reply
fn placed_guess(guesser: &Agent, outcome: CallOutcome) -> PlacedGuess {
    let (coordinate, reasoning, error) = match outcome.reply {
        Err(error) => (None, None, Some(error.to_string())),
        Ok(text) => {
            let parsed = parse_guess_response(&text);
            let error = parsed.guess.is_none().then(|| PARSE_FAILURE.to_string());
            (parsed.guess, parsed.reasoning, error)
        }
    };

    PlacedGuess {
        agent_id: guesser.id.clone(),
        agent_color: guesser.color,
        coordinate,
        color: coordinate.map(|c| c.color()),
        reasoning,
        error,
        latency_ms: outcome.latency_ms,
    }
}

/// One point per guesser in the inner ring or better
pub fn clue_giver_bonus(guesses: &[ScoredGuess]) -> u32 {
    guesses.iter().filter(|g| g.score >= 2).count() as u32
}

/// Draws round targets from the configured pool
struct TargetPicker {
    pool: Vec<Coordinate>,
    rng: ChaCha8Rng,
}

impl TargetPicker {
    fn new(targets: &TargetPool, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        let pool = match targets {
            TargetPool::Board => Vec::new(),
            TargetPool::Fixed(cells) => cells.clone(),
        };

        Self { pool, rng }
    }

    fn pick(&mut self) -> Coordinate {
        match self.pool.choose(&mut self.rng) {
            Some(&cell) => cell,
            None => random_coordinate_with(&mut self.rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huecue_core::{parse_coordinate, Color, Zone};

    fn scored(id: &str, guess: Option<&str>, target: &str) -> ScoredGuess {
        let target = parse_coordinate(target).unwrap();
        let coordinate = guess.and_then(parse_coordinate);
        let result = coordinate.map_or(ScoreResult::MISS, |c| score_guess(c, target));
        ScoredGuess::new(
            PlacedGuess {
                agent_id: id.to_string(),
                agent_color: Color::new(0, 0, 0),
                coordinate,
                color: coordinate.map(|c| c.color()),
                reasoning: None,
                error: None,
                latency_ms: 0,
            },
            result,
        )
    }

    #[test]
    fn test_clue_giver_bonus_counts_inner_and_exact() {
        let guesses = vec![
            scored("a", Some("K12"), "K12"),
            scored("b", Some("K13"), "K12"),
            scored("c", Some("M14"), "K12"),
        ];
        assert_eq!(guesses[2].zone, Zone::Outer);
        assert_eq!(clue_giver_bonus(&guesses), 2);

        let misses = vec![scored("a", None, "K12"), scored("b", Some("A1"), "K12")];
        assert_eq!(clue_giver_bonus(&misses), 0);
    }

    #[test]
    fn test_placed_guess_from_error() {
        let agent = Agent::new("m1", "M1", Color::new(1, 2, 3));
        let guess = placed_guess(
            &agent,
            CallOutcome {
                reply: Err(CompletionError::Transport("timeout".to_string())),
                latency_ms: 42,
            },
        );
        assert_eq!(guess.coordinate, None);
        assert_eq!(guess.color, None);
        assert_eq!(guess.error.as_deref(), Some("request failed: timeout"));
        assert_eq!(guess.latency_ms, 42);
        assert_eq!(guess.agent_color, Color::new(1, 2, 3));
    }

    #[test]
    fn test_placed_guess_parse_failure() {
        let agent = Agent::new("m1", "M1", Color::new(0, 0, 0));
        let guess = placed_guess(
            &agent,
            CallOutcome {
                reply: Ok("somewhere blue".to_string()),
                latency_ms: 5,
            },
        );
        assert_eq!(guess.coordinate, None);
        assert_eq!(guess.error.as_deref(), Some(PARSE_FAILURE));
    }

    #[test]
    fn test_placed_guess_success() {
        let agent = Agent::new("m1", "M1", Color::new(0, 0, 0));
        let guess = placed_guess(
            &agent,
            CallOutcome {
                reply: Ok(r#"{"guess": "k12", "reasoning": "teal"}"#.to_string()),
                latency_ms: 5,
            },
        );
        assert_eq!(guess.coordinate, parse_coordinate("K12"));
        assert_eq!(guess.color.map(|c| c.to_string()).as_deref(), Some("#13ecb6"));
        assert_eq!(guess.reasoning.as_deref(), Some("teal"));
        assert_eq!(guess.error, None);
    }

    #[test]
    fn test_target_picker_seeded() {
        let mut a = TargetPicker::new(&TargetPool::Board, Some(9));
        let mut b = TargetPicker::new(&TargetPool::Board, Some(9));
        for _ in 0..20 {
            assert_eq!(a.pick(), b.pick());
        }
    }

    #[test]
    fn test_target_picker_fixed_pool() {
        let pool = vec![parse_coordinate("A1").unwrap(), parse_coordinate("T24").unwrap()];
        let mut picker = TargetPicker::new(&TargetPool::Fixed(pool.clone()), Some(1));
        for _ in 0..20 {
            assert!(pool.contains(&picker.pick()));
        }

        let mut empty = TargetPicker::new(&TargetPool::Fixed(Vec::new()), Some(1));
        let _ = empty.pick();
    }
}
