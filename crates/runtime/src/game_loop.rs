//! Game loop - drives a [`GameSession`] from timers and host events.
//!
//! Everything runs on one task. Each `select!` arm (spawn tick, motion tick,
//! host event) runs to completion before the next is polled, so session
//! mutations never interleave and no locking is needed. Returning from
//! [`GameLoop::run`] drops both timers and stops consuming host events.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::collab::{GameResult, IdentityProvider, ScoreStore};
use crate::config::GameConfig;
use crate::core::{GameSession, GameSnapshot, LoadError, MotionOutcome, SessionResult};
use crate::report::{report_high_score, ReportOutcome};
use crate::types::{GamePhase, Key, KeyAction, PlayArea, MOTION_TICK_MS};
use crate::words::WordSource;

/// Input delivered by the host environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    Key(Key),
    Resize(PlayArea),
    /// The player left the play screen.
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopOutcome {
    /// The session ended normally; hand this to the results screen.
    Finished(GameResult),
    /// The play screen was exited before game over. No score was reported.
    Aborted(SessionResult),
}

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("cannot start session")]
    Load(#[from] LoadError),
}

pub struct GameLoop<I, S> {
    config: GameConfig,
    identity: I,
    store: S,
    snapshots: Option<watch::Sender<GameSnapshot>>,
}

impl<I, S> GameLoop<I, S>
where
    I: IdentityProvider,
    S: ScoreStore,
{
    pub fn new(config: GameConfig, identity: I, store: S) -> Self {
        Self {
            config,
            identity,
            store,
            snapshots: None,
        }
    }

    /// Publish a snapshot after every handled event.
    pub fn with_snapshots(mut self, tx: watch::Sender<GameSnapshot>) -> Self {
        self.snapshots = Some(tx);
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one session to completion.
    ///
    /// A word-source failure is fatal to the session and returned as an
    /// error; score-store failures never are.
    pub async fn run(
        &self,
        words: WordSource,
        events: &mut mpsc::Receiver<HostEvent>,
    ) -> Result<LoopOutcome, LoopError> {
        let mut session = GameSession::new(self.config.difficulty, self.config.seed);
        tracing::info!(
            difficulty = session.difficulty().as_str(),
            seed = session.seed(),
            "session created"
        );

        if let Some(aborted) = self.load(&mut session, &words, events).await? {
            return Ok(LoopOutcome::Aborted(aborted));
        }
        tracing::info!("session running");

        if let Some(aborted) = self.play(&mut session, events).await {
            tracing::info!(destroyed = aborted.destroyed, "play screen exited");
            return Ok(LoopOutcome::Aborted(aborted));
        }

        let result = session.result();
        let report = match time::timeout(
            self.config.score_timeout,
            report_high_score(&self.identity, &self.store, result),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.config.score_timeout.as_millis() as u64,
                    "high score report timed out"
                );
                ReportOutcome::Failed
            }
        };

        let ended = session.finish().unwrap_or(result);
        self.publish(&session);
        tracing::info!(
            destroyed = ended.destroyed,
            difficulty = ended.difficulty.as_str(),
            ?report,
            "session ended"
        );

        Ok(LoopOutcome::Finished(GameResult::new(ended, report.high_score())))
    }

    /// Wait for the word list and play-area geometry.
    async fn load(
        &self,
        session: &mut GameSession,
        words: &WordSource,
        events: &mut mpsc::Receiver<HostEvent>,
    ) -> Result<Option<SessionResult>, LoopError> {
        let load = words.load();
        tokio::pin!(load);
        let mut words_ready = false;

        self.publish(session);
        while session.phase() == GamePhase::Loading {
            tokio::select! {
                res = &mut load, if !words_ready => {
                    words_ready = true;
                    match res {
                        Ok(pool) => {
                            tracing::info!(source = %words.name(), words = pool.len(), "word list loaded");
                            session.provide_words(pool);
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "word list unavailable");
                            return Err(e.into());
                        }
                    }
                }
                ev = events.recv() => match ev {
                    Some(HostEvent::Resize(area)) => session.resize(area),
                    Some(HostEvent::Key(_)) => {}
                    Some(HostEvent::Exit) | None => return Ok(Some(session.result())),
                },
            }
            self.publish(session);
        }
        Ok(None)
    }

    /// Run spawn and motion timers until game over or exit.
    ///
    /// Returns `Some` if the player exited.
    async fn play(
        &self,
        session: &mut GameSession,
        events: &mut mpsc::Receiver<HostEvent>,
    ) -> Option<SessionResult> {
        let spawn_every = Duration::from_millis(session.difficulty().spawn_interval_ms() as u64);
        let motion_every = Duration::from_millis(MOTION_TICK_MS as u64);

        let start = Instant::now();
        let mut spawn_timer = time::interval_at(start + spawn_every, spawn_every);
        let mut motion_timer = time::interval_at(start + motion_every, motion_every);
        spawn_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        motion_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                // Fixed priority keeps same-instant ticks reproducible.
                biased;

                _ = spawn_timer.tick() => {
                    if let Some(id) = session.spawn_tick() {
                        tracing::debug!(id, asteroids = session.field().len(), "asteroid spawned");
                    }
                }
                _ = motion_timer.tick() => {
                    if let MotionOutcome::GameOver { crossed } = session.motion_tick() {
                        tracing::info!(?crossed, destroyed = session.destroyed(), "asteroid reached the bottom");
                        self.publish(session);
                        return None;
                    }
                }
                ev = events.recv() => match ev {
                    Some(HostEvent::Key(key)) => {
                        if let KeyAction::AttemptComplete { matched: true } = session.on_key(key) {
                            tracing::debug!(destroyed = session.destroyed(), "asteroid destroyed");
                        }
                    }
                    Some(HostEvent::Resize(area)) => session.resize(area),
                    Some(HostEvent::Exit) | None => return Some(session.result()),
                },
            }
            self.publish(session);
        }
    }

    fn publish(&self, session: &GameSession) {
        if let Some(tx) = &self.snapshots {
            tx.send_modify(|snap| session.snapshot_into(snap));
        }
    }
}
