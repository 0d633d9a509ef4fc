//! Ending-phase high-score report.
//!
//! Best effort: every failure is logged and swallowed so the session always
//! reaches `Ended`.

use crate::collab::{IdentityProvider, ScoreStore};
use crate::core::{decide, ScoreUpdate, SessionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Difficulty never records a high score and the user has no record yet.
    NotEligible,
    /// Nobody signed in.
    Guest,
    /// Stored value was not beaten.
    Kept(u32),
    /// New value persisted.
    Written(u32),
    /// The store could not be read or written.
    Failed,
}

impl ReportOutcome {
    /// Best known high score to show on the results screen.
    pub fn high_score(&self) -> Option<u32> {
        match *self {
            ReportOutcome::Kept(v) | ReportOutcome::Written(v) => Some(v),
            ReportOutcome::NotEligible | ReportOutcome::Guest | ReportOutcome::Failed => None,
        }
    }
}

pub async fn report_high_score<I, S>(identity: &I, store: &S, result: SessionResult) -> ReportOutcome
where
    I: IdentityProvider,
    S: ScoreStore,
{
    let Some(user) = identity.current_user() else {
        tracing::info!("guest session; high score not recorded");
        return ReportOutcome::Guest;
    };

    let stored = match store.high_score(&user).await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(user = user.as_str(), error = %e, "failed to read high score");
            return ReportOutcome::Failed;
        }
    };

    let update = decide(result.difficulty, stored, result.destroyed);
    let written = match update {
        ScoreUpdate::Initialize(v) => store.initialize(&user, v).await.map(|_| v),
        ScoreUpdate::Raise(v) => store.set_high_score(&user, v).await.map(|_| v),
        ScoreUpdate::Keep(v) => return ReportOutcome::Kept(v),
        ScoreUpdate::Skip => return ReportOutcome::NotEligible,
    };

    match written {
        Ok(v) => {
            tracing::info!(user = user.as_str(), high_score = v, "high score recorded");
            ReportOutcome::Written(v)
        }
        Err(e) => {
            tracing::warn!(user = user.as_str(), error = %e, "failed to write high score");
            ReportOutcome::Failed
        }
    }
}
