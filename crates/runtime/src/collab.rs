//! Collaborator interfaces the game loop depends on.
//!
//! Identity and score persistence are injected rather than global so tests
//! can substitute fakes.

use serde::Serialize;
use thiserror::Error;

use crate::core::SessionResult;
use crate::types::Difficulty;

/// Stable user identifier issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

pub trait IdentityProvider {
    /// The signed-in user, or `None` for guest play.
    fn current_user(&self) -> Option<UserId>;
}

/// Nobody is signed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Guest;

impl IdentityProvider for Guest {
    fn current_user(&self) -> Option<UserId> {
        None
    }
}

/// Identity fixed at startup (from configuration).
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(pub Option<UserId>);

impl StaticIdentity {
    pub fn new(user: Option<String>) -> Self {
        Self(user.map(UserId))
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.0.clone()
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score store I/O failed")]
    Io(#[from] std::io::Error),
    #[error("score store is corrupt")]
    Corrupt(#[from] serde_json::Error),
    #[error("score store unavailable: {0}")]
    Unavailable(String),
}

/// Per-user high-score persistence.
///
/// The loop runs on a single-threaded executor and awaits these directly, so
/// the returned futures need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait ScoreStore {
    async fn high_score(&self, user: &UserId) -> Result<Option<u32>, StoreError>;

    async fn set_high_score(&self, user: &UserId, value: u32) -> Result<(), StoreError>;

    /// Create the record for a first-time user.
    async fn initialize(&self, user: &UserId, value: u32) -> Result<(), StoreError>;
}

/// Payload handed to the results screen once the session has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub destroyed_count: u32,
    pub difficulty: Difficulty,
    /// Best known high score; `None` for guests, non-HARD games, or when the
    /// store could not be reached.
    pub high_score: Option<u32>,
}

impl GameResult {
    pub fn new(result: SessionResult, high_score: Option<u32>) -> Self {
        Self {
            destroyed_count: result.destroyed,
            difficulty: result.difficulty,
            high_score,
        }
    }
}
