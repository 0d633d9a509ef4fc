//! Runtime configuration, read from the environment once at startup.

use std::env;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::Difficulty;

pub const DEFAULT_WORDS_PATH: &str = "assets/words.txt";
pub const DEFAULT_SCORES_PATH: &str = "lunetype-scores.json";
pub const DEFAULT_SCORE_TIMEOUT_MS: u64 = 3000;

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub words_path: PathBuf,
    pub scores_path: PathBuf,
    /// `None` means guest play: the high score is never touched.
    pub user: Option<String>,
    pub seed: u32,
    /// Upper bound on the Ending-phase score report.
    pub score_timeout: Duration,
    pub log_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            words_path: PathBuf::from(DEFAULT_WORDS_PATH),
            scores_path: PathBuf::from(DEFAULT_SCORES_PATH),
            user: None,
            seed: 1,
            score_timeout: Duration::from_millis(DEFAULT_SCORE_TIMEOUT_MS),
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Create from `LUNETYPE_*` environment variables.
    pub fn from_env() -> Self {
        let difficulty = env::var("LUNETYPE_DIFFICULTY")
            .ok()
            .and_then(|s| Difficulty::from_str(&s))
            .unwrap_or_default();

        let words_path = read_env_path("LUNETYPE_WORDS")
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WORDS_PATH));
        let scores_path = read_env_path("LUNETYPE_SCORES")
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORES_PATH));

        let user = read_env_string("LUNETYPE_USER");

        let seed = env::var("LUNETYPE_SEED")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or_else(time_seed);

        let score_timeout = Duration::from_millis(read_env_u64(
            "LUNETYPE_SCORE_TIMEOUT_MS",
            DEFAULT_SCORE_TIMEOUT_MS,
        ));

        Self {
            difficulty,
            words_path,
            scores_path,
            user,
            seed,
            score_timeout,
            log_path: read_env_path("LUNETYPE_LOG_PATH"),
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_score_timeout(mut self, timeout: Duration) -> Self {
        self.score_timeout = timeout;
        self
    }
}

fn read_env_string(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn read_env_path(name: &str) -> Option<PathBuf> {
    read_env_string(name).map(PathBuf::from)
}

fn read_env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
