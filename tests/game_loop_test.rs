use std::future::pending;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use lunetype::core::{GameSnapshot, SessionResult};
use lunetype::runtime::{
    GameConfig, GameLoop, Guest, HostEvent, LoopError, LoopOutcome, MemoryScoreStore,
    ScoreStore, StaticIdentity, StoreError, UserId, WordSource,
};
use lunetype::types::{Difficulty, GamePhase, Key, PlayArea};

/// Store that never answers.
struct StalledStore;

impl ScoreStore for StalledStore {
    async fn high_score(&self, _user: &UserId) -> Result<Option<u32>, StoreError> {
        pending().await
    }

    async fn set_high_score(&self, _user: &UserId, _value: u32) -> Result<(), StoreError> {
        pending().await
    }

    async fn initialize(&self, _user: &UserId, _value: u32) -> Result<(), StoreError> {
        pending().await
    }
}

fn hard_config() -> GameConfig {
    GameConfig::default()
        .with_difficulty(Difficulty::Hard)
        .with_seed(42)
}

fn alice() -> StaticIdentity {
    StaticIdentity::new(Some("alice".to_owned()))
}

fn inline(words: &str) -> WordSource {
    WordSource::Inline(words.to_owned())
}

/// 800 wide, 100 tall: on HARD an asteroid crosses 31 motion ticks after spawning.
fn small_area() -> HostEvent {
    HostEvent::Resize(PlayArea::new(800.0, 100.0))
}

fn spawn_typist(tx: mpsc::Sender<HostEvent>, at: Duration, word: &'static str) {
    tokio::spawn(async move {
        tokio::time::sleep(at).await;
        for c in word.chars() {
            tx.send(HostEvent::Key(Key::Char(c))).await.unwrap();
        }
        tx.send(HostEvent::Key(Key::Enter)).await.unwrap();
    });
}

#[tokio::test(start_paused = true)]
async fn untouched_asteroid_ends_the_session() {
    let (tx, mut rx) = mpsc::channel(64);
    tx.send(small_area()).await.unwrap();

    let game = GameLoop::new(hard_config(), Guest, MemoryScoreStore::new());
    let started = Instant::now();
    let outcome = game.run(inline("nebula"), &mut rx).await.unwrap();

    // A motion tick shares the 2000ms spawn instant, so the asteroid's 31st
    // tick lands at 2000 + 30 * 50ms.
    assert_eq!(started.elapsed(), Duration::from_millis(3500));
    match outcome {
        LoopOutcome::Finished(result) => {
            assert_eq!(result.destroyed_count, 0);
            assert_eq!(result.difficulty, Difficulty::Hard);
            assert_eq!(result.high_score, None);
        }
        other => panic!("expected finished session, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn typed_word_is_destroyed_and_recorded() {
    let (tx, mut rx) = mpsc::channel(64);
    tx.send(small_area()).await.unwrap();
    spawn_typist(tx.clone(), Duration::from_millis(2010), "nebula");

    let game = GameLoop::new(hard_config(), alice(), MemoryScoreStore::new());
    let outcome = game.run(inline("nebula"), &mut rx).await.unwrap();

    let LoopOutcome::Finished(result) = outcome else {
        panic!("expected finished session, got {outcome:?}");
    };
    assert_eq!(result.destroyed_count, 1);
    assert_eq!(result.high_score, Some(1));

    let stored = game.store().high_score(&UserId::from("alice")).await.unwrap();
    assert_eq!(stored, Some(1));
    drop(tx);
}

#[tokio::test(start_paused = true)]
async fn snapshots_follow_the_session_to_ended() {
    let (tx, mut rx) = mpsc::channel(64);
    tx.send(small_area()).await.unwrap();
    let (snap_tx, snap_rx) = watch::channel(GameSnapshot::default());

    let game = GameLoop::new(hard_config(), Guest, MemoryScoreStore::new()).with_snapshots(snap_tx);
    game.run(inline("orbit"), &mut rx).await.unwrap();

    let snap = snap_rx.borrow();
    assert_eq!(snap.phase, GamePhase::Ended);
    assert_eq!(snap.area, Some(PlayArea::new(800.0, 100.0)));
    assert_eq!(snap.asteroids.len(), 1);
    assert_eq!(snap.asteroids[0].word, "orbit");
}

#[tokio::test(start_paused = true)]
async fn exit_aborts_without_reporting() {
    let (tx, mut rx) = mpsc::channel(64);
    tx.send(small_area()).await.unwrap();
    let exit_tx = tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(2500)).await;
        exit_tx.send(HostEvent::Exit).await.unwrap();
    });

    let store = MemoryScoreStore::new().with_score("alice", 5);
    let game = GameLoop::new(hard_config(), alice(), store);
    let outcome = game.run(inline("nebula"), &mut rx).await.unwrap();

    assert_eq!(
        outcome,
        LoopOutcome::Aborted(SessionResult {
            destroyed: 0,
            difficulty: Difficulty::Hard,
        })
    );
    let stored = game.store().high_score(&UserId::from("alice")).await.unwrap();
    assert_eq!(stored, Some(5));
}

#[tokio::test(start_paused = true)]
async fn closed_event_channel_aborts() {
    let (tx, mut rx) = mpsc::channel(64);
    tx.send(small_area()).await.unwrap();
    drop(tx);

    let game = GameLoop::new(hard_config(), Guest, MemoryScoreStore::new());
    let outcome = game.run(inline("nebula"), &mut rx).await.unwrap();
    assert!(matches!(outcome, LoopOutcome::Aborted(_)));
}

#[tokio::test(start_paused = true)]
async fn session_waits_for_geometry() {
    let (tx, mut rx) = mpsc::channel::<HostEvent>(64);
    let (snap_tx, snap_rx) = watch::channel(GameSnapshot::default());
    let game = GameLoop::new(hard_config(), Guest, MemoryScoreStore::new()).with_snapshots(snap_tx);

    let res = tokio::time::timeout(
        Duration::from_secs(30),
        game.run(inline("nebula"), &mut rx),
    )
    .await;

    assert!(res.is_err(), "session should still be loading");
    let snap = snap_rx.borrow();
    assert_eq!(snap.phase, GamePhase::Loading);
    assert!(snap.asteroids.is_empty());
    drop(tx);
}

#[tokio::test]
async fn missing_word_list_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let (tx, mut rx) = mpsc::channel(64);
    tx.send(small_area()).await.unwrap();

    let game = GameLoop::new(hard_config(), Guest, MemoryScoreStore::new());
    let res = game
        .run(WordSource::File(dir.path().join("missing.txt")), &mut rx)
        .await;

    assert!(matches!(res, Err(LoopError::Load(_))));
}

#[tokio::test]
async fn blank_word_list_is_fatal() {
    let (tx, mut rx) = mpsc::channel(64);
    tx.send(small_area()).await.unwrap();

    let game = GameLoop::new(hard_config(), Guest, MemoryScoreStore::new());
    let res = game.run(inline("\n  \n"), &mut rx).await;

    assert!(matches!(res, Err(LoopError::Load(_))));
}

#[tokio::test(start_paused = true)]
async fn stalled_store_is_cut_off() {
    let (tx, mut rx) = mpsc::channel(64);
    tx.send(small_area()).await.unwrap();

    let config = hard_config().with_score_timeout(Duration::from_millis(3000));
    let game = GameLoop::new(config, alice(), StalledStore);
    let started = Instant::now();
    let outcome = game.run(inline("nebula"), &mut rx).await.unwrap();

    assert_eq!(started.elapsed(), Duration::from_millis(6500));
    let LoopOutcome::Finished(result) = outcome else {
        panic!("expected finished session, got {outcome:?}");
    };
    assert_eq!(result.high_score, None);
}

#[tokio::test(start_paused = true)]
async fn easy_session_runs_at_easy_cadence() {
    let (tx, mut rx) = mpsc::channel(64);
    tx.send(HostEvent::Resize(PlayArea::new(800.0, 10.0))).await.unwrap();

    let config = GameConfig::default().with_difficulty(Difficulty::Easy);
    let game = GameLoop::new(config, Guest, MemoryScoreStore::new());
    let started = Instant::now();
    let outcome = game.run(inline("comet"), &mut rx).await.unwrap();

    // Spawn at 5000ms with a same-instant tick; -50 + 3n > 10 first holds at
    // n = 21, which is 20 intervals later.
    assert_eq!(started.elapsed(), Duration::from_millis(5000 + 20 * 50));
    assert!(matches!(outcome, LoopOutcome::Finished(_)));
}
