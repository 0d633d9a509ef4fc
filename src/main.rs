//! Terminal LuneType runner (default binary).
//!
//! Input is read on a dedicated thread and forwarded as host events; the game
//! loop and the renderer share one current-thread tokio runtime.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::{mpsc, watch};
use tracing_subscriber::EnvFilter;

use lunetype::core::GameSnapshot;
use lunetype::input::{map_key_event, should_quit};
use lunetype::runtime::{
    GameConfig, GameLoop, HostEvent, JsonFileScoreStore, LoopOutcome, StaticIdentity, WordSource,
};
use lunetype::term::{Canvas, GameView, ResultsCard, Screen, Viewport};

/// How long the final frame stays up before the results screen.
const GAME_OVER_HOLD: Duration = Duration::from_millis(1200);

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_tracing(config.log_path.as_deref())?;

    let mut screen = Screen::open()?;
    let result = run(&mut screen, config);

    // Restore the terminal before any error reaches stderr.
    let _ = screen.close();
    result
}

/// Log to a file when one is configured; the terminal itself belongs to the game.
fn init_tracing(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(screen: &mut Screen, config: GameConfig) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(play(screen, config))
}

async fn play(screen: &mut Screen, config: GameConfig) -> Result<()> {
    let view = GameView::default();
    let mut canvas = Canvas::default();

    let (event_tx, mut events) = mpsc::channel::<HostEvent>(256);
    event_tx
        .send(HostEvent::Resize(view.play_area(current_viewport())))
        .await?;
    spawn_input_thread(event_tx, GameView::default());

    let (snap_tx, mut snap_rx) = watch::channel(GameSnapshot::default());
    let words = WordSource::File(config.words_path.clone());
    let identity = StaticIdentity::new(config.user.clone());
    let store = JsonFileScoreStore::new(config.scores_path.clone());
    let game = GameLoop::new(config, identity, store).with_snapshots(snap_tx);

    let outcome = tokio::select! {
        outcome = game.run(words, &mut events) => outcome?,
        Err(e) = render_frames(screen, &view, &mut canvas, &mut snap_rx) => return Err(e),
    };

    let result = match outcome {
        LoopOutcome::Finished(result) => result,
        LoopOutcome::Aborted(_) => return Ok(()),
    };

    // Final GAME OVER frame, then the results screen.
    draw_snapshot(screen, &view, &mut canvas, &snap_rx.borrow())?;
    tokio::time::sleep(GAME_OVER_HOLD).await;
    while let Ok(ev) = events.try_recv() {
        if ev == HostEvent::Exit {
            return Ok(());
        }
    }

    let card = ResultsCard {
        destroyed: result.destroyed_count,
        difficulty: result.difficulty,
        high_score: result.high_score,
    };
    loop {
        view.render_results_into(&card, current_viewport(), &mut canvas);
        screen.present(&mut canvas)?;
        match events.recv().await {
            Some(HostEvent::Resize(_)) => continue,
            Some(HostEvent::Key(_)) | Some(HostEvent::Exit) | None => return Ok(()),
        }
    }
}

/// Redraw whenever the game loop publishes a new snapshot. Only returns on error.
async fn render_frames(
    screen: &mut Screen,
    view: &GameView,
    canvas: &mut Canvas,
    snaps: &mut watch::Receiver<GameSnapshot>,
) -> Result<()> {
    loop {
        if snaps.changed().await.is_err() {
            return std::future::pending().await;
        }
        {
            let snap = snaps.borrow_and_update();
            view.render_into(&snap, current_viewport(), canvas);
        }
        screen.present(canvas)?;
    }
}

fn draw_snapshot(
    screen: &mut Screen,
    view: &GameView,
    canvas: &mut Canvas,
    snap: &GameSnapshot,
) -> Result<()> {
    view.render_into(snap, current_viewport(), canvas);
    screen.present(canvas)
}

fn current_viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}

/// Forward terminal events until the receiving side goes away.
fn spawn_input_thread(tx: mpsc::Sender<HostEvent>, view: GameView) {
    thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(Duration::from_millis(100)) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "terminal input unavailable");
                    return;
                }
            }

            let ev = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        HostEvent::Exit
                    } else {
                        HostEvent::Key(map_key_event(key))
                    }
                }
                Ok(Event::Resize(w, h)) => HostEvent::Resize(view.play_area(Viewport::new(w, h))),
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(error = %e, "terminal input unavailable");
                    return;
                }
            };

            if tx.blocking_send(ev).is_err() {
                return;
            }
        }
    });
}
