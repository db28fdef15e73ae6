//! Terminal match-3 runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `tui_match3::term`.
//! Accepted swaps are played back one cascade step at a time: the swapped pair
//! flashes, the matched cells light up, then the board falls and refills.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tui_match3::config::AppConfig;
use tui_match3::core::{Cascade, EngineError, Game, GameSnapshot};
use tui_match3::input::{
    handle_key_event, handle_mouse_event, should_quit, Intent, SelectionHandler,
};
use tui_match3::logging;
use tui_match3::term::{BoardOverlay, FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_match3::types::{Pos, CLEAR_MS, FALL_MS, SWAP_FLASH_MS, TICK_MS};
use tui_match3::vlog;

/// Where the front-end is in playing back a swap
enum Phase {
    /// Waiting for input
    Idle,
    /// The swapped pair is shown in place
    Swapped { cascade: Cascade, until: Instant },
    /// The pending matches are highlighted
    Clearing { cascade: Cascade, until: Instant },
    /// The board has fallen and refilled
    Falling { cascade: Cascade, until: Instant },
}

impl Phase {
    fn is_idle(&self) -> bool {
        matches!(self, Phase::Idle)
    }
}

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    config.validate().context("invalid MATCH3_* configuration")?;

    if let Some(path) = &config.log_path {
        logging::init_log_file(path).with_context(|| format!("open log file {}", path))?;
    }

    let game = Game::new(config.seed, config.rules).context("start game")?;
    vlog!("game {} started: seed={} rules={:?}", game.game_id(), config.seed, config.rules);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game);

    // Always try to restore terminal state.
    let _ = term.exit();
    logging::close_log();
    result
}

fn run(term: &mut TerminalRenderer, mut game: Game) -> Result<()> {
    let view = GameView::default();
    let mut selection = SelectionHandler::new();
    let mut phase = Phase::Idle;
    let mut message: Option<String> = None;

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let tick = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        game.snapshot_into(&mut snap);
        let overlay = BoardOverlay {
            cursor: phase.is_idle().then(|| selection.cursor()),
            selected: selection.selected(),
            clearing: match &phase {
                Phase::Clearing { cascade, .. } => Some(cascade.pending()),
                _ => None,
            },
            message: message.as_deref(),
        };
        view.render_into(&snap, &overlay, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input.
        if event::poll(tick)? {
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        vlog!("quit: score={} moves={}", game.score(), game.moves_remaining());
                        return Ok(());
                    }
                    handle_key_event(key)
                }
                Event::Mouse(mouse) => {
                    handle_mouse_event(mouse, |col, row| view.hit_test(viewport, col, row))
                }
                Event::Resize(..) => {
                    term.invalidate();
                    None
                }
                _ => None,
            };

            // Input is dropped while a cascade plays back.
            if let Some(action) = action.filter(|_| phase.is_idle()) {
                match selection.handle(action) {
                    Some(Intent::NewGame) => {
                        game.new_game();
                        message = None;
                        vlog!("game {} started (new game)", game.game_id());
                    }
                    Some(Intent::Swap(a, b)) => {
                        if let Some(next) = start_swap(&mut game, a, b, &mut message) {
                            phase = next;
                        }
                    }
                    None => {}
                }
            }
        }

        phase = advance_phase(&mut game, phase, &mut message);
    }
}

fn start_swap(game: &mut Game, a: Pos, b: Pos, message: &mut Option<String>) -> Option<Phase> {
    if game.is_game_over() {
        return None;
    }

    match game.begin_swap(a, b) {
        Ok(Some(cascade)) => {
            vlog!(
                "swap {} <-> {} accepted: {} matched, moves left {}",
                a,
                b,
                cascade.pending().len(),
                game.moves_remaining()
            );
            *message = None;
            Some(Phase::Swapped {
                cascade,
                until: after(SWAP_FLASH_MS),
            })
        }
        Ok(None) => {
            vlog!("swap {} <-> {} rejected: no match", a, b);
            *message = Some("No match".to_string());
            None
        }
        Err(err) => {
            report_engine_error(err, message);
            None
        }
    }
}

fn advance_phase(game: &mut Game, phase: Phase, message: &mut Option<String>) -> Phase {
    let now = Instant::now();
    match phase {
        Phase::Swapped { cascade, until } if now >= until => Phase::Clearing {
            cascade,
            until: after(CLEAR_MS),
        },
        Phase::Clearing { mut cascade, until } if now >= until => {
            match game.advance(&mut cascade) {
                Ok(Some(step)) => {
                    vlog!(
                        "cascade step {}: {} matched, {} cleared, {} striped, +{} (score {})",
                        step.index,
                        step.matches.len(),
                        step.cleared,
                        step.striped,
                        step.points,
                        game.score()
                    );
                    Phase::Falling {
                        cascade,
                        until: after(FALL_MS),
                    }
                }
                Ok(None) => finish(game, message),
                Err(err) => {
                    report_engine_error(err, message);
                    finish(game, message)
                }
            }
        }
        Phase::Falling { cascade, until } if now >= until => {
            if cascade.is_done() {
                vlog!(
                    "cascade settled after {} steps, +{}",
                    cascade.steps(),
                    cascade.points()
                );
                finish(game, message)
            } else {
                Phase::Clearing {
                    cascade,
                    until: after(CLEAR_MS),
                }
            }
        }
        other => other,
    }
}

fn finish(game: &Game, message: &mut Option<String>) -> Phase {
    if game.is_game_over() {
        vlog!("game {} over: score={}", game.game_id(), game.score());
    } else if game.hint().is_none() {
        *message = Some("No moves left, press n".to_string());
        vlog!("game {} has no valid swap left", game.game_id());
    }
    Phase::Idle
}

fn report_engine_error(err: EngineError, message: &mut Option<String>) {
    if err.is_caller_error() {
        vlog!("request refused: {}", err);
    } else {
        vlog!("engine fault: {}", err);
    }
    *message = Some(err.to_string());
}

fn after(ms: u32) -> Instant {
    Instant::now() + Duration::from_millis(ms as u64)
}
