//! Blockfall terminal runner (default binary).
//!
//! `blockfall` / `blockfall play` runs the game in the terminal with the
//! attract-mode menu; `blockfall simulate` lets the bot play headless.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::warn;
use tracing_subscriber::filter::LevelFilter;

use blockfall::app::App;
use blockfall::audio;
use blockfall::cli::{Cli, Command};
use blockfall::diag::{self, LogSink};
use blockfall::settings::Settings;
use blockfall::simulate;
use blockfall::term::{FrameBuffer, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings().context("load settings")?;

    match cli.command() {
        Command::Play { .. } => play(settings),
        Command::Simulate { pieces, pretty } => run_simulation(settings, pieces, pretty),
    }
}

fn run_simulation(settings: Settings, pieces: u32, pretty: bool) -> Result<()> {
    let sink = match &settings.log_path {
        Some(path) => LogSink::File(path.clone()),
        None => LogSink::Stderr,
    };
    diag::init(&sink, LevelFilter::INFO)?;
    let mut config = settings.game;
    config.seed = Some(config.seed.unwrap_or_else(blockfall::app::clock_seed));

    let report = simulate::run(config, pieces);
    let json = if pretty {
        serde_json::to_string_pretty(&report.snapshot)?
    } else {
        serde_json::to_string(&report.snapshot)?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

fn play(settings: Settings) -> Result<()> {
    // Raw mode owns the screen, so the log only ever goes to a file.
    let sink = match &settings.log_path {
        Some(path) => LogSink::File(path.clone()),
        None => LogSink::Off,
    };
    diag::init(&sink, LevelFilter::INFO)?;

    let sound = match audio::open(settings.audio) {
        Ok(sound) => sound,
        Err(err) => {
            warn!(target: "audio", "{err}; continuing without sound");
            audio::open(false)?
        }
    };

    let mut app = App::new(settings, sound);

    let mut term = TerminalRenderer::new();
    term.enter()?;
    if term.key_release_events() {
        // Holds end on the real release event.
        app.set_key_release_timeout_ms(u32::MAX);
    }

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App) -> Result<()> {
    let tick_duration = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();
    let mut fb = FrameBuffer::new(0, 0);

    while !app.should_quit() {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.render_into(Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => app.handle_key_press(key),
                    // Terminal autorepeat; DAS/ARR handles repeats internally.
                    KeyEventKind::Repeat => {}
                    KeyEventKind::Release => app.handle_key_release(key),
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick with the real elapsed time so slow frames don't slow the game.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            app.tick(ms);
        }
    }
    Ok(())
}
