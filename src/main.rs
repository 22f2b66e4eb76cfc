//! Amida Ladder entry point
//!
//! Terminal host: loads participants, runs one draw with the paced reveal and
//! prints the ladder with the winning paths.

use std::cell::RefCell;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tokio::time::Instant;

use amida_ladder::cue::TickCue;
use amida_ladder::ladder::RevealOutcome;
use amida_ladder::render::render_ladder;
use amida_ladder::{GameController, NamesFile, Settings, drive_reveal};

/// Draw winners with a ladder lottery
#[derive(Debug, Parser)]
#[command(name = "amida-ladder", version)]
struct Args {
    /// Participant names, left to right
    names: Vec<String>,

    /// Read participants from a file (one name per line)
    #[arg(long)]
    names_file: Option<PathBuf>,

    /// Number of winners
    #[arg(short, long, default_value = "1")]
    winners: String,

    /// RNG seed, for replaying a draw
    #[arg(long)]
    seed: Option<u64>,

    /// Ladder rows
    #[arg(long)]
    rows: Option<usize>,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Drop a participant before the draw (repeatable)
    #[arg(long = "remove", value_name = "NAME")]
    remove: Vec<String>,

    /// Redraw the ladder on every reveal step
    #[arg(long)]
    animate: bool,

    /// Ring the terminal bell on drum-roll ticks
    #[arg(long)]
    bell: bool,
}

type Shared = Rc<RefCell<GameController>>;

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("reading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(rows) = args.rows {
        settings.rows = rows;
    }
    settings.validate()?;
    Ok(settings)
}

fn setup(args: &Args) -> Result<GameController> {
    let mut controller = GameController::new(load_settings(args)?);

    if !args.names.is_empty() {
        controller
            .configure(args.names.clone())
            .context("setting up participants")?;
    } else if let Some(path) = &args.names_file {
        controller
            .refresh(&NamesFile::new(path))
            .context("loading participants")?;
    } else {
        bail!("no participants: pass names or --names-file");
    }

    for name in &args.remove {
        if !controller.remove_participant(name) {
            log::warn!("No participant named {name}");
        }
    }
    if controller.lattice().is_none() {
        bail!(
            "need at least two participants (got {})",
            controller.participants().len()
        );
    }
    Ok(controller)
}

/// Call `frame` every `every` until the draw stops playing
async fn while_playing(
    controller: &Shared,
    every: Duration,
    mut frame: impl FnMut(&GameController),
) {
    let mut ticker = tokio::time::interval(every);
    loop {
        ticker.tick().await;
        let c = controller.borrow();
        if !c.is_playing() {
            break;
        }
        frame(&c);
    }
}

async fn animate(controller: &Shared, every: Duration) {
    let mut shown = usize::MAX;
    while_playing(controller, every, |c| {
        let lit = c.reveal_state().len();
        if lit == shown {
            return;
        }
        shown = lit;
        if let Some(lattice) = c.lattice() {
            print!("\x1b[2J\x1b[H");
            println!("{}", render_ladder(lattice, c.participants(), c.reveal_state(), None));
        }
    })
    .await;
}

async fn ring_bell(controller: &Shared, cues: Vec<TickCue>) {
    let start = Instant::now();
    for cue in cues {
        tokio::time::sleep_until(start + cue.at).await;
        if !controller.borrow().is_playing() {
            break;
        }
        print!("\x07");
        let _ = std::io::stdout().flush();
    }
}

async fn reset_on_interrupt(controller: &Shared) {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            log::warn!("Interrupted, resetting draw");
            controller.borrow_mut().reset();
        }
        _ = while_playing(controller, Duration::from_millis(50), |_| {}) => {}
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Amida Ladder starting...");

    let controller: Shared = Rc::new(RefCell::new(setup(&args)?));

    let (task, ticket) = controller.borrow_mut().start_from_input(&args.winners)?;
    let frame_every = task.pacing().step_delay.max(Duration::from_millis(16));
    let cues = if args.bell {
        controller.borrow().tick_cues()
    } else {
        Vec::new()
    };

    let (outcome, (), (), ()) = tokio::join!(
        drive_reveal(&controller, task, ticket),
        async {
            if args.animate {
                animate(&controller, frame_every).await;
            }
        },
        ring_bell(&controller, cues),
        reset_on_interrupt(&controller),
    );

    let c = controller.borrow();
    match (outcome, c.result(), c.lattice()) {
        (RevealOutcome::Completed, Some(result), Some(lattice)) => {
            if args.animate {
                print!("\x1b[2J\x1b[H");
            }
            println!(
                "{}",
                render_ladder(
                    lattice,
                    c.participants(),
                    c.reveal_state(),
                    Some(result.per_column_outcome.as_slice())
                )
            );
            println!();
            println!("Winners: {}", result.winner_names.join(", "));
            println!("Seed: {}", c.seed());
        }
        _ => println!("Draw cancelled"),
    }

    Ok(())
}
