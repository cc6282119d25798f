use std::path::PathBuf;

use clap::Parser;
use judge::{LocalService, Recorder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rota::{visualize_board, ActionSelector, SelectionError, Side};
use rota_bot_utils::{Session, SessionConfig, SessionOutcome, MOVES_PER_ROUND, TARGET_ROUNDS};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// How many sessions to play
    #[arg(short, long, default_value_t = 10)]
    num_sessions: usize,

    /// Rounds in a row that must be survived to complete a session
    #[arg(long, default_value_t = TARGET_ROUNDS)]
    rounds: u32,

    /// Actions after which a round counts as survived
    #[arg(long, default_value_t = MOVES_PER_ROUND)]
    moves_per_round: u32,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Record every round's snapshots as JSON files into this directory
    #[arg(short, long)]
    record_rounds_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct Tally {
    completed: usize,
    won_by: [usize; 2],
    no_candidate: usize,
    rounds_survived: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let config = SessionConfig {
        target_rounds: args.rounds,
        moves_per_round: args.moves_per_round,
    };

    let mut tally = Tally::default();
    for session_idx in 0..args.num_sessions {
        let recorder = match &args.record_rounds_to_directory {
            Some(dir_path) => {
                let session_dir = dir_path.join(format!("session_{:0>4}", session_idx + 1));
                std::fs::create_dir_all(&session_dir)?;
                Some(Recorder::new(session_dir)?)
            }
            None => None,
        };
        let mut service = LocalService::new(rng.gen(), config, recorder);
        let mut selector = ActionSelector::new(StdRng::seed_from_u64(rng.gen()));
        let mut session = Session::new(config);

        match session.play(&mut service, &mut selector, Side::Player) {
            Ok(SessionOutcome::Completed { hash }) => {
                debug!(session_idx, hash = hash.as_deref().unwrap_or(""), "Completed");
                tally.completed += 1;
            }
            Ok(SessionOutcome::Lost {
                rounds_survived,
                winner,
                board,
            }) => {
                info!(session_idx, rounds_survived, %winner, "Lost\n{}", visualize_board(&board));
                match winner {
                    Side::Player => tally.won_by[0] += 1,
                    Side::Computer => tally.won_by[1] += 1,
                }
            }
            Err(err) if err.downcast_ref::<SelectionError>().is_some() => {
                info!(session_idx, "{:#}", err);
                tally.no_candidate += 1;
            }
            Err(err) => return Err(err),
        }
        tally.rounds_survived += u64::from(session.rounds_survived());
    }

    eprintln!(
        "End result after {} sessions:\n- {} completed\n- {} lost by winning a round\n- {} lost to the computer\n- {} stopped without a candidate action\n- {:.1} rounds survived on average",
        args.num_sessions,
        tally.completed,
        tally.won_by[0],
        tally.won_by[1],
        tally.no_candidate,
        tally.rounds_survived as f64 / args.num_sessions.max(1) as f64,
    );

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
