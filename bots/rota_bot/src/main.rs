mod http_service;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rota::{visualize_board, ActionSelector, Side};
use rota_bot_utils::{Session, SessionConfig, SessionOutcome, MOVES_PER_ROUND, TARGET_ROUNDS};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::http_service::{HttpService, DEFAULT_URL};

#[derive(Parser)]
struct Args {
    /// The email address the session is registered to
    #[arg(short, long)]
    email: String,

    /// Endpoint of the game service
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// Rounds in a row that must be survived
    #[arg(long, default_value_t = TARGET_ROUNDS)]
    rounds: u32,

    /// Actions after which a round counts as survived
    #[arg(long, default_value_t = MOVES_PER_ROUND)]
    moves_per_round: u32,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut selector = ActionSelector::new(StdRng::seed_from_u64(seed));
    let mut service = HttpService::new(args.url, args.email)?;
    let mut session = Session::new(SessionConfig {
        target_rounds: args.rounds,
        moves_per_round: args.moves_per_round,
    });

    match session.play(&mut service, &mut selector, Side::Player)? {
        SessionOutcome::Completed { hash } => {
            println!("Hash: {}", hash.as_deref().unwrap_or("<none>"));
            Ok(())
        }
        SessionOutcome::Lost {
            rounds_survived,
            winner,
            board,
        } => {
            eprintln!("{}", visualize_board(&board));
            anyhow::bail!(
                "The {} won round {}, no hash this time",
                winner,
                rounds_survived + 1
            )
        }
    }
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
