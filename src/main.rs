//! crossbook - run one matching session over an order file.
//!
//! ```bash
//! crossbook trades.csv.gz --participant Kaylee
//! RUST_LOG=crossbook=debug crossbook trades.csv --positions --book
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crossbook::config::DEFAULT_ORDER_CAPACITY;
use crossbook::feed::FeedReader;
use crossbook::types::price::from_cents;
use crossbook::{EngineConfig, MatchingEngine, Order, SessionReport};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Order file, plain or gzip compressed
    input: PathBuf,

    /// Print this participant's net position
    #[arg(short, long)]
    participant: Option<String>,

    /// Print every participant's net position
    #[arg(long)]
    positions: bool,

    /// Print the orders left in the book
    #[arg(long)]
    book: bool,

    /// Resting order slots to pre-allocate
    #[arg(long, env = "CROSSBOOK_ORDER_CAPACITY", default_value_t = DEFAULT_ORDER_CAPACITY)]
    capacity: usize,
}

fn run(cli: &Cli) -> anyhow::Result<SessionReport> {
    let mut feed = FeedReader::open(&cli.input)
        .with_context(|| format!("opening {}", cli.input.display()))?;

    let config = EngineConfig::default().with_order_capacity(cli.capacity);
    let mut engine = MatchingEngine::with_config(config);

    for order in feed.by_ref() {
        let order = order.with_context(|| format!("reading {}", cli.input.display()))?;
        engine.submit(order)?;
    }

    info!(
        rows = feed.rows(),
        skipped = feed.skipped(),
        orders = engine.orders_processed(),
        fills = engine.fills_executed(),
        volume = engine.volume(),
        "feed exhausted"
    );

    Ok(engine.close_session())
}

fn print_book(label: &str, orders: &[Order]) {
    println!("{label}:");
    for order in orders {
        println!(
            "  {}: by {} for {} shares at {}",
            order.timestamp,
            order.participant,
            order.quantity,
            from_cents(order.price)
        );
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let start = Instant::now();

    let report = run(&cli)?;

    if let Some(name) = &cli.participant {
        let position = report
            .positions
            .iter()
            .find(|(participant, _)| participant == name)
            .map(|(_, position)| *position);
        match position {
            Some(position) => println!("{name}: {position}"),
            None => println!("{name}: never traded"),
        }
    }

    if cli.positions {
        for (participant, position) in &report.positions {
            println!("{participant}: {position}");
        }
    }

    if cli.book {
        print_book("Bids", &report.bids);
        print_book("Offers", &report.offers);
    }

    println!("State root: {}", report.summary.state_root_hex());
    println!("Runtime: {:.3}s", start.elapsed().as_secs_f64());
    Ok(())
}
