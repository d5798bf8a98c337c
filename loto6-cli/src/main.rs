mod analysis;
mod display;
mod wheel;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::ProgressBar;

use crate::analysis::rates::{combine_rates, occurrence_rates};
use crate::analysis::{recent_range, recent_windows};
use crate::display::{
    display_combined, display_draws, display_feed_origin, display_grids, display_parse_outcome,
    display_recent_report, display_window_report,
};
use crate::wheel::sampler::sample_grids;
use crate::wheel::{enumerate_grids, parse_number_list};
use loto6_data::feed::{self, acquire, DrawSource, HttpSource};
use loto6_data::models::Draw;
use loto6_data::parse::parse_table;

#[derive(Parser)]
#[command(name = "loto6", about = "Loto 6 wheel generator and draw-history statistics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct FeedArgs {
    /// Draw-history feed URL
    #[arg(long, default_value = feed::FEED_URL)]
    url: String,

    /// Local cache file
    #[arg(long, default_value = feed::CACHE_FILE)]
    cache: PathBuf,

    /// Fetch timeout in seconds
    #[arg(long, default_value_t = feed::FETCH_TIMEOUT_SECS)]
    timeout: u64,
}

#[derive(Subcommand)]
enum Command {
    /// Generate wheel combinations: 4 candidates plus 2 free numbers
    Generate {
        /// Candidate numbers, comma-separated (at least 4)
        #[arg(short, long)]
        candidates: String,

        /// Numbers barred from the free picks, comma-separated
        #[arg(short, long, default_value = "")]
        exclude: String,

        /// Highest number in the pool
        #[arg(short, long, default_value = "43")]
        range: u8,

        /// Size of the random sample to display
        #[arg(short, long, default_value = "200")]
        sample: usize,

        /// Seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Occurrence rates over the three most recent draw windows
    Stats {
        #[command(flatten)]
        feed: FeedArgs,

        /// Draws per window
        #[arg(short, long, default_value = "4")]
        window: usize,

        /// Entries kept when two windows are combined
        #[arg(short, long, default_value = "6")]
        top: usize,

        /// Span of the closing recent-draws ranking
        #[arg(long, default_value = "12")]
        recent: usize,
    },

    /// List the most recent draws
    List {
        #[command(flatten)]
        feed: FeedArgs,

        /// Number of draws to display
        #[arg(short, long, default_value = "10")]
        last: usize,
    },

    /// Refresh the local cache from the remote feed
    Fetch {
        #[command(flatten)]
        feed: FeedArgs,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            candidates,
            exclude,
            range,
            sample,
            seed,
        } => cmd_generate(&candidates, &exclude, range, sample, seed),
        Command::Stats {
            feed,
            window,
            top,
            recent,
        } => cmd_stats(&feed, window, top, recent),
        Command::List { feed, last } => cmd_list(&feed, last),
        Command::Fetch { feed } => cmd_fetch(&feed),
    }
}

fn cmd_generate(
    candidates: &str,
    exclude: &str,
    range: u8,
    sample: usize,
    seed: Option<u64>,
) -> Result<()> {
    let candidates = parse_number_list(candidates).context("invalid candidate list")?;
    let excluded = parse_number_list(exclude).context("invalid exclusion list")?;

    let grids = enumerate_grids(&candidates, &excluded, range)?;
    let picked = sample_grids(&grids, sample, seed);
    display_grids(&picked, grids.len());
    Ok(())
}

fn cmd_stats(feed_args: &FeedArgs, window: usize, top: usize, recent: usize) -> Result<()> {
    let draws = load_draws(feed_args)?;
    if draws.is_empty() {
        println!("No draw history. Run first: loto6 fetch");
        return Ok(());
    }

    let [a, b, c] = recent_windows(draws.len(), window)?;
    let report_a = occurrence_rates(&draws, a);
    let report_b = occurrence_rates(&draws, b);
    let report_c = occurrence_rates(&draws, c);

    display_window_report("A (latest)", &report_a);
    display_window_report("B", &report_b);
    display_window_report("C", &report_c);

    display_combined("C + B", &combine_rates(&report_c.entries, &report_b.entries, top));
    display_combined("B + A", &combine_rates(&report_b.entries, &report_a.entries, top));

    let recent_report = occurrence_rates(&draws, recent_range(draws.len(), recent)?);
    display_recent_report(recent, &recent_report);

    Ok(())
}

fn cmd_list(feed_args: &FeedArgs, last: usize) -> Result<()> {
    let draws = load_draws(feed_args)?;
    if draws.is_empty() {
        println!("No draw history. Run first: loto6 fetch");
        return Ok(());
    }

    let take = last.min(draws.len());
    let mut latest: Vec<Draw> = draws[draws.len() - take..].to_vec();
    latest.reverse();
    display_draws(&latest);
    Ok(())
}

fn cmd_fetch(feed_args: &FeedArgs) -> Result<()> {
    let source = http_source(feed_args)?;
    let data = fetch_with_spinner(|| source.fetch())?;
    feed::write_cache(&feed_args.cache, &data)?;

    println!("Cache refreshed: {}", feed_args.cache.display());
    let outcome = parse_table(&data)?;
    display_parse_outcome(&outcome);
    Ok(())
}

/// Acquire and parse the draw table, remote first with cache fallback.
fn load_draws(feed_args: &FeedArgs) -> Result<Vec<Draw>> {
    let source = http_source(feed_args)?;
    let (data, origin) = fetch_with_spinner(|| acquire(&source, &feed_args.cache))?;
    display_feed_origin(&origin);

    let outcome = parse_table(&data)?;
    display_parse_outcome(&outcome);
    Ok(outcome.draws)
}

fn http_source(feed_args: &FeedArgs) -> Result<HttpSource> {
    HttpSource::new(&feed_args.url, Duration::from_secs(feed_args.timeout))
}

fn fetch_with_spinner<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("fetching draw history...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = f();
    spinner.finish_and_clear();
    result
}
