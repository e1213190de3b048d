use anyhow::Context;
use clap::Parser;
use deduce::{files, Config, FactBase};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

/// Derive every fact that follows from a fact file and a rule file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// One `Relation(arg, ...)` per line
    facts: PathBuf,

    /// One `if <condition> then <predicate>` per line
    rules: PathBuf,

    /// Write the closure here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Evaluate the rules of each pass in parallel
    #[arg(long)]
    parallel: bool,

    /// Fail if the closure is not reached within this many passes
    #[arg(long)]
    max_passes: Option<u32>,
}

fn timed<R>(func: impl FnOnce() -> R) -> (Duration, R) {
    let start = Instant::now();
    let r = func();
    (start.elapsed(), r)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::default().parallel(args.parallel).max_passes(args.max_passes);

    let facts = files::read_facts(&args.facts)?;
    let rules = files::read_rules(&args.rules)?;
    tracing::info!(
        facts = facts.items.len(),
        rules = rules.items.len(),
        rejected = facts.errors.len() + rules.errors.len(),
        "inputs loaded"
    );

    let mut base: FactBase = facts.items.into_iter().collect();
    let (dur, saturation) = timed(|| base.saturate(&rules.items, &config));
    let saturation = saturation.context("computing the closure")?;
    tracing::info!(?dur, passes = saturation.passes, derived = saturation.derived, "closure done");

    match &args.output {
        Some(path) => files::write_facts(path, base.iter())?,
        None => print!("{}", files::format_facts(base.iter())),
    }
    Ok(())
}
