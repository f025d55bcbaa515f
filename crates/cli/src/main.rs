use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use shelltree_core::{human::human_bytes, read_transcript, Answers, Config};

#[derive(Parser, Debug)]
#[command(name = "shelltree", about = "Rebuild a directory tree from a cd/ls transcript")]
struct Args {
    /// Transcript to replay; reads stdin when omitted
    transcript: Option<PathBuf>,
    /// JSON file with `threshold`, `capacity` and `needed`
    #[arg(long)]
    config: Option<PathBuf>,
    /// Largest directory counted by the small-directories sum
    #[arg(long)]
    threshold: Option<u64>,
    /// Total disk capacity
    #[arg(long)]
    capacity: Option<u64>,
    /// Free space required after deletion
    #[arg(long)]
    needed: Option<u64>,
    /// Output JSON report path
    #[arg(short, long)]
    json: Option<PathBuf>,
    /// Output CSV report path
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Print human readable sizes to stderr
    #[arg(long)]
    human: bool,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Config::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
            }
            None => Config::default(),
        };
        if let Some(t) = self.threshold {
            cfg.threshold = t;
        }
        if let Some(c) = self.capacity {
            cfg.capacity = c;
        }
        if let Some(n) = self.needed {
            cfg.needed = n;
        }
        Ok(cfg)
    }
}

fn setup_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .compact()
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_tracing(&args.log_level);
    debug!("Parsed CLI arguments: {args:?}");

    let cfg = args.load_config()?;

    let tree = match &args.transcript {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            read_transcript(BufReader::new(file))
        }
        None => read_transcript(io::stdin().lock()),
    }
    .context("replaying transcript")?;

    let answers = Answers::compute(&tree, &cfg)?;
    info!(?answers, "queries done");

    if let Some(path) = &args.json {
        let json = shelltree_core::export::to_json(&tree);
        std::fs::write(path, serde_json::to_string_pretty(&json)?)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        shelltree_core::export::to_csv(&tree, file)?;
    }

    println!("{}", answers.small_dirs_sum);
    println!("{}", answers.deletion_candidate);

    if args.human {
        eprintln!(
            "used {}, must free {}, delete a directory of {}",
            human_bytes(answers.used),
            human_bytes(answers.min_space),
            human_bytes(answers.deletion_candidate)
        );
    }
    Ok(())
}
