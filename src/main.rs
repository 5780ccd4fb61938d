use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use speaker_words::config::{program_root, Config};
use speaker_words::pipeline;

/// Word count per character per season, from a CSV of dialogue lines.
#[derive(Parser, Debug)]
#[command(name = "speaker-words", version, about)]
struct Cli {
    /// Tokenize and count the raw lines, writing both aggregate files.
    #[arg(long)]
    preprocess: bool,

    /// Build the area chart from the (speaker, season) aggregate.
    /// This is the default when no phase is given.
    #[arg(long)]
    plot: bool,

    /// Directory holding data/ and output/. Defaults to the binary's directory.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Raw dialogue CSV, instead of <root>/data/the_office_lines.csv.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Where aggregates and the chart go, instead of <root>/output.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Chart file, instead of <output>/the_office_area_plot_web.html.
    #[arg(long)]
    chart: Option<PathBuf>,

    /// How many top-ranked characters are drawn when the chart opens.
    #[arg(long)]
    visible: Option<usize>,

    /// Tokenizer threads. Defaults to one per core.
    #[arg(long)]
    threads: Option<usize>,

    /// -v for debug output, -vv for per-line tokens.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> Config {
        let root = self.root.clone().unwrap_or_else(program_root);
        let mut config = Config::from_root(&root);
        if let Some(dir) = &self.output_dir {
            config = config.with_output_dir(dir);
        }
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(chart) = &self.chart {
            config.chart_output_path = chart.clone();
        }
        if let Some(visible) = self.visible {
            config.default_visible_count = visible;
        }
        config
    }

    /// Plot runs when asked for, or when no phase is named at all.
    fn runs_plot(&self) -> bool {
        self.plot || !self.preprocess
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("configuring tokenizer thread pool")?;
    }

    let config = cli.config();
    let start = Instant::now();

    if cli.preprocess {
        let summary = pipeline::preprocess(&config).with_context(|| {
            format!("preprocessing {}", config.input_path.display())
        })?;
        info!(
            "preprocess done: {} lines, {} words, {} speakers",
            summary.lines, summary.words, summary.speakers
        );
    }

    if cli.runs_plot() {
        let summary = pipeline::plot(&config, None).with_context(|| {
            format!("plotting {}", config.preprocess_output_path.display())
        })?;
        info!(
            "plot done: {} series ({} empty)",
            summary.series, summary.empty_series
        );
    }

    info!("finished (took {:?})", start.elapsed());
    Ok(())
}
