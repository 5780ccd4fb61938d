//! The two phases. Each reads only files, so either can run on its own once
//! its input exists.

use std::time::Instant;

use log::info;

use crate::aggregate::{by_speaker, by_speaker_season, total_words};
use crate::config::Config;
use crate::counter::count_lines;
use crate::error::Result;
use crate::loader::load_lines;
use crate::persist::{read_speaker_season, write_speaker, write_speaker_season};
use crate::plot::{build_chart, write_chart, Publisher};
use crate::tokenizer::{tokenize_lines, Tokenizer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessSummary {
    pub lines: usize,
    pub words: u64,
    pub speaker_seasons: usize,
    pub speakers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotSummary {
    pub series: usize,
    pub empty_series: usize,
    pub published_url: Option<String>,
}

/// Load → tokenize → count → aggregate → write both aggregate files.
pub fn preprocess(config: &Config) -> Result<PreprocessSummary> {
    let start = Instant::now();
    let tokenizer = Tokenizer::new()?;
    info!("tokenizer rules compiled (took {:?})", start.elapsed());

    let step = Instant::now();
    let lines = load_lines(&config.input_path)?;
    let line_count = lines.len();
    info!("read {} (took {:?})", config.input_path.display(), step.elapsed());

    let step = Instant::now();
    let tokenized = tokenize_lines(&tokenizer, lines);
    info!("tokenized {} lines (took {:?})", line_count, step.elapsed());

    let counted = count_lines(tokenized);
    let words = total_words(&counted);

    let pairs = by_speaker_season(&counted);
    let speakers = by_speaker(&counted);
    info!(
        "{} words across {} speakers and {} speaker/season pairs",
        words,
        speakers.len(),
        pairs.len()
    );

    write_speaker_season(&config.preprocess_output_path, &pairs)?;
    write_speaker(&config.speaker_output_path, &speakers)?;
    info!(
        "wrote {} and {} (total {:?})",
        config.preprocess_output_path.display(),
        config.speaker_output_path.display(),
        start.elapsed()
    );

    Ok(PreprocessSummary {
        lines: line_count,
        words,
        speaker_seasons: pairs.len(),
        speakers: speakers.len(),
    })
}

/// Reads the (speaker, season) aggregate and writes the chart. Publishing
/// only happens when a publisher is given.
pub fn plot(config: &Config, publisher: Option<&dyn Publisher>) -> Result<PlotSummary> {
    let rows = read_speaker_season(&config.preprocess_output_path)?;
    info!(
        "read {} rows from {}",
        rows.len(),
        config.preprocess_output_path.display()
    );

    let chart = build_chart(
        &rows,
        &config.character_rank_list,
        config.default_visible_count,
    );
    let empty_series = chart.data.iter().filter(|s| s.x.is_empty()).count();
    for series in chart.data.iter().filter(|s| s.x.is_empty()) {
        info!("no rows for {}", series.name);
    }

    write_chart(&config.chart_output_path, &chart)?;
    info!("chart written to {}", config.chart_output_path.display());

    let published_url = match publisher {
        Some(publisher) => {
            let url = publisher.publish(&chart)?;
            info!("chart published at {}", url);
            Some(url)
        }
        None => None,
    };

    Ok(PlotSummary {
        series: chart.data.len(),
        empty_series,
        published_url,
    })
}
