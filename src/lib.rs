//! Word counts per speaker and season from a CSV of TV dialogue, plus an
//! area chart of the result.

pub mod aggregate;
pub mod config;
pub mod counter;
pub mod error;
pub mod loader;
pub mod persist;
pub mod pipeline;
pub mod plot;
pub mod record;
pub mod tokenizer;

pub use config::Config;
pub use error::{Error, Result};
pub use pipeline::{plot, preprocess, PlotSummary, PreprocessSummary};
pub use tokenizer::Tokenizer;
