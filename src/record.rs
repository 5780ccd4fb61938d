use serde::{Deserialize, Serialize};

/// One row of the source dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    pub season: String,
    pub speaker: String,
    pub line_text: String,
}

/// A line with its cleaned, lowercased word tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedRecord {
    pub line: LineRecord,
    pub word_tok: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountedRecord {
    pub tokenized: TokenizedRecord,
    pub word_count: u64,
}

impl CountedRecord {
    pub fn speaker(&self) -> &str {
        &self.tokenized.line.speaker
    }

    pub fn season(&self) -> &str {
        &self.tokenized.line.season
    }
}

/// Word count summed over one (speaker, season) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerSeasonCount {
    pub speaker: String,
    pub season: String,
    pub word_count: u64,
}

/// Word count summed over everything a speaker says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerCount {
    pub speaker: String,
    pub word_count: u64,
}
