//! Grouped word-count sums.
//!
//! Both reductions go through a `BTreeMap`, so output is sorted by key and
//! identical input always yields identical output.

use std::collections::BTreeMap;

use crate::record::{CountedRecord, SpeakerCount, SpeakerSeasonCount};

/// One entry per (speaker, season) present in `records`, sorted by speaker
/// then season. Seasons compare as strings.
pub fn by_speaker_season(records: &[CountedRecord]) -> Vec<SpeakerSeasonCount> {
    let mut sums: BTreeMap<(&str, &str), u64> = BTreeMap::new();
    for rec in records {
        *sums.entry((rec.speaker(), rec.season())).or_default() += rec.word_count;
    }
    sums.into_iter()
        .map(|((speaker, season), word_count)| SpeakerSeasonCount {
            speaker: speaker.to_string(),
            season: season.to_string(),
            word_count,
        })
        .collect()
}

/// One entry per speaker, sorted by speaker.
pub fn by_speaker(records: &[CountedRecord]) -> Vec<SpeakerCount> {
    let mut sums: BTreeMap<&str, u64> = BTreeMap::new();
    for rec in records {
        *sums.entry(rec.speaker()).or_default() += rec.word_count;
    }
    sums.into_iter()
        .map(|(speaker, word_count)| SpeakerCount {
            speaker: speaker.to_string(),
            word_count,
        })
        .collect()
}

pub fn total_words(records: &[CountedRecord]) -> u64 {
    records.iter().map(|r| r.word_count).sum()
}
