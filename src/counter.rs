use log::debug;

use crate::record::{CountedRecord, TokenizedRecord};

pub fn count_words(record: &TokenizedRecord) -> u64 {
    record.word_tok.len() as u64
}

/// Attaches a word count to every record, keeping order.
pub fn count_lines(records: Vec<TokenizedRecord>) -> Vec<CountedRecord> {
    records
        .into_iter()
        .map(|tokenized| {
            let word_count = count_words(&tokenized);
            debug!("{}: {}", tokenized.line.speaker, word_count);
            CountedRecord {
                tokenized,
                word_count,
            }
        })
        .collect()
}
