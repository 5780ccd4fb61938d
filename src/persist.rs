//! Flat-file aggregates. Writes go through a temp file in the destination
//! directory and are renamed into place.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::loader::column_index;
use crate::record::{SpeakerCount, SpeakerSeasonCount};

/// Runs `write` against a temp file next to `path`, then renames it over
/// `path`. Parent directories are created as needed.
pub fn write_atomic(path: &Path, write: impl FnOnce(&mut dyn Write) -> Result<()>) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(|e| Error::io(parent_dir, e))?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| Error::io(parent_dir, e))?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        write(&mut writer)?;
        writer.flush().map_err(|e| Error::io(path, e))?;
    }
    temp_file.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

fn write_rows<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
    write_atomic(path, |out| {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
        writer.write_record(header).map_err(|e| Error::csv(path, e))?;
        for row in rows {
            writer.serialize(row).map_err(|e| Error::csv(path, e))?;
        }
        writer.flush().map_err(|e| Error::io(path, e))?;
        Ok(())
    })
}

/// `speaker,season,word_count`
pub fn write_speaker_season(path: &Path, rows: &[SpeakerSeasonCount]) -> Result<()> {
    write_rows(path, &["speaker", "season", "word_count"], rows)
}

/// `speaker,word_count`
pub fn write_speaker(path: &Path, rows: &[SpeakerCount]) -> Result<()> {
    write_rows(path, &["speaker", "word_count"], rows)
}

/// Reads back what [`write_speaker_season`] wrote, in file order.
pub fn read_speaker_season(path: &Path) -> Result<Vec<SpeakerSeasonCount>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| Error::csv(path, e))?;
    let headers = reader.headers().map_err(|e| Error::csv(path, e))?.clone();
    for column in ["speaker", "season", "word_count"] {
        column_index(&headers, column, path)?;
    }

    reader
        .deserialize()
        .map(|row| row.map_err(|e| Error::csv(path, e)))
        .collect()
}
