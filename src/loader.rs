use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::record::LineRecord;

pub const REQUIRED_COLUMNS: [&str; 3] = ["season", "speaker", "line_text"];

/// Position of `column` in a header row, or a `MissingColumn` error.
pub(crate) fn column_index(headers: &csv::StringRecord, column: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| Error::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

/// Reads every dialogue line from a CSV with at least `season`, `speaker`
/// and `line_text` columns. Other columns are ignored; empty cells read as
/// empty strings.
pub fn load_lines(path: &Path) -> Result<Vec<LineRecord>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| Error::csv(path, e))?;
    let headers = reader.headers().map_err(|e| Error::csv(path, e))?.clone();
    info!("columns: {:?}", headers.iter().collect::<Vec<_>>());

    let [season, speaker, line_text] = REQUIRED_COLUMNS;
    let season_ix = column_index(&headers, season, path)?;
    let speaker_ix = column_index(&headers, speaker, path)?;
    let text_ix = column_index(&headers, line_text, path)?;

    let mut lines = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| Error::csv(path, e))?;
        let field = |ix: usize| row.get(ix).unwrap_or_default().to_string();
        lines.push(LineRecord {
            season: field(season_ix),
            speaker: field(speaker_ix),
            line_text: field(text_ix),
        });
    }

    info!("loaded {} lines x {} columns from {}", lines.len(), headers.len(), path.display());
    Ok(lines)
}
