use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::engine::errors::PipelineError;
use crate::models::RawRecord;

/// Reads the whole source file. Any I/O or decoding fault is fatal.
pub fn read_source(path: &Path) -> Result<Vec<RawRecord>, PipelineError> {
    let file = std::fs::File::open(path).map_err(|error| PipelineError::SourceUnreadable {
        path: path.to_path_buf(),
        source: csv::Error::from(error)
    })?;

    parse_records(file).map_err(|source| PipelineError::SourceUnreadable { path: path.to_path_buf(), source })
}

/// Parses header-keyed CSV rows. Values are kept verbatim (no trimming) and
/// ragged rows are tolerated.
pub fn parse_records(reader: impl Read) -> Result<Vec<RawRecord>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let mut records = Vec::new();

    for row in reader.records() {
        records.push(RawRecord::from_csv(&headers, &row?));
    }

    Ok(records)
}
