//! CSV persistence for frequency tables.
//!
//! The on-disk shape is two columns with a header row:
//!
//! ```text
//! word,count
//! the,1021
//! and,864
//! ```
//!
//! Rows are written and read in table order, so a saved table loads back
//! unchanged.

use std::io::{Read, Write};

use camino::Utf8Path;

use crate::counts::{FrequencyTable, WordCount};
use crate::dataset::ensure_parent_dir;
use crate::error::{DatasetError, DatasetResult};

/// Column names of the CSV header row.
pub const HEADER: [&str; 2] = ["word", "count"];

/// Write `table` as CSV to any writer.
pub fn write_word_counts<W: Write>(writer: W, table: &FrequencyTable) -> DatasetResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    // Explicit header: an empty table still produces a two-column file.
    csv.write_record(HEADER)?;
    for row in table.rows() {
        csv.write_record([row.word.as_str(), row.count.to_string().as_str()])?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Read a CSV table written by [`write_word_counts`].
pub fn read_word_counts<R: Read>(reader: R) -> DatasetResult<FrequencyTable> {
    let mut csv = csv::Reader::from_reader(reader);
    let rows = csv
        .deserialize::<WordCount>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FrequencyTable::from_rows(rows))
}

/// Save `table` to a CSV file, creating parent directories as needed.
#[tracing::instrument(skip_all, fields(path = %path, rows = table.len()))]
pub fn save_word_counts(path: &Utf8Path, table: &FrequencyTable) -> DatasetResult<()> {
    ensure_parent_dir(path)?;
    let file = std::fs::File::create(path.as_std_path()).map_err(|source| DatasetError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    write_word_counts(std::io::BufWriter::new(file), table)
}

/// Load a CSV frequency table from disk.
#[tracing::instrument(skip_all, fields(path = %path))]
pub fn load_word_counts(path: &Utf8Path) -> DatasetResult<FrequencyTable> {
    let file = std::fs::File::open(path.as_std_path()).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_word_counts(std::io::BufReader::new(file))?;
    tracing::debug!(rows = table.len(), "loaded word counts");
    Ok(table)
}
