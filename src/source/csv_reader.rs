use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use super::table::Table;
use crate::error::Result;

/// Read CSV data with a header row into a [`Table`].
///
/// Ragged rows are rejected by the CSV reader itself.
pub fn read_csv<R: Read>(reader: R) -> Result<Table> {
    let rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let table = read_records(rdr)?;
    debug!(
        columns = table.columns().len(),
        rows = table.len(),
        "read csv table"
    );
    Ok(table)
}

/// Read a CSV file with a header row into a [`Table`].
pub fn read_csv_path<P: AsRef<Path>>(path: P) -> Result<Table> {
    let rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path.as_ref())?;
    let table = read_records(rdr)?;
    debug!(path = %path.as_ref().display(), rows = table.len(), "loaded csv file");
    Ok(table)
}

fn read_records<R: Read>(mut rdr: csv::Reader<R>) -> Result<Table> {
    let mut table = Table::new(rdr.headers()?.iter());
    for record in rdr.records() {
        table.push_row(record?.iter())?;
    }
    Ok(table)
}
