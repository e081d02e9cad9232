use anyhow::Result;
use derive_new::new;
use std::{fs, path::PathBuf};
use thiserror::Error;
use tracing::info;

pub mod csv;
pub mod model;
pub mod render;
pub mod view;

pub use model::{Day, Record, Records};
pub use view::{ClassSummary, ScheduleView};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Schedule data is empty")]
    EmptyData,
    #[error("Schedule data is missing the {0} column")]
    MissingColumn(&'static str),
}

/// Read a schedule CSV file and build the record list for this run. The file
/// read is the only I/O in the crate; everything downstream is pure.
pub fn load(data_file: PathBuf) -> Result<Records> {
    Loader::new(data_file).load()
}

#[derive(new)]
struct Loader {
    data_file: PathBuf,
}

impl Loader {
    fn load(&self) -> Result<Records> {
        let text = fs::read_to_string(&self.data_file)?;
        let table = csv::parse(&text)?;
        let records = model::records_from_table(&table)?;
        info!(
            rows = table.len(),
            records = records.len(),
            file = %self.data_file.display(),
            "loaded schedule data"
        );
        Ok(records)
    }
}
