pub mod config;
pub mod csv_table;
pub mod dataset;
pub mod error;

pub use config::load_config;
pub use csv_table::{CsvTable, read_csv_table};
pub use dataset::build_dataset;
pub use error::{IngestError, Result};
