pub mod csv_reader;
pub mod table;

pub use csv_reader::{read_csv, read_csv_path};
pub use table::Table;
