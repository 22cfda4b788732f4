// src/output/mod.rs

pub mod chart;
pub mod console;
pub mod csv_file;
pub mod json_file;

pub use chart::{chart_file_name, write_chart};
pub use console::print_dataset;
pub use csv_file::write_csv;
pub use json_file::write_json;
