//! Export adapter. CSV rendering and the filesystem ExportPort.

pub mod csv_utils;
pub mod fs_export;

pub use csv_utils::leads_to_csv;
pub use fs_export::FsExporter;
