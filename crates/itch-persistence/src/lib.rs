//! Export of hourly VWAP snapshots.
//!
//! Two layouts:
//! - CSV wide table: one row per instrument, one `VWAPn` column per window
//! - JSON Lines: one serialized snapshot per line

pub mod error;
pub mod export;
pub mod jsonl;
pub mod table;

pub use error::{PersistenceError, PersistenceResult};
pub use export::{default_output_path, export_to_path, ExportFormat};
pub use jsonl::JsonLinesWriter;
pub use table::{write_vwap_table, VwapTable};
