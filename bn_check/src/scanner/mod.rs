//! Record scanning for test vector files

mod error;
mod hex;
mod reader;
mod record;

pub use error::{ScanError, ScanResult};
pub use hex::parse_hex;
pub use reader::RecordScanner;
pub use record::Record;
