pub mod use_scanner;

pub use use_scanner::{use_scanner, UseScannerHandle};
