pub mod scanner;
pub mod result_item;
pub mod app;

pub use scanner::{Scanner, ScannerProps};
pub use result_item::{format_result, ResultItem};
pub use app::App;
