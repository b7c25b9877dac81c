pub mod scheduler;

pub use scheduler::{LocalFuture, Scheduler, WasmScheduler};
