pub mod decode;
pub mod quagga;

pub use decode::{DecodeAttempt, ProcessedFrame, Region, ScanResult};
pub use quagga::QuaggaResult;
