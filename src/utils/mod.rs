// Utils compartidos

pub mod barcode_ffi;
