//! Shared field types used by more than one layer.

mod addr;

pub use addr::{HwAddr, MacAddr};
