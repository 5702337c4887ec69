//! Reference protocol layers.
//!
//! Each protocol follows the same structure:
//! - `layout`: header size and field constants (source of truth)
//! - `packet`: typed header plus its `Packable` implementation
//!
//! Field-level validation lives in `packet`; byte access goes through
//! [`Buffer`](crate::Buffer) only, so no layer indexes raw slices directly.

pub mod common;
pub mod ethernet;
pub mod sll;
pub mod vlan;
