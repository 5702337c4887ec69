//! Linux cooked capture (SLL) header.
//!
//! A fixed 16-byte pseudo link-layer header written by capture tools when the
//! real link layer is unavailable. The source address sits in an 8-byte slot
//! prefixed by its significant length; the unused tail of the slot is zero
//! on the wire and ignored on decode. A declared length above the slot
//! capacity is rejected rather than clamped.

pub mod layout;
pub mod packet;

pub use packet::{PacketType, SllPacket};
