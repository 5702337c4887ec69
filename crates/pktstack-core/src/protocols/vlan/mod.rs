//! IEEE 802.1Q / 802.1ad VLAN tag.
//!
//! The tag follows an outer ether-type of 0x8100 (or 0x88a8 for a service
//! tag) and carries the inner ether-type, so tags chain until a non-VLAN
//! ether-type is reached.

pub mod layout;
pub mod packet;

pub use packet::VlanTag;
