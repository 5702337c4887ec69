//! Ethernet II header.

pub mod layout;
pub mod packet;

pub use packet::EthernetFrame;
