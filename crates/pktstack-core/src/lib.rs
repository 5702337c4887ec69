//! pktstack core library for stacked protocol header encoding and decoding.
//!
//! Raw bytes flow through a cursor [`Buffer`] into typed [`Layer`] values.
//! Each layer names the code of the layer that follows it; the [`registry`]
//! maps that code, within its [`Scope`], to a factory for the next layer, and
//! the [`stack`] assembler repeats this until the chain ends. Encoding walks
//! the same [`Stack`] in order and appends the undecoded payload.
//!
//! Decoding is byte-oriented and side-effect free: no I/O happens here, and
//! the only process-wide state is the read-only registry.
//!
//! Invariants:
//! - A successful `unpack` leaves the cursor exactly past that layer's header.
//! - Fields with a fixed on-wire capacity are checked before anything is
//!   written; values that do not fit are rejected, never truncated.
//! - Encoding a decoded stack reproduces the input bytes when decode
//!   discarded nothing (e.g. non-zero padding).
//! - A code missing from the registry ends the chain; it is not an error.
//!
//! # Examples
//! ```
//! use pktstack_core::{Layer, LayerKind, decode, encode};
//!
//! let bytes = [
//!     0x00, 0x04, 0x00, 0x01, 0x00, 0x06, 0x4c, 0x72, 0xb9, 0x54, 0xe5, 0x3d,
//!     0x00, 0x00, 0x08, 0x00,
//! ];
//! let stack = decode(&bytes, LayerKind::Sll)?;
//! let Layer::Sll(sll) = &stack.layers[0] else { unreachable!() };
//! assert_eq!(sll.addr.to_string(), "4c:72:b9:54:e5:3d");
//! assert_eq!(sll.ether_type, 0x0800);
//! assert_eq!(encode(&stack)?, bytes);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod buffer;
mod error;
mod layer;
pub mod protocols;
pub mod registry;
pub mod stack;

pub use buffer::Buffer;
pub use error::{AddrParseError, CodecError, DecodeError};
pub use layer::{Layer, LayerKind, Packable};
pub use protocols::common::{HwAddr, MacAddr};
pub use protocols::ethernet::EthernetFrame;
pub use protocols::sll::{PacketType, SllPacket};
pub use protocols::vlan::VlanTag;
pub use registry::{LayerFactory, Scope, lookup};
pub use stack::{DecodeConfig, Decoder, Stack, decode, decode_from, encode};
