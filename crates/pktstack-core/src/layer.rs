//! Layer contract and the closed set of known layers.

use serde::{Deserialize, Serialize};

use crate::buffer::Buffer;
use crate::error::CodecError;
use crate::protocols::ethernet::EthernetFrame;
use crate::protocols::sll::SllPacket;
use crate::protocols::vlan::VlanTag;
use crate::registry::Scope;

/// Serialization of one protocol header to and from a [`Buffer`].
///
/// Implementations must:
/// - write and read fields in wire order, in network byte order;
/// - validate before writing, so a failed `pack` leaves no partial header;
/// - never read past their own header, and leave `self` untouched when
///   `unpack` fails.
pub trait Packable {
    fn pack(&self, buf: &mut Buffer<'_>) -> Result<(), CodecError>;

    fn unpack(&mut self, buf: &mut Buffer<'_>) -> Result<(), CodecError>;

    /// Header size on the wire, in bytes.
    fn wire_len(&self) -> usize;
}

/// One decoded protocol header.
///
/// # Examples
/// ```
/// use pktstack_core::{Buffer, Layer, LayerKind, Packable};
///
/// let data = [0u8; 14];
/// let mut layer = LayerKind::Ethernet.empty();
/// layer.unpack(&mut Buffer::from_slice(&data))?;
/// assert_eq!(layer.name(), "ethernet");
/// # Ok::<(), pktstack_core::CodecError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Sll(SllPacket),
    Ethernet(EthernetFrame),
    Vlan(VlanTag),
}

/// Discriminant of [`Layer`], used to pick the first layer of a decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Sll,
    Ethernet,
    Vlan,
}

impl LayerKind {
    /// Zero-valued layer of this kind, ready for `unpack`.
    pub fn empty(self) -> Layer {
        match self {
            LayerKind::Sll => Layer::Sll(SllPacket::default()),
            LayerKind::Ethernet => Layer::Ethernet(EthernetFrame::default()),
            LayerKind::Vlan => Layer::Vlan(VlanTag::default()),
        }
    }
}

impl Layer {
    pub fn kind(&self) -> LayerKind {
        match self {
            Layer::Sll(_) => LayerKind::Sll,
            Layer::Ethernet(_) => LayerKind::Ethernet,
            Layer::Vlan(_) => LayerKind::Vlan,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Layer::Sll(_) => "sll",
            Layer::Ethernet(_) => "ethernet",
            Layer::Vlan(_) => "vlan",
        }
    }

    /// Scope and code identifying the layer that follows this one.
    pub fn next_code(&self) -> Option<(Scope, u16)> {
        match self {
            Layer::Sll(p) => Some((Scope::EtherType, p.ether_type)),
            Layer::Ethernet(f) => Some((Scope::EtherType, f.ether_type)),
            Layer::Vlan(t) => Some((Scope::EtherType, t.ether_type)),
        }
    }

    fn as_packable(&self) -> &dyn Packable {
        match self {
            Layer::Sll(p) => p,
            Layer::Ethernet(f) => f,
            Layer::Vlan(t) => t,
        }
    }

    fn as_packable_mut(&mut self) -> &mut dyn Packable {
        match self {
            Layer::Sll(p) => p,
            Layer::Ethernet(f) => f,
            Layer::Vlan(t) => t,
        }
    }
}

impl Packable for Layer {
    fn pack(&self, buf: &mut Buffer<'_>) -> Result<(), CodecError> {
        self.as_packable().pack(buf)
    }

    fn unpack(&mut self, buf: &mut Buffer<'_>) -> Result<(), CodecError> {
        self.as_packable_mut().unpack(buf)
    }

    fn wire_len(&self) -> usize {
        self.as_packable().wire_len()
    }
}

impl From<SllPacket> for Layer {
    fn from(value: SllPacket) -> Self {
        Layer::Sll(value)
    }
}

impl From<EthernetFrame> for Layer {
    fn from(value: EthernetFrame) -> Self {
        Layer::Ethernet(value)
    }
}

impl From<VlanTag> for Layer {
    fn from(value: VlanTag) -> Self {
        Layer::Vlan(value)
    }
}
