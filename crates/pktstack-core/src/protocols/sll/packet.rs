use serde::{Deserialize, Serialize};

use super::layout;
use crate::buffer::Buffer;
use crate::error::CodecError;
use crate::layer::Packable;
use crate::protocols::common::HwAddr;

/// Direction of a captured packet relative to the capturing host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub enum PacketType {
    #[default]
    Host,
    Broadcast,
    Multicast,
    OtherHost,
    Outgoing,
    Unknown(u16),
}

impl From<u16> for PacketType {
    fn from(value: u16) -> Self {
        match value {
            layout::PACKET_TYPE_HOST => PacketType::Host,
            layout::PACKET_TYPE_BROADCAST => PacketType::Broadcast,
            layout::PACKET_TYPE_MULTICAST => PacketType::Multicast,
            layout::PACKET_TYPE_OTHER_HOST => PacketType::OtherHost,
            layout::PACKET_TYPE_OUTGOING => PacketType::Outgoing,
            other => PacketType::Unknown(other),
        }
    }
}

impl From<PacketType> for u16 {
    fn from(value: PacketType) -> Self {
        match value {
            PacketType::Host => layout::PACKET_TYPE_HOST,
            PacketType::Broadcast => layout::PACKET_TYPE_BROADCAST,
            PacketType::Multicast => layout::PACKET_TYPE_MULTICAST,
            PacketType::OtherHost => layout::PACKET_TYPE_OTHER_HOST,
            PacketType::Outgoing => layout::PACKET_TYPE_OUTGOING,
            PacketType::Unknown(other) => other,
        }
    }
}

/// Linux cooked capture (SLL) header.
///
/// The on-wire address length is not stored: it is always `addr.len()`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SllPacket {
    pub packet_type: PacketType,
    /// ARPHRD address-family code.
    pub addr_type: u16,
    pub addr: HwAddr,
    pub ether_type: u16,
}

impl SllPacket {
    pub fn addr_len(&self) -> usize {
        self.addr.len()
    }
}

impl Packable for SllPacket {
    fn pack(&self, buf: &mut Buffer<'_>) -> Result<(), CodecError> {
        let addr = self.addr.as_bytes();
        if addr.len() > layout::ADDR_CAPACITY {
            return Err(CodecError::AddressTooLong {
                len: addr.len(),
                capacity: layout::ADDR_CAPACITY,
            });
        }

        buf.write_u16(self.packet_type.into());
        buf.write_u16(self.addr_type);
        buf.write_u16(addr.len() as u16);
        buf.write_bytes(addr);
        buf.write_zeros(layout::ADDR_CAPACITY - addr.len());
        buf.write_u16(self.ether_type);
        Ok(())
    }

    fn unpack(&mut self, buf: &mut Buffer<'_>) -> Result<(), CodecError> {
        let packet_type = PacketType::from(buf.read_u16()?);
        let addr_type = buf.read_u16()?;
        let addr_len = buf.read_u16()?;
        let slot = buf.read_array::<{ layout::ADDR_CAPACITY }>()?;
        let ether_type = buf.read_u16()?;

        let addr_len = addr_len as usize;
        if addr_len > layout::ADDR_CAPACITY {
            return Err(CodecError::InvalidFieldValue {
                field: "addr_len",
                value: addr_len as u64,
            });
        }

        *self = SllPacket {
            packet_type,
            addr_type,
            addr: HwAddr::new(&slot[..addr_len]),
            ether_type,
        };
        Ok(())
    }

    fn wire_len(&self) -> usize {
        layout::HEADER_LEN
    }
}
