use serde::{Deserialize, Serialize};

use super::layout;
use crate::buffer::Buffer;
use crate::error::CodecError;
use crate::layer::Packable;
use crate::protocols::common::MacAddr;

/// Ethernet II frame header.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthernetFrame {
    pub dst: MacAddr,
    pub src: MacAddr,
    pub ether_type: u16,
}

impl Packable for EthernetFrame {
    fn pack(&self, buf: &mut Buffer<'_>) -> Result<(), CodecError> {
        buf.write_bytes(self.dst.as_bytes());
        buf.write_bytes(self.src.as_bytes());
        buf.write_u16(self.ether_type);
        Ok(())
    }

    fn unpack(&mut self, buf: &mut Buffer<'_>) -> Result<(), CodecError> {
        let dst = MacAddr(buf.read_array::<{ layout::MAC_LEN }>()?);
        let src = MacAddr(buf.read_array::<{ layout::MAC_LEN }>()?);
        let ether_type = buf.read_u16()?;
        *self = EthernetFrame {
            dst,
            src,
            ether_type,
        };
        Ok(())
    }

    fn wire_len(&self) -> usize {
        layout::HEADER_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::EthernetFrame;
    use crate::buffer::Buffer;
    use crate::error::CodecError;
    use crate::layer::Packable;
    use crate::protocols::common::MacAddr;
    use crate::protocols::ethernet::layout;
    use etherparse::{EtherType, Ethernet2Header};

    fn make_frame() -> EthernetFrame {
        EthernetFrame {
            dst: MacAddr([1, 2, 3, 4, 5, 6]),
            src: MacAddr([7, 8, 9, 10, 11, 12]),
            ether_type: EtherType::IPV4.0,
        }
    }

    #[test]
    fn pack_matches_etherparse() {
        let reference = Ethernet2Header {
            source: [7, 8, 9, 10, 11, 12],
            destination: [1, 2, 3, 4, 5, 6],
            ether_type: EtherType::IPV4,
        };
        let mut buf = Buffer::new();
        make_frame().pack(&mut buf).unwrap();
        assert_eq!(buf.as_written(), &reference.to_bytes());
    }

    #[test]
    fn unpack_stops_at_header() {
        let mut data = vec![0u8; layout::HEADER_LEN + 3];
        let mut out = Buffer::new();
        make_frame().pack(&mut out).unwrap();
        data[..layout::HEADER_LEN].copy_from_slice(out.as_written());

        let mut buf = Buffer::from_slice(&data);
        let mut frame = EthernetFrame::default();
        frame.unpack(&mut buf).unwrap();
        assert_eq!(frame, make_frame());
        assert_eq!(buf.position(), layout::HEADER_LEN);
        assert_eq!(buf.remaining().len(), 3);
    }

    #[test]
    fn unpack_truncated() {
        let data = [0u8; layout::HEADER_LEN - 1];
        let mut buf = Buffer::from_slice(&data);
        let mut frame = EthernetFrame::default();
        let err = frame.unpack(&mut buf).unwrap_err();
        assert!(matches!(err, CodecError::BufferUnderrun { .. }));
        assert_eq!(frame, EthernetFrame::default());
    }
}
