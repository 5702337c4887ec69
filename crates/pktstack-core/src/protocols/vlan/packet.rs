use serde::{Deserialize, Serialize};

use super::layout;
use crate::buffer::Buffer;
use crate::error::CodecError;
use crate::layer::Packable;

/// IEEE 802.1Q tag: TCI followed by the encapsulated ether-type.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanTag {
    pub priority: u8,
    pub drop_eligible: bool,
    pub vlan_id: u16,
    pub ether_type: u16,
}

impl VlanTag {
    /// Build a tag, checking that each TCI sub-field fits its bit width.
    ///
    /// # Errors
    /// `CodecError::FieldTooLong` when `priority > 7` or `vlan_id > 0x0fff`.
    pub fn new(
        priority: u8,
        drop_eligible: bool,
        vlan_id: u16,
        ether_type: u16,
    ) -> Result<Self, CodecError> {
        let tag = Self {
            priority,
            drop_eligible,
            vlan_id,
            ether_type,
        };
        tag.tci()?;
        Ok(tag)
    }

    /// Tag control information as written on the wire.
    pub fn tci(&self) -> Result<u16, CodecError> {
        if self.priority > layout::MAX_PRIORITY {
            return Err(CodecError::FieldTooLong {
                field: "priority",
                value: self.priority as u64,
                max: layout::MAX_PRIORITY as u64,
            });
        }
        if self.vlan_id > layout::VLAN_ID_MASK {
            return Err(CodecError::FieldTooLong {
                field: "vlan_id",
                value: self.vlan_id as u64,
                max: layout::VLAN_ID_MASK as u64,
            });
        }
        let mut tci = ((self.priority as u16) << layout::PRIORITY_SHIFT) | self.vlan_id;
        if self.drop_eligible {
            tci |= layout::DROP_ELIGIBLE_BIT;
        }
        Ok(tci)
    }
}

impl Packable for VlanTag {
    fn pack(&self, buf: &mut Buffer<'_>) -> Result<(), CodecError> {
        let tci = self.tci()?;
        buf.write_u16(tci);
        buf.write_u16(self.ether_type);
        Ok(())
    }

    fn unpack(&mut self, buf: &mut Buffer<'_>) -> Result<(), CodecError> {
        let tci = buf.read_u16()?;
        let ether_type = buf.read_u16()?;
        *self = VlanTag {
            priority: (tci >> layout::PRIORITY_SHIFT) as u8,
            drop_eligible: tci & layout::DROP_ELIGIBLE_BIT != 0,
            vlan_id: tci & layout::VLAN_ID_MASK,
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
    use super::VlanTag;
    use crate::buffer::Buffer;
    use crate::error::CodecError;
    use crate::layer::Packable;

    #[test]
    fn pack_tci_bits() {
        let tag = VlanTag::new(5, true, 0x123, 0x0800).unwrap();
        let mut buf = Buffer::new();
        tag.pack(&mut buf).unwrap();
        assert_eq!(buf.as_written(), &[0xb1, 0x23, 0x08, 0x00]);
    }

    #[test]
    fn unpack_tci_bits() {
        let data = [0xb1, 0x23, 0x86, 0xdd];
        let mut buf = Buffer::from_slice(&data);
        let mut tag = VlanTag::default();
        tag.unpack(&mut buf).unwrap();
        assert_eq!(tag.priority, 5);
        assert!(tag.drop_eligible);
        assert_eq!(tag.vlan_id, 0x123);
        assert_eq!(tag.ether_type, 0x86dd);
    }

    #[test]
    fn rejects_wide_vlan_id() {
        let err = VlanTag::new(0, false, 0x1000, 0).unwrap_err();
        assert_eq!(
            err,
            CodecError::FieldTooLong {
                field: "vlan_id",
                value: 0x1000,
                max: 0x0fff
            }
        );
    }

    #[test]
    fn pack_rejects_wide_priority_without_writing() {
        let tag = VlanTag {
            priority: 8,
            ..VlanTag::default()
        };
        let mut buf = Buffer::new();
        let err = tag.pack(&mut buf).unwrap_err();
        assert!(matches!(err, CodecError::FieldTooLong { field: "priority", .. }));
        assert!(buf.as_written().is_empty());
    }
}
