pub const HEADER_LEN: usize = 4;

pub const PRIORITY_SHIFT: u16 = 13;
pub const DROP_ELIGIBLE_BIT: u16 = 0x1000;
pub const VLAN_ID_MASK: u16 = 0x0fff;
pub const MAX_PRIORITY: u8 = 7;
