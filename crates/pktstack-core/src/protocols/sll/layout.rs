pub const HEADER_LEN: usize = 16;
pub const ADDR_CAPACITY: usize = 8;

pub const PACKET_TYPE_HOST: u16 = 0;
pub const PACKET_TYPE_BROADCAST: u16 = 1;
pub const PACKET_TYPE_MULTICAST: u16 = 2;
pub const PACKET_TYPE_OTHER_HOST: u16 = 3;
pub const PACKET_TYPE_OUTGOING: u16 = 4;

/// ARPHRD_ETHER.
pub const ADDR_TYPE_ETHER: u16 = 1;
