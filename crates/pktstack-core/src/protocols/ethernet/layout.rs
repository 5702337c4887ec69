pub const HEADER_LEN: usize = 14;
pub const MAC_LEN: usize = 6;
