use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AddrParseError;

/// Six-octet Ethernet address.
///
/// Serialized as colon-separated lowercase hex (`4c:72:b9:54:e5:3d`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    pub const BROADCAST: MacAddr = MacAddr([0xff; 6]);

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_colon_hex(f, &self.0)
    }
}

impl FromStr for MacAddr {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let octets = parse_colon_hex(s)?;
        let array: [u8; 6] = octets
            .as_slice()
            .try_into()
            .map_err(|_| AddrParseError::WrongLength {
                expected: 6,
                actual: octets.len(),
            })?;
        Ok(MacAddr(array))
    }
}

impl TryFrom<String> for MacAddr {
    type Error = AddrParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MacAddr> for String {
    fn from(value: MacAddr) -> Self {
        value.to_string()
    }
}

/// Variable-length link-layer address.
///
/// Length is not bounded here; layers that carry it in a fixed slot check
/// the capacity when packing.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HwAddr(Vec<u8>);

impl HwAddr {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<MacAddr> for HwAddr {
    fn from(value: MacAddr) -> Self {
        Self(value.0.to_vec())
    }
}

impl fmt::Display for HwAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_colon_hex(f, &self.0)
    }
}

impl FromStr for HwAddr {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_colon_hex(s).map(Self)
    }
}

impl TryFrom<String> for HwAddr {
    type Error = AddrParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HwAddr> for String {
    fn from(value: HwAddr) -> Self {
        value.to_string()
    }
}

fn write_colon_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            f.write_str(":")?;
        }
        write!(f, "{:02x}", byte)?;
    }
    Ok(())
}

fn parse_colon_hex(s: &str) -> Result<Vec<u8>, AddrParseError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(':')
        .map(|octet| {
            if octet.is_empty() || octet.len() > 2 {
                return Err(AddrParseError::InvalidOctet(octet.to_string()));
            }
            u8::from_str_radix(octet, 16).map_err(|_| AddrParseError::InvalidOctet(octet.to_string()))
        })
        .collect()
}
