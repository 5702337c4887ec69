use thiserror::Error;

use crate::stack::Stack;

/// Errors returned by buffer access and layer packing/unpacking.
///
/// Errors are `Clone` so a [`Buffer`](crate::Buffer) can hand back the same
/// sticky value on every call after the first failure.
///
/// # Examples
/// ```
/// use pktstack_core::CodecError;
///
/// let err = CodecError::BufferUnderrun { needed: 2, remaining: 1 };
/// assert!(err.to_string().contains("buffer underrun"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("buffer underrun: need {needed} bytes, {remaining} remaining")]
    BufferUnderrun { needed: usize, remaining: usize },
    #[error("address too long: {len} bytes exceeds slot capacity of {capacity}")]
    AddressTooLong { len: usize, capacity: usize },
    #[error("field {field} too long: {value} exceeds maximum {max}")]
    FieldTooLong {
        field: &'static str,
        value: u64,
        max: u64,
    },
    #[error("invalid value for field {field}: {value}")]
    InvalidFieldValue { field: &'static str, value: u64 },
}

/// Error returned when a hardware address string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddrParseError {
    #[error("invalid octet '{0}' in hardware address")]
    InvalidOctet(String),
    #[error("hardware address has {actual} octets, expected {expected}")]
    WrongLength { expected: usize, actual: usize },
}

/// A decode that stopped on an unpack failure.
///
/// `stack` holds every layer decoded before the failure; its payload is the
/// input from the start of the layer that failed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("decode stopped after {count} layer(s): {error}", count = .stack.layers.len())]
pub struct DecodeError {
    pub stack: Stack,
    #[source]
    pub error: CodecError,
}
