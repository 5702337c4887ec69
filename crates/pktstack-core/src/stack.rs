//! Stack assembly: chained decode and in-order encode.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::Buffer;
use crate::error::{CodecError, DecodeError};
use crate::layer::{Layer, LayerKind, Packable};
use crate::registry::{self, Scope};

/// Default bound on decoded layers per packet.
pub const DEFAULT_MAX_LAYERS: usize = 16;

/// Decoded layers, outermost first, plus the undecoded remainder.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub payload: Vec<u8>,
}

impl Stack {
    /// Total header bytes across all layers.
    pub fn header_len(&self) -> usize {
        self.layers.iter().map(|layer| layer.wire_len()).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Layers decoded before the rest is left as payload.
    pub max_layers: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_layers: DEFAULT_MAX_LAYERS,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Decoder {
    config: DecodeConfig,
}

impl Decoder {
    pub fn new(config: DecodeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Decode `bytes` starting with the layer registered for `code` in `scope`.
    ///
    /// An unregistered starting code yields an empty stack whose payload is
    /// the whole input.
    pub fn decode_from(&self, bytes: &[u8], scope: Scope, code: u16) -> Result<Stack, DecodeError> {
        match registry::lookup(scope, code) {
            Some(factory) => self.decode_layer(bytes, factory()),
            None => {
                debug!(?scope, code, "no layer registered for starting code");
                Ok(Stack {
                    layers: Vec::new(),
                    payload: bytes.to_vec(),
                })
            }
        }
    }

    /// Decode `bytes` starting with a layer of kind `first`.
    pub fn decode(&self, bytes: &[u8], first: LayerKind) -> Result<Stack, DecodeError> {
        self.decode_layer(bytes, first.empty())
    }

    fn decode_layer(&self, bytes: &[u8], first: Layer) -> Result<Stack, DecodeError> {
        let mut buf = Buffer::from_slice(bytes);
        let mut layers: Vec<Layer> = Vec::new();
        let mut next = Some(first);

        while let Some(mut layer) = next.take() {
            if layers.len() >= self.config.max_layers {
                debug!(max_layers = self.config.max_layers, "layer limit reached");
                break;
            }
            if !layers.is_empty() && buf.remaining().is_empty() {
                debug!(layer = layer.name(), "input exhausted");
                break;
            }

            let start = buf.position();
            if let Err(error) = layer.unpack(&mut buf) {
                debug!(layer = layer.name(), offset = start, %error, "unpack failed");
                return Err(DecodeError {
                    stack: Stack {
                        layers,
                        payload: bytes[start..].to_vec(),
                    },
                    error,
                });
            }
            debug!(layer = layer.name(), offset = start, "decoded layer");

            next = match layer.next_code() {
                Some((scope, code)) => {
                    let factory = registry::lookup(scope, code);
                    if factory.is_none() {
                        debug!(?scope, code, "chain terminated");
                    }
                    factory.map(|factory| factory())
                }
                None => None,
            };
            layers.push(layer);
        }

        Ok(Stack {
            layers,
            payload: buf.remaining().to_vec(),
        })
    }
}

/// Decode `bytes` starting with a layer of kind `first`, using default limits.
///
/// # Errors
/// Returns `DecodeError` carrying the layers decoded before the first unpack
/// failure.
pub fn decode(bytes: &[u8], first: LayerKind) -> Result<Stack, DecodeError> {
    Decoder::default().decode(bytes, first)
}

/// Decode `bytes` starting from a wire code, using default limits.
///
/// # Examples
/// ```
/// use pktstack_core::{Layer, Scope, decode_from};
///
/// let bytes = [
///     0x00, 0x04, 0x00, 0x01, 0x00, 0x06, 0x4c, 0x72, 0xb9, 0x54, 0xe5, 0x3d,
///     0x00, 0x00, 0x08, 0x00, 0x45,
/// ];
/// let stack = decode_from(&bytes, Scope::LinkType, 113)?;
/// assert!(matches!(stack.layers[0], Layer::Sll(_)));
/// assert_eq!(stack.payload, vec![0x45]);
/// # Ok::<(), pktstack_core::DecodeError>(())
/// ```
pub fn decode_from(bytes: &[u8], scope: Scope, code: u16) -> Result<Stack, DecodeError> {
    Decoder::default().decode_from(bytes, scope, code)
}

/// Pack every layer in order, then append the payload verbatim.
///
/// Next-protocol codes are written as set on each layer; keeping them
/// consistent with the following layer is up to the caller.
///
/// # Errors
/// Returns the first `CodecError` raised by a layer's `pack`.
pub fn encode(stack: &Stack) -> Result<Vec<u8>, CodecError> {
    let mut buf = Buffer::new();
    for layer in &stack.layers {
        layer.pack(&mut buf)?;
    }
    buf.write_bytes(&stack.payload);
    buf.finish()
}
