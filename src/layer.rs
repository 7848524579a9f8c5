//! 'Layer' trait
//!
//! [`Layer`] trait is central to this crate. All the dissectors for individual protocols
//! implement the `Layer` trait. Each Layer will implement a `decode_bytes` function that will return
//! the result of parsing the given byte slice.

use core::fmt::Debug;

use erased_serde::serialize_trait_object;

use crate::errors::Error;
use crate::types::Address;

/// Addressing state collected while walking down the layers of a packet.
///
/// Network layers fill in the addresses and transport layers the ports, so that an application
/// layer (XnAP) can key its per-association state on them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PacketInfo {
    pub src: Address,
    pub dst: Address,
    pub src_port: u16,
    pub dst_port: u16,
    /// Length of the payload following the layer just decoded, when its header says so.
    ///
    /// Taken by [`Packet::from_bytes`][`crate::Packet::from_bytes`], which then hides any
    /// octets past it (e.g. Ethernet padding) from the upper layers.
    pub payload_len: Option<usize>,
}

/// `Layer` Trait defines a 'Layer' in a Packet
///
/// Typically a Layer will correspond to Data Link Layer, Network Layer, Transport Layer or the
/// Application Layer. Each of the supported 'protocols' have implementation for this trait.
pub trait Layer: Send + Debug + erased_serde::Serialize {
    /// Main 'decoder' function.
    ///
    /// The return value is a Tuple `(Option<Box<dyn Layer + Send>>, usize)` on success. This indicates
    /// the decoded Struct wrapped as a Layer and the number of bytes consumed. When No further
    /// decoding is possible, this function should return a `None` along with the number of bytes
    /// consumed by the 'decoder' function. A return value of `None` indicates, we do not know how
    /// to decode further, but this is not an error.
    fn decode_bytes(
        &mut self,
        bytes: &[u8],
    ) -> Result<(Option<Box<dyn Layer + Send>>, usize), Error>;

    /// Decoder that also sees (and may update) the [`PacketInfo`] of the packet.
    ///
    /// [`Packet::from_bytes`][`crate::Packet::from_bytes`] always calls this function. Layers
    /// that neither contribute nor need addressing state just use the default.
    fn decode_with_info(
        &mut self,
        bytes: &[u8],
        _info: &mut PacketInfo,
    ) -> Result<(Option<Box<dyn Layer + Send>>, usize), Error> {
        self.decode_bytes(bytes)
    }

    /// Name for the given layer.
    fn name(&self) -> &'static str;

    /// Short name for the given layer.
    fn short_name(&self) -> &'static str;
}

serialize_trait_object!(Layer);
