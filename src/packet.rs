//! Packet Structure

use core::fmt::Debug;

use std::collections::HashMap;
use std::sync::RwLock;

use lazy_static::lazy_static;
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::errors::Error;
use crate::layer::PacketInfo;
use crate::types::{EncapType, LayerCreatorFn};
use crate::Layer;

lazy_static! {
    static ref ENCAP_TYPES_MAP: RwLock<HashMap<EncapType, LayerCreatorFn>> =
        RwLock::new(HashMap::new());
}

// Needs to run before the layers register their encap types.
pub(crate) fn register_defaults() -> Result<(), Error> {
    lazy_static::initialize(&ENCAP_TYPES_MAP);

    Ok(())
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct Timestamp {
    pub secs: i64,
    pub nsecs: i64,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct PacketMetadata {
    pub timestamp: Timestamp,
    pub iface: i8,
    pub len: u16,
    pub caplen: u16,
}

/// A dissected packet.
///
/// Serialized (e.g. to JSON) with the layers as a map keyed by their short names, in decoding
/// order.
#[derive(Debug, Default, Serialize)]
pub struct Packet {
    pub meta: PacketMetadata,
    #[serde(serialize_with = "serialize_layers_as_struct")]
    pub layers: Vec<Box<dyn Layer + Send>>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "crate::types::hex::serialize_octets"
    )]
    pub unprocessed: Vec<u8>,
    #[serde(skip)]
    pub info: PacketInfo,
}

fn serialize_layers_as_struct<S>(
    layers: &Vec<Box<dyn Layer + Send>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut state = serializer.serialize_struct("layers", layers.len())?;
    for layer in layers {
        state.serialize_field(layer.short_name(), layer)?;
    }
    state.end()
}

impl Packet {
    /// Register a new Layer 2 encoding
    ///
    /// Link layers call this function with their encapsulation type (the libpcap link type).
    pub fn register_encap_type(encap: EncapType, creator: LayerCreatorFn) -> Result<(), Error> {
        lazy_static::initialize(&ENCAP_TYPES_MAP);

        let mut map = ENCAP_TYPES_MAP.write().unwrap();
        if map.contains_key(&encap) {
            return Err(Error::RegisterError(format!("encap: {}", encap)));
        }
        map.insert(encap, creator);

        Ok(())
    }

    /// Create a Packet from a u8 buffer.
    ///
    /// This is the main API function. Starting with the Layer registered for `encap`, each layer
    /// is decoded and determines the next one, until a layer does not know how to continue.
    /// Whatever was not consumed by any layer is kept as `unprocessed`.
    pub fn from_bytes(bytes: &[u8], encap: EncapType) -> Result<Self, Error> {
        let mut p = Packet::default();
        p.meta.len = bytes.len() as u16;
        p.meta.caplen = bytes.len() as u16;

        let creator = ENCAP_TYPES_MAP.read().unwrap().get(&encap).copied();
        let mut layer = match creator {
            Some(creator) => creator(),
            None => {
                #[cfg(feature = "logging")]
                log::debug!("No Layer registered for encap type {}", encap);

                p.unprocessed = bytes.into();
                return Ok(p);
            }
        };

        let mut start = 0;
        let mut end = bytes.len();
        loop {
            let (next, consumed) = layer.decode_with_info(&bytes[start..end], &mut p.info)?;
            start += consumed;
            p.layers.push(layer);

            if let Some(len) = p.info.payload_len.take() {
                end = end.min(start.saturating_add(len));
            }

            match next {
                Some(next) if start < end => layer = next,
                _ => break,
            }
        }

        if start != bytes.len() {
            p.unprocessed = bytes[start..].into();
        }

        Ok(p)
    }
}
