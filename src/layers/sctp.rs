//! SCTP Layer
//!
//! The common header and all chunks of an SCTP packet are decoded. User data of DATA chunks is
//! handed to the Layer registered for its payload protocol identifier, or else to the one
//! registered for the destination (or source) port.

use core::convert::TryInto as _;

use std::collections::HashMap;
use std::sync::RwLock;

use lazy_static::lazy_static;
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::errors::Error;
use crate::layer::{Layer, PacketInfo};
use crate::layers::{ipv4, ipv6};
use crate::types::LayerCreatorFn;

/// SCTP Protocol Number
pub const IPPROTO_SCTP: u8 = 132_u8;

pub const SCTP_COMMON_HEADER_LENGTH: usize = 12_usize;
pub const SCTP_CHUNK_HEADER_LENGTH: usize = 4_usize;
pub const SCTP_DATA_CHUNK_HEADER_LENGTH: usize = 16_usize;

pub const SCTP_CHUNK_TYPE_DATA: u8 = 0;

lazy_static! {
    static ref PPIDS_MAP: RwLock<HashMap<u32, LayerCreatorFn>> = RwLock::new(HashMap::new());
    static ref PORTS_MAP: RwLock<HashMap<u16, LayerCreatorFn>> = RwLock::new(HashMap::new());
}

// Register ourselves With IPv4 and IPv6
pub(crate) fn register_defaults() -> Result<(), Error> {
    lazy_static::initialize(&PPIDS_MAP);
    lazy_static::initialize(&PORTS_MAP);

    ipv4::register_protocol(IPPROTO_SCTP, SCTP::creator)?;
    ipv6::register_next_header(IPPROTO_SCTP, SCTP::creator)?;

    Ok(())
}

/// Register a protocol carried in DATA chunks, by its payload protocol identifier.
pub fn register_datachunk_protocol(ppid: u32, creator: LayerCreatorFn) -> Result<(), Error> {
    lazy_static::initialize(&PPIDS_MAP);

    let mut map = PPIDS_MAP.write().unwrap();
    if map.contains_key(&ppid) {
        return Err(Error::RegisterError(format!("sctp ppid: {}", ppid)));
    }
    map.insert(ppid, creator);

    Ok(())
}

/// Register a protocol carried in DATA chunks, by SCTP port.
///
/// Used for the user data when no protocol is registered for its payload protocol identifier.
pub fn register_port(port: u16, creator: LayerCreatorFn) -> Result<(), Error> {
    lazy_static::initialize(&PORTS_MAP);

    let mut map = PORTS_MAP.write().unwrap();
    if map.contains_key(&port) {
        return Err(Error::RegisterError(format!("sctp port: {}", port)));
    }
    map.insert(port, creator);

    Ok(())
}

/// Remove the protocol registered for `port`, returning its creator.
pub fn unregister_port(port: u16) -> Option<LayerCreatorFn> {
    PORTS_MAP.write().unwrap().remove(&port)
}

fn datachunk_creator(ppid: u32, dst_port: u16, src_port: u16) -> Option<LayerCreatorFn> {
    if let Some(creator) = PPIDS_MAP.read().unwrap().get(&ppid) {
        return Some(*creator);
    }
    let ports = PORTS_MAP.read().unwrap();
    ports.get(&dst_port).or_else(|| ports.get(&src_port)).copied()
}

#[derive(Debug)]
pub enum ChunkPayload {
    Unprocessed(Vec<u8>),
    Processed(Box<dyn Layer + Send>),
}

impl Default for ChunkPayload {
    fn default() -> Self {
        Self::Unprocessed(vec![])
    }
}

impl Serialize for ChunkPayload {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ChunkPayload::Unprocessed(data) => {
                crate::types::hex::serialize_octets(data, serializer)
            }
            ChunkPayload::Processed(layer) => {
                let mut state = serializer.serialize_struct("payload", 1)?;
                state.serialize_field(layer.short_name(), layer)?;
                state.end()
            }
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct DataChunk {
    tsn: u32,
    stream_id: u16,
    stream_seq_no: u16,
    payload_proto: u32,
    payload: ChunkPayload,
}

impl DataChunk {
    pub fn payload_proto(&self) -> u32 {
        self.payload_proto
    }

    pub fn payload(&self) -> &ChunkPayload {
        &self.payload
    }
}

#[derive(Debug, Default, Serialize)]
pub struct SCTPChunk {
    chunk_type: u8,
    #[serde(serialize_with = "crate::types::hex::serialize_lower_hex_u8")]
    chunk_flags: u8,
    chunk_len: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<DataChunk>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "crate::types::hex::serialize_octets"
    )]
    value: Vec<u8>,
}

impl SCTPChunk {
    pub fn chunk_type(&self) -> u8 {
        self.chunk_type
    }

    pub fn data(&self) -> Option<&DataChunk> {
        self.data.as_ref()
    }
}

#[derive(Debug, Default, Serialize)]
pub struct SCTP {
    src_port: u16,
    dst_port: u16,
    #[serde(serialize_with = "crate::types::hex::serialize_lower_hex_u32")]
    verification_tag: u32,
    #[serde(serialize_with = "crate::types::hex::serialize_lower_hex_u32")]
    checksum: u32,
    chunks: Vec<SCTPChunk>,
}

impl SCTP {
    pub fn creator() -> Box<dyn Layer + Send> {
        Box::<SCTP>::default()
    }

    pub fn chunks(&self) -> &[SCTPChunk] {
        &self.chunks
    }

    fn data_chunk_from_bytes(
        &self,
        bytes: &[u8],
        info: &mut PacketInfo,
    ) -> Result<DataChunk, Error> {
        if bytes.len() < SCTP_DATA_CHUNK_HEADER_LENGTH {
            return Err(Error::TooShort {
                required: SCTP_DATA_CHUNK_HEADER_LENGTH,
                available: bytes.len(),
                data: hex::encode(bytes),
            });
        }

        let mut chunk = DataChunk {
            tsn: u32::from_be_bytes(bytes[4..8].try_into().unwrap()),
            stream_id: u16::from_be_bytes(bytes[8..10].try_into().unwrap()),
            stream_seq_no: u16::from_be_bytes(bytes[10..12].try_into().unwrap()),
            payload_proto: u32::from_be_bytes(bytes[12..16].try_into().unwrap()),
            payload: ChunkPayload::default(),
        };

        let user_data = &bytes[SCTP_DATA_CHUNK_HEADER_LENGTH..];
        chunk.payload = match datachunk_creator(chunk.payload_proto, self.dst_port, self.src_port)
        {
            Some(creator) => {
                let mut layer = creator();
                match layer.decode_with_info(user_data, info) {
                    Ok(_) => ChunkPayload::Processed(layer),
                    Err(_e) => {
                        #[cfg(feature = "logging")]
                        log::warn!(
                            "SCTP: {} payload (ppid {}) not decoded: {}",
                            layer.name(),
                            chunk.payload_proto,
                            _e
                        );
                        ChunkPayload::Unprocessed(user_data.into())
                    }
                }
            }
            None => ChunkPayload::Unprocessed(user_data.into()),
        };

        Ok(chunk)
    }
}

impl Layer for SCTP {
    fn decode_bytes(
        &mut self,
        bytes: &[u8],
    ) -> Result<(Option<Box<dyn Layer + Send>>, usize), Error> {
        let mut info = PacketInfo::default();
        self.decode_with_info(bytes, &mut info)
    }

    fn decode_with_info(
        &mut self,
        bytes: &[u8],
        info: &mut PacketInfo,
    ) -> Result<(Option<Box<dyn Layer + Send>>, usize), Error> {
        if bytes.len() < SCTP_COMMON_HEADER_LENGTH {
            return Err(Error::TooShort {
                required: SCTP_COMMON_HEADER_LENGTH,
                available: bytes.len(),
                data: hex::encode(bytes),
            });
        }

        self.src_port = u16::from_be_bytes(bytes[0..2].try_into().unwrap());
        self.dst_port = u16::from_be_bytes(bytes[2..4].try_into().unwrap());
        self.verification_tag = u32::from_be_bytes(bytes[4..8].try_into().unwrap());
        self.checksum = u32::from_be_bytes(bytes[8..12].try_into().unwrap());

        info.src_port = self.src_port;
        info.dst_port = self.dst_port;

        let mut start = SCTP_COMMON_HEADER_LENGTH;
        while start < bytes.len() {
            let remaining = &bytes[start..];
            if remaining.len() < SCTP_CHUNK_HEADER_LENGTH {
                return Err(Error::TooShort {
                    required: SCTP_CHUNK_HEADER_LENGTH,
                    available: remaining.len(),
                    data: hex::encode(remaining),
                });
            }

            let chunk_type = remaining[0];
            let chunk_flags = remaining[1];
            let chunk_len = u16::from_be_bytes(remaining[2..4].try_into().unwrap());
            let len = chunk_len as usize;
            if len < SCTP_CHUNK_HEADER_LENGTH {
                return Err(Error::ParseError(format!("SCTP chunk length: {}", chunk_len)));
            }
            if len > remaining.len() {
                return Err(Error::TooShort {
                    required: len,
                    available: remaining.len(),
                    data: hex::encode(remaining),
                });
            }

            let mut chunk = SCTPChunk {
                chunk_type,
                chunk_flags,
                chunk_len,
                ..Default::default()
            };
            if chunk_type == SCTP_CHUNK_TYPE_DATA {
                chunk.data = Some(self.data_chunk_from_bytes(&remaining[..len], info)?);
            } else {
                chunk.value = remaining[SCTP_CHUNK_HEADER_LENGTH..len].into();
            }
            self.chunks.push(chunk);

            // chunks are padded to 4 octets, the padding of the last one may be missing
            let padded = (len + 3) & !3;
            start += padded.min(remaining.len());
        }

        Ok((None, bytes.len()))
    }

    fn name(&self) -> &'static str {
        "SCTP"
    }

    fn short_name(&self) -> &'static str {
        "sctp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers;

    #[test]
    fn data_chunk_to_registered_ppid() {
        let _ = layers::register_defaults();

        // DATA chunk, PPID 61 (XnAP), ErrorIndication
        let bytes = hex::decode(concat!(
            "961696160000000100000000",
            "0003001c00000001000000000000003d",
            "001540080000010007400128"
        ))
        .unwrap();

        let mut sctp = SCTP::default();
        let mut info = PacketInfo::default();
        let (next, consumed) = sctp.decode_with_info(&bytes, &mut info).unwrap();
        assert!(next.is_none());
        assert_eq!(consumed, bytes.len());
        assert_eq!(info.src_port, 38422);
        assert_eq!(info.dst_port, 38422);

        assert_eq!(sctp.chunks().len(), 1);
        let data = sctp.chunks()[0].data().unwrap();
        assert_eq!(data.payload_proto(), 61);
        match data.payload() {
            ChunkPayload::Processed(layer) => assert_eq!(layer.short_name(), "xnap"),
            other => panic!("not dissected: {:?}", other),
        }
    }

    #[test]
    fn unknown_payload_kept_raw() {
        let _ = layers::register_defaults();

        // INIT chunk followed by a DATA chunk with PPID 9999 and ports nobody registered
        let bytes = hex::decode(concat!(
            "1f401f4100000000aabbccdd",
            "0100000800000001",
            "000000130000000700010002000027",
            "0f",
            "abcdef00"
        ))
        .unwrap();

        let mut sctp = SCTP::default();
        let result = sctp.decode_bytes(&bytes);
        assert!(result.is_ok(), "{:?}", result.err());

        assert_eq!(sctp.chunks().len(), 2);
        assert_eq!(sctp.chunks()[0].chunk_type(), 1);
        let data = sctp.chunks()[1].data().unwrap();
        match data.payload() {
            ChunkPayload::Unprocessed(raw) => assert_eq!(raw, &vec![0xab, 0xcd, 0xef]),
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn bad_chunk_lengths() {
        let _ = layers::register_defaults();

        let mut sctp = SCTP::default();
        let short = hex::decode("1f401f4100000000aabbccdd00000002").unwrap();
        assert!(matches!(
            sctp.decode_bytes(&short),
            Err(Error::ParseError(_))
        ));

        let mut sctp = SCTP::default();
        let beyond = hex::decode("1f401f4100000000aabbccdd0100002000000001").unwrap();
        assert!(matches!(
            sctp.decode_bytes(&beyond),
            Err(Error::TooShort { .. })
        ));

        let mut sctp = SCTP::default();
        assert!(sctp.decode_bytes(&[0x1f, 0x40]).is_err());
    }
}
