//! IPv4 Layer

use core::convert::TryInto as _;

use std::collections::HashMap;
use std::sync::RwLock;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::errors::Error;
use crate::layer::PacketInfo;
use crate::types::{Address, IPv4Address, LayerCreatorFn};
use crate::Layer;

/// Basic Length of the IPv4 Header when no options are present
pub const IPV4_BASE_HEADER_LENGTH: usize = 20_usize;

pub const IPV4_OPTION_EOOL: u8 = 0;
pub const IPV4_OPTION_NOP: u8 = 1;
pub const IPV4_OPTION_RR: u8 = 7;
pub const IPV4_OPTION_MTUP: u8 = 11;
pub const IPV4_OPTION_MTUR: u8 = 12;

lazy_static! {
    static ref PROTOCOLS_MAP: RwLock<HashMap<u8, LayerCreatorFn>> = RwLock::new(HashMap::new());
}

// Register ourselves to well-known Layer 2
pub(crate) fn register_defaults() -> Result<(), Error> {
    use crate::layers::ethernet::register_ethertype;

    lazy_static::initialize(&PROTOCOLS_MAP);

    register_ethertype(crate::types::ETHERTYPE_IP, IPv4::creator)?;

    Ok(())
}

/// Register a Transport Protocol for dissection.
///
/// Higher level protocols call this function to register themselves for decoding with the IPv4
/// Layer. For example [SCTP][`crate::layers::sctp`] registers with protocol number 132.
pub fn register_protocol(proto: u8, creator: LayerCreatorFn) -> Result<(), Error> {
    lazy_static::initialize(&PROTOCOLS_MAP);

    let mut map = PROTOCOLS_MAP.write().unwrap();
    if map.contains_key(&proto) {
        return Err(Error::RegisterError(format!("proto: {}", proto)));
    }
    map.insert(proto, creator);

    Ok(())
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum IPOption {
    EOOL,
    NOP,
    RR {
        len: u8,
        ptr: u8,
        route: Vec<IPv4Address>,
    },
    MTUP {
        len: u8,
        value: u16,
    },
    MTUR {
        len: u8,
        value: u16,
    },
    Other {
        value: u8,
        len: u8,
        data: Vec<u8>,
    },
}

impl IPOption {
    // Decode one option from `bytes`, returning it with the number of octets it occupies.
    fn from_bytes(bytes: &[u8]) -> Result<(Self, usize), Error> {
        let kind = bytes[0];
        match kind {
            IPV4_OPTION_EOOL => return Ok((IPOption::EOOL, 1)),
            IPV4_OPTION_NOP => return Ok((IPOption::NOP, 1)),
            _ => {}
        }

        // type, length (covering type and length octets) and data
        if bytes.len() < 2 {
            return Err(Error::TooShort {
                required: 2,
                available: bytes.len(),
                data: hex::encode(bytes),
            });
        }
        let len = bytes[1];
        if (len as usize) < 2 || bytes.len() < len as usize {
            return Err(Error::TooShort {
                required: (len as usize).max(2),
                available: bytes.len(),
                data: hex::encode(bytes),
            });
        }
        let data = &bytes[2..len as usize];

        let option = match kind {
            IPV4_OPTION_RR => {
                let ptr = *data.first().ok_or_else(|| Error::TooShort {
                    required: 3,
                    available: len as usize,
                    data: hex::encode(bytes),
                })?;
                // pointer is relative to the option start and is 4 for an empty route
                let filled = (ptr as usize).saturating_sub(4).min(data.len() - 1);
                let route = data[1..1 + filled]
                    .chunks_exact(4)
                    .map(|addr| addr.try_into())
                    .collect::<Result<Vec<IPv4Address>, _>>()?;
                IPOption::RR { len, ptr, route }
            }
            IPV4_OPTION_MTUP | IPV4_OPTION_MTUR => {
                if data.len() < 2 {
                    return Err(Error::TooShort {
                        required: 4,
                        available: len as usize,
                        data: hex::encode(bytes),
                    });
                }
                let value = u16::from_be_bytes(data[0..2].try_into().unwrap());
                if kind == IPV4_OPTION_MTUP {
                    IPOption::MTUP { len, value }
                } else {
                    IPOption::MTUR { len, value }
                }
            }
            value => IPOption::Other {
                value,
                len,
                data: data.into(),
            },
        };

        Ok((option, len as usize))
    }
}

#[derive(Debug, Default, Serialize)]
pub struct IPv4 {
    version: u8,
    hdr_len: u8,
    tos: u8,
    len: u16,
    #[serde(serialize_with = "crate::types::hex::serialize_lower_hex_u16")]
    id: u16,
    #[serde(serialize_with = "crate::types::hex::serialize_lower_hex_u8")]
    flags: u8,
    frag_offset: u16,
    ttl: u8,
    proto: u8,
    #[serde(serialize_with = "crate::types::hex::serialize_lower_hex_u16")]
    checksum: u16,
    src_addr: IPv4Address,
    dst_addr: IPv4Address,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    options: Vec<IPOption>,
}

impl IPv4 {
    pub fn creator() -> Box<dyn Layer + Send> {
        Box::<IPv4>::default()
    }

    pub fn src_addr(&self) -> IPv4Address {
        self.src_addr
    }

    pub fn dst_addr(&self) -> IPv4Address {
        self.dst_addr
    }

    fn options_from_bytes(&mut self, mut bytes: &[u8]) -> Result<(), Error> {
        while !bytes.is_empty() {
            let (option, consumed) = IPOption::from_bytes(bytes)?;
            bytes = &bytes[consumed..];

            let done = option == IPOption::EOOL;
            self.options.push(option);
            if done {
                break;
            }
        }

        Ok(())
    }
}

impl Layer for IPv4 {
    fn decode_bytes(
        &mut self,
        bytes: &[u8],
    ) -> Result<(Option<Box<dyn Layer + Send>>, usize), Error> {
        if bytes.len() < IPV4_BASE_HEADER_LENGTH {
            return Err(Error::TooShort {
                required: IPV4_BASE_HEADER_LENGTH,
                available: bytes.len(),
                data: hex::encode(bytes),
            });
        }

        self.version = bytes[0] >> 4;
        self.hdr_len = bytes[0] & 0x0f;

        // Length is in 4 octets
        let hdr_len = self.hdr_len as usize * 4;
        if hdr_len < IPV4_BASE_HEADER_LENGTH {
            return Err(Error::ParseError(format!("IPv4 header length: {}", hdr_len)));
        }
        if bytes.len() < hdr_len {
            return Err(Error::TooShort {
                required: hdr_len,
                available: bytes.len(),
                data: hex::encode(bytes),
            });
        }

        self.tos = bytes[1];
        self.len = u16::from_be_bytes(bytes[2..4].try_into().unwrap());
        self.id = u16::from_be_bytes(bytes[4..6].try_into().unwrap());
        let flags_offset = u16::from_be_bytes(bytes[6..8].try_into().unwrap());
        self.flags = (flags_offset >> 13) as u8;
        self.frag_offset = flags_offset & 0x1fff;
        self.ttl = bytes[8];
        self.proto = bytes[9];
        self.checksum = u16::from_be_bytes(bytes[10..12].try_into().unwrap());
        self.src_addr = bytes[12..16].try_into()?;
        self.dst_addr = bytes[16..20].try_into()?;

        self.options_from_bytes(&bytes[IPV4_BASE_HEADER_LENGTH..hdr_len])?;

        let map = PROTOCOLS_MAP.read().unwrap();
        match map.get(&self.proto) {
            None => Ok((None, hdr_len)),
            Some(l4_creator) => Ok((Some(l4_creator()), hdr_len)),
        }
    }

    fn decode_with_info(
        &mut self,
        bytes: &[u8],
        info: &mut PacketInfo,
    ) -> Result<(Option<Box<dyn Layer + Send>>, usize), Error> {
        let result = self.decode_bytes(bytes)?;

        info.src = Address::IPv4(self.src_addr);
        info.dst = Address::IPv4(self.dst_addr);
        // zero when the length was left to segmentation offload
        if self.len != 0 {
            info.payload_len = (self.len as usize).checked_sub(result.1);
        }

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "IPv4"
    }

    fn short_name(&self) -> &'static str {
        "ip"
    }
}

#[cfg(test)]
mod tests {
    use crate::layer::PacketInfo;
    use crate::types::Address;
    use crate::{layers, Layer};

    fn test_options(packet: &[u8], options: &[super::IPOption]) {
        let _ = layers::register_defaults();

        let mut ipv4 = Box::new(super::IPv4::default());
        let p = ipv4.decode_bytes(packet);
        assert!(p.is_ok(), "{:#?}", ipv4);

        assert_eq!(ipv4.options.as_slice(), options);
    }

    #[test]
    fn parse_ipv4_nop_options() {
        let ipv4_packet = hex::decode("4600004caa1d0000801111caac1f1336ac1f1349010101003e3000a10034fa4e").unwrap();
        let options = [
            super::IPOption::NOP,
            super::IPOption::NOP,
            super::IPOption::NOP,
            super::IPOption::EOOL,
        ];

        test_options(&ipv4_packet, &options);
    }

    #[test]
    fn parse_ipv4_other_option() {
        let ipv4_packet = hex::decode("4600004caa1d0000801111caac1f1336ac1f13495f03ff003e3000a10034fa4e").unwrap();
        let options = [
            super::IPOption::Other {
                value: 0x5f,
                len: 3,
                data: vec![0xff],
            },
            super::IPOption::EOOL,
        ];

        test_options(&ipv4_packet, &options);
    }

    #[test]
    fn parse_ipv4_record_route() {
        let ipv4_packet = hex::decode("47000050aa1d0000801111caac1f1336ac1f1349070708deadbeef003e3000a1").unwrap();
        let options = [
            super::IPOption::RR {
                len: 7,
                ptr: 8,
                route: vec![[0xde, 0xad, 0xbe, 0xef].into()],
            },
            super::IPOption::EOOL,
        ];

        test_options(&ipv4_packet, &options);
    }

    #[test]
    fn parse_ipv4_mtu_options() {
        let ipv4_packet = hex::decode("47000050aa1d0000801111caac1f1336ac1f13490b04dead0c04beef3e3000a1").unwrap();
        let options = [
            super::IPOption::MTUP {
                len: 4,
                value: 57005,
            },
            super::IPOption::MTUR {
                len: 4,
                value: 48879,
            },
        ];

        test_options(&ipv4_packet, &options);
    }

    #[test]
    fn addresses_recorded_and_truncation() {
        let _ = layers::register_defaults();

        let header = hex::decode("450000300001000040840000c0a80001c0a80002").unwrap();
        let mut ipv4 = super::IPv4::default();
        let mut info = PacketInfo::default();
        let (next, consumed) = ipv4.decode_with_info(&header, &mut info).unwrap();
        assert!(next.is_some());
        assert_eq!(consumed, 20);
        assert_eq!(info.src, Address::IPv4([192, 168, 0, 1].into()));
        assert_eq!(info.dst, Address::IPv4([192, 168, 0, 2].into()));
        assert_eq!(info.payload_len, Some(0x30 - 20));

        let mut ipv4 = super::IPv4::default();
        assert!(ipv4.decode_bytes(&header[..19]).is_err());
    }
}
