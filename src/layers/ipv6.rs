//! IPv6 Layer

use core::convert::TryInto;

use std::collections::HashMap;
use std::sync::RwLock;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::errors::Error;
use crate::layer::{Layer, PacketInfo};
use crate::types::{Address, IPv6Address, LayerCreatorFn};

pub const IPV6_BASE_HDR_LEN: usize = 40_usize;

lazy_static! {
    static ref NEXT_HEADERS_MAP: RwLock<HashMap<u8, LayerCreatorFn>> = RwLock::new(HashMap::new());
}

// Register ourselves to well-known Layer 2
pub(crate) fn register_defaults() -> Result<(), Error> {
    use crate::layers::ethernet::register_ethertype;

    lazy_static::initialize(&NEXT_HEADERS_MAP);

    register_ethertype(crate::types::ETHERTYPE_IP6, IPv6::creator)?;

    Ok(())
}

/// Register Next Header
///
/// Upper layer protocols register with the value of the Next Header field that announces them.
pub fn register_next_header(header: u8, creator: LayerCreatorFn) -> Result<(), Error> {
    lazy_static::initialize(&NEXT_HEADERS_MAP);

    let mut map = NEXT_HEADERS_MAP.write().unwrap();
    if map.contains_key(&header) {
        return Err(Error::RegisterError(format!("next header: {}", header)));
    }
    map.insert(header, creator);

    Ok(())
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct IPv6 {
    version: u8,
    traffic_class: u8,
    #[serde(serialize_with = "crate::types::hex::serialize_lower_hex_u32")]
    flow_label: u32,
    payload_len: u16,
    next_hdr: u8,
    hop_limit: u8,
    src_addr: IPv6Address,
    dst_addr: IPv6Address,
}

impl IPv6 {
    pub fn creator() -> Box<dyn Layer + Send> {
        Box::<IPv6>::default()
    }
}

impl Layer for IPv6 {
    fn decode_bytes(
        &mut self,
        bytes: &[u8],
    ) -> Result<(Option<Box<dyn Layer + Send>>, usize), Error> {
        if bytes.len() < IPV6_BASE_HDR_LEN {
            return Err(Error::TooShort {
                required: IPV6_BASE_HDR_LEN,
                available: bytes.len(),
                data: hex::encode(bytes),
            });
        }

        self.version = bytes[0] >> 4;
        self.traffic_class = ((bytes[0] & 0xF) << 4) | (bytes[1] >> 4);
        self.flow_label =
            ((bytes[1] & 0xF) as u32) << 16 | (bytes[2] as u32) << 8 | (bytes[3] as u32);
        self.payload_len = u16::from_be_bytes(bytes[4..6].try_into().unwrap());
        self.next_hdr = bytes[6];
        self.hop_limit = bytes[7];
        self.src_addr = bytes[8..24].try_into()?;
        self.dst_addr = bytes[24..40].try_into()?;

        let map = NEXT_HEADERS_MAP.read().unwrap();
        match map.get(&self.next_hdr) {
            None => Ok((None, IPV6_BASE_HDR_LEN)),
            Some(next_layer_creator) => Ok((Some(next_layer_creator()), IPV6_BASE_HDR_LEN)),
        }
    }

    fn decode_with_info(
        &mut self,
        bytes: &[u8],
        info: &mut PacketInfo,
    ) -> Result<(Option<Box<dyn Layer + Send>>, usize), Error> {
        let result = self.decode_bytes(bytes)?;

        info.src = Address::IPv6(self.src_addr);
        info.dst = Address::IPv6(self.dst_addr);
        // zero for jumbograms
        if self.payload_len != 0 {
            info.payload_len = Some(self.payload_len as usize);
        }

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "IPv6"
    }

    fn short_name(&self) -> &'static str {
        "ip6"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers;

    #[test]
    fn ipv6_header_and_addresses() {
        let _ = layers::register_defaults();

        let header = hex::decode("6000000000208440200100000000000000000000000000012001000000000000000000000000000200").unwrap();
        let mut ipv6 = IPv6::default();
        let mut info = PacketInfo::default();
        let (next, consumed) = ipv6.decode_with_info(&header, &mut info).unwrap();

        // next header 132 is SCTP
        assert!(next.is_some());
        assert_eq!(consumed, IPV6_BASE_HDR_LEN);
        assert_eq!(ipv6.payload_len, 0x20);
        assert_eq!(info.src.to_string(), "2001::1");
        assert!(matches!(info.dst, Address::IPv6(_)));
    }

    #[test]
    fn ipv6_too_short() {
        let mut ipv6 = IPv6::default();
        assert!(matches!(
            ipv6.decode_bytes(&[0x60; 39]),
            Err(Error::TooShort { required: 40, .. })
        ));
    }
}
