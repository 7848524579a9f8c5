//! Linux Cooked Link Layer version 1

use core::convert::TryInto as _;

use serde::Serialize;

use crate::errors::Error;
use crate::layers::ethernet::ethertype_creator;
use crate::{Layer, Packet, ENCAP_TYPE_LINUX_SLL};

pub const LINUX_SLL_HEADER_LENGTH: usize = 16_usize;

// Register our Encap Types with the Packet.
pub(crate) fn register_defaults() -> Result<(), Error> {
    Packet::register_encap_type(ENCAP_TYPE_LINUX_SLL, LinuxSll::creator)
}

#[derive(Debug, Default, Serialize)]
pub struct LinuxSll {
    packet_type: u16,
    ll_type: u16,
    ll_addr_len: u16,
    #[serde(serialize_with = "crate::types::hex::serialize_octets")]
    ll_addr: Vec<u8>,
    #[serde(serialize_with = "crate::types::hex::serialize_upper_hex_u16")]
    protocol: u16,
}

impl LinuxSll {
    pub(crate) fn creator() -> Box<dyn Layer + Send> {
        Box::<LinuxSll>::default()
    }
}

impl Layer for LinuxSll {
    fn decode_bytes(
        &mut self,
        bytes: &[u8],
    ) -> Result<(Option<Box<dyn Layer + Send>>, usize), Error> {
        if bytes.len() < LINUX_SLL_HEADER_LENGTH {
            return Err(Error::TooShort {
                required: LINUX_SLL_HEADER_LENGTH,
                available: bytes.len(),
                data: hex::encode(bytes),
            });
        }
        self.packet_type = u16::from_be_bytes(bytes[0..2].try_into().unwrap());
        self.ll_type = u16::from_be_bytes(bytes[2..4].try_into().unwrap());
        self.ll_addr_len = u16::from_be_bytes(bytes[4..6].try_into().unwrap());
        // address field is 8 octets, of which `ll_addr_len` are used
        let addr_len = (self.ll_addr_len as usize).min(8);
        self.ll_addr = bytes[6..6 + addr_len].into();
        self.protocol = u16::from_be_bytes(bytes[14..16].try_into().unwrap());

        match ethertype_creator(self.protocol) {
            None => Ok((None, LINUX_SLL_HEADER_LENGTH)),
            Some(l3_creator) => Ok((Some(l3_creator()), LINUX_SLL_HEADER_LENGTH)),
        }
    }

    fn name(&self) -> &'static str {
        "Linux SLL Version 1"
    }

    fn short_name(&self) -> &'static str {
        "linux_sll"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers;

    #[test]
    fn sll_to_ipv4() {
        let _ = layers::register_defaults();

        let bytes = hex::decode("00000001000600112233445500000800").unwrap();

        let mut sll = LinuxSll::default();
        let (next, consumed) = sll.decode_bytes(&bytes).unwrap();
        assert!(next.is_some());
        assert_eq!(consumed, LINUX_SLL_HEADER_LENGTH);
        assert_eq!(sll.ll_addr, vec![0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);

        let mut sll = LinuxSll::default();
        assert!(sll.decode_bytes(&bytes[..15]).is_err());
    }
}
