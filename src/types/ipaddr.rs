//! Definition of IP Address Types
//!
//! This module defines types for IPv4 and IPv6 which are simply based on the u8 arrays, and an
//! [`Address`] that is either of them (or none, before a network layer has been decoded).

use core::convert::TryFrom;
use core::fmt;

use std::net::{Ipv4Addr, Ipv6Addr};

use serde::{Serialize, Serializer};

use crate::errors::Error as CrateError;

#[derive(Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IPv4Address([u8; 4]);

impl IPv4Address {
    pub const fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 4]> for IPv4Address {
    fn from(value: [u8; 4]) -> Self {
        Self(value)
    }
}

impl TryFrom<&'_ [u8]> for IPv4Address {
    type Error = CrateError;

    fn try_from(slice: &'_ [u8]) -> Result<Self, Self::Error> {
        if slice.len() != 4 {
            Err(CrateError::ParseError(format!(
                "IPv4Address: {}",
                hex::encode(slice)
            )))
        } else {
            let mut ip = IPv4Address::default();
            ip.0.copy_from_slice(slice);
            Ok(ip)
        }
    }
}

impl fmt::Display for IPv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.0[0], self.0[1], self.0[2], self.0[3])
    }
}

impl fmt::Debug for IPv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Serialize for IPv4Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(format!("{}", self).as_str())
    }
}

#[derive(Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IPv6Address([u8; 16]);

impl IPv6Address {
    pub const fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 16]> for IPv6Address {
    fn from(value: [u8; 16]) -> Self {
        Self(value)
    }
}

impl TryFrom<&'_ [u8]> for IPv6Address {
    type Error = CrateError;

    fn try_from(slice: &'_ [u8]) -> Result<Self, Self::Error> {
        if slice.len() != 16 {
            Err(CrateError::ParseError(format!(
                "IPv6Address: {}",
                hex::encode(slice)
            )))
        } else {
            let mut ip = IPv6Address::default();
            ip.0.copy_from_slice(slice);
            Ok(ip)
        }
    }
}

impl fmt::Display for IPv6Address {
    // RFC 5952 text form, as implemented by `std::net`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Ipv6Addr::from(self.0), f)
    }
}

impl fmt::Debug for IPv6Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Serialize for IPv6Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(format!("{}", self).as_str())
    }
}

/// Network address of one side of a packet.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Address {
    #[default]
    None,
    IPv4(IPv4Address),
    IPv6(IPv6Address),
}

impl Address {
    pub fn is_none(&self) -> bool {
        matches!(self, Address::None)
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Self {
        Address::IPv4(addr.octets().into())
    }
}

impl From<Ipv6Addr> for Address {
    fn from(addr: Ipv6Addr) -> Self {
        Address::IPv6(addr.octets().into())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::None => write!(f, "-"),
            Address::IPv4(a) => write!(f, "{}", a),
            Address::IPv6(a) => write!(f, "{}", a),
        }
    }
}

#[cfg(test)]
mod tests {

    use core::convert::TryInto;

    use super::*;

    #[test]
    fn ipv6_addr_tests() {
        for input in [
            "fe80::1",
            "::",
            "::1",
            "::ffff:0.0.0.0",
            "64:ff9b::",
            "2a03:2880:f12f:183:face:b00c:0:25de",
            "2404:6800:4003:c04::1b",
        ] {
            let octets = input.parse::<Ipv6Addr>().unwrap().octets();
            let ipv6: Result<IPv6Address, _> = octets[..].try_into();
            assert!(ipv6.is_ok(), "{}", input);
            assert_eq!(input, format!("{}", ipv6.unwrap()));
        }

        // IPv4-mapped addresses print their low 32 bits dotted
        let mapped: IPv6Address = "::ffff:0:0".parse::<Ipv6Addr>().unwrap().octets()[..]
            .try_into()
            .unwrap();
        assert_eq!(format!("{}", mapped), "::ffff:0.0.0.0");
    }

    #[test]
    fn ipv4_wrong_length_fails() {
        let ip: Result<IPv4Address, _> = [10u8, 0, 0][..].try_into();
        assert_eq!(
            ip.err(),
            Some(CrateError::ParseError("IPv4Address: 0a0000".to_string()))
        );
    }

    #[test]
    fn address_display() {
        let a: Address = Ipv4Addr::new(192, 168, 10, 1).into();
        assert_eq!(format!("{}", a), "192.168.10.1");
        assert_eq!(format!("{}", Address::None), "-");
    }
}
