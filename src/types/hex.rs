//! Hex helpers for serialization
//!
//! Header fields like checksums and identifiers read better in hex than as integers. The
//! functions here are meant to be used with `#[serde(serialize_with = "...")]`.

macro_rules! generate_serialize_hex_fns {
    (($fn:ident, $format:literal, $trait:path)) => {
        pub fn $fn<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
            T: $trait,
        {
            serializer.serialize_str(format!($format, value).as_str())
        }
    };

    ($($tt:tt,)*) => {
        $(
            generate_serialize_hex_fns!($tt);
        )+
    };
}

generate_serialize_hex_fns! {
    (serialize_lower_hex_u8, "0x{:02x}", core::fmt::LowerHex),
    (serialize_lower_hex_u16, "0x{:04x}", core::fmt::LowerHex),
    (serialize_lower_hex_u32, "0x{:08x}", core::fmt::LowerHex),
    (serialize_upper_hex_u16, "0x{:04X}", core::fmt::UpperHex),
}

/// Render octets as a `0x` prefixed lower case hex string. Empty input gives `""`.
pub fn octets_to_string(octets: &[u8]) -> String {
    if octets.is_empty() {
        String::new()
    } else {
        format!("0x{}", hex::encode(octets))
    }
}

/// Serialize octets the way [`octets_to_string`] renders them.
pub fn serialize_octets<S>(octets: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&octets_to_string(octets))
}
