//! Aligned PER encoder
//!
//! Counterpart of [`AperDecoder`][`crate::per::decoder::AperDecoder`], used to build PDUs
//! from a [`Value`][`crate::per::value::Value`] tree.

use bitvec::prelude::*;

use crate::errors::Error;
use crate::per::constraints::{Constraint, Size};
use crate::per::decoder::{PerResult, FRAGMENT_UNIT};

/// APER (Aligned PER) Encoder
#[derive(Debug, Default)]
pub struct AperEncoder {
    data: BitVec<u8, Msb0>,
}

impl AperEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bit_len(&self) -> usize {
        self.data.len()
    }

    /// Finished encoding, padded to a whole number of octets.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.align();
        self.data.into_vec()
    }

    /// Align to octet boundary
    pub fn align(&mut self) {
        let remainder = self.data.len() % 8;
        if remainder != 0 {
            let padding = 8 - remainder;
            self.data.resize(self.data.len() + padding, false);
        }
    }

    pub fn write_bit(&mut self, bit: bool) {
        self.data.push(bit);
    }

    /// Write the low `num_bits` bits of `value`, MSB first.
    pub fn write_bits(&mut self, value: u64, num_bits: usize) -> PerResult<()> {
        if num_bits > 64 {
            return Err(Error::EncodeError(format!(
                "bit-field of {} bits does not fit 64",
                num_bits
            )));
        }
        if num_bits < 64 && value >> num_bits != 0 {
            return Err(Error::EncodeError(format!(
                "{} does not fit {} bits",
                value, num_bits
            )));
        }
        for i in (0..num_bits).rev() {
            self.data.push((value >> i) & 1 == 1);
        }
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if self.data.len() % 8 == 0 {
            self.data.extend_from_raw_slice(bytes);
        } else {
            for byte in bytes {
                for i in (0..8).rev() {
                    self.data.push((byte >> i) & 1 == 1);
                }
            }
        }
    }

    pub fn write_bit_slice(&mut self, bits: &BitSlice<u8, Msb0>) {
        self.data.extend_from_bitslice(bits);
    }

    /// Encode constrained whole number (X.691 10.5.7)
    pub fn encode_constrained_whole_number(
        &mut self,
        value: i64,
        constraint: &Constraint,
    ) -> PerResult<()> {
        let (min, max, range) = match (constraint.min, constraint.max, constraint.range()) {
            (Some(min), Some(max), Some(range)) if range > 0 => (min, max, range),
            _ => {
                return Err(Error::EncodeError(format!(
                    "not a constrained whole number: {:?}",
                    constraint
                )))
            }
        };
        if value < min || value > max {
            return Err(Error::ConstraintViolation { value, min, max });
        }

        let offset = (value as i128 - min as i128) as u64;
        if range == 1 {
            Ok(())
        } else if range <= 255 {
            self.write_bits(offset, constraint.bits_needed())
        } else if range == 256 {
            self.align();
            self.write_bits(offset, 8)
        } else if range <= 65536 {
            self.align();
            self.write_bits(offset, 16)
        } else {
            let len = std::cmp::max(1, (64 - offset.leading_zeros() as usize + 7) / 8);
            let octets = Constraint::new(1, constraint.octets_needed() as i64);
            self.encode_constrained_whole_number(len as i64, &octets)?;
            self.align();
            self.write_bits(offset, len * 8)
        }
    }

    /// Encode semi-constrained whole number (X.691 10.7)
    pub fn encode_semi_constrained_whole_number(&mut self, value: i64, min: i64) -> PerResult<()> {
        if value < min {
            return Err(Error::ConstraintViolation {
                value,
                min,
                max: i64::MAX,
            });
        }
        let offset = (value as i128 - min as i128) as u64;
        let len = std::cmp::max(1, (64 - offset.leading_zeros() as usize + 7) / 8);
        self.encode_length_determinant(len)?;
        self.write_bits(offset, len * 8)
    }

    /// Encode unconstrained whole number (X.691 10.8), minimal two's complement octets.
    pub fn encode_unconstrained_whole_number(&mut self, value: i64) -> PerResult<()> {
        let bytes = value.to_be_bytes();
        let mut start = 0;
        while start < 7 {
            let redundant = (bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
                || (bytes[start] == 0xff && bytes[start + 1] & 0x80 != 0);
            if !redundant {
                break;
            }
            start += 1;
        }
        self.encode_length_determinant(8 - start)?;
        self.write_bytes(&bytes[start..]);
        Ok(())
    }

    /// Encode an INTEGER against its (possibly extensible) constraint (X.691 13)
    pub fn encode_integer(&mut self, value: i64, constraint: &Constraint) -> PerResult<()> {
        if constraint.extensible {
            let outside = !constraint.contains(value);
            self.write_bit(outside);
            if outside {
                return self.encode_unconstrained_whole_number(value);
            }
        }
        match (constraint.min, constraint.max) {
            (Some(_), Some(_)) => self.encode_constrained_whole_number(value, constraint),
            (Some(min), None) => self.encode_semi_constrained_whole_number(value, min),
            _ => self.encode_unconstrained_whole_number(value),
        }
    }

    /// Encode normally small non-negative whole number (X.691 10.6)
    pub fn encode_normally_small_non_negative(&mut self, value: u64) -> PerResult<()> {
        if value < 64 {
            self.write_bit(false);
            self.write_bits(value, 6)
        } else {
            self.write_bit(true);
            self.encode_semi_constrained_whole_number(value as i64, 0)
        }
    }

    /// Unconstrained length determinant, short and long forms only (X.691 10.9.3.6, 10.9.3.7).
    pub fn encode_length_determinant(&mut self, len: usize) -> PerResult<()> {
        self.align();
        if len < 128 {
            self.write_bits(len as u64, 8)
        } else if len < FRAGMENT_UNIT {
            self.write_bits(0x8000 | len as u64, 16)
        } else {
            Err(Error::EncodeError(format!(
                "length {} needs fragmentation",
                len
            )))
        }
    }

    /// Write `total` units with an unconstrained length determinant, splitting into 16K
    /// fragments where required. `write_unit_range` writes the units `[start, end)`.
    pub fn encode_with_length<F>(&mut self, total: usize, mut write_unit_range: F) -> PerResult<()>
    where
        F: FnMut(&mut Self, usize, usize) -> PerResult<()>,
    {
        let mut start = 0;
        loop {
            let remaining = total - start;
            if remaining >= FRAGMENT_UNIT {
                let multiplier = std::cmp::min(4, remaining / FRAGMENT_UNIT);
                self.align();
                self.write_bits(0xc0 | multiplier as u64, 8)?;
                let end = start + multiplier * FRAGMENT_UNIT;
                write_unit_range(self, start, end)?;
                start = end;
                if start == total {
                    // A multiple of 16K ends with an empty final length.
                    self.encode_length_determinant(0)?;
                    return Ok(());
                }
            } else {
                self.encode_length_determinant(remaining)?;
                return write_unit_range(self, start, total);
            }
        }
    }

    /// Octets with an unconstrained, possibly fragmented, length determinant.
    pub fn encode_fragmented_octets(&mut self, bytes: &[u8]) -> PerResult<()> {
        self.encode_with_length(bytes.len(), |enc, start, end| {
            enc.write_bytes(&bytes[start..end]);
            Ok(())
        })
    }

    /// Length of a size constrained item, `false` when the caller has to write an
    /// unconstrained length determinant instead. Writes the extension bit if any.
    pub fn encode_size(&mut self, len: usize, size: &Size) -> PerResult<bool> {
        if size.extensible {
            let outside = !size.contains(len);
            self.write_bit(outside);
            if outside {
                return Ok(false);
            }
        } else if !size.contains(len) {
            return Err(Error::ConstraintViolation {
                value: len as i64,
                min: size.min as i64,
                max: size.max.map_or(i64::MAX, |m| m as i64),
            });
        }
        match size.constrained_max() {
            Some(_) if size.is_fixed() => Ok(true),
            Some(max) => {
                let constraint = Constraint::new(size.min as i64, max as i64);
                self.encode_constrained_whole_number(len as i64, &constraint)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Encode ENUMERATED (X.691 14)
    pub fn encode_enumerated(
        &mut self,
        index: usize,
        extension: bool,
        root_len: usize,
        extensible: bool,
    ) -> PerResult<()> {
        self.encode_index(index, extension, root_len, extensible)
    }

    /// Encode CHOICE index (X.691 23)
    pub fn encode_choice_index(
        &mut self,
        index: usize,
        extension: bool,
        num_alternatives: usize,
        extensible: bool,
    ) -> PerResult<()> {
        self.encode_index(index, extension, num_alternatives, extensible)
    }

    fn encode_index(
        &mut self,
        index: usize,
        extension: bool,
        root_len: usize,
        extensible: bool,
    ) -> PerResult<()> {
        if extension && !extensible {
            return Err(Error::EncodeError(format!(
                "extension index {} for a non-extensible type",
                index
            )));
        }
        if extensible {
            self.write_bit(extension);
        }
        if extension {
            self.encode_normally_small_non_negative(index as u64)
        } else {
            if root_len == 0 {
                return Err(Error::EncodeError("no root alternatives".to_string()));
            }
            let constraint = Constraint::new(0, root_len as i64 - 1);
            self.encode_constrained_whole_number(index as i64, &constraint)
        }
    }

    /// Encode BIT STRING (X.691 16)
    pub fn encode_bit_string(&mut self, bits: &BitSlice<u8, Msb0>, size: &Size) -> PerResult<()> {
        let fixed = size.is_fixed();
        if self.encode_size(bits.len(), size)? {
            if fixed {
                if bits.len() > 16 {
                    self.align();
                }
            } else if !bits.is_empty() {
                self.align();
            }
            self.write_bit_slice(bits);
            Ok(())
        } else {
            self.encode_with_length(bits.len(), |enc, start, end| {
                enc.write_bit_slice(&bits[start..end]);
                Ok(())
            })
        }
    }

    /// Encode OCTET STRING (X.691 17)
    pub fn encode_octet_string(&mut self, bytes: &[u8], size: &Size) -> PerResult<()> {
        let fixed = size.is_fixed();
        if self.encode_size(bytes.len(), size)? {
            if fixed {
                if bytes.len() > 2 {
                    self.align();
                }
            } else if !bytes.is_empty() {
                self.align();
            }
            self.write_bytes(bytes);
            Ok(())
        } else {
            self.encode_fragmented_octets(bytes)
        }
    }

    /// Encode PrintableString, 8 bits per character in the ALIGNED variant.
    pub fn encode_printable_string(&mut self, s: &str, size: &Size) -> PerResult<()> {
        if let Some(c) = s.chars().find(|c| !is_printable(*c)) {
            return Err(Error::EncodeError(format!(
                "{:?} is not a PrintableString character",
                c
            )));
        }
        self.encode_octet_string(s.as_bytes(), size)
    }

    pub fn encode_utf8_string(&mut self, s: &str) -> PerResult<()> {
        self.encode_fragmented_octets(s.as_bytes())
    }

    /// Encode open type. An empty encoding is replaced by a single zero octet (X.691 11.2.1).
    pub fn encode_open_type(&mut self, bytes: &[u8]) -> PerResult<()> {
        if bytes.is_empty() {
            self.encode_fragmented_octets(&[0x00])
        } else {
            self.encode_fragmented_octets(bytes)
        }
    }

    pub fn encode_sequence_preamble(&mut self, extended: Option<bool>, present: &[bool]) {
        if let Some(extended) = extended {
            self.write_bit(extended);
        }
        for bit in present {
            self.write_bit(*bit);
        }
    }

    pub fn encode_extension_bitmap(&mut self, present: &[bool]) -> PerResult<()> {
        if present.is_empty() {
            return Err(Error::EncodeError("empty extension bitmap".to_string()));
        }
        self.encode_normally_small_non_negative(present.len() as u64 - 1)?;
        for bit in present {
            self.write_bit(*bit);
        }
        Ok(())
    }
}

fn is_printable(c: char) -> bool {
    c.is_ascii_alphanumeric() || " '()+,-./:=?".contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::per::decoder::AperDecoder;

    #[test]
    fn procedure_code_and_criticality() {
        // choice index 0 of 3 (ext 0), align, procedureCode 21, criticality ignore, align
        let mut enc = AperEncoder::new();
        enc.encode_choice_index(0, false, 3, true).unwrap();
        enc.encode_constrained_whole_number(21, &Constraint::new(0, 255))
            .unwrap();
        enc.encode_enumerated(1, false, 3, false).unwrap();
        assert_eq!(enc.into_bytes(), vec![0x00, 0x15, 0x40]);
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut enc = AperEncoder::new();
        assert_eq!(
            enc.encode_constrained_whole_number(300, &Constraint::new(0, 255)),
            Err(Error::ConstraintViolation {
                value: 300,
                min: 0,
                max: 255
            })
        );
    }

    #[test]
    fn large_range_uses_minimal_octets() {
        let mut enc = AperEncoder::new();
        enc.encode_constrained_whole_number(0x012345, &Constraint::new(0, 4294967295))
            .unwrap();
        assert_eq!(enc.into_bytes(), vec![0x80, 0x01, 0x23, 0x45]);

        let mut enc = AperEncoder::new();
        enc.encode_constrained_whole_number(0, &Constraint::new(0, 4294967295))
            .unwrap();
        assert_eq!(enc.into_bytes(), vec![0x00, 0x00]);
    }

    #[test]
    fn unconstrained_minimal_octets() {
        let mut enc = AperEncoder::new();
        enc.encode_unconstrained_whole_number(-2).unwrap();
        enc.encode_unconstrained_whole_number(128).unwrap();
        assert_eq!(enc.into_bytes(), vec![0x01, 0xfe, 0x02, 0x00, 0x80]);
    }

    #[test]
    fn empty_open_type_is_one_zero_octet() {
        let mut enc = AperEncoder::new();
        enc.encode_open_type(&[]).unwrap();
        assert_eq!(enc.into_bytes(), vec![0x01, 0x00]);
    }

    #[test]
    fn fragmented_octets_decode_back() {
        let payload = vec![0x5a; 2 * FRAGMENT_UNIT + 3];
        let mut enc = AperEncoder::new();
        enc.encode_fragmented_octets(&payload).unwrap();
        let bytes = enc.into_bytes();
        assert_eq!(bytes[0], 0xc2);

        let mut dec = AperDecoder::new(&bytes);
        assert_eq!(dec.decode_fragmented_octets(), Ok(payload));
    }

    #[test]
    fn exact_fragment_multiple_ends_with_zero_length() {
        let payload = vec![0x01; FRAGMENT_UNIT];
        let mut enc = AperEncoder::new();
        enc.encode_fragmented_octets(&payload).unwrap();
        let bytes = enc.into_bytes();
        assert_eq!(bytes.len(), FRAGMENT_UNIT + 2);
        assert_eq!(bytes[FRAGMENT_UNIT + 1], 0x00);
    }

    #[test]
    fn size_outside_extensible_root() {
        // TransportLayerAddress (SIZE(1..160, ...)) with 161 bits
        let bits = bitvec![u8, Msb0; 1; 161];
        let mut enc = AperEncoder::new();
        enc.encode_bit_string(&bits, &Size::range(1, 160).ext())
            .unwrap();
        let bytes = enc.into_bytes();
        // ext bit, align, length 161 in the long form
        assert_eq!(&bytes[..3], &[0x80, 0x80, 0xa1]);

        let mut dec = AperDecoder::new(&bytes);
        assert_eq!(
            dec.decode_bit_string(&Size::range(1, 160).ext()).map(|b| b.len()),
            Ok(161)
        );
    }

    #[test]
    fn short_ranged_strings_are_aligned() {
        let mut enc = AperEncoder::new();
        enc.write_bit(true);
        enc.encode_octet_string(&[0xab], &Size::range(1, 2)).unwrap();
        assert_eq!(enc.into_bytes(), vec![0x80, 0xab]);

        let mut enc = AperEncoder::new();
        enc.write_bit(true);
        enc.encode_bit_string(bits![u8, Msb0; 1, 0, 1, 0], &Size::range(1, 8))
            .unwrap();
        let bytes = enc.into_bytes();
        assert_eq!(bytes, vec![0xb0, 0xa0]);

        let mut dec = AperDecoder::new(&bytes);
        assert_eq!(dec.read_bit(), Ok(true));
        assert_eq!(
            dec.decode_bit_string(&Size::range(1, 8)).map(|b| b.len()),
            Ok(4)
        );
    }

    #[test]
    fn printable_string_charset() {
        let mut enc = AperEncoder::new();
        assert!(enc
            .encode_printable_string("gNB-1", &Size::range(1, 150).ext())
            .is_ok());
        assert!(enc
            .encode_printable_string("gNB_1", &Size::range(1, 150).ext())
            .is_err());
    }
}
