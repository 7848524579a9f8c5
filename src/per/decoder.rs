//! Aligned PER decoder
//!
//! Bit level primitives of ITU-T X.691 (ALIGNED variant). Everything here is type agnostic,
//! the descriptor walker in [`crate::per::walk`] decides which primitive to call.

use bitvec::prelude::*;

use crate::errors::Error;
use crate::per::constraints::{Constraint, Size};

pub type PerResult<T> = Result<T, Error>;

/// Unit of the fragmented length form (X.691 11.9.3.8).
pub const FRAGMENT_UNIT: usize = 16384;

/// APER (Aligned PER) Decoder
pub struct AperDecoder<'a> {
    bytes: &'a [u8],
    data: &'a BitSlice<u8, Msb0>,
    position: usize,
}

impl<'a> AperDecoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            data: BitSlice::from_slice(bytes),
            position: 0,
        }
    }

    pub fn bit_position(&self) -> usize {
        self.position
    }

    pub fn remaining_bits(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Number of whole octets consumed so far (a partially read octet counts).
    pub fn consumed_octets(&self) -> usize {
        (self.position + 7) / 8
    }

    /// Align to octet boundary
    pub fn align(&mut self) {
        let remainder = self.position % 8;
        if remainder != 0 {
            self.position += 8 - remainder;
        }
    }

    fn underflow(&self, needed: usize) -> Error {
        Error::BufferUnderflow {
            needed,
            available: self.remaining_bits(),
        }
    }

    pub fn read_bit(&mut self) -> PerResult<bool> {
        if self.position >= self.data.len() {
            return Err(self.underflow(1));
        }
        let bit = self.data[self.position];
        self.position += 1;
        Ok(bit)
    }

    /// Read up to 64 bits as an unsigned value, MSB first.
    pub fn read_bits(&mut self, num_bits: usize) -> PerResult<u64> {
        if num_bits > 64 {
            return Err(Error::ParseError(format!(
                "bit-field of {} bits does not fit 64",
                num_bits
            )));
        }
        if self.remaining_bits() < num_bits {
            return Err(self.underflow(num_bits));
        }
        let value = if num_bits == 0 {
            0
        } else {
            self.data[self.position..self.position + num_bits].load_be::<u64>()
        };
        self.position += num_bits;
        Ok(value)
    }

    pub fn read_bytes(&mut self, num_bytes: usize) -> PerResult<Vec<u8>> {
        let needed = num_bytes * 8;
        if self.remaining_bits() < needed {
            return Err(self.underflow(needed));
        }
        if self.position % 8 == 0 {
            let start = self.position / 8;
            self.position += needed;
            return Ok(self.bytes[start..start + num_bytes].to_vec());
        }
        let mut out = Vec::with_capacity(num_bytes);
        for _ in 0..num_bytes {
            out.push(self.read_bits(8)? as u8);
        }
        Ok(out)
    }

    pub fn read_bit_vec(&mut self, num_bits: usize) -> PerResult<BitVec<u8, Msb0>> {
        if self.remaining_bits() < num_bits {
            return Err(self.underflow(num_bits));
        }
        let bits = self.data[self.position..self.position + num_bits].to_bitvec();
        self.position += num_bits;
        Ok(bits)
    }

    /// Decode constrained whole number (X.691 10.5.7)
    pub fn decode_constrained_whole_number(&mut self, constraint: &Constraint) -> PerResult<i64> {
        let (min, range) = match (constraint.min, constraint.range()) {
            (Some(min), Some(range)) if range > 0 => (min, range),
            _ => {
                return Err(Error::ParseError(format!(
                    "not a constrained whole number: {:?}",
                    constraint
                )))
            }
        };

        let offset = if range == 1 {
            0
        } else if range <= 255 {
            self.read_bits(constraint.bits_needed())?
        } else if range == 256 {
            self.align();
            self.read_bits(8)?
        } else if range <= 65536 {
            self.align();
            self.read_bits(16)?
        } else {
            // Length in octets as a bit-field over 1..=octets_needed, then the value octets.
            let octets = Constraint::new(1, constraint.octets_needed() as i64);
            let len = self.decode_constrained_whole_number(&octets)? as usize;
            self.align();
            self.read_bits(len * 8)?
        };

        let value = min as i128 + offset as i128;
        match constraint.max {
            Some(max) if value > max as i128 => Err(Error::ConstraintViolation {
                value: value as i64,
                min,
                max,
            }),
            _ => Ok(value as i64),
        }
    }

    /// Decode semi-constrained whole number (X.691 10.7)
    pub fn decode_semi_constrained_whole_number(&mut self, min: i64) -> PerResult<i64> {
        let len = self.decode_length_determinant()?;
        if len > 8 {
            return Err(Error::ParseError(format!("integer of {} octets", len)));
        }
        let offset = self.read_bits(len * 8)?;
        Ok(min.wrapping_add(offset as i64))
    }

    /// Decode unconstrained whole number (X.691 10.8)
    pub fn decode_unconstrained_whole_number(&mut self) -> PerResult<i64> {
        let len = self.decode_length_determinant()?;
        if len > 8 {
            return Err(Error::ParseError(format!("integer of {} octets", len)));
        }
        let bytes = self.read_bytes(len)?;

        let negative = bytes.first().map_or(false, |b| b & 0x80 != 0);
        let mut value: i64 = if negative { -1 } else { 0 };
        for byte in bytes {
            value = (value << 8) | (byte as i64);
        }
        Ok(value)
    }

    /// Decode an INTEGER against its (possibly extensible) constraint (X.691 13)
    pub fn decode_integer(&mut self, constraint: &Constraint) -> PerResult<i64> {
        if constraint.extensible && self.read_bit()? {
            return self.decode_unconstrained_whole_number();
        }
        match (constraint.min, constraint.max) {
            (Some(_), Some(_)) => self.decode_constrained_whole_number(constraint),
            (Some(min), None) => self.decode_semi_constrained_whole_number(min),
            _ => self.decode_unconstrained_whole_number(),
        }
    }

    /// Decode normally small non-negative whole number (X.691 10.6)
    pub fn decode_normally_small_non_negative(&mut self) -> PerResult<u64> {
        if !self.read_bit()? {
            self.read_bits(6)
        } else {
            self.decode_semi_constrained_whole_number(0).map(|v| v as u64)
        }
    }

    /// One piece of an unconstrained length determinant (X.691 10.9.3.6 - 10.9.3.8).
    ///
    /// Returns the length and whether it is a fragment, in which case another length
    /// determinant follows the content of this fragment.
    pub fn decode_length_chunk(&mut self) -> PerResult<(usize, bool)> {
        self.align();
        let first = self.read_bits(8)? as usize;

        if first & 0x80 == 0 {
            Ok((first, false))
        } else if first & 0x40 == 0 {
            let second = self.read_bits(8)? as usize;
            Ok((((first & 0x3f) << 8) | second, false))
        } else {
            let multiplier = first & 0x3f;
            if multiplier == 0 || multiplier > 4 {
                return Err(Error::ParseError(format!(
                    "invalid fragment multiplier {}",
                    multiplier
                )));
            }
            Ok((multiplier * FRAGMENT_UNIT, true))
        }
    }

    /// Unconstrained length determinant where fragmentation cannot occur.
    pub fn decode_length_determinant(&mut self) -> PerResult<usize> {
        match self.decode_length_chunk()? {
            (len, false) => Ok(len),
            (len, true) => Err(Error::ParseError(format!(
                "unexpected fragmented length {}",
                len
            ))),
        }
    }

    /// Length of a size constrained item whose upper bound is below 64K, `None` when the
    /// caller has to fall back to an unconstrained (possibly fragmented) length.
    ///
    /// The extension bit of an extensible size constraint is consumed here.
    pub fn decode_size(&mut self, size: &Size) -> PerResult<Option<usize>> {
        if size.extensible && self.read_bit()? {
            return Ok(None);
        }
        match size.constrained_max() {
            Some(max) if size.is_fixed() => Ok(Some(max)),
            Some(max) => {
                let constraint = Constraint::new(size.min as i64, max as i64);
                Ok(Some(self.decode_constrained_whole_number(&constraint)? as usize))
            }
            None => Ok(None),
        }
    }

    /// Octets following an unconstrained length determinant, fragments reassembled.
    pub fn decode_fragmented_octets(&mut self) -> PerResult<Vec<u8>> {
        let mut out = Vec::new();
        loop {
            let (len, more) = self.decode_length_chunk()?;
            out.extend(self.read_bytes(len)?);
            if !more {
                break;
            }
        }
        Ok(out)
    }

    /// Decode ENUMERATED (X.691 14). Returns the index and whether it is an extension index.
    pub fn decode_enumerated(&mut self, root_len: usize, extensible: bool) -> PerResult<(usize, bool)> {
        if extensible && self.read_bit()? {
            return Ok((self.decode_normally_small_non_negative()? as usize, true));
        }
        if root_len == 0 {
            return Err(Error::ParseError("empty enumeration".to_string()));
        }
        let constraint = Constraint::new(0, root_len as i64 - 1);
        Ok((self.decode_constrained_whole_number(&constraint)? as usize, false))
    }

    /// Decode CHOICE index (X.691 23). Returns the index and whether it is an extension index.
    pub fn decode_choice_index(
        &mut self,
        num_alternatives: usize,
        extensible: bool,
    ) -> PerResult<(usize, bool)> {
        if extensible && self.read_bit()? {
            return Ok((self.decode_normally_small_non_negative()? as usize, true));
        }
        if num_alternatives == 0 {
            return Err(Error::ParseError("CHOICE without alternatives".to_string()));
        }
        let constraint = Constraint::new(0, num_alternatives as i64 - 1);
        Ok((self.decode_constrained_whole_number(&constraint)? as usize, false))
    }

    /// Decode BIT STRING (X.691 16)
    pub fn decode_bit_string(&mut self, size: &Size) -> PerResult<BitVec<u8, Msb0>> {
        // an extensible size within its root is laid out as the root constraint
        let fixed = size.is_fixed();
        match self.decode_size(size)? {
            Some(len) if fixed => {
                if len > 16 {
                    self.align();
                }
                self.read_bit_vec(len)
            }
            Some(len) => {
                if len > 0 {
                    self.align();
                }
                self.read_bit_vec(len)
            }
            None => {
                let mut bits = BitVec::new();
                loop {
                    let (len, more) = self.decode_length_chunk()?;
                    bits.extend_from_bitslice(&self.read_bit_vec(len)?);
                    if !more {
                        break;
                    }
                }
                Ok(bits)
            }
        }
    }

    /// Decode OCTET STRING (X.691 17)
    pub fn decode_octet_string(&mut self, size: &Size) -> PerResult<Vec<u8>> {
        let fixed = size.is_fixed();
        match self.decode_size(size)? {
            Some(len) if fixed => {
                if len > 2 {
                    self.align();
                }
                self.read_bytes(len)
            }
            Some(len) => {
                if len > 0 {
                    self.align();
                }
                self.read_bytes(len)
            }
            None => self.decode_fragmented_octets(),
        }
    }

    /// Decode PrintableString (X.691 30). In the ALIGNED variant each character takes 8 bits,
    /// so the layout is that of an OCTET STRING with the same SIZE constraint.
    pub fn decode_printable_string(&mut self, size: &Size) -> PerResult<String> {
        let octets = self.decode_octet_string(size)?;
        Ok(octets.into_iter().map(char::from).collect())
    }

    /// Decode UTF8String, a length-prefixed octet sequence (X.691 30.8).
    pub fn decode_utf8_string(&mut self) -> PerResult<String> {
        let octets = self.decode_fragmented_octets()?;
        String::from_utf8(octets).map_err(|e| Error::ParseError(format!("UTF8String: {}", e)))
    }

    /// Decode the octets of an open type (X.691 11.2)
    pub fn decode_open_type(&mut self) -> PerResult<Vec<u8>> {
        self.decode_fragmented_octets()
    }

    /// Extension bit and presence bitmap of a SEQUENCE (X.691 19.1 - 19.3).
    pub fn decode_sequence_preamble(
        &mut self,
        extensible: bool,
        optional_count: usize,
    ) -> PerResult<(bool, Vec<bool>)> {
        let extended = if extensible { self.read_bit()? } else { false };
        let mut present = Vec::with_capacity(optional_count);
        for _ in 0..optional_count {
            present.push(self.read_bit()?);
        }
        Ok((extended, present))
    }

    /// Presence bitmap of SEQUENCE extension additions (X.691 19.8).
    pub fn decode_extension_bitmap(&mut self) -> PerResult<Vec<bool>> {
        let count = usize::try_from(self.decode_normally_small_non_negative()?)
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| Error::ParseError("extension bitmap length overflows".to_string()))?;
        if count > self.remaining_bits() {
            return Err(self.underflow(count));
        }
        let mut present = Vec::new();
        for _ in 0..count {
            present.push(self.read_bit()?);
        }
        Ok(present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constrained_bit_fields() {
        // 3 bits (0..7) = 5, then 2 bits (0..2) = 2: 101 10 000
        let bytes = [0b1011_0000];
        let mut d = AperDecoder::new(&bytes);
        assert_eq!(d.decode_constrained_whole_number(&Constraint::new(0, 7)), Ok(5));
        assert_eq!(d.decode_constrained_whole_number(&Constraint::new(0, 2)), Ok(2));
        assert_eq!(d.bit_position(), 5);
    }

    #[test]
    fn one_and_two_octet_ranges_are_aligned() {
        let bytes = [0x80, 0x15, 0x00, 0x07];
        let mut d = AperDecoder::new(&bytes);
        assert_eq!(d.read_bit(), Ok(true));
        assert_eq!(d.decode_constrained_whole_number(&Constraint::new(0, 255)), Ok(0x15));
        assert_eq!(d.decode_constrained_whole_number(&Constraint::new(0, 65535)), Ok(7));
        assert_eq!(d.remaining_bits(), 0);
    }

    #[test]
    fn large_range_is_length_prefixed() {
        // NG-RANnodeUEXnAPID: 2 bit length (value 2 => 3 octets), align, 0x012345
        let bytes = [0b1000_0000, 0x01, 0x23, 0x45];
        let mut d = AperDecoder::new(&bytes);
        assert_eq!(
            d.decode_constrained_whole_number(&Constraint::new(0, 4294967295)),
            Ok(0x012345)
        );
    }

    #[test]
    fn extensible_integer_outside_root() {
        // extension bit set, then unconstrained: length 2, 0x0100
        let bytes = [0x80, 0x02, 0x01, 0x00];
        let mut d = AperDecoder::new(&bytes);
        assert_eq!(d.decode_integer(&Constraint::extensible(0, 10)), Ok(256));
    }

    #[test]
    fn unconstrained_negative() {
        let bytes = [0x01, 0xfe];
        let mut d = AperDecoder::new(&bytes);
        assert_eq!(d.decode_unconstrained_whole_number(), Ok(-2));
    }

    #[test]
    fn length_forms() {
        let mut d = AperDecoder::new(&[0x7f]);
        assert_eq!(d.decode_length_determinant(), Ok(127));
        let mut d = AperDecoder::new(&[0x81, 0x00]);
        assert_eq!(d.decode_length_determinant(), Ok(256));
        let mut d = AperDecoder::new(&[0xc1]);
        assert_eq!(d.decode_length_chunk(), Ok((16384, true)));
        let mut d = AperDecoder::new(&[0xc5]);
        assert!(d.decode_length_chunk().is_err());
    }

    #[test]
    fn fragmented_octets_are_reassembled() {
        let mut bytes = vec![0xc1];
        bytes.extend(vec![0xab; 16384]);
        bytes.push(0x02);
        bytes.extend([0x01, 0x02]);
        let mut d = AperDecoder::new(&bytes);
        let octets = d.decode_open_type().unwrap();
        assert_eq!(octets.len(), 16386);
        assert_eq!(&octets[16384..], &[0x01, 0x02]);
    }

    #[test]
    fn octet_string_fixed_three_is_aligned() {
        // one bit of preamble, then PLMN-Identity (SIZE(3)) starts at the next octet
        let bytes = [0x80, 0x02, 0xf8, 0x39];
        let mut d = AperDecoder::new(&bytes);
        assert_eq!(d.read_bit(), Ok(true));
        assert_eq!(d.decode_octet_string(&Size::fixed(3)), Ok(vec![0x02, 0xf8, 0x39]));
    }

    #[test]
    fn bit_string_fixed_small_is_not_aligned() {
        // 1 bit, then BIT STRING (SIZE(6)) = 101101, 1 bit padding
        let bytes = [0b0101_1010];
        let mut d = AperDecoder::new(&bytes);
        assert_eq!(d.read_bit(), Ok(false));
        let bits = d.decode_bit_string(&Size::fixed(6)).unwrap();
        assert_eq!(bits.len(), 6);
        assert_eq!(bits.load_be::<u8>(), 0b101101);
    }

    #[test]
    fn bit_string_ranged_is_aligned() {
        // gnb-ID BIT STRING (SIZE(22..32)): 4 bit length (32 - 22 = 10), align, 4 octets
        let bytes = [0b1010_0000, 0x00, 0x00, 0x01, 0x02];
        let mut d = AperDecoder::new(&bytes);
        let bits = d.decode_bit_string(&Size::range(22, 32)).unwrap();
        assert_eq!(bits.len(), 32);
        assert_eq!(bits.load_be::<u32>(), 0x0102);
    }

    #[test]
    fn short_ranged_octet_string_is_aligned() {
        // 1 bit, OCTET STRING (SIZE(1..2)): 1 bit length, align, 0xab
        let bytes = [0x80, 0xab];
        let mut d = AperDecoder::new(&bytes);
        assert_eq!(d.read_bit(), Ok(true));
        assert_eq!(d.decode_octet_string(&Size::range(1, 2)), Ok(vec![0xab]));
        assert_eq!(d.remaining_bits(), 0);
    }

    #[test]
    fn short_ranged_bit_string_is_aligned() {
        // 1 bit, BIT STRING (SIZE(1..8)): 3 bit length (4 - 1), align, 1010
        let bytes = [0xb0, 0xa0];
        let mut d = AperDecoder::new(&bytes);
        assert_eq!(d.read_bit(), Ok(true));
        let bits = d.decode_bit_string(&Size::range(1, 8)).unwrap();
        assert_eq!(bits.len(), 4);
        assert_eq!(bits.load_be::<u8>(), 0b1010);
    }

    #[test]
    fn enumerated_and_choice() {
        // extensible enumerated with 2 root items: ext 0, index 1; choice of 5: index 3
        let bytes = [0b0101_1000];
        let mut d = AperDecoder::new(&bytes);
        assert_eq!(d.decode_enumerated(2, true), Ok((1, false)));
        assert_eq!(d.decode_choice_index(5, false), Ok((3, false)));
    }

    #[test]
    fn extension_bitmap() {
        // normally small 1 (=> 2 bits), bitmap 10
        let bytes = [0b0000_0011, 0b0000_0000];
        let mut d = AperDecoder::new(&bytes);
        assert_eq!(d.decode_extension_bitmap(), Ok(vec![true, false]));
    }

    #[test]
    fn extension_bitmap_longer_than_input() {
        // long form normally small of 8 octets, all ones
        let bytes = [0x80, 0x08, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff];
        let mut d = AperDecoder::new(&bytes);
        assert!(d.decode_extension_bitmap().is_err());

        // normally small 64 + 1 bits announced, only 15 bits follow
        let bytes = [0b0100_0000, 0x00];
        let mut d = AperDecoder::new(&bytes);
        assert!(d.decode_extension_bitmap().is_err());
    }

    #[test]
    fn underflow_is_an_error() {
        let mut d = AperDecoder::new(&[0x00]);
        assert_eq!(
            d.read_bits(9),
            Err(Error::BufferUnderflow {
                needed: 9,
                available: 8
            })
        );
    }
}
