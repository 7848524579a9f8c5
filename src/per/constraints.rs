//! PER visible constraints
//!
//! Value-range constraints for INTEGER and SIZE constraints for strings and SEQUENCE OF, as
//! they appear in the ASN.1 module. Only PER visible constraints are modeled.

/// Value range of an INTEGER (X.691 10.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraint {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub extensible: bool,
}

impl Constraint {
    pub const UNCONSTRAINED: Constraint = Constraint {
        min: None,
        max: None,
        extensible: false,
    };

    pub const fn new(min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            extensible: false,
        }
    }

    /// `INTEGER (min..max, ...)`
    pub const fn extensible(min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            extensible: true,
        }
    }

    /// `INTEGER (min..MAX)`
    pub const fn semi(min: i64) -> Self {
        Self {
            min: Some(min),
            max: None,
            extensible: false,
        }
    }

    /// Number of values in the root, `None` unless both bounds are known.
    pub fn range(&self) -> Option<u64> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if max >= min => Some((max as i128 - min as i128 + 1) as u64),
            (Some(_), Some(_)) => Some(0),
            _ => None,
        }
    }

    /// Bits of the minimal bit-field holding `range - 1`.
    pub fn bits_needed(&self) -> usize {
        match self.range() {
            Some(range) if range > 1 => 64 - (range - 1).leading_zeros() as usize,
            _ => 0,
        }
    }

    /// Octets needed to hold `range - 1`, used by the length-prefixed form of large ranges.
    pub fn octets_needed(&self) -> usize {
        (self.bits_needed() + 7) / 8
    }

    pub fn contains(&self, value: i64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// SIZE constraint of a BIT STRING, OCTET STRING, character string or SEQUENCE OF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub min: usize,
    pub max: Option<usize>,
    pub extensible: bool,
}

impl Size {
    pub const UNBOUNDED: Size = Size {
        min: 0,
        max: None,
        extensible: false,
    };

    pub const fn fixed(n: usize) -> Self {
        Self {
            min: n,
            max: Some(n),
            extensible: false,
        }
    }

    pub const fn range(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
            extensible: false,
        }
    }

    pub const fn at_least(min: usize) -> Self {
        Self {
            min,
            max: None,
            extensible: false,
        }
    }

    /// Same constraint with an extension marker.
    pub const fn ext(self) -> Self {
        Self {
            extensible: true,
            ..self
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.max == Some(self.min)
    }

    /// Upper bound that still gets a constrained length encoding (less than 64K).
    pub fn constrained_max(&self) -> Option<usize> {
        match self.max {
            Some(max) if max < 65536 => Some(max),
            _ => None,
        }
    }

    pub fn contains(&self, len: usize) -> bool {
        len >= self.min && self.max.map_or(true, |max| len <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_bits_needed() {
        assert_eq!(Constraint::new(0, 0).bits_needed(), 0);
        assert_eq!(Constraint::new(0, 1).bits_needed(), 1);
        assert_eq!(Constraint::new(0, 2).bits_needed(), 2);
        assert_eq!(Constraint::new(0, 7).bits_needed(), 3);
        assert_eq!(Constraint::new(0, 255).bits_needed(), 8);
        assert_eq!(Constraint::new(0, 4294967295).octets_needed(), 4);
        assert_eq!(Constraint::new(0, 4000000000000).octets_needed(), 6);
    }

    #[test]
    fn semi_constrained_has_no_range() {
        assert_eq!(Constraint::semi(0).range(), None);
        assert!(Constraint::semi(5).contains(i64::MAX));
        assert!(!Constraint::semi(5).contains(4));
    }

    #[test]
    fn size_helpers() {
        assert!(Size::fixed(3).is_fixed());
        assert_eq!(Size::range(0, 65535).constrained_max(), Some(65535));
        assert_eq!(Size::range(1, 65536).constrained_max(), None);
        assert!(Size::range(22, 32).ext().extensible);
    }
}
