//! ASN.1 type descriptors
//!
//! Types of an ASN.1 module are described by `'static` [`TypeDef`]s referring to each other.
//! The generic walker in [`crate::per::walk`] decodes and encodes any of them, so supporting
//! a new type is a matter of adding a descriptor.

use crate::errors::Error;
use crate::per::constraints::{Constraint, Size};
use crate::per::value::Value;
use crate::per::walk::DecodeContext;

/// Post-decode hook, may annotate or replace the decoded value.
pub type Hook = fn(&mut DecodeContext, Value) -> Result<Value, Error>;

/// Resolves the type carried by an open type from the value of its key field.
pub type OpenTypeLookup = fn(i64) -> Option<&'static TypeDef>;

/// A named ASN.1 type.
pub struct TypeDef {
    pub name: &'static str,
    pub kind: Kind,
    pub hook: Option<Hook>,
}

impl TypeDef {
    pub const fn new(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            hook: None,
        }
    }

    pub const fn with_hook(name: &'static str, kind: Kind, hook: Hook) -> Self {
        Self {
            name,
            kind,
            hook: Some(hook),
        }
    }
}

// Only the name, descriptors refer to each other.
impl std::fmt::Debug for TypeDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypeDef({})", self.name)
    }
}

#[derive(Debug)]
pub enum Kind {
    Null,
    Boolean,
    Integer(IntegerSpec),
    Enumerated(&'static EnumeratedSpec),
    BitString(Size),
    OctetString(Size),
    PrintableString(Size),
    /// The SIZE constraint of a UTF8String is not PER visible and only checked when encoding.
    Utf8String(Size),
    Sequence(&'static SequenceSpec),
    SequenceOf(&'static SequenceOfSpec),
    Choice(&'static ChoiceSpec),
    OpenType(OpenTypeSpec),
}

#[derive(Debug)]
pub struct IntegerSpec {
    pub constraint: Constraint,
    /// Display names of well-known values, e.g. procedure codes.
    pub names: Option<fn(i64) -> Option<&'static str>>,
}

#[derive(Debug)]
pub struct EnumeratedSpec {
    pub root: &'static [&'static str],
    pub extensible: bool,
    pub extensions: &'static [&'static str],
}

#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub ty: &'static TypeDef,
    pub optional: bool,
}

impl Field {
    pub const fn mandatory(name: &'static str, ty: &'static TypeDef) -> Self {
        Self {
            name,
            ty,
            optional: false,
        }
    }

    pub const fn optional(name: &'static str, ty: &'static TypeDef) -> Self {
        Self {
            name,
            ty,
            optional: true,
        }
    }
}

/// `SEQUENCE { root fields, ..., extension additions }`
///
/// Every extension addition is encoded as an open type, so additions are decoded when their
/// type is known and kept as raw octets otherwise.
#[derive(Debug)]
pub struct SequenceSpec {
    pub fields: &'static [Field],
    pub extensible: bool,
    pub extensions: &'static [Field],
}

impl SequenceSpec {
    pub fn optional_count(&self) -> usize {
        self.fields.iter().filter(|f| f.optional).count()
    }
}

#[derive(Debug)]
pub struct SequenceOfSpec {
    pub item: &'static TypeDef,
    pub size: Size,
}

#[derive(Debug)]
pub struct Alternative {
    pub name: &'static str,
    pub ty: &'static TypeDef,
}

impl Alternative {
    pub const fn new(name: &'static str, ty: &'static TypeDef) -> Self {
        Self { name, ty }
    }
}

#[derive(Debug)]
pub struct ChoiceSpec {
    pub alternatives: &'static [Alternative],
    pub extensible: bool,
    pub extensions: &'static [Alternative],
}

/// Open type whose actual type is selected by an earlier sibling field.
#[derive(Debug)]
pub struct OpenTypeSpec {
    /// Name of the sibling field in the enclosing SEQUENCE holding the selector.
    pub key: &'static str,
    pub lookup: OpenTypeLookup,
}

/// Shared descriptors of common ASN.1 building blocks.
pub static NULL: TypeDef = TypeDef::new("NULL", Kind::Null);
pub static BOOLEAN: TypeDef = TypeDef::new("BOOLEAN", Kind::Boolean);

#[cfg(test)]
mod tests {
    use super::*;

    static FIELDS: [Field; 3] = [
        Field::mandatory("a", &BOOLEAN),
        Field::optional("b", &NULL),
        Field::optional("c", &NULL),
    ];
    static SEQ: SequenceSpec = SequenceSpec {
        fields: &FIELDS,
        extensible: true,
        extensions: &[],
    };

    #[test]
    fn optional_count() {
        assert_eq!(SEQ.optional_count(), 2);
    }
}
