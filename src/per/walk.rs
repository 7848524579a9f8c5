//! Descriptor walker
//!
//! Decodes and encodes any [`TypeDef`] by dispatching on its [`Kind`] to the APER
//! primitives.

use std::collections::HashMap;

use crate::errors::Error;
use crate::per::decoder::{AperDecoder, PerResult};
use crate::per::encoder::AperEncoder;
use crate::per::types::{ChoiceSpec, Kind, OpenTypeSpec, SequenceOfSpec, SequenceSpec, TypeDef};
use crate::per::value::{ChoiceValue, Member, Value};

/// Maximum nesting of types (open types included) before decoding is aborted.
pub const MAX_DEPTH: usize = 64;

/// Member name of SEQUENCE extension additions not known to the descriptor.
pub const EXTENSION_ADDITION: &str = "extension-addition";

/// State shared by all the types decoded for one PDU.
///
/// Hooks use the property bag to pass information to each other and to the protocol layer,
/// e.g. the node type found in a Global NG-RAN Node ID.
#[derive(Debug, Default)]
pub struct DecodeContext {
    depth: usize,
    props: HashMap<&'static str, String>,
}

impl DecodeContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_prop<V: Into<String>>(&mut self, key: &'static str, value: V) {
        self.props.insert(key, value.into());
    }

    pub fn prop(&self, key: &str) -> Option<&str> {
        self.props.get(key).map(String::as_str)
    }

    pub fn take_prop(&mut self, key: &str) -> Option<String> {
        self.props.remove(key)
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Decode a complete encoding of `def`. Trailing padding is ignored.
pub fn decode(bytes: &[u8], def: &'static TypeDef, ctx: &mut DecodeContext) -> PerResult<Value> {
    let mut decoder = AperDecoder::new(bytes);
    decode_from(&mut decoder, def, ctx)
}

/// Decode `def` at the current position of `decoder`.
pub fn decode_from(
    decoder: &mut AperDecoder,
    def: &'static TypeDef,
    ctx: &mut DecodeContext,
) -> PerResult<Value> {
    decode_type(decoder, def, ctx, &[])
}

fn decode_type(
    dec: &mut AperDecoder,
    def: &'static TypeDef,
    ctx: &mut DecodeContext,
    siblings: &[Member],
) -> PerResult<Value> {
    if ctx.depth >= MAX_DEPTH {
        return Err(Error::ParseError(format!(
            "{}: nesting deeper than {}",
            def.name, MAX_DEPTH
        )));
    }
    ctx.depth += 1;
    let result = decode_kind(dec, def, ctx, siblings);
    ctx.depth -= 1;

    let value = result?;
    match def.hook {
        Some(hook) => hook(ctx, value),
        None => Ok(value),
    }
}

fn decode_kind(
    dec: &mut AperDecoder,
    def: &'static TypeDef,
    ctx: &mut DecodeContext,
    siblings: &[Member],
) -> PerResult<Value> {
    match &def.kind {
        Kind::Null => Ok(Value::Null),
        Kind::Boolean => Ok(Value::Boolean(dec.read_bit()?)),
        Kind::Integer(spec) => {
            let value = dec.decode_integer(&spec.constraint)?;
            match spec.names.and_then(|names| names(value)) {
                Some(name) => Ok(Value::Named { value, name }),
                None => Ok(Value::Integer(value)),
            }
        }
        Kind::Enumerated(spec) => {
            let (index, extension) = dec.decode_enumerated(spec.root.len(), spec.extensible)?;
            let name = if extension {
                spec.extensions.get(index).copied()
            } else {
                Some(*spec.root.get(index).ok_or_else(|| {
                    Error::ParseError(format!("{}: enumeration index {}", def.name, index))
                })?)
            };
            Ok(Value::Enumerated {
                index,
                extension,
                name,
            })
        }
        Kind::BitString(size) => Ok(Value::BitString(dec.decode_bit_string(size)?)),
        Kind::OctetString(size) => Ok(Value::OctetString(dec.decode_octet_string(size)?)),
        Kind::PrintableString(size) => Ok(Value::CharString(dec.decode_printable_string(size)?)),
        Kind::Utf8String(_) => Ok(Value::CharString(dec.decode_utf8_string()?)),
        Kind::Sequence(spec) => decode_sequence(dec, spec, ctx),
        Kind::SequenceOf(spec) => decode_sequence_of(dec, def, spec, ctx),
        Kind::Choice(spec) => decode_choice(dec, def, spec, ctx),
        Kind::OpenType(spec) => decode_open_type(dec, spec, ctx, siblings),
    }
}

fn decode_sequence(
    dec: &mut AperDecoder,
    spec: &'static SequenceSpec,
    ctx: &mut DecodeContext,
) -> PerResult<Value> {
    let (extended, present) = dec.decode_sequence_preamble(spec.extensible, spec.optional_count())?;
    let mut present = present.into_iter();

    let mut members = Vec::with_capacity(spec.fields.len());
    for field in spec.fields {
        if field.optional && !present.next().unwrap_or(false) {
            continue;
        }
        let value = decode_type(dec, field.ty, ctx, &members)?;
        members.push(Member::new(field.name, value));
    }

    if extended {
        let bitmap = dec.decode_extension_bitmap()?;
        for (index, _) in bitmap.iter().enumerate().filter(|(_, p)| **p) {
            let data = dec.decode_open_type()?;
            match spec.extensions.get(index) {
                Some(field) => {
                    let value = decode_contents(&data, field.ty, ctx)?;
                    members.push(Member::new(field.name, value));
                }
                None => {
                    #[cfg(feature = "logging")]
                    log::debug!("unknown extension addition {} kept raw", index);

                    members.push(Member::new(
                        EXTENSION_ADDITION,
                        Value::Extension { index, data },
                    ));
                }
            }
        }
    }

    Ok(Value::Sequence(members))
}

fn decode_sequence_of(
    dec: &mut AperDecoder,
    def: &'static TypeDef,
    spec: &'static SequenceOfSpec,
    ctx: &mut DecodeContext,
) -> PerResult<Value> {
    let mut items = Vec::new();
    match dec.decode_size(&spec.size)? {
        Some(count) => {
            for _ in 0..count {
                items.push(decode_type(dec, spec.item, ctx, &[])?);
            }
        }
        None => loop {
            let (count, more) = dec.decode_length_chunk()?;
            for _ in 0..count {
                items.push(decode_type(dec, spec.item, ctx, &[])?);
            }
            if !more {
                break;
            }
        },
    }

    if !spec.size.extensible && !spec.size.contains(items.len()) {
        return Err(Error::ParseError(format!(
            "{}: {} items",
            def.name,
            items.len()
        )));
    }
    Ok(Value::SequenceOf(items))
}

fn decode_choice(
    dec: &mut AperDecoder,
    def: &'static TypeDef,
    spec: &'static ChoiceSpec,
    ctx: &mut DecodeContext,
) -> PerResult<Value> {
    let (index, extension) = dec.decode_choice_index(spec.alternatives.len(), spec.extensible)?;

    if !extension {
        let alt = spec.alternatives.get(index).ok_or_else(|| {
            Error::ParseError(format!("{}: choice index {}", def.name, index))
        })?;
        let value = decode_type(dec, alt.ty, ctx, &[])?;
        return Ok(Value::choice(index, alt.name, value));
    }

    let data = dec.decode_open_type()?;
    match spec.extensions.get(index) {
        Some(alt) => {
            let value = decode_contents(&data, alt.ty, ctx)?;
            Ok(Value::Choice(Box::new(ChoiceValue {
                index,
                extension: true,
                name: alt.name,
                value,
            })))
        }
        None => {
            #[cfg(feature = "logging")]
            log::debug!("{}: unknown choice extension {} kept raw", def.name, index);

            Ok(Value::Extension { index, data })
        }
    }
}

fn decode_open_type(
    dec: &mut AperDecoder,
    spec: &OpenTypeSpec,
    ctx: &mut DecodeContext,
    siblings: &[Member],
) -> PerResult<Value> {
    let data = dec.decode_open_type()?;

    let key = siblings
        .iter()
        .find(|m| m.name == spec.key)
        .and_then(|m| m.value.as_integer());

    match key.and_then(spec.lookup) {
        Some(ty) => decode_contents(&data, ty, ctx),
        None => {
            #[cfg(feature = "logging")]
            log::debug!("open type keyed by {} {:?} kept raw", spec.key, key);

            Ok(Value::Open(data))
        }
    }
}

// Contents of an open type are a complete encoding of their own.
fn decode_contents(data: &[u8], ty: &'static TypeDef, ctx: &mut DecodeContext) -> PerResult<Value> {
    let mut inner = AperDecoder::new(data);
    decode_type(&mut inner, ty, ctx, &[])
}

/// Encode `value` as a complete encoding of `def`.
pub fn encode(def: &'static TypeDef, value: &Value) -> PerResult<Vec<u8>> {
    let mut encoder = AperEncoder::new();
    encode_into(&mut encoder, def, value)?;
    if encoder.bit_len() == 0 {
        // X.691 11.1: a complete encoding is at least one octet.
        return Ok(vec![0x00]);
    }
    Ok(encoder.into_bytes())
}

/// Encode `value` as `def` at the current position of `encoder`.
pub fn encode_into(encoder: &mut AperEncoder, def: &'static TypeDef, value: &Value) -> PerResult<()> {
    encode_type(encoder, def, value, &[])
}

fn mismatch(def: &TypeDef, value: &Value) -> Error {
    Error::EncodeError(format!("{}: cannot encode {:?}", def.name, value))
}

fn encode_type(
    enc: &mut AperEncoder,
    def: &'static TypeDef,
    value: &Value,
    siblings: &[Member],
) -> PerResult<()> {
    let value = value.inner();
    match (&def.kind, value) {
        (Kind::Null, Value::Null) => Ok(()),
        (Kind::Boolean, Value::Boolean(b)) => {
            enc.write_bit(*b);
            Ok(())
        }
        (Kind::Integer(spec), _) => {
            let v = value.as_integer().ok_or_else(|| mismatch(def, value))?;
            enc.encode_integer(v, &spec.constraint)
        }
        (
            Kind::Enumerated(spec),
            Value::Enumerated {
                index, extension, ..
            },
        ) => enc.encode_enumerated(*index, *extension, spec.root.len(), spec.extensible),
        (Kind::BitString(size), Value::BitString(bits)) => enc.encode_bit_string(bits, size),
        (Kind::OctetString(size), Value::OctetString(octets)) => {
            enc.encode_octet_string(octets, size)
        }
        (Kind::PrintableString(size), Value::CharString(s)) => enc.encode_printable_string(s, size),
        (Kind::Utf8String(size), Value::CharString(s)) => {
            let chars = s.chars().count();
            if !size.extensible && !size.contains(chars) {
                return Err(Error::ConstraintViolation {
                    value: chars as i64,
                    min: size.min as i64,
                    max: size.max.map_or(i64::MAX, |m| m as i64),
                });
            }
            enc.encode_utf8_string(s)
        }
        (Kind::Sequence(spec), Value::Sequence(members)) => encode_sequence(enc, def, spec, members),
        (Kind::SequenceOf(spec), Value::SequenceOf(items)) => {
            if enc.encode_size(items.len(), &spec.size)? {
                for item in items {
                    encode_type(enc, spec.item, item, &[])?;
                }
                Ok(())
            } else {
                enc.encode_with_length(items.len(), |enc, start, end| {
                    for item in &items[start..end] {
                        encode_type(enc, spec.item, item, &[])?;
                    }
                    Ok(())
                })
            }
        }
        (Kind::Choice(spec), Value::Choice(choice)) => encode_choice(enc, def, spec, choice),
        (Kind::Choice(spec), Value::Extension { index, data }) => {
            enc.encode_choice_index(*index, true, spec.alternatives.len(), spec.extensible)?;
            enc.encode_open_type(data)
        }
        (Kind::OpenType(_), Value::Open(data)) => enc.encode_open_type(data),
        (Kind::OpenType(spec), _) => {
            let key = siblings
                .iter()
                .find(|m| m.name == spec.key)
                .and_then(|m| m.value.as_integer());
            let ty = key.and_then(spec.lookup).ok_or_else(|| {
                Error::EncodeError(format!("{}: no type for key {:?}", def.name, key))
            })?;
            enc.encode_open_type(&encode(ty, value)?)
        }
        _ => Err(mismatch(def, value)),
    }
}

fn encode_sequence(
    enc: &mut AperEncoder,
    def: &'static TypeDef,
    spec: &'static SequenceSpec,
    members: &[Member],
) -> PerResult<()> {
    let find = |name: &str| members.iter().find(|m| m.name == name);

    for member in members {
        let known = member.name == EXTENSION_ADDITION
            || spec.fields.iter().any(|f| f.name == member.name)
            || spec.extensions.iter().any(|f| f.name == member.name);
        if !known {
            return Err(Error::EncodeError(format!(
                "{}: unknown member {}",
                def.name, member.name
            )));
        }
    }

    // Extension additions present, by index.
    let mut additions: Vec<(usize, Vec<u8>)> = Vec::new();
    for (index, field) in spec.extensions.iter().enumerate() {
        if let Some(m) = find(field.name) {
            additions.push((index, encode(field.ty, &m.value)?));
        }
    }
    for m in members.iter().filter(|m| m.name == EXTENSION_ADDITION) {
        match m.value.inner() {
            Value::Extension { index, data } => additions.push((*index, data.clone())),
            other => return Err(mismatch(def, other)),
        }
    }
    additions.sort_by_key(|(index, _)| *index);

    if !spec.extensible && !additions.is_empty() {
        return Err(Error::EncodeError(format!(
            "{}: extension additions in a non-extensible SEQUENCE",
            def.name
        )));
    }

    let mut present = Vec::new();
    for field in spec.fields {
        let member = find(field.name);
        if field.optional {
            present.push(member.is_some());
        } else if member.is_none() {
            return Err(Error::EncodeError(format!(
                "{}: missing mandatory {}",
                def.name, field.name
            )));
        }
    }
    let extended = if spec.extensible {
        Some(!additions.is_empty())
    } else {
        None
    };
    enc.encode_sequence_preamble(extended, &present);

    for field in spec.fields {
        if let Some(m) = find(field.name) {
            encode_type(enc, field.ty, &m.value, members)?;
        }
    }

    if let Some(last) = additions.last().map(|(index, _)| *index) {
        let mut bitmap = vec![false; last + 1];
        for (index, _) in &additions {
            bitmap[*index] = true;
        }
        enc.encode_extension_bitmap(&bitmap)?;
        for (_, data) in &additions {
            enc.encode_open_type(data)?;
        }
    }
    Ok(())
}

fn encode_choice(
    enc: &mut AperEncoder,
    def: &'static TypeDef,
    spec: &'static ChoiceSpec,
    choice: &ChoiceValue,
) -> PerResult<()> {
    let alternatives = if choice.extension {
        spec.extensions
    } else {
        spec.alternatives
    };
    let alt = alternatives.get(choice.index).ok_or_else(|| {
        Error::EncodeError(format!("{}: choice index {}", def.name, choice.index))
    })?;

    enc.encode_choice_index(
        choice.index,
        choice.extension,
        spec.alternatives.len(),
        spec.extensible,
    )?;
    if choice.extension {
        enc.encode_open_type(&encode(alt.ty, &choice.value)?)
    } else {
        encode_type(enc, alt.ty, &choice.value, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::per::constraints::{Constraint, Size};
    use crate::per::types::{
        Alternative, EnumeratedSpec, Field, IntegerSpec, OpenTypeSpec, BOOLEAN, NULL,
    };

    static SMALL: TypeDef = TypeDef::new(
        "Small",
        Kind::Integer(IntegerSpec {
            constraint: Constraint::new(0, 7),
            names: None,
        }),
    );
    static KEY: TypeDef = TypeDef::new(
        "Key",
        Kind::Integer(IntegerSpec {
            constraint: Constraint::new(0, 255),
            names: None,
        }),
    );
    static COLOUR: EnumeratedSpec = EnumeratedSpec {
        root: &["red", "green"],
        extensible: true,
        extensions: &["blue"],
    };
    static COLOUR_T: TypeDef = TypeDef::new("Colour", Kind::Enumerated(&COLOUR));
    static ID: TypeDef = TypeDef::new("Id", Kind::OctetString(Size::fixed(3)));

    fn open_lookup(key: i64) -> Option<&'static TypeDef> {
        match key {
            1 => Some(&SMALL),
            2 => Some(&COLOUR_T),
            _ => None,
        }
    }

    static OPEN: TypeDef = TypeDef::new(
        "Value",
        Kind::OpenType(OpenTypeSpec {
            key: "key",
            lookup: open_lookup,
        }),
    );

    static PAIR_FIELDS: [Field; 3] = [
        Field::mandatory("key", &KEY),
        Field::optional("flag", &BOOLEAN),
        Field::mandatory("value", &OPEN),
    ];
    static PAIR_SPEC: SequenceSpec = SequenceSpec {
        fields: &PAIR_FIELDS,
        extensible: true,
        extensions: &[],
    };
    static PAIR: TypeDef = TypeDef::new("Pair", Kind::Sequence(&PAIR_SPEC));

    static PAIRS_SPEC: SequenceOfSpec = SequenceOfSpec {
        item: &PAIR,
        size: Size::range(0, 65535),
    };
    static PAIRS: TypeDef = TypeDef::new("Pairs", Kind::SequenceOf(&PAIRS_SPEC));

    static CHOICE_ALTS: [Alternative; 2] = [Alternative::new("id", &ID), Alternative::new("none", &NULL)];
    static CHOICE_EXTS: [Alternative; 1] = [Alternative::new("small", &SMALL)];
    static CHOICE_SPEC: ChoiceSpec = ChoiceSpec {
        alternatives: &CHOICE_ALTS,
        extensible: true,
        extensions: &CHOICE_EXTS,
    };
    static CHOICE: TypeDef = TypeDef::new("Choice", Kind::Choice(&CHOICE_SPEC));

    fn recursive_lookup(_key: i64) -> Option<&'static TypeDef> {
        Some(&NESTED)
    }
    static NESTED_OPEN: TypeDef = TypeDef::new(
        "NestedOpen",
        Kind::OpenType(OpenTypeSpec {
            key: "key",
            lookup: recursive_lookup,
        }),
    );
    static NESTED_FIELDS: [Field; 2] = [
        Field::mandatory("key", &KEY),
        Field::mandatory("value", &NESTED_OPEN),
    ];
    static NESTED_SPEC: SequenceSpec = SequenceSpec {
        fields: &NESTED_FIELDS,
        extensible: false,
        extensions: &[],
    };
    static NESTED: TypeDef = TypeDef::new("Nested", Kind::Sequence(&NESTED_SPEC));

    fn pair(key: i64, value: Value) -> Value {
        Value::Sequence(vec![Member::new("key", Value::Integer(key)), Member::new("value", value)])
    }

    #[test]
    fn open_type_dispatch_by_sibling() {
        let items = Value::SequenceOf(vec![
            pair(1, Value::Integer(5)),
            pair(2, Value::enumerated(1)),
            pair(9, Value::Open(vec![0xde, 0xad])),
        ]);
        let bytes = encode(&PAIRS, &items).unwrap();

        let mut ctx = DecodeContext::new();
        let decoded = decode(&bytes, &PAIRS, &mut ctx).unwrap();
        let decoded = decoded.items();
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[0].get("value"), Some(&Value::Integer(5)));
        assert_eq!(
            decoded[1].get("value"),
            Some(&Value::Enumerated {
                index: 1,
                extension: false,
                name: Some("green")
            })
        );
        assert_eq!(decoded[2].get("value"), Some(&Value::Open(vec![0xde, 0xad])));
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn pair_wire_format() {
        // ext 0, flag absent, key 1 aligned, open type of one octet (5 << 5)
        let bytes = encode(&PAIR, &pair(1, Value::Integer(5))).unwrap();
        assert_eq!(bytes, vec![0x00, 0x01, 0x01, 0xa0]);
    }

    #[test]
    fn unknown_extension_addition_is_kept() {
        let value = Value::Sequence(vec![
            Member::new("key", Value::Integer(1)),
            Member::new("value", Value::Integer(3)),
            Member::new(
                EXTENSION_ADDITION,
                Value::Extension {
                    index: 2,
                    data: vec![0x42],
                },
            ),
        ]);
        let bytes = encode(&PAIR, &value).unwrap();
        let decoded = decode(&bytes, &PAIR, &mut DecodeContext::new()).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn choice_root_and_extension() {
        let root = Value::choice(0, "id", Value::OctetString(vec![1, 2, 3]));
        let bytes = encode(&CHOICE, &root).unwrap();
        assert_eq!(bytes, vec![0x00, 0x01, 0x02, 0x03]);
        assert_eq!(decode(&bytes, &CHOICE, &mut DecodeContext::new()), Ok(root));

        let ext = Value::Choice(Box::new(ChoiceValue {
            index: 0,
            extension: true,
            name: "small",
            value: Value::Integer(7),
        }));
        let bytes = encode(&CHOICE, &ext).unwrap();
        assert_eq!(decode(&bytes, &CHOICE, &mut DecodeContext::new()), Ok(ext));

        // unknown extension alternative 3
        let unknown = Value::Extension {
            index: 3,
            data: vec![0x11, 0x22],
        };
        let bytes = encode(&CHOICE, &unknown).unwrap();
        assert_eq!(bytes, vec![0x83, 0x02, 0x11, 0x22]);
        assert_eq!(decode(&bytes, &CHOICE, &mut DecodeContext::new()), Ok(unknown));
    }

    #[test]
    fn enumerated_extension_value() {
        let bytes = encode(
            &COLOUR_T,
            &Value::Enumerated {
                index: 0,
                extension: true,
                name: None,
            },
        )
        .unwrap();
        let decoded = decode(&bytes, &COLOUR_T, &mut DecodeContext::new()).unwrap();
        assert_eq!(
            decoded,
            Value::Enumerated {
                index: 0,
                extension: true,
                name: Some("blue")
            }
        );
    }

    #[test]
    fn missing_mandatory_field() {
        let value = Value::Sequence(vec![Member::new("key", Value::Integer(1))]);
        assert!(matches!(encode(&PAIR, &value), Err(Error::EncodeError(_))));
    }

    #[test]
    fn truncated_choice_is_an_error() {
        // ext 0, index 1: NULL
        assert!(decode(&[0x40], &CHOICE, &mut DecodeContext::new()).is_ok());
        // truncated OCTET STRING
        assert!(matches!(
            decode(&[0x00, 0x01], &CHOICE, &mut DecodeContext::new()),
            Err(Error::BufferUnderflow { .. })
        ));
    }

    #[test]
    fn nesting_is_bounded() {
        // key 0, then an open type holding itself, nested until the depth guard trips
        let mut bytes = vec![0x00, 0x00];
        for _ in 0..40 {
            let mut outer = vec![0x00, bytes.len() as u8];
            outer.extend(bytes);
            bytes = outer;
        }
        let result = decode(&bytes, &NESTED, &mut DecodeContext::new());
        assert!(matches!(result, Err(Error::ParseError(_))), "{:?}", result);
    }

    #[test]
    fn props() {
        let mut ctx = DecodeContext::new();
        ctx.set_prop("ng-ran-node", "gNB");
        assert_eq!(ctx.prop("ng-ran-node"), Some("gNB"));
        assert_eq!(ctx.take_prop("ng-ran-node"), Some("gNB".to_string()));
        assert_eq!(ctx.prop("ng-ran-node"), None);
    }
}
