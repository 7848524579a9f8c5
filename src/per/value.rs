//! Decoded values
//!
//! A [`Value`] is the generic result of walking a [`TypeDef`][`crate::per::types::TypeDef`]
//! and also the input to the encoder.

use bitvec::prelude::*;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::types::hex::octets_to_string;

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    /// INTEGER with a well-known name, e.g. a procedure code.
    Named {
        value: i64,
        name: &'static str,
    },
    Enumerated {
        index: usize,
        extension: bool,
        name: Option<&'static str>,
    },
    BitString(BitVec<u8, Msb0>),
    OctetString(Vec<u8>),
    CharString(String),
    Sequence(Vec<Member>),
    SequenceOf(Vec<Value>),
    Choice(Box<ChoiceValue>),
    /// Contents of an open type whose type is not known.
    Open(Vec<u8>),
    /// Extension addition (SEQUENCE) or alternative (CHOICE) not known to the descriptors.
    Extension {
        index: usize,
        data: Vec<u8>,
    },
    /// Value with derived information attached by a hook, e.g. MCC/MNC of a PLMN.
    Annotated {
        value: Box<Value>,
        notes: Vec<(&'static str, Value)>,
    },
    /// Output of a registered container dissector.
    Json(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: &'static str,
    pub value: Value,
}

impl Member {
    pub fn new(name: &'static str, value: Value) -> Self {
        Self { name, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceValue {
    pub index: usize,
    pub extension: bool,
    pub name: &'static str,
    pub value: Value,
}

impl Value {
    /// Root alternative of a CHOICE.
    pub fn choice(index: usize, name: &'static str, value: Value) -> Self {
        Value::Choice(Box::new(ChoiceValue {
            index,
            extension: false,
            name,
            value,
        }))
    }

    pub fn enumerated(index: usize) -> Self {
        Value::Enumerated {
            index,
            extension: false,
            name: None,
        }
    }

    /// The value with all annotations removed.
    pub fn inner(&self) -> &Value {
        match self {
            Value::Annotated { value, .. } => value.inner(),
            other => other,
        }
    }

    /// Member `name` of a SEQUENCE value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self.inner() {
            Value::Sequence(members) => members
                .iter()
                .find(|m| m.name == name)
                .map(|m| &m.value),
            _ => None,
        }
    }

    /// A note attached by a hook.
    pub fn note(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Annotated { value, notes } => notes
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v)
                .or_else(|| value.note(name)),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self.inner() {
            Value::Integer(v) => Some(*v),
            Value::Named { value, .. } => Some(*value),
            Value::Enumerated {
                index,
                extension: false,
                ..
            } => Some(*index as i64),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<&ChoiceValue> {
        match self.inner() {
            Value::Choice(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_octets(&self) -> Option<&[u8]> {
        match self.inner() {
            Value::OctetString(o) | Value::Open(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_bits(&self) -> Option<&BitSlice<u8, Msb0>> {
        match self.inner() {
            Value::BitString(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.inner() {
            Value::CharString(s) => Some(s),
            _ => None,
        }
    }

    pub fn items(&self) -> &[Value] {
        match self.inner() {
            Value::SequenceOf(items) => items,
            _ => &[],
        }
    }
}

/// Pack bits MSB first into octets, the last octet padded with zero bits.
pub fn bits_to_octets(bits: &BitSlice<u8, Msb0>) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| chunk.load_be::<u8>() << (8 - chunk.len()))
        .collect()
}

struct Bits<'a>(&'a BitSlice<u8, Msb0>);

impl<'a> Serialize for Bits<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("len", &self.0.len())?;
        map.serialize_entry("bits", &octets_to_string(&bits_to_octets(self.0)))?;
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Named { value, name } => {
                serializer.serialize_str(&format!("{} ({})", name, value))
            }
            Value::Enumerated {
                index,
                extension,
                name,
            } => match (name, extension) {
                (Some(name), _) => serializer.serialize_str(name),
                (None, true) => serializer.serialize_str(&format!("extension ({})", index)),
                (None, false) => serializer.serialize_str(&format!("unknown ({})", index)),
            },
            Value::BitString(bits) => Bits(bits).serialize(serializer),
            Value::OctetString(o) | Value::Open(o) => {
                serializer.serialize_str(&octets_to_string(o))
            }
            Value::CharString(s) => serializer.serialize_str(s),
            Value::Sequence(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for m in members {
                    map.serialize_entry(m.name, &m.value)?;
                }
                map.end()
            }
            Value::SequenceOf(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Choice(c) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(c.name, &c.value)?;
                map.end()
            }
            Value::Extension { index, data } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("extension", index)?;
                map.serialize_entry("data", &octets_to_string(data))?;
                map.end()
            }
            Value::Annotated { value, notes } => {
                let mut map = serializer.serialize_map(Some(notes.len() + 1))?;
                map.serialize_entry("value", value)?;
                for (name, note) in notes {
                    map.serialize_entry(name, note)?;
                }
                map.end()
            }
            Value::Json(json) => json.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plmn() -> Value {
        Value::Annotated {
            value: Box::new(Value::OctetString(vec![0x02, 0xf8, 0x39])),
            notes: vec![
                ("mcc", Value::CharString("208".to_string())),
                ("mnc", Value::CharString("93".to_string())),
            ],
        }
    }

    #[test]
    fn accessors_see_through_annotations() {
        let seq = Value::Sequence(vec![
            Member::new("pLMN-Identity", plmn()),
            Member::new("id", Value::Integer(7)),
        ]);
        assert_eq!(seq.get("id").and_then(Value::as_integer), Some(7));
        let plmn = seq.get("pLMN-Identity").unwrap();
        assert_eq!(plmn.as_octets(), Some(&[0x02, 0xf8, 0x39][..]));
        assert_eq!(plmn.note("mnc").and_then(Value::as_str), Some("93"));
        assert!(seq.get("missing").is_none());
    }

    #[test]
    fn json_rendering() {
        let v = Value::Sequence(vec![
            Member::new(
                "procedureCode",
                Value::Named {
                    value: 21,
                    name: "id-errorIndication",
                },
            ),
            Member::new(
                "criticality",
                Value::Enumerated {
                    index: 1,
                    extension: false,
                    name: Some("ignore"),
                },
            ),
            Member::new("plmn", plmn()),
        ]);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["procedureCode"], "id-errorIndication (21)");
        assert_eq!(json["criticality"], "ignore");
        assert_eq!(json["plmn"]["value"], "0x02f839");
        assert_eq!(json["plmn"]["mcc"], "208");
    }

    #[test]
    fn bit_string_rendering() {
        let bits = bitvec![u8, Msb0; 1, 0, 1, 0, 0, 0, 0, 0, 1];
        let json = serde_json::to_value(Value::BitString(bits)).unwrap();
        assert_eq!(json["len"], 9);
        assert_eq!(json["bits"], "0xa080");
    }
}
