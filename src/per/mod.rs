//! ASN.1 Aligned PER engine
//!
//! [`decoder`] and [`encoder`] implement the X.691 primitives. ASN.1 types are described by
//! the `'static` descriptors in [`types`] and [`walk`] turns an encoding into a [`Value`] tree
//! (and back) for any descriptor.

pub mod constraints;
pub mod decoder;
pub mod encoder;
pub mod types;
pub mod value;
pub mod walk;

pub use constraints::{Constraint, Size};
pub use decoder::{AperDecoder, PerResult};
pub use encoder::AperEncoder;
pub use types::{Kind, TypeDef};
pub use value::{ChoiceValue, Member, Value};
pub use walk::{decode, decode_from, encode, encode_into, DecodeContext};
