//! xnap-dissect: dissecting XnAP (3GPP TS 38.423) from captured packets.
//!
//! A basic unit is a [`Packet`], a struct representing a packet captured (and dissected) from
//! the wire. A packet is a collection of [`Layer`]s, each a struct implementing the `Layer`
//! trait: Ethernet or Linux cooked capture, IPv4 or IPv6, SCTP and finally
//! [XnAP][`layers::xnap`].
//!
//! XnAP PDUs are ASN.1 encoded with the Aligned Packed Encoding Rules. The [`per`] module is a
//! generic APER engine driven by static type descriptors; the XnAP layer supplies the
//! descriptors and the tables that map procedure codes and IE ids to types.
//!
//! ```rust
//! let _ = xnap_dissect::register_defaults();
//!
//! let frame = hex::decode(concat!(
//!     "0200000000020200000000010800",
//!     "4500003c000100004084000ac0a80001c0a80002",
//!     "961696160000000100000000",
//!     "0003001c00000001000000000000003d",
//!     "001540080000010007400128"
//! ))
//! .unwrap();
//!
//! let packet = xnap_dissect::Packet::from_bytes(&frame, xnap_dissect::ENCAP_TYPE_ETH).unwrap();
//! let json = serde_json::to_value(&packet).unwrap();
//! assert_eq!(
//!     json["layers"]["sctp"]["chunks"][0]["data"]["payload"]["xnap"]["procedure"],
//!     "id-errorIndication"
//! );
//! ```

pub mod errors;
pub use errors::Error;

pub mod layer;
pub use layer::{Layer, PacketInfo};

pub mod packet;
pub use packet::Packet;

pub mod types;
pub use types::{ENCAP_TYPE_ETH, ENCAP_TYPE_LINUX_SLL};

pub mod per;

pub mod layers;
pub use layers::register_defaults;
