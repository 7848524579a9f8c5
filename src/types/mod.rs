//! All types that we are supporting

use crate::Layer;

mod macaddr;
pub use macaddr::*;

mod ipaddr;
pub use ipaddr::*;

pub mod hex;

/// Creator function type
pub type LayerCreatorFn = fn() -> Box<dyn Layer + Send>;

/// Packet Encapsulation Type
///
/// This value is same as those supported by [libpcap][libpcap]
///
/// [libpcap]: https://www.tcpdump.org/
pub type EncapType = i32;

pub const ENCAP_TYPE_ETH: EncapType = 1;
pub const ENCAP_TYPE_LINUX_SLL: EncapType = 113;

pub type EtherType = u16;

pub const ETHERTYPE_IP: EtherType = 0x0800;
pub const ETHERTYPE_IP6: EtherType = 0x86dd;
