//! Per-association state
//!
//! An Xn-C association is identified by the unordered pair of its (address, SCTP port)
//! endpoints. The node type each endpoint announces in Xn Setup is remembered, so that
//! later messages can interpret node type dependent containers.
//!
//! At most [`MAX_CONVERSATIONS`] associations are tracked. Once full, new associations are not
//! remembered until [`reset_conversations`] is called; the ones already known keep working.

use core::fmt;
use std::collections::HashMap;
use std::sync::RwLock;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::layer::PacketInfo;
use crate::types::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NgRanNodeType {
    #[serde(rename = "gNB")]
    Gnb,
    #[serde(rename = "ng-eNB")]
    NgEnb,
}

impl NgRanNodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NgRanNodeType::Gnb => "gNB",
            NgRanNodeType::NgEnb => "ng-eNB",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "gNB" => Some(NgRanNodeType::Gnb),
            "ng-eNB" => Some(NgRanNodeType::NgEnb),
            _ => None,
        }
    }
}

impl fmt::Display for NgRanNodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Endpoint {
    pub addr: Address,
    pub port: u16,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.addr, self.port)
    }
}

/// What is known about one association.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub node_types: HashMap<Endpoint, NgRanNodeType>,
}

type ConversationKey = (Endpoint, Endpoint);

pub const MAX_CONVERSATIONS: usize = 65536;

lazy_static! {
    static ref CONVERSATIONS: RwLock<HashMap<ConversationKey, Conversation>> =
        RwLock::new(HashMap::new());
}

fn endpoints(info: &PacketInfo) -> Option<(Endpoint, Endpoint)> {
    if info.src.is_none() || info.dst.is_none() {
        return None;
    }
    let src = Endpoint {
        addr: info.src,
        port: info.src_port,
    };
    let dst = Endpoint {
        addr: info.dst,
        port: info.dst_port,
    };
    Some((src, dst))
}

fn key(a: Endpoint, b: Endpoint) -> ConversationKey {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Remember the node type of the sender of the current packet.
pub fn record_sender_node_type(info: &PacketInfo, node_type: NgRanNodeType) {
    if let Some((src, dst)) = endpoints(info) {
        #[cfg(feature = "logging")]
        log::debug!("XnAP: {} is a {}", src, node_type);

        let mut map = CONVERSATIONS.write().unwrap();
        if !record(&mut map, MAX_CONVERSATIONS, (src, dst), node_type) {
            #[cfg(feature = "logging")]
            log::warn!(
                "XnAP: {} associations tracked, {} <-> {} is not",
                MAX_CONVERSATIONS,
                src,
                dst
            );
        }
    }
}

// Returns false when `limit` conversations exist and (src, dst) is not one of them.
fn record(
    map: &mut HashMap<ConversationKey, Conversation>,
    limit: usize,
    (src, dst): (Endpoint, Endpoint),
    node_type: NgRanNodeType,
) -> bool {
    let key = key(src, dst);
    if map.len() >= limit && !map.contains_key(&key) {
        return false;
    }
    map.entry(key).or_default().node_types.insert(src, node_type);
    true
}

/// Node type of the sender of the current packet, if it was announced earlier.
pub fn sender_node_type(info: &PacketInfo) -> Option<NgRanNodeType> {
    let (src, dst) = endpoints(info)?;
    let map = CONVERSATIONS.read().ok()?;
    map.get(&key(src, dst))?.node_types.get(&src).copied()
}

/// Node type of the receiver of the current packet, if it was announced earlier.
pub fn peer_node_type(info: &PacketInfo) -> Option<NgRanNodeType> {
    let (src, dst) = endpoints(info)?;
    let map = CONVERSATIONS.read().ok()?;
    map.get(&key(src, dst))?.node_types.get(&dst).copied()
}

/// Snapshot of the association the current packet belongs to.
pub fn conversation(info: &PacketInfo) -> Option<Conversation> {
    let (src, dst) = endpoints(info)?;
    let map = CONVERSATIONS.read().ok()?;
    map.get(&key(src, dst)).cloned()
}

/// Forget all associations, e.g. before reading the next capture file.
pub fn reset_conversations() {
    CONVERSATIONS.write().unwrap().clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IPv4Address;

    fn info(src: [u8; 4], src_port: u16, dst: [u8; 4], dst_port: u16) -> PacketInfo {
        PacketInfo {
            src: Address::IPv4(IPv4Address::from(src)),
            dst: Address::IPv4(IPv4Address::from(dst)),
            src_port,
            dst_port,
            ..Default::default()
        }
    }

    #[test]
    fn both_directions_share_a_conversation() {
        let request = info([10, 1, 0, 1], 38422, [10, 1, 0, 2], 38422);
        let response = info([10, 1, 0, 2], 38422, [10, 1, 0, 1], 38422);

        record_sender_node_type(&request, NgRanNodeType::Gnb);
        record_sender_node_type(&response, NgRanNodeType::NgEnb);

        assert_eq!(sender_node_type(&request), Some(NgRanNodeType::Gnb));
        assert_eq!(peer_node_type(&request), Some(NgRanNodeType::NgEnb));
        assert_eq!(sender_node_type(&response), Some(NgRanNodeType::NgEnb));
        assert_eq!(peer_node_type(&response), Some(NgRanNodeType::Gnb));

        let conv = conversation(&request).unwrap();
        assert_eq!(conv.node_types.len(), 2);
        assert_eq!(conversation(&response), Some(conv));
    }

    #[test]
    fn ports_separate_conversations() {
        let first = info([10, 2, 0, 1], 38422, [10, 2, 0, 2], 38422);
        let other = info([10, 2, 0, 1], 40000, [10, 2, 0, 2], 38422);

        record_sender_node_type(&first, NgRanNodeType::Gnb);
        assert_eq!(sender_node_type(&other), None);
    }

    #[test]
    fn no_addresses_no_state() {
        let none = PacketInfo::default();
        record_sender_node_type(&none, NgRanNodeType::Gnb);
        assert_eq!(sender_node_type(&none), None);
        assert!(conversation(&none).is_none());
    }

    #[test]
    fn full_table_keeps_known_associations() {
        let request = endpoints(&info([10, 3, 0, 1], 38422, [10, 3, 0, 2], 38422)).unwrap();
        let response = endpoints(&info([10, 3, 0, 2], 38422, [10, 3, 0, 1], 38422)).unwrap();
        let other = endpoints(&info([10, 3, 0, 3], 38422, [10, 3, 0, 4], 38422)).unwrap();

        let mut map = HashMap::new();
        assert!(record(&mut map, 1, request, NgRanNodeType::Gnb));
        assert!(record(&mut map, 1, response, NgRanNodeType::NgEnb));
        assert!(!record(&mut map, 1, other, NgRanNodeType::Gnb));

        assert_eq!(map.len(), 1);
        let conv = &map[&key(request.0, request.1)];
        assert_eq!(conv.node_types.get(&request.0), Some(&NgRanNodeType::Gnb));
        assert_eq!(conv.node_types.get(&response.0), Some(&NgRanNodeType::NgEnb));
    }

    #[test]
    fn node_type_names() {
        assert_eq!(NgRanNodeType::from_name("gNB"), Some(NgRanNodeType::Gnb));
        assert_eq!(
            NgRanNodeType::from_name(NgRanNodeType::NgEnb.as_str()),
            Some(NgRanNodeType::NgEnb)
        );
        assert_eq!(NgRanNodeType::from_name("eNB"), None);
        assert_eq!(format!("{}", NgRanNodeType::NgEnb), "ng-eNB");
    }
}
