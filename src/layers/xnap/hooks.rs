//! Enrichment of decoded IE values
//!
//! Hooks run right after their type is decoded and return the value with derived information
//! attached as notes (see [`Value::Annotated`]).

use std::collections::HashMap;
use std::sync::RwLock;

use lazy_static::lazy_static;

use crate::errors::Error;
use crate::per::value::Value;
use crate::per::walk::DecodeContext;
use crate::types::{IPv4Address, IPv6Address};

use super::conversation::NgRanNodeType;
use super::preferences::{self, LteContainerAs, TargetNgRanContainerAs};

/// Node type found in the `id-GlobalNG-RAN-node-ID` IE of the message being decoded.
pub const NG_RAN_NODE_PROP: &str = "ng-ran-node";

/// Node type the sender of the message announced earlier in the association.
pub const SENDER_NODE_PROP: &str = "sender-node";

pub const NR_RRC_HANDOVER_COMMAND: &str = "nr-rrc.HandoverCommand";
pub const LTE_RRC_HANDOVER_COMMAND: &str = "lte-rrc.HandoverCommand";
pub const LTE_RRC_HANDOVER_COMMAND_NB: &str = "lte-rrc.HandoverCommand.NB";
pub const NR_RRC_CG_CONFIG_INFO: &str = "nr-rrc.CG-ConfigInfo";
pub const NR_RRC_CG_CONFIG: &str = "nr-rrc.CG-Config";

/// Decodes the octets of an RRC container into JSON.
pub type ContainerDissectorFn = fn(&[u8]) -> Result<serde_json::Value, Error>;

lazy_static! {
    static ref CONTAINER_DISSECTORS: RwLock<HashMap<&'static str, ContainerDissectorFn>> =
        RwLock::new(HashMap::new());
}

/// Register a dissector for the RRC container `name` (e.g. `nr-rrc.CG-Config`).
pub fn register_container_dissector(
    name: &'static str,
    dissector: ContainerDissectorFn,
) -> Result<(), Error> {
    lazy_static::initialize(&CONTAINER_DISSECTORS);

    let mut map = CONTAINER_DISSECTORS.write().unwrap();
    if map.contains_key(name) {
        return Err(Error::RegisterError(format!("container dissector: {}", name)));
    }
    map.insert(name, dissector);

    Ok(())
}

fn container_dissector(name: &str) -> Option<ContainerDissectorFn> {
    CONTAINER_DISSECTORS.read().ok()?.get(name).copied()
}

fn tbcd_digit(nibble: u8) -> Option<char> {
    char::from_digit(nibble as u32, 10)
}

/// MCC and MNC of a PLMN-Identity (TS 38.413 TBCD encoding).
pub fn plmn_digits(octets: &[u8]) -> Option<(String, String)> {
    if octets.len() != 3 {
        return None;
    }

    let mcc: String = [octets[0] & 0x0f, octets[0] >> 4, octets[1] & 0x0f]
        .iter()
        .map(|d| tbcd_digit(*d))
        .collect::<Option<String>>()?;

    let mut mnc_digits = vec![octets[2] & 0x0f, octets[2] >> 4];
    let mnc3 = octets[1] >> 4;
    if mnc3 != 0x0f {
        mnc_digits.push(mnc3);
    }
    let mnc: String = mnc_digits
        .iter()
        .map(|d| tbcd_digit(*d))
        .collect::<Option<String>>()?;

    Some((mcc, mnc))
}

pub(crate) fn plmn_identity(_ctx: &mut DecodeContext, value: Value) -> Result<Value, Error> {
    let digits = value.as_octets().and_then(plmn_digits);
    match digits {
        Some((mcc, mnc)) => Ok(Value::Annotated {
            value: Box::new(value),
            notes: vec![
                ("mcc", Value::CharString(mcc)),
                ("mnc", Value::CharString(mnc)),
            ],
        }),
        None => {
            #[cfg(feature = "logging")]
            log::warn!("XnAP: PLMN-Identity with invalid TBCD digits");
            Ok(value)
        }
    }
}

pub(crate) fn transport_layer_address(
    _ctx: &mut DecodeContext,
    value: Value,
) -> Result<Value, Error> {
    let (bit_len, octets) = match value.as_bits() {
        Some(bits) => (bits.len(), crate::per::value::bits_to_octets(bits)),
        None => return Ok(value),
    };

    let mut notes = vec![];
    match bit_len {
        32 => {
            let ipv4: IPv4Address = octets[..].try_into()?;
            notes.push(("ipv4", Value::CharString(ipv4.to_string())));
        }
        128 => {
            let ipv6: IPv6Address = octets[..].try_into()?;
            notes.push(("ipv6", Value::CharString(ipv6.to_string())));
        }
        160 => {
            let ipv4: IPv4Address = octets[..4].try_into()?;
            let ipv6: IPv6Address = octets[4..].try_into()?;
            notes.push(("ipv4", Value::CharString(ipv4.to_string())));
            notes.push(("ipv6", Value::CharString(ipv6.to_string())));
        }
        _ => return Ok(value),
    }

    Ok(Value::Annotated {
        value: Box::new(value),
        notes,
    })
}

/// GlobalNG-RANNode-ID carried in `id-GlobalNG-RAN-node-ID`: this is the sender of the message.
pub(crate) fn sender_global_ng_ran_node_id(
    ctx: &mut DecodeContext,
    value: Value,
) -> Result<Value, Error> {
    let node_type = match value.as_choice() {
        Some(c) if !c.extension && c.index == 0 => Some(NgRanNodeType::Gnb),
        Some(c) if !c.extension && c.index == 1 => Some(NgRanNodeType::NgEnb),
        _ => None,
    };

    match node_type {
        Some(node_type) => {
            ctx.set_prop(NG_RAN_NODE_PROP, node_type.as_str());
            Ok(Value::Annotated {
                value: Box::new(value),
                notes: vec![(
                    "node-type",
                    Value::CharString(node_type.as_str().to_string()),
                )],
            })
        }
        None => Ok(value),
    }
}

fn annotate_container(value: Value, name: &'static str) -> Value {
    let mut notes = vec![("container", Value::CharString(name.to_string()))];

    if let (Some(dissector), Some(octets)) = (container_dissector(name), value.as_octets()) {
        match dissector(octets) {
            Ok(json) => notes.push(("decoded", Value::Json(json))),
            Err(_e) => {
                #[cfg(feature = "logging")]
                log::warn!("XnAP: {} dissector failed: {}", name, _e);
            }
        }
    }

    Value::Annotated {
        value: Box::new(value),
        notes,
    }
}

pub(crate) fn mn_to_sn_container(_ctx: &mut DecodeContext, value: Value) -> Result<Value, Error> {
    Ok(annotate_container(value, NR_RRC_CG_CONFIG_INFO))
}

pub(crate) fn sn_to_mn_container(_ctx: &mut DecodeContext, value: Value) -> Result<Value, Error> {
    Ok(annotate_container(value, NR_RRC_CG_CONFIG))
}

/// RRC message in a Target2SourceNG-RANnodeTranspContainer, for a target of `node_type`.
pub fn handover_command_container(
    node_type: NgRanNodeType,
    lte: LteContainerAs,
) -> &'static str {
    match (node_type, lte) {
        (NgRanNodeType::Gnb, _) => NR_RRC_HANDOVER_COMMAND,
        (NgRanNodeType::NgEnb, LteContainerAs::Legacy) => LTE_RRC_HANDOVER_COMMAND,
        (NgRanNodeType::NgEnb, LteContainerAs::NbIot) => LTE_RRC_HANDOVER_COMMAND_NB,
    }
}

pub(crate) fn target2source_container(
    ctx: &mut DecodeContext,
    value: Value,
) -> Result<Value, Error> {
    let prefs = preferences::preferences();

    let target = match prefs.target_ng_ran_container_as {
        TargetNgRanContainerAs::Gnb => Some(NgRanNodeType::Gnb),
        TargetNgRanContainerAs::NgEnb => Some(NgRanNodeType::NgEnb),
        TargetNgRanContainerAs::Automatic => ctx
            .prop(SENDER_NODE_PROP)
            .and_then(NgRanNodeType::from_name),
    };

    match target {
        Some(node_type) => Ok(annotate_container(
            value,
            handover_command_container(node_type, prefs.lte_container_as),
        )),
        None => {
            #[cfg(feature = "logging")]
            log::debug!("XnAP: target node type unknown, container not interpreted");
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitvec::prelude::*;

    #[test]
    fn plmn_two_and_three_digit_mnc() {
        assert_eq!(
            plmn_digits(&[0x02, 0xf8, 0x39]),
            Some(("208".to_string(), "93".to_string()))
        );
        assert_eq!(
            plmn_digits(&[0x13, 0x00, 0x14]),
            Some(("310".to_string(), "410".to_string()))
        );
        assert_eq!(plmn_digits(&[0x02, 0xf8]), None);
        assert_eq!(plmn_digits(&[0xa2, 0xf8, 0x39]), None);
    }

    #[test]
    fn plmn_identity_notes() {
        let mut ctx = DecodeContext::new();
        let value = plmn_identity(&mut ctx, Value::OctetString(vec![0x02, 0xf8, 0x39])).unwrap();
        assert_eq!(value.note("mcc").and_then(Value::as_str), Some("208"));
        assert_eq!(value.note("mnc").and_then(Value::as_str), Some("93"));
        assert_eq!(value.as_octets(), Some(&[0x02, 0xf8, 0x39][..]));
    }

    #[test]
    fn transport_layer_address_forms() {
        let mut ctx = DecodeContext::new();

        let ipv4 = BitVec::<u8, Msb0>::from_vec(vec![192, 168, 1, 10]);
        let value = transport_layer_address(&mut ctx, Value::BitString(ipv4)).unwrap();
        assert_eq!(value.note("ipv4").and_then(Value::as_str), Some("192.168.1.10"));
        assert!(value.note("ipv6").is_none());

        let mut both = vec![10, 0, 0, 1];
        both.extend_from_slice(&[0x20, 0x01, 0x0d, 0xb8]);
        both.extend_from_slice(&[0u8; 11]);
        both.push(1);
        let value =
            transport_layer_address(&mut ctx, Value::BitString(BitVec::from_vec(both))).unwrap();
        assert_eq!(value.note("ipv4").and_then(Value::as_str), Some("10.0.0.1"));
        assert!(value.note("ipv6").is_some());

        let odd = BitVec::<u8, Msb0>::from_vec(vec![1, 2, 3]);
        let value = transport_layer_address(&mut ctx, Value::BitString(odd.clone())).unwrap();
        assert_eq!(value, Value::BitString(odd));
    }

    #[test]
    fn sender_node_type_prop() {
        let mut ctx = DecodeContext::new();
        let gnb = Value::choice(0, "gNB", Value::Null);
        let value = sender_global_ng_ran_node_id(&mut ctx, gnb).unwrap();
        assert_eq!(ctx.prop(NG_RAN_NODE_PROP), Some("gNB"));
        assert_eq!(value.note("node-type").and_then(Value::as_str), Some("gNB"));

        let mut ctx = DecodeContext::new();
        let ng_enb = Value::choice(1, "ng-eNB", Value::Null);
        sender_global_ng_ran_node_id(&mut ctx, ng_enb).unwrap();
        assert_eq!(ctx.prop(NG_RAN_NODE_PROP), Some("ng-eNB"));
    }

    #[test]
    fn handover_command_per_target() {
        assert_eq!(
            handover_command_container(NgRanNodeType::Gnb, LteContainerAs::NbIot),
            NR_RRC_HANDOVER_COMMAND
        );
        assert_eq!(
            handover_command_container(NgRanNodeType::NgEnb, LteContainerAs::Legacy),
            LTE_RRC_HANDOVER_COMMAND
        );
        assert_eq!(
            handover_command_container(NgRanNodeType::NgEnb, LteContainerAs::NbIot),
            LTE_RRC_HANDOVER_COMMAND_NB
        );
    }

    #[test]
    fn target2source_uses_sender_node() {
        // Automatic is the default and no test changes the global preferences.
        let mut ctx = DecodeContext::new();
        let raw = Value::OctetString(vec![0x01, 0x02]);
        let value = target2source_container(&mut ctx, raw.clone()).unwrap();
        assert_eq!(value, raw);

        ctx.set_prop(SENDER_NODE_PROP, "ng-eNB");
        let value = target2source_container(&mut ctx, raw).unwrap();
        assert_eq!(
            value.note("container").and_then(Value::as_str),
            Some(LTE_RRC_HANDOVER_COMMAND)
        );
    }

    fn cg_config_dissector(octets: &[u8]) -> Result<serde_json::Value, Error> {
        if octets.is_empty() {
            return Err(Error::ParseError("empty CG-Config".to_string()));
        }
        Ok(serde_json::json!({ "length": octets.len() }))
    }

    #[test]
    fn registered_container_dissector() {
        register_container_dissector(NR_RRC_CG_CONFIG, cg_config_dissector).unwrap();
        assert!(register_container_dissector(NR_RRC_CG_CONFIG, cg_config_dissector).is_err());

        let mut ctx = DecodeContext::new();
        let value = sn_to_mn_container(&mut ctx, Value::OctetString(vec![0xaa; 5])).unwrap();
        assert_eq!(
            value.note("decoded"),
            Some(&Value::Json(serde_json::json!({ "length": 5 })))
        );

        let value = sn_to_mn_container(&mut ctx, Value::OctetString(vec![])).unwrap();
        assert!(value.note("decoded").is_none());
        assert_eq!(
            value.note("container").and_then(Value::as_str),
            Some(NR_RRC_CG_CONFIG)
        );
    }
}
