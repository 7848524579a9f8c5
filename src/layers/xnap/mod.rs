//! XnAP Layer
//!
//! Xn Application Protocol (3GPP TS 38.423) between NG-RAN nodes, carried over SCTP with
//! payload protocol identifier 61. PDUs are decoded by the generic [`crate::per`] engine from
//! the descriptors in [`ies`] and [`procedures`].

use std::sync::RwLock;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::errors::Error;
use crate::layer::{Layer, PacketInfo};
use crate::layers::sctp;
use crate::per::{self, DecodeContext, Value};

pub mod constants;
pub mod conversation;
pub mod hooks;
pub mod ies;
pub mod preferences;
pub mod procedures;

pub use conversation::{reset_conversations, NgRanNodeType};
pub use hooks::{register_container_dissector, ContainerDissectorFn};
pub use preferences::{preferences, LteContainerAs, Preferences, TargetNgRanContainerAs};
pub use procedures::{
    ie_name, procedure, procedure_name, protocol_ie, register_procedure,
    register_protocol_extension, register_protocol_ie, PduType, Procedure, ProtocolIe,
};

use constants::{ID_XN_SETUP, XNAP_PPID};

lazy_static! {
    // SCTP port XnAP is currently registered on, if any.
    static ref REGISTERED_PORT: RwLock<Option<u16>> = RwLock::new(None);
}

// Register ourselves with SCTP, by PPID and by the configured port.
pub(crate) fn register_defaults() -> Result<(), Error> {
    lazy_static::initialize(&REGISTERED_PORT);

    procedures::register_default_tables()?;

    sctp::register_datachunk_protocol(XNAP_PPID, XnAP::creator)?;

    let port = preferences::preferences().sctp_port;
    sctp::register_port(port, XnAP::creator)?;
    *REGISTERED_PORT.write().unwrap() = Some(port);

    Ok(())
}

/// Apply new preferences.
///
/// When XnAP is already registered with SCTP and the port changed, it is moved to the new port.
/// If the new port cannot be taken, nothing changes.
pub fn set_preferences(prefs: Preferences) -> Result<(), Error> {
    let port = prefs.sctp_port;

    let mut registered = REGISTERED_PORT.write().unwrap();
    if let Some(old) = *registered {
        if old != port {
            sctp::register_port(port, XnAP::creator)?;
            let _ = sctp::unregister_port(old);
            *registered = Some(port);

            #[cfg(feature = "logging")]
            log::debug!("XnAP: moved from SCTP port {} to {}", old, port);
        }
    }

    let _ = preferences::replace(prefs);
    Ok(())
}

/// A decoded XnAP PDU.
#[derive(Debug, Default, Serialize)]
pub struct XnAP {
    pdu_type: &'static str,
    procedure_code: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    procedure: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    criticality: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sender: Option<NgRanNodeType>,
    pdu: Value,
}

impl XnAP {
    pub fn creator() -> Box<dyn Layer + Send> {
        Box::<XnAP>::default()
    }

    pub fn pdu_type(&self) -> &'static str {
        self.pdu_type
    }

    pub fn procedure_code(&self) -> u8 {
        self.procedure_code
    }

    pub fn procedure(&self) -> Option<&'static str> {
        self.procedure
    }

    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    pub fn criticality(&self) -> &'static str {
        self.criticality
    }

    pub fn pdu(&self) -> &Value {
        &self.pdu
    }

    /// Value of the protocol IE `id` in the message, if present.
    pub fn find_ie(&self, id: u16) -> Option<&Value> {
        let message = self.pdu.as_choice()?.value.get("value")?;
        message
            .get("protocolIEs")?
            .items()
            .iter()
            .find(|ie| ie.get("id").and_then(Value::as_integer) == Some(id as i64))
            .and_then(|ie| ie.get("value"))
    }

    fn fill_from_pdu(&mut self, pdu: Value) -> Result<(), Error> {
        let (pdu_type, outcome) = match pdu.as_choice() {
            Some(c) if !c.extension => match PduType::from_index(c.index) {
                Some(pdu_type) => (pdu_type, &c.value),
                None => {
                    return Err(Error::ParseError(format!(
                        "XnAP-PDU: alternative {}",
                        c.index
                    )))
                }
            },
            _ => {
                return Err(Error::ParseError(
                    "XnAP-PDU: unknown extension alternative".to_string(),
                ))
            }
        };

        let code = outcome
            .get("procedureCode")
            .and_then(Value::as_integer)
            .and_then(|c| u8::try_from(c).ok())
            .ok_or_else(|| Error::ParseError("XnAP-PDU: procedureCode".to_string()))?;

        self.pdu_type = pdu_type.as_str();
        self.procedure_code = code;
        self.procedure = procedures::procedure_name(code as i64);
        self.message = procedures::procedure(code)
            .and_then(|p| p.message(pdu_type))
            .map(|m| m.name);
        self.criticality = match outcome.get("criticality") {
            Some(Value::Enumerated {
                name: Some(name), ..
            }) => *name,
            _ => "",
        };
        self.pdu = pdu;

        Ok(())
    }
}

impl Layer for XnAP {
    fn decode_bytes(
        &mut self,
        bytes: &[u8],
    ) -> Result<(Option<Box<dyn Layer + Send>>, usize), Error> {
        let mut info = PacketInfo::default();
        self.decode_with_info(bytes, &mut info)
    }

    fn decode_with_info(
        &mut self,
        bytes: &[u8],
        info: &mut PacketInfo,
    ) -> Result<(Option<Box<dyn Layer + Send>>, usize), Error> {
        let mut ctx = DecodeContext::new();

        self.sender = conversation::sender_node_type(info);
        if let Some(sender) = self.sender {
            ctx.set_prop(hooks::SENDER_NODE_PROP, sender.as_str());
        }

        let pdu = per::decode(bytes, &procedures::XNAP_PDU, &mut ctx)?;
        self.fill_from_pdu(pdu)?;

        if self.procedure_code == ID_XN_SETUP
            && self.pdu_type != PduType::UnsuccessfulOutcome.as_str()
        {
            let node_type = ctx
                .prop(hooks::NG_RAN_NODE_PROP)
                .and_then(NgRanNodeType::from_name);
            if let Some(node_type) = node_type {
                conversation::record_sender_node_type(info, node_type);
                self.sender = Some(node_type);
            }
        }

        Ok((None, bytes.len()))
    }

    fn name(&self) -> &'static str {
        "XnAP"
    }

    fn short_name(&self) -> &'static str {
        "xnap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers;
    use crate::types::{Address, IPv4Address};

    use constants::*;

    fn info(src: [u8; 4], dst: [u8; 4]) -> PacketInfo {
        PacketInfo {
            src: Address::IPv4(IPv4Address::from(src)),
            dst: Address::IPv4(IPv4Address::from(dst)),
            src_port: XNAP_DEFAULT_SCTP_PORT,
            dst_port: XNAP_DEFAULT_SCTP_PORT,
            ..Default::default()
        }
    }

    #[test]
    fn error_indication() {
        let _ = layers::register_defaults();

        let bytes = hex::decode("001540080000010007400128").unwrap();
        let mut xnap = XnAP::default();
        let (next, consumed) = xnap.decode_bytes(&bytes).unwrap();
        assert!(next.is_none());
        assert_eq!(consumed, bytes.len());

        assert_eq!(xnap.pdu_type(), "initiatingMessage");
        assert_eq!(xnap.procedure_code(), ID_ERROR_INDICATION);
        assert_eq!(xnap.procedure(), Some("id-errorIndication"));
        assert_eq!(xnap.message(), Some("ErrorIndication"));
        assert_eq!(xnap.criticality(), "ignore");

        let cause = xnap.find_ie(ID_CAUSE).unwrap().as_choice().unwrap();
        assert_eq!(cause.name, "transport");
        assert_eq!(
            cause.value,
            Value::Enumerated {
                index: 1,
                extension: false,
                name: Some("unspecified"),
            }
        );
        assert!(xnap.find_ie(ID_CRITICALITY_DIAGNOSTICS).is_none());

        let json = serde_json::to_value(&xnap).unwrap();
        assert_eq!(json["procedure"], "id-errorIndication");
        assert_eq!(json["criticality"], "ignore");
    }

    #[test]
    fn round_trip_error_indication() {
        let _ = layers::register_defaults();

        let bytes = hex::decode("001540080000010007400128").unwrap();
        let mut xnap = XnAP::default();
        xnap.decode_bytes(&bytes).unwrap();

        let encoded = per::encode(&procedures::XNAP_PDU, xnap.pdu()).unwrap();
        assert_eq!(encoded, bytes);
    }

    #[test]
    fn unknown_ie_kept_raw() {
        let _ = layers::register_defaults();

        // id 105 (id-S-NG-RANnodeMaxIPDataRate-UL) is not modeled
        let bytes = hex::decode("0015400900000100694002abcd").unwrap();
        let mut xnap = XnAP::default();
        xnap.decode_bytes(&bytes).unwrap();

        assert_eq!(
            xnap.find_ie(105),
            Some(&Value::Open(vec![0xab, 0xcd]))
        );
    }

    #[test]
    fn truncated_pdu() {
        let _ = layers::register_defaults();

        let bytes = hex::decode("0015400800000100074001").unwrap();
        let mut xnap = XnAP::default();
        assert!(xnap.decode_bytes(&bytes).is_err());
    }

    #[test]
    fn extension_bitmap_overflow_is_an_error() {
        let _ = layers::register_defaults();

        // ErrorIndication with the extension bit set and an 8 octet bitmap length
        let bytes = hex::decode("0015400d8000008008ffffffffffffffff").unwrap();
        let mut xnap = XnAP::default();
        assert!(xnap.decode_bytes(&bytes).is_err());
    }

    #[test]
    fn xn_setup_records_node_types() {
        let _ = layers::register_defaults();

        let ng_ran_node_1 = [10, 20, 0, 1];
        let ng_ran_node_2 = [10, 20, 0, 2];

        // XnSetupRequest from a gNB
        let request = hex::decode("0011000f000001000e00080002f83900123454").unwrap();

        let mut xnap = XnAP::default();
        let mut info_1_2 = info(ng_ran_node_1, ng_ran_node_2);
        xnap.decode_with_info(&request, &mut info_1_2).unwrap();
        assert_eq!(xnap.message(), Some("XnSetupRequest"));
        assert_eq!(xnap.sender, Some(NgRanNodeType::Gnb));

        let node = xnap.find_ie(ID_GLOBAL_NG_RAN_NODE_ID).unwrap();
        assert_eq!(node.note("node-type").and_then(Value::as_str), Some("gNB"));
        let gnb = &node.as_choice().unwrap().value;
        let plmn = gnb.get("plmn-id").unwrap();
        assert_eq!(plmn.note("mcc").and_then(Value::as_str), Some("208"));
        assert_eq!(plmn.note("mnc").and_then(Value::as_str), Some("93"));

        // XnSetupResponse from an ng-eNB
        let response = hex::decode("2011000f000001000e00084002f83900123450").unwrap();
        let mut xnap = XnAP::default();
        let mut info_2_1 = info(ng_ran_node_2, ng_ran_node_1);
        xnap.decode_with_info(&response, &mut info_2_1).unwrap();
        assert_eq!(xnap.pdu_type(), "successfulOutcome");
        assert_eq!(xnap.message(), Some("XnSetupResponse"));

        assert_eq!(
            conversation::sender_node_type(&info_1_2),
            Some(NgRanNodeType::Gnb)
        );
        assert_eq!(
            conversation::sender_node_type(&info_2_1),
            Some(NgRanNodeType::NgEnb)
        );

        // HandoverRequestAcknowledge from the ng-eNB: the container is an LTE HandoverCommand
        let ack = hex::decode("2000000a000001004d400302aabb").unwrap();
        let mut xnap = XnAP::default();
        xnap.decode_with_info(&ack, &mut info_2_1).unwrap();
        assert_eq!(xnap.message(), Some("HandoverRequestAcknowledge"));
        assert_eq!(xnap.sender, Some(NgRanNodeType::NgEnb));

        let container = xnap
            .find_ie(ID_TARGET2SOURCE_NG_RAN_NODE_TRANSP_CONTAINER)
            .unwrap();
        assert_eq!(container.as_octets(), Some(&[0xaa, 0xbb][..]));
        assert_eq!(
            container.note("container").and_then(Value::as_str),
            Some(hooks::LTE_RRC_HANDOVER_COMMAND)
        );
    }

    #[test]
    fn xn_setup_failure_records_nothing() {
        let _ = layers::register_defaults();

        let ng_ran_node_1 = [10, 20, 1, 1];
        let ng_ran_node_2 = [10, 20, 1, 2];

        // XnSetupFailure carrying a gNB GlobalNG-RANNode-ID
        let failure = hex::decode("4011000f000001000e00080002f83900123454").unwrap();
        let mut xnap = XnAP::default();
        let mut info_1_2 = info(ng_ran_node_1, ng_ran_node_2);
        xnap.decode_with_info(&failure, &mut info_1_2).unwrap();
        assert_eq!(xnap.pdu_type(), "unsuccessfulOutcome");
        assert_eq!(xnap.message(), Some("XnSetupFailure"));
        assert_eq!(xnap.sender, None);

        assert_eq!(conversation::sender_node_type(&info_1_2), None);
        assert!(conversation::conversation(&info_1_2).is_none());
    }

    #[test]
    fn set_preferences_moves_port() {
        let _ = layers::register_defaults();

        let prefs = Preferences {
            sctp_port: 36422,
            ..preferences()
        };
        set_preferences(prefs).unwrap();
        assert_eq!(*REGISTERED_PORT.read().unwrap(), Some(36422));
        assert!(sctp::unregister_port(XNAP_DEFAULT_SCTP_PORT).is_none());

        set_preferences(Preferences::default()).unwrap();
        assert_eq!(
            *REGISTERED_PORT.read().unwrap(),
            Some(XNAP_DEFAULT_SCTP_PORT)
        );

        // a port owned by another protocol is refused, the current one is kept
        sctp::register_port(36423, XnAP::creator).unwrap();
        let taken = Preferences {
            sctp_port: 36423,
            lte_container_as: LteContainerAs::NbIot,
            ..preferences()
        };
        assert!(matches!(
            set_preferences(taken),
            Err(Error::RegisterError(_))
        ));
        assert_eq!(
            *REGISTERED_PORT.read().unwrap(),
            Some(XNAP_DEFAULT_SCTP_PORT)
        );
        assert_eq!(preferences(), Preferences::default());
        assert!(sctp::register_port(XNAP_DEFAULT_SCTP_PORT, XnAP::creator).is_err());
        assert!(sctp::unregister_port(36423).is_some());
    }
}
