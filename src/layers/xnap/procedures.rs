//! Elementary procedures, the XnAP-PDU and the dispatch tables
//!
//! The value of a PDU is looked up by procedure code in the procedure table, the value of a
//! ProtocolIE-Field by IE id in the protocol IE table and the value of a ProtocolExtensionField
//! in the extension table. Each table can be extended by applications through the
//! `register_*` functions.

use std::collections::HashMap;
use std::sync::RwLock;

use lazy_static::lazy_static;

use crate::errors::Error;
use crate::per::types::{Alternative, ChoiceSpec, Field, Kind, OpenTypeSpec, SequenceSpec, TypeDef};

use super::constants::*;
use super::ies::{self, CRITICALITY, PROCEDURE_CODE, PROTOCOL_IES_MESSAGE_SPEC};

/// An elementary procedure and the message types of its PDUs.
///
/// Class 1 procedures have a response (successful and/or unsuccessful outcome), class 2
/// procedures only an initiating message.
#[derive(Debug, Clone, Copy)]
pub struct Procedure {
    pub code: u8,
    pub name: &'static str,
    pub initiating: Option<&'static TypeDef>,
    pub successful: Option<&'static TypeDef>,
    pub unsuccessful: Option<&'static TypeDef>,
}

impl Procedure {
    pub const fn new(
        code: u8,
        name: &'static str,
        initiating: Option<&'static TypeDef>,
        successful: Option<&'static TypeDef>,
        unsuccessful: Option<&'static TypeDef>,
    ) -> Self {
        Self {
            code,
            name,
            initiating,
            successful,
            unsuccessful,
        }
    }

    const fn class1(
        code: u8,
        initiating: &'static TypeDef,
        successful: &'static TypeDef,
        unsuccessful: &'static TypeDef,
    ) -> Self {
        Self::new(
            code,
            PROCEDURE_CODE_NAMES[code as usize],
            Some(initiating),
            Some(successful),
            Some(unsuccessful),
        )
    }

    const fn class1_no_failure(
        code: u8,
        initiating: &'static TypeDef,
        successful: &'static TypeDef,
    ) -> Self {
        Self::new(
            code,
            PROCEDURE_CODE_NAMES[code as usize],
            Some(initiating),
            Some(successful),
            None,
        )
    }

    const fn class2(code: u8, initiating: &'static TypeDef) -> Self {
        Self::new(
            code,
            PROCEDURE_CODE_NAMES[code as usize],
            Some(initiating),
            None,
            None,
        )
    }

    /// Message type for the given alternative of the XnAP-PDU.
    pub fn message(&self, pdu_type: PduType) -> Option<&'static TypeDef> {
        match pdu_type {
            PduType::InitiatingMessage => self.initiating,
            PduType::SuccessfulOutcome => self.successful,
            PduType::UnsuccessfulOutcome => self.unsuccessful,
        }
    }
}

/// An entry of the protocol IE (or protocol extension) table.
#[derive(Debug, Clone, Copy)]
pub struct ProtocolIe {
    pub id: u16,
    pub name: &'static str,
    pub ty: &'static TypeDef,
}

impl ProtocolIe {
    pub const fn new(id: u16, name: &'static str, ty: &'static TypeDef) -> Self {
        Self { id, name, ty }
    }

    const fn known(id: u16, ty: &'static TypeDef) -> Self {
        Self::new(id, PROTOCOL_IE_NAMES[id as usize], ty)
    }
}

/// Alternatives of the XnAP-PDU CHOICE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PduType {
    InitiatingMessage,
    SuccessfulOutcome,
    UnsuccessfulOutcome,
}

impl PduType {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PduType::InitiatingMessage),
            1 => Some(PduType::SuccessfulOutcome),
            2 => Some(PduType::UnsuccessfulOutcome),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PduType::InitiatingMessage => "initiatingMessage",
            PduType::SuccessfulOutcome => "successfulOutcome",
            PduType::UnsuccessfulOutcome => "unsuccessfulOutcome",
        }
    }
}

lazy_static! {
    static ref PROCEDURES: RwLock<HashMap<u8, Procedure>> = RwLock::new(HashMap::new());
    static ref PROTOCOL_IES: RwLock<HashMap<u16, ProtocolIe>> = RwLock::new(HashMap::new());
    static ref PROTOCOL_EXTENSIONS: RwLock<HashMap<u16, ProtocolIe>> =
        RwLock::new(HashMap::new());
}

/// Register an elementary procedure.
///
/// Procedures not defined by this crate (or defined in later releases of TS 38.423) can be
/// added here, their PDUs are decoded with the given message types from then on.
pub fn register_procedure(procedure: Procedure) -> Result<(), Error> {
    lazy_static::initialize(&PROCEDURES);

    let mut map = PROCEDURES.write().unwrap();
    if map.contains_key(&procedure.code) {
        return Err(Error::RegisterError(format!(
            "XnAP procedure: {}",
            procedure.code
        )));
    }
    map.insert(procedure.code, procedure);

    Ok(())
}

/// Register the value type of a protocol IE.
pub fn register_protocol_ie(ie: ProtocolIe) -> Result<(), Error> {
    lazy_static::initialize(&PROTOCOL_IES);

    let mut map = PROTOCOL_IES.write().unwrap();
    if map.contains_key(&ie.id) {
        return Err(Error::RegisterError(format!("XnAP protocol IE: {}", ie.id)));
    }
    map.insert(ie.id, ie);

    Ok(())
}

/// Register the value type of a protocol extension (`iE-Extensions`).
pub fn register_protocol_extension(ext: ProtocolIe) -> Result<(), Error> {
    lazy_static::initialize(&PROTOCOL_EXTENSIONS);

    let mut map = PROTOCOL_EXTENSIONS.write().unwrap();
    if map.contains_key(&ext.id) {
        return Err(Error::RegisterError(format!(
            "XnAP protocol extension: {}",
            ext.id
        )));
    }
    map.insert(ext.id, ext);

    Ok(())
}

pub fn procedure(code: u8) -> Option<Procedure> {
    PROCEDURES.read().ok()?.get(&code).copied()
}

pub fn protocol_ie(id: u16) -> Option<ProtocolIe> {
    PROTOCOL_IES.read().ok()?.get(&id).copied()
}

pub fn protocol_extension(id: u16) -> Option<ProtocolIe> {
    PROTOCOL_EXTENSIONS.read().ok()?.get(&id).copied()
}

/// Name of a procedure code, registered procedures first.
pub fn procedure_name(code: i64) -> Option<&'static str> {
    u8::try_from(code)
        .ok()
        .and_then(procedure)
        .map(|p| p.name)
        .or_else(|| procedure_code_name(code))
}

/// Name of a protocol IE id, registered IEs and extensions first.
pub fn ie_name(id: i64) -> Option<&'static str> {
    let id16 = u16::try_from(id).ok();
    id16.and_then(protocol_ie)
        .or_else(|| id16.and_then(protocol_extension))
        .map(|ie| ie.name)
        .or_else(|| protocol_ie_id_name(id))
}

pub(crate) fn protocol_ie_type(id: i64) -> Option<&'static TypeDef> {
    protocol_ie(u16::try_from(id).ok()?).map(|ie| ie.ty)
}

pub(crate) fn protocol_extension_type(id: i64) -> Option<&'static TypeDef> {
    protocol_extension(u16::try_from(id).ok()?).map(|ext| ext.ty)
}

fn message_type(code: i64, pdu_type: PduType) -> Option<&'static TypeDef> {
    let procedure = procedure(u8::try_from(code).ok()?);

    #[cfg(feature = "logging")]
    if procedure.is_none() {
        log::warn!("XnAP: unknown procedure code {}", code);
    }

    procedure?.message(pdu_type)
}

fn initiating_message_type(code: i64) -> Option<&'static TypeDef> {
    message_type(code, PduType::InitiatingMessage)
}

fn successful_outcome_type(code: i64) -> Option<&'static TypeDef> {
    message_type(code, PduType::SuccessfulOutcome)
}

fn unsuccessful_outcome_type(code: i64) -> Option<&'static TypeDef> {
    message_type(code, PduType::UnsuccessfulOutcome)
}

// XnAP-PDU-Descriptions

macro_rules! pdu_alternative {
    ($value:ident, $fields:ident, $spec:ident, $def:ident, $name:literal, $lookup:ident) => {
        static $value: TypeDef = TypeDef::new(
            concat!($name, ".value"),
            Kind::OpenType(OpenTypeSpec {
                key: "procedureCode",
                lookup: $lookup,
            }),
        );
        static $fields: [Field; 3] = [
            Field::mandatory("procedureCode", &PROCEDURE_CODE),
            Field::mandatory("criticality", &CRITICALITY),
            Field::mandatory("value", &$value),
        ];
        static $spec: SequenceSpec = SequenceSpec {
            fields: &$fields,
            extensible: false,
            extensions: &[],
        };
        pub static $def: TypeDef = TypeDef::new($name, Kind::Sequence(&$spec));
    };
}

pdu_alternative!(
    INITIATING_MESSAGE_VALUE,
    INITIATING_MESSAGE_FIELDS,
    INITIATING_MESSAGE_SPEC,
    INITIATING_MESSAGE,
    "InitiatingMessage",
    initiating_message_type
);
pdu_alternative!(
    SUCCESSFUL_OUTCOME_VALUE,
    SUCCESSFUL_OUTCOME_FIELDS,
    SUCCESSFUL_OUTCOME_SPEC,
    SUCCESSFUL_OUTCOME,
    "SuccessfulOutcome",
    successful_outcome_type
);
pdu_alternative!(
    UNSUCCESSFUL_OUTCOME_VALUE,
    UNSUCCESSFUL_OUTCOME_FIELDS,
    UNSUCCESSFUL_OUTCOME_SPEC,
    UNSUCCESSFUL_OUTCOME,
    "UnsuccessfulOutcome",
    unsuccessful_outcome_type
);

static XNAP_PDU_ALTERNATIVES: [Alternative; 3] = [
    Alternative::new("initiatingMessage", &INITIATING_MESSAGE),
    Alternative::new("successfulOutcome", &SUCCESSFUL_OUTCOME),
    Alternative::new("unsuccessfulOutcome", &UNSUCCESSFUL_OUTCOME),
];
static XNAP_PDU_SPEC: ChoiceSpec = ChoiceSpec {
    alternatives: &XNAP_PDU_ALTERNATIVES,
    extensible: true,
    extensions: &[],
};
pub static XNAP_PDU: TypeDef = TypeDef::new("XnAP-PDU", Kind::Choice(&XNAP_PDU_SPEC));

// XnAP-PDU-Contents

macro_rules! protocol_ies_messages {
    ($($def:ident => $name:literal,)*) => {
        $(
            pub static $def: TypeDef = TypeDef::new($name, Kind::Sequence(&PROTOCOL_IES_MESSAGE_SPEC));
        )*
    };
}

protocol_ies_messages! {
    HANDOVER_REQUEST => "HandoverRequest",
    HANDOVER_REQUEST_ACKNOWLEDGE => "HandoverRequestAcknowledge",
    HANDOVER_PREPARATION_FAILURE => "HandoverPreparationFailure",
    SN_STATUS_TRANSFER => "SNStatusTransfer",
    HANDOVER_CANCEL => "HandoverCancel",
    RETRIEVE_UE_CONTEXT_REQUEST => "RetrieveUEContextRequest",
    RETRIEVE_UE_CONTEXT_RESPONSE => "RetrieveUEContextResponse",
    RETRIEVE_UE_CONTEXT_FAILURE => "RetrieveUEContextFailure",
    RAN_PAGING => "RANPaging",
    XNU_ADDRESS_INDICATION => "XnUAddressIndication",
    UE_CONTEXT_RELEASE => "UEContextRelease",
    S_NODE_ADDITION_REQUEST => "SNodeAdditionRequest",
    S_NODE_ADDITION_REQUEST_ACKNOWLEDGE => "SNodeAdditionRequestAcknowledge",
    S_NODE_ADDITION_REQUEST_REJECT => "SNodeAdditionRequestReject",
    S_NODE_RECONFIGURATION_COMPLETE => "SNodeReconfigurationComplete",
    S_NODE_MODIFICATION_REQUEST => "SNodeModificationRequest",
    S_NODE_MODIFICATION_REQUEST_ACKNOWLEDGE => "SNodeModificationRequestAcknowledge",
    S_NODE_MODIFICATION_REQUEST_REJECT => "SNodeModificationRequestReject",
    S_NODE_MODIFICATION_REQUIRED => "SNodeModificationRequired",
    S_NODE_MODIFICATION_CONFIRM => "SNodeModificationConfirm",
    S_NODE_MODIFICATION_REFUSE => "SNodeModificationRefuse",
    S_NODE_RELEASE_REQUEST => "SNodeReleaseRequest",
    S_NODE_RELEASE_REQUEST_ACKNOWLEDGE => "SNodeReleaseRequestAcknowledge",
    S_NODE_RELEASE_REJECT => "SNodeReleaseReject",
    S_NODE_RELEASE_REQUIRED => "SNodeReleaseRequired",
    S_NODE_RELEASE_CONFIRM => "SNodeReleaseConfirm",
    S_NODE_COUNTER_CHECK_REQUEST => "SNodeCounterCheckRequest",
    S_NODE_CHANGE_REQUIRED => "SNodeChangeRequired",
    S_NODE_CHANGE_CONFIRM => "SNodeChangeConfirm",
    S_NODE_CHANGE_REFUSE => "SNodeChangeRefuse",
    RRC_TRANSFER => "RRCTransfer",
    XN_REMOVAL_REQUEST => "XnRemovalRequest",
    XN_REMOVAL_RESPONSE => "XnRemovalResponse",
    XN_REMOVAL_FAILURE => "XnRemovalFailure",
    XN_SETUP_REQUEST => "XnSetupRequest",
    XN_SETUP_RESPONSE => "XnSetupResponse",
    XN_SETUP_FAILURE => "XnSetupFailure",
    NG_RAN_NODE_CONFIGURATION_UPDATE => "NGRANNodeConfigurationUpdate",
    NG_RAN_NODE_CONFIGURATION_UPDATE_ACKNOWLEDGE => "NGRANNodeConfigurationUpdateAcknowledge",
    NG_RAN_NODE_CONFIGURATION_UPDATE_FAILURE => "NGRANNodeConfigurationUpdateFailure",
    CELL_ACTIVATION_REQUEST => "CellActivationRequest",
    CELL_ACTIVATION_RESPONSE => "CellActivationResponse",
    CELL_ACTIVATION_FAILURE => "CellActivationFailure",
    RESET_REQUEST => "ResetRequest",
    RESET_RESPONSE => "ResetResponse",
    ERROR_INDICATION => "ErrorIndication",
    NOTIFICATION_CONTROL_INDICATION => "NotificationControlIndication",
    ACTIVITY_NOTIFICATION => "ActivityNotification",
    E_UTRA_NR_CELL_RESOURCE_COORDINATION_REQUEST => "E-UTRA-NR-CellResourceCoordinationRequest",
    E_UTRA_NR_CELL_RESOURCE_COORDINATION_RESPONSE => "E-UTRA-NR-CellResourceCoordinationResponse",
    SECONDARY_RAT_DATA_USAGE_REPORT => "SecondaryRATDataUsageReport",
    DEACTIVATE_TRACE => "DeactivateTrace",
    TRACE_START => "TraceStart",
    HANDOVER_SUCCESS => "HandoverSuccess",
    CONDITIONAL_HANDOVER_CANCEL => "ConditionalHandoverCancel",
    EARLY_STATUS_TRANSFER => "EarlyStatusTransfer",
    FAILURE_INDICATION => "FailureIndication",
    HANDOVER_REPORT => "HandoverReport",
    RESOURCE_STATUS_REQUEST => "ResourceStatusRequest",
    RESOURCE_STATUS_RESPONSE => "ResourceStatusResponse",
    RESOURCE_STATUS_FAILURE => "ResourceStatusFailure",
    RESOURCE_STATUS_UPDATE => "ResourceStatusUpdate",
    MOBILITY_CHANGE_REQUEST => "MobilityChangeRequest",
    MOBILITY_CHANGE_ACKNOWLEDGE => "MobilityChangeAcknowledge",
    MOBILITY_CHANGE_FAILURE => "MobilityChangeFailure",
    ACCESS_AND_MOBILITY_INDICATION => "AccessAndMobilityIndication",
}

// privateMessage is keyed by OBJECT IDENTIFIERs and not part of the table.
static DEFAULT_PROCEDURES: [Procedure; 37] = [
    Procedure::class1(
        ID_HANDOVER_PREPARATION,
        &HANDOVER_REQUEST,
        &HANDOVER_REQUEST_ACKNOWLEDGE,
        &HANDOVER_PREPARATION_FAILURE,
    ),
    Procedure::class2(ID_SN_STATUS_TRANSFER, &SN_STATUS_TRANSFER),
    Procedure::class2(ID_HANDOVER_CANCEL, &HANDOVER_CANCEL),
    Procedure::class1(
        ID_RETRIEVE_UE_CONTEXT,
        &RETRIEVE_UE_CONTEXT_REQUEST,
        &RETRIEVE_UE_CONTEXT_RESPONSE,
        &RETRIEVE_UE_CONTEXT_FAILURE,
    ),
    Procedure::class2(ID_RAN_PAGING, &RAN_PAGING),
    Procedure::class2(ID_XNU_ADDRESS_INDICATION, &XNU_ADDRESS_INDICATION),
    Procedure::class2(ID_UE_CONTEXT_RELEASE, &UE_CONTEXT_RELEASE),
    Procedure::class1(
        ID_SNG_RAN_NODE_ADDITION_PREPARATION,
        &S_NODE_ADDITION_REQUEST,
        &S_NODE_ADDITION_REQUEST_ACKNOWLEDGE,
        &S_NODE_ADDITION_REQUEST_REJECT,
    ),
    Procedure::class2(
        ID_SNG_RAN_NODE_RECONFIGURATION_COMPLETION,
        &S_NODE_RECONFIGURATION_COMPLETE,
    ),
    Procedure::class1(
        ID_MNG_RAN_NODE_INITIATED_SNG_RAN_NODE_MODIFICATION_PREPARATION,
        &S_NODE_MODIFICATION_REQUEST,
        &S_NODE_MODIFICATION_REQUEST_ACKNOWLEDGE,
        &S_NODE_MODIFICATION_REQUEST_REJECT,
    ),
    Procedure::class1(
        ID_SNG_RAN_NODE_INITIATED_SNG_RAN_NODE_MODIFICATION_PREPARATION,
        &S_NODE_MODIFICATION_REQUIRED,
        &S_NODE_MODIFICATION_CONFIRM,
        &S_NODE_MODIFICATION_REFUSE,
    ),
    Procedure::class1(
        ID_MNG_RAN_NODE_INITIATED_SNG_RAN_NODE_RELEASE,
        &S_NODE_RELEASE_REQUEST,
        &S_NODE_RELEASE_REQUEST_ACKNOWLEDGE,
        &S_NODE_RELEASE_REJECT,
    ),
    Procedure::class1_no_failure(
        ID_SNG_RAN_NODE_INITIATED_SNG_RAN_NODE_RELEASE,
        &S_NODE_RELEASE_REQUIRED,
        &S_NODE_RELEASE_CONFIRM,
    ),
    Procedure::class2(ID_SNG_RAN_NODE_COUNTER_CHECK, &S_NODE_COUNTER_CHECK_REQUEST),
    Procedure::class1(
        ID_SNG_RAN_NODE_CHANGE,
        &S_NODE_CHANGE_REQUIRED,
        &S_NODE_CHANGE_CONFIRM,
        &S_NODE_CHANGE_REFUSE,
    ),
    Procedure::class2(ID_RRC_TRANSFER, &RRC_TRANSFER),
    Procedure::class1(
        ID_XN_REMOVAL,
        &XN_REMOVAL_REQUEST,
        &XN_REMOVAL_RESPONSE,
        &XN_REMOVAL_FAILURE,
    ),
    Procedure::class1(
        ID_XN_SETUP,
        &XN_SETUP_REQUEST,
        &XN_SETUP_RESPONSE,
        &XN_SETUP_FAILURE,
    ),
    Procedure::class1(
        ID_NG_RAN_NODE_CONFIGURATION_UPDATE,
        &NG_RAN_NODE_CONFIGURATION_UPDATE,
        &NG_RAN_NODE_CONFIGURATION_UPDATE_ACKNOWLEDGE,
        &NG_RAN_NODE_CONFIGURATION_UPDATE_FAILURE,
    ),
    Procedure::class1(
        ID_CELL_ACTIVATION,
        &CELL_ACTIVATION_REQUEST,
        &CELL_ACTIVATION_RESPONSE,
        &CELL_ACTIVATION_FAILURE,
    ),
    Procedure::class1_no_failure(ID_RESET, &RESET_REQUEST, &RESET_RESPONSE),
    Procedure::class2(ID_ERROR_INDICATION, &ERROR_INDICATION),
    Procedure::class2(ID_NOTIFICATION_CONTROL, &NOTIFICATION_CONTROL_INDICATION),
    Procedure::class2(ID_ACTIVITY_NOTIFICATION, &ACTIVITY_NOTIFICATION),
    Procedure::class1_no_failure(
        ID_E_UTRA_NR_CELL_RESOURCE_COORDINATION,
        &E_UTRA_NR_CELL_RESOURCE_COORDINATION_REQUEST,
        &E_UTRA_NR_CELL_RESOURCE_COORDINATION_RESPONSE,
    ),
    Procedure::class2(
        ID_SECONDARY_RAT_DATA_USAGE_REPORT,
        &SECONDARY_RAT_DATA_USAGE_REPORT,
    ),
    Procedure::class2(ID_DEACTIVATE_TRACE, &DEACTIVATE_TRACE),
    Procedure::class2(ID_TRACE_START, &TRACE_START),
    Procedure::class2(ID_HANDOVER_SUCCESS, &HANDOVER_SUCCESS),
    Procedure::class2(ID_CONDITIONAL_HANDOVER_CANCEL, &CONDITIONAL_HANDOVER_CANCEL),
    Procedure::class2(ID_EARLY_STATUS_TRANSFER, &EARLY_STATUS_TRANSFER),
    Procedure::class2(ID_FAILURE_INDICATION, &FAILURE_INDICATION),
    Procedure::class2(ID_HANDOVER_REPORT, &HANDOVER_REPORT),
    Procedure::class1(
        ID_RESOURCE_STATUS_REPORTING_INITIATION,
        &RESOURCE_STATUS_REQUEST,
        &RESOURCE_STATUS_RESPONSE,
        &RESOURCE_STATUS_FAILURE,
    ),
    Procedure::class2(ID_RESOURCE_STATUS_REPORTING, &RESOURCE_STATUS_UPDATE),
    Procedure::class1(
        ID_MOBILITY_SETTINGS_CHANGE,
        &MOBILITY_CHANGE_REQUEST,
        &MOBILITY_CHANGE_ACKNOWLEDGE,
        &MOBILITY_CHANGE_FAILURE,
    ),
    Procedure::class2(
        ID_ACCESS_AND_MOBILITY_INDICATION,
        &ACCESS_AND_MOBILITY_INDICATION,
    ),
];

static DEFAULT_PROTOCOL_IES: [ProtocolIe; 28] = [
    ProtocolIe::known(ID_CAUSE, &ies::CAUSE),
    ProtocolIe::known(ID_CRITICALITY_DIAGNOSTICS, &ies::CRITICALITY_DIAGNOSTICS),
    ProtocolIe::known(ID_GLOBAL_NG_RAN_NODE_ID, &ies::SENDER_GLOBAL_NG_RAN_NODE_ID),
    ProtocolIe::known(ID_GUAMI, &ies::GUAMI),
    ProtocolIe::known(ID_MASKED_IMEISV, &ies::MASKED_IMEISV),
    ProtocolIe::known(ID_M_NG_RAN_NODE_UE_XNAP_ID, &ies::NG_RAN_NODE_UE_XNAP_ID),
    ProtocolIe::known(ID_MN_TO_SN_CONTAINER, &ies::MN_TO_SN_CONTAINER),
    ProtocolIe::known(ID_NEW_NG_RAN_NODE_UE_XNAP_ID, &ies::NG_RAN_NODE_UE_XNAP_ID),
    ProtocolIe::known(ID_OLD_NG_RAN_NODE_UE_XNAP_ID, &ies::NG_RAN_NODE_UE_XNAP_ID),
    ProtocolIe::known(ID_PAGING_DRX, &ies::PAGING_DRX),
    ProtocolIe::known(ID_PCELL_ID, &ies::GLOBAL_NG_RAN_CELL_ID),
    ProtocolIe::known(ID_SELECTED_PLMN, &ies::PLMN_IDENTITY),
    ProtocolIe::known(ID_S_NG_RAN_NODE_UE_AMBR, &ies::UE_AGGREGATE_MAXIMUM_BIT_RATE),
    ProtocolIe::known(ID_S_NG_RAN_NODE_UE_XNAP_ID, &ies::NG_RAN_NODE_UE_XNAP_ID),
    ProtocolIe::known(ID_SN_TO_MN_CONTAINER, &ies::SN_TO_MN_CONTAINER),
    ProtocolIe::known(ID_SOURCE_NG_RAN_NODE_UE_XNAP_ID, &ies::NG_RAN_NODE_UE_XNAP_ID),
    ProtocolIe::known(ID_TAI_SUPPORT_LIST, &ies::TAI_SUPPORT_LIST),
    ProtocolIe::known(ID_TIME_TO_WAIT, &ies::TIME_TO_WAIT),
    ProtocolIe::known(
        ID_TARGET2SOURCE_NG_RAN_NODE_TRANSP_CONTAINER,
        &ies::TARGET2SOURCE_NG_RAN_NODE_TRANSP_CONTAINER,
    ),
    ProtocolIe::known(ID_TARGET_CELL_GLOBAL_ID, &ies::TARGET_CGI),
    ProtocolIe::known(ID_TARGET_NG_RAN_NODE_UE_XNAP_ID, &ies::NG_RAN_NODE_UE_XNAP_ID),
    ProtocolIe::known(ID_TARGET_S_NG_RAN_NODE_ID, &ies::GLOBAL_NG_RAN_NODE_ID),
    ProtocolIe::known(ID_UE_CONTEXT_KEPT_INDICATOR, &ies::UE_CONTEXT_KEPT_INDICATOR),
    ProtocolIe::known(ID_UE_SECURITY_CAPABILITIES, &ies::UE_SECURITY_CAPABILITIES),
    ProtocolIe::known(ID_TNLA_TO_ADD_LIST, &ies::TNLA_TO_ADD_LIST),
    ProtocolIe::known(ID_TNLA_TO_REMOVE_LIST, &ies::TNLA_TO_REMOVE_LIST),
    ProtocolIe::known(ID_TNLA_SETUP_LIST, &ies::TNLA_SETUP_LIST),
    ProtocolIe::known(ID_TNLA_FAILED_TO_SETUP_LIST, &ies::TNLA_FAILED_TO_SETUP_LIST),
];

/// Fill the procedure and protocol IE tables with the types known to this crate.
pub(crate) fn register_default_tables() -> Result<(), Error> {
    for procedure in DEFAULT_PROCEDURES.iter() {
        register_procedure(*procedure)?;
    }
    for ie in DEFAULT_PROTOCOL_IES.iter() {
        register_protocol_ie(*ie)?;
    }

    Ok(())
}
