//! XnAP type descriptors
//!
//! Container types of XnAP-Containers / XnAP-CommonDataTypes and the IE value types of
//! XnAP-IEs that are decoded beyond raw octets.

use crate::per::constraints::{Constraint, Size};
use crate::per::types::{
    Alternative, ChoiceSpec, EnumeratedSpec, Field, IntegerSpec, Kind, OpenTypeSpec,
    SequenceOfSpec, SequenceSpec, TypeDef,
};

use super::constants::*;
use super::hooks;
use super::procedures;

// XnAP-CommonDataTypes

pub static CRITICALITY_SPEC: EnumeratedSpec = EnumeratedSpec {
    root: &["reject", "ignore", "notify"],
    extensible: false,
    extensions: &[],
};
pub static CRITICALITY: TypeDef = TypeDef::new("Criticality", Kind::Enumerated(&CRITICALITY_SPEC));

pub static PROCEDURE_CODE: TypeDef = TypeDef::new(
    "ProcedureCode",
    Kind::Integer(IntegerSpec {
        constraint: Constraint::new(0, 255),
        names: Some(procedures::procedure_name),
    }),
);

pub static PROTOCOL_IE_ID: TypeDef = TypeDef::new(
    "ProtocolIE-ID",
    Kind::Integer(IntegerSpec {
        constraint: Constraint::new(0, MAX_PROTOCOL_IES as i64),
        names: Some(procedures::ie_name),
    }),
);

static TRIGGERING_MESSAGE_SPEC: EnumeratedSpec = EnumeratedSpec {
    root: &[
        "initiating-message",
        "successful-outcome",
        "unsuccessful-outcome",
    ],
    extensible: false,
    extensions: &[],
};
pub static TRIGGERING_MESSAGE: TypeDef = TypeDef::new(
    "TriggeringMessage",
    Kind::Enumerated(&TRIGGERING_MESSAGE_SPEC),
);

// XnAP-Containers

static PROTOCOL_IE_VALUE: TypeDef = TypeDef::new(
    "ProtocolIE-Field.value",
    Kind::OpenType(OpenTypeSpec {
        key: "id",
        lookup: procedures::protocol_ie_type,
    }),
);
static PROTOCOL_IE_FIELD_FIELDS: [Field; 3] = [
    Field::mandatory("id", &PROTOCOL_IE_ID),
    Field::mandatory("criticality", &CRITICALITY),
    Field::mandatory("value", &PROTOCOL_IE_VALUE),
];
static PROTOCOL_IE_FIELD_SPEC: SequenceSpec = SequenceSpec {
    fields: &PROTOCOL_IE_FIELD_FIELDS,
    extensible: false,
    extensions: &[],
};
pub static PROTOCOL_IE_FIELD: TypeDef =
    TypeDef::new("ProtocolIE-Field", Kind::Sequence(&PROTOCOL_IE_FIELD_SPEC));

/// Carries choice extensions, same layout as a single ProtocolIE-Field.
pub static PROTOCOL_IE_SINGLE_CONTAINER: TypeDef = TypeDef::new(
    "ProtocolIE-Single-Container",
    Kind::Sequence(&PROTOCOL_IE_FIELD_SPEC),
);

static PROTOCOL_IE_CONTAINER_SPEC: SequenceOfSpec = SequenceOfSpec {
    item: &PROTOCOL_IE_FIELD,
    size: Size::range(0, MAX_PROTOCOL_IES),
};
pub static PROTOCOL_IE_CONTAINER: TypeDef = TypeDef::new(
    "ProtocolIE-Container",
    Kind::SequenceOf(&PROTOCOL_IE_CONTAINER_SPEC),
);

static PROTOCOL_EXTENSION_VALUE: TypeDef = TypeDef::new(
    "ProtocolExtensionField.extensionValue",
    Kind::OpenType(OpenTypeSpec {
        key: "id",
        lookup: procedures::protocol_extension_type,
    }),
);
static PROTOCOL_EXTENSION_FIELD_FIELDS: [Field; 3] = [
    Field::mandatory("id", &PROTOCOL_IE_ID),
    Field::mandatory("criticality", &CRITICALITY),
    Field::mandatory("extensionValue", &PROTOCOL_EXTENSION_VALUE),
];
static PROTOCOL_EXTENSION_FIELD_SPEC: SequenceSpec = SequenceSpec {
    fields: &PROTOCOL_EXTENSION_FIELD_FIELDS,
    extensible: false,
    extensions: &[],
};
pub static PROTOCOL_EXTENSION_FIELD: TypeDef = TypeDef::new(
    "ProtocolExtensionField",
    Kind::Sequence(&PROTOCOL_EXTENSION_FIELD_SPEC),
);

static PROTOCOL_EXTENSION_CONTAINER_SPEC: SequenceOfSpec = SequenceOfSpec {
    item: &PROTOCOL_EXTENSION_FIELD,
    size: Size::range(1, MAX_PROTOCOL_EXTENSIONS),
};
pub static PROTOCOL_EXTENSION_CONTAINER: TypeDef = TypeDef::new(
    "ProtocolExtensionContainer",
    Kind::SequenceOf(&PROTOCOL_EXTENSION_CONTAINER_SPEC),
);

/// Every elementary procedure message: `SEQUENCE { protocolIEs ProtocolIE-Container, ... }`
pub static PROTOCOL_IES_MESSAGE_FIELDS: [Field; 1] =
    [Field::mandatory("protocolIEs", &PROTOCOL_IE_CONTAINER)];
pub static PROTOCOL_IES_MESSAGE_SPEC: SequenceSpec = SequenceSpec {
    fields: &PROTOCOL_IES_MESSAGE_FIELDS,
    extensible: true,
    extensions: &[],
};

// XnAP-IEs

pub static PLMN_IDENTITY: TypeDef = TypeDef::with_hook(
    "PLMN-Identity",
    Kind::OctetString(Size::fixed(3)),
    hooks::plmn_identity,
);

pub static TRANSPORT_LAYER_ADDRESS: TypeDef = TypeDef::with_hook(
    "TransportLayerAddress",
    Kind::BitString(Size::range(1, 160).ext()),
    hooks::transport_layer_address,
);

pub static NG_RAN_NODE_UE_XNAP_ID: TypeDef = TypeDef::new(
    "NG-RANnodeUEXnAPID",
    Kind::Integer(IntegerSpec {
        constraint: Constraint::new(0, 4294967295),
        names: None,
    }),
);

pub static BIT_RATE: TypeDef = TypeDef::new(
    "BitRate",
    Kind::Integer(IntegerSpec {
        constraint: Constraint::extensible(0, 4000000000000),
        names: None,
    }),
);

// Cause

static CAUSE_RADIO_NETWORK_LAYER_SPEC: EnumeratedSpec = EnumeratedSpec {
    root: &[
        "cell-not-available",
        "handover-desirable-for-radio-reasons",
        "handover-target-not-allowed",
        "invalid-AMF-Set-ID",
        "no-radio-resources-available-in-target-cell",
        "partial-handover",
        "reduce-load-in-serving-cell",
        "resource-optimisation-handover",
        "time-critical-handover",
        "tXnRELOCoverall-expiry",
        "tXnRELOCprep-expiry",
        "unknown-GUAMI-ID",
        "unknown-local-NG-RAN-node-UE-XnAP-ID",
        "inconsistent-remote-NG-RAN-node-UE-XnAP-ID",
        "encryption-and-or-integrity-protection-algorithms-not-supported",
        "not-used-causes-value-1",
        "multiple-PDU-session-ID-instances",
        "unknown-PDU-session-ID",
        "unknown-QoS-Flow-ID",
        "multiple-QoS-Flow-ID-instances",
        "switch-off-ongoing",
        "not-supported-5QI-value",
        "tXnDCoverall-expiry",
        "tXnDCprep-expiry",
        "action-desirable-for-radio-reasons",
        "reduce-load",
        "resource-optimisation",
        "time-critical-action",
        "target-not-allowed",
        "no-radio-resources-available",
        "invalid-QoS-combination",
        "encryption-algorithms-not-supported",
        "procedure-cancelled",
        "rRM-purpose",
        "improve-user-bit-rate",
        "user-inactivity",
        "radio-connection-with-UE-lost",
        "failure-in-the-radio-interface-procedure",
        "bearer-option-not-supported",
        "up-integrity-protection-not-possible",
        "up-confidentiality-protection-not-possible",
        "resources-not-available-for-the-slice-s",
        "ue-max-IP-data-rate-reason",
        "cP-integrity-protection-failure",
        "uP-integrity-protection-failure",
        "slice-not-supported-by-NG-RAN",
        "mN-Mobility",
        "sN-Mobility",
        "count-reaches-max-value",
        "unknown-old-NG-RAN-node-UE-XnAP-ID",
        "pDCP-Overload",
        "drb-id-not-available",
        "unspecified",
    ],
    extensible: true,
    extensions: &[
        "ue-context-id-not-known",
        "non-relocation-of-context",
        "cho-cpc-resources-tobechanged",
        "rSN-not-available-for-the-UP",
        "npn-access-denied",
        "report-characteristics-empty",
        "existing-measurement-ID",
        "measurement-temporarily-not-available",
        "measurement-not-supported-for-the-object",
        "ue-power-saving",
    ],
};
static CAUSE_RADIO_NETWORK_LAYER: TypeDef = TypeDef::new(
    "CauseRadioNetworkLayer",
    Kind::Enumerated(&CAUSE_RADIO_NETWORK_LAYER_SPEC),
);

static CAUSE_TRANSPORT_LAYER_SPEC: EnumeratedSpec = EnumeratedSpec {
    root: &["transport-resource-unavailable", "unspecified"],
    extensible: true,
    extensions: &[],
};
static CAUSE_TRANSPORT_LAYER: TypeDef = TypeDef::new(
    "CauseTransportLayer",
    Kind::Enumerated(&CAUSE_TRANSPORT_LAYER_SPEC),
);

static CAUSE_PROTOCOL_SPEC: EnumeratedSpec = EnumeratedSpec {
    root: &[
        "transfer-syntax-error",
        "abstract-syntax-error-reject",
        "abstract-syntax-error-ignore-and-notify",
        "message-not-compatible-with-receiver-state",
        "semantic-error",
        "abstract-syntax-error-falsely-constructed-message",
        "unspecified",
    ],
    extensible: true,
    extensions: &[],
};
static CAUSE_PROTOCOL: TypeDef =
    TypeDef::new("CauseProtocol", Kind::Enumerated(&CAUSE_PROTOCOL_SPEC));

static CAUSE_MISC_SPEC: EnumeratedSpec = EnumeratedSpec {
    root: &[
        "control-processing-overload",
        "hardware-failure",
        "o-and-M-intervention",
        "not-enough-user-plane-processing-resources",
        "unspecified",
    ],
    extensible: true,
    extensions: &[],
};
static CAUSE_MISC: TypeDef = TypeDef::new("CauseMisc", Kind::Enumerated(&CAUSE_MISC_SPEC));

static CAUSE_ALTERNATIVES: [Alternative; 5] = [
    Alternative::new("radioNetwork", &CAUSE_RADIO_NETWORK_LAYER),
    Alternative::new("transport", &CAUSE_TRANSPORT_LAYER),
    Alternative::new("protocol", &CAUSE_PROTOCOL),
    Alternative::new("misc", &CAUSE_MISC),
    Alternative::new("choice-extension", &PROTOCOL_IE_SINGLE_CONTAINER),
];
static CAUSE_SPEC: ChoiceSpec = ChoiceSpec {
    alternatives: &CAUSE_ALTERNATIVES,
    extensible: false,
    extensions: &[],
};
pub static CAUSE: TypeDef = TypeDef::new("Cause", Kind::Choice(&CAUSE_SPEC));

// CriticalityDiagnostics

static TYPE_OF_ERROR_SPEC: EnumeratedSpec = EnumeratedSpec {
    root: &["not-understood", "missing"],
    extensible: true,
    extensions: &[],
};
static TYPE_OF_ERROR: TypeDef = TypeDef::new("TypeOfError", Kind::Enumerated(&TYPE_OF_ERROR_SPEC));

static CRITICALITY_DIAGNOSTICS_IE_ITEM_FIELDS: [Field; 4] = [
    Field::mandatory("iECriticality", &CRITICALITY),
    Field::mandatory("iE-ID", &PROTOCOL_IE_ID),
    Field::mandatory("typeOfError", &TYPE_OF_ERROR),
    Field::optional("iE-Extensions", &PROTOCOL_EXTENSION_CONTAINER),
];
static CRITICALITY_DIAGNOSTICS_IE_ITEM_SPEC: SequenceSpec = SequenceSpec {
    fields: &CRITICALITY_DIAGNOSTICS_IE_ITEM_FIELDS,
    extensible: true,
    extensions: &[],
};
static CRITICALITY_DIAGNOSTICS_IE_ITEM: TypeDef = TypeDef::new(
    "CriticalityDiagnostics-IE-List.item",
    Kind::Sequence(&CRITICALITY_DIAGNOSTICS_IE_ITEM_SPEC),
);
static CRITICALITY_DIAGNOSTICS_IE_LIST_SPEC: SequenceOfSpec = SequenceOfSpec {
    item: &CRITICALITY_DIAGNOSTICS_IE_ITEM,
    size: Size::range(1, MAX_NR_OF_ERRORS),
};
static CRITICALITY_DIAGNOSTICS_IE_LIST: TypeDef = TypeDef::new(
    "CriticalityDiagnostics-IE-List",
    Kind::SequenceOf(&CRITICALITY_DIAGNOSTICS_IE_LIST_SPEC),
);

static CRITICALITY_DIAGNOSTICS_FIELDS: [Field; 5] = [
    Field::optional("procedureCode", &PROCEDURE_CODE),
    Field::optional("triggeringMessage", &TRIGGERING_MESSAGE),
    Field::optional("procedureCriticality", &CRITICALITY),
    Field::optional("iEsCriticalityDiagnostics", &CRITICALITY_DIAGNOSTICS_IE_LIST),
    Field::optional("iE-Extensions", &PROTOCOL_EXTENSION_CONTAINER),
];
static CRITICALITY_DIAGNOSTICS_SPEC: SequenceSpec = SequenceSpec {
    fields: &CRITICALITY_DIAGNOSTICS_FIELDS,
    extensible: true,
    extensions: &[],
};
pub static CRITICALITY_DIAGNOSTICS: TypeDef = TypeDef::new(
    "CriticalityDiagnostics",
    Kind::Sequence(&CRITICALITY_DIAGNOSTICS_SPEC),
);

// Global NG-RAN node and cell identities

static GNB_ID: TypeDef = TypeDef::new("gnb-ID", Kind::BitString(Size::range(22, 32)));
static GNB_ID_CHOICE_ALTERNATIVES: [Alternative; 2] = [
    Alternative::new("gnb-ID", &GNB_ID),
    Alternative::new("choice-extension", &PROTOCOL_IE_SINGLE_CONTAINER),
];
static GNB_ID_CHOICE_SPEC: ChoiceSpec = ChoiceSpec {
    alternatives: &GNB_ID_CHOICE_ALTERNATIVES,
    extensible: false,
    extensions: &[],
};
static GNB_ID_CHOICE: TypeDef = TypeDef::new("GNB-ID-Choice", Kind::Choice(&GNB_ID_CHOICE_SPEC));

static GLOBAL_GNB_ID_FIELDS: [Field; 3] = [
    Field::mandatory("plmn-id", &PLMN_IDENTITY),
    Field::mandatory("gnb-id", &GNB_ID_CHOICE),
    Field::optional("iE-Extensions", &PROTOCOL_EXTENSION_CONTAINER),
];
static GLOBAL_GNB_ID_SPEC: SequenceSpec = SequenceSpec {
    fields: &GLOBAL_GNB_ID_FIELDS,
    extensible: true,
    extensions: &[],
};
pub static GLOBAL_GNB_ID: TypeDef = TypeDef::new("GlobalgNB-ID", Kind::Sequence(&GLOBAL_GNB_ID_SPEC));

static ENB_ID_MACRO: TypeDef = TypeDef::new("enb-ID-macro", Kind::BitString(Size::fixed(20)));
static ENB_ID_SHORTMACRO: TypeDef =
    TypeDef::new("enb-ID-shortmacro", Kind::BitString(Size::fixed(18)));
static ENB_ID_LONGMACRO: TypeDef =
    TypeDef::new("enb-ID-longmacro", Kind::BitString(Size::fixed(21)));
static ENB_ID_CHOICE_ALTERNATIVES: [Alternative; 4] = [
    Alternative::new("enb-ID-macro", &ENB_ID_MACRO),
    Alternative::new("enb-ID-shortmacro", &ENB_ID_SHORTMACRO),
    Alternative::new("enb-ID-longmacro", &ENB_ID_LONGMACRO),
    Alternative::new("choice-extension", &PROTOCOL_IE_SINGLE_CONTAINER),
];
static ENB_ID_CHOICE_SPEC: ChoiceSpec = ChoiceSpec {
    alternatives: &ENB_ID_CHOICE_ALTERNATIVES,
    extensible: false,
    extensions: &[],
};
static ENB_ID_CHOICE: TypeDef = TypeDef::new("ENB-ID-Choice", Kind::Choice(&ENB_ID_CHOICE_SPEC));

static GLOBAL_NG_ENB_ID_FIELDS: [Field; 3] = [
    Field::mandatory("plmn-id", &PLMN_IDENTITY),
    Field::mandatory("enb-id", &ENB_ID_CHOICE),
    Field::optional("iE-Extensions", &PROTOCOL_EXTENSION_CONTAINER),
];
static GLOBAL_NG_ENB_ID_SPEC: SequenceSpec = SequenceSpec {
    fields: &GLOBAL_NG_ENB_ID_FIELDS,
    extensible: true,
    extensions: &[],
};
pub static GLOBAL_NG_ENB_ID: TypeDef =
    TypeDef::new("GlobalngeNB-ID", Kind::Sequence(&GLOBAL_NG_ENB_ID_SPEC));

static GLOBAL_NG_RAN_NODE_ID_ALTERNATIVES: [Alternative; 3] = [
    Alternative::new("gNB", &GLOBAL_GNB_ID),
    Alternative::new("ng-eNB", &GLOBAL_NG_ENB_ID),
    Alternative::new("choice-extension", &PROTOCOL_IE_SINGLE_CONTAINER),
];
static GLOBAL_NG_RAN_NODE_ID_SPEC: ChoiceSpec = ChoiceSpec {
    alternatives: &GLOBAL_NG_RAN_NODE_ID_ALTERNATIVES,
    extensible: false,
    extensions: &[],
};
pub static GLOBAL_NG_RAN_NODE_ID: TypeDef = TypeDef::new(
    "GlobalNG-RANNode-ID",
    Kind::Choice(&GLOBAL_NG_RAN_NODE_ID_SPEC),
);

/// GlobalNG-RANNode-ID as carried in `id-GlobalNG-RAN-node-ID`, which identifies the sender.
pub static SENDER_GLOBAL_NG_RAN_NODE_ID: TypeDef = TypeDef::with_hook(
    "GlobalNG-RANNode-ID",
    Kind::Choice(&GLOBAL_NG_RAN_NODE_ID_SPEC),
    hooks::sender_global_ng_ran_node_id,
);

static NR_CELL_IDENTITY: TypeDef =
    TypeDef::new("NR-Cell-Identity", Kind::BitString(Size::fixed(36)));
static E_UTRA_CELL_IDENTITY: TypeDef =
    TypeDef::new("E-UTRA-Cell-Identity", Kind::BitString(Size::fixed(28)));

static NG_RAN_CELL_IDENTITY_ALTERNATIVES: [Alternative; 3] = [
    Alternative::new("nr", &NR_CELL_IDENTITY),
    Alternative::new("e-utra", &E_UTRA_CELL_IDENTITY),
    Alternative::new("choice-extension", &PROTOCOL_IE_SINGLE_CONTAINER),
];
static NG_RAN_CELL_IDENTITY_SPEC: ChoiceSpec = ChoiceSpec {
    alternatives: &NG_RAN_CELL_IDENTITY_ALTERNATIVES,
    extensible: false,
    extensions: &[],
};
static NG_RAN_CELL_IDENTITY: TypeDef = TypeDef::new(
    "NG-RAN-Cell-Identity",
    Kind::Choice(&NG_RAN_CELL_IDENTITY_SPEC),
);

static GLOBAL_NG_RAN_CELL_ID_FIELDS: [Field; 3] = [
    Field::mandatory("plmn-id", &PLMN_IDENTITY),
    Field::mandatory("ng-RAN-Cell-id", &NG_RAN_CELL_IDENTITY),
    Field::optional("iE-Extensions", &PROTOCOL_EXTENSION_CONTAINER),
];
static GLOBAL_NG_RAN_CELL_ID_SPEC: SequenceSpec = SequenceSpec {
    fields: &GLOBAL_NG_RAN_CELL_ID_FIELDS,
    extensible: true,
    extensions: &[],
};
pub static GLOBAL_NG_RAN_CELL_ID: TypeDef = TypeDef::new(
    "GlobalNG-RANCell-ID",
    Kind::Sequence(&GLOBAL_NG_RAN_CELL_ID_SPEC),
);

static NR_CGI_FIELDS: [Field; 3] = [
    Field::mandatory("plmn-id", &PLMN_IDENTITY),
    Field::mandatory("nr-CI", &NR_CELL_IDENTITY),
    Field::optional("iE-Extensions", &PROTOCOL_EXTENSION_CONTAINER),
];
static NR_CGI_SPEC: SequenceSpec = SequenceSpec {
    fields: &NR_CGI_FIELDS,
    extensible: true,
    extensions: &[],
};
static NR_CGI: TypeDef = TypeDef::new("NR-CGI", Kind::Sequence(&NR_CGI_SPEC));

static E_UTRA_CGI_FIELDS: [Field; 3] = [
    Field::mandatory("plmn-id", &PLMN_IDENTITY),
    Field::mandatory("e-utra-CI", &E_UTRA_CELL_IDENTITY),
    Field::optional("iE-Extensions", &PROTOCOL_EXTENSION_CONTAINER),
];
static E_UTRA_CGI_SPEC: SequenceSpec = SequenceSpec {
    fields: &E_UTRA_CGI_FIELDS,
    extensible: true,
    extensions: &[],
};
static E_UTRA_CGI: TypeDef = TypeDef::new("E-UTRA-CGI", Kind::Sequence(&E_UTRA_CGI_SPEC));

static TARGET_CGI_ALTERNATIVES: [Alternative; 3] = [
    Alternative::new("nr", &NR_CGI),
    Alternative::new("e-utra", &E_UTRA_CGI),
    Alternative::new("choice-extension", &PROTOCOL_IE_SINGLE_CONTAINER),
];
static TARGET_CGI_SPEC: ChoiceSpec = ChoiceSpec {
    alternatives: &TARGET_CGI_ALTERNATIVES,
    extensible: false,
    extensions: &[],
};
pub static TARGET_CGI: TypeDef = TypeDef::new("Target-CGI", Kind::Choice(&TARGET_CGI_SPEC));

// GUAMI

static AMF_REGION_ID: TypeDef = TypeDef::new("AMF-Region-Identifier", Kind::BitString(Size::fixed(8)));
static AMF_SET_ID: TypeDef = TypeDef::new("AMF-Set-Identifier", Kind::BitString(Size::fixed(10)));
static AMF_POINTER: TypeDef = TypeDef::new("AMF-Pointer", Kind::BitString(Size::fixed(6)));

static GUAMI_FIELDS: [Field; 5] = [
    Field::mandatory("plmn-ID", &PLMN_IDENTITY),
    Field::mandatory("amf-region-id", &AMF_REGION_ID),
    Field::mandatory("amf-set-id", &AMF_SET_ID),
    Field::mandatory("amf-pointer", &AMF_POINTER),
    Field::optional("iE-Extensions", &PROTOCOL_EXTENSION_CONTAINER),
];
static GUAMI_SPEC: SequenceSpec = SequenceSpec {
    fields: &GUAMI_FIELDS,
    extensible: true,
    extensions: &[],
};
pub static GUAMI: TypeDef = TypeDef::new("GUAMI", Kind::Sequence(&GUAMI_SPEC));

// UE related

pub static MASKED_IMEISV: TypeDef = TypeDef::new("MaskedIMEISV", Kind::BitString(Size::fixed(64)));

static PAGING_DRX_SPEC: EnumeratedSpec = EnumeratedSpec {
    root: &["v32", "v64", "v128", "v256"],
    extensible: true,
    extensions: &[],
};
pub static PAGING_DRX: TypeDef = TypeDef::new("PagingDRX", Kind::Enumerated(&PAGING_DRX_SPEC));

static UE_AGGREGATE_MAXIMUM_BIT_RATE_FIELDS: [Field; 3] = [
    Field::mandatory("dl-UE-AMBR", &BIT_RATE),
    Field::mandatory("ul-UE-AMBR", &BIT_RATE),
    Field::optional("iE-Extension", &PROTOCOL_EXTENSION_CONTAINER),
];
static UE_AGGREGATE_MAXIMUM_BIT_RATE_SPEC: SequenceSpec = SequenceSpec {
    fields: &UE_AGGREGATE_MAXIMUM_BIT_RATE_FIELDS,
    extensible: true,
    extensions: &[],
};
pub static UE_AGGREGATE_MAXIMUM_BIT_RATE: TypeDef = TypeDef::new(
    "UEAggregateMaximumBitRate",
    Kind::Sequence(&UE_AGGREGATE_MAXIMUM_BIT_RATE_SPEC),
);

static UE_CONTEXT_KEPT_INDICATOR_SPEC: EnumeratedSpec = EnumeratedSpec {
    root: &["true"],
    extensible: true,
    extensions: &[],
};
pub static UE_CONTEXT_KEPT_INDICATOR: TypeDef = TypeDef::new(
    "UEContextKeptIndicator",
    Kind::Enumerated(&UE_CONTEXT_KEPT_INDICATOR_SPEC),
);

static SECURITY_ALGORITHMS: TypeDef =
    TypeDef::new("SecurityAlgorithms", Kind::BitString(Size::fixed(16).ext()));

static UE_SECURITY_CAPABILITIES_FIELDS: [Field; 5] = [
    Field::mandatory("nr-EncyptionAlgorithms", &SECURITY_ALGORITHMS),
    Field::mandatory("nr-IntegrityProtectionAlgorithms", &SECURITY_ALGORITHMS),
    Field::mandatory("e-utra-EncyptionAlgorithms", &SECURITY_ALGORITHMS),
    Field::mandatory("e-utra-IntegrityProtectionAlgorithms", &SECURITY_ALGORITHMS),
    Field::optional("iE-Extensions", &PROTOCOL_EXTENSION_CONTAINER),
];
static UE_SECURITY_CAPABILITIES_SPEC: SequenceSpec = SequenceSpec {
    fields: &UE_SECURITY_CAPABILITIES_FIELDS,
    extensible: true,
    extensions: &[],
};
pub static UE_SECURITY_CAPABILITIES: TypeDef = TypeDef::new(
    "UESecurityCapabilities",
    Kind::Sequence(&UE_SECURITY_CAPABILITIES_SPEC),
);

static TIME_TO_WAIT_SPEC: EnumeratedSpec = EnumeratedSpec {
    root: &["v1s", "v2s", "v5s", "v10s", "v20s", "v60s"],
    extensible: true,
    extensions: &[],
};
pub static TIME_TO_WAIT: TypeDef = TypeDef::new("TimeToWait", Kind::Enumerated(&TIME_TO_WAIT_SPEC));

// RRC containers, octets handed to container dissectors by the hooks

pub static MN_TO_SN_CONTAINER: TypeDef = TypeDef::with_hook(
    "MN-to-SN-Container",
    Kind::OctetString(Size::UNBOUNDED),
    hooks::mn_to_sn_container,
);

pub static SN_TO_MN_CONTAINER: TypeDef = TypeDef::with_hook(
    "SN-to-MN-Container",
    Kind::OctetString(Size::UNBOUNDED),
    hooks::sn_to_mn_container,
);

pub static TARGET2SOURCE_NG_RAN_NODE_TRANSP_CONTAINER: TypeDef = TypeDef::with_hook(
    "Target2SourceNG-RANnodeTranspContainer",
    Kind::OctetString(Size::UNBOUNDED),
    hooks::target2source_container,
);

// Supported TAs

static TAC: TypeDef = TypeDef::new("TAC", Kind::OctetString(Size::fixed(3)));
static SST: TypeDef = TypeDef::new("sst", Kind::OctetString(Size::fixed(1)));
static SD: TypeDef = TypeDef::new("sd", Kind::OctetString(Size::fixed(3)));

static S_NSSAI_FIELDS: [Field; 3] = [
    Field::mandatory("sst", &SST),
    Field::optional("sd", &SD),
    Field::optional("iE-Extensions", &PROTOCOL_EXTENSION_CONTAINER),
];
static S_NSSAI_SPEC: SequenceSpec = SequenceSpec {
    fields: &S_NSSAI_FIELDS,
    extensible: true,
    extensions: &[],
};
pub static S_NSSAI: TypeDef = TypeDef::new("S-NSSAI", Kind::Sequence(&S_NSSAI_SPEC));

static SLICE_SUPPORT_LIST_SPEC: SequenceOfSpec = SequenceOfSpec {
    item: &S_NSSAI,
    size: Size::range(1, MAX_NO_OF_SLICE_ITEMS),
};
static SLICE_SUPPORT_LIST: TypeDef =
    TypeDef::new("SliceSupport-List", Kind::SequenceOf(&SLICE_SUPPORT_LIST_SPEC));

static BROADCAST_PLMN_IN_TAI_SUPPORT_ITEM_FIELDS: [Field; 3] = [
    Field::mandatory("plmn-id", &PLMN_IDENTITY),
    Field::mandatory("tAISliceSupport-List", &SLICE_SUPPORT_LIST),
    Field::optional("iE-Extension", &PROTOCOL_EXTENSION_CONTAINER),
];
static BROADCAST_PLMN_IN_TAI_SUPPORT_ITEM_SPEC: SequenceSpec = SequenceSpec {
    fields: &BROADCAST_PLMN_IN_TAI_SUPPORT_ITEM_FIELDS,
    extensible: true,
    extensions: &[],
};
static BROADCAST_PLMN_IN_TAI_SUPPORT_ITEM: TypeDef = TypeDef::new(
    "BroadcastPLMNinTAISupport-Item",
    Kind::Sequence(&BROADCAST_PLMN_IN_TAI_SUPPORT_ITEM_SPEC),
);
static BROADCAST_PLMNS_SPEC: SequenceOfSpec = SequenceOfSpec {
    item: &BROADCAST_PLMN_IN_TAI_SUPPORT_ITEM,
    size: Size::range(1, MAX_NO_OF_SUPPORTED_PLMNS),
};
static BROADCAST_PLMNS: TypeDef =
    TypeDef::new("broadcastPLMNs", Kind::SequenceOf(&BROADCAST_PLMNS_SPEC));

static TAI_SUPPORT_ITEM_FIELDS: [Field; 3] = [
    Field::mandatory("tac", &TAC),
    Field::mandatory("broadcastPLMNs", &BROADCAST_PLMNS),
    Field::optional("iE-Extensions", &PROTOCOL_EXTENSION_CONTAINER),
];
static TAI_SUPPORT_ITEM_SPEC: SequenceSpec = SequenceSpec {
    fields: &TAI_SUPPORT_ITEM_FIELDS,
    extensible: true,
    extensions: &[],
};
static TAI_SUPPORT_ITEM: TypeDef =
    TypeDef::new("TAISupport-Item", Kind::Sequence(&TAI_SUPPORT_ITEM_SPEC));
static TAI_SUPPORT_LIST_SPEC: SequenceOfSpec = SequenceOfSpec {
    item: &TAI_SUPPORT_ITEM,
    size: Size::range(1, MAX_NO_OF_SUPPORTED_TACS),
};
pub static TAI_SUPPORT_LIST: TypeDef =
    TypeDef::new("TAISupport-List", Kind::SequenceOf(&TAI_SUPPORT_LIST_SPEC));

// TNL associations

static CP_TRANSPORT_LAYER_INFORMATION_ALTERNATIVES: [Alternative; 2] = [
    Alternative::new("endpointIPAddress", &TRANSPORT_LAYER_ADDRESS),
    Alternative::new("choice-extension", &PROTOCOL_IE_SINGLE_CONTAINER),
];
static CP_TRANSPORT_LAYER_INFORMATION_SPEC: ChoiceSpec = ChoiceSpec {
    alternatives: &CP_TRANSPORT_LAYER_INFORMATION_ALTERNATIVES,
    extensible: false,
    extensions: &[],
};
pub static CP_TRANSPORT_LAYER_INFORMATION: TypeDef = TypeDef::new(
    "CPTransportLayerInformation",
    Kind::Choice(&CP_TRANSPORT_LAYER_INFORMATION_SPEC),
);

static TNL_ASSOCIATION_USAGE_SPEC: EnumeratedSpec = EnumeratedSpec {
    root: &["ue", "non-ue", "both"],
    extensible: true,
    extensions: &[],
};
static TNL_ASSOCIATION_USAGE: TypeDef = TypeDef::new(
    "TNLAssociationUsage",
    Kind::Enumerated(&TNL_ASSOCIATION_USAGE_SPEC),
);

static TNLA_TO_ADD_ITEM_FIELDS: [Field; 3] = [
    Field::mandatory(
        "tNLAssociationTransportLayerAddress",
        &CP_TRANSPORT_LAYER_INFORMATION,
    ),
    Field::mandatory("tNLAssociationUsage", &TNL_ASSOCIATION_USAGE),
    Field::optional("iE-Extensions", &PROTOCOL_EXTENSION_CONTAINER),
];
static TNLA_TO_ADD_ITEM_SPEC: SequenceSpec = SequenceSpec {
    fields: &TNLA_TO_ADD_ITEM_FIELDS,
    extensible: true,
    extensions: &[],
};
static TNLA_TO_ADD_ITEM: TypeDef =
    TypeDef::new("TNLA-To-Add-Item", Kind::Sequence(&TNLA_TO_ADD_ITEM_SPEC));
static TNLA_TO_ADD_LIST_SPEC: SequenceOfSpec = SequenceOfSpec {
    item: &TNLA_TO_ADD_ITEM,
    size: Size::range(1, MAX_NO_OF_TNL_ASSOCIATIONS),
};
pub static TNLA_TO_ADD_LIST: TypeDef =
    TypeDef::new("TNLA-To-Add-List", Kind::SequenceOf(&TNLA_TO_ADD_LIST_SPEC));

// TNLA-To-Remove-Item and TNLA-Setup-Item share their layout.
static TNLA_ADDRESS_ITEM_FIELDS: [Field; 2] = [
    Field::mandatory(
        "tNLAssociationTransportLayerAddress",
        &CP_TRANSPORT_LAYER_INFORMATION,
    ),
    Field::optional("iE-Extensions", &PROTOCOL_EXTENSION_CONTAINER),
];
static TNLA_ADDRESS_ITEM_SPEC: SequenceSpec = SequenceSpec {
    fields: &TNLA_ADDRESS_ITEM_FIELDS,
    extensible: true,
    extensions: &[],
};

static TNLA_TO_REMOVE_ITEM: TypeDef =
    TypeDef::new("TNLA-To-Remove-Item", Kind::Sequence(&TNLA_ADDRESS_ITEM_SPEC));
static TNLA_TO_REMOVE_LIST_SPEC: SequenceOfSpec = SequenceOfSpec {
    item: &TNLA_TO_REMOVE_ITEM,
    size: Size::range(1, MAX_NO_OF_TNL_ASSOCIATIONS),
};
pub static TNLA_TO_REMOVE_LIST: TypeDef = TypeDef::new(
    "TNLA-To-Remove-List",
    Kind::SequenceOf(&TNLA_TO_REMOVE_LIST_SPEC),
);

static TNLA_SETUP_ITEM: TypeDef =
    TypeDef::new("TNLA-Setup-Item", Kind::Sequence(&TNLA_ADDRESS_ITEM_SPEC));
static TNLA_SETUP_LIST_SPEC: SequenceOfSpec = SequenceOfSpec {
    item: &TNLA_SETUP_ITEM,
    size: Size::range(1, MAX_NO_OF_TNL_ASSOCIATIONS),
};
pub static TNLA_SETUP_LIST: TypeDef =
    TypeDef::new("TNLA-Setup-List", Kind::SequenceOf(&TNLA_SETUP_LIST_SPEC));

static TNLA_FAILED_TO_SETUP_ITEM_FIELDS: [Field; 3] = [
    Field::mandatory(
        "tNLAssociationTransportLayerAddress",
        &CP_TRANSPORT_LAYER_INFORMATION,
    ),
    Field::mandatory("cause", &CAUSE),
    Field::optional("iE-Extensions", &PROTOCOL_EXTENSION_CONTAINER),
];
static TNLA_FAILED_TO_SETUP_ITEM_SPEC: SequenceSpec = SequenceSpec {
    fields: &TNLA_FAILED_TO_SETUP_ITEM_FIELDS,
    extensible: true,
    extensions: &[],
};
static TNLA_FAILED_TO_SETUP_ITEM: TypeDef = TypeDef::new(
    "TNLA-Failed-To-Setup-Item",
    Kind::Sequence(&TNLA_FAILED_TO_SETUP_ITEM_SPEC),
);
static TNLA_FAILED_TO_SETUP_LIST_SPEC: SequenceOfSpec = SequenceOfSpec {
    item: &TNLA_FAILED_TO_SETUP_ITEM,
    size: Size::range(1, MAX_NO_OF_TNL_ASSOCIATIONS),
};
pub static TNLA_FAILED_TO_SETUP_LIST: TypeDef = TypeDef::new(
    "TNLA-Failed-To-Setup-List",
    Kind::SequenceOf(&TNLA_FAILED_TO_SETUP_LIST_SPEC),
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::per::value::{Member, Value};
    use crate::per::walk::{decode, encode, DecodeContext};

    #[test]
    fn cause_transport_unspecified() {
        let bytes = [0x28];
        let cause = decode(&bytes, &CAUSE, &mut DecodeContext::new()).unwrap();
        let choice = cause.as_choice().unwrap();
        assert_eq!(choice.name, "transport");
        assert_eq!(
            choice.value,
            Value::Enumerated {
                index: 1,
                extension: false,
                name: Some("unspecified")
            }
        );
        assert_eq!(encode(&CAUSE, &cause).unwrap(), bytes.to_vec());
    }

    #[test]
    fn cause_radio_network_extension_value() {
        // radioNetwork (000), ext bit 1, normally small 0: ue-context-id-not-known
        let bytes = [0b0001_0000, 0b0000_0000];
        let cause = decode(&bytes, &CAUSE, &mut DecodeContext::new()).unwrap();
        let choice = cause.as_choice().unwrap();
        assert_eq!(
            choice.value,
            Value::Enumerated {
                index: 0,
                extension: true,
                name: Some("ue-context-id-not-known")
            }
        );
    }

    #[test]
    fn ue_ambr_uses_length_prefixed_integers() {
        let ambr = Value::Sequence(vec![
            Member::new("dl-UE-AMBR", Value::Integer(1_000_000_000)),
            Member::new("ul-UE-AMBR", Value::Integer(500)),
        ]);
        let bytes = encode(&UE_AGGREGATE_MAXIMUM_BIT_RATE, &ambr).unwrap();
        let decoded = decode(&bytes, &UE_AGGREGATE_MAXIMUM_BIT_RATE, &mut DecodeContext::new())
            .unwrap();
        assert_eq!(decoded, ambr);
    }

    #[test]
    fn masked_imeisv_is_aligned() {
        let bytes = hex::decode("0123456789abcdef").unwrap();
        let value = decode(&bytes, &MASKED_IMEISV, &mut DecodeContext::new()).unwrap();
        assert_eq!(value.as_bits().map(|b| b.len()), Some(64));
    }
}
