//! XnAP constants (3GPP TS 38.423)

/// SCTP Payload Protocol Identifier of XnAP.
pub const XNAP_PPID: u32 = 61;

/// SCTP port XnAP is bound to unless configured otherwise.
pub const XNAP_DEFAULT_SCTP_PORT: u16 = 38422;

pub const MAX_PROTOCOL_IES: usize = 65535;
pub const MAX_PROTOCOL_EXTENSIONS: usize = 65535;
pub const MAX_PRIVATE_IES: usize = 65535;
pub const MAX_NO_OF_SUPPORTED_TACS: usize = 256;
pub const MAX_NO_OF_SUPPORTED_PLMNS: usize = 12;
pub const MAX_NO_OF_SLICE_ITEMS: usize = 1024;
pub const MAX_NO_OF_TNL_ASSOCIATIONS: usize = 32;
pub const MAX_NR_OF_ERRORS: usize = 256;

// Procedure codes
pub const ID_HANDOVER_PREPARATION: u8 = 0;
pub const ID_SN_STATUS_TRANSFER: u8 = 1;
pub const ID_HANDOVER_CANCEL: u8 = 2;
pub const ID_RETRIEVE_UE_CONTEXT: u8 = 3;
pub const ID_RAN_PAGING: u8 = 4;
pub const ID_XNU_ADDRESS_INDICATION: u8 = 5;
pub const ID_UE_CONTEXT_RELEASE: u8 = 6;
pub const ID_SNG_RAN_NODE_ADDITION_PREPARATION: u8 = 7;
pub const ID_SNG_RAN_NODE_RECONFIGURATION_COMPLETION: u8 = 8;
pub const ID_MNG_RAN_NODE_INITIATED_SNG_RAN_NODE_MODIFICATION_PREPARATION: u8 = 9;
pub const ID_SNG_RAN_NODE_INITIATED_SNG_RAN_NODE_MODIFICATION_PREPARATION: u8 = 10;
pub const ID_MNG_RAN_NODE_INITIATED_SNG_RAN_NODE_RELEASE: u8 = 11;
pub const ID_SNG_RAN_NODE_INITIATED_SNG_RAN_NODE_RELEASE: u8 = 12;
pub const ID_SNG_RAN_NODE_COUNTER_CHECK: u8 = 13;
pub const ID_SNG_RAN_NODE_CHANGE: u8 = 14;
pub const ID_RRC_TRANSFER: u8 = 15;
pub const ID_XN_REMOVAL: u8 = 16;
pub const ID_XN_SETUP: u8 = 17;
pub const ID_NG_RAN_NODE_CONFIGURATION_UPDATE: u8 = 18;
pub const ID_CELL_ACTIVATION: u8 = 19;
pub const ID_RESET: u8 = 20;
pub const ID_ERROR_INDICATION: u8 = 21;
pub const ID_PRIVATE_MESSAGE: u8 = 22;
pub const ID_NOTIFICATION_CONTROL: u8 = 23;
pub const ID_ACTIVITY_NOTIFICATION: u8 = 24;
pub const ID_E_UTRA_NR_CELL_RESOURCE_COORDINATION: u8 = 25;
pub const ID_SECONDARY_RAT_DATA_USAGE_REPORT: u8 = 26;
pub const ID_DEACTIVATE_TRACE: u8 = 27;
pub const ID_TRACE_START: u8 = 28;
pub const ID_HANDOVER_SUCCESS: u8 = 29;
pub const ID_CONDITIONAL_HANDOVER_CANCEL: u8 = 30;
pub const ID_EARLY_STATUS_TRANSFER: u8 = 31;
pub const ID_FAILURE_INDICATION: u8 = 32;
pub const ID_HANDOVER_REPORT: u8 = 33;
pub const ID_RESOURCE_STATUS_REPORTING_INITIATION: u8 = 34;
pub const ID_RESOURCE_STATUS_REPORTING: u8 = 35;
pub const ID_MOBILITY_SETTINGS_CHANGE: u8 = 36;
pub const ID_ACCESS_AND_MOBILITY_INDICATION: u8 = 37;

pub const PROCEDURE_CODE_NAMES: [&str; 38] = [
    "id-handoverPreparation",
    "id-sNStatusTransfer",
    "id-handoverCancel",
    "id-retrieveUEContext",
    "id-rANPaging",
    "id-xnUAddressIndication",
    "id-uEContextRelease",
    "id-sNGRANnodeAdditionPreparation",
    "id-sNGRANnodeReconfigurationCompletion",
    "id-mNGRANnodeinitiatedSNGRANnodeModificationPreparation",
    "id-sNGRANnodeinitiatedSNGRANnodeModificationPreparation",
    "id-mNGRANnodeinitiatedSNGRANnodeRelease",
    "id-sNGRANnodeinitiatedSNGRANnodeRelease",
    "id-sNGRANnodeCounterCheck",
    "id-sNGRANnodeChange",
    "id-rRCTransfer",
    "id-xnRemoval",
    "id-xnSetup",
    "id-nGRANnodeConfigurationUpdate",
    "id-cellActivation",
    "id-reset",
    "id-errorIndication",
    "id-privateMessage",
    "id-notificationControl",
    "id-activityNotification",
    "id-e-UTRA-NR-CellResourceCoordination",
    "id-secondaryRATDataUsageReport",
    "id-deactivateTrace",
    "id-traceStart",
    "id-handoverSuccess",
    "id-conditionalHandoverCancel",
    "id-earlyStatusTransfer",
    "id-failureIndication",
    "id-handoverReport",
    "id-resourceStatusReportingInitiation",
    "id-resourceStatusReporting",
    "id-mobilitySettingsChange",
    "id-accessAndMobilityIndication",
];

/// Name of a procedure code defined in TS 38.423.
pub fn procedure_code_name(code: i64) -> Option<&'static str> {
    usize::try_from(code)
        .ok()
        .and_then(|c| PROCEDURE_CODE_NAMES.get(c))
        .copied()
}

// Protocol IE ids, only the ones referred to in code.
pub const ID_CAUSE: u16 = 7;
pub const ID_CRITICALITY_DIAGNOSTICS: u16 = 10;
pub const ID_GLOBAL_NG_RAN_NODE_ID: u16 = 14;
pub const ID_GUAMI: u16 = 15;
pub const ID_MASKED_IMEISV: u16 = 22;
pub const ID_M_NG_RAN_NODE_UE_XNAP_ID: u16 = 23;
pub const ID_MN_TO_SN_CONTAINER: u16 = 24;
pub const ID_NEW_NG_RAN_NODE_UE_XNAP_ID: u16 = 27;
pub const ID_OLD_NG_RAN_NODE_UE_XNAP_ID: u16 = 29;
pub const ID_PAGING_DRX: u16 = 31;
pub const ID_PCELL_ID: u16 = 32;
pub const ID_SELECTED_PLMN: u16 = 64;
pub const ID_S_NG_RAN_NODE_UE_AMBR: u16 = 70;
pub const ID_S_NG_RAN_NODE_UE_XNAP_ID: u16 = 71;
pub const ID_SN_TO_MN_CONTAINER: u16 = 72;
pub const ID_SOURCE_NG_RAN_NODE_UE_XNAP_ID: u16 = 73;
pub const ID_TAI_SUPPORT_LIST: u16 = 75;
pub const ID_TIME_TO_WAIT: u16 = 76;
pub const ID_TARGET2SOURCE_NG_RAN_NODE_TRANSP_CONTAINER: u16 = 77;
pub const ID_TARGET_CELL_GLOBAL_ID: u16 = 78;
pub const ID_TARGET_NG_RAN_NODE_UE_XNAP_ID: u16 = 79;
pub const ID_TARGET_S_NG_RAN_NODE_ID: u16 = 80;
pub const ID_UE_CONTEXT_KEPT_INDICATOR: u16 = 86;
pub const ID_UE_SECURITY_CAPABILITIES: u16 = 91;
pub const ID_TNLA_TO_ADD_LIST: u16 = 99;
pub const ID_TNLA_TO_REMOVE_LIST: u16 = 101;
pub const ID_TNLA_SETUP_LIST: u16 = 102;
pub const ID_TNLA_FAILED_TO_SETUP_LIST: u16 = 103;

pub const PROTOCOL_IE_NAMES: [&str; 106] = [
    "id-ActivatedServedCells",
    "id-ActivationIDforCellActivation",
    "id-admittedSplitSRB",
    "id-admittedSplitSRBrelease",
    "id-AMF-Region-Information",
    "id-AssistanceDataForRANPaging",
    "id-BearersSubjectToCounterCheck",
    "id-Cause",
    "id-cellAssistanceInfo-NR",
    "id-ConfigurationUpdateInitiatingNodeChoice",
    "id-CriticalityDiagnostics",
    "id-XnUAddressInfoperPDUSessionList",
    "id-DRBsSubjectToStatusTransfer-List",
    "id-ExpectedUEBehaviour",
    "id-GlobalNG-RAN-node-ID",
    "id-GUAMI",
    "id-indexToRatFrequSelectionPriority",
    "id-initiatingNodeType-ResourceCoordRequest",
    "id-List-of-served-cells-E-UTRA",
    "id-List-of-served-cells-NR",
    "id-LocationReportingInformation",
    "id-MAC-I",
    "id-MaskedIMEISV",
    "id-M-NG-RANnodeUEXnAPID",
    "id-MN-to-SN-Container",
    "id-MobilityRestrictionList",
    "id-new-NG-RAN-Cell-Identity",
    "id-newNG-RANnodeUEXnAPID",
    "id-UEReportRRCTransfer",
    "id-oldNG-RANnodeUEXnAPID",
    "id-OldtoNewNG-RANnodeResumeContainer",
    "id-PagingDRX",
    "id-PCellID",
    "id-PDCPChangeIndication",
    "id-PDUSessionAdmittedAddedAddReqAck",
    "id-PDUSessionAdmittedModSNModConfirm",
    "id-PDUSessionAdmitted-SNModResponse",
    "id-PDUSessionNotAdmittedAddReqAck",
    "id-PDUSessionNotAdmitted-SNModResponse",
    "id-PDUSessionReleasedList-RelConf",
    "id-PDUSessionReleasedSNModConfirm",
    "id-PDUSessionResourcesActivityNotifyList",
    "id-PDUSessionResourcesAdmitted-List",
    "id-PDUSessionResourcesNotAdmitted-List",
    "id-PDUSessionResourcesNotifyList",
    "id-PDUSession-SNChangeConfirm-List",
    "id-PDUSession-SNChangeRequired-List",
    "id-PDUSessionToBeAddedAddReq",
    "id-PDUSessionToBeModifiedSNModRequired",
    "id-PDUSessionToBeReleasedList-RelRqd",
    "id-PDUSessionToBeReleased-RelReq",
    "id-PDUSessionToBeReleasedSNModRequired",
    "id-RANPagingArea",
    "id-PagingPriority",
    "id-requestedSplitSRB",
    "id-requestedSplitSRBrelease",
    "id-ResetRequestTypeInfo",
    "id-ResetResponseTypeInfo",
    "id-RespondingNodeTypeConfigUpdateAck",
    "id-respondingNodeType-ResourceCoordResponse",
    "id-ResponseInfo-ReconfCompl",
    "id-RRCConfigIndication",
    "id-RRCResumeCause",
    "id-SCGConfigurationQuery",
    "id-selectedPLMN",
    "id-ServedCellsToActivate",
    "id-servedCellsToUpdate-E-UTRA",
    "id-ServedCellsToUpdateInitiatingNodeChoice",
    "id-servedCellsToUpdate-NR",
    "id-s-ng-RANnode-SecurityKey",
    "id-S-NG-RANnodeUE-AMBR",
    "id-S-NG-RANnodeUEXnAPID",
    "id-SN-to-MN-Container",
    "id-sourceNG-RANnodeUEXnAPID",
    "id-SplitSRB-RRCTransfer",
    "id-TAISupport-list",
    "id-TimeToWait",
    "id-Target2SourceNG-RANnodeTranspContainer",
    "id-targetCellGlobalID",
    "id-targetNG-RANnodeUEXnAPID",
    "id-target-S-NG-RANnodeID",
    "id-TraceActivation",
    "id-UEContextID",
    "id-UEContextInfoHORequest",
    "id-UEContextInfoRetrUECtxtResp",
    "id-UEContextInfo-SNModRequest",
    "id-UEContextKeptIndicator",
    "id-UEContextRefAtSN-HORequest",
    "id-UEHistoryInformation",
    "id-UEIdentityIndexValue",
    "id-UERANPagingIdentity",
    "id-UESecurityCapabilities",
    "id-UserPlaneTrafficActivityReport",
    "id-XnRemovalThreshold",
    "id-DesiredActNotificationLevel",
    "id-AvailableDRBIDs",
    "id-AdditionalDRBIDs",
    "id-SpareDRBIDs",
    "id-RequiredNumberOfDRBIDs",
    "id-TNLA-To-Add-List",
    "id-TNLA-To-Update-List",
    "id-TNLA-To-Remove-List",
    "id-TNLA-Setup-List",
    "id-TNLA-Failed-To-Setup-List",
    "id-PDUSessionToBeReleased-RelReqAck",
    "id-S-NG-RANnodeMaxIPDataRate-UL",
];

/// Name of a protocol IE id defined in TS 38.423.
pub fn protocol_ie_id_name(id: i64) -> Option<&'static str> {
    usize::try_from(id)
        .ok()
        .and_then(|i| PROTOCOL_IE_NAMES.get(i))
        .copied()
}
