//! User preferences of the XnAP dissector.

use std::sync::RwLock;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

use super::constants::XNAP_DEFAULT_SCTP_PORT;

/// How a `Target2SourceNG-RANnodeTranspContainer` is interpreted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetNgRanContainerAs {
    /// From the node type the sender announced in Xn Setup.
    #[default]
    Automatic,
    Gnb,
    NgEnb,
}

/// Which LTE RRC flavor is used for ng-eNB containers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LteContainerAs {
    #[default]
    Legacy,
    NbIot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub sctp_port: u16,
    pub target_ng_ran_container_as: TargetNgRanContainerAs,
    pub lte_container_as: LteContainerAs,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            sctp_port: XNAP_DEFAULT_SCTP_PORT,
            target_ng_ran_container_as: TargetNgRanContainerAs::default(),
            lte_container_as: LteContainerAs::default(),
        }
    }
}

impl Preferences {
    /// Parse preferences from JSON, absent fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::ParseError(format!("preferences: {}", e)))
    }
}

lazy_static! {
    static ref PREFERENCES: RwLock<Preferences> = RwLock::new(Preferences::default());
}

/// Current preferences.
pub fn preferences() -> Preferences {
    PREFERENCES.read().unwrap().clone()
}

/// Replace the preferences, returning the previous ones.
pub(crate) fn replace(prefs: Preferences) -> Preferences {
    std::mem::replace(&mut *PREFERENCES.write().unwrap(), prefs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.sctp_port, 38422);
        assert_eq!(
            prefs.target_ng_ran_container_as,
            TargetNgRanContainerAs::Automatic
        );
        assert_eq!(prefs.lte_container_as, LteContainerAs::Legacy);
    }

    #[test]
    fn from_json_partial() {
        let prefs =
            Preferences::from_json(r#"{"target_ng_ran_container_as": "ng_enb", "lte_container_as": "nb_iot"}"#)
                .unwrap();
        assert_eq!(prefs.sctp_port, XNAP_DEFAULT_SCTP_PORT);
        assert_eq!(prefs.target_ng_ran_container_as, TargetNgRanContainerAs::NgEnb);
        assert_eq!(prefs.lte_container_as, LteContainerAs::NbIot);

        let prefs = Preferences::from_json(r#"{"sctp_port": 36422}"#).unwrap();
        assert_eq!(prefs.sctp_port, 36422);
    }

    #[test]
    fn from_json_invalid() {
        assert!(matches!(
            Preferences::from_json(r#"{"lte_container_as": "nb-iot"}"#),
            Err(Error::ParseError(_))
        ));
        assert!(Preferences::from_json("{").is_err());
    }
}
