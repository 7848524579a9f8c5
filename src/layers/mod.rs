//! Dissectors for the layers of an XnAP packet
//!
//! Link and network layers lead to [`sctp`], which hands the user data of DATA chunks to
//! [`xnap`].

pub mod ethernet;
pub mod ipv4;
pub mod ipv6;
pub mod linux_sll;
pub mod sctp;
pub mod xnap;

include!(concat!(env!("OUT_DIR"), "/register_defaults.rs"));
