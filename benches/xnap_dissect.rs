use criterion::{criterion_group, criterion_main, Criterion};

use xnap_dissect::layers::xnap::procedures::XNAP_PDU;
use xnap_dissect::per::{self, DecodeContext};
use xnap_dissect::register_defaults;
use xnap_dissect::Packet;
use xnap_dissect::ENCAP_TYPE_ETH;

pub fn xn_setup_packet_from_bytes(c: &mut Criterion) {
    let _ = register_defaults();

    let bytes = hex::decode(concat!(
        "0200000000020200000000010800",
        "4500004400010000408400000a0000010a000002",
        "961696160000000100000000",
        "0003002300000001000000000000003d",
        "0011000f000001000e00080002f8390012345400"
    ))
    .unwrap();

    c.bench_function("Parse_Ethernet_IPv4_SCTP_XnAP", |b| {
        b.iter(|| Packet::from_bytes(&bytes, ENCAP_TYPE_ETH))
    });
}

pub fn error_indication_pdu(c: &mut Criterion) {
    let _ = register_defaults();

    let bytes = hex::decode("001540080000010007400128").unwrap();

    c.bench_function("Decode_XnAP_ErrorIndication", |b| {
        b.iter(|| per::decode(&bytes, &XNAP_PDU, &mut DecodeContext::new()))
    });

    let value = per::decode(&bytes, &XNAP_PDU, &mut DecodeContext::new()).unwrap();
    c.bench_function("Encode_XnAP_ErrorIndication", |b| {
        b.iter(|| per::encode(&XNAP_PDU, &value))
    });
}

criterion_group!(xnap, xn_setup_packet_from_bytes, error_indication_pdu);
criterion_main!(xnap);
