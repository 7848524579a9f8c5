//! Dump an Xn Setup Request over Ethernet/IPv4/SCTP as Json.

fn main() {
    let _ = xnap_dissect::register_defaults();

    let frame = hex::decode(concat!(
        "0200000000020200000000010800",
        "4500004400010000408400000a0000010a000002",
        "961696160000000100000000",
        "0003002300000001000000000000003d",
        "0011000f000001000e00080002f8390012345400"
    ))
    .unwrap();
    let p = xnap_dissect::Packet::from_bytes(&frame, xnap_dissect::ENCAP_TYPE_ETH);

    println!("{}", serde_json::to_string_pretty(&p.unwrap()).unwrap());
}
