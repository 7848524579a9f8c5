//! Dissect XnAP from a capture file (or a live device) and print each packet as Json.

use clap::Parser;
use pcap::{Activated, Capture, Device};

use xnap_dissect::layers::xnap;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Capture file to read, a live device is used when absent.
    #[arg(short, long)]
    file: Option<String>,

    /// XnAP preferences as Json, e.g. `{"sctp_port": 36422}`.
    #[arg(short, long)]
    preferences: Option<String>,

    /// Print packets without an XnAP layer too.
    #[arg(short, long)]
    all: bool,
}

fn dissect<T: Activated + ?Sized>(
    mut cap: Capture<T>,
    all: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let encap = cap.get_datalink().0;

    while let Ok(packet) = cap.next_packet() {
        match xnap_dissect::Packet::from_bytes(packet.data, encap) {
            Ok(mut p) => {
                p.meta.timestamp.secs = packet.header.ts.tv_sec as i64;
                p.meta.timestamp.nsecs = packet.header.ts.tv_usec as i64 * 1000;
                p.meta.len = packet.header.len as u16;

                let json = serde_json::to_value(&p)?;
                if all || json.to_string().contains("\"xnap\"") {
                    println!("{}", serde_json::to_string_pretty(&json)?);
                }
            }
            Err(e) => {
                eprintln!("Err: {:?}, data: {:?}", e, hex::encode(packet.data));
            }
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(json) = cli.preferences {
        xnap::set_preferences(xnap::Preferences::from_json(&json)?)?;
    }

    // `register_defaults` need to be called to setup decoders.
    xnap_dissect::register_defaults()?;

    match cli.file {
        Some(file) => dissect(Capture::from_file(file)?, cli.all),
        None => {
            let device = Device::lookup()?.ok_or("no device available")?;
            eprintln!("Using device: {}", device.name);
            let cap = Capture::from_device(device)?.immediate_mode(true).open()?;
            dissect(cap, cli.all)
        }
    }
}
