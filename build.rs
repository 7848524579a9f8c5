use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

// Writes `$OUT_DIR/register_defaults.rs`, included by `src/layers/mod.rs`.
//
// Every file below `src/layers` with a top level `register_defaults` function contributes one
// call to the generated `layers::register_defaults`. The call path follows the file path, so
// `xnap/mod.rs` becomes `xnap::register_defaults()` and `sctp.rs` becomes
// `sctp::register_defaults()`.
fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=src/layers");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").map_err(other)?;
    let layers_dir = PathBuf::from(manifest_dir).join("src").join("layers");

    let mut calls = Vec::new();
    for entry in walkdir::WalkDir::new(&layers_dir).sort_by_file_name() {
        let entry = entry.map_err(other)?;
        if !entry.file_type().is_file() || !defines_register_defaults(entry.path())? {
            continue;
        }
        let relative = entry.path().strip_prefix(&layers_dir).map_err(other)?;
        calls.push(format!(
            "{}register_defaults()?;",
            module_prefix(relative)
        ));
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").map_err(other)?);
    let generated = out_dir.join("register_defaults.rs");
    fs::write(&generated, render(&calls))?;

    // formatting only helps reading the generated file
    let _ = std::process::Command::new("rustfmt")
        .arg(&generated)
        .output();

    Ok(())
}

fn other<E: std::fmt::Display>(e: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e.to_string())
}

fn defines_register_defaults(path: &Path) -> io::Result<bool> {
    let source = fs::read_to_string(path)?;
    let file = syn::parse_file(&source)
        .map_err(|e| other(format!("{}: {}", path.display(), e)))?;

    Ok(file.items.iter().any(|item| match item {
        syn::Item::Fn(f) => f.sig.ident == "register_defaults",
        _ => false,
    }))
}

// `ethernet/mod.rs` -> `ethernet::`, `linux_sll.rs` -> `linux_sll::`
fn module_prefix(relative: &Path) -> String {
    let mut prefix = String::new();
    for component in relative.iter() {
        let name = component.to_string_lossy();
        if name == "mod.rs" {
            continue;
        }
        prefix.push_str(name.trim_end_matches(".rs"));
        prefix.push_str("::");
    }
    prefix
}

fn render(calls: &[String]) -> String {
    format!(
        r#"
use std::sync::Once;

static INIT: Once = Once::new();

/// Register the dissectors of this crate with each other.
///
/// The encapsulation type of a capture selects [`ethernet::Ethernet`] or
/// [`linux_sll::LinuxSll`]. From there the EtherType selects [`ipv4::IPv4`] or [`ipv6::IPv6`],
/// the IP protocol number selects [`sctp::SCTP`], and the payload protocol identifier or the
/// port of an SCTP DATA chunk selects [`xnap::XnAP`].
///
/// Call this once before dissecting. Without it every packet is kept as `unprocessed` bytes of
/// the [`Packet`][`crate::Packet`]. Later calls return the result of the first one.
///
/// ```rust
/// # fn main() {{
/// let _ = xnap_dissect::register_defaults();
///
/// let frame = hex::decode(concat!(
///     "0200000000020200000000010800",
///     "4500003c000100004084000ac0a80001c0a80002",
///     "961696160000000100000000",
///     "0003001c00000001000000000000003d",
///     "001540080000010007400128"
/// ))
/// .unwrap();
///
/// let packet = xnap_dissect::Packet::from_bytes(&frame, xnap_dissect::ENCAP_TYPE_ETH).unwrap();
/// assert!(packet.unprocessed.is_empty());
/// # }}
/// ```
///
/// Dissectors living outside the crate hook in the same way, through the `register_*`
/// functions of the layer that carries them.
pub fn register_defaults() -> Result<(), crate::errors::Error> {{
    let mut result = Ok(());

    fn register_all() -> Result<(), crate::errors::Error> {{
        // encapsulation table first, the link layers add themselves to it
        crate::packet::register_defaults()?;

        {calls}

        Ok(())
    }}

    INIT.call_once(|| {{
        result = register_all();

        #[cfg(feature = "logging")]
        if let Err(ref e) = result {{
            log::error!("registering dissectors: {{}}", e);
        }}
    }});

    result
}}
"#,
        calls = calls.join("\n        ")
    )
}
