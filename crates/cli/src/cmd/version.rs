use crate::output::{banner, print_json, OutputMode};
use serde::Serialize;

#[derive(Serialize)]
struct ClientInfo<'a> {
    client: &'static str,
    version: &'static str,
    target: String,
    server: &'a str,
}

pub fn execute(mode: OutputMode, base: &str) {
    let info = ClientInfo {
        client: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        target: format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS),
        server: base,
    };

    match mode {
        OutputMode::Json => {
            let _ = print_json(&info);
        }
        OutputMode::Human => banner::print_version_block(info.version, &info.target, info.server),
    }
}
