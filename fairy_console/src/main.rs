// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod command;
pub mod network;
pub mod tui;

mod client_main;

use clap::{Command, arg};


fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .filter_module("tungstenite", log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let matches = Command::new("Fairy Board")
        .version(clap::crate_version!())
        .about("Console client for the fairy chess board server")
        .arg(arg!(<server_address> "Server address, host:port"))
        .arg(
            arg!(--"path" <path> "WebSocket endpoint on the server")
                .default_value(client_main::DEFAULT_PATH),
        )
        .get_matches();

    client_main::run(client_main::ClientConfig {
        server_address: matches.get_one::<String>("server_address").unwrap().clone(),
        path: matches.get_one::<String>("path").unwrap().clone(),
    })
}
