mod cli;
mod config;
mod file;
mod http;
mod model;
mod selector;
mod sync_error;
mod transfer;
mod utils;
mod vk;
mod yandex_store;

use crate::cli::{build_cli, CopyCmd};
use crate::config::{env_lookup, read_env_file, Config};
use crate::transfer::Transfer;
use std::process::exit;
use std::time::Duration;

#[tokio::main]
async fn main() {
    env_logger::init();

    let matches = build_cli().get_matches();
    let cmd = CopyCmd::build(&matches).unwrap_or_else(|err| {
        eprintln!("{}, run `photosync --help` to learn more", err);
        exit(1);
    });

    let file_vars = read_env_file(&cmd.env_file).unwrap_or_else(|err| {
        eprintln!("❌  Failed to read {:?} due to error='{}'", cmd.env_file, err);
        exit(1);
    });

    let config = Config::from_env(cmd, env_lookup(file_vars)).unwrap_or_else(|err| {
        eprintln!("❌  Failed to load configuration due to error='{}'", err);
        exit(1);
    });
    log::debug!("starting with {:?}", config);

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(120))
        .build()
        .unwrap_or_else(|err| {
            eprintln!("Failed to create http client due to error = {}", err);
            exit(1);
        });

    let mut transfer = Transfer::new(&config, &http);
    let result = transfer.run().await;

    match result {
        Ok(_) => {
            for entry in transfer.manifest().entries() {
                log::debug!("copied {} ({})", entry.name, entry.size);
            }
            println!("✅  Copied {} photos", transfer.manifest().len());
            exit(0)
        }
        Err(err) => {
            if err.is_access_denied() {
                eprintln!("Access error");
            }
            eprintln!("❌  Failed due to error='{}'", err);
            exit(1);
        }
    }
}
