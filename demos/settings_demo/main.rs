//! # layered-settings demo application
//!
//! Gathers [`DemoSettings`](config::DemoSettings) from every layer and prints
//! the result as JSON. Run it from the repository root so the relative paths
//! resolve.
//!
//! | Layer | How to exercise it |
//! |-------|--------------------|
//! | Base file | `cargo run --example settings_demo` |
//! | Environment file | `APP_ENV=example cargo run --example settings_demo` |
//! | Switch-named file | `cargo run --example settings_demo -- --config-file demos/settings_demo/config-override.yml` |
//! | Variable | `LISTS_ANIMALS=cat,dog,bear cargo run --example settings_demo` |
//! | Switch | `cargo run --example settings_demo -- --data-port 27018` |
//! | Timestamp | `SERVER_STARTED=2024-01-02T03:04:05Z cargo run --example settings_demo` |
//!
//! Mix variables and switches to see precedence: with
//! `DATA_PORT=27019 ... -- --data-port 27018` the variable wins.
//!
//! Set `RUST_LOG=layered_settings=debug` to watch each layer apply.

mod config;

use layered_settings::{ReadOptions, Settings};
use tracing_subscriber::EnvFilter;

use config::DemoSettings;

const DEMO_DIR: &str = "./demos/settings_demo";

fn options() -> ReadOptions {
    Settings::options()
        .app_name("settings-demo")
        .base_path(format!("{DEMO_DIR}/defaults.yaml"))
        .default_value("server.address", ":8080")
        .env_search_paths([DEMO_DIR])
        .env_default()
        .args_file_override(["--config-file", "-cf"])
        .args_map([
            ("--data-name", "data.name"),
            ("--data-host", "data.host"),
            ("--data-port", "data.port"),
            ("--lists-animals", "lists.animals"),
            ("--lists-lucky-numbers", "lists.lucky_numbers"),
            ("--logging-verbose", "logging.verbose"),
        ])
        .vars_map([
            ("DATA_NAME", "data.name"),
            ("DATA_HOST", "data.host"),
            ("DATA_PORT", "data.port"),
            ("SERVER_ADDRESS", "server.address"),
            ("SERVER_STARTED", "server.started"),
            ("LISTS_ANIMALS", "lists.animals"),
        ])
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut settings = DemoSettings::default();
    if let Err(e) = options().gather(&mut settings) {
        eprintln!("Failed to gather settings:\n{e}");
        std::process::exit(1);
    }

    match serde_json::to_string_pretty(&settings) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to render settings: {e}");
            std::process::exit(1);
        }
    }
}
