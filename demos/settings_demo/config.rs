//! Settings records for the demo application.
//!
//! The root [`DemoSettings`] nests four records. Every leaf is reachable by a
//! dotted path such as `data.port` or `lists.lucky_numbers`.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Root settings for the demo application.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct DemoSettings {
    pub name: String,
    pub data: DataSettings,
    pub logging: LoggingSettings,
    pub server: ServerSettings,
    pub lists: ListSettings,
    /// Shipped in the base file only; keyed layers cannot touch it.
    pub version: String,
}

layered_settings::record!(DemoSettings {
    name,
    data: nested,
    logging: nested,
    server: nested,
    lists: nested,
    version: readonly,
});

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct DataSettings {
    pub name: String,
    pub host: String,
    pub port: u16,
}

layered_settings::record!(DataSettings { name, host, port });

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct LoggingSettings {
    pub level: String,
    pub verbose: bool,
}

layered_settings::record!(LoggingSettings { level, verbose });

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ServerSettings {
    pub address: String,
    pub started: Option<DateTime<FixedOffset>>,
}

layered_settings::record!(ServerSettings { address, started });

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ListSettings {
    pub lucky_numbers: Vec<i32>,
    pub animals: Vec<String>,
}

layered_settings::record!(ListSettings {
    lucky_numbers,
    animals,
});
