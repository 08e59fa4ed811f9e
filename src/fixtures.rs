#[cfg(test)]
pub mod test {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    pub struct TestConfig {
        /// Service name.
        pub name: String,

        /// Listen port.
        pub port: i32,

        /// Data store settings.
        pub data: DataConfig,

        /// Sequence leaves.
        pub lists: ListsConfig,

        /// Indexed but never written by keyed overrides.
        pub version: String,
    }

    crate::record!(TestConfig {
        name,
        port,
        data: nested,
        lists: nested,
        version: readonly,
    });

    #[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    pub struct DataConfig {
        pub host: String,
        pub port: u16,
        pub verbose: bool,
        pub ratio: f64,
        pub started: Option<DateTime<FixedOffset>>,
    }

    crate::record!(DataConfig {
        host,
        port,
        verbose,
        ratio,
        started,
    });

    #[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    pub struct ListsConfig {
        pub animals: Vec<String>,
        pub lucky_numbers: Vec<i32>,
        /// Indexed, but string coercion rejects it.
        pub matrix: Vec<Vec<i32>>,
    }

    crate::record!(ListsConfig {
        animals,
        lucky_numbers,
        matrix,
    });

    // -- Fixture for scenario tests with a flat two-field record --------------

    #[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    pub struct ServiceConfig {
        pub name: String,
        pub port: i32,
    }

    crate::record!(ServiceConfig { name, port });

    // -- Fixture with an optional nested record -----------------------------

    #[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    pub struct OuterConfig {
        pub name: String,
        pub inner: Option<Box<InnerConfig>>,
    }

    crate::record!(OuterConfig { name, inner: nested });

    #[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    pub struct InnerConfig {
        pub port: i32,
    }

    crate::record!(InnerConfig { port });

    #[test]
    fn fixtures_default_to_zero_values() {
        let config = TestConfig::default();
        assert_eq!(config.name, "");
        assert_eq!(config.data.port, 0);
        assert!(config.data.started.is_none());
        assert!(config.lists.animals.is_empty());
    }
}
