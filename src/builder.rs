use std::path::PathBuf;

use crate::error::SettingsError;
use crate::record::Target;
use crate::resolve::{self, Input, Plan};
use crate::types::{SearchPath, Value};

/// Entry point for configuring a gather.
pub struct Settings;

impl Settings {
    pub fn options() -> ReadOptions {
        ReadOptions::default()
    }
}

/// Builder describing which sources feed a gather and in what shape.
///
/// Layers apply in a fixed order regardless of the order methods are called:
///
/// ```text
/// base file < defaults < --switch files < $ENV file < switch table < variable table
/// ```
///
/// Table setters come in pairs: the plain form adds to what is already there,
/// the `replace_` form starts over.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    plan: Plan,
}

impl ReadOptions {
    /// Application name, used to resolve [`SearchPath::Platform`].
    pub fn app_name(mut self, name: &str) -> Self {
        self.plan.app_name = Some(name.to_string());
        self
    }

    /// File loaded first, before every other layer. It must exist.
    pub fn base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.plan.base_path = Some(path.into());
        self
    }

    /// Add typed default values keyed by dotted path.
    pub fn defaults<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.plan
            .defaults
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add a single default value.
    pub fn default_value(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.plan.defaults.insert(path.to_string(), value.into());
        self
    }

    /// Replace the defaults table entirely.
    pub fn replace_defaults<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.plan.defaults.clear();
        self.defaults(entries)
    }

    /// Switches whose value names an override file, e.g. `--config-file`.
    pub fn args_file_override<S: Into<String>>(
        mut self,
        switches: impl IntoIterator<Item = S>,
    ) -> Self {
        self.plan
            .args_file_override
            .extend(switches.into_iter().map(Into::into));
        self
    }

    /// Variables whose value names the environment, e.g. `APP_ENV`.
    pub fn env_override<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.plan
            .env_override
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Directories searched for the environment-selected file, in order.
    pub fn env_search_paths<P: Into<SearchPath>>(
        mut self,
        paths: impl IntoIterator<Item = P>,
    ) -> Self {
        self.plan
            .env_search_paths
            .extend(paths.into_iter().map(Into::into));
        self
    }

    /// Shape of the environment file name. `%s` is replaced by the
    /// environment name: `"settings.%s"` with `APP_ENV=prod` looks for
    /// `settings.prod.yml` and friends.
    pub fn env_search_pattern(mut self, pattern: &str) -> Self {
        self.plan.env_search_pattern = Some(pattern.to_string());
        self
    }

    /// The conventional environment setup: trigger `APP_ENV`, searched in
    /// `./`, `./config` and `./settings`. Adds to existing settings.
    pub fn env_default(self) -> Self {
        self.env_override(["APP_ENV"])
            .env_search_paths(["./", "./config", "./settings"])
    }

    /// Add switch-to-path mappings, e.g. `("--port", "server.port")`.
    pub fn args_map<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.plan
            .args_map
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add a single switch mapping.
    pub fn arg(self, switch: &str, path: &str) -> Self {
        self.args_map([(switch, path)])
    }

    /// Replace the switch table entirely.
    pub fn replace_args_map<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.plan.args_map.clear();
        self.args_map(entries)
    }

    /// Add variable-to-path mappings, e.g. `("PORT", "server.port")`.
    pub fn vars_map<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.plan
            .vars_map
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add a single variable mapping.
    pub fn var(self, name: &str, path: &str) -> Self {
        self.vars_map([(name, path)])
    }

    /// Replace the variable table entirely.
    pub fn replace_vars_map<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.plan.vars_map.clear();
        self.vars_map(entries)
    }

    /// Populate `target` from the live process arguments and environment.
    pub fn gather<T: Target>(&self, target: &mut T) -> Result<(), SettingsError> {
        self.gather_from(target, &Input::from_process())
    }

    /// Populate `target` from the given arguments and variables.
    pub fn gather_from<T: Target>(
        &self,
        target: &mut T,
        input: &Input,
    ) -> Result<(), SettingsError> {
        resolve::gather(&self.plan, input, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::TestConfig;
    use std::fs;
    use tempfile::TempDir;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_accumulate() {
        let opts = Settings::options()
            .defaults([("port", 1i32)])
            .default_value("name", "svc");
        assert_eq!(opts.plan.defaults.len(), 2);
        assert_eq!(opts.plan.defaults["port"], Value::I32(1));
    }

    #[test]
    fn replace_defaults_starts_over() {
        let opts = Settings::options()
            .default_value("name", "svc")
            .replace_defaults([("port", 2i32)]);
        assert_eq!(opts.plan.defaults.len(), 1);
        assert!(opts.plan.defaults.contains_key("port"));
    }

    #[test]
    fn arg_and_args_map_merge() {
        let opts = Settings::options()
            .arg("--port", "port")
            .args_map([("--host", "data.host")]);
        assert_eq!(opts.plan.args_map.len(), 2);
        assert_eq!(opts.plan.args_map["--port"], "port");
    }

    #[test]
    fn replace_args_map_starts_over() {
        let opts = Settings::options()
            .arg("--port", "port")
            .replace_args_map([("--host", "data.host")]);
        assert_eq!(opts.plan.args_map.len(), 1);
        assert!(!opts.plan.args_map.contains_key("--port"));
    }

    #[test]
    fn replace_vars_map_starts_over() {
        let opts = Settings::options()
            .var("PORT", "port")
            .replace_vars_map([("HOST", "data.host")]);
        assert_eq!(opts.plan.vars_map.len(), 1);
        assert_eq!(opts.plan.vars_map["HOST"], "data.host");
    }

    #[test]
    fn env_default_appends_conventions() {
        let opts = Settings::options()
            .env_search_paths([SearchPath::Cwd])
            .env_default();
        assert_eq!(opts.plan.env_override, vec!["APP_ENV"]);
        assert_eq!(
            opts.plan.env_search_paths,
            vec![
                SearchPath::Cwd,
                SearchPath::from("./"),
                SearchPath::from("./config"),
                SearchPath::from("./settings"),
            ]
        );
    }

    #[test]
    fn gather_from_runs_all_layers() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("base.yml");
        fs::write(&base, "name: svc\ndata:\n  host: db\n").unwrap();
        fs::write(dir.path().join("settings.prod.json"), r#"{"port": 4000}"#).unwrap();

        let opts = Settings::options()
            .base_path(&base)
            .default_value("data.port", 27017u16)
            .env_override(["APP_ENV"])
            .env_search_paths([dir.path().to_path_buf()])
            .env_search_pattern("settings.%s")
            .arg("--verbose", "data.verbose")
            .var("HOST", "data.host");

        let input = Input::new(
            argv(&["app", "--verbose", "true"]),
            vars(&[("APP_ENV", "prod"), ("HOST", "replica")]),
        );
        let mut config = TestConfig::default();
        opts.gather_from(&mut config, &input).unwrap();

        assert_eq!(config.name, "svc");
        assert_eq!(config.port, 4000);
        assert_eq!(config.data.port, 27017);
        assert_eq!(config.data.host, "replica");
        assert!(config.data.verbose);
    }

    #[test]
    fn options_are_reusable() {
        let opts = Settings::options().default_value("port", 5i32);
        let mut first = TestConfig::default();
        let mut second = TestConfig::default();
        opts.gather_from(&mut first, &Input::default()).unwrap();
        opts.gather_from(&mut second, &Input::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.port, 5);
    }
}
