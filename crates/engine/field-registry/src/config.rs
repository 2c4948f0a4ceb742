use std::{str::FromStr, time::Duration};

use crate::Middleware;

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Settings applied when resolving fields
    pub resolution: ResolutionConfig,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolutionConfig {
    /// Upper bound for running the whole middleware chain of one field. No limit by default.
    #[serde(deserialize_with = "duration_str::deserialize_option_duration")]
    pub timeout: Option<Duration>,
}

impl FromStr for Config {
    type Err = toml::de::Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        toml::from_str(input)
    }
}

/// Schema-wide settings shared by the default binder and every resolution.
#[derive(Clone, Debug, Default)]
pub struct SchemaSettings {
    pub config: Config,
    custom_default_resolver: Option<Middleware>,
}

impl SchemaSettings {
    pub fn new(config: Config) -> Self {
        SchemaSettings {
            config,
            custom_default_resolver: None,
        }
    }

    /// Resolver used instead of the system default for fields without explicit middleware.
    #[must_use]
    pub fn with_custom_default_resolver(mut self, resolver: impl Into<Middleware>) -> Self {
        self.custom_default_resolver = Some(resolver.into());
        self
    }

    pub fn custom_default_resolver(&self) -> Option<&Middleware> {
        self.custom_default_resolver.as_ref()
    }

    pub fn resolution_timeout(&self) -> Option<Duration> {
        self.config.resolution.timeout
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn defaults() {
        let config: Config = "".parse().unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(None, config.resolution.timeout);
    }

    #[test]
    fn resolution_timeout() {
        let input = indoc! {r#"
            [resolution]
            timeout = "1500ms"
        "#};

        let config: Config = input.parse().unwrap();

        assert_eq!(Some(Duration::from_millis(1500)), config.resolution.timeout);
        assert_eq!(
            Some(Duration::from_millis(1500)),
            SchemaSettings::new(config).resolution_timeout()
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let input = indoc! {r#"
            [resolution]
            timeout = "1s"
            retries = 3
        "#};

        let error = input.parse::<Config>().unwrap_err();

        insta::assert_snapshot!(error.to_string(), @r###"
        TOML parse error at line 3, column 1
          |
        3 | retries = 3
          | ^^^^^^^
        unknown field `retries`, expected `timeout`
        "###);
    }
}
