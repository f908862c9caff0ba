use std::env;

use thiserror::Error;

use crate::commands::CommandConfig;


#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("expected {0} in the environment")]
    Missing(&'static str),
    #[error("{0} must not be blank")]
    Blank(&'static str),
}


#[derive(Debug, Clone)]
pub struct BotConfig {
    pub discord_token: String,
    pub commands: CommandConfig,
}


impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. `DISCORD_TOKEN` is required; the command
    /// names fall back to `/calories` and `/start`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let discord_token = lookup("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;
        if discord_token.trim().is_empty() {
            return Err(ConfigError::Blank("DISCORD_TOKEN"));
        }

        let defaults = CommandConfig::default();
        let commands = CommandConfig {
            start_form: optional(&lookup, "CALORIES_START_COMMAND")?.unwrap_or(defaults.start_form),
            help: optional(&lookup, "CALORIES_HELP_COMMAND")?.unwrap_or(defaults.help),
        };

        Ok(Self {
            discord_token,
            commands,
        })
    }
}


fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<Option<String>, ConfigError> {
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Blank(key)),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn token_is_required() {
        let err = BotConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DISCORD_TOKEN"));

        let err = BotConfig::from_lookup(lookup_from(&[("DISCORD_TOKEN", "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Blank("DISCORD_TOKEN"));
    }

    #[test]
    fn commands_default_when_unset() {
        let config = BotConfig::from_lookup(lookup_from(&[("DISCORD_TOKEN", "abc")])).unwrap();
        assert_eq!(config.discord_token, "abc");
        assert_eq!(config.commands, CommandConfig::default());
    }

    #[test]
    fn commands_can_be_overridden() {
        let config = BotConfig::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("CALORIES_START_COMMAND", " !kcal "),
        ]))
        .unwrap();
        assert_eq!(config.commands.start_form, "!kcal");
        assert_eq!(config.commands.help, "/start");

        let err = BotConfig::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("CALORIES_HELP_COMMAND", ""),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Blank("CALORIES_HELP_COMMAND"));
    }
}
