//! Configuration read once from the process environment

use std::env::{self, VarError};
use std::fmt;
use std::time::Duration;
use log::debug;
use crate::error::Error;
use crate::Provider;

pub const BASE_URL_VAR: &str = "CHAT_BASE_URL";
pub const MODEL_VAR: &str = "CHAT_MODEL";
pub const SYSTEM_VAR: &str = "CHAT_SYSTEM";
pub const USER_VAR: &str = "CHAT_USER";
pub const TEMPERATURE_VAR: &str = "CHAT_TEMPERATURE";
pub const TIMEOUT_VAR: &str = "CHAT_TIMEOUT_SECS";

/// Request timeout when `CHAT_TIMEOUT_SECS` is unset
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Everything one invocation needs. Immutable once built.
#[derive(Clone, PartialEq)]
pub struct ChatConfig
{   pub provider: Provider
  , pub api_key: String
  , /// API root without trailing slash, e.g. `https://api.x.ai/v1`
    pub base_url: String
  , pub model: String
  , pub system_prompt: String
  , pub user_prompt: String
  , /// `None` leaves the choice to the service
    pub temperature: Option<f32>
  , pub timeout: Duration
}

impl fmt::Debug for ChatConfig
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.debug_struct("ChatConfig")
          .field("provider", &self.provider)
          .field("api_key", &"<redacted>")
          .field("base_url", &self.base_url)
          .field("model", &self.model)
          .field("system_prompt", &self.system_prompt)
          .field("user_prompt", &self.user_prompt)
          .field("temperature", &self.temperature)
          .field("timeout", &self.timeout)
          .finish()
    }
}

impl ChatConfig
{   /// Read the configuration from the real process environment
    pub fn from_env() -> Result<Self, Error>
    {   Self::from_lookup(|name| env::var(name))
    }

    /// Read the configuration through `lookup`, which answers like
    /// `std::env::var`. Empty values count as unset; values that are not
    /// valid unicode are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where F: Fn(&str) -> Result<String, VarError>
    {   let get = |name: &str| -> Result<Option<String>, Error>
        {   match lookup(name)
            {   Ok(value) if !value.is_empty() => Ok(Some(value))
              , Ok(_) | Err(VarError::NotPresent) => Ok(None)
              , Err(VarError::NotUnicode(_)) => {
                  debug!("{} is not valid unicode", name);
                  Err(Error::InvalidConfiguration(format!(
                    "{} is not valid unicode", name
                  )))
                }
            }
        };

        let (provider, api_key)
          = match get(Provider::Generic.api_key_var())?
            {   Some(key) => (Provider::Generic, key)
              , None => match get(Provider::Xai.api_key_var())?
                {   Some(key) => (Provider::Xai, key)
                  , None => {
                      debug!("No API key variable set");
                      return Err(Error::MissingVariable(
                        Provider::Generic.api_key_var().to_string()
                      ));
                    }
                }
            };
        debug!("Using provider preset: {:?}", provider);

        let base_url = get(BASE_URL_VAR)?
          .or_else(|| provider.default_base_url().map(String::from))
          .ok_or_else(|| Error::MissingVariable(BASE_URL_VAR.to_string()))?;
        let base_url = validate_base_url(&base_url)?;

        let model = get(MODEL_VAR)?
          .or_else(|| provider.default_model().map(String::from))
          .ok_or_else(|| Error::MissingVariable(MODEL_VAR.to_string()))?;

        let system_prompt = get(SYSTEM_VAR)?
          .ok_or_else(|| Error::MissingVariable(SYSTEM_VAR.to_string()))?;
        let user_prompt = get(USER_VAR)?
          .ok_or_else(|| Error::MissingVariable(USER_VAR.to_string()))?;

        let temperature = match get(TEMPERATURE_VAR)?
        {   Some(raw) => Some(parse_temperature(&raw)?)
          , None => None
        };

        let timeout_secs = match get(TIMEOUT_VAR)?
        {   Some(raw) => parse_timeout(&raw)?
          , None => DEFAULT_TIMEOUT_SECS
        };

        let config = ChatConfig
        {   provider
          , api_key
          , base_url
          , model
          , system_prompt
          , user_prompt
          , temperature
          , timeout: Duration::from_secs(timeout_secs)
        };
        debug!("Loaded {:?}", config);
        Ok(config)
    }

    /// Full URL of the chat-completion endpoint
    pub fn completions_url(&self) -> String
    {   format!("{}/chat/completions", self.base_url)
    }
}

fn validate_base_url(raw: &str) -> Result<String, Error>
{   let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://"))
    {   return Err(Error::InvalidConfiguration(format!(
          "{} must start with http:// or https://, got {:?}",
          BASE_URL_VAR, raw
        )));
    }
    Ok(trimmed.to_string())
}

fn parse_temperature(raw: &str) -> Result<f32, Error>
{   let value: f32 = raw.trim().parse().map_err(|_| {
      Error::InvalidConfiguration(format!(
        "{} is not a number: {:?}", TEMPERATURE_VAR, raw
      ))
    })?;
    if !(0.0..=2.0).contains(&value)
    {   return Err(Error::InvalidConfiguration(format!(
          "{} must be between 0 and 2, got {}", TEMPERATURE_VAR, value
        )));
    }
    Ok(value)
}

fn parse_timeout(raw: &str) -> Result<u64, Error>
{   match raw.trim().parse::<u64>()
    {   Ok(secs) if secs > 0 => Ok(secs)
      , _ => Err(Error::InvalidConfiguration(format!(
          "{} must be a positive integer, got {:?}", TIMEOUT_VAR, raw
        )))
    }
}

#[cfg(test)]
mod tests
{   use super::*;
    use std::collections::HashMap;

    fn generic_env() -> HashMap<&'static str, &'static str>
    {   HashMap::from([
          ("CHAT_API_KEY", "sk-test")
        , ("CHAT_BASE_URL", "https://llm.example.com/v1/")
        , ("CHAT_MODEL", "test-model")
        , ("CHAT_SYSTEM", "be terse")
        , ("CHAT_USER", "hello")
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>)
      -> Result<ChatConfig, Error>
    {   ChatConfig::from_lookup(|k| {
          env.get(k).map(|v| v.to_string()).ok_or(VarError::NotPresent)
        })
    }

    #[test]
    fn loads_generic_config()
    {   let config = load(&generic_env()).unwrap();
        assert_eq!(config.provider, Provider::Generic);
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.base_url, "https://llm.example.com/v1");
        assert_eq!(
          config.completions_url(),
          "https://llm.example.com/v1/chat/completions"
        );
        assert_eq!(config.model, "test-model");
        assert_eq!(config.system_prompt, "be terse");
        assert_eq!(config.user_prompt, "hello");
        assert_eq!(config.temperature, None);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn each_required_variable_is_enforced()
    {   for name in ["CHAT_API_KEY", "CHAT_BASE_URL", "CHAT_MODEL",
                     "CHAT_SYSTEM", "CHAT_USER"]
        {   let mut env = generic_env();
            env.remove(name);
            assert_eq!(
              load(&env).unwrap_err(),
              Error::MissingVariable(name.to_string()),
              "removed {}", name
            );
        }
    }

    #[test]
    fn empty_value_counts_as_missing()
    {   let mut env = generic_env();
        env.insert("CHAT_USER", "");
        assert_eq!(
          load(&env).unwrap_err(),
          Error::MissingVariable("CHAT_USER".into())
        );
    }

    #[test]
    fn xai_key_fills_in_preset_defaults()
    {   let env = HashMap::from([
          ("X_API_KEY", "xai-key")
        , ("CHAT_SYSTEM", "sys")
        , ("CHAT_USER", "usr")
        ]);
        let config = load(&env).unwrap();
        assert_eq!(config.provider, Provider::Xai);
        assert_eq!(config.base_url, "https://api.x.ai/v1");
        assert_eq!(config.model, "grok-3-latest");
    }

    #[test]
    fn chat_api_key_wins_over_xai_key()
    {   let mut env = generic_env();
        env.insert("X_API_KEY", "xai-key");
        let config = load(&env).unwrap();
        assert_eq!(config.provider, Provider::Generic);
        assert_eq!(config.api_key, "sk-test");
    }

    #[test]
    fn optional_numbers_are_parsed()
    {   let mut env = generic_env();
        env.insert("CHAT_TEMPERATURE", "0.0");
        env.insert("CHAT_TIMEOUT_SECS", "15");
        let config = load(&env).unwrap();
        assert_eq!(config.temperature, Some(0.0));
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn bad_values_are_configuration_errors()
    {   for (name, value) in [
          ("CHAT_TEMPERATURE", "warm")
        , ("CHAT_TEMPERATURE", "3.5")
        , ("CHAT_TIMEOUT_SECS", "0")
        , ("CHAT_BASE_URL", "api.example.com")
        ]
        {   let mut env = generic_env();
            env.insert(name, value);
            match load(&env)
            {   Err(Error::InvalidConfiguration(msg)) => {
                  assert!(msg.contains(name), "{}", msg)
                }
              , other => panic!("{}={}: {:?}", name, value, other)
            }
        }
    }

    #[test]
    fn non_unicode_value_is_not_reported_as_missing()
    {   use std::ffi::OsString;
        let env = generic_env();
        let result = ChatConfig::from_lookup(|k| {
          if k == "CHAT_SYSTEM"
          {   return Err(VarError::NotUnicode(OsString::from("sys")));
          }
          env.get(k).map(|v| v.to_string()).ok_or(VarError::NotPresent)
        });
        match result
        {   Err(Error::InvalidConfiguration(msg)) => {
              assert!(msg.contains("CHAT_SYSTEM"), "{}", msg)
            }
          , other => panic!("unexpected result: {:?}", other)
        }
    }

    #[test]
    fn debug_output_hides_the_key()
    {   let config = load(&generic_env()).unwrap();
        let shown = format!("{:?}", config);
        assert!(!shown.contains("sk-test"));
        assert!(shown.contains("<redacted>"));
    }
}
