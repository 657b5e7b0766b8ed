use std::fmt;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use portfolio_core::{Config, Profile, RelayError};

pub const API_KEY_ENV: &str = "GROQ_API_KEY";
pub const API_BASE_ENV: &str = "RELAY_API_BASE";
pub const BIND_ADDR_ENV: &str = "RELAY_BIND_ADDR";

pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

/// Everything the relay needs, resolved once at startup and handed to
/// [`crate::ChatRelay`].
#[derive(Clone)]
pub struct RelayConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    pub bind_addr: SocketAddr,
    pub profile: Profile,
}

impl RelayConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8787)),
            profile: Profile::default(),
        }
    }

    /// Reads the relay variables and takes the owner profile from the
    /// terminal config file, so the persona matches the terminal's commands.
    pub fn from_env() -> Result<Self> {
        let profile = Config::load()
            .context("failed to load portfolio-terminal config")?
            .profile();
        Self::from_lookup(env_value, profile)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>, profile: Profile) -> Result<Self> {
        let mut config = Self::new(lookup(API_KEY_ENV)).with_profile(profile);

        if let Some(base) = lookup(API_BASE_ENV) {
            config = config.with_api_base(&base);
        }

        let bind = lookup(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("{} is not a socket address: {}", BIND_ADDR_ENV, bind))?;

        Ok(config)
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// The upstream credential, or a configuration error when it is absent.
    pub fn api_key(&self) -> Result<&str, RelayError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| RelayError::configuration(format!("{} is not configured", API_KEY_ENV)))
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("bind_addr", &self.bind_addr)
            .field("profile", &self.profile.handle)
            .finish()
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_key_is_a_configuration_error() {
        for key in [None, Some("  ".to_string())] {
            let err = RelayConfig::new(key).api_key().unwrap_err();
            assert_eq!(err, RelayError::Configuration("GROQ_API_KEY is not configured".into()));
        }
        assert_eq!(RelayConfig::new(Some("gsk_1".into())).api_key().unwrap(), "gsk_1");
    }

    #[test]
    fn debug_output_hides_the_key() {
        let config = RelayConfig::new(Some("gsk_secret".into()));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("gsk_secret"));
        assert!(debug.contains("llama-3.3-70b-versatile"));
    }

    #[test]
    fn env_api_base_drops_trailing_slash() {
        let config = RelayConfig::from_lookup(
            |name| match name {
                API_KEY_ENV => Some("gsk_1".to_string()),
                API_BASE_ENV => Some("http://127.0.0.1:9000/v1/".to_string()),
                _ => None,
            },
            Profile::default(),
        )
        .unwrap();
        assert_eq!(config.api_base, "http://127.0.0.1:9000/v1");
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        let result = RelayConfig::from_lookup(
            |name| (name == BIND_ADDR_ENV).then(|| "not-an-addr".to_string()),
            Profile::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn api_base_drops_trailing_slash() {
        let config = RelayConfig::new(None).with_api_base("http://127.0.0.1:9000/v1/");
        assert_eq!(config.api_base, "http://127.0.0.1:9000/v1");
    }
}
