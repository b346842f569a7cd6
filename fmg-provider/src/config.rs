//! Provider configuration
//!
//! `ProviderSettings` is the `[provider]` table as written in the manifest.
//! `ProviderConfig` is the resolved runtime configuration: environment
//! overrides applied, secrets wrapped, enums parsed and checked.

use std::path::PathBuf;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

pub const ENV_HOSTNAME: &str = "FORTIMANAGER_ACCESS_HOSTNAME";
pub const ENV_USERNAME: &str = "FORTIMANAGER_ADMIN_USERNAME";
pub const ENV_PASSWORD: &str = "FORTIMANAGER_ADMIN_PASSWORD";
pub const ENV_TOKEN: &str = "FORTIMANAGER_ACCESS_TOKEN";
pub const ENV_INSECURE: &str = "FORTIMANAGER_INSECURE";
pub const ENV_CABUNDLE: &str = "FORTIMANAGER_CA_CABUNDLE";

/// The `[provider]` table of a manifest
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSettings {
    pub hostname: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
    pub insecure: Option<bool>,
    pub cabundlefile: Option<String>,
    pub scopetype: Option<String>,
    pub adom: Option<String>,
    pub device_name: Option<String>,
    pub vdom: Option<String>,
    pub workspace_mode: Option<String>,
    /// Session id of an already established login
    pub presession: Option<String>,
    pub clean_session: Option<bool>,
    #[serde(default)]
    pub import_options: Vec<String>,
}

/// Where ADOM-level objects live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeType {
    /// Take the scope from the provider (for resources) or fall back to `Adom`
    #[default]
    Inherit,
    Adom,
    Global,
}

impl ScopeType {
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "inherit" => Ok(ScopeType::Inherit),
            "adom" => Ok(ScopeType::Adom),
            "global" => Ok(ScopeType::Global),
            other => Err(Error::Config(format!(
                "scopetype must be one of inherit, adom, global (got '{}')",
                other
            ))),
        }
    }
}

/// ADOM workspace locking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkspaceMode {
    #[default]
    Disable,
    /// Lock the ADOM before each change, commit and unlock after it
    Normal,
}

impl WorkspaceMode {
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "disable" => Ok(WorkspaceMode::Disable),
            "normal" => Ok(WorkspaceMode::Normal),
            other => Err(Error::Config(format!(
                "workspace_mode must be one of disable, normal (got '{}')",
                other
            ))),
        }
    }
}

/// How the client authenticates
#[derive(Debug, Clone)]
pub enum Credentials {
    /// API token sent as a bearer header
    Token(SecretString),
    /// Username and password exchanged for a session at login
    Login {
        username: String,
        password: SecretString,
    },
    /// Session id obtained elsewhere
    Session(SecretString),
}

/// Resolved provider configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub hostname: String,
    pub credentials: Credentials,
    pub insecure: bool,
    pub cabundlefile: Option<PathBuf>,
    pub scopetype: ScopeType,
    pub adom: String,
    pub device_name: Option<String>,
    pub vdom: String,
    pub workspace_mode: WorkspaceMode,
    pub clean_session: bool,
    pub import_options: Vec<String>,
}

impl ProviderConfig {
    /// Resolve settings against the process environment
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self, Error> {
        Self::resolve(settings, |key| std::env::var(key).ok())
    }

    /// Resolve settings, reading overrides through `env`
    ///
    /// Environment values take precedence over the manifest.
    pub fn resolve(
        settings: &ProviderSettings,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Error> {
        let hostname = env(ENV_HOSTNAME)
            .or_else(|| settings.hostname.clone())
            .filter(|h| !h.is_empty())
            .ok_or_else(|| Error::Config("hostname is required".into()))?;

        let token = env(ENV_TOKEN).or_else(|| settings.token.clone());
        let username = env(ENV_USERNAME).or_else(|| settings.username.clone());
        let password = env(ENV_PASSWORD).or_else(|| settings.password.clone());

        let credentials = match (token, username, password, &settings.presession) {
            (Some(token), _, _, _) if !token.is_empty() => {
                Credentials::Token(SecretString::from(token))
            }
            (_, Some(username), Some(password), _) if !username.is_empty() => {
                Credentials::Login {
                    username,
                    password: SecretString::from(password),
                }
            }
            (_, _, _, Some(session)) if !session.is_empty() => {
                Credentials::Session(SecretString::from(session.clone()))
            }
            _ => {
                return Err(Error::Config(
                    "either token or username and password are required".into(),
                ));
            }
        };

        let insecure = match env(ENV_INSECURE) {
            Some(v) => parse_bool(&v)
                .ok_or_else(|| Error::Config(format!("{} must be true or false", ENV_INSECURE)))?,
            None => settings.insecure.unwrap_or(false),
        };

        let cabundlefile = env(ENV_CABUNDLE)
            .or_else(|| settings.cabundlefile.clone())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let scopetype = match &settings.scopetype {
            Some(s) => ScopeType::parse(s)?,
            None => ScopeType::default(),
        };
        let workspace_mode = match &settings.workspace_mode {
            Some(s) => WorkspaceMode::parse(s)?,
            None => WorkspaceMode::default(),
        };

        let config = Self {
            hostname,
            credentials,
            insecure,
            cabundlefile,
            scopetype,
            adom: settings.adom.clone().unwrap_or_else(|| "root".to_string()),
            device_name: settings.device_name.clone().filter(|d| !d.is_empty()),
            vdom: settings.vdom.clone().unwrap_or_else(|| "root".to_string()),
            workspace_mode,
            clean_session: settings.clean_session.unwrap_or(false),
            import_options: settings.import_options.clone(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), Error> {
        if self.workspace_mode == WorkspaceMode::Normal && self.scopetype == ScopeType::Global {
            return Err(Error::Config(
                "workspace_mode normal needs an ADOM, not the global scope".into(),
            ));
        }
        if self.adom.is_empty() {
            return Err(Error::Config("adom must not be empty".into()));
        }
        self.base_url().map(|_| ())
    }

    /// Base URL of the FortiManager; a bare host gets `https://`
    pub fn base_url(&self) -> Result<Url, Error> {
        let raw = if self.hostname.contains("://") {
            self.hostname.clone()
        } else {
            format!("https://{}", self.hostname)
        };
        Ok(Url::parse(&raw)?)
    }

    /// Effective scope for ADOM objects, `inherit` resolving to `adom`
    pub fn effective_scope(&self) -> ScopeType {
        match self.scopetype {
            ScopeType::Inherit => ScopeType::Adom,
            other => other,
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn settings() -> ProviderSettings {
        ProviderSettings {
            hostname: Some("192.0.2.10".into()),
            username: Some("admin".into()),
            password: Some("secret".into()),
            ..Default::default()
        }
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_applied() {
        let config = ProviderConfig::resolve(&settings(), no_env).unwrap();
        assert_eq!(config.vdom, "root");
        assert_eq!(config.adom, "root");
        assert_eq!(config.scopetype, ScopeType::Inherit);
        assert_eq!(config.effective_scope(), ScopeType::Adom);
        assert_eq!(config.workspace_mode, WorkspaceMode::Disable);
        assert!(!config.insecure);
        assert_eq!(config.base_url().unwrap().as_str(), "https://192.0.2.10/");
    }

    #[test]
    fn environment_overrides_manifest() {
        let env: HashMap<&str, &str> = [
            (ENV_HOSTNAME, "fmg.example.com"),
            (ENV_TOKEN, "tok"),
            (ENV_INSECURE, "true"),
        ]
        .into_iter()
        .collect();
        let config =
            ProviderConfig::resolve(&settings(), |k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.hostname, "fmg.example.com");
        assert!(config.insecure);
        match config.credentials {
            Credentials::Token(t) => assert_eq!(t.expose_secret(), "tok"),
            other => panic!("Expected token credentials, got {:?}", other),
        }
    }

    #[test]
    fn missing_hostname_rejected() {
        let mut s = settings();
        s.hostname = None;
        assert!(matches!(
            ProviderConfig::resolve(&s, no_env),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn missing_credentials_rejected() {
        let mut s = settings();
        s.password = None;
        assert!(ProviderConfig::resolve(&s, no_env).is_err());

        s.presession = Some("abc".into());
        let config = ProviderConfig::resolve(&s, no_env).unwrap();
        assert!(matches!(config.credentials, Credentials::Session(_)));
    }

    #[test]
    fn unknown_enums_rejected() {
        let mut s = settings();
        s.scopetype = Some("device".into());
        assert!(ProviderConfig::resolve(&s, no_env).is_err());

        let mut s = settings();
        s.workspace_mode = Some("workflow".into());
        assert!(ProviderConfig::resolve(&s, no_env).is_err());
    }

    #[test]
    fn workspace_mode_needs_adom_scope() {
        let mut s = settings();
        s.workspace_mode = Some("normal".into());
        s.scopetype = Some("global".into());
        assert!(ProviderConfig::resolve(&s, no_env).is_err());
    }

    #[test]
    fn settings_from_toml() {
        let s: ProviderSettings = toml::from_str(
            r#"
            hostname = "fmg.local"
            token = "abc"
            device_name = "FGT60F"
            import_options = ["cmdb"]
            "#,
        )
        .unwrap();
        assert_eq!(s.device_name.as_deref(), Some("FGT60F"));
        assert_eq!(s.import_options, vec!["cmdb".to_string()]);
    }
}
