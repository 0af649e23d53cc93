//! Runtime configuration
//!
//! Every setting has a default and an environment override. Values are
//! resolved once into [`SchoolConfig`]; [`SchoolConfig::entries`] reports each
//! value together with where it came from.

use crate::db::{get_db_path, DB_PATH_ENV};
use crate::error::{Error, Result};
use crate::wizard::SignupPolicy;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

pub const INSTITUTIONAL_DOMAIN_ENV: &str = "SCHOOL_INSTITUTIONAL_DOMAIN";
pub const SIGNUP_POLICY_ENV: &str = "SCHOOL_SIGNUP_POLICY";
pub const SUBMIT_DELAY_ENV: &str = "SCHOOL_SUBMIT_DELAY_MS";
pub const OTP_COOLDOWN_ENV: &str = "SCHOOL_OTP_COOLDOWN_SECS";

pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 1000;
pub const DEFAULT_OTP_COOLDOWN_SECS: u32 = 30;

/// Where a configuration value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Flag,
    Env,
    Default,
}

impl ConfigSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigSource::Flag => "flag",
            ConfigSource::Env => "env",
            ConfigSource::Default => "default",
        }
    }
}

/// One resolved setting, for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntry {
    pub key: &'static str,
    pub value: String,
    pub source: ConfigSource,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchoolConfig {
    pub db_path: PathBuf,
    /// Domain suffix required of staff e-mails, e.g. `@school.edu`
    pub institutional_domain: Option<String>,
    pub signup_policy: SignupPolicy,
    pub submit_delay: Duration,
    pub otp_cooldown_secs: u32,
    sources: [ConfigSource; 5],
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("school.db"),
            institutional_domain: None,
            signup_policy: SignupPolicy::Auto,
            submit_delay: Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS),
            otp_cooldown_secs: DEFAULT_OTP_COOLDOWN_SECS,
            sources: [ConfigSource::Default; 5],
        }
    }
}

impl SchoolConfig {
    /// Resolve configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let source = |present: bool| {
            if present {
                ConfigSource::Env
            } else {
                ConfigSource::Default
            }
        };

        let db_env = get(DB_PATH_ENV);
        let db_source = source(db_env.is_some());
        let db_path = match db_env {
            Some(path) => PathBuf::from(path),
            None => get_db_path()?,
        };

        let institutional_domain = get(INSTITUTIONAL_DOMAIN_ENV).map(|d| d.trim().to_string());
        let domain_source = source(institutional_domain.is_some());

        let policy_env = get(SIGNUP_POLICY_ENV);
        let policy_source = source(policy_env.is_some());
        let signup_policy = match policy_env {
            Some(raw) => raw.parse::<SignupPolicy>().map_err(Error::config)?,
            None => SignupPolicy::Auto,
        };

        let delay_env = get(SUBMIT_DELAY_ENV);
        let delay_source = source(delay_env.is_some());
        let submit_delay_ms = match delay_env {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::config(format!("{} must be a whole number of milliseconds", SUBMIT_DELAY_ENV))
            })?,
            None => DEFAULT_SUBMIT_DELAY_MS,
        };

        let cooldown_env = get(OTP_COOLDOWN_ENV);
        let cooldown_source = source(cooldown_env.is_some());
        let otp_cooldown_secs = match cooldown_env {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
                Error::config(format!("{} must be a whole number of seconds", OTP_COOLDOWN_ENV))
            })?,
            None => DEFAULT_OTP_COOLDOWN_SECS,
        };

        Ok(Self {
            db_path,
            institutional_domain,
            signup_policy,
            submit_delay: Duration::from_millis(submit_delay_ms),
            otp_cooldown_secs,
            sources: [
                db_source,
                domain_source,
                policy_source,
                delay_source,
                cooldown_source,
            ],
        })
    }

    /// Override the database path from a command-line flag
    pub fn with_db_path(mut self, path: PathBuf) -> Self {
        if path != self.db_path {
            self.db_path = path;
            self.sources[0] = ConfigSource::Flag;
        }
        self
    }

    /// Every setting with its value and source
    pub fn entries(&self) -> Vec<ConfigEntry> {
        let [db, domain, policy, delay, cooldown] = self.sources;
        vec![
            ConfigEntry {
                key: DB_PATH_ENV,
                value: self.db_path.display().to_string(),
                source: db,
            },
            ConfigEntry {
                key: INSTITUTIONAL_DOMAIN_ENV,
                value: self.institutional_domain.clone().unwrap_or_default(),
                source: domain,
            },
            ConfigEntry {
                key: SIGNUP_POLICY_ENV,
                value: self.signup_policy.as_str().to_string(),
                source: policy,
            },
            ConfigEntry {
                key: SUBMIT_DELAY_ENV,
                value: self.submit_delay.as_millis().to_string(),
                source: delay,
            },
            ConfigEntry {
                key: OTP_COOLDOWN_ENV,
                value: self.otp_cooldown_secs.to_string(),
                source: cooldown,
            },
        ]
    }
}
