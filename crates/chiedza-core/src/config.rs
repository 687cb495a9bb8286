//! Configuration management for the Chiedza portal.
//!
//! Loads configuration from ${CHIEDZA_HOME}/config.toml with sensible defaults.
//! The remote endpoint and anon key may be injected through the environment
//! (`CHIEDZA_REMOTE_URL`, `CHIEDZA_ANON_KEY`), which wins over the file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `remote.url`.
pub const REMOTE_URL_ENV: &str = "CHIEDZA_REMOTE_URL";
/// Environment variable overriding `remote.anon_key`.
pub const ANON_KEY_ENV: &str = "CHIEDZA_ANON_KEY";

/// Base currency used when displaying amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Zwg,
    Zar,
}

impl Currency {
    /// All currencies, in declaration order.
    fn all() -> [Currency; 3] {
        [Currency::Usd, Currency::Zwg, Currency::Zar]
    }

    /// ISO-style code, as stored in the config file.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Zwg => "ZWG",
            Currency::Zar => "ZAR",
        }
    }

    /// Prefix used when formatting amounts.
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Zwg => "ZWG ",
            Currency::Zar => "R",
        }
    }

    /// Returns the next currency, wrapping around.
    pub fn next(self) -> Currency {
        let all = Self::all();
        let idx = all.iter().position(|c| *c == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// Formats an amount with this currency's symbol and two decimals.
    pub fn format(self, amount: f64) -> String {
        format!("{}{amount:.2}", self.symbol())
    }
}

/// Risk and finance settings for the organisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgSettings {
    /// Base currency.
    pub currency: Currency,
    /// Default loan interest rate, in percent.
    pub interest_rate: u32,
    /// Portfolio-at-risk threshold, in days overdue.
    pub risk_threshold_days: u32,
    /// Send email alerts for overdue loans.
    pub email_alerts: bool,
}

impl OrgSettings {
    const MAX_INTEREST_RATE: u32 = 100;
    const MAX_RISK_THRESHOLD_DAYS: u32 = 365;

    pub fn raise_interest_rate(&mut self) {
        self.interest_rate = (self.interest_rate + 1).min(Self::MAX_INTEREST_RATE);
    }

    pub fn lower_interest_rate(&mut self) {
        self.interest_rate = self.interest_rate.saturating_sub(1);
    }

    pub fn raise_risk_threshold(&mut self) {
        self.risk_threshold_days =
            (self.risk_threshold_days + 1).min(Self::MAX_RISK_THRESHOLD_DAYS);
    }

    pub fn lower_risk_threshold(&mut self) {
        self.risk_threshold_days = self.risk_threshold_days.saturating_sub(1).max(1);
    }
}

impl Default for OrgSettings {
    fn default() -> Self {
        Self {
            currency: Currency::Usd,
            interest_rate: 10,
            risk_threshold_days: 30,
            email_alerts: true,
        }
    }
}

/// Remote service (hosted backend) configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: Option<String>,
    /// Public anon key sent as `apikey` on every request.
    pub anon_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl RemoteConfig {
    /// Returns the effective URL if set and non-empty.
    pub fn effective_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Returns the effective anon key if set and non-empty.
    pub fn effective_anon_key(&self) -> Option<&str> {
        self.anon_key
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Returns true when both the URL and the anon key are present.
    pub fn is_configured(&self) -> bool {
        self.effective_url().is_some() && self.effective_anon_key().is_some()
    }
}

/// Portal (terminal UI) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Organisation name shown in the header and on the login screen.
    pub org_name: String,
    /// Placeholder shown in the empty email field.
    pub email_placeholder: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            org_name: "Chiedza MIS".to_string(),
            email_placeholder: "staff@chiedza.org".to_string(),
        }
    }
}

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// New comments/sections from the template are always present, while the
/// user's customized values are preserved.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for configuration and data directories.
    //!
    //! CHIEDZA_HOME resolution order:
    //! 1. CHIEDZA_HOME environment variable (if set)
    //! 2. ~/.config/chiedza (default)

    use std::path::PathBuf;

    /// Returns the Chiedza home directory.
    pub fn chiedza_home() -> PathBuf {
        if let Ok(home) = std::env::var("CHIEDZA_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".chiedza"),
            |h| h.join(".config").join("chiedza"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        chiedza_home().join("config.toml")
    }

    /// Returns the path to the cached remote session.
    pub fn session_path() -> PathBuf {
        chiedza_home().join("session.json")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        chiedza_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hosted backend endpoint and key.
    pub remote: RemoteConfig,

    /// Portal branding.
    pub portal: PortalConfig,

    /// Risk and finance settings.
    pub settings: OrgSettings,
}

impl Config {
    /// Default HTTP timeout for remote requests.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

    /// Loads configuration from the default config path, then applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&paths::config_path())?;
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Applies `CHIEDZA_REMOTE_URL` / `CHIEDZA_ANON_KEY` over the file values.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = non_empty(REMOTE_URL_ENV) {
            self.remote.url = Some(url);
        }
        if let Some(key) = non_empty(ANON_KEY_ENV) {
            self.remote.anon_key = Some(key);
        }
        self
    }

    /// Returns the remote request timeout (0 falls back to the default).
    pub fn remote_timeout(&self) -> std::time::Duration {
        let secs = if self.remote.timeout_secs == 0 {
            Self::DEFAULT_TIMEOUT_SECS
        } else {
            self.remote.timeout_secs
        };
        std::time::Duration::from_secs(secs)
    }

    /// Saves the `[settings]` table to a specific config file path.
    ///
    /// Creates the file with default template if it doesn't exist.
    /// If file exists, merges user values into the latest template.
    pub fn save_settings_to(path: &Path, settings: &OrgSettings) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["settings"]["currency"] = value(settings.currency.code());
        doc["settings"]["interest_rate"] = value(i64::from(settings.interest_rate));
        doc["settings"]["risk_threshold_days"] = value(i64::from(settings.risk_threshold_days));
        doc["settings"]["email_alerts"] = value(settings.email_alerts);

        Self::write_config(path, &doc.to_string())
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}
