//! Site configuration module.
//!
//! Handles loading, validating, and layering `config.toml`. Stock defaults are
//! overridden by the `config.toml` in the content root, which in turn can be
//! overridden by an extra file passed with `--config` (useful for a staging
//! build that swaps header links or redirect status without touching content).
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml              # Site config (overrides stock defaults)
//! └── documents/
//!     ├── articles.json
//!     └── home.json
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! documents_dir = "documents"   # Where exported documents live, relative to the content root
//!
//! [colors]
//! background = "#FFFFFF"
//! text = "#000000"
//! text_muted = "#6B7280"        # Dates, vote stats
//! accent = "#22C55E"            # Promoted banner
//! callout = "#FFFFFF"           # Short-description callout box
//!
//! [header]
//! company_name = "Help Center"  # Screen-reader text for the logo link
//! # logo = "https://example.com/logo.png"
//! links = [
//!     { label = "About", href = "#" },
//!     { label = "Membership", href = "#" },
//!     { label = "Contribute", href = "#" },
//! ]
//!
//! [footer]
//! links = [
//!     { label = "Privacy", href = "#" },
//!     { label = "Terms", href = "#" },
//!     { label = "Settings", href = "#" },
//!     { label = "Help", href = "#" },
//! ]
//!
//! [redirects]
//! file = "_redirects"
//! status = 301                  # 301, 302, 307 or 308
//!
//! [processing]
//! max_processes = 4             # Max parallel render workers (omit for auto = CPU cores)
//!
//! [[head.tags]]                 # Extra <head> tags added to every page
//! type = "meta"
//! attributes = { name = "robots", content = "noindex" }
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::head::HeadTag;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding exported documents, relative to the content root.
    #[serde(default = "default_documents_dir")]
    pub documents_dir: String,
    /// Page colors, exposed to the stylesheet as CSS custom properties.
    pub colors: ColorConfig,
    /// Home page header: logo and navigation links.
    pub header: HeaderConfig,
    /// Home page footer links.
    pub footer: FooterConfig,
    /// Tags appended to every page's `<head>`.
    pub head: HeadSettings,
    /// Redirect table output.
    pub redirects: RedirectsConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

fn default_documents_dir() -> String {
    "documents".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            documents_dir: default_documents_dir(),
            colors: ColorConfig::default(),
            header: HeaderConfig::default(),
            footer: FooterConfig::default(),
            head: HeadSettings::default(),
            redirects: RedirectsConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

/// Redirect statuses a static host can express.
const REDIRECT_STATUSES: &[u16] = &[301, 302, 307, 308];

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.documents_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "documents_dir must not be empty".into(),
            ));
        }
        if !REDIRECT_STATUSES.contains(&self.redirects.status) {
            return Err(ConfigError::Validation(format!(
                "redirects.status must be one of {:?}, got {}",
                REDIRECT_STATUSES, self.redirects.status
            )));
        }
        if self.redirects.file.is_empty()
            || self.redirects.file.contains('/')
            || self.redirects.file.contains('\\')
        {
            return Err(ConfigError::Validation(
                "redirects.file must be a plain file name".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        for link in self.header.links.iter().chain(&self.footer.links) {
            if link.label.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "link to '{}' has an empty label",
                    link.href
                )));
            }
        }
        Ok(())
    }
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel render workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Color palette shared by all templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub background: String,
    pub text: String,
    /// Secondary text: dates, vote stats, footer links.
    pub text_muted: String,
    /// Promoted banner background.
    pub accent: String,
    /// Short-description callout background.
    pub callout: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            text: "#000000".to_string(),
            text_muted: "#6B7280".to_string(),
            accent: "#22C55E".to_string(),
            callout: "#FFFFFF".to_string(),
        }
    }
}

/// A labelled navigation link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkConfig {
    pub label: String,
    pub href: String,
}

impl LinkConfig {
    fn placeholder(label: &str) -> Self {
        Self {
            label: label.to_string(),
            href: "#".to_string(),
        }
    }
}

/// Header shown on the home page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderConfig {
    /// Logo image URL. Without one, the company name is shown as text.
    pub logo: Option<String>,
    /// Company name; screen-reader text for the logo link.
    pub company_name: String,
    pub links: Vec<LinkConfig>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            logo: None,
            company_name: "Help Center".to_string(),
            links: vec![
                LinkConfig::placeholder("About"),
                LinkConfig::placeholder("Membership"),
                LinkConfig::placeholder("Contribute"),
            ],
        }
    }
}

/// Footer shown on the home page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FooterConfig {
    pub links: Vec<LinkConfig>,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            links: vec![
                LinkConfig::placeholder("Privacy"),
                LinkConfig::placeholder("Terms"),
                LinkConfig::placeholder("Settings"),
                LinkConfig::placeholder("Help"),
            ],
        }
    }
}

/// Site-wide `<head>` additions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadSettings {
    pub tags: Vec<HeadTag>,
}

/// Redirect table settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RedirectsConfig {
    /// File name written in the output root.
    pub file: String,
    /// HTTP status for every redirect line.
    pub status: u16,
}

impl Default for RedirectsConfig {
    fn default() -> Self {
        Self {
            file: "_redirects".to_string(),
            status: 301,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a TOML file as a raw value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_file(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load the `config.toml` from a content root as a raw TOML value.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    load_raw_file(&root.join("config.toml"))
}

/// Merge overlays onto a base value in order, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given content root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    load_config_with_overlay(root, None)
}

/// Like [`load_config`], with an extra file layered on top of the root config.
///
/// An explicitly named overlay that does not exist is an error; a missing
/// root `config.toml` is not.
pub fn load_config_with_overlay(
    root: &Path,
    overlay: Option<&Path>,
) -> Result<SiteConfig, ConfigError> {
    let mut layers = Vec::new();
    if let Some(root_value) = load_raw_config(root)? {
        layers.push(root_value);
    }
    if let Some(path) = overlay {
        let value = load_raw_file(path)?.ok_or_else(|| {
            ConfigError::Validation(format!("config file not found: {}", path.display()))
        })?;
        layers.push(value);
    }
    resolve_config(stock_defaults_value(), layers)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Help Site Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the content root. A second file passed with --config
# is layered on top of it; each layer only needs the keys it overrides.
# Unknown keys will cause an error.

# Directory holding exported documents (*.json), relative to the content root.
documents_dir = "documents"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
background = "#FFFFFF"
text = "#000000"
text_muted = "#6B7280"    # Dates, vote stats, footer links
accent = "#22C55E"        # Promoted banner
callout = "#FFFFFF"       # Short-description callout box

# ---------------------------------------------------------------------------
# Home page header
# ---------------------------------------------------------------------------
[header]
# Screen-reader text for the logo link (shown as text when no logo is set).
company_name = "Help Center"
# Logo image URL.
# logo = "https://example.com/logo.png"
links = [
    { label = "About", href = "#" },
    { label = "Membership", href = "#" },
    { label = "Contribute", href = "#" },
]

# ---------------------------------------------------------------------------
# Home page footer
# ---------------------------------------------------------------------------
[footer]
links = [
    { label = "Privacy", href = "#" },
    { label = "Terms", href = "#" },
    { label = "Settings", href = "#" },
    { label = "Help", href = "#" },
]

# ---------------------------------------------------------------------------
# Redirects
# ---------------------------------------------------------------------------
[redirects]
# Redirect table written to the output root, one "/from /to status" per line.
file = "_redirects"
# One of 301, 302, 307, 308.
status = 301

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel render workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4

# ---------------------------------------------------------------------------
# Extra <head> tags for every page
# ---------------------------------------------------------------------------
[head]
tags = []
# [[head.tags]]
# type = "meta"
# attributes = { name = "robots", content = "noindex" }
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-accent: {accent};
    --color-callout: {callout};
}}"#,
        background = colors.background,
        text = colors.text,
        text_muted = colors.text_muted,
        accent = colors.accent,
        callout = colors.callout,
    )
}
