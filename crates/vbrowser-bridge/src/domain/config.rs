//! Bridge configuration schema.
//!
//! [`BridgeConfig`] is read once at startup (see
//! [`crate::infrastructure::config_file`]) and then treated as read-only.
//!
//! ```toml
//! [session]
//! embed_url = "https://vm.example.com/embed/abc"
//! admin_token = "..."
//! timeout_ms = 5000
//! volume = 0.2
//!
//! [surface]
//! texture_width = 1280
//! texture_height = 720
//!
//! [interaction]
//! throttle_window_ms = 100
//! ```
//!
//! The `[session]` table is handed to the remote session provider as-is; the
//! bridge itself never reads anything from it but the embed URL for logging.
//! Every field except `embed_url` has a `#[serde(default = ...)]` so older or
//! minimal files keep loading.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vbrowser_core::{GeometryError, SurfaceDimensions, DEFAULT_THROTTLE_WINDOW_MS};

/// Largest accepted texture or frame side, in pixels.
pub const MAX_TEXTURE_SIDE: u32 = 8192;

/// Error type for loading and validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("session.embed_url must not be empty")]
    EmptyEmbedUrl,

    #[error("session.volume must be within 0.0..=1.0 (got {0})")]
    VolumeOutOfRange(f32),

    #[error("invalid surface: {0}")]
    Surface(#[from] GeometryError),

    #[error("surface texture {width}x{height} exceeds the {max} pixel side limit")]
    TextureTooLarge { width: u32, height: u32, max: u32 },
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BridgeConfig {
    pub session: SessionConfig,
    #[serde(default)]
    pub surface: SurfaceConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
}

/// Settings passed through to the remote session provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Embed URL of the virtual browser instance.
    pub embed_url: String,
    /// Token granting permission management and programmatic navigation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_token: Option<String>,
    /// How long the provider waits for the session before giving up.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Starting audio volume, `0.0..=1.0`.
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Starting video pause state.
    #[serde(default)]
    pub video_paused: bool,
    /// Whether keyboard events are delegated to the remote browser.
    #[serde(default = "default_true")]
    pub delegate_keyboard: bool,
    /// Forwarded to the provider's webhook authentication, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_user_id: Option<String>,
}

/// Texture-space size of the remote viewport shown on the surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurfaceConfig {
    #[serde(default = "default_texture_width")]
    pub texture_width: u32,
    #[serde(default = "default_texture_height")]
    pub texture_height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionConfig {
    /// Minimum spacing between forwarded move (and wheel) events.
    #[serde(default = "default_throttle_window_ms")]
    pub throttle_window_ms: u64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_timeout_ms() -> u64 {
    5_000
}
fn default_volume() -> f32 {
    0.2
}
fn default_true() -> bool {
    true
}
fn default_texture_width() -> u32 {
    1280
}
fn default_texture_height() -> u32 {
    720
}
fn default_throttle_window_ms() -> u64 {
    DEFAULT_THROTTLE_WINDOW_MS
}

impl SessionConfig {
    /// A config with every optional setting at its default.
    pub fn new(embed_url: impl Into<String>) -> Self {
        Self {
            embed_url: embed_url.into(),
            admin_token: None,
            timeout_ms: default_timeout_ms(),
            volume: default_volume(),
            video_paused: false,
            delegate_keyboard: default_true(),
            webhook_user_id: None,
        }
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            texture_width: default_texture_width(),
            texture_height: default_texture_height(),
        }
    }
}

impl SurfaceConfig {
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroDimension`] if either side is zero.
    pub fn dimensions(&self) -> Result<SurfaceDimensions, GeometryError> {
        SurfaceDimensions::new(self.texture_width, self.texture_height)
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            throttle_window_ms: default_throttle_window_ms(),
        }
    }
}

impl BridgeConfig {
    pub fn new(session: SessionConfig) -> Self {
        Self {
            session,
            surface: SurfaceConfig::default(),
            interaction: InteractionConfig::default(),
        }
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and the validation
    /// variants described on [`BridgeConfig::validate`].
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: BridgeConfig = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks the values serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyEmbedUrl`] if `session.embed_url` is blank.
    /// - [`ConfigError::VolumeOutOfRange`] if `session.volume` is outside `0.0..=1.0`.
    /// - [`ConfigError::Surface`] if a texture dimension is zero.
    /// - [`ConfigError::TextureTooLarge`] if a texture dimension exceeds
    ///   [`MAX_TEXTURE_SIDE`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.embed_url.trim().is_empty() {
            return Err(ConfigError::EmptyEmbedUrl);
        }
        if !(0.0..=1.0).contains(&self.session.volume) {
            return Err(ConfigError::VolumeOutOfRange(self.session.volume));
        }
        let dims = self.surface.dimensions()?;
        if dims.width > MAX_TEXTURE_SIDE || dims.height > MAX_TEXTURE_SIDE {
            return Err(ConfigError::TextureTooLarge {
                width: dims.width,
                height: dims.height,
                max: MAX_TEXTURE_SIDE,
            });
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
