//! Infrastructure layer for vbrowser-bridge.
//!
//! # Responsibilities
//!
//! - Concrete clocks for the throttler
//! - A CPU-side texture and display surface (`software_texture`)
//! - A session provider that records forwarded events instead of talking to a
//!   real remote browser (`recording_session`)
//! - Loading the TOML config file and JSON-lines replay scripts
//!
//! # What does NOT belong here?
//!
//! - Normalization, throttling or presentation decisions (that is
//!   `vbrowser-core`, driven by the application layer)

pub mod clock;
pub mod config_file;
pub mod recording_session;
pub mod script;
pub mod software_texture;

pub use clock::{ManualClock, MonotonicClock};
pub use config_file::load_from_path;
pub use recording_session::{RecordedEvent, RecordingSessionProvider};
pub use script::{
    load_script, parse_script, run_script, FrameSource, FrameSpec, ReplaySummary, ScriptAction,
    ScriptError, ScriptStep,
};
pub use software_texture::{RgbaImage, SoftwareSurface, SoftwareTexture};
