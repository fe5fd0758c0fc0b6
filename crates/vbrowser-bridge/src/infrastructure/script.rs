//! JSON-lines replay scripts.
//!
//! A script is a time-ordered list of things the outside world does to a
//! bridge: scene pointer events, session frames and session lifecycle
//! notifications.  One JSON object per line; blank lines and lines starting
//! with `#` are skipped.
//!
//! ```text
//! {"at_ms":0,"session":{"event":"connectionStateChanged","state":"playing"}}
//! {"at_ms":0,"frame":{"source":"bitmap","width":640,"height":360,"rgba":[32,32,32,255]}}
//! {"at_ms":5,"input":{"type":"pointerDown","xyz":[0.0,0.0,0.0]}}
//! {"at_ms":40,"input":{"type":"pointerMove","xyz":[0.1,0.0,0.0]}}
//! ```
//!
//! `at_ms` drives a [`ManualClock`], so throttling decisions during a replay
//! are exactly reproducible.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use vbrowser_core::{FrameSample, FrameTarget, InputEvent, PresentOutcome};

use crate::application::session_bridge::{DisplaySurface, ForwardOutcome, SessionBridge};
use crate::domain::config::MAX_TEXTURE_SIDE;
use crate::domain::lifecycle::SessionEvent;
use crate::infrastructure::clock::ManualClock;
use crate::infrastructure::software_texture::RgbaImage;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("I/O error reading script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("script line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("script line {line}: at_ms {at_ms} is earlier than the previous step ({previous})")]
    OutOfOrder { line: usize, at_ms: u64, previous: u64 },

    #[error("script line {line}: frame {width}x{height} exceeds the {max} pixel side limit")]
    FrameTooLarge { line: usize, width: u32, height: u32, max: u32 },
}

/// One timed step of a script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptStep {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptAction {
    Input(InputEvent),
    Frame(FrameSpec),
    Session(SessionEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameSource {
    Bitmap,
    Video,
}

/// A synthetic solid-colour frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrameSpec {
    pub source: FrameSource,
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_rgba")]
    pub rgba: [u8; 4],
}

fn default_rgba() -> [u8; 4] {
    [0, 0, 0, 255]
}

impl FrameSpec {
    pub fn fits(&self) -> bool {
        self.width <= MAX_TEXTURE_SIDE && self.height <= MAX_TEXTURE_SIDE
    }

    /// Builds the frame, or `None` if it does not [`fit`](Self::fits).
    pub fn to_sample(&self) -> Option<FrameSample<RgbaImage>> {
        let image = RgbaImage::solid(self.width, self.height, self.rgba)?;
        let sample = match self.source {
            FrameSource::Bitmap => FrameSample::Bitmap {
                image,
                width: self.width,
                height: self.height,
            },
            FrameSource::Video => FrameSample::VideoFrame {
                element: image,
                intrinsic_width: self.width,
                intrinsic_height: self.height,
            },
        };
        Some(sample)
    }
}

/// Counts of what happened during a replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub sent: usize,
    pub ignored: usize,
    pub no_session: usize,
    pub throttled: usize,
    pub failed: usize,
    pub frames_bound: usize,
    pub frames_redrawn: usize,
    pub frames_discarded: usize,
    pub session_events: usize,
}

/// Parses a script from any line-oriented reader.
///
/// # Errors
///
/// - [`ScriptError::Parse`] for malformed lines.
/// - [`ScriptError::OutOfOrder`] if `at_ms` decreases.
/// - [`ScriptError::FrameTooLarge`] if a frame side exceeds [`MAX_TEXTURE_SIDE`].
/// - [`ScriptError::Io`] if the reader fails.
pub fn parse_script<R: BufRead>(reader: R, origin: &Path) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps: Vec<ScriptStep> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| ScriptError::Io {
            path: origin.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let step: ScriptStep = serde_json::from_str(trimmed).map_err(|source| ScriptError::Parse {
            line: line_no,
            source,
        })?;
        if let Some(previous) = steps.last().map(|s| s.at_ms) {
            if step.at_ms < previous {
                return Err(ScriptError::OutOfOrder {
                    line: line_no,
                    at_ms: step.at_ms,
                    previous,
                });
            }
        }
        if let ScriptAction::Frame(spec) = &step.action {
            if !spec.fits() {
                return Err(ScriptError::FrameTooLarge {
                    line: line_no,
                    width: spec.width,
                    height: spec.height,
                    max: MAX_TEXTURE_SIDE,
                });
            }
        }
        steps.push(step);
    }

    Ok(steps)
}

/// Reads and parses the script file at `path`.
///
/// # Errors
///
/// See [`parse_script`].
pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>, ScriptError> {
    let file = std::fs::File::open(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(std::io::BufReader::new(file), path)
}

/// Feeds every step into `bridge`, setting `clock` to each step's `at_ms`
/// first.
///
/// Send failures are counted, not propagated: the bridge has already logged
/// them, and the rest of the script still runs.
pub fn run_script<S>(bridge: &mut SessionBridge<S>, steps: &[ScriptStep], clock: &ManualClock) -> ReplaySummary
where
    S: DisplaySurface,
    S::Texture: FrameTarget<Image = RgbaImage>,
{
    let mut summary = ReplaySummary::default();

    for step in steps {
        clock.set(step.at_ms);
        match &step.action {
            ScriptAction::Input(event) => match bridge.handle_input(event) {
                Ok(ForwardOutcome::Sent(_)) => summary.sent += 1,
                Ok(ForwardOutcome::Ignored) => summary.ignored += 1,
                Ok(ForwardOutcome::NoSession) => summary.no_session += 1,
                Ok(ForwardOutcome::Throttled) => summary.throttled += 1,
                Err(_) => summary.failed += 1,
            },
            ScriptAction::Frame(spec) => {
                let Some(sample) = spec.to_sample() else {
                    warn!(width = spec.width, height = spec.height, "oversized frame skipped");
                    summary.frames_discarded += 1;
                    continue;
                };
                match bridge.on_frame(sample) {
                    Some(PresentOutcome::Bound) => summary.frames_bound += 1,
                    Some(PresentOutcome::Redrawn) => summary.frames_redrawn += 1,
                    None => summary.frames_discarded += 1,
                }
            }
            ScriptAction::Session(event) => {
                bridge.on_session_event(event);
                summary.session_events += 1;
            }
        }
    }

    debug!(?summary, "replay finished");
    summary
}

// ── Tests ─────────────────────────────────────────────────────────────────────
