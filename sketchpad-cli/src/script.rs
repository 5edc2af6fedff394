//! Recorded session scripts.
//!
//! A script is a JSON array of steps applied in order:
//!
//! ```json
//! [
//!   {"pointer": {"phase": "enter", "x": 10, "y": 10}},
//!   {"pointer": {"phase": "down", "x": 10, "y": 10}},
//!   {"pointer": {"phase": "move", "x": 20, "y": 10}},
//!   {"pointer": {"phase": "up", "x": 20, "y": 10}},
//!   {"tool": {"sticker": "🦆"}},
//!   "cycle_thickness",
//!   "undo",
//!   {"export": {"scale": 2.0}}
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use sketchpad_core::{Color, PointerEvent};
use thiserror::Error;

/// Errors raised while loading a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script file could not be read.
    #[error("Failed to read script {path}: {source}")]
    Io {
        /// Script path.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The script is not valid JSON or has unknown steps.
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which tool a toolbar button selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolChoice {
    /// The marker.
    Marker,
    /// A sticker from the palette.
    Sticker(String),
}

/// One recorded step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// A raw pointer event.
    Pointer(PointerEvent),
    /// Select a tool.
    Tool(ToolChoice),
    /// Advance the marker thickness tier.
    CycleThickness,
    /// Set the marker color.
    Color(Color),
    /// Register a custom sticker and select it.
    CustomSticker(String),
    /// Undo one gesture.
    Undo,
    /// Redo one gesture.
    Redo,
    /// Clear the canvas.
    Clear,
    /// Export a snapshot at the given scale.
    Export {
        /// Scale factor.
        scale: f32,
    },
}

/// Parse a script from JSON text.
///
/// # Errors
///
/// Returns [`ScriptError::Parse`] for malformed JSON or unknown steps.
pub fn parse_script(json: &str) -> Result<Vec<Step>, ScriptError> {
    Ok(serde_json::from_str(json)?)
}

/// Load a script from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_script(path: &Path) -> Result<Vec<Step>, ScriptError> {
    let json = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_script(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_step_kinds() {
        let steps = parse_script(
            r##"[
                {"pointer": {"phase": "down", "x": 1, "y": 2}},
                {"tool": "marker"},
                {"tool": {"sticker": "🦆"}},
                "cycle_thickness",
                {"color": "#ff0000"},
                {"custom_sticker": "hi"},
                "undo",
                "redo",
                "clear",
                {"export": {"scale": 2.5}}
            ]"##,
        )
        .expect("parse");

        assert_eq!(
            steps,
            vec![
                Step::Pointer(PointerEvent::down(1.0, 2.0)),
                Step::Tool(ToolChoice::Marker),
                Step::Tool(ToolChoice::Sticker("🦆".to_string())),
                Step::CycleThickness,
                Step::Color(Color::rgb(255, 0, 0)),
                Step::CustomSticker("hi".to_string()),
                Step::Undo,
                Step::Redo,
                Step::Clear,
                Step::Export { scale: 2.5 },
            ]
        );
    }

    #[test]
    fn test_parse_rejects_unknown_step() {
        assert!(matches!(
            parse_script(r#"["explode"]"#),
            Err(ScriptError::Parse(_))
        ));
        assert!(parse_script(r#"[{"color": "blue"}]"#).is_err());
    }
}
