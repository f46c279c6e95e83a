//! JSON snapshot of the glyph being edited.
//!
//! Not a font format: just the control points and the edit state, enough to
//! reload a session's result elsewhere.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use glyph_outline::{ControlPoint, GlyphModel};
use log::info;
use serde::Serialize;
use thiserror::Error;

use crate::edit_state::EditState;

pub const SNAPSHOT_NAME:    &str = "Custom Gestural Glyph";
pub const SNAPSHOT_VERSION: &str = "1.0";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SnapshotMetadata {
    pub name:    String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GlyphSnapshot {
    pub character:       char,
    pub control_points:  Vec<ControlPoint>,
    pub transformations: EditState,
    pub metadata:        SnapshotMetadata,
}

impl GlyphSnapshot {
    pub fn capture(glyph: &GlyphModel, edit: &EditState) -> Self {
        GlyphSnapshot {
            character:       glyph.letter(),
            control_points:  glyph.points().to_vec(),
            transformations: *edit,
            metadata: SnapshotMetadata {
                name:    SNAPSHOT_NAME.to_string(),
                version: SNAPSHOT_VERSION.to_string(),
            },
        }
    }

    /// `custom-glyph-<letter>.json`
    pub fn file_name(&self) -> String {
        format!("custom-glyph-{}.json", self.character)
    }

    /// Pretty-printed JSON.
    pub fn write_json<W: Write>(&self, mut w: W) -> Result<(), SnapshotError> {
        serde_json::to_writer_pretty(&mut w, self)?;
        w.write_all(b"\n")?;
        w.flush()?;
        Ok(())
    }

    /// Write into `dir` under [`file_name`](Self::file_name); returns the path.
    pub fn save_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, SnapshotError> {
        let path = dir.as_ref().join(self.file_name());
        let file = File::create(&path)?;
        self.write_json(BufWriter::new(file))?;
        info!("snapshot: wrote {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn snapshot() -> GlyphSnapshot {
        let mut glyph = GlyphModel::new('B', 800.0, 600.0);
        let mut edit = EditState::default();
        edit.set_scale(1.5);
        glyph.apply_deformation(edit.deformation());
        GlyphSnapshot::capture(&glyph, &edit)
    }

    #[test]
    fn json_layout() {
        let mut buf = Vec::new();
        snapshot().write_json(&mut buf).unwrap();
        let v: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["character"], "B");
        assert_eq!(v["transformations"]["scale"], 1.5);
        assert_eq!(v["transformations"]["smoothness"].as_f64().map(|s| (s * 10.0).round()), Some(8.0));
        assert_eq!(v["metadata"]["version"], "1.0");
        let points = v["control_points"].as_array().unwrap();
        assert_eq!(points.len(), 10);
        assert!(points.iter().any(|p| p["curve"]["kind"] == "quadratic"));
    }

    #[test]
    fn file_name_uses_letter() {
        assert_eq!(snapshot().file_name(), "custom-glyph-B.json");
    }

    #[test]
    fn save_to_dir_round_trip() {
        let dir = std::env::temp_dir().join(format!("gesture_edit_snap_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = snapshot().save_to_dir(&dir).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_dir_all(&dir);
        assert!(path.ends_with("custom-glyph-B.json"));
        assert!(text.contains("\"character\": \"B\""));
    }

    #[test]
    fn missing_dir_is_io_error() {
        let err = snapshot().save_to_dir("/definitely/not/here").unwrap_err();
        assert!(matches!(err, SnapshotError::Io(_)));
    }
}
