//! Saved Sketches
//!
//! The list of sketch parameter sets the user saved. Entries are named
//! "Sketch 1", "Sketch 2", ... in save order and can be loaded back into the
//! editor inputs. The list can be written to and read from a RON file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::feature::{Operation, SketchMode, SketchParams};

/// Library file format version
const LIBRARY_VERSION: u32 = 1;

/// Errors for the sketch library
#[derive(Debug, Clone, Error)]
pub enum LibraryError {
    #[error("Sketch not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

/// Dimensions stored for a saved sketch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordShape {
    Rectangle { width: u32, height: u32 },
    Circle { radius: u32 },
}

impl RecordShape {
    /// Sketch mode the dimensions belong to
    pub fn mode(&self) -> SketchMode {
        match self {
            RecordShape::Rectangle { .. } => SketchMode::Rectangle,
            RecordShape::Circle { .. } => SketchMode::Circle,
        }
    }
}

/// Parameters captured when a sketch is saved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SketchRecord {
    pub depth: u32,
    /// Records written without an operation load as extrusions
    #[serde(default)]
    pub operation: Operation,
    pub shape: RecordShape,
}

impl From<&SketchParams> for SketchRecord {
    fn from(params: &SketchParams) -> Self {
        let shape = match params.mode {
            SketchMode::Rectangle => RecordShape::Rectangle {
                width: params.width,
                height: params.height,
            },
            SketchMode::Circle => RecordShape::Circle {
                radius: params.radius,
            },
        };
        Self {
            depth: params.depth,
            operation: params.operation,
            shape,
        }
    }
}

impl SketchRecord {
    /// Copy the record into the editor inputs.
    ///
    /// Dimensions of the other mode are left untouched.
    pub fn apply_to(&self, params: &mut SketchParams) {
        params.mode = self.shape.mode();
        params.operation = self.operation;
        params.depth = self.depth;
        match self.shape {
            RecordShape::Rectangle { width, height } => {
                params.width = width;
                params.height = height;
            }
            RecordShape::Circle { radius } => params.radius = radius,
        }
    }
}

/// A named saved sketch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSketch {
    pub name: String,
    pub params: SketchRecord,
}

#[derive(Serialize, Deserialize)]
struct LibraryData {
    version: u32,
    sketches: Vec<SavedSketch>,
}

/// Ordered list of saved sketches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SketchLibrary {
    sketches: Vec<SavedSketch>,
}

impl SketchLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Save the current parameters as "Sketch N" and return the new entry
    pub fn save(&mut self, params: &SketchParams) -> &SavedSketch {
        let name = format!("Sketch {}", self.sketches.len() + 1);
        self.sketches.push(SavedSketch {
            name,
            params: SketchRecord::from(params),
        });
        &self.sketches[self.sketches.len() - 1]
    }

    /// Look up a sketch by name
    pub fn find(&self, name: &str) -> Option<&SavedSketch> {
        self.sketches.iter().find(|s| s.name == name)
    }

    /// Load a saved sketch into `params`
    pub fn apply(&self, name: &str, params: &mut SketchParams) -> Result<(), LibraryError> {
        let sketch = self
            .find(name)
            .ok_or_else(|| LibraryError::NotFound(name.to_string()))?;
        sketch.params.apply_to(params);
        Ok(())
    }

    /// All saved sketches in save order
    pub fn sketches(&self) -> &[SavedSketch] {
        &self.sketches
    }

    pub fn len(&self) -> usize {
        self.sketches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sketches.is_empty()
    }

    /// Serialize to a RON string
    pub fn to_ron(&self) -> Result<String, LibraryError> {
        let data = LibraryData {
            version: LIBRARY_VERSION,
            sketches: self.sketches.clone(),
        };
        ron::ser::to_string_pretty(&data, ron::ser::PrettyConfig::default())
            .map_err(|e| LibraryError::Serialize(e.to_string()))
    }

    /// Parse from a RON string
    pub fn from_ron(content: &str) -> Result<Self, LibraryError> {
        let data: LibraryData =
            ron::from_str(content).map_err(|e| LibraryError::Deserialize(e.to_string()))?;
        if data.version > LIBRARY_VERSION {
            return Err(LibraryError::Deserialize(format!(
                "Unsupported library version {}",
                data.version
            )));
        }
        Ok(Self {
            sketches: data.sketches,
        })
    }

    /// Save the library to a file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), LibraryError> {
        let content = self.to_ron()?;
        std::fs::write(path.as_ref(), content).map_err(|e| LibraryError::Io(e.to_string()))?;
        Ok(())
    }

    /// Load a library from a file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| LibraryError::Io(e.to_string()))?;
        Self::from_ron(&content)
    }
}
