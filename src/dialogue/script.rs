//! Dialogue script data and the RON asset format it is loaded from.
//!
//! ```ron
//! (
//!     version: 1,
//!     nodes: [
//!         (text: "Nurse: The rain came down hard yesterday"),
//!         (choices: Some(["Rain is just rain", "Did it help?"])),
//!     ],
//! )
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ScriptError;

/// Format version this build reads and writes.
pub const SCRIPT_FORMAT_VERSION: u32 = 1;

/// One step of a script: a line of text, or a set of player choices.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogueNode {
    /// Line shown to the player. Ignored on choice nodes.
    #[serde(default)]
    pub text: String,
    /// Options offered to the player. `None` or empty makes this a text line.
    #[serde(default)]
    pub choices: Option<Vec<String>>,
}

impl DialogueNode {
    /// A plain text line.
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            choices: None,
        }
    }

    /// A choice node offering `options` in order.
    pub fn choice<S: Into<String>>(options: impl IntoIterator<Item = S>) -> Self {
        Self {
            text: String::new(),
            choices: Some(options.into_iter().map(Into::into).collect()),
        }
    }

    /// The options of a choice node; `None` for text lines.
    pub fn options(&self) -> Option<&[String]> {
        self.choices.as_deref().filter(|c| !c.is_empty())
    }

    /// `true` when this node waits for the player to pick an option.
    pub fn is_choice(&self) -> bool {
        self.options().is_some()
    }
}

/// Ordered, immutable list of nodes for one playthrough.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Script {
    nodes: Vec<DialogueNode>,
}

impl Script {
    /// Wraps `nodes` in playback order.
    pub fn new(nodes: Vec<DialogueNode>) -> Self {
        Self { nodes }
    }

    /// Parses a versioned RON script asset.
    pub fn from_ron_str(source: &str) -> Result<Self, ScriptError> {
        let asset: ScriptAsset = ron::from_str(source)?;
        Self::try_from(asset)
    }

    /// Node at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&DialogueNode> {
        self.nodes.get(index)
    }

    /// All nodes in order.
    pub fn nodes(&self) -> &[DialogueNode] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when there is nothing to play.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// On-disk shape of a script.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScriptAsset {
    /// Must equal [`SCRIPT_FORMAT_VERSION`].
    pub version: u32,
    /// Nodes in playback order.
    pub nodes: Vec<DialogueNode>,
}

impl TryFrom<ScriptAsset> for Script {
    type Error = ScriptError;

    fn try_from(asset: ScriptAsset) -> Result<Self, Self::Error> {
        if asset.version != SCRIPT_FORMAT_VERSION {
            return Err(ScriptError::UnsupportedVersion {
                found: asset.version,
                expected: SCRIPT_FORMAT_VERSION,
            });
        }
        Ok(Self::new(asset.nodes))
    }
}

/// Source of a [`Script`], decoupling content from the player.
pub trait ScriptLoader {
    /// Produces the script, or why it could not be read.
    fn load(&self) -> Result<Script, ScriptError>;
}

/// Loads a RON script asset from disk.
#[derive(Clone, Debug)]
pub struct RonFileLoader {
    path: PathBuf,
}

impl RonFileLoader {
    /// Loader for the file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// File this loader reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScriptLoader for RonFileLoader {
    fn load(&self) -> Result<Script, ScriptError> {
        let source = std::fs::read_to_string(&self.path).map_err(|source| ScriptError::Io {
            path: self.path.clone(),
            source,
        })?;
        Script::from_ron_str(&source)
    }
}

/// Parses a RON script held in memory.
#[derive(Clone, Debug)]
pub struct InlineRonLoader(pub String);

impl ScriptLoader for InlineRonLoader {
    fn load(&self) -> Result<Script, ScriptError> {
        Script::from_ron_str(&self.0)
    }
}
