//! Notes nodes -- create and read notes in Notes.app via AppleScript.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use macflow_node::validate::require_at_least_i64;
use macflow_node::{Node, NodeError, NodeMetadata, OutputKind, ProcessingContext, Result};

use crate::script::{escape_applescript, parse_delimited_records, run_osascript};

const SURFACE: &str = "Notes";

/// One note row returned by [`ReadNotes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub body: String,
    pub folder: String,
}

// ---------------------------------------------------------------------------
// CreateNote
// ---------------------------------------------------------------------------

/// Create a single note in a named folder, creating the folder if missing.
///
/// At least one of `title` and `body` must be non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateNote {
    /// Note title.
    pub title: String,
    /// Note body.
    pub body: String,
    /// Target folder name.
    pub folder: String,
}

impl Default for CreateNote {
    fn default() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            folder: "Notes".into(),
        }
    }
}

impl CreateNote {
    const NODE_TYPE: &'static str = "apple.notes.CreateNote";

    fn build_script(&self) -> String {
        let title = escape_applescript(&self.title);
        let body = escape_applescript(&self.body);
        let folder = escape_applescript(&self.folder);
        format!(
            "tell application \"Notes\"\n\
             \tif not (exists folder \"{folder}\") then\n\
             \t\tmake new folder with properties {{name:\"{folder}\"}}\n\
             \tend if\n\
             \ttell folder \"{folder}\"\n\
             \t\tmake new note with properties {{name:\"{title}\", body:\"{body}\"}}\n\
             \tend tell\n\
             end tell"
        )
    }
}

#[async_trait]
impl Node for CreateNote {
    type Output = ();

    fn metadata() -> NodeMetadata {
        NodeMetadata {
            node_type: Self::NODE_TYPE.into(),
            description: "Create a single note in Notes.app".into(),
            surface: SURFACE.into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string", "default": "" },
                    "body": { "type": "string", "default": "" },
                    "folder": { "type": "string", "default": "Notes" }
                },
                "required": []
            }),
            output: OutputKind::None,
        }
    }

    async fn process(&self, _context: &ProcessingContext) -> Result<()> {
        if self.title.trim().is_empty() && self.body.trim().is_empty() {
            return Err(NodeError::Validation {
                node: Self::NODE_TYPE,
                parameter: "title",
                reason: "title or body must be non-empty".into(),
            });
        }

        debug!(title = %self.title, folder = %self.folder, "creating note");
        run_osascript(Self::NODE_TYPE, SURFACE, &self.build_script()).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ReadNotes
// ---------------------------------------------------------------------------

/// Read notes across all folders, capped both in total and per folder.
///
/// Hitting either cap truncates the result; it is never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadNotes {
    /// Maximum number of notes returned in total; must be non-negative.
    pub note_limit: i64,
    /// Maximum number of notes returned per folder; must be non-negative.
    pub note_limit_per_folder: i64,
}

impl Default for ReadNotes {
    fn default() -> Self {
        Self {
            note_limit: 10,
            note_limit_per_folder: 5,
        }
    }
}

/// Enforce the total and per-folder caps over parsed notes, preserving the
/// surface's ordering.
fn apply_note_caps(notes: Vec<Note>, total: usize, per_folder: usize) -> Vec<Note> {
    let mut folder_counts: std::collections::HashMap<String, usize> =
        std::collections::HashMap::new();
    let mut kept = Vec::new();
    for note in notes {
        if kept.len() >= total {
            break;
        }
        let count = folder_counts.entry(note.folder.clone()).or_insert(0);
        if *count >= per_folder {
            continue;
        }
        *count += 1;
        kept.push(note);
    }
    kept
}

impl ReadNotes {
    const NODE_TYPE: &'static str = "apple.notes.ReadNotes";

    fn build_script(&self) -> String {
        format!(
            "set output to \"\"\n\
             set totalCount to 0\n\
             set maxNotes to {total}\n\
             set maxPerFolder to {per_folder}\n\
             tell application \"Notes\"\n\
             \trepeat with nf in folders\n\
             \t\tif totalCount >= maxNotes then exit repeat\n\
             \t\tset folderCount to 0\n\
             \t\tset folderName to name of nf\n\
             \t\trepeat with n in notes of nf\n\
             \t\t\tif totalCount >= maxNotes then exit repeat\n\
             \t\t\tif folderCount >= maxPerFolder then exit repeat\n\
             \t\t\tset output to output & (name of n) & \"|||\" & (plaintext of n) & \"|||\" & folderName & \"###NOTE###\"\n\
             \t\t\tset totalCount to totalCount + 1\n\
             \t\t\tset folderCount to folderCount + 1\n\
             \t\tend repeat\n\
             \tend repeat\n\
             end tell\n\
             return output",
            total = self.note_limit,
            per_folder = self.note_limit_per_folder,
        )
    }
}

#[async_trait]
impl Node for ReadNotes {
    type Output = Vec<Note>;

    fn metadata() -> NodeMetadata {
        NodeMetadata {
            node_type: Self::NODE_TYPE.into(),
            description: "Read notes from Notes.app with total and per-folder caps".into(),
            surface: SURFACE.into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "note_limit": { "type": "integer", "default": 10, "minimum": 0 },
                    "note_limit_per_folder": { "type": "integer", "default": 5, "minimum": 0 }
                },
                "required": []
            }),
            output: OutputKind::RecordList,
        }
    }

    async fn process(&self, _context: &ProcessingContext) -> Result<Vec<Note>> {
        require_at_least_i64(Self::NODE_TYPE, "note_limit", self.note_limit, 0)?;
        require_at_least_i64(
            Self::NODE_TYPE,
            "note_limit_per_folder",
            self.note_limit_per_folder,
            0,
        )?;

        debug!(
            note_limit = self.note_limit,
            note_limit_per_folder = self.note_limit_per_folder,
            "reading notes"
        );
        let raw = run_osascript(Self::NODE_TYPE, SURFACE, &self.build_script()).await?;

        let notes: Vec<Note> = parse_delimited_records(&raw, "###NOTE###", "|||", 3)
            .into_iter()
            .map(|mut fields| Note {
                folder: fields.remove(2),
                body: fields.remove(1),
                title: fields.remove(0),
            })
            .collect();

        // The script already limits its scan; the caps are re-applied here so
        // the invariant holds even if the script over-reports.
        Ok(apply_note_caps(
            notes,
            self.note_limit as usize,
            self.note_limit_per_folder as usize,
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
