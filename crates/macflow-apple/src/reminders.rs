//! Reminders node -- create reminders in Reminders.app via AppleScript.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use macflow_node::validate::{require_non_empty, require_range_i64};
use macflow_node::{Node, NodeMetadata, OutputKind, ProcessingContext, Result};

use crate::script::{escape_applescript, run_osascript};

const SURFACE: &str = "Reminders";

/// Create a single reminder in a named list.
///
/// `due_date` is optional — omitting it creates an undated reminder.
/// Priority is an integer in `[0, 5]`, 0 meaning none.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateReminder {
    /// Reminder title.
    pub title: String,
    /// Optional body text; omitted when empty.
    pub notes: String,
    /// Target list name.
    pub list: String,
    /// Priority in [0, 5]; 0 means none.
    pub priority: i64,
    /// Optional due date, local time.
    pub due_date: Option<NaiveDateTime>,
}

impl Default for CreateReminder {
    fn default() -> Self {
        Self {
            title: String::new(),
            notes: String::new(),
            list: "Reminders".into(),
            priority: 0,
            due_date: None,
        }
    }
}

impl CreateReminder {
    const NODE_TYPE: &'static str = "apple.reminders.CreateReminder";

    fn build_script(&self) -> String {
        let title = escape_applescript(&self.title);
        let list = escape_applescript(&self.list);

        let mut properties = format!("name:\"{title}\", priority:{}", self.priority);
        if !self.notes.is_empty() {
            properties.push_str(&format!(", body:\"{}\"", escape_applescript(&self.notes)));
        }

        let mut script = String::new();
        if let Some(due) = &self.due_date {
            properties.push_str(", due date:dueDate");
            script.push_str(&format!(
                "set dueDate to (current date)\n\
                 set day of dueDate to 1\n\
                 set year of dueDate to {}\n\
                 set month of dueDate to {}\n\
                 set day of dueDate to {}\n\
                 set time of dueDate to {}\n",
                due.year(),
                due.month(),
                due.day(),
                due.time().num_seconds_from_midnight(),
            ));
        }

        script.push_str(&format!(
            "tell application \"Reminders\"\n\
             \ttell list \"{list}\"\n\
             \t\tmake new reminder with properties {{{properties}}}\n\
             \tend tell\n\
             end tell"
        ));
        script
    }
}

#[async_trait]
impl Node for CreateReminder {
    type Output = ();

    fn metadata() -> NodeMetadata {
        NodeMetadata {
            node_type: Self::NODE_TYPE.into(),
            description: "Create a single reminder in Reminders.app".into(),
            surface: SURFACE.into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string", "default": "" },
                    "notes": { "type": "string", "default": "" },
                    "list": { "type": "string", "default": "Reminders" },
                    "priority": { "type": "integer", "default": 0, "minimum": 0, "maximum": 5 },
                    "due_date": {
                        "type": ["string", "null"],
                        "format": "date-time",
                        "default": null
                    }
                },
                "required": ["title"]
            }),
            output: OutputKind::None,
        }
    }

    async fn process(&self, _context: &ProcessingContext) -> Result<()> {
        require_non_empty(Self::NODE_TYPE, "title", &self.title)?;
        require_range_i64(Self::NODE_TYPE, "priority", self.priority, 0, 5)?;

        debug!(
            title = %self.title,
            list = %self.list,
            dated = self.due_date.is_some(),
            "creating reminder"
        );
        run_osascript(Self::NODE_TYPE, SURFACE, &self.build_script()).await?;
        Ok(())
    }
}
