//! Calendar nodes -- create and list events in Calendar.app via AppleScript.
//!
//! Event dates are never interpolated as formatted strings: AppleScript's
//! `date "..."` literal is locale-dependent, so scripts build each date
//! value component by component instead.

use async_trait::async_trait;
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use macflow_node::validate::{require_at_least_i64, require_non_empty};
use macflow_node::{Node, NodeError, NodeMetadata, OutputKind, ProcessingContext, Result};

use crate::script::{escape_applescript, parse_delimited_records, run_osascript};

const SURFACE: &str = "Calendar";

/// One event row returned by [`ListEvents`].  Dates are the surface's own
/// string rendering; ordering is whatever Calendar.app returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub start: String,
    pub end: String,
    pub title: String,
    pub location: String,
}

/// Emit AppleScript that assigns a date value built from components.
///
/// The day is first reset to 1 so that setting the month can never overflow
/// into the next one (e.g. day 31 while the variable still holds a 30-day
/// month).
fn applescript_date(var: &str, value: &NaiveDateTime) -> String {
    format!(
        "set {var} to (current date)\n\
         set day of {var} to 1\n\
         set year of {var} to {}\n\
         set month of {var} to {}\n\
         set day of {var} to {}\n\
         set time of {var} to {}",
        value.year(),
        value.month(),
        value.day(),
        value.time().num_seconds_from_midnight(),
    )
}

// ---------------------------------------------------------------------------
// CreateEvent
// ---------------------------------------------------------------------------

/// Create a single event in a named calendar.
///
/// `start` and `end` are naive datetimes interpreted in the invoking OS
/// session's local zone; `start` must precede `end`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateEvent {
    /// Event title.
    pub title: String,
    /// Event start, local time.
    pub start: NaiveDateTime,
    /// Event end, local time.
    pub end: NaiveDateTime,
    /// Optional location; omitted from the event when empty.
    pub location: String,
    /// Optional description; omitted from the event when empty.
    pub description: String,
    /// Target calendar name.
    pub calendar: String,
}

impl Default for CreateEvent {
    fn default() -> Self {
        Self {
            title: String::new(),
            start: NaiveDateTime::UNIX_EPOCH,
            end: NaiveDateTime::UNIX_EPOCH,
            location: String::new(),
            description: String::new(),
            calendar: "Calendar".into(),
        }
    }
}

impl CreateEvent {
    const NODE_TYPE: &'static str = "apple.calendar.CreateEvent";

    fn build_script(&self) -> String {
        let title = escape_applescript(&self.title);
        let calendar = escape_applescript(&self.calendar);

        let mut properties = format!("summary:\"{title}\", start date:startDate, end date:endDate");
        if !self.location.is_empty() {
            properties.push_str(&format!(", location:\"{}\"", escape_applescript(&self.location)));
        }
        if !self.description.is_empty() {
            properties.push_str(&format!(
                ", description:\"{}\"",
                escape_applescript(&self.description)
            ));
        }

        format!(
            "{}\n{}\n\
             tell application \"Calendar\"\n\
             \ttell calendar \"{calendar}\"\n\
             \t\tmake new event with properties {{{properties}}}\n\
             \tend tell\n\
             end tell",
            applescript_date("startDate", &self.start),
            applescript_date("endDate", &self.end),
        )
    }
}

#[async_trait]
impl Node for CreateEvent {
    type Output = ();

    fn metadata() -> NodeMetadata {
        NodeMetadata {
            node_type: Self::NODE_TYPE.into(),
            description: "Create a single event in Calendar.app".into(),
            surface: SURFACE.into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string", "default": "" },
                    "start": { "type": "string", "format": "date-time" },
                    "end": { "type": "string", "format": "date-time" },
                    "location": { "type": "string", "default": "" },
                    "description": { "type": "string", "default": "" },
                    "calendar": { "type": "string", "default": "Calendar" }
                },
                "required": ["title", "start", "end"]
            }),
            output: OutputKind::None,
        }
    }

    async fn process(&self, _context: &ProcessingContext) -> Result<()> {
        require_non_empty(Self::NODE_TYPE, "title", &self.title)?;
        if self.start >= self.end {
            return Err(NodeError::Validation {
                node: Self::NODE_TYPE,
                parameter: "start",
                reason: format!("start ({}) must precede end ({})", self.start, self.end),
            });
        }

        debug!(title = %self.title, calendar = %self.calendar, "creating calendar event");
        run_osascript(Self::NODE_TYPE, SURFACE, &self.build_script()).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ListEvents
// ---------------------------------------------------------------------------

/// List events whose start falls within `[today - days_back, today +
/// days_forward]`, in the surface's native ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListEvents {
    /// Days before today to include; must be non-negative.
    pub days_back: i64,
    /// Days after today to include; must be non-negative.
    pub days_forward: i64,
}

impl Default for ListEvents {
    fn default() -> Self {
        Self {
            days_back: 0,
            days_forward: 7,
        }
    }
}

/// Inclusive window around `today`: start of the first day through the end
/// of the last.
fn event_window(
    today: NaiveDate,
    days_back: i64,
    days_forward: i64,
) -> (NaiveDateTime, NaiveDateTime) {
    let first = today - Duration::days(days_back);
    let last = today + Duration::days(days_forward);
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    (first.and_time(NaiveTime::MIN), last.and_time(end_of_day))
}

impl ListEvents {
    const NODE_TYPE: &'static str = "apple.calendar.ListEvents";

    fn build_script(&self, window_start: &NaiveDateTime, window_end: &NaiveDateTime) -> String {
        format!(
            "{}\n{}\n\
             set output to \"\"\n\
             tell application \"Calendar\"\n\
             \trepeat with cal in calendars\n\
             \t\tset winEvents to (every event of cal whose start date is greater than or equal to windowStart and start date is less than or equal to windowEnd)\n\
             \t\trepeat with evt in winEvents\n\
             \t\t\tset evtLocation to \"\"\n\
             \t\t\ttry\n\
             \t\t\t\tset evtLocation to location of evt\n\
             \t\t\tend try\n\
             \t\t\tset output to output & (start date of evt as string) & \"|||\" & (end date of evt as string) & \"|||\" & (summary of evt) & \"|||\" & evtLocation & \"###EVT###\"\n\
             \t\tend repeat\n\
             \tend repeat\n\
             end tell\n\
             return output",
            applescript_date("windowStart", window_start),
            applescript_date("windowEnd", window_end),
        )
    }
}

#[async_trait]
impl Node for ListEvents {
    type Output = Vec<CalendarEvent>;

    fn metadata() -> NodeMetadata {
        NodeMetadata {
            node_type: Self::NODE_TYPE.into(),
            description: "List Calendar.app events around today".into(),
            surface: SURFACE.into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "days_back": { "type": "integer", "default": 0, "minimum": 0 },
                    "days_forward": { "type": "integer", "default": 7, "minimum": 0 }
                },
                "required": []
            }),
            output: OutputKind::RecordList,
        }
    }

    async fn process(&self, _context: &ProcessingContext) -> Result<Vec<CalendarEvent>> {
        require_at_least_i64(Self::NODE_TYPE, "days_back", self.days_back, 0)?;
        require_at_least_i64(Self::NODE_TYPE, "days_forward", self.days_forward, 0)?;

        let today = Local::now().date_naive();
        let (window_start, window_end) = event_window(today, self.days_back, self.days_forward);

        debug!(
            days_back = self.days_back,
            days_forward = self.days_forward,
            "listing calendar events"
        );
        let raw = run_osascript(
            Self::NODE_TYPE,
            SURFACE,
            &self.build_script(&window_start, &window_end),
        )
        .await?;

        let events = parse_delimited_records(&raw, "###EVT###", "|||", 4)
            .into_iter()
            .map(|mut fields| CalendarEvent {
                location: fields.remove(3),
                title: fields.remove(2),
                end: fields.remove(1),
                start: fields.remove(0),
            })
            .collect();
        Ok(events)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
