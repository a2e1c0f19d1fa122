//! macOS application automation nodes for macflow.
//!
//! Each module holds the nodes for one macOS automation surface — Calendar,
//! Notes, Reminders, Messages, the system Dictionary, screen capture, speech
//! synthesis, Notification Center, Spotlight, Shortcuts, and the clipboard.
//! Every node implements [`macflow_node::Node`]: a plain parameter record
//! with one `process` entry point that validates its inputs, invokes the
//! surface once via a subprocess, and maps the result into a typed output.
//!
//! Nothing here retries, caches, or holds state across invocations; the OS
//! applications own all persisted data.

pub mod calendar;
pub mod clipboard;
pub mod command;
pub mod dictionary;
pub mod messages;
pub mod notes;
pub mod notifications;
pub mod reminders;
pub mod screen;
pub mod script;
pub mod shortcuts;
pub mod speech;
pub mod spotlight;

pub use calendar::{CalendarEvent, CreateEvent, ListEvents};
pub use clipboard::{GetClipboardText, SetClipboardText};
pub use dictionary::SearchDictionary;
pub use messages::{GetRecentMessages, Message, SendMessage};
pub use notes::{CreateNote, Note, ReadNotes};
pub use notifications::PostNotification;
pub use reminders::CreateReminder;
pub use screen::{CaptureScreen, ImageValue};
pub use shortcuts::{ListShortcuts, RunShortcut};
pub use speech::{SayText, Voice};
pub use spotlight::SpotlightSearch;

use macflow_node::{Node, NodeMetadata};

/// Static metadata for every node in this crate, in declaration order.
///
/// The host runtime uses this to discover parameter schemas and output
/// shapes without constructing node records.
pub fn registry() -> Vec<NodeMetadata> {
    vec![
        CreateEvent::metadata(),
        ListEvents::metadata(),
        CreateNote::metadata(),
        ReadNotes::metadata(),
        CreateReminder::metadata(),
        SendMessage::metadata(),
        GetRecentMessages::metadata(),
        SearchDictionary::metadata(),
        CaptureScreen::metadata(),
        SayText::metadata(),
        PostNotification::metadata(),
        SpotlightSearch::metadata(),
        ListShortcuts::metadata(),
        RunShortcut::metadata(),
        GetClipboardText::metadata(),
        SetClipboardText::metadata(),
    ]
}
