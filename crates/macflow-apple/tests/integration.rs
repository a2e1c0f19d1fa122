//! Integration tests for the macflow-apple node crate.
//!
//! These exercise the contract every node must satisfy: discoverable
//! metadata with in-bounds defaults, validation that fires before any
//! external invocation, and parameter records that deserialize from partial
//! host-supplied values.

use macflow_apple::{
    CaptureScreen, CreateEvent, CreateNote, CreateReminder, GetRecentMessages, ListEvents,
    ReadNotes, SayText, SearchDictionary, SendMessage, SpotlightSearch, registry,
};
use macflow_node::{Node, NodeError, OutputKind, ProcessingContext};
use serde_json::json;

// ═══════════════════════════════════════════════════════════════════════
//  Registry / metadata
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn registry_lists_every_node_once() {
    let metas = registry();
    assert_eq!(metas.len(), 16);

    let mut types: Vec<&str> = metas.iter().map(|m| m.node_type.as_str()).collect();
    types.sort_unstable();
    types.dedup();
    assert_eq!(types.len(), 16, "node types must be unique");

    for meta in &metas {
        assert!(meta.node_type.starts_with("apple."), "{}", meta.node_type);
        assert!(!meta.description.is_empty());
        assert!(!meta.surface.is_empty());
    }
}

#[test]
fn registry_covers_the_core_capabilities() {
    let metas = registry();
    for expected in [
        "apple.calendar.CreateEvent",
        "apple.calendar.ListEvents",
        "apple.notes.CreateNote",
        "apple.notes.ReadNotes",
        "apple.reminders.CreateReminder",
        "apple.messages.SendMessage",
        "apple.dictionary.SearchDictionary",
        "apple.screen.CaptureScreen",
        "apple.speech.SayText",
    ] {
        assert!(
            metas.iter().any(|m| m.node_type == expected),
            "missing {expected}"
        );
    }
}

/// Every numeric parameter default must satisfy its own declared bounds.
#[test]
fn schema_defaults_lie_within_declared_bounds() {
    for meta in registry() {
        for (name, schema) in meta.parameter_entries() {
            let Some(default) = schema.get("default").and_then(|d| d.as_f64()) else {
                continue;
            };
            if let Some(min) = schema.get("minimum").and_then(|m| m.as_f64()) {
                assert!(
                    default >= min,
                    "{}::{name} default {default} below minimum {min}",
                    meta.node_type
                );
            }
            if let Some(max) = schema.get("maximum").and_then(|m| m.as_f64()) {
                assert!(
                    default <= max,
                    "{}::{name} default {default} above maximum {max}",
                    meta.node_type
                );
            }
        }
    }
}

/// Enumerated parameters must declare their value set, and the default must
/// be a member of it.
#[test]
fn schema_enum_defaults_are_members() {
    for meta in registry() {
        for (name, schema) in meta.parameter_entries() {
            let Some(values) = schema.get("enum").and_then(|e| e.as_array()) else {
                continue;
            };
            assert!(!values.is_empty());
            let default = schema
                .get("default")
                .unwrap_or_else(|| panic!("{}::{name} enum without default", meta.node_type));
            assert!(
                values.contains(default),
                "{}::{name} default {default} not in enum",
                meta.node_type
            );
        }
    }
}

#[test]
fn fire_and_forget_nodes_declare_no_output() {
    let metas = registry();
    for action in [
        "apple.calendar.CreateEvent",
        "apple.notes.CreateNote",
        "apple.reminders.CreateReminder",
    ] {
        let meta = metas.iter().find(|m| m.node_type == action).unwrap();
        assert_eq!(meta.output, OutputKind::None, "{action}");
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Validation precedes invocation
// ═══════════════════════════════════════════════════════════════════════
//
// Out-of-bounds parameters must surface as `Validation`, never as an
// external error — proof that the check runs before any spawn attempt.

#[tokio::test]
async fn bounded_parameters_reject_before_invocation() {
    let ctx = ProcessingContext::new();

    let say = SayText {
        text: "hi".into(),
        rate: 301.0,
        ..Default::default()
    };
    assert!(say.process(&ctx).await.unwrap_err().is_validation());

    let say = SayText {
        text: "hi".into(),
        volume: 2.0,
        ..Default::default()
    };
    assert!(say.process(&ctx).await.unwrap_err().is_validation());

    let reminder = CreateReminder {
        title: "t".into(),
        priority: 6,
        ..Default::default()
    };
    assert!(reminder.process(&ctx).await.unwrap_err().is_validation());

    let list = ListEvents {
        days_back: -1,
        days_forward: 0,
    };
    assert!(list.process(&ctx).await.unwrap_err().is_validation());

    let capture = CaptureScreen {
        whole_screen: false,
        x: 0,
        y: 0,
        width: 0,
        height: 100,
    };
    assert!(capture.process(&ctx).await.unwrap_err().is_validation());

    let notes = ReadNotes {
        note_limit: -5,
        ..Default::default()
    };
    assert!(notes.process(&ctx).await.unwrap_err().is_validation());

    let recent = GetRecentMessages {
        participant: "dana".into(),
        limit: 0,
    };
    assert!(recent.process(&ctx).await.unwrap_err().is_validation());
}

#[tokio::test]
async fn required_combinations_reject_before_invocation() {
    let ctx = ProcessingContext::new();

    // start >= end
    let event = CreateEvent {
        title: "standup".into(),
        ..Default::default()
    };
    assert!(event.process(&ctx).await.unwrap_err().is_validation());

    // neither title nor body
    let note = CreateNote::default();
    assert!(note.process(&ctx).await.unwrap_err().is_validation());

    // empty recipient
    let msg = SendMessage {
        text: "hello".into(),
        ..Default::default()
    };
    assert!(msg.process(&ctx).await.unwrap_err().is_validation());

    // empty term
    let lookup = SearchDictionary::default();
    assert!(lookup.process(&ctx).await.unwrap_err().is_validation());
}

#[tokio::test]
async fn validation_errors_name_node_and_parameter() {
    let say = SayText {
        text: "hi".into(),
        rate: 500.0,
        ..Default::default()
    };
    let err = say.process(&ProcessingContext::new()).await.unwrap_err();
    match &err {
        NodeError::Validation { node, parameter, .. } => {
            assert_eq!(*node, "apple.speech.SayText");
            assert_eq!(*parameter, "rate");
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    assert!(err.to_string().contains("rate"));
}

// ═══════════════════════════════════════════════════════════════════════
//  Partial results are success
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn spotlight_empty_query_is_success_without_invocation() {
    // The empty-query short circuit never touches mdfind, so this passes on
    // any platform.
    let node = SpotlightSearch::default();
    let paths = node.process(&ProcessingContext::new()).await.unwrap();
    assert!(paths.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════
//  Host-side record construction
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn parameter_records_fill_defaults_from_partial_json() {
    let say: SayText = serde_json::from_value(json!({ "text": "hello" })).unwrap();
    assert_eq!(say.rate, 175.0);
    assert_eq!(say.volume, 1.0);
    assert_eq!(say.voice.as_str(), "Albert");

    let list: ListEvents = serde_json::from_value(json!({ "days_forward": 14 })).unwrap();
    assert_eq!(list.days_back, 0);
    assert_eq!(list.days_forward, 14);

    let notes: ReadNotes = serde_json::from_value(json!({})).unwrap();
    assert_eq!(notes.note_limit, 10);
    assert_eq!(notes.note_limit_per_folder, 5);

    let reminder: CreateReminder =
        serde_json::from_value(json!({ "title": "pay rent" })).unwrap();
    assert_eq!(reminder.list, "Reminders");
    assert_eq!(reminder.priority, 0);
    assert!(reminder.due_date.is_none());
}

#[test]
fn unknown_voice_is_rejected_at_record_construction() {
    let result = serde_json::from_value::<SayText>(json!({
        "text": "hello",
        "voice": "Bogus"
    }));
    assert!(result.is_err());
}
