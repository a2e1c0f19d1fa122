//! Messages nodes -- send and read iMessages via Messages.app AppleScript.
//!
//! Recipient identifiers are free-form (phone number, email, or contact
//! name); resolution is the surface's job, not this node's.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use macflow_node::validate::{require_non_empty, require_range_i64};
use macflow_node::{Node, NodeError, NodeMetadata, OutputKind, ProcessingContext, Result};

use crate::script::{escape_applescript, parse_delimited_records, run_osascript};

const SURFACE: &str = "Messages";

/// One message row returned by [`GetRecentMessages`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub sender: String,
    pub date: String,
    pub is_from_me: bool,
}

// ---------------------------------------------------------------------------
// SendMessage
// ---------------------------------------------------------------------------

/// Send a text message through the iMessage service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SendMessage {
    /// Phone number, email, or contact name; resolved by Messages.app.
    pub recipient: String,
    /// Message content.
    pub text: String,
}

impl SendMessage {
    const NODE_TYPE: &'static str = "apple.messages.SendMessage";

    fn build_script(&self) -> String {
        let recipient = escape_applescript(&self.recipient);
        let text = escape_applescript(&self.text);
        format!(
            "tell application \"Messages\"\n\
             \tset targetService to 1st service whose service type = iMessage\n\
             \tset targetBuddy to buddy \"{recipient}\" of targetService\n\
             \tsend \"{text}\" to targetBuddy\n\
             end tell"
        )
    }
}

#[async_trait]
impl Node for SendMessage {
    type Output = bool;

    fn metadata() -> NodeMetadata {
        NodeMetadata {
            node_type: Self::NODE_TYPE.into(),
            description: "Send a message through Messages.app".into(),
            surface: SURFACE.into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "recipient": { "type": "string", "default": "" },
                    "text": { "type": "string", "default": "" }
                },
                "required": ["recipient", "text"]
            }),
            output: OutputKind::Boolean,
        }
    }

    async fn process(&self, _context: &ProcessingContext) -> Result<bool> {
        require_non_empty(Self::NODE_TYPE, "recipient", &self.recipient)?;
        require_non_empty(Self::NODE_TYPE, "text", &self.text)?;

        debug!(recipient = %self.recipient, "sending message");
        run_osascript(Self::NODE_TYPE, SURFACE, &self.build_script()).await?;
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// GetRecentMessages
// ---------------------------------------------------------------------------

/// Read the most recent messages of one conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GetRecentMessages {
    /// Phone number, email, or contact name identifying the conversation.
    pub participant: String,
    /// Maximum number of messages to return, in [1, 100].
    pub limit: i64,
}

impl Default for GetRecentMessages {
    fn default() -> Self {
        Self {
            participant: String::new(),
            limit: 20,
        }
    }
}

impl GetRecentMessages {
    const NODE_TYPE: &'static str = "apple.messages.GetRecentMessages";

    fn build_script(&self) -> String {
        let participant = escape_applescript(&self.participant);
        format!(
            "tell application \"Messages\"\n\
             \tset output to \"\"\n\
             \tset msgCount to 0\n\
             \tset maxMsgs to {limit}\n\
             \ttry\n\
             \t\tset targetChat to 1st chat whose participants contains buddy \"{participant}\"\n\
             \t\tset allMessages to messages of targetChat\n\
             \t\trepeat with msg in allMessages\n\
             \t\t\tif msgCount >= maxMsgs then exit repeat\n\
             \t\t\ttry\n\
             \t\t\t\tset msgText to text of msg\n\
             \t\t\t\tset msgSender to handle of sender of msg\n\
             \t\t\t\tset msgDate to date sent of msg as string\n\
             \t\t\t\tset msgIsFromMe to \"false\"\n\
             \t\t\t\tif sender of msg is me then set msgIsFromMe to \"true\"\n\
             \t\t\t\tset output to output & msgText & \"|||\" & msgSender & \"|||\" & msgDate & \"|||\" & msgIsFromMe & \"###MSG###\"\n\
             \t\t\t\tset msgCount to msgCount + 1\n\
             \t\t\tend try\n\
             \t\tend repeat\n\
             \ton error errMsg\n\
             \t\treturn \"ERROR:\" & errMsg\n\
             \tend try\n\
             \treturn output\n\
             end tell",
            limit = self.limit,
        )
    }
}

/// Parse the delimited script output into message records.  An `ERROR:`
/// sentinel from the script's own error handler is surfaced as a failure.
fn parse_messages(node: &'static str, raw: &str) -> Result<Vec<Message>> {
    if let Some(reason) = raw.strip_prefix("ERROR:") {
        return Err(NodeError::Failure {
            node,
            surface: SURFACE,
            reason: reason.trim().to_string(),
        });
    }
    Ok(parse_delimited_records(raw, "###MSG###", "|||", 4)
        .into_iter()
        .map(|mut fields| Message {
            is_from_me: fields.remove(3) == "true",
            date: fields.remove(2),
            sender: fields.remove(1),
            text: fields.remove(0),
        })
        .collect())
}

#[async_trait]
impl Node for GetRecentMessages {
    type Output = Vec<Message>;

    fn metadata() -> NodeMetadata {
        NodeMetadata {
            node_type: Self::NODE_TYPE.into(),
            description: "Read recent messages from one Messages.app conversation".into(),
            surface: SURFACE.into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "participant": { "type": "string", "default": "" },
                    "limit": { "type": "integer", "default": 20, "minimum": 1, "maximum": 100 }
                },
                "required": ["participant"]
            }),
            output: OutputKind::RecordList,
        }
    }

    async fn process(&self, _context: &ProcessingContext) -> Result<Vec<Message>> {
        require_non_empty(Self::NODE_TYPE, "participant", &self.participant)?;
        require_range_i64(Self::NODE_TYPE, "limit", self.limit, 1, 100)?;

        debug!(participant = %self.participant, limit = self.limit, "reading recent messages");
        let raw = run_osascript(Self::NODE_TYPE, SURFACE, &self.build_script()).await?;
        parse_messages(Self::NODE_TYPE, &raw)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- SendMessage --

    #[tokio::test]
    async fn send_rejects_empty_recipient() {
        let node = SendMessage {
            text: "hello".into(),
            ..Default::default()
        };
        let err = node.process(&ProcessingContext::new()).await.unwrap_err();
        assert!(matches!(err, NodeError::Validation { parameter: "recipient", .. }));
    }

    #[tokio::test]
    async fn send_rejects_empty_text() {
        let node = SendMessage {
            recipient: "+15551234567".into(),
            ..Default::default()
        };
        let err = node.process(&ProcessingContext::new()).await.unwrap_err();
        assert!(matches!(err, NodeError::Validation { parameter: "text", .. }));
    }

    #[test]
    fn send_script_escapes_text_and_recipient() {
        let node = SendMessage {
            recipient: "dana@example.com".into(),
            text: "it's \"done\"\nship it".into(),
        };
        let script = node.build_script();
        assert!(script.contains("send \"it's \\\"done\\\"\\nship it\""));
        assert!(script.contains("buddy \"dana@example.com\""));
    }

    #[test]
    fn send_script_targets_imessage_service() {
        let node = SendMessage {
            recipient: "r".into(),
            text: "t".into(),
        };
        assert!(node
            .build_script()
            .contains("1st service whose service type = iMessage"));
    }

    // -- GetRecentMessages --

    #[tokio::test]
    async fn recent_rejects_empty_participant() {
        let node = GetRecentMessages::default();
        let err = node.process(&ProcessingContext::new()).await.unwrap_err();
        assert!(matches!(err, NodeError::Validation { parameter: "participant", .. }));
    }

    #[tokio::test]
    async fn recent_rejects_limit_out_of_range() {
        for limit in [0, 101] {
            let node = GetRecentMessages {
                participant: "dana@example.com".into(),
                limit,
            };
            let err = node.process(&ProcessingContext::new()).await.unwrap_err();
            assert!(matches!(err, NodeError::Validation { parameter: "limit", .. }));
        }
    }

    #[test]
    fn recent_script_carries_limit() {
        let node = GetRecentMessages {
            participant: "dana".into(),
            limit: 7,
        };
        assert!(node.build_script().contains("set maxMsgs to 7"));
    }

    #[test]
    fn parse_messages_basic() {
        let raw = "hey|||dana@example.com|||Mon Aug 3|||false###MSG###\
                   on my way|||me@example.com|||Mon Aug 3|||true###MSG###";
        let messages = parse_messages("test", raw).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, "dana@example.com");
        assert!(!messages[0].is_from_me);
        assert!(messages[1].is_from_me);
    }

    #[test]
    fn parse_messages_empty_is_success() {
        assert!(parse_messages("test", "").unwrap().is_empty());
    }

    #[test]
    fn parse_messages_error_sentinel_is_failure() {
        let err = parse_messages("test", "ERROR: Can't get chat 1").unwrap_err();
        match err {
            NodeError::Failure { reason, .. } => assert_eq!(reason, "Can't get chat 1"),
            other => panic!("expected Failure, got {other:?}"),
        }
    }

    #[test]
    fn parse_messages_drops_malformed_records() {
        let raw = "only-two-fields|||x###MSG###ok|||s|||d|||false###MSG###";
        let messages = parse_messages("test", raw).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "ok");
    }
}
