//! Speech node -- speak text through the `say` synthesizer.
//!
//! `say` exposes voice and rate as flags but not volume; volume rides along
//! as an embedded `[[volm x]]` synthesizer command ahead of the text.  A
//! `true` result means synthesis was started and ran; it does not confirm
//! anything was audible.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use macflow_node::validate::{require_non_empty, require_range_f64};
use macflow_node::{Node, NodeMetadata, OutputKind, ProcessingContext, Result};

use crate::command::run_command;

const SURFACE: &str = "say";

/// The synthesis voices this node accepts.  A closed set: values outside it
/// cannot be constructed, which is the enumeration-membership invariant at
/// the type level.  The OS may still withdraw a voice, which surfaces as an
/// external failure at invocation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Voice {
    #[default]
    Albert,
    Alex,
    Alice,
    Daniel,
    Fred,
    Karen,
    Moira,
    Rishi,
    Samantha,
    Tessa,
    Victoria,
    Zarvox,
}

impl Voice {
    /// The identifier `say -v` expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Albert => "Albert",
            Self::Alex => "Alex",
            Self::Alice => "Alice",
            Self::Daniel => "Daniel",
            Self::Fred => "Fred",
            Self::Karen => "Karen",
            Self::Moira => "Moira",
            Self::Rishi => "Rishi",
            Self::Samantha => "Samantha",
            Self::Tessa => "Tessa",
            Self::Victoria => "Victoria",
            Self::Zarvox => "Zarvox",
        }
    }

    /// Every declared voice identifier, for schema enumeration.
    pub fn all() -> &'static [Voice] {
        &[
            Self::Albert,
            Self::Alex,
            Self::Alice,
            Self::Daniel,
            Self::Fred,
            Self::Karen,
            Self::Moira,
            Self::Rishi,
            Self::Samantha,
            Self::Tessa,
            Self::Victoria,
            Self::Zarvox,
        ]
    }
}

impl std::fmt::Display for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Speak text aloud.  Returns whether synthesis ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SayText {
    /// Text to be spoken.
    pub text: String,
    /// Speaking rate in words per minute, in [10, 300].
    pub rate: f64,
    /// Volume in [0.0, 1.0].
    pub volume: f64,
    /// Synthesis voice.
    pub voice: Voice,
}

impl Default for SayText {
    fn default() -> Self {
        Self {
            text: String::new(),
            rate: 175.0,
            volume: 1.0,
            voice: Voice::default(),
        }
    }
}

impl SayText {
    const NODE_TYPE: &'static str = "apple.speech.SayText";

    fn say_args(&self) -> Vec<String> {
        vec![
            "-v".to_string(),
            self.voice.as_str().to_string(),
            "-r".to_string(),
            format!("{}", self.rate),
            format!("[[volm {:.2}]] {}", self.volume, self.text),
        ]
    }
}

#[async_trait]
impl Node for SayText {
    type Output = bool;

    fn metadata() -> NodeMetadata {
        let voices: Vec<&'static str> = Voice::all().iter().map(Voice::as_str).collect();
        NodeMetadata {
            node_type: Self::NODE_TYPE.into(),
            description: "Speak text using macOS speech synthesis".into(),
            surface: SURFACE.into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string", "default": "" },
                    "rate": {
                        "type": "number",
                        "default": 175.0,
                        "minimum": 10.0,
                        "maximum": 300.0
                    },
                    "volume": {
                        "type": "number",
                        "default": 1.0,
                        "minimum": 0.0,
                        "maximum": 1.0
                    },
                    "voice": { "type": "string", "default": "Albert", "enum": voices }
                },
                "required": ["text"]
            }),
            output: OutputKind::Boolean,
        }
    }

    async fn process(&self, _context: &ProcessingContext) -> Result<bool> {
        require_non_empty(Self::NODE_TYPE, "text", &self.text)?;
        require_range_f64(Self::NODE_TYPE, "rate", self.rate, 10.0, 300.0)?;
        require_range_f64(Self::NODE_TYPE, "volume", self.volume, 0.0, 1.0)?;

        debug!(voice = %self.voice, rate = self.rate, "speaking text");
        run_command(Self::NODE_TYPE, SURFACE, "say", &self.say_args()).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macflow_node::NodeError;

    #[tokio::test]
    async fn rejects_rate_out_of_bounds() {
        for rate in [9.9, 300.1, 500.0] {
            let node = SayText {
                text: "hello".into(),
                rate,
                ..Default::default()
            };
            let err = node.process(&ProcessingContext::new()).await.unwrap_err();
            assert!(matches!(err, NodeError::Validation { parameter: "rate", .. }));
        }
    }

    #[tokio::test]
    async fn rejects_volume_out_of_bounds() {
        for volume in [-0.1, 1.1] {
            let node = SayText {
                text: "hello".into(),
                volume,
                ..Default::default()
            };
            let err = node.process(&ProcessingContext::new()).await.unwrap_err();
            assert!(matches!(err, NodeError::Validation { parameter: "volume", .. }));
        }
    }

    #[tokio::test]
    async fn rejects_empty_text() {
        let node = SayText::default();
        let err = node.process(&ProcessingContext::new()).await.unwrap_err();
        assert!(matches!(err, NodeError::Validation { parameter: "text", .. }));
    }

    #[tokio::test]
    async fn valid_defaults_pass_validation() {
        // rate=175, volume=1.0, voice=Albert must get past validation; off
        // macOS the spawn then fails as Unavailable, never Validation.
        let node = SayText {
            text: "ready".into(),
            ..Default::default()
        };
        match node.process(&ProcessingContext::new()).await {
            Ok(initiated) => assert!(initiated),
            Err(err) => assert!(!err.is_validation()),
        }
    }

    #[test]
    fn args_carry_voice_rate_and_embedded_volume() {
        let node = SayText {
            text: "workflow finished".into(),
            rate: 175.0,
            volume: 0.5,
            voice: Voice::Karen,
        };
        let args = node.say_args();
        assert_eq!(args[0], "-v");
        assert_eq!(args[1], "Karen");
        assert_eq!(args[2], "-r");
        assert_eq!(args[3], "175");
        assert_eq!(args[4], "[[volm 0.50]] workflow finished");
    }

    #[test]
    fn default_voice_is_albert() {
        assert_eq!(Voice::default(), Voice::Albert);
        assert_eq!(SayText::default().voice.as_str(), "Albert");
    }

    #[test]
    fn voice_set_is_closed_and_named() {
        let all = Voice::all();
        assert_eq!(all.len(), 12);
        assert!(all.iter().any(|v| v.as_str() == "Zarvox"));
    }

    #[test]
    fn voice_serde_round_trips_identifier() {
        let json = serde_json::to_string(&Voice::Samantha).unwrap();
        assert_eq!(json, "\"Samantha\"");
        let voice: Voice = serde_json::from_str("\"Moira\"").unwrap();
        assert_eq!(voice, Voice::Moira);
    }

    #[test]
    fn unknown_voice_identifier_fails_deserialization() {
        assert!(serde_json::from_str::<Voice>("\"NotAVoice\"").is_err());
    }
}
