//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{LevelInfo, TileId};
use crate::session::Snapshot;

/// Messages the client can send over WebSocket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    ListLevels,
    ChooseLevel {
        level: u32,
    },
    SelectTile {
        #[serde(rename = "tileId")]
        tile_id: TileId,
    },
    DeselectTile {
        #[serde(rename = "tileId")]
        tile_id: TileId,
    },
    SubmitAnswer,
    RequestReset,
    RevealAnswer,
    ReturnToLevelSelect,
    Restart,
    /// Read text aloud; defaults to the current prompt.
    Speak {
        #[serde(default)]
        text: Option<String>,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Levels {
        levels: Vec<LevelInfo>,
    },
    State {
        snapshot: Snapshot,
    },
    SpeechAudio {
        mime: String,
        #[serde(rename = "audioBase64")]
        audio_base64: String,
    },
    SpeechUnavailable {
        message: String,
    },
    Error {
        message: String,
    },
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct SpeechIn {
    pub text: String,
    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeechOut {
    pub mime: String,
    #[serde(rename = "audioBase64")]
    pub audio_base64: String,
}

#[derive(Serialize)]
pub struct NoticeOut {
    pub message: String,
}

#[derive(Serialize)]
pub struct LevelsOut {
    pub levels: Vec<LevelInfo>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unit_and_payload_messages() {
        let m: ClientWsMessage = serde_json::from_str(r#"{"type":"submit_answer"}"#).unwrap();
        assert_eq!(m, ClientWsMessage::SubmitAnswer);

        let m: ClientWsMessage = serde_json::from_str(r#"{"type":"choose_level","level":3}"#).unwrap();
        assert_eq!(m, ClientWsMessage::ChooseLevel { level: 3 });

        let m: ClientWsMessage = serde_json::from_str(r#"{"type":"speak"}"#).unwrap();
        assert_eq!(m, ClientWsMessage::Speak { text: None });
    }

    #[test]
    fn tile_ids_travel_as_uuid_strings() {
        let raw = r#"{"type":"select_tile","tileId":"67e55044-10b1-426f-9247-bb680e5fe0c8"}"#;
        let m: ClientWsMessage = serde_json::from_str(raw).unwrap();
        let ClientWsMessage::SelectTile { tile_id } = m else { panic!("wrong variant") };
        assert_eq!(tile_id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");

        assert!(serde_json::from_str::<ClientWsMessage>(r#"{"type":"select_tile","tileId":"nope"}"#).is_err());
    }

    #[test]
    fn server_messages_are_tagged() {
        let v = serde_json::to_value(ServerWsMessage::SpeechUnavailable { message: "x".into() }).unwrap();
        assert_eq!(v["type"], "speech_unavailable");
        let v = serde_json::to_value(ServerWsMessage::SpeechAudio { mime: "audio/mpeg".into(), audio_base64: "AA==".into() }).unwrap();
        assert_eq!(v["audioBase64"], "AA==");
    }
}
