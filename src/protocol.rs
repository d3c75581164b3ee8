//! Messages exchanged with the host.
//!
//! Moves cross the boundary as a flat `{row, col, side}` record with the side
//! encoded as 0 (empty), 1 (X) or 2 (O). Requests and responses are JSON
//! objects tagged by `kind`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;
use crate::game::{BoardMove, Cell, Coords};

/// Wire form of a [`BoardMove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub row: u32,
    pub col: u32,
    pub side: u8,
}

impl From<BoardMove> for MoveRecord {
    fn from(mv: BoardMove) -> Self {
        MoveRecord {
            row: mv.coords.row,
            col: mv.coords.col,
            side: mv.side.into(),
        }
    }
}

impl TryFrom<MoveRecord> for BoardMove {
    type Error = ProtocolError;

    fn try_from(record: MoveRecord) -> Result<Self, Self::Error> {
        let side = Cell::try_from(record.side).map_err(ProtocolError::InvalidSide)?;
        Ok(BoardMove {
            coords: Coords::new(record.row, record.col),
            side,
        })
    }
}

pub fn encode(mv: &BoardMove) -> Result<Value, ProtocolError> {
    Ok(serde_json::to_value(MoveRecord::from(*mv))?)
}

pub fn decode(value: &Value) -> Result<BoardMove, ProtocolError> {
    let record = MoveRecord::deserialize(value)?;
    BoardMove::try_from(record)
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum WireRequest {
    TrackMove {
        #[serde(rename = "lastMove")]
        last_move: MoveRecord,
    },
    Reset,
    GetBestMove,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum WireResponse {
    BestMove {
        #[serde(rename = "bestMove")]
        best_move: MoveRecord,
    },
}

/// Requests sent by the host to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    TrackMove(BoardMove),
    Reset,
    GetBestMove,
}

impl Request {
    /// Parse one JSON message. Malformed moves are rejected here so they never
    /// reach the engine.
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        let request = match serde_json::from_str(text)? {
            WireRequest::TrackMove { last_move } => Request::TrackMove(last_move.try_into()?),
            WireRequest::Reset => Request::Reset,
            WireRequest::GetBestMove => Request::GetBestMove,
        };
        Ok(request)
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        let wire = match *self {
            Request::TrackMove(mv) => WireRequest::TrackMove {
                last_move: mv.into(),
            },
            Request::Reset => WireRequest::Reset,
            Request::GetBestMove => WireRequest::GetBestMove,
        };
        Ok(serde_json::to_string(&wire)?)
    }
}

/// Replies sent by the engine to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    BestMove(BoardMove),
}

impl Response {
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        let wire = match *self {
            Response::BestMove(mv) => WireResponse::BestMove {
                best_move: mv.into(),
            },
        };
        Ok(serde_json::to_string(&wire)?)
    }

    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        match serde_json::from_str(text)? {
            WireResponse::BestMove { best_move } => Ok(Response::BestMove(best_move.try_into()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_encode_uses_numeric_side() {
        let value = encode(&BoardMove::new(2, 1, Cell::O)).unwrap();
        assert_eq!(value, json!({"row": 2, "col": 1, "side": 2}));
    }

    #[test]
    fn test_encoded_move_decodes_to_same_move() {
        let mv = BoardMove::new(5, 6, Cell::X);
        let value = encode(&mv).unwrap();
        assert_eq!(value, serde_json::to_value(MoveRecord::from(mv)).unwrap());
        assert_eq!(decode(&value).unwrap(), mv);
    }

    #[test]
    fn test_decode_move() {
        let mv = decode(&json!({"row": 0, "col": 2, "side": 1})).unwrap();
        assert_eq!(mv, BoardMove::new(0, 2, Cell::X));
    }

    #[test]
    fn test_decode_rejects_bad_side() {
        let err = decode(&json!({"row": 0, "col": 0, "side": 3})).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidSide(3)));
    }

    #[test]
    fn test_decode_rejects_missing_and_negative_fields() {
        assert!(matches!(
            decode(&json!({"row": 0, "side": 1})),
            Err(ProtocolError::Json(_))
        ));
        assert!(matches!(
            decode(&json!({"row": -1, "col": 0, "side": 1})),
            Err(ProtocolError::Json(_))
        ));
    }

    #[test]
    fn test_parse_requests() {
        let request =
            Request::from_json(r#"{"kind":"track_move","lastMove":{"row":1,"col":1,"side":1}}"#)
                .unwrap();
        assert_eq!(request, Request::TrackMove(BoardMove::new(1, 1, Cell::X)));

        assert_eq!(Request::from_json(r#"{"kind":"reset"}"#).unwrap(), Request::Reset);
        assert_eq!(
            Request::from_json(r#"{"kind":"get_best_move"}"#).unwrap(),
            Request::GetBestMove
        );
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        assert!(Request::from_json(r#"{"kind":"undo"}"#).is_err());
        assert!(Request::from_json("not json").is_err());
        assert!(matches!(
            Request::from_json(r#"{"kind":"track_move","lastMove":{"row":0,"col":0,"side":9}}"#),
            Err(ProtocolError::InvalidSide(9))
        ));
    }

    #[test]
    fn test_response_shape() {
        let text = Response::BestMove(BoardMove::new(0, 2, Cell::X))
            .to_json()
            .unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!({"kind": "best_move", "bestMove": {"row": 0, "col": 2, "side": 1}})
        );
    }

    #[test]
    fn test_request_to_json_matches_host_shape() {
        let text = Request::TrackMove(BoardMove::new(5, 3, Cell::O))
            .to_json()
            .unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!({"kind": "track_move", "lastMove": {"row": 5, "col": 3, "side": 2}})
        );
    }
}
