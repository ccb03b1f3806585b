#![forbid(unsafe_code)]

pub mod transcript;
pub mod window;

pub use transcript::Transcript;
pub use window::{MoveStep, ReplayWindow, LOOKBACK};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Start,
    Move,
    End,
}

/// Body returned by the game server from `/move`.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct MoveResponse {
    #[serde(rename = "move")]
    pub direction: String,
}

/// The handful of snapshot fields the harness looks at for diagnostics.
/// Records are still sent verbatim; this is never required to parse.
#[derive(Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Snapshot {
    pub game: GameInfo,
    pub turn: u32,
}

#[derive(Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct GameInfo {
    pub id: String,
}

////////////////////////////////////////////////////////////////////////////////

impl Phase {
    pub fn route(self) -> String {
        format!("/{}", self.as_ref())
    }
}

impl Snapshot {
    pub fn peek(record: &str) -> Option<Snapshot> {
        serde_json::from_str(record).ok()
    }
}

////////////////////////////////////////////////////////////////////////////////
