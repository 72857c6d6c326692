use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The catalog entity kinds served by the data layer.
///
/// Each kind is fetched, cached, and queried independently; a collection
/// never mixes kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Airline,
    Airport,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Airline => "airline",
            Self::Airport => "airport",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "airline" => Ok(Self::Airline),
            "airport" => Ok(Self::Airport),
            _ => Err(CoreError::invalid_entity_kind(s)),
        }
    }
}
