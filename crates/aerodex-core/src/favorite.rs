use crate::EntityKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one favorited entity within a user's favorite set.
///
/// Membership is keyed on both fields: an airline and an airport may share
/// an id without colliding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FavoriteRef {
    pub id: String,
    pub kind: EntityKind,
}

impl FavoriteRef {
    pub fn new(id: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn airline(id: impl Into<String>) -> Self {
        Self::new(id, EntityKind::Airline)
    }

    pub fn airport(id: impl Into<String>) -> Self {
        Self::new(id, EntityKind::Airport)
    }
}

impl fmt::Display for FavoriteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ref_identity_includes_kind() {
        let mut set = HashSet::new();
        set.insert(FavoriteRef::airline("xyz"));
        set.insert(FavoriteRef::airport("xyz"));
        assert_eq!(set.len(), 2);

        // re-inserting the same ref is a no-op
        assert!(!set.insert(FavoriteRef::airline("xyz")));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(FavoriteRef::airline("tk").to_string(), "airline/tk");
        assert_eq!(FavoriteRef::airport("ist").to_string(), "airport/ist");
    }
}
