//! Single-table key scheme.
//!
//! Pure functions mapping each entity kind and its natural identifiers to the
//! `(pk, sk)` pair stored in the shared catalog table. The partition-key
//! prefix is the only discriminator of entity kind.

use serde::{Deserialize, Serialize};

use super::error::KeyError;

// ============================================================================
// Key prefixes
// ============================================================================

pub const MOVIE_PREFIX: &str = "m";
pub const ACTOR_PREFIX: &str = "a";
pub const CAST_PREFIX: &str = "c";
pub const AWARD_PREFIX: &str = "w";

/// Sort key shared by every Movie and Actor row.
pub const ENTITY_MARKER: &str = "xxxx";

/// Attribute name of the partition key.
pub const PARTITION_ATTR: &str = "pk";

/// Attribute name of the sort key.
pub const SORT_ATTR: &str = "sk";

/// The four entity kinds living in the catalog table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Movie,
    Actor,
    MovieCast,
    Award,
}

impl EntityKind {
    /// Partition-key prefix for this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Movie => MOVIE_PREFIX,
            Self::Actor => ACTOR_PREFIX,
            Self::MovieCast => CAST_PREFIX,
            Self::Award => AWARD_PREFIX,
        }
    }

    /// Resolves the entity kind from a partition key.
    ///
    /// Returns `None` for an unknown prefix or a partition key with no
    /// identifier after the prefix.
    pub fn from_partition(partition: &str) -> Option<Self> {
        let kind = match partition.chars().next()? {
            'm' => Self::Movie,
            'a' => Self::Actor,
            'c' => Self::MovieCast,
            'w' => Self::Award,
            _ => return None,
        };

        if partition.len() == kind.prefix().len() {
            return None;
        }

        Some(kind)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Movie => write!(f, "Movie"),
            Self::Actor => write!(f, "Actor"),
            Self::MovieCast => write!(f, "MovieCast"),
            Self::Award => write!(f, "Award"),
        }
    }
}

/// Composite key of a catalog item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemKey {
    pub partition: String,
    pub sort: String,
}

impl ItemKey {
    pub fn new(partition: impl Into<String>, sort: impl Into<String>) -> Self {
        Self {
            partition: partition.into(),
            sort: sort.into(),
        }
    }

    /// Entity kind encoded in the partition key.
    pub fn kind(&self) -> Option<EntityKind> {
        EntityKind::from_partition(&self.partition)
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.partition, self.sort)
    }
}

fn require_id<'a>(field: &'static str, value: &'a str) -> Result<&'a str, KeyError> {
    if value.trim().is_empty() {
        return Err(KeyError::EmptyIdentifier { field });
    }
    Ok(value)
}

fn partition(kind: EntityKind, field: &'static str, id: &str) -> Result<String, KeyError> {
    let id = require_id(field, id)?;
    Ok(format!("{}{id}", kind.prefix()))
}

// ============================================================================
// Key constructors
// ============================================================================

/// Key of a Movie row.
///
/// Pattern: `m<movie_id>` / `xxxx`
pub fn movie_key(movie_id: &str) -> Result<ItemKey, KeyError> {
    Ok(ItemKey::new(
        partition(EntityKind::Movie, "movieId", movie_id)?,
        ENTITY_MARKER,
    ))
}

/// Key of an Actor row.
///
/// Pattern: `a<actor_id>` / `xxxx`
pub fn actor_key(actor_id: &str) -> Result<ItemKey, KeyError> {
    Ok(ItemKey::new(
        partition(EntityKind::Actor, "actorId", actor_id)?,
        ENTITY_MARKER,
    ))
}

/// Partition holding every cast row of a movie.
///
/// Pattern: `c<movie_id>`
pub fn cast_partition(movie_id: &str) -> Result<String, KeyError> {
    partition(EntityKind::MovieCast, "movieId", movie_id)
}

/// Key of a MovieCast row.
///
/// Pattern: `c<movie_id>` / `<actor_id>`
pub fn cast_key(movie_id: &str, actor_id: &str) -> Result<ItemKey, KeyError> {
    let actor_id = require_id("actorId", actor_id)?;
    Ok(ItemKey::new(cast_partition(movie_id)?, actor_id))
}

/// Partition holding every award of a subject (movie or actor id).
///
/// Pattern: `w<subject_id>`
pub fn award_partition(subject_id: &str) -> Result<String, KeyError> {
    partition(EntityKind::Award, "subjectId", subject_id)
}

/// Key of an Award row.
///
/// Pattern: `w<subject_id>` / `<award_body>`
pub fn award_key(subject_id: &str, award_body: &str) -> Result<ItemKey, KeyError> {
    let award_body = require_id("awardBody", award_body)?;
    Ok(ItemKey::new(award_partition(subject_id)?, award_body))
}

/// Natural identifier carried by a partition key (the part after the prefix).
pub fn natural_id(partition: &str) -> Option<&str> {
    let kind = EntityKind::from_partition(partition)?;
    partition.strip_prefix(kind.prefix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_key() {
        let key = movie_key("1000").unwrap();
        assert_eq!(key.partition, "m1000");
        assert_eq!(key.sort, "xxxx");
    }

    #[test]
    fn test_actor_key() {
        let key = actor_key("2000").unwrap();
        assert_eq!(key, ItemKey::new("a2000", "xxxx"));
    }

    #[test]
    fn test_cast_key() {
        assert_eq!(
            cast_key("1000", "2001").unwrap(),
            ItemKey::new("c1000", "2001")
        );
        assert_eq!(cast_partition("1001").unwrap(), "c1001");
    }

    #[test]
    fn test_award_key() {
        assert_eq!(
            award_key("2201", "BAFTA").unwrap(),
            ItemKey::new("w2201", "BAFTA")
        );
        assert_eq!(award_partition("1000").unwrap(), "w1000");
    }

    #[test]
    fn test_empty_identifiers_are_rejected() {
        assert_eq!(
            movie_key("").unwrap_err(),
            KeyError::EmptyIdentifier { field: "movieId" }
        );
        assert_eq!(
            actor_key("   ").unwrap_err(),
            KeyError::EmptyIdentifier { field: "actorId" }
        );
        assert_eq!(
            cast_key("1000", "").unwrap_err(),
            KeyError::EmptyIdentifier { field: "actorId" }
        );
        assert_eq!(
            award_key("1000", "").unwrap_err(),
            KeyError::EmptyIdentifier { field: "awardBody" }
        );
    }

    #[test]
    fn test_kind_from_partition_inverts_constructors() {
        assert_eq!(movie_key("1").unwrap().kind(), Some(EntityKind::Movie));
        assert_eq!(actor_key("1").unwrap().kind(), Some(EntityKind::Actor));
        assert_eq!(
            cast_key("1", "2").unwrap().kind(),
            Some(EntityKind::MovieCast)
        );
        assert_eq!(
            award_key("1", "Academy").unwrap().kind(),
            Some(EntityKind::Award)
        );
    }

    #[test]
    fn test_kind_from_partition_rejects_unknown() {
        assert_eq!(EntityKind::from_partition("x1000"), None);
        assert_eq!(EntityKind::from_partition(""), None);
        assert_eq!(EntityKind::from_partition("m"), None);
    }

    #[test]
    fn test_natural_id() {
        assert_eq!(natural_id("m1000"), Some("1000"));
        assert_eq!(natural_id("w2201"), Some("2201"));
        assert_eq!(natural_id("z1"), None);
    }
}
