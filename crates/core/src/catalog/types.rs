use serde::{Deserialize, Serialize};

use super::error::KeyError;
use super::keys::{self, EntityKind, ItemKey};

/// A movie row (`m<id>` / `xxxx`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
}

impl Movie {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            release_date: None,
            overview: None,
        }
    }

    pub fn with_release_date(mut self, release_date: impl Into<String>) -> Self {
        self.release_date = Some(release_date.into());
        self
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = Some(overview.into());
        self
    }

    pub fn key(&self) -> Result<ItemKey, KeyError> {
        keys::movie_key(&self.id)
    }
}

/// An actor row (`a<id>` / `xxxx`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
}

impl Actor {
    pub fn key(&self) -> Result<ItemKey, KeyError> {
        keys::actor_key(&self.id)
    }
}

/// A cast row linking a movie partition to an actor (`c<movieId>` / `<actorId>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieCast {
    pub movie_id: String,
    pub actor_id: String,
    pub actor_name: String,
    pub role_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_description: Option<String>,
}

impl MovieCast {
    pub fn key(&self) -> Result<ItemKey, KeyError> {
        keys::cast_key(&self.movie_id, &self.actor_id)
    }
}

/// An award granted to a movie or an actor (`w<subjectId>` / `<awardBody>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    pub subject_id: String,
    pub award_body: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl Award {
    pub fn key(&self) -> Result<ItemKey, KeyError> {
        keys::award_key(&self.subject_id, &self.award_body)
    }
}

/// Any item stored in the catalog table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CatalogItem {
    Movie(Movie),
    Actor(Actor),
    MovieCast(MovieCast),
    Award(Award),
}

impl CatalogItem {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Movie(_) => EntityKind::Movie,
            Self::Actor(_) => EntityKind::Actor,
            Self::MovieCast(_) => EntityKind::MovieCast,
            Self::Award(_) => EntityKind::Award,
        }
    }

    pub fn key(&self) -> Result<ItemKey, KeyError> {
        match self {
            Self::Movie(movie) => movie.key(),
            Self::Actor(actor) => actor.key(),
            Self::MovieCast(cast) => cast.key(),
            Self::Award(award) => award.key(),
        }
    }
}

impl From<Movie> for CatalogItem {
    fn from(movie: Movie) -> Self {
        Self::Movie(movie)
    }
}

impl From<Actor> for CatalogItem {
    fn from(actor: Actor) -> Self {
        Self::Actor(actor)
    }
}

impl From<MovieCast> for CatalogItem {
    fn from(cast: MovieCast) -> Self {
        Self::MovieCast(cast)
    }
}

impl From<Award> for CatalogItem {
    fn from(award: Award) -> Self {
        Self::Award(award)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_keys() {
        let movie = CatalogItem::from(Movie::new("1000", "The Shawshank Redemption"));
        assert_eq!(movie.key().unwrap(), ItemKey::new("m1000", "xxxx"));
        assert_eq!(movie.kind(), EntityKind::Movie);

        let award = CatalogItem::from(Award {
            subject_id: "1000".to_string(),
            award_body: "Academy".to_string(),
            category: "Best Picture".to_string(),
            year: Some(1995),
        });
        assert_eq!(award.key().unwrap(), ItemKey::new("w1000", "Academy"));
    }

    #[test]
    fn test_catalog_item_serializes_with_kind_tag() {
        let item = CatalogItem::from(
            Movie::new("1001", "The Godfather").with_release_date("1972-03-24"),
        );
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["kind"], "movie");
        assert_eq!(json["id"], "1001");
        assert_eq!(json["releaseDate"], "1972-03-24");
        assert!(json.get("overview").is_none());
    }

    #[test]
    fn test_cast_serializes_camel_case() {
        let item = CatalogItem::from(MovieCast {
            movie_id: "1002".to_string(),
            actor_id: "2201".to_string(),
            actor_name: "Heath Ledger".to_string(),
            role_name: "Joker".to_string(),
            role_description: None,
        });
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["kind"], "movieCast");
        assert_eq!(json["actorName"], "Heath Ledger");
        assert_eq!(json["roleName"], "Joker");
    }
}
