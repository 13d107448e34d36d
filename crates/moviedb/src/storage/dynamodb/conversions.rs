//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and domain types.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use moviedb_core::catalog::keys::{natural_id, PARTITION_ATTR, SORT_ATTR};
use moviedb_core::catalog::{
    Actor, Award, CatalogItem, EntityKind, ItemKey, KeyError, Movie, MovieCast,
};
use moviedb_core::storage::StoreError;

pub type Item = HashMap<String, AttributeValue>;

// ============================================================================
// Attribute names
// ============================================================================

pub const ATTR_TITLE: &str = "title";
pub const ATTR_RELEASE_DATE: &str = "releaseDate";
pub const ATTR_OVERVIEW: &str = "overview";
pub const ATTR_NAME: &str = "name";
pub const ATTR_BIO: &str = "bio";
pub const ATTR_BIRTH_DATE: &str = "birthDate";
pub const ATTR_ACTOR_NAME: &str = "actorName";
pub const ATTR_ROLE_NAME: &str = "roleName";
pub const ATTR_ROLE_DESCRIPTION: &str = "roleDescription";
pub const ATTR_CATEGORY: &str = "category";
pub const ATTR_YEAR: &str = "year";

// ============================================================================
// Keys
// ============================================================================

/// Primary key attributes of an item.
pub fn key_to_attributes(key: &ItemKey) -> Item {
    let mut item = HashMap::new();
    item.insert(
        PARTITION_ATTR.to_string(),
        AttributeValue::S(key.partition.clone()),
    );
    item.insert(SORT_ATTR.to_string(), AttributeValue::S(key.sort.clone()));
    item
}

fn key_error(err: KeyError) -> StoreError {
    StoreError::InvalidData(err.to_string())
}

// ============================================================================
// Entity conversions
// ============================================================================

/// Convert a Movie to DynamoDB item.
pub fn movie_to_item(movie: &Movie) -> Result<Item, StoreError> {
    let mut item = key_to_attributes(&movie.key().map_err(key_error)?);
    insert_string(&mut item, ATTR_TITLE, &movie.title);
    insert_optional(&mut item, ATTR_RELEASE_DATE, movie.release_date.as_deref());
    insert_optional(&mut item, ATTR_OVERVIEW, movie.overview.as_deref());
    Ok(item)
}

// Actor, MovieCast and Award rows are read-only; their writers only build
// fixtures.

/// Convert an Actor to DynamoDB item.
#[cfg(test)]
pub fn actor_to_item(actor: &Actor) -> Result<Item, StoreError> {
    let mut item = key_to_attributes(&actor.key().map_err(key_error)?);
    insert_string(&mut item, ATTR_NAME, &actor.name);
    insert_optional(&mut item, ATTR_BIO, actor.bio.as_deref());
    insert_optional(&mut item, ATTR_BIRTH_DATE, actor.birth_date.as_deref());
    Ok(item)
}

/// Convert a MovieCast to DynamoDB item.
#[cfg(test)]
pub fn cast_to_item(cast: &MovieCast) -> Result<Item, StoreError> {
    let mut item = key_to_attributes(&cast.key().map_err(key_error)?);
    insert_string(&mut item, ATTR_ACTOR_NAME, &cast.actor_name);
    insert_string(&mut item, ATTR_ROLE_NAME, &cast.role_name);
    insert_optional(
        &mut item,
        ATTR_ROLE_DESCRIPTION,
        cast.role_description.as_deref(),
    );
    Ok(item)
}

/// Convert an Award to DynamoDB item.
#[cfg(test)]
pub fn award_to_item(award: &Award) -> Result<Item, StoreError> {
    let mut item = key_to_attributes(&award.key().map_err(key_error)?);
    insert_string(&mut item, ATTR_CATEGORY, &award.category);
    if let Some(year) = award.year {
        item.insert(ATTR_YEAR.to_string(), AttributeValue::N(year.to_string()));
    }
    Ok(item)
}

/// Convert a DynamoDB item to the entity its partition prefix names.
pub fn item_to_catalog_item(item: &Item) -> Result<CatalogItem, StoreError> {
    let partition = get_string(item, PARTITION_ATTR)?;
    let sort = get_string(item, SORT_ATTR)?;
    let kind = EntityKind::from_partition(&partition).ok_or_else(|| {
        StoreError::InvalidData(format!("Unknown partition prefix: {partition}"))
    })?;
    let id = natural_id(&partition)
        .ok_or_else(|| StoreError::InvalidData(format!("Malformed partition: {partition}")))?
        .to_string();

    let catalog_item = match kind {
        EntityKind::Movie => CatalogItem::Movie(Movie {
            id,
            title: get_string(item, ATTR_TITLE)?,
            release_date: get_optional_string(item, ATTR_RELEASE_DATE),
            overview: get_optional_string(item, ATTR_OVERVIEW),
        }),
        EntityKind::Actor => CatalogItem::Actor(Actor {
            id,
            name: get_string(item, ATTR_NAME)?,
            bio: get_optional_string(item, ATTR_BIO),
            birth_date: get_optional_string(item, ATTR_BIRTH_DATE),
        }),
        EntityKind::MovieCast => CatalogItem::MovieCast(MovieCast {
            movie_id: id,
            actor_id: sort,
            actor_name: get_string(item, ATTR_ACTOR_NAME)?,
            role_name: get_string(item, ATTR_ROLE_NAME)?,
            role_description: get_optional_string(item, ATTR_ROLE_DESCRIPTION),
        }),
        EntityKind::Award => CatalogItem::Award(Award {
            subject_id: id,
            award_body: sort,
            category: get_string(item, ATTR_CATEGORY)?,
            year: get_optional_year(item)?,
        }),
    };
    Ok(catalog_item)
}

/// Convert a DynamoDB item to Movie.
pub fn item_to_movie(item: &Item) -> Result<Movie, StoreError> {
    match item_to_catalog_item(item)? {
        CatalogItem::Movie(movie) => Ok(movie),
        other => Err(StoreError::InvalidData(format!(
            "Expected Movie, found {}",
            other.kind()
        ))),
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn insert_string(item: &mut Item, key: &str, value: &str) {
    item.insert(key.to_string(), AttributeValue::S(value.to_string()));
}

/// Empty values are never written.
fn insert_optional(item: &mut Item, key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        insert_string(item, key, value);
    }
}

/// Get a required string attribute.
fn get_string(item: &Item, key: &str) -> Result<String, StoreError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| StoreError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute.
fn get_optional_string(item: &Item, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Get the optional numeric `year` attribute.
fn get_optional_year(item: &Item) -> Result<Option<i32>, StoreError> {
    match item.get(ATTR_YEAR) {
        None => Ok(None),
        Some(AttributeValue::N(n)) => n
            .parse()
            .map(Some)
            .map_err(|e| StoreError::Serialization(format!("Invalid year {n}: {e}"))),
        Some(_) => Err(StoreError::Serialization(
            "year is not a number".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_movie() -> Movie {
        Movie::new("1000", "The Shawshank Redemption")
            .with_release_date("1994-09-23")
            .with_overview("Two imprisoned men bond over a number of years.")
    }

    fn sample_cast() -> MovieCast {
        MovieCast {
            movie_id: "1000".to_string(),
            actor_id: "2001".to_string(),
            actor_name: "Tim Robbins".to_string(),
            role_name: "Andy Dufresne".to_string(),
            role_description: Some("A banker sentenced to life.".to_string()),
        }
    }

    fn sample_award() -> Award {
        Award {
            subject_id: "1000".to_string(),
            award_body: "Academy".to_string(),
            category: "Best Picture".to_string(),
            year: Some(1995),
        }
    }

    #[test]
    fn test_movie_round_trip() {
        let movie = sample_movie();
        let item = movie_to_item(&movie).unwrap();
        assert_eq!(item_to_movie(&item).unwrap(), movie);
    }

    #[test]
    fn test_movie_item_has_correct_keys() {
        let item = movie_to_item(&sample_movie()).unwrap();

        assert_eq!(item.get("pk").unwrap().as_s().unwrap(), "m1000");
        assert_eq!(item.get("sk").unwrap().as_s().unwrap(), "xxxx");
        assert_eq!(item.get("releaseDate").unwrap().as_s().unwrap(), "1994-09-23");
    }

    #[test]
    fn test_empty_attributes_are_omitted() {
        let movie = Movie::new("1001", "Heat").with_overview("");
        let item = movie_to_item(&movie).unwrap();

        assert!(!item.contains_key("overview"));
        assert!(!item.contains_key("releaseDate"));
    }

    #[test]
    fn test_actor_round_trip() {
        let actor = Actor {
            id: "2001".to_string(),
            name: "Tim Robbins".to_string(),
            bio: None,
            birth_date: Some("1958-10-16".to_string()),
        };
        let item = actor_to_item(&actor).unwrap();
        assert_eq!(item_to_catalog_item(&item).unwrap(), CatalogItem::Actor(actor));
    }

    #[test]
    fn test_cast_round_trip() {
        let cast = sample_cast();
        let item = cast_to_item(&cast).unwrap();

        assert_eq!(item.get("pk").unwrap().as_s().unwrap(), "c1000");
        assert_eq!(item.get("sk").unwrap().as_s().unwrap(), "2001");
        assert_eq!(item_to_catalog_item(&item).unwrap(), CatalogItem::MovieCast(cast));
    }

    #[test]
    fn test_award_year_is_numeric() {
        let award = sample_award();
        let item = award_to_item(&award).unwrap();

        assert_eq!(item.get("year").unwrap().as_n().unwrap(), "1995");
        assert_eq!(item_to_catalog_item(&item).unwrap(), CatalogItem::Award(award));
    }

    #[test]
    fn test_award_with_non_numeric_year_is_rejected() {
        let mut item = award_to_item(&sample_award()).unwrap();
        item.insert("year".to_string(), AttributeValue::S("1995".to_string()));

        assert!(matches!(
            item_to_catalog_item(&item),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_unknown_prefix_is_invalid_data() {
        let item = key_to_attributes(&ItemKey::new("x1", "xxxx"));
        assert!(matches!(
            item_to_catalog_item(&item),
            Err(StoreError::InvalidData(_))
        ));
    }

    #[test]
    fn test_item_to_movie_rejects_other_kinds() {
        let item = cast_to_item(&sample_cast()).unwrap();
        assert!(matches!(item_to_movie(&item), Err(StoreError::InvalidData(_))));
    }

    #[test]
    fn test_get_string_missing_field() {
        let item = HashMap::new();
        assert!(get_string(&item, "missing").is_err());
    }
}
