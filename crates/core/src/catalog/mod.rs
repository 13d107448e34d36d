mod error;
pub mod filter;
pub mod keys;
mod requests;
mod types;

pub use error::{KeyError, ValidationError};
pub use filter::{
    build_award_filter, movies_filter, partition_filter, AwardQuery, Condition, FilterExpression,
    KeyField, Operator, Predicate,
};
pub use keys::{EntityKind, ItemKey};
pub use requests::{non_empty, CreateMovieRequest};
pub use types::{Actor, Award, CatalogItem, Movie, MovieCast};
