pub mod awards;
pub mod cast;
pub mod error;
pub mod health;
pub mod movies;

pub use error::ApiError;
