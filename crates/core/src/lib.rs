//! Functional core of moviedb.
//!
//! Entity keys, filter predicates, request validation, the store error
//! taxonomy and the auth domain types. No I/O lives here.

pub mod auth;
pub mod catalog;
pub mod storage;
