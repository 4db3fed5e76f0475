//! Data models for Animal API requests and responses.
//!
//! Types are organized by resource in submodules and re-exported here
//! for convenient access.

pub mod animal;
pub mod fields;
pub mod page;

pub use animal::{AnimalDetail, AnimalSummary, TransformedAnimal};
pub use fields::{BornAt, FriendsField};
pub use page::PaginatedListPage;
