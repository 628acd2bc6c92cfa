//! Persistence port used by the HTTP handlers.
//!
//! Handlers never talk to a driver directly: they receive an `Arc<dyn Store>`
//! through `web::Data`, so the MongoDB adapter can be swapped for the
//! in-memory one in tests.

#[cfg(test)]
pub mod memory;
pub mod mongo;

#[cfg(test)]
pub use memory::MemoryStore;
pub use mongo::MongoDB;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use thiserror::Error;

use crate::models::{ColorPath, ProjectArrayField};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Unexpected inserted id: {0}")]
    UnexpectedId(String),

    #[error("Field '{0}' cannot hold this update")]
    InvalidPath(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Collections the gateway knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Projects,
    Resume,
    Colors,
    Users,
    Contacts,
}

impl CollectionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Projects => "projects",
            CollectionName::Resume => "resume",
            CollectionName::Colors => "color",
            CollectionName::Users => "users",
            CollectionName::Contacts => "contacts",
        }
    }
}

/// How a single document is located without its `_id`.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// First document of the collection (singletons such as the resume).
    First,
    /// Document whose `field` equals `value`.
    Field { field: &'static str, value: String },
}

impl Lookup {
    pub fn field(field: &'static str, value: impl Into<String>) -> Self {
        Lookup::Field {
            field,
            value: value.into(),
        }
    }
}

/// The update shapes the API supports. Each variant only carries
/// already-validated targets.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Overwrite the given top-level fields.
    Merge(Document),
    /// Append one element to an allow-listed array field.
    Push { field: ProjectArrayField, item: Bson },
    /// Set one leaf inside a two-level nested document.
    SetPath { path: ColorPath, value: Bson },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted(ObjectId),
    Updated { modified: u64 },
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_all(&self, collection: CollectionName) -> StoreResult<Vec<Document>>;

    async fn find_by_id(&self, collection: CollectionName, id: ObjectId) -> StoreResult<Option<Document>>;

    async fn find_one(&self, collection: CollectionName, lookup: &Lookup) -> StoreResult<Option<Document>>;

    async fn insert(&self, collection: CollectionName, doc: Document) -> StoreResult<ObjectId>;

    async fn update_by_id(
        &self,
        collection: CollectionName,
        id: ObjectId,
        mutation: Mutation,
    ) -> StoreResult<UpdateOutcome>;

    /// Updates the document found by `lookup` with `set`, or inserts a new
    /// one built from the lookup key, `set` and `set_on_insert`.
    ///
    /// Two concurrent calls with the same key race: the last write wins.
    async fn upsert_by_key(
        &self,
        collection: CollectionName,
        lookup: &Lookup,
        set: Document,
        set_on_insert: Document,
    ) -> StoreResult<UpsertOutcome>;

    async fn delete_by_id(&self, collection: CollectionName, id: ObjectId) -> StoreResult<u64>;

    async fn delete_many(&self, collection: CollectionName, ids: &[ObjectId]) -> StoreResult<u64>;
}
