use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use std::time::Duration;

use super::{CollectionName, Lookup, Mutation, Store, StoreError, StoreResult, UpdateOutcome, UpsertOutcome};

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> StoreResult<Self> {
        let mut client_options = ClientOptions::parse(uri).await?;

        client_options.app_name = Some("portfolio-server".to_string());
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(Duration::from_secs(300));
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Test connection
        db.run_command(doc! { "ping": 1 }).await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Users are addressed by email, so the upsert relies on this index to
    /// keep one document per address.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let users = self.collection(CollectionName::Users);
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match users.create_index(email_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(email) unique"),
            Err(e) => log::warn!("   ⚠️  Could not create users(email) index: {}", e),
        }
    }

    pub fn collection(&self, name: CollectionName) -> Collection<Document> {
        self.db.collection(name.as_str())
    }
}

fn lookup_filter(lookup: &Lookup) -> Document {
    match lookup {
        Lookup::First => doc! {},
        Lookup::Field { field, value } => {
            let mut filter = Document::new();
            filter.insert(*field, value.as_str());
            filter
        }
    }
}

fn update_document(mutation: Mutation) -> Document {
    match mutation {
        Mutation::Merge(mut fields) => {
            fields.remove("_id");
            doc! { "$set": fields }
        }
        Mutation::Push { field, item } => {
            let mut target = Document::new();
            target.insert(field.as_str(), item);
            doc! { "$push": target }
        }
        Mutation::SetPath { path, value } => {
            let mut target = Document::new();
            target.insert(path.dotted(), value);
            doc! { "$set": target }
        }
    }
}

/// Server codes for updates the stored document's shape cannot take:
/// BadValue, TypeMismatch and PathNotViable.
const PATH_CONFLICT_CODES: [i32; 3] = [2, 14, 28];

fn is_path_conflict(code: i32) -> bool {
    PATH_CONFLICT_CODES.contains(&code)
}

fn mutation_target(mutation: &Mutation) -> String {
    match mutation {
        Mutation::Merge(fields) => fields.keys().cloned().collect::<Vec<_>>().join(","),
        Mutation::Push { field, .. } => field.to_string(),
        Mutation::SetPath { path, .. } => path.dotted(),
    }
}

fn classify_update_error(err: mongodb::error::Error, target: String) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) if is_path_conflict(e.code) => {
            log::warn!("⚠️  Update rejected for '{}': {}", target, e.message);
            StoreError::InvalidPath(target)
        }
        _ => StoreError::Database(err),
    }
}

fn inserted_object_id(id: Bson) -> StoreResult<ObjectId> {
    match id {
        Bson::ObjectId(oid) => Ok(oid),
        other => Err(StoreError::UnexpectedId(other.to_string())),
    }
}

#[async_trait]
impl Store for MongoDB {
    async fn find_all(&self, collection: CollectionName) -> StoreResult<Vec<Document>> {
        let cursor = self.collection(collection).find(doc! {}).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs)
    }

    async fn find_by_id(&self, collection: CollectionName, id: ObjectId) -> StoreResult<Option<Document>> {
        Ok(self.collection(collection).find_one(doc! { "_id": id }).await?)
    }

    async fn find_one(&self, collection: CollectionName, lookup: &Lookup) -> StoreResult<Option<Document>> {
        Ok(self.collection(collection).find_one(lookup_filter(lookup)).await?)
    }

    async fn insert(&self, collection: CollectionName, doc: Document) -> StoreResult<ObjectId> {
        let result = self.collection(collection).insert_one(doc).await?;
        inserted_object_id(result.inserted_id)
    }

    async fn update_by_id(
        &self,
        collection: CollectionName,
        id: ObjectId,
        mutation: Mutation,
    ) -> StoreResult<UpdateOutcome> {
        let target = mutation_target(&mutation);
        let result = self
            .collection(collection)
            .update_one(doc! { "_id": id }, update_document(mutation))
            .await
            .map_err(|e| classify_update_error(e, target))?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn upsert_by_key(
        &self,
        collection: CollectionName,
        lookup: &Lookup,
        set: Document,
        set_on_insert: Document,
    ) -> StoreResult<UpsertOutcome> {
        let mut update = Document::new();
        if !set.is_empty() {
            update.insert("$set", set);
        }
        if !set_on_insert.is_empty() {
            update.insert("$setOnInsert", set_on_insert);
        }

        let result = self
            .collection(collection)
            .update_one(lookup_filter(lookup), update)
            .upsert(true)
            .await?;

        match result.upserted_id {
            Some(id) => Ok(UpsertOutcome::Inserted(inserted_object_id(id)?)),
            None => Ok(UpsertOutcome::Updated {
                modified: result.modified_count,
            }),
        }
    }

    async fn delete_by_id(&self, collection: CollectionName, id: ObjectId) -> StoreResult<u64> {
        let result = self.collection(collection).delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }

    async fn delete_many(&self, collection: CollectionName, ids: &[ObjectId]) -> StoreResult<u64> {
        let ids: Vec<Bson> = ids.iter().copied().map(Bson::ObjectId).collect();
        let result = self
            .collection(collection)
            .delete_many(doc! { "_id": { "$in": ids } })
            .await?;
        Ok(result.deleted_count)
    }
}
