use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::collections::HashMap;
use std::sync::RwLock;

use super::{CollectionName, Lookup, Mutation, Store, StoreError, StoreResult, UpdateOutcome, UpsertOutcome};

/// In-process store with the same update semantics as the MongoDB adapter.
/// Used by the handler tests.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<CollectionName, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self, collection: CollectionName) -> usize {
        self.read(collection, |docs| docs.len())
    }

    fn read<R>(&self, collection: CollectionName, f: impl FnOnce(&[Document]) -> R) -> R {
        let guard = self.collections.read().unwrap_or_else(|e| e.into_inner());
        f(guard.get(&collection).map(Vec::as_slice).unwrap_or(&[]))
    }

    fn write<R>(&self, collection: CollectionName, f: impl FnOnce(&mut Vec<Document>) -> R) -> R {
        let mut guard = self.collections.write().unwrap_or_else(|e| e.into_inner());
        f(guard.entry(collection).or_default())
    }
}

fn matches(lookup: &Lookup, doc: &Document) -> bool {
    match lookup {
        Lookup::First => true,
        Lookup::Field { field, value } => doc.get_str(field).map(|v| v == value.as_str()).unwrap_or(false),
    }
}

fn has_id(doc: &Document, id: &ObjectId) -> bool {
    doc.get_object_id("_id").map(|v| &v == id).unwrap_or(false)
}

fn with_id(id: ObjectId, fields: Document) -> Document {
    let mut doc = Document::new();
    doc.insert("_id", id);
    for (key, value) in fields {
        if key != "_id" {
            doc.insert(key, value);
        }
    }
    doc
}

fn apply(doc: &mut Document, mutation: Mutation) -> StoreResult<()> {
    match mutation {
        Mutation::Merge(fields) => {
            for (key, value) in fields {
                if key != "_id" {
                    doc.insert(key, value);
                }
            }
        }
        Mutation::Push { field, item } => match doc.get_mut(field.as_str()) {
            None => {
                doc.insert(field.as_str(), vec![item]);
            }
            Some(Bson::Array(items)) => items.push(item),
            Some(_) => return Err(StoreError::InvalidPath(field.to_string())),
        },
        Mutation::SetPath { path, value } => match doc.get_mut(path.theme()) {
            None => {
                let mut theme = Document::new();
                theme.insert(path.key(), value);
                doc.insert(path.theme(), theme);
            }
            Some(Bson::Document(theme)) => {
                theme.insert(path.key(), value);
            }
            Some(_) => return Err(StoreError::InvalidPath(path.dotted())),
        },
    }
    Ok(())
}

/// Applies `mutation` to `doc` and reports whether anything changed.
fn apply_tracked(doc: &mut Document, mutation: Mutation) -> StoreResult<u64> {
    let mut updated = doc.clone();
    apply(&mut updated, mutation)?;
    if updated == *doc {
        return Ok(0);
    }
    *doc = updated;
    Ok(1)
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_all(&self, collection: CollectionName) -> StoreResult<Vec<Document>> {
        Ok(self.read(collection, |docs| docs.to_vec()))
    }

    async fn find_by_id(&self, collection: CollectionName, id: ObjectId) -> StoreResult<Option<Document>> {
        Ok(self.read(collection, |docs| docs.iter().find(|d| has_id(d, &id)).cloned()))
    }

    async fn find_one(&self, collection: CollectionName, lookup: &Lookup) -> StoreResult<Option<Document>> {
        Ok(self.read(collection, |docs| docs.iter().find(|d| matches(lookup, d)).cloned()))
    }

    async fn insert(&self, collection: CollectionName, doc: Document) -> StoreResult<ObjectId> {
        let id = ObjectId::new();
        self.write(collection, |docs| docs.push(with_id(id, doc)));
        Ok(id)
    }

    async fn update_by_id(
        &self,
        collection: CollectionName,
        id: ObjectId,
        mutation: Mutation,
    ) -> StoreResult<UpdateOutcome> {
        self.write(collection, |docs| match docs.iter_mut().find(|d| has_id(d, &id)) {
            None => Ok(UpdateOutcome::default()),
            Some(doc) => Ok(UpdateOutcome {
                matched: 1,
                modified: apply_tracked(doc, mutation)?,
            }),
        })
    }

    async fn upsert_by_key(
        &self,
        collection: CollectionName,
        lookup: &Lookup,
        set: Document,
        set_on_insert: Document,
    ) -> StoreResult<UpsertOutcome> {
        self.write(collection, |docs| {
            if let Some(doc) = docs.iter_mut().find(|d| matches(lookup, d)) {
                let modified = apply_tracked(doc, Mutation::Merge(set))?;
                return Ok(UpsertOutcome::Updated { modified });
            }

            let mut fields = Document::new();
            if let Lookup::Field { field, value } = lookup {
                fields.insert(*field, value.as_str());
            }
            for (key, value) in set.into_iter().chain(set_on_insert) {
                fields.insert(key, value);
            }

            let id = ObjectId::new();
            docs.push(with_id(id, fields));
            Ok(UpsertOutcome::Inserted(id))
        })
    }

    async fn delete_by_id(&self, collection: CollectionName, id: ObjectId) -> StoreResult<u64> {
        self.write(collection, |docs| match docs.iter().position(|d| has_id(d, &id)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        })
    }

    async fn delete_many(&self, collection: CollectionName, ids: &[ObjectId]) -> StoreResult<u64> {
        self.write(collection, |docs| {
            let before = docs.len();
            docs.retain(|d| !ids.iter().any(|id| has_id(d, id)));
            Ok((before - docs.len()) as u64)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColorPath, ProjectArrayField};
    use mongodb::bson::doc;

    #[tokio::test]
    async fn merge_reports_unchanged_documents() {
        let store = MemoryStore::new();
        let id = store.insert(CollectionName::Projects, doc! { "title": "a" }).await.unwrap();

        let same = store
            .update_by_id(CollectionName::Projects, id, Mutation::Merge(doc! { "title": "a" }))
            .await
            .unwrap();
        assert_eq!(same, UpdateOutcome { matched: 1, modified: 0 });

        let changed = store
            .update_by_id(CollectionName::Projects, id, Mutation::Merge(doc! { "title": "b" }))
            .await
            .unwrap();
        assert_eq!(changed, UpdateOutcome { matched: 1, modified: 1 });
    }

    #[tokio::test]
    async fn push_creates_missing_array_and_rejects_scalars() {
        let store = MemoryStore::new();
        let id = store.insert(CollectionName::Projects, doc! { "features": "oops" }).await.unwrap();
        let other = store.insert(CollectionName::Projects, doc! {}).await.unwrap();

        let push = |item: &str| Mutation::Push {
            field: ProjectArrayField::Features,
            item: Bson::String(item.into()),
        };

        assert!(matches!(
            store.update_by_id(CollectionName::Projects, id, push("x")).await,
            Err(StoreError::InvalidPath(_))
        ));

        store.update_by_id(CollectionName::Projects, other, push("x")).await.unwrap();
        let doc = store.find_by_id(CollectionName::Projects, other).await.unwrap().unwrap();
        assert_eq!(doc.get_array("features").unwrap(), &vec![Bson::String("x".into())]);
    }

    #[tokio::test]
    async fn set_path_creates_theme() {
        let store = MemoryStore::new();
        let id = store.insert(CollectionName::Colors, doc! {}).await.unwrap();
        let path = ColorPath::new("light", "text").unwrap();

        store
            .update_by_id(CollectionName::Colors, id, Mutation::SetPath { path, value: "#111".into() })
            .await
            .unwrap();

        let doc = store.find_by_id(CollectionName::Colors, id).await.unwrap().unwrap();
        assert_eq!(doc.get_document("light").unwrap().get_str("text").unwrap(), "#111");
    }

    #[tokio::test]
    async fn upsert_keeps_insert_only_fields() {
        let store = MemoryStore::new();
        let key = Lookup::field("email", "a@b.c");

        let first = store
            .upsert_by_key(CollectionName::Users, &key, doc! { "name": "A" }, doc! { "createdAt": 1 })
            .await
            .unwrap();
        assert!(matches!(first, UpsertOutcome::Inserted(_)));

        let second = store
            .upsert_by_key(CollectionName::Users, &key, doc! { "name": "B" }, doc! { "createdAt": 2 })
            .await
            .unwrap();
        assert_eq!(second, UpsertOutcome::Updated { modified: 1 });

        let users = store.find_all(CollectionName::Users).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].get_str("name").unwrap(), "B");
        assert_eq!(users[0].get_i32("createdAt").unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_many_counts_matches() {
        let store = MemoryStore::new();
        let a = store.insert(CollectionName::Users, doc! {}).await.unwrap();
        let b = store.insert(CollectionName::Users, doc! {}).await.unwrap();
        store.insert(CollectionName::Users, doc! {}).await.unwrap();

        let deleted = store
            .delete_many(CollectionName::Users, &[a, b, ObjectId::new()])
            .await
            .unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(store.len(CollectionName::Users), 1);
    }
}
