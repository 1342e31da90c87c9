//! MongoDB implementation of the carewell record store backend.

use async_trait::async_trait;
use bson::{Bson, Document, Uuid, doc};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection as MongoCollection,
    options::{ClientOptions, FindOptions},
};

use carewell_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{StoreError, StoreResult},
    query::{Query, QueryVisitor, SortDirection},
};

use crate::{
    query::MongoQueryTranslator,
    sanitizer::{restore_value, sanitize_str, sanitize_value},
};

/// Record store backend persisting to a MongoDB database.
///
/// Each record type's standalone collection maps to a MongoDB collection
/// of the same name; record ids are stored as the `_id` field.
#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(&sanitize_str(collection_name))
    }

    fn prepare_record(&self, id: &Uuid, record: &Bson) -> StoreResult<Document> {
        let mut prepared = sanitize_value(record)
            .as_document()
            .cloned()
            .ok_or_else(|| StoreError::InvalidRecord("expected a document".into()))?;
        prepared.insert("_id", *id);

        Ok(prepared)
    }

    fn restore_record(&self, record: &Document) -> StoreResult<Bson> {
        Ok(restore_value(&Bson::Document(
            record
                .iter()
                .filter(|(k, _)| k.as_str() != "_id")
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )))
    }

    fn translate_filter(&self, query: &Query) -> StoreResult<Document> {
        match &query.filter {
            Some(expr) => MongoQueryTranslator.visit_expr(expr),
            None => Ok(doc! {}),
        }
    }
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    async fn insert_record(&self, id: Uuid, record: Bson, collection: &str) -> StoreResult<()> {
        self.get_collection(collection)
            .insert_one(self.prepare_record(&id, &record)?)
            .await
            .map_err(|e| {
                // Duplicate-key failures surface the E11000 server code.
                if e.to_string().contains("E11000") {
                    StoreError::DuplicateRecord(id.to_string(), collection.to_string())
                } else {
                    StoreError::Backend(e.to_string())
                }
            })?;

        Ok(())
    }

    async fn replace_record(&self, id: Uuid, record: Bson, collection: &str) -> StoreResult<()> {
        let result = self
            .get_collection(collection)
            .replace_one(doc! { "_id": id }, self.prepare_record(&id, &record)?)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(StoreError::RecordNotFound(
                id.to_string(),
                collection.to_string(),
            ));
        }

        Ok(())
    }

    async fn find_record(&self, id: Uuid, collection: &str) -> StoreResult<Option<Bson>> {
        self.get_collection(collection)
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .map(|record| self.restore_record(&record))
            .transpose()
    }

    async fn query_records(&self, query: Query, collection: &str) -> StoreResult<Vec<Bson>> {
        let mut options = FindOptions::default();

        if let Some(limit) = query.limit {
            options.limit = Some(limit as i64);
        }
        if let Some(offset) = query.offset {
            options.skip = Some(offset as u64);
        }
        if let Some(sort) = &query.sort {
            // Secondary _id key keeps tied sort keys in a stable order so
            // offset pagination stays reproducible across pages.
            options.sort = Some(doc! {
                sort.field.clone(): match sort.direction {
                    SortDirection::Asc => 1,
                    SortDirection::Desc => -1,
                },
                "_id": 1,
            });
        }

        let filter = self.translate_filter(&query)?;

        self.get_collection(collection)
            .find(filter)
            .with_options(options)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .iter()
            .map(|record| self.restore_record(record))
            .collect()
    }

    async fn count_records(
        &self,
        filter: Option<carewell_core::query::Expr>,
        collection: &str,
    ) -> StoreResult<u64> {
        let filter = match &filter {
            Some(expr) => MongoQueryTranslator.visit_expr(expr)?,
            None => doc! {},
        };

        self.get_collection(collection)
            .count_documents(filter)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn shutdown(self) -> StoreResult<()> {
        self.client.shutdown().await;

        Ok(())
    }
}

/// Builder carrying the connection string and database name.
pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
        }
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(MongoDbStore::new(
            Client::with_options(
                ClientOptions::parse(&self.dsn)
                    .await
                    .map_err(|e| StoreError::Initialization(e.to_string()))?,
            )
            .map_err(|e| StoreError::Initialization(e.to_string()))?,
            self.database,
        ))
    }
}
