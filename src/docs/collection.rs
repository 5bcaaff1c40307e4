//! Document collection seam and its MongoDB implementation.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Bson, Document};
use mongodb::{Client, Collection};
use tracing::{debug, info};

use crate::error::Result;

/// Counts reported by an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub matched: u64,
    pub modified: u64,
}

// == Document Collection Trait ==
/// The operations the helpers need from a document collection.
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Inserts one document and returns its generated `_id`.
    async fn insert_one(&self, document: Document) -> Result<Bson>;

    async fn find(&self, filter: Document) -> Result<Vec<Document>>;

    async fn count_documents(&self, filter: Document) -> Result<u64>;

    async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>>;

    async fn update_many(&self, filter: Document, update: Document) -> Result<UpdateSummary>;
}

#[async_trait]
impl DocumentCollection for Collection<Document> {
    async fn insert_one(&self, document: Document) -> Result<Bson> {
        let result = Collection::insert_one(self, document, None).await?;
        Ok(result.inserted_id)
    }

    async fn find(&self, filter: Document) -> Result<Vec<Document>> {
        debug!("find {} {}", self.name(), filter);
        let cursor = Collection::find(self, filter, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count_documents(&self, filter: Document) -> Result<u64> {
        Ok(Collection::count_documents(self, filter, None).await?)
    }

    async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>> {
        debug!("aggregate {} ({} stages)", self.name(), pipeline.len());
        let cursor = Collection::aggregate(self, pipeline, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update_many(&self, filter: Document, update: Document) -> Result<UpdateSummary> {
        let result = Collection::update_many(self, filter, update, None).await?;
        Ok(UpdateSummary {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }
}

/// Opens `database.collection` on the server at `uri`.
///
/// The driver connects lazily: an unreachable server surfaces on the first
/// query, not here.
pub async fn connect_collection(
    uri: &str,
    database: &str,
    collection: &str,
) -> Result<Collection<Document>> {
    let client = Client::with_uri_str(uri).await?;
    info!("Using {}.{} at {}", database, collection, uri);
    Ok(client.database(database).collection::<Document>(collection))
}
