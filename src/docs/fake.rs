//! In-memory collection for tests.
//!
//! Matches filters by top-level equality (array fields match when they
//! contain the value), applies `$set` updates, and answers `aggregate` with a
//! canned result while recording the pipeline it was given.

use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};

use crate::docs::{DocumentCollection, UpdateSummary};
use crate::error::Result;

#[derive(Default)]
pub struct FakeCollection {
    documents: Mutex<Vec<Document>>,
    aggregate_result: Vec<Document>,
    pipelines: Mutex<Vec<Vec<Document>>>,
}

impl FakeCollection {
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: Mutex::new(documents),
            ..Default::default()
        }
    }

    pub fn aggregate_returns(mut self, result: Vec<Document>) -> Self {
        self.aggregate_result = result;
        self
    }

    pub fn documents(&self) -> Vec<Document> {
        self.documents.lock().unwrap().clone()
    }

    pub fn pipelines(&self) -> Vec<Vec<Document>> {
        self.pipelines.lock().unwrap().clone()
    }
}

fn filter_matches(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(field, expected)| match document.get(field) {
        Some(actual @ Bson::Array(items)) => items.contains(expected) || actual == expected,
        Some(actual) => actual == expected,
        None => false,
    })
}

#[async_trait]
impl DocumentCollection for FakeCollection {
    async fn insert_one(&self, mut document: Document) -> Result<Bson> {
        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };
        self.documents.lock().unwrap().push(document);
        Ok(id)
    }

    async fn find(&self, filter: Document) -> Result<Vec<Document>> {
        let documents = self.documents.lock().unwrap();
        Ok(documents
            .iter()
            .filter(|document| filter_matches(document, &filter))
            .cloned()
            .collect())
    }

    async fn count_documents(&self, filter: Document) -> Result<u64> {
        Ok(self.find(filter).await?.len() as u64)
    }

    async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>> {
        self.pipelines.lock().unwrap().push(pipeline);
        Ok(self.aggregate_result.clone())
    }

    async fn update_many(&self, filter: Document, update: Document) -> Result<UpdateSummary> {
        let set = update.get_document("$set").cloned().unwrap_or_default();
        let mut summary = UpdateSummary::default();
        let mut documents = self.documents.lock().unwrap();

        for document in documents.iter_mut().filter(|d| filter_matches(d, &filter)) {
            summary.matched += 1;
            let before = document.clone();
            for (field, value) in &set {
                document.insert(field.clone(), value.clone());
            }
            if *document != before {
                summary.modified += 1;
            }
        }
        Ok(summary)
    }
}
