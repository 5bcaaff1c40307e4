//! School and student helpers.

use mongodb::bson::{self, doc, Bson, Document};
use serde::Deserialize;

use crate::docs::{DocumentCollection, UpdateSummary};
use crate::error::{Error, Result};

/// Every document in the collection.
pub async fn list_all(collection: &dyn DocumentCollection) -> Result<Vec<Document>> {
    collection.find(doc! {}).await
}

/// Inserts a school built from `fields` and returns its `_id`.
pub async fn insert_school(collection: &dyn DocumentCollection, fields: Document) -> Result<Bson> {
    collection.insert_one(fields).await
}

/// Replaces the topics of every school named `name`.
pub async fn update_topics(
    collection: &dyn DocumentCollection,
    name: &str,
    topics: &[&str],
) -> Result<UpdateSummary> {
    let topics: Vec<Bson> = topics.iter().map(|t| Bson::String(t.to_string())).collect();
    collection
        .update_many(doc! { "name": name }, doc! { "$set": { "topics": topics } })
        .await
}

/// Schools whose topics include `topic`.
pub async fn schools_by_topic(
    collection: &dyn DocumentCollection,
    topic: &str,
) -> Result<Vec<Document>> {
    collection.find(doc! { "topics": topic }).await
}

/// A student with the average of their topic scores.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudentAverage {
    #[serde(rename = "_id")]
    pub id: Bson,
    #[serde(default)]
    pub name: Option<String>,
    /// Null when the student has no scored topics
    #[serde(rename = "averageScore", default)]
    pub average_score: Option<f64>,
}

/// Students sorted by average score, best first.
pub async fn top_students(collection: &dyn DocumentCollection) -> Result<Vec<StudentAverage>> {
    let pipeline = vec![
        doc! { "$project": { "name": "$name", "averageScore": { "$avg": "$topics.score" } } },
        doc! { "$sort": { "averageScore": -1 } },
    ];

    collection
        .aggregate(pipeline)
        .await?
        .into_iter()
        .map(|student| bson::from_document(student).map_err(|err| Error::Decode(err.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::fake::FakeCollection;

    fn schools() -> FakeCollection {
        FakeCollection::with_documents(vec![
            doc! { "_id": 1, "name": "Holberton school", "topics": ["Algo", "C"] },
            doc! { "_id": 2, "name": "UCSF", "topics": ["Algo", "MongoDB"] },
            doc! { "_id": 3, "name": "UCLA", "topics": ["C", "Python"] },
        ])
    }

    #[tokio::test]
    async fn test_list_all() {
        let collection = schools();
        assert_eq!(list_all(&collection).await.unwrap().len(), 3);

        let empty = FakeCollection::default();
        assert!(list_all(&empty).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_school_returns_id() {
        let collection = FakeCollection::default();

        let id = insert_school(&collection, doc! { "name": "UCSF", "address": "505 Parnassus Ave" })
            .await
            .unwrap();

        assert!(matches!(id, Bson::ObjectId(_)));
        let stored = collection.documents();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].get("_id"), Some(&id));
        assert_eq!(stored[0].get_str("address").unwrap(), "505 Parnassus Ave");
    }

    #[tokio::test]
    async fn test_update_topics() {
        let collection = schools();

        let summary = update_topics(&collection, "UCLA", &["Sys admin", "AI"])
            .await
            .unwrap();

        assert_eq!(summary, UpdateSummary { matched: 1, modified: 1 });
        let ucla = schools_by_topic(&collection, "AI").await.unwrap();
        assert_eq!(ucla.len(), 1);
        assert_eq!(ucla[0].get_str("name").unwrap(), "UCLA");
    }

    #[tokio::test]
    async fn test_schools_by_topic() {
        let collection = schools();

        let names: Vec<String> = schools_by_topic(&collection, "Algo")
            .await
            .unwrap()
            .iter()
            .map(|school| school.get_str("name").unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Holberton school", "UCSF"]);
        assert!(schools_by_topic(&collection, "Rust").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_top_students_pipeline_and_decoding() {
        let collection = FakeCollection::default().aggregate_returns(vec![
            doc! { "_id": 10, "name": "Alice", "averageScore": 92.5 },
            doc! { "_id": 11, "name": "Bob", "averageScore": Bson::Null },
        ]);

        let students = top_students(&collection).await.unwrap();

        assert_eq!(students.len(), 2);
        assert_eq!(students[0].name.as_deref(), Some("Alice"));
        assert_eq!(students[0].average_score, Some(92.5));
        assert_eq!(students[1].average_score, None);

        let pipelines = collection.pipelines();
        assert_eq!(pipelines.len(), 1);
        assert_eq!(
            pipelines[0][0],
            doc! { "$project": { "name": "$name", "averageScore": { "$avg": "$topics.score" } } }
        );
        assert_eq!(pipelines[0][1], doc! { "$sort": { "averageScore": -1 } });
    }
}
