//! MongoDB Store
//!
//! Student records kept in a MongoDB collection. Documents use the native
//! `_id` object id and BSON datetimes for the timestamps.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson, Document};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{options::ReturnDocument, Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{now, DeleteResult, Student, StudentPayload};
use crate::store::{StoreError, StoreResult, StudentStore, STUDENTS_COLLECTION};

// == Student Document ==
/// On-disk shape of a student record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StudentDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mark: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_done_pr: Option<bool>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    updated_at: DateTime<Utc>,
}

impl StudentDocument {
    fn new(payload: StudentPayload, at: DateTime<Utc>) -> Self {
        Self {
            id: ObjectId::new(),
            name: payload.name,
            group: payload.group,
            photo: payload.photo,
            mark: payload.mark,
            is_done_pr: payload.is_done_pr,
            created_at: at,
            updated_at: at,
        }
    }
}

impl From<StudentDocument> for Student {
    fn from(doc: StudentDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            name: doc.name,
            group: doc.group,
            photo: doc.photo,
            mark: doc.mark,
            is_done_pr: doc.is_done_pr,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Builds the update pipeline for a partial update.
///
/// Supplied values are wrapped in `$literal` so text such as `"$name"` is
/// stored as given. `updatedAt` becomes the later of `at` and the stored
/// value plus 1 ms, so every update moves it forward.
fn update_modifier(patch: StudentPayload, at: DateTime<Utc>) -> Vec<Document> {
    let mut set = Document::new();
    let mut literal = |field: &str, value: Bson| {
        set.insert(field, doc! { "$literal": value });
    };
    if let Some(name) = patch.name {
        literal("name", name.into());
    }
    if let Some(group) = patch.group {
        literal("group", group.into());
    }
    if let Some(photo) = patch.photo {
        literal("photo", photo.into());
    }
    if let Some(mark) = patch.mark {
        literal("mark", mark.into());
    }
    if let Some(is_done_pr) = patch.is_done_pr {
        literal("isDonePr", is_done_pr.into());
    }
    set.insert(
        "updatedAt",
        doc! {
            "$max": [
                bson::DateTime::from_chrono(at),
                { "$add": ["$updatedAt", 1_i64] },
            ]
        },
    );
    vec![doc! { "$set": set }]
}

/// Filter matching records with done practical work and a non-empty photo.
fn work_and_photo_filter() -> Document {
    doc! {
        "photo": { "$exists": true, "$nin": [Bson::Null, ""] },
        "isDonePr": true,
    }
}

// == Mongo Store ==
/// Student collection backed by MongoDB.
#[derive(Debug, Clone)]
pub struct MongoStore {
    collection: Collection<StudentDocument>,
}

impl MongoStore {
    // == Connect ==
    /// Connects to the server at `uri` and verifies the connection with a ping.
    ///
    /// # Arguments
    /// * `uri` - MongoDB connection string
    /// * `database` - Database holding the students collection
    pub async fn connect(uri: &str, database: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(database);

        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", uri, e)))?;
        info!("Connected to MongoDB at {} (database '{}')", uri, database);

        Ok(Self {
            collection: db.collection(STUDENTS_COLLECTION),
        })
    }

    async fn find(&self, filter: Document) -> StoreResult<Vec<Student>> {
        let cursor = self.collection.find(filter).await?;
        let docs: Vec<StudentDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Student::from).collect())
    }
}

#[async_trait]
impl StudentStore for MongoStore {
    async fn list(&self) -> StoreResult<Vec<Student>> {
        self.find(doc! {}).await
    }

    async fn create(&self, payload: StudentPayload) -> StoreResult<Student> {
        let doc = StudentDocument::new(payload, now());
        self.collection.insert_one(&doc).await?;
        debug!("Inserted student {}", doc.id);
        Ok(doc.into())
    }

    async fn delete(&self, id: &str) -> StoreResult<DeleteResult> {
        // A malformed id can never match a stored `_id`
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(DeleteResult::new(0));
        };

        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        Ok(DeleteResult::new(result.deleted_count))
    }

    async fn update(&self, id: &str, patch: StudentPayload) -> StoreResult<Option<Student>> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, update_modifier(patch, now()))
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated.map(Student::from))
    }

    async fn with_work_and_photo(&self) -> StoreResult<Vec<Student>> {
        self.find(work_and_photo_filter()).await
    }
}
