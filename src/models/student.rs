//! Student record
//!
//! The single resource managed by the API.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::StudentPayload;

/// Current time at the precision the document store keeps (milliseconds).
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

// == Student ==
/// A stored student record.
///
/// Only `id` and the timestamps are always present; every other field may be
/// absent and is then omitted from the JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Generated object id (24 hex digits)
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Cohort or class identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// URL or path of the attached photo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mark: Option<f64>,
    /// Whether the practical work is done
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_done_pr: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    // == Constructor ==
    /// Builds a new record from a create payload.
    ///
    /// # Arguments
    /// * `id` - Freshly generated identifier
    /// * `payload` - Fields supplied by the client
    /// * `at` - Creation time, used for both timestamps
    pub fn new(id: impl Into<String>, payload: StudentPayload, at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: payload.name,
            group: payload.group,
            photo: payload.photo,
            mark: payload.mark,
            is_done_pr: payload.is_done_pr,
            created_at: at,
            updated_at: at,
        }
    }

    // == Apply ==
    /// Replaces the supplied fields and refreshes `updated_at`.
    ///
    /// Fields absent from the payload keep their stored values.
    pub fn apply(&mut self, patch: StudentPayload, at: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(group) = patch.group {
            self.group = Some(group);
        }
        if let Some(photo) = patch.photo {
            self.photo = Some(photo);
        }
        if let Some(mark) = patch.mark {
            self.mark = Some(mark);
        }
        if let Some(is_done_pr) = patch.is_done_pr {
            self.is_done_pr = Some(is_done_pr);
        }
        self.touch(at);
    }

    /// Moves `updated_at` forward to `at`, or one millisecond past the
    /// previous value when the clock has not advanced.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = if at > self.updated_at {
            at
        } else {
            self.updated_at + Duration::milliseconds(1)
        };
    }

    // == Work And Photo ==
    /// True if the practical work is done and a non-empty photo is attached.
    pub fn has_work_and_photo(&self) -> bool {
        let has_photo = self.photo.as_deref().is_some_and(|p| !p.is_empty());
        has_photo && self.is_done_pr == Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> StudentPayload {
        StudentPayload {
            name: Some("Ann".to_string()),
            group: Some("A1".to_string()),
            photo: Some("p.jpg".to_string()),
            mark: Some(5.0),
            is_done_pr: Some(true),
        }
    }

    #[test]
    fn test_new_sets_both_timestamps() {
        let at = now();
        let student = Student::new("id1", ann(), at);
        assert_eq!(student.created_at, at);
        assert_eq!(student.updated_at, at);
        assert_eq!(student.name.as_deref(), Some("Ann"));
    }

    #[test]
    fn test_apply_replaces_only_supplied_fields() {
        let at = now();
        let mut student = Student::new("id1", ann(), at);

        let patch = StudentPayload {
            mark: Some(3.0),
            ..Default::default()
        };
        student.apply(patch, at + Duration::seconds(1));

        assert_eq!(student.mark, Some(3.0));
        assert_eq!(student.name.as_deref(), Some("Ann"));
        assert_eq!(student.photo.as_deref(), Some("p.jpg"));
        assert_eq!(student.created_at, at);
        assert_eq!(student.updated_at, at + Duration::seconds(1));
    }

    #[test]
    fn test_touch_always_advances() {
        let at = now();
        let mut student = Student::new("id1", StudentPayload::default(), at);
        student.touch(at);
        assert!(student.updated_at > at);
    }

    #[test]
    fn test_has_work_and_photo() {
        let at = now();
        assert!(Student::new("a", ann(), at).has_work_and_photo());

        let mut no_photo = ann();
        no_photo.photo = Some(String::new());
        assert!(!Student::new("b", no_photo, at).has_work_and_photo());

        let mut missing_photo = ann();
        missing_photo.photo = None;
        assert!(!Student::new("c", missing_photo, at).has_work_and_photo());

        let mut not_done = ann();
        not_done.is_done_pr = Some(false);
        assert!(!Student::new("d", not_done, at).has_work_and_photo());

        let mut unknown = ann();
        unknown.is_done_pr = None;
        assert!(!Student::new("e", unknown, at).has_work_and_photo());
    }

    #[test]
    fn test_serialize_uses_camel_case_and_skips_absent_fields() {
        let student = Student::new("id1", StudentPayload::default(), now());
        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json["id"], "id1");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("isDonePr").is_none());
        assert!(json.get("photo").is_none());
    }
}
