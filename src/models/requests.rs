//! Request DTOs for the students API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use utoipa::ToSchema;

use super::coerce;

/// Request body for create (POST /student) and update (PATCH /student/:id).
///
/// Every field is optional. On create, the supplied fields become the new
/// record; on update, only the supplied fields replace stored values. Unknown
/// fields, including `id` and the timestamps, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    /// Student name
    #[serde(default, deserialize_with = "coerce::text")]
    pub name: Option<String>,
    /// Cohort or class identifier
    #[serde(default, deserialize_with = "coerce::text")]
    pub group: Option<String>,
    /// URL or path of the attached photo
    #[serde(default, deserialize_with = "coerce::text")]
    pub photo: Option<String>,
    /// Grade or score
    #[serde(default, deserialize_with = "coerce::number")]
    pub mark: Option<f64>,
    /// Whether the practical work is done
    #[serde(default, deserialize_with = "coerce::flag")]
    pub is_done_pr: Option<bool>,
}

impl StudentPayload {
    /// Returns true if no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.group.is_none()
            && self.photo.is_none()
            && self.mark.is_none()
            && self.is_done_pr.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_deserialize_full() {
        let json = r#"{"name":"Ann","group":"A1","mark":5,"isDonePr":true,"photo":"p.jpg"}"#;
        let payload: StudentPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.name.as_deref(), Some("Ann"));
        assert_eq!(payload.group.as_deref(), Some("A1"));
        assert_eq!(payload.photo.as_deref(), Some("p.jpg"));
        assert_eq!(payload.mark, Some(5.0));
        assert_eq!(payload.is_done_pr, Some(true));
    }

    #[test]
    fn test_payload_deserialize_empty() {
        let payload: StudentPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn test_payload_ignores_unknown_and_generated_fields() {
        let json = r#"{"id":"abc","createdAt":"2020-01-01T00:00:00Z","age":20,"name":"Bob"}"#;
        let payload: StudentPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.name.as_deref(), Some("Bob"));
        assert!(payload.mark.is_none());
    }

    #[test]
    fn test_payload_null_means_not_supplied() {
        let payload: StudentPayload = serde_json::from_str(r#"{"photo":null,"mark":null}"#).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn test_payload_coerces_strings() {
        let json = r#"{"mark":"4.5","isDonePr":"true","name":42}"#;
        let payload: StudentPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.mark, Some(4.5));
        assert_eq!(payload.is_done_pr, Some(true));
        assert_eq!(payload.name.as_deref(), Some("42"));
    }

    #[test]
    fn test_payload_stringifies_whole_floats_without_fraction() {
        let json = r#"{"name":5.0,"group":1e3}"#;
        let payload: StudentPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.name.as_deref(), Some("5"));
        assert_eq!(payload.group.as_deref(), Some("1000"));
    }

    #[test]
    fn test_payload_coerces_numeric_flags() {
        let payload: StudentPayload = serde_json::from_str(r#"{"isDonePr":0}"#).unwrap();
        assert_eq!(payload.is_done_pr, Some(false));
    }

    #[test]
    fn test_payload_rejects_uncastable_mark() {
        let result = serde_json::from_str::<StudentPayload>(r#"{"mark":"excellent"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_payload_rejects_uncastable_flag() {
        let result = serde_json::from_str::<StudentPayload>(r#"{"isDonePr":"maybe"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_payload_rejects_object_as_text() {
        let result = serde_json::from_str::<StudentPayload>(r#"{"name":{"first":"Ann"}}"#);
        assert!(result.is_err());
    }
}
