//! Organization records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ValidationError;

/// A stored organization.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Store-assigned identifier; also the sort key.
    pub id: Uuid,
    pub name: String,
    pub creation_date: DateTime<Utc>,
    pub employee_count: i64,
    pub is_public: bool,
}

/// The payload for creating an organization. The store assigns the id.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrganization {
    pub name: String,
    pub creation_date: DateTime<Utc>,
    pub employee_count: i64,
    pub is_public: bool,
}

impl NewOrganization {
    /// Decodes a create request body.
    ///
    /// A body that carries a non-nil `id` is rejected with
    /// [`ValidationError::IdAlreadyAssigned`]; any other decoding problem is
    /// [`ValidationError::MalformedBody`].
    pub fn from_json_slice(body: &[u8]) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_slice(body).map_err(malformed)?;

        if let Some(id) = value.get("id").filter(|id| !is_unset_id(id)) {
            let id = match id {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return Err(ValidationError::IdAlreadyAssigned { id });
        }

        serde_json::from_value(value).map_err(malformed)
    }

    /// Attaches a store-assigned id.
    pub fn into_organization(self, id: Uuid) -> Organization {
        Organization {
            id,
            name: self.name,
            creation_date: self.creation_date,
            employee_count: self.employee_count,
            is_public: self.is_public,
        }
    }
}

fn is_unset_id(id: &Value) -> bool {
    match id {
        Value::Null => true,
        Value::String(s) => s.is_empty() || Uuid::parse_str(s).is_ok_and(|u| u.is_nil()),
        _ => false,
    }
}

fn malformed(err: serde_json::Error) -> ValidationError {
    ValidationError::MalformedBody {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "name": "CLEAR",
        "creation_date": "2002-09-22T00:00:00Z",
        "employee_count": 120,
        "is_public": true
    }"#;

    #[test]
    fn test_decode_new_organization() {
        let org = NewOrganization::from_json_slice(BODY.as_bytes()).unwrap();
        assert_eq!(org.name, "CLEAR");
        assert_eq!(org.employee_count, 120);
        assert!(org.is_public);
        assert_eq!(org.creation_date.to_rfc3339(), "2002-09-22T00:00:00+00:00");
    }

    #[test]
    fn test_supplied_id_rejected() {
        let body = r#"{"id":"0b5c1b2e-8d4f-4a8e-9c9e-3f6b1d2a7c11","name":"CLEAR",
            "creation_date":"2002-09-22T00:00:00Z","employee_count":1,"is_public":false}"#;
        let err = NewOrganization::from_json_slice(body.as_bytes()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::IdAlreadyAssigned {
                id: "0b5c1b2e-8d4f-4a8e-9c9e-3f6b1d2a7c11".to_string()
            }
        );
    }

    #[test]
    fn test_nil_id_is_ignored() {
        let body = r#"{"id":"00000000-0000-0000-0000-000000000000","name":"CLEAR",
            "creation_date":"2002-09-22T00:00:00Z","employee_count":1,"is_public":false}"#;
        assert!(NewOrganization::from_json_slice(body.as_bytes()).is_ok());
    }

    #[test]
    fn test_malformed_body() {
        for body in ["", "{", r#"{"name":"CLEAR"}"#, r#"{"name":1,"creation_date":"x","employee_count":1,"is_public":true}"#] {
            let err = NewOrganization::from_json_slice(body.as_bytes()).unwrap_err();
            assert!(matches!(err, ValidationError::MalformedBody { .. }), "{body}");
        }
    }

    #[test]
    fn test_organization_json_shape() {
        let org = NewOrganization::from_json_slice(BODY.as_bytes())
            .unwrap()
            .into_organization(Uuid::nil());
        let json = serde_json::to_value(&org).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["name"], "CLEAR");
        assert_eq!(json["employee_count"], 120);
        assert_eq!(json["is_public"], true);
    }
}
