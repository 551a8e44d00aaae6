//! Student registration record and its wire conversions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RegistrationError;

/// Default value for `preferredTransmission`.
pub const DEFAULT_TRANSMISSION: &str = "automatic";

/// Wire names that must be present for a form submission to be accepted,
/// in the order they are checked.
pub const REQUIRED_FORM_FIELDS: [&str; 6] = [
    "firstName",
    "lastName",
    "email",
    "phone",
    "dateOfBirth",
    "address",
];

/// One driving-school registration.
///
/// Serializes with camelCase wire names; `id` is emitted as `null` until a
/// store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// ISO `YYYY-MM-DD`, stored as given.
    pub date_of_birth: String,
    pub address: String,
    #[serde(default)]
    pub has_license: bool,
    #[serde(default)]
    pub license_number: String,
    #[serde(default = "default_transmission")]
    pub preferred_transmission: String,
}

fn default_transmission() -> String {
    DEFAULT_TRANSMISSION.to_string()
}

impl StudentRecord {
    /// Build a record from a form body keyed by wire names.
    ///
    /// Only presence is checked. Scalar values for string fields are taken in
    /// their textual form, so a numeric phone number is accepted.
    pub fn from_wire(form: &Map<String, Value>) -> Result<Self, RegistrationError> {
        let required = |key: &'static str| -> Result<String, RegistrationError> {
            form.get(key)
                .and_then(text_value)
                .ok_or(RegistrationError::MissingField(key))
        };

        // Field initializers run top to bottom, so the first gap in
        // REQUIRED_FORM_FIELDS order is the one reported.
        Ok(Self {
            id: form.get("id").and_then(text_value),
            first_name: required("firstName")?,
            last_name: required("lastName")?,
            email: required("email")?,
            phone: required("phone")?,
            date_of_birth: required("dateOfBirth")?,
            address: required("address")?,
            has_license: form
                .get("hasLicense")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            license_number: form
                .get("licenseNumber")
                .and_then(text_value)
                .unwrap_or_default(),
            preferred_transmission: form
                .get("preferredTransmission")
                .and_then(text_value)
                .unwrap_or_else(default_transmission),
        })
    }

    /// Serialize to the wire representation.
    pub fn to_wire(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Text form of a JSON scalar; `null` counts as absent.
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn full_form() -> Map<String, Value> {
        json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@x.com",
            "phone": "555-1234",
            "dateOfBirth": "1815-12-10",
            "address": "12 St James's Square, London"
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn optional_fields_take_defaults() {
        let record = StudentRecord::from_wire(&full_form()).unwrap();
        assert_eq!(record.id, None);
        assert!(!record.has_license);
        assert_eq!(record.license_number, "");
        assert_eq!(record.preferred_transmission, "automatic");
    }

    #[test]
    fn optional_fields_are_read_when_present() {
        let mut form = full_form();
        form.insert("hasLicense".into(), json!(true));
        form.insert("licenseNumber".into(), json!("D123"));
        form.insert("preferredTransmission".into(), json!("manual"));
        form.insert("id".into(), json!("stu-1"));

        let record = StudentRecord::from_wire(&form).unwrap();
        assert!(record.has_license);
        assert_eq!(record.license_number, "D123");
        assert_eq!(record.preferred_transmission, "manual");
        assert_eq!(record.id.as_deref(), Some("stu-1"));
    }

    #[test]
    fn first_missing_field_is_reported() {
        let mut form = full_form();
        form.remove("email");
        form.remove("address");
        assert_eq!(
            StudentRecord::from_wire(&form),
            Err(RegistrationError::MissingField("email"))
        );
    }

    #[test]
    fn null_counts_as_missing() {
        let mut form = full_form();
        form.insert("phone".into(), Value::Null);
        let err = StudentRecord::from_wire(&form).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: phone");
    }

    #[test]
    fn numeric_phone_is_accepted_as_text() {
        let mut form = full_form();
        form.insert("phone".into(), json!(5551234));
        let record = StudentRecord::from_wire(&form).unwrap();
        assert_eq!(record.phone, "5551234");
    }

    #[test]
    fn non_boolean_has_license_falls_back_to_default() {
        let mut form = full_form();
        form.insert("hasLicense".into(), json!("yes"));
        assert!(!StudentRecord::from_wire(&form).unwrap().has_license);
    }

    #[test]
    fn wire_form_uses_camel_case_and_null_id() {
        let wire = StudentRecord::from_wire(&full_form()).unwrap().to_wire();
        assert_eq!(wire["firstName"], "Ada");
        assert_eq!(wire["dateOfBirth"], "1815-12-10");
        assert_eq!(wire["hasLicense"], false);
        assert_eq!(wire["preferredTransmission"], "automatic");
        assert!(wire["id"].is_null());
        assert!(wire.get("first_name").is_none());
    }
}
