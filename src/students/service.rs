//! Student registration — validates form data and hands it to the store.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use super::model::StudentRecord;
use super::store::StudentStore;
use crate::error::{Error, RegistrationError};

/// Validate a submitted form and build a record from it.
///
/// The returned record has no id; assigning one is the store's job.
pub fn register_student(form: &Value) -> Result<StudentRecord, RegistrationError> {
    let form = form.as_object().ok_or(RegistrationError::InvalidBody)?;
    StudentRecord::from_wire(form)
}

/// Registers students against an injected store.
pub struct RegistrationService {
    store: Arc<dyn StudentStore>,
}

impl RegistrationService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    /// Validate, save, and return the record with its assigned id.
    pub async fn register(&self, form: &Value) -> Result<StudentRecord, Error> {
        let mut record = register_student(form)?;
        let id = self.store.save(&record).await?;
        record.id = Some(id);

        info!(
            student_id = record.id.as_deref().unwrap_or_default(),
            transmission = %record.preferred_transmission,
            has_license = record.has_license,
            "Student registered"
        );
        Ok(record)
    }

    /// Fetch a previously registered student.
    pub async fn find(&self, id: &str) -> Result<Option<StudentRecord>, Error> {
        Ok(self.store.get(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::students::model::REQUIRED_FORM_FIELDS;
    use crate::students::store::InMemoryStudentStore;

    fn form() -> Value {
        json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@x.com",
            "phone": "555-1234",
            "dateOfBirth": "1815-12-10",
            "address": "London"
        })
    }

    #[test]
    fn each_required_field_is_enforced() {
        for key in REQUIRED_FORM_FIELDS {
            let mut body = form();
            body.as_object_mut().unwrap().remove(key);
            assert_eq!(
                register_student(&body),
                Err(RegistrationError::MissingField(key)),
                "{key} should be required"
            );
        }
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert_eq!(
            register_student(&json!(["firstName"])),
            Err(RegistrationError::InvalidBody)
        );
        assert_eq!(register_student(&Value::Null), Err(RegistrationError::InvalidBody));
    }

    #[tokio::test]
    async fn register_assigns_id_and_persists() {
        let store = Arc::new(InMemoryStudentStore::new());
        let service = RegistrationService::new(store.clone());

        let record = service.register(&form()).await.unwrap();
        let id = record.id.clone().unwrap();
        assert_eq!(record.email, "ada@x.com");

        let found = service.find(&id).await.unwrap().unwrap();
        assert_eq!(found, record);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn failed_validation_stores_nothing() {
        let store = Arc::new(InMemoryStudentStore::new());
        let service = RegistrationService::new(store.clone());

        let err = service.register(&json!({"firstName": "Ada"})).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Registration(RegistrationError::MissingField("lastName"))
        ));
        assert!(store.is_empty().await);
    }
}
