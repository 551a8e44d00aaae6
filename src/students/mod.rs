//! Form-based student registration.

pub mod model;
pub mod service;
pub mod store;

pub use model::StudentRecord;
pub use service::{RegistrationService, register_student};
pub use store::{InMemoryStudentStore, StudentStore};
