//! Conversation state and the registration fields it collects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields that must be collected before a conversation completes, in the
/// order they are asked for.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "firstName",
    "lastName",
    "email",
    "phone",
    "dateOfBirth",
    "address",
    "hasLicense",
    "preferredTransmission",
];

/// Required only when `hasLicense` is truthy.
pub const LICENSE_NUMBER_FIELD: &str = "licenseNumber";

/// Every field name the extractor may contribute.
pub const RECOGNIZED_FIELDS: [&str; 9] = [
    "firstName",
    "lastName",
    "email",
    "phone",
    "dateOfBirth",
    "address",
    "hasLicense",
    LICENSE_NUMBER_FIELD,
    "preferredTransmission",
];

/// Whether `name` is one of the recognized registration fields.
pub fn is_recognized_field(name: &str) -> bool {
    RECOGNIZED_FIELDS.contains(&name)
}

/// Where a conversation is in the collection flow.
///
/// The flow only ever reports `Init` or `Completed`; the per-field
/// variants are part of the wire vocabulary but are never entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Init,
    CollectingEmail,
    CollectingPhone,
    CollectingDob,
    CollectingAddress,
    CollectingLicense,
    CollectingLicenseNumber,
    CollectingTransmission,
    Completed,
}

impl ConversationState {
    /// Whether every required field has been collected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Wire value, e.g. `"collecting_dob"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::CollectingEmail => "collecting_email",
            Self::CollectingPhone => "collecting_phone",
            Self::CollectingDob => "collecting_dob",
            Self::CollectingAddress => "collecting_address",
            Self::CollectingLicense => "collecting_license",
            Self::CollectingLicenseNumber => "collecting_license_number",
            Self::CollectingTransmission => "collecting_transmission",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON truthiness: `false`, `null`, zero, and empty strings, arrays and
/// objects are falsy; everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// One chat-driven registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub state: ConversationState,
    /// Field name to extracted value. Keys are always recognized fields.
    pub collected_data: Map<String, Value>,
    /// Alternating user message / assistant reply, oldest first.
    pub history: Vec<String>,
    /// Most recent assistant reply.
    #[serde(default)]
    pub last_message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            state: ConversationState::Init,
            collected_data: Map::new(),
            history: Vec::new(),
            last_message: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge extracted fields, later values overwriting earlier ones.
    /// Unrecognized keys are dropped.
    pub fn merge(&mut self, extracted: Map<String, Value>) {
        for (key, value) in extracted {
            if is_recognized_field(&key) {
                self.collected_data.insert(key, value);
            }
        }
    }

    /// Required fields not yet collected, in asking order, followed by
    /// `licenseNumber` when the student holds a license.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !self.collected_data.contains_key(*field))
            .collect();

        let has_license = self
            .collected_data
            .get("hasLicense")
            .is_some_and(is_truthy);
        if has_license && !self.collected_data.contains_key(LICENSE_NUMBER_FIELD) {
            missing.push(LICENSE_NUMBER_FIELD);
        }

        missing
    }

    pub fn push_user(&mut self, message: impl Into<String>) {
        self.history.push(message.into());
        self.updated_at = Utc::now();
    }

    pub fn push_assistant(&mut self, reply: impl Into<String>) {
        let reply = reply.into();
        self.last_message = reply.clone();
        self.history.push(reply);
        self.updated_at = Utc::now();
    }
}
