//! Prompt text for field extraction and follow-up questions.

use super::state::ConversationState;

/// Reply sent once every required field is collected.
pub const COMPLETION_MESSAGE: &str = "Thank you! Your registration is complete.";

/// Build the extraction prompt for one user message.
pub fn extraction_prompt(text: &str) -> String {
    format!(
        r#"Extract the following fields from this text. Return only valid JSON:
- firstName
- lastName
- email
- phone
- dateOfBirth (YYYY-MM-DD)
- address
- hasLicense (boolean)
- licenseNumber (if license mentioned)
- preferredTransmission (automatic/manual)

Text: "{text}"

Format the response as valid JSON. Only include fields that are clearly present in the text."#
    )
}

/// Instruction appended after the history when asking for the next field.
pub fn followup_prompt(state: ConversationState, missing: &[&str]) -> String {
    format!(
        "Current state: {state}\n\
         Missing fields: {}\n\n\
         Provide a conversational response to collect the next piece of information.\n\
         Keep it brief and focused on collecting the missing information.",
        missing.join(", ")
    )
}

/// Deterministic question used when the model can't be reached.
pub fn fallback_prompt(missing: &[&str]) -> String {
    let field = missing.first().copied().unwrap_or("information");
    format!("Could you please provide your {field}?")
}
