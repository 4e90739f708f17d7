// Send email flow
// Placeholder for a real email sending service. Validates the request, logs
// the simulated send, and reports success without any network call; callers
// must not treat success as proof of delivery.

use crate::error::FlowError;
use crate::models::{SendEmailInput, SendEmailOutput};

/// Send an email. Always reports success; there is no transport behind it
/// yet.
pub async fn send_email(input: SendEmailInput) -> Result<SendEmailOutput, FlowError> {
    input.validate()?;

    tracing::info!("Simulating email send to: {}", input.to);
    tracing::info!("Subject: {}", input.subject);
    tracing::debug!("Body: {}", input.body);

    Ok(SendEmailOutput { success: true })
}
