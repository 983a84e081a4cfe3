//! Contact form submissions.
//!
//! Messages are stored for the back office; nothing is emailed.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use loja_core::{ContactMessageId, Email};

use crate::db::ContactRepository;
use crate::db::contact::NewContactMessage;
use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::validation::{ApiJson, max_chars, optional, required};

const MAX_NAME_CHARS: usize = 120;
const MAX_SUBJECT_CHARS: usize = 200;
const MAX_MESSAGE_CHARS: usize = 5000;

/// Contact form payload.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl ContactRequest {
    /// Validate into a message ready to store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` describing the first invalid field.
    pub fn validate(self) -> Result<NewContactMessage> {
        let name = required(self.name, "O nome é obrigatório")?;
        let email = required(self.email, "O email é obrigatório")?;
        let message = required(self.message, "A mensagem é obrigatória")?;
        let email = Email::parse(&email)
            .map_err(|_| AppError::BadRequest("Email inválido".to_string()))?;
        let subject = optional(self.subject);

        max_chars(&name, MAX_NAME_CHARS, "nome")?;
        max_chars(&message, MAX_MESSAGE_CHARS, "mensagem")?;
        if let Some(subject) = &subject {
            max_chars(subject, MAX_SUBJECT_CHARS, "assunto")?;
        }

        Ok(NewContactMessage {
            name,
            email,
            phone: optional(self.phone),
            subject,
            message,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub id: ContactMessageId,
}

/// Store a contact message.
///
/// POST /api/contact
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ContactRequest>,
) -> Result<impl IntoResponse> {
    let message = payload.validate()?;
    let stored = ContactRepository::new(state.pool()).create(&message).await?;

    tracing::info!(message_id = %stored.id, "Contact message received");
    Ok((StatusCode::CREATED, ApiJson(ContactResponse { id: stored.id })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ContactRequest {
        ContactRequest {
            name: Some("João".to_string()),
            email: Some(" Joao@Example.PT ".to_string()),
            phone: None,
            subject: Some("Encomenda".to_string()),
            message: Some("Quando chega a minha encomenda?".to_string()),
        }
    }

    #[test]
    fn test_valid_request() {
        let message = request().validate().unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(message.email.as_str(), "joao@example.pt");
        assert_eq!(message.subject.as_deref(), Some("Encomenda"));
    }

    #[test]
    fn test_invalid_email() {
        let req = ContactRequest {
            email: Some("joao".to_string()),
            ..request()
        };
        assert!(matches!(req.validate(), Err(AppError::BadRequest(msg)) if msg == "Email inválido"));
    }

    #[test]
    fn test_blank_message() {
        let req = ContactRequest {
            message: Some("   ".to_string()),
            ..request()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_message_too_long() {
        let req = ContactRequest {
            message: Some("a".repeat(MAX_MESSAGE_CHARS + 1)),
            ..request()
        };
        assert!(req.validate().is_err());
    }
}
