//! Error handling for the CHRONOS backend
//!
//! Provides consistent error responses in English and Spanish

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_es: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {message}")]
    Conflict {
        resource: String,
        message: String,
        message_es: String,
    },

    // Business logic errors
    #[error("Payment exceeds balance: {0}")]
    Overpayment(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Stored data is inconsistent: {0}")]
    CorruptRecord(String),

    // Internal errors
    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_es: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Spanish wording for the messages produced by the shared validators
fn spanish_message(message: &str) -> String {
    match message {
        "Amount cannot be negative" => "El monto no puede ser negativo".to_string(),
        "Amount must be greater than zero" => "El monto debe ser mayor a cero".to_string(),
        "Sale price must be greater than purchase price" => {
            "El precio de venta debe ser mayor al precio de compra".to_string()
        }
        "Amount paid cannot exceed the total" => {
            "El monto pagado no puede exceder el total".to_string()
        }
        "Origin and destination accounts must be different" => {
            "La cuenta de origen y destino deben ser diferentes".to_string()
        }
        "Phone number must have 10 digits" => "El teléfono debe tener 10 dígitos".to_string(),
        "Phone number contains invalid characters" => {
            "El teléfono contiene caracteres inválidos".to_string()
        }
        "Quantity must be at least 1" => "La cantidad debe ser al menos 1".to_string(),
        "Stock cannot be negative" => "El inventario no puede ser negativo".to_string(),
        "Minimum stock cannot be negative" => {
            "El inventario mínimo no puede ser negativo".to_string()
        }
        "Invalid email format" => "Formato de correo inválido".to_string(),
        "Name must be between 2 and 100 characters" => {
            "El nombre debe tener entre 2 y 100 caracteres".to_string()
        }
        "Name must be between 2 and 120 characters" => {
            "El nombre debe tener entre 2 y 120 caracteres".to_string()
        }
        "Contact name must be between 2 and 100 characters" => {
            "El nombre de contacto debe tener entre 2 y 100 caracteres".to_string()
        }
        "Product name must be between 2 and 120 characters" => {
            "El nombre del producto debe tener entre 2 y 120 caracteres".to_string()
        }
        "SKU must be between 1 and 40 characters" => {
            "El SKU debe tener entre 1 y 40 caracteres".to_string()
        }
        "Concept must be between 3 and 200 characters" => {
            "El concepto debe tener entre 3 y 200 caracteres".to_string()
        }
        "Concept cannot exceed 200 characters" => {
            "El concepto no puede exceder 200 caracteres".to_string()
        }
        "Address cannot exceed 250 characters" => {
            "La dirección no puede exceder 250 caracteres".to_string()
        }
        "Notes cannot exceed 500 characters" => {
            "Las notas no pueden exceder 500 caracteres".to_string()
        }
        other => format!("Datos inválidos: {}", other),
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        // Report the first offending field, sorted so the choice is stable
        let mut fields: Vec<_> = errors.errors().iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        for (field, kind) in fields {
            if let ValidationErrorsKind::Field(errs) = kind {
                if let Some(err) = errs.first() {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field));
                    return AppError::Validation {
                        field: field.to_string(),
                        message_es: spanish_message(&message),
                        message,
                    };
                }
            }
        }

        AppError::ValidationError(errors.to_string())
    }
}

impl From<shared::ParseStatusError> for AppError {
    fn from(err: shared::ParseStatusError) -> Self {
        AppError::CorruptRecord(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation {
                field,
                message,
                message_es,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_es: message_es.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_es: format!("Datos inválidos: {}", msg),
                    field: None,
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message_en: format!("{} not found", resource),
                    message_es: format!("No se encontró {}", resource),
                    field: None,
                },
            ),
            AppError::Conflict {
                resource,
                message,
                message_es,
            } => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "CONFLICT".to_string(),
                    message_en: message.clone(),
                    message_es: message_es.clone(),
                    field: Some(resource.clone()),
                },
            ),
            AppError::Overpayment(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "OVERPAYMENT".to_string(),
                    message_en: msg.clone(),
                    message_es: spanish_message(msg),
                    field: Some("amount".to_string()),
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message_en: "A database error occurred".to_string(),
                    message_es: "Ocurrió un error en la base de datos".to_string(),
                    field: None,
                },
            ),
            AppError::CorruptRecord(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CORRUPT_RECORD".to_string(),
                    message_en: "A stored record could not be read".to_string(),
                    message_es: "No se pudo leer un registro almacenado".to_string(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: "An internal server error occurred".to_string(),
                    message_es: "Error interno del servidor".to_string(),
                    field: None,
                },
            ),
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
