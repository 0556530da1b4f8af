//! Request DTOs for Web API.
//!
//! Bodies are checked with `validator` through
//! [`ValidatedJson`](super::ValidatedJson). Missing string fields default to
//! empty so they are reported by the length rules rather than by the JSON
//! parser.

use serde::Deserialize;
use validator::Validate;

use super::validation::{no_control_chars, not_empty_trimmed};
use crate::auth::{ProfileChanges, RegistrationRequest};
use crate::db::NewClient;

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[serde(default)]
    #[validate(
        email(message = "El email debe ser una dirección de email válida"),
        length(max = 100, message = "El email debe tener como máximo 100 caracteres")
    )]
    pub email: String,
    /// Password. Absent is reported after the email lookup.
    #[serde(default)]
    #[validate(length(
        min = 8,
        max = 16,
        message = "La contraseña debe tener entre 8 y 16 caracteres"
    ))]
    pub password: Option<String>,
}

/// User registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display handle.
    #[serde(default)]
    #[validate(
        length(
            min = 3,
            max = 50,
            message = "El nombre de usuario debe tener entre 3 y 50 caracteres"
        ),
        custom(function = "no_control_chars")
    )]
    pub username: String,
    /// Password.
    #[serde(default)]
    #[validate(length(
        min = 8,
        max = 16,
        message = "La contraseña debe tener entre 8 y 16 caracteres"
    ))]
    pub password: String,
    /// Email.
    #[serde(default)]
    #[validate(
        email(message = "El email debe ser una dirección de email válida"),
        length(max = 100, message = "El email debe tener como máximo 100 caracteres")
    )]
    pub email: String,
    /// Phone number.
    #[serde(default)]
    #[validate(length(
        equal = 10,
        message = "El número de teléfono debe tener 10 caracteres"
    ))]
    pub phone_number: String,
}

impl From<RegisterRequest> for RegistrationRequest {
    fn from(req: RegisterRequest) -> Self {
        RegistrationRequest {
            email: req.email,
            username: req.username,
            phone_number: req.phone_number,
            password: req.password,
        }
    }
}

/// Partial user update request. Only present fields are validated.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New display handle.
    #[validate(
        length(
            min = 3,
            max = 50,
            message = "El nombre de usuario debe tener entre 3 y 50 caracteres"
        ),
        custom(function = "no_control_chars")
    )]
    pub username: Option<String>,
    /// New password.
    #[validate(length(
        min = 8,
        max = 16,
        message = "La contraseña debe tener entre 8 y 16 caracteres"
    ))]
    pub password: Option<String>,
    /// New email.
    #[validate(
        email(message = "El email debe ser una dirección de email válida"),
        length(max = 100, message = "El email debe tener como máximo 100 caracteres")
    )]
    pub email: Option<String>,
    /// New phone number.
    #[validate(length(
        equal = 10,
        message = "El número de teléfono debe tener 10 caracteres"
    ))]
    pub phone_number: Option<String>,
}

impl From<UpdateUserRequest> for ProfileChanges {
    fn from(req: UpdateUserRequest) -> Self {
        ProfileChanges {
            email: req.email,
            username: req.username,
            phone_number: req.phone_number,
            password: req.password,
        }
    }
}

/// Client creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClientRequest {
    /// First name.
    #[serde(default)]
    #[validate(
        length(
            min = 3,
            max = 50,
            message = "El nombre debe tener entre 3 y 50 caracteres"
        ),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    #[validate(
        length(
            min = 3,
            max = 50,
            message = "El apellido debe tener entre 3 y 50 caracteres"
        ),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub last_name: String,
    /// Email.
    #[serde(default)]
    #[validate(
        email(message = "El email debe ser una dirección de email válida"),
        length(max = 100, message = "El email debe tener como máximo 100 caracteres")
    )]
    pub email: String,
    /// Phone number.
    #[serde(default)]
    #[validate(length(
        equal = 10,
        message = "El número de teléfono debe tener 10 caracteres"
    ))]
    pub phone_number: String,
    /// Street address.
    #[validate(
        length(max = 70, message = "La dirección debe tener como máximo 70 caracteres"),
        custom(function = "no_control_chars")
    )]
    pub address: Option<String>,
    /// City.
    #[validate(
        length(max = 50, message = "La ciudad debe tener como máximo 50 caracteres"),
        custom(function = "no_control_chars")
    )]
    pub city: Option<String>,
    /// Free-form notes.
    #[validate(
        length(max = 100, message = "Las notas deben tener como máximo 100 caracteres"),
        custom(function = "no_control_chars")
    )]
    pub notes: Option<String>,
}

impl From<CreateClientRequest> for NewClient {
    fn from(req: CreateClientRequest) -> Self {
        NewClient {
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            email: req.email,
            phone_number: req.phone_number,
            address: req.address,
            city: req.city,
            notes: req.notes,
        }
    }
}
