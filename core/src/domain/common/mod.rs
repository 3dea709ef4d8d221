use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use thiserror::Error;

use crate::domain::channel::entities::ChannelId;
use crate::domain::group::entities::GroupId;
use crate::domain::message::entities::MessageId;
use crate::domain::user::entities::UserId;

pub mod services;

/// Declares an opaque string identifier for a remote document.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Debug,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
            utoipa::ToSchema,
        )]
        #[serde(transparent)]
        #[schema(value_type = String)]
        pub struct $name(pub String);

        impl $name {
            /// Generates a fresh document ID.
            pub fn generate() -> Self {
                $name(uuid::Uuid::new_v4().simple().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                $name(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

pub(crate) use string_id;

/// Coarse classification of every failure the synchronizer can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Unauthenticated,
    PermissionDenied,
    NetworkUnavailable,
    NotFound,
    Validation,
    Unknown,
}

#[derive(Error, Debug, Clone)]
pub enum CoreError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Authentication failed: {msg}")]
    AuthenticationFailed { msg: String },

    #[error("Authentication token refresh failed: {msg}")]
    TokenRefreshFailed { msg: String },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Permission denied: {msg}")]
    PermissionDenied { msg: String },

    #[error("Network unavailable: {msg}")]
    NetworkUnavailable { msg: String },

    #[error("User with id {id} not found")]
    UserNotFound { id: UserId },

    #[error("Group with id {id} not found")]
    GroupNotFound { id: GroupId },

    #[error("Channel with id {id} not found")]
    ChannelNotFound { id: ChannelId },

    #[error("Message {id} not found in channel {channel_id}")]
    MessageNotFound {
        channel_id: ChannelId,
        id: MessageId,
    },

    #[error("Message {id} already exists in channel {channel_id}")]
    MessageAlreadyExists {
        channel_id: ChannelId,
        id: MessageId,
    },

    #[error("Stored object {path} not found")]
    ObjectNotFound { path: String },

    #[error("Remote document not found: {msg}")]
    DocumentNotFound { msg: String },

    #[error("Group name cannot be empty")]
    InvalidGroupName,

    #[error("Channel name cannot be empty")]
    InvalidChannelName,

    #[error("Message must contain text or an image")]
    EmptyMessage,

    #[error("Username cannot be empty")]
    InvalidUsername,

    #[error("Unknown status '{status}'")]
    InvalidStatus { status: String },

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password must be at least {min} characters long")]
    WeakPassword { min: usize },

    #[error("Email address is already in use")]
    EmailAlreadyInUse,

    #[error("{field} cannot be empty")]
    InvalidIdentifier { field: &'static str },

    #[error("Only the sender can edit message {id}")]
    NotMessageSender { id: MessageId },

    #[error("Database error: {msg}")]
    DatabaseError { msg: String },

    #[error("Serialization error: {msg}")]
    SerializationError { msg: String },

    #[error("Object storage error: {msg}")]
    StorageError { msg: String },

    #[error("Invalid remote url: {part}")]
    ParseRemoteUrl { part: String },

    #[error("An unknown error occurred: {message}")]
    UnknownError { message: String },
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Unauthenticated
            | CoreError::AuthenticationFailed { .. }
            | CoreError::TokenRefreshFailed { .. }
            | CoreError::InvalidCredentials => ErrorKind::Unauthenticated,
            CoreError::PermissionDenied { .. } | CoreError::NotMessageSender { .. } => {
                ErrorKind::PermissionDenied
            }
            CoreError::NetworkUnavailable { .. } => ErrorKind::NetworkUnavailable,
            CoreError::UserNotFound { .. }
            | CoreError::GroupNotFound { .. }
            | CoreError::ChannelNotFound { .. }
            | CoreError::MessageNotFound { .. }
            | CoreError::ObjectNotFound { .. }
            | CoreError::DocumentNotFound { .. } => ErrorKind::NotFound,
            CoreError::InvalidGroupName
            | CoreError::InvalidChannelName
            | CoreError::EmptyMessage
            | CoreError::InvalidUsername
            | CoreError::InvalidStatus { .. }
            | CoreError::InvalidEmail
            | CoreError::WeakPassword { .. }
            | CoreError::EmailAlreadyInUse
            | CoreError::MessageAlreadyExists { .. }
            | CoreError::InvalidIdentifier { .. } => ErrorKind::Validation,
            CoreError::DatabaseError { .. }
            | CoreError::SerializationError { .. }
            | CoreError::StorageError { .. }
            | CoreError::ParseRemoteUrl { .. }
            | CoreError::UnknownError { .. } => ErrorKind::Unknown,
        }
    }

    /// Classifies a remote failure from its message text alone.
    ///
    /// Adapters prefer structured information (error kinds, status codes) and
    /// only fall back to this when the remote side gives nothing better.
    pub fn classify(message: impl Into<String>) -> Self {
        let msg = message.into();
        let lower = msg.to_lowercase();

        if lower.contains("permission") || lower.contains("denied") || lower.contains("forbidden")
        {
            CoreError::PermissionDenied { msg }
        } else if lower.contains("unauthenticated")
            || lower.contains("unauthorized")
            || lower.contains("token")
            || lower.contains("credential")
        {
            CoreError::AuthenticationFailed { msg }
        } else if lower.contains("network")
            || lower.contains("offline")
            || lower.contains("unavailable")
            || lower.contains("timed out")
            || lower.contains("timeout")
            || lower.contains("connection")
        {
            CoreError::NetworkUnavailable { msg }
        } else if lower.contains("not found") || lower.contains("not_found") {
            CoreError::DocumentNotFound { msg }
        } else {
            CoreError::UnknownError { message: msg }
        }
    }

    /// Maps an HTTP status returned by a remote collaborator.
    pub fn from_status(status: u16, msg: String) -> Self {
        match status {
            401 => CoreError::AuthenticationFailed { msg },
            403 => CoreError::PermissionDenied { msg },
            404 => CoreError::DocumentNotFound { msg },
            502..=504 => CoreError::NetworkUnavailable { msg },
            _ => CoreError::classify(msg),
        }
    }
}

/// Locks an in-process store, surfacing poisoning as an error.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, CoreError> {
    mutex.lock().map_err(|e| CoreError::UnknownError {
        message: e.to_string(),
    })
}

/// Appends `value` unless it is already present. Returns whether it was added.
pub(crate) fn append_unique<T: PartialEq + Clone>(list: &mut Vec<T>, value: &T) -> bool {
    if list.contains(value) {
        false
    } else {
        list.push(value.clone());
        true
    }
}
