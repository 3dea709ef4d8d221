use mongodb::error::{ErrorKind as MongoErrorKind, WriteFailure};

use crate::domain::common::CoreError;

// Mongo "Unauthorized" server error code.
const UNAUTHORIZED_CODE: i32 = 13;
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Whether a write failed because a document with the same `_id` exists.
pub(crate) fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        MongoErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY_CODE
    )
}

impl From<mongodb::error::Error> for CoreError {
    fn from(error: mongodb::error::Error) -> Self {
        let msg = error.to_string();
        match error.kind.as_ref() {
            MongoErrorKind::Authentication { .. } => CoreError::AuthenticationFailed { msg },
            MongoErrorKind::Io(_)
            | MongoErrorKind::ServerSelection { .. }
            | MongoErrorKind::ConnectionPoolCleared { .. } => CoreError::NetworkUnavailable { msg },
            MongoErrorKind::Command(command) if command.code == UNAUTHORIZED_CODE => {
                CoreError::PermissionDenied { msg }
            }
            MongoErrorKind::BsonDeserialization(_) | MongoErrorKind::BsonSerialization(_) => {
                CoreError::SerializationError { msg }
            }
            _ => match CoreError::classify(msg) {
                CoreError::UnknownError { message } => CoreError::DatabaseError { msg: message },
                classified => classified,
            },
        }
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(error: reqwest::Error) -> Self {
        let msg = error.to_string();
        if let Some(status) = error.status() {
            return CoreError::from_status(status.as_u16(), msg);
        }
        if error.is_connect() || error.is_timeout() {
            return CoreError::NetworkUnavailable { msg };
        }
        if error.is_decode() {
            return CoreError::SerializationError { msg };
        }
        CoreError::classify(msg)
    }
}
