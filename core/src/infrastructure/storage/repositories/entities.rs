use serde::{Deserialize, Serialize};

/// Default lifetime of a presigned URL.
pub const SIGNED_URL_TTL_MS: u32 = 10_000;

#[derive(Serialize, Debug, Deserialize)]
pub struct RequestSignUrl {
    action: ContentVerb,
    expires_in_ms: u32,
}

impl From<ContentVerb> for RequestSignUrl {
    fn from(value: ContentVerb) -> Self {
        Self {
            action: value,
            expires_in_ms: SIGNED_URL_TTL_MS,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
pub enum ContentVerb {
    Put,
    Get,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PresignedUrl {
    pub url: String,
}
