use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::common::{CoreError, lock};

/// Binary object store addressed by slash-separated paths.
pub trait ObjectStorageRepository: Send + Sync {
    fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn download_url(&self, path: &str) -> impl Future<Output = Result<String, CoreError>> + Send;
}

pub fn message_image_path(message_id: &str) -> String {
    format!("messages/{message_id}/image")
}

#[derive(Clone, Default)]
pub struct InMemoryObjectStorage {
    objects: Arc<Mutex<HashMap<String, (Vec<u8>, String)>>>,
}

impl InMemoryObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Result<Option<(Vec<u8>, String)>, CoreError> {
        Ok(lock(&self.objects)?.get(path).cloned())
    }
}

impl ObjectStorageRepository for InMemoryObjectStorage {
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), CoreError> {
        lock(&self.objects)?.insert(path.to_string(), (bytes, content_type.to_string()));
        Ok(())
    }

    async fn download_url(&self, path: &str) -> Result<String, CoreError> {
        if lock(&self.objects)?.contains_key(path) {
            Ok(format!("memory://{path}"))
        } else {
            Err(CoreError::ObjectNotFound {
                path: path.to_string(),
            })
        }
    }
}
