use reqwest::{Client, Url, header::CONTENT_TYPE};
use tracing::{debug, error};

use crate::{
    domain::{common::CoreError, storage::ports::ObjectStorageRepository},
    infrastructure::storage::repositories::entities::{ContentVerb, PresignedUrl, RequestSignUrl},
};

/// Object storage behind a content service that hands out presigned URLs.
#[derive(Debug, Clone)]
pub struct ReqwestObjectStorage {
    content_url: String,
    client: Client,
}

impl ReqwestObjectStorage {
    pub fn new(content_url: String, client: Client) -> Self {
        Self {
            content_url,
            client,
        }
    }

    async fn signed_url(&self, path: &str, verb: ContentVerb) -> Result<PresignedUrl, CoreError> {
        let content_url = Url::parse(&self.content_url).map_err(|_| CoreError::ParseRemoteUrl {
            part: self.content_url.clone(),
        })?;
        let url = content_url
            .join(path)
            .map_err(|_| CoreError::ParseRemoteUrl {
                part: path.to_string(),
            })?;

        let response = self
            .client
            .post(url)
            .json(&RequestSignUrl::from(verb))
            .send()
            .await
            .inspect_err(|e| error!("Failed to request a signed URL: {}", e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CoreError::ObjectNotFound {
                path: path.to_string(),
            });
        }

        let presigned = response
            .error_for_status()?
            .json::<PresignedUrl>()
            .await
            .inspect_err(|e| debug!("{}", e))?;
        Ok(presigned)
    }
}

impl ObjectStorageRepository for ReqwestObjectStorage {
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), CoreError> {
        let presigned = self.signed_url(path, ContentVerb::Put).await?;

        self.client
            .put(&presigned.url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| CoreError::StorageError { msg: e.to_string() })?;

        debug!(path, "Object uploaded");
        Ok(())
    }

    async fn download_url(&self, path: &str) -> Result<String, CoreError> {
        Ok(self.signed_url(path, ContentVerb::Get).await?.url)
    }
}
