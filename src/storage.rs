use google_cloud_storage::client::{Client as GcsClient, ClientConfig};
use google_cloud_storage::http::objects::delete::DeleteObjectRequest;
use google_cloud_storage::http::objects::download::Range;
use google_cloud_storage::http::objects::get::GetObjectRequest;
use google_cloud_storage::http::objects::list::ListObjectsRequest;
use google_cloud_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};

use crate::error::ApiError;

/// Blob storage for animal images and attachments. Objects are keyed
/// `{entity-kind}/{id}/{filename}` inside the configured bucket.
#[derive(Clone)]
pub struct BlobStore {
    client: GcsClient,
    bucket: String,
}

impl BlobStore {
    pub async fn connect(bucket: String) -> anyhow::Result<Self> {
        let config = ClientConfig::default().with_auth().await?;
        Ok(Self {
            client: GcsClient::new(config),
            bucket,
        })
    }

    pub fn object_key(kind: &str, id: i32, filename: &str) -> String {
        format!("{}/{}/{}", kind, id, filename)
    }

    pub async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ApiError> {
        let upload_type = UploadType::Simple(Media {
            name: key.to_string().into(),
            content_type: content_type.to_string().into(),
            content_length: Some(data.len() as u64),
        });

        self.client
            .upload_object(
                &UploadObjectRequest {
                    bucket: self.bucket.clone(),
                    ..Default::default()
                },
                data,
                &upload_type,
            )
            .await
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("blob upload failed: {}", e)))?;

        tracing::info!(key = key, "uploaded object");
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Vec<u8>, ApiError> {
        let request = GetObjectRequest {
            bucket: self.bucket.clone(),
            object: key.to_string(),
            ..Default::default()
        };

        self.client
            .download_object(&request, &Range::default())
            .await
            .map_err(|e| {
                tracing::warn!(key = key, "blob download failed: {}", e);
                ApiError::NotFound(format!("object {} not found", key))
            })
    }

    /// Filenames (final path segment) of every object under the prefix.
    pub async fn list(&self, prefix: &str) -> Result<Vec<String>, ApiError> {
        let response = self
            .client
            .list_objects(&ListObjectsRequest {
                bucket: self.bucket.clone(),
                prefix: Some(prefix.to_string()),
                ..Default::default()
            })
            .await
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("blob listing failed: {}", e)))?;

        Ok(response
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(|object| {
                object
                    .name
                    .rsplit('/')
                    .next()
                    .map(|segment| segment.to_string())
            })
            .collect())
    }

    pub async fn delete(&self, key: &str) -> Result<(), ApiError> {
        self.client
            .delete_object(&DeleteObjectRequest {
                bucket: self.bucket.clone(),
                object: key.to_string(),
                ..Default::default()
            })
            .await
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("blob delete failed: {}", e)))?;
        Ok(())
    }
}
