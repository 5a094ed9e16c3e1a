use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::config::Config;
use crate::error::AppError;
use crate::services::storage::FileStore;

/// Media files in an S3-compatible bucket with public read access.
#[derive(Clone)]
pub struct S3FileStore {
    client: Client,
    bucket_name: String,
    public_base: String,
}

impl S3FileStore {
    pub async fn new(config: &Config) -> Self {
        let region = aws_sdk_s3::config::Region::new(config.aws_region.clone());

        let mut builder = match (&config.aws_access_key_id, &config.aws_secret_access_key) {
            (Some(key_id), Some(secret)) => {
                let credentials = aws_sdk_s3::config::Credentials::new(
                    key_id.clone(),
                    secret.clone(),
                    None,
                    None,
                    "gallery_config",
                );
                aws_sdk_s3::config::Builder::new()
                    .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
                    .region(region)
                    .credentials_provider(credentials)
            }
            _ => {
                let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
                    .region(region)
                    .load()
                    .await;
                aws_sdk_s3::config::Builder::from(&shared)
            }
        };

        let public_base = match &config.s3_endpoint {
            Some(endpoint) => {
                builder = builder.endpoint_url(endpoint).force_path_style(true);
                format!("{}/{}", endpoint.trim_end_matches('/'), config.s3_bucket_name)
            }
            None => format!(
                "https://{}.s3.{}.amazonaws.com",
                config.s3_bucket_name, config.aws_region
            ),
        };

        Self {
            client: Client::from_conf(builder.build()),
            bucket_name: config.s3_bucket_name.clone(),
            public_base,
        }
    }

    pub async fn ensure_bucket_exists(&self) -> Result<(), AppError> {
        if self
            .client
            .head_bucket()
            .bucket(&self.bucket_name)
            .send()
            .await
            .is_ok()
        {
            return self.set_public_policy().await;
        }

        tracing::info!("Bucket {} does not exist, creating it", self.bucket_name);
        self.client
            .create_bucket()
            .bucket(&self.bucket_name)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to create bucket: {:?}", e);
                AppError::InternalServerError(format!("Failed to create S3 bucket: {}", e))
            })?;

        self.set_public_policy().await
    }

    async fn set_public_policy(&self) -> Result<(), AppError> {
        let policy = format!(
            r#"{{
                "Version": "2012-10-17",
                "Statement": [
                    {{
                        "Sid": "PublicReadGetObject",
                        "Effect": "Allow",
                        "Principal": "*",
                        "Action": "s3:GetObject",
                        "Resource": "arn:aws:s3:::{}/*"
                    }}
                ]
            }}"#,
            self.bucket_name
        );

        // Some providers reject bucket policies; objects are still uploaded public-read.
        if let Err(e) = self
            .client
            .put_bucket_policy()
            .bucket(&self.bucket_name)
            .policy(policy)
            .send()
            .await
        {
            tracing::warn!("Failed to set bucket policy: {}", e);
        }

        Ok(())
    }
}

#[async_trait]
impl FileStore for S3FileStore {
    async fn put(&self, path: &str, data: Vec<u8>, content_type: &str) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(path)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .acl(aws_sdk_s3::types::ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("S3 upload error: {:?}", e);
                AppError::InternalServerError(format!("Failed to upload file to S3: {}", e))
            })?;

        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(path)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("S3 delete error: {}", e);
                AppError::InternalServerError("Failed to delete file from S3".to_string())
            })?;

        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base, path)
    }
}
