//! Content-store configuration.
//!
//! The pipeline itself only sees `Arc<dyn ObjectStore>`; this module picks
//! and builds the backing store from environment variables.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::ObjectStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreProvider {
    /// Local filesystem rooted at a directory (default for development).
    Local,
    /// S3 or any S3-compatible endpoint (MinIO, R2) via FEATURIZER_ENDPOINT.
    S3,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub provider: StoreProvider,
    /// Bucket name, or root directory for the local provider.
    pub bucket: String,
    pub region: String,
    pub endpoint: Option<String>,
}

impl StoreConfig {
    pub fn local(path: &str) -> Self {
        StoreConfig {
            provider: StoreProvider::Local,
            bucket: path.to_string(),
            region: String::new(),
            endpoint: None,
        }
    }

    /// Read configuration from the environment:
    /// - FEATURIZER_STORE: "local" (default) or "s3"
    /// - FEATURIZER_BUCKET: bucket name or local root (default "./data")
    /// - FEATURIZER_REGION: S3 region (default "us-east-1")
    /// - FEATURIZER_ENDPOINT: custom S3-compatible endpoint
    ///
    /// Credentials come from the usual AWS environment variables.
    pub fn from_env() -> Result<Self> {
        let provider = match std::env::var("FEATURIZER_STORE")
            .unwrap_or_else(|_| "local".to_string())
            .to_lowercase()
            .as_str()
        {
            "local" => StoreProvider::Local,
            "s3" => StoreProvider::S3,
            other => return Err(anyhow!("unknown store provider: {}", other)),
        };

        Ok(StoreConfig {
            provider,
            bucket: std::env::var("FEATURIZER_BUCKET").unwrap_or_else(|_| "./data".to_string()),
            region: std::env::var("FEATURIZER_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            endpoint: std::env::var("FEATURIZER_ENDPOINT").ok(),
        })
    }

    pub fn build(&self) -> Result<Arc<dyn ObjectStore>> {
        match self.provider {
            StoreProvider::Local => {
                std::fs::create_dir_all(&self.bucket)?;
                Ok(Arc::new(LocalFileSystem::new_with_prefix(&self.bucket)?))
            }
            StoreProvider::S3 => {
                let mut builder = AmazonS3Builder::from_env()
                    .with_bucket_name(&self.bucket)
                    .with_region(&self.region);
                if let Some(endpoint) = &self.endpoint {
                    builder = builder
                        .with_endpoint(endpoint)
                        .with_virtual_hosted_style_request(false);
                }
                Ok(Arc::new(builder.build()?))
            }
        }
    }
}

// ── Tests ──
