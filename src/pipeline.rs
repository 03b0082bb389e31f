//! Stage entry points and their boundary contracts.
//!
//! Each entry point reads one object, transforms it, writes one object at
//! a derived key, and reports the outcome as an [`Envelope`]. Failures are
//! caught here and folded into the envelope — nothing propagates raw to
//! the caller, and nothing is retried.

use std::error::Error as _;
use std::sync::Arc;

use async_trait::async_trait;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::PipelineError;
use crate::record::Record;
use crate::{extract, keys, project};

// ── Invocation envelope ──

/// Result shape every entry point returns; the stable caller contract.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub status_code: u16,
    pub body: EnvelopeBody,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EnvelopeBody {
    Success {
        message: String,
        source: String,
        destination: String,
    },
    Failure {
        message: String,
        error: String,
    },
}

impl Envelope {
    fn success(message: &str, source: &str, destination: &str) -> Self {
        Envelope {
            status_code: 200,
            body: EnvelopeBody::Success {
                message: message.to_string(),
                source: source.to_string(),
                destination: destination.to_string(),
            },
        }
    }

    fn failure(message: &str, err: &PipelineError) -> Self {
        Envelope {
            status_code: 500,
            body: EnvelopeBody::Failure {
                message: message.to_string(),
                error: error_chain(err),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// Flatten an error and its sources into one readable line.
fn error_chain(err: &PipelineError) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(s) = source {
        out.push_str(": ");
        out.push_str(&s.to_string());
        source = s.source();
    }
    out
}

// ── Downstream trigger ──

/// Fire-and-forget signal to the next stage's invocation point.
///
/// At-most-once from the Extractor's perspective: implementations handle
/// (and log) their own delivery failures, and the Extractor neither waits
/// for nor observes the downstream result.
#[async_trait]
pub trait StageTrigger: Send + Sync {
    async fn notify(&self, key: &str);
}

/// No downstream stage; used when running the Extractor in isolation.
pub struct NoopTrigger;

#[async_trait]
impl StageTrigger for NoopTrigger {
    async fn notify(&self, _key: &str) {}
}

/// Runs the Projector in-process against the same store.
pub struct ChainTrigger {
    store: Arc<dyn ObjectStore>,
}

impl ChainTrigger {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        ChainTrigger { store }
    }
}

#[async_trait]
impl StageTrigger for ChainTrigger {
    async fn notify(&self, key: &str) {
        let envelope = run_projector(Arc::clone(&self.store), key).await;
        if !envelope.is_success() {
            warn!("downstream projection failed for {}", key);
        }
    }
}

// ── Entry points ──

/// Extractor: HTML at `key` → pretty-printed record JSON at the derived
/// `structured/` key, then notify the downstream trigger with that key.
pub async fn run_extractor(
    store: Arc<dyn ObjectStore>,
    trigger: &dyn StageTrigger,
    key: &str,
) -> Envelope {
    match extract_one(store.as_ref(), key).await {
        Ok(dest) => {
            info!("extracted {} -> {}", key, dest);
            trigger.notify(&dest).await;
            Envelope::success("HTML to record extraction successful", key, &dest)
        }
        Err(e) => {
            warn!("extraction failed for {}: {}", key, e);
            Envelope::failure("Error during HTML to record extraction", &e)
        }
    }
}

/// Projector: record JSON at `key` → feature CSV at the derived
/// `tabular/` key.
pub async fn run_projector(store: Arc<dyn ObjectStore>, key: &str) -> Envelope {
    match project_one(store.as_ref(), key).await {
        Ok(dest) => {
            info!("projected {} -> {}", key, dest);
            Envelope::success("Record to feature dataset projection successful", key, &dest)
        }
        Err(e) => {
            warn!("projection failed for {}: {}", key, e);
            Envelope::failure("Error during record to feature dataset projection", &e)
        }
    }
}

async fn extract_one(store: &dyn ObjectStore, key: &str) -> Result<String, PipelineError> {
    let dest = keys::record_key(key)?;
    let content = get_bytes(store, key).await?;
    let record = extract::extract(&content)?;
    put_bytes(store, &dest, record.to_json()?, "application/json").await?;
    Ok(dest)
}

async fn project_one(store: &dyn ObjectStore, key: &str) -> Result<String, PipelineError> {
    let dest = keys::features_key(key)?;
    let content = get_bytes(store, key).await?;
    let record = Record::from_json(&content)?;
    let row = project::project(&record);
    put_bytes(store, &dest, project::to_csv(&row)?, "text/csv").await?;
    Ok(dest)
}

// ── Store access ──

async fn get_bytes(store: &dyn ObjectStore, key: &str) -> Result<Vec<u8>, PipelineError> {
    let path = Path::from(key);
    let result = store.get(&path).await.map_err(|e| match e {
        object_store::Error::NotFound { .. } => PipelineError::NotFound(key.to_string()),
        other => PipelineError::Access { key: key.to_string(), source: other },
    })?;
    let bytes = result.bytes().await.map_err(|e| PipelineError::Access {
        key: key.to_string(),
        source: e,
    })?;
    Ok(bytes.to_vec())
}

async fn put_bytes(
    store: &dyn ObjectStore,
    key: &str,
    bytes: Vec<u8>,
    content_type: &'static str,
) -> Result<(), PipelineError> {
    let mut attributes = Attributes::new();
    attributes.insert(Attribute::ContentType, content_type.into());
    let opts = PutOptions {
        attributes,
        ..Default::default()
    };
    store
        .put_opts(&Path::from(key), PutPayload::from(bytes), opts)
        .await
        .map_err(|e| PipelineError::Write { key: key.to_string(), source: e })?;
    Ok(())
}

// ── Tests ──
