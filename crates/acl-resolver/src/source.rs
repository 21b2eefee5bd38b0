//! ACL sources
//!
//! This module provides the abstraction for fetching rule graphs and an
//! in-memory implementation.

use acl_graph::{AclGraph, GraphError};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// ACL source error types.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The ACL exists but may not be read
    #[error("ACL not accessible: {0}")]
    NotAccessible(String),

    /// Failed to fetch the ACL
    #[error("Failed to fetch ACL: {0}")]
    FetchError(String),

    /// Fetched document is not a valid rule graph
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl SourceError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            SourceError::NotAccessible(_) => "ACL_NOT_ACCESSIBLE",
            SourceError::FetchError(_) => "ACL_FETCH_FAILED",
            SourceError::Graph(_) => "ACL_INVALID",
        }
    }
}

/// Result type for ACL source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Source of rule graphs for resources.
///
/// `Ok(None)` means there is no such ACL. Errors mean it could not be read;
/// callers treat both as "not accessible".
#[async_trait]
pub trait AclSource: Send + Sync {
    /// Fetch the resource's own ACL.
    async fn fetch_resource_acl(&self, resource: &str) -> SourceResult<Option<AclGraph>>;

    /// Fetch the ACL of the nearest ancestor container that has one.
    async fn fetch_fallback_acl(&self, resource: &str) -> SourceResult<Option<AclGraph>>;
}

/// ACL source statistics.
#[derive(Debug, Clone, Default)]
pub struct SourceStats {
    /// Total fetches
    pub fetches: u64,
    /// Fetches that found no ACL
    pub misses: u64,
    /// Fetches that failed
    pub failures: u64,
}

/// Parent container of a resource, or `None` at the root.
///
/// ```
/// use acl_resolver::source::parent_container;
///
/// assert_eq!(parent_container("https://pod.example/a/b.ttl"), Some("https://pod.example/a/"));
/// assert_eq!(parent_container("https://pod.example/a/"), Some("https://pod.example/"));
/// assert_eq!(parent_container("https://pod.example/"), None);
/// ```
pub fn parent_container(resource: &str) -> Option<&str> {
    let trimmed = resource.strip_suffix('/').unwrap_or(resource);
    let idx = trimmed.rfind('/')?;
    let parent = &resource[..=idx];
    if parent.ends_with("//") {
        None
    } else {
        Some(parent)
    }
}

/// In-memory ACL source.
///
/// ACLs are keyed by the resource they protect. Suitable for tests and for
/// hosts that keep rule graphs in memory.
pub struct MemoryAclSource {
    /// ACLs by protected resource
    acls: Arc<RwLock<HashMap<String, AclGraph>>>,
    /// Resources whose ACL exists but cannot be read
    forbidden: Arc<RwLock<HashSet<String>>>,
    /// Statistics
    stats: Arc<RwLock<SourceStats>>,
}

impl std::fmt::Debug for MemoryAclSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryAclSource").finish()
    }
}

impl MemoryAclSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self {
            acls: Arc::new(RwLock::new(HashMap::new())),
            forbidden: Arc::new(RwLock::new(HashSet::new())),
            stats: Arc::new(RwLock::new(SourceStats::default())),
        }
    }

    /// Store an ACL under the resource it protects, replacing any previous one.
    pub async fn insert(&self, graph: AclGraph) {
        let mut acls = self.acls.write().await;
        acls.insert(graph.access_to().to_string(), graph.mark_persisted());
    }

    /// Remove a resource's ACL.
    pub async fn remove(&self, resource: &str) -> Option<AclGraph> {
        self.acls.write().await.remove(resource)
    }

    /// Make a resource's ACL unreadable.
    pub async fn forbid(&self, resource: &str) {
        self.forbidden.write().await.insert(resource.to_string());
    }

    /// Get source stats.
    pub async fn stats(&self) -> SourceStats {
        self.stats.read().await.clone()
    }

    async fn lookup(&self, resource: &str) -> SourceResult<Option<AclGraph>> {
        if self.forbidden.read().await.contains(resource) {
            return Err(SourceError::NotAccessible(resource.to_string()));
        }
        Ok(self.acls.read().await.get(resource).cloned())
    }

    async fn record(&self, result: &SourceResult<Option<AclGraph>>) {
        let mut stats = self.stats.write().await;
        stats.fetches += 1;
        match result {
            Ok(Some(_)) => {}
            Ok(None) => stats.misses += 1,
            Err(_) => stats.failures += 1,
        }
    }
}

impl Default for MemoryAclSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AclSource for MemoryAclSource {
    async fn fetch_resource_acl(&self, resource: &str) -> SourceResult<Option<AclGraph>> {
        let result = self.lookup(resource).await;
        self.record(&result).await;
        result
    }

    async fn fetch_fallback_acl(&self, resource: &str) -> SourceResult<Option<AclGraph>> {
        let mut current = parent_container(resource);
        let result = loop {
            let Some(container) = current else {
                break Ok(None);
            };
            match self.lookup(container).await {
                Ok(Some(graph)) => break Ok(Some(graph)),
                Ok(None) => current = parent_container(container),
                Err(e) => break Err(e),
            }
        };
        self.record(&result).await;
        result
    }
}
