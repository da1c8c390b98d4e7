// crates/foundry-bridge-aml/src/pipeline.rs
// ============================================================================
// Module: Pipeline Resolver
// Description: File-based resolver for pipeline job YAML definitions.
// Purpose: Load and parse a named pipeline definition before submission.
// Dependencies: foundry-bridge-core, serde_yaml
// ============================================================================

//! ## Overview
//! Resolves pipeline definition references to YAML files under a configured
//! root directory. References are untrusted: absolute paths and parent
//! traversal are rejected before any filesystem access. Resolution happens
//! before the bridge touches credentials or the network, so a bad reference
//! never consumes a session.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use foundry_bridge_core::PipelineDefinition;
use foundry_bridge_core::PipelineResolver;
use foundry_bridge_core::ResolveError;

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolver that loads definitions from files under a root directory.
///
/// # Invariants
/// - References never escape the root: absolute paths and `..` components
///   are rejected.
/// - Unreadable references resolve to [`ResolveError::NotFound`]; unparsable
///   content resolves to [`ResolveError::Invalid`].
#[derive(Debug, Clone)]
pub struct FilePipelineResolver {
    /// Root directory containing pipeline definitions.
    root: PathBuf,
}

impl FilePipelineResolver {
    /// Creates a resolver rooted at the given directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// Returns the configured root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validates a reference and joins it onto the root.
    fn safe_join(&self, reference: &str) -> Result<PathBuf, ResolveError> {
        if reference.is_empty() {
            return Err(ResolveError::NotFound(reference.to_string()));
        }
        let relative = Path::new(reference);
        if relative.is_absolute() {
            return Err(ResolveError::NotFound(reference.to_string()));
        }
        for component in relative.components() {
            match component {
                Component::Normal(_) => {}
                _ => return Err(ResolveError::NotFound(reference.to_string())),
            }
        }
        Ok(self.root.join(relative))
    }
}

impl PipelineResolver for FilePipelineResolver {
    fn resolve(&self, reference: &str) -> Result<PipelineDefinition, ResolveError> {
        let path = self.safe_join(reference)?;
        let raw = std::fs::read_to_string(&path)
            .map_err(|_| ResolveError::NotFound(reference.to_string()))?;
        serde_yaml::from_str(&raw).map_err(|err| ResolveError::Invalid {
            reference: reference.to_string(),
            reason: err.to_string(),
        })
    }
}
