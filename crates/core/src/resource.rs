//! Downloadable resource references.
//!
//! A lead is always scoped to exactly one downloadable resource: a tool or
//! an article. [`ResourceRef`] is the tagged union used on the wire and in
//! handler logic; the two catalog tables share one lookup interface keyed
//! by this type instead of duplicating the workflow per resource kind.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Discriminant string for tool resources (as stored in `resource_kind`).
pub const KIND_TOOL: &str = "tool";
/// Discriminant string for article resources.
pub const KIND_ARTICLE: &str = "article";

/// Reference to a single downloadable resource.
///
/// Wire form: `{"kind": "tool", "id": 7}` or `{"kind": "article", "id": 3}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ResourceRef {
    Tool(DbId),
    Article(DbId),
}

impl ResourceRef {
    /// The `resource_kind` column value for this reference.
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceRef::Tool(_) => KIND_TOOL,
            ResourceRef::Article(_) => KIND_ARTICLE,
        }
    }

    /// The catalog id this reference points at.
    pub fn id(&self) -> DbId {
        match self {
            ResourceRef::Tool(id) | ResourceRef::Article(id) => *id,
        }
    }

    /// Entity name for error reporting.
    pub fn entity_name(&self) -> &'static str {
        match self {
            ResourceRef::Tool(_) => "Tool",
            ResourceRef::Article(_) => "Article",
        }
    }

    /// Reassemble a reference from its stored `(kind, id)` parts.
    ///
    /// The database CHECK constraint keeps the kind column closed over the
    /// two known values, so a mismatch here is data corruption, not input.
    pub fn from_parts(kind: &str, id: DbId) -> Result<Self, CoreError> {
        match kind {
            KIND_TOOL => Ok(ResourceRef::Tool(id)),
            KIND_ARTICLE => Ok(ResourceRef::Article(id)),
            other => Err(CoreError::Internal(format!(
                "Unknown resource kind '{other}' for resource {id}"
            ))),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind(), self.id())
    }
}

/// Join the public download base URL with a catalog file path.
///
/// Tolerates trailing/leading slashes on either side so catalog rows can
/// store `guides/emi.pdf` or `/guides/emi.pdf` interchangeably.
pub fn join_download_url(base: &str, file_path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        file_path.trim_start_matches('/')
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
