#![allow(missing_docs)]

pub mod component;
pub mod document;
pub mod embed;
mod escape;
pub mod json;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use form_spec::Field;

/// The four artifact kinds the export surface produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    Json,
    ComponentCode,
    StandaloneDocument,
    EmbedSnippet,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Json => "json",
            ArtifactKind::ComponentCode => "component-code",
            ArtifactKind::StandaloneDocument => "standalone-document",
            ArtifactKind::EmbedSnippet => "embed-snippet",
        }
    }

    /// File extension the host offers for downloads.
    pub fn file_extension(&self) -> &'static str {
        match self {
            ArtifactKind::Json => "json",
            ArtifactKind::ComponentCode => "jsx",
            ArtifactKind::StandaloneDocument => "html",
            ArtifactKind::EmbedSnippet => "txt",
        }
    }
}

/// Failures raised while assembling an artifact. Well-formed field lists do
/// not trigger any of these.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("document template failed to register: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("document template failed to render: {0}")]
    Render(#[from] handlebars::RenderError),
    #[error("form serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Renders one artifact for the given title and field list. Total over any
/// well-formed input; an empty field list yields a minimal valid artifact.
pub fn generate(kind: ArtifactKind, title: &str, fields: &[Field]) -> Result<String, ExportError> {
    tracing::debug!(
        kind = kind.as_str(),
        fields = fields.len(),
        "generating artifact"
    );
    match kind {
        ArtifactKind::Json => json::generate(title, fields),
        ArtifactKind::ComponentCode => Ok(component::generate(title, fields)),
        ArtifactKind::StandaloneDocument => document::generate(title, fields),
        ArtifactKind::EmbedSnippet => Ok(embed::generate(title)),
    }
}
