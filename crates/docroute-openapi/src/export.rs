/*!
Writing the compiled document to disk.
*/

use crate::{error::OpenApiResult, specification::OpenApiSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl ExportFormat {
    /// Format implied by a file extension, JSON unless it is `.yaml`/`.yml`
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => ExportFormat::Yaml,
            _ => ExportFormat::Json,
        }
    }
}

/// Serialize `spec` and write it to `path`, replacing any existing file
pub fn write_spec<P: AsRef<Path>>(
    spec: &OpenApiSpec,
    path: P,
    format: ExportFormat,
) -> OpenApiResult<()> {
    let path = path.as_ref();
    let content = match format {
        ExportFormat::Json => spec.to_json(true)?,
        ExportFormat::Yaml => spec.to_yaml()?,
    };
    std::fs::write(path, content)?;
    info!(path = %path.display(), ?format, "Wrote API document");
    Ok(())
}
