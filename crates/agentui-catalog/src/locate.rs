//! Catalog location
//!
//! The describe document ships next to the bundle, which may be deployed under
//! any base path or inside a `chunks/` subdirectory.

use crate::CatalogError;
use url::Url;

/// Substring identifying the bundle's own script tag
pub const DEFAULT_SCRIPT_HINT: &str = "agentui";

/// File name of the describe document
pub const DEFAULT_CATALOG_FILE: &str = "agentui-describe.json";

/// Resolve the catalog URL from the page's script tags.
///
/// The first script whose `src` contains `hint` gives the base directory; a
/// trailing `chunks` directory is stepped out of. Without a matching script
/// the file is resolved against the document URL.
pub fn resolve_catalog_url(
    document_url: &str,
    script_sources: &[String],
    hint: &str,
    file_name: &str,
) -> Result<Url, CatalogError> {
    let document = Url::parse(document_url)
        .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", document_url, e)))?;

    let base = match script_sources.iter().find(|src| src.contains(hint)) {
        Some(src) => {
            let script = document.join(src)
                .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", src, e)))?;
            script_directory(&script)?
        }
        None => {
            tracing::debug!(hint, "no bundle script found, resolving catalog against the document");
            document
        }
    };

    base.join(file_name)
        .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", file_name, e)))
}

fn script_directory(script: &Url) -> Result<Url, CatalogError> {
    let invalid = |e: url::ParseError| CatalogError::InvalidUrl(format!("{}: {}", script, e));
    let dir = script.join(".").map_err(invalid)?;
    let last = dir.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last());
    if last == Some("chunks") {
        dir.join("..").map_err(invalid)
    } else {
        Ok(dir)
    }
}
