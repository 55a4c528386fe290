//! Catalog Loader
//!
//! Coalesces every request for the describe document into a single fetch.
//! The first caller runs the fetch; concurrent callers wait on the same
//! once-cell and all of them receive the same `Arc`.

use crate::{CatalogError, DescribeCatalog, SchemaIndex};
use agentui_net::Fetch;
use smol::lock::OnceCell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use url::Url;

/// Load state of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogState {
    Uninitialized,
    Loading,
    Loaded,
    /// Fetch or parse failed; the catalog is empty
    Failed,
}

/// At-most-once loader for the describe catalog
pub struct CatalogLoader {
    fetcher: Arc<dyn Fetch>,
    catalog: OnceCell<Arc<DescribeCatalog>>,
    state: Mutex<CatalogState>,
    fetches: AtomicUsize,
}

impl CatalogLoader {
    pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            fetcher,
            catalog: OnceCell::new(),
            state: Mutex::new(CatalogState::Uninitialized),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Current load state
    pub fn state(&self) -> CatalogState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_state(&self, state: CatalogState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
    }

    /// Number of fetches issued (0 or 1)
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// The catalog if loading has settled; never fetches
    pub fn get(&self) -> Option<Arc<DescribeCatalog>> {
        self.catalog.get().cloned()
    }

    /// Read-only index over whatever is loaded right now
    pub fn index(&self) -> SchemaIndex<'_> {
        SchemaIndex::new(self.catalog.get().map(Arc::as_ref))
    }

    /// Load the catalog from a fixed URL
    pub async fn load_from(&self, url: &Url) -> Arc<DescribeCatalog> {
        self.load(|| Ok(url.clone())).await
    }

    /// Load the catalog, locating it with `locate` on the first call only.
    ///
    /// Never fails: on any error the catalog settles empty, the state becomes
    /// [`CatalogState::Failed`] and one warning is logged.
    pub async fn load<F>(&self, locate: F) -> Arc<DescribeCatalog>
    where
        F: FnOnce() -> Result<Url, CatalogError>,
    {
        self.catalog
            .get_or_init(|| async {
                self.set_state(CatalogState::Loading);
                match self.fetch_catalog(locate).await {
                    Ok(catalog) => {
                        tracing::debug!(entries = catalog.len(), "describe catalog loaded");
                        self.set_state(CatalogState::Loaded);
                        Arc::new(catalog)
                    }
                    Err(e) => {
                        tracing::warn!("describe catalog unavailable, continuing without it: {}", e);
                        self.set_state(CatalogState::Failed);
                        Arc::new(DescribeCatalog::default())
                    }
                }
            })
            .await
            .clone()
    }

    async fn fetch_catalog<F>(&self, locate: F) -> Result<DescribeCatalog, CatalogError>
    where
        F: FnOnce() -> Result<Url, CatalogError>,
    {
        let url = locate()?;
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let response = self.fetcher.fetch(&url).await?.error_for_status()?;
        DescribeCatalog::from_json(&response.body)
    }
}

impl std::fmt::Debug for CatalogLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogLoader")
            .field("state", &self.state())
            .field("fetches", &self.fetch_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentui_net::{Response, StaticFetch};

    const URL: &str = "https://example.com/lib/agentui-describe.json";

    fn url() -> Url {
        Url::parse(URL).unwrap()
    }

    #[test]
    fn test_load_success() {
        let fetch = StaticFetch::new().with_body(URL, r#"{"au-button": {"description": "Button"}}"#);
        let loader = CatalogLoader::new(Arc::new(fetch));
        assert_eq!(loader.state(), CatalogState::Uninitialized);
        assert!(loader.get().is_none());

        let catalog = smol::block_on(loader.load_from(&url()));
        assert_eq!(catalog.len(), 1);
        assert_eq!(loader.state(), CatalogState::Loaded);
        assert!(Arc::ptr_eq(&catalog, &loader.get().unwrap()));
    }

    #[test]
    fn test_sequential_calls_fetch_once() {
        let fetch = StaticFetch::new().with_body(URL, "{}");
        let loader = CatalogLoader::new(Arc::new(fetch.clone()));

        let first = smol::block_on(loader.load_from(&url()));
        let second = smol::block_on(loader.load_from(&url()));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetch.request_count(), 1);
        assert_eq!(loader.fetch_count(), 1);
    }

    #[test]
    fn test_http_error_degrades() {
        let fetch = StaticFetch::new().route(URL, Response { status: 500, headers: vec![], body: vec![] });
        let loader = CatalogLoader::new(Arc::new(fetch));

        let catalog = smol::block_on(loader.load_from(&url()));
        assert!(catalog.is_empty());
        assert_eq!(loader.state(), CatalogState::Failed);
    }

    #[test]
    fn test_unlocatable_catalog_degrades_without_fetch() {
        let fetch = StaticFetch::new();
        let loader = CatalogLoader::new(Arc::new(fetch.clone()));

        let catalog = smol::block_on(loader.load(|| Err(CatalogError::InvalidUrl("about:blank".into()))));
        assert!(catalog.is_empty());
        assert_eq!(loader.state(), CatalogState::Failed);
        assert_eq!(fetch.request_count(), 0);
    }

    #[test]
    fn test_index_before_load_is_empty() {
        let loader = CatalogLoader::new(Arc::new(StaticFetch::new()));
        assert!(loader.index().get_component_schema("au-button").is_none());
        assert!(loader.index().get_schema_components().is_empty());
        assert_eq!(loader.state(), CatalogState::Uninitialized);
    }
}
