//! AgentUI context
//!
//! One context per page: the page with its registry, the shared catalog
//! loader and, once extended, the agent bridge.

use crate::{Agent, Config, Error};
use agentui_agent::AgentBridge;
use agentui_catalog::{
    resolve_catalog_url, CatalogError, CatalogLoader, CatalogState, DescribeCatalog, SchemaEntry,
    SchemaIndex,
};
use agentui_components::standard_chunks;
use agentui_elements::{
    BundleChunk, ChunkLoadReport, ComponentClass, ComponentMetadata, Page, Registration,
    RegistryError,
};
use agentui_net::{Fetch, ResourceLoader};
use std::collections::BTreeMap;
use std::sync::Arc;
use url::Url;

/// Base namespace of a page
#[derive(Debug)]
pub struct AgentUi {
    config: Config,
    pub(crate) page: Page,
    loader: Arc<CatalogLoader>,
    pub(crate) bridge: Option<AgentBridge>,
}

impl AgentUi {
    /// Context fetching the catalog through `fetcher`
    pub fn new(config: Config, mut page: Page, fetcher: Arc<dyn Fetch>) -> Self {
        page.set_debug(config.debug);
        Self {
            config,
            page,
            loader: Arc::new(CatalogLoader::new(fetcher)),
            bridge: None,
        }
    }

    /// Context fetching the catalog over HTTP
    pub fn with_http(config: Config, page: Page) -> Result<Self, Error> {
        let fetcher = ResourceLoader::new(&config.loader_config())?;
        Ok(Self::new(config, page, Arc::new(fetcher)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Loader shared by every caller of this context
    pub fn loader(&self) -> &Arc<CatalogLoader> {
        &self.loader
    }

    /// Evaluate a bundle chunk
    pub fn load_chunk(&mut self, chunk: &BundleChunk) -> ChunkLoadReport {
        chunk.load_into(&mut self.page)
    }

    /// Evaluate every standard chunk, core first
    pub fn load_standard_chunks(&mut self) -> Vec<ChunkLoadReport> {
        standard_chunks().iter().map(|chunk| self.load_chunk(chunk)).collect()
    }

    pub fn define(
        &mut self,
        tag_name: &str,
        class: Arc<dyn ComponentClass>,
    ) -> Result<Registration, RegistryError> {
        self.page.define(tag_name, class)
    }

    /// Tag → metadata for every registered component
    pub fn get_registered_components(&self) -> BTreeMap<&str, &ComponentMetadata> {
        self.page.registry().get_registered_components()
    }

    /// Where the describe catalog is expected for this page
    pub fn catalog_url(&self) -> Result<Url, CatalogError> {
        let document = self.page.document();
        resolve_catalog_url(
            document.url(),
            &document.script_sources(),
            &self.config.script_hint,
            &self.config.catalog_file,
        )
    }

    /// Load the describe catalog once; concurrent callers share the fetch.
    /// Never fails: an unavailable catalog settles empty.
    pub async fn load_descriptions(&self) -> Arc<DescribeCatalog> {
        self.loader.load(|| self.catalog_url()).await
    }

    pub fn catalog_state(&self) -> CatalogState {
        self.loader.state()
    }

    /// Read-only view over the catalog loaded so far
    pub fn schema_index(&self) -> SchemaIndex<'_> {
        self.loader.index()
    }

    pub fn get_component_schema(&self, tag: &str) -> Option<&SchemaEntry> {
        self.schema_index().get_component_schema(tag)
    }

    pub fn get_all_schemas(&self) -> BTreeMap<&str, &SchemaEntry> {
        self.schema_index().get_all_schemas()
    }

    pub fn get_schema_components(&self) -> Vec<&str> {
        self.schema_index().get_schema_components()
    }

    pub fn get_schema_quick_ref(&self) -> BTreeMap<&str, &str> {
        self.schema_index().get_schema_quick_ref()
    }

    /// Add the agent bridge. Components stay registered; a second call
    /// keeps the existing bridge and its markers.
    pub fn extend_with_agent(&mut self) -> Agent<'_> {
        if self.bridge.is_none() {
            tracing::debug!("agent bridge attached");
            self.bridge = Some(AgentBridge::new());
        }
        Agent::new(self)
    }

    /// The agent surface, if the context was extended
    pub fn agent(&mut self) -> Option<Agent<'_>> {
        if self.bridge.is_some() { Some(Agent::new(self)) } else { None }
    }

    pub fn has_agent(&self) -> bool {
        self.bridge.is_some()
    }
}
