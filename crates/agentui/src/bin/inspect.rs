//! agentui-inspect
//!
//! Builds a sample page from the standard chunks and prints what an agent
//! would see, as JSON.
//!
//! Usage: `agentui-inspect [describe.json]`. Without a file the catalog is
//! fetched over HTTP from next to the bundle and degrades to empty.

use agentui::catalog::resolve_catalog_url;
use agentui::net::{Fetch, ResourceLoader, StaticFetch};
use agentui::{init_tracing, AgentUi, Config, Page};
use anyhow::Context;
use std::sync::Arc;

const DOCUMENT_URL: &str = "http://localhost:8000/docs/index.html";
const BUNDLE_SRC: &str = "/dist/chunks/agentui-core.js";

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config)?;

    let mut page = Page::new(DOCUMENT_URL);
    page.add_script(BUNDLE_SRC);

    let fetcher: Arc<dyn Fetch> = match std::env::args().nth(1) {
        Some(path) => {
            let body = std::fs::read(&path).with_context(|| format!("reading {}", path))?;
            let document = page.document();
            let url = resolve_catalog_url(
                document.url(),
                &document.script_sources(),
                &config.script_hint,
                &config.catalog_file,
            )?;
            Arc::new(StaticFetch::new().with_body(url.as_str(), body))
        }
        None => Arc::new(ResourceLoader::new(&config.loader_config())?),
    };
    let mut ui = AgentUi::new(config, page, fetcher);

    for report in ui.load_standard_chunks() {
        tracing::info!(
            chunk = %report.chunk,
            defined = report.defined.len(),
            skipped = report.already_defined.len(),
            "chunk evaluated"
        );
    }
    build_sample(ui.page_mut())?;

    let mut agent = ui.extend_with_agent();
    let tree = smol::block_on(agent.get_component_tree(None));
    let actions = smol::block_on(agent.get_mcp_actions());
    let markers = agent.enable_visual_markers();

    let report = serde_json::json!({
        "tree": tree,
        "actions": actions,
        "markers": markers,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn build_sample(page: &mut Page) -> anyhow::Result<()> {
    let body = page.body();
    let nav = page.append_element(body, "au-navbar", &[("sticky", "")], None)?;
    page.append_element(nav, "au-link", &[("href", "/docs")], Some("Docs"))?;
    page.append_element(nav, "au-theme-toggle", &[("theme", "dark")], Some("Theme"))?;

    let main = page.append_element(body, "main", &[], None)?;
    let card = page.append_element(main, "au-card", &[("elevation", "2")], None)?;
    let form = page.append_element(card, "au-form", &[("action", "/subscribe")], None)?;
    page.append_element(form, "au-input", &[("label", "Email"), ("type", "email")], None)?;
    page.append_element(form, "au-checkbox", &[("label", "Send me updates")], None)?;
    page.append_element(form, "au-button", &[("variant", "primary"), ("type", "submit")], Some("Submit"))?;
    Ok(())
}
