//! Built-in component classes
//!
//! One static table describes every shipped component: its base class,
//! observed attributes, stylesheet key, markup template and the listeners it
//! acquires when connected.

use agentui_elements::{
    Component, ComponentClass, ComponentEvent, ComponentMetadata, Describable, ListenerScope,
    ListenerTarget, RenderContext, TimerId,
};
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

/// How a component renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Content wrapped in `element` with the tag (and variant) as class
    Wrap(&'static str),
    Button,
    Field(&'static str),
    Checkable(&'static str),
    Progress,
    Icon,
    Page,
    Table,
    Empty(&'static str),
}

/// Listeners and timers acquired on connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Inert,
    /// Listens for clicks on itself
    Clickable,
    /// Host clicks plus key presses anywhere in the document
    Keyboard,
    /// Ticks every N milliseconds
    Interval(u64),
}

/// Static description of a built-in component
#[derive(Debug)]
pub struct BuiltinSpec {
    pub tag: &'static str,
    pub base_class: &'static str,
    pub observed: &'static [&'static str],
    pub style_key: Option<&'static str>,
    /// Layout primitives opt out of introspection
    pub describable: bool,
    pub template: Template,
    pub behavior: Behavior,
}

const BASE: &str = "AgentUIElement";
const FORM_BASE: &str = "AgentUIFormElement";
const LAYOUT_BASE: &str = "AgentUILayout";

macro_rules! spec {
    ($tag:literal, $base:expr, [$($attr:literal),*], $style:expr, $describable:expr, $template:expr, $behavior:expr) => {
        BuiltinSpec {
            tag: $tag,
            base_class: $base,
            observed: &[$($attr),*],
            style_key: $style,
            describable: $describable,
            template: $template,
            behavior: $behavior,
        }
    };
}

/// Every built-in component, sorted by tag
pub static BUILTINS: &[BuiltinSpec] = &[
    spec!("au-alert", BASE, ["severity", "dismissible"], Some("alert"), true, Template::Wrap("div"), Behavior::Clickable),
    spec!("au-avatar", BASE, ["src", "name", "size"], Some("avatar"), true, Template::Wrap("span"), Behavior::Inert),
    spec!("au-badge", BASE, ["variant"], Some("badge"), true, Template::Wrap("span"), Behavior::Inert),
    spec!("au-breadcrumb", BASE, ["separator"], Some("breadcrumb"), true, Template::Wrap("nav"), Behavior::Inert),
    spec!("au-button", BASE, ["variant", "size", "disabled", "loading", "type"], Some("button"), true, Template::Button, Behavior::Clickable),
    spec!("au-callout", BASE, ["variant", "title"], Some("callout"), true, Template::Wrap("aside"), Behavior::Inert),
    spec!("au-card", BASE, ["elevation", "variant"], Some("card"), true, Template::Wrap("section"), Behavior::Inert),
    spec!("au-checkbox", FORM_BASE, ["checked", "disabled", "label"], Some("checkbox"), true, Template::Checkable("checkbox"), Behavior::Clickable),
    spec!("au-chip", BASE, ["variant", "removable"], Some("chip"), true, Template::Wrap("span"), Behavior::Clickable),
    spec!("au-code", BASE, ["language"], Some("code"), true, Template::Wrap("pre"), Behavior::Inert),
    spec!("au-container", LAYOUT_BASE, ["max-width"], Some("layout"), false, Template::Wrap("div"), Behavior::Inert),
    spec!("au-datatable", BASE, ["page-size", "sortable"], Some("table"), true, Template::Table, Behavior::Clickable),
    spec!("au-dialog", BASE, ["open", "title"], Some("dialog"), true, Template::Wrap("dialog"), Behavior::Keyboard),
    spec!("au-divider", LAYOUT_BASE, ["vertical"], Some("layout"), false, Template::Empty("hr"), Behavior::Inert),
    spec!("au-doc-page", BASE, ["title", "section"], Some("docs"), true, Template::Page, Behavior::Inert),
    spec!("au-dropdown", BASE, ["open", "placement"], Some("dropdown"), true, Template::Wrap("div"), Behavior::Keyboard),
    spec!("au-example", BASE, ["title"], Some("docs"), true, Template::Wrap("figure"), Behavior::Inert),
    spec!("au-form", FORM_BASE, ["action", "method"], Some("form"), true, Template::Wrap("form"), Behavior::Inert),
    spec!("au-grid", LAYOUT_BASE, ["columns", "gap"], Some("layout"), false, Template::Wrap("div"), Behavior::Inert),
    spec!("au-icon", BASE, ["name", "size"], Some("icon"), true, Template::Icon, Behavior::Inert),
    spec!("au-input", FORM_BASE, ["value", "placeholder", "label", "disabled", "type"], Some("input"), true, Template::Field("input"), Behavior::Inert),
    spec!("au-layout", LAYOUT_BASE, ["direction"], Some("layout"), false, Template::Wrap("div"), Behavior::Inert),
    spec!("au-link", BASE, ["href", "external"], Some("link"), true, Template::Wrap("a"), Behavior::Clickable),
    spec!("au-list", BASE, ["ordered"], Some("list"), true, Template::Wrap("ul"), Behavior::Inert),
    spec!("au-menu", BASE, ["open"], Some("menu"), true, Template::Wrap("menu"), Behavior::Keyboard),
    spec!("au-modal", BASE, ["open", "title", "size"], Some("dialog"), true, Template::Wrap("div"), Behavior::Keyboard),
    spec!("au-navbar", BASE, ["sticky"], Some("navbar"), true, Template::Wrap("nav"), Behavior::Inert),
    spec!("au-pagination", BASE, ["page", "total"], Some("pagination"), true, Template::Wrap("nav"), Behavior::Clickable),
    spec!("au-progress", BASE, ["value", "max", "indeterminate"], Some("progress"), true, Template::Progress, Behavior::Inert),
    spec!("au-radio", FORM_BASE, ["checked", "name", "value", "label"], Some("radio"), true, Template::Checkable("radio"), Behavior::Clickable),
    spec!("au-select", FORM_BASE, ["value", "placeholder", "label", "disabled"], Some("select"), true, Template::Field("select"), Behavior::Keyboard),
    spec!("au-sidebar", BASE, ["collapsed"], Some("sidebar"), true, Template::Wrap("aside"), Behavior::Inert),
    spec!("au-skeleton", LAYOUT_BASE, ["lines"], Some("skeleton"), false, Template::Empty("div"), Behavior::Inert),
    spec!("au-slider", FORM_BASE, ["value", "min", "max", "step", "label"], Some("slider"), true, Template::Field("input"), Behavior::Keyboard),
    spec!("au-spinner", BASE, ["size"], Some("spinner"), true, Template::Progress, Behavior::Inert),
    spec!("au-splash", BASE, ["duration"], Some("splash"), true, Template::Wrap("div"), Behavior::Interval(100)),
    spec!("au-stack", LAYOUT_BASE, ["gap", "direction"], Some("layout"), false, Template::Wrap("div"), Behavior::Inert),
    spec!("au-switch", FORM_BASE, ["checked", "disabled", "label"], Some("switch"), true, Template::Checkable("checkbox"), Behavior::Clickable),
    spec!("au-tab", BASE, ["label", "active", "disabled"], Some("tabs"), true, Template::Wrap("div"), Behavior::Clickable),
    spec!("au-table", BASE, ["striped", "compact"], Some("table"), true, Template::Table, Behavior::Inert),
    spec!("au-tabs", BASE, ["active"], Some("tabs"), true, Template::Wrap("div"), Behavior::Keyboard),
    spec!("au-textarea", FORM_BASE, ["value", "placeholder", "label", "rows"], Some("input"), true, Template::Field("textarea"), Behavior::Inert),
    spec!("au-theme-toggle", BASE, ["theme"], Some("theme"), true, Template::Button, Behavior::Clickable),
    spec!("au-toast", BASE, ["variant", "duration"], Some("toast"), true, Template::Wrap("output"), Behavior::Interval(1000)),
    spec!("au-tooltip", BASE, ["text", "placement"], Some("tooltip"), true, Template::Wrap("span"), Behavior::Inert),
];

/// Static description of a built-in tag
pub fn builtin_spec(tag: &str) -> Option<&'static BuiltinSpec> {
    BUILTINS.binary_search_by(|s| s.tag.cmp(tag))
        .ok()
        .map(|i| &BUILTINS[i])
}

/// Class of a built-in tag
pub fn builtin_class(tag: &str) -> Option<Arc<dyn ComponentClass>> {
    builtin_spec(tag).map(|spec| Arc::new(BuiltinClass(spec)) as Arc<dyn ComponentClass>)
}

/// Class side of a built-in component
#[derive(Debug, Clone, Copy)]
pub struct BuiltinClass(pub &'static BuiltinSpec);

impl ComponentClass for BuiltinClass {
    fn metadata(&self) -> ComponentMetadata {
        let mut metadata = ComponentMetadata::new(self.0.base_class).observe(self.0.observed);
        if let Some(key) = self.0.style_key {
            metadata = metadata.style(key);
        }
        metadata
    }

    fn construct(&self) -> Box<dyn Component> {
        Box::new(BuiltinComponent {
            spec: self.0,
            clicks: 0,
            ticks: 0,
        })
    }

    fn as_describable(&self) -> Option<&dyn Describable> {
        self.0.describable.then_some(self as &dyn Describable)
    }
}

impl Describable for BuiltinClass {}

struct BuiltinComponent {
    spec: &'static BuiltinSpec,
    clicks: u32,
    ticks: u32,
}

impl Component for BuiltinComponent {
    fn connected(&mut self, scope: &mut ListenerScope) {
        self.clicks = 0;
        self.ticks = 0;
        match self.spec.behavior {
            Behavior::Inert => {}
            Behavior::Clickable => scope.add_event_listener(ListenerTarget::Host, "click"),
            Behavior::Keyboard => {
                scope.add_event_listener(ListenerTarget::Host, "click");
                scope.add_event_listener(ListenerTarget::Document, "keydown");
            }
            Behavior::Interval(ms) => {
                scope.set_interval(Duration::from_millis(ms));
            }
        }
    }

    fn render(&self, ctx: &RenderContext<'_>) -> String {
        render_template(self.spec.template, ctx)
    }

    fn handle_event(&mut self, event: &ComponentEvent) {
        if event.event_type == "click" {
            self.clicks += 1;
        }
        tracing::trace!(tag = self.spec.tag, event = %event.event_type, clicks = self.clicks, "event");
    }

    fn timer_fired(&mut self, _timer: TimerId) {
        self.ticks += 1;
        tracing::trace!(tag = self.spec.tag, ticks = self.ticks, "tick");
    }
}

fn render_template(template: Template, ctx: &RenderContext<'_>) -> String {
    let mut out = String::new();
    let class = class_list(ctx);
    let content = escape(ctx.content.trim());

    // Writing to a String cannot fail
    let _ = match template {
        Template::Wrap(element) => write!(out, "<{element} class=\"{class}\">{content}</{element}>"),
        Template::Button => write!(
            out,
            "<button class=\"{class}\" type=\"{}\"{}>{content}</button>",
            escape(ctx.attr_or("type", "button")),
            if ctx.flag("disabled") || ctx.flag("loading") { " disabled" } else { "" },
        ),
        Template::Field(element) => {
            let label = escape(ctx.attr_or("label", ""));
            let placeholder = escape(ctx.attr_or("placeholder", ""));
            let value = escape(ctx.attr_or("value", ""));
            if element == "input" {
                write!(
                    out,
                    "<label class=\"{class}\">{label}<input placeholder=\"{placeholder}\" value=\"{value}\"></label>"
                )
            } else {
                write!(
                    out,
                    "<label class=\"{class}\">{label}<{element} placeholder=\"{placeholder}\">{value}</{element}></label>"
                )
            }
        }
        Template::Checkable(kind) => write!(
            out,
            "<label class=\"{class}\"><input type=\"{kind}\"{}>{}</label>",
            if ctx.flag("checked") { " checked" } else { "" },
            if content.is_empty() { escape(ctx.attr_or("label", "")) } else { content },
        ),
        Template::Progress => write!(
            out,
            "<div class=\"{class}\" role=\"progressbar\" aria-valuenow=\"{}\" aria-valuemax=\"{}\"></div>",
            escape(ctx.attr_or("value", "0")),
            escape(ctx.attr_or("max", "100")),
        ),
        Template::Icon => write!(
            out,
            "<span class=\"{class}\" data-icon=\"{}\" aria-hidden=\"true\"></span>",
            escape(ctx.attr_or("name", "")),
        ),
        Template::Page => write!(
            out,
            "<article class=\"{class}\"><h1>{}</h1>{content}</article>",
            escape(ctx.attr_or("title", "")),
        ),
        Template::Table => write!(out, "<div class=\"{class}\"><table>{content}</table></div>"),
        Template::Empty(element) => write!(out, "<{element} class=\"{class}\"></{element}>"),
    };
    out
}

fn class_list(ctx: &RenderContext<'_>) -> String {
    match ctx.attr("variant") {
        Some(variant) if !variant.is_empty() => {
            format!("{} {}--{}", ctx.tag, ctx.tag, escape(variant))
        }
        _ => ctx.tag.to_string(),
    }
}

/// Escape text for markup and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
