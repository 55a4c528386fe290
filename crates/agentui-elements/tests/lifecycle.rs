//! Lifecycle tests driven through the page

use agentui_elements::{
    BundleChunk, Component, ComponentClass, ComponentEvent, ComponentMetadata, LifecycleState,
    ListenerScope, ListenerTarget, Page, Registration, RenderContext, TimerId,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct Counters {
    connected: AtomicUsize,
    disconnected: AtomicUsize,
    attribute_changes: AtomicUsize,
    events: AtomicUsize,
    ticks: AtomicUsize,
}

impl Counters {
    fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

struct Badge {
    counters: Arc<Counters>,
}

impl Component for Badge {
    fn connected(&mut self, scope: &mut ListenerScope) {
        self.counters.connected.fetch_add(1, Ordering::SeqCst);
        scope.add_event_listener(ListenerTarget::Host, "click");
        scope.add_event_listener(ListenerTarget::Document, "keydown");
        scope.set_interval(Duration::from_millis(100));
    }

    fn render(&self, ctx: &RenderContext<'_>) -> String {
        format!(
            "<span class=\"badge badge-{}\">{}</span>",
            ctx.attr_or("variant", "default"),
            ctx.content
        )
    }

    fn attribute_changed(&mut self, _name: &str, _old: Option<&str>, _new: Option<&str>) {
        self.counters.attribute_changes.fetch_add(1, Ordering::SeqCst);
    }

    fn disconnected(&mut self) {
        self.counters.disconnected.fetch_add(1, Ordering::SeqCst);
    }

    fn handle_event(&mut self, _event: &ComponentEvent) {
        self.counters.events.fetch_add(1, Ordering::SeqCst);
    }

    fn timer_fired(&mut self, _timer: TimerId) {
        self.counters.ticks.fetch_add(1, Ordering::SeqCst);
    }
}

struct BadgeClass {
    counters: Arc<Counters>,
}

impl ComponentClass for BadgeClass {
    fn metadata(&self) -> ComponentMetadata {
        ComponentMetadata::new("AgentUIElement").observe(&["variant"])
    }

    fn construct(&self) -> Box<dyn Component> {
        Box::new(Badge { counters: self.counters.clone() })
    }
}

fn setup() -> (Page, Arc<Counters>) {
    let counters = Arc::new(Counters::default());
    let mut page = Page::new("https://app.test/");
    page.define("au-badge", Arc::new(BadgeClass { counters: counters.clone() }))
        .unwrap();
    (page, counters)
}

#[test]
fn test_connect_renders_once() {
    let (mut page, counters) = setup();
    let body = page.body();
    let badge = page.append_element(body, "au-badge", &[("variant", "success")], Some("New"))
        .unwrap();

    assert_eq!(Counters::get(&counters.connected), 1);
    assert_eq!(page.instance(badge).unwrap().state(), LifecycleState::Rendered);
    assert_eq!(
        page.rendered_markup(badge),
        Some("<span class=\"badge badge-success\">New</span>")
    );
}

#[test]
fn test_observed_attribute_rerenders() {
    let (mut page, counters) = setup();
    let body = page.body();
    let badge = page.append_element(body, "au-badge", &[], Some("1")).unwrap();

    page.set_attribute(badge, "variant", "error").unwrap();
    assert_eq!(Counters::get(&counters.attribute_changes), 1);
    assert_eq!(page.rendered_markup(badge), Some("<span class=\"badge badge-error\">1</span>"));
    assert_eq!(page.instance(badge).unwrap().lifecycle().renders(), 2);

    // Same value again: no reaction
    page.set_attribute(badge, "variant", "error").unwrap();
    assert_eq!(Counters::get(&counters.attribute_changes), 1);
}

#[test]
fn test_removing_mixed_case_attribute_rerenders() {
    let (mut page, counters) = setup();
    let body = page.body();
    let badge = page.append_element(body, "au-badge", &[], Some("1")).unwrap();

    page.set_attribute(badge, "Variant", "ghost").unwrap();
    page.remove_attribute(badge, "Variant").unwrap();
    assert_eq!(page.tree().get_attribute(badge, "variant"), None);
    assert_eq!(Counters::get(&counters.attribute_changes), 2);
    assert_eq!(page.rendered_markup(badge), Some("<span class=\"badge badge-default\">1</span>"));
    assert_eq!(page.instance(badge).unwrap().lifecycle().renders(), 3);
}

#[test]
fn test_unobserved_attribute_ignored() {
    let (mut page, counters) = setup();
    let body = page.body();
    let badge = page.append_element(body, "au-badge", &[], None).unwrap();

    page.set_attribute(badge, "title", "ignored").unwrap();
    assert_eq!(Counters::get(&counters.attribute_changes), 0);
    assert_eq!(page.instance(badge).unwrap().lifecycle().renders(), 1);
}

#[test]
fn test_disconnect_releases_listeners_and_timers() {
    let (mut page, counters) = setup();
    let body = page.body();
    let badge = page.append_element(body, "au-badge", &[], None).unwrap();

    assert_eq!(page.active_listener_count(), 2);
    assert_eq!(page.active_timer_count(), 1);

    page.remove(badge).unwrap();
    assert_eq!(Counters::get(&counters.disconnected), 1);
    assert_eq!(page.instance(badge).unwrap().state(), LifecycleState::Disconnected);
    assert_eq!(page.active_listener_count(), 0);
    assert_eq!(page.active_timer_count(), 0);

    // Nothing left to deliver to
    assert_eq!(page.dispatch_event(body, "keydown"), 0);
    assert_eq!(page.advance_time(Duration::from_secs(1)), 0);
    assert_eq!(Counters::get(&counters.events), 0);
    assert_eq!(Counters::get(&counters.ticks), 0);
}

#[test]
fn test_released_instance_upgrades_again() {
    let (mut page, counters) = setup();
    let body = page.body();
    let kept = page.append_element(body, "au-badge", &[], None).unwrap();
    let dropped = page.append_element(body, "au-badge", &[], None).unwrap();

    page.remove(dropped).unwrap();
    assert_eq!(page.release_detached_instances(), 1);
    assert!(page.instance(dropped).is_none());
    assert!(page.instance(kept).is_some());
    assert_eq!(page.release_detached_instances(), 0);

    page.append_child(body, dropped).unwrap();
    assert_eq!(page.instance(dropped).unwrap().state(), LifecycleState::Rendered);
    assert_eq!(page.instance(dropped).unwrap().lifecycle().renders(), 1);
    assert_eq!(Counters::get(&counters.connected), 3);
}

#[test]
fn test_removing_ancestor_disconnects_descendants() {
    let (mut page, counters) = setup();
    let body = page.body();
    let wrapper = page.append_element(body, "div", &[], None).unwrap();
    page.append_element(wrapper, "au-badge", &[], None).unwrap();
    page.append_element(wrapper, "au-badge", &[], None).unwrap();

    page.remove(wrapper).unwrap();
    assert_eq!(Counters::get(&counters.disconnected), 2);
    assert_eq!(page.active_listener_count(), 0);
}

#[test]
fn test_reconnect_gets_fresh_scope() {
    let (mut page, counters) = setup();
    let body = page.body();
    let badge = page.append_element(body, "au-badge", &[], None).unwrap();

    for _ in 0..3 {
        page.remove(badge).unwrap();
        page.append_child(body, badge).unwrap();
    }

    assert_eq!(Counters::get(&counters.connected), 4);
    assert_eq!(Counters::get(&counters.disconnected), 3);
    assert_eq!(page.active_listener_count(), 2);
    assert_eq!(page.active_timer_count(), 1);
}

#[test]
fn test_events_bubble_to_listeners() {
    let (mut page, counters) = setup();
    let body = page.body();
    let badge = page.append_element(body, "au-badge", &[], Some("x")).unwrap();
    let text = page.tree().children(badge).next().map(|(id, _)| id).unwrap();

    // Host listener via bubbling from the text child, document listener not matched
    assert_eq!(page.dispatch_event(text, "click"), 1);
    // Document listener, reached from anywhere
    assert_eq!(page.dispatch_event(body, "keydown"), 1);
    assert_eq!(page.dispatch_event(body, "click"), 0);
    assert_eq!(Counters::get(&counters.events), 2);
}

#[test]
fn test_timers_fire_while_connected() {
    let (mut page, counters) = setup();
    let body = page.body();
    page.append_element(body, "au-badge", &[], None).unwrap();

    assert_eq!(page.advance_time(Duration::from_millis(250)), 2);
    assert_eq!(Counters::get(&counters.ticks), 2);
}

#[test]
fn test_define_upgrades_existing_elements() {
    let counters = Arc::new(Counters::default());
    let mut page = Page::default();
    let body = page.body();
    let badge = page.append_element(body, "au-badge", &[], Some("early")).unwrap();
    assert!(page.instance(badge).is_none());

    page.define("au-badge", Arc::new(BadgeClass { counters: counters.clone() }))
        .unwrap();
    assert_eq!(Counters::get(&counters.connected), 1);
    assert_eq!(page.instance(badge).unwrap().content(), "early");
}

#[test]
fn test_detached_elements_stay_unattached() {
    let (mut page, counters) = setup();
    let badge = page.create_element("au-badge");
    page.set_attribute(badge, "variant", "info").unwrap();

    assert!(page.instance(badge).is_none());
    assert_eq!(Counters::get(&counters.connected), 0);
    assert!(page.live_instances().is_empty());
}

#[test]
fn test_overlapping_chunks_load_in_any_order() {
    let counters = Arc::new(Counters::default());
    let class: Arc<dyn ComponentClass> = Arc::new(BadgeClass { counters });

    let core = BundleChunk::new("core")
        .with("au-badge", class.clone())
        .with("au-chip", class.clone());
    let extras = BundleChunk::new("extras")
        .with("au-chip", class.clone())
        .with("au-tag", class.clone())
        .with("NotValid", class.clone());

    let mut forward = Page::default();
    let first = core.load_into(&mut forward);
    let second = extras.load_into(&mut forward);
    assert_eq!(first.defined, vec!["au-badge", "au-chip"]);
    assert_eq!(second.defined, vec!["au-tag"]);
    assert_eq!(second.already_defined, vec!["au-chip"]);
    assert_eq!(second.rejected.len(), 1);

    let mut backward = Page::default();
    extras.load_into(&mut backward);
    core.load_into(&mut backward);
    assert!(core.load_into(&mut backward).is_noop());

    let tags = |page: &Page| page.registry().get_registered_components().keys()
        .map(|t| t.to_string())
        .collect::<Vec<_>>();
    assert_eq!(tags(&forward), tags(&backward));
    assert_eq!(
        backward.define("au-badge", class),
        Ok(Registration::AlreadyDefined)
    );
}
