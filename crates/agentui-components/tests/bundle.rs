//! Loading the standard chunks into a page

use agentui_components::{chunk, full_bundle, standard_chunks, TAG_LIST};
use agentui_elements::Page;
use std::time::Duration;

fn registered(page: &Page) -> Vec<String> {
    page.registry().get_registered_components().keys().map(|t| t.to_string()).collect()
}

#[test]
fn test_chunk_order_does_not_matter() {
    let mut forward = Page::default();
    for c in standard_chunks() {
        assert!(c.load_into(&mut forward).rejected.is_empty());
    }

    let mut reverse = Page::default();
    for c in standard_chunks().iter().rev() {
        c.load_into(&mut reverse);
    }

    assert_eq!(registered(&forward), registered(&reverse));
    assert_eq!(registered(&forward), TAG_LIST);
}

#[test]
fn test_shared_components_defined_once() {
    let mut page = Page::default();
    let core = chunk("core").unwrap().load_into(&mut page);
    let forms = chunk("forms").unwrap().load_into(&mut page);

    assert!(core.defined.contains(&"au-button".to_string()));
    assert!(forms.already_defined.contains(&"au-button".to_string()));
    assert!(full_bundle().load_into(&mut page).already_defined.len() >= forms.defined.len());
}

#[test]
fn test_rendered_page() {
    let mut page = Page::default();
    full_bundle().load_into(&mut page);
    let body = page.body();

    let button = page.append_element(body, "au-button", &[("variant", "primary")], Some("Save"))
        .unwrap();
    let toast = page.append_element(body, "au-toast", &[], Some("Saved")).unwrap();

    assert_eq!(
        page.rendered_markup(button),
        Some("<button class=\"au-button au-button--primary\" type=\"button\">Save</button>")
    );
    assert_eq!(page.rendered_markup(toast), Some("<output class=\"au-toast\">Saved</output>"));
    assert_eq!(page.dispatch_event(button, "click"), 1);
    assert_eq!(page.advance_time(Duration::from_secs(3)), 3);

    page.set_attribute(button, "disabled", "").unwrap();
    assert!(page.rendered_markup(button).unwrap().ends_with(" disabled>Save</button>"));

    page.remove(toast).unwrap();
    assert_eq!(page.active_timer_count(), 0);
}
