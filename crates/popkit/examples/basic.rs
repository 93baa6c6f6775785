//! Example: a dropdown and a tooltip sharing one document

use std::cell::RefCell;
use std::rc::Rc;

use popkit::dom::{Document, InteractionEvent};
use popkit::events::shared;
use popkit::{Config, Placement, Popup, PopupProps, TriggerMode};

fn main() -> Result<(), popkit::PopupError> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut doc = Document::new();
    let body = doc.body();
    let menu = doc.append_element(body, "div", Some("menu"))?;
    let button = doc.append_element(menu, "button", Some("menu-ref"))?;
    let tip = doc.append_element(body, "span", Some("tip"))?;
    let content = doc.append_element(body, "p", None)?;

    let registry = shared::install(doc.root_listeners());
    let listeners = doc.root_listeners();
    let doc = Rc::new(RefCell::new(doc));

    let dropdown = Popup::new(
        "menu",
        PopupProps {
            trigger: TriggerMode::Click,
            reference: Some("menu-ref".to_string()),
            placement: Some(Placement::BottomStart),
            ..PopupProps::default()
        },
        Config::default(),
        Rc::clone(&doc),
        Rc::clone(&registry),
    );
    let tooltip = Popup::new(
        "tip",
        PopupProps {
            trigger: TriggerMode::Hover,
            arrow: true,
            ..PopupProps::default()
        },
        Config::default(),
        Rc::clone(&doc),
        Rc::clone(&registry),
    );
    dropdown.mount()?;
    tooltip.mount()?;

    println!("popkit v{}", popkit::VERSION);
    println!("Root listeners attached: {}", listeners.attached_count());

    registry.dispatch(&InteractionEvent::click(button));
    registry.dispatch(&InteractionEvent::mouse_over(tip, Some(content)));
    println!("Dropdown open: {}, tooltip open: {}", dropdown.is_open(), tooltip.is_open());

    registry.dispatch(&InteractionEvent::click(content));
    println!("After outside click: dropdown open: {}, tooltip open: {}", dropdown.is_open(), tooltip.is_open());

    println!("Dropdown options: {:#}", dropdown.options());

    dropdown.unmount();
    tooltip.unmount();
    shared::reset();
    println!("Root listeners attached: {}", listeners.attached_count());
    Ok(())
}
