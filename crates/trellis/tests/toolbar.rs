//! Toolbar behaviour on a canvas.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use trellis::prelude::*;

fn counter() -> (Arc<AtomicUsize>, Callback) {
    let count = Arc::new(AtomicUsize::new(0));
    let hits = count.clone();
    let action = callback(move || {
        hits.fetch_add(1, Ordering::SeqCst);
    });
    (count, action)
}

fn action(name: &str, on_activated: Option<Callback>) -> Box<dyn ToolbarItem> {
    Box::new(ToolbarAction::new(IconResource::themed(name), on_activated))
}

#[test]
fn test_save_separator_open() {
    let (saved, save) = counter();
    let (opened, open) = counter();
    let toolbar = Toolbar::new(vec![
        action(names::DOCUMENT_SAVE, Some(save)),
        Box::new(ToolbarSeparator::new()),
        action(names::DOCUMENT_OPEN, Some(open)),
    ]);
    assert_eq!(toolbar.button_count(), 2);

    let id = toolbar.widget_id();
    let mut canvas = Canvas::default();
    canvas.set_content(Box::new(toolbar));
    canvas.focus(id).unwrap();

    canvas.key_down(Key::Return);
    canvas.typed_key(Key::Return);
    canvas.key_up(Key::Return);

    assert_eq!(saved.load(Ordering::SeqCst), 1);
    assert_eq!(opened.load(Ordering::SeqCst), 0);
}

#[test]
fn test_navigate_then_activate() {
    let (saved, save) = counter();
    let (opened, open) = counter();
    let toolbar = Toolbar::new(vec![
        action(names::DOCUMENT_SAVE, Some(save)),
        Box::new(ToolbarSpacer::new()),
        action(names::DOCUMENT_OPEN, Some(open)),
    ]);
    let id = toolbar.widget_id();
    let mut canvas = Canvas::default();
    canvas.set_content(Box::new(toolbar));
    canvas.focus(id).unwrap();

    canvas.typed_key(Key::Right);
    canvas.typed_key(Key::Right);
    canvas.typed_key(Key::Space);

    assert_eq!(saved.load(Ordering::SeqCst), 0);
    assert_eq!(opened.load(Ordering::SeqCst), 1);
    assert_eq!(canvas.widget::<Toolbar>(id).map(|t| t.current_index()), Some(1));
}

#[test]
fn test_tapping_a_button() {
    let (saved, save) = counter();
    let toolbar = Toolbar::new(vec![action(names::DOCUMENT_SAVE, Some(save))]);
    let button = toolbar.children()[0].as_widget().map(|w| w.widget_id()).unwrap();
    let mut canvas = Canvas::default();
    canvas.set_content(Box::new(toolbar));

    // Buttons built before attaching are the ones on the canvas.
    canvas.tap(button).unwrap();

    assert_eq!(saved.load(Ordering::SeqCst), 1);
    assert_eq!(canvas.focused(), None);
}

#[test]
fn test_spacer_pushes_trailing_items_right() {
    let toolbar = Toolbar::new(vec![
        action("a", None),
        Box::new(ToolbarSpacer::new()),
        action("b", None),
    ]);
    let mut canvas = Canvas::default();
    canvas.set_content(Box::new(toolbar));
    canvas.resize(Size::new(300.0, 28.0));

    let mut buttons = Vec::new();
    canvas.walk(|object, position, _| {
        if object.is::<Button>() {
            buttons.push(Rect::from_origin_size(position, object.size()));
        }
    });
    assert_eq!(buttons.len(), 2);
    assert_eq!(buttons[0].left(), 0.0);
    assert_eq!(buttons[1].right(), 300.0);
}

#[test]
fn test_rebuild_after_append_and_prepend() {
    let mut toolbar = Toolbar::new(vec![action("a", None)]);
    toolbar.append(Box::new(ToolbarSpacer::new()));
    toolbar.append(action("b", None));
    toolbar.prepend(Box::new(ToolbarSeparator::new()));
    toolbar.prepend(action("c", None));

    assert_eq!(toolbar.children().len(), 5);
    assert_eq!(toolbar.button_count(), 3);
    let names: Vec<_> = (0..3)
        .filter_map(|i| toolbar.button(i).and_then(|b| b.icon()).map(|icon| icon.name().to_string()))
        .collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}

#[test]
fn test_retheme_keeps_focus_state() {
    let toolbar = Toolbar::new(vec![action("a", None), action("b", None)]);
    let id = toolbar.widget_id();
    let mut canvas = Canvas::default();
    canvas.set_content(Box::new(toolbar));
    canvas.focus(id).unwrap();
    canvas.typed_key(Key::Right);

    canvas.set_env(Env::with_theme(Theme::dark()));

    let toolbar = canvas.widget::<Toolbar>(id).unwrap();
    assert_eq!(toolbar.background_color(), Theme::dark().palette.button);
    assert!(toolbar.button(1).is_some_and(|b| b.is_focused()));
}
