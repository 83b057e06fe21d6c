//! Select entry drop-down flows on a canvas.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use trellis::prelude::*;

fn setup(options: &[&str]) -> (Canvas, ObjectId) {
    let select = SelectEntry::new(options.iter().copied());
    let id = select.widget_id();
    let mut canvas = Canvas::default();
    canvas.set_content(Box::new(select));
    canvas.resize(Size::new(160.0, 29.0));
    (canvas, id)
}

fn select(canvas: &Canvas, id: ObjectId) -> &SelectEntry {
    canvas.widget::<SelectEntry>(id).unwrap()
}

fn open_drop_down(canvas: &mut Canvas, id: ObjectId) {
    let button = select(canvas, id).entry().action_button_id().unwrap();
    canvas.tap(button).unwrap();
}

fn watch_closed(canvas: &Canvas, id: ObjectId) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let hits = count.clone();
    select(canvas, id).pop_up().unwrap().closed.connect(move |_| {
        hits.fetch_add(1, Ordering::SeqCst);
    });
    count
}

#[test]
fn test_choose_option_with_keyboard() {
    let (mut canvas, id) = setup(&["Red", "Green", "Blue"]);
    canvas.widget_mut::<SelectEntry>(id).unwrap().set_text("Green");

    open_drop_down(&mut canvas, id);
    let pop_up = select(&canvas, id).pop_up().unwrap();
    assert_eq!(pop_up.highlighted(), Some(1));
    assert_eq!(pop_up.position(), Point::new(0.0, 29.0));
    assert_eq!(pop_up.size(), Size::new(160.0, 87.0));

    canvas.typed_key(Key::Down);
    canvas.typed_key(Key::Enter);

    assert_eq!(select(&canvas, id).text(), "Blue");
    assert!(!select(&canvas, id).is_drop_down_open());
    assert!(canvas.overlays().is_empty());
    assert_eq!(canvas.focused(), None);
}

#[test]
fn test_opening_twice_keeps_one_overlay() {
    let (mut canvas, id) = setup(&["Red", "Green"]);
    open_drop_down(&mut canvas, id);
    open_drop_down(&mut canvas, id);

    let overlays = canvas.overlays();
    assert_eq!(overlays.len(), 1);
    let open = select(&canvas, id).pop_up().map(|p| p.widget_id());
    assert_eq!(overlays.top(), open);
    assert_eq!(canvas.focused(), open);
}

#[test]
fn test_overlay_drawn_after_content() {
    let (mut canvas, id) = setup(&["Red", "Green"]);
    open_drop_down(&mut canvas, id);

    let mut order = Vec::new();
    canvas.walk(|object, position, depth| {
        if depth == 0 {
            order.push((object.type_name(), position));
        }
    });
    assert_eq!(
        order,
        vec![("SelectEntry", Point::ZERO), ("PopUpMenu", Point::new(0.0, 29.0))]
    );
}

#[test]
fn test_resize_follows_width_only() {
    let (mut canvas, id) = setup(&["Red", "Green"]);
    open_drop_down(&mut canvas, id);
    let height = select(&canvas, id).pop_up().unwrap().size().height;

    canvas.resize(Size::new(240.0, 40.0));

    let pop_up = select(&canvas, id).pop_up().unwrap();
    assert_eq!(pop_up.size(), Size::new(240.0, height));
}

#[test]
fn test_options_cleared_then_restored() {
    let (mut canvas, id) = setup(&["Red"]);
    {
        let widget = canvas.widget_mut::<SelectEntry>(id).unwrap();
        widget.set_options(Vec::<String>::new());
        assert!(widget.entry().action_button_id().is_none());
        assert!(widget.options().is_empty());

        widget.set_options(["Cyan", "Magenta"]);
        assert!(widget.entry().action_button_id().is_some());
    }

    open_drop_down(&mut canvas, id);
    let labels: Vec<_> = select(&canvas, id)
        .pop_up()
        .map(|p| p.menu().labels().map(str::to_string).collect())
        .unwrap_or_default();
    assert_eq!(labels, vec!["Cyan", "Magenta"]);
}

#[test]
fn test_clearing_options_closes_open_menu() {
    let (mut canvas, id) = setup(&["Red"]);
    open_drop_down(&mut canvas, id);
    canvas
        .widget_mut::<SelectEntry>(id)
        .unwrap()
        .set_options(Vec::<String>::new());

    assert!(!select(&canvas, id).is_drop_down_open());
    assert!(canvas.overlays().is_empty());
    assert!(canvas.find_widget(id).is_some());

    // The discarded menu held focus; keystrokes now have nowhere to go.
    assert_eq!(canvas.focused(), None);
    assert!(!canvas.typed_rune('x'));
    assert_eq!(select(&canvas, id).text(), "");

    canvas.focus(id).unwrap();
    assert!(canvas.typed_rune('x'));
    assert_eq!(select(&canvas, id).text(), "x");
}

#[test]
fn test_hiding_closes_open_menu() {
    let (mut canvas, id) = setup(&["Red"]);
    open_drop_down(&mut canvas, id);
    canvas.widget_mut::<SelectEntry>(id).unwrap().hide();
    canvas.widget_mut::<SelectEntry>(id).unwrap().show();

    assert!(canvas.overlays().is_empty());
    assert_eq!(canvas.focused(), None);
    assert!(!canvas.typed_key(Key::Down));
}

#[test]
fn test_ids_survive_attaching_to_default_canvas() {
    let widget = SelectEntry::new(["Red"]);
    let id = widget.widget_id();
    let button = widget.entry().action_button_id().unwrap();

    let mut canvas = Canvas::default();
    canvas.set_content(Box::new(widget));

    assert_eq!(select(&canvas, id).entry().action_button_id(), Some(button));
    canvas.tap(button).unwrap();
    assert!(select(&canvas, id).is_drop_down_open());
}

#[test]
fn test_menu_reports_each_close_once() {
    let (mut canvas, id) = setup(&["Red", "Green"]);

    open_drop_down(&mut canvas, id);
    let escaped = watch_closed(&canvas, id);
    canvas.typed_key(Key::Escape);
    canvas.typed_key(Key::Escape);
    assert_eq!(escaped.load(Ordering::SeqCst), 1);

    open_drop_down(&mut canvas, id);
    let chosen = watch_closed(&canvas, id);
    canvas.typed_key(Key::Down);
    canvas.typed_key(Key::Return);
    assert_eq!(chosen.load(Ordering::SeqCst), 1);
    assert_eq!(select(&canvas, id).text(), "Red");

    open_drop_down(&mut canvas, id);
    let abandoned = watch_closed(&canvas, id);
    canvas.focus(id).unwrap();
    assert_eq!(abandoned.load(Ordering::SeqCst), 1);
    assert!(!select(&canvas, id).is_drop_down_open());
    assert!(canvas.overlays().is_empty());
}

#[test]
fn test_tab_leaves_open_menu() {
    let (mut canvas, id) = setup(&["Red"]);
    open_drop_down(&mut canvas, id);

    assert!(canvas.typed_key(Key::Tab));
    assert_eq!(canvas.focused(), Some(id));
    assert!(!select(&canvas, id).is_drop_down_open());
    assert_eq!(select(&canvas, id).text(), "");

    // The entry is the only stop, so Shift+Tab stays put.
    let shift = KeyboardModifiers {
        shift: true,
        ..KeyboardModifiers::NONE
    };
    assert!(!canvas.typed_key(KeyEvent::new(Key::Tab).with_modifiers(shift)));
    assert_eq!(canvas.focused(), Some(id));
}
