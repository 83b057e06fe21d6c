//! Builds a toolbar above a select entry, drives them with a few synthetic
//! events, and prints the scene tree after each step.
//!
//! Run with: cargo run -p trellis --example scene_dump

use trellis::prelude::*;
use trellis::scene::SceneTreeDebug;

/// A toolbar over a select entry, stacked vertically.
struct Form {
    base: WidgetBase<FormRenderer>,
}

struct FormRenderer {
    objects: Vec<Box<dyn CanvasObject>>,
    layout: VBoxLayout,
}

impl BaseWidget for Form {
    type Renderer = FormRenderer;

    fn base(&self) -> &WidgetBase<FormRenderer> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase<FormRenderer> {
        &mut self.base
    }
}

impl WidgetRenderer for FormRenderer {
    type Widget = Form;

    fn create(form: &Form) -> Self {
        let env = form.base.env();
        let toolbar = Toolbar::with_env(
            env,
            vec![
                Box::new(ToolbarAction::new(
                    IconResource::themed(names::DOCUMENT_SAVE),
                    Some(callback(|| tracing::info!("save"))),
                )),
                Box::new(ToolbarSeparator::new()),
                Box::new(ToolbarSpacer::new()),
                Box::new(ToolbarAction::new(
                    IconResource::themed(names::DOCUMENT_OPEN),
                    Some(callback(|| tracing::info!("open"))),
                )),
            ],
        );
        let select = SelectEntry::with_env(env, ["Small", "Medium", "Large"]);
        Self {
            objects: vec![Box::new(toolbar), Box::new(select)],
            layout: VBoxLayout::vertical().with_spacing(env.padding()),
        }
    }

    fn min_size(&mut self) -> Size {
        self.layout.min_size(&mut self.objects)
    }

    fn layout(&mut self, size: Size) {
        self.layout.layout(&mut self.objects, size);
    }

    fn rebuild(&mut self, form: &Form) {
        *self = Self::create(form);
    }

    fn update_in_place(&mut self, _form: &Form) {}

    fn objects(&self) -> &[Box<dyn CanvasObject>] {
        &self.objects
    }

    fn objects_mut(&mut self) -> &mut [Box<dyn CanvasObject>] {
        &mut self.objects
    }
}

impl CanvasObject for Form {
    fn position(&self) -> Point {
        self.base.position()
    }

    fn move_to(&mut self, position: Point) {
        self.base.set_position(position);
    }

    fn size(&self) -> Size {
        self.base.size()
    }

    fn resize(&mut self, size: Size) {
        self.resize_widget(size);
    }

    fn min_size(&mut self) -> Size {
        self.widget_min_size()
    }

    fn is_visible(&self) -> bool {
        self.base.is_visible()
    }

    fn show(&mut self) {
        self.base.set_visible(true);
    }

    fn hide(&mut self) {
        self.base.set_visible(false);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn as_widget(&self) -> Option<&dyn Widget> {
        Some(self)
    }

    fn as_widget_mut(&mut self) -> Option<&mut dyn Widget> {
        Some(self)
    }
}

impl Widget for Form {
    fn widget_id(&self) -> ObjectId {
        self.base.id()
    }

    fn extended_type_name(&self) -> &'static str {
        self.base.extended_type_name().unwrap_or("Form")
    }

    fn refresh(&mut self) {
        self.refresh_widget();
    }

    fn set_env(&mut self, env: &Env) {
        self.set_widget_env(env);
    }

    fn children(&self) -> &[Box<dyn CanvasObject>] {
        self.base.objects()
    }

    fn children_mut(&mut self) -> &mut [Box<dyn CanvasObject>] {
        self.base.objects_mut()
    }
}

fn child_id(canvas: &Canvas, index: usize) -> Option<ObjectId> {
    canvas
        .content()?
        .children()
        .get(index)?
        .as_widget()
        .map(|widget| widget.widget_id())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("trellis=debug,scene_dump=info")
        .init();

    let mut form = Form {
        base: WidgetBase::new(Env::default()),
    };
    form.base.extend_base_widget::<Form>();

    let mut canvas = Canvas::default();
    canvas.set_content(Box::new(form));
    canvas.resize(Size::new(240.0, 80.0));

    let dump = SceneTreeDebug::new();
    println!("{}", dump.format_canvas(&canvas));

    let (Some(toolbar), Some(select)) = (child_id(&canvas, 0), child_id(&canvas, 1)) else {
        return Ok(());
    };

    canvas.focus(toolbar)?;
    canvas.typed_key(Key::Return);
    canvas.typed_key(Key::Right);
    canvas.typed_key(Key::Return);

    let drop_down = canvas
        .widget::<SelectEntry>(select)
        .and_then(|select| select.entry().action_button_id());
    if let Some(button) = drop_down {
        canvas.tap(button)?;
    }
    println!("{}", dump.format_canvas(&canvas));

    canvas.typed_key(Key::Down);
    canvas.typed_key(Key::Return);
    if let Some(select) = canvas.widget::<SelectEntry>(select) {
        tracing::info!(text = select.text(), "selected");
    }
    println!("{}", dump.format_canvas(&canvas));
    Ok(())
}
