//! Logging facilities for Trellis.
//!
//! Trellis uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("trellis::focus=debug,trellis::overlay=trace")
//!         .init();
//! }
//! ```
//!
//! Every log site passes an explicit `target:` from [`targets`] so a
//! subsystem can be filtered independently of the module that logs for it.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "trellis::signal";
    /// Widget lifecycle (extension, renderer creation and invalidation).
    pub const WIDGET: &str = "trellis::widget";
    /// Renderer refresh and rebuild.
    pub const RENDERER: &str = "trellis::renderer";
    /// Layout engine.
    pub const LAYOUT: &str = "trellis::layout";
    /// Focus changes and input routing.
    pub const FOCUS: &str = "trellis::focus";
    /// Overlay stack and pop-up menus.
    pub const OVERLAY: &str = "trellis::overlay";
    /// Theme loading.
    pub const STYLE: &str = "trellis::style";
}
