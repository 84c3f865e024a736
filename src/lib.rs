//! Lazy mounting for long Dioxus lists and grids.
//!
//! [`RenderIfVisible`] wraps arbitrary content and only renders it once its container
//! scrolls within `visible_offset` pixels of the viewport (or a scrolling root).
//! Until then a fixed-size [`Placeholder`] holds the layout in place.

use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use dioxus_web::WebEventExt;

mod error;
mod gate;
#[cfg(target_arch = "wasm32")]
mod observer;
mod placeholder;
mod schedule;
mod visibility;

pub use error::ObserverError;
pub use placeholder::{InnerStyle, Placeholder};
pub use schedule::{UpdateStrategy, IDLE_TIMEOUT_MS};
pub use visibility::{root_margin, Bounds, Visibility, VisibilityReport};

use gate::use_gate_state;
use visibility::host_has_viewport;

#[cfg(target_arch = "wasm32")]
use observer::VisibilityObserver;

pub const DEFAULT_BACKGROUND: &str = "var(--color-bg)";
pub const DEFAULT_HEIGHT: u32 = 300;
pub const DEFAULT_WIDTH: u32 = 300;
pub const DEFAULT_VISIBLE_OFFSET: u32 = 1000;

/// Scrolling ancestor the gate measures against.
#[cfg(target_arch = "wasm32")]
pub type ScrollRoot = web_sys::Element;

/// Scrolling ancestor the gate measures against. Off-browser there is none.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScrollRoot {}

#[derive(Props, Clone, PartialEq)]
pub struct RenderIfVisibleProps {
    /// Placeholder fill, ignored when `inner_style` is set.
    #[props(into, default = DEFAULT_BACKGROUND.to_owned())]
    pub background: String,
    pub inner_style: Option<InnerStyle>,
    /// An estimate of the content's height/width, reserved by the placeholder.
    #[props(default = DEFAULT_HEIGHT)]
    pub default_height: u32,
    #[props(default = DEFAULT_WIDTH)]
    pub default_width: u32,
    /// How far outside the root, in pixels, content still counts as visible.
    #[props(default = DEFAULT_VISIBLE_OFFSET)]
    pub visible_offset: u32,
    /// `None` measures against the browser viewport.
    pub root: Option<ScrollRoot>,
    pub children: Element,
}

impl RenderIfVisibleProps {
    /// Default configuration around `children`.
    pub fn new(children: Element) -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_owned(),
            inner_style: None,
            default_height: DEFAULT_HEIGHT,
            default_width: DEFAULT_WIDTH,
            visible_offset: DEFAULT_VISIBLE_OFFSET,
            root: None,
            children,
        }
    }

    pub fn placeholder(&self) -> Placeholder {
        Placeholder::new(
            self.default_height,
            self.default_width,
            &self.background,
            self.inner_style.as_ref(),
        )
    }
}

/// Render children only while they are near the viewport, a placeholder otherwise.
///
/// Mount it as a component (`RenderIfVisible { .. }` in `rsx!`) so every gate gets
/// its own scope and therefore its own state and observer.
#[allow(non_snake_case)]
pub fn RenderIfVisible(props: RenderIfVisibleProps) -> Element {
    // 1. Start visible off-browser, hidden when there is a viewport to observe.
    // 2. On mount, observe the container with the offset as a vertical root margin.
    // 3. Route each report through idle time when available, straight to state otherwise.
    // 4. On unmount, mute any update still queued, then detach the observer.

    let gate = use_gate_state(|| Visibility::initial(host_has_viewport()));
    let placeholder = props.placeholder();

    #[cfg(target_arch = "wasm32")]
    let (root, offset) = (props.root.clone(), props.visible_offset);

    let body = render_branch(gate.visibility(), &placeholder, props.children);

    rsx! {
        div {
            class: "render-if-visible",
            onmounted: move |_event: Event<MountedData>| {
                #[cfg(target_arch = "wasm32")]
                {
                    let element = _event.as_web_event();
                    let mut watcher = gate.watcher;
                    if watcher.peek().as_ref().is_some_and(|w| *w.target() == element) {
                        return;
                    }
                    // a new container replaces the old one; stop watching the detached node
                    drop(watcher.take());

                    let reporter = gate.clone();
                    let on_report = move |report: VisibilityReport| {
                        tracing::trace!(target: "render_if_visible", ?report, "visibility report");
                        reporter.report(UpdateStrategy::detect(), report);
                    };

                    match VisibilityObserver::observe(element.clone(), root.as_ref(), offset, on_report) {
                        Ok(attached) => watcher.set(Some(attached)),
                        Err(err) => {
                            tracing::warn!(target: "render_if_visible", %err, "falling back to a one-shot visibility check");
                            match observer::measure(&element, root.as_ref(), offset) {
                                Ok(report) => gate.report(UpdateStrategy::Immediate, report),
                                Err(err) => {
                                    tracing::warn!(target: "render_if_visible", %err, "visibility check failed");
                                }
                            }
                        }
                    }
                }
            },
            {body}
        }
    }
}

/// Content of the gate's container for a given state: the children when they
/// should render, the placeholder otherwise. Never both.
pub fn render_branch(visibility: Visibility, placeholder: &Placeholder, children: Element) -> Element {
    if visibility.renders_children() {
        children
    } else {
        placeholder.render()
    }
}

/// Helper with the default configuration, taking only the content. The gate is
/// mounted as its own component, so calling this in a loop or a branch is fine.
pub fn render_if_visible(children: Element) -> Element {
    rsx! {
        RenderIfVisible { {children} }
    }
}
