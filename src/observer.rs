use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::ObserverError;
use crate::visibility::{latest, root_margin, Bounds, VisibilityReport};

type ObserverClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Live `IntersectionObserver` on one container. Dropping it unobserves the
/// container, disconnects, and frees the JS closure.
pub(crate) struct VisibilityObserver {
    observer: IntersectionObserver,
    target: Element,
    _callback: ObserverClosure,
}

impl VisibilityObserver {
    pub(crate) fn observe<F>(
        target: Element,
        root: Option<&Element>,
        offset: u32,
        mut on_report: F,
    ) -> Result<Self, ObserverError>
    where
        F: FnMut(VisibilityReport) + 'static,
    {
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let crossings = entries.iter().map(|entry| {
                    entry
                        .unchecked_into::<IntersectionObserverEntry>()
                        .is_intersecting()
                });
                if let Some(report) = latest(crossings) {
                    on_report(report);
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_root(root.map(|el| el.unchecked_ref()));
        options.set_root_margin(&root_margin(offset));

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(|err| ObserverError::Create(format!("{err:?}")))?;
        observer.observe(&target);
        tracing::debug!(target: "render_if_visible", offset, "observer attached");

        Ok(Self {
            observer,
            target,
            _callback: callback,
        })
    }

    pub(crate) fn target(&self) -> &Element {
        &self.target
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.unobserve(&self.target);
        self.observer.disconnect();
        tracing::debug!(target: "render_if_visible", "observer detached");
    }
}

/// One-shot proximity check of `target` against `root` or the window.
pub(crate) fn measure(
    target: &Element,
    root: Option<&Element>,
    offset: u32,
) -> Result<VisibilityReport, ObserverError> {
    let rect = target.get_bounding_client_rect();
    let target_bounds = Bounds::new(rect.top(), rect.bottom());

    let root_bounds = match root {
        Some(root) => {
            let rect = root.get_bounding_client_rect();
            Bounds::new(rect.top(), rect.bottom())
        }
        None => {
            let window = web_sys::window().ok_or(ObserverError::NoWindow)?;
            let height = match window.inner_height().ok().and_then(|h| h.as_f64()) {
                Some(height) => height,
                None => {
                    tracing::trace!(target: "render_if_visible", "innerHeight unavailable, measuring against a zero-height viewport");
                    0.0
                }
            };
            Bounds::new(0.0, height)
        }
    };

    Ok(target_bounds.report_against(&root_bounds, offset))
}
