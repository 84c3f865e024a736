//! Deferral of visibility updates to browser idle time.

use std::cell::Cell;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

/// Upper bound before an idle-scheduled update is forced to run.
pub const IDLE_TIMEOUT_MS: u32 = 600;

/// How a visibility update reaches the flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateStrategy {
    /// `requestIdleCallback` with a deadline.
    Idle { timeout_ms: u32 },
    /// Apply synchronously inside the observer callback.
    Immediate,
}

impl UpdateStrategy {
    /// Idle scheduling when the host offers it, immediate otherwise.
    pub fn detect() -> Self {
        if idle_callback_available() {
            UpdateStrategy::Idle {
                timeout_ms: IDLE_TIMEOUT_MS,
            }
        } else {
            UpdateStrategy::Immediate
        }
    }

    pub fn run<F>(self, update: F)
    where
        F: FnOnce() + 'static,
    {
        match self {
            UpdateStrategy::Immediate => update(),
            UpdateStrategy::Idle { timeout_ms } => request_idle(update, timeout_ms),
        }
    }
}

/// Cleared when the owning gate unmounts. Updates guarded by it that are still
/// queued at that point become no-ops.
#[derive(Clone, Debug)]
pub(crate) struct Liveness(Rc<Cell<bool>>);

impl Liveness {
    pub(crate) fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.0.get()
    }

    pub(crate) fn end(&self) {
        self.0.set(false);
    }

    pub(crate) fn guard<F>(&self, update: F) -> impl FnOnce() + 'static
    where
        F: FnOnce() + 'static,
    {
        let alive = self.clone();
        move || {
            if alive.is_alive() {
                update();
            }
        }
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
fn idle_callback_available() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    js_sys::Reflect::get(&window, &JsValue::from_str("requestIdleCallback"))
        .map(|f| f.is_function())
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
fn idle_callback_available() -> bool {
    false
}

#[cfg(target_arch = "wasm32")]
fn request_idle<F>(update: F, timeout_ms: u32)
where
    F: FnOnce() + 'static,
{
    let Some(window) = web_sys::window() else {
        update();
        return;
    };

    let options = web_sys::IdleRequestOptions::new();
    options.set_timeout(timeout_ms);

    // Shared with the callback so a rejected registration still applies the update.
    let slot = Rc::new(Cell::new(Some(update)));
    let pending = slot.clone();
    let cb = Closure::once_into_js(move || {
        if let Some(update) = pending.take() {
            update();
        }
    });

    if window
        .request_idle_callback_with_options(cb.unchecked_ref(), &options)
        .is_err()
    {
        tracing::trace!(target: "render_if_visible", "requestIdleCallback rejected, applying now");
        if let Some(update) = slot.take() {
            update();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn request_idle<F>(update: F, _timeout_ms: u32)
where
    F: FnOnce() + 'static,
{
    update();
}
