//! Per-instance state of a visibility gate.

use dioxus::dioxus_core::use_drop;
use dioxus::prelude::*;

use crate::schedule::{Liveness, UpdateStrategy};
use crate::visibility::{Visibility, VisibilityReport};

#[cfg(target_arch = "wasm32")]
use crate::observer::VisibilityObserver;

/// Handles owned by one gate's scope.
#[derive(Clone)]
pub(crate) struct GateState {
    visibility: Signal<Visibility>,
    liveness: Liveness,
    #[cfg(target_arch = "wasm32")]
    pub(crate) watcher: Signal<Option<VisibilityObserver>>,
}

/// Gate state for the current scope. Unmounting the scope mutes queued updates
/// first, then detaches the observer.
pub(crate) fn use_gate_state(initial: impl FnOnce() -> Visibility) -> GateState {
    let visibility = use_signal(initial);
    let liveness = use_hook(Liveness::new);
    #[cfg(target_arch = "wasm32")]
    let watcher = use_signal::<Option<VisibilityObserver>>(|| None);

    use_drop({
        let liveness = liveness.clone();
        #[cfg(target_arch = "wasm32")]
        let mut watcher = watcher.clone();
        move || {
            liveness.end();
            #[cfg(target_arch = "wasm32")]
            drop(watcher.take());
        }
    });

    GateState {
        visibility,
        liveness,
        #[cfg(target_arch = "wasm32")]
        watcher,
    }
}

impl GateState {
    /// Current state, subscribing the reading scope.
    pub(crate) fn visibility(&self) -> Visibility {
        *self.visibility.read()
    }

    /// Deliver a report through `strategy`. Dropped if the gate has unmounted by
    /// the time it runs.
    pub(crate) fn report(&self, strategy: UpdateStrategy, report: VisibilityReport) {
        let mut visibility = self.visibility;
        strategy.run(self.liveness.guard(move || apply_report(&mut visibility, report)));
    }
}

/// Writes only on a change of state, so repeated reports do not re-render.
pub(crate) fn apply_report(visibility: &mut Signal<Visibility>, report: VisibilityReport) {
    let current = *visibility.peek();
    let next = current.apply(report);
    if next != current {
        tracing::debug!(target: "render_if_visible", from = ?current, to = ?next, "visibility changed");
        visibility.set(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::Placeholder;
    use crate::render_branch;
    use dioxus::dioxus_core::NoOpMutations;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Harness {
        gates: Rc<RefCell<Vec<(usize, GateState)>>>,
        ids: Rc<Cell<Option<Signal<Vec<usize>>>>>,
        renders: Rc<Cell<usize>>,
    }

    impl Harness {
        fn gate(&self, id: usize) -> GateState {
            self.gates
                .borrow()
                .iter()
                .find(|(gate_id, _)| *gate_id == id)
                .map(|(_, state)| state.clone())
                .expect("gate was mounted")
        }
    }

    fn list(harness: Harness) -> Element {
        let ids = use_signal(|| vec![0, 1]);
        harness.ids.set(Some(ids));
        use_context_provider(|| harness.clone());

        rsx! {
            for id in ids() {
                Row { key: "{id}", id }
            }
        }
    }

    #[component]
    fn Row(id: usize) -> Element {
        let state = use_gate_state(|| Visibility::Hidden);
        let harness = use_context::<Harness>();
        use_hook(|| harness.gates.borrow_mut().push((id, state.clone())));
        harness.renders.set(harness.renders.get() + 1);

        let placeholder = Placeholder::new(10, 10, "gray", None);
        render_branch(state.visibility(), &placeholder, rsx! { p { "row {id}" } })
    }

    fn mount() -> (VirtualDom, Harness) {
        let harness = Harness::default();
        let mut dom = VirtualDom::new_with_props(list, harness.clone());
        dom.rebuild_in_place();
        (dom, harness)
    }

    fn deliver(dom: &mut VirtualDom, gate: &GateState, intersecting: bool) {
        dom.in_runtime(|| gate.report(UpdateStrategy::Immediate, VisibilityReport::new(intersecting)));
        dom.render_immediate(&mut NoOpMutations);
    }

    #[test]
    fn hidden_gate_flips_on_reports() {
        let (mut dom, harness) = mount();
        let html = dioxus_ssr::render(&dom);
        assert_eq!(html.matches("background:gray").count(), 2);
        assert!(!html.contains("row 0"));

        let first = harness.gate(0);
        deliver(&mut dom, &first, true);
        let html = dioxus_ssr::render(&dom);
        assert!(html.contains("row 0"));
        assert!(!html.contains("row 1"));
        assert_eq!(html.matches("background:gray").count(), 1);

        deliver(&mut dom, &first, false);
        let html = dioxus_ssr::render(&dom);
        assert!(!html.contains("row 0"));
        assert_eq!(html.matches("background:gray").count(), 2);
    }

    #[test]
    fn unchanged_report_does_not_rerender() {
        let (mut dom, harness) = mount();
        let before = harness.renders.get();

        deliver(&mut dom, &harness.gate(1), false);
        assert_eq!(harness.renders.get(), before);

        deliver(&mut dom, &harness.gate(1), true);
        assert_eq!(harness.renders.get(), before + 1);
    }

    #[test]
    fn filtered_list_keeps_each_gate_state() {
        let (mut dom, harness) = mount();
        let first = harness.gate(0);
        deliver(&mut dom, &first, true);

        let mut ids = harness.ids.get().expect("list rendered");
        dom.in_runtime(|| ids.set(vec![1]));
        dom.render_immediate(&mut NoOpMutations);

        let html = dioxus_ssr::render(&dom);
        assert!(!html.contains("row 0"));
        assert!(!html.contains("row 1"));
        assert_eq!(html.matches("background:gray").count(), 1);
        assert!(!first.liveness.is_alive());
        assert!(harness.gate(1).liveness.is_alive());
    }

    #[test]
    fn report_after_unmount_is_ignored() {
        let (dom, harness) = mount();
        let first = harness.gate(0);
        drop(dom);

        assert!(!first.liveness.is_alive());
        // the signal is gone with the dom; a delivered update would panic
        first.report(UpdateStrategy::Immediate, VisibilityReport::new(true));
    }
}
