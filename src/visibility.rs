//! Visibility state of a gate and the proximity rules that drive it.

/// Which branch a gate renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    /// No viewport to observe (server or native render); children render immediately.
    Undetermined,
    /// Placeholder shown.
    Hidden,
    /// Children shown.
    Visible,
}

impl Visibility {
    /// Starting state for a host with or without a viewport.
    pub fn initial(has_viewport: bool) -> Self {
        if has_viewport {
            Visibility::Hidden
        } else {
            Visibility::Undetermined
        }
    }

    /// State after a visibility report. Every state accepts every report.
    pub fn apply(self, report: VisibilityReport) -> Self {
        if report.is_intersecting {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }

    pub fn renders_children(self) -> bool {
        !matches!(self, Visibility::Hidden)
    }
}

/// A boundary crossing of the container against the expanded root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityReport {
    pub is_intersecting: bool,
}

impl VisibilityReport {
    pub fn new(is_intersecting: bool) -> Self {
        Self { is_intersecting }
    }
}

/// Report for a batch of crossings queued oldest first; the newest one wins.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn latest<I>(crossings: I) -> Option<VisibilityReport>
where
    I: IntoIterator<Item = bool>,
{
    crossings.into_iter().last().map(VisibilityReport::new)
}

/// `rootMargin` expanding the root by `offset` px above and below, never sideways.
pub fn root_margin(offset: u32) -> String {
    format!("{offset}px 0px {offset}px 0px")
}

/// Whether the current host has a browser viewport to observe.
pub(crate) fn host_has_viewport() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().is_some()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        false
    }
}

/// Extent of a box along the scroll axis, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Whether `self` overlaps `root` grown by `offset` on both edges.
    ///
    /// Edge contact counts, matching how `IntersectionObserver` reports adjacent
    /// zero-height targets as intersecting.
    pub fn is_near(&self, root: &Bounds, offset: u32) -> bool {
        let offset = f64::from(offset);
        let top = root.top - offset;
        let bottom = root.bottom + offset;
        self.top <= bottom && self.bottom >= top
    }

    /// The report the browser would deliver for this target.
    pub fn report_against(&self, root: &Bounds, offset: u32) -> VisibilityReport {
        VisibilityReport::new(self.is_near(root, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Bounds = Bounds {
        top: 0.0,
        bottom: 800.0,
    };

    fn below_viewport(distance: f64) -> Bounds {
        let top = VIEWPORT.bottom + distance;
        Bounds::new(top, top + 300.0)
    }

    #[test]
    fn initial_state_depends_on_viewport() {
        assert_eq!(Visibility::initial(false), Visibility::Undetermined);
        assert!(Visibility::initial(false).renders_children());
        assert_eq!(Visibility::initial(true), Visibility::Hidden);
        assert!(!Visibility::initial(true).renders_children());
    }

    #[test]
    fn hidden_until_first_report() {
        let state = Visibility::initial(true);
        assert_eq!(state, Visibility::Hidden);
        let state = state.apply(VisibilityReport::new(true));
        assert_eq!(state, Visibility::Visible);
    }

    #[test]
    fn toggles_for_lifetime() {
        let mut state = Visibility::Undetermined;
        for intersecting in [false, true, false, false, true] {
            state = state.apply(VisibilityReport::new(intersecting));
            assert_eq!(state.renders_children(), intersecting);
        }
    }

    #[test]
    fn far_below_margin_is_hidden() {
        let target = below_viewport(1200.0);
        let report = target.report_against(&VIEWPORT, 1000);
        assert!(!report.is_intersecting);
        assert_eq!(Visibility::initial(true).apply(report), Visibility::Hidden);
    }

    #[test]
    fn within_margin_is_visible() {
        let target = below_viewport(900.0);
        let report = target.report_against(&VIEWPORT, 1000);
        assert!(report.is_intersecting);
        assert_eq!(Visibility::initial(true).apply(report), Visibility::Visible);
    }

    #[test]
    fn margin_applies_above_the_root_too() {
        let above = Bounds::new(-1400.0, -950.0);
        assert!(above.is_near(&VIEWPORT, 1000));
        assert!(!above.is_near(&VIEWPORT, 900));
    }

    #[test]
    fn edge_contact_counts() {
        let touching = Bounds::new(1800.0, 1800.0);
        assert!(touching.is_near(&VIEWPORT, 1000));
        let zero_offset = Bounds::new(801.0, 900.0);
        assert!(!zero_offset.is_near(&VIEWPORT, 0));
    }

    #[test]
    fn newest_crossing_in_a_batch_wins() {
        assert_eq!(latest([true, false]), Some(VisibilityReport::new(false)));
        assert_eq!(latest([false, false, true]), Some(VisibilityReport::new(true)));
        assert_eq!(latest(std::iter::empty()), None);
    }

    #[test]
    fn root_margin_is_vertical_only() {
        assert_eq!(root_margin(1000), "1000px 0px 1000px 0px");
        assert_eq!(root_margin(0), "0px 0px 0px 0px");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_host_has_no_viewport() {
        assert!(!host_has_viewport());
    }
}
