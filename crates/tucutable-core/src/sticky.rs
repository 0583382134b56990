//! Sticky header tracking.
//!
//! [`HeaderSticky`] watches where the table sits relative to the top of the viewport and decides
//! whether the duplicated header should be pinned there. Geometry comes from an injected
//! [`GeometryObserver`], so the logic runs the same against a real layout or fake measurements.

use serde::Deserialize;
use serde::Serialize;
use tracing::trace;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StickyGeometry {
    /// Top edge of the table relative to the viewport. Negative once scrolled past.
    pub table_top: f64,
    /// Total height of the table container.
    pub container_height: f64,
}

pub trait GeometryObserver {
    fn geometry(&self) -> StickyGeometry;
}

impl GeometryObserver for StickyGeometry {
    fn geometry(&self) -> StickyGeometry {
        *self
    }
}

/// Tuned visual thresholds, in the same unit as [`StickyGeometry`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StickyThresholds {
    /// Scrolled distance the table must pass before the header sticks.
    ///
    /// Entry also requires passing `release_within`, so the effective entry point is
    /// `max(enter_after, release_within)` and the header cannot flicker at the release boundary.
    pub enter_after: f64,
    /// Distance from the container bottom at which the header stops sticking on the way down.
    pub bottom_margin: f64,
    /// Scrolling back within this distance of the table top releases the header.
    pub release_within: f64,
}

impl Default for StickyThresholds {
    fn default() -> Self {
        Self {
            enter_after: 0.0,
            bottom_margin: 80.0,
            release_within: 56.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StickyAnimation {
    SlideDown,
    SlideUp,
}

impl StickyAnimation {
    pub fn class_name(self) -> &'static str {
        match self {
            StickyAnimation::SlideDown => "slide-down",
            StickyAnimation::SlideUp => "slide-up",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StickyChange {
    pub sticky: bool,
    pub animation: StickyAnimation,
}

#[derive(Clone, Debug, Default)]
pub struct HeaderSticky {
    thresholds: StickyThresholds,
    sticky: bool,
    animation: Option<StickyAnimation>,
}

impl HeaderSticky {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: StickyThresholds) -> Self {
        Self {
            thresholds,
            ..Self::default()
        }
    }

    pub fn thresholds(&self) -> StickyThresholds {
        self.thresholds
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky
    }

    pub fn animation(&self) -> Option<StickyAnimation> {
        self.animation
    }

    /// Re-reads geometry and returns the transition, if any.
    pub fn observe(&mut self, observer: &dyn GeometryObserver) -> Option<StickyChange> {
        self.update(observer.geometry())
    }

    pub fn update(&mut self, geometry: StickyGeometry) -> Option<StickyChange> {
        let t = self.thresholds;
        let scrolled = -geometry.table_top;

        let next = if self.sticky {
            let released =
                scrolled <= t.release_within || scrolled > geometry.container_height;
            !released
        } else {
            scrolled > t.enter_after
                && scrolled > t.release_within
                && scrolled < geometry.container_height - t.bottom_margin
        };
        if next == self.sticky {
            return None;
        }

        let animation = if next {
            StickyAnimation::SlideDown
        } else {
            StickyAnimation::SlideUp
        };
        trace!(scrolled, sticky = next, "sticky header changed");
        self.sticky = next;
        self.animation = Some(animation);
        Some(StickyChange {
            sticky: next,
            animation,
        })
    }
}
