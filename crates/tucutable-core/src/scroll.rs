//! Horizontal scroll tracking for tables wider than their container.
//!
//! [`ScrollableTable`] records the container geometry through an [`ElementMetrics`] observer and
//! mirrors the body's horizontal offset onto a second element (the fixed header) through a
//! [`ScrollTarget`], so both stay aligned while the body scrolls.

use crate::viewport::ViewportState;

/// Geometry of the scroll container.
pub trait ElementMetrics {
    /// Visible width.
    fn client_width(&self) -> u32;
    /// Full content width.
    fn scroll_width(&self) -> u32;
}

/// An element whose horizontal offset follows the table body.
pub trait ScrollTarget {
    fn set_scroll_left(&mut self, offset: u32);
}

impl ElementMetrics for ViewportState {
    fn client_width(&self) -> u32 {
        self.viewport_w as u32
    }

    fn scroll_width(&self) -> u32 {
        self.content_w
    }
}

impl ScrollTarget for ViewportState {
    fn set_scroll_left(&mut self, offset: u32) {
        self.x = offset;
        self.clamp();
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollableTable {
    client_width: u32,
    scroll_width: u32,
    scroll_left: u32,
    synced_left: Option<u32>,
}

impl ScrollableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-reads the container geometry. Returns `true` if it changed.
    pub fn measure(&mut self, el: &dyn ElementMetrics) -> bool {
        let (client, scroll) = (el.client_width(), el.scroll_width());
        if client == self.client_width && scroll == self.scroll_width {
            return false;
        }
        self.client_width = client;
        self.scroll_width = scroll;
        self.scroll_left = self.scroll_left.min(self.max_scroll_left());
        true
    }

    pub fn client_width(&self) -> u32 {
        self.client_width
    }

    pub fn scroll_width(&self) -> u32 {
        self.scroll_width
    }

    /// Whether the table is wider than its container.
    pub fn is_scrollable(&self) -> bool {
        self.scroll_width > self.client_width
    }

    pub fn scroll_left(&self) -> u32 {
        self.scroll_left
    }

    pub fn max_scroll_left(&self) -> u32 {
        self.scroll_width.saturating_sub(self.client_width)
    }

    /// Records a scroll event on the body.
    pub fn on_scroll(&mut self, offset: u32) {
        self.scroll_left = offset.min(self.max_scroll_left());
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let next = (self.scroll_left as i64 + delta as i64).max(0);
        self.on_scroll(next.min(u32::MAX as i64) as u32);
    }

    /// Pushes the current offset to `target` if it moved since the last sync.
    pub fn sync(&mut self, target: &mut dyn ScrollTarget) -> bool {
        if self.synced_left == Some(self.scroll_left) {
            return false;
        }
        target.set_scroll_left(self.scroll_left);
        self.synced_left = Some(self.scroll_left);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeElement {
        client: u32,
        scroll: u32,
    }

    impl ElementMetrics for FakeElement {
        fn client_width(&self) -> u32 {
            self.client
        }

        fn scroll_width(&self) -> u32 {
            self.scroll
        }
    }

    #[derive(Default)]
    struct FakeHeader {
        writes: Vec<u32>,
    }

    impl ScrollTarget for FakeHeader {
        fn set_scroll_left(&mut self, offset: u32) {
            self.writes.push(offset);
        }
    }

    #[test]
    fn reports_overflow_from_measurements() {
        let mut s = ScrollableTable::new();
        assert!(s.measure(&FakeElement {
            client: 80,
            scroll: 120
        }));
        assert!(s.is_scrollable());
        assert!(!s.measure(&FakeElement {
            client: 80,
            scroll: 120
        }));
        s.measure(&FakeElement {
            client: 200,
            scroll: 120,
        });
        assert!(!s.is_scrollable());
    }

    #[test]
    fn header_follows_body_offset_once_per_change() {
        let mut s = ScrollableTable::new();
        s.measure(&FakeElement {
            client: 80,
            scroll: 120,
        });
        let mut header = FakeHeader::default();

        s.on_scroll(15);
        assert!(s.sync(&mut header));
        assert!(!s.sync(&mut header));
        s.on_scroll(500);
        s.sync(&mut header);
        assert_eq!(header.writes, vec![15, 40]);
    }

    #[test]
    fn shrinking_content_clamps_offset() {
        let mut s = ScrollableTable::new();
        s.measure(&FakeElement {
            client: 10,
            scroll: 50,
        });
        s.scroll_by(30);
        s.measure(&FakeElement {
            client: 10,
            scroll: 20,
        });
        assert_eq!(s.scroll_left(), 10);
        s.scroll_by(-100);
        assert_eq!(s.scroll_left(), 0);
    }
}
