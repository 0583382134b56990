/// Scroll position and geometry of a rectangular viewport over larger content.
///
/// Offsets are always clamped so the viewport never scrolls past the content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportState {
    pub x: u32,
    pub y: u32,
    pub viewport_w: u16,
    pub viewport_h: u16,
    pub content_w: u32,
    pub content_h: u32,
}

impl ViewportState {
    pub fn set_viewport(&mut self, w: u16, h: u16) {
        self.viewport_w = w;
        self.viewport_h = h;
        self.clamp();
    }

    pub fn set_content(&mut self, w: u32, h: u32) {
        self.content_w = w;
        self.content_h = h;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.y = self.y.min(self.max_y());
        self.x = self.x.min(self.max_x());
    }

    pub fn scroll_y_by(&mut self, delta: i32) {
        let next = self.y as i64 + delta as i64;
        self.y = next.clamp(0, self.max_y() as i64) as u32;
    }

    pub fn scroll_x_by(&mut self, delta: i32) {
        let next = self.x as i64 + delta as i64;
        self.x = next.clamp(0, self.max_x() as i64) as u32;
    }

    /// Scrolls vertically by the least amount that brings `[top, top + h)` into view.
    pub fn ensure_visible_y(&mut self, top: u32, h: u32) {
        let view_h = self.viewport_h as u32;
        if top < self.y {
            self.y = top;
        } else if top + h > self.y + view_h {
            self.y = (top + h).saturating_sub(view_h);
        }
        self.clamp();
    }

    pub fn to_top(&mut self) {
        self.y = 0;
    }

    pub fn to_left(&mut self) {
        self.x = 0;
    }

    pub fn to_right(&mut self) {
        self.x = self.max_x();
    }

    pub fn max_x(&self) -> u32 {
        self.content_w.saturating_sub(self.viewport_w as u32)
    }

    pub fn max_y(&self) -> u32 {
        self.content_h.saturating_sub(self.viewport_h as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_clamps_both_axes() {
        let mut s = ViewportState::default();
        s.set_viewport(10, 5);
        s.set_content(12, 6);
        s.x = 99;
        s.y = 99;
        s.clamp();
        assert_eq!((s.x, s.y), (2, 1));
    }

    #[test]
    fn ensure_visible_scrolls_minimally() {
        let mut s = ViewportState::default();
        s.set_viewport(10, 4);
        s.set_content(10, 20);
        s.ensure_visible_y(6, 1);
        assert_eq!(s.y, 3);
        s.ensure_visible_y(4, 1);
        assert_eq!(s.y, 3);
        s.ensure_visible_y(1, 1);
        assert_eq!(s.y, 1);
    }
}
