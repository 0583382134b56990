use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::viewport::ViewportState;

const ELLIPSIS: char = '…';

/// Draws a vertical scrollbar for `state` in a one-column `area`.
pub fn render_scrollbar(area: Rect, buf: &mut Buffer, state: &ViewportState, style: Style) {
    buf.set_style(area, style);
    if area.height == 0 || state.content_h <= state.viewport_h as u32 {
        return;
    }

    let track_h = area.height as f64;
    let thumb_h = ((state.viewport_h as f64 / state.content_h as f64) * track_h)
        .round()
        .clamp(1.0, track_h) as u16;
    let max_y = state.max_y().max(1) as f64;
    let thumb_top = ((state.y as f64 / max_y) * (track_h - thumb_h as f64))
        .round()
        .clamp(0.0, (track_h - thumb_h as f64).max(0.0)) as u16;

    for dy in thumb_top..(thumb_top + thumb_h).min(area.height) {
        buf.set_stringn(area.x, area.y + dy, "█", 1, style);
    }
}

/// Draws `input` at `(x, y)`, skipping its first `start_col` display columns and writing at most
/// `max_cols` columns. Wide characters cut by either edge are replaced by spaces.
pub fn render_str_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) {
    let clipped = slice_by_cols(input, start_col, max_cols);
    if clipped.is_empty() {
        return;
    }
    buf.set_stringn(x, y, &clipped, max_cols as usize, style);
}

/// Returns the display columns `[start_col, start_col + max_cols)` of `input`.
pub fn slice_by_cols(input: &str, start_col: u32, max_cols: u16) -> String {
    let start = start_col as usize;
    let end = start + max_cols as usize;
    let mut out = String::new();
    let mut col = 0usize;
    for ch in input.chars() {
        let w = ch.width().unwrap_or(0);
        let (c0, c1) = (col, col + w);
        col = c1;
        if c1 <= start || w == 0 {
            continue;
        }
        if c0 >= end {
            break;
        }
        if c0 < start || c1 > end {
            let visible = c1.min(end) - c0.max(start);
            out.extend(std::iter::repeat_n(' ', visible));
        } else {
            out.push(ch);
        }
    }
    out
}

/// Truncates `input` to `width` columns, ending with an ellipsis when something was cut.
pub fn truncate_to_width(input: &str, width: u16) -> String {
    let width = width as usize;
    if input.width() <= width {
        return input.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for ch in input.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

/// Pads (or truncates) `input` to exactly `width` columns.
pub fn fit_to_width(input: &str, width: u16) -> String {
    let mut out = truncate_to_width(input, width);
    let used = out.width();
    out.extend(std::iter::repeat_n(' ', (width as usize).saturating_sub(used)));
    out
}

/// Centers `input` within `width` columns.
pub fn center_in_width(input: &str, width: u16) -> String {
    let text = truncate_to_width(input, width);
    let pad = (width as usize).saturating_sub(text.width()) / 2;
    let mut out: String = std::iter::repeat_n(' ', pad).collect();
    out.push_str(&text);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_by_cols_clips_wide_chars() {
        assert_eq!(slice_by_cols("abcdef", 2, 3), "cde");
        assert_eq!(slice_by_cols("你好", 0, 2), "你");
        assert_eq!(slice_by_cols("你好", 1, 2), " 好");
        assert_eq!(slice_by_cols("你好", 0, 3), "你 ");
    }

    #[test]
    fn truncation_and_padding() {
        assert_eq!(truncate_to_width("Amount", 4), "Amo…");
        assert_eq!(truncate_to_width("Amount", 6), "Amount");
        assert_eq!(fit_to_width("id", 4), "id  ");
        assert_eq!(center_in_width("ok", 6), "  ok");
    }

    #[test]
    fn clipped_render_writes_visible_part() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        render_str_clipped(0, 0, 2, 4, &mut buf, "abcdef", Style::default());
        assert_eq!(buf[(0, 0)].symbol(), "c");
        assert_eq!(buf[(3, 0)].symbol(), "f");
    }
}
