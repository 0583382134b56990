use crate::keymap::Binding;
use crate::render;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug)]
pub struct HelpBarOptions {
    pub style: Style,
    pub key_style: Style,
    pub separator: String,
}

impl Default for HelpBarOptions {
    fn default() -> Self {
        Self {
            style: Style::default(),
            key_style: Style::default(),
            separator: " • ".to_string(),
        }
    }
}

/// One line of `key description` pairs, clipped to the area width.
#[derive(Clone, Debug, Default)]
pub struct HelpBar {
    bindings: Vec<Binding>,
    options: HelpBarOptions,
}

impl HelpBar {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self {
            bindings,
            options: HelpBarOptions::default(),
        }
    }

    pub fn with_options(bindings: Vec<Binding>, options: HelpBarOptions) -> Self {
        Self { bindings, options }
    }

    pub fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, self.options.style);

        let end = area.x + area.width;
        let mut x = area.x;
        for (i, b) in self.bindings.iter().enumerate() {
            let mut parts = Vec::with_capacity(3);
            if i > 0 {
                parts.push((self.options.separator.clone(), self.options.style));
            }
            parts.push((b.help_key.clone(), self.options.key_style));
            parts.push((format!(" {}", b.help_desc), self.options.style));

            for (text, style) in parts {
                if x >= end {
                    return;
                }
                render::render_str_clipped(x, area.y, 0, end - x, buf, &text, style);
                x = x.saturating_add(text.width() as u16);
            }
        }
    }
}
