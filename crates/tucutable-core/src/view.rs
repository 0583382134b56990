//! Terminal rendering of a shared [`DataTable`].
//!
//! [`DataTableView`] reads the table through a [`DataTableContext`], so a toolbar or a column
//! selector holding a clone of the same context sees every change the view makes. Pinned columns
//! stay fixed at the edges; the remaining columns are laid out by a `virtualizer` and scroll
//! horizontally. A [`ScrollableTable`] owns the horizontal offset and mirrors it onto the header
//! row, and a [`HeaderSticky`] decides when the header is drawn over the first visible line.

use crate::column::ColumnDef;
use crate::column::ColumnKind;
use crate::context::DataTableContext;
use crate::data_table::DataTable;
use crate::error::Result;
use crate::input::InputEvent;
use crate::input::KeyEvent;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap::TableBindings;
use crate::options::DataTableOptions;
use crate::options::next_page_size;
use crate::render;
use crate::scroll::ScrollableTable;
use crate::state::PinSide;
use crate::state::RowId;
use crate::state::Updater;
use crate::state::VisibilityState;
use crate::status::TableStatus;
use crate::sticky::GeometryObserver;
use crate::sticky::HeaderSticky;
use crate::sticky::StickyGeometry;
use crate::sticky::StickyThresholds;
use crate::table::Row;
use crate::theme::Theme;
use crate::viewport::ViewportState;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::Widget;
use std::rc::Rc;
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;
use virtualizer::Align;
use virtualizer::Virtualizer;
use virtualizer::VirtualizerOptions;

/// Labels of the actions offered for a row. An empty list hides the row actions glyph.
pub type RowActionsFn<T> = Rc<dyn Fn(&T) -> Vec<String>>;
/// Lines shown under an expanded row.
pub type SubComponentFn<T> = Rc<dyn Fn(&T) -> Vec<String>>;
/// A nested table shown under an expanded row.
pub type SubDataTableFn<T> = Rc<dyn Fn(&T) -> SubTable>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataTableAction {
    None,
    Redraw,
    /// The row actions menu was requested for `row`.
    RowActions { row: RowId, actions: Vec<String> },
    /// The "Contact Support" link of the current state message was activated.
    ContactSupport(String),
}

/// A small nested table rendered as aligned text lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SubTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn lines(&self) -> Vec<String> {
        let cols = self
            .rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.headers.len());
        let mut widths = vec![0usize; cols];
        for cells in std::iter::once(&self.headers).chain(&self.rows) {
            for (i, cell) in cells.iter().enumerate() {
                widths[i] = widths[i].max(cell.width());
            }
        }

        let format_row = |cells: &[String]| {
            let padded: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, &w)| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or_default();
                    render::fit_to_width(cell, w as u16)
                })
                .collect();
            padded.join(" │ ").trim_end().to_string()
        };

        let mut out = vec![format_row(self.headers.as_slice())];
        let rule: Vec<String> = widths.iter().map(|&w| "─".repeat(w)).collect();
        out.push(rule.join("─┼─"));
        out.extend(self.rows.iter().map(|r| format_row(r.as_slice())));
        out
    }
}

/// Styling for [`DataTableView`]. `Style::default()` fields fall back to the [`Theme`].
#[derive(Clone, Debug)]
pub struct DataTableViewOptions {
    pub style: Style,
    pub header_style: Style,
    pub cursor_style: Style,
    pub focus_style: Style,
    pub pinned_style: Style,
    pub border_style: Style,
    pub scrollbar_style: Style,
    pub show_scrollbar_y: bool,
    pub overscan_cols: usize,
    /// Columns moved per horizontal scroll step.
    pub scroll_step: u16,
    /// Width change per resize key press.
    pub resize_step: u16,
    /// Measured in lines.
    pub sticky_thresholds: StickyThresholds,
}

impl Default for DataTableViewOptions {
    fn default() -> Self {
        Self {
            style: Style::default(),
            header_style: Style::default().add_modifier(Modifier::BOLD),
            cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            focus_style: Style::default().add_modifier(Modifier::UNDERLINED),
            pinned_style: Style::default(),
            border_style: Style::default(),
            scrollbar_style: Style::default(),
            show_scrollbar_y: true,
            overscan_cols: 2,
            scroll_step: 4,
            resize_step: 2,
            sticky_thresholds: StickyThresholds {
                enter_after: 0.0,
                bottom_margin: 0.0,
                release_within: 0.0,
            },
        }
    }
}

#[derive(Clone, Debug)]
struct LayoutColumn {
    id: String,
    header: String,
    width: u16,
    kind: ColumnKind,
    pinned: bool,
}

#[derive(Clone, Debug, Default)]
struct Layout {
    left: Vec<LayoutColumn>,
    center: Vec<LayoutColumn>,
    right: Vec<LayoutColumn>,
}

impl Layout {
    fn from_table<T>(dt: &DataTable<T>) -> Self {
        let table = dt.table();
        let to_layout = |c: &ColumnDef<T>| LayoutColumn {
            id: c.id.clone(),
            header: c.header.clone(),
            width: table.column_size(&c.id),
            kind: c.kind(),
            pinned: table.column_pin_side(&c.id).is_some(),
        };
        Self {
            left: table.left_columns().into_iter().map(to_layout).collect(),
            center: table.center_columns().into_iter().map(to_layout).collect(),
            right: table.right_columns().into_iter().map(to_layout).collect(),
        }
    }

    fn all(&self) -> impl Iterator<Item = &LayoutColumn> {
        self.left.iter().chain(&self.center).chain(&self.right)
    }

    fn len(&self) -> usize {
        self.left.len() + self.center.len() + self.right.len()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.all().position(|c| c.id == id)
    }
}

fn pinned_width(cols: &[LayoutColumn], gap: u32) -> u16 {
    let w: u32 = cols.iter().map(|c| c.width as u32 + gap).sum();
    w.min(u16::MAX as u32) as u16
}

#[derive(Clone, Copy, Debug, Default)]
struct Regions {
    left: Rect,
    center: Rect,
    right: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MessageRole {
    Title,
    Description,
    Link,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum BodyLine {
    Header,
    /// Position within the current page.
    Row(usize),
    Detail(String),
    Message(String, MessageRole),
}

#[derive(Clone, Copy)]
struct Styles {
    base: Style,
    header: Style,
    cursor: Style,
    focus: Style,
    pinned: Style,
    border: Style,
    muted: Style,
    accent: Style,
    danger: Style,
}

/// Vertical geometry of the scrolled body, as seen by [`HeaderSticky`].
struct BodyGeometry<'a>(&'a ViewportState);

impl GeometryObserver for BodyGeometry<'_> {
    fn geometry(&self) -> StickyGeometry {
        StickyGeometry {
            table_top: -(self.0.y as f64),
            container_height: self.0.content_h as f64,
        }
    }
}

pub struct DataTableView<T> {
    /// Body viewport: vertical scroll over body lines, horizontal scroll over center columns.
    pub state: ViewportState,
    ctx: DataTableContext<T>,
    options: DataTableOptions,
    view_options: DataTableViewOptions,
    bindings: TableBindings,
    header: ViewportState,
    scroll: ScrollableTable,
    sticky: HeaderSticky,
    cursor: usize,
    focus: usize,
    col_v: Virtualizer,
    col_items: Vec<virtualizer::VirtualItem>,
    row_actions: Option<RowActionsFn<T>>,
    render_sub_component: Option<SubComponentFn<T>>,
    render_sub_data_table: Option<SubDataTableFn<T>>,
}

impl<T> std::fmt::Debug for DataTableView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTableView")
            .field("state", &self.state)
            .field("cursor", &self.cursor)
            .field("focus", &self.focus)
            .field("scroll", &self.scroll)
            .finish_non_exhaustive()
    }
}

impl<T> DataTableView<T> {
    pub fn new(ctx: DataTableContext<T>, options: DataTableOptions) -> Self {
        let view_options = DataTableViewOptions::default();
        let mut col_opts = VirtualizerOptions::new(0, |_| 1);
        col_opts.gap = options.col_gap();
        col_opts.overscan = view_options.overscan_cols;

        Self {
            state: ViewportState::default(),
            ctx,
            sticky: HeaderSticky::with_thresholds(view_options.sticky_thresholds),
            options,
            view_options,
            bindings: TableBindings::default(),
            header: ViewportState::default(),
            scroll: ScrollableTable::new(),
            cursor: 0,
            focus: 0,
            col_v: Virtualizer::new(col_opts),
            col_items: Vec::new(),
            row_actions: None,
            render_sub_component: None,
            render_sub_data_table: None,
        }
    }

    pub fn with_view_options(mut self, view_options: DataTableViewOptions) -> Self {
        self.sticky = HeaderSticky::with_thresholds(view_options.sticky_thresholds);
        self.view_options = view_options;
        self
    }

    pub fn with_bindings(mut self, bindings: TableBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn row_actions(mut self, f: impl Fn(&T) -> Vec<String> + 'static) -> Self {
        self.row_actions = Some(Rc::new(f));
        self
    }

    pub fn render_sub_component(mut self, f: impl Fn(&T) -> Vec<String> + 'static) -> Self {
        self.render_sub_component = Some(Rc::new(f));
        self
    }

    pub fn render_sub_data_table(mut self, f: impl Fn(&T) -> SubTable + 'static) -> Self {
        self.render_sub_data_table = Some(Rc::new(f));
        self
    }

    pub fn context(&self) -> &DataTableContext<T> {
        &self.ctx
    }

    pub fn options(&self) -> &DataTableOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut DataTableOptions {
        &mut self.options
    }

    pub fn bindings(&self) -> &TableBindings {
        &self.bindings
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.options.is_loading = is_loading;
    }

    pub fn set_error(&mut self, is_error: bool) {
        self.options.is_error = is_error;
    }

    /// Position of the highlighted row within the current page.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the focused column among the visible columns.
    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn scroll(&self) -> &ScrollableTable {
        &self.scroll
    }

    /// Horizontal position of the header row, which follows the body.
    pub fn header_viewport(&self) -> &ViewportState {
        &self.header
    }

    pub fn sticky(&self) -> &HeaderSticky {
        &self.sticky
    }

    pub fn focused_column_id(&self) -> Result<Option<String>> {
        let focus = self.focus;
        self.ctx.with(|dt| {
            Layout::from_table(dt)
                .all()
                .nth(focus)
                .map(|c| c.id.clone())
        })
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Result<DataTableAction> {
        let ctx = self.ctx.clone();
        ctx.with_mut(|dt| match event {
            InputEvent::Key(key) => self.handle_key(dt, key),
            InputEvent::Mouse(mouse) => Ok(self.handle_mouse(mouse)),
            InputEvent::Resize(..) => Ok(DataTableAction::Redraw),
        })?
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) -> Result<()> {
        let ctx = self.ctx.clone();
        ctx.with(|dt| self.render_table(dt, area, buf, theme))
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> DataTableAction {
        let step = self.view_options.scroll_step as i32;
        match mouse.kind {
            MouseEventKind::ScrollUp => self.state.scroll_y_by(-1),
            MouseEventKind::ScrollDown => self.state.scroll_y_by(1),
            MouseEventKind::ScrollLeft => self.scroll.scroll_by(-step),
            MouseEventKind::ScrollRight => self.scroll.scroll_by(step),
            MouseEventKind::Click => return DataTableAction::None,
        }
        DataTableAction::Redraw
    }

    fn handle_key(&mut self, dt: &mut DataTable<T>, key: KeyEvent) -> Result<DataTableAction> {
        let layout = Layout::from_table(dt);
        let focused = layout.all().nth(self.focus).cloned();
        let headers = self.options.header_options.clone();
        let b = &self.bindings;

        if b.contact_support.matches(&key) {
            let status = dt.status(self.options.is_loading, self.options.is_error);
            let link = self
                .options
                .state_message
                .resolve(status)
                .and_then(|m| m.support_link);
            return Ok(link
                .map(DataTableAction::ContactSupport)
                .unwrap_or(DataTableAction::None));
        }

        let row_count = dt.table().page_rows().len();
        if b.row_down.matches(&key) {
            return Ok(self.move_cursor(dt, (self.cursor + 1).min(row_count.saturating_sub(1))));
        }
        if b.row_up.matches(&key) {
            return Ok(self.move_cursor(dt, self.cursor.saturating_sub(1)));
        }
        if b.first_row.matches(&key) {
            return Ok(self.move_cursor(dt, 0));
        }
        if b.last_row.matches(&key) {
            return Ok(self.move_cursor(dt, row_count.saturating_sub(1)));
        }
        if b.column_right.matches(&key) {
            let next = (self.focus + 1).min(layout.len().saturating_sub(1));
            return Ok(self.move_focus(&layout, next));
        }
        if b.column_left.matches(&key) {
            return Ok(self.move_focus(&layout, self.focus.saturating_sub(1)));
        }
        if b.scroll_right.matches(&key) {
            self.scroll.scroll_by(self.view_options.scroll_step as i32);
            return Ok(DataTableAction::Redraw);
        }
        if b.scroll_left.matches(&key) {
            self.scroll.scroll_by(-(self.view_options.scroll_step as i32));
            return Ok(DataTableAction::Redraw);
        }
        if b.next_page.matches(&key) {
            return Ok(self.page_changed(dt.next_page()));
        }
        if b.previous_page.matches(&key) {
            return Ok(self.page_changed(dt.previous_page()));
        }
        if b.page_size.matches(&key) {
            let p = &self.options.pagination;
            if !p.show_pagination || p.hide_records_selector {
                return Ok(DataTableAction::None);
            }
            dt.set_page_size(next_page_size(dt.state().pagination.page_size));
            return Ok(self.page_changed(true));
        }
        if b.reset.matches(&key) {
            dt.reset_table();
            self.cursor = 0;
            self.focus = 0;
            self.state.to_top();
            self.scroll.on_scroll(0);
            return Ok(DataTableAction::Redraw);
        }
        if b.show_all_columns.matches(&key) {
            if !headers.enable_hide_columns {
                return Ok(DataTableAction::None);
            }
            dt.on_column_visibility_change(Updater::from_fn(|v: &VisibilityState| {
                v.keys().map(|id| (id.clone(), true)).collect()
            }));
            return Ok(DataTableAction::Redraw);
        }

        let cursor_row = dt
            .table()
            .page_rows()
            .get(self.cursor)
            .map(|r| (r.id.clone(), r.index));
        if b.toggle_expand.matches(&key) {
            let Some((id, _)) = cursor_row else {
                return Ok(DataTableAction::None);
            };
            dt.toggle_expanded(&id);
            return Ok(DataTableAction::Redraw);
        }
        if b.row_actions.matches(&key) {
            let (Some((id, index)), Some(f)) = (cursor_row, &self.row_actions) else {
                return Ok(DataTableAction::None);
            };
            let actions = dt.table().data().get(index).map(|r| f(r)).unwrap_or_default();
            if actions.is_empty() {
                return Ok(DataTableAction::None);
            }
            return Ok(DataTableAction::RowActions { row: id, actions });
        }

        let Some(col) = focused else {
            return Ok(DataTableAction::None);
        };
        if b.sort.matches(&key) && headers.enable_sort_columns {
            dt.toggle_sorting(&col.id)?;
        } else if b.hide_column.matches(&key) && headers.enable_hide_columns {
            dt.toggle_column_visibility(&col.id)?;
        } else if b.pin_left.matches(&key) && headers.enable_pin_left_columns {
            dt.pin_column(&col.id, Some(PinSide::Left))?;
        } else if b.pin_right.matches(&key) && headers.enable_pin_right_columns {
            dt.pin_column(&col.id, Some(PinSide::Right))?;
        } else if b.unpin.matches(&key)
            && (headers.enable_pin_left_columns || headers.enable_pin_right_columns)
        {
            dt.pin_column(&col.id, None)?;
        } else if (b.move_left.matches(&key) || b.move_right.matches(&key))
            && headers.enable_drag_columns
        {
            let order = dt.table().ordered_columns();
            let Some(at) = order.iter().position(|c| c.id == col.id) else {
                return Ok(DataTableAction::None);
            };
            let to = if b.move_left.matches(&key) {
                at.saturating_sub(1)
            } else {
                at + 1
            };
            dt.move_column(&col.id, to)?;
        } else if (b.grow_column.matches(&key) || b.shrink_column.matches(&key))
            && headers.enable_resize_columns
        {
            let step = self.view_options.resize_step;
            let size = dt.table().column_size(&col.id);
            let next = if b.grow_column.matches(&key) {
                size.saturating_add(step)
            } else {
                size.saturating_sub(step)
            };
            if !dt.set_column_size(&col.id, next)? {
                return Ok(DataTableAction::None);
            }
        } else {
            return Ok(DataTableAction::None);
        }

        // Keep focus on the same column wherever it moved; a hidden column hands focus on.
        let layout = Layout::from_table(dt);
        let focus = layout
            .position(&col.id)
            .unwrap_or(self.focus)
            .min(layout.len().saturating_sub(1));
        self.move_focus(&layout, focus);
        Ok(DataTableAction::Redraw)
    }

    fn move_cursor(&mut self, dt: &DataTable<T>, to: usize) -> DataTableAction {
        if to == self.cursor {
            return DataTableAction::None;
        }
        self.cursor = to;
        self.ensure_cursor_visible(dt);
        DataTableAction::Redraw
    }

    fn ensure_cursor_visible(&mut self, dt: &DataTable<T>) {
        let status = dt.status(self.options.is_loading, self.options.is_error);
        let lines = self.body_lines(dt, status);
        self.state
            .set_content(self.state.content_w, lines.len() as u32);
        let Some(at) = lines
            .iter()
            .position(|l| *l == BodyLine::Row(self.cursor))
        else {
            return;
        };
        // The line above stays visible so a sticky header never covers the cursor row.
        let top = at.saturating_sub(1) as u32;
        self.state.ensure_visible_y(top, (at as u32 + 1) - top);
    }

    fn move_focus(&mut self, layout: &Layout, to: usize) -> DataTableAction {
        let changed = to != self.focus;
        self.focus = to;
        let center_start = layout.left.len();
        if (center_start..center_start + layout.center.len()).contains(&to) {
            self.rebuild_col_virtualizer(&layout.center);
            self.col_v.scroll_to_index(to - center_start, Align::Auto);
            let offset = self.col_v.scroll_offset().min(u32::MAX as u64) as u32;
            self.scroll.on_scroll(offset);
        }
        if changed {
            DataTableAction::Redraw
        } else {
            DataTableAction::None
        }
    }

    fn page_changed(&mut self, changed: bool) -> DataTableAction {
        if !changed {
            return DataTableAction::None;
        }
        self.cursor = 0;
        self.state.to_top();
        DataTableAction::Redraw
    }

    fn rebuild_col_virtualizer(&mut self, center: &[LayoutColumn]) {
        let widths: Vec<u32> = center.iter().map(|c| c.width as u32).collect();
        let widths = Arc::new(widths);
        let widths2 = widths.clone();
        let mut opts = VirtualizerOptions::new(center.len(), move |i| {
            widths2.get(i).copied().unwrap_or(1).max(1)
        });
        opts.gap = self.options.col_gap();
        opts.overscan = self.view_options.overscan_cols;
        self.col_v = Virtualizer::new(opts);
        self.col_v
            .set_viewport_size(self.state.viewport_w as u32);
        self.col_v
            .set_scroll_offset(self.scroll.scroll_left() as u64);
    }

    /// Sizes the column regions and brings the body, the scroll tracker and the header in line.
    fn sync_columns(&mut self, layout: &Layout, area: Rect, content_h: u32) -> Regions {
        let gap = self.options.col_gap();
        let left_w = pinned_width(&layout.left, gap).min(area.width);
        let right_w = pinned_width(&layout.right, gap).min(area.width - left_w);
        let center_w = area.width - left_w - right_w;

        self.state.set_viewport(center_w, area.height);
        self.rebuild_col_virtualizer(&layout.center);
        let total_w = self.col_v.total_size().min(u32::MAX as u64) as u32;
        self.state.set_content(total_w, content_h);

        self.scroll.measure(&self.state);
        self.state.x = self.scroll.scroll_left();
        self.state.clamp();
        self.col_v.set_scroll_offset(self.state.x as u64);

        self.header.set_viewport(center_w, 1);
        self.header.set_content(total_w, 1);
        self.scroll.sync(&mut self.header);
        self.col_v.collect_virtual_items(&mut self.col_items);

        Regions {
            left: Rect::new(area.x, area.y, left_w, area.height),
            center: Rect::new(area.x + left_w, area.y, center_w, area.height),
            right: Rect::new(area.x + left_w + center_w, area.y, right_w, area.height),
        }
    }

    fn body_lines(&self, dt: &DataTable<T>, status: TableStatus) -> Vec<BodyLine> {
        let mut lines = vec![BodyLine::Header];
        if !status.shows_rows() {
            if let Some(msg) = self.options.state_message.resolve(status) {
                lines.push(BodyLine::Message(msg.title, MessageRole::Title));
                if !msg.description.is_empty() {
                    lines.push(BodyLine::Message(msg.description, MessageRole::Description));
                }
                if let Some(link) = msg.support_link {
                    lines.push(BodyLine::Message(
                        format!("Contact Support: {link}"),
                        MessageRole::Link,
                    ));
                }
            }
            return lines;
        }

        for (pos, row) in dt.table().page_rows().iter().enumerate() {
            lines.push(BodyLine::Row(pos));
            if !(row.expanded && dt.table().get_row_can_expand(row)) {
                continue;
            }
            if let Some(f) = &self.render_sub_component {
                lines.extend(f(row.original).into_iter().map(BodyLine::Detail));
            }
            if let Some(f) = &self.render_sub_data_table {
                lines.extend(f(row.original).lines().into_iter().map(BodyLine::Detail));
            }
        }
        lines
    }

    fn styles(&self, theme: &Theme) -> Styles {
        let o = &self.view_options;
        let or_theme = |s: Style, fallback: Style| {
            if s == Style::default() { fallback } else { s }
        };
        Styles {
            base: or_theme(o.style, theme.text_primary),
            header: theme.header.patch(o.header_style),
            cursor: o.cursor_style.patch(theme.accent),
            focus: o.focus_style.patch(theme.accent),
            pinned: or_theme(o.pinned_style, theme.pinned),
            border: or_theme(o.border_style, theme.border),
            muted: theme.text_muted,
            accent: theme.accent,
            danger: theme.danger,
        }
    }

    fn render_table(&mut self, dt: &DataTable<T>, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let styles = self.styles(theme);
        buf.set_style(area, styles.base);

        let mut inner = area;
        if self.options.border {
            let mut block = Block::bordered().border_style(styles.border);
            if let Some(title) = &self.options.title {
                block = block.title(format!(" {title} "));
            }
            inner = block.inner(area);
            block.render(area, buf);
        } else if let Some(title) = &self.options.title {
            render::render_str_clipped(inner.x, inner.y, 0, inner.width, buf, title, styles.header);
            inner = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
        }
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let pagination_h = u16::from(self.options.pagination.show_pagination).min(inner.height);
        let footer_h = u16::from(self.options.show_footer).min(inner.height - pagination_h);
        let body_h = inner.height - pagination_h - footer_h;
        let (table_w, scrollbar_x) = if self.view_options.show_scrollbar_y && inner.width >= 2 {
            (inner.width - 1, Some(inner.x + inner.width - 1))
        } else {
            (inner.width, None)
        };
        let table_area = Rect::new(inner.x, inner.y, table_w, body_h);

        let status = dt.status(self.options.is_loading, self.options.is_error);
        let layout = Layout::from_table(dt);
        self.focus = self.focus.min(layout.len().saturating_sub(1));
        let rows = dt.table().page_rows();
        self.cursor = self.cursor.min(rows.len().saturating_sub(1));
        let lines = self.body_lines(dt, status);
        let regions = self.sync_columns(&layout, table_area, lines.len() as u32);

        let header_sticky = self.options.header_options.header_sticky;
        if header_sticky {
            self.sticky.observe(&BodyGeometry(&self.state));
        }
        let sticky = header_sticky && self.sticky.is_sticky();
        let sticky_header = BodyLine::Header;

        for dy in 0..body_h {
            let y = table_area.y + dy;
            let line = if dy == 0 && sticky {
                Some(&sticky_header)
            } else {
                lines.get(self.state.y as usize + dy as usize)
            };
            match line {
                Some(BodyLine::Header) => self.render_header(dt, &layout, regions, y, buf, styles),
                Some(BodyLine::Row(pos)) => {
                    if let Some(row) = rows.get(*pos) {
                        let style = if *pos == self.cursor {
                            styles.cursor
                        } else {
                            styles.base
                        };
                        self.render_row(dt, row, &layout, regions, y, buf, (style, styles.pinned));
                    }
                }
                Some(BodyLine::Detail(text)) => {
                    let text = format!("  {text}");
                    render::render_str_clipped(
                        table_area.x,
                        y,
                        0,
                        table_area.width,
                        buf,
                        &text,
                        styles.muted,
                    );
                }
                Some(BodyLine::Message(text, role)) => {
                    let style = match role {
                        MessageRole::Title if status == TableStatus::Error => {
                            styles.danger.add_modifier(Modifier::BOLD)
                        }
                        MessageRole::Title => styles.header,
                        MessageRole::Description => styles.muted,
                        MessageRole::Link => styles.accent.add_modifier(Modifier::UNDERLINED),
                    };
                    let text = render::center_in_width(text, table_area.width);
                    render::render_str_clipped(
                        table_area.x,
                        y,
                        0,
                        table_area.width,
                        buf,
                        &text,
                        style,
                    );
                }
                None => break,
            }
        }

        if footer_h > 0 {
            let y = inner.y + body_h;
            self.render_cells(&layout, regions, y, self.state.x, buf, |c| {
                (c.header.clone(), styles.muted)
            });
        }
        if pagination_h > 0 {
            let rect = Rect::new(inner.x, inner.y + body_h + footer_h, inner.width, 1);
            self.render_pagination(dt, rect, buf, styles);
        }
        if let Some(sb_x) = scrollbar_x {
            render::render_scrollbar(
                Rect::new(sb_x, table_area.y, 1, table_area.height),
                buf,
                &self.state,
                self.view_options.scrollbar_style.patch(styles.muted),
            );
        }
    }

    fn render_header(
        &self,
        dt: &DataTable<T>,
        layout: &Layout,
        regions: Regions,
        y: u16,
        buf: &mut Buffer,
        styles: Styles,
    ) {
        let focused = layout.all().nth(self.focus).map(|c| c.id.as_str());
        let sorting = dt.sorting();
        self.render_cells(layout, regions, y, self.header.x, buf, |c| {
            let mut text = c.header.clone();
            if let Some(s) = sorting.iter().find(|s| s.id == c.id) {
                text.push_str(if s.desc { " ▼" } else { " ▲" });
            }
            let mut style = styles.header;
            if c.pinned {
                style = style.patch(styles.pinned);
            }
            if Some(c.id.as_str()) == focused {
                style = style.patch(styles.focus);
            }
            (text, style)
        });
    }

    #[allow(clippy::too_many_arguments)]
    fn render_row(
        &self,
        dt: &DataTable<T>,
        row: &Row<'_, T>,
        layout: &Layout,
        regions: Regions,
        y: u16,
        buf: &mut Buffer,
        (style, pinned): (Style, Style),
    ) {
        let has_actions = self
            .row_actions
            .as_ref()
            .is_some_and(|f| !f(row.original).is_empty());
        self.render_cells(layout, regions, y, self.state.x, buf, |c| {
            let text = match c.kind {
                ColumnKind::Expander if row.expanded => "▾".to_string(),
                ColumnKind::Expander => "▸".to_string(),
                ColumnKind::RowActions if has_actions => " ⋮".to_string(),
                ColumnKind::RowActions => String::new(),
                ColumnKind::Data => dt
                    .table()
                    .column(&c.id)
                    .map(|col| col.cell_value(row.original))
                    .unwrap_or_default(),
            };
            let style = if c.pinned { style.patch(pinned) } else { style };
            (text, style)
        });
    }

    /// Draws one line of cells: pinned columns at the edges, center columns scrolled by
    /// `scroll_x`.
    fn render_cells(
        &self,
        layout: &Layout,
        regions: Regions,
        y: u16,
        scroll_x: u32,
        buf: &mut Buffer,
        mut cell: impl FnMut(&LayoutColumn) -> (String, Style),
    ) {
        let gap = self.options.col_gap() as u16;
        for (cols, region) in [(&layout.left, regions.left), (&layout.right, regions.right)] {
            let mut x = region.x;
            let end = region.x + region.width;
            for c in cols {
                if x >= end {
                    break;
                }
                let (text, style) = cell(c);
                let w = c.width.min(end - x);
                let text = render::fit_to_width(&text, c.width);
                render::render_str_clipped(x, y, 0, w, buf, &text, style);
                x = x.saturating_add(c.width).saturating_add(gap);
            }
        }

        let row_rect = Rect::new(regions.center.x, y, regions.center.width, 1);
        for item in self.col_items.iter().copied() {
            let Some(c) = layout.center.get(item.index) else {
                continue;
            };
            let (rect, clip_left) = clipped_rect_x(row_rect, scroll_x as u64, item.start, item.size);
            if rect.width == 0 {
                continue;
            }
            let (text, style) = cell(c);
            let text = render::fit_to_width(&text, c.width);
            render::render_str_clipped(rect.x, y, clip_left, rect.width, buf, &text, style);
        }
    }

    fn render_pagination(&self, dt: &DataTable<T>, rect: Rect, buf: &mut Buffer, styles: Styles) {
        let p = &self.options.pagination;
        let table = dt.table();
        let pagination = dt.state().pagination;

        if !p.hide_records_selector {
            let left = format!("Rows per page: {}", pagination.page_size);
            render::render_str_clipped(rect.x, rect.y, 0, rect.width, buf, &left, styles.muted);
        }

        let mut parts = Vec::new();
        if p.rows_info {
            let info = table.rows_info();
            parts.push(format!("{}-{} of {}", info.start, info.end, info.total));
        }
        let prev = if table.can_previous_page() { "‹" } else { " " };
        let next = if table.can_next_page() { "›" } else { " " };
        parts.push(format!(
            "{prev} {}/{} {next}",
            pagination.page_index + 1,
            table.page_count()
        ));
        let right = parts.join("  ");
        let w = (right.width() as u16).min(rect.width);
        render::render_str_clipped(
            rect.x + rect.width - w,
            rect.y,
            0,
            w,
            buf,
            &right,
            styles.base,
        );
    }
}

fn clipped_rect_x(area: Rect, scroll_x: u64, start: u64, size: u32) -> (Rect, u32) {
    let rel = start as i64 - scroll_x as i64;
    let clip_left = (-rel).max(0) as u32;
    let x = rel.max(0).min(area.width as i64) as u16;
    let max_w = area.width.saturating_sub(x);
    let visible_w = size.saturating_sub(clip_left).min(max_w as u32) as u16;
    (
        Rect::new(area.x + x, area.y, visible_w, area.height),
        clip_left,
    )
}
