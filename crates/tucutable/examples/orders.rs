//! Interactive orders table whose layout persists between runs.
//!
//! State is written to `$TUCUTABLE_DIR` (default `.tucutable` in the working directory) and logs
//! go to `tucutable.log` there. Set `RUST_LOG=tucutable_core=debug` to see state transitions.

use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use tucutable::column::ColumnDef;
use tucutable::context::DataTableContext;
use tucutable::crossterm_input::input_event_from_crossterm;
use tucutable::data_table::DataTable;
use tucutable::help::HelpBar;
use tucutable::help::HelpBarOptions;
use tucutable::input::InputEvent;
use tucutable::input::KeyCode;
use tucutable::options::DataTableOptions;
use tucutable::options::HeaderOptions;
use tucutable::settings::SettingsStore;
use tucutable::state::RowId;
use tucutable::status::StateMessage;
use tucutable::storage::FileStorage;
use tucutable::storage::Storage;
use tucutable::store::TableStores;
use tucutable::theme::Theme;
use tucutable::view::DataTableAction;
use tucutable::view::DataTableView;
use tucutable::view::SubTable;

#[derive(Clone, Debug)]
struct Order {
    id: u32,
    customer: String,
    status: &'static str,
    amount: f64,
    items: Vec<(&'static str, u32)>,
}

fn sample_orders() -> Vec<Order> {
    let customers = ["Ada", "Grace", "Linus", "Barbara", "Ken", "Margaret", "Dennis"];
    let statuses = ["paid", "pending", "refunded", "shipped"];
    (1..=37)
        .map(|id| Order {
            id,
            customer: customers[id as usize % customers.len()].to_string(),
            status: statuses[id as usize % statuses.len()],
            amount: (id * 1375 % 9000) as f64 / 10.0,
            items: vec![("SKU-100", id % 3 + 1), ("SKU-220", id % 5)],
        })
        .collect()
}

fn columns() -> Vec<ColumnDef<Order>> {
    vec![
        ColumnDef::new("id", "Order", |o: &Order| format!("#{:04}", o.id)).size(8),
        ColumnDef::new("customer", "Customer", |o: &Order| o.customer.clone()).size(14),
        ColumnDef::new("status", "Status", |o: &Order| o.status.to_string()).size(10),
        ColumnDef::new("amount", "Amount", |o: &Order| format!("{:.2}", o.amount))
            .size(10)
            .sort_by(|a: &Order, b: &Order| a.amount.total_cmp(&b.amount)),
        ColumnDef::new("note", "Note", |o: &Order| {
            format!("{} item(s) for {}", o.items.len(), o.customer)
        })
        .size(28)
        .sortable(false),
    ]
}

fn state_dir() -> PathBuf {
    std::env::var_os("TUCUTABLE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".tucutable"))
}

fn init_logging(dir: &std::path::Path) -> io::Result<()> {
    let file = std::fs::File::create(dir.join("tucutable.log"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let dir = state_dir();
    let storage: Rc<dyn Storage> = match FileStorage::open(&dir) {
        Ok(s) => Rc::new(s),
        Err(e) => {
            eprintln!("cannot open {}: {e}", dir.display());
            return Ok(());
        }
    };
    init_logging(&dir)?;
    info!(dir = %dir.display(), "starting orders demo");

    let mut settings = SettingsStore::new(storage.clone());
    let stores = TableStores::new(storage);

    let options = DataTableOptions {
        title: Some("Orders".to_string()),
        header_options: HeaderOptions::default(),
        show_footer: false,
        ..Default::default()
    };
    let mut table = DataTable::new(
        stores,
        "orders",
        sample_orders(),
        columns(),
        |o: &Order, _: usize| RowId::new(o.id.to_string()),
    );
    if let Some(pagination) = options.initial_pagination() {
        table = table.with_initial_pagination(pagination);
    }
    if let Some(config) = &options.initial_config {
        table = table.with_initial_config(config);
    }

    let ctx = DataTableContext::provide(table);
    let mut view = DataTableView::new(ctx.clone(), options)
        .row_actions(|o: &Order| {
            vec![
                format!("Open #{}", o.id),
                "Refund".to_string(),
                "Archive".to_string(),
            ]
        })
        .render_sub_component(|o: &Order| {
            vec![format!("Customer: {} · {}", o.customer, o.status)]
        })
        .render_sub_data_table(|o: &Order| {
            SubTable::new(
                vec!["SKU".into(), "Qty".into()],
                o.items
                    .iter()
                    .map(|(sku, qty)| vec![sku.to_string(), qty.to_string()])
                    .collect(),
            )
        });
    view.options_mut().state_message.empty = Some(StateMessage {
        title: "No orders yet".to_string(),
        description: "Orders show up here once customers check out.".to_string(),
        support_link: None,
    });

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &mut view, &ctx, &mut settings);

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    view: &mut DataTableView<Order>,
    ctx: &DataTableContext<Order>,
    settings: &mut SettingsStore,
) -> io::Result<()> {
    let mut status_line = String::new();
    loop {
        let theme = Theme::for_mode(settings.theme_mode());
        terminal.draw(|f| {
            let area = f.area();
            if area.height < 3 || area.width == 0 {
                return;
            }
            let table_area = Rect::new(area.x, area.y, area.width, area.height.saturating_sub(2));
            let status_area = Rect::new(area.x, area.y + table_area.height, area.width, 1);
            let help_area = Rect::new(area.x, status_area.y + 1, area.width, 1);
            let buf = f.buffer_mut();

            if let Err(e) = view.render(table_area, buf, &theme) {
                warn!(error = %e, "table render failed");
            }
            buf.set_stringn(
                status_area.x,
                status_area.y,
                &status_line,
                status_area.width as usize,
                theme.text_muted,
            );
            let mut bindings: Vec<_> = view.bindings().help().into_iter().cloned().collect();
            bindings.push(tucutable::keymap::Binding::new("t", "theme", Vec::new()));
            bindings.push(tucutable::keymap::Binding::new("q", "quit", Vec::new()));
            HelpBar::with_options(
                bindings,
                HelpBarOptions {
                    style: theme.text_muted,
                    key_style: theme.accent,
                    ..Default::default()
                },
            )
            .render_ref(help_area, buf);
        })?;

        if !crossterm::event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Some(ev) = input_event_from_crossterm(crossterm::event::read()?) else {
            continue;
        };
        if let InputEvent::Key(key) = &ev {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('t') => {
                    let mode = settings.toggle_theme_mode();
                    status_line = format!("theme: {mode:?}");
                    continue;
                }
                KeyCode::Char('L') => {
                    let loading = !view.options().is_loading;
                    view.set_loading(loading);
                    continue;
                }
                KeyCode::Char('E') => {
                    let error = !view.options().is_error;
                    view.set_error(error);
                    continue;
                }
                KeyCode::Char('D') => {
                    let empty = ctx.with(|t| t.table().data().is_empty()).unwrap_or(false);
                    let data = if empty { sample_orders() } else { Vec::new() };
                    if let Err(e) = ctx.with_mut(|t| t.set_data(data)) {
                        warn!(error = %e, "cannot replace rows");
                    }
                    continue;
                }
                _ => {}
            }
        }

        match view.handle_event(ev) {
            Ok(DataTableAction::RowActions { row, actions }) => {
                status_line = format!("order {row}: {}", actions.join(" | "));
            }
            Ok(DataTableAction::ContactSupport(link)) => {
                status_line = format!("support: {link}");
            }
            Ok(DataTableAction::Redraw | DataTableAction::None) => {}
            Err(e) => {
                warn!(error = %e, "table event failed");
                status_line = e.to_string();
            }
        }
    }
}
