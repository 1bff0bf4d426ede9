//! A settings-screen style table driven entirely from the console.
//!
//! Implements [`ListWidget`] and [`TableCell`] against stdout so the whole
//! model/binding/reconciliation flow can be watched without a GUI host:
//! structural mutations print the widget operations a real host would
//! receive, and an off-thread property change lands through the
//! controller's dispatcher queue.
//!
//! Run with `RUST_LOG=rowbind=trace` to see the binding layer's own logs.

use std::sync::Arc;

use parking_lot::Mutex;
use rowbind::prelude::*;

/// A "cell" that renders property pushes as console text.
struct ConsoleCell {
    slot: CellSlot,
    title: Mutex<Option<String>>,
    detail: Mutex<Option<String>>,
}

impl ConsoleCell {
    fn new() -> Self {
        Self {
            slot: CellSlot::new(),
            title: Mutex::new(None),
            detail: Mutex::new(None),
        }
    }

    fn render(&self) -> String {
        let title = self.title.lock().clone().unwrap_or_default();
        match self.detail.lock().clone() {
            Some(detail) => format!("{title}  ({detail})"),
            None => title,
        }
    }
}

impl TableCell for ConsoleCell {
    fn slot(&self) -> &CellSlot {
        &self.slot
    }

    fn apply(&self, property: CellProperty, value: Option<&PropertyValue>) {
        let text = value.and_then(|v| v.as_str()).map(str::to_string);
        match property {
            CellProperty::Title => *self.title.lock() = text,
            CellProperty::Detail => *self.detail.lock() = text,
            _ => {}
        }
    }
}

struct ConsoleHeader;

impl HeaderFooterView for ConsoleHeader {
    fn set_title(&self, text: Option<&str>, _rich: Option<&RichText>) {
        if let Some(text) = text {
            println!("== {text} ==");
        }
    }

    fn set_detail(&self, _text: Option<&str>, _rich: Option<&RichText>) {}
}

/// A live widget that narrates every structural call it receives.
struct ConsoleWidget {
    sections: Mutex<Vec<usize>>,
    visible: Mutex<Vec<(IndexPath, Arc<ConsoleCell>)>>,
}

impl ConsoleWidget {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            sections: Mutex::new(vec![0]),
            visible: Mutex::new(Vec::new()),
        })
    }

    /// The concrete cell last dequeued for `path`.
    fn console_cell(&self, path: IndexPath) -> Option<Arc<ConsoleCell>> {
        self.visible
            .lock()
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, cell)| cell.clone())
    }
}

impl ListWidget for ConsoleWidget {
    fn is_live(&self) -> bool {
        true
    }

    fn section_count(&self) -> usize {
        self.sections.lock().len()
    }

    fn row_count(&self, section: usize) -> usize {
        self.sections.lock().get(section).copied().unwrap_or(0)
    }

    fn register_cell_type(&self, _reuse_id: &str) {}

    fn register_header_footer_type(&self, _reuse_id: &str) {}

    fn dequeue_cell(&self, _reuse_id: &str, index_path: IndexPath) -> Arc<dyn TableCell> {
        let cell = Arc::new(ConsoleCell::new());
        let mut visible = self.visible.lock();
        visible.retain(|(path, _)| *path != index_path);
        visible.push((index_path, cell.clone()));
        cell
    }

    fn dequeue_header_footer(&self, _reuse_id: &str) -> Arc<dyn HeaderFooterView> {
        Arc::new(ConsoleHeader)
    }

    fn begin_updates(&self) {
        println!("[widget] begin updates");
    }

    fn end_updates(&self) {
        println!("[widget] end updates");
    }

    fn insert_rows(&self, paths: &[IndexPath], animation: RowAnimation) {
        let mut sections = self.sections.lock();
        for path in paths {
            if let Some(count) = sections.get_mut(path.section) {
                *count += 1;
            }
        }
        println!("[widget] insert rows {paths:?} ({animation:?})");
    }

    fn delete_rows(&self, paths: &[IndexPath], animation: RowAnimation) {
        let mut sections = self.sections.lock();
        for path in paths {
            if let Some(count) = sections.get_mut(path.section) {
                *count = count.saturating_sub(1);
            }
        }
        println!("[widget] delete rows {paths:?} ({animation:?})");
    }

    fn insert_sections(&self, indices: &[usize], animation: RowAnimation) {
        let mut sections = self.sections.lock();
        for &index in indices {
            let len = sections.len();
            sections.insert(index.min(len), 0);
        }
        println!("[widget] insert sections {indices:?} ({animation:?})");
    }

    fn delete_sections(&self, indices: &[usize], animation: RowAnimation) {
        let mut sections = self.sections.lock();
        for &index in indices {
            if index < sections.len() {
                sections.remove(index);
            }
        }
        println!("[widget] delete sections {indices:?} ({animation:?})");
    }

    fn cell_at(&self, path: IndexPath) -> Option<Arc<dyn TableCell>> {
        self.console_cell(path).map(|cell| cell as Arc<dyn TableCell>)
    }

    fn deselect_row(&self, path: IndexPath, _animated: bool) {
        println!("[widget] deselect {path:?}");
    }

    fn reload(&self) {
        println!("[widget] reload");
    }
}

fn print_table(controller: &TableController<ConsoleWidget>) {
    println!("---");
    for section in 0..controller.number_of_sections() {
        if let Some(title) = controller.title_for_header(section) {
            println!("== {title} ==");
        }
        for row in 0..controller.number_of_rows(section) {
            let path = IndexPath::new(section, row);
            controller.cell_for_row(path);
            if let Some(cell) = controller.widget().console_cell(path) {
                println!("  {}", cell.render());
            }
        }
    }
    println!("---");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rowbind=debug".into()),
        )
        .init();

    let widget = ConsoleWidget::new();
    let controller = TableController::new(widget, TableData::new());

    let network = TableSection::with_title("Network");
    let wifi = TableItem::with_text("Wi-Fi", Some("Connected"));
    wifi.set_selection_callback(|context| {
        println!("selected row {:?}", context.index_path());
        context.deselect(true);
    });
    network.add_item(wifi.clone());
    network.add_item(TableItem::with_text("Bluetooth", Some("Off")));
    controller
        .add_section(network, RowAnimation::Automatic)
        .expect("section insert");

    controller
        .append_item(
            TableItem::with_text("Cellular", Some("5G")),
            RowAnimation::Fade,
        )
        .expect("row append");

    print_table(&controller);

    // A worker thread flips the Wi-Fi status; the change is queued and only
    // lands when the owner thread drains the dispatcher.
    let worker = wifi.clone();
    std::thread::spawn(move || worker.set_detail(Some("Searching...".into())))
        .join()
        .expect("worker thread");

    let wifi_cell = controller
        .widget()
        .console_cell(IndexPath::zero())
        .expect("Wi-Fi cell is on screen");
    println!("before drain: {}", wifi_cell.render());
    let applied = controller.process_pending();
    println!("after drain ({applied} applied): {}", wifi_cell.render());

    controller.did_select_row(IndexPath::zero());
}
