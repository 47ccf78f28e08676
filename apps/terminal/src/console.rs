//! # Operator Console
//!
//! A line-oriented front end over the command functions.
//!
//! ```text
//! barista> start
//! Shift started (27 ingredients)
//! barista> add Iced Latte 16oz
//!   1. Iced Latte 16oz                  90.00
//!      TOTAL                            90.00
//! barista> pay
//! Receipt 1714554300  90.00  Iced Latte 16oz
//! barista> count Milk 8.5
//! Milk counted at 8.50 (8500 raw)
//! barista> end
//! Report written: /var/lib/barista/reports/Report_2024-05-01_17-00.csv
//! ```
//!
//! Product and ingredient names contain spaces, so sizes, quantities and
//! prices are always the trailing words of a line.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use barista_core::{OrderSession, RecipeBook, ShiftManager, UnitConverter};
use barista_store::{load_or_seed, JsonFileStore, ReportWriter};
use tracing::{debug, info};

use crate::commands::{self, CartResponse};
use crate::config::TerminalConfig;
use crate::error::{ApiError, StartupError};
use crate::state::{CartState, CatalogState, LedgerState, ShiftLogState, StoreState};

const HELP: &str = "\
Commands:
  status                          shift state and sales so far
  start                           start a shift
  end                             export the report and end the shift
  menu [CATEGORY]                 list products and prices
  add PRODUCT SIZE                add a product to the cart
  remove N                        remove cart line N
  cart                            show the cart
  cancel                          empty the cart
  pay                             check out the cart
  stock                           stock levels (start / now)
  count INGREDIENT QTY            record a physical count in bulk units
  price PRODUCT SIZE AMOUNT       change a price
  receipts                        receipts of this shift
  quit                            leave the console";

/// What the loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

pub struct Console {
    name: String,
    cart: CartState,
    ledger: LedgerState,
    shift: ShiftLogState,
    catalog: CatalogState,
    store: StoreState,
}

impl Console {
    /// Opens the data directory from `config` and restores the last state.
    pub fn open(config: &TerminalConfig) -> Result<Self, StartupError> {
        let store = JsonFileStore::open(&config.storage.data_dir)?;
        let reports = ReportWriter::new(&config.storage.report_dir);
        let store = StoreState::new(Arc::new(store), reports).with_utc_offset(config.utc_offset());
        Self::restore(&config.terminal.name, store)
    }

    /// Loads (or seeds) every document through `store` and builds the
    /// state handles.
    pub fn restore(name: &str, store: StoreState) -> Result<Self, StartupError> {
        let loaded = load_or_seed(store.persistence())?;

        let shift = ShiftManager::restore(loaded.baseline, loaded.receipts);
        let order = OrderSession::with_last_receipt_id(shift.last_receipt_id().unwrap_or(0));

        Ok(Console {
            name: name.to_string(),
            cart: CartState::new(order),
            ledger: LedgerState::new(loaded.ledger, UnitConverter::defaults(), RecipeBook::defaults()),
            shift: ShiftLogState::new(shift),
            catalog: CatalogState::new(loaded.catalog),
            store,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reads commands from `input` until EOF or `quit`.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "{} ready. Type 'help' for commands.", self.name)?;
        write!(output, "{}> ", self.name)?;
        output.flush()?;

        for line in input.lines() {
            match self.handle(&line?) {
                Outcome::Quit => break,
                Outcome::Continue(text) => {
                    if !text.is_empty() {
                        writeln!(output, "{text}")?;
                    }
                }
            }
            write!(output, "{}> ", self.name)?;
            output.flush()?;
        }

        info!("Console closed");
        Ok(())
    }

    /// Runs one line, turning errors into printable text.
    pub fn handle(&self, line: &str) -> Outcome {
        match self.execute(line) {
            Ok(outcome) => outcome,
            Err(err) => Outcome::Continue(err.to_string()),
        }
    }

    pub fn execute(&self, line: &str) -> Result<Outcome, ApiError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&verb, args)) = words.split_first() else {
            return Ok(Outcome::Continue(String::new()));
        };
        debug!(verb, args = args.len(), "Console command");

        let text = match verb.to_ascii_lowercase().as_str() {
            "quit" | "exit" => return Ok(Outcome::Quit),
            "help" => HELP.to_string(),
            "status" => self.status(),
            "start" => {
                let started = commands::start_shift(&self.ledger, &self.shift, &self.store)?;
                format!("Shift started ({} ingredients)", started.ingredients)
            }
            "end" => {
                let closed = commands::end_shift(&self.ledger, &self.shift, &self.store)?;
                format!(
                    "Report written: {}\n{} receipts, {} total",
                    closed.report_path.display(),
                    closed.receipt_count,
                    closed.sales_total
                )
            }
            "menu" => self.menu(args)?,
            "add" => {
                let (product, size) = split_trailing(args, 1, "add PRODUCT SIZE")?;
                let cart =
                    commands::add_to_cart(&self.cart, &self.catalog, None, &product, size[0])?;
                render_cart(&cart)
            }
            "remove" => {
                let position = args
                    .first()
                    .and_then(|n| n.parse::<usize>().ok())
                    .ok_or_else(|| ApiError::validation("Usage: remove N"))?;
                render_cart(&commands::remove_from_cart(&self.cart, position)?)
            }
            "cart" => render_cart(&commands::get_cart(&self.cart)),
            "cancel" => {
                commands::cancel_order(&self.cart);
                "Order cancelled".to_string()
            }
            "pay" => {
                let sold =
                    commands::checkout(&self.cart, &self.ledger, &self.shift, &self.store)?;
                format!(
                    "Receipt {}  {}  {}",
                    sold.receipt_id,
                    sold.total,
                    sold.items.join(", ")
                )
            }
            "stock" => self.stock(),
            "count" => {
                let (ingredient, qty) = split_trailing(args, 1, "count INGREDIENT QTY")?;
                let count = commands::count_stock(
                    &self.ledger,
                    &self.shift,
                    &self.store,
                    &ingredient,
                    qty[0],
                )?;
                format!(
                    "{} counted at {:.2} ({} raw)",
                    count.ingredient, count.counted_units, count.raw
                )
            }
            "price" => {
                let (product, rest) = split_trailing(args, 2, "price PRODUCT SIZE AMOUNT")?;
                let category = self
                    .catalog
                    .with_catalog(|c| c.find_category(&product).map(str::to_string))
                    .ok_or_else(|| ApiError::not_found("Product", &product))?;
                let change = commands::set_price(
                    &self.catalog,
                    &self.store,
                    &category,
                    &product,
                    rest[0],
                    rest[1],
                )?;
                format!(
                    "{} {} {} → {}",
                    change.product, change.size, change.old_price, change.new_price
                )
            }
            "receipts" => self.receipts(),
            other => return Err(ApiError::validation(format!("Unknown command '{other}'"))),
        };

        Ok(Outcome::Continue(text))
    }

    fn status(&self) -> String {
        let status = commands::shift_status(&self.shift);
        let cart = commands::get_cart(&self.cart);
        format!(
            "{}: shift {:?}, {} receipts, {} sales, {} lines in cart",
            self.name,
            status.state,
            status.receipt_count,
            status.sales_total,
            cart.lines.len()
        )
    }

    fn menu(&self, args: &[&str]) -> Result<String, ApiError> {
        let category = (!args.is_empty()).then(|| args.join(" "));
        let menu = commands::menu_view(&self.catalog, category.as_deref())?;

        let mut out = String::new();
        for category in menu {
            let _ = writeln!(out, "{}", category.name);
            for item in category.items {
                let sizes: Vec<String> = item
                    .sizes
                    .iter()
                    .map(|(size, price)| format!("{size} {price}"))
                    .collect();
                let _ = writeln!(out, "  {:<28} {}", item.product, sizes.join("  "));
            }
        }
        Ok(out.trim_end().to_string())
    }

    fn stock(&self) -> String {
        let mut out = format!("{:<24} {:>10} {:>10}", "Item", "Start", "Now");
        for row in commands::inventory_view(&self.ledger, &self.shift) {
            let _ = write!(
                out,
                "\n{:<24} {:>10.2} {:>10.2}",
                row.name, row.start_units, row.current_units
            );
        }
        out
    }

    fn receipts(&self) -> String {
        let rows = commands::receipts_view(&self.shift, &self.store);
        if rows.is_empty() {
            return "No receipts this shift".to_string();
        }
        rows.iter()
            .map(|r| format!("{}  {}  {:>8}  {}", r.id, r.date, r.total.to_string(), r.summary))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Splits `args` into a leading name (joined with spaces) and the last
/// `trailing` words.
fn split_trailing<'a>(
    args: &[&'a str],
    trailing: usize,
    usage: &str,
) -> Result<(String, Vec<&'a str>), ApiError> {
    if args.len() <= trailing {
        return Err(ApiError::validation(format!("Usage: {usage}")));
    }
    let (name, tail) = args.split_at(args.len() - trailing);
    Ok((name.join(" "), tail.to_vec()))
}

fn render_cart(cart: &CartResponse) -> String {
    if cart.lines.is_empty() {
        return "Cart is empty".to_string();
    }
    let mut out = String::new();
    for line in &cart.lines {
        let label = format!("{} {}", line.product, line.size);
        let _ = writeln!(out, "{:>3}. {:<30} {:>8}", line.position, label, line.price.to_string());
    }
    let _ = write!(out, "     {:<30} {:>8}", "TOTAL", cart.total.to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use barista_core::{DocumentKind, InventoryLedger, Persistence};
    use barista_store::MemoryStore;
    use tempfile::TempDir;

    fn console() -> (Console, Arc<MemoryStore>, TempDir) {
        let memory = Arc::new(MemoryStore::new());
        let reports = TempDir::new().unwrap();
        let store = StoreState::new(memory.clone(), ReportWriter::new(reports.path()));
        let console = Console::restore("barista", store).unwrap();
        (console, memory, reports)
    }

    fn text(outcome: Outcome) -> String {
        match outcome {
            Outcome::Continue(text) => text,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_split_trailing() {
        let (name, tail) = split_trailing(&["Iced", "Latte", "16oz"], 1, "").unwrap();
        assert_eq!(name, "Iced Latte");
        assert_eq!(tail, vec!["16oz"]);
        assert!(split_trailing(&["16oz"], 1, "add PRODUCT SIZE").is_err());
    }

    #[test]
    fn test_first_run_seeds_store() {
        let (_console, memory, _reports) = console();
        assert!(memory.document(DocumentKind::Inventory).is_some());
        assert!(memory.document(DocumentKind::Catalog).is_some());
    }

    #[test]
    fn test_full_shift_through_console() {
        let (console, memory, reports) = console();

        assert!(text(console.handle("start")).starts_with("Shift started"));
        assert!(text(console.handle("add Iced Latte 16oz")).contains("90.00"));
        assert!(text(console.handle("add Americano 12oz")).contains("150.00"));
        assert!(text(console.handle("pay")).contains("Iced Latte 16oz, Americano 12oz"));
        assert!(text(console.handle("count Milk 8.5")).starts_with("Milk counted at 8.50"));
        assert!(text(console.handle("receipts")).contains("Iced Latte 16oz, Americano 12oz"));

        let ended = text(console.handle("end"));
        assert!(ended.starts_with("Report written:"), "{ended}");
        assert_eq!(std::fs::read_dir(reports.path()).unwrap().count(), 1);
        assert!(memory.document(DocumentKind::ShiftStart).is_none());
    }

    #[test]
    fn test_errors_are_printed_not_fatal() {
        let (console, _memory, _reports) = console();

        assert_eq!(text(console.handle("end")), "[SHIFT_ERROR] No shift is open");
        assert_eq!(text(console.handle("pay")), "[SHIFT_ERROR] No shift is open");
        console.handle("start");
        assert_eq!(text(console.handle("pay")), "[CART_ERROR] Cart is empty");
        assert!(text(console.handle("dance")).starts_with("[VALIDATION_ERROR]"));
        assert!(text(console.handle("add 16oz")).contains("Usage"));
    }

    #[test]
    fn test_price_change_through_console() {
        let (console, _memory, _reports) = console();

        let out = text(console.handle("price Americano 12oz 65"));

        assert_eq!(out, "Americano 12oz 60.00 → 65.00");
        assert!(text(console.handle("menu HOT COFFEE")).contains("12oz 65.00"));
    }

    #[test]
    fn test_restart_resumes_open_shift() {
        let memory = Arc::new(MemoryStore::new());
        let reports = TempDir::new().unwrap();
        let first = Console::restore(
            "barista",
            StoreState::new(memory.clone(), ReportWriter::new(reports.path())),
        )
        .unwrap();
        first.handle("start");
        first.handle("add Americano 12oz");
        let paid = text(first.handle("pay"));
        drop(first);

        let second = Console::restore(
            "barista",
            StoreState::new(memory.clone(), ReportWriter::new(reports.path())),
        )
        .unwrap();

        assert!(text(second.handle("status")).contains("shift Open, 1 receipts"));
        assert!(text(second.handle("receipts")).contains(paid.split_whitespace().nth(1).unwrap()));
        let stock = memory.load_ledger().unwrap().unwrap();
        assert_eq!(stock.get("Beans"), InventoryLedger::defaults().get("Beans").map(|b| b - 18.0));

        // a new sale gets an id past the restored one
        second.handle("add Americano 12oz");
        assert!(text(second.handle("pay")).starts_with("Receipt"));
        assert_eq!(
            commands::receipts_view(&second.shift, &second.store).len(),
            2
        );
    }

    #[test]
    fn test_run_loop_stops_at_quit() {
        let (console, _memory, _reports) = console();
        let input = b"status\nquit\nstart\n" as &[u8];
        let mut output = Vec::new();

        console.run(input, &mut output).unwrap();

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("shift Closed"));
        assert!(!printed.contains("Shift started"));
        assert_eq!(console.execute("quit").unwrap(), Outcome::Quit);
    }
}
