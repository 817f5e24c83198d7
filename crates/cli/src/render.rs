use comfy_table::{Cell, CellAlignment, Table};
use subaudit_core::ParseResult;
use subaudit_detect::Catalog;

const EMPTY_STATE: &str = "No Subscriptions Found\n\
Try uploading a different statement or check our supported services (`subaudit catalog`).";

pub fn summary(result: &ParseResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Monthly Potential Spend", "Active Subscriptions", "Yearly Projection"]);
    table.add_row(vec![
        Cell::new(result.total_spend),
        Cell::new(result.count()),
        Cell::new(result.annual_projection()),
    ]);
    table.add_row(vec![
        Cell::new(format!("{} rows scanned", result.raw_count)),
        Cell::new("Detected services"),
        Cell::new("Est. Annual Cost"),
    ]);
    table
}

/// Monthly spend per category, in the order categories first appear.
pub fn categories(result: &ParseResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Category", "Monthly", "Yearly"]);
    for (category, spend) in result.spend_by_category() {
        table.add_row(vec![
            Cell::new(category),
            Cell::new(spend).set_alignment(CellAlignment::Right),
            Cell::new(spend.annualized()).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn subscriptions(result: &ParseResult) -> String {
    if result.is_empty() {
        return EMPTY_STATE.to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["Service", "Date", "Category", "Amount", "Status"]);
    for sub in &result.subscriptions {
        table.add_row(vec![
            Cell::new(&sub.description),
            Cell::new(&sub.date),
            Cell::new(sub.category),
            Cell::new(sub.amount).set_alignment(CellAlignment::Right),
            Cell::new("Active"),
        ]);
    }
    format!("Detected Subscriptions\n{table}")
}

pub fn catalog_table(catalog: &Catalog) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Service", "Category", "Patterns"]);
    for (idx, rule) in catalog.rules().iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&rule.name),
            Cell::new(rule.category),
            Cell::new(rule.patterns.join(", ")),
        ]);
    }
    table
}
