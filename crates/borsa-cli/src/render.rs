//! Terminal tables

use borsa_gateway::{HistoricalData, LogoUrls, Quote, QuoteDetails};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header.to_vec());
    table
}

fn number(value: f64) -> Cell {
    Cell::new(format!("{value:.2}")).set_alignment(CellAlignment::Right)
}

fn signed(value: f64) -> Cell {
    Cell::new(format!("{value:+.2}")).set_alignment(CellAlignment::Right)
}

fn percent(value: f64) -> Cell {
    Cell::new(format!("{value:+.2}%")).set_alignment(CellAlignment::Right)
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

pub fn quotes(quotes: &[Quote]) -> Table {
    let mut table = table(&["Symbol", "Name", "Price", "Change", "Change %", "Volume"]);
    for q in quotes {
        table.add_row(vec![
            Cell::new(&q.symbol),
            Cell::new(&q.name),
            number(q.price),
            signed(q.change),
            percent(q.change_percent),
            Cell::new(q.volume).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// One row per tracked symbol; symbols without a quote are marked unavailable
pub fn tracked(symbols: &[String], quotes: &[Quote]) -> Table {
    let mut table = table(&["Symbol", "Name", "Price", "Change %"]);
    for symbol in symbols {
        match quotes.iter().find(|q| &q.symbol == symbol) {
            Some(q) => table.add_row(vec![
                Cell::new(symbol),
                Cell::new(&q.name),
                number(q.price),
                percent(q.change_percent),
            ]),
            None => table.add_row(vec![
                Cell::new(symbol),
                Cell::new("unavailable"),
                Cell::new("-"),
                Cell::new("-"),
            ]),
        };
    }
    table
}

pub fn details(details: &QuoteDetails) -> Table {
    let mut table = table(&["Field", "Value"]);
    let rows = [
        ("Symbol", details.symbol.clone()),
        ("Name", details.name.clone()),
        ("Price", format!("{:.2}", details.price)),
        ("Change", format!("{:+.2} ({:+.2}%)", details.change, details.change_percent)),
        ("Sector", details.sector.clone().unwrap_or_else(|| "-".into())),
        ("Industry", details.industry.clone().unwrap_or_else(|| "-".into())),
        ("Market cap", optional(details.market_cap)),
        ("P/E", optional(details.pe_ratio)),
        ("52w high", optional(details.fifty_two_week_high)),
        ("52w low", optional(details.fifty_two_week_low)),
        (
            "Avg volume",
            details
                .average_volume
                .map_or_else(|| "-".into(), |v| v.to_string()),
        ),
    ];
    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value]);
    }
    table
}

pub fn history(data: &HistoricalData) -> Table {
    let mut table = table(&["Date", "Open", "High", "Low", "Close", "Volume"]);
    for p in &data.quotes {
        table.add_row(vec![
            Cell::new(p.date.format("%Y-%m-%d")),
            number(p.open),
            number(p.high),
            number(p.low),
            number(p.close),
            Cell::new(p.volume).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn logo(symbol: &str, urls: &LogoUrls) -> Table {
    let mut table = table(&["Symbol", "Primary", "Fallback"]);
    table.add_row(vec![symbol, urls.primary.as_str(), urls.fallback.as_str()]);
    table
}

/// Two quotes side by side with the difference of the second against the first
pub fn compare(first: &Quote, second: &Quote) -> Table {
    let mut table = table(&[
        "",
        first.symbol.as_str(),
        second.symbol.as_str(),
        "Difference",
    ]);
    table.add_row(vec![
        Cell::new("Name"),
        Cell::new(&first.name),
        Cell::new(&second.name),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Price"),
        number(first.price),
        number(second.price),
        signed(second.price - first.price),
    ]);
    table.add_row(vec![
        Cell::new("Change %"),
        percent(first.change_percent),
        percent(second.change_percent),
        signed(second.change_percent - first.change_percent),
    ]);
    table.add_row(vec![
        Cell::new("Volume"),
        Cell::new(first.volume),
        Cell::new(second.volume),
        Cell::new(i128::from(second.volume) - i128::from(first.volume)),
    ]);
    table
}
