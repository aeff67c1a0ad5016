use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::{
    error::FetchError,
    text_manipulators::{extract_text, normalize_decimal},
};

static TABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("static selector"));
static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("static selector"));
static CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("static selector"));
static HEADER_CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th, td").expect("static selector"));

/// Where the price sits inside the first table of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellLocator {
    /// Fixed zero-based row and `td` column.
    Position { row: usize, column: usize },
    /// Column found by matching the text of a header cell in the first row.
    HeaderLabel { label: String, row: usize },
}

impl Default for CellLocator {
    fn default() -> Self {
        CellLocator::Position { row: 1, column: 3 }
    }
}

/// Pulls the raw price number out of a price page.
pub fn scrape_price(html: &str, locator: &CellLocator) -> Result<f64, FetchError> {
    let document = Html::parse_document(html);
    let text = extract_price_text(&document, locator)?;
    parse_price(&text)
}

pub fn extract_price_text(document: &Html, locator: &CellLocator) -> Result<String, FetchError> {
    let table = document
        .select(&TABLE_SELECTOR)
        .next()
        .ok_or(FetchError::TableNotFound)?;
    let rows: Vec<ElementRef> = table.select(&ROW_SELECTOR).collect();

    // Label lookups count row-header <th> cells too, so the column lines up with the header row.
    let (row, column, cell_selector) = match locator {
        CellLocator::Position { row, column } => (*row, *column, &*CELL_SELECTOR),
        CellLocator::HeaderLabel { label, row } => (
            *row,
            find_labelled_column(&rows, label)?,
            &*HEADER_CELL_SELECTOR,
        ),
    };

    let Some(price_row) = rows.get(row) else {
        return Err(FetchError::TooFewRows {
            found: rows.len(),
            needed: row.saturating_add(1),
        });
    };
    let cells: Vec<ElementRef> = price_row.select(cell_selector).collect();
    let Some(price_cell) = cells.get(column) else {
        return Err(FetchError::CellOutOfBounds {
            row,
            column,
            found: cells.len(),
        });
    };
    Ok(extract_text(*price_cell))
}

fn find_labelled_column(rows: &[ElementRef], label: &str) -> Result<usize, FetchError> {
    let wanted = label.trim().to_lowercase();
    rows.first()
        .and_then(|header| {
            header
                .select(&HEADER_CELL_SELECTOR)
                .position(|cell| extract_text(cell).trim().to_lowercase() == wanted)
        })
        .ok_or_else(|| FetchError::ColumnLabelNotFound {
            label: label.to_string(),
        })
}

/// Parses cell text such as `"0,1234"` as a decimal number.
pub fn parse_price(text: &str) -> Result<f64, FetchError> {
    let normalized = normalize_decimal(text);
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FetchError::InvalidNumber {
            text: text.trim().to_string(),
        }),
    }
}
