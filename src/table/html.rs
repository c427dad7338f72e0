use scraper::{ElementRef, Html};

use super::{ParseError, Table};

/// Extract every non-blank `<table>` of an HTML document, in document order.
///
/// Nested tables are reported as tables of their own; a table's rows never
/// include the rows of a table nested inside it. Header names come from
/// `<thead>` rows, or from leading rows made only of `<th>` cells. `colspan`
/// and `rowspan` are expanded so that every row has one cell per column.
pub fn read_html(document: &str) -> Result<Vec<Table>, ParseError> {
    let html = Html::parse_document(document);

    let tables: Vec<Table> = html
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "table")
        .filter(|el| el.text().any(|t| !t.trim().is_empty()))
        .map(parse_table)
        .collect();

    if tables.is_empty() {
        return Err(ParseError::NoTables);
    }
    Ok(tables)
}

struct RawCell {
    text: String,
    colspan: usize,
    rowspan: usize,
}

fn parse_table(table: ElementRef<'_>) -> Table {
    let mut head = Vec::new();
    let mut body = Vec::new();
    let mut foot = Vec::new();

    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => body.push(child),
            "thead" => head.extend(child_rows(child)),
            "tbody" => body.extend(child_rows(child)),
            "tfoot" => foot.extend(child_rows(child)),
            _ => {}
        }
    }

    if head.is_empty() {
        while body.first().is_some_and(|row| is_all_th(*row)) {
            head.push(body.remove(0));
        }
    }

    let header = expand_spans(head.into_iter().map(row_cells).collect());
    let mut rows = expand_spans(body.into_iter().map(row_cells).collect());
    rows.extend(expand_spans(foot.into_iter().map(row_cells).collect()));
    rows.retain(|row| row.iter().any(|cell| !cell.is_empty()));

    Table::new(header_names(&header), rows)
}

fn child_rows(section: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    section
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "tr")
}

fn cell_elements(row: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "td" | "th"))
}

fn is_all_th(row: ElementRef<'_>) -> bool {
    let mut cells = cell_elements(row).peekable();
    cells.peek().is_some() && cells.all(|cell| cell.value().name() == "th")
}

fn row_cells(row: ElementRef<'_>) -> Vec<RawCell> {
    cell_elements(row)
        .map(|cell| RawCell {
            text: normalize_text(cell),
            colspan: span_attr(cell, "colspan"),
            rowspan: span_attr(cell, "rowspan"),
        })
        .collect()
}

fn normalize_text(cell: ElementRef<'_>) -> String {
    let text: String = cell.text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn span_attr(cell: ElementRef<'_>, name: &str) -> usize {
    cell.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1)
}

/// Lay cells out on a grid, repeating spanned cells across columns and rows.
fn expand_spans(rows: Vec<Vec<RawCell>>) -> Vec<Vec<String>> {
    let mut grid = Vec::with_capacity(rows.len());
    // (column, text, rows still to fill), sorted by column
    let mut carried: Vec<(usize, String, usize)> = Vec::new();

    for row in rows {
        let mut expanded: Vec<String> = Vec::new();
        let mut next: Vec<(usize, String, usize)> = Vec::new();
        let mut pending = carried.into_iter().peekable();
        let mut cells = row.into_iter();

        loop {
            if let Some((col, text, remaining)) =
                pending.next_if(|(col, _, _)| *col == expanded.len())
            {
                expanded.push(text.clone());
                if remaining > 1 {
                    next.push((col, text, remaining - 1));
                }
                continue;
            }

            let Some(cell) = cells.next() else { break };
            for _ in 0..cell.colspan {
                if cell.rowspan > 1 {
                    next.push((expanded.len(), cell.text.clone(), cell.rowspan - 1));
                }
                expanded.push(cell.text.clone());
            }
        }

        // Spans reaching past the last cell of this row.
        for (col, text, remaining) in pending {
            while expanded.len() < col {
                expanded.push(String::new());
            }
            expanded.push(text.clone());
            if remaining > 1 {
                next.push((expanded.len() - 1, text, remaining - 1));
            }
        }

        next.sort_by_key(|(col, _, _)| *col);
        carried = next;
        grid.push(expanded);
    }

    grid
}

/// Collapse one or more header rows into a single name per column.
fn header_names(header: &[Vec<String>]) -> Vec<String> {
    let width = header.iter().map(Vec::len).max().unwrap_or(0);

    (0..width)
        .map(|col| {
            let mut parts: Vec<&str> = Vec::new();
            for row in header {
                if let Some(name) = row.get(col).filter(|n| !n.is_empty()) {
                    if parts.last() != Some(&name.as_str()) {
                        parts.push(name);
                    }
                }
            }
            if parts.is_empty() {
                col.to_string()
            } else {
                parts.join(" ")
            }
        })
        .collect()
}
