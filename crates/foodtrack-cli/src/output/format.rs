use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

impl<'a> Column<'a> {
    pub const fn left(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Left,
        }
    }

    pub const fn right(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Right,
        }
    }
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const MIN_COLUMN_WIDTH: usize = 6;

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(120);
    cmp::max(from_env, 40)
}

/// Kilograms as shown in text output.
pub fn format_kg(value: f64) -> String {
    format!("{value:.2}")
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Renders an aligned table, or one labelled block per row when the
/// terminal is too narrow for every header.
pub fn render_table_or_blocks(
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    max_width: usize,
    block_label: &str,
) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let budget = max_width
        .saturating_sub(INDENT)
        .saturating_sub(COLUMN_GAP * (columns.len() - 1));
    let Some(widths) = fit_widths(columns, rows, budget) else {
        return render_blocks(columns, rows, block_label);
    };

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_line(columns, &header, &widths)];

    for row in rows {
        let wrapped = widths
            .iter()
            .enumerate()
            .map(|(index, width)| wrap_cell(row.get(index).map_or("", String::as_str), *width))
            .collect::<Vec<Vec<String>>>();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);

        for line in 0..height {
            let cells = wrapped
                .iter()
                .map(|chunks| chunks.get(line).cloned().unwrap_or_default())
                .collect::<Vec<String>>();
            output.push(format_line(columns, &cells, &widths));
        }
    }

    output
}

// Shrinks the widest column one character at a time until the table fits.
fn fit_widths(columns: &[Column<'_>], rows: &[Vec<String>], budget: usize) -> Option<Vec<usize>> {
    let minimums = columns
        .iter()
        .map(|column| cmp::max(column.name.chars().count(), MIN_COLUMN_WIDTH))
        .collect::<Vec<usize>>();
    if minimums.iter().sum::<usize>() > budget {
        return None;
    }

    let mut widths = minimums.clone();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, cell.chars().count());
            }
        }
    }

    let mut total = widths.iter().sum::<usize>();
    while total > budget {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > minimums[*index])
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index)?;
        widths[widest] -= 1;
        total -= 1;
    }

    Some(widths)
}

fn format_line(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .zip(widths)
        .zip(cells)
        .map(|((column, &width), value)| match column.align {
            Align::Left => format!("{value:<width$}"),
            Align::Right => format!("{value:>width$}"),
        })
        .collect::<Vec<String>>();

    format!("{}{}", " ".repeat(INDENT), pieces.join(&" ".repeat(COLUMN_GAP)))
        .trim_end()
        .to_string()
}

fn wrap_cell(value: &str, width: usize) -> Vec<String> {
    if width == 0 || value.chars().count() <= width {
        return vec![value.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in value.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        let chars = word.chars().collect::<Vec<char>>();
        let mut chunks = chars.chunks(width).map(|chunk| chunk.iter().collect::<String>());
        let last = chunks.next_back().unwrap_or_default();
        lines.extend(chunks);
        current = last;
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn render_blocks(columns: &[Column<'_>], rows: &[Vec<String>], block_label: &str) -> Vec<String> {
    let labels = columns
        .iter()
        .map(|column| format!("{}:", column.name))
        .collect::<Vec<String>>();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);

    let mut output = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        if row_index > 0 {
            output.push(String::new());
        }
        output.push(format!("  {block_label} {}:", row_index + 1));
        for (column_index, label) in labels.iter().enumerate() {
            let value = row.get(column_index).cloned().unwrap_or_default();
            output.push(format!("    {label:<label_width$}  {value}"));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::{Column, format_kg, key_value_rows, render_table_or_blocks, wrap_cell};

    fn forecast_columns() -> [Column<'static>; 3] {
        [
            Column::left("Food"),
            Column::right("Surplus (kg)"),
            Column::left("Nearest expiry"),
        ]
    }

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Food:", "Apple".to_string()),
                ("Quantity (kg):", "2.50".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Food:           Apple");
        assert_eq!(rows[1], "  Quantity (kg):  2.50");
    }

    #[test]
    fn table_aligns_numbers_right() {
        let rows = vec![
            vec!["Apple".to_string(), format_kg(7.5), "2024-01-10".to_string()],
            vec!["Rice".to_string(), format_kg(12.25), "none".to_string()],
        ];

        let rendered = render_table_or_blocks(&forecast_columns(), &rows, 80, "Food");
        assert_eq!(rendered.len(), 3);
        assert!(rendered[0].starts_with("  Food "));
        assert!(rendered[1].contains("        7.50  2024-01-10"));
        assert!(rendered[2].contains("       12.25  none"));
    }

    #[test]
    fn long_food_names_wrap_without_truncating() {
        let rows = vec![vec![
            "Wholemeal bread rolls from the local bakery".to_string(),
            format_kg(3.0),
            "none".to_string(),
        ]];

        let rendered = render_table_or_blocks(&forecast_columns(), &rows, 48, "Food");
        assert!(rendered.len() > 2);
        let joined = rendered.join(" ");
        assert!(joined.contains("Wholemeal"));
        assert!(joined.contains("bakery"));
        assert!(joined.contains("3.00"));
    }

    #[test]
    fn narrow_width_falls_back_to_blocks() {
        let rows = vec![vec!["Apple".to_string(), format_kg(7.5), "none".to_string()]];

        let rendered = render_table_or_blocks(&forecast_columns(), &rows, 20, "Food");
        assert_eq!(rendered[0], "  Food 1:");
        assert!(rendered[1].contains("Food:"));
        assert!(rendered[2].contains("Surplus (kg):"));
        assert!(rendered[3].contains("Nearest expiry:"));
    }

    #[test]
    fn wrap_cell_splits_unicode_tokens_safely() {
        assert_eq!(
            wrap_cell("éééééééé", 3),
            vec!["ééé".to_string(), "ééé".to_string(), "éé".to_string()]
        );
    }
}
