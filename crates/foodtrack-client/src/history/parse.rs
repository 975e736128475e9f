use crate::history::records::{ConsumptionRecord, PurchaseRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRows<T> {
    pub records: Vec<T>,
    pub dropped_rows: usize,
}

impl<T> Default for ParsedRows<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            dropped_rows: 0,
        }
    }
}

/// Rows are `food,quantity,purchase_date[,expiry_date]`.
pub fn parse_purchase_rows(content: &[u8]) -> ParsedRows<PurchaseRecord> {
    parse_rows(content, |record| {
        PurchaseRecord::from_raw(
            field(record, 0),
            field(record, 1),
            field(record, 2),
            field(record, 3),
        )
    })
}

/// Rows are `food,quantity,consumption_date`.
pub fn parse_consumption_rows(content: &[u8]) -> ParsedRows<ConsumptionRecord> {
    parse_rows(content, |record| {
        ConsumptionRecord::from_raw(field(record, 0), field(record, 1), field(record, 2))
    })
}

fn parse_rows<T, F>(content: &[u8], build: F) -> ParsedRows<T>
where
    F: Fn(&csv::StringRecord) -> T,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut parsed = ParsedRows::default();
    for (row_index, result_row) in reader.records().enumerate() {
        let Ok(record) = result_row else {
            parsed.dropped_rows += 1;
            continue;
        };
        if row_index == 0 && looks_like_header_row(&record) {
            continue;
        }
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        parsed.records.push(build(&record));
    }

    parsed
}

fn field(record: &csv::StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

// A record for a food literally named "food" still carries a numeric quantity.
fn looks_like_header_row(record: &csv::StringRecord) -> bool {
    let names_food = field(record, 0).trim().eq_ignore_ascii_case("food");
    let numeric_quantity = field(record, 1).trim().parse::<f64>().is_ok();
    names_food && !numeric_quantity
}
