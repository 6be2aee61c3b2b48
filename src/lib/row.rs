//! Row representation and delimited-text primitives.
//!
//! A [`Row`] is one quote-stripped line of input plus its destination tag.
//! Exactly one pipeline stage owns a row at any time; ownership moves
//! source -> pending queue -> worker -> output queue -> writer.

/// Field delimiter for all csvmill tools.
pub const DELIMITER: char = ',';

/// Destination tag for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The primary output sink.
    Normal,
    /// The optional secondary sink (filtered-out rows, split-off rows).
    Secondary,
}

/// One delimited line of input text plus its destination tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// The raw delimited line, quote-stripped.
    pub data: String,
    /// Where the row is headed.
    pub route: Route,
}

impl Row {
    /// Creates a row destined for the normal sink.
    #[must_use]
    pub fn new(data: String) -> Self {
        Self { data, route: Route::Normal }
    }

    /// Approximate heap footprint, used by the source watermark.
    #[must_use]
    pub fn heap_size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Returns the field at `index` (zero-based), or `None` if the row has fewer
/// fields than that.
#[must_use]
pub fn field_at(row: &str, index: usize) -> Option<&str> {
    row.split(DELIMITER).nth(index)
}

/// Number of delimited fields in a row. An empty string still counts as one
/// (empty) field, matching how the writer round-trips rows.
#[must_use]
pub fn field_count(row: &str) -> usize {
    row.split(DELIMITER).count()
}

/// Splits a header row into column names, stripping quotes per element.
#[must_use]
pub fn split_header(header: &str) -> Vec<String> {
    header.split(DELIMITER).map(strip_quotes).collect()
}

/// True if the string looks numeric: non-empty and composed only of digits
/// plus optional `-`, `.` and `e`. Deliberately loose; callers that need an
/// actual number still have to parse.
#[must_use]
pub fn is_numeric(value: &str) -> bool {
    !value.is_empty()
        && value.chars().all(|c| c.is_ascii_digit() || c == '-' || c == '.' || c == 'e')
}

/// Strips quote characters (`"` and `'`) from a line.
///
/// A quote pair that encloses text containing a space is preserved; every
/// other quote character is removed.
#[must_use]
pub fn strip_quotes(line: &str) -> String {
    if line.is_empty() {
        return String::new();
    }
    let stripped = strip_quote_char(line.to_string(), '"');
    strip_quote_char(stripped, '\'')
}

fn strip_quote_char(mut line: String, quote: char) -> String {
    let mut from = 0;
    while let Some(rel) = line[from..].find(quote) {
        let pos = from + rel;
        let rest = pos + quote.len_utf8();
        let closing = line[rest..].find(quote).map(|c| rest + c);
        if let Some(close) = closing {
            if line[rest..close].contains(' ') {
                // Quotes enclosing a space stay; skip past the pair.
                from = close + quote.len_utf8();
                continue;
            }
        }
        line.remove(pos);
        from = pos;
    }
    line
}
