//! Per-column value statistics, label-correlation tracking, and one-hot
//! encoding helpers.
//!
//! Counts live in `BTreeMap`s so the one-hot encoder gets its indicator
//! columns in lexicographic value order for free; the analyzer report
//! re-sorts descending by count where required.

use parking_lot::{Mutex, MutexGuard};
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::io::{self, Write};

/// Observed statistics for a single column.
#[derive(Debug, Default)]
pub struct ColumnStats {
    counts: BTreeMap<String, u64>,
    matches_label: bool,
    value_to_label: HashMap<String, String>,
    label_to_value: HashMap<String, String>,
}

impl ColumnStats {
    /// Creates an empty column table with label tracking armed.
    #[must_use]
    pub fn new() -> Self {
        Self { matches_label: true, ..Self::default() }
    }

    /// Records one observation of `value`.
    pub fn record(&mut self, value: &str) {
        match self.counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(value.to_string(), 1);
            }
        }
    }

    /// Records one observation of `value` together with the row's label,
    /// maintaining the sticky 1:1 flag: the first time this value maps to a
    /// different label, or this label to a different value, the flag clears
    /// and never resets.
    pub fn record_with_label(&mut self, value: &str, label: &str) {
        self.record(value);
        if !self.matches_label {
            return;
        }
        if let Some(seen_label) = self.value_to_label.get(value) {
            if seen_label != label {
                self.matches_label = false;
                return;
            }
        } else {
            self.value_to_label.insert(value.to_string(), label.to_string());
        }
        if let Some(seen_value) = self.label_to_value.get(label) {
            if seen_value != value {
                self.matches_label = false;
            }
        } else {
            self.label_to_value.insert(label.to_string(), value.to_string());
        }
    }

    /// True while every observed value corresponds 1:1 with the label.
    #[must_use]
    pub fn matches_label(&self) -> bool {
        self.matches_label
    }

    /// Number of distinct values observed.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Value -> count map, in lexicographic value order.
    #[must_use]
    pub fn counts(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }

    /// (value, count) pairs, descending by count; ties break lexicographic.
    #[must_use]
    pub fn by_descending_count(&self) -> Vec<(&str, u64)> {
        let mut pairs: Vec<(&str, u64)> =
            self.counts.iter().map(|(v, &c)| (v.as_str(), c)).collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        pairs
    }

    /// Values whose count, scaled by `1 + threshold`, still falls short of
    /// the most frequent value's count. Only meaningful for low-cardinality
    /// columns; the analyzer applies it to columns with 2 or 3 values.
    #[must_use]
    pub fn imbalanced_values(&self, threshold: f64) -> Vec<(&str, u64, u64)> {
        let Some(&max) = self.counts.values().max() else {
            return Vec::new();
        };
        self.counts
            .iter()
            .filter(|(_, &count)| (count as f64) * (1.0 + threshold) < max as f64)
            .map(|(value, &count)| (value.as_str(), count, max))
            .collect()
    }
}

/// Statistics for every column of a file, one lock per column so workers on
/// different columns never contend.
pub struct StatsTable {
    columns: Vec<Mutex<ColumnStats>>,
}

impl StatsTable {
    /// Creates a table with `num_columns` empty column entries.
    #[must_use]
    pub fn new(num_columns: usize) -> Self {
        Self { columns: (0..num_columns).map(|_| Mutex::new(ColumnStats::new())).collect() }
    }

    /// Number of columns tracked.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Records `value` for `column`.
    pub fn record(&self, column: usize, value: &str) {
        self.columns[column].lock().record(value);
    }

    /// Records `value` for `column` with the row's label.
    pub fn record_with_label(&self, column: usize, value: &str, label: &str) {
        self.columns[column].lock().record_with_label(value, label);
    }

    /// Locks and returns one column's statistics. Meant for the report phase,
    /// after all workers have joined.
    pub fn column(&self, index: usize) -> MutexGuard<'_, ColumnStats> {
        self.columns[index].lock()
    }
}

/// Appends one-hot indicator fields to a row: one `0`/`1` field per distinct
/// value, in the (lexicographic) order of `values`.
pub fn append_indicators(row: &mut String, values: &[String], target_value: &str) {
    for value in values {
        row.push(',');
        row.push(if value == target_value { '1' } else { '0' });
    }
}

/// Appends the one-hot header columns, named `<column>.<value>`, in the same
/// order as [`append_indicators`] emits fields.
pub fn append_indicator_header(header: &mut String, column_name: &str, values: &[String]) {
    for value in values {
        header.push(',');
        header.push_str(column_name);
        header.push('.');
        header.push_str(value);
    }
}

/// Writes the analyzer's plain-text report.
///
/// Sections: columns perfectly 1:1 with the label (possible leakage),
/// single-valued columns, severely imbalanced values among 2-3-valued
/// columns, and a full descending-by-count dump per column.
pub fn write_report<W: Write>(
    out: &mut W,
    header: &[String],
    table: &StatsTable,
    label_column: Option<usize>,
    imbalance_threshold: f64,
) -> io::Result<()> {
    writeln!(out, "# csvmill analyze report")?;
    writeln!(out, "# columns: {}", header.len())?;

    if let Some(label_idx) = label_column {
        writeln!(out)?;
        writeln!(out, "## Columns matching label '{}' 1:1 (possible leakage)", header[label_idx])?;
        let mut any = false;
        for (i, name) in header.iter().enumerate() {
            if i == label_idx {
                continue;
            }
            if table.column(i).matches_label() {
                writeln!(out, "{name}")?;
                any = true;
            }
        }
        if !any {
            writeln!(out, "(none)")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "## Single-valued columns (no information)")?;
    let mut any = false;
    for (i, name) in header.iter().enumerate() {
        if table.column(i).distinct() == 1 {
            writeln!(out, "{name}")?;
            any = true;
        }
    }
    if !any {
        writeln!(out, "(none)")?;
    }

    writeln!(out)?;
    writeln!(out, "## Severely imbalanced values (threshold {imbalance_threshold})")?;
    any = false;
    for (i, name) in header.iter().enumerate() {
        let stats = table.column(i);
        if !(2..=3).contains(&stats.distinct()) {
            continue;
        }
        for (value, count, max) in stats.imbalanced_values(imbalance_threshold) {
            writeln!(out, "{name}: value '{value}' count {count} vs max {max}")?;
            any = true;
        }
    }
    if !any {
        writeln!(out, "(none)")?;
    }

    writeln!(out)?;
    writeln!(out, "## Value counts (descending)")?;
    for (i, name) in header.iter().enumerate() {
        writeln!(out, "### {name}")?;
        for (value, count) in table.column(i).by_descending_count() {
            writeln!(out, "{value},{count}")?;
        }
    }
    Ok(())
}
