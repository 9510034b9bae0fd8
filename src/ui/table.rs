use std::cmp::Ordering;

use tabled::builder::Builder;
use tabled::{Table, Tabled, settings::Style};

use crate::metric::{Entry, Metric};
use crate::timestamp::DISPLAY_FORMAT;

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// Two-column label/value table, used for summaries
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Column an entries table is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortKey {
    #[default]
    Date,
    Value,
    Id,
}

/// Order entries in place; ties keep their stored order
pub fn sort_entries(entries: &mut [Entry], key: SortKey, descending: bool) {
    entries.sort_by(|a, b| {
        let ord = match key {
            SortKey::Date => a.created_at.cmp(&b.created_at),
            SortKey::Value => a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal),
            SortKey::Id => a.id.cmp(&b.id),
        };
        if descending { ord.reverse() } else { ord }
    });
}

/// Render entries as an `Id | Date | <Metric> (<unit>)` table
pub fn entries_table(metric: Metric, entries: &[Entry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut builder = Builder::default();
    builder.push_record([
        "Id".to_string(),
        "Date".to_string(),
        format!("{} ({})", metric.label(), metric.unit()),
    ]);
    for entry in entries {
        builder.push_record([
            entry.id.to_string(),
            entry.created_at.format(DISPLAY_FORMAT).to_string(),
            format!("{:.2}", entry.value),
        ]);
    }

    builder.build().with(Style::rounded()).to_string()
}
