//! Column discovery and header/row reconciliation.
//!
//! The full field vocabulary is only known after every row has been visited,
//! so rows are first built as structured cell lists in which the optional ID
//! and Raw-HTML sub-columns of a field appear as *pending* slots. Once the
//! scan is complete, [`ColumnRegistry::header`] fixes the final column set
//! and [`ColumnRegistry::materialize`] resolves every draft row against it:
//! a pending slot becomes an absent-value cell exactly when its sub-column
//! exists in the header, and disappears otherwise. Rows that never visited a
//! field (possible while the all-fields scan is still discovering columns)
//! are padded the same way, so every materialized row has exactly the
//! header's cell count.
//!
//! A registry is private to one export invocation; reusing it across calls
//! would corrupt the first-seen column ordering.

/// Cell text standing in for a value that does not exist on an item.
pub const ABSENT_CELL: &str = "n/a";

/// The two optional sub-columns a field may materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubColumn {
    Id,
    Raw,
}

/// A phase-1 cell: either final text or a slot whose fate depends on the
/// final column set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Value(String),
    Pending { field: String, slot: SubColumn },
}

/// One discovered column: display name, first-seen position, and which
/// sub-columns some occurrence has confirmed as relevant.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub field_name: String,
    /// Confirmed by an occurrence whose field kind carries a linked id.
    pub id_column: bool,
    /// Confirmed by an occurrence whose field kind carries a raw value.
    pub raw_column: bool,
    /// False while the field has only ever been seen absent.
    pub resolved: bool,
}

/// Tracks discovered columns in first-seen order.
#[derive(Debug, Default)]
pub struct ColumnRegistry {
    specs: Vec<ColumnSpec>,
}

/// A phase-1 row: structured cells plus the number of leading field groups
/// (in registry order) it covered.
#[derive(Debug, Clone, Default)]
pub struct RowDraft {
    cells: Vec<Cell>,
    fields_covered: usize,
}

impl RowDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_value(&mut self, value: impl Into<String>) {
        self.cells.push(Cell::Value(value.into()));
    }

    pub fn push_pending(&mut self, field: &str, slot: SubColumn) {
        self.cells.push(Cell::Pending {
            field: field.to_string(),
            slot,
        });
    }

    /// Record that one more field group (in running field-list order) has
    /// been serialized into this row.
    pub fn field_done(&mut self) {
        self.fields_covered += 1;
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl ColumnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field seen absent on the current row. Creates an
    /// unresolved spec if the field was never seen before; an already
    /// resolved spec is left untouched.
    pub fn register_absent(&mut self, field: &str) {
        if self.position(field).is_none() {
            self.specs.push(ColumnSpec {
                field_name: field.to_string(),
                id_column: false,
                raw_column: false,
                resolved: false,
            });
        }
    }

    /// Register a present occurrence of a field and the sub-columns its kind
    /// carries. Upgrades a previously-absent spec in place; the column's
    /// position never changes.
    pub fn confirm(&mut self, field: &str, id_column: bool, raw_column: bool) {
        match self.position(field) {
            Some(index) => {
                let spec = &mut self.specs[index];
                spec.resolved = true;
                spec.id_column |= id_column;
                spec.raw_column |= raw_column;
            }
            None => self.specs.push(ColumnSpec {
                field_name: field.to_string(),
                id_column,
                raw_column,
                resolved: true,
            }),
        }
    }

    fn position(&self, field: &str) -> Option<usize> {
        self.specs.iter().position(|spec| spec.field_name == field)
    }

    pub fn specs(&self) -> &[ColumnSpec] {
        &self.specs
    }

    fn id_materialized(&self, spec: &ColumnSpec, include_ids: bool) -> bool {
        include_ids && spec.id_column
    }

    fn raw_materialized(&self, spec: &ColumnSpec, include_raw: bool) -> bool {
        include_raw && spec.raw_column
    }

    /// Final header: static labels, then per discovered field its name and
    /// any materialized `<field> ID` / `<field> HTML` sub-columns, in
    /// first-seen order.
    pub fn header(
        &self,
        static_labels: &[&str],
        include_ids: bool,
        include_raw: bool,
    ) -> Vec<String> {
        let mut header: Vec<String> = static_labels.iter().map(|label| (*label).to_string()).collect();
        for spec in &self.specs {
            header.push(spec.field_name.clone());
            if self.id_materialized(spec, include_ids) {
                header.push(format!("{} ID", spec.field_name));
            }
            if self.raw_materialized(spec, include_raw) {
                header.push(format!("{} HTML", spec.field_name));
            }
        }
        header
    }

    /// Resolve a draft row against the final column set, producing exactly
    /// one cell per header column.
    pub fn materialize(&self, draft: &RowDraft, include_ids: bool, include_raw: bool) -> Vec<String> {
        let mut row = Vec::new();
        for cell in draft.cells() {
            match cell {
                Cell::Value(value) => row.push(value.clone()),
                Cell::Pending { field, slot } => {
                    let Some(index) = self.position(field) else {
                        continue;
                    };
                    let spec = &self.specs[index];
                    let exists = match slot {
                        SubColumn::Id => self.id_materialized(spec, include_ids),
                        SubColumn::Raw => self.raw_materialized(spec, include_raw),
                    };
                    if exists {
                        row.push(ABSENT_CELL.to_string());
                    }
                }
            }
        }
        // Columns discovered after this row was built.
        for spec in &self.specs[draft.fields_covered..] {
            row.push(ABSENT_CELL.to_string());
            if self.id_materialized(spec, include_ids) {
                row.push(ABSENT_CELL.to_string());
            }
            if self.raw_materialized(spec, include_raw) {
                row.push(ABSENT_CELL.to_string());
            }
        }
        row
    }
}
