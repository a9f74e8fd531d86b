use std::fmt;

// ---------------------------------------------------------------------------
// Schema – positional column layout of one input file
// ---------------------------------------------------------------------------

/// Positional column layout of a `.data` file produced by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// Short name used in log and error messages.
    pub name: &'static str,
    /// Column names in file order.
    pub columns: &'static [&'static str],
}

impl Schema {
    /// Number of columns every data row must carry.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Position of a named column.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.columns.join(", "))
    }
}

/// `kicks.data`: one row per sampled natal kick.
pub const KICKS_SCHEMA: Schema = Schema {
    name: "kicks",
    columns: &["id", "w", "theta", "phi"],
};

/// `orbits.data`: one row per binary that survives the kick.
pub const ORBITS_SCHEMA: Schema = Schema {
    name: "orbits",
    columns: &["id", "w", "theta", "phi", "period", "separation", "eccentricity"],
};

/// `grid.data`: one row per populated period × eccentricity cell.
pub const GRID_SCHEMA: Schema = Schema {
    name: "grid",
    columns: &["id", "period", "separation", "eccentricity", "probability"],
};

// ---------------------------------------------------------------------------
// Table – a fully loaded file, column-oriented
// ---------------------------------------------------------------------------

/// A numeric table held column by column.
/// All columns have the same length; row `i` is `columns[c][i]` for every `c`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub schema: Schema,
    columns: Vec<Vec<f64>>,
}

impl Table {
    /// Empty table with one (empty) column per schema entry.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            columns: vec![Vec::new(); schema.width()],
        }
    }

    /// Append one row. The caller guarantees `row.len() == schema.width()`.
    pub(crate) fn push_row(&mut self, row: &[f64]) {
        debug_assert_eq!(row.len(), self.columns.len());
        for (column, &value) in self.columns.iter_mut().zip(row) {
            column.push(value);
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow a column by name.
    #[cfg(test)]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.schema
            .position(name)
            .map(|idx| self.columns[idx].as_slice())
    }

    /// Move a column out by name, leaving an empty column behind.
    fn take_column(&mut self, name: &str) -> Vec<f64> {
        self.schema
            .position(name)
            .map(|idx| std::mem::take(&mut self.columns[idx]))
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Typed column selections handed to the renderer
// ---------------------------------------------------------------------------

/// Natal kick samples: strength and the two direction angles.
#[derive(Debug, Clone, PartialEq)]
pub struct KickTable {
    /// Kick strength.
    pub w: Vec<f64>,
    /// Azimuthal angle.
    pub theta: Vec<f64>,
    /// Polar angle.
    pub phi: Vec<f64>,
}

impl From<Table> for KickTable {
    fn from(mut table: Table) -> Self {
        Self {
            w: table.take_column("w"),
            theta: table.take_column("theta"),
            phi: table.take_column("phi"),
        }
    }
}

impl KickTable {
    pub fn len(&self) -> usize {
        self.w.len()
    }
}

/// Orbital period / eccentricity pairs, from either `orbits.data` or `grid.data`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitTable {
    /// Orbital period in days.
    pub period: Vec<f64>,
    pub eccentricity: Vec<f64>,
}

impl From<Table> for OrbitTable {
    fn from(mut table: Table) -> Self {
        Self {
            period: table.take_column("period"),
            eccentricity: table.take_column("eccentricity"),
        }
    }
}

impl OrbitTable {
    pub fn len(&self) -> usize {
        self.period.len()
    }

    /// `(period, eccentricity)` pairs in row order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.period
            .iter()
            .copied()
            .zip(self.eccentricity.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_positions_follow_file_layout() {
        assert_eq!(KICKS_SCHEMA.width(), 4);
        assert_eq!(ORBITS_SCHEMA.width(), 7);
        assert_eq!(GRID_SCHEMA.width(), 5);
        assert_eq!(ORBITS_SCHEMA.position("period"), Some(4));
        assert_eq!(ORBITS_SCHEMA.position("eccentricity"), Some(6));
        assert_eq!(GRID_SCHEMA.position("period"), Some(1));
        assert_eq!(GRID_SCHEMA.position("eccentricity"), Some(3));
        assert_eq!(KICKS_SCHEMA.position("nope"), None);
    }

    #[test]
    fn selection_picks_columns_by_position() {
        let mut table = Table::new(GRID_SCHEMA);
        table.push_row(&[0.0, 10.0, 50.0, 0.2, 0.01]);
        table.push_row(&[1.0, 20.0, 80.0, 0.4, 0.02]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.column("probability"), Some(&[0.01, 0.02][..]));

        let orbits = OrbitTable::from(table);
        assert_eq!(orbits.len(), 2);
        assert_eq!(orbits.period, vec![10.0, 20.0]);
        assert_eq!(orbits.eccentricity, vec![0.2, 0.4]);
        assert_eq!(orbits.points().collect::<Vec<_>>(), vec![(10.0, 0.2), (20.0, 0.4)]);
    }

    #[test]
    fn empty_table_reports_zero_rows() {
        let table = Table::new(KICKS_SCHEMA);
        assert!(table.is_empty());
        let kicks = KickTable::from(table);
        assert_eq!(kicks.len(), 0);
    }
}
