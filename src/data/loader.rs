use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{KickTable, OrbitTable, Schema, Table, GRID_SCHEMA, KICKS_SCHEMA, ORBITS_SCHEMA};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a `.data` file could not be loaded. Line numbers are 1-based and
/// count the header.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: file is empty, expected a header line", path.display())]
    MissingHeader { path: PathBuf },

    #[error("{}:{line}: expected {expected} columns, found {found}", path.display())]
    ColumnCount {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{}:{line}: column {column}: '{token}' is not a number", path.display())]
    InvalidNumber {
        path: PathBuf,
        line: usize,
        column: usize,
        token: String,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load `kicks.data`-shaped files: id, w, theta, phi.
pub fn load_kicks(path: &Path) -> Result<KickTable, LoadError> {
    load_table(path, KICKS_SCHEMA).map(KickTable::from)
}

/// Load `orbits.data`-shaped files and keep period / eccentricity.
pub fn load_orbits(path: &Path) -> Result<OrbitTable, LoadError> {
    load_table(path, ORBITS_SCHEMA).map(OrbitTable::from)
}

/// Load `grid.data`-shaped files and keep period / eccentricity.
pub fn load_grid(path: &Path) -> Result<OrbitTable, LoadError> {
    load_table(path, GRID_SCHEMA).map(OrbitTable::from)
}

/// Read a whitespace-delimited numeric table.
///
/// Layout:
/// * line 1 is a header and is skipped without being parsed
/// * blank lines are ignored, `#` starts a comment
/// * every other line holds exactly `schema.width()` floats separated by
///   any amount of whitespace
pub fn load_table(path: &Path, schema: Schema) -> Result<Table, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_table(&text, schema, path)?;
    if table.is_empty() {
        log::warn!("{} has a header but no data rows", path.display());
    }
    log::info!(
        "Loaded {} rows from {} as {}",
        table.len(),
        path.display(),
        schema
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn parse_table(text: &str, schema: Schema, path: &Path) -> Result<Table, LoadError> {
    let mut lines = text.lines().enumerate();
    if lines.next().is_none() {
        return Err(LoadError::MissingHeader {
            path: path.to_path_buf(),
        });
    }

    let mut table = Table::new(schema);
    let mut row = Vec::with_capacity(schema.width());

    for (idx, raw) in lines {
        let line_no = idx + 1;
        let content = raw.split('#').next().unwrap_or("");
        if content.trim().is_empty() {
            continue;
        }

        row.clear();
        for (column, token) in content.split_whitespace().enumerate() {
            let value = token
                .parse::<f64>()
                .map_err(|_| LoadError::InvalidNumber {
                    path: path.to_path_buf(),
                    line: line_no,
                    column,
                    token: token.to_string(),
                })?;
            row.push(value);
        }

        if row.len() != schema.width() {
            return Err(LoadError::ColumnCount {
                path: path.to_path_buf(),
                line: line_no,
                expected: schema.width(),
                found: row.len(),
            });
        }
        table.push_row(&row);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::{NamedTempFile, TempDir};

    use super::*;

    fn write_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn kicks_yield_three_aligned_columns() {
        let file = write_file(
            "                  id                   w               theta                 phi\n\
                              0           265.12345             1.20000             3.10000\n\
                              1            80.50000             0.40000             5.90000\n\
                              2           410.00000             2.80000             0.70000\n",
        );
        let kicks = load_kicks(file.path()).unwrap();
        assert_eq!(kicks.len(), 3);
        assert_eq!(kicks.w, vec![265.12345, 80.5, 410.0]);
        assert_eq!(kicks.theta, vec![1.2, 0.4, 2.8]);
        assert_eq!(kicks.phi, vec![3.1, 5.9, 0.7]);
    }

    #[test]
    fn orbits_keep_period_and_eccentricity() {
        let file = write_file(
            "id w theta phi period separation eccentricity\n\
             3 100.0 1.0 2.0 12.5 40.0 0.3\n\
             7 150.0 0.5 1.0 250.0 300.0 0.9\n",
        );
        let orbits = load_orbits(file.path()).unwrap();
        assert_eq!(orbits.period, vec![12.5, 250.0]);
        assert_eq!(orbits.eccentricity, vec![0.3, 0.9]);
    }

    #[test]
    fn grid_keeps_period_and_eccentricity() {
        let file = write_file(
            "id period separation eccentricity probability\n\
             0 4.0 20.0 0.05 0.001\n",
        );
        let grid = load_grid(file.path()).unwrap();
        assert_eq!(grid.period, vec![4.0]);
        assert_eq!(grid.eccentricity, vec![0.05]);
    }

    #[test]
    fn header_is_skipped_even_if_numeric() {
        let file = write_file("1 2 3 4\n5 6 7 8\n");
        let kicks = load_kicks(file.path()).unwrap();
        assert_eq!(kicks.w, vec![6.0]);
    }

    #[test]
    fn blank_lines_and_comments_are_ignored() {
        let file = write_file("id w theta phi\n\n# comment\n0 1 2 3 # trailing\n   \n");
        let kicks = load_kicks(file.path()).unwrap();
        assert_eq!(kicks.len(), 1);
        assert_eq!(kicks.phi, vec![3.0]);
    }

    #[test]
    fn header_only_gives_empty_table() {
        let file = write_file("id w theta phi\n");
        let kicks = load_kicks(file.path()).unwrap();
        assert_eq!(kicks.len(), 0);
    }

    #[test]
    fn empty_file_is_missing_header() {
        let file = write_file("");
        let err = load_kicks(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingHeader { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_orbits(&dir.path().join("orbits.data")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("orbits.data"));
    }

    #[test]
    fn short_row_reports_line_and_counts() {
        let file = write_file("id w theta phi\n0 1 2 3\n1 1 2\n");
        let err = load_kicks(file.path()).unwrap_err();
        match err {
            LoadError::ColumnCount {
                line,
                expected,
                found,
                ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 4);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn long_row_is_rejected() {
        let file = write_file("id period separation eccentricity probability\n0 1 2 3 4 5\n");
        let err = load_grid(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::ColumnCount { found: 6, .. }));
    }

    #[test]
    fn bad_number_reports_token() {
        let file = write_file("id w theta phi\n0 1 abc 3\n");
        let err = load_kicks(file.path()).unwrap_err();
        match err {
            LoadError::InvalidNumber {
                line,
                column,
                token,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, 2);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reloading_is_bit_identical() {
        let file = write_file("id w theta phi\n0 0.1 0.2 0.3\n1 1e-7 3.14159 6.28318\n");
        let first = load_table(file.path(), KICKS_SCHEMA).unwrap();
        let second = load_table(file.path(), KICKS_SCHEMA).unwrap();
        for name in KICKS_SCHEMA.columns {
            let a: Vec<u64> = first.column(name).unwrap().iter().map(|v| v.to_bits()).collect();
            let b: Vec<u64> = second.column(name).unwrap().iter().map(|v| v.to_bits()).collect();
            assert_eq!(a, b);
        }
    }
}
