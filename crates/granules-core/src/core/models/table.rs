use std::fmt;
use std::ops::Index;

/// Describes the schema of a row type stored in a [`Table`].
///
/// Every record type produced by a reader names its table and the ordered
/// columns it carries, so a table is self-describing without relying on a
/// generic tabular base type.
pub trait Record: Clone + fmt::Debug {
    /// Name of the table this record belongs to (e.g. `"PSF/BOND"`).
    const SCHEMA: &'static str;
    /// Ordered column names of the record.
    const COLUMNS: &'static [&'static str];
}

/// An append-only, schema-tagged collection of typed rows.
///
/// Readers never write into a table directly; they produce a complete batch of
/// rows and the batch is appended in one step, so a failed read leaves the
/// table untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<R: Record> Table<R> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The schema tag of this table.
    pub fn schema(&self) -> &'static str {
        R::SCHEMA
    }

    /// The ordered column names of this table.
    pub fn columns(&self) -> &'static [&'static str] {
        R::COLUMNS
    }

    /// Appends a batch of rows, preserving their order after the existing rows.
    ///
    /// # Return
    ///
    /// The number of rows appended.
    pub fn append<I>(&mut self, rows: I) -> usize
    where
        I: IntoIterator<Item = R>,
    {
        let before = self.rows.len();
        self.rows.extend(rows);
        self.rows.len() - before
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.rows.get(index)
    }

    /// Consumes the table, returning its rows.
    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }
}

impl<R> Index<usize> for Table<R> {
    type Output = R;

    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}

impl<'a, R: Record> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl<R: Record> FromIterator<R> for Table<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut table = Self::new();
        table.append(iter);
        table
    }
}
