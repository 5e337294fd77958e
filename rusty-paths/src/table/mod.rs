pub mod path;
pub use path::*;

/// Rows of `Row` can be added to Self
pub trait Insertable<Row> {
    type Key;
    /// Adds `row`, returning its key
    fn insert(&mut self, row: Row) -> Self::Key;
    /// Adds every row in order
    fn insert_many<I: IntoIterator<Item = Row>>(&mut self, rows: I) -> Vec<Self::Key> {
        rows.into_iter().map(|x| self.insert(x)).collect()
    }
}

/// Rows of Self can be looked up by `Key`
pub trait Queryable<Key> {
    /// Position of the row with `key`
    fn find_index(&self, key: &Key) -> Option<usize>;
    /// Positions of the rows with `keys`, `None` where absent
    fn find_many_indexes(&self, keys: &[Key]) -> Vec<Option<usize>> {
        keys.iter().map(|k| self.find_index(k)).collect()
    }
}
