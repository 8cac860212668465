//! Grid pagination.
//!
//! Chunking is a pure function of the item sequence and the column count;
//! `RowLayout` adds the memoization the view layer relies on, re-chunking
//! only when either input actually changed.

/// Columns that fit the viewport at a fixed column width, never less than
/// one.
pub fn column_count(viewport_width: u32, column_width: u32) -> usize {
    let width = column_width.max(1);
    ((viewport_width / width) as usize).max(1)
}

/// Split `items` into rows of `column_count` cells; the last row may be
/// short. A zero column count is treated as one. Empty input yields no rows.
pub fn chunk_rows<T: Clone>(items: &[T], column_count: usize) -> Vec<Vec<T>> {
    let width = column_count.max(1);
    items.chunks(width).map(<[T]>::to_vec).collect()
}

/// Memoized row layout for one item sequence.
///
/// Callers version their item sequence (bump on any change) and pass the
/// version in; rows are rebuilt only when the version or the column count
/// moves. Rebuilding from the same inputs always yields the same rows, so a
/// stale hit can never show wrong data, only the memo saves work.
#[derive(Debug, Default)]
pub struct RowLayout<T> {
    key: Option<(u64, usize)>,
    rows: Vec<Vec<T>>,
}

impl<T: Clone> RowLayout<T> {
    pub fn new() -> Self {
        Self {
            key: None,
            rows: Vec::new(),
        }
    }

    pub fn rows(&mut self, items_version: u64, items: &[T], column_count: usize) -> &[Vec<T>] {
        let key = (items_version, column_count.max(1));
        if self.key != Some(key) {
            self.rows = chunk_rows(items, column_count);
            self.key = Some(key);
        }
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_shape() {
        let items = vec!["a", "b", "c", "d", "e"];
        let rows = chunk_rows(&items, 3);
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["d", "e"]]);
    }

    #[test]
    fn test_chunk_exact_fit_has_no_short_row() {
        let items = vec![1, 2, 3, 4];
        let rows = chunk_rows(&items, 2);
        assert_eq!(rows, vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_chunk_empty_items() {
        let items: Vec<i32> = Vec::new();
        assert!(chunk_rows(&items, 3).is_empty());
    }

    #[test]
    fn test_chunk_zero_columns_clamps_to_one() {
        let items = vec![1, 2];
        let rows = chunk_rows(&items, 0);
        assert_eq!(rows, vec![vec![1], vec![2]]);
    }

    #[test]
    fn test_chunk_is_idempotent() {
        let items = vec![1, 2, 3, 4, 5, 6, 7];
        for k in 0..10 {
            assert_eq!(chunk_rows(&items, k), chunk_rows(&items, k));
        }
    }

    #[test]
    fn test_column_count_floor_and_minimum() {
        assert_eq!(column_count(900, 180), 5);
        assert_eq!(column_count(899, 180), 4);
        assert_eq!(column_count(100, 180), 1);
        assert_eq!(column_count(0, 180), 1);
    }

    #[test]
    fn test_row_layout_rechunks_only_on_change() {
        let mut layout = RowLayout::new();
        let items = vec![1, 2, 3, 4, 5];

        let first = layout.rows(1, &items, 3).to_vec();
        assert_eq!(first, vec![vec![1, 2, 3], vec![4, 5]]);

        // Same version + count: the memo answers, and the answer is equal.
        let again = layout.rows(1, &items, 3).to_vec();
        assert_eq!(first, again);

        // Column count alone changed: full re-chunk of the same items.
        let narrower = layout.rows(1, &items, 2).to_vec();
        assert_eq!(narrower, vec![vec![1, 2], vec![3, 4], vec![5]]);

        // Version bump with new items: rows follow.
        let items = vec![1, 2];
        let fresh = layout.rows(2, &items, 2).to_vec();
        assert_eq!(fresh, vec![vec![1, 2]]);
    }
}
