use super::Table;
use crate::state::RowId;

/// One data row as seen through the current table state.
#[derive(Debug)]
pub struct Row<'a, T> {
    pub id: RowId,
    /// Position of the row in the caller's data.
    pub index: usize,
    pub original: &'a T,
    pub expanded: bool,
}

/// The "showing `start`-`end` of `total`" summary of the current page. `start` is 1-based and
/// zero when there are no rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowsInfo {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl<T> Table<T> {
    /// Data indices passing every column filter (case-insensitive substring match).
    pub fn filtered_indices(&self) -> Vec<usize> {
        let filters: Vec<(&crate::column::ColumnDef<T>, String)> = self
            .state
            .column_filters
            .iter()
            .filter(|f| !f.value.is_empty())
            .filter_map(|f| Some((self.column(&f.id)?, f.value.to_lowercase())))
            .collect();

        (0..self.data.len())
            .filter(|&i| {
                filters.iter().all(|(col, needle)| {
                    col.cell_value(&self.data[i])
                        .to_lowercase()
                        .contains(needle.as_str())
                })
            })
            .collect()
    }

    /// Filtered data indices in sorting order. Sorting is stable and applies entries in priority
    /// order; entries naming unknown or unsortable columns are ignored.
    pub fn sorted_indices(&self) -> Vec<usize> {
        let mut indices = self.filtered_indices();
        let sorts: Vec<_> = self
            .state
            .sorting
            .iter()
            .filter_map(|s| {
                let col = self.column(&s.id)?;
                col.enable_sorting.then_some((col, s.desc))
            })
            .collect();
        if sorts.is_empty() {
            return indices;
        }
        indices.sort_by(|&a, &b| {
            for (col, desc) in &sorts {
                let ord = col.compare(&self.data[a], &self.data[b]);
                let ord = if *desc { ord.reverse() } else { ord };
                if ord.is_ne() {
                    return ord;
                }
            }
            std::cmp::Ordering::Equal
        });
        indices
    }

    pub fn row_count(&self) -> usize {
        self.filtered_indices().len()
    }

    pub fn page_count(&self) -> usize {
        let size = self.state.pagination.page_size.max(1);
        self.row_count().div_ceil(size).max(1)
    }

    pub fn can_previous_page(&self) -> bool {
        self.state.pagination.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.state.pagination.page_index + 1 < self.page_count()
    }

    /// Rows of the current page, in sorted order.
    pub fn page_rows(&self) -> Vec<Row<'_, T>> {
        let size = self.state.pagination.page_size.max(1);
        let start = self.state.pagination.page_index.saturating_mul(size);
        self.sorted_indices()
            .into_iter()
            .skip(start)
            .take(size)
            .map(|index| self.row_at(index))
            .collect()
    }

    /// Every filtered row in sorted order, ignoring pagination.
    pub fn sorted_rows(&self) -> Vec<Row<'_, T>> {
        self.sorted_indices()
            .into_iter()
            .map(|index| self.row_at(index))
            .collect()
    }

    pub fn rows_info(&self) -> RowsInfo {
        let total = self.row_count();
        let size = self.state.pagination.page_size.max(1);
        let first = self.state.pagination.page_index.saturating_mul(size);
        if first >= total {
            return RowsInfo {
                start: 0,
                end: 0,
                total,
            };
        }
        RowsInfo {
            start: first + 1,
            end: (first + size).min(total),
            total,
        }
    }

    fn row_at(&self, index: usize) -> Row<'_, T> {
        let original = &self.data[index];
        let id = self.row_id(original, index);
        let expanded = self.state.expanded.contains(&id);
        Row {
            id,
            index,
            original,
            expanded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnDef;
    use crate::state::PaginationState;
    use crate::table::TableState;
    use std::rc::Rc;

    #[test]
    fn rows_info_reports_page_window() {
        let mut t = Table::new(
            (0..25u32).collect(),
            vec![ColumnDef::new("n", "N", |v: &u32| v.to_string())],
            Rc::new(|v: &u32, _: usize| RowId::new(v.to_string())),
            TableState::default(),
        );
        assert_eq!(
            t.rows_info(),
            RowsInfo {
                start: 1,
                end: 10,
                total: 25
            }
        );

        let mut state = t.state().clone();
        state.pagination = PaginationState {
            page_index: 2,
            page_size: 10,
        };
        t.set_state(state);
        assert_eq!(t.page_rows().len(), 5);
        assert_eq!(
            t.rows_info(),
            RowsInfo {
                start: 21,
                end: 25,
                total: 25
            }
        );
        assert!(!t.can_next_page());
    }

    #[test]
    fn empty_table_still_has_one_page() {
        let t = Table::new(
            Vec::<u32>::new(),
            vec![ColumnDef::new("n", "N", |v: &u32| v.to_string())],
            Rc::new(|_: &u32, i: usize| RowId::new(i.to_string())),
            TableState::default(),
        );
        assert_eq!(t.page_count(), 1);
        assert_eq!(t.rows_info().start, 0);
        assert!(t.page_rows().is_empty());
    }
}
