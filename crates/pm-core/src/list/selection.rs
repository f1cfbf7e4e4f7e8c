//! Single-item selection over the filtered list.

/// `Some(index)` when it addresses an item of a list of length `total`.
pub fn select(index: usize, total: usize) -> Option<usize> {
    (index < total).then_some(index)
}

/// Drop a selection that no longer addresses an item.
pub fn revalidate(selected: Option<usize>, total: usize) -> Option<usize> {
    selected.and_then(|index| select(index, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_in_range() {
        assert_eq!(select(2, 5), Some(2));
        assert_eq!(select(4, 5), Some(4));
    }

    #[test]
    fn select_out_of_range_is_none() {
        assert_eq!(select(5, 5), None);
        assert_eq!(select(0, 0), None);
    }

    #[test]
    fn shrinking_list_invalidates_selection() {
        assert_eq!(revalidate(Some(2), 1), None);
        assert_eq!(revalidate(Some(0), 1), Some(0));
        assert_eq!(revalidate(None, 10), None);
    }
}
