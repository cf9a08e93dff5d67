//! Page slicing over an ordered document list.

use serde::Serialize;

/// One page of results plus the numbers needed to render pagination.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
}

/// Pagination metadata in API-response form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            total_items: self.total_items,
            total_pages: self.total_pages,
            current_page: self.current_page,
            page_size: self.page_size,
        }
    }
}

/// Slice `items` into the requested page.
///
/// Out-of-range page numbers clamp to the nearest valid page rather than
/// erroring: page 0 becomes page 1, anything past the end becomes the last
/// page. A page size of zero is treated as one. An empty list yields page 1
/// of 0 with no items.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);

    let current_page = page.clamp(1, total_pages.max(1));
    let start = (current_page - 1) * page_size;
    let end = (start + page_size).min(total_items);

    let slice = if start < total_items {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };

    Page {
        items: slice,
        total_items,
        total_pages,
        current_page,
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn test_pages_partition_the_list() {
        let items = numbers(25);
        let p1 = paginate(&items, 1, 10);
        let p2 = paginate(&items, 2, 10);
        let p3 = paginate(&items, 3, 10);

        assert_eq!(p1.items.len(), 10);
        assert_eq!(p2.items.len(), 10);
        assert_eq!(p3.items.len(), 5);
        assert_eq!(p1.total_pages, 3);
        assert_eq!(p1.total_items, 25);

        let mut all = p1.items.clone();
        all.extend(p2.items);
        all.extend(p3.items);
        assert_eq!(all, items);
    }

    #[test]
    fn test_exact_multiple() {
        let items = numbers(20);
        let page = paginate(&items, 2, 10);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_page_past_end_clamps_to_last() {
        let items = numbers(25);
        let page = paginate(&items, 99, 10);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0], 21);
    }

    #[test]
    fn test_page_zero_clamps_to_first() {
        let items = numbers(5);
        let page = paginate(&items, 0, 2);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.items, vec![1, 2]);
    }

    #[test]
    fn test_empty_list() {
        let items: Vec<usize> = Vec::new();
        let page = paginate(&items, 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 0);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn test_zero_page_size_is_one() {
        let items = numbers(3);
        let page = paginate(&items, 2, 0);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, vec![2]);
    }

    #[test]
    fn test_pagination_metadata() {
        let items = numbers(25);
        let page = paginate(&items, 2, 10);
        assert_eq!(
            page.pagination(),
            Pagination {
                total_items: 25,
                total_pages: 3,
                current_page: 2,
                page_size: 10,
            }
        );
    }
}
