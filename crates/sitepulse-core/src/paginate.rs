// ── Pagination over filtered views ──

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Fixed-size page slicer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

/// One page of a view.
#[derive(Debug, PartialEq, Eq)]
pub struct PageView<'a, T> {
    pub items: &'a [T],
    /// Zero-based, already clamped.
    pub index: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// A zero page size is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Always at least one page, even for an empty view.
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size).max(1)
    }

    /// Slice page `index`, clamping past-the-end indices to the last page.
    pub fn page<'a, T>(&self, items: &'a [T], index: usize) -> PageView<'a, T> {
        let total_items = items.len();
        let total_pages = self.total_pages(total_items);
        let index = index.min(total_pages - 1);
        let start = index * self.page_size;
        let end = (start + self.page_size).min(total_items);
        PageView {
            items: items.get(start..end).unwrap_or_default(),
            index,
            total_pages,
            total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_and_counts() {
        let items: Vec<u32> = (0..7).collect();
        let p = Paginator::new(3);

        let first = p.page(&items, 0);
        assert_eq!(first.items, &[0, 1, 2]);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_items, 7);

        let last = p.page(&items, 2);
        assert_eq!(last.items, &[6]);
    }

    #[test]
    fn clamps_past_the_end() {
        let items: Vec<u32> = (0..7).collect();
        let page = Paginator::new(3).page(&items, 99);
        assert_eq!(page.index, 2);
        assert_eq!(page.items, &[6]);
    }

    #[test]
    fn empty_view_has_one_empty_page() {
        let items: Vec<u32> = Vec::new();
        let page = Paginator::default().page(&items, 4);
        assert_eq!(page.index, 0);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn zero_page_size_is_one() {
        assert_eq!(Paginator::new(0).page_size(), 1);
    }
}
