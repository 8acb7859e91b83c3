use crate::types::{PageArgs, PageInfo};

/// Tracks the position of a paged table over a cursor connection.
///
/// Only adjacent pages are reachable through cursors: jumping ahead uses the end cursor of
/// the current page and jumping back uses its start cursor, so callers move one page at a
/// time or return to the first page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageNavigator {
    page_size: i32,
    current_index: usize,
    current_args: PageArgs,
    page_info: Option<PageInfo>,
}

impl PageNavigator {
    /// Creates a navigator positioned before the first page.
    pub fn new(page_size: i32) -> Self {
        Self {
            page_size,
            current_index: 0,
            current_args: PageArgs::first(page_size),
            page_info: None,
        }
    }

    pub fn page_size(&self) -> i32 {
        self.page_size
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn page_info(&self) -> Option<&PageInfo> {
        self.page_info.as_ref()
    }

    /// Changes the page size and rewinds to the first page.
    pub fn set_page_size(&mut self, page_size: i32) {
        *self = Self::new(page_size);
    }

    /// Returns the connection arguments that load the page at `index`.
    ///
    /// Without a loaded page, or when the relevant cursor is missing (an empty page), the
    /// first page is requested.
    pub fn args_for(&self, index: usize) -> PageArgs {
        if index == 0 {
            return PageArgs::first(self.page_size);
        }

        let info = self.page_info.as_ref();
        if index > self.current_index {
            match info.and_then(|i| i.end_cursor.as_deref()) {
                Some(cursor) => PageArgs::forward(self.page_size, cursor),
                None => PageArgs::first(self.page_size),
            }
        } else if index < self.current_index {
            match info.and_then(|i| i.start_cursor.as_deref()) {
                Some(cursor) => PageArgs::backward(self.page_size, cursor),
                None => PageArgs::first(self.page_size),
            }
        } else {
            self.current_args.clone()
        }
    }

    /// Records the page that was loaded for `index` with `args`.
    pub fn page_loaded(&mut self, index: usize, args: PageArgs, page_info: PageInfo) {
        self.current_index = index;
        self.current_args = args;
        self.page_info = Some(page_info);
    }

    pub fn can_go_next(&self) -> bool {
        self.page_info.as_ref().is_some_and(|i| i.has_next_page)
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_index > 0 && self.page_info.as_ref().is_some_and(|i| i.has_previous_page)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn loaded(index: usize, has_previous_page: bool, has_next_page: bool) -> PageNavigator {
        let mut nav = PageNavigator::new(10);
        nav.page_loaded(
            index,
            PageArgs::forward(10, "prev-end"),
            PageInfo {
                start_cursor: Some("start".into()),
                end_cursor: Some("end".into()),
                has_next_page,
                has_previous_page,
            },
        );
        nav
    }

    #[rstest]
    #[case(0, PageArgs::first(10))]
    #[case(3, PageArgs::forward(10, "end"))]
    #[case(1, PageArgs::backward(10, "start"))]
    #[case(2, PageArgs::forward(10, "prev-end"))]
    fn args_follow_direction_of_requested_page(#[case] index: usize, #[case] expected: PageArgs) {
        assert_eq!(loaded(2, true, true).args_for(index), expected);
    }

    #[test]
    fn fresh_navigator_requests_first_page() {
        let nav = PageNavigator::new(25);
        assert_eq!(nav.args_for(0), PageArgs::first(25));
        assert_eq!(nav.args_for(1), PageArgs::first(25));
        assert!(!nav.can_go_next());
        assert!(!nav.can_go_previous());
    }

    #[test]
    fn boundaries_follow_page_info() {
        let first = loaded(0, false, true);
        assert!(first.can_go_next());
        assert!(!first.can_go_previous());

        let last = loaded(4, true, false);
        assert!(!last.can_go_next());
        assert!(last.can_go_previous());
    }

    #[test]
    fn empty_page_without_cursors_falls_back_to_first_page() {
        let mut nav = PageNavigator::new(5);
        nav.page_loaded(1, PageArgs::forward(5, "x"), PageInfo::default());
        assert_eq!(nav.args_for(2), PageArgs::first(5));
        assert_eq!(nav.args_for(0), PageArgs::first(5));
    }

    #[test]
    fn changing_page_size_rewinds() {
        let mut nav = loaded(3, true, true);
        nav.set_page_size(50);
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.page_info(), None);
        assert_eq!(nav.args_for(0), PageArgs::first(50));
    }
}
