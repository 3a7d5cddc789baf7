//! Input handlers for the grid.
//!
//! Each handler applies one discrete user input, runs the matching caller
//! callback at most once with the post-change state, and reports whether
//! anything happened.

use crate::accessor::Record;
use crate::events::EventResult;
use crate::pagination::{PageRequest, PaginationController};
use crate::sort::SortConfig;

use super::Grid;

impl<T: Record> Grid<T> {
    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Header checkbox pressed: toggle every selectable rendered row.
    pub fn toggle_all(&mut self) -> EventResult {
        if !self.selectable {
            return EventResult::Ignored;
        }
        let range = self.visible_range();
        let start = range.start;
        let rows = self.data[range]
            .iter()
            .enumerate()
            .map(|(offset, row)| (start + offset, row));
        let next = self.selection.toggle_all(rows, &self.identity);
        if let Some(callback) = &self.on_selection_change {
            callback(&next);
        }
        EventResult::Consumed
    }

    /// Row checkbox set to `checked`.
    pub fn toggle_row(&mut self, id: &str, checked: bool) -> EventResult {
        if !self.selectable {
            return EventResult::Ignored;
        }
        let Some(index) = self.index_of(id) else {
            log::debug!("Selection toggle for unknown row {id}");
            return EventResult::Ignored;
        };
        let Some(next) = self
            .selection
            .toggle_row(&self.data[index], index, id, checked)
        else {
            return EventResult::Ignored;
        };
        if let Some(callback) = &self.on_selection_change {
            callback(&next);
        }
        EventResult::Consumed
    }

    // -------------------------------------------------------------------------
    // Expansion
    // -------------------------------------------------------------------------

    /// Disclosure control pressed on row `id`.
    pub fn toggle_expanded(&mut self, id: &str) -> EventResult {
        if self.expandable.is_none() {
            return EventResult::Ignored;
        }
        let Some(index) = self.index_of(id) else {
            return EventResult::Ignored;
        };
        let Some(change) = self.expansion.toggle_row(&self.data[index], index, id) else {
            return EventResult::Ignored;
        };
        if let Some(callback) = self.expandable.as_ref().and_then(|e| e.on_change.as_ref()) {
            callback(&change);
        }
        EventResult::Consumed
    }

    // -------------------------------------------------------------------------
    // Header, rows, toolbar
    // -------------------------------------------------------------------------

    /// Column header pressed. Sortable columns request the next sort.
    pub fn press_header(&mut self, column_id: &str) -> EventResult {
        let sortable = self
            .visible_columns()
            .any(|column| column.id == column_id && column.sortable);
        if !sortable {
            return EventResult::Ignored;
        }
        let next = SortConfig::next(self.sort.as_ref(), column_id);
        log::debug!("Sort requested: {} {:?}", next.column_id, next.direction);
        if let Some(callback) = &self.on_sort_change {
            callback(&next);
        }
        EventResult::Consumed
    }

    /// Row body pressed.
    pub fn press_row(&mut self, index: usize) -> EventResult {
        match (&self.on_row_click, self.data.get(index)) {
            (Some(callback), Some(row)) => {
                callback(row, index);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    /// Search text edited.
    pub fn set_search(&mut self, value: &str) -> EventResult {
        if !self.searchable {
            return EventResult::Ignored;
        }
        log::debug!("Search changed: '{value}'");
        if let Some(callback) = &self.on_search_change {
            callback(value);
        }
        EventResult::Consumed
    }

    /// Refresh (or error-panel retry) pressed.
    pub fn refresh(&mut self) -> EventResult {
        match &self.on_refresh {
            Some(callback) => {
                log::debug!("Refresh requested");
                callback();
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    pub fn next_page(&mut self) -> EventResult {
        self.paginate(|controller| controller.next())
    }

    pub fn prev_page(&mut self) -> EventResult {
        self.paginate(|controller| controller.prev())
    }

    pub fn first_page(&mut self) -> EventResult {
        self.paginate(|controller| controller.first())
    }

    pub fn last_page(&mut self) -> EventResult {
        self.paginate(|controller| controller.last())
    }

    /// Jump to `page` as given (not clamped).
    pub fn go_to_page(&mut self, page: usize) -> EventResult {
        self.paginate(|controller| Some(controller.go_to(page)))
    }

    pub fn set_page_size(&mut self, page_size: usize) -> EventResult {
        self.paginate(|controller| Some(controller.set_page_size(page_size)))
    }

    fn paginate(
        &mut self,
        navigate: impl FnOnce(&PaginationController) -> Option<PageRequest>,
    ) -> EventResult {
        if self.mode.is_child() {
            return EventResult::Ignored;
        }
        let Some(pagination) = self.pagination else {
            return EventResult::Ignored;
        };
        let Some(request) = navigate(&PaginationController::new(pagination)) else {
            return EventResult::Ignored;
        };
        log::debug!("Page requested: {} (size {})", request.page, request.page_size);
        if self.local_pagination {
            self.pagination = Some(crate::pagination::Pagination {
                page: request.page,
                page_size: request.page_size,
                total: pagination.total,
            });
            self.menu.close();
        }
        if let Some(callback) = &self.on_pagination_change {
            callback(request);
        }
        EventResult::Consumed
    }

    // -------------------------------------------------------------------------
    // Action menu
    // -------------------------------------------------------------------------

    /// Row action trigger pressed on the row at `index`.
    pub fn open_action_menu(&mut self, index: usize) -> EventResult {
        if self.row_actions.is_empty() || index >= self.data.len() {
            return EventResult::Ignored;
        }
        self.menu.open(index);
        EventResult::Consumed
    }

    /// Menu dismissed.
    pub fn close_action_menu(&mut self) -> EventResult {
        if !self.menu.is_open() {
            return EventResult::Ignored;
        }
        self.menu.close();
        EventResult::Consumed
    }

    /// Menu entry at `position` in the action list pressed.
    pub fn execute_action(&mut self, position: usize) -> EventResult {
        let Some(action) = self.row_actions.get(position) else {
            return EventResult::Ignored;
        };
        if self.menu.execute(action, &self.data) {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}
