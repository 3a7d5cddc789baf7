use gridline::{PageRequest, Pagination, PaginationController};

#[test]
fn test_middle_of_last_page() {
    let info = Pagination::new(3, 10, 37).info();
    assert_eq!(info.total_pages, 4);
    assert_eq!(info.start_item, 21);
    assert_eq!(info.end_item, 30);
    assert!(info.can_go_prev);
    assert!(info.can_go_next);
    assert_eq!(info.summary(37), "21-30 of 37");
}

#[test]
fn test_single_partial_page() {
    let info = Pagination::new(1, 10, 5).info();
    assert_eq!(info.total_pages, 1);
    assert_eq!(info.start_item, 1);
    assert_eq!(info.end_item, 5);
    assert!(!info.can_go_prev);
    assert!(!info.can_go_next);
}

#[test]
fn test_empty_total() {
    let info = Pagination::new(1, 10, 0).info();
    assert_eq!(info.total_pages, 0);
    assert_eq!(info.start_item, 0);
    assert_eq!(info.end_item, 0);
    assert!(!info.can_go_next);
}

#[test]
fn test_navigation_requests() {
    let controller = PaginationController::new(Pagination::new(2, 10, 37));
    assert_eq!(controller.prev(), Some(PageRequest { page: 1, page_size: 10 }));
    assert_eq!(controller.next(), Some(PageRequest { page: 3, page_size: 10 }));
    assert_eq!(controller.first(), Some(PageRequest { page: 1, page_size: 10 }));
    assert_eq!(controller.last(), Some(PageRequest { page: 4, page_size: 10 }));
    assert_eq!(controller.set_page_size(25), PageRequest { page: 1, page_size: 25 });
}

#[test]
fn test_boundaries_disable_navigation() {
    let first = PaginationController::new(Pagination::new(1, 10, 37));
    assert_eq!(first.prev(), None);
    assert_eq!(first.first(), None);

    let last = PaginationController::new(Pagination::new(4, 10, 37));
    assert_eq!(last.next(), None);
    assert_eq!(last.last(), None);
}

#[test]
fn test_go_to_is_not_clamped() {
    let controller = PaginationController::new(Pagination::new(1, 10, 37));
    assert_eq!(controller.go_to(99), PageRequest { page: 99, page_size: 10 });
}
