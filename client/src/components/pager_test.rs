use super::*;

#[test]
fn label_shows_position_out_of_total() {
    assert_eq!(pager_label(Page::new(2, 10), 7), "Page 2 of 7");
}

#[test]
fn label_never_reports_zero_pages() {
    assert_eq!(pager_label(Page::default(), 0), "Page 1 of 1");
}
