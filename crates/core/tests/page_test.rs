//! Tests for BoxPage selection, lookup and editing operations.

use tessbox_core::{BoxPage, Rect, TessBox, parse};

/// Three boxes on one line: "a" "b" "c", each 10x20, 5px apart.
fn abc_page() -> BoxPage {
    BoxPage::from_boxes(
        0,
        [
            TessBox::new("a", Rect::new(0, 0, 10, 20), 0),
            TessBox::new("b", Rect::new(15, 0, 10, 20), 0),
            TessBox::new("c", Rect::new(30, 0, 10, 20), 0),
        ],
    )
}

fn texts(page: &BoxPage) -> Vec<&str> {
    page.iter().map(|b| b.text()).collect()
}

// ============================================================================
// Hit testing and lookup
// ============================================================================

#[test]
fn test_hit_test_finds_containing_box() {
    let page = abc_page();
    assert_eq!(page.hit_test((20.0, 10.0)), Some(1));
    assert_eq!(page.hit_test((12.0, 10.0)), None);
    assert_eq!(page.hit_test((40.0, 20.0)), Some(2));
}

#[test]
fn test_hit_test_prefers_insertion_order() {
    let page = BoxPage::from_boxes(
        0,
        [
            TessBox::new("A", Rect::new(0, 0, 50, 50), 0),
            TessBox::new("B", Rect::new(10, 10, 5, 5), 0),
        ],
    );
    for _ in 0..3 {
        assert_eq!(page.hit_test((12.0, 12.0)), Some(0));
    }
}

#[test]
fn test_hit_test_on_empty_page() {
    assert_eq!(BoxPage::new(0).hit_test((0.0, 0.0)), None);
}

#[test]
fn test_find_by_rect_is_exact() {
    let page = abc_page();
    assert_eq!(page.find_by_rect(&Rect::new(15, 0, 10, 20)), Some(1));
    assert_eq!(page.find_by_rect(&Rect::new(15, 0, 10, 21)), None);
}

#[test]
fn test_find_by_file_rect_flips_query() {
    let doc = parse("h 10 10 20 30 0\ni 25 10 35 30 0", &[100]).unwrap();
    let page = doc.page(0).unwrap();
    assert_eq!(page.find_by_file_rect((25, 10, 35, 30), 100), Some(1));
    assert_eq!(page.find_by_file_rect((25, 11, 35, 30), 100), None);
    assert_eq!(page.find_by_file_rect((0, i32::MIN, 5, 10), 100), None);
}

#[test]
fn test_find_by_text_walks_forward() {
    let mut page = abc_page();
    page.push(TessBox::new("ab", Rect::new(45, 0, 10, 20), 0));

    assert_eq!(page.find_by_text(None, "a"), Some(0));
    assert_eq!(page.find_by_text(Some(0), "a"), Some(3));
    assert_eq!(page.find_by_text(Some(3), "a"), None);
    assert_eq!(page.find_by_text(Some(10), "a"), None);
    assert_eq!(page.find_by_text(None, "z"), None);
}

#[test]
fn test_find_next_continues_after_last_selected() {
    let mut page = abc_page();
    page.push(TessBox::new("a", Rect::new(45, 0, 10, 20), 0));

    assert_eq!(page.find_next("a"), Some(0));
    page.select(0, true);
    assert_eq!(page.find_next("a"), Some(3));
    page.deselect_all();
    page.select(3, true);
    assert_eq!(page.find_next("a"), None);
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_selected_boxes_are_in_page_order() {
    let mut page = abc_page();
    page.select(2, true);
    page.select(0, true);

    let selected: Vec<&str> = page.selected_boxes().iter().map(|b| b.text()).collect();
    assert_eq!(selected, vec!["a", "c"]);
    assert_eq!(page.selected_indices(), vec![0, 2]);
}

#[test]
fn test_deselect_all() {
    let mut page = abc_page();
    page.select(1, true);
    page.select(2, true);
    page.deselect_all();
    assert!(page.selected_boxes().is_empty());
    assert!(!page.is_modified());
}

#[test]
fn test_click_replaces_selection() {
    let mut page = abc_page();
    page.select(0, true);

    assert_eq!(page.click((20.0, 5.0), false), Some(1));
    assert_eq!(page.selected_indices(), vec![1]);

    assert_eq!(page.click((35.0, 5.0), true), Some(2));
    assert_eq!(page.selected_indices(), vec![1, 2]);

    // Additive click on a selected box toggles it off.
    page.click((20.0, 5.0), true);
    assert_eq!(page.selected_indices(), vec![2]);

    // Clicking empty space clears unless additive.
    assert_eq!(page.click((100.0, 100.0), true), None);
    assert_eq!(page.selected_indices(), vec![2]);
    page.click((100.0, 100.0), false);
    assert!(page.selected_indices().is_empty());
}

#[test]
fn test_select_between_fills_span() {
    let mut page = BoxPage::from_boxes(
        0,
        [
            TessBox::new("a", Rect::new(0, 0, 10, 20), 0),
            TessBox::new(".", Rect::new(12, 16, 3, 3), 0),
            TessBox::new("b", Rect::new(15, 0, 10, 17), 0),
            TessBox::new("c", Rect::new(30, 0, 10, 20), 0),
            TessBox::new("d", Rect::new(45, 0, 10, 20), 0),
        ],
    );
    page.select(3, true);
    page.select(0, true);

    assert_eq!(page.select_between(), 1);
    assert_eq!(page.selected_indices(), vec![0, 2, 3]);
}

#[test]
fn test_select_between_with_extreme_anchor_height() {
    let mut page = BoxPage::from_boxes(
        0,
        [
            TessBox::new("a", Rect::new(0, 0, 10, i32::MIN + 1), 0),
            TessBox::new("b", Rect::new(15, 0, 10, 0), 0),
            TessBox::new("c", Rect::new(30, 0, 10, 20), 0),
        ],
    );
    page.select(0, true);
    page.select(2, true);

    assert_eq!(page.select_between(), 1);
    assert_eq!(page.selected_indices(), vec![0, 1, 2]);
}

#[test]
fn test_select_between_needs_two_anchors() {
    let mut page = abc_page();
    page.select(0, true);
    assert_eq!(page.select_between(), 0);
    assert_eq!(page.selected_indices(), vec![0]);
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn test_insert_after_duplicates_to_the_right() {
    let mut page = abc_page();
    page.select(2, true);

    assert_eq!(page.insert_after(0), Some(1));
    assert_eq!(texts(&page), vec!["a", "a", "b", "c"]);
    assert_eq!(page[1].rect(), Rect::new(15, 0, 10, 20));
    assert_eq!(page.selected_indices(), vec![1]);
    assert!(page.is_modified());
    assert_eq!(page.insert_after(9), None);
}

#[test]
fn test_delete_selected() {
    let mut page = abc_page();
    page.select(0, true);
    page.select(2, true);

    let removed = page.delete_selected();
    assert_eq!(removed.len(), 2);
    assert_eq!(texts(&page), vec!["b"]);
    assert!(page.is_modified());
}

#[test]
fn test_delete_without_selection_is_noop() {
    let mut page = abc_page();
    assert!(page.delete_selected().is_empty());
    assert_eq!(page.len(), 3);
    assert!(!page.is_modified());
}

#[test]
fn test_shift_selected() {
    let mut page = abc_page();
    page.select(1, true);
    page.select(2, true);

    assert_eq!(page.shift_selected(-1, 2), 2);
    assert_eq!(page[0].rect(), Rect::new(0, 0, 10, 20));
    assert_eq!(page[1].rect(), Rect::new(14, 2, 10, 20));
    assert_eq!(page[2].rect(), Rect::new(29, 2, 10, 20));
}

#[test]
fn test_resize_selected_clamps_at_zero() {
    let mut page = abc_page();
    page.select(0, true);

    assert!(page.resize_selected(1, -25));
    assert_eq!(page[0].rect(), Rect::new(0, 0, 11, 0));

    page.select(1, true);
    assert!(!page.resize_selected(1, 1));
}

#[test]
fn test_resize_selected_saturates() {
    let mut page = BoxPage::from_boxes(
        0,
        [TessBox::new("w", Rect::new(0, 0, i32::MAX - 1, 20), 0)],
    );
    page.select(0, true);

    assert!(page.resize_selected(10, i32::MIN));
    assert_eq!(page[0].rect(), Rect::new(0, 0, i32::MAX, 0));
}

#[test]
fn test_repair_degenerate_inherits_previous_geometry() {
    let mut page = BoxPage::from_boxes(
        0,
        [
            TessBox::new("a", Rect::new(0, 0, 10, 20), 0),
            TessBox::new("b", Rect::new(0, 0, 0, 0), 0),
            TessBox::new("c", Rect::new(7, 7, 3, 0), 0),
            TessBox::new("d", Rect::new(50, 0, 8, 8), 0),
        ],
    );

    assert_eq!(page.repair_degenerate(), 2);
    assert_eq!(page[1].rect(), Rect::new(15, 0, 10, 20));
    assert_eq!(page[2].rect(), Rect::new(30, 0, 10, 20));
    assert_eq!(page[3].rect(), Rect::new(50, 0, 8, 8));
}

#[test]
fn test_repair_leaves_first_box() {
    let mut page = BoxPage::from_boxes(0, [TessBox::new("a", Rect::default(), 0)]);
    assert_eq!(page.repair_degenerate(), 0);
    assert!(!page.is_modified());
}

#[test]
fn test_apply_text_overwrites_in_order() {
    let mut page = abc_page();
    assert_eq!(page.apply_text("x y\r\n"), 2);
    assert_eq!(texts(&page), vec!["x", "y", "c"]);

    assert_eq!(page.apply_text("1234"), 3);
    assert_eq!(texts(&page), vec!["1", "2", "3"]);
}

#[test]
fn test_explicit_mutators() {
    let mut page = abc_page();
    assert!(page.set_text(1, "B"));
    assert!(page.set_rect(2, Rect::new(31, 0, 10, 20)));
    assert!(!page.set_text(7, "?"));
    assert!(page.insert_at(0, TessBox::new("<", Rect::new(-5, 0, 4, 20), 9)));
    assert_eq!(page[0].page(), 0);
    assert_eq!(page.remove(0).map(|b| b.text().to_string()), Some("<".into()));
    assert!(page.remove(10).is_none());
    assert_eq!(texts(&page), vec!["a", "B", "c"]);
    assert!(page.is_modified());
    page.mark_saved();
    assert!(!page.is_modified());
}

#[test]
fn test_insert_at_past_end_is_rejected() {
    let mut page = abc_page();
    assert!(!page.insert_at(4, TessBox::new("?", Rect::new(0, 0, 1, 1), 0)));
    assert_eq!(texts(&page), vec!["a", "b", "c"]);
    assert!(!page.is_modified());

    assert!(page.insert_at(3, TessBox::new("d", Rect::new(45, 0, 10, 20), 0)));
    assert_eq!(texts(&page), vec!["a", "b", "c", "d"]);
    assert!(page.is_modified());
}
