use crate::{Colors, truncate_text, width_for_count};

#[test]
fn width_for_count_boundaries() {
    assert_eq!(width_for_count(0), 1);
    assert_eq!(width_for_count(1), 1);
    assert_eq!(width_for_count(10), 1);
    assert_eq!(width_for_count(11), 2);
    assert_eq!(width_for_count(100), 2);
    assert_eq!(width_for_count(101), 3);
    assert_eq!(width_for_count(1_048_577), 7);
}

#[test]
fn truncate_keeps_short_text() {
    assert_eq!(truncate_text("hello", 5), "hello");
    assert_eq!(truncate_text("hello", 10), "hello");
}

#[test]
fn truncate_marks_cut() {
    assert_eq!(truncate_text("hello world", 6), "hello…");
}

#[test]
fn paint_wraps_only_when_enabled() {
    let on = Colors::new(true);
    let off = Colors::new(false);

    assert_eq!(on.paint(on.symbol, "@loop"), "\x1b[34m@loop\x1b[0m");
    assert_eq!(off.paint(off.symbol, "@loop"), "@loop");
    assert_eq!(on.paint(on.value, 42), "\x1b[32m42\x1b[0m");
    assert_eq!(Colors::default(), Colors::OFF);
}
