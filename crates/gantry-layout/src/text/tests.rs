use super::*;

#[test]
fn width_scales_with_font_size_and_longest_line() {
    let m = DeterministicTextMeasurer::default();
    let a = m.measure("abcd", &TextStyle::sized(10.0));
    assert_eq!(a.width, 24.0);
    assert_eq!(a.line_count, 1);

    let b = m.measure("ab\nabcdef", &TextStyle::sized(10.0));
    assert_eq!(b.width, 36.0);
    assert_eq!(b.line_count, 2);
    assert_eq!(b.height, 24.0);
}

#[test]
fn wide_characters_take_two_columns() {
    let m = DeterministicTextMeasurer::default();
    assert_eq!(m.text_width("设计", 10.0), m.text_width("abcd", 10.0));
}

#[test]
fn empty_text_has_zero_width() {
    let m = DeterministicTextMeasurer::default();
    assert_eq!(m.text_width("", 13.0), 0.0);
}

#[test]
fn custom_factor_is_respected() {
    let m = DeterministicTextMeasurer {
        char_width_factor: 0.5,
        ..DeterministicTextMeasurer::default()
    };
    assert_eq!(m.text_width("abcd", 10.0), 20.0);
}
