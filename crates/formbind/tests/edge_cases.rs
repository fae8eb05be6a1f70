//! Edge case tests for formbind
//!
//! Duplicate names, malformed markup, reloads and value shape mismatches.

use formbind::{FieldKind, FieldValue, Form, FormConfig, ParseError};
use pretty_assertions::assert_eq;

// ============================================================================
// Duplicate names
// ============================================================================

#[test]
fn test_multi_text_accumulates() {
    let form = Form::from_html(r#"<input name="a[]" value="1"><input name="a[]" value="2">"#).unwrap();
    assert_eq!(form.value("a"), Some(&FieldValue::from(["1", "2"])));
}

#[test]
fn test_scalar_duplicate_last_wins() {
    let form = Form::from_html(r#"<input name="a" value="1"><input name="a" value="2">"#).unwrap();
    assert_eq!(form.value("a"), Some(&FieldValue::from("2")));
    assert_eq!(form.field("a").unwrap().elements().len(), 2);
}

#[test]
fn test_scalar_select_with_two_selected_options() {
    let form = Form::from_html(
        r#"<select name="s"><option value="x" selected>X</option><option value="y" selected>Y</option></select>"#,
    )
    .unwrap();
    assert_eq!(form.value("s"), Some(&FieldValue::from("y")));
}

#[test]
fn test_two_selects_share_a_field() {
    let mut form = Form::from_html(
        r#"<select name="s[]"><option value="a" selected>A</option></select><select name="s[]"><option value="b" selected>B</option><option value="c">C</option></select>"#,
    )
    .unwrap();
    assert_eq!(form.value("s"), Some(&FieldValue::from(["a", "b"])));

    form.set_value("s", ["c"]).unwrap();
    assert_eq!(
        form.save_html(),
        r#"<select name="s[]"><option value="a">A</option></select><select name="s[]"><option value="b">B</option><option value="c" selected="selected">C</option></select>"#
    );
}

#[test]
fn test_first_element_picks_kind() {
    let form = Form::from_html(r#"<input type="checkbox" name="x" value="1"><input name="x" value="2">"#).unwrap();
    let field = form.field("x").unwrap();
    assert_eq!(field.kind(), FieldKind::Checkable);
    assert_eq!(field.elements().len(), 2);
    assert_eq!(form.value("x"), Some(&FieldValue::Empty));
}

#[test]
fn test_checkbox_set_membership() {
    let mut form = Form::from_html(
        r#"<input type="checkbox" name="c[]" value="r" checked><input type="checkbox" name="c[]" value="g"><input type="checkbox" name="c[]" value="b">"#,
    )
    .unwrap();
    form.set_value("c", ["b", "r", "zzz"]).unwrap();
    assert_eq!(
        form.save_html(),
        r#"<input type="checkbox" name="c[]" value="r" checked="checked"/><input type="checkbox" name="c[]" value="g"/><input type="checkbox" name="c[]" value="b" checked="checked"/>"#
    );
}

#[test]
fn test_empty_value_clears_checkboxes() {
    let mut form = Form::from_html(r#"<input type="checkbox" name="c" checked>"#).unwrap();
    assert_eq!(form.value("c"), Some(&FieldValue::from("on")));
    form.set_value("c", FieldValue::Empty).unwrap();
    assert_eq!(form.value("c"), Some(&FieldValue::Empty));
    assert_eq!(form.save_html(), r#"<input type="checkbox" name="c" value="on"/>"#);
}

// ============================================================================
// Write-back failures
// ============================================================================

#[test]
fn test_count_mismatch_leaves_dom_untouched() {
    let mut form = Form::from_html(r#"<textarea name="t[]">a</textarea><textarea name="t[]">b</textarea>"#).unwrap();
    let before = form.save_html();
    let err = form.set_value("t", ["only"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Field `t` has 2 element(s) but 1 value(s) were given"
    );
    assert_eq!(form.save_html(), before);
    assert_eq!(form.value("t"), Some(&FieldValue::from(["a", "b"])));
}

#[test]
fn test_empty_value_clears_scalar_text_field() {
    let mut form = Form::from_html(r#"<input name="a" value="1">"#).unwrap();
    form.set_value("a", FieldValue::Empty).unwrap();
    assert_eq!(form.save_html(), r#"<input name="a" value=""/>"#);
}

#[test]
fn test_scalar_duplicate_round_trip() {
    let mut form = Form::from_html(r#"<input name="tag" value="a"><input name="tag" value="b">"#).unwrap();
    form.set_values(form.values()).unwrap();
    assert_eq!(form.value("tag"), Some(&FieldValue::from("b")));
    assert_eq!(
        form.save_html(),
        r#"<input name="tag" value="b"/><input name="tag" value=""/>"#
    );
}

#[test]
fn test_scalar_textarea_pair_takes_first_value() {
    let mut form = Form::from_html(r#"<textarea name="t">x</textarea><textarea name="t">y</textarea>"#).unwrap();
    form.set_value("t", "z").unwrap();
    assert_eq!(
        form.save_html(),
        r#"<textarea name="t">z</textarea><textarea name="t"></textarea>"#
    );
}

// ============================================================================
// Malformed markup
// ============================================================================

#[test]
fn test_malformed_markup_is_rejected() {
    let err = Form::from_html("<div>\n<span><input name=\"a\"></div>").unwrap_err();
    let diagnostics = err.diagnostics();
    assert!(!diagnostics.is_empty());
    assert!(diagnostics.iter().any(ParseError::is_fatal));
    assert!(diagnostics.contains(&ParseError::UnclosedTag {
        tag: "span".into(),
        line: 2,
    }));
}

#[test]
fn test_stray_end_tag_is_rejected() {
    let err = Form::from_html("<input name=\"a\"></p></section>").unwrap_err();
    assert!(err.diagnostics().contains(&ParseError::UnexpectedEndTag {
        tag: "section".into(),
        line: 1,
    }));
}

#[test]
fn test_lenient_mode_loads_anyway() {
    let config = FormConfig {
        strict: false,
        ..Default::default()
    };
    let mut form = Form::with_config(config);
    form.load("<div><input name=\"a\" value=\"1\">").unwrap();
    assert_eq!(form.value("a"), Some(&FieldValue::from("1")));
    assert_eq!(form.save_html(), r#"<div><input name="a" value="1"/></div>"#);
}

#[test]
fn test_optional_end_tags_are_fine() {
    let form = Form::from_html("<ul><li><input name=\"a\"><li><input name=\"b\"></ul>").unwrap();
    assert_eq!(form.field_names(), vec!["a", "b"]);
}

// ============================================================================
// Reload and normalization
// ============================================================================

#[test]
fn test_reload_resets_fields() {
    let mut form = Form::from_html(r#"<input name="a[]" value="1">"#).unwrap();
    form.load(r#"<input name="a[]" value="2"><input name="b">"#).unwrap();
    assert_eq!(form.field_names(), vec!["a", "b"]);
    assert_eq!(form.value("a"), Some(&FieldValue::from(["2"])));
    assert_eq!(form.field("a").unwrap().elements().len(), 1);
}

#[test]
fn test_textarea_never_self_closes() {
    let form = Form::from_html(r#"<textarea name="a"></textarea><div></div><br>"#).unwrap();
    assert_eq!(
        form.save_html(),
        r#"<textarea name="a"></textarea><div></div><br/>"#
    );
}

#[test]
fn test_script_and_comment_text_survive_save() {
    let template = r#"<script>var s = "<b/>";</script><!-- <span/> --><input name="a">"#;
    let form = Form::from_html(template).unwrap();
    assert_eq!(
        form.save_html(),
        r#"<script>var s = "<b/>";</script><!-- <span/> --><input name="a"/>"#
    );
}

#[test]
fn test_empty_template() {
    let form = Form::from_html("").unwrap();
    assert!(form.field_names().is_empty());
    assert_eq!(form.save_html(), "");
}

#[test]
fn test_controls_without_name_are_skipped() {
    let form = Form::from_html(r#"<input value="x"><button name="go">Go</button><input name="">"#).unwrap();
    assert_eq!(form.field_names(), vec![""]);
}

#[test]
fn test_attribute_values_are_escaped() {
    let mut form = Form::from_html(r#"<input name="q">"#).unwrap();
    form.set_value("q", r#"say "hi" & <bye>"#).unwrap();
    assert_eq!(
        form.save_html(),
        r#"<input name="q" value="say &quot;hi&quot; &amp; &lt;bye&gt;"/>"#
    );
}
