mod common;
use common::run;

#[test]
fn arithmetic_precedence() {
    let result = run("print 1 + 2 * 3;");
    assert!(!result.had_error);
    assert_eq!(result.stdout, "7\n");
}

#[test]
fn string_concatenation() {
    let result = run(r#"print "foo" + "bar";"#);
    assert!(!result.had_error);
    assert_eq!(result.stdout, "foobar\n");
}

#[test]
fn adding_number_to_string_is_a_runtime_error() {
    let result = run(r#"print "foo" + 1;"#);
    assert!(result.had_runtime_error);
}

#[test]
fn division_by_zero_is_a_runtime_error() {
    let result = run("print 1 / 0;");
    assert!(result.had_runtime_error);
}

#[test]
fn comparisons_treat_nil_as_strictly_least() {
    let result = run(
        r#"
        print nil < 1;
        print nil > 1;
        print nil <= 1;
        print nil >= 1;
        print 1 < nil;
        print 1 > nil;
        "#,
    );
    assert!(!result.had_error);
    assert_eq!(result.stdout, "true\nfalse\ntrue\nfalse\nfalse\ntrue\n");
}

#[test]
fn equality_never_matches_across_types() {
    let result = run(
        r#"
        print 1 == "1";
        print nil == false;
        print 0 == false;
        "#,
    );
    assert!(!result.had_error);
    assert_eq!(result.stdout, "false\nfalse\nfalse\n");
}

#[test]
fn zero_and_empty_string_are_truthy() {
    let result = run(
        r#"
        if (0) { print "zero truthy"; }
        if ("") { print "empty string truthy"; }
        "#,
    );
    assert!(!result.had_error);
    assert_eq!(result.stdout, "zero truthy\nempty string truthy\n");
}

#[test]
fn unary_minus_requires_a_number() {
    let result = run(r#"print -"nope";"#);
    assert!(result.had_runtime_error);
}

#[test]
fn unary_bang_negates_truthiness() {
    let result = run(
        r#"
        print !true;
        print !nil;
        print !0;
        "#,
    );
    assert!(!result.had_error);
    assert_eq!(result.stdout, "false\ntrue\nfalse\n");
}

#[test]
fn number_stringifies_without_trailing_zero() {
    let result = run(
        r#"
        print 3.0;
        print 3.5;
        "#,
    );
    assert!(!result.had_error);
    assert_eq!(result.stdout, "3\n3.5\n");
}
