mod common;
use common::run;

#[test]
fn for_continue_still_runs_the_increment() {
    let result = run("for (var i = 0; i < 3; i = i + 1) { if (i == 1) continue; print i; }");
    assert!(!result.had_error);
    assert_eq!(result.stdout, "0\n2\n");
}

#[test]
fn for_break_stops_the_loop_entirely() {
    let result = run("for (var i = 0; i < 5; i = i + 1) { if (i == 2) break; print i; }");
    assert!(!result.had_error);
    assert_eq!(result.stdout, "0\n1\n");
}

#[test]
fn while_continue_restarts_without_running_anything_after_it() {
    let result = run(
        r#"
        var i = 0;
        while (i < 3) {
            i = i + 1;
            if (i == 2) continue;
            print i;
        }
        "#,
    );
    assert!(!result.had_error);
    assert_eq!(result.stdout, "1\n3\n");
}

#[test]
fn nested_loops_break_only_the_innermost() {
    let result = run(
        r#"
        for (var i = 0; i < 2; i = i + 1) {
            for (var j = 0; j < 5; j = j + 1) {
                if (j == 1) break;
                print j;
            }
        }
        "#,
    );
    assert!(!result.had_error);
    assert_eq!(result.stdout, "0\n0\n");
}

#[test]
fn break_outside_loop_is_a_static_error() {
    let result = run("break;");
    assert!(result.had_error);
}

#[test]
fn continue_outside_loop_is_a_static_error() {
    let result = run("continue;");
    assert!(result.had_error);
}

#[test]
fn for_loop_with_omitted_clauses_still_desugars() {
    let result = run(
        r#"
        var i = 0;
        for (; i < 3;) {
            print i;
            i = i + 1;
        }
        "#,
    );
    assert!(!result.had_error);
    assert_eq!(result.stdout, "0\n1\n2\n");
}

#[test]
fn if_else_chooses_the_right_branch() {
    let result = run(
        r#"
        if (1 < 2) { print "yes"; } else { print "no"; }
        if (2 < 1) { print "yes"; } else { print "no"; }
        "#,
    );
    assert!(!result.had_error);
    assert_eq!(result.stdout, "yes\nno\n");
}

#[test]
fn and_or_short_circuit_and_return_operand_values() {
    let result = run(
        r#"
        print nil or "default";
        print "first" and "second";
        print false and "unreached";
        "#,
    );
    assert!(!result.had_error);
    assert_eq!(result.stdout, "default\nsecond\nfalse\n");
}

#[test]
fn ternary_evaluates_only_the_chosen_branch() {
    let result = run(
        r#"
        fun boom() { print "should not run"; return 1; }
        print true ? "then" : boom();
        "#,
    );
    assert!(!result.had_error);
    assert_eq!(result.stdout, "then\n");
}
