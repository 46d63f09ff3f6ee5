use serde_json::json;

use super::*;

#[test]
fn not_inverts_success() {
    let adapter = MemAdapter::new().with_file("f.txt", "x");
    assert!(is_satisfied(&json!({"not": {"type": "dir"}}), &adapter, "f.txt"));

    let errors = evaluate(&json!({"not": {"type": "file"}}), &adapter, "f.txt").unwrap();
    assert_eq!(
        message_at(&errors, "/not"),
        "Negated sub-rule satisfied, but should have failed"
    );
}

#[test]
fn double_negation_agrees_with_the_rule() {
    let adapter = MemAdapter::new().with_file("f.txt", "x").with_dir("d");
    let plain = json!({"type": "file"});
    let doubled = json!({"not": {"not": {"type": "file"}}});
    for path in ["f.txt", "d", "ghost"] {
        assert_eq!(
            is_satisfied(&plain, &adapter, path),
            is_satisfied(&doubled, &adapter, path),
            "path={path}"
        );
    }
}

#[test]
fn not_swallows_sub_rule_errors() {
    let adapter = MemAdapter::new().with_file("f.txt", "x");
    // The negated rule fails, which satisfies 'not'; its errors must not
    // appear anywhere.
    assert!(is_satisfied(&json!({"not": {"type": "dir"}}), &adapter, "f.txt"));
}

#[test]
fn all_of_requires_every_arm() {
    let adapter = MemAdapter::new().with_file("f.txt", "x");
    let rule = json!({"allOf": [{"type": "file"}, {"type": true}]});
    assert!(is_satisfied(&rule, &adapter, "f.txt"));

    let rule = json!({"allOf": [{"type": "file"}, {"type": "dir"}]});
    let errors = evaluate(&rule, &adapter, "f.txt").unwrap();
    assert!(message_at(&errors, "/allOf").contains("sub-rule 1 failed"));
    assert!(errors.contains_key("/allOf/1/type"));
}

#[test]
fn all_of_short_circuits_on_first_failure() {
    let adapter = MemAdapter::new().with_file("f.txt", "x");
    let rule = json!({"allOf": [{"type": "dir"}, {"type": "file"}]});
    let errors = evaluate(&rule, &adapter, "f.txt").unwrap();
    // Only the first failing arm is reported.
    assert!(errors.contains_key("/allOf/0/type"));
    assert!(!errors.contains_key("/allOf/1/type"));
}

#[test]
fn singleton_all_of_agrees_with_the_rule() {
    let adapter = MemAdapter::new().with_file("f.txt", "x").with_dir("d");
    let plain = json!({"type": "file"});
    let wrapped = json!({"allOf": [{"type": "file"}]});
    for path in ["f.txt", "d", "ghost"] {
        assert_eq!(
            is_satisfied(&plain, &adapter, path),
            is_satisfied(&wrapped, &adapter, path),
            "path={path}"
        );
    }
}

#[test]
fn any_of_succeeds_on_first_satisfied_arm() {
    let adapter = MemAdapter::new().with_file("f.txt", "x");
    let rule = json!({"anyOf": [{"type": "dir"}, {"type": "file"}]});
    assert!(is_satisfied(&rule, &adapter, "f.txt"));
}

#[test]
fn any_of_reports_all_arms_on_failure() {
    let adapter = MemAdapter::new();
    let rule = json!({"anyOf": [{"type": "dir"}, {"type": "file"}]});
    let errors = evaluate(&rule, &adapter, "ghost").unwrap();
    assert!(message_at(&errors, "/anyOf").contains("At least 1 of 2"));
    assert!(errors.contains_key("/anyOf/0/type"));
    assert!(errors.contains_key("/anyOf/1/type"));
}

#[test]
fn singleton_any_of_agrees_with_the_rule() {
    let adapter = MemAdapter::new().with_file("f.txt", "x").with_dir("d");
    let plain = json!({"type": "file"});
    let wrapped = json!({"anyOf": [{"type": "file"}]});
    for path in ["f.txt", "d", "ghost"] {
        assert_eq!(
            is_satisfied(&plain, &adapter, path),
            is_satisfied(&wrapped, &adapter, path),
            "path={path}"
        );
    }
}

#[test]
fn empty_operators_are_trivially_satisfied() {
    let adapter = MemAdapter::new();
    assert!(is_satisfied(&json!({"allOf": []}), &adapter, "ghost"));
    assert!(is_satisfied(&json!({"anyOf": []}), &adapter, "ghost"));
    assert!(is_satisfied(&json!({"oneOf": []}), &adapter, "ghost"));
}

#[test]
fn one_of_accepts_exactly_one_satisfied_arm() {
    let adapter = MemAdapter::new().with_file("f.txt", "x");
    let rule = json!({"oneOf": [{"type": "file"}, {"type": "dir"}]});
    assert!(is_satisfied(&rule, &adapter, "f.txt"));
}

#[test]
fn one_of_fails_with_no_satisfied_arm() {
    let adapter = MemAdapter::new();
    let rule = json!({"oneOf": [{"type": "file"}, {"type": "dir"}]});
    let errors = evaluate(&rule, &adapter, "ghost").unwrap();
    assert!(message_at(&errors, "/oneOf").contains("satisfied: 0"));
    // Both failing arms are part of the report.
    assert!(errors.contains_key("/oneOf/0/type"));
    assert!(errors.contains_key("/oneOf/1/type"));
}

#[test]
fn one_of_fails_with_two_satisfied_arms() {
    let adapter = MemAdapter::new().with_file("f.txt", "x");
    let rule = json!({"oneOf": [{"type": "file"}, {"type": true}]});
    let errors = evaluate(&rule, &adapter, "f.txt").unwrap();
    assert!(message_at(&errors, "/oneOf").contains("satisfied: 2"));
}

#[test]
fn if_then_runs_on_condition_success() {
    let adapter = MemAdapter::new()
        .with_file("img/a.jpg", "jpeg")
        .with_json("img/a.jpg_meta.json", &json!({}));
    let rule = json!({
        "if": {"type": "file"},
        "then": {"validMeta": {"type": "object"}},
        "else": true
    });
    assert!(is_satisfied(&rule, &adapter, "img/a.jpg"));

    let adapter = MemAdapter::new().with_file("img/b.txt", "text");
    let errors = evaluate(&rule, &adapter, "img/b.txt").unwrap();
    assert!(errors.contains_key("/then/validMeta"));
}

#[test]
fn if_failure_is_never_reported() {
    let adapter = MemAdapter::new().with_dir("d");
    let rule = json!({
        "if": {"type": "file"},
        "then": {"validMeta": {"type": "object"}},
        "else": true
    });
    assert!(is_satisfied(&rule, &adapter, "d"));
}

#[test]
fn else_branch_failures_are_reported() {
    let adapter = MemAdapter::new().with_dir("d");
    let rule = json!({"if": {"type": "file"}, "then": true, "else": false});
    let errors = evaluate(&rule, &adapter, "d").unwrap();
    assert_eq!(message_at(&errors, "/else"), "Schema forbids this path");
}

#[test]
fn missing_branches_are_trivially_satisfied() {
    let adapter = MemAdapter::new().with_dir("d").with_file("f.txt", "x");
    // No 'else': a failing condition satisfies the rule.
    assert!(is_satisfied(&json!({"if": {"type": "file"}, "then": true}), &adapter, "d"));
    // No 'then': a passing condition satisfies the rule.
    assert!(is_satisfied(&json!({"if": {"type": "file"}, "else": false}), &adapter, "f.txt"));
}

#[test]
fn logical_failure_aborts_before_successor() {
    let adapter = MemAdapter::new().with_file("f.txt", "x");
    let rule = json!({"allOf": [{"type": "dir"}], "next": false});
    let errors = evaluate(&rule, &adapter, "f.txt").unwrap();
    assert!(!errors.contains_key("/next"));
}
