use ccp_provisioner::compare::{drift, is_truthy, satisfies, values_equal};
use serde_json::json;

#[test]
fn reflexive() {
    let values = [
        json!(null),
        json!(0),
        json!("x"),
        json!([1, 2]),
        json!({"name": "a", "spec": {"workers": 3, "nodes": [{"name": "n1"}]}}),
    ];
    for value in &values {
        assert!(satisfies(value, value), "{value} should satisfy itself");
    }
}

#[test]
fn truthy_missing_key_forces_a_diff() {
    let current = json!({"a": 1});
    assert!(!satisfies(&current, &json!({"a": 1, "b": 2})));
    assert!(satisfies(&current, &json!({"a": 1, "b": []})));
}

#[test]
fn falsy_missing_values_are_satisfied() {
    let current = json!({"a": 1});
    let new = json!({"a": 1, "b": null, "c": "", "d": {}, "e": false, "f": 0});
    assert!(satisfies(&current, &new));
}

#[test]
fn not_symmetric() {
    let current = json!({"a": 1, "extra": "server-managed"});
    let new = json!({"a": 1});
    assert!(satisfies(&current, &new));
    assert!(!satisfies(&new, &current));
}

#[test]
fn scalar_mismatch_fails() {
    assert!(!satisfies(&json!({"a": 1}), &json!({"a": 2})));
    assert!(!satisfies(&json!({"a": 5}), &json!({"a": 0})));
}

#[test]
fn nested_objects_recurse() {
    let current = json!({"spec": {"workers": 3, "version": "1.16"}});
    assert!(satisfies(&current, &json!({"spec": {"workers": 3}})));
    assert!(!satisfies(&current, &json!({"spec": {"workers": 4}})));
}

#[test]
fn keyed_list_matching_is_order_independent() {
    let current = json!({"items": [{"name": "x", "v": 1}, {"name": "y", "v": 2}]});
    let new = json!({"items": [{"name": "y", "v": 2}, {"name": "x", "v": 1}]});
    assert!(satisfies(&current, &new));
}

#[test]
fn keyed_list_entry_missing_remotely_fails() {
    let current = json!({"items": [{"name": "x", "v": 1}]});
    let new = json!({"items": [{"name": "z", "v": 1}]});
    assert!(!satisfies(&current, &new));
}

#[test]
fn unnamed_list_entries_compare_by_position() {
    let current = json!({"pools": [{"size": 1}, {"size": 2}]});
    assert!(satisfies(&current, &json!({"pools": [{"size": 1}, {"size": 2}]})));
    assert!(!satisfies(&current, &json!({"pools": [{"size": 2}, {"size": 1}]})));
}

#[test]
fn scalar_list_entries_compare_by_position() {
    let current = json!({"tags": ["a", "b"]});
    assert!(!satisfies(&current, &json!({"tags": ["b"]})));
    assert!(satisfies(&current, &json!({"tags": ["a"]})));
}

#[test]
fn positional_entry_beyond_current_length_folds_into_absence_rule() {
    let current = json!({"pools": [{"size": 1}]});
    assert!(!satisfies(&current, &json!({"pools": [{"size": 1}, {"size": 2}]})));
    assert!(satisfies(&current, &json!({"pools": [{"size": 1}, {}]})));
}

#[test]
fn non_object_current_behaves_as_empty() {
    assert!(!satisfies(&json!({"spec": "x"}), &json!({"spec": {"a": 1}})));
    assert!(satisfies(&json!({"spec": "x"}), &json!({"spec": {"a": null}})));
}

#[test]
fn truthiness() {
    assert!(!is_truthy(&json!(null)));
    assert!(!is_truthy(&json!(0.0)));
    assert!(!is_truthy(&json!([])));
    assert!(is_truthy(&json!(-1)));
    assert!(is_truthy(&json!(" ")));
    assert!(is_truthy(&json!({"k": null})));
}

#[test]
fn drift_reports_every_unmet_field_with_paths() {
    let current = json!({
        "name": "c1",
        "workers": 3,
        "nodes": [{"name": "n1", "cpu": 2}],
        "tags": ["a"],
    });
    let new = json!({
        "name": "c1",
        "workers": 5,
        "nodes": [{"name": "n1", "cpu": 4}],
        "tags": ["a", "b"],
        "labels": {"env": "prod"},
    });

    let fields: Vec<_> = drift(&current, &new).into_iter().map(|d| d.field).collect();
    assert_eq!(
        fields,
        vec!["workers", "nodes[name=n1].cpu", "tags[1]", "labels"]
    );
}

#[test]
fn drift_records_expected_and_actual() {
    let found = drift(&json!({"workers": 3}), &json!({"workers": 5}));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].expected, json!(5));
    assert_eq!(found[0].actual, json!(3));

    let missing = drift(&json!({}), &json!({"workers": 5}));
    assert_eq!(missing[0].actual, json!(null));
}

#[test]
fn satisfies_agrees_with_drift() {
    let cases = [
        (json!({"a": 1}), json!({"a": 1, "b": 2})),
        (json!({"a": 1}), json!({"a": 1, "b": []})),
        (
            json!({"items": [{"name": "x", "v": 1}]}),
            json!({"items": [{"name": "x", "v": 2}]}),
        ),
        (json!({"tags": ["a"]}), json!({"tags": ["a"]})),
    ];
    for (current, new) in &cases {
        assert_eq!(satisfies(current, new), drift(current, new).is_empty());
    }
}

#[test]
fn numbers_compare_by_value() {
    assert!(satisfies(&json!({"cpu": 2.0}), &json!({"cpu": 2})));
    assert!(satisfies(&json!({"cpu": 2}), &json!({"cpu": 2.0})));
    assert!(satisfies(&json!({"sizes": [1.0, 3]}), &json!({"sizes": [1, 3.0]})));
    assert!(!satisfies(&json!({"cpu": 2.5}), &json!({"cpu": 2})));
    assert!(drift(&json!({"nodes": [{"name": "n1", "cpu": 4.0}]}), &json!({"nodes": [{"name": "n1", "cpu": 4}]})).is_empty());
}

#[test]
fn value_equality_spans_integer_kinds() {
    assert!(values_equal(&json!(u64::MAX), &json!(u64::MAX)));
    assert!(!values_equal(&json!(u64::MAX), &json!(-1)));
    assert!(values_equal(&json!(-3), &json!(-3.0)));
    assert!(!values_equal(&json!(1), &json!("1")));
    assert!(!values_equal(&json!(1), &json!(true)));
}
