//! Unit tests for schema-driven validation
//!
//! Covers the documented scenarios, dynamic schema fields, generator schemas,
//! the duplicate-detection modes, strict keys and finding order.

use datatester::{DataTester, Kind, Map, SchemaError, TesterOptions, Value};
use serde_json::json;

fn data(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn messages(tester: &DataTester) -> Vec<&str> {
    tester.errors().iter().map(|e| e.error.as_str()).collect()
}

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn test_number_above_max() {
        let mut tester = DataTester::new(json!({"type": "number", "min": 0, "max": 10}));
        let errors = tester.test(&Value::from(15)).unwrap();

        assert_eq!(errors.len(), 1);
        let error = &errors.as_slice()[0];
        assert_eq!(error.path, "DATA");
        assert_eq!(error.error, "Max value validation failed");
        assert_eq!(error.value, Some(Value::from(15)));
        assert_eq!(error.expected, Value::from(10));
    }

    #[test]
    fn test_object_property_type() {
        let mut tester = DataTester::new(json!({
            "type": "object",
            "data": {"id": {"type": "number"}, "name": {"type": "string"}}
        }));
        let errors = tester.test(&data(json!({"id": 1, "name": 42}))).unwrap();

        assert_eq!(errors.len(), 1);
        let error = &errors.as_slice()[0];
        assert_eq!(error.path, "DATA.name");
        assert_eq!(error.error, "Type validation failed");
        assert_eq!(error.expected, Value::from("string"));
        assert_eq!(error.value, Some(Value::from(42)));
    }

    #[test]
    fn test_array_element_type() {
        let mut tester = DataTester::new(json!({"type": "array", "elements": {"type": "number"}}));
        let errors = tester.test(&data(json!([1, "x", 3]))).unwrap();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.as_slice()[0].path, "DATA[1]");
    }

    #[test]
    fn test_valid_document() {
        let mut tester = DataTester::new(json!({
            "type": "object",
            "strictKeys": ["id", "tags", "owner"],
            "data": {
                "id": {"type": "number", "min": 1},
                "tags": {"type": "array", "allowDuplicates": false, "elements": {"type": "string"}},
                "owner": {
                    "type": "object",
                    "canBeNull": true,
                    "data": {"email": {"type": "string", "required": false}}
                }
            }
        }));

        assert!(tester.test(&data(json!({"id": 3, "tags": ["a", "b"], "owner": null}))).unwrap().is_empty());
        assert!(tester.test(&data(json!({"id": 3, "tags": [], "owner": {}}))).unwrap().is_empty());
        assert!(tester.is_valid());
    }
}

#[cfg(test)]
mod finding_accumulation {
    use super::*;

    #[test]
    fn test_all_findings_in_traversal_order() {
        let mut tester = DataTester::new(json!({
            "type": "object",
            "data": {
                "a": {"type": "string"},
                "list": {
                    "type": "array",
                    "maxLength": 1,
                    "elements": {"type": "object", "data": {"n": {"type": "number", "max": 0}}}
                },
                "z": {"type": "boolean", "value": true}
            }
        }));
        tester.test(&data(json!({"a": 1, "list": [{"n": 1}, {"n": 2}], "z": false}))).unwrap();

        let paths: Vec<&str> = tester.errors().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["DATA.a", "DATA.list", "DATA.list[0].n", "DATA.list[1].n", "DATA.z"]);
        assert_eq!(
            messages(&tester),
            vec![
                "Type validation failed",
                "Maximum length validation failed",
                "Max value validation failed",
                "Max value validation failed",
                "Value validation failed",
            ]
        );
    }

    #[test]
    fn test_findings_follow_schema_key_order() {
        let mut tester = DataTester::new(json!({
            "type": "object",
            "data": {
                "zeta": {"type": "number"},
                "alpha": {"type": "number"},
                "mid": {"type": "number"}
            }
        }));
        tester.test(&data(json!({"mid": "c", "alpha": "b", "zeta": "a"}))).unwrap();

        let paths: Vec<&str> = tester.errors().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["DATA.zeta", "DATA.alpha", "DATA.mid"]);
    }

    #[test]
    fn test_missing_property_reports_required() {
        let mut tester = DataTester::new(json!({
            "type": "object",
            "data": {"id": {"type": "number"}, "nick": {"type": "string", "required": false}}
        }));
        tester.test(&data(json!({}))).unwrap();

        assert_eq!(messages(&tester), vec!["Required validation failed", "Type validation failed"]);
        let required = &tester.errors().as_slice()[0];
        assert_eq!(required.path, "DATA.id");
        assert_eq!(required.value, None);
        assert_eq!(required.expected, Value::from("number"));
    }

    #[test]
    fn test_optional_subtree_is_skipped() {
        let mut tester = DataTester::new(json!({
            "type": "object",
            "data": {
                "settings": {
                    "type": "object",
                    "required": false,
                    "strictKeys": ["x"],
                    "data": {"x": {"type": "number"}}
                }
            }
        }));
        assert!(tester.test(&data(json!({}))).unwrap().is_empty());
    }

    #[test]
    fn test_break_on_error_keeps_first_finding() {
        let schema = json!({"type": "array", "elements": {"type": "number"}});
        let mut tester = DataTester::with_options(schema, TesterOptions::new().with_break_on_error());
        tester.test(&data(json!(["a", "b", "c"]))).unwrap();

        assert_eq!(tester.errors().len(), 1);
        assert_eq!(tester.errors().as_slice()[0].path, "DATA[0]");
    }

    #[test]
    fn test_findings_serialize_as_records() {
        let mut tester = DataTester::new(json!({"type": "object", "data": {"id": {"type": "number"}}}));
        let errors = tester.test(&data(json!({"id": "7"}))).unwrap();

        assert_eq!(
            serde_json::to_value(errors).unwrap(),
            json!([{
                "path": "DATA.id",
                "error": "Type validation failed",
                "value": "7",
                "expected": "number"
            }])
        );
    }
}

#[cfg(test)]
mod dynamic_schemas {
    use super::*;

    #[test]
    fn test_computed_field_reads_particle() {
        // `max` of each element is computed from the element itself
        let element: Value = Map::new()
            .with("type", "object")
            .with(
                "data",
                Value::computed(|item| {
                    let limit = item.and_then(|i| i.get("limit")).cloned().unwrap_or(Value::from(0));
                    Map::new()
                        .with("limit", Map::new().with("type", "number"))
                        .with("used", Map::new().with("type", "number").with("max", limit))
                }),
            )
            .into();
        let schema: Value = Map::new().with("type", "array").with("elements", element).into();

        let mut tester = DataTester::new(schema);
        tester
            .test(&data(json!([{"limit": 5, "used": 3}, {"limit": 2, "used": 4}])))
            .unwrap();

        assert_eq!(tester.errors().len(), 1);
        let error = &tester.errors().as_slice()[0];
        assert_eq!(error.path, "DATA[1].used");
        assert_eq!(error.expected, Value::from(2));
    }

    #[test]
    fn test_generator_selects_variant_by_discriminator() {
        let shape = Value::function(|particle| {
            let variant = particle.and_then(|p| p.get("kind")).and_then(Value::as_str);
            let descriptor = match variant {
                Some("circle") => json!({
                    "type": "object",
                    "strictKeys": ["kind", "radius"],
                    "data": {"radius": {"type": "number", "min": 0}}
                }),
                _ => json!({
                    "type": "object",
                    "strictKeys": ["kind", "width", "height"],
                    "data": {"width": {"type": "number"}, "height": {"type": "number"}}
                }),
            };
            Some(Value::from(descriptor))
        });
        let schema: Value = Map::new()
            .with("type", "object")
            .with("data", Map::new().with("shape", shape))
            .into();

        let mut tester = DataTester::new(schema);
        assert!(tester.test(&data(json!({"shape": {"kind": "circle", "radius": 2}}))).unwrap().is_empty());
        assert!(tester
            .test(&data(json!({"shape": {"kind": "rect", "width": 1, "height": 2}})))
            .unwrap()
            .is_empty());

        tester.test(&data(json!({"shape": {"kind": "circle", "radius": -1}}))).unwrap();
        assert_eq!(tester.errors().len(), 1);
        assert_eq!(tester.errors().as_slice()[0].path, "DATA.shape.radius");
        assert_eq!(tester.errors().as_slice()[0].error, "Min value validation failed");

        tester.test(&data(json!({"shape": {"kind": "rect", "radius": 1}}))).unwrap();
        assert_eq!(
            messages(&tester),
            vec![
                "Strict keys validation failed. Missing or additional keys were found",
                "Required validation failed",
                "Type validation failed",
                "Required validation failed",
                "Type validation failed",
            ]
        );
    }

    #[test]
    fn test_generator_per_element_through_computed_elements() {
        // `elements` is resolved against the whole array, so a per-element
        // generator is supplied as the result of a computed field
        let per_element = Value::function(|item| {
            let ty = if item.and_then(Value::as_str).is_some() { "string" } else { "number" };
            Some(Map::new().with("type", ty).with("canBeNull", false).into())
        });
        let schema: Value = Map::new()
            .with("type", "array")
            .with("elements", Value::computed(move |_| per_element.clone()))
            .into();

        let mut tester = DataTester::new(schema);
        tester.test(&data(json!(["a", 1, null]))).unwrap();
        assert_eq!(messages(&tester), vec!["Type validation failed", "Value cannot be null"]);
        assert_eq!(tester.errors().as_slice()[0].path, "DATA[2]");
    }

    #[test]
    fn test_computed_required_from_sibling() {
        let schema: Value = Map::new()
            .with("type", "object")
            .with(
                "data",
                Value::computed(|object| {
                    let has_email = object.and_then(|o| o.get("email")).is_some();
                    Map::new()
                        .with("email", Map::new().with("type", "string").with("required", false))
                        .with("verified", Map::new().with("type", "boolean").with("required", has_email))
                }),
            )
            .into();

        let mut tester = DataTester::new(schema);
        assert!(tester.test(&data(json!({}))).unwrap().is_empty());

        tester.test(&data(json!({"email": "a@b.c"}))).unwrap();
        assert_eq!(tester.errors().as_slice()[0].path, "DATA.verified");
        assert_eq!(tester.errors().as_slice()[0].error, "Required validation failed");
    }

    #[test]
    fn test_computed_type() {
        let schema: Value = Map::new()
            .with("type", Value::computed(|_| vec!["string", "number"]))
            .into();
        let mut tester = DataTester::new(schema);
        assert!(tester.test(&Value::from(1)).unwrap().is_empty());
        assert_eq!(tester.test(&Value::from(true)).unwrap().len(), 1);
    }
}

#[cfg(test)]
mod duplicates {
    use super::*;

    #[test]
    fn test_repeated_values_reported_once() {
        let mut tester = DataTester::new(json!({"type": "array", "allowDuplicates": false}));
        let errors = tester.test(&data(json!([1, "a", 1, "a", 1, 2]))).unwrap();

        assert_eq!(errors.len(), 1);
        let error = &errors.as_slice()[0];
        assert_eq!(error.error, "Duplicate values validation failed. Duplicates: [1,a]");
        assert_eq!(error.value, Some(data(json!([1, "a", 1, "a", 1, 2]))));
        assert_eq!(error.expected, Value::from(false));
    }

    #[test]
    fn test_listed_in_first_occurrence_order() {
        let mut tester = DataTester::new(json!({"type": "array", "allowDuplicates": false}));
        let errors = tester.test(&data(json!(["x", "y", "y", "x"]))).unwrap();
        assert_eq!(errors.as_slice()[0].error, "Duplicate values validation failed. Duplicates: [x,y]");

        let errors = tester.test(&data(json!([-0.0, 0, 5, 5]))).unwrap();
        assert_eq!(errors.as_slice()[0].error, "Duplicate values validation failed. Duplicates: [0,5]");
    }

    #[test]
    fn test_unique_values_pass() {
        let mut tester = DataTester::new(json!({"allowDuplicates": false}));
        assert!(tester.test(&data(json!([null, true, 1, "1"]))).unwrap().is_empty());
    }

    #[test]
    fn test_composite_elements_are_schema_errors() {
        let mut tester = DataTester::new(json!({"allowDuplicates": false}));
        let err = tester.test(&data(json!([[1], [1]]))).unwrap_err();
        assert!(matches!(err, SchemaError::NonPrimitiveDuplicate { found: Kind::Array, .. }));
    }

    #[test]
    fn test_supplied_array_mode() {
        // uniqueness across two sibling fields
        let schema: Value = Map::new()
            .with("type", "object")
            .with(
                "data",
                Map::new().with(
                    "backup",
                    Map::new().with("type", "array").with(
                        "allowDuplicates",
                        Value::computed(|_| vec!["x", "y", "x"]),
                    ),
                ),
            )
            .into();
        let mut tester = DataTester::new(schema);
        let errors = tester.test(&data(json!({"backup": []}))).unwrap();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.as_slice()[0].error, "Duplicate values validation failed. Duplicates: [x]");
        assert_eq!(errors.as_slice()[0].value, Some(Value::from(vec!["x", "y", "x"])));
    }

    #[test]
    fn test_projection_mode_reports_key_and_function() {
        let ids = Value::computed(|array| {
            array
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(|i| i.get("id").cloned()).collect::<Vec<_>>())
                .unwrap_or_default()
        });
        let names = Value::computed(|array| {
            array
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(|i| i.get("name").cloned()).collect::<Vec<_>>())
                .unwrap_or_default()
        });
        let schema: Value = Map::new()
            .with("type", "array")
            .with("allowDuplicates", Map::new().with("id", ids.clone()).with("name", names))
            .into();

        let mut tester = DataTester::new(schema);
        let errors = tester
            .test(&data(json!([{"id": 1, "name": "a"}, {"id": 1, "name": "b"}, {"id": 2, "name": "c"}])))
            .unwrap();

        assert_eq!(errors.len(), 1);
        let error = &errors.as_slice()[0];
        assert_eq!(error.error, "Duplicate values validation failed. Duplicates for \"id\": [1]");
        assert_eq!(error.value, Some(ids));
        assert_eq!(error.expected, Value::from(false));
    }
}

#[cfg(test)]
mod strict_keys {
    use super::*;

    #[test]
    fn test_exact_key_set_passes_regardless_of_order() {
        let mut tester = DataTester::new(json!({"strictKeys": ["b", "a"]}));
        assert!(tester.test(&data(json!({"a": 1, "b": 2}))).unwrap().is_empty());
    }

    #[test]
    fn test_extra_and_missing_keys_fail() {
        let mut tester = DataTester::new(json!({"strictKeys": ["a", "b"]}));

        let errors = tester.test(&data(json!({"a": 1, "b": 2, "c": 3}))).unwrap();
        assert_eq!(errors.len(), 1);
        let error = &errors.as_slice()[0];
        assert_eq!(error.error, "Strict keys validation failed. Missing or additional keys were found");
        assert_eq!(error.value, Some(Value::from(vec!["a", "b", "c"])));
        assert_eq!(error.expected, Value::from(vec!["a", "b"]));

        assert_eq!(tester.test(&data(json!({"a": 1, "c": 2}))).unwrap().len(), 1);
    }

    #[test]
    fn test_reported_keys_keep_data_order() {
        let mut tester = DataTester::new(json!({"strictKeys": ["zeta"]}));
        let errors = tester.test(&data(json!({"zeta": 1, "alpha": 2, "mid": 3}))).unwrap();
        assert_eq!(errors.as_slice()[0].value, Some(Value::from(vec!["zeta", "alpha", "mid"])));
    }
}

#[cfg(test)]
mod schema_errors {
    use super::*;

    #[test]
    fn test_schema_error_aborts_pass() {
        let mut tester = DataTester::new(json!({
            "type": "object",
            "data": {"a": {"type": "number"}, "b": {"min": "zero"}}
        }));
        let err = tester.test(&data(json!({"a": "x", "b": 1}))).unwrap_err();

        assert_eq!(
            err,
            SchemaError::InvalidField {
                path: "DATA.b".to_string(),
                field: "min".to_string(),
                expected: "number",
                found: Kind::String,
            }
        );
        // findings before the abort are kept but never merged with schema errors
        assert_eq!(messages(&tester), vec!["Type validation failed"]);
    }

    #[test]
    fn test_invalid_node_inside_data() {
        let mut tester = DataTester::new(json!({"type": "object", "data": {"a": "number"}}));
        let err = tester.test(&data(json!({"a": 1}))).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSchemaNode { ref path, found: Kind::String } if path == "DATA.a"));
    }
}
