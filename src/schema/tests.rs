//! Schema inference tests

use super::*;
use crate::types::{JsonObject, JsonValue};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn object(value: JsonValue) -> JsonObject {
    match value {
        JsonValue::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn fields(pairs: &[(&str, TypeDescriptor)]) -> FieldMap {
    pairs
        .iter()
        .map(|(name, ty)| ((*name).to_string(), ty.clone()))
        .collect()
}

// ============================================================================
// infer_type
// ============================================================================

#[test]
fn test_infer_primitives() {
    assert_eq!(infer_type(&json!("text")), TypeDescriptor::string());
    assert_eq!(infer_type(&json!(true)), TypeDescriptor::boolean());
    assert_eq!(infer_type(&json!(false)), TypeDescriptor::boolean());
    assert_eq!(infer_type(&json!(42)), TypeDescriptor::integer());
    assert_eq!(infer_type(&json!(-7)), TypeDescriptor::integer());
    assert_eq!(infer_type(&json!(u64::MAX)), TypeDescriptor::integer());
    assert_eq!(infer_type(&json!(3.5)), TypeDescriptor::float());
    assert_eq!(infer_type(&json!(1.0)), TypeDescriptor::float());
}

#[test]
fn test_boolean_is_never_integer() {
    for value in [json!(true), json!(false)] {
        assert_ne!(infer_type(&value), TypeDescriptor::integer());
    }
}

#[test]
fn test_infer_empty_list() {
    assert_eq!(
        infer_type(&json!([])),
        TypeDescriptor::list_of(TypeDescriptor::Unknown)
    );
}

#[test]
fn test_infer_list_uses_first_element_only() {
    assert_eq!(
        infer_type(&json!(["a", 1, true])),
        TypeDescriptor::list_of(TypeDescriptor::string())
    );
    assert_eq!(
        infer_type(&json!([1.5, "b"])),
        TypeDescriptor::list_of(TypeDescriptor::float())
    );
    assert_eq!(
        infer_type(&json!([[1, 2], ["x"]])),
        TypeDescriptor::list_of(TypeDescriptor::list_of(TypeDescriptor::integer()))
    );
}

#[test]
fn test_infer_objects_are_submodel() {
    assert_eq!(
        infer_type(&json!({"city": "X"})),
        TypeDescriptor::model_ref("SubModel")
    );
    assert_eq!(infer_type(&json!({})), TypeDescriptor::model_ref("SubModel"));
    assert_eq!(
        infer_type(&json!([{"id": 1}])),
        TypeDescriptor::list_of(TypeDescriptor::model_ref("SubModel"))
    );
    assert_eq!(derive_model_name(&object(json!({"a": 1}))), LEGACY_MODEL_NAME);
}

#[test]
fn test_infer_null_is_unknown() {
    assert_eq!(infer_type(&json!(null)), TypeDescriptor::Unknown);
    assert_eq!(
        infer_type(&json!([null])),
        TypeDescriptor::list_of(TypeDescriptor::Unknown)
    );
}

#[test]
fn test_type_descriptor_display() {
    let ty = TypeDescriptor::list_of(TypeDescriptor::model_ref("Address"));
    assert_eq!(ty.to_string(), "list<Address>");
    assert_eq!(ty.referenced_model(), Some("Address"));
    assert_eq!(TypeDescriptor::integer().referenced_model(), None);
    assert_eq!(TypeDescriptor::Unknown.to_string(), "unknown");
}

#[test]
fn test_type_descriptor_serde() {
    let ty = TypeDescriptor::list_of(TypeDescriptor::string());
    let value = serde_json::to_value(&ty).unwrap();
    assert_eq!(
        value,
        json!({"kind": "list_of", "of": {"kind": "primitive", "of": "string"}})
    );
    let back: TypeDescriptor = serde_json::from_value(value).unwrap();
    assert_eq!(back, ty);
}

// ============================================================================
// Field names
// ============================================================================

#[test_case("userName", "user_name")]
#[test_case("isActive", "is_active")]
#[test_case("UserName", "user_name")]
#[test_case("HTMLPage", "h_t_m_l_page")]
#[test_case("userID", "user_i_d")]
#[test_case("age", "age")]
#[test_case("already_snake", "already_snake")]
#[test_case("a_B", "a__b")]
#[test_case("X", "x")]
#[test_case("", "")]
fn test_camel_to_snake(input: &str, expected: &str) {
    assert_eq!(camel_to_snake(input), expected);
}

#[test_case("userName")]
#[test_case("HTMLPage")]
#[test_case("snake_case_already")]
#[test_case("Mixed_Case_Key")]
fn test_camel_to_snake_idempotent(input: &str) {
    let once = camel_to_snake(input);
    assert_eq!(camel_to_snake(&once), once);
}

#[test_case("line_items", "LineItems")]
#[test_case("address", "Address")]
#[test_case("a__b", "AB")]
fn test_to_pascal_case(input: &str, expected: &str) {
    assert_eq!(to_pascal_case(input), expected);
}

// ============================================================================
// extract_fields (legacy naming)
// ============================================================================

#[test]
fn test_extract_ignores_objects_in_nested_lists() {
    let root = object(json!({"a": {"x": 1}, "b": [[{"y": 2}]]}));
    let (fields_map, models) = extract_fields(&root);

    assert_eq!(
        fields_map["b"],
        TypeDescriptor::list_of(TypeDescriptor::list_of(TypeDescriptor::model_ref(
            LEGACY_MODEL_NAME
        )))
    );
    assert_eq!(models.len(), 1);
    assert_eq!(
        models[LEGACY_MODEL_NAME],
        fields(&[("x", TypeDescriptor::integer())])
    );
}

#[test]
fn test_extract_registers_direct_list_element() {
    let (_, models) = extract_fields(&object(json!({"a": {"x": 1}, "b": [{"y": 2}]})));
    assert_eq!(
        models[LEGACY_MODEL_NAME],
        fields(&[("y", TypeDescriptor::integer())])
    );
}

#[test]
fn test_extract_empty_object() {
    let (fields, models) = extract_fields(&JsonObject::new());
    assert!(fields.is_empty());
    assert!(models.is_empty());
}

#[test]
fn test_extract_flat_object() {
    let (fields_map, models) =
        extract_fields(&object(json!({"userName": "a", "age": 3, "isActive": true})));

    assert_eq!(
        fields_map,
        fields(&[
            ("user_name", TypeDescriptor::string()),
            ("age", TypeDescriptor::integer()),
            ("is_active", TypeDescriptor::boolean()),
        ])
    );
    assert!(models.is_empty());
}

#[test]
fn test_extract_preserves_document_order() {
    let (fields_map, _) = extract_fields(&object(json!({"zeta": 1, "alpha": 2, "mid": 3})));
    let names: Vec<&str> = fields_map.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_extract_nested_object() {
    let (fields_map, models) = extract_fields(&object(json!({"address": {"city": "X"}})));

    assert_eq!(
        fields_map,
        fields(&[("address", TypeDescriptor::model_ref("SubModel"))])
    );
    assert_eq!(models.len(), 1);
    assert_eq!(
        models["SubModel"],
        fields(&[("city", TypeDescriptor::string())])
    );
}

#[test]
fn test_extract_empty_list() {
    let (fields_map, models) = extract_fields(&object(json!({"tags": []})));
    assert_eq!(
        fields_map,
        fields(&[("tags", TypeDescriptor::list_of(TypeDescriptor::Unknown))])
    );
    assert!(models.is_empty());
}

#[test]
fn test_extract_list_of_objects_inspects_first_element_only() {
    let (fields_map, models) =
        extract_fields(&object(json!({"items": [{"id": 1}, {"id": 2, "extra": "x"}]})));

    assert_eq!(
        fields_map,
        fields(&[(
            "items",
            TypeDescriptor::list_of(TypeDescriptor::model_ref("SubModel"))
        )])
    );
    assert_eq!(
        models["SubModel"],
        fields(&[("id", TypeDescriptor::integer())])
    );
}

#[test]
fn test_extract_sibling_collision_last_wins() {
    let schema = SchemaInferrer::legacy().infer(&object(json!({"a": {"x": 1}, "b": {"y": "s"}})));

    assert_eq!(schema.fields["a"], TypeDescriptor::model_ref("SubModel"));
    assert_eq!(schema.fields["b"], TypeDescriptor::model_ref("SubModel"));
    assert_eq!(schema.models.len(), 1);
    assert_eq!(
        schema.models["SubModel"],
        fields(&[("y", TypeDescriptor::string())])
    );

    let overwritten: Vec<_> = schema
        .diagnostics_of(DiagnosticKind::ModelOverwritten)
        .collect();
    assert_eq!(overwritten.len(), 1);
    assert_eq!(overwritten[0].path, "b");
}

#[test]
fn test_extract_legacy_parent_overwrites_descendant() {
    // Descendants register first, so the immediate child's fields win
    let (_, models) = extract_fields(&object(json!({"outer": {"inner": {"z": 1}, "n": 2}})));

    assert_eq!(
        models["SubModel"],
        fields(&[
            ("inner", TypeDescriptor::model_ref("SubModel")),
            ("n", TypeDescriptor::integer()),
        ])
    );
}

#[test]
fn test_extract_heterogeneous_list_is_not_an_error() {
    let schema = SchemaInferrer::legacy().infer(&object(json!({"values": [1, "two", 3.0]})));

    assert_eq!(
        schema.fields["values"],
        TypeDescriptor::list_of(TypeDescriptor::integer())
    );
    assert!(schema.has_heterogeneous_lists());
    let diagnostic = schema
        .diagnostics_of(DiagnosticKind::HeterogeneousList)
        .next()
        .unwrap();
    assert_eq!(diagnostic.path, "values");
    assert!(diagnostic.message.contains("element 1 is string"));
}

#[test]
fn test_extract_null_field() {
    let schema = SchemaInferrer::new().infer(&object(json!({"deletedAt": null})));

    assert_eq!(schema.fields["deleted_at"], TypeDescriptor::Unknown);
    let nulls: Vec<_> = schema.diagnostics_of(DiagnosticKind::NullValue).collect();
    assert_eq!(nulls.len(), 1);
    assert_eq!(nulls[0].path, "deleted_at");
}

// ============================================================================
// Field-path naming
// ============================================================================

#[test]
fn test_field_path_naming_distinguishes_siblings() {
    let schema = SchemaInferrer::new().infer(&object(json!({
        "billingAddress": {"street": "Main"},
        "owner": {"name": "Ann"},
        "lineItems": [{"sku": "A1", "qty": 2}]
    })));

    assert_eq!(
        schema.fields,
        fields(&[
            ("billing_address", TypeDescriptor::model_ref("BillingAddress")),
            ("owner", TypeDescriptor::model_ref("Owner")),
            (
                "line_items",
                TypeDescriptor::list_of(TypeDescriptor::model_ref("LineItemsItem"))
            ),
        ])
    );
    let names: Vec<&str> = schema.models.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["BillingAddress", "Owner", "LineItemsItem"]);
    assert_eq!(
        schema.models["LineItemsItem"],
        fields(&[
            ("sku", TypeDescriptor::string()),
            ("qty", TypeDescriptor::integer()),
        ])
    );
    assert!(schema.diagnostics.is_empty());
}

#[test]
fn test_field_path_naming_numbers_collisions() {
    let schema = SchemaInferrer::new().infer(&object(json!({
        "user": {"address": {"city": "X"}},
        "company": {"address": {"zip": "1"}}
    })));

    assert_eq!(
        schema.models["User"],
        fields(&[("address", TypeDescriptor::model_ref("Address"))])
    );
    assert_eq!(
        schema.models["Company"],
        fields(&[("address", TypeDescriptor::model_ref("Address2"))])
    );
    assert_eq!(
        schema.models["Address2"],
        fields(&[("zip", TypeDescriptor::string())])
    );
}

#[test]
fn test_reserved_name_is_skipped() {
    let schema = SchemaInferrer::new()
        .with_reserved_name("Input")
        .infer(&object(json!({"input": {"raw": "x"}})));

    assert_eq!(schema.fields["input"], TypeDescriptor::model_ref("Input2"));
    assert!(schema.models.contains_key("Input2"));
}

#[test]
fn test_imported_python_names_are_skipped() {
    let schema = SchemaInferrer::new()
        .with_reserved_name("InputModel")
        .infer(&object(json!({
            "list": {"a": 1},
            "any": {"b": 2},
            "base_model": {"c": 3},
            "note": null
        })));

    assert_eq!(schema.fields["list"], TypeDescriptor::model_ref("List2"));
    assert_eq!(schema.fields["any"], TypeDescriptor::model_ref("Any2"));
    assert_eq!(schema.fields["base_model"], TypeDescriptor::model_ref("BaseModel2"));
    for name in RESERVED_MODEL_NAMES {
        assert!(!schema.models.contains_key(name), "{name} must stay free");
    }
}

#[test]
fn test_odd_field_names_still_make_class_names() {
    let schema = SchemaInferrer::new().infer(&object(json!({
        "1st": {"a": 1},
        "": {"b": 2}
    })));

    assert_eq!(schema.fields["1st"], TypeDescriptor::model_ref("Model1st"));
    assert_eq!(schema.fields[""], TypeDescriptor::model_ref("Model"));
}

// ============================================================================
// Propagation and traversal
// ============================================================================

#[test]
fn test_descendants_are_propagated_before_parents() {
    let schema = SchemaInferrer::new().infer(&object(json!({
        "order": {
            "customer": {"contact": {"email": "a@b.c"}},
            "lines": [{"product": {"sku": "X"}}]
        }
    })));

    let names: Vec<&str> = schema.models.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec!["Contact", "Customer", "Product", "LinesItem", "Order"]
    );
    assert!(schema.dangling_refs().is_empty());
    assert_eq!(schema.max_depth, 3);
}

#[test]
fn test_objects_inside_nested_lists_are_registered() {
    let schema = SchemaInferrer::new().infer(&object(json!({"grid": [[{"x": 1}]]})));

    assert_eq!(
        schema.fields["grid"],
        TypeDescriptor::list_of(TypeDescriptor::list_of(TypeDescriptor::model_ref(
            "GridItem"
        )))
    );
    assert_eq!(
        schema.models["GridItem"],
        fields(&[("x", TypeDescriptor::integer())])
    );
    assert!(schema.dangling_refs().is_empty());
}

#[test]
fn test_deep_nesting_without_native_recursion() {
    const DEPTH: usize = 2_000;

    let mut value = json!({"leaf": true});
    for _ in 0..DEPTH {
        let mut wrapper = JsonObject::new();
        wrapper.insert("child".to_string(), value);
        value = JsonValue::Object(wrapper);
    }
    let root = object(value);

    let schema = SchemaInferrer::new().infer(&root);
    assert_eq!(schema.max_depth, DEPTH);
    assert_eq!(schema.models.len(), DEPTH);
    assert_eq!(schema.fields["child"], TypeDescriptor::model_ref("Child"));
    assert!(schema.dangling_refs().is_empty());

    let (_, legacy) = extract_fields(&root);
    assert_eq!(legacy.len(), 1);

    // serde_json drops deep values recursively; unwind by hand
    let mut current = JsonValue::Object(root);
    while let JsonValue::Object(mut map) = current {
        current = map.remove("child").unwrap_or(JsonValue::Null);
    }
}

#[test]
fn test_nested_heterogeneous_list_path() {
    let schema = SchemaInferrer::new().infer(&object(json!({
        "orders": [{"tags": [["a", 1]]}]
    })));

    let paths: Vec<&str> = schema
        .diagnostics_of(DiagnosticKind::HeterogeneousList)
        .map(|d| d.path.as_str())
        .collect();
    assert_eq!(paths, vec!["orders[].tags[]"]);
}

#[test]
fn test_extracted_schema_serializes() {
    let schema = SchemaInferrer::new().infer(&object(json!({"address": {"city": "X"}})));
    let value = serde_json::to_value(&schema).unwrap();

    assert_eq!(value["fields"]["address"]["kind"], "model_ref");
    assert_eq!(value["fields"]["address"]["of"], "Address");
    assert_eq!(value["models"]["Address"]["city"]["of"], "string");
    assert_eq!(value["max_depth"], 1);
    assert!(value.get("diagnostics").is_none());
}
