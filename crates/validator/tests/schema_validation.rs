//! End-to-end tests for validators, rule sets and structural rules.

use formguard_validator::path;
use formguard_validator::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn run(validator: &Validator, input: Value, options: &ValidateOptions) -> ValidationOutcome {
    validator.validate_value(&input, options).unwrap()
}

fn defaults() -> ValidateOptions {
    ValidateOptions::new()
}

// ============================================================================
// PIPELINE
// ============================================================================

#[test]
fn valid_input_is_transformed_and_error_free() {
    let v = Validator::builder()
        .field("email", [is_required(), is_string(), to_lower_case(), is_email()])
        .field("age", [to_int(), is_int(RangeConfig::new().min(18.0)).unwrap()])
        .field("nick", [is_string(), to_upper_case()])
        .build()
        .unwrap();

    let outcome = run(&v, json!({"email": "Ada@Example.COM", "age": "36"}), &defaults());

    assert_eq!(outcome.errors, None);
    assert_eq!(
        Value::Object(outcome.values),
        json!({"email": "ada@example.com", "age": 36})
    );
}

#[test]
fn every_failing_rule_is_reported_by_default() {
    let v = Validator::builder()
        .field("code", [is_required(), is_len(LenConfig::new().min(2)).unwrap()])
        .build()
        .unwrap();

    let errors = run(&v, json!({"code": ""}), &defaults()).errors.unwrap();
    let code = errors.get("code").unwrap();

    assert_eq!(
        code.iter().map(|e| e.validator).collect::<Vec<_>>(),
        ["isRequired", "isLen"]
    );
    assert_eq!(code[1].message(), Some("'code' should not be less than 2 characters."));
}

#[test]
fn return_rule_set_early_keeps_only_the_first_failure() {
    let v = Validator::builder()
        .field("code", [is_string(), is_len(LenConfig::new().min(2)).unwrap()])
        .field("pin", [is_required(), is_len(LenConfig::new().min(4)).unwrap()])
        .build()
        .unwrap();

    let options = ValidateOptions::new().return_rule_set_early(true);
    let errors = run(&v, json!({"code": 42, "pin": ""}), &options).errors.unwrap();

    assert_eq!(errors.get("code").unwrap().len(), 1);
    assert_eq!(errors.get("code").unwrap()[0].validator, "isString");
    assert_eq!(errors.get("pin").unwrap().len(), 1);
    assert_eq!(errors.get("pin").unwrap()[0].validator, "isRequired");
}

#[test]
fn return_early_stops_at_the_first_failing_field() {
    let v = Validator::builder()
        .field("name", is_required())
        .field("email", [is_required(), is_email()])
        .build()
        .unwrap();

    let options = ValidateOptions::new().return_early(true);
    let outcome = run(&v, json!({"name": "", "email": "nope"}), &options);
    let errors = outcome.errors.unwrap();

    assert_eq!(errors.keys().collect::<Vec<_>>(), ["name"]);
    assert_eq!(outcome.values.get("name"), Some(&json!("")));
    assert_eq!(outcome.values.get("email"), None);
}

#[rstest]
#[case(None, None, 2)]
#[case(None, Some(true), 1)]
#[case(Some(false), Some(true), 2)]
#[case(Some(true), Some(false), 1)]
fn constructor_flags_win_over_call_flags(
    #[case] constructor: Option<bool>,
    #[case] call: Option<bool>,
    #[case] failing_fields: usize,
) {
    let mut options = ValidatorOptions::new();
    options.return_early = constructor;
    let v = Validator::builder()
        .field("a", is_required())
        .field("b", is_required())
        .options(options)
        .build()
        .unwrap();

    let mut call_options = ValidateOptions::new();
    call_options.return_early = call;

    // Repeated calls resolve the flags again each time.
    for _ in 0..2 {
        let errors = run(&v, json!({}), &call_options).errors.unwrap();
        assert_eq!(errors.len(), failing_fields);
    }
}

#[test]
fn absent_fields_are_seen_as_null() {
    let v = Validator::builder()
        .field("required", is_required())
        .field("optional", [is_string(), is_len(LenConfig::new().min(3)).unwrap()])
        .build()
        .unwrap();

    let outcome = run(&v, json!({}), &defaults());
    let errors = outcome.errors.unwrap();

    assert_eq!(errors.keys().collect::<Vec<_>>(), ["required"]);
    assert_eq!(errors.get("required").unwrap()[0].value, Value::Null);
    assert!(outcome.values.is_empty());
}

// ============================================================================
// NESTED OBJECTS
// ============================================================================

fn user_schema() -> Validator {
    let address = Validator::builder()
        .field("city", [is_string(), to_upper_case()])
        .field("zip", [is_required(), match_regex(r"^\d{5}$").unwrap()])
        .build()
        .unwrap();
    let user = Validator::builder()
        .field("name", is_string())
        .field("address", is_object(address))
        .build()
        .unwrap();
    Validator::builder().field("user", is_object(user)).build().unwrap()
}

#[test]
fn nested_errors_are_flattened_with_full_paths() {
    let outcome = run(
        &user_schema(),
        json!({"user": {"address": {"city": 42, "zip": "12345"}}}),
        &defaults(),
    );
    let errors = outcome.errors.unwrap();

    assert_eq!(errors.len(), 1);
    let user = errors.get("user").unwrap();
    assert_eq!(user.len(), 1);
    assert_eq!(user[0].path, path!["user", "address", "city"]);
    assert_eq!(user[0].validator, "isString");
    assert_eq!(user[0].message(), Some("'city' should be a string."));
    assert_eq!(user[0].value, json!(42));
}

#[test]
fn nested_values_are_transformed() {
    let outcome = run(
        &user_schema(),
        json!({"user": {"name": "ada", "address": {"city": "paris", "zip": "75001"}, "extra": 1}}),
        &defaults(),
    );

    assert!(outcome.is_valid());
    assert_eq!(
        Value::Object(outcome.values),
        json!({"user": {"name": "ada", "address": {"city": "PARIS", "zip": "75001"}}})
    );
}

#[test]
fn nested_errors_are_kept_as_trees_on_request() {
    let options = ValidateOptions::new().show_nested_error(true);
    let outcome = run(
        &user_schema(),
        json!({"user": {"name": 1, "address": {"city": "x", "zip": "1"}}}),
        &options,
    );
    let errors = outcome.errors.unwrap();

    let user = &errors.get("user").unwrap()[0];
    assert_eq!(user.validator, "isObject");
    assert_eq!(user.path, path!["user"]);

    let tree = user.error.as_nested().unwrap();
    assert_eq!(tree.keys().collect::<Vec<_>>(), ["name", "address"]);

    let address = &tree.get("address").unwrap()[0];
    assert_eq!(address.path, path!["user", "address"]);
    let zip = &address.error.as_nested().unwrap().get("zip").unwrap()[0];
    assert_eq!(zip.path, path!["user", "address", "zip"]);
    assert_eq!(zip.message(), Some(r"'zip' should match the regex '^\d{5}$'."));

    assert_eq!(errors.total_errors(), 2);
    assert_eq!(
        errors.leaves().iter().map(|e| e.path.to_string()).collect::<Vec<_>>(),
        ["user.name", "user.address.zip"]
    );
}

#[test]
fn non_object_is_a_type_error() {
    let outcome = run(&user_schema(), json!({"user": "ada"}), &defaults());
    assert_eq!(outcome.values.get("user"), Some(&json!("ada")));

    let errors = outcome.errors.unwrap();
    let user = &errors.get("user").unwrap()[0];
    assert_eq!(user.validator, "isObject");
    assert_eq!(user.message(), Some("'user' should be an object."));
}

#[test]
fn nested_validator_keeps_its_own_flags() {
    let inner = Validator::builder()
        .field("a", [is_required(), is_len(LenConfig::new().min(2)).unwrap()])
        .return_rule_set_early(false)
        .build()
        .unwrap();
    let outer = Validator::builder().field("inner", is_object(inner)).build().unwrap();

    let options = ValidateOptions::new().return_rule_set_early(true);
    let errors = run(&outer, json!({"inner": {"a": ""}}), &options).errors.unwrap();

    assert_eq!(
        errors.get("inner").unwrap().iter().map(|e| e.validator).collect::<Vec<_>>(),
        ["isRequired", "isLen"]
    );
}

// ============================================================================
// ARRAYS
// ============================================================================

fn tags(config: ArrayConfig) -> Validator {
    Validator::builder()
        .field(
            "tags",
            is_array(RuleSet::new([is_string(), to_upper_case()]).unwrap(), config).unwrap(),
        )
        .build()
        .unwrap()
}

#[test]
fn empty_array_reports_a_single_length_error() {
    let errors = run(&tags(ArrayConfig::new().min(1).max(3)), json!({"tags": []}), &defaults())
        .errors
        .unwrap();
    let tags = errors.get("tags").unwrap();

    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].validator, "isArray");
    assert_eq!(tags[0].message(), Some("'tags' should have 1 - 3 elements."));
    assert_eq!(tags[0].path, path!["tags"]);
}

#[test]
fn one_error_per_invalid_element() {
    let outcome = run(&tags(ArrayConfig::new()), json!({"tags": ["a", "b", 3, "d"]}), &defaults());
    let errors = outcome.errors.unwrap();
    let tags = errors.get("tags").unwrap();

    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].path, path!["tags", 2usize]);
    assert_eq!(tags[0].validator, "isString");
    assert_eq!(outcome.values["tags"], json!(["A", "B", 3, "D"]));
}

#[test]
fn element_errors_nest_under_their_index() {
    let options = ValidateOptions::new().show_nested_error(true);
    let outcome = run(&tags(ArrayConfig::new()), json!({"tags": [1, "b", true]}), &options);
    let errors = outcome.errors.unwrap();
    let tags = &errors.get("tags").unwrap()[0];

    assert_eq!(tags.validator, "isArray");
    let by_index = tags.error.as_nested().unwrap();
    assert_eq!(by_index.keys().collect::<Vec<_>>(), ["0", "2"]);
}

#[test]
fn element_early_exit_keeps_the_tail_of_the_array() {
    let options = ValidateOptions::new().return_rule_set_early(true);
    let outcome = run(&tags(ArrayConfig::new()), json!({"tags": ["a", 2, "c"]}), &options);

    assert_eq!(outcome.values["tags"], json!(["A", "c"]));
    assert_eq!(outcome.errors.unwrap().get("tags").unwrap().len(), 1);
}

#[test]
fn arrays_of_objects() {
    let item = Validator::builder()
        .field("sku", [is_required(), is_alpha_num(AlphaConfig::new())])
        .field("qty", [to_int(), is_int(RangeConfig::new().min(1.0)).unwrap()])
        .build()
        .unwrap();
    let order = Validator::builder()
        .field("items", is_array_of_object(item, ArrayConfig::new().min(1)).unwrap())
        .build()
        .unwrap();

    let outcome = run(
        &order,
        json!({"items": [{"sku": "A1", "qty": "2"}, {"sku": "B-2", "qty": 0}]}),
        &defaults(),
    );

    let errors = outcome.errors.unwrap();
    let paths: Vec<String> = errors
        .get("items")
        .unwrap()
        .iter()
        .map(|e| e.path.to_string())
        .collect();
    assert_eq!(paths, ["items[1].sku", "items[1].qty"]);
    assert_eq!(outcome.values["items"][0], json!({"sku": "A1", "qty": 2}));
}

#[rstest]
#[case::absent(json!({}))]
#[case::null(json!({"tags": null, "addr": null}))]
fn structural_rules_reject_missing_values(#[case] input: Value) {
    let addr = Validator::builder().field("city", is_string()).build().unwrap();
    let v = Validator::builder()
        .field(
            "tags",
            is_array(RuleSet::new([is_string()]).unwrap(), ArrayConfig::new().min(1)).unwrap(),
        )
        .field("addr", is_object(addr))
        .build()
        .unwrap();

    let errors = run(&v, input, &defaults()).errors.unwrap();

    let tags = errors.get("tags").unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].validator, "isArray");
    assert_eq!(tags[0].message(), Some("'tags' should be an array."));

    let addr = errors.get("addr").unwrap();
    assert_eq!(addr.len(), 1);
    assert_eq!(addr[0].validator, "isObject");
    assert_eq!(addr[0].message(), Some("'addr' should be an object."));
}

// ============================================================================
// CROSS-FIELD
// ============================================================================

#[test]
fn custom_rules_see_sibling_values() {
    let matches_password = is_custom(|value, ctx| {
        (Some(value) != ctx.sibling("password")).then(|| "'%name%' does not match.".to_owned())
    });
    let v = Validator::builder()
        .field("password", [is_required(), is_len(LenConfig::new().min(6)).unwrap()])
        .field("confirm", FieldSpec::labeled([matches_password], "Confirmation"))
        .build()
        .unwrap();

    let errors = run(&v, json!({"password": "hunter22", "confirm": "hunter2"}), &defaults())
        .errors
        .unwrap();
    assert_eq!(
        errors.get("confirm").unwrap()[0].message(),
        Some("'Confirmation' does not match.")
    );

    let outcome = run(&v, json!({"password": "hunter22", "confirm": "hunter22"}), &defaults());
    assert!(outcome.is_valid());
}

// ============================================================================
// SERIALIZATION
// ============================================================================

#[test]
fn errors_serialize_to_plain_json() {
    let outcome = run(&user_schema(), json!({"user": {"address": {"city": 42, "zip": "12345"}}}), &defaults());
    let json = serde_json::to_value(outcome.errors.unwrap()).unwrap();

    assert_eq!(
        json,
        json!({
            "user": [{
                "error": "'city' should be a string.",
                "validator": "isString",
                "value": 42,
                "path": ["user", "address", "city"],
            }]
        })
    );
}

#[test]
fn nested_errors_serialize_recursively() {
    let options = ValidateOptions::new().show_nested_error(true);
    let outcome = run(&tags(ArrayConfig::new()), json!({"tags": ["a", 1]}), &options);
    let json = serde_json::to_value(outcome.errors.unwrap()).unwrap();

    assert_eq!(
        json,
        json!({
            "tags": [{
                "error": {
                    "1": [{
                        "error": "'tags' should be a string.",
                        "validator": "isString",
                        "value": 1,
                        "path": ["tags", 1],
                    }]
                },
                "validator": "isArray",
                "value": ["A", 1],
                "path": ["tags"],
            }]
        })
    );
}

#[test]
fn options_come_from_json_config() {
    let options: ValidatorOptions =
        serde_json::from_value(json!({"returnEarly": true, "showNestedError": true})).unwrap();
    let v = Validator::builder()
        .field("a", is_required())
        .field("b", is_required())
        .options(options)
        .build()
        .unwrap();

    let errors = run(&v, json!({}), &defaults()).errors.unwrap();
    assert_eq!(errors.len(), 1);
}
