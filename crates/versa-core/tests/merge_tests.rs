//! Merge strategy laws and worked examples

use pretty_assertions::assert_eq;
use proptest::option;
use proptest::prelude::*;
use serde_json::{Map, Value, json};
use versa_core::merge::{merge_deep, merge_replace, merge_shallow};
use versa_core::{Error, merge_configs};
use versa_meta::{Context, Profile};

const LIST_KEYS: [&str; 3] = ["rules", "context", "tools"];
const PATCH_KEYS: [&str; 5] = ["rules", "context", "tools", "settings", "metadata"];

fn context(value: Value) -> Context {
    serde_json::from_value(value).unwrap()
}

fn profile(value: Value) -> Profile {
    serde_json::from_value(value).unwrap()
}

fn as_map(context: &Context) -> Map<String, Value> {
    match serde_json::to_value(context).unwrap() {
        Value::Object(map) => map,
        other => panic!("context serialized to {other}"),
    }
}

fn list() -> impl Strategy<Value = Value> {
    prop::collection::vec("[a-z]{1,6}\\.md", 0..4).prop_map(|items| json!(items))
}

fn settings() -> impl Strategy<Value = Value> {
    (
        option::of("[a-z0-9-]{1,8}"),
        option::of(0.0f64..2.0),
        option::of(1u64..100_000),
    )
        .prop_map(|(model, temperature, max_tokens)| {
            let mut map = Map::new();
            if let Some(model) = model {
                map.insert("model".into(), json!(model));
            }
            if let Some(temperature) = temperature {
                map.insert("temperature".into(), json!(temperature));
            }
            if let Some(max_tokens) = max_tokens {
                map.insert("maxTokens".into(), json!(max_tokens));
            }
            Value::Object(map)
        })
}

fn metadata() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-z]{1,5}", "[a-zA-Z ]{0,8}", 0..3).prop_map(|m| json!(m))
}

fn value_for(key: &str) -> BoxedStrategy<Value> {
    match key {
        "settings" => settings().boxed(),
        "metadata" => metadata().boxed(),
        _ => list().boxed(),
    }
}

fn base_context() -> impl Strategy<Value = Context> {
    PATCH_KEYS
        .map(|key| option::of(value_for(key)))
        .prop_map(|values| {
            let mut map = Map::new();
            map.insert("version".into(), json!("1.0"));
            for (key, value) in PATCH_KEYS.iter().zip(values) {
                if let Some(value) = value {
                    map.insert((*key).into(), value);
                }
            }
            context(Value::Object(map))
        })
}

/// Each key is absent, explicitly null, or set.
fn patch_for(key: &str) -> BoxedStrategy<Option<Value>> {
    prop_oneof![
        Just(None),
        Just(Some(Value::Null)),
        value_for(key).prop_map(Some),
    ]
    .boxed()
}

fn profile_with(strategy: &'static str) -> impl Strategy<Value = Profile> {
    (PATCH_KEYS.map(patch_for), any::<bool>()).prop_map(move |(patches, with_version)| {
        let mut map = Map::new();
        map.insert("merge".into(), json!(strategy));
        if with_version {
            map.insert("version".into(), json!("1.0"));
        }
        for (key, patch) in PATCH_KEYS.iter().zip(patches) {
            if let Some(value) = patch {
                map.insert((*key).into(), value);
            }
        }
        profile(Value::Object(map))
    })
}

proptest! {
    #[test]
    fn deep_concatenates_lists(base in base_context(), overlay in profile_with("deep")) {
        let merged = as_map(&merge_deep(&base, &overlay).unwrap());
        let base_map = as_map(&base);

        for key in LIST_KEYS {
            if let (Some(Value::Array(before)), Some(Value::Array(extra))) =
                (base_map.get(key), overlay.fields.get(key))
            {
                let expected: Vec<Value> = before.iter().chain(extra).cloned().collect();
                prop_assert_eq!(merged.get(key), Some(&Value::Array(expected)));
            }
        }
    }

    #[test]
    fn deep_null_removes_and_absent_keeps(base in base_context(), overlay in profile_with("deep")) {
        let merged = as_map(&merge_deep(&base, &overlay).unwrap());
        let base_map = as_map(&base);

        for key in PATCH_KEYS {
            match overlay.fields.get(key) {
                Some(Value::Null) => prop_assert!(!merged.contains_key(key)),
                None => prop_assert_eq!(merged.get(key), base_map.get(key)),
                Some(_) => prop_assert!(merged.contains_key(key)),
            }
        }
        prop_assert_eq!(merged.get("version"), Some(&json!("1.0")));
    }

    #[test]
    fn shallow_takes_profile_values(base in base_context(), overlay in profile_with("shallow")) {
        let merged = as_map(&merge_shallow(&base, &overlay).unwrap());
        let base_map = as_map(&base);

        for key in PATCH_KEYS {
            match overlay.fields.get(key) {
                Some(Value::Null) => prop_assert!(!merged.contains_key(key)),
                Some(value) => prop_assert_eq!(merged.get(key), Some(value)),
                None => prop_assert_eq!(merged.get(key), base_map.get(key)),
            }
        }
    }

    #[test]
    fn replace_discards_base(base in base_context(), overlay in profile_with("replace")) {
        let merged = as_map(&merge_replace(&overlay).unwrap());

        for key in merged.keys() {
            prop_assert!(key == "version" || overlay.fields.get(key).is_some_and(|v| !v.is_null()));
        }
        prop_assert_eq!(merged.get("version"), Some(&json!("1.0")));

        // Dispatch gives the same answer regardless of base
        prop_assert_eq!(
            merge_configs(&base, &overlay).unwrap(),
            merge_replace(&overlay).unwrap()
        );
    }

    #[test]
    fn empty_profile_is_identity(base in base_context(), deep in any::<bool>()) {
        let strategy = if deep { "deep" } else { "shallow" };
        let overlay = profile(json!({"version": "1.0", "merge": strategy}));
        prop_assert_eq!(merge_configs(&base, &overlay).unwrap(), base);
    }
}

#[test]
fn test_deep_merges_rule_lists() {
    let base = context(json!({"version": "1.0", "rules": ["a.md", "b.md"]}));
    let overlay = profile(json!({"version": "1.0", "merge": "deep", "rules": ["c.md"]}));

    let merged = merge_configs(&base, &overlay).unwrap();

    assert_eq!(merged.rules.unwrap(), vec!["a.md", "b.md", "c.md"]);
}

#[test]
fn test_deep_keeps_duplicates() {
    let base = context(json!({"version": "1.0", "rules": ["a.md"]}));
    let overlay = profile(json!({"merge": "deep", "rules": ["a.md"]}));

    let merged = merge_configs(&base, &overlay).unwrap();

    assert_eq!(merged.rules.unwrap(), vec!["a.md", "a.md"]);
}

#[test]
fn test_deep_merges_settings() {
    let base = context(json!({
        "version": "1.0",
        "settings": {"model": "m1", "temperature": 0.7}
    }));
    let overlay = profile(json!({
        "version": "1.0",
        "merge": "deep",
        "settings": {"temperature": 0.5, "maxTokens": 4096}
    }));

    let merged = merge_configs(&base, &overlay).unwrap();

    assert_eq!(
        serde_json::to_value(merged.settings.unwrap()).unwrap(),
        json!({"model": "m1", "temperature": 0.5, "maxTokens": 4096})
    );
}

#[test]
fn test_deep_merges_nested_permissions() {
    let base = context(json!({
        "version": "1.0",
        "permissions": {"files": {"read": ["src/**"], "deny": [".env"]}}
    }));
    let overlay = profile(json!({
        "merge": "deep",
        "permissions": {"files": {"deny": ["secrets/**"], "read": null}}
    }));

    let merged = merge_configs(&base, &overlay).unwrap();

    assert_eq!(
        serde_json::to_value(merged.permissions.unwrap()).unwrap(),
        json!({"files": {"deny": [".env", "secrets/**"]}})
    );
}

#[test]
fn test_null_removes_base_key() {
    let base = context(json!({"version": "1.0", "rules": ["a.md"], "tools": ["t.json"]}));
    let overlay = profile(json!({"merge": "deep", "rules": null}));

    let merged = merge_configs(&base, &overlay).unwrap();

    assert!(merged.rules.is_none());
    assert_eq!(merged.tools.unwrap(), vec!["t.json"]);
}

#[test]
fn test_replace_uses_profile_version() {
    let overlay = profile(json!({"merge": "replace", "version": "1.0", "rules": ["x.md"]}));
    let base = context(json!({"version": "1.0", "tools": ["t.json"]}));

    let merged = merge_configs(&base, &overlay).unwrap();

    assert_eq!(
        serde_json::to_value(&merged).unwrap(),
        json!({"version": "1.0", "rules": ["x.md"]})
    );
}

#[test]
fn test_schema_uri_survives_every_strategy() {
    let base = context(json!({"$schema": "https://example.com/base.json", "version": "1.0"}));

    for strategy in ["deep", "shallow"] {
        let overlay = profile(json!({"merge": strategy, "rules": ["a.md"]}));
        let merged = serde_json::to_value(merge_configs(&base, &overlay).unwrap()).unwrap();
        assert_eq!(merged["$schema"], "https://example.com/base.json", "{strategy}");
    }

    let overlay = profile(json!({"merge": "replace", "$schema": "https://example.com/p.json"}));
    assert_eq!(
        serde_json::to_value(merge_configs(&base, &overlay).unwrap()).unwrap(),
        json!({"$schema": "https://example.com/p.json", "version": "1.0"})
    );
}

#[test]
fn test_invalid_strategy_names_value() {
    let base = context(json!({"version": "1.0"}));
    let overlay = profile(json!({"version": "1.0", "merge": "invalid"}));

    let err = merge_configs(&base, &overlay).unwrap_err();

    assert!(matches!(&err, Error::MergeStrategy { strategy } if strategy == "invalid"));
    assert!(err.to_string().contains("invalid"));
}
