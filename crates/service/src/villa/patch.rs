//! JSON Patch (RFC 6902) applied to a detached [`VillaTransfer`] snapshot.
//!
//! Paths address one top-level property, matched case-insensitively. Failing
//! operations are recorded and skipped; the remaining operations still run,
//! so a caller sees every problem in one response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::domain::VillaTransfer;
use crate::errors::ValidationErrors;

const ID_FIELD: &str = "id";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Move { from: String, path: String },
    Copy { from: String, path: String },
    Test { path: String, value: Value },
}

impl PatchOperation {
    pub fn path(&self) -> &str {
        match self {
            PatchOperation::Add { path, .. }
            | PatchOperation::Remove { path }
            | PatchOperation::Replace { path, .. }
            | PatchOperation::Move { path, .. }
            | PatchOperation::Copy { path, .. }
            | PatchOperation::Test { path, .. } => path,
        }
    }

    fn error_key(&self) -> String {
        let key = self.path().trim_start_matches('/');
        if key.is_empty() { "patch".to_string() } else { key.to_string() }
    }
}

/// Apply `ops` in order to a copy of `target`.
pub fn apply(target: &VillaTransfer, ops: &[PatchOperation]) -> Result<VillaTransfer, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let defaults = to_object(&VillaTransfer::default()).map_err(|e| single("patch", e))?;
    let mut doc = to_object(target).map_err(|e| single("patch", e))?;

    for op in ops {
        if let Err(msg) = apply_one(&mut doc, &defaults, op) {
            errors.add(op.error_key(), msg);
        }
    }

    let patched = match serde_json::from_value::<VillaTransfer>(Value::Object(doc)) {
        Ok(v) => v,
        Err(e) => {
            errors.add("patch", e.to_string());
            return Err(errors);
        }
    };
    errors.into_result().map(|_| patched)
}

fn apply_one(doc: &mut Map<String, Value>, defaults: &Map<String, Value>, op: &PatchOperation) -> Result<(), String> {
    let mut candidate = doc.clone();
    match op {
        PatchOperation::Add { path, value } | PatchOperation::Replace { path, value } => {
            let key = resolve(&candidate, path, true)?;
            candidate.insert(key, value.clone());
        }
        PatchOperation::Remove { path } => {
            let key = resolve(&candidate, path, true)?;
            let reset = defaults.get(&key).cloned().unwrap_or(Value::Null);
            candidate.insert(key, reset);
        }
        PatchOperation::Move { from, path } => {
            let src = resolve(&candidate, from, true)?;
            let dst = resolve(&candidate, path, true)?;
            let moved = candidate.get(&src).cloned().unwrap_or(Value::Null);
            let reset = defaults.get(&src).cloned().unwrap_or(Value::Null);
            candidate.insert(src, reset);
            candidate.insert(dst, moved);
        }
        PatchOperation::Copy { from, path } => {
            let src = resolve(&candidate, from, false)?;
            let dst = resolve(&candidate, path, true)?;
            let copied = candidate.get(&src).cloned().unwrap_or(Value::Null);
            candidate.insert(dst, copied);
        }
        PatchOperation::Test { path, value } => {
            let key = resolve(&candidate, path, false)?;
            let current = candidate.get(&key).unwrap_or(&Value::Null);
            if !values_equal(current, value) {
                return Err(format!(
                    "The current value '{current}' at path '{path}' is not equal to the test value '{value}'."
                ));
            }
            return Ok(());
        }
    }

    // Reject values that do not fit the field's type before committing them.
    serde_json::from_value::<VillaTransfer>(Value::Object(candidate.clone()))
        .map_err(|e| format!("The value at path '{}' is invalid: {e}", op.path()))?;
    *doc = candidate;
    Ok(())
}

/// Map a JSON pointer onto an existing property name.
fn resolve(doc: &Map<String, Value>, pointer: &str, mutating: bool) -> Result<String, String> {
    let not_found = || format!("The target location specified by path '{pointer}' was not found.");
    let segment = pointer
        .strip_prefix('/')
        .ok_or_else(|| format!("The path '{pointer}' must start with '/'."))?;
    if segment.is_empty() || segment.contains('/') {
        return Err(not_found());
    }
    let segment = segment.replace("~1", "/").replace("~0", "~");
    let key = doc
        .keys()
        .find(|k| k.eq_ignore_ascii_case(&segment))
        .cloned()
        .ok_or_else(not_found)?;
    if mutating && key == ID_FIELD {
        return Err("The id is immutable and cannot be patched.".to_string());
    }
    Ok(key)
}

/// Numbers compare by value so `4` tests equal to `4.0`.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

fn to_object(v: &VillaTransfer) -> Result<Map<String, Value>, String> {
    match serde_json::to_value(v).map_err(|e| e.to_string())? {
        Value::Object(map) => Ok(map),
        other => Err(format!("expected an object, got {other}")),
    }
}

fn single(field: &str, msg: String) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, msg);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> VillaTransfer {
        VillaTransfer {
            id: 1,
            first_name: "Lake House".into(),
            last_name: Some("North".into()),
            details: Some("By the water".into()),
            rate: 199.99,
            occupancy: 4,
            square_footage: 1200,
            image_url: None,
            amenities: Some("dock".into()),
        }
    }

    fn ops(v: Value) -> Vec<PatchOperation> {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn parses_rfc6902_document() {
        let parsed = ops(json!([
            {"op": "replace", "path": "/firstName", "value": "Beach Hut"},
            {"op": "remove", "path": "/details"},
            {"op": "move", "from": "/lastName", "path": "/amenities"},
            {"op": "test", "path": "/rate", "value": 199.99}
        ]));
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[1], PatchOperation::Remove { path: "/details".into() });
        assert_eq!(parsed[2].path(), "/amenities");
    }

    #[test]
    fn unknown_op_is_rejected_by_serde() {
        let res = serde_json::from_value::<Vec<PatchOperation>>(json!([{"op": "frobnicate", "path": "/rate"}]));
        assert!(res.is_err());
    }

    #[test]
    fn replace_and_add_set_fields() {
        let out = apply(&snapshot(), &ops(json!([
            {"op": "replace", "path": "/firstName", "value": "Beach Hut"},
            {"op": "add", "path": "/imageUrl", "value": "https://img.example.com/a.png"},
            {"op": "replace", "path": "/occupancy", "value": 8}
        ])))
        .unwrap();
        assert_eq!(out.first_name, "Beach Hut");
        assert_eq!(out.image_url.as_deref(), Some("https://img.example.com/a.png"));
        assert_eq!(out.occupancy, 8);
        assert_eq!(out.id, 1);
    }

    #[test]
    fn path_matching_ignores_case() {
        let out = apply(&snapshot(), &ops(json!([{"op": "replace", "path": "/FIRSTNAME", "value": "Cabin"}]))).unwrap();
        assert_eq!(out.first_name, "Cabin");
    }

    #[test]
    fn remove_resets_to_default() {
        let out = apply(&snapshot(), &ops(json!([
            {"op": "remove", "path": "/details"},
            {"op": "remove", "path": "/squareFootage"}
        ])))
        .unwrap();
        assert!(out.details.is_none());
        assert_eq!(out.square_footage, 0);
    }

    #[test]
    fn move_and_copy() {
        let out = apply(&snapshot(), &ops(json!([
            {"op": "copy", "from": "/details", "path": "/amenities"},
            {"op": "move", "from": "/lastName", "path": "/imageUrl"}
        ])))
        .unwrap();
        assert_eq!(out.amenities.as_deref(), Some("By the water"));
        assert_eq!(out.image_url.as_deref(), Some("North"));
        assert!(out.last_name.is_none());
    }

    #[test]
    fn test_op_compares_numbers_by_value() {
        let v = VillaTransfer { rate: 4.0, ..snapshot() };
        assert!(apply(&v, &ops(json!([{"op": "test", "path": "/rate", "value": 4}]))).is_ok());

        let errs = apply(&v, &ops(json!([{"op": "test", "path": "/rate", "value": 5}]))).unwrap_err();
        assert!(errs.get("rate").is_some());
    }

    #[test]
    fn errors_accumulate_and_skip_bad_ops() {
        let errs = apply(&snapshot(), &ops(json!([
            {"op": "replace", "path": "/nope", "value": 1},
            {"op": "replace", "path": "/rate", "value": "cheap"},
            {"op": "replace", "path": "/id", "value": 99},
            {"op": "replace", "path": "/occupancy", "value": 2}
        ])))
        .unwrap_err();
        assert!(errs.get("nope").is_some());
        assert!(errs.get("rate").is_some());
        assert!(errs.get("id").is_some());
        assert!(errs.get("occupancy").is_none());
    }

    #[test]
    fn nested_or_relative_paths_are_not_found() {
        let errs = apply(&snapshot(), &ops(json!([
            {"op": "replace", "path": "/firstName/0", "value": "x"},
            {"op": "replace", "path": "rate", "value": 1.0}
        ])))
        .unwrap_err();
        assert!(errs.get("firstName/0").is_some());
        assert!(errs.get("rate").is_some());
    }

    #[test]
    fn null_into_required_field_is_rejected() {
        let errs = apply(&snapshot(), &ops(json!([{"op": "replace", "path": "/firstName", "value": null}]))).unwrap_err();
        assert!(errs.get("firstName").is_some());
    }

    #[test]
    fn empty_document_is_identity() {
        assert_eq!(apply(&snapshot(), &[]).unwrap(), snapshot());
    }
}
