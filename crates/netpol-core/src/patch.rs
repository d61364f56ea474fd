//! RFC 7386 merge-patch generation
//!
//! Produces the minimal merge-patch document that transforms one JSON value
//! into another. Used by the recorder to emit a patch containing only the
//! change-cause annotation delta.

use serde_json::{Map, Value};

/// Create an RFC 7386 merge patch that turns `old` into `new`
///
/// Objects are diffed key by key: unchanged keys are omitted, changed
/// object values recurse, removed keys map to `null`. Any non-object pair
/// is replaced wholesale, per the merge-patch semantics.
pub fn create_merge_patch(old: &Value, new: &Value) -> Value {
    match (old, new) {
        (Value::Object(old_map), Value::Object(new_map)) => {
            let mut patch = Map::new();

            for (key, new_val) in new_map {
                match old_map.get(key) {
                    Some(old_val) if old_val == new_val => {}
                    Some(old_val) => {
                        patch.insert(key.clone(), create_merge_patch(old_val, new_val));
                    }
                    None => {
                        patch.insert(key.clone(), new_val.clone());
                    }
                }
            }

            for key in old_map.keys() {
                if !new_map.contains_key(key) {
                    patch.insert(key.clone(), Value::Null);
                }
            }

            Value::Object(patch)
        }
        _ => new.clone(),
    }
}
