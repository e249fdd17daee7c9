//! Record rewrites used by specific command families before display.

use cloudadm_api_types::AclEntry;
use serde_json::Value;

use super::RenderError;

/// Replace structured `acl_entries` with one `cidr[ comment]` line per entry.
pub fn acl_entries_text(record: &Value) -> Result<Value, RenderError> {
    rewrite_field(record, "acl_entries", |entries| {
        let entries = entries
            .as_array()
            .ok_or_else(|| RenderError::shape("acl_entries is not an array"))?;
        let lines = entries
            .iter()
            .map(|entry| {
                serde_json::from_value::<AclEntry>(entry.clone())
                    .map(|entry| entry.to_line())
                    .map_err(|err| RenderError::shape(format!("malformed acl entry {entry}: {err}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::String(lines.join("\n")))
    })
}

/// Replace the `playbook` document string with its YAML pretty form.
pub fn playbook_yaml(record: &Value) -> Result<Value, RenderError> {
    rewrite_field(record, "playbook", |playbook| {
        let source = playbook
            .as_str()
            .ok_or_else(|| RenderError::shape("playbook is not a string"))?;
        let document: serde_yaml::Value = serde_yaml::from_str(source)
            .map_err(|err| RenderError::shape(format!("playbook is not valid YAML: {err}")))?;
        let pretty = serde_yaml::to_string(&document)
            .map_err(|err| RenderError::Encode(err.to_string()))?;
        Ok(Value::String(pretty))
    })
}

/// Records without the field pass through untouched.
fn rewrite_field(
    record: &Value,
    field: &str,
    rewrite: impl FnOnce(&Value) -> Result<Value, RenderError>,
) -> Result<Value, RenderError> {
    let Some(object) = record.as_object() else {
        return Err(RenderError::shape("record is not an object"));
    };
    let mut view = object.clone();
    match object.get(field) {
        None | Some(Value::Null) => {}
        Some(current) => {
            view.insert(field.to_string(), rewrite(current)?);
        }
    }
    Ok(Value::Object(view))
}
