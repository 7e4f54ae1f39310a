use crate::diagnostics::{Diagnostics, InventoryError, RecordKind};
use crate::inventory::group::InventoryGroup;
use crate::inventory::host::InventoryHost;
use hashbrown::HashMap;
use log::{debug, warn};
use serde_yaml::{Mapping, Value};

pub(crate) fn get_value_type(val: &Value) -> &str {
    match val {
        Value::String(_) => "String",
        Value::Null => "Null",
        Value::Bool(_) => "Bool",
        Value::Number(_) => "Number",
        Value::Sequence(_) => "Sequence",
        Value::Mapping(_) => "Mapping",
        Value::Tagged(_) => "Tagged",
    }
}

fn describe_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => get_value_type(other).to_string(),
    }
}

/// Converts a sequence of loosely typed values into strings. Every element
/// that is not a string is reported and left out of the result.
pub fn interface_to_string(raw: &[Value]) -> (Vec<String>, Diagnostics) {
    let mut diags = Diagnostics::new();
    let mut result = Vec::with_capacity(raw.len());

    for val in raw {
        match val {
            Value::String(s) => result.push(s.to_string()),
            other => {
                debug!("Expected String, got: {}", get_value_type(other));
                diags.push_error(InventoryError::NotAString);
            }
        }
    }

    (result, diags)
}

fn string_map(input: &Mapping) -> (HashMap<String, String>, Diagnostics) {
    let mut diags = Diagnostics::new();
    let mut target = HashMap::with_capacity(input.len());

    for (key, value) in input {
        match (key, value) {
            (Value::String(key), Value::String(value)) => {
                target.insert(key.to_string(), value.to_string());
            }
            (key, _) => {
                diags.push_error(InventoryError::VariableNotAString(describe_key(key)));
            }
        }
    }

    (target, diags)
}

fn string_list_field(entry: &Mapping, field: &str, diags: &mut Diagnostics) -> Vec<String> {
    match entry.get(field) {
        Some(Value::Sequence(raw)) => {
            let (values, field_diags) = interface_to_string(raw);
            diags.append(field_diags);
            values
        }
        _ => Vec::new(),
    }
}

fn variables_field(entry: &Mapping, diags: &mut Diagnostics) -> HashMap<String, String> {
    match entry.get("variables") {
        Some(Value::Mapping(raw)) => {
            let (variables, var_diags) = string_map(raw);
            diags.append(var_diags);
            variables
        }
        _ => HashMap::new(),
    }
}

/// Common checks for a single raw record: returns the mapping and its name,
/// or `None` after reporting why the entry was skipped.
fn named_entry<'a>(
    entry: &'a Value,
    kind: RecordKind,
    diags: &mut Diagnostics,
) -> Option<(&'a Mapping, String)> {
    let Value::Mapping(entry_map) = entry else {
        warn!(
            "Skipping {kind} definition, expected a dictionary, got: {}",
            get_value_type(entry)
        );
        diags.push_error(InventoryError::Structural(kind));
        return None;
    };

    match entry_map.get("name") {
        Some(Value::String(name)) if !name.is_empty() => Some((entry_map, name.to_string())),
        _ => {
            warn!("Skipping {kind} definition without a name");
            diags.push_error(InventoryError::MissingName(kind));
            None
        }
    }
}

pub fn expand_inventory_hosts(raw: &[Value]) -> (Vec<InventoryHost>, Diagnostics) {
    let mut diags = Diagnostics::new();
    let mut hosts = Vec::with_capacity(raw.len());

    for entry in raw {
        let Some((entry_map, name)) = named_entry(entry, RecordKind::Host, &mut diags) else {
            continue;
        };

        debug!("Expanding host {name}");
        let groups = string_list_field(entry_map, "groups", &mut diags);
        let variables = variables_field(entry_map, &mut diags);

        hosts.push(InventoryHost {
            name,
            groups,
            variables,
        });
    }

    (hosts, diags)
}

pub fn expand_inventory_groups(raw: &[Value]) -> (Vec<InventoryGroup>, Diagnostics) {
    let mut diags = Diagnostics::new();
    let mut groups = Vec::with_capacity(raw.len());

    for entry in raw {
        let Some((entry_map, name)) = named_entry(entry, RecordKind::Group, &mut diags) else {
            continue;
        };

        debug!("Expanding group {name}");
        let children = string_list_field(entry_map, "children", &mut diags);
        let variables = variables_field(entry_map, &mut diags);

        groups.push(InventoryGroup {
            name,
            children,
            variables,
        });
    }

    (groups, diags)
}
