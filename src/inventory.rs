pub mod builder;
pub mod expand;
pub mod files;
pub mod group;
pub mod host;
pub mod quote;

use crate::diagnostics::Diagnostics;
use crate::inventory::expand::{expand_inventory_groups, expand_inventory_hosts, get_value_type};
use crate::inventory::files::InventoryRequest;
use anyhow::{bail, Result};
use serde::Deserialize;
use serde_yaml::Value;
use std::io::Read;

/// Raw inventory description as read from a YAML or JSON document.
///
/// Hosts and groups are kept as loose values so that every malformed entry
/// is reported individually by the expansion step.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InventorySource {
    pub hostname: Option<String>,
    pub port: Option<u16>,
    pub host_groups: Vec<Value>,
    pub hosts: Vec<Value>,
    pub groups: Vec<Value>,
}

pub fn load_inventory_source<R: Read>(reader: R) -> Result<InventorySource> {
    let data: Value = serde_yaml::from_reader(reader)?;

    if data.is_null() {
        return Ok(InventorySource::default());
    }

    if !data.is_mapping() {
        bail!(
            "Inventory source has invalid structure, it should be a dictionary, got: {}",
            get_value_type(&data)
        );
    }

    Ok(serde_yaml::from_value(data)?)
}

impl InventorySource {
    /// Normalizes the raw entries into a request, collecting diagnostics for
    /// every entry that had to be skipped or trimmed.
    pub fn into_request(self, dest_pattern: &str) -> (InventoryRequest, Diagnostics) {
        let mut diags = Diagnostics::new();

        let (hosts, host_diags) = expand_inventory_hosts(&self.hosts);
        diags.append(host_diags);

        let (groups, group_diags) = expand_inventory_groups(&self.groups);
        diags.append(group_diags);

        let request = InventoryRequest {
            dest_pattern: dest_pattern.to_string(),
            hostname: self.hostname.unwrap_or_default(),
            port: self.port,
            host_groups: self.host_groups,
            hosts,
            groups,
        };

        (request, diags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_load_inventory_valid_data() {
        let yaml_data = r#"
        hostname: 10.0.0.5
        port: 2222
        host_groups: [web]
        hosts:
          - name: node1
            groups: [web]
        groups:
          - name: web
            variables:
              ansible_user: deploy
        "#;

        let source = load_inventory_source(Cursor::new(yaml_data)).unwrap();

        assert_eq!(source.hostname.as_deref(), Some("10.0.0.5"));
        assert_eq!(source.port, Some(2222));
        assert_eq!(source.host_groups.len(), 1);
        assert_eq!(source.hosts.len(), 1);
        assert_eq!(source.groups.len(), 1);
    }

    #[test]
    fn test_load_inventory_json() {
        let json_data = r#"{"hostname": "db1", "hosts": [], "groups": [{"name": "db"}]}"#;

        let source = load_inventory_source(Cursor::new(json_data)).unwrap();

        assert_eq!(source.hostname.as_deref(), Some("db1"));
        assert!(source.hosts.is_empty());
        assert_eq!(source.groups.len(), 1);
    }

    #[test]
    fn test_load_inventory_empty_data() {
        let source = load_inventory_source(Cursor::new("")).unwrap();

        assert!(source.hostname.is_none());
        assert!(source.hosts.is_empty());
    }

    #[test]
    fn test_load_inventory_non_mapping() {
        assert!(load_inventory_source(Cursor::new("- a\n- b\n")).is_err());
        assert!(load_inventory_source(Cursor::new("This is not YAML!")).is_err());
    }

    #[test]
    fn test_load_inventory_invalid_yaml() {
        let invalid_yaml = r#"
        hosts: [ { invalid_yaml
        "#;

        assert!(load_inventory_source(Cursor::new(invalid_yaml)).is_err());
    }

    #[test]
    fn test_load_inventory_invalid_port() {
        assert!(load_inventory_source(Cursor::new("port: 70000\n")).is_err());
    }

    #[test]
    fn test_into_request_collects_diagnostics() {
        let yaml_data = r#"
        hosts:
          - name: node1
          - groups: [web]
        groups:
          - "not a map"
        "#;

        let source = load_inventory_source(Cursor::new(yaml_data)).unwrap();
        let (request, diags) = source.into_request("inventory-*");

        assert_eq!(request.dest_pattern, "inventory-*");
        assert_eq!(request.hostname, "");
        assert_eq!(request.hosts.len(), 1);
        assert!(request.groups.is_empty());
        assert_eq!(
            diags.summaries(),
            vec![
                "Invalid host definition: missing 'name'",
                "Invalid group definition: expected map input"
            ]
        );
    }
}
