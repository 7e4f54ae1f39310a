use crate::constants::{ANSIBLE_PORT_VAR, DEFAULT_HOST_GROUP};
use hashbrown::HashMap;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InventoryHost {
    pub name: String,
    pub groups: Vec<String>,
    pub variables: HashMap<String, String>,
}

impl InventoryHost {
    pub fn new(name: &str) -> Self {
        InventoryHost {
            name: name.to_string(),
            groups: Vec::new(),
            variables: HashMap::new(),
        }
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_variable(mut self, key: &str, value: &str) -> Self {
        self.variables.insert(key.to_string(), value.to_string());
        self
    }
}

/// Builds the single host used when the caller supplies no explicit hosts.
pub fn default_host(hostname: &str, port: Option<u16>, groups: Vec<String>) -> InventoryHost {
    let groups = if groups.is_empty() {
        vec![DEFAULT_HOST_GROUP.to_string()]
    } else {
        groups
    };

    let mut variables = HashMap::new();
    if let Some(port) = port {
        variables.insert(ANSIBLE_PORT_VAR.to_string(), port.to_string());
    }

    InventoryHost {
        name: hostname.to_string(),
        groups,
        variables,
    }
}
