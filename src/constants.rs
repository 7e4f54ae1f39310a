pub const DEFAULT_HOST_GROUP: &str = "default";
pub const ANSIBLE_PORT_VAR: &str = "ansible_port";
pub const DEFAULT_INVENTORY_PREFIX: &str = "inventory-";
