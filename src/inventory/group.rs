use hashbrown::HashMap;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InventoryGroup {
    pub name: String,
    pub children: Vec<String>,
    pub variables: HashMap<String, String>,
}

impl InventoryGroup {
    pub fn new(name: &str) -> Self {
        InventoryGroup {
            name: name.to_string(),
            children: Vec::new(),
            variables: HashMap::new(),
        }
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    /// Sets a group level variable, replacing any previous value for `key`.
    pub fn set_variable(&mut self, key: &str, value: &str) {
        self.variables.insert(key.to_string(), value.to_string());
    }

    pub fn with_variable(mut self, key: &str, value: &str) -> Self {
        self.set_variable(key, value);
        self
    }
}
