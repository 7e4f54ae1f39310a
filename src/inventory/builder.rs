use crate::constants::DEFAULT_HOST_GROUP;
use crate::diagnostics::{Diagnostics, InventoryError, RecordKind};
use crate::inventory::group::InventoryGroup;
use crate::inventory::host::InventoryHost;
use crate::inventory::quote::quote;
use hashbrown::{HashMap, HashSet};
use log::debug;

/// Keys of a variable map in ascending order. Map iteration order is never
/// used for output.
fn sorted_keys(variables: &HashMap<String, String>) -> Vec<&String> {
    let mut keys: Vec<&String> = variables.keys().collect();
    keys.sort();
    keys
}

pub fn format_inventory_host_line(hostname: &str, variables: &HashMap<String, String>) -> String {
    let mut line = hostname.to_string();

    for key in sorted_keys(variables) {
        line.push(' ');
        line.push_str(key);
        line.push('=');
        line.push_str(&quote(&variables[key]));
    }

    line
}

pub fn format_inventory_variables(variables: &HashMap<String, String>) -> String {
    let mut out = String::new();

    for key in sorted_keys(variables) {
        out.push_str(key);
        out.push('=');
        out.push_str(&quote(&variables[key]));
        out.push('\n');
    }

    out
}

/// Renders hosts and groups into INI inventory text.
///
/// Output is sorted at every level (group names, host lines, variable keys
/// and children) so identical input always yields identical text. Records
/// without a name are skipped and reported; building never stops early.
pub fn build_inventory_content(
    hosts: &[InventoryHost],
    groups: &[InventoryGroup],
) -> (String, Diagnostics) {
    let mut diags = Diagnostics::new();
    let default_groups = [DEFAULT_HOST_GROUP.to_string()];

    let mut group_names: HashSet<&str> = HashSet::new();
    let mut group_hosts: HashMap<&str, Vec<String>> = HashMap::new();
    let mut group_vars: HashMap<&str, &HashMap<String, String>> = HashMap::new();
    let mut group_children: HashMap<&str, &[String]> = HashMap::new();

    for group in groups {
        if group.name.is_empty() {
            diags.push_error(InventoryError::Unnamed(RecordKind::Group));
            continue;
        }

        group_names.insert(&group.name);

        if !group.children.is_empty() {
            group_children.insert(&group.name, &group.children);
        }

        if !group.variables.is_empty() {
            group_vars.insert(&group.name, &group.variables);
        }
    }

    for host in hosts {
        if host.name.is_empty() {
            diags.push_error(InventoryError::Unnamed(RecordKind::Host));
            continue;
        }

        let host_groups: &[String] = if host.groups.is_empty() {
            &default_groups
        } else {
            &host.groups
        };

        let line = format_inventory_host_line(&host.name, &host.variables);
        for group_name in host_groups.iter().filter(|g| !g.is_empty()) {
            debug!("Adding host '{}' to group '{group_name}'", host.name);
            group_names.insert(group_name);
            group_hosts
                .entry(group_name)
                .or_default()
                .push(line.clone());
        }
    }

    let mut sorted_group_names: Vec<&str> = group_names.into_iter().collect();
    sorted_group_names.sort_unstable();

    let mut content = String::new();
    for group_name in sorted_group_names {
        content.push_str(&format!("[{group_name}]\n"));

        if let Some(host_lines) = group_hosts.get_mut(group_name) {
            host_lines.sort();
            for line in host_lines.iter() {
                content.push_str(line);
                content.push('\n');
            }
        }

        content.push('\n');

        if let Some(vars) = group_vars.get(group_name) {
            content.push_str(&format!("[{group_name}:vars]\n"));
            content.push_str(&format_inventory_variables(vars));
            content.push('\n');
        }

        if let Some(children) = group_children.get(group_name) {
            content.push_str(&format!("[{group_name}:children]\n"));
            let mut sorted_children = children.to_vec();
            sorted_children.sort();
            for child in &sorted_children {
                content.push_str(child);
                content.push('\n');
            }
            content.push('\n');
        }
    }

    (content, diags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_line_without_variables() {
        assert_eq!(format_inventory_host_line("node1", &HashMap::new()), "node1");
    }

    #[test]
    fn test_host_line_sorts_variables() {
        let host = InventoryHost::new("node1")
            .with_variable("ansible_user", "root")
            .with_variable("ansible_port", "2222")
            .with_variable("motd", "say \"hi\"");

        assert_eq!(
            format_inventory_host_line(&host.name, &host.variables),
            r#"node1 ansible_port="2222" ansible_user="root" motd="say \"hi\"""#
        );
    }

    #[test]
    fn test_group_vars_scenario() {
        let groups = vec![InventoryGroup::new("web").with_variable("ansible_user", "deploy")];
        let hosts = vec![InventoryHost::new("node1").with_groups(["web"])];

        let (content, diags) = build_inventory_content(&hosts, &groups);

        assert!(diags.is_empty());
        assert_eq!(
            content,
            "[web]\nnode1\n\n[web:vars]\nansible_user=\"deploy\"\n\n"
        );
    }

    #[test]
    fn test_ungrouped_host_lands_in_default() {
        let hosts = vec![
            InventoryHost::new("lonely"),
            InventoryHost::new("webhost").with_groups(["web"]),
        ];

        let (content, _) = build_inventory_content(&hosts, &[]);

        assert_eq!(content, "[default]\nlonely\n\n[web]\nwebhost\n\n");
    }

    #[test]
    fn test_hosts_sorted_within_group() {
        let hosts = vec![
            InventoryHost::new("b").with_groups(["g"]),
            InventoryHost::new("a").with_groups(["g"]),
        ];

        let (content, _) = build_inventory_content(&hosts, &[]);

        assert_eq!(content, "[g]\na\nb\n\n");
    }

    #[test]
    fn test_children_sorted_and_declared_group_without_hosts() {
        let groups = vec![
            InventoryGroup::new("prod").with_children(["west", "east"]),
            InventoryGroup::new("empty"),
        ];

        let (content, _) = build_inventory_content(&[], &groups);

        assert_eq!(
            content,
            "[empty]\n\n[prod]\n\n[prod:children]\neast\nwest\n\n"
        );
    }

    #[test]
    fn test_empty_group_names_are_ignored() {
        let hosts = vec![InventoryHost::new("node1").with_groups(["", "web"])];

        let (content, diags) = build_inventory_content(&hosts, &[]);

        assert!(diags.is_empty());
        assert_eq!(content, "[web]\nnode1\n\n");
    }

    #[test]
    fn test_unnamed_records_are_reported() {
        let hosts = vec![InventoryHost::new(""), InventoryHost::new("ok")];
        let groups = vec![InventoryGroup::new("").with_variable("x", "y")];

        let (content, diags) = build_inventory_content(&hosts, &groups);

        assert_eq!(content, "[default]\nok\n\n");
        assert_eq!(
            diags.summaries(),
            vec![
                "Inventory group is missing a name",
                "Inventory host is missing a name"
            ]
        );
    }

    #[test]
    fn test_duplicate_hosts_are_kept() {
        let hosts = vec![
            InventoryHost::new("node1").with_groups(["web"]),
            InventoryHost::new("node1").with_groups(["web"]),
        ];

        let (content, _) = build_inventory_content(&hosts, &[]);

        assert_eq!(content, "[web]\nnode1\nnode1\n\n");
    }

    #[test]
    fn test_build_is_deterministic() {
        let mut group = InventoryGroup::new("web");
        for i in 0..20 {
            group.set_variable(&format!("var{i}"), &format!("value {i}"));
        }
        let hosts: Vec<InventoryHost> = (0..20)
            .map(|i| {
                InventoryHost::new(&format!("host{i}"))
                    .with_groups(["web", "all_hosts"])
                    .with_variable("index", &i.to_string())
                    .with_variable("zone", "eu")
            })
            .collect();
        let groups = vec![group];

        let (first, _) = build_inventory_content(&hosts, &groups);
        let (second, _) = build_inventory_content(&hosts, &groups);

        assert_eq!(first, second);
        assert!(first.starts_with("[all_hosts]\nhost0 index=\"0\" zone=\"eu\"\nhost1 "));
    }

    #[test]
    fn test_does_not_mutate_input() {
        let hosts = vec![
            InventoryHost::new("b").with_groups(["g"]),
            InventoryHost::new("a"),
        ];
        let groups = vec![InventoryGroup::new("g").with_children(["z", "y"])];
        let hosts_before = hosts.clone();
        let groups_before = groups.clone();

        let _ = build_inventory_content(&hosts, &groups);

        assert_eq!(hosts, hosts_before);
        assert_eq!(groups, groups_before);
    }
}
