use crate::config::InventoryConfig;
use crate::diagnostics::{Diagnostics, InventoryError};
use crate::inventory::builder::build_inventory_content;
use crate::inventory::expand::interface_to_string;
use crate::inventory::group::InventoryGroup;
use crate::inventory::host::{default_host, InventoryHost};
use log::{debug, info};
use serde_yaml::Value;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Everything needed to produce one inventory file.
///
/// `hostname`, `port` and `host_groups` are only used when `hosts` is empty;
/// they describe the single host the inventory is then generated for.
#[derive(Debug, Clone, Default)]
pub struct InventoryRequest {
    /// file name pattern, the last `*` is replaced by a random string
    pub dest_pattern: String,
    pub hostname: String,
    pub port: Option<u16>,
    pub host_groups: Vec<Value>,
    pub hosts: Vec<InventoryHost>,
    pub groups: Vec<InventoryGroup>,
}

fn split_pattern(pattern: &str) -> (&str, &str) {
    match pattern.rfind('*') {
        Some(idx) => (&pattern[..idx], &pattern[idx + 1..]),
        None => (pattern, ""),
    }
}

fn create_temp_file(dir: &Path, pattern: &str) -> Result<(File, PathBuf), InventoryError> {
    if pattern.chars().any(std::path::is_separator) {
        return Err(InventoryError::CreateFile(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("open {pattern}: pattern contains path separator"),
        )));
    }

    let (prefix, suffix) = split_pattern(pattern);

    let temp_file = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(suffix)
        .tempfile_in(dir)
        .map_err(InventoryError::CreateFile)?;

    temp_file
        .keep()
        .map_err(|e| InventoryError::CreateFile(e.error))
}

/// Hosts the inventory is rendered for: the explicit ones, or the single
/// fallback host when none were given.
pub fn resolve_hosts(request: &InventoryRequest) -> (Vec<InventoryHost>, Diagnostics) {
    let mut diags = Diagnostics::new();

    if !request.hosts.is_empty() {
        return (request.hosts.clone(), diags);
    }

    let (host_groups, group_diags) = interface_to_string(&request.host_groups);
    diags.append(group_diags);

    debug!(
        "No hosts given, using {} as the inventory host",
        request.hostname
    );
    let host = default_host(&request.hostname, request.port, host_groups);

    (vec![host], diags)
}

/// Renders the inventory for `request` without touching the filesystem.
pub fn render_inventory(request: &InventoryRequest) -> (String, Diagnostics) {
    let (hosts, mut diags) = resolve_hosts(request);

    let (content, build_diags) = build_inventory_content(&hosts, &request.groups);
    diags.append(build_diags);

    (content, diags)
}

/// Writes the inventory for `request` into a new, uniquely named file in the
/// configured temp directory.
///
/// Returns `None` only when the file could not be created. A failed write is
/// reported but the path of the (kept) file is still returned.
pub fn build_playbook_inventory(
    request: &InventoryRequest,
    config: &InventoryConfig,
) -> (Option<PathBuf>, Diagnostics) {
    let mut diags = Diagnostics::new();

    let created = match create_temp_file(&config.temp_dir, &request.dest_pattern) {
        Ok((file, path)) => {
            info!("Inventory {} was created", path.display());
            Some((file, path))
        }
        Err(err) => {
            diags.push_error(err);
            None
        }
    };

    let (content, render_diags) = render_inventory(request);
    diags.append(render_diags);

    let Some((mut file, path)) = created else {
        return (None, diags);
    };

    if let Err(err) = file.write_all(content.as_bytes()) {
        diags.push_error(InventoryError::WriteFile(err));
    }

    (Some(path), diags)
}

/// Lists inventories in the configured temp directory whose file name starts
/// with `prefix`, sorted by path.
pub fn get_all_inventories(prefix: &str, config: &InventoryConfig) -> (Vec<PathBuf>, Diagnostics) {
    let mut diags = Diagnostics::new();
    let temp_dir = &config.temp_dir;

    info!("[TEMP DIR]: {}", temp_dir.display());

    let entries = match fs::read_dir(temp_dir) {
        Ok(entries) => entries,
        Err(source) => {
            diags.push_error(InventoryError::ReadDir {
                dir: temp_dir.to_path_buf(),
                source,
            });
            return (Vec::new(), diags);
        }
    };

    let mut inventories: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(prefix))
        })
        .map(|entry| temp_dir.join(entry.file_name()))
        .collect();

    inventories.sort();

    (inventories, diags)
}

pub fn remove_file(path: &Path) -> Diagnostics {
    let mut diags = Diagnostics::new();

    debug!("Removing {}", path.display());
    if let Err(source) = fs::remove_file(path) {
        diags.push_error(InventoryError::RemoveFile {
            path: path.to_path_buf(),
            source,
        });
    }

    diags
}
