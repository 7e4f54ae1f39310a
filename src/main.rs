use anyhow::{bail, Result};
use clap::Parser;
use cogrs_inventory::cli::{Cli, Commands};
use cogrs_inventory::config::InventoryConfig;
use cogrs_inventory::diagnostics::{Diagnostics, Severity};
use cogrs_inventory::inventory::files::{
    build_playbook_inventory, get_all_inventories, remove_file, render_inventory,
};
use cogrs_inventory::utils::create_verbose_switch;
use log::{error, info, warn};

fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    run()
}

fn report(diags: &Diagnostics) {
    for diag in diags {
        match diag.severity {
            Severity::Error => error!("[{}] {}", diag.error.category(), diag.error),
            Severity::Warning => warn!("[{}] {}", diag.error.category(), diag.error),
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = InventoryConfig::load(cli.config.as_deref())?;

    let diags = match cli.cmd {
        Commands::Build {
            source,
            dest,
            verbose,
        } => {
            let dest_pattern = dest.unwrap_or_else(|| config.default_dest_pattern());
            let (request, mut diags) = source.to_request(&dest_pattern)?;

            let (path, build_diags) = build_playbook_inventory(&request, &config);
            diags.append(build_diags);

            if let Some(path) = path {
                if verbose > 0 {
                    info!(
                        "Run with: ansible-playbook -i {} {}",
                        path.display(),
                        create_verbose_switch(verbose)
                    );
                }
                println!("{}", path.display());
            }

            diags
        }
        Commands::Render { source } => {
            let (request, mut diags) = source.to_request(&config.default_dest_pattern())?;

            let (content, render_diags) = render_inventory(&request);
            diags.append(render_diags);

            print!("{content}");
            diags
        }
        Commands::List { prefix } => {
            let prefix = prefix.unwrap_or_else(|| config.prefix.clone());
            let (inventories, diags) = get_all_inventories(&prefix, &config);

            for inventory in inventories {
                println!("{}", inventory.display());
            }

            diags
        }
        Commands::Remove { path } => remove_file(&path),
    };

    report(&diags);

    if diags.has_errors() {
        bail!("finished with {} error(s)", diags.len());
    }

    Ok(())
}
