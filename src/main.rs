use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use philu_extensions::filters::{Filter, FilterRegistry};
use philu_extensions::plugin;
use philu_extensions::resources::ResourceRoot;

#[derive(Parser)]
#[command(name = "philu-extensions")]
#[command(about = "PhilU extensions plugin: inspect and verify filter registrations", long_about = None)]
struct Cli {
    /// Resource tree to load instead of the bundled one
    #[arg(long, global = true)]
    resources: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the plugin and print the registered entries
    Show {
        /// Restrict output to a single filter (e.g. ENV_PATCHES)
        #[arg(short, long)]
        filter: Option<String>,

        /// Emit JSON instead of the human-readable listing
        #[arg(long)]
        json: bool,
    },
    /// Load the plugin and verify its registrations and resources
    Check,
    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let resources = match cli.resources {
        Some(path) => ResourceRoot::new(path),
        None => ResourceRoot::discover(),
    };

    match cli.command {
        Some(Commands::Version) | None => {
            println!("philu-extensions {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Show { filter, json }) => {
            let registry = plugin::load(&resources).context("failed to load plugin")?;
            show(&registry, filter.as_deref(), json)?;
        }
        Some(Commands::Check) => {
            let registry = plugin::load(&resources).context("failed to load plugin")?;
            check(&registry, &resources)?;
            println!(
                "ok: {} entries across {} filters",
                registry.entry_count(),
                Filter::ALL.len()
            );
        }
    }

    Ok(())
}

fn parse_filter(name: &str) -> anyhow::Result<Filter> {
    Filter::ALL
        .into_iter()
        .find(|f| f.name().eq_ignore_ascii_case(name))
        .with_context(|| {
            let known: Vec<&str> = Filter::ALL.iter().map(|f| f.name()).collect();
            format!("unknown filter '{}', expected one of: {}", name, known.join(", "))
        })
}

fn show(registry: &FilterRegistry, filter: Option<&str>, json: bool) -> anyhow::Result<()> {
    let selected = filter.map(parse_filter).transpose()?;

    if json {
        let value = match selected {
            Some(f) => filter_json(registry, f)?,
            None => serde_json::to_value(registry)?,
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for f in Filter::ALL {
        if let Some(only) = selected {
            if f != only {
                continue;
            }
        }
        println!("{} ({})", f.name(), registry.len(f));
        print_entries(registry, f);
    }
    Ok(())
}

fn filter_json(registry: &FilterRegistry, filter: Filter) -> anyhow::Result<serde_json::Value> {
    Ok(match filter {
        Filter::ConfigDefaults => serde_json::to_value(registry.config_defaults())?,
        Filter::ConfigUnique => serde_json::to_value(registry.config_unique())?,
        Filter::ConfigOverrides => serde_json::to_value(registry.config_overrides())?,
        Filter::CliDoInitTasks => serde_json::to_value(registry.init_tasks())?,
        Filter::ImagesBuild => serde_json::to_value(registry.images_build())?,
        Filter::ImagesPull => serde_json::to_value(registry.images_pull())?,
        Filter::ImagesPush => serde_json::to_value(registry.images_push())?,
        Filter::EnvTemplateRoots => serde_json::to_value(registry.env_template_roots())?,
        Filter::EnvTemplateTargets => serde_json::to_value(registry.env_template_targets())?,
        Filter::EnvPatches => serde_json::to_value(registry.env_patches())?,
        Filter::CliDoCommands => serde_json::to_value(registry.do_commands())?,
        Filter::CliCommands => serde_json::to_value(registry.cli_commands())?,
    })
}

fn print_entries(registry: &FilterRegistry, filter: Filter) {
    match filter {
        Filter::ConfigDefaults | Filter::ConfigUnique | Filter::ConfigOverrides => {
            let entries = match filter {
                Filter::ConfigDefaults => registry.config_defaults(),
                Filter::ConfigUnique => registry.config_unique(),
                _ => registry.config_overrides(),
            };
            for entry in entries {
                println!("  {} = {}", entry.name, entry.value);
            }
        }
        Filter::CliDoInitTasks => {
            for task in registry.init_tasks() {
                println!("  {} ({} bytes)", task.service, task.script.len());
            }
        }
        Filter::ImagesBuild => {
            for image in registry.images_build() {
                println!("  {} <- {} -> {}", image.name, image.context.join("/"), image.tag);
            }
        }
        Filter::ImagesPull | Filter::ImagesPush => {
            let images = if filter == Filter::ImagesPull {
                registry.images_pull()
            } else {
                registry.images_push()
            };
            for image in images {
                println!("  {} -> {}", image.name, image.tag);
            }
        }
        Filter::EnvTemplateRoots => {
            for root in registry.env_template_roots() {
                println!("  {}", root);
            }
        }
        Filter::EnvTemplateTargets => {
            for target in registry.env_template_targets() {
                println!("  {} -> {}", target.source, target.destination);
            }
        }
        Filter::EnvPatches => {
            for patch in registry.env_patches() {
                println!("  {} ({} bytes)", patch.name, patch.content.len());
            }
        }
        Filter::CliDoCommands => {
            for job in registry.do_commands() {
                println!("  {} ({} tasks)", job.name, job.tasks.len());
            }
        }
        Filter::CliCommands => {
            for command in registry.cli_commands() {
                println!("  {}: {}", command.name, command.about);
            }
        }
    }
}

/// Verify the loaded registrations against the resource tree.
///
/// Load itself already proves the task scripts and the patches directory
/// exist; this adds the pull/push symmetry invariant and checks that every
/// registered template path points at a real directory.
fn check(registry: &FilterRegistry, resources: &ResourceRoot) -> anyhow::Result<()> {
    if registry.images_pull() != registry.images_push() {
        bail!("IMAGES_PULL and IMAGES_PUSH are out of sync");
    }

    let templates = resources.templates_root();
    if !templates.is_dir() {
        bail!("template root {} is not a directory", templates.display());
    }
    for target in registry.env_template_targets() {
        let source = templates.join(&target.source);
        if !source.is_dir() {
            bail!(
                "template target source {} missing under {}",
                target.source,
                templates.display()
            );
        }
    }

    Ok(())
}
