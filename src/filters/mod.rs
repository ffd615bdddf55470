//! Filter registry for the deployment orchestrator
//!
//! The orchestrator exposes a set of named extension points ("filters"),
//! each accepting an ordered sequence of records with a fixed shape. This
//! module models that surface as a typed registry: one vector per filter,
//! append-only, insertion order preserved.
//!
//! The registry never deduplicates. If two entries share a name, the host
//! decides how they combine when it consumes the filter; this code only
//! guarantees the order they were registered in.
//!
//! # Architecture
//!
//! - **entries**: record types, one per filter shape
//! - [`Filter`]: the host-facing filter names
//! - [`FilterRegistry`]: the typed, append-only registration surface
//!
//! # Usage
//!
//! ```rust
//! use philu_extensions::filters::{entries::ConfigEntry, Filter, FilterRegistry};
//!
//! let mut registry = FilterRegistry::new();
//! registry.add_config_default(ConfigEntry::new("PHILU_EXTENSIONS_VERSION", "0.3.1"));
//!
//! assert_eq!(registry.len(Filter::ConfigDefaults), 1);
//! assert_eq!(registry.entry_count(), 1);
//! ```

pub mod entries;

use serde::Serialize;
use tracing::debug;

use self::entries::{
    CliCommand, ConfigEntry, DoJob, ImageBuild, ImageRef, InitTask, PatchEntry, TemplateTarget,
};

/// The named extension points consumed from the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// New settings with default values.
    ConfigDefaults,
    /// Settings without a reasonable shared default (secrets, keys).
    ConfigUnique,
    /// Overrides of core or other-plugin settings.
    ConfigOverrides,
    /// Per-service initialization scripts run by the `init` job.
    CliDoInitTasks,
    /// Images built by `images build`.
    ImagesBuild,
    /// Images pulled by `images pull`.
    ImagesPull,
    /// Images pushed by `images push`.
    ImagesPush,
    /// Root directories holding renderable templates.
    EnvTemplateRoots,
    /// (source, destination) pairs for rendered template output.
    EnvTemplateTargets,
    /// Text snippets injected into generated environment files.
    EnvPatches,
    /// Custom jobs invoked through the orchestrator's `do` command.
    CliDoCommands,
    /// Commands added directly to the orchestrator CLI.
    CliCommands,
}

impl Filter {
    /// All filters, in the order the registrar populates them.
    pub const ALL: [Filter; 12] = [
        Filter::ConfigDefaults,
        Filter::ConfigUnique,
        Filter::ConfigOverrides,
        Filter::CliDoInitTasks,
        Filter::ImagesBuild,
        Filter::ImagesPull,
        Filter::ImagesPush,
        Filter::EnvTemplateRoots,
        Filter::EnvTemplateTargets,
        Filter::EnvPatches,
        Filter::CliDoCommands,
        Filter::CliCommands,
    ];

    /// The host-facing filter name.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::ConfigDefaults => "CONFIG_DEFAULTS",
            Filter::ConfigUnique => "CONFIG_UNIQUE",
            Filter::ConfigOverrides => "CONFIG_OVERRIDES",
            Filter::CliDoInitTasks => "CLI_DO_INIT_TASKS",
            Filter::ImagesBuild => "IMAGES_BUILD",
            Filter::ImagesPull => "IMAGES_PULL",
            Filter::ImagesPush => "IMAGES_PUSH",
            Filter::EnvTemplateRoots => "ENV_TEMPLATE_ROOTS",
            Filter::EnvTemplateTargets => "ENV_TEMPLATE_TARGETS",
            Filter::EnvPatches => "ENV_PATCHES",
            Filter::CliDoCommands => "CLI_DO_COMMANDS",
            Filter::CliCommands => "CLI_COMMANDS",
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The typed registry a plugin registers its entries into.
///
/// One ordered vector per filter. All `add_*` methods append; nothing is
/// ever removed or reordered. A registry compares equal to another when
/// every filter holds the same entries in the same order, which is what the
/// load-idempotence tests rely on.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterRegistry {
    config_defaults: Vec<ConfigEntry>,
    config_unique: Vec<ConfigEntry>,
    config_overrides: Vec<ConfigEntry>,
    init_tasks: Vec<InitTask>,
    images_build: Vec<ImageBuild>,
    images_pull: Vec<ImageRef>,
    images_push: Vec<ImageRef>,
    env_template_roots: Vec<String>,
    env_template_targets: Vec<TemplateTarget>,
    env_patches: Vec<PatchEntry>,
    do_commands: Vec<DoJob>,
    cli_commands: Vec<CliCommand>,
}

impl FilterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_config_default(&mut self, entry: ConfigEntry) {
        debug!(filter = %Filter::ConfigDefaults, name = %entry.name, "Registered entry");
        self.config_defaults.push(entry);
    }

    pub fn add_config_unique(&mut self, entry: ConfigEntry) {
        debug!(filter = %Filter::ConfigUnique, name = %entry.name, "Registered entry");
        self.config_unique.push(entry);
    }

    pub fn add_config_override(&mut self, entry: ConfigEntry) {
        debug!(filter = %Filter::ConfigOverrides, name = %entry.name, "Registered entry");
        self.config_overrides.push(entry);
    }

    pub fn add_init_task(&mut self, task: InitTask) {
        debug!(filter = %Filter::CliDoInitTasks, service = %task.service, "Registered entry");
        self.init_tasks.push(task);
    }

    pub fn add_image_build(&mut self, image: ImageBuild) {
        debug!(filter = %Filter::ImagesBuild, name = %image.name, "Registered entry");
        self.images_build.push(image);
    }

    pub fn add_image_pull(&mut self, image: ImageRef) {
        debug!(filter = %Filter::ImagesPull, name = %image.name, "Registered entry");
        self.images_pull.push(image);
    }

    pub fn add_image_push(&mut self, image: ImageRef) {
        debug!(filter = %Filter::ImagesPush, name = %image.name, "Registered entry");
        self.images_push.push(image);
    }

    pub fn add_template_root(&mut self, root: impl Into<String>) {
        let root = root.into();
        debug!(filter = %Filter::EnvTemplateRoots, root = %root, "Registered entry");
        self.env_template_roots.push(root);
    }

    pub fn add_template_target(&mut self, target: TemplateTarget) {
        debug!(filter = %Filter::EnvTemplateTargets, source = %target.source, "Registered entry");
        self.env_template_targets.push(target);
    }

    pub fn add_env_patch(&mut self, patch: PatchEntry) {
        debug!(filter = %Filter::EnvPatches, name = %patch.name, "Registered entry");
        self.env_patches.push(patch);
    }

    pub fn add_do_command(&mut self, job: DoJob) {
        debug!(filter = %Filter::CliDoCommands, name = %job.name, "Registered entry");
        self.do_commands.push(job);
    }

    pub fn add_cli_command(&mut self, command: CliCommand) {
        debug!(filter = %Filter::CliCommands, name = %command.name, "Registered entry");
        self.cli_commands.push(command);
    }

    pub fn config_defaults(&self) -> &[ConfigEntry] {
        &self.config_defaults
    }

    pub fn config_unique(&self) -> &[ConfigEntry] {
        &self.config_unique
    }

    pub fn config_overrides(&self) -> &[ConfigEntry] {
        &self.config_overrides
    }

    pub fn init_tasks(&self) -> &[InitTask] {
        &self.init_tasks
    }

    pub fn images_build(&self) -> &[ImageBuild] {
        &self.images_build
    }

    pub fn images_pull(&self) -> &[ImageRef] {
        &self.images_pull
    }

    pub fn images_push(&self) -> &[ImageRef] {
        &self.images_push
    }

    pub fn env_template_roots(&self) -> &[String] {
        &self.env_template_roots
    }

    pub fn env_template_targets(&self) -> &[TemplateTarget] {
        &self.env_template_targets
    }

    pub fn env_patches(&self) -> &[PatchEntry] {
        &self.env_patches
    }

    pub fn do_commands(&self) -> &[DoJob] {
        &self.do_commands
    }

    pub fn cli_commands(&self) -> &[CliCommand] {
        &self.cli_commands
    }

    /// Number of entries registered into a single filter.
    pub fn len(&self, filter: Filter) -> usize {
        match filter {
            Filter::ConfigDefaults => self.config_defaults.len(),
            Filter::ConfigUnique => self.config_unique.len(),
            Filter::ConfigOverrides => self.config_overrides.len(),
            Filter::CliDoInitTasks => self.init_tasks.len(),
            Filter::ImagesBuild => self.images_build.len(),
            Filter::ImagesPull => self.images_pull.len(),
            Filter::ImagesPush => self.images_push.len(),
            Filter::EnvTemplateRoots => self.env_template_roots.len(),
            Filter::EnvTemplateTargets => self.env_template_targets.len(),
            Filter::EnvPatches => self.env_patches.len(),
            Filter::CliDoCommands => self.do_commands.len(),
            Filter::CliCommands => self.cli_commands.len(),
        }
    }

    /// Total entries registered across all filters.
    pub fn entry_count(&self) -> usize {
        Filter::ALL.iter().map(|f| self.len(*f)).sum()
    }

    /// True when no filter holds any entry.
    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}
