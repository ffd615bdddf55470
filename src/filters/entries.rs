//! Entry records for the host filter registry
//!
//! Every filter accepts an ordered sequence of records with a fixed shape.
//! Entries are constructed once at plugin load and never mutated; everything
//! that happens with them afterwards (file writes, image builds, script
//! execution) is owned by the orchestrator.

use serde::{Deserialize, Serialize};

/// A configuration setting and its value.
///
/// Used by `CONFIG_DEFAULTS`, `CONFIG_UNIQUE`, and `CONFIG_OVERRIDES`.
/// Setting names are not deduplicated here; later registrations may shadow
/// earlier ones in the host registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// Setting name, e.g. `PHILU_EXTENSIONS_VERSION`.
    pub name: String,

    /// Default (or overriding) value. May be a host template string.
    pub value: String,
}

impl ConfigEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An initialization task: a shell script run once inside a service
/// container during environment setup (`CLI_DO_INIT_TASKS`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitTask {
    /// Service whose container runs the script, e.g. `lms`.
    pub service: String,

    /// Full script text, read from the bundled resource tree.
    pub script: String,
}

impl InitTask {
    pub fn new(service: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            script: script.into(),
        }
    }
}

/// A Docker image build manifest (`IMAGES_BUILD`).
///
/// Describes how the orchestrator builds an image; it is not the image
/// itself. The build context is a path-segment list relative to the rendered
/// plugin environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBuild {
    /// Image name as known to the orchestrator.
    pub name: String,

    /// Build context path segments, e.g. `["plugins", "philu-extensions", "build", "myimage"]`.
    pub context: Vec<String>,

    /// Image tag. May contain host template expressions, registered verbatim.
    pub tag: String,

    /// `--build-arg` style arguments passed through to the build.
    #[serde(default)]
    pub build_args: Vec<String>,
}

/// A Docker image pull/push manifest (`IMAGES_PULL`, `IMAGES_PUSH`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Image name as known to the orchestrator.
    pub name: String,

    /// Image tag. May contain host template expressions, registered verbatim.
    pub tag: String,
}

impl ImageRef {
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }
}

/// A template rendering target (`ENV_TEMPLATE_TARGETS`).
///
/// Templates under `source` (relative to a registered template root) are
/// rendered by the host to `destination/source` inside the generated
/// environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateTarget {
    /// Source subtree relative to the template root, e.g. `philu-extensions/build`.
    pub source: String,

    /// Destination subtree relative to the generated environment, e.g. `plugins`.
    pub destination: String,
}

impl TemplateTarget {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// An environment patch (`ENV_PATCHES`): raw text injected verbatim into a
/// generated environment file at the insertion marker matching `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchEntry {
    /// Insertion marker name. For discovered patches this is the file's
    /// basename; fixed entries must match the markers the host recognizes.
    pub name: String,

    /// Patch text, injected as-is.
    pub content: String,
}

impl PatchEntry {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A single task within a custom job: a shell command run in a service
/// container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTask {
    /// Service whose container runs the command.
    pub service: String,

    /// Shell command text.
    pub command: String,
}

/// A custom `do`-style job descriptor (`CLI_DO_COMMANDS`).
///
/// Jobs are invoked by the orchestrator's `do` command and expand into an
/// ordered list of per-service shell tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoJob {
    /// Job name as invoked on the orchestrator CLI.
    pub name: String,

    /// One-line help text.
    pub help: String,

    /// Tasks executed in order when the job runs.
    pub tasks: Vec<JobTask>,
}

/// A descriptor for a command added directly to the orchestrator CLI
/// (`CLI_COMMANDS`). Unlike jobs, these run on the user's host machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliCommand {
    /// Command name.
    pub name: String,

    /// One-line help text.
    pub about: String,
}
