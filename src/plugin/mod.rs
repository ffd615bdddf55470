//! The PhilU extensions registrar
//!
//! This module is the whole of the plugin: it populates a [`FilterRegistry`]
//! with the entries the deployment orchestrator consumes at
//! environment-render and job-execution time. There is no registration on
//! import and no global state; a caller invokes [`load`] (or [`register`]
//! against an existing registry) deliberately, and ordering is exactly the
//! source order below.
//!
//! Most entries are static tables. Two are read from the bundled resource
//! tree at load:
//!
//! - **Init tasks**: for each `(service, path)` pair in [`INIT_TASKS`], the
//!   script template under `templates/` is read in full and registered as
//!   the service's initialization task.
//! - **Patches**: every file in `patches/` is registered as
//!   `(basename, content)`, sorted by name, followed by the fixed MFE
//!   entries in [`MFE_PATCHES`].
//!
//! Loading is fail-fast: the first missing or unreadable resource aborts
//! with no partial registration surviving in the returned registry.
//!
//! # Usage
//!
//! ```rust,no_run
//! use philu_extensions::{plugin, resources::ResourceRoot};
//!
//! let resources = ResourceRoot::discover();
//! let registry = plugin::load(&resources).unwrap();
//! println!("registered {} entries", registry.entry_count());
//! ```

use tracing::info;

use crate::error::Result;
use crate::filters::entries::{ConfigEntry, ImageRef, InitTask, PatchEntry, TemplateTarget};
use crate::filters::FilterRegistry;
use crate::resources::ResourceRoot;

/// Settings with default values. Names carry the `PHILU_EXTENSIONS_` prefix
/// so they cannot collide with core or other-plugin settings.
pub const CONFIG_DEFAULTS: [(&str, &str); 4] = [
    ("PHILU_EXTENSIONS_VERSION", env!("CARGO_PKG_VERSION")),
    ("PHILU_EXTENSIONS_BRAND_VERSION", "quince.main"),
    ("PHILU_EXTENSIONS_HEADER_VERSION", "quince.main"),
    ("PHILU_EXTENSIONS_FOOTER_VERSION", "quince.main"),
];

/// Initialization task scripts, as `(service, path under templates/)`.
pub const INIT_TASKS: [(&str, &[&str]); 1] =
    [("lms", &["philu-extensions", "tasks", "lms", "init"])];

/// Images registered into both `IMAGES_PULL` and `IMAGES_PUSH`. A single
/// table keeps the two filters identical: every image pulled from the
/// registry can be pushed back to it.
pub const SYNCED_IMAGES: [(&str, &str); 1] = [("credentials", "{{ CREDENTIALS_DOCKER_IMAGE }}")];

/// Rendered-template targets, as `(source subtree, destination subtree)`.
/// Sources are relative to the registered template root; destinations are
/// relative to the generated environment.
pub const TEMPLATE_TARGETS: [(&str, &str); 3] = [
    ("philu-extensions/build", "plugins"),
    ("philu-extensions/apps", "plugins"),
    ("philu-extensions/k8s", "plugins"),
];

/// Fixed MFE build patches, appended after the discovered patch files.
/// Names must match the insertion markers the MFE build recognizes and are
/// kept byte-for-byte.
pub const MFE_PATCHES: [(&str, &str); 5] = [
    ("mfe-dockerfile-pre-npm-build-learner-record", "ENV USE_LR_MFE='true'"),
    ("mfe-dockerfile-post-npm-instal-authn", "RUN npm i react-zendesk --save"),
    ("mfe-dockerfile-post-npm-instal-learning", "RUN npm i react-zendesk --save"),
    ("mfe-dockerfile-post-npm-instal-learner-record", "RUN npm i react-zendesk --save"),
    ("mfe-dockerfile-post-npm-instal-discussions", "RUN npm i react-zendesk --save"),
];

/// Build a fresh registry and register every plugin entry into it.
///
/// Calling this twice against the same resource tree yields equal
/// registries; nothing accumulates across loads.
pub fn load(resources: &ResourceRoot) -> Result<FilterRegistry> {
    let mut registry = FilterRegistry::new();
    register(&mut registry, resources)?;
    Ok(registry)
}

/// Register every plugin entry into an existing registry, in source order.
///
/// # Errors
/// `ResourceNotFound` when a referenced task script or the patches
/// directory is missing, `Io` when a resource file cannot be read. The
/// first error aborts; entries appended before it are left in `registry`
/// (callers that need all-or-nothing semantics use [`load`]).
pub fn register(registry: &mut FilterRegistry, resources: &ResourceRoot) -> Result<()> {
    register_config(registry);
    register_init_tasks(registry, resources)?;
    register_images(registry);
    register_templates(registry, resources);
    register_patches(registry, resources)?;

    info!(
        entries = registry.entry_count(),
        resources = %resources.base().display(),
        "Registered plugin filters"
    );
    Ok(())
}

fn register_config(registry: &mut FilterRegistry) {
    for (name, value) in CONFIG_DEFAULTS {
        registry.add_config_default(ConfigEntry::new(name, value));
    }
    // CONFIG_UNIQUE: settings without a reasonable shared default
    // (passwords, secret keys). None yet.
    // CONFIG_OVERRIDES: danger zone. Nothing overridden.
}

fn register_init_tasks(registry: &mut FilterRegistry, resources: &ResourceRoot) -> Result<()> {
    for (service, template_path) in INIT_TASKS {
        let mut segments = vec!["templates"];
        segments.extend_from_slice(template_path);
        let script = resources.read(&segments)?;
        registry.add_init_task(InitTask::new(service, script));
    }
    Ok(())
}

fn register_images(registry: &mut FilterRegistry) {
    // IMAGES_BUILD: nothing built locally; the credentials image comes
    // from upstream.
    for (name, tag) in SYNCED_IMAGES {
        registry.add_image_pull(ImageRef::new(name, tag));
    }
    for (name, tag) in SYNCED_IMAGES {
        registry.add_image_push(ImageRef::new(name, tag));
    }
}

fn register_templates(registry: &mut FilterRegistry, resources: &ResourceRoot) {
    registry.add_template_root(resources.templates_root().display().to_string());
    for (source, destination) in TEMPLATE_TARGETS {
        registry.add_template_target(TemplateTarget::new(source, destination));
    }
}

fn register_patches(registry: &mut FilterRegistry, resources: &ResourceRoot) -> Result<()> {
    for path in resources.list_files(&["patches"])? {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content = std::fs::read_to_string(&path)?;
        registry.add_env_patch(PatchEntry::new(name, content));
    }

    for (name, content) in MFE_PATCHES {
        registry.add_env_patch(PatchEntry::new(name, content));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtensionError;
    use crate::filters::Filter;
    use std::fs;
    use tempfile::TempDir;

    /// Build a complete synthetic resource tree with the given patch files.
    fn resource_tree(patches: &[(&str, &str)]) -> (TempDir, ResourceRoot) {
        let tmp = TempDir::new().unwrap();

        let tasks = tmp.path().join("templates/philu-extensions/tasks/lms");
        fs::create_dir_all(&tasks).unwrap();
        fs::write(tasks.join("init"), "#!/bin/sh\necho lms init\n").unwrap();

        let patches_dir = tmp.path().join("patches");
        fs::create_dir_all(&patches_dir).unwrap();
        for (name, content) in patches {
            fs::write(patches_dir.join(name), content).unwrap();
        }

        let root = ResourceRoot::new(tmp.path());
        (tmp, root)
    }

    #[test]
    fn test_load_populates_exact_counts() {
        let (_tmp, root) = resource_tree(&[("patch-a", "A"), ("patch-b", "B")]);
        let registry = load(&root).unwrap();

        assert_eq!(registry.len(Filter::ConfigDefaults), 4);
        assert_eq!(registry.len(Filter::ConfigUnique), 0);
        assert_eq!(registry.len(Filter::ConfigOverrides), 0);
        assert_eq!(registry.len(Filter::CliDoInitTasks), 1);
        assert_eq!(registry.len(Filter::ImagesBuild), 0);
        assert_eq!(registry.len(Filter::ImagesPull), 1);
        assert_eq!(registry.len(Filter::ImagesPush), 1);
        assert_eq!(registry.len(Filter::EnvTemplateRoots), 1);
        assert_eq!(registry.len(Filter::EnvTemplateTargets), 3);
        assert_eq!(registry.len(Filter::EnvPatches), 2 + MFE_PATCHES.len());
        assert_eq!(registry.len(Filter::CliDoCommands), 0);
        assert_eq!(registry.len(Filter::CliCommands), 0);
    }

    #[test]
    fn test_config_defaults_carry_plugin_prefix() {
        let (_tmp, root) = resource_tree(&[]);
        let registry = load(&root).unwrap();

        for entry in registry.config_defaults() {
            assert!(
                entry.name.starts_with("PHILU_EXTENSIONS_"),
                "unprefixed setting: {}",
                entry.name
            );
        }
        assert_eq!(
            registry.config_defaults()[0].value,
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_pull_and_push_tables_are_identical() {
        let (_tmp, root) = resource_tree(&[]);
        let registry = load(&root).unwrap();
        assert_eq!(registry.images_pull(), registry.images_push());
        assert_eq!(registry.images_pull()[0].name, "credentials");
        assert_eq!(
            registry.images_pull()[0].tag,
            "{{ CREDENTIALS_DOCKER_IMAGE }}"
        );
    }

    #[test]
    fn test_init_task_holds_full_script_text() {
        let (_tmp, root) = resource_tree(&[]);
        let registry = load(&root).unwrap();

        let task = &registry.init_tasks()[0];
        assert_eq!(task.service, "lms");
        assert_eq!(task.script, "#!/bin/sh\necho lms init\n");
    }

    #[test]
    fn test_missing_init_script_fails_load() {
        let (tmp, root) = resource_tree(&[]);
        fs::remove_file(tmp.path().join("templates/philu-extensions/tasks/lms/init")).unwrap();

        let err = load(&root).unwrap_err();
        assert!(matches!(err, ExtensionError::ResourceNotFound(_)));
        assert!(err.to_string().contains("tasks/lms/init"));
    }

    #[test]
    fn test_missing_patches_dir_fails_load() {
        let (tmp, root) = resource_tree(&[]);
        fs::remove_dir_all(tmp.path().join("patches")).unwrap();

        let err = load(&root).unwrap_err();
        assert!(matches!(err, ExtensionError::ResourceNotFound(_)));
    }

    #[test]
    fn test_discovered_patches_precede_fixed_entries() {
        let (_tmp, root) = resource_tree(&[("foo.patch", "X")]);
        let registry = load(&root).unwrap();

        let names: Vec<&str> = registry
            .env_patches()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "foo.patch",
                "mfe-dockerfile-pre-npm-build-learner-record",
                "mfe-dockerfile-post-npm-instal-authn",
                "mfe-dockerfile-post-npm-instal-learning",
                "mfe-dockerfile-post-npm-instal-learner-record",
                "mfe-dockerfile-post-npm-instal-discussions",
            ]
        );
        assert_eq!(registry.env_patches()[0].content, "X");
    }

    #[test]
    fn test_added_patch_file_appears_in_registry() {
        let (tmp, root) = resource_tree(&[("existing", "1")]);
        let before = load(&root).unwrap();
        assert_eq!(before.len(Filter::EnvPatches), 1 + MFE_PATCHES.len());

        fs::write(tmp.path().join("patches/added"), "2").unwrap();
        let after = load(&root).unwrap();
        assert_eq!(after.len(Filter::EnvPatches), 2 + MFE_PATCHES.len());

        let added = after
            .env_patches()
            .iter()
            .find(|p| p.name == "added")
            .unwrap();
        assert_eq!(added.content, "2");
        // Discovered entries stay ahead of the fixed MFE entries.
        let added_pos = after.env_patches().iter().position(|p| p.name == "added");
        assert!(added_pos.unwrap() < after.len(Filter::EnvPatches) - MFE_PATCHES.len());
    }

    #[test]
    fn test_discovered_patches_sorted_by_name() {
        let (_tmp, root) = resource_tree(&[("zz-last", "z"), ("aa-first", "a")]);
        let registry = load(&root).unwrap();
        assert_eq!(registry.env_patches()[0].name, "aa-first");
        assert_eq!(registry.env_patches()[1].name, "zz-last");
    }

    #[test]
    fn test_load_twice_is_idempotent() {
        let (_tmp, root) = resource_tree(&[("foo.patch", "X")]);
        let first = load(&root).unwrap();
        let second = load(&root).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.entry_count(), second.entry_count());
    }

    #[test]
    fn test_template_root_points_into_resources() {
        let (tmp, root) = resource_tree(&[]);
        let registry = load(&root).unwrap();

        let roots = registry.env_template_roots();
        assert_eq!(roots.len(), 1);
        assert_eq!(
            roots[0],
            tmp.path().join("templates").display().to_string()
        );
    }

    #[test]
    fn test_template_targets_land_under_plugins() {
        let (_tmp, root) = resource_tree(&[]);
        let registry = load(&root).unwrap();

        let sources: Vec<&str> = registry
            .env_template_targets()
            .iter()
            .map(|t| t.source.as_str())
            .collect();
        assert_eq!(
            sources,
            vec![
                "philu-extensions/build",
                "philu-extensions/apps",
                "philu-extensions/k8s",
            ]
        );
        assert!(registry
            .env_template_targets()
            .iter()
            .all(|t| t.destination == "plugins"));
    }

    #[test]
    fn test_bundled_resource_tree_loads() {
        let root = ResourceRoot::new(concat!(env!("CARGO_MANIFEST_DIR"), "/resources"));
        let registry = load(&root).unwrap();

        assert_eq!(registry.len(Filter::CliDoInitTasks), 1);
        assert!(registry.len(Filter::EnvPatches) > MFE_PATCHES.len());
        assert!(registry.init_tasks()[0].script.starts_with("#!/"));
    }
}
