//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the route table (manifest, or router point in the compiled source)
//! - Load bundled render trees into the handler registry
//! - Populate the render cache
//! - Read and pre-split the base template
//!
//! # Design Decisions
//! - Fail fast: unreadable inputs are fatal
//! - Handler failures are not: the route just falls back to the template
//! - Subsystems initialize in order, not concurrently

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::cache::RenderCache;
use crate::config::{AppConfig, ConfigError};
use crate::extract::{extract_routes, ManifestError, RouteManifest, RouteTable, RouterPointSyntax};
use crate::http::SiteState;
use crate::markup::BaseTemplate;
use crate::render::{BundleError, HandlerRegistry, TreeBundle};

/// Fatal startup error.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read template {}: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read source {}: {source}", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Bundle(#[from] BundleError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Route table from the manifest when configured, otherwise from the router
/// point in the compiled source. Neither configured yields an empty table.
pub fn load_route_table(config: &AppConfig) -> Result<RouteTable, StartupError> {
    if let Some(path) = &config.ssr.manifest {
        tracing::debug!(manifest = %path.display(), "Loading route manifest");
        return Ok(RouteManifest::load(path)?.into_table());
    }

    let Some(path) = &config.ssr.source else {
        tracing::debug!("No route source configured, pre-rendering disabled");
        return Ok(RouteTable::new());
    };

    let source = fs::read_to_string(path).map_err(|source| StartupError::Source {
        path: path.clone(),
        source,
    })?;
    let syntax = RouterPointSyntax::from(&config.ssr);
    Ok(extract_routes(&source, &syntax))
}

/// Add the configured tree bundle, if any, to `registry`. Bundled trees
/// replace same-named handlers. Only an unreadable or non-object file is an
/// error; a malformed entry just fails its own handler.
pub fn load_bundle(config: &AppConfig, registry: &mut HandlerRegistry) -> Result<(), StartupError> {
    if let Some(path) = &config.ssr.trees {
        let bundle = TreeBundle::load(path)?;
        tracing::debug!(trees = %path.display(), handlers = bundle.len(), "Loaded render tree bundle");
        if bundle.invalid() > 0 {
            tracing::warn!(
                trees = %path.display(),
                invalid = bundle.invalid(),
                "Tree bundle has undecodable entries, their routes will not be pre-rendered"
            );
        }
        registry.extend_from_bundle(bundle);
    }
    Ok(())
}

/// Read the base template and split it at the configured placeholders.
pub fn load_template(config: &AppConfig) -> Result<BaseTemplate, StartupError> {
    let path = config.template_path();
    let raw = fs::read_to_string(&path).map_err(|source| StartupError::Template {
        path: path.clone(),
        source,
    })?;

    let template = BaseTemplate::new(raw, &config.ssr.head_placeholder, &config.ssr.body_placeholder);
    if !template.has_head_slot() {
        tracing::warn!(
            template = %path.display(),
            placeholder = %config.ssr.head_placeholder,
            "Head placeholder not found, head content will be dropped"
        );
    }
    if !template.has_body_slot() {
        tracing::warn!(
            template = %path.display(),
            placeholder = %config.ssr.body_placeholder,
            "Body placeholder not found, body content will be dropped"
        );
    }
    Ok(template)
}

/// Run the whole pre-render pass. `registry` holds the handlers compiled
/// into the binary.
pub fn prepare(config: &AppConfig, mut registry: HandlerRegistry) -> Result<SiteState, StartupError> {
    if config.settings.debug {
        tracing::warn!("Loading SSR code");
    }

    let table = load_route_table(config)?;
    load_bundle(config, &mut registry)?;
    tracing::info!(
        routes = table.routes().len(),
        globals = table.globals().len(),
        handlers = registry.len(),
        "Route table ready"
    );

    let cache = RenderCache::populate(&table, &registry);
    let template = load_template(config)?;

    Ok(SiteState::new(cache, template, config.settings.output_folder.clone()))
}
