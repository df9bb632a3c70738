//! The interactive "pick a project" flow.

use tracing::{info, warn};

use crate::catalog::{CatalogItem, CatalogSources, ItemKind, build_catalog, list_local_entries};
use crate::layout::ProjectSelector;
use crate::picker::PickerItem;
use crate::usage;

use super::active::active_projects;
use super::errors::SessionError;
use super::open::{clone_project, ensure_root, launch, load_workspace_cache};
use super::types::{PickOutcome, SessionContext};

pub const PICK_TITLE: &str = "Select a project";

/// Build the catalog, let the user pick, then open (cloning if needed).
///
/// The cache is written once, after the selection and before the session
/// is materialized. A selection only counts as an access once its project
/// directory exists, so a failed clone leaves the counters untouched.
pub fn pick_project(
    ctx: &SessionContext<'_>,
    extra: Vec<CatalogItem>,
) -> Result<PickOutcome, SessionError> {
    let ws = ctx.workspace;
    let root = ensure_root(ws)?;
    let mut cache = load_workspace_cache(ws, &root);

    let entries = list_local_entries(&root).map_err(|source| SessionError::ReadWorkspace {
        path: root.display().to_string(),
        source,
    })?;
    let active = active_projects(ctx);

    let catalog = build_catalog(
        CatalogSources {
            workspace: ws,
            entries: &entries,
            active_projects: &active,
            extra,
            git: ctx.git,
            remote: ctx.remote,
        },
        &mut cache,
    );

    let items: Vec<PickerItem> = catalog.items.iter().map(PickerItem::from).collect();
    let choice = match ctx.picker.pick(PICK_TITLE, &items) {
        Ok(choice) => choice,
        Err(e) => {
            usage::save_best_effort(ws, &mut cache);
            return Err(e.into());
        }
    };

    let selected = choice.and_then(|key| catalog.find(&key).cloned());
    let Some(selected) = selected else {
        usage::save_best_effort(ws, &mut cache);
        info!(event = "core.pick.cancelled");
        return Ok(PickOutcome::Cancelled);
    };

    let (name, clonable) = match selected.kind {
        ItemKind::Local { name } => (name, false),
        ItemKind::Clonable { name } => (name, true),
        ItemKind::Extra { key } => {
            usage::save_best_effort(ws, &mut cache);
            return Ok(PickOutcome::Extra { key });
        }
        ItemKind::ErrorPlaceholder => {
            usage::save_best_effort(ws, &mut cache);
            warn!(event = "core.pick.error_item_selected");
            return Ok(PickOutcome::Cancelled);
        }
    };

    let project_path = if clonable {
        match clone_project(ctx, &root, &name) {
            Ok(path) => path,
            Err(e) => {
                usage::save_best_effort(ws, &mut cache);
                return Err(e);
            }
        }
    } else {
        root.join(&name)
    };

    usage::record_access(ws, &mut cache, &name);
    usage::save_best_effort(ws, &mut cache);

    let result = launch(ctx, &ProjectSelector::new(name), &project_path, clonable)?;
    Ok(PickOutcome::Opened {
        project: result.project,
        outcome: result.outcome,
        cloned: result.cloned,
    })
}
