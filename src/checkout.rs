use serde_json::Map;

use crate::config::Config;
use crate::context::Context;
use crate::error::{AdoError, Result};
use crate::model::patch::PatchOperation;
use crate::model::work_item::Relation;
use crate::util::slug::slugify;

pub const ARTIFACT_LINK: &str = "ArtifactLink";
const PLACEHOLDER_GUID: &str = "00000000-0000-0000-0000-000000000000";

#[derive(Debug, Clone, PartialEq)]
pub enum ToggleAction {
    Added { branch: String },
    Removed { relation: Relation },
}

#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    pub id: u64,
    pub action: ToggleAction,
    pub before: Vec<Relation>,
    pub after: Vec<Relation>,
}

pub fn parse_work_item_id(arg: &str) -> Result<u64> {
    arg.trim().parse::<u64>().map_err(|_| {
        AdoError::InvalidArgument(format!("work item id must be a number, got {arg:?}"))
    })
}

pub fn branch_name(id: u64, title: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        format!("feature/#{id}")
    } else {
        format!("feature/#{id}-{slug}")
    }
}

/// Build the Git ref artifact link for `branch`.
///
/// The URL needs the project and repository GUIDs; without them in the config
/// the link is built from placeholders and will not resolve to a real branch.
pub fn branch_relation(config: &Config, branch: &str) -> Relation {
    let (project_id, repository_id) = match (&config.project_id, &config.repository_id) {
        (Some(project), Some(repo)) => (project.as_str(), repo.as_str()),
        _ => {
            log::warn!(
                "project_id/repository_id not configured, linking a placeholder ref for {branch}"
            );
            (PLACEHOLDER_GUID, PLACEHOLDER_GUID)
        }
    };

    let mut attributes = Map::new();
    attributes.insert("name".into(), "Branch".into());

    Relation {
        rel: ARTIFACT_LINK.into(),
        url: format!(
            "vstfs:///Git/Ref/{project_id}%2F{repository_id}%2FGB{}",
            urlencoding::encode(branch)
        ),
        attributes,
    }
}

/// Link a new branch when the work item has no relations, otherwise unlink the first one.
///
/// Any relation counts as a linked branch; relation types are not inspected.
pub async fn toggle_branch_link(ctx: &Context, id: u64) -> Result<ToggleOutcome> {
    let item = ctx.platform.get_work_item(id).await?;
    let before = item.relations.clone();
    log::info!("Work item {id} has {} relation(s)", before.len());
    for relation in &before {
        log::info!("  {} {}", relation.rel, relation.url);
    }

    let action = if before.is_empty() {
        let title = item.title().unwrap_or_else(|| {
            log::warn!("Work item {id} has no title");
            ""
        });
        let branch = branch_name(id, title);
        log::info!("Adding branch {branch}");

        let op = PatchOperation::append_relation(branch_relation(&ctx.config, &branch));
        ctx.platform.update_work_item(&[op], id).await?;
        ToggleAction::Added { branch }
    } else {
        let relation = before[0].clone();
        log::info!("Removing relation {}", relation.url);

        ctx.platform
            .update_work_item(&[PatchOperation::remove_relation(0)], id)
            .await?;
        ToggleAction::Removed { relation }
    };

    let after = ctx.platform.get_work_item(id).await?.relations;
    if after.len().abs_diff(before.len()) != 1 {
        log::warn!(
            "Work item {id} went from {} to {} relation(s); it may have been modified concurrently",
            before.len(),
            after.len()
        );
    }

    Ok(ToggleOutcome {
        id,
        action,
        before,
        after,
    })
}
