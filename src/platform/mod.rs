pub mod azure;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::Result;
use crate::model::build::DefinitionReference;
use crate::model::patch::PatchOperation;
use crate::model::work_item::WorkItem;

/// The subset of the hosted platform API the commands rely on.
#[async_trait]
pub trait Platform: Send + Sync {
    fn name(&self) -> &str;
    /// Fetch a work item with its directly attached relations.
    async fn get_work_item(&self, id: u64) -> Result<WorkItem>;
    async fn update_work_item(&self, ops: &[PatchOperation], id: u64) -> Result<WorkItem>;
    async fn get_definitions(&self, project: &str) -> Result<Vec<DefinitionReference>>;
}

#[cfg(test)]
pub mod memory;


pub fn create_platform(config: &Config) -> Box<dyn Platform> {
    Box::new(azure::AzureDevOps::new(
        config.org_url.clone(),
        config.token.clone(),
    ))
}
