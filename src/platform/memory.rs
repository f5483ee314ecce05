use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::Platform;
use crate::error::{AdoError, Result};
use crate::model::build::DefinitionReference;
use crate::model::patch::PatchOperation;
use crate::model::work_item::{Relation, WorkItem, TITLE_FIELD};

/// In-memory platform that records every call, for exercising commands without a network.
#[derive(Default)]
pub struct MemoryPlatform {
    items: Mutex<HashMap<u64, WorkItem>>,
    definitions: HashMap<String, Vec<DefinitionReference>>,
    pub patches: Arc<Mutex<Vec<(u64, Vec<PatchOperation>)>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    reject_patches: bool,
    ignore_patches: bool,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(self, id: u64, title: &str) -> Self {
        let mut fields = serde_json::Map::new();
        fields.insert(TITLE_FIELD.into(), title.into());
        self.items.lock().unwrap().insert(
            id,
            WorkItem {
                id,
                fields,
                relations: Vec::new(),
            },
        );
        self
    }

    pub fn with_relations(self, id: u64, relations: Vec<Relation>) -> Self {
        if let Some(item) = self.items.lock().unwrap().get_mut(&id) {
            item.relations = relations;
        }
        self
    }

    pub fn with_definitions(mut self, project: &str, defs: Vec<DefinitionReference>) -> Self {
        self.definitions.insert(project.to_string(), defs);
        self
    }

    pub fn rejecting_patches(mut self) -> Self {
        self.reject_patches = true;
        self
    }

    /// Accept patches without applying them, as if another writer undid them.
    pub fn ignoring_patches(mut self) -> Self {
        self.ignore_patches = true;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn relations(&self, id: u64) -> Vec<Relation> {
        self.items.lock().unwrap()[&id].relations.clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn apply(item: &mut WorkItem, op: &PatchOperation) -> Result<()> {
    match op {
        PatchOperation::Add { path, value } if path == "/relations/-" => {
            item.relations.push(value.clone());
            Ok(())
        }
        PatchOperation::Remove { path } => {
            let index = path
                .strip_prefix("/relations/")
                .and_then(|i| i.parse::<usize>().ok())
                .filter(|i| *i < item.relations.len())
                .ok_or_else(|| AdoError::remote("Update work item", format!("bad path {path}")))?;
            item.relations.remove(index);
            Ok(())
        }
        PatchOperation::Add { path, .. } => Err(AdoError::remote(
            "Update work item",
            format!("unsupported path {path}"),
        )),
    }
}

#[async_trait]
impl Platform for MemoryPlatform {
    fn name(&self) -> &str {
        "Memory"
    }

    async fn get_work_item(&self, id: u64) -> Result<WorkItem> {
        self.record(format!("get {id}"));
        self.items
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| AdoError::NotFound(format!("Work item {id}")))
    }

    async fn update_work_item(&self, ops: &[PatchOperation], id: u64) -> Result<WorkItem> {
        self.record(format!("update {id}"));
        if self.reject_patches {
            return Err(AdoError::remote("Update work item", "permission denied"));
        }
        let mut items = self.items.lock().unwrap();
        let item = items
            .get_mut(&id)
            .ok_or_else(|| AdoError::NotFound(format!("Work item {id}")))?;

        // All-or-nothing, like the server
        let mut updated = item.clone();
        for op in ops {
            apply(&mut updated, op)?;
        }
        if !self.ignore_patches {
            *item = updated.clone();
        }
        self.patches.lock().unwrap().push((id, ops.to_vec()));
        Ok(updated)
    }

    async fn get_definitions(&self, project: &str) -> Result<Vec<DefinitionReference>> {
        self.record(format!("definitions {project}"));
        self.definitions
            .get(project)
            .cloned()
            .ok_or_else(|| AdoError::NotFound(format!("Project {project}")))
    }
}
