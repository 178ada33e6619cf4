//! Task tree builder
//!
//! Converts a flat list of tasks (all of one project) into a nested tree
//! rooted at the virtual parent id `0`. Stateless: one pass over a private
//! snapshot, no shared mutation.
//!
//! Tasks whose parent id matches no task in the input are never reached
//! from the root and are dropped from the result. That mirrors the
//! long-standing behavior of the site; callers wanting an error for
//! orphans must check before building.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use lab_core::traits::Id;
use lab_models::ROOT_PARENT_ID;
use serde::{Deserialize, Serialize};

/// One task as loaded from the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: Id,
    pub project_id: Id,
    /// `0` marks a root-level task
    pub parent_id: Id,
    pub title: String,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A task with its fully built subtree
#[derive(Debug, Clone, Serialize)]
pub struct TaskNode {
    #[serde(flatten)]
    pub task: TaskRecord,
    pub children: Vec<TaskNode>,
}

/// Build the nested tree for one project's tasks.
///
/// Children appear under each parent in input order. An empty input yields
/// an empty list.
pub fn build_task_tree(tasks: Vec<TaskRecord>) -> Vec<TaskNode> {
    // Arena of record slots plus an adjacency list parent id -> child
    // positions, both built in one pass over the input.
    let mut children_of: HashMap<Id, Vec<usize>> = HashMap::new();
    for (idx, task) in tasks.iter().enumerate() {
        children_of.entry(task.parent_id).or_default().push(idx);
    }

    let mut slots: Vec<Option<TaskRecord>> = tasks.into_iter().map(Some).collect();
    collect_children(ROOT_PARENT_ID, &children_of, &mut slots)
}

fn collect_children(
    parent_id: Id,
    children_of: &HashMap<Id, Vec<usize>>,
    slots: &mut [Option<TaskRecord>],
) -> Vec<TaskNode> {
    let Some(indices) = children_of.get(&parent_id) else {
        return Vec::new();
    };

    indices
        .iter()
        .filter_map(|&idx| {
            // An already-taken slot means a duplicated id or a cycle;
            // such a record is attached at its first reachable position.
            let task = slots[idx].take()?;
            let children = collect_children(task.id, children_of, slots);
            Some(TaskNode { task, children })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: Id, parent_id: Id) -> TaskRecord {
        let now = Utc::now();
        TaskRecord {
            id,
            project_id: 1,
            parent_id,
            title: format!("task {id}"),
            subtitle: None,
            content: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_nested_tree() {
        // 1 -> (2 -> 4, 3)
        let tree = build_task_tree(vec![task(1, 0), task(2, 1), task(3, 1), task(4, 2)]);

        assert_eq!(tree.len(), 1);
        let root = &tree[0];
        assert_eq!(root.task.id, 1);
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].task.id, 2);
        assert_eq!(root.children[1].task.id, 3);
        assert_eq!(root.children[0].children[0].task.id, 4);
        assert!(root.children[0].children[0].children.is_empty());
        assert!(root.children[1].children.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(build_task_tree(vec![]).is_empty());
    }

    #[test]
    fn test_multiple_roots_keep_input_order() {
        let tree = build_task_tree(vec![task(5, 0), task(2, 0), task(9, 0)]);
        let ids: Vec<Id> = tree.iter().map(|n| n.task.id).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    #[test]
    fn test_orphan_parent_is_dropped() {
        // Task 3 references parent 99, which is not in the set
        let tree = build_task_tree(vec![task(1, 0), task(3, 99)]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].task.id, 1);
    }

    #[test]
    fn test_children_serialized_as_field() {
        let tree = build_task_tree(vec![task(1, 0)]);
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json[0]["id"], 1);
        assert!(json[0]["children"].as_array().unwrap().is_empty());
    }
}
