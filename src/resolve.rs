//! Dependency resolution: id lookup, reference checks and cycle detection

use std::collections::HashMap;

use log::debug;

use crate::error::{Error, Result};
use crate::task::{Task, TaskId};

/// Resolved dependency structure for one task list
///
/// Maps task ids to their position in the input order and each task to
/// the index of its predecessor, if any. Built once per render cycle;
/// the layout stage uses it to look up arrow endpoints without
/// re-validating the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    index_of: HashMap<TaskId, usize>,
    dep_index: Vec<Option<usize>>,
}

impl Resolution {
    /// Position of `id` in the input order
    pub fn index_of(&self, id: TaskId) -> Option<usize> {
        self.index_of.get(&id).copied()
    }

    /// Index of the predecessor of the task at `index`, if it has one
    pub fn dependency_of(&self, index: usize) -> Option<usize> {
        self.dep_index.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.dep_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dep_index.is_empty()
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Validate the dependency structure of `tasks`
///
/// Rejects duplicate ids, references to unknown tasks and dependency
/// cycles. A self-dependency is a cycle of length one, not a special
/// case. The task named in a cycle error always lies on the cycle
/// itself, never on a chain that merely leads into it.
pub fn resolve(tasks: &[Task]) -> Result<Resolution> {
    let mut index_of = HashMap::with_capacity(tasks.len());
    for (i, task) in tasks.iter().enumerate() {
        if index_of.insert(task.id, i).is_some() {
            return Err(Error::DuplicateTaskId { task_id: task.id });
        }
    }

    let mut dep_index = Vec::with_capacity(tasks.len());
    for task in tasks {
        match task.dependency {
            None => dep_index.push(None),
            Some(dep) => match index_of.get(&dep) {
                Some(&i) => dep_index.push(Some(i)),
                None => {
                    return Err(Error::UnknownDependency {
                        task_id: task.id,
                        dependency_id: dep,
                    })
                }
            },
        }
    }

    // Each task has at most one outgoing edge, so an iterative walk over
    // predecessor chains visits every node once across all starts.
    let mut mark = vec![Mark::Unvisited; tasks.len()];
    for start in 0..tasks.len() {
        let mut path = Vec::new();
        let mut cursor = Some(start);
        while let Some(i) = cursor {
            match mark[i] {
                Mark::Done => break,
                Mark::InProgress => {
                    return Err(Error::Cycle {
                        task_id: tasks[i].id,
                    })
                }
                Mark::Unvisited => {
                    mark[i] = Mark::InProgress;
                    path.push(i);
                    cursor = dep_index[i];
                }
            }
        }
        for i in path {
            mark[i] = Mark::Done;
        }
    }

    debug!("resolved {} tasks, no cycles", tasks.len());
    Ok(Resolution {
        index_of,
        dep_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Color;
    use chrono::NaiveDate;

    fn task(id: u32, dependency: Option<u32>) -> Task {
        Task {
            id: TaskId(id),
            name: format!("Task {id}"),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            duration_days: 5,
            color: Color::DarkBlue,
            dependency: dependency.map(TaskId),
        }
    }

    #[test]
    fn resolves_a_simple_chain() {
        let tasks = vec![task(1, None), task(2, Some(1)), task(3, Some(2))];
        let resolution = resolve(&tasks).unwrap();
        assert_eq!(resolution.len(), 3);
        assert_eq!(resolution.index_of(TaskId(2)), Some(1));
        assert_eq!(resolution.dependency_of(0), None);
        assert_eq!(resolution.dependency_of(1), Some(0));
        assert_eq!(resolution.dependency_of(2), Some(1));
    }

    #[test]
    fn forward_references_resolve() {
        // Dependency on a task that appears later in the input order.
        let tasks = vec![task(1, Some(2)), task(2, None)];
        let resolution = resolve(&tasks).unwrap();
        assert_eq!(resolution.dependency_of(0), Some(1));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let tasks = vec![task(1, None), task(1, None)];
        assert_eq!(
            resolve(&tasks),
            Err(Error::DuplicateTaskId { task_id: TaskId(1) })
        );
    }

    #[test]
    fn unknown_dependency_names_both_tasks() {
        let tasks = vec![task(1, Some(2))];
        assert_eq!(
            resolve(&tasks),
            Err(Error::UnknownDependency {
                task_id: TaskId(1),
                dependency_id: TaskId(2),
            })
        );
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let tasks = vec![task(1, Some(1))];
        assert_eq!(resolve(&tasks), Err(Error::Cycle { task_id: TaskId(1) }));
    }

    #[test]
    fn two_task_cycle_is_detected() {
        let tasks = vec![task(1, Some(2)), task(2, Some(1))];
        assert_eq!(resolve(&tasks), Err(Error::Cycle { task_id: TaskId(1) }));
    }

    #[test]
    fn reported_cycle_task_is_on_the_cycle() {
        // Task 1 is a tail hanging off the 2 -> 3 -> 2 loop; the error
        // must name a task inside the loop, not the tail.
        let tasks = vec![task(1, Some(2)), task(2, Some(3)), task(3, Some(2))];
        match resolve(&tasks) {
            Err(Error::Cycle { task_id }) => {
                assert!(task_id == TaskId(2) || task_id == TaskId(3));
            }
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn shared_predecessor_is_not_a_cycle() {
        let tasks = vec![task(1, None), task(2, Some(1)), task(3, Some(1))];
        assert!(resolve(&tasks).is_ok());
    }

    #[test]
    fn long_chains_resolve_without_recursion() {
        let mut tasks = vec![task(1, None)];
        for id in 2..=10_000 {
            tasks.push(task(id, Some(id - 1)));
        }
        let resolution = resolve(&tasks).unwrap();
        assert_eq!(resolution.dependency_of(9_999), Some(9_998));
    }

    #[test]
    fn empty_input_resolves_to_empty_mapping() {
        let resolution = resolve(&[]).unwrap();
        assert!(resolution.is_empty());
    }
}
