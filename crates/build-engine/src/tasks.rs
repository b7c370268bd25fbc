//! Host task registry
//!
//! [`TaskRegistry`] is the slice of the host's task graph the lifecycle
//! wiring needs. [`TaskGraph`] is an in-memory registry: it records tasks and
//! ordering edges but never schedules anything.

use std::fmt;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use serde::Serialize;

use crate::hooks::BuildHook;
use crate::{BuildError, Result};

/// Task registry of the host build system
pub trait TaskRegistry {
    /// Register a hook task. Returns `false` when the name is already taken;
    /// the existing task is kept.
    fn register(&mut self, name: &str, hook: Arc<dyn BuildHook>) -> bool;

    /// Names of every registered task
    fn task_names(&self) -> Vec<String>;

    /// Make `task` depend on `dependency`. Returns `false` if the edge existed.
    fn depends_on(&mut self, task: &str, dependency: &str) -> Result<bool>;

    /// Run `finalizer` after `task`. Returns `false` if the edge existed.
    fn finalized_by(&mut self, task: &str, finalizer: &str) -> Result<bool>;

    /// Tasks whose whole name matches `pattern`
    fn matching(&self, pattern: &Regex) -> Vec<String> {
        self.task_names()
            .into_iter()
            .filter(|name| pattern.is_match(name))
            .collect()
    }

    /// Add a `kind` edge to `target` on every task matching `pattern`, both
    /// the tasks registered now and any registered later. Returns the tasks
    /// that got a new edge now.
    fn configure_each(&mut self, pattern: Regex, kind: EdgeKind, target: &str) -> Result<Vec<String>>;
}

/// A task in the graph: a host task or a registered hook
#[derive(Default)]
pub struct TaskNode {
    pub depends_on: IndexSet<String>,
    pub finalized_by: IndexSet<String>,
    hook: Option<Arc<dyn BuildHook>>,
}

impl TaskNode {
    pub fn hook(&self) -> Option<&Arc<dyn BuildHook>> {
        self.hook.as_ref()
    }
}

impl fmt::Debug for TaskNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskNode")
            .field("depends_on", &self.depends_on)
            .field("finalized_by", &self.finalized_by)
            .field("hook", &self.hook.as_ref().map(|h| h.name().to_string()))
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    DependsOn,
    FinalizedBy,
}

/// Ordering edge between two tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub task: String,
    pub kind: EdgeKind,
    pub target: String,
}

/// Edge applied to every matching task, present and future
#[derive(Debug)]
struct TaskRule {
    pattern: Regex,
    kind: EdgeKind,
    target: String,
}

impl TaskRule {
    fn apply(&self, node: &mut TaskNode) -> bool {
        match self.kind {
            EdgeKind::DependsOn => node.depends_on.insert(self.target.clone()),
            EdgeKind::FinalizedBy => node.finalized_by.insert(self.target.clone()),
        }
    }
}

/// In-memory task registry
#[derive(Debug, Default)]
pub struct TaskGraph {
    tasks: IndexMap<String, TaskNode>,
    rules: Vec<TaskRule>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task owned by the host (e.g. `assembleBankingDebug`). Rules
    /// from [`TaskRegistry::configure_each`] apply to it right away.
    pub fn add_host_task(&mut self, name: &str) {
        if self.tasks.contains_key(name) {
            return;
        }
        let mut node = TaskNode::default();
        for rule in self.rules.iter().filter(|r| r.pattern.is_match(name)) {
            rule.apply(&mut node);
        }
        self.tasks.insert(name.to_string(), node);
    }

    pub fn with_host_tasks<I, S>(tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut graph = Self::new();
        for task in tasks {
            graph.add_host_task(task.as_ref());
        }
        graph
    }

    pub fn task(&self, name: &str) -> Option<&TaskNode> {
        self.tasks.get(name)
    }

    pub fn hook(&self, name: &str) -> Option<Arc<dyn BuildHook>> {
        self.tasks.get(name).and_then(|t| t.hook.clone())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Every ordering edge in registration order
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for (name, node) in &self.tasks {
            for dependency in &node.depends_on {
                edges.push(Edge {
                    task: name.clone(),
                    kind: EdgeKind::DependsOn,
                    target: dependency.clone(),
                });
            }
            for finalizer in &node.finalized_by {
                edges.push(Edge {
                    task: name.clone(),
                    kind: EdgeKind::FinalizedBy,
                    target: finalizer.clone(),
                });
            }
        }
        edges
    }

    fn ensure_known(&self, name: &str) -> Result<()> {
        if self.tasks.contains_key(name) {
            Ok(())
        } else {
            Err(BuildError::UnknownTask(name.to_string()))
        }
    }
}

impl TaskRegistry for TaskGraph {
    fn register(&mut self, name: &str, hook: Arc<dyn BuildHook>) -> bool {
        if self.tasks.contains_key(name) {
            return false;
        }
        self.tasks.insert(
            name.to_string(),
            TaskNode {
                hook: Some(hook),
                ..Default::default()
            },
        );
        true
    }

    fn task_names(&self) -> Vec<String> {
        self.tasks.keys().cloned().collect()
    }

    fn depends_on(&mut self, task: &str, dependency: &str) -> Result<bool> {
        self.ensure_known(dependency)?;
        let node = self
            .tasks
            .get_mut(task)
            .ok_or_else(|| BuildError::UnknownTask(task.to_string()))?;
        Ok(node.depends_on.insert(dependency.to_string()))
    }

    fn finalized_by(&mut self, task: &str, finalizer: &str) -> Result<bool> {
        self.ensure_known(finalizer)?;
        let node = self
            .tasks
            .get_mut(task)
            .ok_or_else(|| BuildError::UnknownTask(task.to_string()))?;
        Ok(node.finalized_by.insert(finalizer.to_string()))
    }

    fn configure_each(&mut self, pattern: Regex, kind: EdgeKind, target: &str) -> Result<Vec<String>> {
        self.ensure_known(target)?;

        let mut added = Vec::new();
        for name in self.matching(&pattern) {
            let new_edge = match kind {
                EdgeKind::DependsOn => self.depends_on(&name, target)?,
                EdgeKind::FinalizedBy => self.finalized_by(&name, target)?,
            };
            if new_edge {
                added.push(name);
            }
        }

        let rule = TaskRule {
            pattern,
            kind,
            target: target.to_string(),
        };
        let known = self.rules.iter().any(|r| {
            r.kind == rule.kind && r.target == rule.target && r.pattern.as_str() == rule.pattern.as_str()
        });
        if !known {
            self.rules.push(rule);
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl BuildHook for Noop {
        fn name(&self) -> &str {
            "noop"
        }

        fn execute(&self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_edges_are_idempotent() {
        let mut graph = TaskGraph::with_host_tasks(["assembleBankingDebug"]);
        assert!(graph.register("preBuildProcessingBankingDebug", Arc::new(Noop)));

        assert!(graph
            .depends_on("assembleBankingDebug", "preBuildProcessingBankingDebug")
            .unwrap());
        assert!(!graph
            .depends_on("assembleBankingDebug", "preBuildProcessingBankingDebug")
            .unwrap());
        assert_eq!(graph.edges().len(), 1);
    }

    #[test]
    fn test_register_keeps_first() {
        let mut graph = TaskGraph::new();
        assert!(graph.register("hook", Arc::new(Noop)));
        assert!(!graph.register("hook", Arc::new(Noop)));
        assert_eq!(graph.len(), 1);
        assert!(graph.hook("hook").is_some());
    }

    #[test]
    fn test_unknown_task() {
        let mut graph = TaskGraph::with_host_tasks(["assembleBankingDebug"]);
        let err = graph.finalized_by("assembleBankingDebug", "missing").unwrap_err();
        assert!(matches!(err, BuildError::UnknownTask(name) if name == "missing"));
    }

    #[test]
    fn test_configure_each_reaches_later_tasks() {
        let mut graph = TaskGraph::with_host_tasks(["assembleBankingDebug"]);
        graph.register("preBuildProcessingBankingDebug", Arc::new(Noop));
        let pattern = Regex::new("^(assemble|bundle)BankingDebug$").unwrap();

        let added = graph
            .configure_each(pattern.clone(), EdgeKind::DependsOn, "preBuildProcessingBankingDebug")
            .unwrap();
        assert_eq!(added, vec!["assembleBankingDebug"]);

        graph.add_host_task("bundleBankingDebug");
        graph.add_host_task("bundleBankingDebugUnitTest");
        assert!(graph
            .task("bundleBankingDebug")
            .unwrap()
            .depends_on
            .contains("preBuildProcessingBankingDebug"));
        assert!(graph.task("bundleBankingDebugUnitTest").unwrap().depends_on.is_empty());

        let again = graph
            .configure_each(pattern, EdgeKind::DependsOn, "preBuildProcessingBankingDebug")
            .unwrap();
        assert!(again.is_empty());
        assert_eq!(graph.rules.len(), 1);
    }

    #[test]
    fn test_configure_each_unknown_target() {
        let mut graph = TaskGraph::with_host_tasks(["assembleBankingDebug"]);
        let pattern = Regex::new("^assembleBankingDebug$").unwrap();
        assert!(graph
            .configure_each(pattern, EdgeKind::FinalizedBy, "missing")
            .is_err());
    }

    #[test]
    fn test_matching_is_full_name() {
        let graph = TaskGraph::with_host_tasks([
            "assembleBankingDebug",
            "assembleBankingDebugAndroidTest",
            "bundleBankingDebug",
        ]);
        let pattern = Regex::new("^(assemble|bundle|generate)BankingDebug$").unwrap();
        assert_eq!(
            graph.matching(&pattern),
            vec!["assembleBankingDebug", "bundleBankingDebug"]
        );
    }
}
