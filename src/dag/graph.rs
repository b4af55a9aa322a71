use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graphmap::DiGraphMap;

use crate::errors::{GenopipeError, Result};
use crate::task::TaskSpec;

/// Index of a task within a [`PipelineGraph`]; assigned in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub usize);

/// Directed acyclic graph over a set of task descriptors.
///
/// Edges are inferred purely from file paths: a path produced by one task
/// and consumed by another is a producer -> consumer edge. Input paths with
/// no producer are external inputs and must pre-exist when their consumer
/// becomes eligible.
#[derive(Debug)]
pub struct PipelineGraph {
    specs: Vec<TaskSpec>,
    deps: Vec<Vec<TaskId>>,
    dependents: Vec<Vec<TaskId>>,
    external_inputs: Vec<Vec<PathBuf>>,
    topo_order: Vec<TaskId>,
}

impl PipelineGraph {
    /// Build the graph, enforcing the single-producer and acyclicity
    /// invariants. Both violations are definition errors: they abort
    /// planning before any task executes.
    pub fn build(specs: Vec<TaskSpec>) -> Result<Self> {
        // 1. Output path -> producing task. Two producers for one path make
        //    the file's origin ambiguous.
        let mut producers: HashMap<&Path, TaskId> = HashMap::new();
        for (i, spec) in specs.iter().enumerate() {
            for output in spec.outputs() {
                if let Some(prev) = producers.insert(output.as_path(), TaskId(i)) {
                    return Err(GenopipeError::DuplicateOutput {
                        path: output.clone(),
                        first: specs[prev.0].name().to_string(),
                        second: spec.name().to_string(),
                    });
                }
            }
        }

        // 2. Per task: producer edges for produced inputs, external-input
        //    records for the rest. Duplicate edges are collapsed.
        let mut deps: Vec<Vec<TaskId>> = vec![Vec::new(); specs.len()];
        let mut dependents: Vec<Vec<TaskId>> = vec![Vec::new(); specs.len()];
        let mut external_inputs: Vec<Vec<PathBuf>> = vec![Vec::new(); specs.len()];

        for (i, spec) in specs.iter().enumerate() {
            let mut seen: HashSet<TaskId> = HashSet::new();
            for input in spec.inputs() {
                match producers.get(input.as_path()) {
                    Some(&producer) => {
                        if seen.insert(producer) {
                            deps[i].push(producer);
                            dependents[producer.0].push(TaskId(i));
                        }
                    }
                    None => external_inputs[i].push(input.clone()),
                }
            }
        }

        // 3. Topological order; a failed sort means a cycle.
        let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();
        for i in 0..specs.len() {
            graph.add_node(i);
        }
        for (i, task_deps) in deps.iter().enumerate() {
            for dep in task_deps {
                graph.add_edge(dep.0, i, ());
            }
        }

        let topo_order = match toposort(&graph, None) {
            Ok(order) => order.into_iter().map(TaskId).collect(),
            Err(_) => {
                return Err(GenopipeError::Cycle(describe_cycles(&graph, &specs)));
            }
        };

        Ok(Self {
            specs,
            deps,
            dependents,
            external_inputs,
            topo_order,
        })
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        (0..self.specs.len()).map(TaskId)
    }

    pub fn spec(&self, id: TaskId) -> &TaskSpec {
        &self.specs[id.0]
    }

    pub fn name(&self, id: TaskId) -> &str {
        self.specs[id.0].name()
    }

    /// Tasks whose outputs this task consumes.
    pub fn dependencies_of(&self, id: TaskId) -> &[TaskId] {
        &self.deps[id.0]
    }

    /// Tasks that consume this task's outputs.
    pub fn dependents_of(&self, id: TaskId) -> &[TaskId] {
        &self.dependents[id.0]
    }

    /// Input paths of this task that no task in the graph produces.
    pub fn external_inputs_of(&self, id: TaskId) -> &[PathBuf] {
        &self.external_inputs[id.0]
    }

    /// A valid execution order: every producer precedes its consumers.
    pub fn topo_order(&self) -> &[TaskId] {
        &self.topo_order
    }

    /// Tasks with no producer edges; eligible as soon as a run starts.
    pub fn roots(&self) -> Vec<TaskId> {
        self.ids().filter(|id| self.deps[id.0].is_empty()).collect()
    }

    /// Look up a task by its label. First match wins; labels derived from
    /// output file names are unique in practice.
    pub fn find(&self, name: &str) -> Option<TaskId> {
        self.specs
            .iter()
            .position(|s| s.name() == name)
            .map(TaskId)
    }
}

/// Name every task (and its outputs) participating in a cycle.
fn describe_cycles(graph: &DiGraphMap<usize, ()>, specs: &[TaskSpec]) -> String {
    let mut parts = Vec::new();

    for scc in tarjan_scc(graph) {
        let cyclic = scc.len() > 1 || (scc.len() == 1 && graph.contains_edge(scc[0], scc[0]));
        if !cyclic {
            continue;
        }
        for &i in &scc {
            let spec = &specs[i];
            let outputs = spec
                .outputs()
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(format!("'{}' (outputs: {})", spec.name(), outputs));
        }
    }

    parts.join(" <-> ")
}
