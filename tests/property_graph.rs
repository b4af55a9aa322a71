// tests/property_graph.rs

use std::collections::HashSet;
use std::path::PathBuf;

use proptest::prelude::*;

use genopipe::dag::{PipelineGraph, TaskId};
use genopipe::stages;
use genopipe::task::{Resources, TaskSpec};

/// Random DAG shape: a task count and a set of forward edges (i, j) with
/// i < j, so the generated graph is acyclic by construction.
fn dag_strategy(max_tasks: usize) -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2..max_tasks).prop_flat_map(|n| {
        let mut pairs = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                pairs.push((i, j));
            }
        }
        let max = pairs.len();
        (Just(n), proptest::sample::subsequence(pairs, 0..=max))
    })
}

fn specs_from_edges(n: usize, edges: &[(usize, usize)]) -> Vec<TaskSpec> {
    (0..n)
        .map(|j| {
            let mut builder = TaskSpec::builder(format!("t{j}"));
            for (i, _) in edges.iter().filter(|(_, to)| *to == j) {
                builder = builder.input(format!("t{i}.out"));
            }
            builder
                .output(format!("t{j}.out"))
                .resources(Resources::new(1, "1g", "0:10:00"))
                .command("true")
                .build()
                .expect("synthetic spec is valid")
        })
        .collect()
}

proptest! {
    #[test]
    fn forward_edge_dags_always_build((n, edges) in dag_strategy(12)) {
        let graph = PipelineGraph::build(specs_from_edges(n, &edges))
            .expect("acyclic by construction");

        prop_assert_eq!(graph.len(), n);
        prop_assert_eq!(graph.topo_order().len(), n);

        let position = |id: TaskId| {
            graph.topo_order().iter().position(|&t| t == id).unwrap()
        };
        for &(i, j) in &edges {
            prop_assert!(
                position(TaskId(i)) < position(TaskId(j)),
                "edge {} -> {} violated by topo order", i, j
            );
        }
    }

    #[test]
    fn dependency_lists_mirror_dependent_lists((n, edges) in dag_strategy(12)) {
        let graph = PipelineGraph::build(specs_from_edges(n, &edges)).unwrap();

        for id in graph.ids() {
            for &dep in graph.dependencies_of(id) {
                prop_assert!(graph.dependents_of(dep).contains(&id));
            }
            for &dependent in graph.dependents_of(id) {
                prop_assert!(graph.dependencies_of(dependent).contains(&id));
            }
        }

        let expected: HashSet<(usize, usize)> = edges.iter().copied().collect();
        let actual: HashSet<(usize, usize)> = graph
            .ids()
            .flat_map(|id| {
                graph
                    .dependencies_of(id)
                    .iter()
                    .map(move |dep| (dep.0, id.0))
            })
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn manifest_descriptor_tracks_entry_count(n in 0usize..20) {
        let entries: Vec<(String, PathBuf)> = (0..n)
            .map(|i| (format!("s{i}"), PathBuf::from(format!("s{i}.g.vcf.gz"))))
            .collect();

        let spec = stages::gvcf_list(&entries, std::path::Path::new("sample_map.tsv")).unwrap();

        prop_assert_eq!(spec.inputs().len(), n);
        prop_assert_eq!(spec.command().matches("printf").count(), n);
        prop_assert_eq!(spec.outputs(), &[PathBuf::from("sample_map.tsv")]);
    }
}
