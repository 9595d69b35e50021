use std::collections::BTreeMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

use super::matcher::DependencyMatcher;
use super::{Process, ProcessStatus};

const LEVEL_SPACING: f64 = 150.0;
const NODE_SPACING: f64 = 200.0;

/// Whether a node takes part in, or sits downstream of, a dependency cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    Acyclic,
    /// Member of a cycle (including a process that depends on itself)
    InCycle,
    /// Not on a cycle, but depends transitively on one
    DependsOnCycle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyNode {
    pub id: String,
    pub title: String,
    pub status: ProcessStatus,
    /// Ids of the processes this one depends on
    pub dependencies: Vec<String>,
    /// Ids of the processes depending on this one
    pub dependents: Vec<String>,
    /// Length of the longest dependency chain ending here; roots are level 1.
    /// All members of a cycle share one level.
    pub level: usize,
    pub cycle_status: CycleStatus,
    pub x: f64,
    pub y: f64,
}

/// Edge pointing from a dependency to the process that needs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DependencyGraph {
    pub nodes: Vec<DependencyNode>,
    pub edges: Vec<DependencyEdge>,
}

impl DependencyGraph {
    pub fn node(&self, id: &str) -> Option<&DependencyNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn has_cycles(&self) -> bool {
        self.nodes
            .iter()
            .any(|n| n.cycle_status == CycleStatus::InCycle)
    }

    pub fn max_level(&self) -> usize {
        self.nodes.iter().map(|n| n.level).max().unwrap_or(0)
    }
}

/// A closed dependency path; the first id is repeated at the end
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyCycle {
    pub cycle: Vec<String>,
}

/// Resolved dependency indices per process, in declaration order.
/// Unresolvable names are dropped; repeats are kept.
fn resolve_adjacency(processes: &[Process], matcher: &dyn DependencyMatcher) -> Vec<Vec<usize>> {
    processes
        .iter()
        .map(|process| {
            process
                .dependencies
                .iter()
                .filter_map(|name| {
                    let resolved = processes.iter().position(|p| matcher.matches(name, p));
                    if resolved.is_none() {
                        log::debug!(
                            "{}: dependency '{}' did not match any process ({} matcher)",
                            process.id,
                            name,
                            matcher.name()
                        );
                    }
                    resolved
                })
                .collect()
        })
        .collect()
}

fn dedup_preserving_order(items: &[usize]) -> Vec<usize> {
    items.iter().fold(Vec::new(), |mut acc, &item| {
        if !acc.contains(&item) {
            acc.push(item);
        }
        acc
    })
}

/// Levels and cycle status computed over the strongly connected components
fn levels_and_cycles(dependencies: &[Vec<usize>]) -> (Vec<usize>, Vec<CycleStatus>) {
    let mut graph: DiGraph<usize, ()> = DiGraph::new();
    let indices: Vec<NodeIndex> = (0..dependencies.len()).map(|i| graph.add_node(i)).collect();
    for (from, deps) in dependencies.iter().enumerate() {
        for &to in deps {
            graph.add_edge(indices[from], indices[to], ());
        }
    }

    // Components come out in reverse topological order: every component a
    // member depends on has already been assigned a level.
    let components = tarjan_scc(&graph);
    let mut component_of = vec![0; dependencies.len()];
    for (c, members) in components.iter().enumerate() {
        for node in members {
            component_of[graph[*node]] = c;
        }
    }

    let mut component_level = vec![0usize; components.len()];
    let mut component_status = vec![CycleStatus::Acyclic; components.len()];

    for (c, members) in components.iter().enumerate() {
        let cyclic = members.len() > 1
            || members
                .iter()
                .any(|&node| graph.contains_edge(node, node));

        let mut max_dep_level = 0;
        let mut downstream_of_cycle = false;
        for &node in members {
            for neighbor in graph.neighbors(node) {
                let dep = component_of[graph[neighbor]];
                if dep == c {
                    continue;
                }
                max_dep_level = max_dep_level.max(component_level[dep]);
                downstream_of_cycle |= component_status[dep] != CycleStatus::Acyclic;
            }
        }

        component_level[c] = max_dep_level + 1;
        component_status[c] = if cyclic {
            CycleStatus::InCycle
        } else if downstream_of_cycle {
            CycleStatus::DependsOnCycle
        } else {
            CycleStatus::Acyclic
        };
    }

    let levels = component_of.iter().map(|&c| component_level[c]).collect();
    let statuses = component_of.iter().map(|&c| component_status[c]).collect();
    (levels, statuses)
}

/// Build the dependency graph with levels, cycle status and layout
/// coordinates.
///
/// Nodes are emitted level by level, ascending, keeping input order within
/// a level. This holds regardless of input order: a process listed before
/// its own dependencies still comes after every node of a lower level.
/// Coordinates are synthetic: `y = level * 150` and nodes are
/// spread 200 apart around `x = 0`.
pub fn build_dependency_graph(
    processes: &[Process],
    matcher: &dyn DependencyMatcher,
) -> DependencyGraph {
    let dependencies: Vec<Vec<usize>> = resolve_adjacency(processes, matcher)
        .iter()
        .map(|deps| dedup_preserving_order(deps))
        .collect();

    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); processes.len()];
    for (i, deps) in dependencies.iter().enumerate() {
        for &dep in deps {
            if !dependents[dep].contains(&i) {
                dependents[dep].push(i);
            }
        }
    }

    let (levels, statuses) = levels_and_cycles(&dependencies);

    let mut by_level: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, &level) in levels.iter().enumerate() {
        by_level.entry(level).or_default().push(i);
    }

    let ids = |indices: &[usize]| -> Vec<String> {
        indices.iter().map(|&i| processes[i].id.clone()).collect()
    };

    let nodes = by_level
        .iter()
        .flat_map(|(&level, members)| {
            let width = members.len() as f64;
            members.iter().enumerate().map(move |(position, &i)| (level, width, position, i))
        })
        .map(|(level, width, position, i)| {
            let process = &processes[i];
            DependencyNode {
                id: process.id.clone(),
                title: process.title.clone(),
                status: process.status,
                dependencies: ids(dependencies[i].as_slice()),
                dependents: ids(dependents[i].as_slice()),
                level,
                cycle_status: statuses[i],
                x: (position as f64 - (width - 1.0) / 2.0) * NODE_SPACING,
                y: level as f64 * LEVEL_SPACING,
            }
        })
        .collect();

    let edges = dependencies
        .iter()
        .enumerate()
        .flat_map(|(i, deps)| {
            deps.iter().map(move |&dep| DependencyEdge {
                from: processes[dep].id.clone(),
                to: processes[i].id.clone(),
            })
        })
        .collect();

    DependencyGraph { nodes, edges }
}

/// Detect dependency cycles with a single depth-first pass.
///
/// The visited set is shared across start nodes, so a cycle only reachable
/// through an already-explored node may go unreported. Each reported cycle
/// is the stack slice from the revisited node, closed by repeating it.
pub fn detect_circular_dependencies(
    processes: &[Process],
    matcher: &dyn DependencyMatcher,
) -> Vec<DependencyCycle> {
    let adjacency = resolve_adjacency(processes, matcher);
    let mut visited = vec![false; processes.len()];
    let mut on_stack = vec![false; processes.len()];
    let mut path = Vec::new();
    let mut cycles = Vec::new();

    for start in 0..processes.len() {
        if !visited[start] {
            dfs_detect_cycles(
                start,
                &adjacency,
                &mut visited,
                &mut on_stack,
                &mut path,
                &mut cycles,
            );
        }
    }

    cycles
        .into_iter()
        .map(|cycle: Vec<usize>| DependencyCycle {
            cycle: cycle.into_iter().map(|i| processes[i].id.clone()).collect(),
        })
        .collect()
}

fn dfs_detect_cycles(
    node: usize,
    adjacency: &[Vec<usize>],
    visited: &mut [bool],
    on_stack: &mut [bool],
    path: &mut Vec<usize>,
    cycles: &mut Vec<Vec<usize>>,
) {
    visited[node] = true;
    on_stack[node] = true;
    path.push(node);

    for &neighbor in &adjacency[node] {
        if !visited[neighbor] {
            dfs_detect_cycles(neighbor, adjacency, visited, on_stack, path, cycles);
        } else if on_stack[neighbor] {
            if let Some(start) = path.iter().position(|&n| n == neighbor) {
                let mut cycle = path[start..].to_vec();
                cycle.push(neighbor);
                cycles.push(cycle);
            }
        }
    }

    path.pop();
    on_stack[node] = false;
}
