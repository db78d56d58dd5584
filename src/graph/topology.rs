// src/graph/topology.rs

//! Read-only view of a submitted job graph.
//!
//! The orchestrator never needs this to submit anything; it is rebuilt from
//! recorded submissions to print a dry-run plan and to check fan-out/fan-in
//! shape independently of the job ids a scheduler happened to assign.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;

use crate::errors::{PipelineError, Result};
use crate::graph::stage::Stage;
use crate::scheduler::SubmittedJob;
use crate::types::{DependencySet, JobId};

/// One submitted job as seen in the graph.
#[derive(Debug, Clone)]
pub struct JobNode {
    pub id: JobId,
    /// Position in submission order.
    pub index: usize,
    pub stage: Stage,
    pub sample: String,
    pub ploidy: Option<u32>,
}

/// Id-independent description of one job: what it is and which earlier
/// submissions (by index) it waits on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeEntry {
    pub stage: Stage,
    pub sample: String,
    pub ploidy: Option<u32>,
    pub waits_on: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct JobGraph {
    // Edge direction: predecessor -> dependent.
    graph: DiGraphMap<JobId, ()>,
    nodes: Vec<JobNode>,
    index_of: HashMap<JobId, usize>,
}

impl JobGraph {
    pub fn from_submissions(jobs: &[SubmittedJob]) -> Self {
        let mut graph: DiGraphMap<JobId, ()> = DiGraphMap::new();
        let mut nodes = Vec::with_capacity(jobs.len());
        let mut index_of = HashMap::with_capacity(jobs.len());

        for (index, job) in jobs.iter().enumerate() {
            graph.add_node(job.id);
            for pred in job.request.options.hold.iter() {
                graph.add_edge(pred, job.id, ());
            }
            index_of.insert(job.id, index);
            nodes.push(JobNode {
                id: job.id,
                index,
                stage: job.request.stage,
                sample: job.request.sample.clone(),
                ploidy: job.request.ploidy,
            });
        }

        Self {
            graph,
            nodes,
            index_of,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Jobs in submission order.
    pub fn jobs(&self) -> &[JobNode] {
        &self.nodes
    }

    pub fn node(&self, id: JobId) -> Option<&JobNode> {
        self.index_of.get(&id).map(|&i| &self.nodes[i])
    }

    /// What `id` was held on at submission.
    pub fn predecessors(&self, id: JobId) -> DependencySet {
        self.graph
            .neighbors_directed(id, Direction::Incoming)
            .collect()
    }

    /// Jobs held on `id`.
    pub fn dependents(&self, id: JobId) -> Vec<JobId> {
        let mut out: Vec<JobId> = self
            .graph
            .neighbors_directed(id, Direction::Outgoing)
            .collect();
        out.sort();
        out
    }

    /// The job for `stage` of `sample` at `ploidy`, if exactly one matches.
    pub fn find(&self, stage: Stage, sample: &str, ploidy: Option<u32>) -> Option<JobId> {
        let mut matches = self
            .nodes
            .iter()
            .filter(|n| n.stage == stage && n.sample == sample && n.ploidy == ploidy);
        let first = matches.next()?;
        if matches.next().is_some() {
            return None;
        }
        Some(first.id)
    }

    /// All jobs of one stage, in submission order.
    pub fn jobs_of(&self, stage: Stage) -> impl Iterator<Item = &JobNode> {
        self.nodes.iter().filter(move |n| n.stage == stage)
    }

    /// An order in which every job comes after all of its predecessors.
    pub fn topological_order(&self) -> Result<Vec<JobId>> {
        toposort(&self.graph, None).map_err(|cycle| {
            PipelineError::ConfigError(format!(
                "cycle detected in job graph involving job {}",
                cycle.node_id()
            ))
        })
    }

    /// Topology with job ids replaced by submission indices.
    ///
    /// Two constructions from the same input compare equal here even when
    /// the scheduler hands out different ids.
    pub fn shape(&self) -> Vec<ShapeEntry> {
        self.nodes
            .iter()
            .map(|n| {
                let mut waits_on: Vec<usize> = self
                    .predecessors(n.id)
                    .iter()
                    .filter_map(|p| self.index_of.get(&p).copied())
                    .collect();
                waits_on.sort_unstable();
                ShapeEntry {
                    stage: n.stage,
                    sample: n.sample.clone(),
                    ploidy: n.ploidy,
                    waits_on,
                }
            })
            .collect()
    }
}
