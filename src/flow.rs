// Sankey construction over vehicle type -> cause -> accident type -> road.
//
// Only the five most frequent values of each dimension take part, and only
// records that fall inside all four top sets are counted. Node indices come
// from one insertion-ordered table keyed by (dimension, label), so a label
// resolves to the same index in every layer, while the same text in two
// different dimensions stays two separate nodes.
use crate::reports::value_counts;
use crate::store::WorkingSet;
use crate::types::{FlowEdge, FlowGraph, IncidentRecord};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashSet};

pub const TOP_K: usize = 5;

/// Catch-all value excluded from the top sets.
pub const CATCH_ALL: &str = "other";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    VehicleType,
    PresumedCause,
    AccidentType,
    RoadDescription,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::VehicleType,
        Dimension::PresumedCause,
        Dimension::AccidentType,
        Dimension::RoadDescription,
    ];

    pub fn value<'r>(&self, r: &'r IncidentRecord) -> Option<&'r str> {
        match self {
            Dimension::VehicleType => r.vehicle_type.as_deref(),
            Dimension::PresumedCause => r.presumed_cause.as_deref(),
            Dimension::AccidentType => r.accident_type.as_deref(),
            Dimension::RoadDescription => r.road_description.as_deref(),
        }
    }
}

/// Label -> node index table, filled dimension by dimension.
#[derive(Debug, Default)]
pub struct NodeTable<'a> {
    nodes: IndexMap<(Dimension, &'a str), usize>,
}

impl<'a> NodeTable<'a> {
    fn insert(&mut self, dim: Dimension, label: &'a str) {
        let next = self.nodes.len();
        self.nodes.entry((dim, label)).or_insert(next);
    }

    pub fn index(&self, dim: Dimension, label: &str) -> Option<usize> {
        self.nodes.get(&(dim, label)).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn labels(&self) -> Vec<String> {
        self.nodes.keys().map(|(_, l)| l.to_string()).collect()
    }
}

/// The most frequent values of `dim`, skipping [`CATCH_ALL`].
pub fn top_values<'a>(records: &[&'a IncidentRecord], dim: Dimension, k: usize) -> Vec<&'a str> {
    value_counts(records.iter().copied().map(|r| dim.value(r)))
        .into_iter()
        .filter(|(v, _)| *v != CATCH_ALL)
        .take(k)
        .map(|(v, _)| v)
        .collect()
}

/// Intermediate result, kept whole so tests can inspect the node table.
#[derive(Debug)]
pub struct FlowBuild<'a> {
    pub filtered: Vec<&'a IncidentRecord>,
    pub nodes: NodeTable<'a>,
    pub layers: Vec<Vec<FlowEdge>>,
}

impl FlowBuild<'_> {
    pub fn into_graph(self) -> FlowGraph {
        log::debug!(
            "Flow graph: {} records kept, {} nodes",
            self.filtered.len(),
            self.nodes.len()
        );
        FlowGraph {
            labels: self.nodes.labels(),
            edges: self.layers.into_iter().flatten().collect(),
        }
    }
}

pub fn build<'a>(ws: &WorkingSet<'a>) -> FlowBuild<'a> {
    let records: Vec<&'a IncidentRecord> = ws.records().collect();

    let top: Vec<HashSet<&str>> = Dimension::ALL
        .iter()
        .map(|d| top_values(&records, *d, TOP_K).into_iter().collect())
        .collect();

    let filtered: Vec<&'a IncidentRecord> = records
        .into_iter()
        .filter(|r| {
            Dimension::ALL
                .iter()
                .zip(&top)
                .all(|(d, set)| d.value(r).is_some_and(|v| set.contains(v)))
        })
        .collect();

    let mut nodes = NodeTable::default();
    for dim in Dimension::ALL {
        for r in filtered.iter().copied() {
            if let Some(v) = dim.value(r) {
                nodes.insert(dim, v);
            }
        }
    }

    let layers = Dimension::ALL
        .windows(2)
        .map(|pair| transition_edges(&filtered, pair[0], pair[1], &nodes))
        .collect();

    FlowBuild {
        filtered,
        nodes,
        layers,
    }
}

/// Chart 6: the Sankey graph for `ws`.
pub fn flow_graph(ws: &WorkingSet) -> FlowGraph {
    build(ws).into_graph()
}

/// Co-occurrence counts of `from` -> `to` over the filtered records, as
/// edges between node indices.
///
/// Pairs come out in (source, target) label order. Every label was
/// inserted into `nodes` from these same records, so no pair is dropped.
fn transition_edges(
    records: &[&IncidentRecord],
    from: Dimension,
    to: Dimension,
    nodes: &NodeTable,
) -> Vec<FlowEdge> {
    let mut pairs: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for r in records {
        if let (Some(a), Some(b)) = (from.value(r), to.value(r)) {
            *pairs.entry((a, b)).or_insert(0) += 1;
        }
    }
    pairs
        .into_iter()
        .filter_map(|((a, b), value)| {
            Some(FlowEdge {
                source: nodes.index(from, a)?,
                target: nodes.index(to, b)?,
                value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{flow, store};
    use crate::store::RecordStore;

    fn built(s: &RecordStore) -> (FlowGraph, usize) {
        let ws = s.working_set(&s.date_bounds().unwrap());
        let b = build(&ws);
        let n = b.filtered.len();
        (b.into_graph(), n)
    }

    #[test]
    fn three_record_scenario() {
        let s = store(vec![
            flow("motorcycle", "speeding", "rollover", "straight"),
            flow("motorcycle", "speeding", "rollover", "straight"),
            flow("bus", "speeding", "rollover", "straight"),
        ]);
        let (g, kept) = built(&s);
        assert_eq!(kept, 3);
        assert_eq!(g.labels, vec!["motorcycle", "bus", "speeding", "rollover", "straight"]);
        assert_eq!(
            &g.edges[..2],
            &[
                FlowEdge { source: 1, target: 2, value: 1 },
                FlowEdge { source: 0, target: 2, value: 2 },
            ]
        );
        assert_eq!(g.edges[2], FlowEdge { source: 2, target: 3, value: 3 });
        assert_eq!(g.edges[3], FlowEdge { source: 3, target: 4, value: 3 });
    }

    #[test]
    fn graph_has_one_label_per_node() {
        let s = store(vec![
            flow("car", "speeding", "head-on", "curve"),
            flow("bus", "drunk", "rollover", "straight"),
        ]);
        let ws = s.working_set(&s.date_bounds().unwrap());
        let b = build(&ws);
        let (nodes, kept) = (b.nodes.len(), b.filtered.len());
        let g = b.into_graph();
        assert_eq!(kept, 2);
        assert_eq!(nodes, 8);
        assert_eq!(g.labels.len(), nodes);
        assert_eq!(g.edges.len(), 6);
    }

    #[test]
    fn top_values_skip_catch_all_and_break_ties_by_first_seen() {
        let s = store(vec![
            flow("other", "a", "x", "r"),
            flow("other", "a", "x", "r"),
            flow("van", "a", "x", "r"),
            flow("car", "a", "x", "r"),
            flow("truck", "a", "x", "r"),
            flow("bus", "a", "x", "r"),
            flow("taxi", "a", "x", "r"),
            flow("bike", "a", "x", "r"),
            flow("bike", "a", "x", "r"),
        ]);
        let records: Vec<&IncidentRecord> = s.records().iter().collect();
        assert_eq!(
            top_values(&records, Dimension::VehicleType, TOP_K),
            vec!["bike", "van", "car", "truck", "bus"]
        );
    }

    #[test]
    fn filter_is_conjunctive() {
        let mut records = Vec::new();
        // Six causes: "rare" is the least frequent and falls out of the top five.
        for (cause, n) in [("c1", 3), ("c2", 3), ("c3", 2), ("c4", 2), ("c5", 2), ("rare", 1)] {
            for _ in 0..n {
                records.push(flow("car", cause, "x", "r"));
            }
        }
        let s = store(records);
        let (g, kept) = built(&s);
        assert_eq!(kept, 12);
        assert!(!g.labels.iter().any(|l| l == "rare"));
    }

    #[test]
    fn same_text_in_two_dimensions_gets_two_nodes() {
        let s = store(vec![
            flow("unknown", "unknown", "x", "r"),
            flow("car", "speeding", "x", "r"),
        ]);
        let ws = s.working_set(&s.date_bounds().unwrap());
        let b = build(&ws);
        let a = b.nodes.index(Dimension::VehicleType, "unknown").unwrap();
        let c = b.nodes.index(Dimension::PresumedCause, "unknown").unwrap();
        assert_ne!(a, c);
        assert_eq!(b.nodes.len(), 6);
        // The vehicle -> cause edge links the two "unknown" nodes.
        assert!(b.layers[0].contains(&FlowEdge { source: a, target: c, value: 1 }));
        assert!(b.layers[1].iter().any(|e| e.source == c));
    }

    #[test]
    fn indices_are_unique_and_shared_across_layers() {
        let s = store(vec![
            flow("car", "speeding", "head-on", "curve"),
            flow("bus", "drunk", "rollover", "straight"),
            flow("car", "drunk", "head-on", "straight"),
            flow("van", "speeding", "sideswipe", "curve"),
        ]);
        let ws = s.working_set(&s.date_bounds().unwrap());
        let b = build(&ws);
        let n = b.nodes.len();
        for (dim, label) in [
            (Dimension::VehicleType, "car"),
            (Dimension::PresumedCause, "drunk"),
            (Dimension::AccidentType, "head-on"),
            (Dimension::RoadDescription, "curve"),
        ] {
            let idx = b.nodes.index(dim, label).unwrap();
            assert!(idx < n);
            assert_eq!(b.nodes.labels()[idx], label);
        }
        let seen: HashSet<usize> = b.layers.iter().flatten().flat_map(|e| [e.source, e.target]).collect();
        assert_eq!(seen.len(), n);

        let cause_targets: HashSet<usize> = b.layers[0].iter().map(|e| e.target).collect();
        let cause_sources: HashSet<usize> = b.layers[1].iter().map(|e| e.source).collect();
        assert_eq!(cause_targets, cause_sources);
        let acc_targets: HashSet<usize> = b.layers[1].iter().map(|e| e.target).collect();
        let acc_sources: HashSet<usize> = b.layers[2].iter().map(|e| e.source).collect();
        assert_eq!(acc_targets, acc_sources);
    }

    #[test]
    fn each_layer_conserves_filtered_records() {
        let s = store(vec![
            flow("car", "speeding", "head-on", "curve"),
            flow("bus", "drunk", "rollover", "straight"),
            flow("car", "drunk", "head-on", "straight"),
            flow("car", "speeding", "head-on", "curve"),
            flow("other", "speeding", "head-on", "curve"),
        ]);
        let ws = s.working_set(&s.date_bounds().unwrap());
        let b = build(&ws);
        assert_eq!(b.filtered.len(), 4);
        for layer in &b.layers {
            let total: usize = layer.iter().map(|e| e.value).sum();
            assert_eq!(total, b.filtered.len());
        }
    }

    #[test]
    fn empty_input_yields_empty_graph() {
        assert_eq!(flow_graph(&WorkingSet::default()), FlowGraph::default());
        // Only catch-all vehicles: nothing survives the filter.
        let s = store(vec![flow("other", "speeding", "x", "r")]);
        let (g, kept) = built(&s);
        assert_eq!(kept, 0);
        assert!(g.labels.is_empty());
        assert!(g.edges.is_empty());
    }
}
