// continent.rs
use crate::graph::TerritoryGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named group of territories worth `bonus_armies` to whoever holds all of them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Continent {
    pub name: String,
    pub bonus_armies: u16,
    pub territories: HashSet<String>,
}

impl Continent {
    pub fn new(name: &str, bonus_armies: u16) -> Self {
        Self {
            name: name.to_string(),
            bonus_armies,
            territories: HashSet::new(),
        }
    }

    pub fn add_territory(&mut self, territory: &str) {
        self.territories.insert(territory.to_string());
    }

    pub fn contains(&self, territory: &str) -> bool {
        self.territories.contains(territory)
    }

    pub fn get_bonus(&self) -> u16 {
        self.bonus_armies
    }
}

/// Outcome of [`ContinentBuilder::validate`]. Nothing here stops a build; it
/// flags edge lists that are probably mistyped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub tag: String,
    pub empty: bool,
    /// Territories the flood fill could not reach.
    pub disjoint: Vec<String>,
    /// Territories with at most one neighbour.
    pub suspicious: Vec<String>,
    /// Borders that named the same territory twice and were dropped.
    pub self_borders: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        !self.empty
            && self.disjoint.is_empty()
            && self.suspicious.is_empty()
            && self.self_borders.is_empty()
    }

    fn log(&self) {
        if self.empty {
            log::warn!("graph with tag {} appears to be empty", self.tag);
            return;
        }
        if !self.disjoint.is_empty() {
            log::warn!(
                "graph with tag {} has disjoint territories: [{}]",
                self.tag,
                self.disjoint.join(", ")
            );
        }
        for name in &self.suspicious {
            log::warn!("{} looks suspicious in {}: one neighbour or fewer", name, self.tag);
        }
        for name in &self.self_borders {
            log::warn!("{} was bordered with itself in {}", name, self.tag);
        }
        if self.is_clean() {
            log::debug!("tag [{}] passed!", self.tag);
        }
    }
}

/// Assembles one continent's subgraph from a flat edge list. Consumed by
/// [`ContinentBuilder::get_mapping`], so a finished mapping can't be edited
/// through a leftover builder.
#[derive(Debug)]
pub struct ContinentBuilder {
    tag: String,
    graph: TerritoryGraph,
    self_borders: Vec<String>,
}

impl ContinentBuilder {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            graph: TerritoryGraph::new(),
            self_borders: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn border(&mut self, a: &str, b: &str) -> &mut Self {
        self.graph.get_or_insert(a);
        self.graph.get_or_insert(b);
        if self.graph.add_neighbour(a, b).is_err() {
            log::warn!("dropping border {} <-> {} in {}", a, b, self.tag);
            self.self_borders.push(a.to_string());
        }
        self
    }

    pub fn borders(&mut self, borders: &[(&str, &str)]) -> &mut Self {
        for (a, b) in borders {
            self.border(a, b);
        }
        self
    }

    /// Checks the subgraph for emptiness, disjoint parts and low-degree nodes.
    /// Problems are logged and returned; none of them are fatal.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport {
            tag: self.tag.clone(),
            self_borders: self.self_borders.clone(),
            ..ValidationReport::default()
        };

        match self.graph.names().first() {
            None => report.empty = true,
            Some(start) => {
                report.disjoint = self.graph.disjoint_from(start).unwrap_or_default();
                report.suspicious = self
                    .graph
                    .names()
                    .into_iter()
                    .filter(|name| {
                        self.graph
                            .get(name)
                            .is_some_and(|territory| territory.neighbour_count() <= 1)
                    })
                    .map(str::to_string)
                    .collect();
            }
        }

        report.log();
        report
    }

    pub fn finish(self) -> (TerritoryGraph, ValidationReport) {
        let report = self.validate();
        (self.graph, report)
    }

    /// Validates, then hands over the finished mapping.
    pub fn get_mapping(self) -> TerritoryGraph {
        self.finish().0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_creates_each_territory_once() {
        let mut builder = ContinentBuilder::new("test");
        builder.border("a", "b").border("b", "c").border("c", "a");
        let graph = builder.get_mapping();

        assert_eq!(graph.names(), vec!["a", "b", "c"]);
        for name in ["a", "b", "c"] {
            assert_eq!(graph.get(name).unwrap().neighbour_count(), 2);
        }
    }

    #[test]
    fn border_order_does_not_matter() {
        let mut forward = ContinentBuilder::new("forward");
        forward.border("a", "b");
        let mut backward = ContinentBuilder::new("backward");
        backward.border("b", "a");

        let forward = forward.get_mapping();
        let backward = backward.get_mapping();
        for graph in [&forward, &backward] {
            assert!(graph.get("a").unwrap().is_neighbour("b"));
            assert!(graph.get("b").unwrap().is_neighbour("a"));
        }
    }

    #[test]
    fn validate_flags_an_empty_graph() {
        let report = ContinentBuilder::new("nothing").validate();
        assert!(report.empty);
        assert!(!report.is_clean());
        assert_eq!(report.tag, "nothing");
    }

    #[test]
    fn validate_passes_a_well_connected_graph() {
        let mut builder = ContinentBuilder::new("triangle");
        builder.borders(&[("a", "b"), ("b", "c"), ("c", "a")]);
        let (graph, report) = builder.finish();

        assert!(report.is_clean(), "{:?}", report);
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn validate_reports_the_unreachable_component() {
        let mut builder = ContinentBuilder::new("split");
        builder.borders(&[("a", "b"), ("b", "c"), ("c", "a")]);
        builder.borders(&[("x", "y"), ("y", "z"), ("z", "x")]);
        let report = builder.validate();

        assert!(!report.empty);
        assert_eq!(report.disjoint, vec!["x", "y", "z"]);
        assert!(report.suspicious.is_empty());
    }

    #[test]
    fn validate_flags_low_degree_territories() {
        let mut builder = ContinentBuilder::new("tail");
        builder.borders(&[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")]);
        let report = builder.validate();

        assert!(report.disjoint.is_empty());
        assert_eq!(report.suspicious, vec!["d"]);
    }

    #[test]
    fn self_borders_are_dropped_and_reported() {
        let mut builder = ContinentBuilder::new("loop");
        builder.borders(&[("a", "b"), ("b", "c"), ("c", "a"), ("a", "a")]);
        let (graph, report) = builder.finish();

        assert_eq!(report.self_borders, vec!["a"]);
        assert!(!graph.get("a").unwrap().is_neighbour("a"));
        assert_eq!(graph.get("a").unwrap().neighbour_count(), 2);
    }
}
