// graph.rs
use crate::error::MapError;
use crate::territory::Territory;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Name-keyed store of territories. Owns every node, so adjacency is kept as names
/// and resolved through the graph.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TerritoryGraph {
    territories: HashMap<String, Territory>,
}

impl TerritoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.territories.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Territory> {
        self.territories.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Territory> {
        self.territories.get_mut(name)
    }

    pub fn territory(&self, name: &str) -> Result<&Territory, MapError> {
        self.get(name)
            .ok_or_else(|| MapError::UnknownTerritory(name.to_string()))
    }

    pub fn territory_mut(&mut self, name: &str) -> Result<&mut Territory, MapError> {
        self.get_mut(name)
            .ok_or_else(|| MapError::UnknownTerritory(name.to_string()))
    }

    /// Returns the territory called `name`, creating an isolated one on first use.
    pub fn get_or_insert(&mut self, name: &str) -> &mut Territory {
        self.territories
            .entry(name.to_string())
            .or_insert_with(|| Territory::new(name))
    }

    /// Names in ascending order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.territories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn territories(&self) -> impl Iterator<Item = &Territory> {
        self.territories.values()
    }

    pub fn territories_mut(&mut self) -> impl Iterator<Item = &mut Territory> {
        self.territories.values_mut()
    }

    /// Links `a` and `b` in both directions. Both must already exist. Linking an
    /// existing pair again leaves the edge set unchanged.
    pub fn add_neighbour(&mut self, a: &str, b: &str) -> Result<(), MapError> {
        if a == b {
            return Err(MapError::SelfBorder(a.to_string()));
        }
        if !self.contains(b) {
            return Err(MapError::UnknownTerritory(b.to_string()));
        }
        self.territory_mut(a)?.link(b);
        self.territory_mut(b)?.link(a);
        Ok(())
    }

    /// Moves every territory of `other` into this graph. Edges that name territories
    /// of either graph stay valid after the merge.
    pub fn merge(&mut self, other: TerritoryGraph) -> Result<(), MapError> {
        if let Some(duplicate) = other.territories.keys().find(|name| self.contains(name)) {
            return Err(MapError::DuplicateTerritory(duplicate.clone()));
        }
        self.territories.extend(other.territories);
        Ok(())
    }

    /// Every territory reachable from `start` over any edge, `start` included.
    pub fn flood_fill(&self, start: &str) -> Result<HashSet<String>, MapError> {
        let start = self.territory(start)?;
        let mut visited = HashSet::from([start.name().to_string()]);
        let mut frontier: Vec<&Territory> = vec![start];

        while let Some(current) = frontier.pop() {
            for name in current.neighbours() {
                if let Some(next) = self.get(name) {
                    if visited.insert(name.to_string()) {
                        frontier.push(next);
                    }
                }
            }
        }

        Ok(visited)
    }

    /// Sorted names of the territories that cannot be reached from `start`.
    pub fn disjoint_from(&self, start: &str) -> Result<Vec<String>, MapError> {
        let visited = self.flood_fill(start)?;
        let mut disjoint: Vec<String> = self
            .territories
            .keys()
            .filter(|name| !visited.contains(*name))
            .cloned()
            .collect();
        disjoint.sort();
        Ok(disjoint)
    }
}
