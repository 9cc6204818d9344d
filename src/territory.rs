// territory.rs
use crate::error::MapError;
use crate::graph::TerritoryGraph;
use crate::player::PlayerId;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::hash::{Hash, Hasher};

/// A named node of the board. Edges are stored by neighbour name and can only be
/// added through [`TerritoryGraph::add_neighbour`], which writes both directions.
#[derive(Debug, Clone, Serialize)]
pub struct Territory {
    name: String,
    owner: Option<PlayerId>,
    armies: u16,
    neighbours: HashSet<String>,
}

impl Territory {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            owner: None,
            armies: 0,
            neighbours: HashSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub fn set_owner(&mut self, owner: Option<PlayerId>) {
        self.owner = owner;
    }

    pub fn armies(&self) -> u16 {
        self.armies
    }

    pub fn set_troops(&mut self, armies: u16) {
        self.armies = armies;
    }

    /// Checked variant of [`Territory::set_troops`] for untyped input such as JSON.
    pub fn try_set_troops(&mut self, armies: i64) -> Result<(), MapError> {
        let armies = u16::try_from(armies).map_err(|_| MapError::InvalidArmyCount(armies))?;
        self.set_troops(armies);
        Ok(())
    }

    pub fn reinforce(&mut self, armies: u16) {
        self.armies = self.armies.saturating_add(armies);
    }

    pub fn remove_armies(&mut self, armies: u16) {
        self.armies = self.armies.saturating_sub(armies);
    }

    /// Zeroes the armies, and clears the owner as well when `reset_owner` is set.
    pub fn reset(&mut self, reset_owner: bool) {
        self.armies = 0;
        if reset_owner {
            self.owner = None;
        }
    }

    pub fn neighbours(&self) -> impl Iterator<Item = &str> {
        self.neighbours.iter().map(String::as_str)
    }

    pub fn neighbour_count(&self) -> usize {
        self.neighbours.len()
    }

    pub fn is_neighbour(&self, other: &str) -> bool {
        self.neighbours.contains(other)
    }

    pub(crate) fn link(&mut self, other: &str) {
        self.neighbours.insert(other.to_string());
    }
}

impl PartialEq for Territory {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Territory {}

impl Hash for Territory {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl TerritoryGraph {
    /// Hop count from `from` to the nearest territory with a different owner, walking
    /// only through territories held by the owner of `from`.
    ///
    /// Returns `Ok(None)` when the owner's region is closed off and no enemy can be
    /// reached. An unowned start has no meaningful enemy and yields
    /// [`MapError::Unowned`].
    pub fn closest_enemy_distance(&self, from: &str) -> Result<Option<usize>, MapError> {
        let start = self.territory(from)?;
        let owner = start
            .owner()
            .ok_or_else(|| MapError::Unowned(from.to_string()))?;

        let mut visited = HashSet::from([start.name()]);
        let mut queue = VecDeque::from([(start, 0usize)]);

        while let Some((current, distance)) = queue.pop_front() {
            if current.owner() != Some(owner) {
                return Ok(Some(distance));
            }
            for name in current.neighbours() {
                if let Some(next) = self.get(name) {
                    if visited.insert(next.name()) {
                        queue.push_back((next, distance + 1));
                    }
                }
            }
        }

        Ok(None)
    }

    /// Whether `to` can be reached from `from` without leaving territory held by the
    /// owner of `from`. Walks the whole owned region in the worst case, so cache the
    /// answer rather than calling this in a loop.
    pub fn is_connected(&self, from: &str, to: &str) -> Result<bool, MapError> {
        let start = self.territory(from)?;
        self.territory(to)?;

        let owner = start.owner();
        let mut visited = HashSet::from([start.name()]);
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            if current.name() == to {
                return Ok(true);
            }
            for name in current.neighbours() {
                if let Some(next) = self.get(name) {
                    if next.owner() == owner && visited.insert(next.name()) {
                        stack.push(next);
                    }
                }
            }
        }

        Ok(false)
    }

    /// Every territory reachable from `from` through its owner's territory, excluding
    /// `from` itself. These are the legal fortify destinations.
    pub fn connected_territories(&self, from: &str) -> Result<Vec<String>, MapError> {
        let start = self.territory(from)?;
        let owner = start.owner();
        let mut visited = HashSet::from([start.name()]);
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            for name in current.neighbours() {
                if let Some(next) = self.get(name) {
                    if next.owner() == owner && visited.insert(next.name()) {
                        stack.push(next);
                    }
                }
            }
        }

        visited.remove(from);
        let mut connected: Vec<String> = visited.into_iter().map(str::to_string).collect();
        connected.sort();
        Ok(connected)
    }

    /// Adjacent territories whose owner differs from the owner of `from`.
    pub fn enemy_neighbours(&self, from: &str) -> Result<Vec<&Territory>, MapError> {
        let start = self.territory(from)?;
        let mut enemies: Vec<&Territory> = start
            .neighbours()
            .filter_map(|name| self.get(name))
            .filter(|neighbour| neighbour.owner() != start.owner())
            .collect();
        enemies.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(enemies)
    }
}
