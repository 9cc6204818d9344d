// board.rs
use crate::continent::Continent;
use crate::error::MapError;
use crate::graph::TerritoryGraph;
use crate::player::{Player, PlayerId};
use crate::territory::Territory;
use crate::world::{CLASSIC_CONTINENTS, CROSS_CONTINENT_BORDERS};
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;

/// The assembled map: every continent's territories in one graph, plus the
/// continent groupings used for bonuses.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Board {
    pub graph: TerritoryGraph,
    pub continents: HashMap<String, Continent>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the 42-territory world map with its cross-continent borders.
    pub fn classic() -> Result<Self, MapError> {
        let mut board = Board::new();
        for definition in &CLASSIC_CONTINENTS {
            board.add_continent(
                definition.name,
                definition.bonus_armies,
                (definition.generate)(),
            )?;
        }
        for (a, b) in CROSS_CONTINENT_BORDERS {
            board.add_border(a, b)?;
        }
        log::debug!(
            "classic board ready: {} territories, {} continents",
            board.graph.len(),
            board.continents.len()
        );
        Ok(board)
    }

    pub fn add_continent(
        &mut self,
        name: &str,
        bonus_armies: u16,
        mapping: TerritoryGraph,
    ) -> Result<(), MapError> {
        let mut continent = Continent::new(name, bonus_armies);
        for territory in mapping.names() {
            continent.add_territory(territory);
        }
        self.graph.merge(mapping)?;
        self.continents.insert(continent.name.clone(), continent);
        Ok(())
    }

    pub fn add_border(&mut self, a: &str, b: &str) -> Result<(), MapError> {
        self.graph.add_neighbour(a, b)
    }

    pub fn get_territory(&self, name: &str) -> Option<&Territory> {
        self.graph.get(name)
    }

    pub fn get_continent(&self, name: &str) -> Option<&Continent> {
        self.continents.get(name)
    }

    /// Territories held by `player`, sorted by name.
    pub fn player_territories(&self, player: PlayerId) -> Vec<&Territory> {
        self.graph
            .territories()
            .filter(|territory| territory.owner() == Some(player))
            .sorted_by(|a, b| a.name().cmp(b.name()))
            .collect()
    }

    /// The player holding every territory of the continent, if there is one.
    pub fn continent_owner(&self, name: &str) -> Option<PlayerId> {
        let continent = self.continents.get(name)?;
        let mut owners = continent
            .territories
            .iter()
            .map(|territory| self.graph.get(territory).and_then(Territory::owner));
        let first = owners.next()??;
        owners.all(|owner| owner == Some(first)).then_some(first)
    }

    pub fn continent_bonus(&self, player: PlayerId) -> u16 {
        self.continents
            .values()
            .filter(|continent| self.continent_owner(&continent.name) == Some(player))
            .map(Continent::get_bonus)
            .sum()
    }

    pub fn reset(&mut self, reset_owner: bool) {
        for territory in self.graph.territories_mut() {
            territory.reset(reset_owner);
        }
    }

    /// Clears the board, then deals territories round-robin with one army each,
    /// walking the continents in shuffled order. The rest of `initial_armies` per
    /// player is spread over that player's territories. With no players the board
    /// is only cleared.
    pub fn shuffle_and_distribute_territories<R: Rng>(
        &mut self,
        players: &[Player],
        initial_armies: u16,
        rng: &mut R,
    ) {
        self.reset(true);
        if players.is_empty() {
            return;
        }

        let mut continent_names: Vec<&String> = self.continents.keys().collect();
        continent_names.sort();
        continent_names.shuffle(rng);

        let mut deal: Vec<String> = Vec::new();
        for name in continent_names {
            let mut territories: Vec<String> =
                self.continents[name].territories.iter().cloned().collect();
            territories.sort();
            territories.shuffle(rng);
            deal.extend(territories);
        }

        for (index, name) in deal.iter().enumerate() {
            if let Some(territory) = self.graph.get_mut(name) {
                territory.set_owner(Some(players[index % players.len()].id));
                territory.set_troops(1);
            }
        }

        for player in players {
            let owned: Vec<String> = self
                .player_territories(player.id)
                .into_iter()
                .map(|territory| territory.name().to_string())
                .collect();
            if owned.is_empty() {
                continue;
            }
            let mut remaining = initial_armies.saturating_sub(owned.len() as u16);
            for name in owned.iter().cycle() {
                if remaining == 0 {
                    break;
                }
                if let Some(territory) = self.graph.get_mut(name) {
                    territory.reinforce(1);
                }
                remaining -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn players(count: usize) -> Vec<Player> {
        (0..count)
            .map(|i| Player::new(i, &format!("Player {}", i + 1)))
            .collect()
    }

    #[test]
    fn classic_board_is_one_connected_graph() {
        let board = Board::classic().unwrap();
        assert_eq!(board.graph.len(), 42);
        assert_eq!(board.continents.len(), 6);
        assert!(board.graph.disjoint_from("alaska").unwrap().is_empty());
        assert!(board.get_territory("alaska").unwrap().is_neighbour("kamchatka"));
        assert!(board.get_territory("kamchatka").unwrap().is_neighbour("alaska"));
    }

    #[test]
    fn add_border_requires_both_territories() {
        let mut board = Board::classic().unwrap();
        assert!(matches!(
            board.add_border("atlantis", "iceland"),
            Err(MapError::UnknownTerritory(_))
        ));
        assert!(matches!(
            board.add_border("iceland", "atlantis"),
            Err(MapError::UnknownTerritory(_))
        ));
    }

    #[test]
    fn continent_owner_requires_every_territory() {
        let mut board = Board::classic().unwrap();
        assert_eq!(board.continent_owner("australia"), None);

        for name in ["indonesia", "new_guinea", "western_australia", "eastern_australia"] {
            board.graph.get_mut(name).unwrap().set_owner(Some(PlayerId(0)));
        }
        assert_eq!(board.continent_owner("australia"), Some(PlayerId(0)));
        assert_eq!(board.continent_bonus(PlayerId(0)), 2);
        assert_eq!(board.continent_bonus(PlayerId(1)), 0);

        board.graph.get_mut("indonesia").unwrap().set_owner(Some(PlayerId(1)));
        assert_eq!(board.continent_owner("australia"), None);
        assert_eq!(board.continent_owner("atlantis"), None);
    }

    #[test]
    fn distribution_assigns_every_territory() {
        let mut board = Board::classic().unwrap();
        let players = players(3);
        let mut rng = StdRng::seed_from_u64(7);
        board.shuffle_and_distribute_territories(&players, 35, &mut rng);

        assert!(board.graph.territories().all(|t| t.owner().is_some()));
        for player in &players {
            let owned = board.player_territories(player.id);
            assert_eq!(owned.len(), 14);
            let armies: u16 = owned.iter().map(|t| t.armies()).sum();
            assert_eq!(armies, 35);
        }
    }

    #[test]
    fn distribution_is_reproducible_with_a_seed() {
        let players = players(4);
        let deal = |seed| {
            let mut board = Board::classic().unwrap();
            board.shuffle_and_distribute_territories(&players, 30, &mut StdRng::seed_from_u64(seed));
            board
                .graph
                .names()
                .into_iter()
                .map(|name| board.graph.get(name).unwrap().owner())
                .collect::<Vec<_>>()
        };
        assert_eq!(deal(11), deal(11));
    }

    #[test]
    fn dealing_to_nobody_still_clears_the_board() {
        let mut board = Board::classic().unwrap();
        board.shuffle_and_distribute_territories(&players(3), 35, &mut StdRng::seed_from_u64(5));

        board.shuffle_and_distribute_territories(&[], 35, &mut StdRng::seed_from_u64(5));
        assert!(board
            .graph
            .territories()
            .all(|t| t.owner().is_none() && t.armies() == 0));
    }

    #[test]
    fn reset_clears_the_whole_board() {
        let mut board = Board::classic().unwrap();
        board.shuffle_and_distribute_territories(&players(2), 40, &mut StdRng::seed_from_u64(1));

        board.reset(false);
        assert!(board.graph.territories().all(|t| t.armies() == 0 && t.owner().is_some()));
        board.reset(true);
        assert!(board.graph.territories().all(|t| t.owner().is_none()));
    }
}
