// world.rs
//! Edge lists of the classic world map, one factory per continent.

use crate::continent::ContinentBuilder;
use crate::graph::TerritoryGraph;

pub struct ContinentDefinition {
    pub name: &'static str,
    pub bonus_armies: u16,
    pub generate: fn() -> TerritoryGraph,
}

pub const CLASSIC_CONTINENTS: [ContinentDefinition; 6] = [
    ContinentDefinition {
        name: "north_america",
        bonus_armies: 5,
        generate: generate_north_america_continent,
    },
    ContinentDefinition {
        name: "south_america",
        bonus_armies: 2,
        generate: generate_south_america_continent,
    },
    ContinentDefinition {
        name: "africa",
        bonus_armies: 3,
        generate: generate_africa_continent,
    },
    ContinentDefinition {
        name: "australia",
        bonus_armies: 2,
        generate: generate_australia_continent,
    },
    ContinentDefinition {
        name: "europe",
        bonus_armies: 5,
        generate: generate_europe_continent,
    },
    ContinentDefinition {
        name: "asia",
        bonus_armies: 7,
        generate: generate_asia_continent,
    },
];

/// Borders between territories of different continents.
pub const CROSS_CONTINENT_BORDERS: [(&str, &str); 14] = [
    ("alaska", "kamchatka"),
    ("greenland", "iceland"),
    ("central_america", "venezuela"),
    ("brazil", "north_africa"),
    ("north_africa", "western_europe"),
    ("north_africa", "southern_europe"),
    ("egypt", "southern_europe"),
    ("egypt", "middle_east"),
    ("east_africa", "middle_east"),
    ("southern_europe", "middle_east"),
    ("russia", "middle_east"),
    ("russia", "afghanistan"),
    ("russia", "ural"),
    ("southern_asia", "indonesia"),
];

pub fn generate_north_america_continent() -> TerritoryGraph {
    log::debug!("Generating North America...");
    let mut builder = ContinentBuilder::new("generate_north_america_continent");
    builder.borders(&[
        ("alaska", "northwest_territory"),
        ("alaska", "alberta"),
        ("northwest_territory", "greenland"),
        ("northwest_territory", "ontario"),
        ("northwest_territory", "alberta"),
        ("alberta", "ontario"),
        ("alberta", "western_united_states"),
        ("greenland", "eastern_canada"),
        ("greenland", "ontario"),
        ("ontario", "eastern_canada"),
        ("ontario", "eastern_united_states"),
        ("ontario", "western_united_states"),
        ("western_united_states", "eastern_united_states"),
        ("western_united_states", "central_america"),
        ("eastern_canada", "eastern_united_states"),
        ("eastern_united_states", "central_america"),
    ]);
    log::debug!("Generated North America!");
    builder.get_mapping()
}

pub fn generate_south_america_continent() -> TerritoryGraph {
    log::debug!("Generating South America...");
    let mut builder = ContinentBuilder::new("generate_south_america_continent");
    builder.borders(&[
        ("venezuela", "brazil"),
        ("venezuela", "peru"),
        ("brazil", "peru"),
        ("brazil", "argentina"),
        ("peru", "argentina"),
    ]);
    log::debug!("Generated South America!");
    builder.get_mapping()
}

pub fn generate_africa_continent() -> TerritoryGraph {
    log::debug!("Generating Africa...");
    let mut builder = ContinentBuilder::new("generate_africa_continent");
    builder.borders(&[
        ("egypt", "north_africa"),
        ("egypt", "east_africa"),
        ("north_africa", "east_africa"),
        ("north_africa", "central_africa"),
        ("east_africa", "central_africa"),
        ("east_africa", "south_africa"),
        ("east_africa", "madagascar"),
        ("central_africa", "south_africa"),
        ("south_africa", "madagascar"),
    ]);
    log::debug!("Generated Africa!");
    builder.get_mapping()
}

pub fn generate_australia_continent() -> TerritoryGraph {
    log::debug!("Generating Australia...");
    let mut builder = ContinentBuilder::new("generate_australia_continent");
    builder.borders(&[
        ("indonesia", "new_guinea"),
        ("indonesia", "western_australia"),
        ("new_guinea", "western_australia"),
        ("new_guinea", "eastern_australia"),
        ("western_australia", "eastern_australia"),
    ]);
    log::debug!("Generated Australia!");
    builder.get_mapping()
}

pub fn generate_europe_continent() -> TerritoryGraph {
    log::debug!("Generating Europe...");
    let mut builder = ContinentBuilder::new("generate_europe_continent");
    builder.borders(&[
        ("iceland", "great_britain"),
        ("iceland", "scandinavia"),
        ("great_britain", "northern_europe"),
        ("great_britain", "scandinavia"),
        ("scandinavia", "northern_europe"),
        ("scandinavia", "russia"),
        ("northern_europe", "western_europe"),
        ("northern_europe", "southern_europe"),
        ("northern_europe", "russia"),
        ("western_europe", "southern_europe"),
        ("russia", "southern_europe"),
    ]);
    log::debug!("Generated Europe!");
    builder.get_mapping()
}

pub fn generate_asia_continent() -> TerritoryGraph {
    log::debug!("Generating Asia...");
    let mut builder = ContinentBuilder::new("generate_asia_continent");
    builder.borders(&[
        ("siberia", "ural"),
        ("siberia", "china"),
        ("siberia", "mongolia"),
        ("siberia", "irkutsk"),
        ("siberia", "yakutsk"),
        ("ural", "afghanistan"),
        ("ural", "china"),
        ("china", "afghanistan"),
        ("china", "india"),
        ("china", "mongolia"),
        ("china", "southern_asia"),
        ("mongolia", "irkutsk"),
        ("mongolia", "kamchatka"),
        ("mongolia", "japan"),
        ("irkutsk", "yakutsk"),
        ("irkutsk", "kamchatka"),
        ("yakutsk", "kamchatka"),
        ("afghanistan", "middle_east"),
        ("afghanistan", "india"),
        ("kamchatka", "japan"),
        ("middle_east", "india"),
        ("india", "southern_asia"),
    ]);
    log::debug!("Generated Asia!");
    builder.get_mapping()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerId;

    fn edges(graph: &TerritoryGraph) -> Vec<(String, String)> {
        let mut edges: Vec<(String, String)> = graph
            .territories()
            .flat_map(|territory| {
                territory
                    .neighbours()
                    .map(move |neighbour| (territory.name().to_string(), neighbour.to_string()))
            })
            .collect();
        edges.sort();
        edges
    }

    #[test]
    fn continent_sizes_match_the_classic_map() {
        let sizes: Vec<(&str, usize)> = CLASSIC_CONTINENTS
            .iter()
            .map(|continent| (continent.name, (continent.generate)().len()))
            .collect();
        assert_eq!(
            sizes,
            vec![
                ("north_america", 9),
                ("south_america", 4),
                ("africa", 6),
                ("australia", 4),
                ("europe", 7),
                ("asia", 12),
            ]
        );
    }

    #[test]
    fn every_continent_is_internally_connected() {
        for continent in &CLASSIC_CONTINENTS {
            let graph = (continent.generate)();
            let start = graph.names()[0];
            assert!(
                graph.disjoint_from(start).unwrap().is_empty(),
                "{} is disjoint",
                continent.name
            );
            for territory in graph.territories() {
                assert!(territory.neighbour_count() >= 2, "{}", territory.name());
            }
        }
    }

    #[test]
    fn edge_lists_are_symmetric() {
        for continent in &CLASSIC_CONTINENTS {
            let graph = (continent.generate)();
            for territory in graph.territories() {
                for neighbour in territory.neighbours() {
                    assert!(graph.get(neighbour).unwrap().is_neighbour(territory.name()));
                }
            }
        }
    }

    #[test]
    fn factories_build_independent_graphs() {
        let mut first = generate_europe_continent();
        let second = generate_europe_continent();

        assert_eq!(first.names(), second.names());
        assert_eq!(edges(&first), edges(&second));

        let iceland = first.territory_mut("iceland").unwrap();
        iceland.set_owner(Some(PlayerId(3)));
        iceland.set_troops(8);

        let untouched = second.get("iceland").unwrap();
        assert_eq!(untouched.owner(), None);
        assert_eq!(untouched.armies(), 0);
    }

    #[test]
    fn cross_continent_borders_join_different_continents() {
        let continents: Vec<TerritoryGraph> = CLASSIC_CONTINENTS
            .iter()
            .map(|continent| (continent.generate)())
            .collect();
        let home = |name: &str| continents.iter().position(|graph| graph.contains(name));

        for (a, b) in CROSS_CONTINENT_BORDERS {
            let (home_a, home_b) = (home(a), home(b));
            assert!(home_a.is_some() && home_b.is_some(), "{} <-> {}", a, b);
            assert_ne!(home_a, home_b, "{} <-> {}", a, b);
        }
    }
}
