//! Layout generation pipeline
//!
//! Stages run once each, in order, over one grid and one RNG stream:
//! split, rooms, plan, corridors, start/goal, adjacency, eventable.

use log::{debug, info, warn};

use super::{
    Grid, Layout, SpaceSplitter, carve_corridors, carve_rooms, classify_adjacency,
    plan_connections, select_eventable, select_start_goal,
};
use crate::config::{GenerationConfig, SeedSource};
use crate::error::GenResult;
use crate::rng::GenRng;

/// Validated generation request
#[derive(Debug, Clone)]
pub struct Generator {
    config: GenerationConfig,
}

impl Generator {
    /// Validate `config` before any stage can run
    pub fn new(config: GenerationConfig) -> GenResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Fresh RNG for the configured seed source
    pub fn make_rng(&self) -> GenRng {
        match self.config.seed {
            SeedSource::Fixed(seed) => GenRng::new(seed),
            SeedSource::Entropy => GenRng::from_entropy(),
        }
    }

    /// Run the whole pipeline with the configured seed
    pub fn generate(&self) -> GenResult<Layout> {
        let mut rng = self.make_rng();
        self.generate_with(&mut rng)
    }

    /// Run the whole pipeline drawing from a caller-supplied stream
    pub fn generate_with(&self, rng: &mut GenRng) -> GenResult<Layout> {
        let config = &self.config;
        debug!(
            "generating {}x{} layout with seed {}",
            config.width,
            config.height,
            rng.seed()
        );

        let mut grid = Grid::new(config.width, config.height);

        let leaves = SpaceSplitter::new(config.rooms.min_size, config.rooms.max_size)
            .split(grid.bounds(), rng);
        let rooms = carve_rooms(&mut grid, leaves, &config.rooms, rng)?;
        let edges = plan_connections(&rooms, config.corridors.connectivity, rng);
        let segments = carve_corridors(&mut grid, &edges, &config.corridors, rng);

        let start_goal = match select_start_goal(&rooms, config.min_room_distance) {
            Ok(pair) => {
                debug!(
                    "start room {} / goal room {} ({:.2} apart)",
                    pair.start, pair.goal, pair.distance
                );
                Some(pair)
            }
            Err(e) => {
                warn!("{e}");
                None
            }
        };

        let mut classes = classify_adjacency(&grid, config.adjacency);
        select_eventable(&grid, &mut classes, &config.eventable, rng);

        let layout = Layout::assemble(
            rng.seed(),
            grid,
            rooms,
            edges,
            segments,
            start_goal,
            classes,
        );
        debug_assert!(
            layout.is_fully_connected(),
            "corridor carving left a room unreachable"
        );

        info!(
            "generated layout: {} rooms, {} corridor cells, {} eventable",
            layout.stats.room_count, layout.stats.corridor_cells, layout.stats.eventable
        );
        Ok(layout)
    }
}

/// Validate `config` and generate one layout
pub fn generate(config: GenerationConfig) -> GenResult<Layout> {
    Generator::new(config)?.generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenError;

    #[test]
    fn test_invalid_config_is_rejected_up_front() {
        let mut config = GenerationConfig::default();
        config.rooms.min_size = 9;
        config.rooms.max_size = 3;
        assert!(matches!(
            Generator::new(config),
            Err(GenError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_fixed_seed_is_recorded() {
        let layout = generate(GenerationConfig::default().with_seed(1234)).unwrap();
        assert_eq!(layout.seed, 1234);
    }

    #[test]
    fn test_injected_rng_matches_configured_seed() {
        let generator = Generator::new(GenerationConfig::default().with_seed(77)).unwrap();
        let a = generator.generate().unwrap();
        let b = generator.generate_with(&mut GenRng::new(77)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_far_apart_floor_drops_start_goal() {
        let mut config = GenerationConfig::default().with_seed(5);
        config.rooms.density = 1.0;
        config.min_room_distance = 10_000.0;
        let layout = generate(config).unwrap();
        assert!(layout.start_goal.is_none());
        assert!(layout.start_room().is_none());
        assert!(!layout.rooms.is_empty());
    }

    #[test]
    fn test_grid_too_small_for_rooms() {
        let config = GenerationConfig {
            width: 4,
            height: 4,
            ..GenerationConfig::default().with_seed(3)
        };
        let layout = generate(config).unwrap();
        assert!(layout.rooms.is_empty());
        assert!(layout.edges.is_empty());
        assert!(layout.classes.is_empty());
        assert!(layout.is_fully_connected());
    }
}
