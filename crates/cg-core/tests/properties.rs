//! Layout invariants over random seeds and parameters

use std::collections::HashSet;

use proptest::prelude::*;

use cg_core::dungeon::{CellType, Layout, PathClass, Point};
use cg_core::{CorridorParams, EventableMode, GenerationConfig, RoomParams, generate};

fn config_strategy() -> impl Strategy<Value = GenerationConfig> {
    (
        any::<u64>(),
        20i32..80,
        20i32..60,
        3i32..6,
        0i32..5,
        0.3f64..=1.0,
        0.0f64..=0.3,
        1i32..=3,
        1i32..12,
        0.0f64..=1.0,
        any::<bool>(),
    )
        .prop_map(
            |(seed, width, height, min_size, extra, density, connectivity, corridor_width, max_straight, bend, random_mode)| {
                let eventable = if random_mode {
                    EventableMode::Random {
                        count: 0,
                        ratio: 0.5,
                    }
                } else {
                    EventableMode::RunDetection {
                        min_length: 2,
                        max_length: 4,
                        ignore_room_adjacency: false,
                    }
                };
                GenerationConfig {
                    width,
                    height,
                    rooms: RoomParams {
                        min_size,
                        max_size: min_size + extra,
                        density,
                        target_count: 0,
                    },
                    corridors: CorridorParams {
                        connectivity,
                        width: corridor_width,
                        max_straight_length: max_straight,
                        bend_probability: bend,
                    },
                    eventable,
                    min_room_distance: 5.0,
                    ..GenerationConfig::default().with_seed(seed)
                }
            },
        )
}

fn room_cells(layout: &Layout) -> HashSet<Point> {
    layout.rooms.iter().flat_map(|r| r.rect.cells()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn room_floor_is_exactly_the_rooms(config in config_strategy()) {
        let layout = generate(config).unwrap();
        let expected = room_cells(&layout);
        let actual: HashSet<Point> = layout
            .grid
            .iter()
            .filter(|(_, c)| *c == CellType::RoomFloor)
            .map(|(p, _)| p)
            .collect();
        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn rooms_never_overlap(config in config_strategy()) {
        let layout = generate(config).unwrap();
        for (i, a) in layout.rooms.iter().enumerate() {
            for b in &layout.rooms[i + 1..] {
                prop_assert!(!a.overlaps(b));
            }
        }
    }

    #[test]
    fn every_room_is_reachable(config in config_strategy()) {
        let layout = generate(config).unwrap();
        prop_assert!(layout.is_fully_connected());
        prop_assert_eq!(layout.stats.spanning_edges, layout.rooms.len().saturating_sub(1));
    }

    #[test]
    fn straight_segments_respect_the_limit(config in config_strategy()) {
        let max = config.corridors.max_straight_length;
        let layout = generate(config).unwrap();
        for segment in &layout.segments {
            prop_assert!(segment.from.is_aligned_with(segment.to));
            prop_assert!(segment.cell_count() <= max, "{:?} covers more than {} cells", segment, max);
        }
    }

    #[test]
    fn every_corridor_cell_has_one_class(config in config_strategy()) {
        let layout = generate(config).unwrap();
        for (p, cell) in layout.grid.iter() {
            let class = layout.classes.get(p);
            if cell == CellType::PathFloor {
                prop_assert!(class.is_some());
                prop_assert_ne!(class, Some(PathClass::Unclassified));
            } else {
                prop_assert_eq!(class, None);
            }
        }
        prop_assert_eq!(layout.classes.len(), layout.stats.corridor_cells);
    }

    #[test]
    fn room_adjacent_cells_are_never_eventable(config in config_strategy()) {
        let hood = config.adjacency;
        let layout = generate(config).unwrap();
        for (p, class) in layout.classes.iter() {
            if class == PathClass::Eventable {
                prop_assert!(!layout.grid.has_neighbor(p.x, p.y, CellType::RoomFloor, hood));
            }
        }
    }

    #[test]
    fn generation_is_deterministic(config in config_strategy()) {
        let a = generate(config.clone()).unwrap();
        let b = generate(config).unwrap();
        prop_assert_eq!(a, b);
    }
}
