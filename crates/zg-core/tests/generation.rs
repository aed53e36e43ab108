use std::collections::HashSet;
use std::time::{Duration, Instant};

use proptest::prelude::*;

use zg_core::map::{
    CarveSettings, Coord, FillParams, Grid, HeightField, ORTHOGONAL, ObstacleMask, RoomId,
    SURROUNDING, Tile, carve_passage, extract_regions, find_path, line_walk, random_fill, smooth,
    smooth_pass,
};
use zg_core::{ConfigError, ConnectMode, GeneratorConfig, MapGenerator, MapRng, Seed};

fn generate(config: GeneratorConfig) -> zg_core::GeneratedMap {
    MapGenerator::new(config).unwrap().generate()
}

fn raw_fill(width: usize, height: usize, seed: &Seed) -> Grid {
    let params = FillParams {
        width,
        height,
        fill_percent: 45,
        secondary_weight: 15,
        heights: None,
        height_bounds: (0.2, 0.7),
    };
    random_fill(&params, &mut MapRng::from_seed(seed))
}

#[test]
fn test_same_seed_same_map() {
    let mut config = GeneratorConfig::new(10, 10, "test");
    config.fill_percent = 45;
    assert_eq!(generate(config.clone()), generate(config));
}

#[test]
fn test_different_seed_different_map() {
    assert_ne!(
        raw_fill(10, 10, &Seed::from("test")),
        raw_fill(10, 10, &Seed::from("test2"))
    );

    let a = generate(GeneratorConfig::new(48, 32, "test"));
    let b = generate(GeneratorConfig::new(48, 32, "test2"));
    assert_ne!(a.grid, b.grid);
}

#[test]
fn test_numeric_and_text_seeds_both_work() {
    let by_number = generate(GeneratorConfig::new(24, 16, 12345u64));
    assert_eq!(by_number.seed_value, 12345);
    let by_text = generate(GeneratorConfig::new(24, 16, "12345"));
    assert_ne!(by_text.seed_value, 12345);
}

#[test]
fn test_random_seed_is_reported() {
    let mut config = GeneratorConfig::new(12, 12, "ignored");
    config.use_random_seed = true;
    let map = generate(config);
    assert_ne!(map.seed, Seed::from("ignored"));
    assert_eq!(map.seed_value, map.seed.value());

    // The reported seed reproduces the run
    let replay = generate(GeneratorConfig::new(12, 12, map.seed.clone()));
    assert_eq!(replay.grid, map.grid);
}

#[test]
fn test_config_errors_from_json() {
    let config: GeneratorConfig = serde_json::from_str(r#"{"width": 0, "height": 5}"#).unwrap();
    assert!(matches!(
        MapGenerator::new(config),
        Err(ConfigError::InvalidDimensions { .. })
    ));

    let config: GeneratorConfig = serde_json::from_str(
        r#"{"width": 3, "height": 2, "height_field": [[0.5, 0.5], [0.5, 0.5]]}"#,
    )
    .unwrap();
    assert!(matches!(
        MapGenerator::new(config),
        Err(ConfigError::HeightFieldMismatch { .. })
    ));

    let ragged = serde_json::from_str::<GeneratorConfig>(
        r#"{"width": 2, "height": 2, "height_field": [[0.5, 0.5], [0.5]]}"#,
    );
    assert!(ragged.is_err());
}

#[test]
fn test_passage_endpoints_are_carved() {
    let mut config = GeneratorConfig::new(60, 40, "passages");
    config.region_thresholds.room = 8;
    let map = generate(config);
    for link in &map.report.connections {
        assert_eq!(map.grid.get(link.from), Some(Tile::Carved));
        assert_eq!(map.grid.get(link.to), Some(Tile::Carved));
    }
}

#[test]
fn test_no_rooms_is_not_an_error() {
    let mut config = GeneratorConfig::new(8, 8, "empty");
    config.fill_percent = 0;
    config.secondary_weight = 0;
    let map = generate(config);
    assert!(map.rooms.is_empty());
    assert!(map.report.connections.is_empty());
    assert!(map.report.unreachable.is_empty());
}

#[test]
fn test_pathfinding_unreachable_rooms_have_no_route() {
    // A ridge of impassable height splits the map except through a narrow gap
    let (width, height) = (40, 24);
    let field = HeightField::from_fn(width, height, |x, y| {
        if (18..22).contains(&x) && !(10..13).contains(&y) {
            0.95
        } else {
            0.45
        }
    });
    let bounds = (0.2, 0.7);

    for seed in ["ridge-1", "ridge-2", "ridge-3"] {
        let mut config = GeneratorConfig::new(width as i32, height as i32, seed);
        config.region_thresholds.room = 6;
        config.connectivity.mode = ConnectMode::Pathfinding;
        config.height_field = Some(field.clone());
        let map = generate(config);

        let mask = ObstacleMask::new(width, height, Some(&field), bounds, false);
        let accessible: Vec<RoomId> = map.rooms.accessible_ids();
        for &lost in &map.report.unreachable {
            let room = map.rooms.get(lost).unwrap();
            for &target in &accessible {
                let other = map.rooms.get(target).unwrap();
                let routable = room.edge_tiles.iter().any(|&a| {
                    other
                        .edge_tiles
                        .iter()
                        .any(|&b| find_path(&mask, a, b).is_some())
                });
                assert!(!routable, "room {} could reach room {}", lost.0, target.0);
            }
        }
        let listed: HashSet<RoomId> = map.report.unreachable.iter().copied().collect();
        for id in map.rooms.ids() {
            assert_eq!(listed.contains(&id), !map.rooms.is_accessible(id));
        }
    }
}

#[test]
fn test_astar_open_row_and_enclosure() {
    let mask = ObstacleMask::new(12, 1, None, (0.2, 0.7), false);
    let path = find_path(&mask, Coord::new(0, 0), Coord::new(11, 0)).unwrap();
    assert_eq!(path.steps(), 11);

    let field = HeightField::from_fn(9, 9, |x, y| {
        let on_ring = (x == 3 || x == 5 || y == 3 || y == 5)
            && (3..=5).contains(&x)
            && (3..=5).contains(&y);
        if on_ring { 0.0 } else { 0.5 }
    });
    let mask = ObstacleMask::new(9, 9, Some(&field), (0.2, 0.7), false);
    assert!(find_path(&mask, Coord::new(0, 0), Coord::new(4, 4)).is_none());
}

fn carved_cells(grid: &Grid) -> HashSet<Coord> {
    grid.coords()
        .filter(|&c| grid.get(c) == Some(Tile::Carved))
        .collect()
}

#[test]
fn test_split_map_pathfinding_finishes_quickly() {
    let (width, height) = (64usize, 48usize);
    let ridge = |x: usize| (31..34).contains(&x);
    let field = HeightField::from_fn(width, height, |x, _| if ridge(x) { 0.95 } else { 0.45 });

    let started = Instant::now();
    for fill_percent in [20, 30] {
        let mut config = GeneratorConfig::new(width as i32, height as i32, "split");
        config.fill_percent = fill_percent;
        config.region_thresholds.room = 6;
        config.region_thresholds.wall = 6;
        config.connectivity.mode = ConnectMode::Pathfinding;
        config.height_field = Some(field.clone());
        let map = generate(config);

        let Some(main) = map.rooms.main_room() else {
            continue;
        };
        let main_left = main.tiles[0].x < 31;
        for room in map.rooms.rooms() {
            let same_side = (room.tiles[0].x < 31) == main_left;
            assert_eq!(map.rooms.is_accessible(room.id), same_side, "room {}", room.id.0);
        }
    }
    assert!(
        started.elapsed() < Duration::from_secs(60),
        "took {:?}",
        started.elapsed()
    );
}

#[test]
fn test_erasure_through_generator() {
    let run_length = 3;
    let mut erased = 0;
    for seed in ["erase-1", "erase-2", "erase-3"] {
        let mut config = GeneratorConfig::new(48, 32, seed);
        config.smooth_iterations = 0;
        config.erase_iterations = 1000;
        config.erase_run_length = run_length;
        // No absorption, so every zone cell left is one the eraser kept
        config.region_thresholds.wall = 0;
        config.region_thresholds.room = 6;
        let map = generate(config);
        erased += map.stats.cells_erased;

        // Passages may have cut through a run; carved cells still count toward it
        let grid = &map.grid;
        let n = run_length as i32;
        for c in grid.coords() {
            let Some(tile) = grid.get(c) else { continue };
            if !matches!(tile, Tile::TypeA | Tile::TypeB) {
                continue;
            }
            let has_run = ORTHOGONAL.iter().any(|&(dx, dy)| {
                grid.contains(c.offset(dx * n, dy * n))
                    && (1..=n).all(|i| {
                        let t = grid.get(c.offset(dx * i, dy * i));
                        t == Some(tile) || t == Some(Tile::Carved)
                    })
            });
            assert!(has_run, "{c:?} survived without a run in {seed}");
        }
    }
    assert!(erased > 0);
}

#[test]
fn test_skip_carved_discs_through_generator() {
    let mut config = GeneratorConfig::new(60, 40, "passages");
    config.region_thresholds.room = 8;
    config.connectivity.skip_carved_discs = true;
    let guarded = generate(config.clone());
    assert!(!guarded.report.connections.is_empty());

    config.connectivity.skip_carved_discs = false;
    let plain = generate(config);
    assert_eq!(guarded.report.connections, plain.report.connections);

    // Replaying the passages onto a blank grid shows which discs were stamped
    let replay = |skip_carved_discs: bool| {
        let mut grid = Grid::new(60, 40, Tile::Empty);
        let settings = CarveSettings {
            radius: 1,
            skip_carved_discs,
        };
        for link in &guarded.report.connections {
            carve_passage(&mut grid, &line_walk(link.from, link.to), settings);
        }
        carved_cells(&grid)
    };
    assert_eq!(carved_cells(&guarded.grid), replay(true));
    assert_eq!(carved_cells(&plain.grid), replay(false));
    assert!(carved_cells(&guarded.grid).len() < carved_cells(&plain.grid).len());
}

#[test]
fn test_strict_obstacles_keep_routes_off_bad_heights() {
    let (width, height) = (60usize, 40usize);
    let bounds = (0.2, 0.7);
    let field = HeightField::from_fn(width, height, |x, y| {
        if x % 12 == 6 && y % 8 == 4 { 0.05 } else { 0.45 }
    });

    let mut routed = 0;
    for seed in ["strict-1", "strict-2", "strict-3"] {
        let mut config = GeneratorConfig::new(width as i32, height as i32, seed);
        config.region_thresholds.room = 8;
        config.connectivity.mode = ConnectMode::Pathfinding;
        config.connectivity.strict_obstacles = true;
        config.connectivity.passage_radius = 0;
        config.height_field = Some(field.clone());
        let map = generate(config);
        routed += map.report.connections.len();

        // Radius 0 carves exactly the route cells
        for c in carved_cells(&map.grid) {
            assert!(field.within(c, bounds));
            for &(dx, dy) in &SURROUNDING {
                let n = c.offset(dx, dy);
                assert!(
                    field.get(n).is_none() || field.within(n, bounds),
                    "{c:?} next to a bad height at {n:?}"
                );
            }
        }
    }
    assert!(routed > 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_border_is_wall(seed in any::<u64>(), w in 4i32..24, h in 4i32..24, b in 0usize..4) {
        let mut config = GeneratorConfig::new(w, h, seed);
        config.border_size = b;
        let map = generate(config);
        let bordered = &map.bordered;
        prop_assert_eq!(bordered.width(), w as usize + 2 * b);
        prop_assert_eq!(bordered.height(), h as usize + 2 * b);
        let b = b as i32;
        for c in bordered.coords() {
            let inside = c.x >= b && c.y >= b && c.x < w + b && c.y < h + b;
            if inside {
                prop_assert_eq!(bordered.get(c), map.grid.get(Coord::new(c.x - b, c.y - b)));
            } else {
                prop_assert_eq!(bordered.get(c), Some(Tile::Wall));
            }
        }
    }

    #[test]
    fn prop_regions_partition_cells(seed in any::<u64>(), w in 1usize..30, h in 1usize..30) {
        let grid = raw_fill(w, h, &Seed::Number(seed));
        for tile in [Tile::Empty, Tile::TypeA, Tile::TypeB] {
            let mut seen = HashSet::new();
            for region in extract_regions(&grid, tile) {
                prop_assert!(!region.is_empty());
                for &c in region.cells() {
                    prop_assert_eq!(grid.get(c), Some(tile));
                    prop_assert!(seen.insert(c));
                }
            }
            prop_assert_eq!(seen.len(), grid.count(tile));
        }
    }

    #[test]
    fn prop_converged_smoothing_is_a_fixed_point(seed in any::<u64>(), w in 3usize..24, h in 3usize..24) {
        let mut grid = raw_fill(w, h, &Seed::Number(seed));
        let stats = smooth(&mut grid, 1000);
        if stats.converged {
            let mut next = grid.clone();
            prop_assert_eq!(smooth_pass(&grid, &mut next), 0);
            prop_assert_eq!(next, grid);
        }
    }

    #[test]
    fn prop_straight_mode_reaches_every_room(seed in any::<u64>(), w in 8i32..40, h in 8i32..40) {
        let mut config = GeneratorConfig::new(w, h, seed);
        config.region_thresholds.room = 4;
        config.region_thresholds.wall = 4;
        let map = generate(config);
        prop_assert!(map.report.unreachable.is_empty());
        prop_assert!(map.rooms.rooms().iter().all(|r| r.is_accessible_from_main_room));
        if let Some(main) = map.rooms.main_room() {
            prop_assert!(map.rooms.rooms().iter().all(|r| r.size() <= main.size()));
        }
    }
}
