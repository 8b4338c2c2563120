use super::*;
use crate::registry::rand::{random_registry, RandomLayoutCfg};
use crate::registry::{
    load_from_text, read_dump, write_dump, Bounds, Frequency, LoadCfg, Pos, Registry,
    RegistryOrder,
};
use proptest::prelude::*;

fn f(c: char) -> Frequency {
    Frequency::try_from(c).unwrap()
}

fn reg_of(items: &[(char, i32, i32)]) -> Registry {
    let mut reg = Registry::sorted();
    for &(c, x, y) in items {
        reg.insert_new(f(c), x, y).unwrap();
    }
    reg
}

fn p(x: i32, y: i32) -> Pos {
    Pos::new(x, y)
}

const TEN: Bounds = Bounds::new(10, 10);

#[test]
fn small_network_dfs_and_bfs() {
    let mut reg = reg_of(&[('A', 1, 1), ('B', 1, 2), ('A', 2, 2)]);
    connect_same_frequency(&mut reg);
    assert_eq!(reg.find(1, 1).unwrap().adjacency(), &[p(2, 2)]);
    assert_eq!(reg.find(2, 2).unwrap().adjacency(), &[p(1, 1)]);
    assert!(reg.find(1, 2).unwrap().adjacency().is_empty());

    let d = dfs(&reg, p(1, 1), TEN);
    assert_eq!(d.positions(), vec![p(1, 1), p(2, 2)]);
    assert_eq!(d.visits[1].antenna.frequency, f('A'));
    let b = bfs(&reg, p(1, 1), TEN);
    assert_eq!(b.positions(), vec![p(1, 1), p(2, 2)]);

    let lone = dfs(&reg, p(1, 2), TEN);
    assert_eq!(lone.positions(), vec![p(1, 2)]);
}

#[test]
fn connect_is_idempotent() {
    let mut reg = reg_of(&[('A', 0, 0), ('A', 0, 3), ('A', 2, 1), ('B', 4, 4)]);
    assert_eq!(connect_same_frequency(&mut reg), 6);
    let snapshot: Vec<Vec<Pos>> = reg.iter().map(|a| a.adjacency().to_vec()).collect();
    assert_eq!(connect_same_frequency(&mut reg), 0);
    let again: Vec<Vec<Pos>> = reg.iter().map(|a| a.adjacency().to_vec()).collect();
    assert_eq!(snapshot, again);
    // Neighbours follow registry order of the peers.
    assert_eq!(reg.find(0, 3).unwrap().adjacency(), &[p(0, 0), p(2, 1)]);
}

#[test]
fn connect_single_frequency_and_disconnect() {
    let mut reg = reg_of(&[('A', 0, 0), ('A', 0, 3), ('B', 1, 0), ('B', 1, 1)]);
    assert_eq!(connect_frequency(&mut reg, f('B')), 2);
    assert!(reg.find(0, 0).unwrap().adjacency().is_empty());
    assert_eq!(reg.find(1, 0).unwrap().adjacency(), &[p(1, 1)]);
    assert_eq!(connect_frequency(&mut reg, f('Z')), 0);
    assert_eq!(disconnect_all(&mut reg), 2);
    assert!(reg.iter().all(|a| a.adjacency().is_empty()));
}

#[test]
fn missing_or_out_of_bounds_start_is_empty() {
    let mut reg = reg_of(&[('A', 1, 1), ('A', 2, 2)]);
    connect_same_frequency(&mut reg);
    assert!(dfs(&reg, p(5, 5), TEN).is_empty());
    assert!(bfs(&reg, p(5, 5), TEN).is_empty());
    assert!(dfs(&reg, p(2, 2), Bounds::new(2, 2)).is_empty());
    assert!(bfs(&reg, p(2, 2), Bounds::new(2, 2)).is_empty());
    let empty = Registry::sorted();
    assert!(dfs(&empty, p(0, 0), TEN).is_empty());
}

#[test]
fn out_of_bounds_neighbours_are_skipped() {
    let mut reg = reg_of(&[('A', 0, 0), ('A', 0, 5), ('A', 0, 2)]);
    connect_same_frequency(&mut reg);
    let bounds = Bounds::new(1, 3);
    assert_eq!(dfs(&reg, p(0, 0), bounds).positions(), vec![p(0, 0), p(0, 2)]);
    assert_eq!(bfs(&reg, p(0, 0), bounds).positions(), vec![p(0, 0), p(0, 2)]);
}

#[test]
fn dfs_and_bfs_orders_differ_on_a_tree() {
    // (0,0) - (0,1) - (1,1)
    //   \
    //   (0,2)
    let mut reg = reg_of(&[('A', 0, 0), ('A', 0, 1), ('A', 0, 2), ('A', 1, 1)]);
    let edges = [(p(0, 0), p(0, 1)), (p(0, 0), p(0, 2)), (p(0, 1), p(1, 1))];
    for (a, b) in edges {
        reg.get_mut(a).unwrap().add_adjacent(b);
        reg.get_mut(b).unwrap().add_adjacent(a);
    }
    assert_eq!(
        dfs(&reg, p(0, 0), TEN).positions(),
        vec![p(0, 0), p(0, 1), p(1, 1), p(0, 2)]
    );
    assert_eq!(
        bfs(&reg, p(0, 0), TEN).positions(),
        vec![p(0, 0), p(0, 1), p(0, 2), p(1, 1)]
    );
    assert_eq!(
        traverse(&reg, p(0, 0), TEN, SearchKind::BreadthFirst).positions(),
        bfs(&reg, p(0, 0), TEN).positions()
    );
}

#[test]
fn dangling_adjacency_is_tolerated() {
    let mut reg = reg_of(&[('A', 0, 0), ('A', 0, 1)]);
    reg.get_mut(p(0, 0)).unwrap().add_adjacent(p(7, 7));
    reg.get_mut(p(0, 0)).unwrap().add_adjacent(p(0, 1));
    assert_eq!(dfs(&reg, p(0, 0), TEN).positions(), vec![p(0, 0), p(0, 1)]);
    assert_eq!(bfs(&reg, p(0, 0), TEN).positions(), vec![p(0, 0), p(0, 1)]);
}

#[test]
fn removal_severs_adjacency() {
    let mut reg = reg_of(&[('A', 1, 1), ('B', 1, 2), ('A', 2, 2)]);
    connect_same_frequency(&mut reg);
    assert!(reg.remove(2, 2).is_some());
    assert!(reg.find(1, 1).unwrap().adjacency().is_empty());
    assert_eq!(dfs(&reg, p(1, 1), TEN).positions(), vec![p(1, 1)]);
}

#[test]
fn paths_between_antennas() {
    let mut reg = reg_of(&[('A', 0, 0), ('A', 0, 1), ('A', 0, 2), ('B', 3, 3)]);
    connect_same_frequency(&mut reg);
    assert!(path_exists(&reg, p(0, 0), p(0, 2), TEN));
    assert!(!path_exists(&reg, p(0, 0), p(3, 3), TEN));
    assert!(!path_exists(&reg, p(0, 0), p(0, 2), Bounds::new(1, 2)));

    let all = all_paths(&reg, p(0, 0), p(0, 2), TEN, PathCfg::default());
    assert_eq!(
        all,
        vec![vec![p(0, 0), p(0, 1), p(0, 2)], vec![p(0, 0), p(0, 2)]]
    );
    let one = PathCfg {
        max_paths: 1,
        ..PathCfg::default()
    };
    let capped = all_paths(&reg, p(0, 0), p(0, 2), TEN, one);
    assert_eq!(capped.len(), 1);
    assert_eq!(
        all_paths(&reg, p(0, 1), p(0, 1), TEN, PathCfg::default()),
        vec![vec![p(0, 1)]]
    );
    assert!(all_paths(&reg, p(0, 0), p(3, 3), TEN, PathCfg::default()).is_empty());
}

#[test]
fn unreachable_target_returns_without_walking_the_group() {
    // Twelve mutually connected 'A's: enumerating their simple paths would
    // not finish, so an unreachable target must be rejected up front.
    let map = load_from_text("AAAAAAAAAA\nAA......B.\n", LoadCfg::default()).unwrap();
    let mut reg = map.registry;
    connect_same_frequency(&mut reg);
    assert!(all_paths(&reg, p(0, 0), p(1, 8), map.extent, PathCfg::default()).is_empty());
    // Same frequency, but the target row is outside the bounds.
    let top_row = Bounds::new(1, 10);
    assert!(all_paths(&reg, p(0, 0), p(1, 1), top_row, PathCfg::default()).is_empty());
}

#[test]
fn step_budget_bounds_enumeration_in_large_groups() {
    let map = load_from_text("AAAAAAAAAA\nAA........\n", LoadCfg::default()).unwrap();
    let mut reg = map.registry;
    connect_same_frequency(&mut reg);
    let cfg = PathCfg {
        max_paths: usize::MAX,
        max_steps: 50,
    };
    let found = all_paths(&reg, p(0, 0), p(0, 9), map.extent, cfg);
    assert!(!found.is_empty());
    assert!(found.len() <= 50);
    for path in &found {
        assert_eq!(path.first(), Some(&p(0, 0)));
        assert_eq!(path.last(), Some(&p(0, 9)));
    }
}

#[test]
fn extreme_coordinates_connect_and_traverse() {
    let far = i32::MAX - 1;
    let reg = reg_of(&[('A', 0, 0), ('A', far, 0), ('A', 0, far)]);
    let mut bytes = Vec::new();
    write_dump(&reg, &mut bytes).unwrap();
    let mut back = read_dump(bytes.as_slice(), RegistryOrder::Append).unwrap();
    connect_same_frequency(&mut back);
    let wide = Bounds::new(i32::MAX, i32::MAX);
    assert_eq!(
        bfs(&back, p(0, 0), wide).positions(),
        vec![p(0, 0), p(0, far), p(far, 0)]
    );
    assert_eq!(dfs(&back, p(far, 0), wide).len(), 3);
    assert_eq!(dfs(&back, p(0, 0), TEN).positions(), vec![p(0, 0)]);
    assert_eq!(
        all_paths(&back, p(0, 0), p(far, 0), wide, PathCfg::default()).len(),
        2
    );
    let near = crate::nefasto::derive(&back, crate::nefasto::NefastoPolicy::Bounded(TEN));
    assert!(near.is_empty());
}

fn same_freq_in_bounds(reg: &Registry, start: Pos, bounds: Bounds) -> Vec<Pos> {
    let freq = reg.get(start).unwrap().frequency;
    let mut v: Vec<Pos> = reg
        .iter()
        .filter(|a| a.frequency == freq && bounds.contains(a.pos))
        .map(|a| a.pos)
        .collect();
    v.sort();
    v
}

proptest! {
    #[test]
    fn prop_adjacency_symmetric(seed in 0u64..300) {
        let mut reg = random_registry(RandomLayoutCfg::default(), seed);
        connect_same_frequency(&mut reg);
        for a in reg.iter() {
            for &n in a.adjacency() {
                let b = reg.get(n).unwrap();
                prop_assert_eq!(a.frequency, b.frequency);
                prop_assert!(b.adjacency().contains(&a.pos));
            }
            let peers = reg.iter().filter(|b| b.frequency == a.frequency).count();
            prop_assert_eq!(a.adjacency().len(), peers - 1);
        }
    }

    #[test]
    fn prop_traversals_complete_unique_and_deterministic(seed in 0u64..300) {
        let mut reg = random_registry(RandomLayoutCfg::default(), seed);
        connect_same_frequency(&mut reg);
        let bounds = Bounds::new(8, 8);
        let Some(start) = reg.iter().map(|a| a.pos).find(|q| bounds.contains(*q)) else {
            return Ok(());
        };
        let expected = same_freq_in_bounds(&reg, start, bounds);
        for kind in [SearchKind::DepthFirst, SearchKind::BreadthFirst] {
            let t = traverse(&reg, start, bounds, kind);
            prop_assert_eq!(t.visits[0].pos, start);
            let mut got = t.positions();
            got.sort();
            let n = got.len();
            got.dedup();
            prop_assert_eq!(n, got.len());
            prop_assert_eq!(&got, &expected);
            let again = traverse(&reg, start, bounds, kind);
            prop_assert_eq!(t.positions(), again.positions());
        }
    }
}
