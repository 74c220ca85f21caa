use std::collections::{HashMap, VecDeque};

use waypath_core::Coord;

use crate::traits::Pather;

/// Compute a breadth-first distance map from `source`.
///
/// Each step has cost 1. The returned map holds every cell reachable from
/// `source` (including `source` itself at distance 0); cells missing from it
/// are in a different connected component. An impassable `source` yields an
/// empty map.
pub fn bfs_distances<P: Pather + ?Sized>(pather: &P, source: Coord) -> HashMap<Coord, i32> {
    let mut dist = HashMap::new();
    if !pather.contains(source) || !pather.is_passable(source) {
        return dist;
    }
    dist.insert(source, 0);

    let mut queue = VecDeque::from([source]);
    let mut nbuf = Vec::with_capacity(4);

    while let Some(current) = queue.pop_front() {
        let d = dist[&current];
        nbuf.clear();
        pather.neighbors(current, &mut nbuf);
        for &n in nbuf.iter() {
            if dist.contains_key(&n) {
                continue;
            }
            dist.insert(n, d + 1);
            queue.push_back(n);
        }
    }
    dist
}

/// Length in steps of the shortest path between two cells, if any.
pub fn bfs_distance<P: Pather + ?Sized>(pather: &P, from: Coord, to: Coord) -> Option<i32> {
    bfs_distances(pather, from).get(&to).copied()
}
