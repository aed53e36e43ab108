//! Room connectivity
//!
//! Two passes join the rooms of a [`RoomGraph`] by carving passages between
//! their edge tiles. The greedy pass gives every isolated room a link to its
//! nearest neighbor. The closure pass then repeatedly joins the closest pair of
//! (inaccessible, accessible) rooms until every room can reach the main room,
//! or until no remaining pair can be routed.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use strum::Display;

use super::carve::{CarveSettings, carve_passage};
use super::pathfind::{Reachability, find_path, line_walk, octile_lower_bound};
use super::room::{RoomGraph, RoomId};
use super::{Coord, Grid, ObstacleMask};

/// A measured passage, carrying its route when measuring produced one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    pub distance: u64,
    pub route: Option<Vec<Coord>>,
}

/// Measures and routes a passage between two tiles
pub trait PassageMetric {
    /// Cost of joining `from` to `to`, or `None` when they cannot be joined
    fn distance(&self, from: Coord, to: Coord) -> Option<u64>;

    /// Cells to carve between `from` and `to`
    fn route(&self, from: Coord, to: Coord) -> Option<Vec<Coord>>;

    /// Never exceeds [`PassageMetric::distance`]
    fn lower_bound(&self, _from: Coord, _to: Coord) -> u64 {
        0
    }

    /// Distance plus any route found on the way, so winners need not be routed twice
    fn measure(&self, from: Coord, to: Coord) -> Option<Measurement> {
        self.distance(from, to).map(|distance| Measurement {
            distance,
            route: None,
        })
    }
}

/// Squared Euclidean distance, carved along a straight line
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLine;

impl PassageMetric for StraightLine {
    fn distance(&self, from: Coord, to: Coord) -> Option<u64> {
        Some(from.distance_squared(to))
    }

    fn route(&self, from: Coord, to: Coord) -> Option<Vec<Coord>> {
        Some(line_walk(from, to))
    }

    fn lower_bound(&self, from: Coord, to: Coord) -> u64 {
        from.distance_squared(to)
    }
}

/// A* path cost around height obstacles
///
/// Components of the mask are labelled up front; tiles in different
/// components are rejected without a search.
#[derive(Debug, Clone)]
pub struct ShortestPath<'a> {
    mask: ObstacleMask<'a>,
    reach: Reachability,
}

impl<'a> ShortestPath<'a> {
    pub fn new(mask: ObstacleMask<'a>) -> Self {
        let reach = Reachability::new(&mask);
        debug!("obstacle mask: {} passable components", reach.component_count());
        Self { mask, reach }
    }

    pub fn reachability(&self) -> &Reachability {
        &self.reach
    }
}

impl PassageMetric for ShortestPath<'_> {
    fn distance(&self, from: Coord, to: Coord) -> Option<u64> {
        self.measure(from, to).map(|m| m.distance)
    }

    fn route(&self, from: Coord, to: Coord) -> Option<Vec<Coord>> {
        if !self.reach.connected(from, to) {
            return None;
        }
        find_path(&self.mask, from, to).map(|path| path.cells)
    }

    fn lower_bound(&self, from: Coord, to: Coord) -> u64 {
        octile_lower_bound(from, to).unsigned_abs()
    }

    fn measure(&self, from: Coord, to: Coord) -> Option<Measurement> {
        if !self.reach.connected(from, to) {
            return None;
        }
        find_path(&self.mask, from, to).map(|path| Measurement {
            distance: path.cost.unsigned_abs(),
            route: Some(path.cells),
        })
    }
}

/// Which pass made a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConnectPhase {
    Greedy,
    Closure,
}

/// One carved passage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub a: RoomId,
    pub b: RoomId,
    /// Edge tile of `a` the passage starts from
    pub from: Coord,
    /// Edge tile of `b` the passage ends on
    pub to: Coord,
    pub phase: ConnectPhase,
    pub distance: u64,
}

/// Everything the connector did, plus what it could not do
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionReport {
    pub connections: Vec<Connection>,
    /// Rooms left without a route to the main room
    pub unreachable: Vec<RoomId>,
}

impl ConnectionReport {
    pub fn is_fully_connected(&self) -> bool {
        self.unreachable.is_empty()
    }
}

/// Best pair found so far between two rooms
#[derive(Debug, Clone)]
struct Candidate {
    a: RoomId,
    b: RoomId,
    from: Coord,
    to: Coord,
    distance: u64,
    route: Option<Vec<Coord>>,
}

/// Joins rooms with passages measured by `M`
#[derive(Debug, Clone)]
pub struct ConnectivityConnector<M> {
    metric: M,
    carve: CarveSettings,
}

impl<M: PassageMetric> ConnectivityConnector<M> {
    pub fn new(metric: M, carve: CarveSettings) -> Self {
        Self { metric, carve }
    }

    /// Run both passes, carving into `grid`
    pub fn connect(&self, graph: &mut RoomGraph, grid: &mut Grid) -> ConnectionReport {
        let mut report = ConnectionReport::default();

        self.greedy_pass(graph, grid, &mut report);
        self.closure_pass(graph, grid, &mut report);

        report.unreachable = graph.unreachable_ids();
        for id in &report.unreachable {
            warn!("room {} has no route to the main room", id.0);
        }
        debug!(
            "connector: {} connections, {} rooms unreachable",
            report.connections.len(),
            report.unreachable.len()
        );
        report
    }

    fn greedy_pass(
        &self,
        graph: &mut RoomGraph,
        grid: &mut Grid,
        report: &mut ConnectionReport,
    ) {
        for a in graph.ids() {
            if graph.has_connections(a) {
                continue;
            }
            let mut best = None;
            for b in graph.ids() {
                if a == b || graph.is_connected(a, b) {
                    continue;
                }
                self.best_between(graph, a, b, &mut best);
            }
            if let Some(candidate) = best {
                self.join(graph, grid, candidate, ConnectPhase::Greedy, report);
            }
        }
    }

    fn closure_pass(
        &self,
        graph: &mut RoomGraph,
        grid: &mut Grid,
        report: &mut ConnectionReport,
    ) {
        loop {
            let inaccessible = graph.unreachable_ids();
            if inaccessible.is_empty() {
                break;
            }
            let accessible = graph.accessible_ids();

            let mut best = None;
            for &a in &inaccessible {
                for &b in &accessible {
                    self.best_between(graph, a, b, &mut best);
                }
            }

            let joined = best.is_some_and(|candidate| {
                self.join(graph, grid, candidate, ConnectPhase::Closure, report)
            });
            if !joined {
                break;
            }
        }
    }

    /// Replace `best` with any strictly closer edge-tile pair between `a` and `b`
    fn best_between(
        &self,
        graph: &RoomGraph,
        a: RoomId,
        b: RoomId,
        best: &mut Option<Candidate>,
    ) {
        let (Some(room_a), Some(room_b)) = (graph.get(a), graph.get(b)) else {
            return;
        };
        for &from in &room_a.edge_tiles {
            for &to in &room_b.edge_tiles {
                if best
                    .as_ref()
                    .is_some_and(|cur| self.metric.lower_bound(from, to) >= cur.distance)
                {
                    continue;
                }
                let Some(Measurement { distance, route }) = self.metric.measure(from, to) else {
                    continue;
                };
                if best.as_ref().is_none_or(|cur| distance < cur.distance) {
                    *best = Some(Candidate {
                        a,
                        b,
                        from,
                        to,
                        distance,
                        route,
                    });
                }
            }
        }
    }

    fn join(
        &self,
        graph: &mut RoomGraph,
        grid: &mut Grid,
        candidate: Candidate,
        phase: ConnectPhase,
        report: &mut ConnectionReport,
    ) -> bool {
        let Some(route) = candidate
            .route
            .or_else(|| self.metric.route(candidate.from, candidate.to))
        else {
            return false;
        };
        graph.connect(candidate.a, candidate.b);
        let carved = carve_passage(grid, &route, self.carve);
        debug!(
            "{phase} passage: room {} {:?} -> room {} {:?}, distance {}, {carved} cells carved",
            candidate.a.0, candidate.from, candidate.b.0, candidate.to, candidate.distance
        );
        report.connections.push(Connection {
            a: candidate.a,
            b: candidate.b,
            from: candidate.from,
            to: candidate.to,
            phase,
            distance: candidate.distance,
        });
        true
    }
}
