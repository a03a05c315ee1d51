//! Bounded-degree proximity graph over particle positions.
//!
//! For each particle `i` in index order, particles `j > i` are scanned in
//! index order and linked while their 3-D distance is below
//! `max_distance`. Scanning for `i` stops after `max_degree` accepted
//! links. The cap is asymmetric: it bounds the edges where `i` is the
//! lower endpoint, not the total degree of a particle, and it picks the
//! first qualifying neighbours rather than the nearest ones.
//!
//! The scan is O(n²) per frame. Populations are tens of particles, so a
//! spatial index is not worth its bookkeeping here.

use serde::{Deserialize, Serialize};

/// Unordered link between two particles, stored with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionEdge {
    /// Lower particle index.
    pub a: usize,
    /// Higher particle index.
    pub b: usize,
}

/// Builder holding the linking parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityGraphBuilder {
    /// Maximum accepted edges per lower endpoint.
    pub max_degree: usize,
    /// Strict upper bound on linking distance.
    pub max_distance: f64,
}

impl Default for ProximityGraphBuilder {
    fn default() -> Self {
        Self {
            max_degree: 3,
            max_distance: 2.5,
        }
    }
}

impl ProximityGraphBuilder {
    /// Create a builder.
    #[must_use]
    pub const fn new(max_degree: usize, max_distance: f64) -> Self {
        Self {
            max_degree,
            max_distance,
        }
    }

    /// Compute edges for the given positions.
    #[must_use]
    pub fn build_edges(&self, positions: &[[f64; 3]]) -> Vec<ConnectionEdge> {
        build_edges(positions, self.max_degree, self.max_distance)
    }
}

/// Compute the proximity edges for `positions`.
#[must_use]
pub fn build_edges(
    positions: &[[f64; 3]],
    max_degree: usize,
    max_distance: f64,
) -> Vec<ConnectionEdge> {
    let mut edges = Vec::new();
    if max_degree == 0 {
        return edges;
    }

    for (i, pi) in positions.iter().enumerate() {
        let mut accepted = 0;
        for (offset, pj) in positions[i + 1..].iter().enumerate() {
            if accepted >= max_degree {
                break;
            }
            if distance(pi, pj) < max_distance {
                edges.push(ConnectionEdge {
                    a: i,
                    b: i + 1 + offset,
                });
                accepted += 1;
            }
        }
    }

    edges
}

/// Flatten edges into line segments `[ax, ay, az, bx, by, bz]`.
///
/// Edges whose indices fall outside `positions` are skipped.
#[must_use]
pub fn edge_segments(positions: &[[f64; 3]], edges: &[ConnectionEdge]) -> Vec<[f64; 6]> {
    edges
        .iter()
        .filter_map(|edge| {
            let a = positions.get(edge.a)?;
            let b = positions.get(edge.b)?;
            Some([a[0], a[1], a[2], b[0], b[1], b[2]])
        })
        .collect()
}

fn distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize, spacing: f64) -> Vec<[f64; 3]> {
        (0..n).map(|i| [i as f64 * spacing, 0.0, 0.0]).collect()
    }

    #[test]
    fn test_empty_and_single() {
        assert!(build_edges(&[], 3, 2.5).is_empty());
        assert!(build_edges(&[[0.0, 0.0, 0.0]], 3, 2.5).is_empty());
    }

    #[test]
    fn test_zero_degree_yields_nothing() {
        let positions = line(5, 0.1);
        assert!(build_edges(&positions, 0, 10.0).is_empty());
    }

    #[test]
    fn test_distance_is_strict() {
        let positions = vec![[0.0, 0.0, 0.0], [2.5, 0.0, 0.0]];
        assert!(build_edges(&positions, 3, 2.5).is_empty());
        assert_eq!(build_edges(&positions, 3, 2.6).len(), 1);
    }

    #[test]
    fn test_uses_depth_axis() {
        let positions = vec![[0.0, 0.0, 0.0], [0.0, 0.0, 3.0]];
        assert!(build_edges(&positions, 3, 2.5).is_empty());
    }

    #[test]
    fn test_first_neighbours_not_nearest() {
        // Particle 0: j=1 is far-but-valid, j=2 is nearest. With a cap of 1
        // only the first qualifying neighbour is linked.
        let positions = vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.1, 0.0, 0.0]];
        let edges = build_edges(&positions, 1, 2.5);
        assert_eq!(edges[0], ConnectionEdge { a: 0, b: 1 });
        assert!(!edges.contains(&ConnectionEdge { a: 0, b: 2 }));
    }

    #[test]
    fn test_cap_is_per_lower_endpoint() {
        // All points within range of each other.
        let positions = line(6, 0.1);
        let edges = build_edges(&positions, 2, 10.0);

        // 0..=3 each get 2, 4 gets 1, 5 gets none.
        assert_eq!(edges.len(), 9);
        for i in 0..positions.len() {
            assert!(edges.iter().filter(|e| e.a == i).count() <= 2);
        }
        // Total degree can exceed the cap because of incoming edges.
        let degree_of_2 = edges.iter().filter(|e| e.a == 2 || e.b == 2).count();
        assert!(degree_of_2 > 2);
    }

    #[test]
    fn test_edges_in_scan_order() {
        let positions = line(4, 1.0);
        let edges = build_edges(&positions, 3, 1.5);
        assert_eq!(
            edges,
            vec![
                ConnectionEdge { a: 0, b: 1 },
                ConnectionEdge { a: 1, b: 2 },
                ConnectionEdge { a: 2, b: 3 },
            ]
        );
    }

    #[test]
    fn test_edge_segments() {
        let positions = vec![[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]];
        let segments = edge_segments(&positions, &[ConnectionEdge { a: 0, b: 1 }]);
        assert_eq!(segments, vec![[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]]);

        let stale = edge_segments(&positions, &[ConnectionEdge { a: 0, b: 9 }]);
        assert!(stale.is_empty());
    }

    #[test]
    fn test_builder_matches_free_function() {
        let positions = line(8, 0.7);
        let builder = ProximityGraphBuilder::new(2, 1.5);
        assert_eq!(builder.build_edges(&positions), build_edges(&positions, 2, 1.5));
    }
}
