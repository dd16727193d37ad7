use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{Coordinates, NodeId, Position};

/// Average edge length assumed when converting a distance into a hop estimate.
pub const AVERAGE_EDGE_LENGTH: f64 = 5.0;

/// Flavour of estimate returned by [`heuristic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    /// Straight-line distance, comparable with edge costs.
    #[default]
    Euclidean,
    /// Straight-line distance divided by [`AVERAGE_EDGE_LENGTH`], comparable with hop counts.
    HopEstimate,
}

/// Estimate the remaining cost from `node` to the closest of `destinations`.
///
/// The estimate is admissible only when every edge costs at least the
/// straight-line distance between its endpoints; this is assumed, not checked.
/// Returns `f64::INFINITY` when `destinations` is empty.
pub fn heuristic(
    coords: &Coordinates,
    node: NodeId,
    destinations: &[NodeId],
    kind: HeuristicKind,
) -> Result<f64> {
    let from = position(coords, node)?;
    let mut closest = f64::INFINITY;
    for &destination in destinations {
        let distance = from.distance_to(position(coords, destination)?);
        closest = closest.min(distance);
    }

    Ok(match kind {
        HeuristicKind::Euclidean => closest,
        HeuristicKind::HopEstimate => closest / AVERAGE_EDGE_LENGTH,
    })
}

fn position(coords: &Coordinates, node: NodeId) -> Result<&Position> {
    coords
        .get(&node)
        .ok_or(Error::MissingCoordinate { node })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords() -> Coordinates {
        Coordinates::from([
            (1, Position::new(0.0, 0.0)),
            (2, Position::new(3.0, 4.0)),
            (3, Position::new(6.0, 8.0)),
        ])
    }

    #[test]
    fn euclidean_picks_closest_destination() {
        let h = heuristic(&coords(), 1, &[3, 2], HeuristicKind::Euclidean).unwrap();
        assert!((h - 5.0).abs() < 1e-9);
    }

    #[test]
    fn hop_estimate_scales_by_average_edge_length() {
        let h = heuristic(&coords(), 1, &[2], HeuristicKind::HopEstimate).unwrap();
        assert!((h - 1.0).abs() < 1e-9);
    }

    #[test]
    fn destination_itself_scores_zero() {
        let h = heuristic(&coords(), 2, &[2, 3], HeuristicKind::Euclidean).unwrap();
        assert_eq!(h, 0.0);
    }

    #[test]
    fn missing_node_coordinate_fails() {
        let err = heuristic(&coords(), 9, &[2], HeuristicKind::Euclidean).unwrap_err();
        assert!(matches!(err, Error::MissingCoordinate { node: 9 }));
    }

    #[test]
    fn missing_destination_coordinate_fails() {
        let err = heuristic(&coords(), 1, &[2, 7], HeuristicKind::Euclidean).unwrap_err();
        assert!(matches!(err, Error::MissingCoordinate { node: 7 }));
    }

    #[test]
    fn empty_destinations_are_unreachable() {
        let h = heuristic(&coords(), 1, &[], HeuristicKind::Euclidean).unwrap();
        assert!(h.is_infinite());
    }
}
