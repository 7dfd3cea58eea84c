//! Discoverer-follower adjacency matrix
//!
//! Every (user, resource) edge is weighted by how early the user acted on the
//! resource. On a resource with `n` activities the earliest actor scores `n`,
//! each later timestamp group scores `n - (activities already seen)`, and
//! actors sharing an exact timestamp share a score. For timestamps
//!
//! ```text
//! 1, 1, 1, 2, 3, 3, 4, 4, 5, 6
//! ```
//!
//! the scores are
//!
//! ```text
//! 10, 10, 10, 7, 6, 6, 4, 4, 2, 1
//! ```

use crate::activity::ActivityLog;
use ndarray::Array1;
use sprs::{CsMat, TriMat};
use std::collections::BTreeMap;
use std::hash::Hash;

/// Raw action-position score of one activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionScore {
    pub user: usize,
    pub resource: usize,
    pub score: usize,
}

/// Running state for one resource while walking the log
struct ResourceCursor<'a, T> {
    /// Activities on this resource processed so far
    seen: usize,
    /// Timestamp of the latest distinct timestamp group
    last_timestamp: Option<&'a T>,
    /// Score handed to that group
    last_score: usize,
}

impl<T> ResourceCursor<'_, T> {
    fn new() -> Self {
        Self {
            seen: 0,
            last_timestamp: None,
            last_score: 0,
        }
    }
}

/// Compute the position score of every activity, in log order
pub fn position_scores<T, U, R>(log: &ActivityLog<T, U, R>) -> Vec<PositionScore>
where
    T: Ord,
    U: Ord + Hash + Clone,
    R: Ord + Hash + Clone,
{
    let mut totals = vec![0usize; log.resources().len()];
    for activity in log.indexed() {
        totals[activity.resource] += 1;
    }

    let mut cursors: Vec<ResourceCursor<'_, T>> =
        (0..totals.len()).map(|_| ResourceCursor::new()).collect();

    log.indexed()
        .map(|activity| {
            let cursor = &mut cursors[activity.resource];

            let score = if cursor.last_timestamp == Some(activity.timestamp) {
                cursor.last_score
            } else {
                cursor.last_score = totals[activity.resource] - cursor.seen;
                cursor.last_timestamp = Some(activity.timestamp);
                cursor.last_score
            };
            cursor.seen += 1;

            PositionScore {
                user: activity.user,
                resource: activity.resource,
                score,
            }
        })
        .collect()
}

/// Sparse users x resources matrix of edge weights
#[derive(Debug, Clone)]
pub struct AdjacencyMatrix {
    matrix: CsMat<f64>,
}

impl AdjacencyMatrix {
    /// Populate the matrix with raw position scores
    ///
    /// A user acting on the same resource more than once keeps the score of
    /// their latest activity.
    pub fn populate<T, U, R>(log: &ActivityLog<T, U, R>) -> Self
    where
        T: Ord,
        U: Ord + Hash + Clone,
        R: Ord + Hash + Clone,
    {
        let cells = position_scores(log)
            .into_iter()
            .map(|p| ((p.user, p.resource), p.score as f64));

        Self::from_cells(log.users().len(), log.resources().len(), cells)
    }

    /// Build a matrix from explicit cells; a repeated cell keeps its last value
    pub fn from_cells(
        users: usize,
        resources: usize,
        cells: impl IntoIterator<Item = ((usize, usize), f64)>,
    ) -> Self {
        let cells: BTreeMap<(usize, usize), f64> = cells.into_iter().collect();

        let mut triplets = TriMat::with_capacity((users, resources), cells.len());
        for ((user, resource), weight) in cells {
            triplets.add_triplet(user, resource, weight);
        }

        Self {
            matrix: triplets.to_csr(),
        }
    }

    /// Number of rows
    pub fn users(&self) -> usize {
        self.matrix.rows()
    }

    /// Number of columns
    pub fn resources(&self) -> usize {
        self.matrix.cols()
    }

    /// Number of stored edges
    pub fn edges(&self) -> usize {
        self.matrix.nnz()
    }

    /// Weight of one cell, zero when the user never acted on the resource
    pub fn get(&self, user: usize, resource: usize) -> f64 {
        self.matrix.get(user, resource).copied().unwrap_or(0.0)
    }

    /// Stored edge weights, for the credit transform
    pub(crate) fn weights_mut(&mut self) -> &mut [f64] {
        self.matrix.data_mut()
    }

    /// `Q · Aᵗ`: each user's weights summed against resource quality
    pub fn expertise_step(&self, quality: &Array1<f64>) -> Array1<f64> {
        let mut expertise: Array1<f64> = Array1::zeros(self.users());
        for (user, row) in self.matrix.outer_iterator().enumerate() {
            expertise[user] = row
                .iter()
                .map(|(resource, &weight)| weight * quality[resource])
                .sum();
        }
        expertise
    }

    /// `E · A`: each resource's weights summed against user expertise
    pub fn quality_step(&self, expertise: &Array1<f64>) -> Array1<f64> {
        let mut quality: Array1<f64> = Array1::zeros(self.resources());
        for (user, row) in self.matrix.outer_iterator().enumerate() {
            let user_expertise = expertise[user];
            for (resource, &weight) in row.iter() {
                quality[resource] += weight * user_expertise;
            }
        }
        quality
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::Activity;

    fn single_resource(timestamps: &[u32]) -> ActivityLog<u32, String, &'static str> {
        let activities = timestamps
            .iter()
            .enumerate()
            .map(|(i, &t)| Activity::new(t, format!("user{i:02}"), "doc"))
            .collect();
        ActivityLog::new(activities).unwrap()
    }

    #[test]
    fn test_documented_position_example() {
        let log = single_resource(&[1, 1, 1, 2, 3, 3, 4, 4, 5, 6]);
        let scores: Vec<usize> = position_scores(&log).iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![10, 10, 10, 7, 6, 6, 4, 4, 2, 1]);
    }

    #[test]
    fn test_single_activity_scores_one() {
        let log = single_resource(&[42]);
        let scores = position_scores(&log);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].score, 1);
    }

    #[test]
    fn test_resources_are_scored_independently() {
        let activities = vec![
            Activity::new(1, "alice", "a"),
            Activity::new(2, "bob", "b"),
            Activity::new(3, "carol", "a"),
            Activity::new(4, "alice", "b"),
        ];
        let log = ActivityLog::new(activities).unwrap();
        let matrix = AdjacencyMatrix::populate(&log);

        let user = |name: &'static str| log.users().id_of(&name).unwrap();
        let resource = |name: &'static str| log.resources().id_of(&name).unwrap();

        assert_eq!(matrix.get(user("alice"), resource("a")), 2.0);
        assert_eq!(matrix.get(user("carol"), resource("a")), 1.0);
        assert_eq!(matrix.get(user("bob"), resource("b")), 2.0);
        assert_eq!(matrix.get(user("alice"), resource("b")), 1.0);
        assert_eq!(matrix.get(user("bob"), resource("a")), 0.0);
        assert_eq!(matrix.edges(), 4);
    }

    #[test]
    fn test_repeat_activity_keeps_latest_score() {
        let activities = vec![
            Activity::new(1, "alice", "doc"),
            Activity::new(2, "bob", "doc"),
            Activity::new(3, "alice", "doc"),
        ];
        let log = ActivityLog::new(activities).unwrap();
        let matrix = AdjacencyMatrix::populate(&log);

        assert_eq!(matrix.edges(), 2);
        assert_eq!(matrix.get(log.users().id_of(&"alice").unwrap(), 0), 1.0);
        assert_eq!(matrix.get(log.users().id_of(&"bob").unwrap(), 0), 2.0);
    }

    #[test]
    fn test_matrix_vector_products() {
        // [[1, 2],
        //  [0, 3]]
        let matrix = AdjacencyMatrix::from_cells(
            2,
            2,
            vec![((0, 0), 1.0), ((0, 1), 2.0), ((1, 1), 3.0)],
        );

        let expertise = matrix.expertise_step(&Array1::from(vec![1.0, 10.0]));
        assert_eq!(expertise.to_vec(), vec![21.0, 30.0]);

        let quality = matrix.quality_step(&Array1::from(vec![1.0, 10.0]));
        assert_eq!(quality.to_vec(), vec![1.0, 32.0]);
    }
}
