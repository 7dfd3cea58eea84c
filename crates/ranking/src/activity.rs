//! Activity log model
//!
//! Normalizes raw (timestamp, user, resource) records into a log sorted by
//! timestamp and assigns dense integer ids to users and resources.

use serde::{Deserialize, Serialize};
use spear_common::errors::{Result, SpearError};
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

/// One user acting on one resource at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity<T, U, R> {
    pub timestamp: T,
    pub user: U,
    pub resource: R,
}

impl<T, U, R> Activity<T, U, R> {
    pub fn new(timestamp: T, user: U, resource: R) -> Self {
        Self {
            timestamp,
            user,
            resource,
        }
    }
}

impl<T, U, R> From<(T, U, R)> for Activity<T, U, R> {
    fn from((timestamp, user, resource): (T, U, R)) -> Self {
        Self::new(timestamp, user, resource)
    }
}

/// Bijection between identities and dense ids in `0..len()`
///
/// Identities are sorted before ids are handed out, so the same set of
/// identities always maps to the same ids.
#[derive(Debug, Clone)]
pub struct IdentityIndex<I> {
    ids: HashMap<I, usize>,
    identities: Vec<I>,
}

impl<I: Ord + Hash + Clone> IdentityIndex<I> {
    /// Build the index from every identity observed, duplicates included
    pub fn from_observed<'a>(observed: impl IntoIterator<Item = &'a I>) -> Self
    where
        I: 'a,
    {
        let distinct: BTreeSet<&I> = observed.into_iter().collect();
        let identities: Vec<I> = distinct.into_iter().cloned().collect();
        let ids = identities
            .iter()
            .enumerate()
            .map(|(id, identity)| (identity.clone(), id))
            .collect();

        Self { ids, identities }
    }

    /// Dense id of an identity
    pub fn id_of(&self, identity: &I) -> Option<usize> {
        self.ids.get(identity).copied()
    }

    /// Identity behind a dense id
    pub fn identity(&self, id: usize) -> Option<&I> {
        self.identities.get(id)
    }

    /// Number of distinct identities
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Identities in id order
    pub fn iter(&self) -> impl Iterator<Item = &I> {
        self.identities.iter()
    }
}

/// Activity with its user and resource resolved to dense ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedActivity<'a, T> {
    pub timestamp: &'a T,
    pub user: usize,
    pub resource: usize,
}

/// Activities sorted oldest first, plus the user and resource indexes
#[derive(Debug, Clone)]
pub struct ActivityLog<T, U, R> {
    activities: Vec<Activity<T, U, R>>,
    users: IdentityIndex<U>,
    resources: IdentityIndex<R>,
}

impl<T, U, R> ActivityLog<T, U, R>
where
    T: Ord,
    U: Ord + Hash + Clone,
    R: Ord + Hash + Clone,
{
    /// Build a log from validated activities
    ///
    /// The sort is stable: activities sharing a timestamp keep the order
    /// they were supplied in.
    pub fn new(mut activities: Vec<Activity<T, U, R>>) -> Result<Self> {
        if activities.is_empty() {
            return Err(SpearError::EmptyActivityLog);
        }

        activities.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        let users = IdentityIndex::from_observed(activities.iter().map(|a| &a.user));
        let resources = IdentityIndex::from_observed(activities.iter().map(|a| &a.resource));

        Ok(Self {
            activities,
            users,
            resources,
        })
    }

    /// Build a log from raw records whose timestamp may be missing
    ///
    /// Fails on the first record without a timestamp; nothing is dropped.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Option<T>, U, R)>,
    {
        let activities = records
            .into_iter()
            .enumerate()
            .map(|(index, (timestamp, user, resource))| {
                timestamp
                    .map(|timestamp| Activity::new(timestamp, user, resource))
                    .ok_or(SpearError::MissingTimestamp { index })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(activities)
    }

    /// Activities resolved to dense ids, oldest first
    pub fn indexed(&self) -> impl Iterator<Item = IndexedActivity<'_, T>> + '_ {
        self.activities.iter().map(move |activity| IndexedActivity {
            timestamp: &activity.timestamp,
            // Both indexes were built from these very activities.
            user: self.users.ids[&activity.user],
            resource: self.resources.ids[&activity.resource],
        })
    }
}

impl<T, U, R> ActivityLog<T, U, R> {
    /// Activities, oldest first
    pub fn activities(&self) -> &[Activity<T, U, R>] {
        &self.activities
    }

    pub fn users(&self) -> &IdentityIndex<U> {
        &self.users
    }

    pub fn resources(&self) -> &IdentityIndex<R> {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}
