//! Spear ranking runs
//!
//! One run walks the whole pipeline: populate the adjacency matrix, apply the
//! credit function, iterate mutual reinforcement, then sort.

use crate::activity::{Activity, ActivityLog, IdentityIndex};
use crate::adjacency::AdjacencyMatrix;
use crate::credit::apply_credit;
use crate::engine::MutualReinforcement;
use crate::ranking::{rank, Ranked};
use serde::Serialize;
use spear_common::config::RankingSettings;
use spear_common::errors::Result;
use spear_common::metrics::{RankingRunMetrics, RunShape};
use std::hash::Hash;

/// Log a pipeline step at info level when verbose, debug otherwise
macro_rules! progress {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::info!($($arg)+);
        } else {
            tracing::debug!($($arg)+);
        }
    };
}

/// Size and convergence figures of a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStats {
    pub activities: usize,
    pub users: usize,
    pub resources: usize,
    pub edges: usize,
    pub iterations: usize,
    /// L1 change of the expertise vector in the last round
    pub residual: f64,
}

/// Ranked experts and resources, best first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingOutcome<U, R> {
    pub expertise: Vec<Ranked<U>>,
    pub quality: Vec<Ranked<R>>,
    pub stats: RunStats,
}

/// Expertise and quality ranking over one activity log
#[derive(Debug, Clone)]
pub struct Spear<T, U, R> {
    log: ActivityLog<T, U, R>,
}

impl<T, U, R> Spear<T, U, R>
where
    T: Ord,
    U: Ord + Hash + Clone,
    R: Ord + Hash + Clone,
{
    /// Prepare a ranking over `activities`
    pub fn new(activities: Vec<Activity<T, U, R>>) -> Result<Self> {
        Ok(Self::from_log(ActivityLog::new(activities)?))
    }

    pub fn from_log(log: ActivityLog<T, U, R>) -> Self {
        Self { log }
    }

    pub fn log(&self) -> &ActivityLog<T, U, R> {
        &self.log
    }

    /// Users found in the activities
    pub fn users(&self) -> &IdentityIndex<U> {
        self.log.users()
    }

    /// Resources found in the activities
    pub fn resources(&self) -> &IdentityIndex<R> {
        self.log.resources()
    }

    /// Run with the credit scheme named in `settings`
    pub fn run(&self, settings: &RankingSettings) -> Result<RankingOutcome<U, R>> {
        let scheme = settings.credit;
        self.run_labelled(settings, scheme.name(), |raw| scheme.apply(raw))
    }

    /// Run with a caller-supplied credit function
    ///
    /// `credit` is only ever called with positive raw scores; zero weights
    /// stay zero. `|_| 1.0` reproduces HITS on the binary matrix.
    pub fn run_with<C>(&self, settings: &RankingSettings, credit: C) -> Result<RankingOutcome<U, R>>
    where
        C: FnMut(f64) -> f64,
    {
        self.run_labelled(settings, "custom", credit)
    }

    fn run_labelled<C>(
        &self,
        settings: &RankingSettings,
        label: &'static str,
        credit: C,
    ) -> Result<RankingOutcome<U, R>>
    where
        C: FnMut(f64) -> f64,
    {
        let metrics = RankingRunMetrics::start(label);
        let mut shape = RunShape {
            activities: self.log.len(),
            users: self.users().len(),
            resources: self.resources().len(),
            edges: 0,
        };

        let result = self.execute(settings, credit, &mut shape);

        match &result {
            Ok(outcome) => tracing::debug!(
                duration_secs = metrics.elapsed_secs(),
                residual = outcome.stats.residual,
                "Ranking run complete"
            ),
            Err(e) => tracing::warn!(error = %e, "Ranking run failed"),
        }
        metrics.finish(shape, result.is_ok());

        result
    }

    fn execute<C>(
        &self,
        settings: &RankingSettings,
        credit: C,
        shape: &mut RunShape,
    ) -> Result<RankingOutcome<U, R>>
    where
        C: FnMut(f64) -> f64,
    {
        settings.validate()?;
        let verbose = settings.verbose;

        progress!(
            verbose,
            activities = shape.activities,
            users = shape.users,
            resources = shape.resources,
            "Step 1) Populating adjacency matrix"
        );
        let mut matrix = AdjacencyMatrix::populate(&self.log);
        shape.edges = matrix.edges();

        progress!(
            verbose,
            edges = shape.edges,
            "Step 2) Applying credit function to adjacency matrix"
        );
        apply_credit(&mut matrix, credit);

        progress!(
            verbose,
            iterations = settings.iterations,
            "Step 3) Mutual reinforcement"
        );
        let scores = MutualReinforcement::new(settings.iterations).run(&matrix)?;

        progress!(verbose, "Step 4) Sorting users by expertise and resources by quality");
        let expertise = rank(&scores.expertise, self.users(), settings.limit);
        let quality = rank(&scores.quality, self.resources(), settings.limit);

        Ok(RankingOutcome {
            expertise,
            quality,
            stats: RunStats {
                activities: shape.activities,
                users: shape.users,
                resources: shape.resources,
                edges: shape.edges,
                iterations: scores.iterations,
                residual: scores.residual,
            },
        })
    }
}
