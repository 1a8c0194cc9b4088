//! CLiMF stochastic gradient ascent.
//!
//! Each epoch visits users in index order. For user `i` with items
//! `items_i` and current scores `f[j] = <U_i, V_{items_i[j]}>`, every item
//! row gets
//!
//! ```text
//! dV = σ(-f_j)·U_i - β·V_w + Σ_{j'≠j} dσ(f_j - f_j')·(1/(1-σ(f_j' - f_j)) - 1/(1-σ(f_j - f_j')))·U_i
//! V_w += α·dV
//! ```
//!
//! and the user row accumulates
//!
//! ```text
//! dU = -β·U_i + Σ_j [ σ(-f_j)·V_w + Σ_{j'≠j} (V_w - V_{w'})·dσ(f_j' - f_j)/(1-σ(f_j' - f_j)) ]
//! U_i += α·dU
//! ```
//!
//! Item rows are updated immediately (later terms for the same user read the
//! new values) while `f` stays as computed at the start of the user.

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::Rng;

use super::factors::FactorStore;
use super::interactions::Interactions;
use super::model::{rank_by_score, score_items};
use super::ClimfConfig;
use crate::activation::{one_minus_sigmoid, sigmoid, sigmoid_derivative};
use crate::error::{ClimfError, Result};
use crate::metrics::ranking::mean_reciprocal_rank;
use crate::primitives::{axpy, dot, Matrix};

/// Maximum number of users in the per-epoch diagnostic sample.
pub const MAX_EVAL_USERS: usize = 1000;

/// Smallest denominator admitted in the pairwise ranking terms.
const DENOM_FLOOR: f32 = 1e-30;

/// Progress record for one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Wall time spent on the gradient updates of this epoch.
    pub elapsed: Duration,
    /// MRR on the diagnostic sample; `None` unless training is verbose.
    pub mrr: Option<f32>,
}

/// Result of a training run.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    /// Learned factors.
    pub factors: FactorStore,
    /// One entry per epoch, in order.
    pub history: Vec<EpochStats>,
}

/// Fixed-budget SGD optimizer for the CLiMF objective.
#[derive(Debug, Clone, Copy)]
pub struct Trainer {
    config: ClimfConfig,
}

impl Trainer {
    /// Creates a trainer, validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: ClimfConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this trainer runs with.
    #[must_use]
    pub fn config(&self) -> &ClimfConfig {
        &self.config
    }

    /// Initializes factors from `rng` and runs exactly `steps` epochs.
    ///
    /// When verbose, the diagnostic user sample is drawn once, right after
    /// initialization, from the same `rng`.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` holds no interactions.
    pub fn train<R: Rng + ?Sized>(&self, data: &Interactions, rng: &mut R) -> Result<TrainOutcome> {
        let ClimfConfig {
            n_factors,
            steps,
            alpha,
            beta,
            verbose,
            ..
        } = self.config;

        if data.is_empty() {
            return Err(ClimfError::empty_input("no interactions to train on"));
        }
        if alpha == 0.0 {
            warn!("With alpha=0, this algorithm does not converge well.");
        }

        let (num_users, num_items) = data.shape();
        debug!(
            "CLiMF: {num_users} users x {num_items} items, {} interactions, K={n_factors}, \
             steps={steps}, alpha={alpha}, beta={beta}",
            data.len()
        );

        let mut factors = FactorStore::initialize(num_users, num_items, n_factors, rng)?;
        let eval_users = if verbose {
            Some(sample_eval_users(num_users, rng))
        } else {
            None
        };

        let mut scratch = Scratch::new(n_factors);
        let mut history = Vec::with_capacity(steps);
        for epoch in 1..=steps {
            let start = Instant::now();
            run_epoch(&mut factors, data, alpha, beta, &mut scratch);
            let elapsed = start.elapsed();

            let mrr = eval_users.as_deref().map(|users| {
                let mrr_start = Instant::now();
                let mrr = sample_mrr(&factors, data, users);
                info!(
                    "- Step: {epoch}/{steps}  time {:.3}s  MRR = {mrr:.4}  (MRR time {:.3}s)",
                    elapsed.as_secs_f64(),
                    mrr_start.elapsed().as_secs_f64()
                );
                mrr
            });

            history.push(EpochStats {
                epoch,
                elapsed,
                mrr,
            });
        }

        Ok(TrainOutcome { factors, history })
    }
}

/// Per-user working buffers, reused across users and epochs.
struct Scratch {
    f: Vec<f32>,
    user_row: Vec<f32>,
    du: Vec<f32>,
    dv: Vec<f32>,
}

impl Scratch {
    fn new(n_factors: usize) -> Self {
        Self {
            f: Vec::new(),
            user_row: vec![0.0; n_factors],
            du: vec![0.0; n_factors],
            dv: vec![0.0; n_factors],
        }
    }
}

/// One full pass over all users.
fn run_epoch(
    factors: &mut FactorStore,
    data: &Interactions,
    alpha: f32,
    beta: f32,
    scratch: &mut Scratch,
) {
    let (user_factors, item_factors) = factors.split_mut();
    for user in 0..data.n_users() {
        let items = data.items_of(user);
        if items.is_empty() {
            continue;
        }
        update_user(user_factors, item_factors, user, items, alpha, beta, scratch);
    }
}

#[allow(clippy::too_many_arguments)]
fn update_user(
    user_factors: &mut Matrix<f32>,
    item_factors: &mut Matrix<f32>,
    user: usize,
    items: &[usize],
    alpha: f32,
    beta: f32,
    scratch: &mut Scratch,
) {
    let Scratch {
        f,
        user_row,
        du,
        dv,
    } = scratch;

    user_row.copy_from_slice(user_factors.row(user));
    let user_row: &[f32] = user_row;
    f.clear();
    f.extend(items.iter().map(|&w| dot(user_row, item_factors.row(w))));
    let f: &[f32] = f;
    let du: &mut [f32] = du;
    let dv: &mut [f32] = dv;

    for (d, &u) in du.iter_mut().zip(user_row) {
        *d = -beta * u;
    }

    for (j, &w) in items.iter().enumerate() {
        let fj = f[j];
        let direct = sigmoid(-fj);

        // dV = σ(-f_j)·U_i - β·V_w
        for ((d, &u), &v) in dv.iter_mut().zip(user_row).zip(item_factors.row(w)) {
            *d = direct * u - beta * v;
        }

        // Term I: every pairwise term scales the same U_i, so sum the weights first.
        let pairwise: f32 = f
            .iter()
            .enumerate()
            .filter(|&(jp, _)| jp != j)
            .map(|(_, &fjp)| {
                let diff = fj - fjp;
                sigmoid_derivative(diff)
                    * (safe_recip(one_minus_sigmoid(-diff)) - safe_recip(one_minus_sigmoid(diff)))
            })
            .sum();
        axpy(pairwise, user_row, dv);

        axpy(alpha, dv, item_factors.row_mut(w));

        let updated = item_factors.row(w);
        axpy(direct, updated, du);

        // Term II
        for (jp, &wp) in items.iter().enumerate() {
            if jp == j {
                continue;
            }
            let diff = f[jp] - fj;
            let weight = sigmoid_derivative(diff) / one_minus_sigmoid(diff).max(DENOM_FLOOR);
            for ((d, &vw), &vwp) in du.iter_mut().zip(updated).zip(item_factors.row(wp)) {
                *d += (vw - vwp) * weight;
            }
        }
    }

    axpy(alpha, du, user_factors.row_mut(user));
}

#[inline]
fn safe_recip(x: f32) -> f32 {
    1.0 / x.max(DENOM_FLOOR)
}

/// Distinct users for the diagnostic MRR, at most [`MAX_EVAL_USERS`].
fn sample_eval_users<R: Rng + ?Sized>(num_users: usize, rng: &mut R) -> Vec<usize> {
    let amount = num_users.min(MAX_EVAL_USERS);
    rand::seq::index::sample(rng, num_users, amount).into_vec()
}

/// MRR of the current factors over `users`, relevance taken from `data`.
fn sample_mrr(factors: &FactorStore, data: &Interactions, users: &[usize]) -> f32 {
    let rankings: Vec<Vec<usize>> = users
        .iter()
        .map(|&u| {
            let scores = score_items(factors.user_factors().row(u), factors.item_factors());
            rank_by_score(&scores)
        })
        .collect();
    mean_reciprocal_rank(&rankings, &data.relevant_items(users))
}

#[cfg(test)]
#[path = "trainer_tests.rs"]
mod tests;
