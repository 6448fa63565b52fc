use crate::stats::round_dp;

/// Scorelines above this many goals per side are left out of the sums.
pub const MAX_GOALS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Venue {
    Home,
    Away,
}

/// Home-win / draw / away-win probabilities for one match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prob3 {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

impl Prob3 {
    pub fn total(&self) -> f64 {
        self.home + self.draw + self.away
    }
}

/// Outcome probabilities for a match where the home side scores at rate `xg_home`
/// and the away side at `xg_away`, both modelled as independent Poisson counts.
pub fn match_outcome_probs(xg_home: f64, xg_away: f64) -> Prob3 {
    outcome_probs_poisson(xg_home, xg_away, MAX_GOALS)
}

/// Expected points (0..=3) for the side producing `xg_for` and conceding `xg_against`.
///
/// `venue` picks which bucket counts as this side's win. Rounded to 2 decimals.
pub fn calculate_xpts(xg_for: f64, xg_against: f64, venue: Venue) -> f64 {
    let xpts = match venue {
        Venue::Home => {
            let p = match_outcome_probs(xg_for, xg_against);
            3.0 * p.home + p.draw
        }
        Venue::Away => {
            let p = match_outcome_probs(xg_against, xg_for);
            3.0 * p.away + p.draw
        }
    };
    round_dp(clamp(xpts, 0.0, 3.0), 2)
}

fn outcome_probs_poisson(lambda_home: f64, lambda_away: f64, max_goals: u32) -> Prob3 {
    let pmf_h = poisson_pmf(lambda_home, max_goals);
    let pmf_a = poisson_pmf(lambda_away, max_goals);

    let mut p_home = 0.0;
    let mut p_draw = 0.0;
    let mut p_away = 0.0;

    for (i, p_i) in pmf_h.iter().enumerate() {
        for (j, p_j) in pmf_a.iter().enumerate() {
            let p = p_i * p_j;
            if i > j {
                p_home += p;
            } else if i < j {
                p_away += p;
            } else {
                p_draw += p;
            }
        }
    }

    Prob3 {
        home: p_home,
        draw: p_draw,
        away: p_away,
    }
}

/// Poisson mass for 0..=max_k goals. The tail beyond `max_k` is dropped, so the vector
/// sums to the CDF at `max_k`.
fn poisson_pmf(lambda: f64, max_k: u32) -> Vec<f64> {
    let max_k = max_k as usize;
    let mut out = vec![0.0; max_k + 1];
    let lambda = lambda.max(0.0);

    out[0] = (-lambda).exp();
    for k in 1..=max_k {
        out[k] = out[k - 1] * lambda / k as f64;
    }
    out
}

fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}
