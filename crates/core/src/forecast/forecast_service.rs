//! Polynomial least-squares fitting and projection.
//!
//! Closes are encoded as (day offset from the first observation, close)
//! pairs and fitted by solving the normal equations with Gaussian
//! elimination. The system is tiny (degree at most 5, so at most 6x6),
//! which keeps the solve well inside f64 territory for the 30..~2500-bar
//! histories this sees.

use num_traits::ToPrimitive;

use krxtrack_market_data::History;

use super::{
    FitMetrics, ForecastError, ForecastPoint, TrendDirection, TrendLabel, TrendModel,
};

/// Minimum bars required to fit. Callers gate on this before invoking.
pub const MIN_OBSERVATIONS: usize = 30;

/// Highest supported polynomial degree.
pub const MAX_DEGREE: usize = 5;

/// Relative change at which a trend gets the "strong" qualifier.
const STRONG_THRESHOLD: f64 = 0.05;

/// Relative change below which a trend counts as neutral.
const NEUTRAL_THRESHOLD: f64 = 0.005;

/// Pivot threshold for the elimination.
const SINGULAR_EPS: f64 = 1e-12;

/// Fit a polynomial trend of the given degree to a history's closes.
pub fn fit(history: &History, degree: usize) -> Result<TrendModel, ForecastError> {
    if !(1..=MAX_DEGREE).contains(&degree) {
        return Err(ForecastError::InvalidDegree(degree));
    }
    if history.len() < MIN_OBSERVATIONS {
        return Err(ForecastError::NotEnoughData {
            required: MIN_OBSERVATIONS,
            actual: history.len(),
        });
    }

    let quotes = history.quotes();
    let first_ts = quotes[0].timestamp;

    let points: Vec<(f64, f64)> = quotes
        .iter()
        .map(|q| {
            let day = (q.timestamp - first_ts).num_days() as f64;
            let close = q.close.to_f64().unwrap_or(0.0);
            (day, close)
        })
        .collect();

    let coefficients = solve_least_squares(&points, degree)?;

    // In-sample residual metrics.
    let n = points.len() as f64;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    let mut abs_sum = 0.0;
    let mut residuals = Vec::with_capacity(points.len());
    for &(x, y) in &points {
        let fitted = eval(&coefficients, x);
        let r = y - fitted;
        residuals.push(r);
        ss_res += r * r;
        ss_tot += (y - mean_y) * (y - mean_y);
        abs_sum += r.abs();
    }

    let rmse = (ss_res / n).sqrt();
    let mae = abs_sum / n;
    let r_squared = if ss_tot > SINGULAR_EPS {
        1.0 - ss_res / ss_tot
    } else if ss_res < SINGULAR_EPS {
        1.0
    } else {
        0.0
    };

    let mean_r = residuals.iter().sum::<f64>() / n;
    let residual_std =
        (residuals.iter().map(|r| (r - mean_r) * (r - mean_r)).sum::<f64>() / n).sqrt();

    let last = &points[points.len() - 1];

    Ok(TrendModel {
        degree,
        coefficients,
        last_day_offset: last.0 as i64,
        last_observed_close: last.1,
        residual_std,
        metrics: FitMetrics {
            rmse,
            mae,
            r_squared,
        },
    })
}

/// Project the model forward.
///
/// Produces one point per consecutive integer day offset beyond the last
/// observed day, in chronological order, each with the constant-width
/// two-sigma band.
pub fn predict(model: &TrendModel, days_ahead: usize) -> Vec<ForecastPoint> {
    let band = 2.0 * model.residual_std;
    (1..=days_ahead as i64)
        .map(|step| {
            let day_offset = model.last_day_offset + step;
            let predicted = model.evaluate(day_offset as f64);
            ForecastPoint {
                day_offset,
                predicted,
                lower: predicted - band,
                upper: predicted + band,
            }
        })
        .collect()
}

/// Label the trend by comparing the final prediction to the last close.
pub fn trend_label(model: &TrendModel, forecast: &[ForecastPoint]) -> TrendLabel {
    let final_predicted = match forecast.last() {
        Some(point) => point.predicted,
        None => {
            return TrendLabel {
                direction: TrendDirection::Neutral,
                strong: false,
                relative_change: 0.0,
            }
        }
    };

    let relative_change = if model.last_observed_close.abs() > f64::EPSILON {
        (final_predicted - model.last_observed_close) / model.last_observed_close
    } else {
        0.0
    };

    let direction = if relative_change.abs() < NEUTRAL_THRESHOLD {
        TrendDirection::Neutral
    } else if relative_change > 0.0 {
        TrendDirection::Bullish
    } else {
        TrendDirection::Bearish
    };

    TrendLabel {
        direction,
        strong: direction != TrendDirection::Neutral
            && relative_change.abs() >= STRONG_THRESHOLD,
        relative_change,
    }
}

fn eval(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Solve the normal equations for a polynomial fit.
///
/// Builds the (degree+1)-square moment matrix and right-hand side, then
/// runs Gaussian elimination with partial pivoting.
fn solve_least_squares(points: &[(f64, f64)], degree: usize) -> Result<Vec<f64>, ForecastError> {
    let n = degree + 1;

    // Moment sums: x^0 .. x^(2*degree).
    let mut moments = vec![0.0; 2 * degree + 1];
    let mut rhs = vec![0.0; n];
    for &(x, y) in points {
        let mut power = 1.0;
        for (k, moment) in moments.iter_mut().enumerate() {
            *moment += power;
            if k < n {
                rhs[k] += power * y;
            }
            power *= x;
        }
    }

    let mut matrix: Vec<Vec<f64>> = (0..n)
        .map(|row| (0..n).map(|col| moments[row + col]).collect())
        .collect();

    // Forward elimination with partial pivoting.
    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&a, &b| {
                matrix[a][col]
                    .abs()
                    .partial_cmp(&matrix[b][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        if matrix[pivot_row][col].abs() < SINGULAR_EPS {
            return Err(ForecastError::SingularSystem);
        }
        matrix.swap(col, pivot_row);
        rhs.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = matrix[row][col] / matrix[col][col];
            for k in col..n {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    // Back substitution.
    let mut coefficients = vec![0.0; n];
    for row in (0..n).rev() {
        let mut sum = rhs[row];
        for col in (row + 1)..n {
            sum -= matrix[row][col] * coefficients[col];
        }
        coefficients[row] = sum / matrix[row][row];
    }

    Ok(coefficients)
}
