//! Fixed-iteration safeguarded Newton steps used to polish approximate
//! polynomial roots.
//!
//! The step is not the plain Newton ratio `f/f'`: following the bound from
//! <https://arxiv.org/pdf/2003.00372v1>, the move is scaled by
//! `A = max_j |p^(j)(x)| / j!`, which keeps steps bounded near inflection
//! points and multiple roots where `f'` vanishes. Callers apply a fixed
//! small number of steps (5 for cubics, 10 for quartics); there is no
//! adaptive convergence loop anywhere.

use core::f64::consts::FRAC_1_SQRT_2;

/// Derivative magnitude below which the quartic step switches to the
/// degenerate (vanishing first derivative) rule.
const DERIVATIVE_EPS: f64 = 1e-8;

/// One safeguarded step toward a root of `a*x^3 + b*x^2 + c*x + d`.
pub(crate) fn cubic_step(x: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    let x_sq = x * x;

    let function = x_sq * x * a + x_sq * b + x * c + d;
    let dir1 = 3.0 * x_sq * a + 2.0 * x * b + c;
    let dir2 = 6.0 * x * a + 2.0 * b;
    let dir3 = 6.0 * a;

    let bound = function
        .abs()
        .max(dir1.abs())
        .max(dir2.abs() / 2.0)
        .max(dir3.abs() / 6.0);

    // All coefficients are real, so the conjugate-pair correction of the
    // general rule collapses to this single move.
    x - function * dir1 / (9.0 * bound * bound)
}

/// One safeguarded step toward a root of
/// `a*x^4 + b*x^3 + c*x^2 + d*x + e`.
///
/// When the first derivative is healthy this is the same damped move as
/// [`cubic_step`]. When it vanishes, the step direction comes from the
/// lowest nonvanishing derivative among orders 2..4, with an angular
/// correction that depends on the parity of that order: an even order with
/// negative leading term means the nearest stationary structure lies
/// straight ahead on the real axis, while the remaining cases approximate
/// the real projection of a step toward a nearby complex-root pair.
pub(crate) fn quartic_step(x: f64, a: f64, b: f64, c: f64, d: f64, e: f64) -> f64 {
    let x_sq = x * x;

    let function = x_sq * x_sq * a + x_sq * x * b + x_sq * c + x * d + e;
    let dir1 = x_sq * x * a * 4.0 + x_sq * b * 3.0 + x * c * 2.0 + d;
    let dir2 = x_sq * a * 12.0 + x * b * 6.0 + c * 2.0;
    let dir3 = x * a * 24.0 + b * 6.0;
    let dir4 = a * 24.0;

    let bound = function
        .abs()
        .max(dir1.abs())
        .max(dir2.abs() / 2.0)
        .max(dir3.abs() / 6.0)
        .max(dir4.abs() / 24.0);

    if dir1.abs() > DERIVATIVE_EPS {
        return x - function * dir1 / (9.0 * bound * bound);
    }

    // First derivative vanished: pick the lowest-order derivative that did
    // not, together with its factorial normalization.
    let (order, dir_k, factorial) = if dir2.abs() > DERIVATIVE_EPS {
        (2u32, dir2, 2.0)
    } else if dir3.abs() > DERIVATIVE_EPS {
        (3u32, dir3, 6.0)
    } else if dir4.abs() > DERIVATIVE_EPS {
        (4u32, dir4, 24.0)
    } else {
        (1u32, function, 1.0)
    };

    let u = function * dir_k / factorial;
    let correction = 2.0 * u / (6.0 * bound * bound);

    if u < 0.0 && order % 2 == 0 {
        // u^(order-1) is negative: the move has angle zero.
        x + correction / 3.0
    } else {
        match order {
            1 => x - correction / 3.0,
            // A purely imaginary move; its real projection is no move at all.
            2 => x,
            3 => x + 0.5 * correction / 3.0,
            _ => x + FRAC_1_SQRT_2 * correction / 3.0,
        }
    }
}
