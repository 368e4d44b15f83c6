//! Real-root extraction for degree 2, 3 and 4 polynomials.
//!
//! Complex roots are never reported: a complex-only polynomial yields an
//! empty vec. Each solver degrades to the next lower degree when its leading
//! coefficient is (numerically) zero, and every closed-form root is polished
//! with a fixed number of safeguarded Newton steps before being returned.
//! Returned roots carry no ordering guarantee and may contain duplicates.

use crate::roots::polish::{cubic_step, quartic_step};
use crate::roots::trig::{two_cos_arccos_third, two_cos_arccos_third_shifted};

/// Discriminants in `[MIN_ZERO, 0]` are treated as zero, admitting true
/// double roots that rounding pushed slightly negative. Widening this band
/// starts reporting phantom roots for genuinely complex pairs; see the
/// quadratic tests before touching it.
const MIN_ZERO: f64 = -1e-11;

/// Below this magnitude a cubic's leading coefficient is considered zero.
const CUBIC_LEADING_EPS: f64 = 1e-8;

/// Polish iterations stop early once the residual is this small.
const RESIDUAL_TARGET: f64 = 1e-8;

const CUBIC_POLISH_STEPS: usize = 5;
const QUARTIC_POLISH_STEPS: usize = 10;

/// Real roots of `a*x^2 + b*x + c = 0`.
///
/// With `a == 0` the equation is linear: one root `-c/b`, or no roots at
/// all when `b` is also zero. A discriminant within [`MIN_ZERO`] of zero
/// counts as a double root.
pub fn real_roots_quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    if a == 0.0 {
        if b == 0.0 {
            return Vec::new();
        }
        return vec![-c / b];
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant > 0.0 {
        let root = discriminant.sqrt();
        vec![(-b + root) / (2.0 * a), (-b - root) / (2.0 * a)]
    } else if discriminant >= MIN_ZERO {
        vec![-b / (2.0 * a)]
    } else {
        Vec::new()
    }
}

/// Real roots of `a*x^3 + b*x^2 + c*x + d = 0`.
///
/// Cardano's method on the depressed cubic. A positive discriminant has one
/// real root (radical form); a vanishing one has a simple and a double root;
/// a negative one (casus irreducibilis) has three distinct real roots,
/// obtained through the trigonometric substitution with the rational
/// approximations from [`trig`](crate::roots::trig) instead of a direct
/// inverse cosine. All roots get [`CUBIC_POLISH_STEPS`] Newton steps.
pub fn real_roots_cubic(a: f64, b: f64, c: f64, d: f64) -> Vec<f64> {
    if a.abs() <= CUBIC_LEADING_EPS {
        return real_roots_quadratic(b, c, d);
    }

    // https://proofwiki.org/wiki/Cardano%27s_Formula
    let q = (3.0 * a * c - b * b) / (9.0 * a * a);
    let r = (9.0 * a * b * c - 27.0 * a * a * d - 2.0 * b * b * b) / (54.0 * a * a * a);

    let discriminant = q * q * q + r * r;
    let mut roots = if discriminant > 0.0 {
        let inner = discriminant.sqrt();
        let s = libm::cbrt(r + inner);
        let t = libm::cbrt(r - inner);
        vec![s + t - b / (3.0 * a)]
    } else if discriminant >= MIN_ZERO {
        let s = libm::cbrt(r);
        vec![2.0 * s - b / (3.0 * a), -s - b / (3.0 * a)]
    } else {
        // https://proofwiki.org/wiki/Cardano%27s_Formula/Trigonometric_Form
        let sq_q = safe_sqrt(-q);
        let ratio = r / safe_sqrt(-(q * q * q));
        let offset = -b / (3.0 * a);

        // The -2pi/3 phase comes from the identity
        // cos(arccos(x)/3 + 2pi/3) = -cos(arccos(-x)/3).
        vec![
            sq_q * two_cos_arccos_third(ratio) + offset,
            -sq_q * two_cos_arccos_third(-ratio) + offset,
            sq_q * two_cos_arccos_third_shifted(ratio) + offset,
        ]
    };

    for root in &mut roots {
        for _ in 0..CUBIC_POLISH_STEPS {
            *root = cubic_step(*root, a, b, c, d);
        }
    }

    roots
}

/// Real roots of `a*x^4 + b*x^3 + c*x^2 + d*x + e = 0`.
///
/// Modified NBS method (<https://quarticequations.com/Quartic2.pdf>): the
/// largest real root of the resolvent cubic splits the normalized quartic
/// into two real quadratic factors, each admitting zero or two roots under
/// the same relaxed discriminant band as [`real_roots_quadratic`], so this
/// path never yields an odd root count. Candidates get up to
/// [`QUARTIC_POLISH_STEPS`] Newton steps with an early exit once the
/// residual falls below [`RESIDUAL_TARGET`].
pub fn real_roots_quartic(a: f64, b: f64, c: f64, d: f64, e: f64) -> Vec<f64> {
    if a == 0.0 {
        return real_roots_cubic(b, c, d, e);
    }

    let a3 = b / a;
    let a2 = c / a;
    let a1 = d / a;
    let a0 = e / a;

    let u = largest_resolvent_root(
        -a2,
        a1 * a3 - 4.0 * a0,
        4.0 * a0 * a2 - a1 * a1 - a0 * a3 * a3,
    );

    // Algebraically these radicands are non-negative; rounding can push
    // them below zero, hence safe_sqrt.
    let p_sub = safe_sqrt(a3 * a3 / 4.0 + u - a2);
    let p1 = a3 / 2.0 - p_sub;
    let p2 = a3 / 2.0 + p_sub;

    let q_sign = if a1 - a3 * u / 2.0 > 0.0 { 1.0 } else { -1.0 };
    let q_sub = safe_sqrt(u * u / 4.0 - a0);
    let q1 = u / 2.0 + q_sign * q_sub;
    let q2 = u / 2.0 - q_sign * q_sub;

    let inner1 = p1 * p1 / 4.0 - q1;
    let inner2 = p2 * p2 / 4.0 - q2;

    let mut roots = Vec::with_capacity(4);
    if inner1 >= MIN_ZERO {
        let root = safe_sqrt(inner1);
        roots.push(-p1 / 2.0 + root);
        roots.push(-p1 / 2.0 - root);
    }
    if inner2 >= MIN_ZERO {
        let root = safe_sqrt(inner2);
        roots.push(-p2 / 2.0 + root);
        roots.push(-p2 / 2.0 - root);
    }

    for root in &mut roots {
        for _ in 0..QUARTIC_POLISH_STEPS {
            let x = *root;
            let x2 = x * x;
            let residual = a * x2 * x2 + b * x2 * x + c * x2 + d * x + e;
            if residual.abs() < RESIDUAL_TARGET {
                break;
            }
            *root = quartic_step(x, a, b, c, d, e);
        }
    }

    roots
}

/// Largest real root of the monic resolvent cubic `x^3 + b*x^2 + c*x + d`.
/// A monic cubic always has at least one real root, so the fold never sees
/// an empty set.
fn largest_resolvent_root(b: f64, c: f64, d: f64) -> f64 {
    real_roots_cubic(1.0, b, c, d)
        .into_iter()
        .fold(f64::NEG_INFINITY, f64::max)
}

#[inline]
fn safe_sqrt(value: f64) -> f64 {
    if value <= 0.0 { 0.0 } else { value.sqrt() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_contains(roots: &[f64], expected: f64, tolerance: f64) {
        assert!(
            roots.iter().any(|r| (r - expected).abs() <= tolerance),
            "expected a root near {expected} within {tolerance}, got {roots:?}"
        );
    }

    fn eval_cubic(x: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
        a * x * x * x + b * x * x + c * x + d
    }

    fn eval_quartic(x: f64, a: f64, b: f64, c: f64, d: f64, e: f64) -> f64 {
        a * x * x * x * x + b * x * x * x + c * x * x + d * x + e
    }

    #[test]
    fn quadratic_two_distinct_roots() {
        let roots = real_roots_quadratic(1.0, 5.0, 4.0);
        assert_eq!(roots.len(), 2);
        assert_contains(&roots, -1.0, 1e-8);
        assert_contains(&roots, -4.0, 1e-8);
    }

    #[test]
    fn quadratic_double_root() {
        let roots = real_roots_quadratic(1.0, 2.0, 1.0);
        assert_eq!(roots, vec![-1.0]);
    }

    #[test]
    fn quadratic_complex_pair_dropped() {
        assert!(real_roots_quadratic(1.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn quadratic_degrades_to_linear() {
        let roots = real_roots_quadratic(0.0, 5.0, 4.0);
        assert_eq!(roots.len(), 1);
        assert_contains(&roots, -0.8, 1e-8);
    }

    #[test]
    fn quadratic_degenerate_linear_is_empty() {
        assert!(real_roots_quadratic(0.0, 0.0, 4.0).is_empty());
    }

    #[test]
    fn quadratic_mixed_signs() {
        let roots = real_roots_quadratic(2.0, 1.0, -1.0);
        assert_eq!(roots.len(), 2);
        assert_contains(&roots, -1.0, 1e-8);
        assert_contains(&roots, 0.5, 1e-8);

        let roots = real_roots_quadratic(-2.0, 0.0, 8.0);
        assert_eq!(roots.len(), 2);
        assert_contains(&roots, -2.0, 1e-8);
        assert_contains(&roots, 2.0, 1e-8);
    }

    #[test]
    fn cubic_three_distinct_roots() {
        // (x - 1)(x - 2)(x - 3)
        let roots = real_roots_cubic(1.0, -6.0, 11.0, -6.0);
        assert_eq!(roots.len(), 3);
        assert_contains(&roots, 1.0, 1e-8);
        assert_contains(&roots, 2.0, 1e-8);
        assert_contains(&roots, 3.0, 1e-8);
    }

    #[test]
    fn cubic_single_real_root() {
        // x^3 - 8: one real root, one complex pair.
        let roots = real_roots_cubic(1.0, 0.0, 0.0, -8.0);
        assert_eq!(roots.len(), 1);
        assert_contains(&roots, 2.0, 1e-8);
    }

    #[test]
    fn cubic_double_root() {
        // (x - 1)(x - 2)^2: vanishing discriminant path.
        let roots = real_roots_cubic(1.0, -5.0, 8.0, -4.0);
        assert_eq!(roots.len(), 2);
        assert_contains(&roots, 1.0, 1e-7);
        assert_contains(&roots, 2.0, 1e-7);
    }

    #[test]
    fn cubic_degrades_to_quadratic() {
        let roots = real_roots_cubic(0.0, 1.0, 5.0, 4.0);
        assert_eq!(roots.len(), 2);
        assert_contains(&roots, -1.0, 1e-8);
        assert_contains(&roots, -4.0, 1e-8);

        // Leading coefficients at or below the epsilon degrade as well.
        let roots = real_roots_cubic(1e-9, 1.0, 5.0, 4.0);
        assert_eq!(roots.len(), 2);
    }

    #[test]
    fn cubic_residuals_are_small() {
        let cases = [
            (1.0, -6.0, 11.0, -6.0),
            (1.0, 0.0, 0.0, -8.0),
            (2.0, 3.0, -11.0, -6.0),
            (-1.0, 4.0, 1.0, -4.0),
        ];
        for (a, b, c, d) in cases {
            for root in real_roots_cubic(a, b, c, d) {
                let residual = eval_cubic(root, a, b, c, d).abs();
                assert!(residual < 1e-7, "residual {residual} for ({a},{b},{c},{d})");
            }
        }
    }

    #[test]
    fn quartic_four_real_roots() {
        // (x + 1)(x + 2)(x + 3)(x + 4)
        let roots = real_roots_quartic(1.0, 10.0, 35.0, 50.0, 24.0);
        assert_eq!(roots.len(), 4);
        assert_contains(&roots, -1.0, 1e-8);
        assert_contains(&roots, -2.0, 1e-8);
        assert_contains(&roots, -3.0, 1e-8);
        assert_contains(&roots, -4.0, 1e-8);
    }

    #[test]
    fn quartic_two_real_roots() {
        // x^4 - 1: real roots at +-1, complex pair dropped.
        let roots = real_roots_quartic(1.0, 0.0, 0.0, 0.0, -1.0);
        assert_eq!(roots.len(), 2);
        assert_contains(&roots, 1.0, 1e-8);
        assert_contains(&roots, -1.0, 1e-8);
    }

    #[test]
    fn quartic_complex_only_is_empty() {
        // x^4 + 1 has no real roots.
        assert!(real_roots_quartic(1.0, 0.0, 0.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn quartic_degrades_to_cubic() {
        let roots = real_roots_quartic(0.0, 1.0, -6.0, 11.0, -6.0);
        assert_eq!(roots.len(), 3);
        assert_contains(&roots, 1.0, 1e-8);
    }

    #[test]
    fn quartic_never_returns_odd_count() {
        let cases = [
            (1.0, 10.0, 35.0, 50.0, 24.0),
            (1.0, 0.0, 0.0, 0.0, -1.0),
            (1.0, 0.0, 0.0, 0.0, 1.0),
            (1.0, -2.0, -5.0, 6.0, 0.0),
            (3.0, 1.0, -7.0, 2.0, 0.5),
        ];
        for (a, b, c, d, e) in cases {
            let count = real_roots_quartic(a, b, c, d, e).len();
            assert_eq!(count % 2, 0, "odd root count for ({a},{b},{c},{d},{e})");
        }
    }

    #[test]
    fn quartic_residuals_scale_aware() {
        // The fixed polish budget leaves residuals proportional to the
        // coefficient scale, so the bound is relative, not absolute.
        let cases = [
            (1.0, -7.0, 5.0, 31.0, -30.0),
            (2.0, 0.0, -26.0, 0.0, 72.0),
            (-1.5, 4.0, 20.0, -3.0, -9.0),
        ];
        for (a, b, c, d, e) in cases {
            let scale = [a, b, c, d, e].iter().fold(1.0f64, |m, v: &f64| m.max(v.abs()));
            for root in real_roots_quartic(a, b, c, d, e) {
                let residual = eval_quartic(root, a, b, c, d, e).abs();
                assert!(
                    residual < 1e-5 * scale,
                    "residual {residual} for ({a},{b},{c},{d},{e})"
                );
            }
        }
    }

    #[test]
    fn quartic_double_roots_admitted_by_relaxed_band() {
        // (x^2 - 2)^2: two double roots at +-sqrt(2).
        let roots = real_roots_quartic(1.0, 0.0, -4.0, 0.0, 4.0);
        assert!(!roots.is_empty());
        for root in &roots {
            assert!(
                (root.abs() - core::f64::consts::SQRT_2).abs() < 1e-5,
                "unexpected root {root}"
            );
        }
    }
}
