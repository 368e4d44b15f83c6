//! Rational approximations of `2*cos(arccos(x)/3)` and its `+4π/3` phase
//! shift, the two trigonometric forms needed by the three-real-roots branch
//! of the cubic solver.
//!
//! Both are cheap polynomial-ratio evaluations; no inverse cosine is ever
//! called. Central regions use Padé approximants about `x = 0`; near the
//! `arccos` branch points at `x = ±1` the Padé forms degrade, so Taylor
//! expansions about `x = -1` (in powers of `sqrt(x + 1)`) take over. The
//! residual error (≈1e-5 worst case at the branch seams) is absorbed by the
//! Newton polish applied to every cubic root afterwards.

const SQRT_3: f64 = 1.732_050_807_568_877_2;
const SQRT_6: f64 = 2.449_489_742_783_178;
/// sqrt(2/3)
const SQRT_2_3: f64 = 0.816_496_580_927_726;

/// `2*cos(arccos(x)/3)` for `x` in `[-1, 1]`.
///
/// Taylor expansion about `x = -1` below `-0.7681` (where the Padé form
/// breaks down), [6/6] Padé approximant about `x = 0` elsewhere.
/// Derivations:
/// <https://www.wolframalpha.com/input?i=pade+approximation+of+2+*+cos%28arccos%28x%29+%2F+3%29+at+x+%3D+0+of+order+%5B6%2F6%5D>
pub(crate) fn two_cos_arccos_third(x: f64) -> f64 {
    if x < -0.7681 {
        // More terms buy little here: each adds a multiply, and the sqrt
        // already dominates the cost.
        let x_diff = x + 1.0;
        let x_diff_sq = x_diff * x_diff;
        let x_diff_root = x_diff.sqrt();

        const C1: f64 = SQRT_2_3;
        const C2: f64 = -1.0 / 9.0;
        const C3: f64 = 5.0 / (54.0 * SQRT_6);
        const C4: f64 = -4.0 / 243.0;
        const C5: f64 = 77.0 / (3888.0 * SQRT_6);
        const C6: f64 = -28.0 / 6561.0;
        const C7: f64 = 2431.0 / (419904.0 * SQRT_6);
        const C8: f64 = -80.0 / 59049.0;

        return 1.0
            + C1 * x_diff_root
            + C2 * x_diff
            + C3 * x_diff * x_diff_root
            + C4 * x_diff_sq
            + C5 * x_diff_sq * x_diff_root
            + C6 * x_diff_sq * x_diff
            + C7 * x_diff_sq * x_diff * x_diff_root
            + C8 * x_diff_sq * x_diff_sq;
    }

    const T1: f64 = 6_367_150_827_790_091.0 / (1_500_694_954_217_744_832.0 * SQRT_3);
    const T2: f64 = 21_315_389_368_883_117.0 / 250_115_825_702_957_472.0;
    const T3: f64 = 9_617_895_791_423_501.0 / (6_947_661_825_082_152.0 * SQRT_3);
    const T4: f64 = 1_807_789_764_256_883.0 / 578_971_818_756_846.0;
    const T5: f64 = 432_592_647_843_845.0 / (42_886_801_389_396.0 * SQRT_3);
    const T6: f64 = 110_360_394_453_383.0 / 21_443_400_694_698.0;

    const B1: f64 = 1_599_678_636_998_003.0 / 4_502_084_862_653_234_496.0;
    const B2: f64 = 3_425_084_203_314_289.0 / (83_371_941_900_985_824.0 * SQRT_3);
    const B3: f64 = 6_169_664_756_291_261.0 / 20_842_985_475_246_456.0;
    const B4: f64 = 459_206_458_924_015.0 / (192_990_606_252_282.0 * SQRT_3);
    const B5: f64 = 370_932_051_927_533.0 / 128_660_404_168_188.0;
    const B6: f64 = 34_404_198_073_939.0 / (7_147_800_231_566.0 * SQRT_3);

    let x2 = x * x;
    let x3 = x2 * x;
    let x4 = x2 * x2;
    let x5 = x4 * x;
    let x6 = x3 * x3;

    (T1 * x6 + T2 * x5 + T3 * x4 + T4 * x3 + T5 * x2 + T6 * x + SQRT_3)
        / (B1 * x6 + B2 * x5 + B3 * x4 + B4 * x3 + B5 * x2 + B6 * x + 1.0)
}

/// `2*cos(arccos(x)/3 + 4π/3)` for `x` in `[-1, 1]`.
///
/// The function is odd, so `|x| > 0.818` reduces to the Taylor form about
/// `x = -1` via `f(x) = -f(-x)`; the central region uses an [8/8] Padé
/// approximant about `x = 0` (odd numerator, even denominator).
/// <https://www.wolframalpha.com/input?i=pade+approximation+of+2+*+cos%28arccos%28x%29+%2F+3%2B4pi%2F3%29+at+x+%3D+0+of+order+%5B8%2F8%5D>
pub(crate) fn two_cos_arccos_third_shifted(x: f64) -> f64 {
    if x < -0.818 {
        return shifted_near_minus_one(x);
    }
    if x > 0.818 {
        return -shifted_near_minus_one(-x);
    }

    const T1: f64 = 4544.0 / 98415.0;
    const T2: f64 = -4768.0 / 10935.0;
    const T3: f64 = 412.0 / 405.0;
    const T4: f64 = -2.0 / 3.0;

    const B1: f64 = 4864.0 / 2_657_205.0;
    const B2: f64 = -800.0 / 6561.0;
    const B3: f64 = 1016.0 / 1215.0;
    const B4: f64 = -226.0 / 135.0;

    let x2 = x * x;
    let x3 = x2 * x;
    let x4 = x2 * x2;
    let x5 = x2 * x3;
    let x6 = x4 * x2;
    let x7 = x4 * x3;
    let x8 = x4 * x4;

    (T1 * x7 + T2 * x5 + T3 * x3 + T4 * x) / (B1 * x8 + B2 * x6 + B3 * x4 + B4 * x2 + 1.0)
}

/// Order-3 Taylor expansion of the shifted form about `x = -1`.
/// <https://www.wolframalpha.com/input?i=taylor+approximation+of+2+*+cos%28arccos%28x%29+%2F+3%2B4pi%2F3%29+at+x+%3D+-1+of+order+3>
fn shifted_near_minus_one(x: f64) -> f64 {
    let x_diff = x + 1.0;
    let x_diff_sq = x_diff * x_diff;
    let x_diff_root = x_diff.sqrt();

    const C1: f64 = -SQRT_2_3;
    const C2: f64 = -1.0 / 9.0;
    const C3: f64 = -5.0 / (54.0 * SQRT_6);
    const C4: f64 = -4.0 / 243.0;
    const C5: f64 = -77.0 / (3888.0 * SQRT_6);
    const C6: f64 = -28.0 / 6561.0;

    1.0 + C1 * x_diff_root
        + C2 * x_diff
        + C3 * x_diff_root * x_diff
        + C4 * x_diff_sq
        + C5 * x_diff_sq * x_diff_root
        + C6 * x_diff_sq * x_diff
}
