//! Modifier application and stacking penalties.
//!
//! [`apply_modifier`] folds one modifier into a value according to its
//! [`OperationCode`]. [`apply_modifier_with_stacking`] does the same for a
//! group of identical modifiers, scaling the i-th instance by
//! [`stacking_penalty`] when the modified attribute is stackable.

use super::constants::STACKING_PENALTY_DIVISOR;
use super::types::OperationCode;

/// Strength of the `index`-th (0-based) stacked instance.
///
/// `P(0) = 1.0`; later instances decay as `e^(-(i / 2.67)^2)`.
pub fn stacking_penalty(index: u32) -> f64 {
    let scaled = f64::from(index) / STACKING_PENALTY_DIVISOR;
    (-(scaled * scaled)).exp()
}

/// Apply a single modifier once.
///
/// `count` only matters for the count-based post operations, where the
/// per-application factor is raised to `count` with no penalty.
pub fn apply_modifier(base: f64, operation: OperationCode, value: f64, count: u32) -> f64 {
    let exponent = i32::try_from(count).unwrap_or(i32::MAX);
    match operation {
        OperationCode::PreAssign | OperationCode::PostAssign => value,
        OperationCode::PreMul => base * value,
        OperationCode::PreDiv => {
            if value == 0.0 {
                base
            } else {
                base / value
            }
        }
        OperationCode::ModAdd => base + value,
        OperationCode::PostMulCount => base * value.powi(exponent),
        OperationCode::PostDivCount => {
            if value == 0.0 {
                base
            } else {
                base / value.powi(exponent)
            }
        }
        OperationCode::PostPercentCount => base * (1.0 + value / 100.0).powi(exponent),
    }
}

/// Apply `count` instances of the same modifier, penalizing stackable ones.
///
/// Non-stackable groups and single instances delegate to
/// [`apply_modifier`]. Otherwise each instance is applied in turn with its
/// bonus scaled by [`stacking_penalty`].
pub fn apply_modifier_with_stacking(
    base: f64,
    operation: OperationCode,
    value: f64,
    count: u32,
    stackable: bool,
) -> f64 {
    if !stackable || count <= 1 {
        return apply_modifier(base, operation, value, count);
    }

    match operation {
        OperationCode::PostMulCount => stack_multiplier(base, value, count),
        OperationCode::PostDivCount => {
            if value == 0.0 {
                base
            } else {
                stack_multiplier(base, 1.0 / value, count)
            }
        }
        OperationCode::PostPercentCount => (0..count).fold(base, |acc, index| {
            acc * (1.0 + (value / 100.0) * stacking_penalty(index))
        }),
        _ => apply_modifier(base, operation, value, count),
    }
}

fn stack_multiplier(base: f64, multiplier: f64, count: u32) -> f64 {
    (0..count).fold(base, |acc, index| {
        acc * (1.0 + (multiplier - 1.0) * stacking_penalty(index))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_OPERATIONS: [OperationCode; 8] = [
        OperationCode::PreAssign,
        OperationCode::PreMul,
        OperationCode::PreDiv,
        OperationCode::ModAdd,
        OperationCode::PostMulCount,
        OperationCode::PostDivCount,
        OperationCode::PostPercentCount,
        OperationCode::PostAssign,
    ];

    #[test]
    fn penalty_curve_matches_reference_values() {
        assert_eq!(stacking_penalty(0), 1.0);
        let expected = [0.869, 0.571, 0.283, 0.106, 0.030];
        for (index, want) in expected.iter().enumerate() {
            let got = stacking_penalty(index as u32 + 1);
            assert!((got - want).abs() < 1e-3, "P({}) = {got}", index + 1);
        }
    }

    #[test]
    fn penalty_curve_is_strictly_decreasing() {
        for index in 0..10 {
            assert!(stacking_penalty(index + 1) < stacking_penalty(index));
        }
    }

    #[test]
    fn operation_semantics() {
        assert_eq!(apply_modifier(100.0, OperationCode::PreAssign, 7.0, 1), 7.0);
        assert_eq!(apply_modifier(100.0, OperationCode::PostAssign, 7.0, 3), 7.0);
        assert_eq!(apply_modifier(100.0, OperationCode::PreMul, 1.5, 1), 150.0);
        assert_eq!(apply_modifier(100.0, OperationCode::PreDiv, 4.0, 1), 25.0);
        assert_eq!(apply_modifier(100.0, OperationCode::ModAdd, 5.0, 1), 105.0);
        assert_eq!(apply_modifier(100.0, OperationCode::PostMulCount, 2.0, 3), 800.0);
        assert_eq!(apply_modifier(800.0, OperationCode::PostDivCount, 2.0, 3), 100.0);

        let percent = apply_modifier(100.0, OperationCode::PostPercentCount, 10.0, 2);
        assert!((percent - 121.0).abs() < 1e-9);
    }

    #[test]
    fn division_by_zero_is_a_no_op() {
        assert_eq!(apply_modifier(42.0, OperationCode::PreDiv, 0.0, 1), 42.0);
        assert_eq!(apply_modifier(42.0, OperationCode::PostDivCount, 0.0, 2), 42.0);
        assert_eq!(
            apply_modifier_with_stacking(42.0, OperationCode::PostDivCount, 0.0, 3, true),
            42.0
        );
    }

    #[test]
    fn non_count_operations_ignore_count() {
        assert_eq!(apply_modifier(100.0, OperationCode::ModAdd, 5.0, 4), 105.0);
        assert_eq!(apply_modifier(100.0, OperationCode::PreMul, 2.0, 4), 200.0);
    }

    #[test]
    fn single_instance_matches_plain_application() {
        for operation in ALL_OPERATIONS {
            let plain = apply_modifier(250.0, operation, 1.2, 1);
            assert_eq!(
                apply_modifier_with_stacking(250.0, operation, 1.2, 1, true),
                plain
            );
            assert_eq!(
                apply_modifier_with_stacking(250.0, operation, 1.2, 1, false),
                plain
            );
        }
    }

    #[test]
    fn non_stackable_groups_multiply_naively() {
        for count in 1..=6 {
            let naive = 1000.0 * 1.175f64.powi(count as i32);
            let got = apply_modifier_with_stacking(
                1000.0,
                OperationCode::PostMulCount,
                1.175,
                count,
                false,
            );
            assert_eq!(got, naive);
        }
    }

    #[test]
    fn stacked_multipliers_apply_penalties_in_order() {
        let got = apply_modifier_with_stacking(1000.0, OperationCode::PostMulCount, 1.2, 2, true);
        let expected = 1000.0 * 1.2 * (1.0 + 0.2 * stacking_penalty(1));
        assert!((got - expected).abs() < 1e-9);
    }

    #[test]
    fn stacked_percentages_apply_penalties_in_order() {
        let got =
            apply_modifier_with_stacking(1000.0, OperationCode::PostPercentCount, 15.0, 3, true);
        let expected = 1000.0
            * 1.15
            * (1.0 + 0.15 * stacking_penalty(1))
            * (1.0 + 0.15 * stacking_penalty(2));
        assert!((got - expected).abs() < 1e-9);
    }

    #[test]
    fn each_additional_stacked_unit_contributes_less() {
        for operation in [OperationCode::PostMulCount, OperationCode::PostPercentCount] {
            let value = if operation == OperationCode::PostMulCount {
                1.175
            } else {
                17.5
            };
            let mut previous_total = 1000.0;
            let mut previous_factor = f64::INFINITY;
            for count in 1..=6 {
                let total = apply_modifier_with_stacking(1000.0, operation, value, count, true);
                let factor = total / previous_total;
                assert!(factor > 1.0);
                assert!(factor < previous_factor, "unit {count} scaled by {factor}");
                previous_total = total;
                previous_factor = factor;
            }
        }
    }

    #[test]
    fn stacked_reductions_shrink_less_each_unit() {
        let operation = OperationCode::PostPercentCount;
        let reduce = |count| apply_modifier_with_stacking(10.0, operation, -10.0, count, true);
        let (one, two, three) = (reduce(1), reduce(2), reduce(3));
        assert!((10.0 - one) > (one - two));
        assert!((one - two) > (two - three));
    }
}
