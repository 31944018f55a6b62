//! Split policies and the split calculator.
//!
//! An expense total is divided among its participants according to a
//! [`SplitPolicy`]. Whatever the policy, the computed sub-amounts sum
//! **exactly** to the total: every leftover cent is assigned to a specific
//! participant by a fixed deterministic rule, never dropped and never
//! distributed at random.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents};

/// Scale of percentage weights: 10_000 basis points = 100%.
pub const BASIS_POINTS_SCALE: u32 = 10_000;

/// Accepted deviation of a weight sum from 100%, in basis points (0.01%).
pub const WEIGHT_TOLERANCE_BP: u32 = 1;

/// How an expense total is divided among its participants.
///
/// This is a closed variant: the dynamic payload arriving at the API boundary
/// is converted into it exactly once, so no downstream code branches on
/// ad-hoc fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitPolicy {
    /// Every participant owes the same share; leftover cents go to the
    /// participants with the smallest ids.
    Equal,
    /// Participants owe according to per-member weights in basis points
    /// (10_000 = 100%). Weights must cover exactly the participant set and
    /// sum to 100% within [`WEIGHT_TOLERANCE_BP`].
    Percentage(BTreeMap<Uuid, u32>),
}

impl SplitPolicy {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Percentage(_) => "percentage",
        }
    }
}

/// Divides `total` among `participants` according to `policy`.
///
/// Returns the owed amount per participant, summing exactly to `total`.
/// The result is bit-identical for identical input.
///
/// Errors with [`EngineError::InvalidSplit`] on an empty or duplicated
/// participant list, a non-positive total, or percentage weights that do not
/// match the participant set or miss 100% beyond tolerance.
pub fn compute_splits(
    total: MoneyCents,
    policy: &SplitPolicy,
    participants: &[Uuid],
) -> Result<BTreeMap<Uuid, MoneyCents>, EngineError> {
    if participants.is_empty() {
        return Err(EngineError::InvalidSplit(
            "at least one participant required".to_string(),
        ));
    }

    let ordered: BTreeSet<Uuid> = participants.iter().copied().collect();
    if ordered.len() != participants.len() {
        return Err(EngineError::InvalidSplit(
            "duplicate participant".to_string(),
        ));
    }

    if !total.is_positive() {
        return Err(EngineError::InvalidSplit(
            "total must be positive".to_string(),
        ));
    }

    match policy {
        SplitPolicy::Equal => Ok(equal_splits(total, &ordered)),
        SplitPolicy::Percentage(weights) => percentage_splits(total, weights, &ordered),
    }
}

/// Floor division plus one extra cent for the first `remainder` participants
/// in ascending-id order.
fn equal_splits(total: MoneyCents, ordered: &BTreeSet<Uuid>) -> BTreeMap<Uuid, MoneyCents> {
    let n = ordered.len() as i64;
    let base = total.cents() / n;
    let remainder = total.cents() - base * n;

    ordered
        .iter()
        .enumerate()
        .map(|(index, id)| {
            let extra = i64::from((index as i64) < remainder);
            (*id, MoneyCents::new(base + extra))
        })
        .collect()
}

/// Largest-remainder allocation.
///
/// Each participant gets `floor(total * weight / weight_sum)`; the leftover
/// cents (strictly fewer than the participant count) go one at a time to the
/// largest fractional remainders, ties broken by ascending id. Dividing by
/// the actual weight sum rather than the nominal 100% keeps the allocation
/// exact for any sum inside the tolerance window.
fn percentage_splits(
    total: MoneyCents,
    weights: &BTreeMap<Uuid, u32>,
    ordered: &BTreeSet<Uuid>,
) -> Result<BTreeMap<Uuid, MoneyCents>, EngineError> {
    if weights.len() != ordered.len() {
        return Err(EngineError::InvalidSplit(
            "weights must cover exactly the participant set".to_string(),
        ));
    }

    let mut weight_sum: u64 = 0;
    for id in ordered {
        let weight = weights.get(id).ok_or_else(|| {
            EngineError::InvalidSplit(format!("missing percentage weight for member {id}"))
        })?;
        weight_sum += u64::from(*weight);
    }

    let nominal = u64::from(BASIS_POINTS_SCALE);
    let tolerance = u64::from(WEIGHT_TOLERANCE_BP);
    if weight_sum.abs_diff(nominal) > tolerance {
        return Err(EngineError::InvalidSplit(format!(
            "percentage weights sum to {weight_sum} bp, expected {nominal} bp ± {tolerance}"
        )));
    }

    let den = i128::from(weight_sum);
    let mut shares: BTreeMap<Uuid, i64> = BTreeMap::new();
    let mut fractions: Vec<(i128, Uuid)> = Vec::with_capacity(ordered.len());
    let mut allocated: i64 = 0;

    for id in ordered {
        let raw = i128::from(total.cents()) * i128::from(weights[id]);
        // floor <= total for every weight <= weight_sum, so this cannot
        // leave the i64 range.
        let share = (raw / den) as i64;
        fractions.push((raw % den, *id));
        shares.insert(*id, share);
        allocated += share;
    }

    let mut leftover = total.cents() - allocated;
    debug_assert!(leftover >= 0 && leftover < ordered.len() as i64);

    fractions.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for (_, id) in fractions {
        if leftover == 0 {
            break;
        }
        if let Some(share) = shares.get_mut(&id) {
            *share += 1;
            leftover -= 1;
        }
    }

    Ok(shares
        .into_iter()
        .map(|(id, cents)| (id, MoneyCents::new(cents)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = (0..n).map(|_| Uuid::new_v4()).collect();
        ids.sort();
        ids
    }

    fn sum(splits: &BTreeMap<Uuid, MoneyCents>) -> i64 {
        splits.values().map(|m| m.cents()).sum()
    }

    #[test]
    fn equal_split_is_exact() {
        let members = ids(3);
        let splits = compute_splits(MoneyCents::new(10_000), &SplitPolicy::Equal, &members).unwrap();

        assert_eq!(sum(&splits), 10_000);
        // $100.00 / 3: the smallest id gets the leftover cent.
        assert_eq!(splits[&members[0]].cents(), 3334);
        assert_eq!(splits[&members[1]].cents(), 3333);
        assert_eq!(splits[&members[2]].cents(), 3333);
    }

    #[test]
    fn equal_split_without_remainder() {
        let members = ids(4);
        let splits = compute_splits(MoneyCents::new(2000), &SplitPolicy::Equal, &members).unwrap();

        assert!(splits.values().all(|m| m.cents() == 500));
    }

    #[test]
    fn equal_split_remainder_ignores_input_order() {
        let members = ids(3);
        let shuffled = vec![members[2], members[0], members[1]];

        let a = compute_splits(MoneyCents::new(10_000), &SplitPolicy::Equal, &members).unwrap();
        let b = compute_splits(MoneyCents::new(10_000), &SplitPolicy::Equal, &shuffled).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn percentage_split_is_exact() {
        let members = ids(3);
        let weights: BTreeMap<Uuid, u32> =
            [(members[0], 3333), (members[1], 3333), (members[2], 3334)]
                .into_iter()
                .collect();

        let splits = compute_splits(
            MoneyCents::new(5000),
            &SplitPolicy::Percentage(weights),
            &members,
        )
        .unwrap();

        assert_eq!(sum(&splits), 5000);
    }

    #[test]
    fn percentage_leftover_goes_to_largest_remainder() {
        let members = ids(2);
        let weights: BTreeMap<Uuid, u32> = [(members[0], 4999), (members[1], 5001)]
            .into_iter()
            .collect();

        // $0.99: floors are 49 and 49, remainders 4901 and 5099.
        let splits = compute_splits(
            MoneyCents::new(99),
            &SplitPolicy::Percentage(weights),
            &members,
        )
        .unwrap();

        assert_eq!(splits[&members[0]].cents(), 49);
        assert_eq!(splits[&members[1]].cents(), 50);
    }

    #[test]
    fn percentage_remainder_tie_breaks_by_ascending_id() {
        let members = ids(2);
        let weights: BTreeMap<Uuid, u32> = [(members[0], 5000), (members[1], 5000)]
            .into_iter()
            .collect();

        // $0.01: both remainders are 5000; the smaller id wins the cent.
        let splits = compute_splits(
            MoneyCents::new(1),
            &SplitPolicy::Percentage(weights),
            &members,
        )
        .unwrap();

        assert_eq!(splits[&members[0]].cents(), 1);
        assert_eq!(splits[&members[1]].cents(), 0);
    }

    #[test]
    fn percentage_outside_tolerance_is_rejected() {
        let members = ids(2);
        // 99.5% total.
        let weights: BTreeMap<Uuid, u32> = [(members[0], 4975), (members[1], 4975)]
            .into_iter()
            .collect();

        let err = compute_splits(
            MoneyCents::new(1000),
            &SplitPolicy::Percentage(weights),
            &members,
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::InvalidSplit(_)));
    }

    #[test]
    fn percentage_within_tolerance_is_accepted() {
        let members = ids(2);
        // 99.99% — inside the 0.01% window.
        let weights: BTreeMap<Uuid, u32> = [(members[0], 4999), (members[1], 5000)]
            .into_iter()
            .collect();

        let splits = compute_splits(
            MoneyCents::new(1000),
            &SplitPolicy::Percentage(weights),
            &members,
        )
        .unwrap();

        assert_eq!(sum(&splits), 1000);
    }

    #[test]
    fn rejects_empty_participants() {
        let err = compute_splits(MoneyCents::new(1000), &SplitPolicy::Equal, &[]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSplit(_)));
    }

    #[test]
    fn rejects_duplicate_participants() {
        let id = Uuid::new_v4();
        let err =
            compute_splits(MoneyCents::new(1000), &SplitPolicy::Equal, &[id, id]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSplit(_)));
    }

    #[test]
    fn rejects_non_positive_total() {
        let members = ids(2);
        for cents in [0, -100] {
            let err =
                compute_splits(MoneyCents::new(cents), &SplitPolicy::Equal, &members).unwrap_err();
            assert!(matches!(err, EngineError::InvalidSplit(_)));
        }
    }

    #[test]
    fn rejects_weight_for_non_participant() {
        let members = ids(2);
        let stranger = Uuid::new_v4();
        let weights: BTreeMap<Uuid, u32> = [
            (members[0], 5000),
            (members[1], 4000),
            (stranger, 1000),
        ]
        .into_iter()
        .collect();

        let err = compute_splits(
            MoneyCents::new(1000),
            &SplitPolicy::Percentage(weights),
            &members,
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::InvalidSplit(_)));
    }

    #[test]
    fn rejects_missing_weight() {
        let members = ids(2);
        let weights: BTreeMap<Uuid, u32> = [(members[0], 10_000)].into_iter().collect();

        let err = compute_splits(
            MoneyCents::new(1000),
            &SplitPolicy::Percentage(weights),
            &members,
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::InvalidSplit(_)));
    }
}
