//! Pairwise balance aggregation.
//!
//! Folds a group's ledger into a net owed amount per unordered member pair.
//! All arithmetic is exact integer cents; accumulation is checked, so a
//! ledger that would overflow the representable range reports
//! [`EngineError::ArithmeticOverflow`] instead of wrapping.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::{EngineError, GroupLedger, MoneyCents, ResultEngine};

/// Net balances at or above this magnitude are reportable; anything below is
/// a settled pair and is omitted. One minor unit: with integer cents the only
/// settled value is exactly zero.
pub const SETTLEMENT_THRESHOLD: MoneyCents = MoneyCents::new(1);

/// An unordered member pair in canonical (ascending id) order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberPair {
    first: Uuid,
    second: Uuid,
}

impl MemberPair {
    /// Builds the canonical pair for two distinct members.
    #[must_use]
    pub fn new(a: Uuid, b: Uuid) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    #[must_use]
    pub fn first(self) -> Uuid {
        self.first
    }

    #[must_use]
    pub fn second(self) -> Uuid {
        self.second
    }
}

/// Folds the ledger into signed pair balances.
///
/// Orientation: a positive value means `first` is owed by `second`; negative
/// means the reverse. Each expense contributes one directed debt per
/// non-payer participant (participant owes the payer their split), added
/// algebraically so debts in opposite directions cancel across expenses.
/// Settled pairs (|net| below [`SETTLEMENT_THRESHOLD`]) are dropped from the
/// result.
pub fn pair_balances(ledger: &GroupLedger) -> ResultEngine<BTreeMap<MemberPair, MoneyCents>> {
    let mut pairs: BTreeMap<MemberPair, MoneyCents> = BTreeMap::new();

    for record in ledger.expenses() {
        for split in &record.splits {
            if split.member_id == record.paid_by {
                continue;
            }

            let pair = MemberPair::new(split.member_id, record.paid_by);
            let entry = pairs.entry(pair).or_insert(MoneyCents::ZERO);
            let contribution = if pair.first == record.paid_by {
                split.amount
            } else {
                -split.amount
            };
            *entry = entry.checked_add(contribution).ok_or_else(|| {
                EngineError::ArithmeticOverflow("pair balance out of range".to_string())
            })?;
        }
    }

    pairs.retain(|_, net| net.abs() >= SETTLEMENT_THRESHOLD);
    Ok(pairs)
}
