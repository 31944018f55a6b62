//! The settlement engine of the shared-expense ledger.
//!
//! A group of members records expenses; each expense is paid by one member
//! and divided among a participant subset by a [`SplitPolicy`]. The engine
//! turns that stream of records into per-pair debts and per-member balance
//! views, with exact integer-cent arithmetic throughout: splits always sum
//! to their total, nets always conserve to zero, and repeated computation
//! over the same ledger is bit-identical.
//!
//! The engine is pure in-memory computation. Durability, identity and the
//! HTTP surface live in the surrounding crates.

pub use balances::{MemberPair, SETTLEMENT_THRESHOLD, pair_balances};
pub use error::EngineError;
pub use expense::{ExpenseRecord, Split};
pub use group::Group;
pub use ledger::GroupLedger;
pub use member::Member;
pub use money::MoneyCents;
pub use ops::Engine;
pub use split::{BASIS_POINTS_SCALE, SplitPolicy, WEIGHT_TOLERANCE_BP, compute_splits};
pub use views::{
    CounterpartyAmount, GroupBalances, GroupNet, MemberBalance, UserBalances, group_balances,
    user_balances,
};

mod balances;
mod error;
mod expense;
mod group;
mod ledger;
mod member;
mod money;
mod ops;
mod split;
mod views;

type ResultEngine<T> = Result<T, EngineError>;
