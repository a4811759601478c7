//! Liquidation: turns a period's jornadas into payslips.
//!
//! Jornadas are aggregated into hour buckets, each active concept's typed
//! strategy is evaluated against them, and per-employee line items roll up
//! into category totals. Base-dependent concepts (retirement, union dues)
//! run in a second pass once every earning line is final.

mod buckets;
mod engine;
mod strategy;

pub use buckets::{AbsenceCounts, HourBucketKind, HourBuckets};
pub use engine::{never_cancelled, LiquidationEngine};
pub use strategy::{ConceptStrategy, EarningsBase, EvaluationContext, StrategyOutcome};
