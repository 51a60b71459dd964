// ALICE-CDO — Carry-forward tranche distribution arithmetic
// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Moroya Sakamoto

use crate::fnv1a;

// ── Types ──────────────────────────────────────────────────────────────

/// Result of planning one lazy allocation pass.
///
/// A pass assigns the pool's unallocated ledger value first to the senior
/// tranche (up to its remaining target) and then to the mezzanine tranche.
/// Planning is pure; the pool applies the increments only once the whole
/// withdrawal is known to succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationPass {
    /// Unallocated value presented to the pass.
    pub unallocated: u64,
    /// Total assigned to the senior tranche.
    pub senior_allocated: u64,
    /// Total assigned to the mezzanine tranche.
    pub mezzanine_allocated: u64,
    /// Per-token senior increments, in senior token order.
    pub senior_increments: Vec<u64>,
    /// Per-token mezzanine increments, in mezzanine token order.
    pub mezzanine_increments: Vec<u64>,
    /// Deterministic content hash.
    pub content_hash: u64,
}

impl AllocationPass {
    /// True if the pass assigns nothing.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.senior_allocated == 0 && self.mezzanine_allocated == 0
    }
}

// ── Arithmetic ─────────────────────────────────────────────────────────

/// Fixed senior target: `expected_total_inflow * num / den`, truncating
/// toward zero.
///
/// The truncated remainder is never rounded back in; it folds into the
/// mezzanine share over time, since mezzanine only receives what the
/// senior class does not claim. The product is widened through `u128` so
/// large inflows cannot overflow.
#[inline]
pub fn expected_senior_payout(expected_total_inflow: u64, num: u64, den: u64) -> u64 {
    ((expected_total_inflow as u128 * num as u128) / den as u128) as u64
}

/// Split `amount` across `recipients` with running remainder tracking.
///
/// Each recipient takes `left / recipients_remaining`, which is then
/// subtracted from the running amount before the next division. The divisor
/// is never recomputed against the original amount, so every truncation
/// remainder is carried forward into later cuts and the increments sum to
/// `amount` exactly. No two increments differ by more than one unit.
pub fn distribute_with_carry(amount: u64, recipients: usize) -> Vec<u64> {
    let mut increments = Vec::with_capacity(recipients);
    let mut left = amount;
    for i in 0..recipients {
        let cut = left / (recipients - i) as u64;
        left -= cut;
        increments.push(cut);
    }
    increments
}

/// Plan one waterfall pass over `unallocated` value.
///
/// The senior tranche takes `min(remaining_senior, unallocated)`; the
/// mezzanine tranche takes whatever is left. Both shares are split with
/// [`distribute_with_carry`], so nothing is lost to truncation.
pub fn plan_allocation(
    unallocated: u64,
    remaining_senior: u64,
    senior_count: usize,
    mezzanine_count: usize,
) -> AllocationPass {
    let senior_share = remaining_senior.min(unallocated);
    let mezzanine_share = unallocated - senior_share;

    let senior_increments = distribute_with_carry(senior_share, senior_count);
    let mezzanine_increments = distribute_with_carry(mezzanine_share, mezzanine_count);

    AllocationPass {
        unallocated,
        senior_allocated: senior_share,
        mezzanine_allocated: mezzanine_share,
        senior_increments,
        mezzanine_increments,
        content_hash: pass_hash(unallocated, senior_share, mezzanine_share),
    }
}

fn pass_hash(unallocated: u64, senior: u64, mezzanine: u64) -> u64 {
    let mut data = [0u8; 24];
    data[0..8].copy_from_slice(&unallocated.to_le_bytes());
    data[8..16].copy_from_slice(&senior.to_le_bytes());
    data[16..24].copy_from_slice(&mezzanine.to_le_bytes());
    fnv1a(&data)
}

// ── Tests ──────────────────────────────────────────────────────────────
