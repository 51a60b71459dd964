// ALICE-CDO — CDO pool state machine and seniority waterfall
// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Moroya Sakamoto

use std::collections::HashMap;

use crate::event::{EventLog, PoolEvent};
use crate::ledger::{LedgerError, ValueLedger};
use crate::token::ClaimTokenIssuer;
use crate::waterfall::{self, AllocationPass};

// ── Types ──────────────────────────────────────────────────────────────

/// Lifecycle phase of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PoolPhase {
    /// Constructed, no collateral yet.
    Open = 0,
    /// At least one obligation admitted, not yet finalized.
    Collateralizing = 1,
    /// Obligation set frozen; terminal.
    Finalized = 2,
}

/// Error returned when a pool operation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The caller is not the pool administrator.
    NotAdministrator { caller: u64 },
    /// The pool is already finalized.
    AlreadyFinalized,
    /// Finalization requires more collateral.
    TooFewObligations { have: usize, need: usize },
    /// Withdrawals are gated on finalization for this pool.
    WithdrawalsNotOpen,
    /// The token does not belong to this pool.
    ForeignToken { token_id: u64 },
    /// The caller does not own the claim token.
    NotTokenOwner { token_id: u64, owner: u64 },
    /// The token has no accrued entitlement to pay out.
    NothingAccrued { token_id: u64 },
    /// The pool identifier is not registered with the factory.
    UnknownPool(u64),
    /// A ledger transfer failed.
    Ledger(LedgerError),
}

/// Configuration for a pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of senior claim tokens minted at construction.
    pub senior_token_count: usize,
    /// Number of mezzanine claim tokens minted at construction.
    pub mezzanine_token_count: usize,
    /// Senior share numerator (fraction of expected total inflow).
    pub senior_share_num: u64,
    /// Senior share denominator. Must be non-zero.
    pub senior_share_den: u64,
    /// Minimum obligation count required to finalize.
    pub min_obligations: usize,
    /// Allow `withdraw` before finalization (early partial liquidity).
    pub allow_early_withdrawal: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            senior_token_count: 6,
            mezzanine_token_count: 4,
            senior_share_num: 6,
            senior_share_den: 10,
            min_obligations: 3,
            allow_early_withdrawal: true,
        }
    }
}

// ── Pool ───────────────────────────────────────────────────────────────

/// A collateralized debt obligation pool.
///
/// Owns the obligation set, the tranche token lists, and the waterfall
/// allocation state. Repayments land on the pool's ledger account; the
/// difference between that balance and the sum of accrued entitlements is
/// the unallocated value a withdrawal lazily distributes, senior first.
///
/// Every mutating operation is atomic: a precondition failure returns an
/// error with no observable state change, here or on the ledger.
pub struct Pool {
    pool_id: u64,
    administrator: u64,
    ledger_account: u64,
    config: PoolConfig,
    obligations: Vec<u64>,
    expected_total_inflow: u64,
    finalized: bool,
    total_withdrawn: u64,
    entitlements: HashMap<u64, u64>,
    senior_tokens: Vec<u64>,
    mezzanine_tokens: Vec<u64>,
}

impl Pool {
    /// Construct a pool with its tranche token lists.
    ///
    /// Entitlements start at zero for every token. Normally called by the
    /// factory, which mints the tokens first.
    pub fn new(
        pool_id: u64,
        administrator: u64,
        ledger_account: u64,
        senior_tokens: Vec<u64>,
        mezzanine_tokens: Vec<u64>,
        config: PoolConfig,
    ) -> Self {
        let entitlements = senior_tokens
            .iter()
            .chain(mezzanine_tokens.iter())
            .map(|&t| (t, 0))
            .collect();
        Self {
            pool_id,
            administrator,
            ledger_account,
            config,
            obligations: Vec::new(),
            expected_total_inflow: 0,
            finalized: false,
            total_withdrawn: 0,
            entitlements,
            senior_tokens,
            mezzanine_tokens,
        }
    }

    // ── Lifecycle ──────────────────────────────────────────────────────

    /// Acceptance callback for an inbound obligation transfer.
    ///
    /// `expected_value` is the oracle's quote at the obligation's maturity.
    /// Rejects after finalization and for any sender other than the
    /// administrator; a rejection must fail the inbound transfer itself
    /// (see `ObligationRegistry::transfer_to_pool`).
    pub fn on_obligation_received(
        &mut self,
        from: u64,
        obligation_id: u64,
        expected_value: u64,
    ) -> Result<(), PoolError> {
        if self.finalized {
            return Err(PoolError::AlreadyFinalized);
        }
        if from != self.administrator {
            return Err(PoolError::NotAdministrator { caller: from });
        }
        self.expected_total_inflow = self.expected_total_inflow.saturating_add(expected_value);
        self.obligations.push(obligation_id);
        Ok(())
    }

    /// Freeze the obligation set.
    ///
    /// Requires the administrator, at least `config.min_obligations`
    /// admitted obligations, and an unfinalized pool — a second call fails
    /// rather than re-emitting. Emits `PoolFinalized` with both full token
    /// lists.
    pub fn finalize(&mut self, caller: u64, events: &mut EventLog) -> Result<(), PoolError> {
        if caller != self.administrator {
            return Err(PoolError::NotAdministrator { caller });
        }
        if self.finalized {
            return Err(PoolError::AlreadyFinalized);
        }
        if self.obligations.len() < self.config.min_obligations {
            return Err(PoolError::TooFewObligations {
                have: self.obligations.len(),
                need: self.config.min_obligations,
            });
        }

        self.finalized = true;
        events.record(PoolEvent::PoolFinalized {
            pool_id: self.pool_id,
            senior_tokens: self.senior_tokens.clone(),
            mezzanine_tokens: self.mezzanine_tokens.clone(),
        });
        Ok(())
    }

    // ── Waterfall ──────────────────────────────────────────────────────

    /// Withdraw a token's accrued entitlement to `recipient`.
    ///
    /// Phase A plans a reallocation of any value that has arrived since the
    /// last pass; Phase B pays out the token's post-pass entitlement. The
    /// two phases are transactionally atomic: the pass is held pure until
    /// every payout precondition is known to hold, so a rejected withdrawal
    /// leaves no trace of the reallocation either.
    ///
    /// Returns the amount paid out.
    pub fn withdraw(
        &mut self,
        caller: u64,
        token_id: u64,
        recipient: u64,
        issuer: &ClaimTokenIssuer,
        ledger: &mut ValueLedger,
    ) -> Result<u64, PoolError> {
        if !self.finalized && !self.config.allow_early_withdrawal {
            return Err(PoolError::WithdrawalsNotOpen);
        }
        let accrued = *self
            .entitlements
            .get(&token_id)
            .ok_or(PoolError::ForeignToken { token_id })?;
        let owner = issuer
            .owner_of(token_id)
            .map_err(|_| PoolError::ForeignToken { token_id })?;
        if owner != caller {
            return Err(PoolError::NotTokenOwner { token_id, owner });
        }

        // Phase A: plan the reallocation against the current ledger balance.
        let pass = self.plan_reallocation(ledger.balance_of(self.ledger_account));
        let amount = accrued.saturating_add(self.pass_increment(&pass, token_id));
        if amount == 0 {
            return Err(PoolError::NothingAccrued { token_id });
        }

        // Phase B: payout. The ledger move goes first so a ledger failure
        // leaves the pool untouched.
        ledger
            .transfer(self.ledger_account, recipient, amount)
            .map_err(PoolError::Ledger)?;

        self.apply_pass(&pass);
        self.entitlements.insert(token_id, 0);
        self.total_withdrawn = self.total_withdrawn.saturating_add(amount);
        Ok(amount)
    }

    /// Plan an allocation pass against a given pool ledger balance.
    ///
    /// Pure: assigns the unallocated portion of the balance senior-first
    /// without mutating the pool. The same balance always plans the same
    /// pass.
    pub fn plan_reallocation(&self, pool_balance: u64) -> AllocationPass {
        let unallocated = pool_balance.saturating_sub(self.entitlement_sum());
        waterfall::plan_allocation(
            unallocated,
            self.remaining_expected_senior_payout(),
            self.senior_tokens.len(),
            self.mezzanine_tokens.len(),
        )
    }

    fn apply_pass(&mut self, pass: &AllocationPass) {
        for (&token, &inc) in self.senior_tokens.iter().zip(&pass.senior_increments) {
            if let Some(e) = self.entitlements.get_mut(&token) {
                *e = e.saturating_add(inc);
            }
        }
        for (&token, &inc) in self.mezzanine_tokens.iter().zip(&pass.mezzanine_increments) {
            if let Some(e) = self.entitlements.get_mut(&token) {
                *e = e.saturating_add(inc);
            }
        }
    }

    fn pass_increment(&self, pass: &AllocationPass, token_id: u64) -> u64 {
        if let Some(i) = self.senior_tokens.iter().position(|&t| t == token_id) {
            pass.senior_increments[i]
        } else if let Some(i) = self.mezzanine_tokens.iter().position(|&t| t == token_id) {
            pass.mezzanine_increments[i]
        } else {
            0
        }
    }

    // ── Read-only views ────────────────────────────────────────────────

    /// Fixed senior target: 60% of expected total inflow by default.
    #[inline]
    pub fn expected_senior_payout(&self) -> u64 {
        waterfall::expected_senior_payout(
            self.expected_total_inflow,
            self.config.senior_share_num,
            self.config.senior_share_den,
        )
    }

    /// Senior target minus everything already withdrawn or accrued senior,
    /// clamped at zero once the senior class is fully satisfied.
    pub fn remaining_expected_senior_payout(&self) -> u64 {
        self.expected_senior_payout()
            .saturating_sub(self.total_withdrawn)
            .saturating_sub(self.senior_entitlement_sum())
    }

    /// Accrued, not-yet-withdrawn entitlement of a token; zero for tokens
    /// outside this pool.
    #[inline(always)]
    pub fn entitlement_of(&self, token_id: u64) -> u64 {
        self.entitlements.get(&token_id).copied().unwrap_or(0)
    }

    /// Sum of all accrued entitlements.
    pub fn entitlement_sum(&self) -> u64 {
        self.entitlements
            .values()
            .fold(0u64, |acc, &e| acc.saturating_add(e))
    }

    /// Sum of accrued entitlements over the senior tranche.
    pub fn senior_entitlement_sum(&self) -> u64 {
        self.senior_tokens
            .iter()
            .fold(0u64, |acc, t| acc.saturating_add(self.entitlement_of(*t)))
    }

    /// Sum of accrued entitlements over the mezzanine tranche.
    pub fn mezzanine_entitlement_sum(&self) -> u64 {
        self.mezzanine_tokens
            .iter()
            .fold(0u64, |acc, t| acc.saturating_add(self.entitlement_of(*t)))
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> PoolPhase {
        if self.finalized {
            PoolPhase::Finalized
        } else if self.obligations.is_empty() {
            PoolPhase::Open
        } else {
            PoolPhase::Collateralizing
        }
    }

    #[inline(always)]
    pub fn pool_id(&self) -> u64 {
        self.pool_id
    }

    #[inline(always)]
    pub fn administrator(&self) -> u64 {
        self.administrator
    }

    /// The pool's own ledger account; repayments land here.
    #[inline(always)]
    pub fn ledger_account(&self) -> u64 {
        self.ledger_account
    }

    #[inline(always)]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Admitted obligations, in admission order.
    #[inline(always)]
    pub fn obligations(&self) -> &[u64] {
        &self.obligations
    }

    /// Sum of oracle quotes over all admitted obligations.
    #[inline(always)]
    pub fn expected_total_inflow(&self) -> u64 {
        self.expected_total_inflow
    }

    /// Total value ever paid out across all claim holders.
    #[inline(always)]
    pub fn total_withdrawn(&self) -> u64 {
        self.total_withdrawn
    }

    /// Senior tranche token identifiers.
    #[inline(always)]
    pub fn senior_tokens(&self) -> &[u64] {
        &self.senior_tokens
    }

    /// Mezzanine tranche token identifiers.
    #[inline(always)]
    pub fn mezzanine_tokens(&self) -> &[u64] {
        &self.mezzanine_tokens
    }
}

// ── Tests ──────────────────────────────────────────────────────────────
