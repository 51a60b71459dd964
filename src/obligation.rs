/*
    ALICE-CDO
    Copyright (C) 2026 Moroya Sakamoto
*/

use std::collections::HashMap;

use crate::pool::{Pool, PoolError};

/// Terms of a single debt obligation.
#[derive(Debug, Clone)]
pub struct ObligationTerms {
    /// Unique obligation identifier.
    pub obligation_id: u64,
    /// Account that owes repayment.
    pub debtor_id: u64,
    /// Principal in units.
    pub principal: u64,
    /// Simple interest over the full term, in basis points of principal.
    pub interest_rate_bps: u64,
    /// Origination timestamp (nanoseconds since Unix epoch).
    pub origination_ns: u64,
    /// Maturity timestamp (nanoseconds since Unix epoch).
    pub maturity_ns: u64,
}

/// Error returned by obligation registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObligationError {
    /// The obligation identifier was never originated.
    UnknownObligation(u64),
    /// The caller does not own the obligation.
    NotOwner { obligation_id: u64, owner: u64 },
    /// The receiving pool rejected the inbound transfer; ownership is
    /// unchanged and no expected-inflow was accumulated.
    PoolRejected(PoolError),
}

/// Obligation registry and repayment-expectation oracle.
///
/// Tracks obligation terms and current ownership, and answers expected-value
/// queries. Transfer into a pool is a two-phase operation: the pool's
/// synchronous acceptance callback runs first, and only on acceptance is the
/// ownership change committed.
pub struct ObligationRegistry {
    obligations: HashMap<u64, ObligationTerms>,
    owners: HashMap<u64, u64>,
    next_id: u64,
}

impl ObligationRegistry {
    /// Create an empty registry. The first originated obligation has id 1.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            obligations: HashMap::new(),
            owners: HashMap::new(),
            next_id: 1,
        }
    }

    /// Originate a new obligation owned by `creditor`.
    pub fn originate(
        &mut self,
        creditor: u64,
        debtor_id: u64,
        principal: u64,
        interest_rate_bps: u64,
        origination_ns: u64,
        maturity_ns: u64,
    ) -> u64 {
        let obligation_id = self.next_id;
        self.next_id += 1;
        self.obligations.insert(
            obligation_id,
            ObligationTerms {
                obligation_id,
                debtor_id,
                principal,
                interest_rate_bps,
                origination_ns,
                maturity_ns,
            },
        );
        self.owners.insert(obligation_id, creditor);
        obligation_id
    }

    /// Current owner of an obligation.
    pub fn owner_of(&self, obligation_id: u64) -> Result<u64, ObligationError> {
        self.owners
            .get(&obligation_id)
            .copied()
            .ok_or(ObligationError::UnknownObligation(obligation_id))
    }

    /// Look up an obligation's terms.
    #[inline(always)]
    pub fn get(&self, obligation_id: u64) -> Option<&ObligationTerms> {
        self.obligations.get(&obligation_id)
    }

    /// Maturity timestamp of an obligation.
    pub fn maturity_timestamp(&self, obligation_id: u64) -> Result<u64, ObligationError> {
        self.obligations
            .get(&obligation_id)
            .map(|t| t.maturity_ns)
            .ok_or(ObligationError::UnknownObligation(obligation_id))
    }

    /// Expected repayment value of an obligation at a given timestamp.
    ///
    /// Principal plus simple interest accrued linearly from origination,
    /// clamped at maturity, so the value is monotonically non-decreasing in
    /// `at_ns`. At or after maturity this is the full repayment.
    pub fn expected_repayment_value(
        &self,
        obligation_id: u64,
        at_ns: u64,
    ) -> Result<u64, ObligationError> {
        let terms = self
            .obligations
            .get(&obligation_id)
            .ok_or(ObligationError::UnknownObligation(obligation_id))?;

        let full_interest = terms.principal as u128 * terms.interest_rate_bps as u128 / 10_000;
        let term_ns = terms.maturity_ns.saturating_sub(terms.origination_ns);
        let elapsed_ns = at_ns.saturating_sub(terms.origination_ns).min(term_ns);

        let accrued = if term_ns == 0 {
            full_interest
        } else {
            full_interest * elapsed_ns as u128 / term_ns as u128
        };

        Ok(terms.principal.saturating_add(accrued as u64))
    }

    /// Transfer an obligation between ordinary owners.
    pub fn transfer(&mut self, caller: u64, obligation_id: u64, to: u64) -> Result<(), ObligationError> {
        let owner = self.owner_of(obligation_id)?;
        if owner != caller {
            return Err(ObligationError::NotOwner {
                obligation_id,
                owner,
            });
        }
        self.owners.insert(obligation_id, to);
        Ok(())
    }

    /// Transfer an obligation into a pool as collateral.
    ///
    /// Quotes the oracle at the obligation's maturity, then synchronously
    /// invokes the pool's acceptance callback. A rejection fails the whole
    /// transfer atomically: ownership stays with `from` and the pool
    /// accumulates nothing.
    pub fn transfer_to_pool(
        &mut self,
        from: u64,
        obligation_id: u64,
        pool: &mut Pool,
    ) -> Result<(), ObligationError> {
        let owner = self.owner_of(obligation_id)?;
        if owner != from {
            return Err(ObligationError::NotOwner {
                obligation_id,
                owner,
            });
        }

        let maturity = self.maturity_timestamp(obligation_id)?;
        let expected = self.expected_repayment_value(obligation_id, maturity)?;

        pool.on_obligation_received(from, obligation_id, expected)
            .map_err(ObligationError::PoolRejected)?;

        // Committed only after the pool has accepted.
        self.owners.insert(obligation_id, pool.ledger_account());
        Ok(())
    }
}

impl Default for ObligationRegistry {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}
