/*
    ALICE-CDO
    Copyright (C) 2026 Moroya Sakamoto
*/

//! # ALICE-CDO
//!
//! Collateralized debt obligation pooling and tranche waterfall engine for
//! the ALICE financial system.
//!
//! A pool aggregates individually-tracked debt obligations and redistributes
//! repayments flowing into it across two claim classes — six senior and four
//! mezzanine claim tokens — according to a strict seniority waterfall.
//! Allocation is lazy: entitlements are recomputed on demand from the pool's
//! ledger balance, conserve every unit of received value, and never lose
//! remainders to integer-division truncation.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`token`] | Claim token issuance and ownership registry |
//! | [`obligation`] | Obligation terms, repayment oracle, transfer-into-pool |
//! | [`ledger`] | Value ledger: account balances and fund transfer |
//! | [`waterfall`] | Carry-forward tranche distribution arithmetic |
//! | [`pool`] | The CDO `Pool` state machine: lifecycle and withdrawal |
//! | [`factory`] | Pool instantiation and claim-token minting |
//! | [`event`] | Append-only event log with monotonic sequences |
//!
//! # Quick Start
//!
//! ```rust
//! use alice_cdo::factory::PoolFactory;
//! use alice_cdo::ledger::ValueLedger;
//! use alice_cdo::obligation::ObligationRegistry;
//! use alice_cdo::pool::PoolConfig;
//! use alice_cdo::token::ClaimTokenIssuer;
//!
//! let mut ledger = ValueLedger::new();
//! let admin = ledger.open_account();
//! let mut issuer = ClaimTokenIssuer::new();
//! let mut registry = ObligationRegistry::new();
//! let mut factory = PoolFactory::new();
//!
//! let pool_id = factory.create(admin, &mut issuer, &mut ledger, PoolConfig::default());
//!
//! // Collateralize with three zero-interest obligations, then finalize.
//! for principal in [500, 300, 200] {
//!     let ob = registry.originate(admin, 7, principal, 0, 0, 1_000);
//!     registry
//!         .transfer_to_pool(admin, ob, factory.pool_mut(pool_id).unwrap())
//!         .unwrap();
//! }
//! factory.finalize(pool_id, admin).unwrap();
//!
//! let pool = factory.pool_mut(pool_id).unwrap();
//! assert_eq!(pool.expected_total_inflow(), 1_000);
//! assert_eq!(pool.expected_senior_payout(), 600); // 60% senior target
//!
//! // A repayment of 300 arrives; the first senior holder withdraws 300/6.
//! ledger.deposit(pool.ledger_account(), 300).unwrap();
//! let token = pool.senior_tokens()[0];
//! let paid = pool.withdraw(admin, token, admin, &issuer, &mut ledger).unwrap();
//! assert_eq!(paid, 50);
//! ```

pub mod event;
pub mod factory;
/// Value ledger: account balances and fund transfer.
pub mod ledger;
pub mod obligation;
pub mod pool;
pub mod token;
/// Carry-forward tranche distribution arithmetic.
pub mod waterfall;

pub use event::{EventLog, EventRecord, PoolEvent};
pub use factory::PoolFactory;
pub use ledger::{LedgerAccount, LedgerError, ValueLedger};
pub use obligation::{ObligationError, ObligationRegistry, ObligationTerms};
pub use pool::{Pool, PoolConfig, PoolError, PoolPhase};
pub use token::{ClaimToken, ClaimTokenIssuer, TokenError, Tranche};
pub use waterfall::{distribute_with_carry, expected_senior_payout, AllocationPass};

/// FNV-1a hash (crate-internal shared utility).
#[inline(always)]
pub(crate) fn fnv1a(data: &[u8]) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for &b in data {
        h ^= b as u64;
        h = h.wrapping_mul(0x100000001b3);
    }
    h
}
