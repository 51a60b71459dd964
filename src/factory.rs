/*
    ALICE-CDO
    Copyright (C) 2026 Moroya Sakamoto
*/

use std::collections::HashMap;

use crate::event::{EventLog, PoolEvent};
use crate::ledger::ValueLedger;
use crate::pool::{Pool, PoolConfig, PoolError};
use crate::token::{ClaimTokenIssuer, Tranche};

/// Pool factory.
///
/// Instantiates pools, wiring each to a fresh ledger account and minting
/// its claim tokens — senior first, then mezzanine, all assigned to the
/// administrator. Creation and finalization are recorded in the factory's
/// event log for external discovery.
pub struct PoolFactory {
    pools: HashMap<u64, Pool>,
    next_pool_id: u64,
    events: EventLog,
}

impl PoolFactory {
    /// Create a factory with no pools. The first pool has id 1.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            pools: HashMap::new(),
            next_pool_id: 1,
            events: EventLog::new(),
        }
    }

    /// Instantiate a new pool with `caller` as administrator.
    ///
    /// Opens the pool's ledger account, mints the configured number of
    /// senior then mezzanine tokens to the administrator, and records
    /// `PoolCreated`. Returns the new pool's identifier.
    pub fn create(
        &mut self,
        caller: u64,
        issuer: &mut ClaimTokenIssuer,
        ledger: &mut ValueLedger,
        config: PoolConfig,
    ) -> u64 {
        let pool_id = self.next_pool_id;
        self.next_pool_id += 1;

        let pool_account = ledger.open_account();
        let senior_tokens: Vec<u64> = (0..config.senior_token_count)
            .map(|_| issuer.create(pool_id, Tranche::Senior, caller))
            .collect();
        let mezzanine_tokens: Vec<u64> = (0..config.mezzanine_token_count)
            .map(|_| issuer.create(pool_id, Tranche::Mezzanine, caller))
            .collect();

        let pool = Pool::new(
            pool_id,
            caller,
            pool_account,
            senior_tokens,
            mezzanine_tokens,
            config,
        );
        self.events.record(PoolEvent::PoolCreated {
            creator: caller,
            pool_id,
            pool_account,
        });
        self.pools.insert(pool_id, pool);
        pool_id
    }

    /// Finalize a pool, recording the confirmation event on success.
    pub fn finalize(&mut self, pool_id: u64, caller: u64) -> Result<(), PoolError> {
        let pool = self
            .pools
            .get_mut(&pool_id)
            .ok_or(PoolError::UnknownPool(pool_id))?;
        pool.finalize(caller, &mut self.events)
    }

    /// Look up a pool by identifier.
    #[inline(always)]
    pub fn pool(&self, pool_id: u64) -> Option<&Pool> {
        self.pools.get(&pool_id)
    }

    /// Look up a pool by identifier, mutably.
    #[inline(always)]
    pub fn pool_mut(&mut self, pool_id: u64) -> Option<&mut Pool> {
        self.pools.get_mut(&pool_id)
    }

    /// Number of pools created so far.
    #[inline(always)]
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// The factory's event log.
    #[inline(always)]
    pub fn events(&self) -> &EventLog {
        &self.events
    }
}

impl Default for PoolFactory {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}
