/*
    ALICE-CDO
    Copyright (C) 2026 Moroya Sakamoto
*/

use std::collections::HashMap;

/// Seniority class of a claim token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Tranche {
    /// Paid first, up to the pool's senior target.
    Senior = 0,
    /// Paid from whatever the senior class does not claim.
    Mezzanine = 1,
}

/// A minted claim token.
///
/// The pool and tranche tags are permanent; only `owner` ever changes.
#[derive(Debug, Clone)]
pub struct ClaimToken {
    /// Globally unique token identifier.
    pub token_id: u64,
    /// Pool this token belongs to.
    pub pool_id: u64,
    /// Seniority class.
    pub tranche: Tranche,
    /// Current owner account.
    pub owner: u64,
}

/// Error returned by issuer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token identifier was never issued.
    UnknownToken(u64),
    /// The caller does not own the token.
    NotOwner { token_id: u64, owner: u64 },
}

/// Claim token issuer and ownership registry.
///
/// Mints sequentially-numbered tokens and tracks current ownership. The
/// monotonic counter guarantees that no identifier is ever issued twice;
/// tokens are never destroyed.
pub struct ClaimTokenIssuer {
    tokens: HashMap<u64, ClaimToken>,
    next_id: u64,
}

impl ClaimTokenIssuer {
    /// Create an issuer with no tokens. The first minted token has id 1.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            tokens: HashMap::new(),
            next_id: 1,
        }
    }

    /// Mint a fresh token for `pool_id` and assign it to `beneficiary`.
    ///
    /// Returns a never-before-issued identifier; the counter only moves
    /// forward.
    pub fn create(&mut self, pool_id: u64, tranche: Tranche, beneficiary: u64) -> u64 {
        let token_id = self.next_id;
        self.next_id += 1;
        self.tokens.insert(
            token_id,
            ClaimToken {
                token_id,
                pool_id,
                tranche,
                owner: beneficiary,
            },
        );
        token_id
    }

    /// Current owner of a token.
    pub fn owner_of(&self, token_id: u64) -> Result<u64, TokenError> {
        self.tokens
            .get(&token_id)
            .map(|t| t.owner)
            .ok_or(TokenError::UnknownToken(token_id))
    }

    /// Look up a token record.
    #[inline(always)]
    pub fn get(&self, token_id: u64) -> Option<&ClaimToken> {
        self.tokens.get(&token_id)
    }

    /// Transfer a token to a new owner.
    ///
    /// Fails unless `caller` is the current owner.
    pub fn transfer(&mut self, caller: u64, token_id: u64, to: u64) -> Result<(), TokenError> {
        let token = self
            .tokens
            .get_mut(&token_id)
            .ok_or(TokenError::UnknownToken(token_id))?;
        if token.owner != caller {
            return Err(TokenError::NotOwner {
                token_id,
                owner: token.owner,
            });
        }
        token.owner = to;
        Ok(())
    }

    /// Number of tokens issued so far.
    #[inline(always)]
    pub fn issued_count(&self) -> usize {
        self.tokens.len()
    }
}

impl Default for ClaimTokenIssuer {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut issuer = ClaimTokenIssuer::new();
        let a = issuer.create(1, Tranche::Senior, 100);
        let b = issuer.create(1, Tranche::Senior, 100);
        let c = issuer.create(2, Tranche::Mezzanine, 200);
        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(c, 3);
        assert_eq!(issuer.issued_count(), 3);
    }

    #[test]
    fn test_no_double_mint() {
        let mut issuer = ClaimTokenIssuer::new();
        let mut seen = std::collections::HashSet::new();
        for i in 0..1_000u64 {
            let id = issuer.create(i % 7, Tranche::Senior, i);
            assert!(seen.insert(id), "id {} issued twice", id);
        }
        assert_eq!(issuer.issued_count(), 1_000);
    }

    #[test]
    fn test_token_tags_are_recorded() {
        let mut issuer = ClaimTokenIssuer::new();
        let id = issuer.create(42, Tranche::Mezzanine, 100);
        let token = issuer.get(id).unwrap();
        assert_eq!(token.pool_id, 42);
        assert_eq!(token.tranche, Tranche::Mezzanine);
        assert_eq!(token.owner, 100);
    }

    #[test]
    fn test_owner_of_unknown_token() {
        let issuer = ClaimTokenIssuer::new();
        assert_eq!(issuer.owner_of(99), Err(TokenError::UnknownToken(99)));
    }

    #[test]
    fn test_transfer_changes_owner() {
        let mut issuer = ClaimTokenIssuer::new();
        let id = issuer.create(1, Tranche::Senior, 100);
        assert!(issuer.transfer(100, id, 200).is_ok());
        assert_eq!(issuer.owner_of(id), Ok(200));

        // Old owner can no longer move it.
        assert_eq!(
            issuer.transfer(100, id, 300),
            Err(TokenError::NotOwner {
                token_id: id,
                owner: 200
            })
        );
    }

    #[test]
    fn test_transfer_unknown_token() {
        let mut issuer = ClaimTokenIssuer::new();
        assert_eq!(
            issuer.transfer(100, 7, 200),
            Err(TokenError::UnknownToken(7))
        );
    }

    #[test]
    fn test_transfer_back_and_forth() {
        let mut issuer = ClaimTokenIssuer::new();
        let id = issuer.create(1, Tranche::Senior, 100);
        issuer.transfer(100, id, 200).unwrap();
        issuer.transfer(200, id, 100).unwrap();
        assert_eq!(issuer.owner_of(id), Ok(100));
        // Tags survive any number of transfers.
        assert_eq!(issuer.get(id).unwrap().pool_id, 1);
        assert_eq!(issuer.get(id).unwrap().tranche, Tranche::Senior);
    }

    #[test]
    fn test_tranche_repr_values() {
        assert_eq!(Tranche::Senior as u8, 0);
        assert_eq!(Tranche::Mezzanine as u8, 1);
        assert_ne!(Tranche::Senior, Tranche::Mezzanine);
    }

    #[test]
    fn test_default_issuer_is_empty() {
        let issuer = ClaimTokenIssuer::default();
        assert_eq!(issuer.issued_count(), 0);
        assert!(issuer.get(1).is_none());
    }
}
