use cosmwasm_std::{Decimal, Uint128};

use crate::{
    constants::DEFAULT_UNBONDING_ID_START,
    error::ContractResult,
    interface::{Commission, ConsAddress, LegacyValidator, ValAddress, Validator},
    keeper::StakingKeeper,
};

/// Whether `unbonding_id` refers to a live unbonding hold.
pub fn has_active_unbonding_hold(unbonding_id: u64) -> bool {
    unbonding_id >= DEFAULT_UNBONDING_ID_START
}

/// Translates a multi-asset validator into the legacy single-denom view.
///
/// `tokens` is the effective voting power. The module tracks neither a
/// minimum self delegation nor delegator shares, so those are pinned to one
/// and zero. At most one unbonding hold exists per validator.
pub fn to_legacy_validator(val: Validator) -> ContractResult<LegacyValidator> {
    let rates = &val.commission.commission_rates;
    let commission = Commission::new(rates.rate, rates.max_rate, rates.max_change_rate)?;

    let (unbonding_on_hold_ref_count, unbonding_ids) =
        if has_active_unbonding_hold(val.unbonding_id) {
            (1, vec![val.unbonding_id])
        } else {
            (0, vec![])
        };

    Ok(LegacyValidator {
        operator_address: val.operator_address,
        consensus_pubkey: val.consensus_pubkey,
        jailed: val.jailed,
        status: val.status,
        tokens: val.voting_power,
        delegator_shares: Decimal::zero(),
        description: val.description,
        unbonding_height: val.unbonding_height,
        unbonding_time: val.unbonding_time,
        commission,
        min_self_delegation: Uint128::one(),
        unbonding_on_hold_ref_count,
        unbonding_ids,
    })
}

/// Serves the legacy staking interface (slashing, gov, legacy queries) from
/// the multi-asset staking keeper.
pub struct CompatibilityKeeper<'a, K: StakingKeeper> {
    keeper: &'a K,
}

impl<'a, K: StakingKeeper> CompatibilityKeeper<'a, K> {
    pub fn new(keeper: &'a K) -> Self {
        Self { keeper }
    }

    pub fn validator(&self, addr: &ValAddress) -> ContractResult<LegacyValidator> {
        let val = self.keeper.get_validator(addr)?;
        log::debug!("translating validator {} for legacy staking", addr);
        to_legacy_validator(val)
    }

    pub fn validator_by_cons_addr(&self, addr: &ConsAddress) -> ContractResult<LegacyValidator> {
        let val = self.keeper.get_validator_by_cons_addr(addr)?;
        log::debug!("translating validator with consensus address {}", addr);
        to_legacy_validator(val)
    }

    /// Sum of the last consensus powers of the bonded set.
    pub fn total_bonded_tokens(&self) -> ContractResult<Uint128> {
        let mut total = Uint128::zero();
        self.keeper.iterate_last_validator_powers(&mut |operator, power| {
            log::trace!("bonded validator {} power {}", operator, power);
            total = total.checked_add(Uint128::from(power))?;
            Ok(false)
        })?;

        log::debug!("total bonded tokens {}", total);
        Ok(total)
    }

    pub fn power_reduction(&self) -> ContractResult<Uint128> {
        Ok(self.keeper.params()?.power_reduction)
    }
}

impl<'a, K: StakingKeeper> Clone for CompatibilityKeeper<'a, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K: StakingKeeper> Copy for CompatibilityKeeper<'a, K> {}
