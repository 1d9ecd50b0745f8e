use cosmwasm_std::{Order, Storage};

use crate::{
    error::{ContractError, ContractResult},
    interface::{ConsAddress, Params, ValAddress, Validator},
    state::{LAST_VALIDATOR_POWERS, PARAMS, VALIDATORS, VALIDATORS_BY_CONS_ADDR},
};

/// Visitor over the bonded set. Returning `Ok(true)` stops the walk.
pub type PowerVisitor<'v> = dyn FnMut(&ValAddress, u64) -> ContractResult<bool> + 'v;

/// Read access to the multi-asset staking module.
pub trait StakingKeeper {
    fn get_validator(&self, addr: &ValAddress) -> ContractResult<Validator>;

    fn get_validator_by_cons_addr(&self, addr: &ConsAddress) -> ContractResult<Validator>;

    /// Calls `visit` once per bonded validator with its last consensus power,
    /// until it returns `Ok(true)` or an error. The first error is returned.
    fn iterate_last_validator_powers(&self, visit: &mut PowerVisitor<'_>) -> ContractResult<()>;

    fn params(&self) -> ContractResult<Params>;
}

/// [`StakingKeeper`] over contract storage.
#[derive(Clone, Copy)]
pub struct StoreKeeper<'a> {
    store: &'a dyn Storage,
}

impl<'a> StoreKeeper<'a> {
    pub fn new(store: &'a dyn Storage) -> Self {
        Self { store }
    }
}

impl<'a> StakingKeeper for StoreKeeper<'a> {
    fn get_validator(&self, addr: &ValAddress) -> ContractResult<Validator> {
        VALIDATORS
            .may_load(self.store, addr.as_slice())?
            .ok_or_else(|| ContractError::ValidatorNotFound(addr.to_string()))
    }

    fn get_validator_by_cons_addr(&self, addr: &ConsAddress) -> ContractResult<Validator> {
        let operator = VALIDATORS_BY_CONS_ADDR
            .may_load(self.store, addr.as_slice())?
            .ok_or_else(|| ContractError::ValidatorNotFound(addr.to_string()))?;
        self.get_validator(&operator)
    }

    fn iterate_last_validator_powers(&self, visit: &mut PowerVisitor<'_>) -> ContractResult<()> {
        for item in LAST_VALIDATOR_POWERS.range(self.store, None, None, Order::Ascending) {
            let (key, power) = item.map_err(|err| ContractError::Iteration(err.to_string()))?;
            let operator = ValAddress::try_from_slice(&key)
                .map_err(|err| ContractError::Iteration(err.to_string()))?;
            if visit(&operator, power)? {
                break;
            }
        }
        Ok(())
    }

    fn params(&self) -> ContractResult<Params> {
        Ok(PARAMS.may_load(self.store)?.unwrap_or_default())
    }
}
