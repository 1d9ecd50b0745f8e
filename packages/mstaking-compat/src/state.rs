use cosmwasm_std::Storage;
use cw_storage_plus::{Item, Map};

use crate::{
    error::ContractResult,
    interface::{Params, ValAddress, Validator},
};

pub const PARAMS: Item<Params> = Item::new("params");

/// Mapping operator address => validator
pub const VALIDATORS: Map<&[u8], Validator> = Map::new("validators");

/// Mapping consensus address => operator address
pub const VALIDATORS_BY_CONS_ADDR: Map<&[u8], ValAddress> = Map::new("validators_by_cons_addr");

/// The bonded set as of the last end block, operator address => consensus power
pub const LAST_VALIDATOR_POWERS: Map<&[u8], u64> = Map::new("last_validator_powers");

pub fn set_params(store: &mut dyn Storage, params: &Params) -> ContractResult<()> {
    PARAMS.save(store, params)?;
    Ok(())
}

pub fn set_validator(store: &mut dyn Storage, validator: &Validator) -> ContractResult<()> {
    VALIDATORS.save(store, validator.operator_address.as_slice(), validator)?;
    Ok(())
}

pub fn set_validator_by_cons_addr(
    store: &mut dyn Storage,
    validator: &Validator,
) -> ContractResult<()> {
    let cons_addr = validator.consensus_pubkey.cons_address()?;
    VALIDATORS_BY_CONS_ADDR.save(store, cons_addr.as_slice(), &validator.operator_address)?;
    Ok(())
}

pub fn set_last_validator_power(
    store: &mut dyn Storage,
    operator: &ValAddress,
    power: u64,
) -> ContractResult<()> {
    LAST_VALIDATOR_POWERS.save(store, operator.as_slice(), &power)?;
    Ok(())
}

pub fn delete_last_validator_power(store: &mut dyn Storage, operator: &ValAddress) {
    LAST_VALIDATOR_POWERS.remove(store, operator.as_slice());
}
