use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};

use crate::interface::LegacyValidator;

#[cw_serde]
#[derive(Copy, Eq)]
pub enum BondStatus {
    /// UNSPECIFIED defines an invalid validator status.
    Unspecified = 0,
    /// UNBONDED defines a validator that is not bonded.
    Unbonded = 1,
    /// UNBONDING defines a validator that is unbonding.
    Unbonding = 2,
    /// BONDED defines a validator that is bonded.
    Bonded = 3,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(LegacyValidator)]
    Validator { operator_address: Binary },
    #[returns(LegacyValidator)]
    ValidatorByConsAddr { cons_address: Binary },
    #[returns(Uint128)]
    TotalBondedTokens {},
}
