use std::fmt;

use cosmwasm_schema::{
    cw_serde,
    schemars::JsonSchema,
    serde::{Deserialize, Serialize},
};
use bech32::{Bech32, Hrp};
use cosmwasm_std::{Binary, Coin, Decimal, Timestamp, Uint128};
use derive_more::Deref;
use prost::Message;
use sha2::{Digest, Sha256};

use crate::constants::{
    ADDRESS_LENGTH, CONSENSUS_ADDRESS_PREFIX, DEFAULT_POWER_REDUCTION, ED25519_PUBKEY_SIZE,
    ED25519_PUBKEY_TYPE_URL, LONG_ADDRESS_LENGTH, VALIDATOR_ADDRESS_PREFIX,
};
use crate::error::{ContractError, ContractResult};
use crate::msg::BondStatus;

fn verify_address_format(bytes: &[u8]) -> ContractResult<()> {
    match bytes.len() {
        ADDRESS_LENGTH | LONG_ADDRESS_LENGTH => Ok(()),
        len => Err(ContractError::Address(format!(
            "address length must be {} or {} bytes, got {}",
            ADDRESS_LENGTH, LONG_ADDRESS_LENGTH, len
        ))),
    }
}

fn write_bech32(f: &mut fmt::Formatter<'_>, prefix: &str, bytes: &[u8]) -> fmt::Result {
    let hrp = Hrp::parse(prefix).map_err(|_| fmt::Error)?;
    let encoded = bech32::encode::<Bech32>(hrp, bytes).map_err(|_| fmt::Error)?;
    f.write_str(&encoded)
}

/// Operator address of a validator.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema, Deref,
)]
#[serde(crate = "cosmwasm_schema::serde", transparent)]
#[schemars(crate = "cosmwasm_schema::schemars")]
pub struct ValAddress(Binary);

impl ValAddress {
    pub fn try_from_slice(bytes: &[u8]) -> ContractResult<Self> {
        verify_address_format(bytes)?;
        Ok(Self(Binary::from(bytes)))
    }
}

impl TryFrom<Binary> for ValAddress {
    type Error = ContractError;

    fn try_from(value: Binary) -> ContractResult<Self> {
        verify_address_format(value.as_slice())?;
        Ok(Self(value))
    }
}

/// Bech32 with the default operator prefix.
impl fmt::Display for ValAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bech32(f, VALIDATOR_ADDRESS_PREFIX, self.0.as_slice())
    }
}

/// Consensus address of a validator, derived from its consensus pubkey.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema, Deref,
)]
#[serde(crate = "cosmwasm_schema::serde", transparent)]
#[schemars(crate = "cosmwasm_schema::schemars")]
pub struct ConsAddress(Binary);

impl ConsAddress {
    pub fn try_from_slice(bytes: &[u8]) -> ContractResult<Self> {
        verify_address_format(bytes)?;
        Ok(Self(Binary::from(bytes)))
    }
}

impl TryFrom<Binary> for ConsAddress {
    type Error = ContractError;

    fn try_from(value: Binary) -> ContractResult<Self> {
        verify_address_format(value.as_slice())?;
        Ok(Self(value))
    }
}

impl fmt::Display for ConsAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bech32(f, CONSENSUS_ADDRESS_PREFIX, self.0.as_slice())
    }
}

#[derive(Clone, PartialEq, Message)]
struct Ed25519PubKey {
    #[prost(bytes = "vec", tag = "1")]
    key: Vec<u8>,
}

/// A consensus public key packed the way it travels inside an `Any`.
#[cw_serde]
pub struct ConsensusPubkey {
    pub type_url: String,
    pub value: Binary,
}

impl ConsensusPubkey {
    /// Packs raw ed25519 key bytes.
    pub fn ed25519(key: &[u8]) -> ContractResult<Self> {
        if key.len() != ED25519_PUBKEY_SIZE {
            return Err(ContractError::Address(format!(
                "ed25519 pubkey must be {} bytes, got {}",
                ED25519_PUBKEY_SIZE,
                key.len()
            )));
        }

        let value = Ed25519PubKey { key: key.to_vec() }.encode_to_vec();
        Ok(Self {
            type_url: ED25519_PUBKEY_TYPE_URL.to_string(),
            value: value.into(),
        })
    }

    /// Tendermint address of the key: first 20 bytes of sha256(key).
    pub fn cons_address(&self) -> ContractResult<ConsAddress> {
        if self.type_url != ED25519_PUBKEY_TYPE_URL {
            return Err(ContractError::Address(format!(
                "unsupported consensus pubkey type {}",
                self.type_url
            )));
        }

        let pubkey = Ed25519PubKey::decode(self.value.as_slice())?;
        if pubkey.key.len() != ED25519_PUBKEY_SIZE {
            return Err(ContractError::Address("Incorrect length".into()));
        }

        let hash = Sha256::digest(&pubkey.key);
        ConsAddress::try_from_slice(&hash[..ADDRESS_LENGTH])
    }
}

#[cw_serde]
#[derive(Default)]
pub struct Description {
    pub moniker: String,
    pub identity: String,
    pub website: String,
    pub security_contact: String,
    pub details: String,
}

#[cw_serde]
#[derive(Eq)]
pub struct CommissionRates {
    /// The commission rate charged to delegators.
    pub rate: Decimal,
    /// Upper bound the validator can ever charge.
    pub max_rate: Decimal,
    /// Maximum daily increase of the commission rate.
    pub max_change_rate: Decimal,
}

impl CommissionRates {
    pub fn new(rate: Decimal, max_rate: Decimal, max_change_rate: Decimal) -> Self {
        Self {
            rate,
            max_rate,
            max_change_rate,
        }
    }

    /// Checks `rate <= max_rate <= 1` and `max_change_rate <= max_rate`.
    pub fn validate(&self) -> ContractResult<()> {
        if self.max_rate > Decimal::one() {
            return Err(ContractError::CommissionHuge {});
        }
        if self.rate > self.max_rate {
            return Err(ContractError::CommissionGtMaxRate {});
        }
        if self.max_change_rate > self.max_rate {
            return Err(ContractError::CommissionChangeRateGtMaxRate {});
        }
        Ok(())
    }
}

#[cw_serde]
#[derive(Eq)]
pub struct Commission {
    pub commission_rates: CommissionRates,
    /// The last time the commission rate was changed.
    pub update_time: Timestamp,
}

impl Commission {
    /// Creates a validated commission whose update time is the unix epoch.
    pub fn new(rate: Decimal, max_rate: Decimal, max_change_rate: Decimal) -> ContractResult<Self> {
        Self::new_with_time(rate, max_rate, max_change_rate, Timestamp::from_nanos(0))
    }

    pub fn new_with_time(
        rate: Decimal,
        max_rate: Decimal,
        max_change_rate: Decimal,
        update_time: Timestamp,
    ) -> ContractResult<Self> {
        let commission_rates = CommissionRates::new(rate, max_rate, max_change_rate);
        commission_rates.validate()?;

        Ok(Self {
            commission_rates,
            update_time,
        })
    }
}

#[cw_serde]
pub struct Params {
    /// Tokens per unit of consensus power.
    pub power_reduction: Uint128,
    /// Bech32 prefix of operator addresses in legacy query responses.
    pub validator_address_prefix: String,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            power_reduction: Uint128::from(DEFAULT_POWER_REDUCTION),
            validator_address_prefix: VALIDATOR_ADDRESS_PREFIX.to_string(),
        }
    }
}

/// A validator as the multi-asset staking module stores it. Each bond denom
/// contributes to `voting_powers`, and `voting_power` is their effective sum.
#[cw_serde]
pub struct Validator {
    pub operator_address: ValAddress,
    pub consensus_pubkey: ConsensusPubkey,
    pub jailed: bool,
    pub status: BondStatus,
    pub tokens: Vec<Coin>,
    pub voting_powers: Vec<Coin>,
    pub voting_power: Uint128,
    pub description: Description,
    /// Height at which unbonding started, zero when not unbonding.
    pub unbonding_height: i64,
    /// Time at which unbonding completes, zero when not unbonding.
    pub unbonding_time: Timestamp,
    pub commission: Commission,
    /// Id of the unbonding hold, below `DEFAULT_UNBONDING_ID_START` when none.
    pub unbonding_id: u64,
}

/// A validator in the single-denom shape legacy staking consumers expect.
///
/// Built fresh from a [`Validator`] on every request and never stored.
/// `delegator_shares` is always zero because the multi-asset module keeps no
/// shares ledger, so any exchange rate derived from it fails with a division
/// by zero that callers must handle.
#[cw_serde]
pub struct LegacyValidator {
    pub operator_address: ValAddress,
    pub consensus_pubkey: ConsensusPubkey,
    pub jailed: bool,
    pub status: BondStatus,
    pub tokens: Uint128,
    pub delegator_shares: Decimal,
    pub description: Description,
    pub unbonding_height: i64,
    pub unbonding_time: Timestamp,
    pub commission: Commission,
    pub min_self_delegation: Uint128,
    pub unbonding_on_hold_ref_count: i64,
    pub unbonding_ids: Vec<u64>,
}

impl LegacyValidator {
    pub fn is_jailed(&self) -> bool {
        self.jailed
    }

    pub fn moniker(&self) -> &str {
        &self.description.moniker
    }

    pub fn status(&self) -> BondStatus {
        self.status
    }

    pub fn is_bonded(&self) -> bool {
        self.status == BondStatus::Bonded
    }

    pub fn is_unbonded(&self) -> bool {
        self.status == BondStatus::Unbonded
    }

    pub fn is_unbonding(&self) -> bool {
        self.status == BondStatus::Unbonding
    }

    pub fn operator(&self) -> &ValAddress {
        &self.operator_address
    }

    pub fn cons_pubkey(&self) -> &ConsensusPubkey {
        &self.consensus_pubkey
    }

    pub fn cons_addr(&self) -> ContractResult<ConsAddress> {
        self.consensus_pubkey.cons_address()
    }

    pub fn tokens(&self) -> Uint128 {
        self.tokens
    }

    /// Tokens counted toward consensus, zero unless bonded.
    pub fn bonded_tokens(&self) -> Uint128 {
        if self.is_bonded() {
            self.tokens
        } else {
            Uint128::zero()
        }
    }

    pub fn consensus_power(&self, power_reduction: Uint128) -> ContractResult<u64> {
        let power = self.bonded_tokens().checked_div(power_reduction)?;
        Ok(u64::try_from(power.u128())?)
    }

    pub fn commission(&self) -> Decimal {
        self.commission.commission_rates.rate
    }

    pub fn min_self_delegation(&self) -> Uint128 {
        self.min_self_delegation
    }

    pub fn delegator_shares(&self) -> Decimal {
        self.delegator_shares
    }

    /// Tokens worth of the given shares: `shares * tokens / delegator_shares`.
    pub fn tokens_from_shares(&self, shares: Decimal) -> ContractResult<Decimal> {
        let tokens = Decimal::from_atomics(self.tokens, 0)?;
        Ok(shares.checked_mul(tokens)?.checked_div(self.delegator_shares)?)
    }

    pub fn shares_from_tokens(&self, amount: Uint128) -> ContractResult<Decimal> {
        if self.tokens.is_zero() {
            return Err(ContractError::InsufficientShares {});
        }

        let amount = Decimal::from_atomics(amount, 0)?;
        let tokens = Decimal::from_atomics(self.tokens, 0)?;
        Ok(self
            .delegator_shares
            .checked_mul(amount)?
            .checked_div(tokens)?)
    }
}
