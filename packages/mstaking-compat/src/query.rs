use bech32::{Bech32, Hrp};
use cosmwasm_std::{to_json_binary, Binary, Decimal, Timestamp};
use ibc_proto::cosmos::staking::v1beta1::{
    Commission as ProtoCommission, CommissionRates as ProtoCommissionRates,
    Description as ProtoDescription, QueryValidatorRequest,
};
use ibc_proto::google::protobuf::{Any, Timestamp as ProtoTimestamp};
use prost::Message;

use crate::{
    compatibility::CompatibilityKeeper,
    constants::VALIDATOR_QUERY_PATH,
    error::{ContractError, ContractResult},
    interface::{ConsAddress, LegacyValidator, ValAddress},
    keeper::StakingKeeper,
    msg::QueryMsg,
};

/// `cosmos.staking.v1beta1.Validator` including the unbonding hold fields.
#[derive(Clone, PartialEq, Message)]
pub struct ProtoValidator {
    #[prost(string, tag = "1")]
    pub operator_address: String,
    #[prost(message, optional, tag = "2")]
    pub consensus_pubkey: Option<Any>,
    #[prost(bool, tag = "3")]
    pub jailed: bool,
    #[prost(int32, tag = "4")]
    pub status: i32,
    #[prost(string, tag = "5")]
    pub tokens: String,
    #[prost(string, tag = "6")]
    pub delegator_shares: String,
    #[prost(message, optional, tag = "7")]
    pub description: Option<ProtoDescription>,
    #[prost(int64, tag = "8")]
    pub unbonding_height: i64,
    #[prost(message, optional, tag = "9")]
    pub unbonding_time: Option<ProtoTimestamp>,
    #[prost(message, optional, tag = "10")]
    pub commission: Option<ProtoCommission>,
    #[prost(string, tag = "11")]
    pub min_self_delegation: String,
    #[prost(int64, tag = "12")]
    pub unbonding_on_hold_ref_count: i64,
    #[prost(uint64, repeated, tag = "13")]
    pub unbonding_ids: Vec<u64>,
}

#[derive(Clone, PartialEq, Message)]
pub struct ProtoQueryValidatorResponse {
    #[prost(message, optional, tag = "1")]
    pub validator: Option<ProtoValidator>,
}

pub fn query_validator<K: StakingKeeper>(
    keeper: &K,
    operator_address: Binary,
) -> ContractResult<LegacyValidator> {
    let addr = ValAddress::try_from(operator_address)?;
    CompatibilityKeeper::new(keeper).validator(&addr)
}

pub fn query_validator_by_cons_addr<K: StakingKeeper>(
    keeper: &K,
    cons_address: Binary,
) -> ContractResult<LegacyValidator> {
    let addr = ConsAddress::try_from(cons_address)?;
    CompatibilityKeeper::new(keeper).validator_by_cons_addr(&addr)
}

pub fn query<K: StakingKeeper>(keeper: &K, msg: QueryMsg) -> ContractResult<Binary> {
    let bin = match msg {
        QueryMsg::Validator { operator_address } => {
            to_json_binary(&query_validator(keeper, operator_address)?)?
        }
        QueryMsg::ValidatorByConsAddr { cons_address } => {
            to_json_binary(&query_validator_by_cons_addr(keeper, cons_address)?)?
        }
        QueryMsg::TotalBondedTokens {} => {
            to_json_binary(&CompatibilityKeeper::new(keeper).total_bonded_tokens()?)?
        }
    };
    Ok(bin)
}

/// Answers a protobuf staking query the way the legacy gRPC service would.
pub fn query_stargate<K: StakingKeeper>(
    keeper: &K,
    path: &str,
    data: &[u8],
) -> ContractResult<Binary> {
    match path {
        VALIDATOR_QUERY_PATH => {
            let request = QueryValidatorRequest::decode(data)?;
            query_validator_proto(keeper, &request.validator_addr)
        }
        _ => Err(ContractError::UnknownQueryPath(path.to_string())),
    }
}

/// Looks up a validator by bech32 operator address and returns an encoded
/// `cosmos.staking.v1beta1.QueryValidatorResponse`.
pub fn query_validator_proto<K: StakingKeeper>(
    keeper: &K,
    validator_addr: &str,
) -> ContractResult<Binary> {
    let params = keeper.params()?;
    let (hrp, data) =
        bech32::decode(validator_addr).map_err(|err| ContractError::Address(err.to_string()))?;
    if hrp.to_lowercase() != params.validator_address_prefix {
        return Err(ContractError::Address(format!(
            "invalid bech32 prefix: expected {}, got {}",
            params.validator_address_prefix, hrp
        )));
    }

    let addr = ValAddress::try_from_slice(&data)?;
    let validator = CompatibilityKeeper::new(keeper).validator(&addr)?;
    let response = ProtoQueryValidatorResponse {
        validator: Some(to_proto_validator(
            &validator,
            &params.validator_address_prefix,
        )?),
    };
    Ok(response.encode_to_vec().into())
}

// sdk decimals travel as their 18 decimal place atomics
fn dec_to_proto(value: Decimal) -> String {
    value.atomics().to_string()
}

fn timestamp_to_proto(value: Timestamp) -> ContractResult<ProtoTimestamp> {
    Ok(ProtoTimestamp {
        seconds: i64::try_from(value.seconds())?,
        nanos: i32::try_from(value.subsec_nanos())?,
    })
}

pub fn to_proto_validator(val: &LegacyValidator, prefix: &str) -> ContractResult<ProtoValidator> {
    let hrp = Hrp::parse(prefix).map_err(|err| ContractError::Address(err.to_string()))?;
    let operator_address = bech32::encode::<Bech32>(hrp, val.operator_address.as_slice())
        .map_err(|err| ContractError::Address(err.to_string()))?;

    let rates = &val.commission.commission_rates;

    Ok(ProtoValidator {
        operator_address,
        consensus_pubkey: Some(Any {
            type_url: val.consensus_pubkey.type_url.clone(),
            value: val.consensus_pubkey.value.to_vec(),
        }),
        jailed: val.jailed,
        status: val.status as i32,
        tokens: val.tokens.to_string(),
        delegator_shares: dec_to_proto(val.delegator_shares),
        description: Some(ProtoDescription {
            moniker: val.description.moniker.clone(),
            identity: val.description.identity.clone(),
            website: val.description.website.clone(),
            security_contact: val.description.security_contact.clone(),
            details: val.description.details.clone(),
        }),
        unbonding_height: val.unbonding_height,
        unbonding_time: Some(timestamp_to_proto(val.unbonding_time)?),
        commission: Some(ProtoCommission {
            commission_rates: Some(ProtoCommissionRates {
                rate: dec_to_proto(rates.rate),
                max_rate: dec_to_proto(rates.max_rate),
                max_change_rate: dec_to_proto(rates.max_change_rate),
            }),
            update_time: Some(timestamp_to_proto(val.commission.update_time)?),
        }),
        min_self_delegation: val.min_self_delegation.to_string(),
        unbonding_on_hold_ref_count: val.unbonding_on_hold_ref_count,
        unbonding_ids: val.unbonding_ids.clone(),
    })
}
