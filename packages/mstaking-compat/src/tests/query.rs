use bech32::{Bech32, Hrp};
use cosmwasm_std::{from_json, testing::mock_dependencies, Binary, Uint128};
use ibc_proto::cosmos::staking::v1beta1::{QueryValidatorRequest, QueryValidatorResponse};
use prost::Message;

use crate::{
    compatibility::CompatibilityKeeper,
    constants::{DEFAULT_UNBONDING_ID_START, VALIDATOR_ADDRESS_PREFIX, VALIDATOR_QUERY_PATH},
    error::{ContractError, ContractResult},
    interface::{LegacyValidator, Params},
    keeper::StoreKeeper,
    msg::{BondStatus, QueryMsg},
    query::{query, query_stargate, query_validator_proto, ProtoQueryValidatorResponse},
    state::set_params,
    tests::helper::{mock_validator, store_bonded_validator, val_addr},
};

fn bech32_val_addr(prefix: &str, seed: u8) -> String {
    bech32::encode::<Bech32>(Hrp::parse(prefix).unwrap(), &[seed; 20]).unwrap()
}

#[test]
fn test_query_json() -> ContractResult<()> {
    let mut deps = mock_dependencies();
    store_bonded_validator(deps.as_mut().storage, &mock_validator(1, 100, 0), 100)?;
    store_bonded_validator(deps.as_mut().storage, &mock_validator(2, 250, 3), 250)?;

    let keeper = StoreKeeper::new(deps.as_ref().storage);
    let expected = CompatibilityKeeper::new(&keeper).validator(&val_addr(2))?;

    let bin = query(
        &keeper,
        QueryMsg::Validator {
            operator_address: Binary::from(vec![2u8; 20]),
        },
    )?;
    let by_operator: LegacyValidator = from_json(&bin)?;
    assert_eq!(by_operator, expected);

    let bin = query(
        &keeper,
        QueryMsg::ValidatorByConsAddr {
            cons_address: Binary::from(expected.cons_addr()?.as_slice()),
        },
    )?;
    assert_eq!(from_json::<LegacyValidator>(&bin)?, expected);

    let bin = query(&keeper, QueryMsg::TotalBondedTokens {})?;
    assert_eq!(from_json::<Uint128>(&bin)?, Uint128::from(350u128));
    Ok(())
}

#[test]
fn test_query_json_rejects_malformed_address() {
    let deps = mock_dependencies();
    let keeper = StoreKeeper::new(deps.as_ref().storage);
    let err = query(
        &keeper,
        QueryMsg::Validator {
            operator_address: Binary::from(vec![2u8; 5]),
        },
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::Address(_)));
}

#[test]
fn test_query_stargate_validator() -> ContractResult<()> {
    let mut deps = mock_dependencies();
    store_bonded_validator(
        deps.as_mut().storage,
        &mock_validator(3, 42_000_000, DEFAULT_UNBONDING_ID_START),
        42,
    )?;

    let keeper = StoreKeeper::new(deps.as_ref().storage);
    let validator_addr = bech32_val_addr(VALIDATOR_ADDRESS_PREFIX, 3);
    let request = QueryValidatorRequest {
        validator_addr: validator_addr.clone(),
    };
    let bin = query_stargate(&keeper, VALIDATOR_QUERY_PATH, &request.encode_to_vec())?;

    let response = QueryValidatorResponse::decode(bin.as_slice())?;
    let validator = response.validator.unwrap();
    assert_eq!(validator.operator_address, validator_addr);
    assert_eq!(validator.status, BondStatus::Bonded as i32);
    assert_eq!(validator.tokens, "42000000");
    assert_eq!(validator.delegator_shares, "0");
    assert_eq!(validator.min_self_delegation, "1");
    assert_eq!(validator.description.unwrap().moniker, "validator-3");

    let pubkey = validator.consensus_pubkey.unwrap();
    assert_eq!(pubkey.type_url, "/cosmos.crypto.ed25519.PubKey");

    let commission = validator.commission.unwrap();
    let rates = commission.commission_rates.unwrap();
    assert_eq!(rates.rate, "100000000000000000");
    assert_eq!(rates.max_rate, "200000000000000000");
    assert_eq!(rates.max_change_rate, "10000000000000000");
    assert_eq!(commission.update_time.unwrap().seconds, 0);
    Ok(())
}

#[test]
fn test_query_proto_uses_configured_prefix() -> ContractResult<()> {
    let mut deps = mock_dependencies();
    store_bonded_validator(deps.as_mut().storage, &mock_validator(4, 1, 0), 1)?;
    set_params(
        deps.as_mut().storage,
        &Params {
            validator_address_prefix: "cosmosvaloper".to_string(),
            ..Params::default()
        },
    )?;

    let keeper = StoreKeeper::new(deps.as_ref().storage);
    let err = query_validator_proto(&keeper, &bech32_val_addr(VALIDATOR_ADDRESS_PREFIX, 4))
        .unwrap_err();
    assert!(matches!(err, ContractError::Address(_)));

    let validator_addr = bech32_val_addr("cosmosvaloper", 4);
    let bin = query_validator_proto(&keeper, &validator_addr)?;
    let response = QueryValidatorResponse::decode(bin.as_slice())?;
    assert_eq!(response.validator.unwrap().operator_address, validator_addr);
    Ok(())
}

#[test]
fn test_query_proto_unknown_validator() {
    let deps = mock_dependencies();
    let keeper = StoreKeeper::new(deps.as_ref().storage);
    let err =
        query_validator_proto(&keeper, &bech32_val_addr(VALIDATOR_ADDRESS_PREFIX, 5)).unwrap_err();
    assert!(matches!(err, ContractError::ValidatorNotFound(_)));
}

#[test]
fn test_query_stargate_unknown_path() {
    let deps = mock_dependencies();
    let keeper = StoreKeeper::new(deps.as_ref().storage);
    let err = query_stargate(&keeper, "/cosmos.staking.v1beta1.Query/Pool", &[]).unwrap_err();
    assert!(matches!(err, ContractError::UnknownQueryPath(_)));
}

#[test]
fn test_query_proto_carries_unbonding_hold() -> ContractResult<()> {
    let mut deps = mock_dependencies();
    store_bonded_validator(deps.as_mut().storage, &mock_validator(3, 42, 77), 42)?;
    store_bonded_validator(deps.as_mut().storage, &mock_validator(4, 42, 0), 42)?;

    let keeper = StoreKeeper::new(deps.as_ref().storage);
    let bin = query_validator_proto(&keeper, &bech32_val_addr(VALIDATOR_ADDRESS_PREFIX, 3))?;
    let validator = ProtoQueryValidatorResponse::decode(bin.as_slice())?
        .validator
        .unwrap();
    assert_eq!(validator.unbonding_on_hold_ref_count, 1);
    assert_eq!(validator.unbonding_ids, vec![77]);

    let expected = CompatibilityKeeper::new(&keeper).validator(&val_addr(3))?;
    assert_eq!(
        validator.unbonding_on_hold_ref_count,
        expected.unbonding_on_hold_ref_count
    );
    assert_eq!(validator.unbonding_ids, expected.unbonding_ids);

    let bin = query_validator_proto(&keeper, &bech32_val_addr(VALIDATOR_ADDRESS_PREFIX, 4))?;
    let validator = ProtoQueryValidatorResponse::decode(bin.as_slice())?
        .validator
        .unwrap();
    assert_eq!(validator.unbonding_on_hold_ref_count, 0);
    assert!(validator.unbonding_ids.is_empty());
    Ok(())
}

#[test]
fn test_query_proto_accepts_uppercase_address() -> ContractResult<()> {
    let mut deps = mock_dependencies();
    store_bonded_validator(deps.as_mut().storage, &mock_validator(6, 1, 0), 1)?;

    let keeper = StoreKeeper::new(deps.as_ref().storage);
    let validator_addr = bech32_val_addr(VALIDATOR_ADDRESS_PREFIX, 6);
    let bin = query_validator_proto(&keeper, &validator_addr.to_uppercase())?;
    let response = QueryValidatorResponse::decode(bin.as_slice())?;
    assert_eq!(response.validator.unwrap().operator_address, validator_addr);
    Ok(())
}
