/// Smallest unbonding id that marks a real hold. Ids below it mean "no hold".
pub const DEFAULT_UNBONDING_ID_START: u64 = 1;

/// Tokens per unit of consensus power.
pub const DEFAULT_POWER_REDUCTION: u128 = 1_000_000;

// address lengths accepted by the sdk address codec
pub const ADDRESS_LENGTH: usize = 20;
pub const LONG_ADDRESS_LENGTH: usize = 32;

pub const ED25519_PUBKEY_TYPE_URL: &str = "/cosmos.crypto.ed25519.PubKey";
pub const ED25519_PUBKEY_SIZE: usize = 32;

pub const VALIDATOR_ADDRESS_PREFIX: &str = "initvaloper";
pub const CONSENSUS_ADDRESS_PREFIX: &str = "initvalcons";
pub const VALIDATOR_QUERY_PATH: &str = "/cosmos.staking.v1beta1.Query/Validator";
