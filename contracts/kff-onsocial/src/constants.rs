use near_sdk::Gas;

/// 0.1 NEAR. Default mint price when `new` is called without `min_deposit`.
pub const MIN_MINT_DEPOSIT: u128 = 100_000_000_000_000_000_000_000;

/// Rejection text callers match on; keep it byte-for-byte.
pub const ERR_NOT_ENOUGH_ETH: &str = "Not enough eth";

pub const FIRST_TOKEN_ID: u64 = 1;

pub const GAS_FOR_MIGRATE: Gas = Gas::from_tgas(100);
pub const GAS_FOR_WITHDRAW_CALLBACK: Gas = Gas::from_tgas(10);
