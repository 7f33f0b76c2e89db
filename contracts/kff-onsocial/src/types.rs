use near_sdk::json_types::{U128, U64};
use near_sdk::{near, AccountId, BorshStorageKey};

#[derive(BorshStorageKey)]
#[near]
pub(crate) enum StorageKey {
    Allocations,
}

/// Construction-time configuration. Never mutated after `new`.
#[near(serializers = [borsh, json])]
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerConfig {
    pub name: String,
    pub symbol: String,
    /// Stored and reported as given; no behavior is attached to it.
    pub reserved: u64,
    pub metadata: String,
}

#[near(serializers = [borsh, json])]
#[derive(Clone, Debug, PartialEq)]
pub struct Allocation {
    pub owner_id: AccountId,
    pub payment: U128,
}

#[near(serializers = [json])]
#[derive(Clone, Debug, PartialEq)]
pub struct AllocationView {
    pub token_id: U64,
    pub owner_id: AccountId,
    pub payment: U128,
}

#[near(serializers = [json])]
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigView {
    pub name: String,
    pub symbol: String,
    pub reserved: u64,
    pub metadata: String,
    pub min_deposit: U128,
}
