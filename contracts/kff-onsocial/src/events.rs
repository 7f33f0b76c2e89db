use near_sdk::json_types::{U128, U64};
use near_sdk::{near, AccountId};

#[near(event_json(standard = "onsocial"))]
pub enum KffEvent {
    #[event_version("1.0.0")]
    Allocated {
        token_id: U64,
        owner_id: AccountId,
        payment: U128,
    },
    #[event_version("1.0.0")]
    ManagerUpdated {
        old_manager: AccountId,
        new_manager: AccountId,
    },
    #[event_version("1.0.0")]
    ProceedsWithdrawn { receiver_id: AccountId, amount: U128 },
    #[event_version("1.0.0")]
    ContractUpgraded { manager: AccountId, timestamp: u64 },
    #[event_version("1.0.0")]
    StateMigrated {
        old_version: String,
        new_version: String,
    },
}
