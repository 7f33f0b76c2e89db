//! KFF issuance ledger. Hands out sequential token ids, starting at 1, to
//! callers who attach at least the configured minimum deposit.

use crate::constants::{GAS_FOR_MIGRATE, GAS_FOR_WITHDRAW_CALLBACK, MIN_MINT_DEPOSIT};
use crate::errors::KffError;
use crate::events::KffEvent;
use crate::state::KffContractState;
use crate::types::{AllocationView, ConfigView, LedgerConfig};
use near_sdk::json_types::{U128, U64};
use near_sdk::{
    env, ext_contract, near, require, AccountId, NearToken, PanicOnDefault, Promise,
};

pub mod constants;
mod errors;
mod events;
mod state;
mod types;

#[ext_contract(ext_self)]
pub trait SelfCallback {
    fn on_withdraw(&mut self, receiver_id: AccountId, amount: U128);
}

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct KffContract {
    state: KffContractState,
}

#[near]
impl KffContract {
    /// The caller becomes the manager. `reserved` defaults to 0 and
    /// `min_deposit` to 0.1 NEAR.
    #[init]
    pub fn new(
        name: String,
        symbol: String,
        reserved: Option<u64>,
        metadata: String,
        min_deposit: Option<U128>,
    ) -> Self {
        let min_deposit = min_deposit.map_or(MIN_MINT_DEPOSIT, |d| d.0);
        require!(
            min_deposit > 0,
            KffError::InvalidInput("min_deposit must be positive".into()).to_string()
        );
        let config = LedgerConfig {
            name,
            symbol,
            reserved: reserved.unwrap_or(0),
            metadata,
        };
        Self {
            state: KffContractState::new(env::predecessor_account_id(), config, min_deposit),
        }
    }

    /// Allocates the next token id to `receiver_id`, or to the caller when
    /// omitted. The whole attached deposit is the payment.
    #[payable]
    #[handle_result]
    pub fn mint(&mut self, receiver_id: Option<AccountId>) -> Result<U64, KffError> {
        let owner_id = receiver_id.unwrap_or_else(env::predecessor_account_id);
        let payment = env::attached_deposit().as_yoctonear();
        self.state.allocate(owner_id, payment).map(U64)
    }

    #[handle_result]
    pub fn owner_of(&self, token_id: U64) -> Result<AccountId, KffError> {
        self.state
            .allocation(token_id.0)
            .map(|allocation| allocation.owner_id.clone())
    }

    pub fn total_allocated(&self) -> U64 {
        U64(self.state.minted)
    }

    #[handle_result]
    pub fn get_allocation(&self, token_id: U64) -> Result<Option<AllocationView>, KffError> {
        match self.state.allocation(token_id.0) {
            Ok(allocation) => Ok(Some(AllocationView {
                token_id,
                owner_id: allocation.owner_id.clone(),
                payment: allocation.payment,
            })),
            Err(KffError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn get_config(&self) -> ConfigView {
        let config = &self.state.config;
        ConfigView {
            name: config.name.clone(),
            symbol: config.symbol.clone(),
            reserved: config.reserved,
            metadata: config.metadata.clone(),
            min_deposit: U128(self.state.min_deposit),
        }
    }

    pub fn get_min_deposit(&self) -> U128 {
        U128(self.state.min_deposit)
    }

    pub fn get_manager(&self) -> AccountId {
        self.state.manager.clone()
    }

    pub fn get_proceeds(&self) -> U128 {
        U128(self.state.proceeds)
    }

    pub fn version(&self) -> String {
        self.state.version.clone()
    }

    // --- Manager ---

    #[handle_result]
    pub fn set_manager(&mut self, new_manager: AccountId) -> Result<(), KffError> {
        let old_manager = self.state.set_manager(new_manager.clone())?;
        KffEvent::ManagerUpdated {
            old_manager,
            new_manager,
        }
        .emit();
        Ok(())
    }

    /// Sends accepted payments out. Defaults: everything withdrawable, to the manager.
    #[handle_result]
    pub fn withdraw(
        &mut self,
        receiver_id: Option<AccountId>,
        amount: Option<U128>,
    ) -> Result<Promise, KffError> {
        self.state.assert_manager()?;
        let receiver_id = receiver_id.unwrap_or_else(|| self.state.manager.clone());
        let amount = self.state.debit_proceeds(amount.map(|a| a.0))?;

        Ok(Promise::new(receiver_id.clone())
            .transfer(NearToken::from_yoctonear(amount))
            .then(
                ext_self::ext(env::current_account_id())
                    .with_static_gas(GAS_FOR_WITHDRAW_CALLBACK)
                    .on_withdraw(receiver_id, U128(amount)),
            ))
    }

    #[private]
    pub fn on_withdraw(&mut self, receiver_id: AccountId, amount: U128) {
        if near_sdk::is_promise_success() {
            KffEvent::ProceedsWithdrawn {
                receiver_id,
                amount,
            }
            .emit();
        } else {
            env::log_str(&format!(
                "Transfer of {} to {} failed, proceeds restored",
                amount.0, receiver_id
            ));
            self.state.credit_proceeds(amount.0);
        }
    }

    #[handle_result]
    pub fn update_contract(&mut self) -> Result<Promise, KffError> {
        self.state.assert_manager()?;
        let code = env::input()
            .ok_or_else(|| KffError::InvalidInput("Missing contract code".into()))?
            .to_vec();
        KffEvent::ContractUpgraded {
            manager: env::predecessor_account_id(),
            timestamp: env::block_timestamp_ms(),
        }
        .emit();
        Ok(Promise::new(env::current_account_id())
            .deploy_contract(code)
            .function_call(
                "migrate".to_string(),
                vec![],
                NearToken::from_yoctonear(0),
                GAS_FOR_MIGRATE,
            ))
    }

    #[private]
    #[init(ignore_state)]
    pub fn migrate() -> Self {
        let mut contract: Self = env::state_read()
            .unwrap_or_else(|| env::panic_str("No ledger state to migrate"));
        if let Err(e) = contract.state.migrate_version() {
            env::panic_str(&e.to_string());
        }
        contract
    }
}
