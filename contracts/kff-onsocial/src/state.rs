use crate::constants::FIRST_TOKEN_ID;
use crate::errors::KffError;
use crate::events::KffEvent;
use crate::types::{Allocation, LedgerConfig, StorageKey};
use near_sdk::json_types::{U128, U64};
use near_sdk::store::LookupMap;
use near_sdk::{env, near, AccountId};
use semver::Version;

#[near(serializers = [borsh])]
pub struct KffContractState {
    pub version: String,
    pub manager: AccountId,
    pub config: LedgerConfig,
    pub min_deposit: u128,
    // Count of successful allocations; also the highest token id handed out.
    pub minted: u64,
    pub allocations: LookupMap<u64, Allocation>,
    pub proceeds: u128,
}

impl KffContractState {
    pub fn new(manager: AccountId, config: LedgerConfig, min_deposit: u128) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            manager,
            config,
            min_deposit,
            minted: 0,
            allocations: LookupMap::new(StorageKey::Allocations),
            proceeds: 0,
        }
    }

    pub fn is_manager(&self, account_id: &AccountId) -> bool {
        &self.manager == account_id
    }

    pub fn assert_manager(&self) -> Result<(), KffError> {
        if !self.is_manager(&env::predecessor_account_id()) {
            return Err(KffError::Unauthorized);
        }
        Ok(())
    }

    /// Validates `payment` and, only if it clears the threshold, records the
    /// next token id for `owner_id`. A rejected call leaves every field as it was.
    pub fn allocate(&mut self, owner_id: AccountId, payment: u128) -> Result<u64, KffError> {
        if payment < self.min_deposit {
            return Err(KffError::PaymentTooLow);
        }

        let token_id = self
            .minted
            .checked_add(1)
            .ok_or_else(|| KffError::InternalError("Token id counter overflow".into()))?;
        let proceeds = self
            .proceeds
            .checked_add(payment)
            .ok_or_else(|| KffError::InternalError("Proceeds overflow".into()))?;
        if self.allocations.contains_key(&token_id) {
            return Err(KffError::InternalError(format!(
                "Allocation record for token {} already exists",
                token_id
            )));
        }

        self.allocations.insert(
            token_id,
            Allocation {
                owner_id: owner_id.clone(),
                payment: U128(payment),
            },
        );
        self.minted = token_id;
        self.proceeds = proceeds;

        KffEvent::Allocated {
            token_id: U64(token_id),
            owner_id,
            payment: U128(payment),
        }
        .emit();

        Ok(token_id)
    }

    pub fn allocation(&self, token_id: u64) -> Result<&Allocation, KffError> {
        if !self.is_allocated(token_id) {
            return Err(KffError::NotFound(token_id));
        }
        self.allocations
            .get(&token_id)
            .ok_or_else(|| KffError::missing_record(token_id))
    }

    pub fn is_allocated(&self, token_id: u64) -> bool {
        token_id >= FIRST_TOKEN_ID && token_id <= self.minted
    }

    /// Proceeds that can leave the account without dipping into the balance
    /// staked for storage.
    pub fn withdrawable(&self) -> u128 {
        let storage_cost = env::storage_byte_cost()
            .as_yoctonear()
            .saturating_mul(env::storage_usage() as u128);
        let available = env::account_balance()
            .as_yoctonear()
            .saturating_sub(storage_cost);
        self.proceeds.min(available)
    }

    pub fn debit_proceeds(&mut self, amount: Option<u128>) -> Result<u128, KffError> {
        let withdrawable = self.withdrawable();
        let amount = amount.unwrap_or(withdrawable);
        if amount == 0 {
            return Err(KffError::InsufficientProceeds(
                "nothing to withdraw".into(),
            ));
        }
        if amount > withdrawable {
            return Err(KffError::InsufficientProceeds(format!(
                "requested {} but only {} is withdrawable",
                amount, withdrawable
            )));
        }
        self.proceeds -= amount;
        Ok(amount)
    }

    pub fn credit_proceeds(&mut self, amount: u128) {
        self.proceeds = self.proceeds.saturating_add(amount);
    }

    pub fn set_manager(&mut self, new_manager: AccountId) -> Result<AccountId, KffError> {
        self.assert_manager()?;
        Ok(std::mem::replace(&mut self.manager, new_manager))
    }

    /// Bumps the stored version after a code upgrade. Ledger contents are
    /// carried over untouched.
    pub fn migrate_version(&mut self) -> Result<(), KffError> {
        const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");
        let current_version = Version::parse(CURRENT_VERSION)
            .map_err(|_| KffError::InternalError("Invalid crate version".into()))?;
        let stored_version = Version::parse(&self.version).map_err(|_| {
            KffError::InternalError(format!("Invalid stored version {}", self.version))
        })?;

        if stored_version >= current_version {
            env::log_str("State is at current or newer version, no migration needed");
            return Ok(());
        }

        env::log_str(&format!("Migrating from state version {}", self.version));
        let old_version = std::mem::replace(&mut self.version, CURRENT_VERSION.to_string());
        KffEvent::StateMigrated {
            old_version,
            new_version: CURRENT_VERSION.to_string(),
        }
        .emit();
        Ok(())
    }
}
