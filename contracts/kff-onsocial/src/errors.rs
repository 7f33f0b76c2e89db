use near_sdk_macros::NearSchema;

use crate::constants::ERR_NOT_ENOUGH_ETH;

#[derive(NearSchema, near_sdk::FunctionError)]
#[abi(json)]
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum KffError {
    PaymentTooLow,
    NotFound(u64),
    Unauthorized,
    InsufficientProceeds(String),
    InvalidInput(String),
    InternalError(String),
}

impl std::fmt::Display for KffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PaymentTooLow => f.write_str(ERR_NOT_ENOUGH_ETH),
            Self::NotFound(token_id) => write!(f, "Not found: token {}", token_id),
            Self::Unauthorized => {
                f.write_str("Unauthorized: only the manager can perform this action")
            }
            Self::InsufficientProceeds(msg) => write!(f, "Insufficient proceeds: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl KffError {
    pub fn missing_record(token_id: u64) -> Self {
        Self::InternalError(format!("No allocation record for token {}", token_id))
    }
}
