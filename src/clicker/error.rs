use thiserror::Error;

/// Why a purchase was refused. A refused purchase never changes state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    #[error("Не хватает кликов! (нужно {need}, есть {have})")]
    InsufficientClicks { need: u64, have: u64 },

    #[error("Не хватает рублей! (нужно {need}₽, есть {have}₽)")]
    InsufficientFunds { need: u64, have: u64 },

    #[error("Уже куплено!")]
    AlreadyOwned,

    #[error("Уже активно!")]
    AlreadyActive,

    #[error("Максимальный уровень автокликера!")]
    MaxLevel,
}

/// Failures of the key-value store behind the save file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("storage read failed: {0}")]
    Read(String),

    #[error("storage write failed: {0}")]
    Write(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type PurchaseResult<T> = Result<T, PurchaseError>;
