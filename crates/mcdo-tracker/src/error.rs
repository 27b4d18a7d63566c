use mcdo_core::TransferError;
use mcdo_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transfer(#[from] TransferError),
}
