use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("Lot not found: {0}")]
    LotNotFound(Uuid),

    #[error("Invalid lot for {symbol}: {reason}")]
    InvalidLot { symbol: String, reason: String },
}
