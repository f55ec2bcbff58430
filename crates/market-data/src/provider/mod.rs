//! Quote provider abstraction and implementations.

mod traits;
pub mod yahoo;

pub use traits::QuoteProvider;
pub use yahoo::YahooProvider;
