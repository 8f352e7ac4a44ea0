//! Pure pricing and margin calculations for a small seller.
//!
//! Two cooperating engines, both free of I/O and shared state: the
//! forward engine ([`pricing`]) derives breakeven and margin-satisfying
//! prices from cost inputs, and the reverse analyzer ([`reverse`]) audits
//! an already-chosen price for real profitability. Both sit on the tax
//! and commission primitives in [`costs`]; [`distribution`] reuses them
//! to express any price's components as percentages for presentation.
//!
//! Every function here is safe to call concurrently without locking:
//! each call owns its inputs and allocates its outputs.

pub mod costs;
pub mod distribution;
pub mod error;
pub mod pricing;
pub mod reverse;
pub mod types;
pub mod validate;

pub use error::PricingError;
pub use types::*;

/// Standard result type for all pricing operations
pub type PricingResult<T> = Result<T, PricingError>;
