//! Catalog search: free-text name matching, amount-range chips, and a product preselected from
//! a details link.

mod filter;
pub mod router;
mod session;

pub use filter::{filter_credits, AmountRange, AmountRangeParseError, CreditFilter};
pub use router::simulator_router;
pub use session::SimulatorSession;
