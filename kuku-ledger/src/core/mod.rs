pub mod ledger;
pub mod runtime;
pub mod shared;
