pub mod genesis;
pub mod restore;
pub mod state;
pub mod transaction;
pub mod transaction_engine;
