pub mod engine;
pub mod error;
pub mod feedback_codec;
pub mod ledger;
pub mod protocol;
pub mod scoring_client;
pub mod session;
