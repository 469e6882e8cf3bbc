pub mod authorizer;
pub mod errors;
pub mod gate;
pub mod ledger;
pub mod models;
pub mod ports;
