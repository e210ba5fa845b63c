pub mod balance;
pub mod expected;
