pub mod account;

pub use account::AccountDataSource;
