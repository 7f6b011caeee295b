pub mod identity;

pub use identity::IdentityFunction;
