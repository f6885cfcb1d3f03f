pub mod hash;
pub mod random;
#[cfg(feature = "postgres")]
pub mod cli;
