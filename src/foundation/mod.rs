/// Shared color type and opacity constants.
pub mod core;
/// Error taxonomy.
pub mod error;
pub(crate) mod math;
