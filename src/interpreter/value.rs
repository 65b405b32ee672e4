/// The `Value` enum and its operations.
///
/// Defines the runtime value variants, type queries, truthiness, display
/// formatting, and the construction-time array shape checks.
pub mod core;

/// Function values.
///
/// Defines the user-defined function object (declaration plus captured
/// environment) and the closed set of native functions.
pub mod function;
