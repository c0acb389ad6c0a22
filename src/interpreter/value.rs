/// Runtime value representation.
///
/// Defines the `Value` enum produced by evaluation. Values are small and
/// `Copy`: closures and partially applied builtins borrow their bodies from
/// the program and refer to their environment by index into the evaluator's
/// per-call frame arena.
pub mod core;
