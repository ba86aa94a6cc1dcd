//! Lowering rules, one module per construct.
//!
//! Every module adds methods to [`LoweringPass`](crate::lowering_pass::LoweringPass);
//! the pass's `SyntaxRewriter` hooks dispatch to them.

mod arrow_es5;
mod class_es5;
mod enum_es5;
mod functions_es5;
mod namespace_es5;
mod parameters_es5;
mod super_es5;
mod type_erasure;

pub(crate) use parameters_es5::ParameterFacts;
pub(crate) use type_erasure::leading_after_modifier;
