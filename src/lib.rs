//! Tool-call dispatch core for a conversational agricultural assistant.
//!
//! The model issues batches of function calls (market prices, scheme
//! search, crop-disease diagnosis); [`dispatcher::Dispatcher`] validates
//! and executes them against the external [`tools::ToolSet`] collaborators
//! and returns the response batch the model expects, while
//! [`normalize`] shapes the heterogeneous results for the dashboard.

pub mod dispatcher;
pub mod normalize;
pub mod session;
pub mod tool_registry;
pub mod tools;
pub mod types;

#[cfg(test)]
mod mocks;
