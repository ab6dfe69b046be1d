//! Scenario-based tests for apiline

mod assertions;
mod failure_handling;
mod success_chain;
