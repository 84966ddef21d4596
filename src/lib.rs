pub mod card;
pub mod cli;
pub mod game;
pub mod rng;

#[cfg(test)]
mod integration_tests;
