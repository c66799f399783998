pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod schedule;
pub mod validation;
pub mod web;
