//! # oncostage
//!
//! Command-line front end for `oncostage-core`: loads configuration and
//! case files, drives the staging engine and renders results in text or
//! JSON.

pub mod cli;
pub mod config;
pub mod report;
