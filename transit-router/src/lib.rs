//! Bus route planner.
//!
//! Answers: "what is the fastest way from this stop to that one, counting
//! the wait before each bus?" Stops and bus lines become a weighted graph,
//! and routes are shortest paths through it.

pub mod config;
pub mod domain;
pub mod geo;
pub mod graph;
pub mod network;
pub mod requests;
pub mod router;
pub mod web;
