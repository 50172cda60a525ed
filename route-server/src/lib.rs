//! Landmark route resolver server.
//!
//! Answers "how do I get from this landmark to that one?" for a city
//! microbus network, from structured picks or free Arabic text.

pub mod cache;
pub mod config;
pub mod conversation;
pub mod dataset;
pub mod domain;
pub mod landmarks;
pub mod planner;
pub mod query;
pub mod snapshot;
pub mod web;
