//! Concrete infrastructure adapters: a Redis-backed draft store and commit
//! lock, a SQLite relational store for projects, an HTTP blob-metadata
//! client, and the compiled-once template registry. Every adapter here
//! implements a trait from `sitecraft-core`; nothing in `sitecraft-core`
//! depends back on this crate.

pub mod blob;
pub mod config;
pub mod redis;
pub mod sqlite;
pub mod template;
