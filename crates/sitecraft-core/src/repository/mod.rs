//! Trait ports onto the relational store. Concrete adapters live in
//! `sitecraft-infra`; this crate only depends on the trait.

pub mod project;
