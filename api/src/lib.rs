//! This crate provides basic interfaces and data structures for the [`n3_parser`](https://docs.rs/n3_parser/) crate.
//!
//! Unlike plain RDF, N3 lets a quoted graph (a [`Formula`](model/struct.Formula.html)) stand in subject
//! or object position, so every type here owns its data.
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]
#![doc(test(attr(deny(warnings))))]

pub mod model;
pub mod parser;
pub mod sink;
