//! lintbench - synthetic JavaScript corpus generator and linter benchmark
//!
//! The library has two halves. The generator ([`patterns`], [`composer`],
//! [`fixtures`], [`corpus`]) deterministically writes a tree of JavaScript
//! files sized by [`config::SizeProfile`]. The benchmark ([`runner`],
//! [`diagnostics`], [`driver`], [`report`]) times two external linters
//! against that tree and compares them.

pub mod cli;
pub mod composer;
pub mod config;
pub mod corpus;
pub mod diagnostics;
pub mod driver;
pub mod fixtures;
pub mod fragment;
pub mod patterns;
pub mod report;
pub mod runner;
