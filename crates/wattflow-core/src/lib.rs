//! Wattflow Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Wattflow layout
//! engine and its front ends. It includes:
//!
//! - **Geometry**: Points, sizes, extents and insets ([`geometry`] module)
//! - **Colors**: CSS color handling and the default palette ([`color::Color`])
//! - **Graph**: The typed flow graph input model and its validation ([`graph`] module)

pub mod color;
pub mod geometry;
pub mod graph;
