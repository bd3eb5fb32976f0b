//! Sigma Core Types and Definitions
//!
//! This crate provides the foundational types for the Sigma schema-diagram
//! engine. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Model**: Domain snapshot types for schema projects ([`model`] module)
//! - **Scene**: The drawable node tree ([`scene`] module)
//! - **Text**: Text styles and intrinsic-size measurement ([`text`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod model;
pub mod scene;
pub mod text;
