// src/core.rs
pub mod frontmatter;
pub mod gate;
pub mod ignore;
pub mod links;
pub mod pipeline;
pub mod tags;
pub mod transform;
pub mod vault;
pub mod walker;
