//! Resources Module
//!
//! Shared learning resources (notes, links, snippets) with owner-only edits
//! and public likes.

pub mod db;
pub mod handlers;

pub use db::{NewResource, Resource, ResourceUpdate};
pub use handlers::{
    create_resource, delete_resource, get_resource, like_resource, list_resources,
    update_resource,
};
