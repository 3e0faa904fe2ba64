//! Clustering of conversations into projects and derivation of project display names.

pub mod clustering;
pub mod naming;

pub use clustering::group_conversations_by_project;
pub use naming::derive_project_name;
