//! # Nav Core - Domain Module
//! 
//! Entities shared by every pipeline stage.

pub mod menu_item;
pub mod viewer;
pub mod content;

pub use menu_item::{count_nodes, find_by_path, MenuId, MenuItem};
pub use viewer::Viewer;
pub use content::{ContentUnit, ResolvedNode};
