pub mod config;
pub use crate::config::*;

pub mod core;
pub use crate::core::*;

pub mod error;
pub use crate::error::*;

pub mod import;
pub use crate::import::*;

pub mod parser;
pub use crate::parser::*;

pub mod reconciler;
pub use crate::reconciler::*;

pub mod record;
pub use crate::record::*;

pub mod session;
pub use crate::session::*;

pub mod store;
pub use crate::store::*;

pub mod summary;
pub use crate::summary::*;

pub mod template;
pub use crate::template::*;

pub mod view;
pub use crate::view::*;
