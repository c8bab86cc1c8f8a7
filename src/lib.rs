pub mod boot_source_selections;
mod error;
pub mod handler;
pub mod model;
pub mod utils;

pub use crate::boot_source_selections::BootSourceSelections;
pub use crate::error::{Error, Result};
pub use crate::handler::{HandlerError, Record, SelectionsHandler};
pub use crate::model::boot_source::BootSource;
pub use crate::model::boot_source_selection::{BootSourceSelection, Field, SelectionKey};
pub use crate::model::selection_filters::{SelectionFilters, WILDCARD};
pub use crate::model::FieldType;
