pub mod column;
pub mod error;
pub mod types;

pub use column::{CHECKBOX_KEY, Column, ColumnDef, ColumnMap, ColumnRole, ORDER_KEY};
pub use error::{CacheError, Result};
pub use types::{IdentityIndex, Record, Scope, identity_of, merge_into};
