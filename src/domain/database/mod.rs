//! Database introspection domain.

mod row;
mod service;

pub use row::{row_to_json, RowMap};
pub use service::{
    DatabaseInfo, DatabaseInfoService, DatabaseMetadata, PoolInfo, QueryError, DRIVER_NAME,
    DRIVER_VERSION, PRODUCT_NAME,
};
