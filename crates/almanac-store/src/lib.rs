pub mod error;
pub mod json_bridge;
pub mod schema;
pub mod settings;
pub mod store;

pub use error::{Result, StoreError};
pub use json_bridge::{read_snapshot_file, write_snapshot_file};
pub use settings::{
    CONFIG_FILE, CONTENT_FILE, DATA_DIR_ENV, DB_FILE, builtin_content, load_config, load_content,
    open_engine, resolve_data_dir,
};
pub use store::Store;
