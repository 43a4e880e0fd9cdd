mod cached;
mod mysql;

pub use cached::CachedRecordStore;
pub use mysql::MySqlRecordStore;
