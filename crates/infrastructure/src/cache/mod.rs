mod redis;

pub use redis::RedisRecordCache;
