pub mod builder;
pub mod db;
pub mod normalize;
pub mod query;
pub mod schema;
pub mod write;

pub use db::Store;
