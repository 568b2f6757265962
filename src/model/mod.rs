//! Plain data types persisted in the store.
//!
//! Every type serializes with camelCase field names, matching the JSON the
//! presentation layer consumes.

pub mod cart;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use cart::*;
pub use order::*;
pub use product::*;
pub use session::*;
pub use user::*;
