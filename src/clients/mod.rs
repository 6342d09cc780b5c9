//! One typed client per API resource family.
//!
//! Each client owns a [`RequestExecutor`](crate::executor::RequestExecutor) built from
//! [`json_default`](crate::specification::json_default) and keeps no state between
//! calls, so clients can be cloned and used from several threads at once.

mod pet;
mod store;
mod user;

pub use pet::PetClient;
pub use store::StoreClient;
pub use user::UserClient;
