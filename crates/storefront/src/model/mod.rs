//! # Domain Model
//!
//! Wire types shared by the API gateway and the stores. Every type mirrors a payload of the
//! storefront backend; unknown fields are ignored and missing ones fall back to defaults, so a
//! partially populated response still decodes.

pub mod cart;
pub mod order;
pub mod page;
pub mod product;
pub mod user;

pub use cart::*;
pub use order::*;
pub use page::*;
pub use product::*;
pub use user::*;
