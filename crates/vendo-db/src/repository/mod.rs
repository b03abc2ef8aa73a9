//! # Repositories
//!
//! Repository implementations over the connection pool.
//!
//! The snapshot store only needs one: a keyed blob table. Values are
//! opaque here - the versioned envelope format belongs to `vendo-store`.

pub mod snapshot;
