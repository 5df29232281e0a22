//! Top-level facade crate for reqmeter.
//!
//! Re-exports the recording core and the axum adapter so users can depend on a single crate.

pub mod core {
    pub use reqmeter_core::*;
}

pub mod axum {
    pub use reqmeter_axum::*;
}
