//! `keel-application` — application-layer outcomes.
//!
//! Maps domain results onto transport-friendly shapes: [`ErrorModel`] for
//! individual findings and [`ApplicationResult`] for whole outcomes.

pub mod catalog;
pub mod error_model;
pub mod result;

pub use catalog::GenericErrorCodes;
pub use error_model::ErrorModel;
pub use result::ApplicationResult;
