//! Validation for cabinets.
//!
//! Reconciles a decoded description with the files on disk and the user's
//! overrides. Problems are reported as [`ValidationStatus`] values on the
//! resulting [`CabinetDetail`], never as errors.

mod reconcile;
mod status;
mod template;

pub use reconcile::{
    reconcile, CabinetDetail, PartDetail, ReconcileOptions, VideoDetail, NO_DESCRIPTION,
};
pub use status::ValidationStatus;
pub use template::{check_template, match_confidence, TemplateSuggestion};
