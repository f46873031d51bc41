//! Companion jobs for the livestock portal.
//!
//! Each handler is a plain function over the store, so it can be hosted by
//! any scheduler or HTTP runtime:
//!
//! - [`handle_impersonation`]: authorize an admin and audit an impersonation
//!   start/stop
//! - [`run_enquiry_reminders`]: nudge sellers about unanswered enquiries

pub mod enquiry_reminders;
pub mod error;
pub mod impersonation;
pub mod response;

pub use enquiry_reminders::*;
pub use error::*;
pub use impersonation::*;
pub use response::*;
