//! Mathematical foundations.
//!
//! - [`special`]: error function, log-gamma and regularised incomplete
//!   beta/gamma functions for closed-form distribution curves

pub mod special;
