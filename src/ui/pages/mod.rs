//! One renderer per view.
//!
//! Each `render` takes the view's explicit state (transcript, last
//! submission, action outcome) and returns the complete page.

pub mod coach;
pub mod food;
pub mod home;
pub mod meal;
pub mod workout;
