//! Server-rendered HTML for the shell.
//!
//! Pages are plain strings built with `format!`, wrapped by
//! [`layout::page`]. Every piece of backend or user text goes through
//! [`components::escape`] before it is interpolated.
//!
//! # Structure
//!
//! - [`layout`]: document shell and navigation sidebar
//! - [`components`]: small reusable fragments (alerts, lists, metrics)
//! - [`profile_form`]: the profile form shared by both planners
//! - [`pages`]: one renderer per view

pub mod components;
pub mod layout;
pub mod pages;
pub mod profile_form;
