//! Domain services used by the HTTP routes.
//!
//! Route handlers stay focused on protocol translation; file access and
//! document encoding live here.

pub mod persistence;
