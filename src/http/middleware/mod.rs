//! Request/response middleware applied to every route.

pub mod cors;
