//! Middleware wrapped around the resource routes.
//!
//! `auth` checks credentials and roles, `rate_limit` throttles per client IP and
//! `tracing` emits one span per request.

pub mod auth;
pub mod rate_limit;
pub mod tracing;
