// handlers/public/mod.rs - Public catalog and session endpoints
//
// Route Prefix: /api/properties, /api/states, /api/auth/*
// No session required; /api/auth/me verifies the cookie itself.

pub mod properties;
pub mod session;
pub mod states;
