// handlers/mod.rs - Two-tier handler layout
//
// Public (no session) → Admin (session required, enforced by the Access Gate)
pub mod admin; // /api/admin/*
pub mod public; // /api/properties, /api/states, /api/auth/*
