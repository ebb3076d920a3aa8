// handlers/admin/mod.rs - Administrative API (session required)
//
// Route Prefix: /api/admin/*
// Every request reaching these handlers has passed the Access Gate, which
// inserts the session Claims into request extensions.

pub mod properties;
