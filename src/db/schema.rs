//! Database schema and migrations for Turnero.
//!
//! Migrations are applied sequentially when the database is first opened or
//! upgraded. The schema_version table tracks which ones have been applied.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: Users table
    r#"
CREATE TABLE users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    email         TEXT NOT NULL UNIQUE COLLATE NOCASE,
    username      TEXT NOT NULL,
    phone_number  TEXT NOT NULL,
    password      TEXT NOT NULL,           -- Argon2id PHC string
    created_at    TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: Clients (customers of the business)
    r#"
CREATE TABLE clients (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name    TEXT NOT NULL,
    last_name     TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE COLLATE NOCASE,
    phone_number  TEXT NOT NULL UNIQUE,
    address       TEXT,
    city          TEXT,
    notes         TEXT,
    created_at    TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v3: Server-held login sessions
    r#"
CREATE TABLE sessions (
    id          TEXT PRIMARY KEY,          -- UUID v4, the cookie value
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    expires_at  TEXT NOT NULL
);

CREATE INDEX idx_sessions_user_id ON sessions(user_id);
CREATE INDEX idx_sessions_expires_at ON sessions(expires_at);
"#,
];
