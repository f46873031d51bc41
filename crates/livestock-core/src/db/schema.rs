//! SQLite schema definition.

/// Complete database schema for the livestock portal.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Herd
-- ============================================================================

CREATE TABLE IF NOT EXISTS animals (
    id TEXT PRIMARY KEY,
    owner_id TEXT NOT NULL,
    name TEXT NOT NULL,
    species TEXT NOT NULL,
    breed TEXT,
    health_status TEXT NOT NULL DEFAULT 'healthy',   -- healthy, sick, under_treatment, quarantine, ...
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_animals_owner ON animals(owner_id);
CREATE INDEX IF NOT EXISTS idx_animals_status ON animals(health_status);

CREATE TABLE IF NOT EXISTS vaccinations (
    id TEXT PRIMARY KEY,
    animal_id TEXT NOT NULL REFERENCES animals(id) ON DELETE CASCADE,
    vaccine_name TEXT NOT NULL,
    date_administered TEXT,                          -- YYYY-MM-DD
    next_due_date TEXT                               -- YYYY-MM-DD, NULL = no follow-up
);

CREATE INDEX IF NOT EXISTS idx_vaccinations_animal ON vaccinations(animal_id);
CREATE INDEX IF NOT EXISTS idx_vaccinations_due ON vaccinations(next_due_date);

CREATE TABLE IF NOT EXISTS health_records (
    id TEXT PRIMARY KEY,
    animal_id TEXT NOT NULL REFERENCES animals(id) ON DELETE CASCADE,
    record_type TEXT,
    diagnosis TEXT,
    treatment TEXT,
    record_date TEXT NOT NULL,                       -- YYYY-MM-DD
    next_checkup_date TEXT                           -- YYYY-MM-DD
);

CREATE INDEX IF NOT EXISTS idx_health_records_animal ON health_records(animal_id);
CREATE INDEX IF NOT EXISTS idx_health_records_date ON health_records(record_date);

-- ============================================================================
-- Marketplace
-- ============================================================================

CREATE TABLE IF NOT EXISTS listings (
    id TEXT PRIMARY KEY,
    seller_id TEXT NOT NULL,
    title TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'active',
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS enquiries (
    id TEXT PRIMARY KEY,
    listing_id TEXT NOT NULL,                        -- outlives its listing
    buyer_id TEXT NOT NULL,
    message TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'responded', 'closed')),
    reminder_sent INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL                         -- RFC 3339, UTC, second precision
);

CREATE INDEX IF NOT EXISTS idx_enquiries_reminder ON enquiries(status, reminder_sent, created_at);

CREATE TABLE IF NOT EXISTS notifications (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    title TEXT NOT NULL,
    message TEXT NOT NULL,
    kind TEXT NOT NULL,
    reference_id TEXT,
    read INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_notifications_user ON notifications(user_id, created_at);

-- ============================================================================
-- Admin
-- ============================================================================

CREATE TABLE IF NOT EXISTS user_roles (
    user_id TEXT PRIMARY KEY,
    role TEXT NOT NULL CHECK (role IN ('admin', 'moderator', 'farmer'))
);

CREATE TABLE IF NOT EXISTS sessions (
    token TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    expires_at TEXT NOT NULL
);

-- Append-only audit trail
CREATE TABLE IF NOT EXISTS admin_audit_logs (
    id TEXT PRIMARY KEY,
    admin_id TEXT NOT NULL,
    action TEXT NOT NULL,
    target_user_id TEXT,
    details TEXT NOT NULL DEFAULT '{}',              -- JSON object
    created_at TEXT NOT NULL
);

CREATE TRIGGER IF NOT EXISTS admin_audit_logs_no_update BEFORE UPDATE ON admin_audit_logs
BEGIN
    SELECT RAISE(ABORT, 'Audit log entries are immutable');
END;

CREATE INDEX IF NOT EXISTS idx_audit_admin ON admin_audit_logs(admin_id, created_at);
"#;

/// Tables whose changes are published on the change feed.
pub mod tables {
    pub const ANIMALS: &str = "animals";
    pub const VACCINATIONS: &str = "vaccinations";
    pub const HEALTH_RECORDS: &str = "health_records";
    pub const LISTINGS: &str = "listings";
    pub const ENQUIRIES: &str = "enquiries";
    pub const NOTIFICATIONS: &str = "notifications";
    pub const ADMIN_AUDIT_LOGS: &str = "admin_audit_logs";
}
