//! SQLite schema definition.

/// Complete database schema for medibook.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Service Catalog
-- ============================================================================

CREATE TABLE IF NOT EXISTS services (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    amount REAL NOT NULL CHECK (amount >= 0),
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS doctor_services (
    id TEXT PRIMARY KEY,
    doctor TEXT NOT NULL,
    service TEXT NOT NULL,
    hospital TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_doctor_services_doctor ON doctor_services(doctor);

-- ============================================================================
-- Directory
-- ============================================================================

CREATE TABLE IF NOT EXISTS hospitals (
    id TEXT PRIMARY KEY,
    hospital_id TEXT NOT NULL UNIQUE,
    hospital_type TEXT NOT NULL CHECK (hospital_type IN ('Government', 'Private')),
    hospital_name TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS doctors (
    id TEXT PRIMARY KEY,
    full_name TEXT NOT NULL,
    date_of_birth TEXT NOT NULL,
    gender TEXT NOT NULL CHECK (gender IN ('Male', 'Female', 'Other')),
    specialization TEXT NOT NULL,
    medical_license_number TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    phone TEXT NOT NULL,
    years_of_experience INTEGER NOT NULL CHECK (years_of_experience >= 0),
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- ============================================================================
-- Appointments (sub-appointments embedded as JSON)
-- ============================================================================

CREATE TABLE IF NOT EXISTS appointments (
    id TEXT PRIMARY KEY,
    hospital TEXT NOT NULL,
    is_government INTEGER NOT NULL,
    service TEXT NOT NULL,
    doctor TEXT NOT NULL,
    patient_details TEXT NOT NULL,              -- JSON object
    slots TEXT NOT NULL DEFAULT '[]',           -- JSON array of SubAppointment
    payment TEXT NOT NULL,                      -- JSON object {amount, method, status}
    user_email TEXT NOT NULL,
    version INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_appointments_user_email ON appointments(user_email);

-- ============================================================================
-- Cancellation Archive (immutable after creation)
-- ============================================================================

CREATE TABLE IF NOT EXISTS cancelled_appointments (
    id TEXT PRIMARY KEY,
    user_email TEXT NOT NULL,
    hospital TEXT NOT NULL,
    service TEXT NOT NULL,
    service_price REAL NOT NULL,
    doctor TEXT NOT NULL,
    cancelled_date TEXT NOT NULL,
    cancelled_time TEXT NOT NULL,               -- JSON array of strings
    reason TEXT NOT NULL,
    description TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_cancelled_user_email ON cancelled_appointments(user_email);

CREATE TRIGGER IF NOT EXISTS cancelled_appointments_immutable BEFORE UPDATE ON cancelled_appointments
BEGIN
    SELECT RAISE(ABORT, 'Cancelled appointments are immutable');
END;

-- ============================================================================
-- Accounts
-- ============================================================================

CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    aid TEXT UNIQUE,                            -- NULL for admins
    full_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    phone TEXT,
    role TEXT NOT NULL CHECK (role IN ('Patient', 'Admin')),
    qr_code_url TEXT,
    created_at TEXT NOT NULL
);

-- Named counters, incremented atomically
CREATE TABLE IF NOT EXISTS counters (
    name TEXT PRIMARY KEY,
    value INTEGER NOT NULL
);
"#;
