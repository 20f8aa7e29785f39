//! Test data helpers for creating sample API payloads
//!
//! This module provides helper functions for building the JSON bodies the
//! ResQTrack backend returns for statistics, listings and imports.

use serde_json::{json, Value};

/// Admin token used across tests
pub fn test_admin_token() -> String {
    "test-admin-token".to_string()
}

/// Statistics response with twelve distinct locations
pub fn statistics_body() -> Value {
    json!({
        "statistics": {
            "ngos": {"total": 12, "approved": 9, "pending": 3},
            "volunteers": {"total": 40, "approved": 35, "pending": 5},
            "hospitals": {"total": 8, "24x7": 3},
            "police_stations": {"total": 5, "24x7": 5},
            "blood_banks": {"total": 4, "24x7": 1},
            "fire_stations": {"total": 3, "24x7": 3},
            "emergency_contacts": {"total": 6, "by_service_type": {"police": 2, "fire": 4}}
        },
        "location_distribution": {
            "ngos": {"Pune": 5, "Mumbai": 9, "Nagpur": 2, "Delhi": 12},
            "hospitals": {"Chennai": 7, "Kolkata": 1, "Jaipur": 11, "Surat": 3},
            "police_stations": {"Lucknow": 8, "Indore": 6, "Bhopal": 10, "Patna": 4}
        }
    })
}

/// Emergency contacts listing with three services
pub fn contacts_body() -> Value {
    json!({
        "contacts": [
            {
                "id": 1,
                "name": "Central Police Station",
                "service_type": "police",
                "phone": "100",
                "location": "Pune",
                "is_24x7": true,
                "priority_level": 1,
                "description": "Main station"
            },
            {
                "id": 2,
                "name": "Red Cross Blood Bank",
                "service_type": "blood_bank",
                "phone": "020-555-0101",
                "location": "Mumbai",
                "is_24x7": false,
                "priority_level": 2
            },
            {
                "id": 3,
                "name": "City Fire Brigade",
                "service_type": "fire",
                "phone": "101",
                "is_24x7": true,
                "priority_level": 3
            }
        ]
    })
}

/// Uploaded files listing with two files
pub fn files_body() -> Value {
    json!({
        "files": [
            {"name": "ngos.csv", "size": 1536, "modified": 1700000000.0},
            {"name": "hospitals.csv", "size": 0, "modified": 1700086400.0}
        ]
    })
}

/// Import response carrying the given statistics
pub fn import_body(successful: u64, failed: u64, skipped: u64, errors: &[&str]) -> Value {
    json!({
        "message": "Import completed",
        "stats": {
            "successful": successful,
            "failed": failed,
            "skipped": skipped,
            "errors": errors
        }
    })
}

/// Small CSV file body
pub fn sample_csv() -> Vec<u8> {
    b"name,phone,location\nHelping Paws,9999999999,Pune\n".to_vec()
}
