use shared_models::auth::{UserProfile, UserRole};

/// Ready-made profiles for handler and session tests.
pub struct TestProfiles;

impl TestProfiles {
    pub fn super_admin() -> UserProfile {
        UserProfile {
            id: "admin-1".to_string(),
            name: "Admin User".to_string(),
            email: "admin@clinic.test".to_string(),
            role: UserRole::SuperAdmin,
            avatar: None,
            department: None,
        }
    }

    pub fn clinic_staff(department: &str) -> UserProfile {
        UserProfile {
            id: "staff-1".to_string(),
            name: "Staff User".to_string(),
            email: "staff@clinic.test".to_string(),
            role: UserRole::ClinicStaff,
            avatar: None,
            department: Some(department.to_string()),
        }
    }

    pub fn patient(name: &str) -> UserProfile {
        UserProfile {
            id: "patient-1".to_string(),
            name: name.to_string(),
            email: "patient@clinic.test".to_string(),
            role: UserRole::Patient,
            avatar: None,
            department: None,
        }
    }
}
