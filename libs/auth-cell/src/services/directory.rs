use shared_models::auth::{UserProfile, UserRole};

struct DemoAccount {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    role: UserRole,
    department: Option<&'static str>,
}

// One account per dashboard view
const DEMO_ACCOUNTS: &[DemoAccount] = &[
    DemoAccount {
        id: "1",
        name: "Admin User",
        email: "admin@clinic.com",
        role: UserRole::SuperAdmin,
        department: None,
    },
    DemoAccount {
        id: "2",
        name: "Dr. Emily Chen",
        email: "emily.chen@clinic.com",
        role: UserRole::ClinicStaff,
        department: Some("Cardiology"),
    },
    DemoAccount {
        id: "3",
        name: "Nurse Olivia Reed",
        email: "olivia.reed@clinic.com",
        role: UserRole::ClinicStaff,
        department: Some("Pediatrics"),
    },
    DemoAccount {
        id: "4",
        name: "Sarah Johnson",
        email: "sarah.johnson@example.com",
        role: UserRole::Patient,
        department: None,
    },
    DemoAccount {
        id: "5",
        name: "Emma Davis",
        email: "emma.davis@example.com",
        role: UserRole::Patient,
        department: None,
    },
];

/// Looks up a demo account by email, ignoring case and surrounding spaces.
pub fn find_demo_profile(email: &str) -> Option<UserProfile> {
    let email = email.trim();
    DEMO_ACCOUNTS
        .iter()
        .find(|account| account.email.eq_ignore_ascii_case(email))
        .map(|account| UserProfile {
            id: account.id.to_string(),
            name: account.name.to_string(),
            email: account.email.to_string(),
            role: account.role,
            avatar: None,
            department: account.department.map(str::to_string),
        })
}

pub fn demo_profiles() -> Vec<UserProfile> {
    DEMO_ACCOUNTS
        .iter()
        .filter_map(|account| find_demo_profile(account.email))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        let profile = find_demo_profile("  Admin@Clinic.com ").unwrap();
        assert_eq!(profile.role, UserRole::SuperAdmin);
    }

    #[test]
    fn test_every_role_has_an_account() {
        let profiles = demo_profiles();
        for role in [UserRole::SuperAdmin, UserRole::ClinicStaff, UserRole::Patient] {
            assert!(profiles.iter().any(|p| p.role == role));
        }
    }

    #[test]
    fn test_staff_accounts_have_departments() {
        assert!(demo_profiles()
            .iter()
            .filter(|p| p.role == UserRole::ClinicStaff)
            .all(|p| p.department.is_some()));
    }
}
