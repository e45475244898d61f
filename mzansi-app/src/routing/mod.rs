//! Department matcher
//!
//! Resolves a classified report to the municipal department contact that
//! should receive it. Pure lookup over static reference data; the contact
//! order is fixed as declared and the earliest match wins, so the result
//! is deterministic for a given input.

pub mod directory;

pub use directory::department_contacts;

use shared::models::DepartmentContact;

/// Match a report to a department contact.
///
/// Ordered passes, first match wins:
/// 1. any suggested department contains a contact alias;
/// 2. any suggested department contains the contact display name
///    (parenthetical suffix stripped);
/// 3. the primary category contains a contact keyword;
/// 4. fallback to the first contact whose name contains "General".
///
/// All comparisons are case-folded. `None` means no General contact is
/// configured, which is a directory defect rather than a runtime error.
pub fn match_department<'a>(
    contacts: &'a [DepartmentContact],
    suggested_department: &[String],
    primary_category: &str,
) -> Option<&'a DepartmentContact> {
    let suggestions: Vec<String> = suggested_department
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect();
    let category = primary_category.to_lowercase();

    let by_alias = contacts.iter().find(|contact| {
        contact
            .aliases
            .iter()
            .any(|alias| suggestions.iter().any(|s| s.contains(alias)))
    });
    if by_alias.is_some() {
        return by_alias;
    }

    let by_name = contacts.iter().find(|contact| {
        let bare = contact.bare_name();
        suggestions.iter().any(|s| s.contains(&bare))
    });
    if by_name.is_some() {
        return by_name;
    }

    let by_keyword = contacts.iter().find(|contact| {
        contact
            .keywords
            .iter()
            .any(|keyword| category.contains(keyword))
    });
    if by_keyword.is_some() {
        return by_keyword;
    }

    contacts.iter().find(|c| c.name.contains("General"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jra_report_routes_to_jra() {
        let contacts = department_contacts();
        let matched = match_department(
            contacts,
            &["Johannesburg Roads Agency (JRA)".to_string()],
            "Pothole on Main Road",
        )
        .unwrap();

        assert_eq!(matched.name, "Johannesburg Roads Agency (JRA)");
        assert_eq!(matched.phone, "0860 562 874");
        assert_eq!(matched.email, "hotline@jra.org.za");
    }

    #[test]
    fn keyword_pass_covers_unsuggested_categories() {
        let contacts = department_contacts();
        let matched = match_department(contacts, &[], "Burst water pipe on 5th Avenue").unwrap();
        assert_eq!(matched.name, "Joburg Water");
    }

    #[test]
    fn unknown_input_falls_back_to_general() {
        let contacts = department_contacts();
        let matched = match_department(
            contacts,
            &["Department of Mysteries".to_string()],
            "Unidentifiable phenomenon",
        )
        .unwrap();
        assert_eq!(matched.name, "City of Johannesburg (General)");
    }

    #[test]
    fn alias_pass_beats_keyword_pass() {
        let contacts = department_contacts();
        // "eskom" alias wins even though the category mentions electricity,
        // which would otherwise route to City Power
        let matched = match_department(
            contacts,
            &["Eskom".to_string()],
            "Electricity outage in Soweto",
        )
        .unwrap();
        assert_eq!(matched.name, "Eskom");
    }

    #[test]
    fn matching_is_deterministic() {
        let contacts = department_contacts();
        let suggested = vec!["JMPD".to_string()];
        let first = match_department(contacts, &suggested, "Missing manhole cover").unwrap();
        for _ in 0..10 {
            let again = match_department(contacts, &suggested, "Missing manhole cover").unwrap();
            assert_eq!(first.name, again.name);
        }
    }

    #[test]
    fn empty_directory_yields_none() {
        assert!(match_department(&[], &["JRA".to_string()], "pothole").is_none());
    }
}
