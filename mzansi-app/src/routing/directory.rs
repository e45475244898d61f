//! Johannesburg department contact directory
//!
//! Static reference data for the matcher. Contact order is significant:
//! the matcher scans in declaration order and the earliest match wins.

use std::sync::LazyLock;

use shared::models::{DepartmentContact, SocialHandles};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

static DIRECTORY: LazyLock<Vec<DepartmentContact>> = LazyLock::new(|| {
    vec![
        DepartmentContact {
            keywords: strings(&[
                "road",
                "pothole",
                "traffic",
                "transport",
                "sign",
                "street",
                "asphalt",
                "stormwater",
                "bridge",
            ]),
            aliases: strings(&["jra", "sanral", "roads agency"]),
            name: "Johannesburg Roads Agency (JRA)".to_string(),
            email: "hotline@jra.org.za".to_string(),
            phone: "0860 562 874".to_string(),
            sms: None,
            website: Some("https://www.jra.org.za".to_string()),
            social: SocialHandles {
                twitter: Some("@MyJRA".to_string()),
                facebook: Some(
                    "https://www.facebook.com/JohannesburgRoadsAgency/".to_string(),
                ),
                instagram: None,
            },
        },
        DepartmentContact {
            keywords: strings(&[
                "water",
                "sewage",
                "leak",
                "burst",
                "sanitation",
                "pipe",
                "meter",
                "drain",
                "reservoir",
            ]),
            aliases: strings(&["joburg water", "jw", "sewer"]),
            name: "Joburg Water".to_string(),
            email: "waterCalls@jwater.co.za".to_string(),
            phone: "0800 000 004".to_string(),
            sms: Some("082 653 2143".to_string()),
            website: Some("https://www.johannesburgwater.co.za".to_string()),
            social: SocialHandles {
                twitter: Some("@JHBWater".to_string()),
                facebook: Some("Johannesburg Water".to_string()),
                instagram: Some("@joburgwater".to_string()),
            },
        },
        DepartmentContact {
            keywords: strings(&[
                "power",
                "electricity",
                "light",
                "outage",
                "cable",
                "energy",
                "load shedding",
                "substation",
                "fuse",
            ]),
            aliases: strings(&["city power"]),
            name: "City Power Johannesburg".to_string(),
            email: "estimations@citypower.co.za".to_string(),
            phone: "011 490 7484".to_string(),
            sms: Some("083 579 9847".to_string()),
            website: Some("https://www.citypower.co.za".to_string()),
            social: SocialHandles {
                twitter: Some("@CityPowerJhb".to_string()),
                facebook: Some("City Power Johannesburg".to_string()),
                instagram: None,
            },
        },
        DepartmentContact {
            keywords: strings(&["eskom"]),
            aliases: strings(&["eskom"]),
            name: "Eskom".to_string(),
            email: "customerservices@eskom.co.za".to_string(),
            phone: "08600 37566".to_string(),
            sms: Some("084 655 1111".to_string()),
            website: Some("https://www.eskom.co.za".to_string()),
            social: SocialHandles {
                twitter: Some("@Eskom_SA".to_string()),
                facebook: None,
                instagram: None,
            },
        },
        DepartmentContact {
            keywords: strings(&[
                "waste", "rubbish", "refuse", "dumping", "trash", "bin", "garbage", "clean",
                "litter",
            ]),
            aliases: strings(&["pikitup"]),
            name: "Pikitup – Johannesburg Waste Management".to_string(),
            email: "call.centre@pikitup.co.za".to_string(),
            phone: "0800 742 786".to_string(),
            sms: None,
            website: Some("https://www.pikitup.co.za".to_string()),
            social: SocialHandles {
                twitter: Some("@CleanerJoburg".to_string()),
                facebook: Some("Pikitup Johannesburg".to_string()),
                instagram: None,
            },
        },
        DepartmentContact {
            keywords: strings(&[
                "police",
                "safety",
                "crime",
                "accident",
                "law",
                "bylaw",
                "security",
                "traffic violation",
                "saps",
                "jmpd",
            ]),
            aliases: strings(&["jmpd", "saps"]),
            name: "JMPD – Johannesburg Metropolitan Police Department".to_string(),
            email: "complaints@jmpd.org.za".to_string(),
            phone: "011 758 9650".to_string(),
            sms: None,
            website: Some("https://www.joburg.org.za".to_string()),
            social: SocialHandles {
                twitter: Some("@JoburgMPD".to_string()),
                facebook: Some("Joburg Metropolitan Police Department".to_string()),
                instagram: None,
            },
        },
        DepartmentContact {
            keywords: strings(&[
                "park", "tree", "grass", "zoo", "vegetation", "garden", "cemetery",
            ]),
            aliases: strings(&["city parks", "jcpz"]),
            name: "Johannesburg City Parks & Zoo (JCPZ)".to_string(),
            email: "trees@jhbcityparks.com".to_string(),
            phone: "011 712 6600".to_string(),
            sms: None,
            website: Some("https://www.jhbcityparksandzoo.com".to_string()),
            social: SocialHandles {
                twitter: Some("@JoburgParksZoo".to_string()),
                facebook: Some("Johannesburg City Parks and Zoo".to_string()),
                instagram: Some("@joburgparkszoo".to_string()),
            },
        },
        DepartmentContact {
            keywords: strings(&["housing", "rdp", "settlement", "building"]),
            aliases: strings(&["housing department"]),
            name: "City of Johannesburg Housing Department".to_string(),
            email: "info@joburg.org.za".to_string(),
            phone: "011 358 3400".to_string(),
            sms: None,
            website: Some("https://www.joburg.org.za".to_string()),
            social: SocialHandles::default(),
        },
        DepartmentContact {
            keywords: strings(&["environmental", "health", "pest", "hazardous"]),
            aliases: strings(&["environmental health"]),
            name: "City of Johannesburg Environmental Health".to_string(),
            email: "info@joburg.org.za".to_string(),
            phone: "011 407 7523".to_string(),
            sms: None,
            website: Some("https://www.joburg.org.za".to_string()),
            social: SocialHandles::default(),
        },
        DepartmentContact {
            keywords: strings(&[
                "general", "municipal", "city", "council", "ward", "finance", "billing",
            ]),
            aliases: strings(&["coj", "municipality"]),
            name: "City of Johannesburg (General)".to_string(),
            email: "info@joburg.org.za".to_string(),
            phone: "0860 562 874".to_string(),
            sms: None,
            website: Some("https://www.joburg.org.za".to_string()),
            social: SocialHandles {
                twitter: Some("@CityofJoburgZA".to_string()),
                facebook: Some("City of Johannesburg".to_string()),
                instagram: None,
            },
        },
    ]
});

/// The canonical Johannesburg contact directory
pub fn department_contacts() -> &'static [DepartmentContact] {
    &DIRECTORY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_carries_all_departments() {
        assert_eq!(department_contacts().len(), 10);
    }

    #[test]
    fn general_contact_is_present() {
        assert!(
            department_contacts()
                .iter()
                .any(|c| c.name.contains("General"))
        );
    }

    #[test]
    fn aliases_are_lowercase() {
        for contact in department_contacts() {
            for alias in &contact.aliases {
                assert_eq!(alias, &alias.to_lowercase(), "alias in {}", contact.name);
            }
        }
    }
}
