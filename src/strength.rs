//! Password requirement checklist for live feedback.
//!
//! Unlike the composite password rule, every requirement is evaluated on
//! each call so a UI can highlight all of them at once.

use std::collections::BTreeMap;

use secrecy::{ExposeSecret, SecretString};

use crate::rules::password::{has_lowercase, has_number, has_uppercase, is_long_enough};

/// A single password requirement, listed in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Requirement {
    MinLength,
    HasUppercase,
    HasLowercase,
    HasNumber,
}

impl Requirement {
    pub const ALL: [Requirement; 4] = [
        Requirement::MinLength,
        Requirement::HasUppercase,
        Requirement::HasLowercase,
        Requirement::HasNumber,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Requirement::MinLength => "minLength",
            Requirement::HasUppercase => "hasUppercase",
            Requirement::HasLowercase => "hasLowercase",
            Requirement::HasNumber => "hasNumber",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Requirement::MinLength => "At least 8 characters",
            Requirement::HasUppercase => "One uppercase letter",
            Requirement::HasLowercase => "One lowercase letter",
            Requirement::HasNumber => "One number",
        }
    }

    fn is_met_by(self, password: &str) -> bool {
        match self {
            Requirement::MinLength => is_long_enough(password),
            Requirement::HasUppercase => has_uppercase(password),
            Requirement::HasLowercase => has_lowercase(password),
            Requirement::HasNumber => has_number(password),
        }
    }
}

/// Met flag of every requirement, in display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequirementChecklist {
    met: [bool; 4],
}

impl RequirementChecklist {
    pub fn is_met(&self, requirement: Requirement) -> bool {
        self.met[requirement as usize]
    }

    pub fn all_met(&self) -> bool {
        self.met.iter().all(|&m| m)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Requirement, bool)> + '_ {
        Requirement::ALL.into_iter().zip(self.met)
    }

    /// The checklist keyed by requirement name.
    pub fn to_map(&self) -> BTreeMap<&'static str, bool> {
        self.iter().map(|(req, met)| (req.name(), met)).collect()
    }
}

/// Evaluates all four requirements against the password.
pub fn evaluate_password_requirements(password: &SecretString) -> RequirementChecklist {
    let pwd = password.expose_secret();
    RequirementChecklist {
        met: Requirement::ALL.map(|req| req.is_met_by(pwd)),
    }
}
