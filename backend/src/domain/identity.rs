//! Caller identity and role classification.
//!
//! Roles are ordered `User < GameMaster < SystemAdmin`. System admins come
//! from a static allow-list loaded once at startup; game masters come from
//! the database; everyone else is a plain user.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Error;

/// Validation failures for email addresses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    #[error("email must not be empty")]
    Empty,
    #[error("email must contain exactly one @ with text on both sides")]
    Malformed,
    #[error("email must be at most {max} characters")]
    TooLong { max: usize },
}

/// Maximum stored email length.
pub const EMAIL_MAX: usize = 320;

/// Lower-cased, trimmed email address.
///
/// # Examples
/// ```
/// use studio_backend::domain::Email;
///
/// let email = Email::new(" GM@Example.com ").expect("valid email");
/// assert_eq!(email.as_str(), "gm@example.com");
/// assert!(Email::new("no-at-sign").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if normalised.chars().count() > EMAIL_MAX {
            return Err(EmailValidationError::TooLong { max: EMAIL_MAX });
        }
        let mut parts = normalised.split('@');
        let well_formed = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
        );
        if !well_formed || normalised.chars().any(char::is_whitespace) {
            return Err(EmailValidationError::Malformed);
        }
        Ok(Self(normalised))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Profile extracted from a verified identity-provider token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: Email,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Privilege level of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    GameMaster,
    SystemAdmin,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::GameMaster => "game_master",
            Self::SystemAdmin => "system_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable set of system-admin emails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminAllowList(BTreeSet<Email>);

impl AdminAllowList {
    /// Parse a comma-separated list, ignoring blank and malformed entries.
    ///
    /// Returns the list together with the entries that were rejected so the
    /// caller can log them.
    ///
    /// # Examples
    /// ```
    /// use studio_backend::domain::{AdminAllowList, Email};
    ///
    /// let (list, rejected) = AdminAllowList::parse(" Root@Example.com, ,oops");
    /// assert!(list.contains(&Email::new("root@example.com").expect("valid")));
    /// assert_eq!(rejected, vec!["oops".to_owned()]);
    /// ```
    pub fn parse(raw: &str) -> (Self, Vec<String>) {
        let mut emails = BTreeSet::new();
        let mut rejected = Vec::new();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match Email::new(entry) {
                Ok(email) => {
                    emails.insert(email);
                }
                Err(_) => rejected.push(entry.to_owned()),
            }
        }
        (Self(emails), rejected)
    }

    pub fn from_emails(emails: impl IntoIterator<Item = Email>) -> Self {
        Self(emails.into_iter().collect())
    }

    pub fn contains(&self, email: &Email) -> bool {
        self.0.contains(email)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Minimum role a gated operation demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRequirement {
    /// Game master or system admin.
    Admin,
    /// System admin only.
    SystemAdmin,
}

impl RoleRequirement {
    const fn minimum(self) -> Role {
        match self {
            Self::Admin => Role::GameMaster,
            Self::SystemAdmin => Role::SystemAdmin,
        }
    }

    pub fn is_met_by(self, role: Role) -> bool {
        role >= self.minimum()
    }
}

/// An authenticated caller with a resolved role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub identity: VerifiedIdentity,
    pub role: Role,
}

impl Caller {
    pub fn email(&self) -> &Email {
        &self.identity.email
    }

    /// Legacy combined check: game master or system admin.
    pub fn is_admin(&self) -> bool {
        RoleRequirement::Admin.is_met_by(self.role)
    }

    pub fn is_system_admin(&self) -> bool {
        self.role == Role::SystemAdmin
    }

    /// Reject the caller with a forbidden error unless `requirement` holds.
    ///
    /// # Examples
    /// ```
    /// use studio_backend::domain::{Caller, Email, Role, RoleRequirement, VerifiedIdentity};
    ///
    /// let caller = Caller {
    ///     identity: VerifiedIdentity {
    ///         email: Email::new("gm@example.com").expect("valid"),
    ///         name: None,
    ///         picture: None,
    ///     },
    ///     role: Role::GameMaster,
    /// };
    /// assert!(caller.require(RoleRequirement::Admin).is_ok());
    /// assert!(caller.require(RoleRequirement::SystemAdmin).is_err());
    /// ```
    pub fn require(&self, requirement: RoleRequirement) -> Result<(), Error> {
        if requirement.is_met_by(self.role) {
            return Ok(());
        }
        let message = match requirement {
            RoleRequirement::Admin => "admin access required",
            RoleRequirement::SystemAdmin => "system admin access required",
        };
        Err(Error::forbidden(message))
    }
}
