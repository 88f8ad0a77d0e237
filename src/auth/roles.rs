// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Roles and the editor allow-list.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Coarse-grained authorization role.
///
/// ## Role Hierarchy
///
/// - `Editor` - May call mutating registry routes
/// - `Viewer` - Read-only access
/// - `SuperAdmin` - Reserved future variant; no code path assigns it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Read-only access.
    Viewer,
    /// May mutate registry state (allow-listed email).
    Editor,
    /// Reserved for future use. Never derived from a token.
    SuperAdmin,
}

impl Role {
    /// Whether this role may call mutating routes.
    pub fn can_edit(&self) -> bool {
        matches!(self, Role::Editor | Role::SuperAdmin)
    }
}

impl Default for Role {
    /// Default role is Viewer (least privilege).
    fn default() -> Self {
        Role::Viewer
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Viewer => write!(f, "viewer"),
            Role::Editor => write!(f, "editor"),
            Role::SuperAdmin => write!(f, "super_admin"),
        }
    }
}

/// Set of email addresses granted the `Editor` role.
///
/// Parsed from a comma-separated configuration string. Membership is
/// exact-string and case-sensitive: an email differing only in letter case
/// from a listed entry does not match. The list is injected at construction
/// and immutable for the component's lifetime; operational changes take
/// effect on the next process start.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    emails: Vec<String>,
}

impl AllowList {
    /// Parse a comma-separated list of emails. Empty segments are dropped.
    pub fn parse(raw: &str) -> Self {
        Self {
            emails: raw
                .split(',')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, email: &str) -> bool {
        self.emails.iter().any(|e| e == email)
    }

    /// Derive the role for a verified email.
    ///
    /// Pure function of `(email, allow-list)`: member emails get `Editor`,
    /// everything else gets `Viewer`. Nothing in this path yields
    /// `SuperAdmin`.
    pub fn role_for(&self, email: &str) -> Role {
        if self.contains(email) {
            Role::Editor
        } else {
            Role::Viewer
        }
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_listed_email_is_editor() {
        let list = AllowList::parse("a@x.com,b@x.com");
        assert_eq!(list.role_for("a@x.com"), Role::Editor);
        assert_eq!(list.role_for("b@x.com"), Role::Editor);
    }

    #[test]
    fn unlisted_email_is_viewer() {
        let list = AllowList::parse("a@x.com,b@x.com");
        assert_eq!(list.role_for("c@x.com"), Role::Viewer);
    }

    #[test]
    fn membership_is_case_sensitive() {
        // No normalization: a case-variant of a listed email must not match.
        let list = AllowList::parse("admin@x.com");
        assert_eq!(list.role_for("Admin@x.com"), Role::Viewer);
        assert_eq!(list.role_for("ADMIN@X.COM"), Role::Viewer);
        assert_eq!(list.role_for("admin@x.com"), Role::Editor);
    }

    #[test]
    fn empty_config_grants_nobody() {
        let list = AllowList::parse("");
        assert!(list.is_empty());
        assert_eq!(list.role_for("a@x.com"), Role::Viewer);
    }

    #[test]
    fn editor_and_super_admin_can_edit() {
        assert!(Role::Editor.can_edit());
        assert!(Role::SuperAdmin.can_edit());
        assert!(!Role::Viewer.can_edit());
    }

    #[test]
    fn serde_uses_snake_case_names() {
        assert_eq!(serde_json::to_string(&Role::Viewer).unwrap(), r#""viewer""#);
        assert_eq!(serde_json::to_string(&Role::Editor).unwrap(), r#""editor""#);
        assert_eq!(
            serde_json::to_string(&Role::SuperAdmin).unwrap(),
            r#""super_admin""#
        );
    }

    #[test]
    fn default_role_is_viewer() {
        assert_eq!(Role::default(), Role::Viewer);
    }
}
