//! Admin capability flags.
//!
//! Permissions are a fixed-shape record of four independent booleans, one
//! per privileged mutation. Every gated endpoint re-checks the relevant
//! flag against the administrators table before executing; a client-held
//! copy of this struct is a UI hint, never an authorization source.

use serde::{Deserialize, Serialize};

/// The four capability flags an administrator can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Permissions {
    /// May create collaborator records.
    pub create_collaborator: bool,
    /// May create other administrators.
    pub create_admin: bool,
    /// May post hour adjustments to the ledger.
    pub post_hours: bool,
    /// May change a collaborator's access code.
    pub change_access_code: bool,
}

impl Permissions {
    /// All four flags granted. Used for the seeded master profile.
    pub fn all() -> Self {
        Self {
            create_collaborator: true,
            create_admin: true,
            post_hours: true,
            change_access_code: true,
        }
    }

    /// No flags granted.
    pub fn none() -> Self {
        Self::default()
    }
}
