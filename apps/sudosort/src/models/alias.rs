//! Alias kinds and per-kind alias tables.
//!
//! Each kind is its own namespace. Re-declaring an alias replaces the
//! previous member list instead of merging into it.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AliasKind {
    Host,
    User,
    Runas,
    Cmnd,
}

impl AliasKind {
    /// Kinds in classification and output order.
    pub const ALL: [AliasKind; 4] = [
        AliasKind::Host,
        AliasKind::User,
        AliasKind::Runas,
        AliasKind::Cmnd,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            AliasKind::Host => "Host_Alias",
            AliasKind::User => "User_Alias",
            AliasKind::Runas => "Runas_Alias",
            AliasKind::Cmnd => "Cmnd_Alias",
        }
    }
}

/// Sort key for alias members: case-insensitive, with `_` ordered after `z`.
pub fn member_sort_key(member: &str) -> String {
    member.to_lowercase().replace('_', "~")
}

/// Sort members in place by [`member_sort_key`]. The sort is stable.
pub fn sort_members(members: &mut [String]) {
    members.sort_by_cached_key(|m| member_sort_key(m));
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// Alias name to member list, iterated in name order.
pub struct AliasTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl AliasTable {
    /// Store `members` under `name`, replacing any earlier declaration.
    pub fn insert(&mut self, name: String, members: Vec<String>) -> Option<Vec<String>> {
        self.entries.insert(name, members)
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
