use std::fmt;

/// Name of an AWS credential/config section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Profile(String);

impl Profile {
    pub const DEFAULT: &'static str = "default";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == Self::DEFAULT
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Profile {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Ordered set of profiles. Insertion order is kept and duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSet {
    profiles: Vec<Profile>,
}

impl ProfileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an explicit comma-separated list such as `prod, dev,test`.
    pub fn from_list(list: &str) -> Self {
        list.split(',').map(str::trim).collect()
    }

    /// Adds a profile unless it is blank or already present. Returns whether it was added.
    pub fn push(&mut self, profile: Profile) -> bool {
        if profile.as_str().trim().is_empty() || self.contains(profile.as_str()) {
            return false;
        }
        self.profiles.push(profile);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.iter().any(|p| p.as_str() == name)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Profile> {
        self.profiles.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(Profile::as_str).collect()
    }
}

impl<'a> FromIterator<&'a str> for ProfileSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = ProfileSet::new();
        for name in iter {
            set.push(Profile::new(name));
        }
        set
    }
}

impl<'a> IntoIterator for &'a ProfileSet {
    type Item = &'a Profile;
    type IntoIter = std::slice::Iter<'a, Profile>;

    fn into_iter(self) -> Self::IntoIter {
        self.profiles.iter()
    }
}
