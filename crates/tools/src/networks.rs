//! Ordered, uniquely-keyed network table.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::marker::PhantomData;

use crate::error::ConfigError;

/// Network name -> entry, in declaration order. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Networks<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for Networks<T> {
    fn default() -> Self {
        Networks {
            entries: Vec::new(),
        }
    }
}

impl<T> Networks<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from entries already known to be uniquely named.
    pub(crate) fn from_unique(entries: Vec<(String, T)>) -> Self {
        debug_assert!(entries
            .iter()
            .enumerate()
            .all(|(i, (name, _))| entries[..i].iter().all(|(other, _)| other != name)));
        Networks { entries }
    }

    /// Add a network. A name that is empty or already present is rejected;
    /// existing entries are never overwritten.
    pub fn insert(&mut self, name: impl Into<String>, entry: T) -> Result<(), ConfigError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::MissingField("network name".to_string()));
        }
        if self.contains(&name) {
            return Err(ConfigError::DuplicateNetwork(name));
        }
        self.entries.push((name, entry));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    /// Map every entry, stopping at the first error.
    pub fn try_map<U, F>(&self, mut f: F) -> Result<Networks<U>, ConfigError>
    where
        F: FnMut(&str, &T) -> Result<U, ConfigError>,
    {
        let entries = self
            .entries
            .iter()
            .map(|(name, entry)| Ok((name.clone(), f(name, entry)?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Networks { entries })
    }
}

impl<T: Serialize> Serialize for Networks<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, entry) in &self.entries {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

struct NetworksVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for NetworksVisitor<T> {
    type Value = Networks<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table of uniquely named networks")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut networks = Networks::new();
        while let Some((name, entry)) = access.next_entry::<String, T>()? {
            networks.insert(name, entry).map_err(serde::de::Error::custom)?;
        }
        Ok(networks)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Networks<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(NetworksVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order() {
        let mut networks = Networks::new();
        networks.insert("hyperspace", 1).unwrap();
        networks.insert("fuji", 2).unwrap();
        assert_eq!(networks.names().collect::<Vec<_>>(), vec!["hyperspace", "fuji"]);
        assert_eq!(networks.get("fuji"), Some(&2));
        assert_eq!(networks.len(), 2);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut networks = Networks::new();
        networks.insert("fuji", 1).unwrap();
        let result = networks.insert("fuji", 2);
        assert!(matches!(result, Err(ConfigError::DuplicateNetwork(ref n)) if n == "fuji"));
        // First declaration wins, nothing is overwritten.
        assert_eq!(networks.get("fuji"), Some(&1));
        assert_eq!(networks.len(), 1);
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut networks = Networks::new();
        assert!(networks.insert("  ", 1).is_err());
        assert!(networks.is_empty());
    }

    #[test]
    fn test_duplicate_json_key_rejected() {
        let result: Result<Networks<u32>, _> = serde_json::from_str(r#"{"fuji": 1, "fuji": 2}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("declared more than once"));
    }

    #[test]
    fn test_json_preserves_declaration_order() {
        let networks: Networks<u32> = serde_json::from_str(r#"{"zeta": 1, "alpha": 2}"#).unwrap();
        assert_eq!(networks.names().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        assert_eq!(serde_json::to_string(&networks).unwrap(), r#"{"zeta":1,"alpha":2}"#);
    }

    #[test]
    fn test_try_map_stops_on_error() {
        let mut networks = Networks::new();
        networks.insert("a", 1).unwrap();
        networks.insert("b", 2).unwrap();
        let result = networks.try_map(|name, v| {
            if *v == 2 {
                Err(ConfigError::UnknownNetwork(name.to_string()))
            } else {
                Ok(v * 10)
            }
        });
        assert!(matches!(result, Err(ConfigError::UnknownNetwork(ref n)) if n == "b"));
    }
}
