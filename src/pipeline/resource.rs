// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipgen contributors

//! Resource definitions
//!
//! Resources are matched by exact, case-sensitive name. Every other field of
//! a resource record is opaque and passed through untouched.

use serde_yaml::{Mapping, Value};
use std::collections::HashMap;

use crate::errors::{PipgenError, PipgenResult};

/// A named external resource
#[derive(Debug, Clone)]
pub struct ResourceDefinition {
    name: String,
    record: Mapping,
}

impl ResourceDefinition {
    /// Parse a resource from its raw record
    pub fn from_record(record: Mapping) -> PipgenResult<Self> {
        let name = match record.get("name") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            _ => {
                return Err(PipgenError::InvalidResource {
                    reason: "resource records need a non-empty string 'name'".into(),
                });
            }
        };
        Ok(Self { name, record })
    }

    /// A resource with nothing but a name
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut record = Mapping::new();
        record.insert("name".into(), Value::String(name.clone()));
        Self { name, record }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn record(&self) -> &Mapping {
        &self.record
    }
}

impl PartialEq for ResourceDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ResourceDefinition {}

/// Name-unique catalog of resources
#[derive(Debug, Clone, Default)]
pub struct ResourceLibrary {
    resources: Vec<ResourceDefinition>,
    by_name: HashMap<String, usize>,
}

impl ResourceLibrary {
    pub fn new(resources: Vec<ResourceDefinition>) -> PipgenResult<Self> {
        let mut by_name = HashMap::with_capacity(resources.len());
        for (idx, resource) in resources.iter().enumerate() {
            if by_name.insert(resource.name.clone(), idx).is_some() {
                return Err(PipgenError::DuplicateResource {
                    name: resource.name.clone(),
                });
            }
        }
        Ok(Self { resources, by_name })
    }

    pub fn get(&self, name: &str) -> Option<&ResourceDefinition> {
        self.by_name.get(name).map(|&idx| &self.resources[idx])
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::fixtures::record;

    #[test]
    fn test_lookup_is_exact() {
        let library = ResourceLibrary::new(vec![
            ResourceDefinition::named("repo"),
            ResourceDefinition::named("image"),
        ])
        .unwrap();

        assert_eq!(library.get("repo").map(|r| r.name()), Some("repo"));
        assert!(library.get("Repo").is_none());
        assert!(library.get("rep").is_none());
    }

    #[test]
    fn test_duplicate_resource() {
        let result = ResourceLibrary::new(vec![
            ResourceDefinition::named("repo"),
            ResourceDefinition::named("repo"),
        ]);
        assert!(matches!(result, Err(PipgenError::DuplicateResource { name }) if name == "repo"));
    }

    #[test]
    fn test_record_fields_are_kept() {
        let resource =
            ResourceDefinition::from_record(record("name: repo\ntype: git\nsource: {}")).unwrap();
        assert_eq!(resource.name(), "repo");
        assert!(resource.record().contains_key("type"));

        assert!(ResourceDefinition::from_record(record("type: git")).is_err());
    }
}
