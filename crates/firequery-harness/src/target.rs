//! The closed set of fuzz targets and their dispatch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;
use crate::locator::{self, ResourceLocations};
use crate::targets::{collection_reference, field_path, query};

/// A parsing surface under fuzz test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FuzzTarget {
    /// User-format and server-format field path parsing.
    FieldPath,
    /// Collection and document reference resolution.
    CollectionReference,
    /// Query descriptor decoding and query construction.
    #[serde(rename = "FIRQuery")]
    Query,
}

impl FuzzTarget {
    pub const ALL: [FuzzTarget; 3] = [
        FuzzTarget::FieldPath,
        FuzzTarget::CollectionReference,
        FuzzTarget::Query,
    ];

    /// Name of the target's resource directory.
    pub fn name(&self) -> &'static str {
        match self {
            FuzzTarget::FieldPath => "FieldPath",
            FuzzTarget::CollectionReference => "CollectionReference",
            FuzzTarget::Query => "FIRQuery",
        }
    }

    /// Name of the cargo-fuzz binary that drives this target.
    pub fn fuzz_binary(&self) -> &'static str {
        match self {
            FuzzTarget::FieldPath => "fuzz_field_path",
            FuzzTarget::CollectionReference => "fuzz_collection_reference",
            FuzzTarget::Query => "fuzz_query",
        }
    }

    /// The target whose dictionary and corpus this target uses.
    ///
    /// This is the only place resource sharing is declared. Collection
    /// paths are built from the same segment syntax as field paths, so the
    /// collection reference target reuses the field path resources.
    pub fn resource_owner(&self) -> FuzzTarget {
        match self {
            FuzzTarget::FieldPath => FuzzTarget::FieldPath,
            FuzzTarget::CollectionReference => FuzzTarget::FieldPath,
            FuzzTarget::Query => FuzzTarget::Query,
        }
    }

    pub fn owns_resources(&self) -> bool {
        self.resource_owner() == *self
    }

    /// Targets that resolve their resources through `self`, including
    /// `self` when it owns them.
    pub fn resource_users(&self) -> Vec<FuzzTarget> {
        Self::ALL
            .into_iter()
            .filter(|target| target.resource_owner() == *self)
            .collect()
    }

    pub fn dictionary_location(&self, resource_root: &str) -> String {
        locator::dictionary_location(resource_root, *self)
    }

    pub fn corpus_location(&self, resource_root: &str) -> String {
        locator::corpus_location(resource_root, *self)
    }

    pub fn resource_locations(&self, resource_root: &str) -> ResourceLocations {
        locator::resource_locations(resource_root, *self)
    }

    /// Run one fuzz iteration against this target's entry point.
    pub fn run(&self, data: &[u8]) -> i32 {
        match self {
            FuzzTarget::FieldPath => field_path::fuzz_test_field_path(data),
            FuzzTarget::CollectionReference => {
                collection_reference::fuzz_test_collection_reference(data)
            }
            FuzzTarget::Query => query::fuzz_test_query(data),
        }
    }
}

impl fmt::Display for FuzzTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FuzzTarget {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "fieldpath" | "fuzzfieldpath" => Ok(FuzzTarget::FieldPath),
            "collectionreference" | "fuzzcollectionreference" => {
                Ok(FuzzTarget::CollectionReference)
            }
            "firquery" | "query" | "fuzzquery" => Ok(FuzzTarget::Query),
            _ => Err(HarnessError::UnknownTarget(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(FuzzTarget::FieldPath.name(), "FieldPath");
        assert_eq!(FuzzTarget::CollectionReference.name(), "CollectionReference");
        assert_eq!(FuzzTarget::Query.name(), "FIRQuery");
        assert_eq!(FuzzTarget::Query.to_string(), "FIRQuery");
    }

    #[test]
    fn test_resource_owners() {
        assert_eq!(
            FuzzTarget::CollectionReference.resource_owner(),
            FuzzTarget::FieldPath
        );
        assert!(FuzzTarget::FieldPath.owns_resources());
        assert!(FuzzTarget::Query.owns_resources());
        assert!(!FuzzTarget::CollectionReference.owns_resources());
    }

    #[test]
    fn test_owners_own_themselves() {
        for target in FuzzTarget::ALL {
            assert!(target.resource_owner().owns_resources(), "{}", target);
        }
    }

    #[test]
    fn test_resource_users() {
        assert_eq!(
            FuzzTarget::FieldPath.resource_users(),
            vec![FuzzTarget::FieldPath, FuzzTarget::CollectionReference]
        );
        assert_eq!(FuzzTarget::Query.resource_users(), vec![FuzzTarget::Query]);
        assert!(FuzzTarget::CollectionReference.resource_users().is_empty());
    }

    #[test]
    fn test_parse_target_names() {
        for target in FuzzTarget::ALL {
            assert_eq!(target.name().parse::<FuzzTarget>().unwrap(), target);
            assert_eq!(target.fuzz_binary().parse::<FuzzTarget>().unwrap(), target);
        }
        assert_eq!("field-path".parse::<FuzzTarget>().unwrap(), FuzzTarget::FieldPath);
        assert_eq!(
            "collection_reference".parse::<FuzzTarget>().unwrap(),
            FuzzTarget::CollectionReference
        );
        assert_eq!("query".parse::<FuzzTarget>().unwrap(), FuzzTarget::Query);
        assert!(matches!(
            "serializer".parse::<FuzzTarget>(),
            Err(HarnessError::UnknownTarget(_))
        ));
    }

    #[test]
    fn test_serialized_as_resource_name() {
        let json = serde_json::to_string(&FuzzTarget::Query).unwrap();
        assert_eq!(json, "\"FIRQuery\"");
    }
}
