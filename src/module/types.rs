//! Identifiers for the things a resolution pipeline caches

use std::fmt;
use std::str::FromStr;

use crate::policy::error::IdentifierError;

/// A module coordinate without a version (e.g., "org.slf4j:slf4j-api")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleIdentifier {
    pub group: String,
    pub name: String,
}

impl ModuleIdentifier {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Pin this module to a concrete version
    pub fn with_version(&self, version: impl Into<String>) -> ModuleVersionIdentifier {
        ModuleVersionIdentifier::new(self.group.clone(), self.name.clone(), version)
    }
}

impl fmt::Display for ModuleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)
    }
}

impl FromStr for ModuleIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match split_coordinate(s)?.as_slice() {
            [group, name] => Ok(Self::new(*group, *name)),
            _ => Err(IdentifierError::InvalidModule(s.to_string())),
        }
    }
}

/// A module coordinate pinned to a concrete version (e.g., "org.slf4j:slf4j-api:2.0.9")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleVersionIdentifier {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl ModuleVersionIdentifier {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// The module this version belongs to
    pub fn module(&self) -> ModuleIdentifier {
        ModuleIdentifier::new(self.group.clone(), self.name.clone())
    }
}

impl fmt::Display for ModuleVersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

impl FromStr for ModuleVersionIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match split_coordinate(s)?.as_slice() {
            [group, name, version] => Ok(Self::new(*group, *name, *version)),
            _ => Err(IdentifierError::InvalidModuleVersion(s.to_string())),
        }
    }
}

/// A single published file of a module version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactIdentifier {
    pub module_version: ModuleVersionIdentifier,
    pub name: String,
    /// Artifact type (e.g., "jar", "source", "pom")
    pub kind: String,
    pub extension: String,
    pub classifier: Option<String>,
}

impl ArtifactIdentifier {
    pub fn new(
        module_version: ModuleVersionIdentifier,
        name: impl Into<String>,
        kind: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            module_version,
            name: name.into(),
            kind: kind.into(),
            extension: extension.into(),
            classifier: None,
        }
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }
}

impl fmt::Display for ArtifactIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module_version, self.name)?;
        if let Some(classifier) = &self.classifier {
            write!(f, "-{}", classifier)?;
        }
        write!(f, ".{}", self.extension)
    }
}

/// A module version previously resolved and held in the cache
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedModuleVersion {
    pub id: ModuleVersionIdentifier,
}

impl ResolvedModuleVersion {
    pub fn new(id: ModuleVersionIdentifier) -> Self {
        Self { id }
    }
}

fn split_coordinate(s: &str) -> Result<Vec<&str>, IdentifierError> {
    let parts: Vec<&str> = s.split(':').map(str::trim).collect();
    if parts.iter().any(|part| part.is_empty()) {
        return Err(IdentifierError::EmptySegment(s.to_string()));
    }
    Ok(parts)
}
