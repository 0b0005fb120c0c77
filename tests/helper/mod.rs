#![allow(dead_code)]

use indexmap::IndexSet;
use resolve_cache_policy::{ArtifactIdentifier, ModuleIdentifier, ModuleVersionIdentifier};
use tracing_subscriber::EnvFilter;

pub const DAY_MS: i64 = 86_400_000;

/// Route policy logs to the test output (RUST_LOG=resolve_cache_policy=debug)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn module() -> ModuleIdentifier {
    ModuleIdentifier::new("org.slf4j", "slf4j-api")
}

pub fn module_version() -> ModuleVersionIdentifier {
    module().with_version("2.0.9")
}

pub fn snapshot_version() -> ModuleVersionIdentifier {
    ModuleVersionIdentifier::new("com.acme", "core", "1.0-SNAPSHOT")
}

pub fn artifact(module_version: ModuleVersionIdentifier) -> ArtifactIdentifier {
    let name = module_version.name.clone();
    ArtifactIdentifier::new(module_version, name, "jar", "jar")
}

pub fn versions(versions: &[&str]) -> IndexSet<ModuleVersionIdentifier> {
    versions.iter().map(|v| module().with_version(*v)).collect()
}
