//! Shared constants.

/// Length of the truncated content hash used for cache keys.
pub const OBJ_HASH_PREFIX_LEN: usize = 20;

/// The dedicated configuration that pulls in optional dependencies.
pub const OPTIONAL_CONFIGURATION: &str = "optional";

/// Configurations that expose the module's main artifact.
pub const ARTIFACT_CONFIGURATIONS: [&str; 4] = ["compile", "runtime", "default", "test"];

/// Packagings whose main artifact is a jar file.
pub const JAR_PACKAGINGS: [&str; 5] = ["jar", "ejb", "bundle", "maven-plugin", "eclipse-plugin"];

/// Packaging of a module that publishes only its descriptor.
pub const POM_PACKAGING: &str = "pom";

/// Packaging assumed when a descriptor does not declare one.
pub const DEFAULT_PACKAGING: &str = "jar";

/// Status assumed when a descriptor does not declare one.
pub const DEFAULT_STATUS: &str = "release";
