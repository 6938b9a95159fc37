use ignore::WalkBuilder;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

pub const BUILD_DESCRIPTORS: [&str; 3] = ["pom.xml", "build.gradle", "build.gradle.kts"];

pub const EXCLUDED_DIRS: [&str; 8] = [
    ".git",
    "node_modules",
    "dist",
    "build",
    "target",
    "out",
    ".next",
    ".turbo",
];

const FREEFAIR_PLUGIN_ID: &str = "io.freefair.lombok";

static MAVEN_ARTIFACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<artifactId>\s*lombok\s*</artifactId>").expect("valid maven lombok pattern")
});

static GRADLE_COORDINATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']org\.projectlombok:lombok[:"']"#).expect("valid gradle lombok pattern")
});

pub fn is_build_descriptor(file_name: &str) -> bool {
    BUILD_DESCRIPTORS.contains(&file_name)
}

pub fn is_excluded_dir(dir_name: &str) -> bool {
    EXCLUDED_DIRS.contains(&dir_name)
}

/// Returns true when build-file text references Lombok as a Maven artifact,
/// a Gradle coordinate, or through the freefair Gradle plugin.
pub fn contains_lombok(text: &str) -> bool {
    MAVEN_ARTIFACT.is_match(text)
        || GRADLE_COORDINATE.is_match(text)
        || text.contains(FREEFAIR_PLUGIN_ID)
}

/// Walks `root` depth-first looking for a build descriptor that mentions
/// Lombok. Unreadable entries count as absent; excluded directories and
/// symlinks are never entered.
pub fn project_uses_lombok(root: &Path) -> bool {
    if !root.is_dir() {
        return false;
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(|entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            !(is_dir && is_excluded_dir(&entry.file_name().to_string_lossy()))
        })
        .build();

    for entry in walker {
        let Ok(entry) = entry else {
            continue;
        };
        if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !is_build_descriptor(name) {
            continue;
        }

        let text = std::fs::read_to_string(entry.path()).unwrap_or_default();
        if contains_lombok(&text) {
            tracing::debug!(file = %entry.path().display(), "lombok signature matched");
            return true;
        }
    }

    false
}
