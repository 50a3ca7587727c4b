//! Project ecosystem detection
//!
//! Classifies a project directory by inspecting marker files
//! (package.json, requirements.txt, Cargo.toml, ...) and, where the
//! ecosystem supports it, derives a finer-grained framework tag from
//! the project's declared dependencies.
//!
//! Detection is best-effort: any I/O or parse error yields the generic
//! classification instead of propagating, so it can never block
//! registering a project.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Coarse classification of a project's primary technology stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Node,
    Python,
    Dotnet,
    Java,
    Go,
    Rust,
    Generic,
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Ecosystem::Node => "Node.js",
            Ecosystem::Python => "Python",
            Ecosystem::Dotnet => ".NET",
            Ecosystem::Java => "Java",
            Ecosystem::Go => "Go",
            Ecosystem::Rust => "Rust",
            Ecosystem::Generic => "Project",
        };
        f.write_str(label)
    }
}

/// Result of classifying a project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub ecosystem: Ecosystem,
    pub framework: Option<String>,
}

impl ProjectInfo {
    fn generic() -> Self {
        Self {
            ecosystem: Ecosystem::Generic,
            framework: None,
        }
    }

    fn new(ecosystem: Ecosystem, framework: Option<&str>) -> Self {
        Self {
            ecosystem,
            framework: framework.map(str::to_string),
        }
    }
}

/// Node framework lookup table, highest priority first.
///
/// A meta-framework outranks the library it wraps (Next.js over React,
/// Nuxt over Vue), so the first dependency found wins.
const NODE_FRAMEWORKS: &[(&str, &str)] = &[
    ("next", "Next.js"),
    ("react", "React"),
    ("nuxt", "Nuxt.js"),
    ("vue", "Vue.js"),
    ("@angular/core", "Angular"),
    ("svelte", "Svelte"),
    ("express", "Express"),
    ("electron", "Electron"),
];

/// Python project marker files
const PYTHON_MARKERS: &[&str] = &["requirements.txt", "setup.py", "pyproject.toml", "Pipfile"];

/// .NET project file extensions (checked at the directory's top level)
const DOTNET_EXTENSIONS: &[&str] = &["csproj", "sln", "fsproj", "vbproj"];

/// Minimal view of a package.json, tolerant of everything else in it
#[derive(Debug, Default, Deserialize)]
struct PackageJson {
    #[serde(default)]
    dependencies: HashMap<String, serde_json::Value>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: HashMap<String, serde_json::Value>,
}

/// Classify a project directory by ordered, first-match-wins marker inspection
pub fn detect(dir: &Path) -> ProjectInfo {
    if dir.join("package.json").exists() {
        return ProjectInfo {
            ecosystem: Ecosystem::Node,
            framework: detect_node_framework(dir),
        };
    }

    if PYTHON_MARKERS.iter().any(|m| dir.join(m).exists()) {
        return ProjectInfo {
            ecosystem: Ecosystem::Python,
            framework: detect_python_framework(dir),
        };
    }

    if has_dotnet_project_file(dir) {
        return ProjectInfo::new(Ecosystem::Dotnet, None);
    }

    let has_maven = dir.join("pom.xml").exists();
    let has_gradle = dir.join("build.gradle").exists();
    if has_maven || has_gradle {
        // Gradle wins when both build files are present
        let framework = if has_gradle { "Gradle" } else { "Maven" };
        return ProjectInfo::new(Ecosystem::Java, Some(framework));
    }

    if dir.join("go.mod").exists() {
        return ProjectInfo::new(Ecosystem::Go, None);
    }

    if dir.join("Cargo.toml").exists() {
        return ProjectInfo::new(Ecosystem::Rust, None);
    }

    ProjectInfo::generic()
}

/// Derive a Node framework tag from package.json dependency maps
fn detect_node_framework(dir: &Path) -> Option<String> {
    let raw = match fs::read_to_string(dir.join("package.json")) {
        Ok(raw) => raw,
        Err(err) => {
            debug!("unreadable package.json in {}: {}", dir.display(), err);
            return None;
        }
    };

    let package: PackageJson = match serde_json::from_str(&raw) {
        Ok(package) => package,
        Err(err) => {
            debug!("unparsable package.json in {}: {}", dir.display(), err);
            return None;
        }
    };

    // Runtime and development dependencies are equivalent markers here
    let mut deps = package.dependencies;
    deps.extend(package.dev_dependencies);

    NODE_FRAMEWORKS
        .iter()
        .find(|(dep, _)| deps.contains_key(*dep))
        .map(|(_, framework)| framework.to_string())
}

/// Derive a Python framework tag from well-known entry points
fn detect_python_framework(dir: &Path) -> Option<String> {
    if dir.join("manage.py").exists() {
        return Some("Django".to_string());
    }

    if !dir.join("app.py").exists() && !dir.join("main.py").exists() {
        return None;
    }

    // Case-sensitive substring match, as requirement lines are lowercase
    // by convention; FastAPI is checked last so it wins when both appear.
    let requirements = fs::read_to_string(dir.join("requirements.txt")).ok()?;
    let mut framework = None;
    if requirements.contains("flask") {
        framework = Some("Flask".to_string());
    }
    if requirements.contains("fastapi") {
        framework = Some("FastAPI".to_string());
    }
    framework
}

/// Check for a .NET project/solution file at the directory's top level
fn has_dotnet_project_file(dir: &Path) -> bool {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return false,
    };

    entries.flatten().any(|entry| {
        entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| DOTNET_EXTENSIONS.contains(&ext))
    })
}
