//! Matchers for package-side build rules: assembly and naming.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::BuildTargetPath;
use crate::matcher::{LineMatch, PackageAssembly, PackageNaming};

/// Head of a package-assembly statement: the rule that emits the package
/// archive under `obj/<build_dir>/<package_target>/meta.far`.
static ASSEMBLY_HEAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*build\s+obj/(?P<build_dir>[^\s:]+)/(?P<package_target>[-\w]+)/meta\.far\b")
        .unwrap()
});

/// Head of a package-naming command: a `pm` invocation.
static NAMING_HEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*command\s*=.*\bpm\b").unwrap());

static NAMING_OUTPUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s-o\s+obj/(?P<build_dir>[^\s:]+)/(?P<package_target>[-\w]+)\b").unwrap()
});

static NAMING_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s-n\s+(?P<package_name>[-\w]+)\b").unwrap());

/// Stamp suffixes that mark non-component dependencies of a package rule.
const IGNORED_STAMP_SUFFIXES: &str = r"\.manifest|_manifest|_metadata|_validate|_component_index";

/// Dependencies whose captured name is this placeholder take their real
/// name from the enclosing subdirectory.
const PLACEHOLDER_COMPONENT: &str = "component";

/// Match a package-assembly rule.
///
/// The dependency list is re-scanned with a pattern parameterized on the
/// statement's own build directory. Three dependency shapes are recognized:
/// a direct component stamp, a component stamp nested one subdirectory
/// down, and known non-component stamps (ignored). Dependencies inside the
/// package's own namespace are self-references and skipped.
pub fn match_package_assembly(statement: &str) -> Option<LineMatch> {
    let head = ASSEMBLY_HEAD_RE.captures(statement)?;
    let build_dir = head.name("build_dir").unwrap().as_str();
    let package_target = head.name("package_target").unwrap().as_str();

    let dep_re = component_dep_pattern(build_dir);
    let mut component_targets: Vec<BuildTargetPath> = Vec::new();

    for caps in dep_re.captures_iter(statement) {
        if caps.name("ignore").is_some() {
            continue;
        }

        let subdir = caps.name("subdir").map(|m| m.as_str());
        let name = caps.name("name").unwrap().as_str();

        // Self-references within the package's own namespace.
        if name == package_target || subdir == Some(package_target) {
            continue;
        }

        let component_name = match subdir {
            Some(prefix) if name == PLACEHOLDER_COMPONENT => format!("{}_{}", prefix, name),
            _ => name.to_string(),
        };

        let target = BuildTargetPath::new(build_dir, &component_name);
        if !component_targets.contains(&target) {
            component_targets.push(target);
        }
    }

    Some(LineMatch::PackageAssembly(PackageAssembly {
        package_target: BuildTargetPath::new(build_dir, package_target),
        component_targets,
    }))
}

/// Match a packaging-tool invocation carrying the human-readable package
/// name (`pm -o obj/<dir>/<target> … -n <name> …`).
pub fn match_package_naming(statement: &str) -> Option<LineMatch> {
    if !NAMING_HEAD_RE.is_match(statement) {
        return None;
    }

    let output = NAMING_OUTPUT_RE.captures(statement)?;
    let name = NAMING_NAME_RE.captures(statement)?;

    Some(LineMatch::PackageNaming(PackageNaming {
        package_target: BuildTargetPath::new(
            output.name("build_dir").unwrap().as_str(),
            output.name("package_target").unwrap().as_str(),
        ),
        package_name: name.name("package_name").unwrap().as_str().to_string(),
    }))
}

/// Build the dependency sub-pattern for one package statement.
fn component_dep_pattern(build_dir: &str) -> Regex {
    Regex::new(&format!(
        r"\bobj/{}/(?:(?P<subdir>[-\w]+)/)?(?P<name>[-\w]+?)(?P<ignore>{})?\.stamp\b",
        regex::escape(build_dir),
        IGNORED_STAMP_SUFFIXES,
    ))
    .unwrap()
}
