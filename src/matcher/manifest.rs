//! Matchers for manifest-side build rules: manifest builds (sub-component
//! discovery) and the `cmc` validation/compile commands.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::BuildTargetPath;
use crate::matcher::{LineMatch, ManifestRecord, SubComponents};

/// Head of a manifest-build statement, for both manifest kinds.
static MANIFEST_BUILD_HEAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*build\s+obj/(?P<build_dir>[^\s:]+)/(?P<component_name>[-\w]+)\.cmx?\b")
        .unwrap()
});

/// Head of a manifest-reference-validation command.
static VALIDATE_HEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*command\s*=.*\bcmc\b.*\bvalidate-references\b").unwrap());

/// Head of a manifest-compile command.
static COMPILE_HEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*command\s*=.*\bcmc\b.*\bcompile\b").unwrap());

/// Optional explicit destination-manifest stamp segment.
static DEST_MANIFEST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_validate_manifests_(?P<dest>[-\w]+\.cmx?)\b").unwrap());

/// The `--component-manifest` argument. The path root is either `../../`
/// (relative to the build output directory) or an expanded absolute prefix
/// ending in the output directory; both normalize to a source-relative path.
static COMPONENT_MANIFEST_ARG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"--component-manifest\s+(?:\.\./\.\./|\S*/out/[^/\s]+/)(?P<manifest>\S+\.cmx?)\b",
    )
    .unwrap()
});

/// The `--gn-label` argument, with the validation-rule suffix stripped by
/// the pattern itself. Ninja escapes the label's `:` as `$:`.
static GN_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"--gn-label\s+//(?P<build_dir>[^$\s]+)\$:(?P<target>[-\w]+)_cmc_validate_references\b")
        .unwrap()
});

/// The compile command's source manifest argument, same two path roots.
static COMPILE_SOURCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)(?:\.\./\.\./|\S*/out/[^/\s]+/)(?P<manifest>\S+\.cml)\b").unwrap()
});

static COMPILE_OUTPUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--output\s+\S*/(?P<component_name>[-\w]+)\.cm\b").unwrap());

static COMPILE_DEPFILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"--depfile\s+obj/(?P<build_dir>[^\s:]+)/(?P<target>[-\w]+)\.d\b").unwrap()
});

/// Auxiliary stamp suffixes that are dependencies of a manifest build but
/// never sub-components.
const AUXILIARY_STAMP_SUFFIXES: [&str; 3] =
    ["_check_includes", "_validate_references", "_merge_resources"];

/// Match a manifest-build rule and extract the sibling targets that form
/// the component's constituent sub-components.
pub fn match_sub_components(statement: &str) -> Option<LineMatch> {
    let head = MANIFEST_BUILD_HEAD_RE.captures(statement)?;
    let build_dir = head.name("build_dir").unwrap().as_str();
    let component_name = head.name("component_name").unwrap().as_str();

    let dep_re = sibling_dep_pattern(build_dir);
    let mut sub_targets: Vec<BuildTargetPath> = Vec::new();

    for caps in dep_re.captures_iter(statement) {
        let dep = caps.name("dep").unwrap().as_str();
        if dep == component_name || is_auxiliary_stamp(component_name, dep) {
            continue;
        }

        let target = BuildTargetPath::new(build_dir, dep);
        if !sub_targets.contains(&target) {
            sub_targets.push(target);
        }
    }

    Some(LineMatch::SubComponents(SubComponents {
        component_target: BuildTargetPath::new(build_dir, component_name),
        sub_targets,
    }))
}

/// Match a `cmc validate-references` invocation.
///
/// When the statement embeds an explicit `_validate_manifests_<file>` stamp
/// segment, the destination manifest and its derived component name take
/// precedence over the fallback pair recovered from the manifest filename
/// and the gn label.
pub fn match_validation_command(statement: &str) -> Option<LineMatch> {
    if !VALIDATE_HEAD_RE.is_match(statement) {
        return None;
    }

    let manifest = COMPONENT_MANIFEST_ARG_RE
        .captures(statement)?
        .name("manifest")
        .unwrap()
        .as_str()
        .to_string();

    let label = GN_LABEL_RE.captures(statement)?;
    let build_dir = label.name("build_dir").unwrap().as_str();
    let fallback_target = label.name("target").unwrap().as_str();

    let (component_name, component_target) = match DEST_MANIFEST_RE.captures(statement) {
        Some(dest) => {
            let name = manifest_stem(dest.name("dest").unwrap().as_str());
            let target = BuildTargetPath::new(build_dir, &name);
            (name, target)
        }
        None => {
            let name = manifest_stem(&manifest);
            (name, BuildTargetPath::new(build_dir, fallback_target))
        }
    };

    Some(LineMatch::ValidationCommand(ManifestRecord {
        component_target,
        component_name,
        manifest_path: manifest.into(),
    }))
}

/// Match a `cmc compile` invocation.
pub fn match_compile_command(statement: &str) -> Option<LineMatch> {
    if !COMPILE_HEAD_RE.is_match(statement) {
        return None;
    }

    let manifest = COMPILE_SOURCE_RE
        .captures(statement)?
        .name("manifest")
        .unwrap()
        .as_str()
        .to_string();

    let component_name = COMPILE_OUTPUT_RE
        .captures(statement)?
        .name("component_name")
        .unwrap()
        .as_str()
        .to_string();

    let depfile = COMPILE_DEPFILE_RE.captures(statement)?;

    Some(LineMatch::CompileCommand(ManifestRecord {
        component_target: BuildTargetPath::new(
            depfile.name("build_dir").unwrap().as_str(),
            depfile.name("target").unwrap().as_str(),
        ),
        component_name,
        manifest_path: manifest.into(),
    }))
}

fn sibling_dep_pattern(build_dir: &str) -> Regex {
    Regex::new(&format!(
        r"\bobj/{}/(?P<dep>[-\w]+)\.stamp\b",
        regex::escape(build_dir)
    ))
    .unwrap()
}

fn is_auxiliary_stamp(component_name: &str, dep: &str) -> bool {
    AUXILIARY_STAMP_SUFFIXES
        .iter()
        .any(|suffix| dep.strip_suffix(suffix) == Some(component_name))
}

/// The manifest filename with its extension removed.
fn manifest_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub_components(statement: &str) -> SubComponents {
        match match_sub_components(statement) {
            Some(LineMatch::SubComponents(m)) => m,
            other => panic!("expected SubComponents, got {:?}", other),
        }
    }

    fn validation(statement: &str) -> ManifestRecord {
        match match_validation_command(statement) {
            Some(LineMatch::ValidationCommand(m)) => m,
            other => panic!("expected ValidationCommand, got {:?}", other),
        }
    }

    fn compile(statement: &str) -> ManifestRecord {
        match match_compile_command(statement) {
            Some(LineMatch::CompileCommand(m)) => m,
            other => panic!("expected CompileCommand, got {:?}", other),
        }
    }

    #[test]
    fn test_sub_components_extracts_siblings() {
        let m = sub_components(
            "build obj/src/sys/bar.cmx: cmc_merge ../../src/sys/bar/meta/bar.cmx | \
             obj/src/sys/volley.stamp obj/src/sys/rally.stamp",
        );

        assert_eq!(m.component_target, BuildTargetPath::new("src/sys", "bar"));
        assert_eq!(
            m.sub_targets,
            vec![
                BuildTargetPath::new("src/sys", "volley"),
                BuildTargetPath::new("src/sys", "rally"),
            ]
        );
    }

    #[test]
    fn test_sub_components_skips_auxiliary_stamps() {
        let m = sub_components(
            "build obj/src/sys/bar.cmx: cmc_merge | \
             obj/src/sys/bar_check_includes.stamp \
             obj/src/sys/bar_validate_references.stamp \
             obj/src/sys/bar_merge_resources.stamp \
             obj/src/sys/bar.stamp \
             obj/src/sys/volley.stamp",
        );

        assert_eq!(
            m.sub_targets,
            vec![BuildTargetPath::new("src/sys", "volley")]
        );
    }

    #[test]
    fn test_sub_components_keeps_other_components_auxiliaries() {
        // Auxiliary suffixes only exclude stamps belonging to this
        // component; a sibling named like another component's auxiliary is
        // still a sub-component.
        let m = sub_components(
            "build obj/src/sys/bar.cmx: cmc_merge | obj/src/sys/other_check_includes.stamp",
        );

        assert_eq!(
            m.sub_targets,
            vec![BuildTargetPath::new("src/sys", "other_check_includes")]
        );
    }

    #[test]
    fn test_sub_components_matches_both_manifest_kinds() {
        let cm = sub_components("build obj/src/sys/bar.cm: cmc_compile | obj/src/sys/volley.stamp");
        assert_eq!(cm.component_target, BuildTargetPath::new("src/sys", "bar"));

        let cmx =
            sub_components("build obj/src/sys/bar.cmx: cmc_merge | obj/src/sys/volley.stamp");
        assert_eq!(cmx.component_target, BuildTargetPath::new("src/sys", "bar"));
    }

    #[test]
    fn test_validation_fallback_pair() {
        let m = validation(
            "  command = host_x64/cmc validate-references \
             --component-manifest ../../src/sys/bar/meta/bar.cmx \
             --gn-label //src/sys$:bar_cmc_validate_references",
        );

        assert_eq!(m.component_name, "bar");
        assert_eq!(m.component_target, BuildTargetPath::new("src/sys", "bar"));
        assert_eq!(m.manifest_path.to_str(), Some("src/sys/bar/meta/bar.cmx"));
    }

    #[test]
    fn test_validation_dest_manifest_takes_precedence() {
        let m = validation(
            "  command = host_x64/cmc validate-references \
             --stamp obj/src/sys/bar_validate_manifests_bar2.cmx.stamp \
             --component-manifest ../../src/sys/bar/meta/bar.cmx \
             --gn-label //src/sys$:bar_cmc_validate_references",
        );

        assert_eq!(m.component_name, "bar2");
        assert_eq!(m.component_target, BuildTargetPath::new("src/sys", "bar2"));
        assert_eq!(m.manifest_path.to_str(), Some("src/sys/bar/meta/bar.cmx"));
    }

    #[test]
    fn test_validation_normalizes_expanded_base_dir() {
        let m = validation(
            "  command = host_x64/cmc validate-references \
             --component-manifest /usr/local/work/fuchsia/out/default/src/sys/bar/meta/bar.cmx \
             --gn-label //src/sys$:bar_cmc_validate_references",
        );

        assert_eq!(m.manifest_path.to_str(), Some("src/sys/bar/meta/bar.cmx"));
    }

    #[test]
    fn test_validation_strips_label_suffix() {
        let m = validation(
            "  command = host_x64/cmc validate-references \
             --component-manifest ../../src/sys/widget/meta/widget.cmx \
             --gn-label //src/sys$:widget_component_cmc_validate_references",
        );

        assert_eq!(
            m.component_target,
            BuildTargetPath::new("src/sys", "widget_component")
        );
    }

    #[test]
    fn test_validation_requires_gn_label() {
        assert_eq!(
            match_validation_command(
                "  command = host_x64/cmc validate-references \
                 --component-manifest ../../src/sys/bar/meta/bar.cmx",
            ),
            None
        );
    }

    #[test]
    fn test_compile_extracts_all_fields() {
        let m = compile(
            "  command = host_x64/cmc compile ../../src/sys/baz/meta/baz.cml \
             --output obj/src/sys/baz/baz.cm --includepath ../../sdk \
             --depfile obj/src/sys/baz_component.d",
        );

        assert_eq!(m.component_name, "baz");
        assert_eq!(
            m.component_target,
            BuildTargetPath::new("src/sys", "baz_component")
        );
        assert_eq!(m.manifest_path.to_str(), Some("src/sys/baz/meta/baz.cml"));
    }

    #[test]
    fn test_compile_normalizes_expanded_base_dir() {
        let m = compile(
            "  command = host_x64/cmc compile /work/fuchsia/out/default/src/sys/baz/meta/baz.cml \
             --output obj/src/sys/baz/baz.cm --depfile obj/src/sys/baz.d",
        );

        assert_eq!(m.manifest_path.to_str(), Some("src/sys/baz/meta/baz.cml"));
    }

    #[test]
    fn test_compile_requires_depfile() {
        assert_eq!(
            match_compile_command(
                "  command = host_x64/cmc compile ../../src/sys/baz/meta/baz.cml \
                 --output obj/src/sys/baz/baz.cm",
            ),
            None
        );
    }

    #[test]
    fn test_validation_and_compile_reject_each_other() {
        assert_eq!(
            match_validation_command(
                "  command = host_x64/cmc compile ../../a.cml --output obj/a/b.cm \
                 --depfile obj/a/b.d",
            ),
            None
        );
        assert_eq!(
            match_compile_command(
                "  command = host_x64/cmc validate-references \
                 --component-manifest ../../src/sys/bar/meta/bar.cmx \
                 --gn-label //src/sys$:bar_cmc_validate_references",
            ),
            None
        );
    }
}
