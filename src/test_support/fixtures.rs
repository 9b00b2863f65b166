//! Shared sample inputs for unit tests.

use std::path::{Path, PathBuf};

/// A small dependency log exercising every matcher kind.
///
/// Package `foo` (target `foo-pkg` under `src/sys`) carries component
/// `bar` (validated `.cmx` manifest, with sub-component `volley`) and
/// component `baz` (compiled `.cml` manifest, reached through the
/// placeholder dependency `baz/component.stamp`).
pub const SAMPLE_LOG: &str = "\
rule phony

build obj/src/sys/foo-pkg/meta.far obj/src/sys/foo-pkg/blobs.json: phony $
    obj/src/sys/bar.stamp $
    obj/src/sys/baz/component.stamp $
    obj/src/sys/foo-pkg.manifest.stamp

build obj/src/sys/bar.cmx: cmc_merge ../../src/sys/bar/meta/bar.cmx | obj/src/sys/volley.stamp obj/src/sys/bar_check_includes.stamp

  command = host_x64/cmc validate-references --component-manifest ../../src/sys/bar/meta/bar.cmx --gn-label //src/sys$:bar_cmc_validate_references

  command = host_x64/cmc compile ../../src/sys/baz/meta/baz.cml --output obj/src/sys/baz/baz.cm --depfile obj/src/sys/baz_component.d

  command = host_x64/pm -o obj/src/sys/foo-pkg -m obj/src/sys/foo-pkg.manifest -n foo build-package
";

/// Search output matching `SAMPLE_LOG`'s components.
pub const SAMPLE_SEARCH_OUTPUT: &str = "\
src/main.cml:12:    children: [ \"fuchsia-pkg://fuchsia.com/foo#meta/bar.cmx\" ],
docs/components.md:3:Run fuchsia-pkg://fuchsia.com/foo#meta/baz.cm to start.
";

/// Write an executable stub that prints `output` regardless of arguments,
/// standing in for the repository search tool.
pub fn write_search_stub(dir: &Path, output: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-search");
    let script = format!("#!/bin/sh\ncat <<'SPYGLASS_EOF'\n{}SPYGLASS_EOF\n", output);
    std::fs::write(&path, script).unwrap();

    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();

    path
}
