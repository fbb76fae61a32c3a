//! Canned project content and fake `suitecloud` scripts for integration tests.

/// A typical SDF deploy manifest before cabinet touches it.
pub const DEFAULT_MANIFEST: &str = r#"<deploy>
    <configuration>
        <path>~/AccountConfiguration/*</path>
    </configuration>
    <files>
        <path>~/FileCabinet/*</path>
    </files>
    <objects>
        <path>~/Objects/*</path>
    </objects>
</deploy>
"#;

pub const LOCAL_CONTENT: &str = "local content\n";
pub const REMOTE_CONTENT: &str = "remote content\n";

/// Fake CLI: `file:import` writes a canned server copy at the requested
/// cabinet path and prints the success banner.
pub const IMPORT_SUCCESS_STUB: &str = r#"#!/bin/sh
cabinet_path=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "--paths" ]; then cabinet_path="$arg"; fi
  prev="$arg"
done
if [ -n "$cabinet_path" ]; then
  target="src/FileCabinet$cabinet_path"
  mkdir -p "$(dirname "$target")"
  printf 'remote content\n' > "$target"
  echo "The following files were imported:"
  echo "$cabinet_path"
fi
exit 0
"#;

/// Fake CLI: import always fails with exit code 1.
pub const IMPORT_FAILURE_STUB: &str = r#"#!/bin/sh
if [ "$#" -eq 0 ]; then exit 0; fi
echo "An unexpected error occurred."
exit 1
"#;

/// Fake CLI: `project:deploy` snapshots the live manifest to
/// `deploy-used.xml` (so tests can assert the narrowed manifest was in
/// effect) and prints the success banner.
pub const DEPLOY_SUCCESS_STUB: &str = r#"#!/bin/sh
if [ "$1" = "project:deploy" ]; then
  cp src/deploy.xml deploy-used.xml
  echo "Installation COMPLETE (0.521s)"
fi
exit 0
"#;

/// Fake CLI: deploy fails with exit code 7.
pub const DEPLOY_FAILURE_STUB: &str = r#"#!/bin/sh
if [ "$1" = "project:deploy" ]; then
  echo "Validation failed."
  exit 7
fi
exit 0
"#;
