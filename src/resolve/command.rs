// src/resolve/command.rs

//! Command materialization: pure string formatting of one generator
//! invocation. All paths are forward-slash normalized so the resulting
//! string is shell-invokable on every platform.

use std::path::Path;

use crate::paths::normalized;

/// Combine a specification path and its serialized option tokens into a
/// single generator command, pointing the generator at `emitter_root`
/// as the target emitter bundle.
pub fn materialize_command(
    program: &str,
    spec_path: &Path,
    emitter_root: &Path,
    args: &str,
) -> String {
    let spec = normalized(spec_path);
    let root = normalized(emitter_root);
    if args.is_empty() {
        format!("{program} {spec} --emit {root}")
    } else {
        format!("{program} {spec} --emit {root} {args}")
    }
}
