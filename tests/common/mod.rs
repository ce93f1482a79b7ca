//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// A small mixed-language tree used across the interface tests.
///
/// `main.py`, `app.js`, `lib.rs` and `README.md` each contain the string
/// `ERROR`; `src/utils.py` does not.
pub fn sample_tree() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    write_file(
        dir.path(),
        "main.py",
        "#!/usr/bin/env python3\n\
         import os\n\
         import sys\n\
         \n\
         def main():\n\
         \x20   print(\"Hello World\")\n\
         \x20   return 0\n\
         \n\
         class Logger:\n\
         \x20   def error(self, msg):\n\
         \x20       print(f\"ERROR: {msg}\")\n",
    );
    write_file(
        dir.path(),
        "app.js",
        "// JavaScript application\n\
         function greet(name) {\n\
         \x20   console.log(`Hello ${name}!`);\n\
         }\n\
         \n\
         const logger = {\n\
         \x20   error: function(msg) {\n\
         \x20       console.error('ERROR:', msg);\n\
         \x20   }\n\
         };\n\
         \n\
         greet('World');\n",
    );
    write_file(
        dir.path(),
        "lib.rs",
        "// Rust library\n\
         use std::collections::HashMap;\n\
         \n\
         pub struct Config {\n\
         \x20   pub settings: HashMap<String, String>,\n\
         }\n\
         \n\
         impl Config {\n\
         \x20   pub fn error(&self, msg: &str) {\n\
         \x20       eprintln!(\"ERROR: {}\", msg);\n\
         \x20   }\n\
         }\n",
    );
    write_file(
        dir.path(),
        "README.md",
        "# Test Project\n\
         \n\
         A sample project for exercising the search library.\n\
         \n\
         ## Features\n\
         - Fast search\n\
         - Multiple output modes\n\
         - Regular expression support\n\
         \n\
         ERROR handling is important.\n",
    );
    write_file(
        dir.path(),
        "src/utils.py",
        "def helper():\n\
         \x20   return \"utility function\"\n\
         \n\
         def error_handler():\n\
         \x20   raise Exception(\"Test error\")\n",
    );
    dir
}

/// Write one file under `root`, creating parent directories as needed.
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create parent dirs");
    }
    fs::write(&path, content).expect("failed to write fixture file");
}

/// Basenames of a path list, for assertions that ignore the temp prefix.
pub fn basenames(paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .map(|p| {
            Path::new(p)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.clone())
        })
        .collect()
}
