//! Built-in file type registry.
//!
//! Each definition maps a canonical name plus aliases to an extension
//! set. Selecting several types unions their sets; the union is then
//! intersected with the glob filter by [`CompiledFilters`].
//!
//! [`CompiledFilters`]: super::CompiledFilters

use crate::error::SearchError;

/// One file type definition.
#[derive(Debug)]
pub(crate) struct FileTypeDef {
    pub(crate) name: &'static str,
    pub(crate) aliases: &'static [&'static str],
    pub(crate) extensions: &'static [&'static str],
}

impl FileTypeDef {
    pub(crate) fn matches_extension(&self, ext: &str) -> bool {
        !ext.is_empty() && self.extensions.contains(&ext)
    }
}

/// The default registry. Extension sets follow the conventions of
/// mainstream search tools.
const TYPES: &[FileTypeDef] = &[
    FileTypeDef {
        name: "c",
        aliases: &[],
        extensions: &["c", "h"],
    },
    FileTypeDef {
        name: "clojure",
        aliases: &["clj"],
        extensions: &["clj", "cljs", "cljc", "edn"],
    },
    FileTypeDef {
        name: "cpp",
        aliases: &["cxx"],
        extensions: &["cpp", "cc", "cxx", "hpp", "hxx", "hh"],
    },
    FileTypeDef {
        name: "csharp",
        aliases: &["cs"],
        extensions: &["cs", "csx"],
    },
    FileTypeDef {
        name: "css",
        aliases: &[],
        extensions: &["css", "scss", "sass", "less"],
    },
    FileTypeDef {
        name: "dart",
        aliases: &[],
        extensions: &["dart"],
    },
    FileTypeDef {
        name: "elixir",
        aliases: &["ex"],
        extensions: &["ex", "exs"],
    },
    FileTypeDef {
        name: "erlang",
        aliases: &["erl"],
        extensions: &["erl", "hrl"],
    },
    FileTypeDef {
        name: "go",
        aliases: &["golang"],
        extensions: &["go"],
    },
    FileTypeDef {
        name: "haskell",
        aliases: &["hs"],
        extensions: &["hs", "lhs"],
    },
    FileTypeDef {
        name: "html",
        aliases: &[],
        extensions: &["html", "htm"],
    },
    FileTypeDef {
        name: "java",
        aliases: &[],
        extensions: &["java"],
    },
    FileTypeDef {
        name: "javascript",
        aliases: &["js"],
        extensions: &["js", "jsx", "mjs", "cjs"],
    },
    FileTypeDef {
        name: "json",
        aliases: &[],
        extensions: &["json", "jsonc", "json5"],
    },
    FileTypeDef {
        name: "kotlin",
        aliases: &["kt"],
        extensions: &["kt", "kts"],
    },
    FileTypeDef {
        name: "lua",
        aliases: &[],
        extensions: &["lua"],
    },
    FileTypeDef {
        name: "markdown",
        aliases: &["md"],
        extensions: &["md", "markdown", "mdx"],
    },
    FileTypeDef {
        name: "perl",
        aliases: &["pl"],
        extensions: &["pl", "pm", "t"],
    },
    FileTypeDef {
        name: "php",
        aliases: &[],
        extensions: &["php", "phtml"],
    },
    FileTypeDef {
        name: "python",
        aliases: &["py"],
        extensions: &["py", "pyw", "pyi"],
    },
    FileTypeDef {
        name: "r",
        aliases: &[],
        extensions: &["r", "R", "Rmd"],
    },
    FileTypeDef {
        name: "ruby",
        aliases: &["rb"],
        extensions: &["rb", "rake", "gemspec"],
    },
    FileTypeDef {
        name: "rust",
        aliases: &["rs"],
        extensions: &["rs"],
    },
    FileTypeDef {
        name: "scala",
        aliases: &[],
        extensions: &["scala", "sc"],
    },
    FileTypeDef {
        name: "shell",
        aliases: &["sh", "bash"],
        extensions: &["sh", "bash", "zsh", "fish"],
    },
    FileTypeDef {
        name: "sql",
        aliases: &[],
        extensions: &["sql"],
    },
    FileTypeDef {
        name: "swift",
        aliases: &[],
        extensions: &["swift"],
    },
    FileTypeDef {
        name: "text",
        aliases: &["txt"],
        extensions: &["txt", "text"],
    },
    FileTypeDef {
        name: "toml",
        aliases: &[],
        extensions: &["toml"],
    },
    FileTypeDef {
        name: "typescript",
        aliases: &["ts"],
        extensions: &["ts", "tsx", "mts", "cts"],
    },
    FileTypeDef {
        name: "xml",
        aliases: &[],
        extensions: &["xml", "xsl", "xsd"],
    },
    FileTypeDef {
        name: "yaml",
        aliases: &["yml"],
        extensions: &["yaml", "yml"],
    },
    FileTypeDef {
        name: "zig",
        aliases: &[],
        extensions: &["zig"],
    },
];

fn lookup(name: &str) -> Option<&'static FileTypeDef> {
    TYPES
        .iter()
        .find(|def| def.name == name || def.aliases.contains(&name))
}

/// Resolve requested type names against the registry.
///
/// # Errors
///
/// `InvalidOption` naming the first unknown type.
pub(crate) fn resolve_types(names: &[String]) -> Result<Vec<&'static FileTypeDef>, SearchError> {
    let mut defs = Vec::with_capacity(names.len());
    for name in names {
        let def = lookup(name).ok_or_else(|| {
            SearchError::InvalidOption(format!("unknown file type `{name}`"))
        })?;
        if !defs.iter().any(|existing: &&FileTypeDef| existing.name == def.name) {
            defs.push(def);
        }
    }
    Ok(defs)
}
