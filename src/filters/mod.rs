//! Filter compilation: one pass over the request turns the raw pattern,
//! glob and type names into compiled matchers shared read-only by every
//! worker thread.

mod glob;
mod pattern;
mod types;

pub(crate) use glob::compile_glob;
pub(crate) use pattern::build_matcher;
pub(crate) use types::{FileTypeDef, resolve_types};

use std::ffi::OsStr;
use std::path::Path;

use grep::regex::RegexMatcher;

use crate::error::SearchError;
use crate::request::SearchRequest;

/// The compiled matcher set for one request.
///
/// Accepts a candidate path only if it matches the glob (when set) AND at
/// least one selected type's extension set (when set).
#[derive(Debug)]
pub(crate) struct CompiledFilters {
    /// The content matcher. Absent only in `Files` mode, where the
    /// pattern is ignored even when supplied.
    pub(crate) matcher: Option<RegexMatcher>,
    pub(crate) glob: Option<globset::GlobSet>,
    pub(crate) types: Vec<&'static FileTypeDef>,
}

impl CompiledFilters {
    /// Compile every filter in the request.
    ///
    /// # Errors
    ///
    /// `InvalidPattern` for a malformed regex or glob, `InvalidOption`
    /// for an unknown type name.
    pub(crate) fn compile(request: &SearchRequest) -> Result<CompiledFilters, SearchError> {
        let matcher = match (&request.pattern, request.output_mode.requires_pattern()) {
            (Some(pattern), true) => Some(build_matcher(
                pattern,
                request.case_insensitive,
                request.literal,
                request.multiline,
            )?),
            _ => None,
        };
        let glob = request.glob.as_deref().map(compile_glob).transpose()?;
        let types = resolve_types(&request.types)?;
        Ok(CompiledFilters {
            matcher,
            glob,
            types,
        })
    }

    /// Decide whether a file at `relative` (root-relative, `/`-separated
    /// on Unix by construction) passes the glob and type filters.
    pub(crate) fn accepts(&self, relative: &Path) -> bool {
        if let Some(ref glob) = self.glob
            && !glob.is_match(relative)
        {
            return false;
        }
        if self.types.is_empty() {
            return true;
        }
        let ext = relative.extension().and_then(OsStr::to_str).unwrap_or("");
        self.types.iter().any(|def| def.matches_extension(ext))
    }
}
