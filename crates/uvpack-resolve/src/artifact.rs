//! The resolved artifact set.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

/// Resolved files and link metadata for one platform + link mode.
///
/// Produced fresh by each resolution call; no shared state. For a fixed
/// platform descriptor the set is a pure function of its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactSet {
    /// Directories whose contents are exported as headers.
    pub header_paths: BTreeSet<PathBuf>,
    /// Expected library files under the build output directory.
    pub library_paths: BTreeSet<PathBuf>,
    /// Library names downstream consumers link against, in order.
    pub link_library_names: Vec<String>,
    /// System libraries appended after the package's own, in order.
    pub system_library_names: Vec<String>,
}

impl ArtifactSet {
    /// The full link line: the package's libraries followed by the
    /// required system libraries, order preserved.
    pub fn full_link_line(&self) -> Vec<String> {
        self.link_library_names
            .iter()
            .chain(self.system_library_names.iter())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_line_order() {
        let set = ArtifactSet {
            header_paths: BTreeSet::new(),
            library_paths: BTreeSet::new(),
            link_library_names: vec!["uv".to_string()],
            system_library_names: vec!["pthread".to_string(), "dl".to_string()],
        };
        assert_eq!(set.full_link_line(), vec!["uv", "pthread", "dl"]);
    }
}
