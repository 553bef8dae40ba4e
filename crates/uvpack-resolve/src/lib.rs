//! Artifact resolution for uvpack.
//!
//! Given a platform descriptor and a built source tree, `resolve` computes
//! the artifact set — header roots, expected library files, and the ordered
//! link/system library names — as a pure function of its inputs. `stage`
//! then performs the side effects: existence checks, copies into the
//! package layout, the unversioned shared-object symlink on Unix, and the
//! emitted link-metadata manifest.

pub mod artifact;
pub mod error;
pub mod policy;
pub mod stage;

pub use artifact::ArtifactSet;
pub use error::{ResolveError, Result};
pub use policy::resolve;
pub use stage::{stage, PackageLayout, StageReport};
