//! Phase 2: Per-Library Update
//!
//! For a single library this module decides whether it directly requires the
//! dependency and, if so, pushes the bump and opens a merge request whose
//! title is the commit message, from the new branch into the library's
//! target branch. Libraries that only pull the dependency in transitively,
//! or do not use it at all, are left untouched.

use log::info;

use super::{LibraryOutcome, UpdateRequest};
use crate::change::ChangeApplier;
use crate::error::Result;
use crate::graph::DependencyGraphReader;
use crate::hosting::ReviewRequester;
use crate::library::Library;
use crate::output::Progress;

/// The collaborators phase 2 needs, borrowed from the orchestrator.
pub struct Pipeline<'a> {
    pub graph: DependencyGraphReader<'a>,
    pub applier: ChangeApplier<'a>,
    pub requester: &'a dyn ReviewRequester,
    pub progress: &'a dyn Progress,
    /// Stop after detection and report the branch that would be pushed.
    pub dry_run: bool,
}

/// Execute Phase 2 for one library
pub fn execute(
    library: &Library,
    request: &UpdateRequest,
    pipeline: &Pipeline<'_>,
) -> Result<LibraryOutcome> {
    if !pipeline.graph.is_dependent(library, &request.dependency)? {
        info!("{} does not depend on {}", library.name(), request.dependency);
        return Ok(LibraryOutcome::NotDependent);
    }

    pipeline.progress.dependent(library.name(), &request.dependency);

    if pipeline.dry_run {
        let branch = pipeline.applier.plan(&request.dependency, &request.version);
        pipeline.progress.would_create(library.name(), &branch);
        return Ok(LibraryOutcome::Planned { branch });
    }

    let change = pipeline
        .applier
        .apply(library, &request.dependency, &request.version)?;

    let url = pipeline.requester.create_review_request(
        library.id(),
        &change.message,
        &change.branch,
        library.target_branch(),
    )?;
    pipeline.progress.review_requested(library.name(), &url);

    Ok(LibraryOutcome::Proposed {
        branch: change.branch,
        url,
    })
}
