//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module is the **single doorway** to libgit2. [`Git`] wraps a
//! repository and plays three roles:
//!
//! - branch, remote and commit provider for the CLI
//! - [`Network`] collaborator (fetch, push, ls-remote)
//! - [`TreeDiffer`] collaborator (tree, index and workdir comparisons)
//!
//! # Error Handling
//!
//! git2 failures are normalized into [`GitError`] for repository queries,
//! and into [`NetworkError`] / [`DiffError`] at the collaborator seams, so
//! callers above this module never see a `git2::Error`.
//!
//! # Example
//!
//! ```ignore
//! use gitbridge::git::Git;
//! use gitbridge::sync::NetworkExt;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let branch = git.find_branch("main")?;
//! git.push_branch(&branch)?;
//! ```

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::types::{Branch, Oid, Refspec, Remote, Signature, TypeError};
use crate::diff::{
    ChangeKind, CompareEndpoints, CompareRequest, DiffError, DiffLine, DiffOutput, DiffTargets,
    FilePatch, Hunk, LineOrigin, Patch, ShapeKind, TreeChanges, TreeDiffer, TreeEntryChange,
};
use crate::network::{DirectReference, Network, NetworkError, RemoteTarget, TagFetchMode};
use crate::rewrite::CommitSource;
use crate::sync::request::{FetchRequest, ListReferencesRequest, PushRequest};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// Requested ref or branch does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Requested remote does not exist.
    #[error("remote not found: {name}")]
    RemoteNotFound {
        /// Remote name
        name: String,
    },

    /// Object not found in repository.
    #[error("object not found: {oid}")]
    ObjectNotFound {
        /// The revision or OID that was not found
        oid: String,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// The invalid OID string
        oid: String,
    },

    /// Malformed refspec.
    #[error("invalid refspec: {message}")]
    InvalidRefspec {
        /// Description of the problem
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    ///
    /// Classification follows the libgit2 error class, never the spelling
    /// of `context`.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match (err.code(), err.class()) {
            (git2::ErrorCode::NotFound, git2::ErrorClass::Reference) => GitError::RefNotFound {
                refname: context.to_string(),
            },
            (git2::ErrorCode::NotFound, _) => GitError::ObjectNotFound {
                oid: context.to_string(),
            },
            (
                git2::ErrorCode::InvalidSpec,
                git2::ErrorClass::Object | git2::ErrorClass::Odb,
            ) => GitError::InvalidOid {
                oid: context.to_string(),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }

    /// Classify a failure to resolve a user-supplied revision.
    fn from_revision(err: git2::Error, rev: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound
            | git2::ErrorCode::InvalidSpec
            | git2::ErrorCode::Ambiguous
            | git2::ErrorCode::Peel => GitError::ObjectNotFound {
                oid: rev.to_string(),
            },
            _ => GitError::from_git2(err, rev),
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        let message = err.message().to_string();
        GitError::from_git2(err, &message)
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid { oid: msg },
            TypeError::InvalidRefspec(msg) => GitError::InvalidRefspec { message: msg },
        }
    }
}

impl From<GitError> for NetworkError {
    fn from(err: GitError) -> Self {
        match err {
            GitError::RemoteNotFound { name } => NetworkError::RemoteNotFound(name),
            other => NetworkError::Internal(other.to_string()),
        }
    }
}

impl From<GitError> for DiffError {
    fn from(err: GitError) -> Self {
        match err {
            GitError::ObjectNotFound { oid } | GitError::InvalidOid { oid } => {
                DiffError::TreeNotFound(oid)
            }
            other => DiffError::Internal(other.to_string()),
        }
    }
}

/// Classify a git2 failure raised while talking to a remote.
fn network_error(err: git2::Error) -> NetworkError {
    match err.class() {
        git2::ErrorClass::Net
        | git2::ErrorClass::Http
        | git2::ErrorClass::Ssh
        | git2::ErrorClass::Ssl
        | git2::ErrorClass::Os => NetworkError::Transport(err.message().to_string()),
        _ => NetworkError::Internal(err.message().to_string()),
    }
}

fn diff_error(err: git2::Error) -> DiffError {
    DiffError::Internal(err.message().to_string())
}

/// `branch.<name>.remote` value of a branch tracking another local branch.
const LOCAL_REMOTE: &str = ".";

/// Metadata of one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// The commit OID
    pub oid: Oid,
    /// First line of the commit message
    pub summary: String,
    /// Full commit message
    pub message: String,
    pub author: Signature,
    pub committer: Signature,
}

impl CommitSource for CommitInfo {
    fn author(&self) -> &Signature {
        &self.author
    }

    fn committer(&self) -> &Signature {
        &self.committer
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// The Git interface.
///
/// This is the **single point of interaction** with libgit2. Holds a
/// `git2::Repository`, so a `Git` can move between threads but must not be
/// shared between them.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover`, so `path` can be any directory
    /// within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// Get direct access to the .git directory path.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    // =========================================================================
    // Remotes and Branches
    // =========================================================================

    /// Look up a configured remote.
    ///
    /// # Errors
    ///
    /// - [`GitError::RemoteNotFound`] if no remote has this name
    pub fn find_remote(&self, name: &str) -> Result<Remote, GitError> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(Remote::new(name, remote.url().map(String::from))),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Err(GitError::RemoteNotFound {
                name: name.to_string(),
            }),
            Err(e) => Err(GitError::from_git2(e, name)),
        }
    }

    /// Look up a local branch and its tracking configuration.
    ///
    /// The upstream is read from `branch.<name>.merge` and the remote from
    /// `branch.<name>.remote`. A remote that cannot be looked up, including
    /// `.` for a branch tracking another local branch, is still reported,
    /// without a URL.
    ///
    /// # Errors
    ///
    /// - [`GitError::RefNotFound`] if the branch does not exist
    pub fn find_branch(&self, name: &str) -> Result<Branch, GitError> {
        let refname = format!("refs/heads/{}", name);
        self.repo
            .find_branch(name, git2::BranchType::Local)
            .map_err(|e| GitError::from_git2(e, &refname))?;

        let config = self.repo.config()?;
        let upstream = config_string(&config, &format!("branch.{}.merge", name))?;
        let remote_name = config_string(&config, &format!("branch.{}.remote", name))?;

        let remote = match remote_name {
            Some(remote_name) if remote_name == LOCAL_REMOTE => {
                Some(Remote::new(remote_name, None))
            }
            Some(remote_name) => Some(match self.find_remote(&remote_name) {
                Ok(remote) => remote,
                Err(e) => {
                    debug!(branch = name, remote = %remote_name, error = %e, "remote not resolvable");
                    Remote::new(remote_name, None)
                }
            }),
            None => None,
        };

        Ok(Branch {
            canonical_name: refname,
            friendly_name: name.to_string(),
            remote,
            upstream_canonical_name: upstream,
        })
    }

    /// All local branches, sorted by name.
    pub fn branches(&self) -> Result<Vec<Branch>, GitError> {
        let mut names = Vec::new();
        for entry in self.repo.branches(Some(git2::BranchType::Local))? {
            let (branch, _) = entry?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }
        names.sort();
        names.iter().map(|name| self.find_branch(name)).collect()
    }

    /// The checked-out branch, or `None` if HEAD is detached or unborn.
    pub fn current_branch(&self) -> Result<Option<Branch>, GitError> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            if let Some(name) = head.shorthand() {
                return self.find_branch(name).map(Some);
            }
        }

        Ok(None)
    }

    // =========================================================================
    // Objects
    // =========================================================================

    /// Resolve a revision to the OID of its tree.
    ///
    /// # Errors
    ///
    /// - [`GitError::ObjectNotFound`] if the revision does not resolve
    pub fn resolve_tree(&self, treeish: &str) -> Result<Oid, GitError> {
        let tree = self
            .repo
            .revparse_single(treeish)
            .and_then(|obj| obj.peel_to_tree())
            .map_err(|e| GitError::from_revision(e, treeish))?;
        Ok(Oid::new(tree.id().to_string())?)
    }

    /// Get metadata of the commit a revision resolves to.
    ///
    /// # Errors
    ///
    /// - [`GitError::ObjectNotFound`] if the revision does not resolve
    pub fn commit_info(&self, rev: &str) -> Result<CommitInfo, GitError> {
        let commit = self
            .repo
            .revparse_single(rev)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|e| GitError::from_revision(e, rev))?;

        let info = CommitInfo {
            oid: Oid::new(commit.id().to_string())?,
            summary: commit.summary().unwrap_or("").to_string(),
            message: commit.message().unwrap_or("").to_string(),
            author: signature(&commit.author())?,
            committer: signature(&commit.committer())?,
        };
        Ok(info)
    }

    fn find_git_remote(&self, target: &RemoteTarget) -> Result<git2::Remote<'_>, NetworkError> {
        match target {
            RemoteTarget::Remote(remote) => match self.repo.find_remote(&remote.name) {
                Ok(r) => Ok(r),
                Err(e) if e.code() == git2::ErrorCode::NotFound => {
                    Err(NetworkError::RemoteNotFound(remote.name.clone()))
                }
                Err(e) => Err(network_error(e)),
            },
            RemoteTarget::Url(url) => self.repo.remote_anonymous(url).map_err(network_error),
        }
    }

    /// Expand a short source name (`main`) to its full ref name.
    ///
    /// The transport only resolves full reference names on the source side.
    fn qualify_push_source(&self, refspec: &Refspec) -> String {
        let source = refspec.source();
        if source.is_empty() || source.starts_with("refs/") || source == "HEAD" {
            return refspec.as_str().to_string();
        }
        let Ok(reference) = self.repo.resolve_reference_from_short_name(source) else {
            return refspec.as_str().to_string();
        };
        let Some(full) = reference.name() else {
            return refspec.as_str().to_string();
        };

        let force = if refspec.is_force() { "+" } else { "" };
        match refspec.destination() {
            Some(destination) => format!("{}{}:{}", force, full, destination),
            None => format!("{}{}", force, full),
        }
    }

    fn peel_tree(&self, oid: Option<&Oid>) -> Result<Option<git2::Tree<'_>>, DiffError> {
        let Some(oid) = oid else {
            return Ok(None);
        };
        let tree = git2::Oid::from_str(oid.as_str())
            .and_then(|id| self.repo.find_object(id, None))
            .and_then(|obj| obj.peel_to_tree())
            .map_err(|_| DiffError::TreeNotFound(oid.to_string()))?;
        Ok(Some(tree))
    }

    fn find_blob(&self, oid: Option<&Oid>) -> Result<Option<git2::Blob<'_>>, DiffError> {
        let Some(oid) = oid else {
            return Ok(None);
        };
        let blob = git2::Oid::from_str(oid.as_str())
            .and_then(|id| self.repo.find_blob(id))
            .map_err(|_| DiffError::BlobNotFound(oid.to_string()))?;
        Ok(Some(blob))
    }

    /// Line diff of two blobs. A missing side is an empty blob.
    ///
    /// Identical blobs yield an empty patch unless unmodified entries were
    /// requested.
    fn diff_blobs(
        &self,
        old: Option<&Oid>,
        new: Option<&Oid>,
        options: &mut git2::DiffOptions,
    ) -> Result<Patch, DiffError> {
        let old = self.find_blob(old)?;
        let new = self.find_blob(new)?;

        // (change, hunks, binary) per file; libgit2 reports at most one
        let files: RefCell<Vec<(TreeEntryChange, Vec<Hunk>, bool)>> = RefCell::new(Vec::new());

        self.repo
            .diff_blobs(
                old.as_ref(),
                None,
                new.as_ref(),
                None,
                Some(options),
                Some(&mut |delta, _progress| {
                    let binary = delta.flags().contains(git2::DiffFlags::BINARY);
                    files
                        .borrow_mut()
                        .push((entry_change(&delta), Vec::new(), binary));
                    true
                }),
                Some(&mut |_delta, _binary| {
                    if let Some(file) = files.borrow_mut().last_mut() {
                        file.2 = true;
                    }
                    true
                }),
                Some(&mut |_delta, hunk| {
                    if let Some(file) = files.borrow_mut().last_mut() {
                        file.1.push(hunk_of(&hunk));
                    }
                    true
                }),
                Some(&mut |_delta, _hunk, line| {
                    let mut files = files.borrow_mut();
                    let hunk = files.last_mut().and_then(|file| file.1.last_mut());
                    if let (Some(hunk), Some(line)) = (hunk, line_of(&line)) {
                        hunk.lines.push(line);
                    }
                    true
                }),
            )
            .map_err(diff_error)?;

        Ok(Patch::new(
            files
                .into_inner()
                .into_iter()
                .map(|(change, hunks, binary)| FilePatch::new(change, hunks, binary))
                .collect(),
        ))
    }
}

fn config_string(config: &git2::Config, key: &str) -> Result<Option<String>, GitError> {
    match config.get_string(key) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
        Err(e) => Err(GitError::from_git2(e, key)),
    }
}

fn signature(sig: &git2::Signature<'_>) -> Result<Signature, GitError> {
    let when = sig.when();
    let offset = FixedOffset::east_opt(when.offset_minutes() * 60).ok_or_else(|| {
        GitError::Internal {
            message: format!("invalid timezone offset: {} minutes", when.offset_minutes()),
        }
    })?;
    let at = DateTime::from_timestamp(when.seconds(), 0).ok_or_else(|| GitError::Internal {
        message: format!("invalid timestamp: {}", when.seconds()),
    })?;
    Ok(Signature::new(
        sig.name().unwrap_or(""),
        sig.email().unwrap_or(""),
        at.with_timezone(&offset),
    ))
}

// =============================================================================
// Network collaborator
// =============================================================================

impl Network for Git {
    fn fetch(&self, request: &FetchRequest) -> Result<(), NetworkError> {
        let mut remote = self.find_git_remote(&request.target)?;

        let mut options = git2::FetchOptions::new();
        options.download_tags(match request.options.tags {
            TagFetchMode::Auto => git2::AutotagOption::Auto,
            TagFetchMode::All => git2::AutotagOption::All,
            TagFetchMode::None => git2::AutotagOption::None,
        });
        options.prune(match request.options.prune {
            Some(true) => git2::FetchPrune::On,
            Some(false) => git2::FetchPrune::Off,
            None => git2::FetchPrune::Unspecified,
        });

        let refspecs: Vec<&str> = request
            .refspecs
            .iter()
            .flatten()
            .map(|r| r.as_str())
            .collect();

        debug!(remote = %request.target, refspecs = refspecs.len(), "fetching");
        remote
            .fetch(&refspecs, Some(&mut options), request.log_message.as_deref())
            .map_err(network_error)?;

        let stats = remote.stats();
        info!(
            remote = %request.target,
            objects = stats.received_objects(),
            bytes = stats.received_bytes(),
            "fetch complete"
        );
        Ok(())
    }

    fn push(&self, request: &PushRequest) -> Result<(), NetworkError> {
        let mut remote = self.find_git_remote(&RemoteTarget::Remote(request.remote.clone()))?;
        let rejected: RefCell<Option<(String, String)>> = RefCell::new(None);

        {
            let mut callbacks = git2::RemoteCallbacks::new();
            callbacks.push_update_reference(|refname, status| {
                if let Some(reason) = status {
                    rejected
                        .borrow_mut()
                        .get_or_insert_with(|| (refname.to_string(), reason.to_string()));
                }
                Ok(())
            });

            let mut options = git2::PushOptions::new();
            options.remote_callbacks(callbacks);
            options.packbuilder_parallelism(request.options.packbuilder_parallelism);

            let refspecs: Vec<String> = request
                .refspecs
                .iter()
                .map(|r| self.qualify_push_source(r))
                .collect();
            debug!(remote = %request.remote, refspecs = ?refspecs, "pushing");
            remote
                .push(&refspecs, Some(&mut options))
                .map_err(network_error)?;
        }

        if let Some((refname, reason)) = rejected.into_inner() {
            return Err(NetworkError::Rejected { refname, reason });
        }
        Ok(())
    }

    fn list_references(
        &self,
        request: &ListReferencesRequest,
    ) -> Result<Vec<DirectReference>, NetworkError> {
        let mut remote = self.find_git_remote(&request.target)?;
        remote
            .connect(git2::Direction::Fetch)
            .map_err(network_error)?;

        let mut references = Vec::new();
        for head in remote.list().map_err(network_error)? {
            if !request.options.accepts(head.name()) {
                continue;
            }
            references.push(DirectReference {
                name: head.name().to_string(),
                target: Oid::new(head.oid().to_string())
                    .map_err(|e| NetworkError::Internal(e.to_string()))?,
                symref_target: head.symref_target().map(String::from),
            });
        }

        remote.disconnect().map_err(network_error)?;
        debug!(remote = %request.target, count = references.len(), "listed references");
        Ok(references)
    }
}

// =============================================================================
// Differ collaborator
// =============================================================================

impl TreeDiffer for Git {
    fn diff(&self, request: &CompareRequest) -> Result<DiffOutput, DiffError> {
        let compare = &request.options;
        let mut options = git2::DiffOptions::new();
        options
            .context_lines(compare.context_lines)
            .interhunk_lines(compare.interhunk_lines)
            .include_unmodified(compare.include_unmodified)
            .ignore_whitespace(compare.ignore_whitespace);

        for path in request.paths.iter().flatten() {
            options.pathspec(path.as_str());
        }
        if request.explicit_paths.is_some() {
            options.disable_pathspec_match(true);
        }

        let repo = &self.repo;
        let mut diff = match &request.endpoints {
            CompareEndpoints::Blobs { old, new } => {
                let patch = self.diff_blobs(old.as_ref(), new.as_ref(), &mut options)?;
                return Ok(match request.shape {
                    ShapeKind::Summary => DiffOutput::Summary(patch.changes()),
                    ShapeKind::Patch => DiffOutput::Patch(patch),
                });
            }
            CompareEndpoints::Trees { old, new } => {
                let old = self.peel_tree(old.as_ref())?;
                let new = self.peel_tree(new.as_ref())?;
                repo.diff_tree_to_tree(old.as_ref(), new.as_ref(), Some(&mut options))
            }
            CompareEndpoints::TreeToTargets { old, targets } => {
                let old = self.peel_tree(old.as_ref())?;
                match targets {
                    DiffTargets::Index => repo.diff_tree_to_index(old.as_ref(), None, Some(&mut options)),
                    DiffTargets::WorkingDirectory => {
                        repo.diff_tree_to_workdir(old.as_ref(), Some(&mut options))
                    }
                    DiffTargets::WorkingDirectoryAndIndex => {
                        repo.diff_tree_to_workdir_with_index(old.as_ref(), Some(&mut options))
                    }
                }
            }
            CompareEndpoints::IndexToWorkdir { include_untracked } => {
                options
                    .include_untracked(*include_untracked)
                    .recurse_untracked_dirs(*include_untracked)
                    .show_untracked_content(*include_untracked);
                repo.diff_index_to_workdir(None, Some(&mut options))
            }
        }
        .map_err(diff_error)?;

        if compare.detect_renames {
            let mut find = git2::DiffFindOptions::new();
            find.renames(true);
            diff.find_similar(Some(&mut find)).map_err(diff_error)?;
        }

        match request.shape {
            ShapeKind::Summary => Ok(DiffOutput::Summary(TreeChanges::new(
                diff.deltas().map(|d| entry_change(&d)).collect(),
            ))),
            ShapeKind::Patch => Ok(DiffOutput::Patch(patch_of(&diff)?)),
        }
    }
}

fn change_kind(status: git2::Delta) -> ChangeKind {
    match status {
        git2::Delta::Added => ChangeKind::Added,
        git2::Delta::Deleted => ChangeKind::Deleted,
        git2::Delta::Modified | git2::Delta::Unreadable => ChangeKind::Modified,
        git2::Delta::Renamed => ChangeKind::Renamed,
        git2::Delta::Copied => ChangeKind::Copied,
        git2::Delta::Typechange => ChangeKind::TypeChanged,
        git2::Delta::Untracked | git2::Delta::Ignored => ChangeKind::Untracked,
        git2::Delta::Unmodified => ChangeKind::Unmodified,
        git2::Delta::Conflicted => ChangeKind::Conflicted,
    }
}

fn file_path(file: &git2::DiffFile<'_>) -> Option<String> {
    file.path().map(|p| p.to_string_lossy().into_owned())
}

fn file_oid(file: &git2::DiffFile<'_>) -> Option<Oid> {
    Oid::new(file.id().to_string())
        .ok()
        .filter(|oid| !oid.is_zero())
}

fn entry_change(delta: &git2::DiffDelta<'_>) -> TreeEntryChange {
    let old_file = delta.old_file();
    let new_file = delta.new_file();
    let new_path = file_path(&new_file);
    let old_path = file_path(&old_file);

    let path = new_path.or_else(|| old_path.clone()).unwrap_or_default();
    TreeEntryChange {
        old_path: old_path.unwrap_or_else(|| path.clone()),
        path,
        kind: change_kind(delta.status()),
        old_oid: file_oid(&old_file),
        new_oid: file_oid(&new_file),
    }
}

fn hunk_of(hunk: &git2::DiffHunk<'_>) -> Hunk {
    Hunk {
        header: String::from_utf8_lossy(hunk.header()).trim_end().to_string(),
        old_start: hunk.old_start(),
        old_lines: hunk.old_lines(),
        new_start: hunk.new_start(),
        new_lines: hunk.new_lines(),
        lines: Vec::new(),
    }
}

fn line_of(line: &git2::DiffLine<'_>) -> Option<DiffLine> {
    let origin = match line.origin() {
        '+' => LineOrigin::Addition,
        '-' => LineOrigin::Deletion,
        ' ' => LineOrigin::Context,
        // end-of-file newline markers and file/hunk headers
        _ => return None,
    };
    Some(DiffLine {
        origin,
        old_lineno: line.old_lineno(),
        new_lineno: line.new_lineno(),
        content: String::from_utf8_lossy(line.content()).into_owned(),
    })
}

fn patch_of(diff: &git2::Diff<'_>) -> Result<Patch, DiffError> {
    let mut files = Vec::with_capacity(diff.deltas().len());

    for idx in 0..diff.deltas().len() {
        let Some(delta) = diff.get_delta(idx) else {
            continue;
        };
        let change = entry_change(&delta);

        let Some(patch) = git2::Patch::from_diff(diff, idx).map_err(diff_error)? else {
            let binary = delta.flags().contains(git2::DiffFlags::BINARY);
            files.push(FilePatch::new(change, Vec::new(), binary));
            continue;
        };

        let binary = patch.delta().flags().contains(git2::DiffFlags::BINARY);
        let mut hunks = Vec::with_capacity(patch.num_hunks());
        for h in 0..patch.num_hunks() {
            let (hunk, line_count) = patch.hunk(h).map_err(diff_error)?;
            let mut hunk = hunk_of(&hunk);
            for l in 0..line_count {
                let line = patch.line_in_hunk(h, l).map_err(diff_error)?;
                hunk.lines.extend(line_of(&line));
            }
            hunks.push(hunk);
        }
        files.push(FilePatch::new(change, hunks, binary));
    }

    Ok(Patch::new(files))
}
