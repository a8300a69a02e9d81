//! Integration tests for the Git adapter.
//!
//! These tests drive real repositories created via tempfile: a working
//! repository on `main` and a bare repository configured as its `origin`.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use gitbridge::core::types::{Oid, Remote};
use gitbridge::diff::{
    compare, compare_blobs, compare_index_to_workdir, compare_tree_to_targets, compare_trees,
    ChangeKind,
    ChangeSummary, CompareOptions, CompareRequest, DiffError, DiffTargets, ExplicitPathsOptions,
    FullPatch, UnmatchedPathPolicy,
};
use gitbridge::git::{Git, GitError};
use gitbridge::network::{FetchOptions, ListOptions};
use gitbridge::rewrite::RewriteSnapshot;
use gitbridge::sync::request::ListReferencesRequest;
use gitbridge::sync::{NetworkExt, SyncError};

// =============================================================================
// Test Fixtures
// =============================================================================

/// A working repository with a bare `origin`.
struct TestRepo {
    dir: TempDir,
    remote: TempDir,
}

impl TestRepo {
    /// Create a repository with an initial commit on main and an empty origin.
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let remote = TempDir::new().expect("failed to create temp dir");

        run_git(remote.path(), &["init", "--bare", "-b", "main"]);

        run_git(dir.path(), &["init", "-b", "main"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["config", "user.name", "Test User"]);
        run_git(
            dir.path(),
            &["remote", "add", "origin", remote.path().to_str().unwrap()],
        );

        std::fs::write(dir.path().join("README.md"), "# Test Repo\n").unwrap();
        run_git(dir.path(), &["add", "README.md"]);
        run_git(dir.path(), &["commit", "-m", "Initial commit"]);

        Self { dir, remote }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn remote_path(&self) -> &Path {
        self.remote.path()
    }

    fn git(&self) -> Git {
        Git::open(self.path()).expect("failed to open test repo")
    }

    fn origin(&self) -> Remote {
        self.git().find_remote("origin").expect("origin configured")
    }

    /// Write a file and commit it.
    fn commit_file(&self, path: &str, content: &str, message: &str) {
        self.write(path, content);
        run_git(self.path(), &["add", path]);
        run_git(self.path(), &["commit", "-m", message]);
    }

    /// Write a file without staging it.
    fn write(&self, path: &str, content: &str) {
        let full = self.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }

    /// Configure `branch.<name>` to track the same name on origin.
    fn track(&self, branch: &str) {
        run_git(
            self.path(),
            &["config", &format!("branch.{}.remote", branch), "origin"],
        );
        run_git(
            self.path(),
            &[
                "config",
                &format!("branch.{}.merge", branch),
                &format!("refs/heads/{}", branch),
            ],
        );
    }

    fn rev_parse(&self, rev: &str) -> String {
        git_output(self.path(), &["rev-parse", rev])
    }

    /// Resolve a ref in the bare remote, `None` if it does not exist.
    fn remote_ref(&self, refname: &str) -> Option<String> {
        let output = Command::new("git")
            .args(["rev-parse", "--verify", "--quiet", refname])
            .current_dir(self.remote_path())
            .output()
            .expect("git rev-parse failed");
        output
            .status
            .success()
            .then(|| String::from_utf8(output.stdout).unwrap().trim().to_string())
    }
}

fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

fn git_output(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(output.status.success(), "git {:?} failed", args);
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

// =============================================================================
// Repository
// =============================================================================

mod repository {
    use super::*;

    #[test]
    fn open_outside_repo_fails() {
        let dir = TempDir::new().unwrap();
        let result = Git::open(dir.path());
        assert!(matches!(result, Err(GitError::NotARepo { .. })));
    }

    #[test]
    fn open_from_subdirectory() {
        let repo = TestRepo::new();
        repo.write("nested/deep/file.txt", "x\n");
        let git = Git::open(&repo.path().join("nested/deep")).unwrap();
        assert!(git.git_dir().ends_with(".git"));
    }

    #[test]
    fn find_remote_reports_url() {
        let repo = TestRepo::new();
        let origin = repo.origin();
        assert_eq!(origin.name, "origin");
        assert_eq!(
            origin.url.as_deref(),
            Some(repo.remote_path().to_str().unwrap())
        );

        let missing = repo.git().find_remote("upstream");
        assert!(matches!(missing, Err(GitError::RemoteNotFound { .. })));
    }

    #[test]
    fn untracked_branch_has_no_upstream() {
        let repo = TestRepo::new();
        let branch = repo.git().find_branch("main").unwrap();
        assert_eq!(branch.canonical_name, "refs/heads/main");
        assert_eq!(branch.friendly_name, "main");
        assert!(branch.remote.is_none());
        assert!(branch.upstream().is_none());
    }

    #[test]
    fn tracked_branch_reads_config() {
        let repo = TestRepo::new();
        repo.track("main");

        let branch = repo.git().current_branch().unwrap().unwrap();
        assert_eq!(branch.upstream(), Some("refs/heads/main"));
        assert_eq!(branch.remote.unwrap().name, "origin");
    }

    #[test]
    fn unknown_tracking_remote_is_kept_without_url() {
        let repo = TestRepo::new();
        run_git(repo.path(), &["config", "branch.main.remote", "ghost"]);
        run_git(repo.path(), &["config", "branch.main.merge", "refs/heads/main"]);

        let branch = repo.git().find_branch("main").unwrap();
        assert_eq!(branch.remote, Some(Remote::new("ghost", None)));
    }

    #[test]
    fn local_tracking_branch_uses_dot_remote() {
        let repo = TestRepo::new();
        run_git(repo.path(), &["branch", "--track", "feature", "main"]);
        let git = repo.git();

        let branch = git.find_branch("feature").unwrap();
        assert_eq!(branch.upstream(), Some("refs/heads/main"));
        assert_eq!(branch.remote, Some(Remote::new(".", None)));

        let names: Vec<String> = git
            .branches()
            .unwrap()
            .into_iter()
            .map(|b| b.friendly_name)
            .collect();
        assert_eq!(names, vec!["feature", "main"]);

        run_git(repo.path(), &["checkout", "feature"]);
        let current = git.current_branch().unwrap().unwrap();
        assert_eq!(current.friendly_name, "feature");
        assert_eq!(current.upstream(), Some("refs/heads/main"));
    }

    #[test]
    fn detached_head_has_no_current_branch() {
        let repo = TestRepo::new();
        let head = repo.rev_parse("HEAD");
        run_git(repo.path(), &["checkout", "--detach", &head]);
        assert!(repo.git().current_branch().unwrap().is_none());
    }

    #[test]
    fn resolve_tree_matches_git() {
        let repo = TestRepo::new();
        let tree = repo.git().resolve_tree("HEAD").unwrap();
        assert_eq!(tree.as_str(), repo.rev_parse("HEAD^{tree}"));

        assert!(matches!(
            repo.git().resolve_tree("no-such-rev"),
            Err(GitError::ObjectNotFound { oid }) if oid == "no-such-rev"
        ));
        assert!(matches!(
            repo.git().resolve_tree("refs/heads/missing"),
            Err(GitError::ObjectNotFound { .. })
        ));
    }
}

// =============================================================================
// Push
// =============================================================================

mod push {
    use super::*;

    #[test]
    fn push_branch_to_upstream() {
        let repo = TestRepo::new();
        repo.track("main");
        let git = repo.git();

        let branch = git.find_branch("main").unwrap();
        git.push_branch(&branch).unwrap();

        assert_eq!(
            repo.remote_ref("refs/heads/main"),
            Some(repo.rev_parse("HEAD"))
        );
    }

    #[test]
    fn push_branch_updates_existing_ref() {
        let repo = TestRepo::new();
        repo.track("main");
        let git = repo.git();
        let branch = git.find_branch("main").unwrap();
        git.push_branch(&branch).unwrap();

        repo.commit_file("a.txt", "a\n", "Add a");
        git.push_branch(&branch).unwrap();

        assert_eq!(
            repo.remote_ref("refs/heads/main"),
            Some(repo.rev_parse("HEAD"))
        );
    }

    #[test]
    fn push_branches_validates_all_before_pushing() {
        let repo = TestRepo::new();
        run_git(repo.path(), &["branch", "feature"]);
        repo.track("main");
        let git = repo.git();

        let branches = vec![
            git.find_branch("main").unwrap(),
            git.find_branch("feature").unwrap(),
        ];
        let err = git.push_branches(&branches).unwrap_err();

        assert!(matches!(
            &err,
            SyncError::MissingUpstream { friendly_name, .. } if friendly_name == "feature"
        ));
        assert!(err.is_precondition());
        assert_eq!(repo.remote_ref("refs/heads/main"), None);
    }

    #[test]
    fn push_refspec_and_delete_with_empty_object() {
        let repo = TestRepo::new();
        let git = repo.git();
        let origin = repo.origin();

        git.push_refspec(&origin, "refs/heads/main:refs/heads/published")
            .unwrap();
        assert_eq!(
            repo.remote_ref("refs/heads/published"),
            Some(repo.rev_parse("HEAD"))
        );

        git.push_object(&origin, "", "refs/heads/published").unwrap();
        assert_eq!(repo.remote_ref("refs/heads/published"), None);
    }

    #[test]
    fn push_object_by_short_name() {
        let repo = TestRepo::new();
        let git = repo.git();

        git.push_object(&repo.origin(), "main", "refs/heads/pinned")
            .unwrap();
        assert_eq!(
            repo.remote_ref("refs/heads/pinned"),
            Some(repo.rev_parse("HEAD"))
        );
        assert_eq!(repo.remote_ref("refs/heads/main"), None);
    }

    #[test]
    fn push_to_unknown_remote_fails() {
        let repo = TestRepo::new();
        let git = repo.git();
        let err = git
            .push_refspec(&Remote::new("ghost", None), "refs/heads/main")
            .unwrap_err();
        assert!(matches!(err, SyncError::Network(_)));
    }

    #[test]
    fn push_empty_refspec_is_rejected() {
        let repo = TestRepo::new();
        let err = repo.git().push_refspec(&repo.origin(), "").unwrap_err();
        assert!(matches!(err, SyncError::InvalidArgument { .. }));
    }
}

// =============================================================================
// Fetch and reference listing
// =============================================================================

mod fetch {
    use super::*;

    /// Publish main, then add a commit to origin from a second clone.
    fn advance_origin(repo: &TestRepo) -> String {
        run_git(repo.path(), &["push", "origin", "main"]);

        let other = TempDir::new().unwrap();
        run_git(
            other.path(),
            &["clone", repo.remote_path().to_str().unwrap(), "."],
        );
        run_git(other.path(), &["config", "user.email", "other@example.com"]);
        run_git(other.path(), &["config", "user.name", "Other User"]);
        std::fs::write(other.path().join("other.txt"), "other\n").unwrap();
        run_git(other.path(), &["add", "other.txt"]);
        run_git(other.path(), &["commit", "-m", "Other commit"]);
        run_git(other.path(), &["push", "origin", "main"]);

        git_output(other.path(), &["rev-parse", "HEAD"])
    }

    #[test]
    fn fetch_remote_updates_tracking_ref() {
        let repo = TestRepo::new();
        let tip = advance_origin(&repo);

        repo.git().fetch_remote(&repo.origin()).unwrap();

        assert_eq!(repo.rev_parse("refs/remotes/origin/main"), tip);
    }

    #[test]
    fn fetch_refspecs_into_custom_ref() {
        let repo = TestRepo::new();
        let tip = advance_origin(&repo);

        repo.git()
            .fetch_refspecs_with_log(
                &repo.origin(),
                &["refs/heads/main:refs/mirror/main"],
                "mirror fetch",
            )
            .unwrap();

        assert_eq!(repo.rev_parse("refs/mirror/main"), tip);
    }

    #[test]
    fn fetch_url_without_configured_remote() {
        let repo = TestRepo::new();
        let tip = advance_origin(&repo);
        let url = repo.remote_path().to_str().unwrap();

        repo.git()
            .fetch_url_with_options(
                url,
                &["refs/heads/main:refs/remotes/anon/main"],
                &FetchOptions::default(),
            )
            .unwrap();

        assert_eq!(repo.rev_parse("refs/remotes/anon/main"), tip);
    }

    #[test]
    fn fetch_unknown_remote_fails() {
        let repo = TestRepo::new();
        let err = repo
            .git()
            .fetch_remote(&Remote::new("ghost", None))
            .unwrap_err();
        assert!(matches!(err, SyncError::Network(_)));
    }

    #[test]
    fn list_remote_references_reports_heads_and_tags() {
        let repo = TestRepo::new();
        run_git(repo.path(), &["tag", "v1.0"]);
        run_git(repo.path(), &["push", "origin", "main", "v1.0"]);
        let head = repo.rev_parse("HEAD");
        let git = repo.git();

        let all = git.list_remote_references(&repo.origin()).unwrap();
        let main = all
            .iter()
            .find(|r| r.name == "refs/heads/main")
            .expect("main advertised");
        assert_eq!(main.target.as_str(), head);
        assert!(all.iter().any(|r| r.name == "refs/tags/v1.0"));

        let heads = git
            .list_references_with(&ListReferencesRequest::new(
                repo.origin().into(),
                ListOptions {
                    heads: true,
                    tags: false,
                },
            ))
            .unwrap();
        assert!(!heads.is_empty());
        assert!(heads.iter().all(|r| r.name.starts_with("refs/heads/")));
    }

    #[test]
    fn list_url_references_matches_remote() {
        let repo = TestRepo::new();
        run_git(repo.path(), &["push", "origin", "main"]);
        let git = repo.git();

        let by_remote = git.list_remote_references(&repo.origin()).unwrap();
        let by_url = git
            .list_url_references(repo.remote_path().to_str().unwrap())
            .unwrap();
        assert_eq!(by_remote, by_url);
    }
}

// =============================================================================
// Compare
// =============================================================================

mod compare_trees_and_workdir {
    use super::*;

    #[test]
    fn tree_to_tree_summary() {
        let repo = TestRepo::new();
        repo.commit_file("README.md", "# Test Repo\nmore\n", "Edit readme");
        repo.commit_file("src/new.txt", "new line\n", "Add new");
        let git = repo.git();

        let old = git.resolve_tree("HEAD~2").unwrap();
        let new = git.resolve_tree("HEAD").unwrap();
        let changes = compare_trees::<ChangeSummary, _>(&git, Some(old), Some(new)).unwrap();

        assert_eq!(changes.len(), 2);
        let readme = changes.iter().find(|c| c.path == "README.md").unwrap();
        assert_eq!(readme.kind, ChangeKind::Modified);
        let added = changes.iter().find(|c| c.path == "src/new.txt").unwrap();
        assert_eq!(added.kind, ChangeKind::Added);
        assert!(added.old_oid.is_none());
    }

    #[test]
    fn tree_to_tree_patch_content() {
        let repo = TestRepo::new();
        repo.commit_file("README.md", "# Test Repo\nmore\n", "Edit readme");
        let git = repo.git();

        let old = git.resolve_tree("HEAD~1").unwrap();
        let new = git.resolve_tree("HEAD").unwrap();
        let patch = compare_trees::<FullPatch, _>(&git, Some(old), Some(new)).unwrap();

        assert_eq!(patch.lines_added(), 1);
        assert_eq!(patch.lines_deleted(), 0);
        let content = patch.content();
        assert!(content.contains("+more"), "unexpected patch:\n{}", content);
        assert!(content.contains("README.md"));
    }

    #[test]
    fn missing_old_tree_is_empty_tree() {
        let repo = TestRepo::new();
        let git = repo.git();
        let head = git.resolve_tree("HEAD").unwrap();

        let changes = compare_trees::<ChangeSummary, _>(&git, None, Some(head)).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.entries()[0].kind, ChangeKind::Added);
    }

    #[test]
    fn summary_matches_patch_projection() {
        let repo = TestRepo::new();
        repo.commit_file("a.txt", "one\n", "Add a");
        repo.write("a.txt", "one\ntwo\n");
        repo.write("README.md", "changed\n");
        let git = repo.git();
        let head = git.resolve_tree("HEAD").unwrap();

        let summary = compare_tree_to_targets::<ChangeSummary, _>(
            &git,
            Some(head.clone()),
            DiffTargets::WorkingDirectory,
        )
        .unwrap();
        let patch =
            compare_tree_to_targets::<FullPatch, _>(&git, Some(head), DiffTargets::WorkingDirectory)
                .unwrap();

        let kinds = |changes: &gitbridge::diff::TreeChanges| {
            changes
                .iter()
                .map(|c| (c.path.clone(), c.kind))
                .collect::<Vec<_>>()
        };
        assert_eq!(summary.len(), 2);
        assert_eq!(kinds(&summary), kinds(&patch.changes()));
    }

    #[test]
    fn staged_change_is_in_index_only() {
        let repo = TestRepo::new();
        repo.write("staged.txt", "staged\n");
        run_git(repo.path(), &["add", "staged.txt"]);
        let git = repo.git();
        let head = git.resolve_tree("HEAD").unwrap();

        let to_index =
            compare_tree_to_targets::<ChangeSummary, _>(&git, Some(head), DiffTargets::Index)
                .unwrap();
        assert!(to_index.touches("staged.txt"));

        let index_to_workdir = compare_index_to_workdir::<ChangeSummary, _>(&git, false).unwrap();
        assert!(index_to_workdir.is_empty());
    }

    #[test]
    fn workdir_and_index_sees_both() {
        let repo = TestRepo::new();
        repo.write("staged.txt", "staged\n");
        run_git(repo.path(), &["add", "staged.txt"]);
        repo.write("README.md", "unstaged\n");
        let git = repo.git();
        let head = git.resolve_tree("HEAD").unwrap();

        let changes = compare_tree_to_targets::<ChangeSummary, _>(
            &git,
            Some(head),
            DiffTargets::WorkingDirectoryAndIndex,
        )
        .unwrap();
        assert!(changes.touches("staged.txt"));
        assert!(changes.touches("README.md"));
    }

    #[test]
    fn untracked_files_only_when_requested() {
        let repo = TestRepo::new();
        repo.write("scratch/notes.txt", "notes\n");
        let git = repo.git();

        let without = compare_index_to_workdir::<ChangeSummary, _>(&git, false).unwrap();
        assert!(without.is_empty());

        let with = compare_index_to_workdir::<ChangeSummary, _>(&git, true).unwrap();
        let untracked: Vec<_> = with.of_kind(ChangeKind::Untracked).collect();
        assert_eq!(untracked.len(), 1);
        assert_eq!(untracked[0].path, "scratch/notes.txt");
    }

    #[test]
    fn path_filter_limits_results() {
        let repo = TestRepo::new();
        repo.write("README.md", "changed\n");
        repo.commit_file("other.txt", "x\n", "Add other");
        repo.write("other.txt", "y\n");
        let git = repo.git();

        let request = CompareRequest::index_to_workdir().with_paths(["other.txt"]);
        let changes = compare::<ChangeSummary, _>(&git, request).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.entries()[0].path, "other.txt");
    }

    #[test]
    fn empty_path_filter_compares_nothing() {
        let repo = TestRepo::new();
        repo.write("README.md", "changed\n");
        let git = repo.git();

        let request = CompareRequest::index_to_workdir().with_paths(Vec::<String>::new());
        let patch = compare::<FullPatch, _>(&git, request).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn unmatched_explicit_path_fails_when_asked() {
        let repo = TestRepo::new();
        repo.commit_file("a.txt", "a\n", "Add a");
        let git = repo.git();
        let old = git.resolve_tree("HEAD~1").unwrap();
        let new = git.resolve_tree("HEAD").unwrap();

        let request = CompareRequest::trees(Some(old.clone()), Some(new.clone()))
            .with_paths(["a.txt", "missing.txt"])
            .with_explicit_paths(ExplicitPathsOptions {
                unmatched: UnmatchedPathPolicy::Fail,
            });
        let err = compare::<ChangeSummary, _>(&git, request).unwrap_err();
        assert_eq!(
            err,
            DiffError::UnmatchedPath {
                path: "missing.txt".into()
            }
        );

        let lenient = CompareRequest::trees(Some(old), Some(new))
            .with_paths(["a.txt", "missing.txt"])
            .with_explicit_paths(ExplicitPathsOptions::default());
        let changes = compare::<ChangeSummary, _>(&git, lenient).unwrap();
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn renames_detected_when_enabled() {
        let repo = TestRepo::new();
        repo.commit_file("old.txt", "line one\nline two\nline three\n", "Add old");
        run_git(repo.path(), &["mv", "old.txt", "new.txt"]);
        run_git(repo.path(), &["commit", "-m", "Rename"]);
        let git = repo.git();
        let old = git.resolve_tree("HEAD~1").unwrap();
        let new = git.resolve_tree("HEAD").unwrap();

        let plain = compare_trees::<ChangeSummary, _>(&git, Some(old.clone()), Some(new.clone()))
            .unwrap();
        assert_eq!(plain.len(), 2);

        let request = CompareRequest::trees(Some(old), Some(new)).with_options(CompareOptions {
            detect_renames: true,
            ..CompareOptions::default()
        });
        let renamed = compare::<ChangeSummary, _>(&git, request).unwrap();
        assert_eq!(renamed.len(), 1);
        let entry = &renamed.entries()[0];
        assert_eq!(entry.kind, ChangeKind::Renamed);
        assert_eq!(entry.old_path, "old.txt");
        assert_eq!(entry.path, "new.txt");
    }

    #[test]
    fn unknown_tree_oid_fails() {
        let repo = TestRepo::new();
        let git = repo.git();
        let bogus = gitbridge::core::types::Oid::new("0123456789abcdef0123456789abcdef01234567")
            .unwrap();

        let err = compare_trees::<ChangeSummary, _>(&git, Some(bogus), None).unwrap_err();
        assert!(matches!(err, DiffError::TreeNotFound(_)));
    }
}

// =============================================================================
// Blob comparisons
// =============================================================================

mod compare_blob_contents {
    use super::*;

    fn blob(repo: &TestRepo, content: &str) -> Oid {
        repo.write("blob.tmp", content);
        let oid = git_output(repo.path(), &["hash-object", "-w", "blob.tmp"]);
        std::fs::remove_file(repo.path().join("blob.tmp")).unwrap();
        Oid::new(oid.trim()).unwrap()
    }

    #[test]
    fn modified_blob_patch() {
        let repo = TestRepo::new();
        let old = blob(&repo, "one\ntwo\nthree\n");
        let new = blob(&repo, "one\n2\nthree\nfour\n");
        let git = repo.git();

        let patch = compare_blobs::<FullPatch, _>(&git, Some(old.clone()), Some(new.clone())).unwrap();

        assert_eq!(patch.files().len(), 1);
        let file = &patch.files()[0];
        assert_eq!(file.change.kind, ChangeKind::Modified);
        assert_eq!(file.change.old_oid, Some(old));
        assert_eq!(file.change.new_oid, Some(new));
        assert_eq!(file.lines_added, 2);
        assert_eq!(file.lines_deleted, 1);
        assert!(!file.is_binary);

        let content = patch.content();
        assert!(content.contains("-two"), "unexpected patch:\n{}", content);
        assert!(content.contains("+four"));
    }

    #[test]
    fn missing_old_blob_is_empty() {
        let repo = TestRepo::new();
        let new = blob(&repo, "a\nb\n");
        let git = repo.git();

        let patch = compare_blobs::<FullPatch, _>(&git, None, Some(new)).unwrap();
        assert_eq!(patch.lines_added(), 2);
        assert_eq!(patch.lines_deleted(), 0);
        assert_eq!(patch.files()[0].change.kind, ChangeKind::Added);
    }

    #[test]
    fn identical_blobs_have_no_changes() {
        let repo = TestRepo::new();
        let same = blob(&repo, "same\n");
        let git = repo.git();

        let patch = compare_blobs::<FullPatch, _>(&git, Some(same.clone()), Some(same.clone())).unwrap();
        assert!(patch.is_empty());
        let summary = compare_blobs::<ChangeSummary, _>(&git, Some(same.clone()), Some(same)).unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn summary_matches_patch_projection() {
        let repo = TestRepo::new();
        let old = blob(&repo, "x\n");
        let new = blob(&repo, "y\n");
        let git = repo.git();

        let summary = compare_blobs::<ChangeSummary, _>(&git, Some(old.clone()), Some(new.clone())).unwrap();
        let patch = compare_blobs::<FullPatch, _>(&git, Some(old), Some(new)).unwrap();
        assert_eq!(summary, patch.changes());
        assert_eq!(summary.len(), 1);
    }

    #[test]
    fn unknown_blob_fails() {
        let repo = TestRepo::new();
        let bogus = Oid::new("0123456789abcdef0123456789abcdef01234567").unwrap();
        let err = compare_blobs::<FullPatch, _>(&repo.git(), Some(bogus), None).unwrap_err();
        assert!(matches!(err, DiffError::BlobNotFound(_)));
    }

    #[test]
    fn tree_oid_is_not_a_blob() {
        let repo = TestRepo::new();
        let git = repo.git();
        let tree = git.resolve_tree("HEAD").unwrap();
        let err = compare_blobs::<ChangeSummary, _>(&git, Some(tree), None).unwrap_err();
        assert!(matches!(err, DiffError::BlobNotFound(_)));
    }
}

// =============================================================================
// Rewrite snapshots
// =============================================================================

mod rewrite {
    use super::*;

    #[test]
    fn snapshot_copies_commit_metadata() {
        let repo = TestRepo::new();
        repo.commit_file("a.txt", "a\n", "Add a\n\nWith a body.");
        let commit = repo.git().commit_info("HEAD").unwrap();

        assert_eq!(commit.oid.as_str(), repo.rev_parse("HEAD"));
        assert_eq!(commit.summary, "Add a");

        let snapshot = RewriteSnapshot::from_commit(&commit);
        assert_eq!(snapshot.author.name, "Test User");
        assert_eq!(snapshot.author.email, "test@example.com");
        assert_eq!(snapshot.committer.email, "test@example.com");
        assert!(snapshot.message.starts_with("Add a\n\nWith a body."));
    }

    #[test]
    fn snapshot_is_independent_of_commit() {
        let repo = TestRepo::new();
        let commit = repo.git().commit_info("HEAD").unwrap();

        let mut snapshot = RewriteSnapshot::from_commit(&commit);
        snapshot.message = "Reworded\n".into();
        snapshot.author.name = "Someone Else".into();

        assert_ne!(snapshot, RewriteSnapshot::from_commit(&commit));
        assert_eq!(commit.message, "Initial commit\n");
        assert_eq!(commit.author.name, "Test User");
    }

    #[test]
    fn unknown_revision_fails() {
        let repo = TestRepo::new();
        assert!(matches!(
            repo.git().commit_info("does-not-exist"),
            Err(GitError::ObjectNotFound { oid }) if oid == "does-not-exist"
        ));
    }
}
