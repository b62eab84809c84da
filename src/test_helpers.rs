/// Shared test utilities for data directories and git repositories.
///
/// Provides a clean API for creating throwaway workspaces with fixture
/// files, optionally backed by a git repository.
use git2::{BranchType, Repository, Signature};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::workspace::Workspace;

/// A small but realistic `cardata.csv`.
pub const SAMPLE_CSV: &str = "\
Date,Odometer,Service,Vendor
5022018,30123,Oil change,Jiffy Lube
11152018,35200,Tire rotation,
11152018,35200,Oil change,  dealer
03012019,40110,Engine air filter,
12052019,,Cabin air   filter,self
bogus,41000,,
,,,
";

/// A test repository wrapper with convenient helper methods.
pub struct TestRepo {
    pub repo: Repository,
    _dir: TempDir,
}

impl TestRepo {
    /// Create a new test repository with an initial commit.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        Self::configure_identity(&repo);

        {
            let sig = Self::sig();
            let tree_id = repo.index().unwrap().write_tree().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
                .unwrap();
        }

        TestRepo { repo, _dir: dir }
    }

    /// Create a test repository cloned from a bare "remote".
    ///
    /// Sets up:
    /// - A bare repository at remote.git with an initial commit on main
    /// - A clone at work/ whose main branch tracks origin/main
    pub fn new_with_remote() -> Self {
        let dir = tempfile::tempdir().unwrap();

        let remote_path = dir.path().join("remote.git");
        let remote_repo = Repository::init_bare(&remote_path).unwrap();
        {
            let sig = Self::sig();
            let tree_id = remote_repo.index().unwrap().write_tree().unwrap();
            let tree = remote_repo.find_tree(tree_id).unwrap();
            remote_repo
                .commit(Some("refs/heads/main"), &sig, &sig, "Initial", &tree, &[])
                .unwrap();
            remote_repo.set_head("refs/heads/main").unwrap();
        }

        let work_path = dir.path().join("work");
        let repo = Repository::clone(remote_path.to_str().unwrap(), &work_path).unwrap();
        Self::configure_identity(&repo);

        TestRepo { repo, _dir: dir }
    }

    /// Local identity so the git CLI can commit regardless of global config.
    fn configure_identity(repo: &Repository) {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test").unwrap();
        config.set_str("user.email", "test@test.com").unwrap();
        config.set_bool("commit.gpgsign", false).unwrap();
    }

    /// Get the signature used for commits.
    fn sig() -> Signature<'static> {
        Signature::now("Test", "test@test.com").unwrap()
    }

    /// Create a commit that writes `message` into `filename`.
    ///
    /// # Returns
    /// The OID of the created commit
    pub fn commit(&self, message: &str, filename: &str) -> git2::Oid {
        self.write_file(filename, message);

        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new(filename)).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let sig = Self::sig();
        let parent = self.repo.head().unwrap().peel_to_commit().unwrap();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])
            .unwrap()
    }

    /// Get the commit message at a position relative to HEAD.
    pub fn get_message(&self, steps_back: usize) -> String {
        let mut commit = self.repo.head().unwrap().peel_to_commit().unwrap();
        for _ in 0..steps_back {
            commit = commit.parent(0).unwrap();
        }
        commit.message().unwrap().trim().to_string()
    }

    /// Files changed by the HEAD commit, relative to its parent.
    pub fn head_commit_files(&self) -> Vec<String> {
        let head = self.repo.head().unwrap().peel_to_commit().unwrap();
        let parent_tree = head.parent(0).unwrap().tree().unwrap();
        let diff = self
            .repo
            .diff_tree_to_tree(Some(&parent_tree), Some(&head.tree().unwrap()), None)
            .unwrap();
        let mut files: Vec<String> = diff
            .deltas()
            .filter_map(|d| d.new_file().path().map(|p| p.display().to_string()))
            .collect();
        files.sort();
        files
    }

    /// Get the current HEAD commit OID.
    pub fn head_oid(&self) -> git2::Oid {
        self.repo.head().unwrap().target().unwrap()
    }

    /// OID of a branch in the bare remote.
    pub fn remote_branch_oid(&self, branch: &str) -> git2::Oid {
        let remote_path = self._dir.path().join("remote.git");
        let remote_repo = Repository::open_bare(remote_path).unwrap();
        remote_repo
            .find_branch(branch, BranchType::Local)
            .unwrap()
            .get()
            .target()
            .unwrap()
    }

    /// Get the path to the working directory.
    pub fn workdir(&self) -> PathBuf {
        self.repo.workdir().unwrap().to_path_buf()
    }

    /// The working directory as a data workspace.
    pub fn workspace(&self) -> Workspace {
        Workspace::at(self.workdir()).unwrap()
    }

    /// Write content to a file in the working directory (without committing).
    pub fn write_file(&self, filename: &str, content: &str) {
        let path = self.workdir().join(filename);
        fs::write(path, content).unwrap();
    }

    /// Read content from a file in the working directory.
    pub fn read_file(&self, filename: &str) -> String {
        let path = self.workdir().join(filename);
        fs::read_to_string(path).unwrap()
    }
}

/// A plain (non-git) workspace in a temporary directory.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        TestDir {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// A workspace seeded with [`SAMPLE_CSV`].
    pub fn with_sample_csv() -> Self {
        let test_dir = Self::new();
        test_dir.write_file("cardata.csv", SAMPLE_CSV);
        test_dir
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn workspace(&self) -> Workspace {
        Workspace::at(self.dir.path()).unwrap()
    }

    pub fn write_file(&self, filename: &str, content: &str) {
        fs::write(self.dir.path().join(filename), content).unwrap();
    }

    pub fn read_file(&self, filename: &str) -> String {
        fs::read_to_string(self.dir.path().join(filename)).unwrap()
    }

    /// Names of all files in the directory, sorted.
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
