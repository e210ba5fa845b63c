#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Isolated home directory plus database for one test.
pub struct TestEnv {
    pub home: TempDir,
    pub db: String,
}

impl TestEnv {
    pub fn new() -> Self {
        let home = tempfile::tempdir().expect("create temp home");
        let db = home
            .path()
            .join("rponto_test.sqlite")
            .to_string_lossy()
            .to_string();
        Self { home, db }
    }

    /// Same as `new`, with the database already initialized.
    pub fn initialized() -> Self {
        let env = Self::new();
        env.cmd().args(["--test", "init"]).assert().success();
        env
    }

    /// The binary, pointed at this environment's config dir and DB.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("rponto");
        cmd.env("RPONTO_HOME", self.home.path());
        cmd.args(["--db", &self.db]);
        cmd
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.home.path().join(name)
    }

    /// Write a scratch file inside the temp home and return its path.
    pub fn write_file(&self, name: &str, content: &str) -> String {
        let p = self.path(name);
        fs::write(&p, content).expect("write scratch file");
        p.to_string_lossy().to_string()
    }

    pub fn punch(&self, direction: &str, at: &str) {
        self.cmd()
            .args([
                "punch",
                direction,
                "--lat",
                "-23.550520",
                "--lon",
                "-46.633308",
                "--address",
                "Av. Paulista, São Paulo - SP",
                "--at",
                at,
            ])
            .assert()
            .success();
    }
}
