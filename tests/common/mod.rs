#![allow(dead_code)]

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::process::{Command, Output, Stdio};
use std::thread;

use tempfile::TempDir;

/// Helper struct to run mailform commands in an isolated temp directory
pub struct MailformTest {
    pub temp_dir: TempDir,
    binary_path: &'static str,
    api_url: Option<String>,
}

impl MailformTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        MailformTest {
            temp_dir,
            binary_path: env!("CARGO_BIN_EXE_mailform"),
            api_url: None,
        }
    }

    /// A test environment whose directory endpoint serves `users_json`
    pub fn with_directory(users_json: &str) -> Self {
        let mut test = Self::new();
        test.api_url = Some(serve_forever(200, users_json));
        test
    }

    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(self.binary_path);
        command
            .args(args)
            .current_dir(self.temp_dir.path())
            .env_remove("MAILFORM_ROOT")
            .env_remove("MAILFORM_API_URL")
            .env_remove("MAILFORM_LOG")
            .env_remove("HTTP_PROXY")
            .env_remove("http_proxy")
            .env_remove("ALL_PROXY")
            .env_remove("all_proxy");
        if let Some(url) = &self.api_url {
            command.env("MAILFORM_API_URL", url);
        }
        command
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute mailform command")
    }

    /// Run with `input` piped to stdin
    pub fn run_with_input(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn mailform command");
        child
            .stdin
            .take()
            .expect("stdin was piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");
        child
            .wait_with_output()
            .expect("Failed to wait for mailform command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert_success(args, &output);
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn write_config(&self, content: &str) {
        let dir = self.temp_dir.path().join(".mailform");
        fs::create_dir_all(&dir).expect("Failed to create .mailform directory");
        fs::write(dir.join("config.yaml"), content).expect("Failed to write config file");
    }

    pub fn read_config(&self) -> Option<String> {
        fs::read_to_string(self.temp_dir.path().join(".mailform").join("config.yaml")).ok()
    }
}

pub fn assert_success(args: &[&str], output: &Output) {
    if !output.status.success() {
        panic!(
            "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
            args,
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Start an HTTP server that answers every request with `status` and `body`.
///
/// Returns its base URL. The server thread lives until the test process
/// exits.
pub fn serve_forever(status: u16, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind stub server");
    let addr = listener.local_addr().expect("Stub server has no address");
    let body = body.to_string();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut line = String::new();
            while reader.read_line(&mut line).is_ok_and(|n| n > 0) {
                if line == "\r\n" {
                    break;
                }
                line.clear();
            }
            let response = format!(
                "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{addr}/users")
}

pub const USERS_JSON: &str = r#"[
    {"id": 1, "name": "Ann Lee", "email": "ann@example.com"},
    {"id": 2, "name": "Anna Park", "email": "anna@example.com"},
    {"id": 3, "name": "Bob Stone", "email": "bob@example.com"}
]"#;
