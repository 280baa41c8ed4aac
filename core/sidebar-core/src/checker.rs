//! Sidebar state checker.
//!
//! Reads the unified-sidebar-hidden flag out of a workspace's `state.vscdb`.
//! The database is queried through the external `sqlite3` CLI rather than a
//! linked SQLite - the db belongs to a running editor and the query process
//! is bounded by a hard timeout and an output cap so a wedged or hostile
//! invocation can never hang the caller.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

/// Key the editor stores the sidebar visibility flag under.
pub const STATE_KEY: &str = "workbench.unifiedSidebar.hidden";

/// Fixed query text; the key is a compile-time constant, not user input.
const STATE_SQL: &str =
    "SELECT CAST(value AS TEXT) FROM ItemTable WHERE key='workbench.unifiedSidebar.hidden';";

const QUERY_TIMEOUT: Duration = Duration::from_millis(3000);
const MAX_OUTPUT_BYTES: usize = 64 * 1024;
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Query failed ({status}): {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Query timed out after {0:?}")]
    TimedOut(Duration),

    #[error("Query output exceeded {0} bytes")]
    OutputOverflow(usize),
}

/// Fetches the raw stored value for the sidebar flag.
///
/// Injected into the engine so tests can script outcomes without a
/// `sqlite3` binary or a real database.
pub trait StateQuery {
    fn fetch(&self, db_path: &Path) -> Result<String, QueryError>;
}

/// Production query: shells out to the `sqlite3` CLI with the database path
/// and the fixed SQL statement as arguments.
#[derive(Debug, Clone)]
pub struct Sqlite3Query {
    program: String,
    timeout: Duration,
    max_output: usize,
}

impl Default for Sqlite3Query {
    fn default() -> Self {
        Self {
            program: "sqlite3".to_string(),
            timeout: QUERY_TIMEOUT,
            max_output: MAX_OUTPUT_BYTES,
        }
    }
}

impl StateQuery for Sqlite3Query {
    fn fetch(&self, db_path: &Path) -> Result<String, QueryError> {
        let mut child = Command::new(&self.program)
            .arg(db_path)
            .arg(STATE_SQL)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| QueryError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Reader threads keep both pipes drained so the child can always
        // make progress; bytes past the cap are discarded, not buffered.
        let cap = self.max_output;
        let stdout_reader = child.stdout.take().map(|pipe| {
            thread::spawn(move || read_capped(pipe, cap))
        });
        let stderr_reader = child.stderr.take().map(|pipe| {
            thread::spawn(move || read_capped(pipe, cap))
        });

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(QueryError::TimedOut(self.timeout));
                    }
                    thread::sleep(WAIT_POLL_INTERVAL);
                }
                Err(source) => {
                    let _ = child.kill();
                    return Err(QueryError::Spawn {
                        program: self.program.clone(),
                        source,
                    });
                }
            }
        };

        let (stdout, stdout_overflow) = stdout_reader
            .map(|handle| handle.join().unwrap_or((Vec::new(), false)))
            .unwrap_or((Vec::new(), false));
        let (stderr, _) = stderr_reader
            .map(|handle| handle.join().unwrap_or((Vec::new(), false)))
            .unwrap_or((Vec::new(), false));

        if stdout_overflow {
            return Err(QueryError::OutputOverflow(self.max_output));
        }
        if !status.success() {
            return Err(QueryError::Failed {
                status: status.to_string(),
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&stdout).to_string())
    }
}

/// Reads a pipe to EOF, keeping at most `cap` bytes and flagging overflow.
fn read_capped(mut reader: impl Read, cap: usize) -> (Vec<u8>, bool) {
    let mut buf = Vec::new();
    let mut overflowed = false;
    let mut chunk = [0u8; 4096];
    loop {
        match reader.read(&mut chunk) {
            Ok(0) => return (buf, overflowed),
            Ok(n) => {
                if buf.len() + n > cap {
                    overflowed = true;
                    let room = cap.saturating_sub(buf.len());
                    buf.extend_from_slice(&chunk[..room]);
                } else {
                    buf.extend_from_slice(&chunk[..n]);
                }
            }
            Err(_) => return (buf, overflowed),
        }
    }
}

/// Normalized sidebar visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarFlag {
    Hidden,
    Visible,
}

/// Resolves the stored flag to a visibility, or `None` when the state is
/// unknowable. The match is exact and case-sensitive: only the literals
/// `"true"` and `"false"` (after trimming) carry meaning.
pub fn sidebar_hidden(query: &dyn StateQuery, db_path: &Path) -> Option<SidebarFlag> {
    match query.fetch(db_path) {
        Ok(raw) => match raw.trim() {
            "true" => Some(SidebarFlag::Hidden),
            "false" => Some(SidebarFlag::Visible),
            other => {
                debug!(key = STATE_KEY, value = other, "Unexpected sidebar state value");
                None
            }
        },
        Err(err) => {
            debug!(error = %err, db = %db_path.display(), "Sidebar state query failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedQuery(Result<String, QueryError>);

    impl StateQuery for ScriptedQuery {
        fn fetch(&self, _db_path: &Path) -> Result<String, QueryError> {
            match &self.0 {
                Ok(value) => Ok(value.clone()),
                Err(_) => Err(QueryError::TimedOut(Duration::from_millis(1))),
            }
        }
    }

    fn flag_for(raw: &str) -> Option<SidebarFlag> {
        sidebar_hidden(&ScriptedQuery(Ok(raw.to_string())), Path::new("/db"))
    }

    #[test]
    fn test_literal_true_means_hidden() {
        assert_eq!(flag_for("true"), Some(SidebarFlag::Hidden));
        assert_eq!(flag_for("true\n"), Some(SidebarFlag::Hidden));
    }

    #[test]
    fn test_literal_false_means_visible() {
        assert_eq!(flag_for("false"), Some(SidebarFlag::Visible));
        assert_eq!(flag_for("  false  "), Some(SidebarFlag::Visible));
    }

    #[test]
    fn test_empty_output_is_unknown() {
        assert_eq!(flag_for(""), None);
    }

    #[test]
    fn test_uppercase_literal_is_unknown() {
        assert_eq!(flag_for("TRUE"), None);
    }

    #[test]
    fn test_unexpected_text_is_unknown() {
        assert_eq!(flag_for("maybe"), None);
    }

    #[test]
    fn test_query_error_is_unknown() {
        let query = ScriptedQuery(Err(QueryError::TimedOut(Duration::from_millis(1))));
        assert_eq!(sidebar_hidden(&query, Path::new("/db")), None);
    }

    #[test]
    fn test_sql_targets_the_state_key() {
        assert!(STATE_SQL.contains(STATE_KEY));
    }

    // The process-level tests script the spawned program with /bin/sh; the
    // db-path argument doubles as the script file.

    fn sh_query(timeout_ms: u64, max_output: usize) -> Sqlite3Query {
        Sqlite3Query {
            program: "/bin/sh".to_string(),
            timeout: Duration::from_millis(timeout_ms),
            max_output,
        }
    }

    fn script(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("query.sh");
        std::fs::write(&path, contents).unwrap();
        (temp, path)
    }

    #[test]
    fn test_process_query_captures_stdout() {
        let (_temp, path) = script("printf false");
        let query = sh_query(3000, 1024);
        assert_eq!(query.fetch(&path).unwrap(), "false");
    }

    #[test]
    fn test_process_query_nonzero_exit_fails() {
        let (_temp, path) = script("echo oops >&2; exit 3");
        let query = sh_query(3000, 1024);
        match query.fetch(&path) {
            Err(QueryError::Failed { stderr, .. }) => assert_eq!(stderr, "oops"),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_process_query_times_out() {
        let (_temp, path) = script("sleep 5");
        let query = sh_query(100, 1024);
        assert!(matches!(query.fetch(&path), Err(QueryError::TimedOut(_))));
    }

    #[test]
    fn test_process_query_output_overflow() {
        let (_temp, path) = script("head -c 4096 /dev/zero");
        let query = sh_query(3000, 1024);
        assert!(matches!(
            query.fetch(&path),
            Err(QueryError::OutputOverflow(1024))
        ));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let query = Sqlite3Query {
            program: "/nonexistent/sqlite3".to_string(),
            timeout: Duration::from_millis(100),
            max_output: 1024,
        };
        assert!(matches!(
            query.fetch(Path::new("/db")),
            Err(QueryError::Spawn { .. })
        ));
    }
}
