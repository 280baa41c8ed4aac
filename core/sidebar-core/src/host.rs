//! Host command dispatch.
//!
//! Closing the sidebar is the editor's job; this crate only asks for it.
//! The ask goes through a one-method capability trait so the engine never
//! depends on a running editor.

use std::process::Command;

/// Built-in editor command that closes the unified sidebar.
pub const CLOSE_SIDEBAR_COMMAND: &str = "workbench.action.closeUnifiedSidebar";

const COMMAND_URI_SCHEME: &str = "cursor";

pub trait SidebarHost {
    fn close_sidebar(&self) -> Result<(), String>;
}

/// Dispatches the close command to the running editor through its
/// `cursor://command/...` URI scheme via the macOS `open` utility - the
/// only out-of-process command surface the editor exposes. The default
/// storage root is macOS-only already, so this adds no new coupling.
#[derive(Debug, Clone, Default)]
pub struct OpenUrlHost;

impl OpenUrlHost {
    fn command_uri(command: &str) -> String {
        format!("{}://command/{}", COMMAND_URI_SCHEME, command)
    }
}

impl SidebarHost for OpenUrlHost {
    fn close_sidebar(&self) -> Result<(), String> {
        let uri = Self::command_uri(CLOSE_SIDEBAR_COMMAND);
        match Command::new("open").arg("-g").arg(&uri).output() {
            Ok(output) if output.status.success() => Ok(()),
            Ok(output) => Err(format!(
                "open exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )),
            Err(err) => Err(format!("Failed to spawn open: {}", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_uri_shape() {
        assert_eq!(
            OpenUrlHost::command_uri(CLOSE_SIDEBAR_COMMAND),
            "cursor://command/workbench.action.closeUnifiedSidebar"
        );
    }
}
