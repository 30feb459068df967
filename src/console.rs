//! Line-driven headless dashboard session.
//!
//! Reads one command per line and prints one JSON document per command:
//!
//! ```text
//! #/ai-ui/plugin/counter/api   navigate as if the user typed the URL
//! back | forward               walk the history
//! view <name>                  pick a view from the navigation bar
//! session <id>                 open a chat session from the list
//! project <id>                 open a crew project
//! plugin <id> [tab]            open a plugin page
//! tab <tab>                    switch tabs on the open plugin page
//! route | state                print the current route or full state
//! quit
//! ```

use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::dashboard::Dashboard;
use crate::nav::{Location, MemoryLocation};
use crate::route::{PluginTab, View};

pub struct Console {
    dashboard: Arc<Dashboard>,
    location: Arc<MemoryLocation>,
}

impl Console {
    pub fn new(dashboard: Arc<Dashboard>, location: Arc<MemoryLocation>) -> Self {
        Self {
            dashboard,
            location,
        }
    }

    pub async fn run<R, W>(&self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if matches!(line, "quit" | "exit") {
                break;
            }

            let reply = self.execute(line).await?;
            output.write_all(reply.to_string().as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
        }
        Ok(())
    }

    async fn execute(&self, line: &str) -> Result<serde_json::Value> {
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "route" => return Ok(self.route_json()),
            "state" => return Ok(serde_json::to_value(self.dashboard.state().snapshot())?),
            _ => {}
        }

        let mut handled = self.dashboard.router().events_handled();
        let before_count = *handled.borrow_and_update();
        let before_fragment = self.location.fragment();

        match command {
            "back" => {
                self.location.back();
            }
            "forward" => {
                self.location.forward();
            }
            "view" => self.dashboard.show_view(View::parse(rest)).loads.settle().await,
            "session" if !rest.is_empty() => {
                self.dashboard.open_session(rest).await;
            }
            "project" if !rest.is_empty() => self.dashboard.open_project(rest).loads.settle().await,
            "plugin" if !rest.is_empty() => {
                let (id, tab) = rest.split_once(' ').unwrap_or((rest, ""));
                let tab = PluginTab::parse(tab.trim());
                self.dashboard.open_plugin(id, tab).loads.settle().await;
            }
            "tab" => match PluginTab::parse(rest) {
                Some(tab) => {
                    self.dashboard.set_plugin_tab(tab);
                }
                None => return Ok(json!({ "error": format!("unknown tab: {rest}") })),
            },
            _ if line.starts_with('#') || line.starts_with('/') => {
                self.location.navigate(line);
            }
            _ => return Ok(json!({ "error": format!("unknown command: {line}") })),
        }

        // Wait for the listener to see the change before waiting on its loads
        if self.location.fragment() != before_fragment {
            handled.wait_for(|count| *count > before_count).await?;
        }
        self.dashboard.settled().await;

        Ok(self.route_json())
    }

    fn route_json(&self) -> serde_json::Value {
        json!({
            "fragment": self.dashboard.current_fragment(),
            "route": self.dashboard.current_route(),
        })
    }
}
