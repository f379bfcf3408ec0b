//! Interactive browse session.
//!
//! Reads one command per line, applies it to the current [`Screen`] and
//! prints the re-rendered screen:
//!
//! | Input | Effect |
//! |-------|--------|
//! | `<n>` | toggle card / section `n` |
//! | `a` | expand everything |
//! | `c` | collapse everything |
//! | `r` | drop cached responses and reload |
//! | `q` | quit |
//! | empty | redraw |

use crate::query::QueryClient;
use crate::views::{App, RenderOptions, TopicsPage};
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

const HELP: &str = "commands: <n> toggle, a expand all, c collapse all, r reload, q quit";

/// A page the browse session can drive.
pub trait Screen {
    async fn reload(&mut self, client: &QueryClient);
    /// Toggle item `index` (1-based). Returns `false` if there is no such item.
    async fn toggle(&mut self, index: usize, client: &QueryClient) -> bool;
    async fn expand_all(&mut self, client: &QueryClient);
    fn collapse_all(&mut self);
    fn render(&self, opts: RenderOptions) -> String;
}

impl Screen for App {
    async fn reload(&mut self, client: &QueryClient) {
        self.load(client).await;
    }

    async fn toggle(&mut self, index: usize, _client: &QueryClient) -> bool {
        App::toggle(self, index)
    }

    async fn expand_all(&mut self, _client: &QueryClient) {
        self.set_all_expanded(true);
    }

    fn collapse_all(&mut self) {
        self.set_all_expanded(false);
    }

    fn render(&self, opts: RenderOptions) -> String {
        App::render(self, opts)
    }
}

impl Screen for TopicsPage {
    async fn reload(&mut self, client: &QueryClient) {
        self.load(client).await;
    }

    async fn toggle(&mut self, index: usize, client: &QueryClient) -> bool {
        TopicsPage::toggle(self, index, client).await
    }

    async fn expand_all(&mut self, client: &QueryClient) {
        self.open_all(client).await;
    }

    fn collapse_all(&mut self) {
        self.close_all();
    }

    fn render(&self, opts: RenderOptions) -> String {
        TopicsPage::render(self, opts)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Toggle(usize),
    ExpandAll,
    CollapseAll,
    Reload,
    Quit,
    Redraw,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    match line {
        "" => Command::Redraw,
        "a" | "all" => Command::ExpandAll,
        "c" | "collapse" => Command::CollapseAll,
        "r" | "reload" => Command::Reload,
        "q" | "quit" | "exit" => Command::Quit,
        _ => match line.parse::<usize>() {
            Ok(n) => Command::Toggle(n),
            Err(_) => Command::Unknown(line.to_string()),
        },
    }
}

/// Drive `screen` from `input` until `q` or end of input.
pub async fn run<S, R, W>(
    screen: &mut S,
    client: &QueryClient,
    input: R,
    out: &mut W,
    opts: RenderOptions,
) -> io::Result<()>
where
    S: Screen,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    screen.reload(client).await;
    draw(screen, out, opts, None)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = parse_command(&line);
        debug!(?command, "Browse command");
        let notice = match command {
            Command::Quit => break,
            Command::Toggle(n) => {
                if screen.toggle(n, client).await {
                    None
                } else {
                    Some(format!("no item {n}"))
                }
            }
            Command::ExpandAll => {
                screen.expand_all(client).await;
                None
            }
            Command::CollapseAll => {
                screen.collapse_all();
                None
            }
            Command::Reload => {
                info!("Reloading");
                client.invalidate_all();
                screen.reload(client).await;
                None
            }
            Command::Redraw => None,
            Command::Unknown(input) => Some(format!("unknown command {input:?}")),
        };
        draw(screen, out, opts, notice.as_deref())?;
    }
    Ok(())
}

fn draw<S: Screen, W: Write>(
    screen: &S,
    out: &mut W,
    opts: RenderOptions,
    notice: Option<&str>,
) -> io::Result<()> {
    write!(out, "{}", screen.render(opts))?;
    if let Some(notice) = notice {
        writeln!(out, "{notice}")?;
    }
    writeln!(out, "{HELP}")?;
    write!(out, "> ")?;
    out.flush()
}
