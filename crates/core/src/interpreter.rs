use std::io::BufRead;

use tracing::{debug, info, trace, warn};

use crate::command::{Command, Line, Listing, Target};
use crate::error::{Error, NavigationError, Result};
use crate::model::{NodeId, Tree};
use crate::progress::Progress;

const ROOT_NAME: &str = "/";

/// Replays a shell transcript one line at a time, growing a [`Tree`] and
/// tracking which directory the session is currently in.
#[derive(Debug, Default)]
pub struct Interpreter {
    tree: Tree,
    current: Option<NodeId>,
    line: usize,
    progress: Progress,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn feed(&mut self, text: &str) -> Result<()> {
        self.line += 1;
        self.progress.lines += 1;
        match Line::parse(text, self.line)? {
            Line::Blank => Ok(()),
            Line::Command(cmd) => {
                self.progress.commands += 1;
                self.command(cmd)
            }
            Line::Listing(entry) => self.listing(entry, text),
        }
    }

    pub fn run<I, S>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for l in lines {
            self.feed(l.as_ref())?;
        }
        Ok(())
    }

    pub fn finish(self) -> Tree {
        info!(
            lines = self.progress.lines,
            dirs = self.progress.dirs,
            files = self.progress.files,
            bytes = self.progress.bytes,
            "transcript replayed"
        );
        self.tree
    }

    fn command(&mut self, cmd: Command) -> Result<()> {
        match cmd {
            // listing entries that follow are applied to `current`
            Command::Ls => {
                trace!(line = self.line, "ls");
                Ok(())
            }
            Command::Cd(target) => {
                let next = self
                    .change_dir(&target)
                    .map_err(|source| Error::Navigation {
                        line: self.line,
                        source,
                    })?;
                self.current = Some(next);
                debug!(line = self.line, dir = %self.tree.path_of(next), "cd");
                Ok(())
            }
        }
    }

    fn change_dir(&mut self, target: &Target) -> Result<NodeId, NavigationError> {
        match target {
            Target::Up => self
                .current
                .and_then(|c| self.tree.parent(c))
                .ok_or(NavigationError::NoParent),
            Target::Root => Ok(match self.tree.root() {
                Some(root) => root,
                None => self.new_root(ROOT_NAME),
            }),
            Target::Dir(name) => {
                if self.tree.root().is_none() {
                    return Ok(self.new_root(name));
                }
                let cur = self
                    .current
                    .ok_or_else(|| NavigationError::NotFound(name.clone()))?;
                if !self.tree.has_subdirectory(cur, name) {
                    self.tree.attach_dir(cur, name);
                    self.progress.dirs += 1;
                }
                self.tree.subdirectory_named(cur, name)
            }
        }
    }

    fn new_root(&mut self, name: &str) -> NodeId {
        debug!(name, "creating root directory");
        self.progress.dirs += 1;
        self.tree.create_root(name)
    }

    fn listing(&mut self, entry: Listing, text: &str) -> Result<()> {
        let cur = self.current.ok_or_else(|| Error::NoCurrentDirectory {
            line: self.line,
            text: text.to_string(),
        })?;
        match entry {
            Listing::Dir(name) => {
                if self.tree.has_subdirectory(cur, &name) {
                    warn!(line = self.line, %name, "directory listed twice, keeping both entries");
                }
                trace!(line = self.line, %name, "dir");
                self.tree.attach_dir(cur, &name);
                self.progress.dirs += 1;
            }
            Listing::File { name, size } => {
                trace!(line = self.line, %name, size, "file");
                self.tree.add_file(cur, &name, size);
                self.progress.files += 1;
                self.progress.bytes = self.progress.bytes.saturating_add(size);
            }
        }
        Ok(())
    }
}

pub fn parse_transcript(input: &str) -> Result<Tree> {
    let mut interp = Interpreter::new();
    interp.run(input.lines())?;
    Ok(interp.finish())
}

pub fn read_transcript(reader: impl BufRead) -> Result<Tree> {
    let mut interp = Interpreter::new();
    for l in reader.lines() {
        interp.feed(&l?)?;
    }
    Ok(interp.finish())
}
