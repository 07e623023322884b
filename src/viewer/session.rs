use crate::error::{Result, UnfollowError, UserFriendlyError};
use crate::viewer::model::UnfollowerListModel;
use crate::viewer::profile::{profile_url, ProfileLauncher};
use std::io::{BufRead, Write};
use std::path::PathBuf;

const HELP: &str = "\
Commands (positions are 1-based, as shown by `list`):
  list                 show the current list
  remove N [N ...]     drop entries from the list (not from your account)
  open N               open the profile of entry N in your browser
  save [FILE]          write the current list to FILE
  help                 show this message
  quit                 leave the viewer";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    List,
    Remove(Vec<usize>),
    Open(usize),
    Save(Option<PathBuf>),
    Help,
    Quit,
}

/// Line-oriented view over an [`UnfollowerListModel`].
///
/// The session owns no usernames itself. Every command is forwarded to the
/// model, and output is rendered from `model.items()` afterwards.
pub struct ViewerSession<L: ProfileLauncher> {
    model: UnfollowerListModel,
    profile_base: String,
    default_save_path: PathBuf,
    launcher: L,
}

impl<L: ProfileLauncher> ViewerSession<L> {
    pub fn new(
        model: UnfollowerListModel,
        profile_base: impl Into<String>,
        default_save_path: impl Into<PathBuf>,
        launcher: L,
    ) -> Self {
        Self {
            model,
            profile_base: profile_base.into(),
            default_save_path: default_save_path.into(),
            launcher,
        }
    }

    pub fn model(&self) -> &UnfollowerListModel {
        &self.model
    }

    pub fn into_model(self) -> UnfollowerListModel {
        self.model
    }

    /// Reads commands until `quit` or end of input.
    ///
    /// Command failures are reported on `output` and the session continues.
    /// Only failures to read input or write output end the session early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "{} unfollowers loaded. Type `help` for commands.", self.model.len())?;
        self.render(&mut output)?;

        let mut lines = input.lines();
        loop {
            write!(output, "> ")?;
            output.flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => break,
            };

            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    writeln!(output, "{}", message)?;
                    continue;
                }
            };

            if command == Command::Quit {
                break;
            }

            if let Err(e) = self.execute(command, &mut output) {
                writeln!(output, "error: {}", e.user_message())?;
            }
        }

        writeln!(output)?;
        Ok(())
    }

    fn execute<W: Write>(&mut self, command: Command, output: &mut W) -> Result<()> {
        match command {
            Command::List => self.render(output)?,
            Command::Remove(positions) => {
                let indices = to_indices(&positions, self.model.len())?;
                let removed = self.model.remove_selected(&indices)?;
                writeln!(output, "Removed {}.", removed.join(", "))?;
                self.render(output)?;
            }
            Command::Open(position) => {
                let index = to_indices(&[position], self.model.len())?[0];
                let username = self.model.get(index)?;
                let url = profile_url(&self.profile_base, username)?;
                self.launcher.launch(&url)?;
                writeln!(output, "Opened {}", url)?;
            }
            Command::Save(path) => {
                let path = path.unwrap_or_else(|| self.default_save_path.clone());
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                self.model.save(&path)?;
                writeln!(output, "Saved {} usernames to {}", self.model.len(), path.display())?;
            }
            Command::Help => writeln!(output, "{}", HELP)?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn render<W: Write>(&self, output: &mut W) -> Result<()> {
        if self.model.is_empty() {
            writeln!(output, "(no unfollowers)")?;
            return Ok(());
        }

        let width = self.model.len().to_string().len();
        for (i, username) in self.model.items().iter().enumerate() {
            writeln!(output, "{:>width$}  {}", i + 1, username, width = width)?;
        }
        Ok(())
    }
}

fn parse_command(line: &str) -> std::result::Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let positions = |args: &[&str]| -> std::result::Result<Vec<usize>, String> {
        args.iter()
            .map(|a| a.parse::<usize>().map_err(|_| format!("not a position: {}", a)))
            .collect()
    };

    let command = match verb {
        "list" | "ls" => Command::List,
        "remove" | "rm" | "del" => {
            if args.is_empty() {
                return Err("usage: remove N [N ...]".to_string());
            }
            Command::Remove(positions(&args)?)
        }
        "open" => match positions(&args)?.as_slice() {
            [position] => Command::Open(*position),
            _ => return Err("usage: open N".to_string()),
        },
        "save" => match args.as_slice() {
            [] => Command::Save(None),
            [path] => Command::Save(Some(PathBuf::from(path))),
            _ => return Err("usage: save [FILE]".to_string()),
        },
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command: {} (try `help`)", other)),
    };

    Ok(Some(command))
}

/// Converts 1-based display positions to model indices.
fn to_indices(positions: &[usize], len: usize) -> Result<Vec<usize>> {
    positions
        .iter()
        .map(|&p| {
            if p == 0 || p > len {
                Err(UnfollowError::IndexOutOfRange { index: p, len })
            } else {
                Ok(p - 1)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use url::Url;

    #[derive(Default)]
    struct RecordingLauncher {
        opened: Vec<String>,
    }

    impl ProfileLauncher for &mut RecordingLauncher {
        fn launch(&mut self, url: &Url) -> Result<()> {
            self.opened.push(url.to_string());
            Ok(())
        }
    }

    struct FailingLauncher;

    impl ProfileLauncher for FailingLauncher {
        fn launch(&mut self, url: &Url) -> Result<()> {
            Err(UnfollowError::Browser {
                url: url.to_string(),
                message: "no browser".to_string(),
            })
        }
    }

    fn model(list: &[&str]) -> UnfollowerListModel {
        UnfollowerListModel::new(list.iter().map(|s| s.to_string()).collect())
    }

    fn run_script<L: ProfileLauncher>(session: &mut ViewerSession<L>, script: &str) -> String {
        let mut output = Vec::new();
        session.run(script.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("  "), Ok(None));
        assert_eq!(parse_command("ls"), Ok(Some(Command::List)));
        assert_eq!(parse_command("rm 2 1"), Ok(Some(Command::Remove(vec![2, 1]))));
        assert_eq!(parse_command("open 3"), Ok(Some(Command::Open(3))));
        assert_eq!(parse_command("save"), Ok(Some(Command::Save(None))));
        assert!(parse_command("rm").is_err());
        assert!(parse_command("rm x").is_err());
        assert!(parse_command("open 1 2").is_err());
        assert!(parse_command("frobnicate").is_err());
    }

    #[test]
    fn test_remove_and_save() {
        let temp_dir = TempDir::new().unwrap();
        let save_path = temp_dir.path().join("results").join("unfollowers.txt");
        let mut launcher = RecordingLauncher::default();
        let mut session = ViewerSession::new(
            model(&["alice", "bob", "carol"]),
            "https://www.instagram.com",
            &save_path,
            &mut launcher,
        );

        let out = run_script(&mut session, "remove 2\nsave\nquit\n");

        assert!(out.contains("Removed bob."));
        assert_eq!(session.model().to_list(), vec!["alice", "carol"]);
        assert_eq!(std::fs::read_to_string(&save_path).unwrap(), "alice\ncarol\n");
    }

    #[test]
    fn test_open_profile() {
        let mut launcher = RecordingLauncher::default();
        {
            let mut session = ViewerSession::new(
                model(&["alice", "bob"]),
                "https://www.instagram.com",
                "unused.txt",
                &mut launcher,
            );
            run_script(&mut session, "open 2\n");
        }
        assert_eq!(launcher.opened, vec!["https://www.instagram.com/bob/"]);
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let mut session = ViewerSession::new(
            model(&["alice"]),
            "https://www.instagram.com",
            "unused.txt",
            FailingLauncher,
        );

        let out = run_script(&mut session, "remove 5\nopen 1\nbogus\nremove 1\n");

        assert!(out.contains("No entry at position 5"));
        assert!(out.contains("no browser"));
        assert!(out.contains("unknown command: bogus"));
        assert!(session.model().is_empty());
        assert!(out.contains("(no unfollowers)"));
    }

    #[test]
    fn test_list_numbering() {
        let names: Vec<String> = (1..=10).map(|i| format!("user{}", i)).collect();
        let mut session = ViewerSession::new(
            UnfollowerListModel::new(names),
            "https://www.instagram.com",
            "unused.txt",
            FailingLauncher,
        );

        let out = run_script(&mut session, "");
        assert!(out.contains(" 1  user1\n"));
        assert!(out.contains("10  user10\n"));
    }
}
