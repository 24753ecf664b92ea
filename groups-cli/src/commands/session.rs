use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use itertools::Itertools;
use profile_groups::search::groups_matching;
use profile_groups::{
    parse_use_cases, App, Color, GroupFields, GroupId, GroupSpec, Network,
    ProfileId, SelectAll, UseCase, Visibility,
};

use crate::util::{parse_group_ids, provide_app, write_groups, write_profiles};
use crate::AppError;

const HELP: &str = "\
Commands:
  list                                  show visible profiles
  groups [QUERY]                        show groups
  filter group|network|visibility VALUE toggle a filter axis
  filter all                            show every group again
  filter clear                          turn every filter off
  select ID                             toggle selection of a profile
  select-all                            toggle selection of every visible profile
  clear                                 clear the selection
  assign ID G1,G2|-                     replace the groups of a profile
  toggle ID GROUP                       toggle one group on a profile
  bulk-assign G1,G2|-                   replace the groups of every selected profile
  new-group NAME                        create a group with defaults
  create-group COLOR USE_CASES NAME     create a group
  edit-group ID COLOR USE_CASES NAME    replace a group's fields
  strip ID USE_CASE                     leave every group granting a use case
  help                                  show this text
  quit                                  leave the session";

#[derive(Clone, Debug, clap::Args)]
#[clap(
    name = "session",
    about = "Start an interactive session reading commands from stdin"
)]
pub struct SessionCommand {
    #[clap(long, help = "Path to a JSON seed with profiles and groups")]
    seed: Option<PathBuf>,
}

impl SessionCommand {
    pub fn run(&self) -> Result<(), AppError> {
        let app = provide_app(&self.seed)?;
        let stdin = io::stdin();
        let stdout = io::stdout();

        Session::new(app, stdout.lock()).run(stdin.lock())
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Reads one command per line and applies it to the application state.
///
/// Rejected commands are reported as a notification and the session goes
/// on; only I/O failures end it early.
pub struct Session<W: Write> {
    app: App,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(app: App, out: W) -> Self {
        Session { app, out }
    }

    pub fn run<R: BufRead>(&mut self, input: R) -> Result<(), AppError> {
        writeln!(self.out, "Type 'help' for a list of commands")?;
        for line in input.lines() {
            let line = line?;
            match self.execute(&line) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e @ AppError::IoError(_)) => return Err(e),
                Err(e) => {
                    log::debug!("Rejected '{}': {}", line.trim(), e);
                    writeln!(self.out, "! {}", e)?;
                }
            }
        }
        Ok(())
    }

    fn execute(&mut self, line: &str) -> Result<Flow, AppError> {
        let line = line.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map(|(command, rest)| (command, rest.trim()))
            .unwrap_or((line, ""));

        match command {
            "" => {}
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" => writeln!(self.out, "{}", HELP)?,
            "list" => self.list()?,
            "groups" => {
                let groups = groups_matching(self.app.store().groups(), rest);
                write_groups(&mut self.out, self.app.store(), &groups)?;
            }
            "filter" => self.filter(rest)?,
            "select" => {
                let id = ProfileId::new(required(rest, "select ID")?);
                if self.app.toggle_selected(id.clone()) {
                    writeln!(self.out, "Selected {}", id)?;
                } else {
                    writeln!(self.out, "{} is not selected", id)?;
                }
                self.selection_summary()?;
            }
            "select-all" => {
                self.app.toggle_select_all();
                self.selection_summary()?;
            }
            "clear" => {
                self.app.clear_selection();
                self.selection_summary()?;
            }
            "assign" => {
                let (id, groups) = two_args(rest, "assign ID G1,G2|-")?;
                self.app
                    .assign_groups(&ProfileId::new(id), parse_group_ids(groups))?;
                writeln!(self.out, "Updated groups of {}", id)?;
            }
            "toggle" => {
                let (id, group) = two_args(rest, "toggle ID GROUP")?;
                let member = self
                    .app
                    .toggle_profile_group(&ProfileId::new(id), &GroupId::new(group))?;
                let verb = if member { "joined" } else { "left" };
                writeln!(self.out, "{} {} {}", id, verb, group)?;
            }
            "bulk-assign" => {
                let groups = parse_group_ids(required(rest, "bulk-assign G1,G2|-")?);
                let count = self.app.bulk_assign_groups(&groups)?;
                writeln!(self.out, "Updated groups for {} profiles", count)?;
            }
            "new-group" => {
                let id = self.app.quick_create_group(rest)?;
                writeln!(self.out, "Group created: {} ({})", rest, id)?;
            }
            "create-group" => {
                let (color, use_cases, name) =
                    three_args(rest, "create-group COLOR USE_CASES NAME")?;
                let id = self.app.create_group(
                    GroupSpec::named(name)
                        .with_color(Color::new(color))
                        .with_use_cases(parse_use_cases(use_cases)?),
                )?;
                writeln!(self.out, "Group created: {} ({})", name.trim(), id)?;
            }
            "edit-group" => {
                let (id, rest) = two_args(rest, "edit-group ID COLOR USE_CASES NAME")?;
                let (color, use_cases, name) =
                    three_args(rest, "edit-group ID COLOR USE_CASES NAME")?;
                self.app.update_group(
                    &GroupId::new(id),
                    GroupFields {
                        name: name.to_owned(),
                        color: Color::new(color),
                        use_cases: parse_use_cases(use_cases)?,
                    },
                )?;
                writeln!(self.out, "Group updated: {}", id)?;
            }
            "strip" => {
                let (id, use_case) = two_args(rest, "strip ID USE_CASE")?;
                let use_case: UseCase = use_case.parse()?;
                let left = self
                    .app
                    .remove_use_case_from_profile(&ProfileId::new(id), use_case)?;
                if left.is_empty() {
                    writeln!(self.out, "{} had no group granting {}", id, use_case)?;
                } else {
                    writeln!(self.out, "{} left {}", id, left.iter().join(", "))?;
                }
            }
            other => return Err(AppError::UnknownCommand(other.to_owned())),
        }

        Ok(Flow::Continue)
    }

    fn list(&mut self) -> Result<(), AppError> {
        let visible = self.app.visible_profiles();
        write_profiles(
            &mut self.out,
            self.app.store(),
            &visible,
            Some(self.app.selection()),
        )?;
        Ok(())
    }

    fn filter(&mut self, args: &str) -> Result<(), AppError> {
        const USAGE: &str = "filter group|network|visibility VALUE | filter all | filter clear";

        let (axis, value) = args
            .split_once(char::is_whitespace)
            .map(|(axis, value)| (axis, value.trim()))
            .unwrap_or((args, ""));

        match (axis, value) {
            ("clear", "") => self.app.clear_filters(),
            ("all", "") => self.app.show_all_groups(),
            ("group", id) if !id.is_empty() => {
                self.app.toggle_group_filter(GroupId::new(id))
            }
            ("network", network) if !network.is_empty() => {
                self.app.toggle_network_filter(network.parse::<Network>()?)
            }
            ("visibility", visibility) if !visibility.is_empty() => self
                .app
                .toggle_visibility_filter(visibility.parse::<Visibility>()?),
            _ => return Err(AppError::Usage(USAGE)),
        }

        self.list()
    }

    fn selection_summary(&mut self) -> Result<(), AppError> {
        let selected = self.app.selection().len();
        let state = match self.app.select_all_state() {
            SelectAll::Empty => "none",
            SelectAll::Partial => "some",
            SelectAll::All => "all",
        };
        writeln!(self.out, "{} selected ({} visible selected)", selected, state)?;
        Ok(())
    }
}

fn required<'a>(args: &'a str, usage: &'static str) -> Result<&'a str, AppError> {
    if args.is_empty() {
        Err(AppError::Usage(usage))
    } else {
        Ok(args)
    }
}

fn two_args<'a>(
    args: &'a str,
    usage: &'static str,
) -> Result<(&'a str, &'a str), AppError> {
    args.split_once(char::is_whitespace)
        .map(|(first, rest)| (first, rest.trim()))
        .filter(|(_, rest)| !rest.is_empty())
        .ok_or(AppError::Usage(usage))
}

fn three_args<'a>(
    args: &'a str,
    usage: &'static str,
) -> Result<(&'a str, &'a str, &'a str), AppError> {
    let (first, rest) = two_args(args, usage)?;
    let (second, third) = two_args(rest, usage)?;
    Ok((first, second, third))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(script: &str) -> (App, String) {
        let app = provide_app(&None).unwrap();
        let mut session = Session::new(app, Vec::new());
        session.run(script.as_bytes()).unwrap();

        let output = String::from_utf8(session.out.clone()).unwrap();
        (session.app, output)
    }

    #[test]
    fn bulk_assign_without_selection_is_reported() {
        let (_, output) = run("bulk-assign tag-1\n");
        assert!(output.contains("! No profiles selected"));
    }

    #[test]
    fn selection_and_bulk_assign() {
        let (app, output) = run("select 4\nselect 5\nbulk-assign tag-2\nquit\nselect 6\n");

        assert!(output.contains("Updated groups for 2 profiles"));
        let members: Vec<_> = app
            .store()
            .members_of(&GroupId::new("tag-2"))
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(members, vec!["4", "5", "6", "7"]);
        assert_eq!(app.selection().len(), 2);
    }

    #[test]
    fn filter_change_drops_selection() {
        let (app, _) = run("select-all\nfilter network twitter\n");
        assert!(app.selection().is_empty());
        assert_eq!(app.visible_ids().len(), 2);
    }

    #[test]
    fn groups_can_be_created_and_edited() {
        let (app, output) = run(
            "new-group   \n\
             create-group bg-red-500 analyze,engage Growth Team\n\
             groups growth\n",
        );

        assert!(output.contains("! Invalid input"));
        let group = app
            .store()
            .groups()
            .iter()
            .find(|g| g.name == "Growth Team")
            .unwrap();
        assert_eq!(group.color.as_str(), Color::RED);

        let id = group.id.clone();
        let mut session = Session::new(app, Vec::new());
        session
            .run(format!("edit-group {} bg-blue-500 - Growth\n", id).as_bytes())
            .unwrap();
        let edited = session.app.store().group(&id).unwrap();
        assert_eq!(edited.name, "Growth");
        assert!(edited.use_cases.is_empty());
    }

    #[test]
    fn strip_reports_the_groups_left() {
        let (app, output) = run("strip 3 engage\n");
        assert!(output.contains("3 left tag-1, tag-4"));
        assert!(!app
            .store()
            .profile(&ProfileId::new("3"))
            .unwrap()
            .belongs_to(&GroupId::new("tag-4")));
    }

    #[test]
    fn unknown_commands_and_bad_values_are_reported() {
        let (_, output) = run("frobnicate\nfilter network myspace\nassign 1\n");
        assert!(output.contains("! Unknown command: frobnicate"));
        assert!(output.contains("unknown network 'myspace'"));
        assert!(output.contains("! Usage: assign ID G1,G2|-"));
    }
}
