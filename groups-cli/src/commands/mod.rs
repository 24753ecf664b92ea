use clap::Subcommand;

mod groups;
mod list;
mod session;

#[derive(Debug, Subcommand)]
pub enum Commands {
    List(list::List),
    Groups(groups::Groups),
    Session(session::SessionCommand),
}

impl Commands {
    pub fn run(&self) -> Result<(), crate::AppError> {
        match self {
            Commands::List(list) => list.run(),
            Commands::Groups(groups) => groups.run(),
            Commands::Session(session) => session.run(),
        }
    }
}
