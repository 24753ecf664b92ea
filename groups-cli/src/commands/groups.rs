use std::io;
use std::path::PathBuf;

use profile_groups::search::groups_matching;

use crate::util::{provide_app, write_groups};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "groups", about = "List groups with their use cases and sizes")]
pub struct Groups {
    #[clap(long, help = "Path to a JSON seed with profiles and groups")]
    seed: Option<PathBuf>,
    #[clap(long, short, default_value = "", help = "Only show groups whose name contains this")]
    query: String,
}

impl Groups {
    pub fn run(&self) -> Result<(), AppError> {
        let app = provide_app(&self.seed)?;
        let groups = groups_matching(app.store().groups(), &self.query);

        write_groups(&mut io::stdout().lock(), app.store(), &groups)?;
        Ok(())
    }
}
