use std::io::{self, Write};
use std::path::PathBuf;

use profile_groups::{GroupId, Network, Visibility};

use crate::models::format::Format;
use crate::util::{provide_app, write_profiles};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "list", about = "List the profiles passing the given filters")]
pub struct List {
    #[clap(long, help = "Path to a JSON seed with profiles and groups")]
    seed: Option<PathBuf>,
    #[clap(long, short, help = "Only show members of this group id")]
    group: Option<String>,
    #[clap(long, short, help = "Only show profiles on this network")]
    network: Option<Network>,
    #[clap(long, short, help = "Only show public or private profiles")]
    visibility: Option<Visibility>,
    #[clap(long, short, default_value = "table", help = "table or json")]
    format: Format,
}

impl List {
    pub fn run(&self) -> Result<(), AppError> {
        let mut app = provide_app(&self.seed)?;

        if let Some(group) = &self.group {
            app.toggle_group_filter(GroupId::new(group.as_str()));
        }
        if let Some(network) = self.network {
            app.toggle_network_filter(network);
        }
        if let Some(visibility) = self.visibility {
            app.toggle_visibility_filter(visibility);
        }

        let visible = app.visible_profiles();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        match self.format {
            Format::Table => write_profiles(&mut out, app.store(), &visible, None)?,
            Format::Json => {
                serde_json::to_writer_pretty(&mut out, &visible)
                    .map_err(data_error::DataError::from)?;
                writeln!(out)?;
            }
        }

        Ok(())
    }
}
