//! Command-line front end for idfkit

use std::{path::Path, process::ExitCode, sync::Arc};

use clap::Parser;
use idfkit_loader::{SchemaCache, load_idd, load_idf};
use idfkit_model::{Instance, SearchQuery};
use idfkit_parser::{Config, SchemaSource};
use idfkit_schema::Schema;
use idfkit_shared::IdfkitError;

use crate::{
    command::{CliCommand, Commands, GlobalOptions},
    convert_error::Message,
};

mod command;
mod convert_error;
mod logging;
mod print_error;
mod print_summary;
mod stylesheet;

fn main() -> ExitCode {
    let cli = CliCommand::parse();

    if cli.options.no_colors {
        anstream::ColorChoice::Never.write_global();
    }
    logging::init(cli.options.verbose);

    match run(cli.command, &cli.options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            print_error::print(&error);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, options: &GlobalOptions) -> Result<(), IdfkitError> {
    let session = Session::new(options)?;

    match command {
        Commands::Idd { file } => {
            let schema = load_idd(&file, &session.cache).map_err(|error| convert_error::load(&file, &error))?;
            let version = schema.version().unwrap_or_default();
            print_summary::print_schema(&schema, &session.cache.path_for(version));
        }
        Commands::Check { file } => {
            let instance = session.load(&file)?;
            print_summary::print_instance(&instance);
        }
        Commands::Search {
            file,
            query,
            whole_field,
            ignore_geometry,
        } => {
            let instance = session.load(&file)?;
            let query = SearchQuery::new(query)
                .whole_field(whole_field)
                .ignore_geometry(ignore_geometry);
            print_summary::print_hits(&instance, &instance.search(&query));
        }
        Commands::Refs {
            file,
            class,
            row,
            field,
        } => {
            let instance = session.load(&file)?;
            if instance.field(&class, row, field).is_none() {
                return Err(Message::new(format!("`{class}` has no field {field} in row {row}"))
                    .with_help("rows and fields are counted from 0")
                    .into_error(&file));
            }
            let tree = instance.reference_tree_data(&class, row, field);
            print_summary::print_tree(tree.as_ref());
        }
        Commands::Rewrite { file, output } => {
            let mut instance = session.load(&file)?;
            let target = output.unwrap_or_else(|| file.clone());
            if !idfkit_writer::write_idf(&mut instance, &target) {
                return Err(Message::new(format!("could not write `{}`", target.display()))
                    .with_help("pick another path with `--output`")
                    .into_error(&target));
            }
            tracing::info!(path = %target.display(), "rewrote IDF");
        }
    }

    Ok(())
}

/// Where IDF files get their schema from.
struct Session {
    cache: SchemaCache,
    idd: Option<Arc<Schema>>,
    config: Config,
}

impl Session {
    fn new(options: &GlobalOptions) -> Result<Self, IdfkitError> {
        let cache = SchemaCache::new(&options.cache_dir);
        let idd = options
            .idd
            .as_deref()
            .map(|path| load_idd(path, &cache).map_err(|error| convert_error::load(path, &error)))
            .transpose()?;

        let config = match &options.default_version {
            Some(version) => Config::new().with_default_version(version),
            None => Config::new(),
        };

        Ok(Self { cache, idd, config })
    }

    fn source(&self) -> &dyn SchemaSource {
        match &self.idd {
            Some(schema) => schema,
            None => &self.cache,
        }
    }

    fn load(&self, path: &Path) -> Result<Instance, IdfkitError> {
        load_idf(path, self.source(), self.config.clone()).map_err(|error| convert_error::load(path, &error))
    }
}
