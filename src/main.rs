//! pyskel's main application entry point.
//! Parses the command line, builds the run context and dispatches to the
//! generator serving the sub-command.

use log::debug;

use pyskel::{
    cli::{get_args, Args, Commands},
    constants::SETUP_CFG,
    error::{default_error_handler, Result},
    generator::{generate_project, get_generator, Context},
    host::SystemHost,
    logger::init_logger,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => default_error_handler(err),
    }
}

/// Runs the sub-command.
///
/// # Returns
/// * `Result<bool>` - Whether every artifact was produced
///
/// # Flow
/// 1. Resolves the project directory into generator options
/// 2. `new`: generates the whole project
/// 3. Other sub-commands: seed the settings from an existing setup.cfg, then
///    run their generator
fn run(args: Args) -> Result<bool> {
    let options = args.command.to_options()?;
    let mut ctx = Context::new(Box::new(SystemHost::new()));

    if let Commands::New(_) = args.command {
        return generate_project(&mut ctx, &options);
    }

    let cfg = options.project_dir.join(SETUP_CFG);
    if ctx.seed_from_settings_file(&cfg)? {
        debug!("Seeded settings from '{}'", cfg.display());
    }

    let name = args.command.generator_name();
    match get_generator(name, &options) {
        Some(mut generator) => generator.generate(&mut ctx),
        None => {
            log::error!("generator not found: '{name}'");
            Ok(false)
        }
    }
}
