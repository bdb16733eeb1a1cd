use std::io;

use clap::{crate_authors, crate_description, crate_version, CommandFactory, Parser};
use clap_complete::generate;
use eyre::Result;
use tracing::{error, info, trace};

use skywatch_common::{init_logging, ConfigFile};
use skywatchctl::{
    aurora_cmd, is_transport, list_all_locations, list_rules, planes_cmd, Config, Env,
    ListSubCommand, Opts, SubCommand,
};

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging.
    //
    init_logging(NAME, opts.tree, opts.log_file.clone())?;

    // Banner
    //
    if opts.verbose > 0 {
        banner()?;
    }

    // Standalone commands, no configuration needed
    //
    match &opts.subcmd {
        // NOTE: you can generate UNIX shells completion on Windows and vice-versa.  Not worth
        //       trying to limit depending on the OS.
        //
        SubCommand::Completion(copts) => {
            let generator = copts.shell;
            generate(generator, &mut Opts::command(), NAME, &mut io::stdout());
            return Ok(());
        }
        SubCommand::Version => {
            eprintln!("{}", version());
            eprintln!("Modules: ");
            eprintln!("\t{}", skywatch_common::version());
            eprintln!("\t{}", skywatch_formats::version());
            eprintln!("\t{}", skywatch_radar::version());
            eprintln!("\t{}", skywatch_sources::version());
            return Ok(());
        }
        _ => (),
    }

    // Configuration errors are fatal.
    //
    let cfile = ConfigFile::<Config>::load(opts.config.as_deref())?;
    info!("Using configuration from {:?}", cfile.source());

    let env = Env::from_env();
    let mut cfg = cfile.into_inner();
    cfg.apply_env(&env);
    if opts.debug {
        eprintln!("{env:?}");
    }

    // Transport errors are only logged.
    //
    match handle_subcmd(cfg, &env, &opts.subcmd) {
        Err(e) if is_transport(&e) => {
            error!("Run aborted, nothing sent: {e}");
            Ok(())
        }
        res => res,
    }
}

pub fn handle_subcmd(cfg: Config, env: &Env, subcmd: &SubCommand) -> Result<()> {
    match subcmd {
        // Handle `planes`
        //
        SubCommand::Planes(popts) => {
            trace!("planes");

            planes_cmd(cfg, env, popts)?;
        }

        // Handle `aurora`
        //
        SubCommand::Aurora(aopts) => {
            trace!("aurora");

            aurora_cmd(&cfg, env, aopts)?;
        }

        // Standalone `list` command
        //
        SubCommand::List(lopts) => match lopts.cmd {
            ListSubCommand::Locations => {
                info!("Listing all locations:");

                let str = list_all_locations(&cfg)?;
                println!("{}", str);
            }
            ListSubCommand::Rules => {
                info!("Listing all rules:");

                let str = list_rules(&cfg.radar)?;
                println!("{}", str);
            }
        },

        // Already handled
        //
        SubCommand::Completion(_) | SubCommand::Version => (),
    }
    Ok(())
}

/// Return our version number
///
#[inline]
pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    ))
}
