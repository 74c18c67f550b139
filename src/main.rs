#[macro_use] extern crate clap;
#[macro_use] extern crate log;

use revcat::*;
use clap::{Arg, App, AppSettings, SubCommand, ArgMatches};
use std::path::Path;
use std::process;

fn print_error_debug(e: &Error) {
    // unwind the error chain
    for e in e.iter().skip(1) {
        warn!("caused by: {}", e);
    }
}

fn revision_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("revision")
        .required(true)
        .help("Path to a revision yaml file")
}

fn main() {
    let app = App::new("revcat")
        .version(crate_version!())
        .setting(AppSettings::VersionlessSubcommands)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::DeriveDisplayOrder)
        .global_settings(&[AppSettings::ColoredHelp])
        .about("Synthesize pods and deployments for revisions")
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .global(true)
            .help("Increase verbosity"))
        .arg(Arg::with_name("debug")
            .short("d")
            .long("debug")
            .global(true)
            .help("Adds line numbers to log statements"))
        .arg(Arg::with_name("config")
            .short("c")
            .long("config")
            .takes_value(true)
            .default_value("revcat.yml")
            .global(true)
            .help("Platform config file"))
        .subcommand(SubCommand::with_name("pod")
            .about("Generate the pod spec for a revision")
            .arg(revision_arg()))
        .subcommand(SubCommand::with_name("deployment")
            .about("Generate the deployment shell for a revision")
            .arg(revision_arg())
            .arg(Arg::with_name("namespace")
                .short("n")
                .long("namespace")
                .takes_value(true)
                .help("Namespace override (defaults to the revision namespace)")))
        .subcommand(SubCommand::with_name("template")
            .about("Generate the deployment with its pod spec embedded")
            .arg(revision_arg())
            .arg(Arg::with_name("namespace")
                .short("n")
                .long("namespace")
                .takes_value(true)
                .help("Namespace override (defaults to the revision namespace)")))
        .subcommand(SubCommand::with_name("verify")
            .about("Verify the platform config"));

    // arg parse
    let args = app.get_matches();
    let name = args.subcommand_name().unwrap_or("revcat");
    let _ = run(&args).map_err(|e| {
        error!("{} error: {}", name, e);
        print_error_debug(&e);
        process::exit(1);
    });
    process::exit(0);
}

fn run(args: &ArgMatches) -> Result<()> {
    // initialise deps and set log default - always show INFO messages (+1)
    loggerv::Logger::new()
        .verbosity(args.occurrences_of("verbose") + 1)
        .module_path(true)
        .line_numbers(args.is_present("debug"))
        .init()
        .map_err(|e| format!("failed to initialise logger: {}", e))?;

    // Ignore SIGPIPE errors to avoid having to use let _ = write! everywhere
    // See https://github.com/rust-lang/rust/issues/46016
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }

    dispatch_commands(args)
}

fn load_config(args: &ArgMatches) -> Result<Config> {
    // default_value guarantees presence
    let pth = args.value_of("config").unwrap_or("revcat.yml");
    let conf = Config::read(Path::new(pth))?;
    conf.verify()?;
    Ok(conf)
}

fn load_revision(args: &ArgMatches) -> Result<Revision> {
    let pth = args.value_of("revision").unwrap_or_default();
    Revision::read(Path::new(pth))
}

fn deployment_for(args: &ArgMatches, rev: &Revision, conf: &Config) -> k8s_openapi::api::apps::v1::Deployment {
    let ns = args.value_of("namespace").unwrap_or_else(|| rev.namespace());
    // a bad range string is already logged, the deployment is still usable
    let (deployment, _) = make_deployment(rev, ns, &conf.network);
    deployment
}

fn print_yaml<T: serde::Serialize>(obj: &T) -> Result<()> {
    println!("{}", serde_yaml::to_string(obj)?);
    Ok(())
}

/// Dispatch clap arguments to library handlers
fn dispatch_commands(args: &ArgMatches) -> Result<()> {
    if let Some(a) = args.subcommand_matches("pod") {
        let conf = load_config(a)?;
        let rev = load_revision(a)?;
        return print_yaml(&make_pod_spec(&rev, &conf.controller));
    }
    else if let Some(a) = args.subcommand_matches("deployment") {
        let conf = load_config(a)?;
        let rev = load_revision(a)?;
        return print_yaml(&deployment_for(a, &rev, &conf));
    }
    else if let Some(a) = args.subcommand_matches("template") {
        let conf = load_config(a)?;
        let rev = load_revision(a)?;
        let mut deployment = deployment_for(a, &rev, &conf);
        if let Some(spec) = deployment.spec.as_mut() {
            spec.template.spec = Some(make_pod_spec(&rev, &conf.controller));
        }
        return print_yaml(&deployment);
    }
    else if let Some(a) = args.subcommand_matches("verify") {
        let conf = load_config(a)?;
        info!("Config for queue sidecar {} verified", conf.controller.queueSidecarImage);
        return Ok(());
    }
    unreachable!("Subcommand valid, but not implemented");
}
