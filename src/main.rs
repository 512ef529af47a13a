use anyhow::Context;
use clap::Parser;
use log::info;
use std::fs::OpenOptions;
use std::path::Path;
use termraster::cli::Cli;
use termraster::events::parse_key_script;
use termraster::{Config, HeadlessSurface, Session, Shape, Surface, Term};

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.format_timestamp_micros();
    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true)
                                     .write(true)
                                     .truncate(true)
                                     .open(path)
                                     .with_context(|| format!("cannot open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run<S: Surface>(surface: S, shape: &Shape, config: Config, graph: bool) -> anyhow::Result<S> {
    let mut session = Session::new(surface, config).show_graph(graph);
    session.draw(shape)?;
    session.run()?;
    Ok(session.into_surface())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_target().as_deref())?;

    let config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("cannot load config {}", path.display()))?,
        None => Config::default(),
    };
    let shape = cli.shape()?;
    info!("starting with {:?}", shape);

    if cli.headless {
        let keys = match &cli.keys {
            Some(script) => parse_key_script(script)?,
            None => Vec::new(),
        };
        let surface = HeadlessSurface::with_keys(config.headless_rows, config.headless_cols, keys).cjk(config.cjk);
        let surface = run(surface, &shape, config, cli.showgraph)?;
        println!("{}", surface.render());
    } else {
        let term = Term::new(config.cjk).context("cannot set up the terminal")?;
        run(term, &shape, config, cli.showgraph)?;
    }
    Ok(())
}
