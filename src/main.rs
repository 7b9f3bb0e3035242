use clap::{Parser, Subcommand};
use log::LevelFilter;

mod config;
mod events;
mod input;
mod kde;
mod model;
mod pipeline;
mod render;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "tickplot")]
#[command(about = "Plot per-minute statistics from simulation CSV logs", long_about = None)]
struct Cli {
    /// Missing subcommand falls through to the usage line.
    #[command(subcommand)]
    cmd: Option<Commands>,

    #[command(flatten)]
    plot: config::PlotConfig,
}

#[derive(Subcommand)]
enum Commands {
    /// Density of minutes at which a target station was reached.
    Density {
        #[arg(num_args = 0.., allow_hyphen_values = true, value_name = "CSV LABEL")]
        inputs: Vec<String>,
    },

    /// Like `density`, counting only iterations that also reached a station.
    DensityDual {
        #[arg(num_args = 0.., allow_hyphen_values = true, value_name = "CSV LABEL")]
        inputs: Vec<String>,
    },

    /// Average number of data items per minute.
    Scatter {
        #[arg(num_args = 0.., allow_hyphen_values = true, value_name = "CSV LABEL")]
        inputs: Vec<String>,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Density { .. } => "density",
            Self::DensityDual { .. } => "density-dual",
            Self::Scatter { .. } => "scatter",
        }
    }

    fn inputs(&self) -> &[String] {
        match self {
            Self::Density { inputs } | Self::DensityDual { inputs } | Self::Scatter { inputs } => {
                inputs
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("TICKPLOT_LOG", "warn,tickplot=info"))
        .init();

    let cli = Cli::parse();
    cli.plot.validate()?;

    let Some(cmd) = cli.cmd else {
        println!("{}", input::usage(input::ANY_COMMAND));
        std::process::exit(1);
    };

    let Some(pairs) = input::pairs(cmd.inputs()) else {
        println!("{}", input::usage(cmd.name()));
        std::process::exit(1);
    };

    let (figure, summary) = match cmd {
        Commands::Density { .. } => pipeline::density(&pairs, &cli.plot)?,
        Commands::DensityDual { .. } => pipeline::density_dual(&pairs, &cli.plot)?,
        Commands::Scatter { .. } => pipeline::scatter(&pairs)?,
    };

    log::info!("{} series on the figure", figure.labels().len());

    if let Some(path) = &cli.plot.dump {
        render::write_summary(path, &summary)?;
    }

    figure.finish(cli.plot.out.as_deref())
}
