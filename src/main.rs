use std::path::PathBuf;

use anyhow::Result;
use attr_tally::{BarChart, DEFAULT_WIDTH};
use clap::{Args, Parser, Subcommand};

mod io_pipe;
use io_pipe::IoPipe;

mod plot;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Chart how many entities have each number of labels.
    Sizes {
        /// Attribute holding the label list of each entity.
        #[arg(short, long, default_value = "attributes")]
        field: String,

        #[command(flatten)]
        chart: ChartArgs,

        #[command(flatten)]
        io: IoArgs,
    },

    /// Chart how many entities have each value.
    Values {
        /// Attribute holding the value of each entity.
        #[arg(short, long, default_value = "value")]
        field: String,

        #[command(flatten)]
        chart: ChartArgs,

        #[command(flatten)]
        io: IoArgs,
    },

    /// Chart how often each label occurs over all entities, most common
    /// first.
    Labels {
        /// Attribute holding the label list of each entity.
        #[arg(short, long, default_value = "attributes")]
        field: String,

        /// Only show this many of the most common labels.
        #[arg(long)]
        top: Option<usize>,

        #[command(flatten)]
        chart: ChartArgs,

        #[command(flatten)]
        io: IoArgs,
    },

    /// Chart how many entities have a value and how many don't.
    Matches {
        /// Attribute holding the value of each entity.
        #[arg(short, long, default_value = "value")]
        field: String,

        /// Expected number of entities, defaults to the number of entities
        /// in the input.
        #[arg(long)]
        total: Option<usize>,

        #[command(flatten)]
        chart: ChartArgs,

        #[command(flatten)]
        io: IoArgs,
    },
}

use Commands::*;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Sizes { field, chart, io } => plot::sizes(&field, chart, io.try_into()?),
        Values { field, chart, io } => {
            plot::values(&field, chart, io.try_into()?)
        }
        Labels {
            field,
            top,
            chart,
            io,
        } => plot::labels(&field, top, chart, io.try_into()?),
        Matches {
            field,
            total,
            chart,
            io,
        } => plot::matches(&field, total, chart, io.try_into()?),
    }
}

/// Standard input/output specification for subcommands.
///
/// By default the subcommand reads from stdin and writes to stdout, this
/// allows pointing to files instead.
#[derive(Debug, Args, Clone)]
pub struct IoArgs {
    /// Input file path, defaults to stdin.
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Output file path, defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Presentation options shared by the charting subcommands.
#[derive(Debug, Args, Clone, Default)]
pub struct ChartArgs {
    /// Chart title, each subcommand has its own default.
    #[arg(long)]
    title: Option<String>,

    /// Label for the bucket axis.
    #[arg(long)]
    x_label: Option<String>,

    /// Label for the count axis.
    #[arg(long)]
    y_label: Option<String>,

    /// Length of the longest bar in characters.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Output the counts as CSV instead of drawing a chart.
    #[arg(long)]
    csv: bool,
}

impl ChartArgs {
    /// Apply user overrides on top of the subcommand's default labels and
    /// render the chart.
    fn render(
        self,
        chart: BarChart,
        title: &str,
        x_label: &str,
    ) -> Result<String> {
        let mut chart = chart.width(self.width);
        chart.title = self.title.unwrap_or_else(|| title.to_owned());
        chart.x_label = self.x_label.unwrap_or_else(|| x_label.to_owned());
        if let Some(y_label) = self.y_label {
            chart.y_label = y_label;
        }

        if self.csv {
            chart.to_csv()
        } else {
            Ok(chart.to_string())
        }
    }
}
