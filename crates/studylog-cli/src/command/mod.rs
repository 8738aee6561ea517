use clap::Parser;

use self::report::ReportArg;

mod report;

/// Per-marker reaction time statistics for user study trial logs
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    report: ReportArg,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    report::run(&args.report)
}
